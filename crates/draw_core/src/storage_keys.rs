pub const ENTRY_PREFIX: &str = "entry/";
pub const DRAW_PREFIX: &str = "draw/";

pub fn draw_object_key(draw_id: &str) -> String {
    format!("{DRAW_PREFIX}{draw_id}.json")
}

pub fn object_location(bucket: &str, key: &str) -> String {
    format!("s3://{bucket}/{key}")
}
