//! Runs a single draw against the configured bucket and prints the response.
//!
//! Reads the same environment as the Lambda (`bucket_name`,
//! `aws_access_key_id`, `aws_secret_access_key`) and wraps the request in an
//! API Gateway style event before handing it to the draw handler.

use clap::Parser;
use draw_core::logging::TracingLogger;
use draw_lambda::adapters::object_store::{EntryStore, UnconfiguredStore};
use draw_lambda::adapters::s3_store::S3EntryStore;
use draw_lambda::config::DrawSettings;
use draw_lambda::handlers::draw::handle_draw_event;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;

#[derive(Parser)]
#[command(name = "draw_local", about = "Run one ticket draw from the command line")]
struct Cli {
    /// Number of winners to request
    #[arg(long, default_value_t = 5, allow_negative_numbers = true)]
    tickets_to_return: i64,
    /// Fixed shuffle seed for reproducible local runs
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    draw_lambda::telemetry::init_subscriber();
    let cli = Cli::parse();

    let settings = DrawSettings::from_env();
    let s3_store = match settings.validate() {
        Ok(config) => Some(S3EntryStore::connect(&config).await),
        Err(_) => None,
    };
    let unconfigured = UnconfiguredStore;
    let store = s3_store
        .as_ref()
        .map(|value| value as &dyn EntryStore)
        .unwrap_or(&unconfigured);
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let event = json!({
        "body": json!({ "tickets_to_return": cli.tickets_to_return }).to_string(),
    });
    let response = handle_draw_event(
        event,
        &settings,
        store,
        &mut rng,
        &TracingLogger::new("draw_local"),
    );

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
