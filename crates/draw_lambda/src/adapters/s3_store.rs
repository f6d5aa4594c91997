use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::primitives::ByteStream;

use crate::adapters::object_store::EntryStore;
use crate::config::StoreConfig;

/// `EntryStore` backed by a single S3 bucket.
///
/// Calls block the current worker thread; it must run inside a multi-threaded
/// tokio runtime.
#[derive(Debug, Clone)]
pub struct S3EntryStore {
    bucket: String,
    s3_client: aws_sdk_s3::Client,
}

impl S3EntryStore {
    pub fn new(bucket: impl Into<String>, s3_client: aws_sdk_s3::Client) -> Self {
        Self {
            bucket: bucket.into(),
            s3_client,
        }
    }

    /// Builds a client from the validated settings, using their key pair
    /// instead of the default credential chain.
    pub async fn connect(config: &StoreConfig) -> Self {
        let credentials = Credentials::new(
            config.access_key_id.clone(),
            config.secret_access_key.clone(),
            config.session_token.clone(),
            None,
            "draw-environment",
        );
        let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .credentials_provider(credentials)
            .load()
            .await;
        Self::new(config.bucket.clone(), aws_sdk_s3::Client::new(&aws_config))
    }
}

impl EntryStore for S3EntryStore {
    fn list_keys(&self, prefix: &str) -> Result<Vec<String>, String> {
        let bucket = self.bucket.clone();
        let prefix = prefix.to_string();
        let client = self.s3_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let output = client
                    .list_objects_v2()
                    .bucket(bucket)
                    .prefix(prefix)
                    .send()
                    .await
                    .map_err(|error| format!("failed to list objects in s3: {error}"))?;

                Ok::<Vec<String>, String>(
                    output
                        .contents()
                        .iter()
                        .filter_map(|object| object.key().map(str::to_string))
                        .collect(),
                )
            })
        })
    }

    fn read_object(&self, key: &str) -> Result<Vec<u8>, String> {
        let bucket = self.bucket.clone();
        let object_key = key.to_string();
        let client = self.s3_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let output = client
                    .get_object()
                    .bucket(bucket)
                    .key(object_key)
                    .send()
                    .await
                    .map_err(|error| format!("failed to read object from s3: {error}"))?;
                let body = output
                    .body
                    .collect()
                    .await
                    .map_err(|error| format!("failed to read object body from s3: {error}"))?;
                Ok::<Vec<u8>, String>(body.into_bytes().to_vec())
            })
        })
    }

    fn write_object(&self, key: &str, body: &[u8]) -> Result<(), String> {
        let bucket = self.bucket.clone();
        let object_key = key.to_string();
        let body_bytes = body.to_vec();
        let client = self.s3_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .put_object()
                    .bucket(bucket)
                    .key(object_key)
                    .content_type("application/json")
                    .body(ByteStream::from(body_bytes))
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| format!("failed to write object to s3: {error}"))
            })
        })
    }
}
