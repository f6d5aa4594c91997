use draw_core::logging::TracingLogger;
use draw_lambda::adapters::object_store::{EntryStore, UnconfiguredStore};
use draw_lambda::adapters::s3_store::S3EntryStore;
use draw_lambda::config::DrawSettings;
use draw_lambda::handlers::draw::{handle_draw_event, ApiGatewayResponse};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;

async fn handle_request(event: LambdaEvent<Value>) -> Result<ApiGatewayResponse, Error> {
    let settings = DrawSettings::from_env();
    tracing::info!(request_id = %event.context.request_id, "draw invocation received");

    // The handler reports invalid settings itself; only build a client when
    // there is something to connect with.
    let s3_store = match settings.validate() {
        Ok(config) => Some(S3EntryStore::connect(&config).await),
        Err(_) => None,
    };

    Ok(dispatch(event.payload, &settings, s3_store.as_ref()))
}

fn dispatch(
    payload: Value,
    settings: &DrawSettings,
    s3_store: Option<&S3EntryStore>,
) -> ApiGatewayResponse {
    let unconfigured = UnconfiguredStore;
    let store = s3_store
        .map(|value| value as &dyn EntryStore)
        .unwrap_or(&unconfigured);
    let mut rng = StdRng::from_entropy();

    handle_draw_event(
        payload,
        settings,
        store,
        &mut rng,
        &TracingLogger::new("draw_handler"),
    )
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    draw_lambda::telemetry::init_subscriber();
    lambda_runtime::run(service_fn(handle_request)).await
}
