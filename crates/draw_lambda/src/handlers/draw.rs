use std::collections::BTreeMap;

use draw_core::contract::{DrawRequest, DrawResponse};
use draw_core::logging::DrawLogger;
use draw_core::selection::select_winners;
use draw_core::storage_keys::{draw_object_key, object_location, ENTRY_PREFIX};
use draw_core::ticket::TicketRecord;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::adapters::object_store::EntryStore;
use crate::config::DrawSettings;

pub const POWERED_BY: &str = "al.paca";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DrawError {
    #[error("malformed draw request: {0}")]
    InvalidRequest(String),
    #[error("no entries were found")]
    NoEntries,
    #[error("no valid winning tickets were found")]
    NoValidWinners,
    #[error("failed to persist draw result: {0}")]
    PersistFailed(String),
}

impl DrawError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidRequest(_)
            | Self::NoEntries
            | Self::NoValidWinners
            | Self::PersistFailed(_) => 400,
        }
    }
}

/// Runs one draw for an API Gateway (or direct) invocation.
///
/// Configuration is checked before anything touches the store; a missing
/// setting yields a bare 500. Every other failure yields a bare 400.
pub fn handle_draw_event<R: Rng + ?Sized>(
    event: Value,
    settings: &DrawSettings,
    store: &dyn EntryStore,
    rng: &mut R,
    logger: &dyn DrawLogger,
) -> ApiGatewayResponse {
    let config = match settings.validate() {
        Ok(value) => value,
        Err(error) => {
            logger.error("config_invalid", json!({ "message": error.to_string() }));
            return status_only(500);
        }
    };

    let request = match parse_draw_request(event) {
        Ok(value) => value,
        Err(error) => {
            logger.error("request_invalid", json!({ "message": error.to_string() }));
            return status_only(error.status_code());
        }
    };

    let draw_id = Uuid::new_v4().to_string();
    let winner_count = request.winner_count();
    logger.info(
        "draw_started",
        json!({
            "draw_id": draw_id,
            "tickets_to_return": winner_count,
        }),
    );

    let winners = match run_draw(&draw_id, winner_count, &config.bucket, store, rng, logger) {
        Ok(value) => value,
        Err(error) => {
            logger.error(
                "draw_failed",
                json!({
                    "draw_id": draw_id,
                    "bucket": config.bucket,
                    "message": error.to_string(),
                }),
            );
            return status_only(error.status_code());
        }
    };

    let body = match serde_json::to_string(&DrawResponse::new(draw_id.clone(), &winners)) {
        Ok(value) => value,
        Err(error) => {
            logger.error(
                "response_serialization_failed",
                json!({ "draw_id": draw_id, "message": error.to_string() }),
            );
            return status_only(500);
        }
    };

    logger.info(
        "draw_completed",
        json!({
            "draw_id": draw_id,
            "winners": winners.len(),
        }),
    );
    ApiGatewayResponse {
        status_code: 200,
        headers: BTreeMap::from([
            ("Content-Type".to_string(), "application/json".to_string()),
            ("x-powered-by".to_string(), POWERED_BY.to_string()),
        ]),
        body: Some(body),
    }
}

/// Lists, selects and persists. Returns the full winner records in
/// acceptance order once the draw file has been written.
pub fn run_draw<R: Rng + ?Sized>(
    draw_id: &str,
    winner_count: usize,
    bucket: &str,
    store: &dyn EntryStore,
    rng: &mut R,
    logger: &dyn DrawLogger,
) -> Result<Vec<TicketRecord>, DrawError> {
    let entry_keys = match store.list_keys(ENTRY_PREFIX) {
        Ok(keys) => keys,
        Err(error) => {
            logger.error(
                "entry_listing_failed",
                json!({
                    "draw_id": draw_id,
                    "bucket": bucket,
                    "prefix": ENTRY_PREFIX,
                    "message": error,
                }),
            );
            Vec::new()
        }
    };
    logger.info(
        "entries_listed",
        json!({ "draw_id": draw_id, "entries": entry_keys.len() }),
    );
    if entry_keys.is_empty() {
        return Err(DrawError::NoEntries);
    }

    let winners = select_winners(
        &entry_keys,
        winner_count,
        rng,
        &mut |key: &str| store.read_object(key),
        logger,
    );
    if winners.is_empty() {
        return Err(DrawError::NoValidWinners);
    }

    write_draw_result(draw_id, bucket, &winners, store, logger)?;
    Ok(winners)
}

fn write_draw_result(
    draw_id: &str,
    bucket: &str,
    winners: &[TicketRecord],
    store: &dyn EntryStore,
    logger: &dyn DrawLogger,
) -> Result<(), DrawError> {
    let key = draw_object_key(draw_id);
    let location = object_location(bucket, &key);
    logger.info(
        "draw_writing",
        json!({ "draw_id": draw_id, "location": location }),
    );

    let body = serde_json::to_vec(winners)
        .map_err(|error| DrawError::PersistFailed(error.to_string()))?;

    store.write_object(&key, &body).map_err(|error| {
        logger.error(
            "draw_write_failed",
            json!({
                "draw_id": draw_id,
                "location": location,
                "winners": winners,
                "message": error,
            }),
        );
        DrawError::PersistFailed(error)
    })
}

fn parse_draw_request(event: Value) -> Result<DrawRequest, DrawError> {
    let payload = normalize_apigw_event(event).map_err(DrawError::InvalidRequest)?;
    serde_json::from_value(payload).map_err(|error| DrawError::InvalidRequest(error.to_string()))
}

fn normalize_apigw_event(event: Value) -> Result<Value, String> {
    let Some(object) = event.as_object() else {
        return Err("Request payload must be a JSON object".to_string());
    };

    let Some(body) = object.get("body") else {
        return Ok(event);
    };

    match body {
        Value::Null => Ok(json!({})),
        Value::Object(_) => Ok(body.clone()),
        Value::String(text) if text.trim().is_empty() => Ok(json!({})),
        Value::String(text) => {
            serde_json::from_str(text).map_err(|error| format!("Malformed JSON body: {error}"))
        }
        _ => Err("Request body must be a JSON object".to_string()),
    }
}

fn status_only(status_code: u16) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code,
        headers: BTreeMap::new(),
        body: None,
    }
}
