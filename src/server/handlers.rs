use super::types::{ChatRequest, ChatResponse, ErrorResponse, HealthResponse};
use crate::{
    Error,
    chat::ChatRelay,
    predict::{Scorer, SymptomReport},
};
use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

pub const HEALTH_STATUS: &str = "Backend running";

#[derive(Clone)]
pub struct AppState {
    pub chat: Arc<ChatRelay>,
    pub scorer: Arc<dyn Scorer>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_response(err: &Error) -> ApiError {
    (
        err.status_code(),
        Json(ErrorResponse {
            error: err.public_message(),
        }),
    )
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HEALTH_STATUS.to_string(),
    })
}

pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        debug!("Rejected chat body: {}", rejection.body_text());
        error_response(&Error::invalid_request("Message is required"))
    })?;

    info!("Received chat message ({} chars)", request.message.len());

    match state.chat.reply(&request.message).await {
        Ok(reply) => Ok(Json(ChatResponse { reply })),
        Err(e) => {
            if matches!(e, Error::InvalidRequest(_)) {
                warn!("Invalid chat request: {}", e);
            } else {
                error!("Chat relay failed: {}", e);
            }
            Err(error_response(&e))
        }
    }
}

pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<SymptomReport>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(report) = payload.map_err(|rejection| {
        debug!("Rejected predict body: {}", rejection.body_text());
        error_response(&Error::invalid_request("No symptoms provided"))
    })?;

    if let Err(e) = report.validate() {
        warn!("Invalid prediction request: {}", e);
        return Err(error_response(&e));
    }

    let request_id = Uuid::new_v4();
    info!(
        "Prediction request {}: {} symptoms, duration '{}', severity '{}'",
        request_id,
        report.symptoms.len(),
        report.duration,
        report.severity
    );

    match state.scorer.score(&report).await {
        Ok(prediction) => {
            info!("Prediction request {} succeeded", request_id);
            Ok(Json(prediction))
        }
        Err(e) => {
            error!("Prediction request {} failed: {}", request_id, e);
            Err(error_response(&e))
        }
    }
}
