//! `/query` and `/reset` handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use gamechat_agent::RESET_MESSAGE;
use gamechat_core::{Error, ErrorKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::SharedState;
use crate::session::ClientSession;

pub(crate) const EMPTY_QUERY: &str = "Query field is required and cannot be empty.";
pub(crate) const NOT_A_STRING: &str = "Query must be a string.";
pub(crate) const NOT_AN_OBJECT: &str = "Request body must be a JSON object.";
pub(crate) const TOO_LARGE: &str = "Request body is too large.";
const SERVICE_FAILED: &str = "Upstream completion service failed.";
const SERVICE_TIMED_OUT: &str = "Upstream completion service timed out.";
const UNCLASSIFIED: &str = "Could not classify the query.";
const INTERNAL: &str = "Internal server error.";

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QueryResponse {
    pub response: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResetResponse {
    pub message: String,
}

pub(crate) type ApiError = (StatusCode, Json<ErrorResponse>);

pub(crate) fn api_error(status: StatusCode, message: &str) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

pub(crate) async fn query_handler(
    State(state): State<SharedState>,
    session: ClientSession,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let result = run_query(&state, &session, payload).await;
    session.attach(result.into_response())
}

async fn run_query(
    state: &SharedState,
    session: &ClientSession,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<QueryResponse>, ApiError> {
    let query = extract_query(payload)?;

    let outcome = state
        .orchestrator
        .handle_session(&session.id, &query)
        .await
        .map_err(error_response)?;

    Ok(Json(QueryResponse {
        response: outcome.answer,
    }))
}

pub(crate) async fn reset_handler(
    State(state): State<SharedState>,
    session: ClientSession,
) -> Result<Json<ResetResponse>, ApiError> {
    // A client without a cookie has nothing stored.
    let message = if session.minted {
        RESET_MESSAGE
    } else {
        state
            .orchestrator
            .reset_session(&session.id)
            .await
            .map_err(error_response)?
    };

    Ok(Json(ResetResponse {
        message: message.to_string(),
    }))
}

/// Pull a non-blank string `query` out of the request body.
fn extract_query(payload: Result<Json<Value>, JsonRejection>) -> Result<String, ApiError> {
    let Json(body) = payload.map_err(|rejection| {
        debug!(reason = %rejection.body_text(), "Rejected query body");
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            api_error(StatusCode::PAYLOAD_TOO_LARGE, TOO_LARGE)
        } else {
            api_error(StatusCode::BAD_REQUEST, NOT_AN_OBJECT)
        }
    })?;

    let Value::Object(mut fields) = body else {
        return Err(api_error(StatusCode::BAD_REQUEST, NOT_AN_OBJECT));
    };

    match fields.remove("query") {
        None | Some(Value::Null) => Err(api_error(StatusCode::BAD_REQUEST, EMPTY_QUERY)),
        Some(Value::String(query)) if query.trim().is_empty() => {
            Err(api_error(StatusCode::BAD_REQUEST, EMPTY_QUERY))
        }
        Some(Value::String(query)) => Ok(query),
        Some(_) => Err(api_error(StatusCode::BAD_REQUEST, NOT_A_STRING)),
    }
}

/// Map a turn failure onto a status code and a fixed message.
/// Error details only go to the logs.
fn error_response(err: Error) -> ApiError {
    if let Error::Classification { reply } = &err {
        warn!(reply = %reply, "Classifier returned an unknown label");
        return api_error(StatusCode::BAD_GATEWAY, UNCLASSIFIED);
    }

    match err.kind() {
        ErrorKind::Validation => match err {
            Error::Validation(message) => api_error(StatusCode::BAD_REQUEST, &message),
            _ => api_error(StatusCode::BAD_REQUEST, EMPTY_QUERY),
        },
        ErrorKind::Service => {
            warn!(error = %err, "Turn failed on a backend service");
            api_error(StatusCode::BAD_GATEWAY, SERVICE_FAILED)
        }
        ErrorKind::Timeout => {
            warn!(error = %err, "Turn timed out");
            api_error(StatusCode::GATEWAY_TIMEOUT, SERVICE_TIMED_OUT)
        }
        ErrorKind::Unexpected => {
            error!(error = %err, "Turn failed unexpectedly");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL)
        }
    }
}
