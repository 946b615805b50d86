use axum::extract::rejection::JsonRejection;
use axum::{Json, http::StatusCode, response::IntoResponse};
use fleet_schema::{ErrorBody, ErrorObject};
use serde_json::Value;
use std::fmt;
use thiserror::Error as ThisError;
use tracing::error;

use super::ValidationError;

/// Entities that can be reported as missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Ship,
    CrewMember,
    Route,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Ship => f.write_str("Ship"),
            Entity::CrewMember => f.write_str("Crewmember"),
            Entity::Route => f.write_str("Route"),
        }
    }
}

#[derive(Debug, ThisError)]
pub enum FleetError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    #[error("{0} not found")]
    NotFound(Entity),

    #[error("Ractor error: {0}")]
    RactorError(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

impl FleetError {
    pub fn status(&self) -> StatusCode {
        match self {
            FleetError::Validation(_) | FleetError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            FleetError::NotFound(_) => StatusCode::NOT_FOUND,
            FleetError::RactorError(_) | FleetError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<JsonRejection> for FleetError {
    fn from(rejection: JsonRejection) -> Self {
        FleetError::InvalidPayload(rejection.body_text())
    }
}

impl From<serde_json::Error> for FleetError {
    fn from(e: serde_json::Error) -> Self {
        FleetError::InvalidPayload(e.to_string())
    }
}

impl IntoResponse for FleetError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            // Detail stays in the log; the caller only learns that it failed.
            error!(error = %self, "store operation failed");
        }
        let error_body = match self {
            FleetError::Validation(err) => ErrorObject {
                code: "VALIDATION_ERROR".to_string(),
                message: err.to_string(),
                details: None,
            },
            FleetError::InvalidPayload(reason) => ErrorObject {
                code: "INVALID_PAYLOAD".to_string(),
                message: "Request body has an unexpected shape.".to_string(),
                details: Some(Value::String(reason)),
            },
            FleetError::NotFound(entity) => ErrorObject {
                code: "NOT_FOUND".to_string(),
                message: format!("{entity} not found"),
                details: None,
            },
            FleetError::RactorError(_) | FleetError::DatabaseError(_) => ErrorObject {
                code: "INTERNAL_ERROR".to_string(),
                message: "An internal server error occurred.".to_string(),
                details: None,
            },
        };
        (status, Json(ErrorBody { inner: error_body })).into_response()
    }
}
