use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;
use serde_json::json;
use thiserror::Error;

/// Storage failure surfaced by the repository layer.
///
/// Carries only a human-readable message; the storage engine's own error is logged
/// where it happens and never handed to callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct DataAccessError {
    message: String,
}

impl DataAccessError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Failure while seeding the database from the ledger file. Always fatal at startup.
#[derive(Debug, Error)]
pub enum IngestionError {
    #[error("Failed to read ledger: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid commitment amount {value:?} on line {line}")]
    InvalidAmount { line: u64, value: String },
    #[error("Total commitment for {investor:?} overflows on line {line}")]
    TotalOverflow { investor: String, line: u64 },
    #[error("Failed to store ledger: {0}")]
    Storage(#[from] DbErr),
}

/// Errors returned by HTTP handlers.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Investor not found")]
    InvestorNotFound(i32),
    #[error(transparent)]
    DataAccess(#[from] DataAccessError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvestorNotFound(_) => StatusCode::NOT_FOUND,
            AppError::DataAccess(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "detail": self.to_string(),
        }));

        (status, body).into_response()
    }
}
