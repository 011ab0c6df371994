//! Dashboard error types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// A stored document exists but cannot be decoded into its record type
    #[error("Malformed {collection} record {id}: {reason}")]
    MalformedRecord {
        collection: &'static str,
        id: String,
        reason: String,
    },

    #[error("Invalid symbol: {0:?}")]
    InvalidSymbol(String),

    #[error("Invalid symbol batch: {reason}")]
    InvalidBatch { reason: String, rejected: Vec<String> },

    #[error("Database error: {0}")]
    Database(#[from] tokio_postgres::Error),

    #[error("Pipeline error: {0}")]
    Pipeline(String),

    #[error("Pipeline timed out after {0} seconds")]
    PipelineTimeout(u64),

    #[error("Not configured: {0}")]
    NotConfigured(&'static str),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DashboardError>;

impl DashboardError {
    pub fn malformed(
        collection: &'static str,
        id: impl Into<String>,
        reason: impl std::fmt::Display,
    ) -> Self {
        DashboardError::MalformedRecord {
            collection,
            id: id.into(),
            reason: reason.to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            DashboardError::NotFound(_) => StatusCode::NOT_FOUND,
            DashboardError::InvalidSymbol(_)
            | DashboardError::InvalidBatch { .. }
            | DashboardError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            DashboardError::Unauthorized => StatusCode::UNAUTHORIZED,
            DashboardError::NotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
            DashboardError::PipelineTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            DashboardError::MalformedRecord { .. }
            | DashboardError::Database(_)
            | DashboardError::Pipeline(_)
            | DashboardError::Serialization(_)
            | DashboardError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            DashboardError::NotFound(_) => "not_found",
            DashboardError::MalformedRecord { .. } => "malformed_record",
            DashboardError::InvalidSymbol(_) => "invalid_symbol",
            DashboardError::InvalidBatch { .. } => "invalid_batch",
            DashboardError::Database(_) => "database_error",
            DashboardError::Pipeline(_) => "pipeline_error",
            DashboardError::PipelineTimeout(_) => "pipeline_timeout",
            DashboardError::NotConfigured(_) => "not_configured",
            DashboardError::InvalidRequest(_) => "invalid_request",
            DashboardError::Unauthorized => "unauthorized",
            DashboardError::Serialization(_) => "serialization_error",
            DashboardError::Io(_) => "io_error",
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let mut body = json!({
            "error": self.code(),
            "message": self.to_string(),
        });
        if let DashboardError::InvalidBatch { rejected, .. } = &self {
            body["rejected"] = json!(rejected);
        }

        (status, Json(body)).into_response()
    }
}
