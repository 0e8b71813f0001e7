use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use crate::templates::{error_page, not_found_page};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Database unavailable: {0}")]
    Connectivity(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(DbErr),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => return Self::Constraint(msg),
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => return Self::Constraint(msg),
            _ => {}
        }

        match err {
            DbErr::Conn(e) => Self::Connectivity(e.to_string()),
            DbErr::ConnectionAcquire(e) => Self::Connectivity(e.to_string()),
            DbErr::RecordNotFound(msg) => Self::NotFound(msg),
            other => Self::Database(other),
        }
    }
}

impl AppError {
    /// Short kind label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Constraint(_) => "constraint",
            Self::Connectivity(_) => "connectivity",
            Self::NotFound(_) => "not_found",
            Self::Database(_) => "database",
            Self::Internal(_) => "internal",
            Self::Other(_) => "other",
        }
    }

    /// Explanation shown to the user when a submission fails.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            Self::Constraint(_) => {
                "It conflicts with existing records or references one that does not exist."
                    .to_string()
            }
            Self::Connectivity(_) => {
                "The database is currently unavailable, please try again later.".to_string()
            }
            Self::NotFound(msg) => msg.clone(),
            Self::Database(_) | Self::Internal(_) | Self::Other(_) => {
                "Something went wrong on our side.".to_string()
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Constraint(_) => StatusCode::CONFLICT,
            Self::Connectivity(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Internal(_) | Self::Other(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound(ref msg) => {
                tracing::debug!("Not found: {}", msg);
                return (StatusCode::NOT_FOUND, Html(not_found_page().into_string()))
                    .into_response();
            }
            Self::Validation(ref msg) => tracing::debug!("Validation error: {}", msg),
            Self::Constraint(ref msg) => tracing::warn!("Constraint violation: {}", msg),
            Self::Connectivity(ref msg) => tracing::error!("Database unavailable: {}", msg),
            Self::Database(ref e) => tracing::error!("Database error: {}", e),
            Self::Internal(ref msg) => tracing::error!("Internal error: {}", msg),
            Self::Other(ref e) => tracing::error!("Unexpected error: {}", e),
        }

        let status = self.status();
        let markup = error_page(status, &self.user_message());
        (status, Html(markup.into_string())).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_not_found_maps_to_not_found() {
        let err: AppError = DbErr::RecordNotFound("venue 7".to_string()).into();
        assert!(matches!(err, AppError::NotFound(ref msg) if msg == "venue 7"));
    }

    #[test]
    fn other_db_errors_stay_database_errors() {
        let err: AppError = DbErr::Custom("boom".to_string()).into();
        assert_eq!(err.kind(), "database");
        assert_eq!(err.user_message(), "Something went wrong on our side.");
    }

    #[test]
    fn validation_message_is_shown_verbatim() {
        let err = AppError::Validation("Unknown genre: Polka".to_string());
        assert_eq!(err.user_message(), "Unknown genre: Polka");
    }
}
