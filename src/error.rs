use std::fmt;

use axum::{
    extract::rejection::FormRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::{
    dto::invoices::FieldErrors,
    response::{ApiResponse, Meta},
    store::StoreError,
};

/// The store call an error came from; names the failure in user-facing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Update,
    Delete,
    Fetch,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Create => f.write_str("Create Invoice"),
            Action::Update => f.write_str("Update Invoice"),
            Action::Delete => f.write_str("Delete Invoice"),
            Action::Fetch => f.write_str("Fetch Invoices"),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invoice Not Found.")]
    NotFound,

    #[error("Invalid Fields. Failed to save Invoice.")]
    Validation(FieldErrors),

    #[error("Database Error: Failed to {action}.")]
    Database {
        action: Action,
        #[source]
        source: StoreError,
    },

    #[error("{0}")]
    Rejected(#[from] FormRejection),
}

impl AppError {
    pub fn database(action: Action, source: StoreError) -> Self {
        AppError::Database { action, source }
    }
}

#[derive(Serialize)]
struct ValidationData {
    errors: FieldErrors,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Rejected(rejection) => rejection.status(),
        };
        let message = self.to_string();

        match self {
            AppError::Validation(errors) => {
                let body = ApiResponse {
                    message,
                    data: Some(ValidationData { errors }),
                    meta: Some(Meta::empty()),
                };
                (status, axum::Json(body)).into_response()
            }
            _ => {
                let body = ApiResponse::<()>::message_only(message);
                (status, axum::Json(body)).into_response()
            }
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
