use axum::response::{IntoResponse, Redirect, Response};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema, Clone)]
pub struct Meta {
    pub total: Option<i64>,
    pub cached_at: Option<DateTime<Utc>>,
}

impl Meta {
    pub fn new(total: i64, cached_at: DateTime<Utc>) -> Self {
        Self {
            total: Some(total),
            cached_at: Some(cached_at),
        }
    }

    pub fn empty() -> Self {
        Self {
            total: None,
            cached_at: None,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: Option<T>,
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T, meta: Option<Meta>) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            meta,
        }
    }

    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
            meta: Some(Meta::empty()),
        }
    }
}

/// Where the caller should go after a successful mutation.
///
/// Rendered as `303 See Other`, so a browser form post lands on a GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigate {
    pub to: &'static str,
}

impl Navigate {
    pub fn to(path: &'static str) -> Self {
        Self { to: path }
    }
}

impl IntoResponse for Navigate {
    fn into_response(self) -> Response {
        Redirect::to(self.to).into_response()
    }
}
