use axum::{
    Form, Json, Router,
    extract::{Path, State, rejection::FormRejection},
    routing::{get, post},
};

use crate::{
    dto::invoices::{InvoiceForm, InvoiceList},
    error::AppResult,
    response::{ApiResponse, Meta, Navigate},
    services::invoice_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_invoices).post(create_invoice))
        .route("/{id}", post(update_invoice).delete(delete_invoice))
}

#[utoipa::path(
    get,
    path = "/dashboard/invoices",
    responses(
        (status = 200, description = "List invoices", body = ApiResponse<InvoiceList>),
        (status = 500, description = "Database error"),
    ),
    tag = "Invoices"
)]
pub async fn list_invoices(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<InvoiceList>>> {
    let response = invoice_service::list_invoices(&state).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/dashboard/invoices",
    request_body(content = InvoiceForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Created; redirects to the invoice listing"),
        (status = 415, description = "Body is not form-encoded"),
        (status = 422, description = "Invalid form fields"),
        (status = 500, description = "Database error"),
    ),
    tag = "Invoices"
)]
pub async fn create_invoice(
    State(state): State<AppState>,
    form: Result<Form<InvoiceForm>, FormRejection>,
) -> AppResult<Navigate> {
    let Form(form) = form?;
    invoice_service::create_invoice(&state, form).await
}

#[utoipa::path(
    post,
    path = "/dashboard/invoices/{id}",
    params(
        ("id" = String, Path, description = "Invoice ID")
    ),
    request_body(content = InvoiceForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Updated; redirects to the invoice listing"),
        (status = 404, description = "No such invoice (not_found policy only)"),
        (status = 415, description = "Body is not form-encoded"),
        (status = 422, description = "Invalid form fields"),
        (status = 500, description = "Database error"),
    ),
    tag = "Invoices"
)]
pub async fn update_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: Result<Form<InvoiceForm>, FormRejection>,
) -> AppResult<Navigate> {
    let Form(form) = form?;
    invoice_service::update_invoice(&state, &id, form).await
}

#[utoipa::path(
    delete,
    path = "/dashboard/invoices/{id}",
    params(
        ("id" = String, Path, description = "Invoice ID")
    ),
    responses(
        (status = 200, description = "Deleted invoice"),
        (status = 404, description = "No such invoice (not_found policy only)"),
        (status = 500, description = "Database error"),
    ),
    tag = "Invoices"
)]
pub async fn delete_invoice(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    invoice_service::delete_invoice(&state, &id).await?;
    Ok(Json(ApiResponse::success(
        "Deleted Invoice.",
        serde_json::json!({ "id": id }),
        Some(Meta::empty()),
    )))
}
