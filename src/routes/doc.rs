use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::invoices::{FieldErrors, InvoiceForm, InvoiceList},
    models::{Invoice, InvoiceStatus},
    response::{ApiResponse, Meta},
    routes::{health, invoices},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        invoices::list_invoices,
        invoices::create_invoice,
        invoices::update_invoice,
        invoices::delete_invoice
    ),
    components(
        schemas(
            Invoice,
            InvoiceStatus,
            InvoiceForm,
            InvoiceList,
            FieldErrors,
            health::HealthData,
            Meta,
            ApiResponse<InvoiceList>,
            ApiResponse<health::HealthData>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Invoices", description = "Invoice form actions and listing"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
