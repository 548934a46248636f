use chrono::{NaiveDate, Utc};

use crate::{
    cache::CachedPage,
    config::MissingRowPolicy,
    dto::invoices::{InvoiceForm, InvoiceList},
    error::{Action, AppError, AppResult},
    models::{INVOICES_PATH, InvoiceInput, NewInvoice},
    response::{ApiResponse, Meta, Navigate},
    state::AppState,
    store::StoreError,
};

/// Validate, insert with today's date, then revalidate and redirect to the listing.
pub async fn create_invoice(state: &AppState, form: InvoiceForm) -> AppResult<Navigate> {
    let input = validate(&form)?;
    let invoice = NewInvoice::from_input(input, today());

    let id = state
        .store
        .insert(invoice)
        .await
        .map_err(|err| store_failure(Action::Create, err))?;
    tracing::info!(invoice_id = %id, "invoice created");

    state.pages.revalidate_path(INVOICES_PATH);
    Ok(Navigate::to(INVOICES_PATH))
}

/// Overwrite customer, amount and status of `id`. The row's date is never written.
pub async fn update_invoice(state: &AppState, id: &str, form: InvoiceForm) -> AppResult<Navigate> {
    let input = validate(&form)?;

    let affected = state
        .store
        .update(id, input)
        .await
        .map_err(|err| store_failure(Action::Update, err))?;
    ensure_row_affected(state.missing_row, affected, id)?;
    tracing::info!(invoice_id = %id, affected, "invoice updated");

    state.pages.revalidate_path(INVOICES_PATH);
    Ok(Navigate::to(INVOICES_PATH))
}

/// Delete `id` and revalidate the listing. No redirect: the caller is
/// already on the listing page.
pub async fn delete_invoice(state: &AppState, id: &str) -> AppResult<()> {
    let affected = state
        .store
        .delete(id)
        .await
        .map_err(|err| store_failure(Action::Delete, err))?;
    ensure_row_affected(state.missing_row, affected, id)?;
    tracing::info!(invoice_id = %id, affected, "invoice deleted");

    state.pages.revalidate_path(INVOICES_PATH);
    Ok(())
}

/// Serve the listing from the page cache, rendering and caching it on a miss.
pub async fn list_invoices(state: &AppState) -> AppResult<ApiResponse<InvoiceList>> {
    let page = match state.pages.get(INVOICES_PATH) {
        Some(page) => page,
        None => {
            let generation = state.pages.generation(INVOICES_PATH);
            let invoices = state
                .store
                .list()
                .await
                .map_err(|err| store_failure(Action::Fetch, err))?;
            let page = CachedPage::new(invoices);
            // A mutation that committed during the read has already
            // revalidated; its snapshot must not be cached.
            let cached = state
                .pages
                .put_if_generation(INVOICES_PATH, generation, page.clone());
            tracing::debug!(total = page.invoices.len(), cached, "rendered invoice listing");
            page
        }
    };

    let meta = Meta::new(page.invoices.len() as i64, page.rendered_at);
    let data = InvoiceList {
        items: page.invoices,
    };
    Ok(ApiResponse::success("Invoices", data, Some(meta)))
}

fn validate(form: &InvoiceForm) -> AppResult<InvoiceInput> {
    form.validate().map_err(|errors| {
        tracing::warn!(fields = errors.len(), "invoice form rejected");
        AppError::Validation(errors)
    })
}

fn store_failure(action: Action, err: StoreError) -> AppError {
    tracing::error!(error = %err, "database error: failed to {action}");
    AppError::database(action, err)
}

fn ensure_row_affected(policy: MissingRowPolicy, affected: u64, id: &str) -> AppResult<()> {
    if affected == 0 {
        match policy {
            MissingRowPolicy::Ignore => {
                tracing::debug!(invoice_id = %id, "no invoice matched; treating as success");
            }
            MissingRowPolicy::NotFound => return Err(AppError::NotFound),
        }
    }
    Ok(())
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}
