use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Invoice, InvoiceInput, InvoiceStatus};

pub const CUSTOMER_MESSAGE: &str = "Please select a customer.";
pub const AMOUNT_MESSAGE: &str = "Please enter an amount greater than 0.";
pub const STATUS_MESSAGE: &str = "Please select an invoice status";

/// Raw, untrusted form fields shared by create and update.
///
/// `id` and `date` are not form fields. Unknown keys are dropped during
/// deserialization, so a submitted `date` never reaches the store.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceForm {
    pub customer_id: Option<String>,
    pub amount: Option<String>,
    pub status: Option<String>,
}

/// Field-keyed validation messages, keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn add(&mut self, field: &str, message: &str) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.to_string());
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl InvoiceForm {
    /// Coerce and check every field, collecting all failures before returning.
    pub fn validate(&self) -> Result<InvoiceInput, FieldErrors> {
        let mut errors = FieldErrors::default();

        let customer_id = self
            .customer_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty());
        if customer_id.is_none() {
            errors.add("customerId", CUSTOMER_MESSAGE);
        }

        let amount_cents = self.amount.as_deref().and_then(parse_amount_cents);
        if amount_cents.is_none() {
            errors.add("amount", AMOUNT_MESSAGE);
        }

        let status = self
            .status
            .as_deref()
            .and_then(|s| s.parse::<InvoiceStatus>().ok());
        if status.is_none() {
            errors.add("status", STATUS_MESSAGE);
        }

        match (customer_id, amount_cents, status) {
            (Some(customer_id), Some(amount_cents), Some(status)) => Ok(InvoiceInput {
                customer_id: customer_id.to_string(),
                amount_cents,
                status,
            }),
            _ => Err(errors),
        }
    }
}

/// Parse a whole-unit amount and convert it to minor units.
///
/// Returns `None` unless the amount is a finite number strictly above zero
/// whose cent value fits in an `i64`.
pub fn parse_amount_cents(raw: &str) -> Option<i64> {
    let amount = raw.trim().parse::<f64>().ok()?;
    if !amount.is_finite() || amount <= 0.0 {
        return None;
    }
    let cents = (amount * 100.0).round();
    if cents >= i64::MAX as f64 {
        return None;
    }
    Some(cents as i64)
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct InvoiceList {
    #[schema(value_type = Vec<Invoice>)]
    pub items: Vec<Invoice>,
}
