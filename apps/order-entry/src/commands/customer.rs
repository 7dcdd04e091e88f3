//! # Customer Commands
//!
//! The "New Account" screen: describe the form, then validate the entered
//! values and build the backend's add-customer request.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use khata_core::{AccountGroup, CustomerField, CustomerForm, FieldKind, NewCustomerRequest};

use crate::error::ApiError;
use crate::state::AppConfig;

/// Describes one input of the customer form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldInfo {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Allowed values for choice fields.
    pub options: Vec<&'static str>,
}

/// Lists the customer form's fields in display order.
pub fn customer_form_fields() -> Vec<FieldInfo> {
    debug!("customer_form_fields command");

    CustomerField::ALL
        .iter()
        .map(|field| FieldInfo {
            key: field.key(),
            label: field.label(),
            kind: field.kind(),
            required: field.is_required(),
            options: match field.kind() {
                FieldKind::Choice => AccountGroup::ALL.iter().map(|g| g.label()).collect(),
                _ => Vec::new(),
            },
        })
        .collect()
}

/// Builds the add-customer request from `key=value` pairs.
///
/// ## Arguments
/// * `values` - form keys (`name`, `postalCode`, `gstNo`, ...) with their text
/// * `now` - modification timestamp stamped onto the request
pub fn build_customer_request(
    config: &AppConfig,
    values: &[(String, String)],
    now: DateTime<Utc>,
) -> Result<NewCustomerRequest, ApiError> {
    debug!(fields = values.len(), "build_customer_request command");

    let mut form = CustomerForm::new();
    for (key, text) in values {
        let field: CustomerField = key.parse()?;
        form.set(field, text)?;
    }

    let request = NewCustomerRequest::build(&form, &config.session, now)?;
    info!(name = %request.name, group = %request.group_name, "Customer request built");
    Ok(request)
}
