//! # Order Commands
//!
//! Commands for composing a sales order.
//!
//! ## Order Entry Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Order Entry Lifecycle                                │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ Customer │────►│  Lines   │────►│ Request  │       │
//! │  │  Order   │     │ Selected │     │  Added   │     │  Built   │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                                         │                               │
//! │                     start_line ─► edit_line ─► commit_line              │
//! │                     add_line (one shot)                                 │
//! │                     remove_line                                         │
//! │                                         │                               │
//! │                                         ▼                               │
//! │                     clear_order ──────────────► (back to empty)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use khata_core::{Customer, LineDraft, Order, OrderLine, OrderRequest, OrderSummary};

use crate::error::ApiError;
use crate::state::{AppConfig, CatalogState, OrderState};

/// Order response: header, lines and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub doc_no: String,
    pub date: String,
    pub customer: Option<Customer>,
    pub lines: Vec<OrderLine>,
    pub summary: OrderSummary,
}

impl From<&Order> for OrderResponse {
    fn from(order: &Order) -> Self {
        OrderResponse {
            doc_no: order.doc_no().to_string(),
            date: order.date().format("%Y-%m-%d").to_string(),
            customer: order.customer().cloned(),
            lines: order.lines().to_vec(),
            summary: order.summary(),
        }
    }
}

/// Input box of the line entry form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LineField {
    Quantity,
    Rate,
    Value,
    Discount,
}

/// Gets the current order.
pub fn get_order(order: &OrderState) -> OrderResponse {
    debug!("get_order command");
    order.with_order(|o| OrderResponse::from(o))
}

/// Selects the customer the order is for.
pub fn select_customer(
    catalog: &CatalogState,
    order: &OrderState,
    customer_id: i64,
) -> Result<OrderResponse, ApiError> {
    debug!(customer_id = %customer_id, "select_customer command");

    let customer = catalog.catalog().find_customer(customer_id)?.clone();
    Ok(order.with_order_mut(|o| {
        o.select_customer(customer);
        OrderResponse::from(&*o)
    }))
}

/// Adds a line in one step from raw form text.
///
/// ## Behavior
/// - Unparsable or empty quantity counts as 0
/// - Unparsable or empty rate falls back to the catalog rate
/// - The item's code/name/HSN are frozen onto the line when it is added
pub fn add_line(
    config: &AppConfig,
    catalog: &CatalogState,
    order: &OrderState,
    item_code: &str,
    quantity: &str,
    rate: &str,
) -> Result<OrderResponse, ApiError> {
    debug!(item_code = %item_code, quantity = %quantity, rate = %rate, "add_line command");

    let item = catalog.catalog().find_item(item_code)?;
    let line = config.calculator().derive_line(item, quantity, rate);

    order.with_order_mut(|o| {
        o.add_line(line)?;
        Ok::<_, ApiError>(OrderResponse::from(&*o))
    })
}

/// Opens the entry form for an item: quantity 1 at the catalog rate.
///
/// Replaces any line that was being edited.
pub fn start_line(
    config: &AppConfig,
    catalog: &CatalogState,
    order: &OrderState,
    item_code: &str,
) -> Result<OrderLine, ApiError> {
    debug!(item_code = %item_code, "start_line command");

    let draft = LineDraft::new(catalog.catalog().find_item(item_code)?.clone());
    let preview = config.calculator().price_draft(&draft);
    order.with_entry_mut(|entry| entry.draft = Some(draft));
    Ok(preview)
}

/// Applies one keystroke-level edit to the open line and returns the
/// re-priced preview.
///
/// ## Rate / Value Coupling
/// ```text
/// edit Rate  ──► value = quantity × rate
/// edit Value ──► rate  = value / quantity   (quantity 0: rate unchanged)
/// edit Quantity ──► whichever of rate/value was typed last drives the other
/// ```
pub fn edit_line(
    config: &AppConfig,
    order: &OrderState,
    field: LineField,
    text: &str,
) -> Result<OrderLine, ApiError> {
    debug!(field = ?field, text = %text, "edit_line command");

    order.with_entry_mut(|entry| {
        let draft = entry
            .draft
            .as_mut()
            .ok_or_else(|| ApiError::order("No line is being edited"))?;
        match field {
            LineField::Quantity => draft.edit_quantity(text),
            LineField::Rate => draft.edit_rate(text),
            LineField::Value => draft.edit_value(text),
            LineField::Discount => draft.edit_discount(text),
        }
        Ok::<_, ApiError>(config.calculator().price_draft(draft))
    })
}

/// Adds the open line to the order and closes the entry form.
pub fn commit_line(config: &AppConfig, order: &OrderState) -> Result<OrderResponse, ApiError> {
    debug!("commit_line command");

    order.with_entry_mut(|entry| {
        let draft = entry
            .draft
            .as_ref()
            .ok_or_else(|| ApiError::order("No line is being edited"))?;
        entry.order.add_line(config.calculator().price_draft(draft))?;
        entry.draft = None;
        Ok::<_, ApiError>(OrderResponse::from(&entry.order))
    })
}

/// Removes the line at `position` (0-based, display order).
pub fn remove_line(order: &OrderState, position: usize) -> Result<OrderResponse, ApiError> {
    debug!(position = %position, "remove_line command");

    order.with_order_mut(|o| {
        o.remove_line(position)?;
        Ok::<_, ApiError>(OrderResponse::from(&*o))
    })
}

/// Drops all lines, the customer and any open line.
pub fn clear_order(order: &OrderState) -> OrderResponse {
    debug!("clear_order command");

    order.with_entry_mut(|entry| {
        entry.order.clear();
        entry.draft = None;
        OrderResponse::from(&entry.order)
    })
}

/// Validates the order and builds the backend's order-creation request.
pub fn build_order_request(order: &OrderState) -> Result<OrderRequest, ApiError> {
    debug!("build_order_request command");

    let request = order.with_order(OrderRequest::build)?;
    info!(
        doc_no = %request.doc_no,
        customer_id = request.customer_id,
        lines = request.items.len(),
        grand_total = %request.totals.grand_total,
        "Order request built"
    );
    Ok(request)
}
