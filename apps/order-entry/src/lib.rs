//! # Khata Order-Entry Library
//!
//! Application layer around `khata-core`: configuration, shared state,
//! command functions and the `khata` command line.
//!
//! ## Module Organization
//! ```text
//! khata_order_entry/
//! ├── lib.rs          ◄─── You are here (tracing setup & run)
//! ├── cli.rs          ◄─── clap definitions for the `khata` binary
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── AppConfig from KHATA_* variables
//! │   ├── catalog.rs  ◄─── CatalogState (read-only)
//! │   └── order.rs    ◄─── OrderState (Arc<Mutex>)
//! ├── commands/
//! │   ├── catalog.rs  ◄─── Picker search
//! │   ├── order.rs    ◄─── Order composition, order request
//! │   ├── customer.rs ◄─── New-account form, customer request
//! │   └── config.rs   ◄─── Configuration retrieval
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## State Management: Multiple State Types
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────────┐    │
//! │  │    AppConfig     │ │   CatalogState   │ │     OrderState       │    │
//! │  │                  │ │                  │ │                      │    │
//! │  │  • Tax policy    │ │  • Items         │ │  • Current order     │    │
//! │  │  • Session       │ │  • Customers     │ │  • Open line draft   │    │
//! │  │  • Currency      │ │  • Next serial   │ │                      │    │
//! │  └──────────────────┘ └──────────────────┘ └──────────────────────┘    │
//! │                                                                         │
//! │  Each command borrows only the state it needs.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;

use chrono::{Local, Utc};
use std::fmt::Write as _;
use tracing::info;
use tracing_subscriber::EnvFilter;

use khata_core::{Customer, Order};

use cli::{Cli, Command, KeyValue, LineSpec};
use commands::catalog::ItemOption;
use commands::order::OrderResponse;
use error::ApiError;
use state::{AppConfig, CatalogState, OrderState};

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so `--json` output on stdout stays clean.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=khata_core=trace` - Narrow to one crate
/// - Default: INFO, DEBUG for khata crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,khata=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs one CLI command and returns what should be printed.
///
/// ## Quote Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Load catalog ──────────► CatalogState                               │
/// │  2. New order ─────────────► session from config, date, next serial     │
/// │  3. select_customer(id)                                                 │
/// │  4. add_line(code, qty, rate) for every --line                          │
/// │  5. --json ? build_order_request : render priced lines + totals         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run(cli: &Cli, config: &AppConfig) -> Result<String, ApiError> {
    match &cli.command {
        Command::Quote {
            catalog,
            customer,
            lines,
            date,
            doc_no,
        } => {
            let catalog = CatalogState::load(catalog)?;
            let order = quote(config, &catalog, *customer, lines, *date, doc_no.clone())?;
            if cli.json {
                let request = commands::order::build_order_request(&order)?;
                Ok(serde_json::to_string_pretty(&request)?)
            } else {
                Ok(render_order(config, &commands::order::get_order(&order)))
            }
        }
        Command::Items { catalog, query } => {
            let catalog = CatalogState::load(catalog)?;
            let items = commands::catalog::search_items(
                config,
                &catalog,
                query.as_deref().unwrap_or_default(),
            )?;
            if cli.json {
                Ok(serde_json::to_string_pretty(&items)?)
            } else {
                Ok(render_items(&items))
            }
        }
        Command::Customers { catalog, query } => {
            let catalog = CatalogState::load(catalog)?;
            let customers = commands::catalog::search_customers(
                &catalog,
                query.as_deref().unwrap_or_default(),
            )?;
            if cli.json {
                Ok(serde_json::to_string_pretty(&customers)?)
            } else {
                Ok(render_customers(&customers))
            }
        }
        Command::NewCustomer { values } => {
            let values: Vec<(String, String)> = values
                .iter()
                .map(|KeyValue { key, value }| (key.clone(), value.clone()))
                .collect();
            let request =
                commands::customer::build_customer_request(config, &values, Utc::now())?;
            Ok(serde_json::to_string_pretty(&request)?)
        }
        Command::Fields => {
            let fields = commands::customer::customer_form_fields();
            if cli.json {
                Ok(serde_json::to_string_pretty(&fields)?)
            } else {
                let mut out = String::new();
                for field in fields {
                    let marker = if field.required { "*" } else { "" };
                    let _ = writeln!(out, "{:<12} {}{}", field.key, field.label, marker);
                }
                Ok(out)
            }
        }
        Command::Config => Ok(serde_json::to_string_pretty(
            &commands::config::get_config(config),
        )?),
    }
}

/// Composes an order from CLI input through the regular commands.
fn quote(
    config: &AppConfig,
    catalog: &CatalogState,
    customer_id: i64,
    lines: &[LineSpec],
    date: Option<chrono::NaiveDate>,
    doc_no: Option<String>,
) -> Result<OrderState, ApiError> {
    let date = date.unwrap_or_else(|| Local::now().date_naive());
    let doc_no = doc_no.unwrap_or_else(|| catalog.catalog().next_serial.clone());
    info!(doc_no = %doc_no, %date, lines = lines.len(), "Quoting order");

    let order = OrderState::new(Order::new(config.session.clone(), date, doc_no));
    commands::order::select_customer(catalog, &order, customer_id)?;
    for line in lines {
        commands::order::add_line(config, catalog, &order, &line.code, &line.quantity, &line.rate)?;
    }
    Ok(order)
}

// =============================================================================
// Text Rendering
// =============================================================================

fn render_order(config: &AppConfig, order: &OrderResponse) -> String {
    let money = |amount| config.format_currency(amount);
    let mut out = String::new();

    let customer = order
        .customer
        .as_ref()
        .map(|c| c.name.as_str())
        .unwrap_or("-");
    let _ = writeln!(out, "{}  {}  {}", order.doc_no, order.date, customer);
    let _ = writeln!(
        out,
        "{:>3}  {:<10} {:<24} {:>8} {:>12} {:>12} {:>6} {:>12} {:>6} {:>12}",
        "#", "Code", "Item", "Qty", "Rate", "Value", "Disc%", "Taxable", "GST%", "Amount"
    );
    for (i, line) in order.lines.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}  {:<10} {:<24} {:>8} {:>12} {:>12} {:>6} {:>12} {:>6} {:>12}",
            i + 1,
            line.item().code,
            line.item().name,
            line.quantity().to_string(),
            money(line.rate()),
            money(line.value()),
            line.discount_rate().to_string(),
            money(line.taxable()),
            line.tax_rate().to_string(),
            money(line.amount()),
        );
    }

    let summary = &order.summary;
    let rows = [
        ("Value", summary.total_value),
        ("Discount", summary.total_discount),
        ("Taxable", summary.total_taxable),
        ("CGST", summary.tax.cgst),
        ("SGST", summary.tax.sgst),
        ("UTGST", summary.tax.utgst),
        ("IGST", summary.tax.igst),
        ("Total tax", summary.total_tax),
        ("Grand total", summary.grand_total),
    ];
    let _ = writeln!(out);
    let _ = writeln!(out, "{:<12} {:>12}", "Quantity", summary.total_quantity.to_string());
    for (label, amount) in rows {
        let _ = writeln!(out, "{:<12} {:>12}", label, money(amount));
    }
    out
}

fn render_items(items: &[ItemOption]) -> String {
    let mut out = String::new();
    for item in items {
        let _ = writeln!(
            out,
            "{:<10} {:<32} {:>12}  {}",
            item.code,
            item.name,
            item.rate,
            item.hsn_code.as_deref().unwrap_or("N/A")
        );
    }
    out
}

fn render_customers(customers: &[Customer]) -> String {
    let mut out = String::new();
    for customer in customers {
        let _ = writeln!(
            out,
            "{:>6}  {:<32} {}",
            customer.id,
            customer.name,
            customer.gst_no.as_deref().unwrap_or("")
        );
    }
    out
}
