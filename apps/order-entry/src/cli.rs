//! # Command Line
//!
//! ```text
//! khata [--json] quote --catalog FILE --customer ID --line CODE:QTY[:RATE]...
//! khata [--json] items --catalog FILE [QUERY]
//! khata [--json] customers --catalog FILE [QUERY]
//! khata [--json] new-customer --set KEY=VALUE...
//! khata [--json] fields
//! khata [--json] config
//! ```

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser, Debug)]
#[command(name = "khata", version, about = "Price GST sales orders and build backend requests")]
pub struct Cli {
    /// Output machine-readable JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Price an order; with --json, print the order-creation request
    Quote {
        /// Catalog file (items, customers, nextSerial)
        #[arg(long)]
        catalog: PathBuf,

        /// Customer id from the catalog
        #[arg(long)]
        customer: i64,

        /// Order line as CODE:QTY or CODE:QTY:RATE (repeatable)
        #[arg(long = "line", required = true)]
        lines: Vec<LineSpec>,

        /// Order date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Document number; defaults to the catalog's next serial
        #[arg(long)]
        doc_no: Option<String>,
    },
    /// Search the item catalog by name or code
    Items {
        #[arg(long)]
        catalog: PathBuf,
        query: Option<String>,
    },
    /// Search customers by name or code
    Customers {
        #[arg(long)]
        catalog: PathBuf,
        query: Option<String>,
    },
    /// Validate a new customer and print the add-customer request
    NewCustomer {
        /// Form value as KEY=VALUE, e.g. name="Sharma Traders" (repeatable)
        #[arg(long = "set")]
        values: Vec<KeyValue>,
    },
    /// List the customer form fields
    Fields,
    /// Show the active configuration
    Config,
}

/// `CODE:QTY[:RATE]`; quantity and rate stay raw text so the line
/// calculator applies its usual forgiving parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSpec {
    pub code: String,
    pub quantity: String,
    pub rate: String,
}

impl FromStr for LineSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            [code, quantity] | [code, quantity, _] if !code.trim().is_empty() => Ok(LineSpec {
                code: code.trim().to_string(),
                quantity: quantity.to_string(),
                rate: parts.get(2).map(|r| r.to_string()).unwrap_or_default(),
            }),
            _ => Err(format!("expected CODE:QTY or CODE:QTY:RATE, got '{}'", s)),
        }
    }
}

/// `KEY=VALUE` form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

impl FromStr for KeyValue {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, value) = s
            .split_once('=')
            .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
        Ok(KeyValue {
            key: key.trim().to_string(),
            value: value.to_string(),
        })
    }
}
