//! # Khata Command Line Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  main.rs ────► tracing, config from KHATA_*, clap                       │
//! │  lib.rs ─────► run(cli, config) → output text / ApiError                │
//! │  commands/ ──► select_customer, add_line, build_order_request, ...      │
//! │  khata-core ─► pricing, GST split, totals, validation                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::process::ExitCode;
use tracing::error;

use khata_order_entry::cli::Cli;
use khata_order_entry::state::AppConfig;

fn main() -> ExitCode {
    khata_order_entry::init_tracing();

    let cli = Cli::parse();
    let config = AppConfig::from_env();

    match khata_order_entry::run(&cli, &config) {
        Ok(output) => {
            println!("{}", output.trim_end());
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(code = %err.code, "Command failed");
            eprintln!("error: {}", err.message);
            ExitCode::FAILURE
        }
    }
}
