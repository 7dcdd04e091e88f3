//! # Order-Entry Commands
//!
//! Everything the order-entry screens can ask of the Rust side.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── catalog.rs  ◄─── Item and customer picker search
//! ├── order.rs    ◄─── Order composition and the order request
//! ├── customer.rs ◄─── New-account form and request
//! └── config.rs   ◄─── Configuration retrieval
//! ```
//!
//! ## State Injection
//! Each command takes only the state it needs:
//! ```rust,ignore
//! // Only needs the order
//! fn remove_line(order: &OrderState, position: usize)
//!
//! // Needs catalog, order and the tax policy from config
//! fn add_line(config: &AppConfig, catalog: &CatalogState, order: &OrderState, ...)
//! ```
//!
//! Commands return `Result<T, ApiError>`; `T` and `ApiError` both
//! serialize to the JSON the front-end consumes.

pub mod catalog;
pub mod config;
pub mod customer;
pub mod order;
