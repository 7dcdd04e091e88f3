//! # Application State
//!
//! ```text
//! state/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── config.rs   ◄─── AppConfig: tax policy, session, currency (read-only)
//! ├── catalog.rs  ◄─── CatalogState: items and customers (read-only)
//! └── order.rs    ◄─── OrderState: the order being composed (Arc<Mutex>)
//! ```
//!
//! Each command takes only the state it needs.

mod catalog;
mod config;
mod order;

pub use catalog::CatalogState;
pub use config::{fiscal_year_for, AppConfig};
pub use order::{OrderEntry, OrderState};
