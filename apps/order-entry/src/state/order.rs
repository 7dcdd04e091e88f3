//! # Order State
//!
//! The one order being composed, plus the line currently open in the
//! entry form.
//!
//! ## Thread Safety
//! The order is wrapped in `Arc<Mutex<T>>` so command functions can be
//! called from whichever thread the host runs them on. A lock poisoned by
//! a panicking command is recovered: every mutation on [`OrderEntry`]
//! leaves it consistent, so the data behind the lock is still usable.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::warn;

use khata_core::{LineDraft, Order};

/// Order plus the open line draft.
#[derive(Debug, Clone)]
pub struct OrderEntry {
    pub order: Order,
    /// Item selected in the entry form but not yet added.
    pub draft: Option<LineDraft>,
}

impl OrderEntry {
    pub fn new(order: Order) -> Self {
        OrderEntry { order, draft: None }
    }
}

/// Thread-safe order state.
#[derive(Debug)]
pub struct OrderState {
    entry: Arc<Mutex<OrderEntry>>,
}

impl OrderState {
    pub fn new(order: Order) -> Self {
        OrderState {
            entry: Arc::new(Mutex::new(OrderEntry::new(order))),
        }
    }

    /// Executes a function with read access to the order entry.
    pub fn with_entry<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&OrderEntry) -> R,
    {
        let entry = self.lock();
        f(&entry)
    }

    /// Executes a function with write access to the order entry.
    pub fn with_entry_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut OrderEntry) -> R,
    {
        let mut entry = self.lock();
        f(&mut entry)
    }

    /// Executes a function with read access to the order.
    pub fn with_order<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Order) -> R,
    {
        self.with_entry(|entry| f(&entry.order))
    }

    /// Executes a function with write access to the order.
    pub fn with_order_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Order) -> R,
    {
        self.with_entry_mut(|entry| f(&mut entry.order))
    }

    fn lock(&self) -> MutexGuard<'_, OrderEntry> {
        self.entry.lock().unwrap_or_else(|poisoned| {
            warn!("Order lock was poisoned; recovering");
            PoisonError::into_inner(poisoned)
        })
    }
}

impl Clone for OrderState {
    /// Shares the same order (clones the `Arc`, not the order).
    fn clone(&self) -> Self {
        OrderState {
            entry: Arc::clone(&self.entry),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use khata_core::{CompanySession, Customer};
    use std::thread;

    fn order() -> Order {
        let session = CompanySession {
            user_id: 11,
            company_id: 3,
            company_name: "Gupta Hardware".to_string(),
            fiscal_year: "2024-25".to_string(),
        };
        Order::new(session, NaiveDate::from_ymd_opt(2024, 10, 24).unwrap(), "SO-0042")
    }

    fn customer() -> Customer {
        Customer {
            id: 501,
            name: "Sharma Traders".to_string(),
            code: None,
            gst_no: None,
        }
    }

    #[test]
    fn test_clones_share_the_order() {
        let state = OrderState::new(order());
        let other = state.clone();

        other.with_order_mut(|o| o.select_customer(customer()));
        assert_eq!(state.with_order(|o| o.customer().map(|c| c.id)), Some(501));
    }

    #[test]
    fn test_recovers_from_poisoned_lock() {
        let state = OrderState::new(order());
        let other = state.clone();

        let result = thread::spawn(move || {
            other.with_order_mut(|o| {
                o.select_customer(customer());
                panic!("command failed mid-update");
            })
        })
        .join();
        assert!(result.is_err());

        assert_eq!(state.with_order(|o| o.doc_no().to_string()), "SO-0042");
        assert!(state.with_entry(|e| e.draft.is_none()));
    }
}
