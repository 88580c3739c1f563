//! Lifecycle controllers and local bookkeeping for the Threadline storefront.
//!
//! The controllers own the cached design and order collections, enforce the
//! transition whitelist before anything reaches the backend, and re-fetch
//! the full collection after every successful mutation.

pub mod bookkeeping;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod notify;
pub mod orders;
pub mod screen;
pub mod session;

pub use error::LifecycleError;
pub use lifecycle::DesignLifecycle;
pub use notify::{Confirmer, Notifier, GENERIC_FAILURE_MESSAGE};
pub use orders::OrderHistory;
