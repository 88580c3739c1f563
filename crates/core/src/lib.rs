//! Domain core of the Threadline storefront client.
//!
//! Pure logic with no I/O: status registries, the transition whitelists for
//! designs and orders, the list presenter, the domain models, coupon and
//! checkout arithmetic, and the explicit application store.

pub mod coupon;
pub mod design;
pub mod error;
pub mod order;
pub mod presenter;
pub mod status;
pub mod store;
pub mod transition;
pub mod types;
