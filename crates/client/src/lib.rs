//! REST client for the Threadline storefront backend.
//!
//! [`backend::StorefrontBackend`] is the contract the lifecycle controllers
//! consume; [`api::StorefrontApi`] implements it over HTTP with `reqwest`.

pub mod api;
pub mod backend;
pub mod config;
pub mod error;

pub use api::StorefrontApi;
pub use backend::StorefrontBackend;
pub use config::ClientConfig;
pub use error::ApiError;
