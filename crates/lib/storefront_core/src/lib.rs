//! # storefront_core
//!
//! Core domain logic for Storefront.

pub mod auth;
pub mod catalog;
pub mod db;
pub mod migrate;
pub mod models;
pub mod uuid;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
