//! Domain models shared across Storefront crates.

pub mod auth;
pub mod catalog;
