//! API-layer services.

pub mod auth;
pub mod catalog;
pub mod cookies;
