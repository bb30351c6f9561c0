//! Product catalog logic.

pub mod cache;
pub mod queries;
