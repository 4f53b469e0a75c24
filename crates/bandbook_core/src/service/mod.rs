//! Catalog use-case services.
//!
//! # Responsibility
//! - Turn repository calls into the catalog store contract.
//! - Keep front ends away from SQL and schema details.

pub mod catalog_service;
