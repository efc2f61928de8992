//! Data ingestion for the sales report system.
//!
//! This crate handles:
//! - Reading raw JSON datasets from files or strings
//! - Top-level shape checks on the seller, product and purchase collections
//! - Conversion into typed [`sales_core::SalesData`]

pub mod loader;

pub use loader::{dataset_from_value, load_dataset, parse_dataset};
