//! Core types and configuration for the sales report system.
//!
//! This crate provides shared types used across all other crates:
//! - Input records (sellers, products, purchase records)
//! - Report output types and the shared rounding helper
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::{BonusConfig, ReportConfig};
pub use error::{Error, Result};
pub use types::*;
