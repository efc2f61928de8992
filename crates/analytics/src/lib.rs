//! Sales analytics for the sales report system.
//!
//! This crate provides:
//! - Per-seller revenue, profit and unit accumulation
//! - Profit ranking with rank-based bonuses
//! - Top products per seller
//! - Pluggable revenue and bonus strategies

pub mod aggregator;
pub mod stats;
pub mod strategy;

pub use aggregator::{analyze_sales_data, SalesAggregator, SalesAnalysis, SkipStats};
pub use stats::SellerStats;
pub use strategy::{AnalyzeOptions, BonusStrategy, ProfitRankBonus, RevenueStrategy, SimpleRevenue};
