//! Pluggable revenue and bonus strategies.
//!
//! Any closure with the matching signature is a strategy, so callers can
//! pass `|item: &LineItem, product: &Product| ...` directly.

use std::fmt;

use sales_core::{BonusConfig, Error, LineItem, Product, ReportConfig, Result};

use crate::stats::SellerStats;

/// Computes the revenue of a single line item.
pub trait RevenueStrategy {
    fn revenue(&self, item: &LineItem, product: &Product) -> f64;
}

impl<F> RevenueStrategy for F
where
    F: Fn(&LineItem, &Product) -> f64,
{
    fn revenue(&self, item: &LineItem, product: &Product) -> f64 {
        self(item, product)
    }
}

/// Computes a seller's bonus from their rank in the profit-sorted list.
pub trait BonusStrategy {
    /// `rank` is 0-based, `total` is the number of ranked sellers.
    fn bonus(&self, rank: usize, total: usize, seller: &SellerStats) -> f64;
}

impl<F> BonusStrategy for F
where
    F: Fn(usize, usize, &SellerStats) -> f64,
{
    fn bonus(&self, rank: usize, total: usize, seller: &SellerStats) -> f64 {
        self(rank, total, seller)
    }
}

/// `sale_price * quantity * (1 - discount / 100)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleRevenue;

impl RevenueStrategy for SimpleRevenue {
    fn revenue(&self, item: &LineItem, _product: &Product) -> f64 {
        let total_price = item.sale_price * item.quantity as f64;
        total_price * (1.0 - item.discount / 100.0)
    }
}

/// Rank-tiered share of profit.
///
/// Tiers are checked in order: rank 0, podium, any rank but the last, last.
/// A lone seller is both first and last and takes the top rate.
#[derive(Debug, Clone, Default)]
pub struct ProfitRankBonus {
    config: BonusConfig,
}

impl ProfitRankBonus {
    pub fn new(config: BonusConfig) -> Self {
        Self { config }
    }

    /// Rate applied to profit at the given rank.
    pub fn rate(&self, rank: usize, total: usize) -> f64 {
        if rank == 0 {
            self.config.top_rate
        } else if rank < self.config.podium_size {
            self.config.podium_rate
        } else if rank + 1 < total {
            self.config.base_rate
        } else {
            0.0
        }
    }
}

impl BonusStrategy for ProfitRankBonus {
    fn bonus(&self, rank: usize, total: usize, seller: &SellerStats) -> f64 {
        seller.profit * self.rate(rank, total)
    }
}

/// Strategies supplied to the aggregator.
///
/// A missing strategy is rejected with [`Error::InvalidStrategy`] before any
/// record is read.
pub struct AnalyzeOptions {
    pub calculate_revenue: Option<Box<dyn RevenueStrategy>>,
    pub calculate_bonus: Option<Box<dyn BonusStrategy>>,
}

impl AnalyzeOptions {
    pub fn new(
        revenue: impl RevenueStrategy + 'static,
        bonus: impl BonusStrategy + 'static,
    ) -> Self {
        Self {
            calculate_revenue: Some(Box::new(revenue)),
            calculate_bonus: Some(Box::new(bonus)),
        }
    }

    /// Options with no strategies set.
    pub fn empty() -> Self {
        Self {
            calculate_revenue: None,
            calculate_bonus: None,
        }
    }

    /// Default strategies with bonus tiers taken from `config`.
    pub fn from_config(config: &ReportConfig) -> Self {
        Self::new(SimpleRevenue, ProfitRankBonus::new(config.bonus.clone()))
    }

    pub fn with_revenue(mut self, revenue: impl RevenueStrategy + 'static) -> Self {
        self.calculate_revenue = Some(Box::new(revenue));
        self
    }

    pub fn with_bonus(mut self, bonus: impl BonusStrategy + 'static) -> Self {
        self.calculate_bonus = Some(Box::new(bonus));
        self
    }

    pub(crate) fn strategies(&self) -> Result<(&dyn RevenueStrategy, &dyn BonusStrategy)> {
        match (&self.calculate_revenue, &self.calculate_bonus) {
            (Some(revenue), Some(bonus)) => Ok((revenue.as_ref(), bonus.as_ref())),
            (None, _) => Err(Error::invalid_strategy(
                "calculate_revenue must be a function",
            )),
            (_, None) => Err(Error::invalid_strategy("calculate_bonus must be a function")),
        }
    }
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self::new(SimpleRevenue, ProfitRankBonus::default())
    }
}

impl fmt::Debug for AnalyzeOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalyzeOptions")
            .field("calculate_revenue", &self.calculate_revenue.is_some())
            .field("calculate_bonus", &self.calculate_bonus.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use sales_core::Seller;

    fn stats_with_profit(profit: f64) -> SellerStats {
        let seller = Seller {
            id: "seller_1".to_string(),
            first_name: "Ivan".to_string(),
            last_name: "Ivanov".to_string(),
        };
        let mut stats = SellerStats::new(&seller);
        stats.profit = profit;
        stats
    }

    #[test]
    fn test_simple_revenue() {
        let product = Product::new("X", 10.0);
        let item = LineItem::new("X", 20.0, 2, 0.0);
        assert_relative_eq!(SimpleRevenue.revenue(&item, &product), 40.0);

        // 100 * 3 * 0.75
        let discounted = LineItem::new("X", 100.0, 3, 25.0);
        assert_relative_eq!(SimpleRevenue.revenue(&discounted, &product), 225.0);
    }

    #[test]
    fn test_bonus_tiers() {
        let bonus = ProfitRankBonus::default();
        let stats = stats_with_profit(1000.0);
        let total = 5;

        assert_relative_eq!(bonus.bonus(0, total, &stats), 150.0);
        assert_relative_eq!(bonus.bonus(1, total, &stats), 100.0);
        assert_relative_eq!(bonus.bonus(2, total, &stats), 100.0);
        assert_relative_eq!(bonus.bonus(3, total, &stats), 50.0);
        assert_eq!(bonus.bonus(4, total, &stats), 0.0);
    }

    #[test]
    fn test_single_seller_takes_top_rate() {
        let bonus = ProfitRankBonus::default();
        assert_relative_eq!(bonus.bonus(0, 1, &stats_with_profit(20.0)), 3.0);
    }

    #[test]
    fn test_podium_rank_wins_over_last_rank() {
        // With two sellers, rank 1 is last but still on the podium.
        let bonus = ProfitRankBonus::default();
        assert_relative_eq!(bonus.rate(1, 2), 0.10);
        assert_eq!(bonus.rate(3, 4), 0.0);
    }

    #[test]
    fn test_closures_are_strategies() {
        let options = AnalyzeOptions::new(
            |item: &LineItem, _: &Product| item.sale_price,
            |rank: usize, _: usize, _: &SellerStats| rank as f64,
        );
        let (revenue, bonus) = options.strategies().unwrap();
        let item = LineItem::new("X", 7.5, 4, 0.0);
        assert_eq!(revenue.revenue(&item, &Product::new("X", 1.0)), 7.5);
        assert_eq!(bonus.bonus(3, 5, &stats_with_profit(0.0)), 3.0);
    }

    #[test]
    fn test_missing_strategy_is_rejected() {
        let options = AnalyzeOptions::empty().with_revenue(SimpleRevenue);
        let Err(err) = options.strategies() else {
            panic!("expected missing bonus strategy to be rejected");
        };
        assert!(err.is_invalid_strategy());
        assert!(err.to_string().contains("calculate_bonus"));

        let options = AnalyzeOptions::empty();
        let Err(err) = options.strategies() else {
            panic!("expected missing revenue strategy to be rejected");
        };
        assert!(err.is_invalid_strategy());
        assert!(err.to_string().contains("calculate_revenue"));
    }

    #[test]
    fn test_custom_tiers_from_config() {
        let config = ReportConfig {
            bonus: BonusConfig {
                top_rate: 0.2,
                podium_rate: 0.1,
                podium_size: 2,
                base_rate: 0.01,
            },
            ..ReportConfig::default()
        };
        let options = AnalyzeOptions::from_config(&config);
        let (_, bonus) = options.strategies().unwrap();
        let stats = stats_with_profit(100.0);
        assert_relative_eq!(bonus.bonus(0, 4, &stats), 20.0);
        assert_relative_eq!(bonus.bonus(1, 4, &stats), 10.0);
        assert_relative_eq!(bonus.bonus(2, 4, &stats), 1.0);
        assert_eq!(bonus.bonus(3, 4, &stats), 0.0);
    }
}
