//! Sales aggregation and seller ranking.
//!
//! Scans purchase records, accumulates revenue and profit per seller, ranks
//! sellers by profit, and assigns bonuses and top products.

use std::collections::HashMap;

use ordered_float::OrderedFloat;
use sales_core::{Product, ReportConfig, ReportEntry, Result, SalesData};
use tracing::{debug, info};

use crate::stats::SellerStats;
use crate::strategy::AnalyzeOptions;

/// Counts of input the aggregator ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkipStats {
    /// Purchase records whose seller was found.
    pub records_processed: u64,
    /// Purchase records dropped for an unknown seller.
    pub records_skipped: u64,
    /// Line items counted towards a seller.
    pub items_counted: u64,
    /// Line items dropped for an unknown SKU.
    pub items_skipped: u64,
}

/// Report plus skip counters from one run.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesAnalysis {
    /// Entries sorted by profit, descending.
    pub entries: Vec<ReportEntry>,
    pub skips: SkipStats,
}

/// Sales aggregator.
#[derive(Debug, Clone, Default)]
pub struct SalesAggregator {
    config: ReportConfig,
}

impl SalesAggregator {
    /// Create a new aggregator from configuration.
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Build the ranked seller report.
    pub fn analyze(&self, data: &SalesData, options: &AnalyzeOptions) -> Result<Vec<ReportEntry>> {
        self.run(data, options).map(|analysis| analysis.entries)
    }

    /// Build the ranked seller report along with skip counters.
    pub fn run(&self, data: &SalesData, options: &AnalyzeOptions) -> Result<SalesAnalysis> {
        data.validate()?;
        let (revenue_strategy, bonus_strategy) = options.strategies()?;

        // Sellers keep the slot of their first occurrence; a repeated id
        // replaces the stats (and name) in that slot.
        let mut sellers: Vec<SellerStats> = Vec::with_capacity(data.sellers.len());
        let mut seller_index: HashMap<&str, usize> = HashMap::with_capacity(data.sellers.len());
        for seller in &data.sellers {
            match seller_index.get(seller.id.as_str()) {
                Some(&slot) => sellers[slot] = SellerStats::new(seller),
                None => {
                    seller_index.insert(seller.id.as_str(), sellers.len());
                    sellers.push(SellerStats::new(seller));
                }
            }
        }

        let product_index: HashMap<&str, &Product> = data
            .products
            .iter()
            .map(|product| (product.sku.as_str(), product))
            .collect();

        let mut skips = SkipStats::default();

        for record in &data.purchase_records {
            let Some(&slot) = seller_index.get(record.seller_id.as_str()) else {
                skips.records_skipped += 1;
                debug!(
                    seller_id = %record.seller_id,
                    receipt_id = ?record.receipt_id,
                    "skipping purchase record for unknown seller"
                );
                continue;
            };
            skips.records_processed += 1;

            let stats = &mut sellers[slot];
            for item in &record.items {
                let Some(product) = product_index.get(item.sku.as_str()) else {
                    skips.items_skipped += 1;
                    debug!(
                        seller_id = %record.seller_id,
                        sku = %item.sku,
                        "skipping line item for unknown product"
                    );
                    continue;
                };

                let revenue = revenue_strategy.revenue(item, product);
                let profit = revenue - product.purchase_price * item.quantity as f64;
                stats.record_sale(&item.sku, item.quantity, revenue, profit);
                skips.items_counted += 1;
            }
        }

        // Stable: equal profits keep seller input order.
        sellers.sort_by(|a, b| OrderedFloat(b.profit).cmp(&OrderedFloat(a.profit)));

        let total = sellers.len();
        let limit = self.config.top_products_limit;
        let entries: Vec<ReportEntry> = sellers
            .into_iter()
            .enumerate()
            .map(|(rank, stats)| {
                let bonus = bonus_strategy.bonus(rank, total, &stats);
                stats.finalize(bonus, limit)
            })
            .collect();

        info!(
            sellers = entries.len(),
            records = skips.records_processed,
            records_skipped = skips.records_skipped,
            items = skips.items_counted,
            items_skipped = skips.items_skipped,
            "sales report computed"
        );

        Ok(SalesAnalysis { entries, skips })
    }
}

/// Analyze with the default configuration.
pub fn analyze_sales_data(data: &SalesData, options: &AnalyzeOptions) -> Result<Vec<ReportEntry>> {
    SalesAggregator::default().analyze(data, options)
}
