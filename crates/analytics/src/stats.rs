//! Per-seller sales accumulator.

use std::collections::HashMap;

use sales_core::{round2, ReportEntry, Seller, SellerId, Sku, TopProduct};

/// Running totals for one seller while purchase records are scanned.
///
/// Consumed by [`SellerStats::finalize`], so it cannot change once the
/// report entry exists.
#[derive(Debug, Clone, PartialEq)]
pub struct SellerStats {
    pub seller_id: SellerId,
    pub name: String,
    /// Unrounded revenue.
    pub revenue: f64,
    /// Unrounded profit.
    pub profit: f64,
    /// Units sold across all products.
    pub sales_count: u64,
    /// Quantities per SKU in order of first sale.
    products_sold: Vec<TopProduct>,
    /// Position of each SKU in `products_sold`.
    product_index: HashMap<Sku, usize>,
}

impl SellerStats {
    /// Zeroed stats for a seller.
    pub fn new(seller: &Seller) -> Self {
        Self {
            seller_id: seller.id.clone(),
            name: seller.full_name(),
            revenue: 0.0,
            profit: 0.0,
            sales_count: 0,
            products_sold: Vec::new(),
            product_index: HashMap::new(),
        }
    }

    /// Add one line item's contribution.
    pub fn record_sale(&mut self, sku: &str, quantity: u64, revenue: f64, profit: f64) {
        self.revenue += revenue;
        self.profit += profit;
        self.sales_count += quantity;

        match self.product_index.get(sku) {
            Some(&idx) => self.products_sold[idx].quantity += quantity,
            None => {
                self.product_index
                    .insert(sku.to_string(), self.products_sold.len());
                self.products_sold.push(TopProduct {
                    sku: sku.to_string(),
                    quantity,
                });
            }
        }
    }

    /// Quantities sold per SKU, in order of first sale.
    pub fn products_sold(&self) -> &[TopProduct] {
        &self.products_sold
    }

    /// Units sold of one SKU.
    pub fn quantity_sold(&self, sku: &str) -> u64 {
        self.product_index
            .get(sku)
            .map(|&idx| self.products_sold[idx].quantity)
            .unwrap_or(0)
    }

    /// Up to `limit` products by descending quantity; ties keep first-sale order.
    pub fn top_products(&self, limit: usize) -> Vec<TopProduct> {
        let mut products = self.products_sold.clone();
        products.sort_by(|a, b| b.quantity.cmp(&a.quantity));
        products.truncate(limit);
        products
    }

    /// Produce the report entry, rounding money fields.
    pub fn finalize(self, bonus: f64, top_products_limit: usize) -> ReportEntry {
        let top_products = self.top_products(top_products_limit);
        ReportEntry {
            seller_id: self.seller_id,
            name: self.name,
            revenue: round2(self.revenue),
            profit: round2(self.profit),
            sales_count: self.sales_count,
            top_products,
            bonus: round2(bonus),
        }
    }
}
