//! Core data types for the sales report system.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Seller identifier.
pub type SellerId = String;

/// Product stock-keeping unit.
pub type Sku = String;

/// Round a monetary amount to two decimal places, half away from zero.
///
/// Rounds the exact binary value, so `2.675` (stored as 2.67499...) gives
/// `2.67`. Negative zero is normalised so that re-serialising a report is
/// stable. Non-finite values pass through unchanged.
pub fn round2(value: f64) -> f64 {
    let Some(exact) = Decimal::from_f64_retain(value) else {
        return value;
    };
    let cents = exact.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    // At most two fractional digits remain, so one division is correctly rounded.
    let rounded = cents.mantissa() as f64 / 10f64.powi(cents.scale() as i32);
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// A seller from the input dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    #[serde(deserialize_with = "id_format::deserialize")]
    pub id: SellerId,
    pub first_name: String,
    pub last_name: String,
}

impl Seller {
    /// Display name used in the report.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A product card, keyed by SKU.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(deserialize_with = "id_format::deserialize")]
    pub sku: Sku,
    /// Unit cost to the business.
    pub purchase_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Product {
    pub fn new(sku: impl Into<Sku>, purchase_price: f64) -> Self {
        Self {
            sku: sku.into(),
            purchase_price,
            name: None,
            category: None,
        }
    }
}

/// One product line within a purchase record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(deserialize_with = "id_format::deserialize")]
    pub sku: Sku,
    /// Unit sale price before discount.
    pub sale_price: f64,
    pub quantity: u64,
    /// Discount in percent (0-100).
    #[serde(default)]
    pub discount: f64,
}

impl LineItem {
    pub fn new(sku: impl Into<Sku>, sale_price: f64, quantity: u64, discount: f64) -> Self {
        Self {
            sku: sku.into(),
            sale_price,
            quantity,
            discount,
        }
    }
}

/// A single purchase transaction (receipt).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    #[serde(deserialize_with = "id_format::deserialize")]
    pub seller_id: SellerId,
    pub items: Vec<LineItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
}

impl PurchaseRecord {
    pub fn new(seller_id: impl Into<SellerId>, items: Vec<LineItem>) -> Self {
        Self {
            seller_id: seller_id.into(),
            items,
            receipt_id: None,
            date: None,
            customer_id: None,
        }
    }
}

/// The full input dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesData {
    pub sellers: Vec<Seller>,
    pub products: Vec<Product>,
    pub purchase_records: Vec<PurchaseRecord>,
}

impl SalesData {
    /// Check that every top-level collection is non-empty.
    pub fn validate(&self) -> Result<()> {
        if self.sellers.is_empty() {
            return Err(Error::invalid_input("sellers must be a non-empty array"));
        }
        if self.products.is_empty() {
            return Err(Error::invalid_input("products must be a non-empty array"));
        }
        if self.purchase_records.is_empty() {
            return Err(Error::invalid_input(
                "purchase_records must be a non-empty array",
            ));
        }
        Ok(())
    }
}

/// Quantity sold of one product by one seller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopProduct {
    pub sku: Sku,
    pub quantity: u64,
}

/// One row of the final report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub seller_id: SellerId,
    pub name: String,
    /// Rounded to two decimals.
    pub revenue: f64,
    /// Rounded to two decimals.
    pub profit: f64,
    /// Total units sold.
    pub sales_count: u64,
    /// Best-selling products, descending by quantity.
    pub top_products: Vec<TopProduct>,
    /// Rounded to two decimals.
    pub bonus: f64,
}

/// Accepts identifiers written either as JSON strings or integers.
mod id_format {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Signed(i64),
        Unsigned(u64),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => s,
            RawId::Signed(n) => n.to_string(),
            RawId::Unsigned(n) => n.to_string(),
        })
    }
}
