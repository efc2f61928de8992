//! Dataset loading from JSON.
//!
//! Checks the shape of the three top-level collections before handing each
//! one to serde, so a missing or mistyped collection surfaces as
//! [`Error::InvalidInput`] rather than a generic parse error.

use std::fs;
use std::path::Path;

use sales_core::{Error, Result, SalesData};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

/// Load a dataset from a JSON file.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<SalesData> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = raw.len(), "read dataset file");
    parse_dataset(&raw)
}

/// Parse a dataset from a JSON string.
pub fn parse_dataset(json: &str) -> Result<SalesData> {
    let value: Value = serde_json::from_str(json)?;
    dataset_from_value(value)
}

/// Convert an already-parsed JSON document into a dataset.
pub fn dataset_from_value(value: Value) -> Result<SalesData> {
    let Value::Object(mut root) = value else {
        return Err(Error::invalid_input("dataset must be a JSON object"));
    };

    let data = SalesData {
        sellers: take_collection(&mut root, "sellers")?,
        products: take_collection(&mut root, "products")?,
        purchase_records: take_collection(&mut root, "purchase_records")?,
    };

    debug!(
        sellers = data.sellers.len(),
        products = data.products.len(),
        purchase_records = data.purchase_records.len(),
        "parsed dataset"
    );
    Ok(data)
}

/// Remove `key` from `root`, requiring a non-empty array.
fn take_collection<T: DeserializeOwned>(root: &mut Map<String, Value>, key: &str) -> Result<Vec<T>> {
    match root.remove(key) {
        None | Some(Value::Null) => Err(Error::invalid_input(format!("{key} is missing"))),
        Some(Value::Array(items)) if items.is_empty() => {
            Err(Error::invalid_input(format!("{key} must not be empty")))
        }
        Some(value @ Value::Array(_)) => Ok(serde_json::from_value(value)?),
        Some(_) => Err(Error::invalid_input(format!("{key} must be an array"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATASET: &str = r#"{
        "customers": [{"id": "customer_1"}],
        "sellers": [
            {"id": "seller_1", "first_name": "Alexey", "last_name": "Petrov", "position": "Senior"},
            {"id": "seller_2", "first_name": "Ivan", "last_name": "Ivanov"}
        ],
        "products": [
            {"sku": "SKU_001", "name": "Tea", "category": "Drinks", "purchase_price": 3.5, "sale_price": 7}
        ],
        "purchase_records": [
            {
                "receipt_id": "receipt_1",
                "date": "2023-12-04",
                "seller_id": "seller_1",
                "customer_id": "customer_1",
                "items": [{"sku": "SKU_001", "sale_price": 7, "quantity": 2, "discount": 10}],
                "total_amount": 12.6
            }
        ]
    }"#;

    #[test]
    fn test_parse_dataset() {
        let data = parse_dataset(DATASET).unwrap();
        assert_eq!(data.sellers.len(), 2);
        assert_eq!(data.products[0].purchase_price, 3.5);
        assert_eq!(data.products[0].category.as_deref(), Some("Drinks"));

        let record = &data.purchase_records[0];
        assert_eq!(record.receipt_id.as_deref(), Some("receipt_1"));
        assert_eq!(record.items[0].quantity, 2);
        assert_eq!(record.items[0].discount, 10.0);
    }

    #[test]
    fn test_missing_collection() {
        let err = parse_dataset(r#"{"sellers": [], "products": []}"#).unwrap_err();
        assert!(err.is_invalid_input());

        let err = parse_dataset(
            r#"{"sellers": [{"id": 1, "first_name": "A", "last_name": "B"}],
                "products": [{"sku": "X", "purchase_price": 1}]}"#,
        )
        .unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("purchase_records is missing"));
    }

    #[test]
    fn test_collection_not_an_array() {
        let err = parse_dataset(r#"{"sellers": {"id": 1}, "products": [], "purchase_records": []}"#)
            .unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("sellers must be an array"));
    }

    #[test]
    fn test_empty_collection() {
        let err = parse_dataset(
            r#"{"sellers": [{"id": 1, "first_name": "A", "last_name": "B"}],
                "products": [],
                "purchase_records": []}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("products must not be empty"));
    }

    #[test]
    fn test_root_must_be_object() {
        let err = parse_dataset("[1, 2, 3]").unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_malformed_record_is_json_error() {
        let err = parse_dataset(
            r#"{"sellers": [{"id": 1}],
                "products": [{"sku": "X", "purchase_price": 1}],
                "purchase_records": [{"seller_id": 1, "items": []}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_dataset("/nonexistent/sales/dataset.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
