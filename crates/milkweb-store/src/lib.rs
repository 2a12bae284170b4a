//! Vendor data store backends
//!
//! Loads and persists the vendor data file (customers, orders, payments).
//! The reporting core treats the loaded data as read-only; the only
//! mutations go through explicit record_* operations on the core side,
//! which persist by handing the whole data set back to `save`.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

pub mod error;
pub mod records;

pub use error::StoreError;
pub use records::{CustomerRecord, OrderItemRecord, OrderRecord, PaymentRecord, VendorData};

/// Store backend reference type
pub type StoreRef = Arc<dyn StoreBackend>;

/// Trait for vendor data store backends
#[async_trait]
pub trait StoreBackend: Send + Sync {
    /// Load the full vendor data set from a file
    async fn load(&self, path: PathBuf) -> Result<VendorData, StoreError>;

    /// Persist the full vendor data set to a file
    async fn save(&self, path: PathBuf, data: &VendorData) -> Result<(), StoreError>;
}

/// JSON file backend, the default store
#[derive(Debug, Default)]
pub struct JsonStoreBackend;

#[async_trait]
impl StoreBackend for JsonStoreBackend {
    async fn load(&self, path: PathBuf) -> Result<VendorData, StoreError> {
        let content = tokio::fs::read_to_string(&path).await?;

        let data: VendorData =
            serde_json::from_str(&content).map_err(|e| StoreError::InvalidFormat {
                location: path.to_string_lossy().to_string(),
                message: e.to_string(),
            })?;

        data.validate()
            .map_err(|message| StoreError::ValidationError { message })?;

        Ok(data)
    }

    async fn save(&self, path: PathBuf, data: &VendorData) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(data).map_err(|e| StoreError::InvalidFormat {
            location: path.to_string_lossy().to_string(),
            message: e.to_string(),
        })?;

        tokio::fs::write(&path, content).await?;
        Ok(())
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn sample_json() -> &'static str {
        r#"{
            "customers": [
                {"id": "c1", "name": "Asha Dairy Stand", "phone": "555-0101",
                 "address": "12 Market Rd",
                 "total_amount": "100.00", "paid_amount": "60.00", "pending_amount": "40.00"}
            ],
            "orders": [
                {"id": "o1", "customer_id": "c1", "customer_name": "Asha Dairy Stand",
                 "date": "2024-01-05", "status": "delivered",
                 "items": [{"product": "Toned Milk 1L", "price": "50.00", "quantity": 2}],
                 "total_amount": "100.00"}
            ],
            "payments": [
                {"id": "p1", "customer_id": "c1", "customer_name": "Asha Dairy Stand",
                 "date": "2024-01-10", "amount": "60.00"}
            ]
        }"#
    }

    #[test]
    fn test_parse_vendor_data() {
        let data: VendorData = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(data.customers.len(), 1);
        assert_eq!(data.orders.len(), 1);
        assert_eq!(data.payments.len(), 1);
        assert_eq!(data.orders[0].total_amount, dec!(100.00));
        assert_eq!(data.payments[0].amount, dec!(60.00));
        assert!(data.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_quantity() {
        let mut data: VendorData = serde_json::from_str(sample_json()).unwrap();
        data.orders[0].items[0].quantity = 0;
        assert!(data.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_positive_payment() {
        let mut data: VendorData = serde_json::from_str(sample_json()).unwrap();
        data.payments[0].amount = Decimal::ZERO;
        assert!(data.validate().is_err());
    }

    #[test]
    fn test_round_trip_serialization() {
        let data: VendorData = serde_json::from_str(sample_json()).unwrap();
        let serialized = serde_json::to_string_pretty(&data).unwrap();
        let reparsed: VendorData = serde_json::from_str(&serialized).unwrap();
        assert_eq!(reparsed.customers[0].pending_amount, dec!(40.00));
        assert_eq!(reparsed.orders[0].items[0].quantity, 2);
    }

    #[tokio::test]
    async fn test_json_backend_load_missing_file() {
        let backend = JsonStoreBackend::default();
        let result = backend.load(PathBuf::from("/nonexistent/vendor.json")).await;
        assert!(matches!(result, Err(StoreError::IoError(_))));
    }
}
