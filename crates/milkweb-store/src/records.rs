//! On-disk record types for the vendor data file
//!
//! These mirror the JSON schema of the data file one-to-one. Domain
//! behavior (status enums, date parsing, aggregation) lives in
//! milkweb-core; this layer stays a faithful serialization schema.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Customer record with cached statement totals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerRecord {
    /// Unique customer identifier
    pub id: String,
    /// Customer display name
    pub name: String,
    /// Contact phone number
    #[serde(default)]
    pub phone: String,
    /// Delivery address
    #[serde(default)]
    pub address: String,
    /// Total billed across all orders
    #[serde(default)]
    pub total_amount: Decimal,
    /// Total received across all payments
    #[serde(default)]
    pub paid_amount: Decimal,
    /// Outstanding balance (total_amount - paid_amount)
    #[serde(default)]
    pub pending_amount: Decimal,
}

/// One line item of an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemRecord {
    /// Product name (e.g. "Full Cream Milk 1L")
    pub product: String,
    /// Unit price, non-negative
    pub price: Decimal,
    /// Quantity ordered, positive
    pub quantity: u32,
}

/// Order record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Unique order identifier
    pub id: String,
    /// Owning customer id
    pub customer_id: String,
    /// Denormalized customer name for display
    #[serde(default)]
    pub customer_name: String,
    /// Order date (YYYY-MM-DD)
    pub date: String,
    /// Order status string ("pending" or "delivered")
    #[serde(default = "default_status")]
    pub status: String,
    /// Ordered sequence of line items
    #[serde(default)]
    pub items: Vec<OrderItemRecord>,
    /// Order total, expected to equal the sum of item price * quantity
    pub total_amount: Decimal,
}

fn default_status() -> String {
    "pending".to_string()
}

/// Payment record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Unique payment identifier
    pub id: String,
    /// Owning customer id
    pub customer_id: String,
    /// Denormalized customer name for display
    #[serde(default)]
    pub customer_name: String,
    /// Payment date (YYYY-MM-DD)
    pub date: String,
    /// Amount received, positive
    pub amount: Decimal,
}

/// Root of the vendor data file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VendorData {
    #[serde(default)]
    pub customers: Vec<CustomerRecord>,
    #[serde(default)]
    pub orders: Vec<OrderRecord>,
    #[serde(default)]
    pub payments: Vec<PaymentRecord>,
}

impl VendorData {
    /// Basic shape checks applied after loading
    pub fn validate(&self) -> Result<(), String> {
        for order in &self.orders {
            if order.customer_id.is_empty() {
                return Err(format!("Order {} has no customer id", order.id));
            }
            for item in &order.items {
                if item.price < Decimal::ZERO {
                    return Err(format!(
                        "Order {} item '{}' has a negative price",
                        order.id, item.product
                    ));
                }
                if item.quantity == 0 {
                    return Err(format!(
                        "Order {} item '{}' has zero quantity",
                        order.id, item.product
                    ));
                }
            }
        }
        for payment in &self.payments {
            if payment.amount <= Decimal::ZERO {
                return Err(format!("Payment {} has a non-positive amount", payment.id));
            }
        }
        Ok(())
    }
}
