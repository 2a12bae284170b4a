//! Core domain models for the vendor business

use chrono::NaiveDate;
use milkweb_store::{CustomerRecord, OrderItemRecord, OrderRecord, PaymentRecord};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order placed, not yet delivered
    Pending,
    /// Order delivered to the customer
    Delivered,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "delivered" => Ok(OrderStatus::Delivered),
            _ => Err(format!("Invalid order status: {}", s)),
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Delivered => write!(f, "delivered"),
        }
    }
}

/// Customer information with cached statement totals
///
/// The three monetary fields are a cache over the order/payment log,
/// maintained by the record_* mutations in [`crate::books::Books`].
/// Invariant: pending_amount = total_amount - paid_amount.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Unique customer identifier
    pub id: String,
    /// Customer display name
    pub name: String,
    /// Contact phone number
    pub phone: String,
    /// Delivery address
    pub address: String,
    /// Total billed across all orders
    pub total_amount: Decimal,
    /// Total received across all payments
    pub paid_amount: Decimal,
    /// Outstanding balance
    pub pending_amount: Decimal,
}

impl Customer {
    /// Check if the customer owes anything
    pub fn has_outstanding(&self) -> bool {
        self.pending_amount > Decimal::ZERO
    }
}

impl From<CustomerRecord> for Customer {
    fn from(record: CustomerRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            phone: record.phone,
            address: record.address,
            total_amount: record.total_amount,
            paid_amount: record.paid_amount,
            pending_amount: record.pending_amount,
        }
    }
}

impl From<&Customer> for CustomerRecord {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id.clone(),
            name: customer.name.clone(),
            phone: customer.phone.clone(),
            address: customer.address.clone(),
            total_amount: customer.total_amount,
            paid_amount: customer.paid_amount,
            pending_amount: customer.pending_amount,
        }
    }
}

/// One line item of an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    /// Product name
    pub product: String,
    /// Unit price, non-negative
    pub price: Decimal,
    /// Quantity ordered, positive
    pub quantity: u32,
}

impl OrderItem {
    /// Line total (price * quantity)
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

impl From<OrderItemRecord> for OrderItem {
    fn from(record: OrderItemRecord) -> Self {
        Self {
            product: record.product,
            price: record.price,
            quantity: record.quantity,
        }
    }
}

impl From<&OrderItem> for OrderItemRecord {
    fn from(item: &OrderItem) -> Self {
        Self {
            product: item.product.clone(),
            price: item.price,
            quantity: item.quantity,
        }
    }
}

/// Order information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Unique order identifier
    pub id: String,
    /// Owning customer id
    pub customer_id: String,
    /// Denormalized customer name for display
    pub customer_name: String,
    /// Order date (YYYY-MM-DD)
    pub date: String,
    /// Order status
    pub status: OrderStatus,
    /// Ordered sequence of line items
    pub items: Vec<OrderItem>,
    /// Order total, expected to equal the sum of line totals
    pub total_amount: Decimal,
}

impl Order {
    /// Get the order date as NaiveDate
    pub fn date_naive(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    /// Sum of line totals; not used to overwrite total_amount
    pub fn computed_total(&self) -> Decimal {
        self.items.iter().map(|i| i.line_total()).sum()
    }

    /// Number of line items
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

impl From<OrderRecord> for Order {
    fn from(record: OrderRecord) -> Self {
        // Unknown status strings fall back to pending
        let status = record.status.parse().unwrap_or_default();
        Self {
            id: record.id,
            customer_id: record.customer_id,
            customer_name: record.customer_name,
            date: record.date,
            status,
            items: record.items.into_iter().map(OrderItem::from).collect(),
            total_amount: record.total_amount,
        }
    }
}

impl From<&Order> for OrderRecord {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.clone(),
            customer_id: order.customer_id.clone(),
            customer_name: order.customer_name.clone(),
            date: order.date.clone(),
            status: order.status.to_string(),
            items: order.items.iter().map(OrderItemRecord::from).collect(),
            total_amount: order.total_amount,
        }
    }
}

/// Payment information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Unique payment identifier
    pub id: String,
    /// Owning customer id
    pub customer_id: String,
    /// Denormalized customer name for display
    pub customer_name: String,
    /// Payment date (YYYY-MM-DD)
    pub date: String,
    /// Amount received, positive
    pub amount: Decimal,
}

impl Payment {
    /// Get the payment date as NaiveDate
    pub fn date_naive(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

impl From<PaymentRecord> for Payment {
    fn from(record: PaymentRecord) -> Self {
        Self {
            id: record.id,
            customer_id: record.customer_id,
            customer_name: record.customer_name,
            date: record.date,
            amount: record.amount,
        }
    }
}

impl From<&Payment> for PaymentRecord {
    fn from(payment: &Payment) -> Self {
        Self {
            id: payment.id.clone(),
            customer_id: payment.customer_id.clone(),
            customer_name: payment.customer_name.clone(),
            date: payment.date.clone(),
            amount: payment.amount,
        }
    }
}

// ==================== Tests ====================
