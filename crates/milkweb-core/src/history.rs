//! Customer history view model
//!
//! Order history for one customer, most recent first, alongside the
//! customer's stored totals. The totals are displayed as stored, not
//! recomputed from the filtered orders; keeping them honest is the job
//! of the record_* mutation rule in [`crate::books::Books`].

use serde::{Deserialize, Serialize};

use crate::models::{Customer, Order};

/// Order history for one customer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerHistory {
    /// The customer with their stored total/paid/pending figures
    pub customer: Customer,
    /// The customer's orders, descending by date
    pub orders: Vec<Order>,
    /// Number of orders in the history
    pub order_count: usize,
}

/// Build the history view for one customer
///
/// Filters the full order list down to the customer and sorts it
/// descending by date - the opposite order from the statement
/// aggregator, which lists oldest first.
pub fn customer_history(customer: Customer, all_orders: &[Order]) -> CustomerHistory {
    let mut orders: Vec<Order> = all_orders
        .iter()
        .filter(|o| o.customer_id == customer.id)
        .cloned()
        .collect();

    orders.sort_by(|a, b| b.date.cmp(&a.date));

    let order_count = orders.len();
    CustomerHistory {
        customer,
        orders,
        order_count,
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OrderItem, OrderStatus};
    use rust_decimal_macros::dec;

    fn customer(id: &str) -> Customer {
        Customer {
            id: id.to_string(),
            name: "Asha Dairy Stand".to_string(),
            phone: "555-0101".to_string(),
            address: "12 Market Rd".to_string(),
            total_amount: dec!(100.00),
            paid_amount: dec!(60.00),
            pending_amount: dec!(40.00),
        }
    }

    fn order(id: &str, customer_id: &str, date: &str) -> Order {
        Order {
            id: id.to_string(),
            customer_id: customer_id.to_string(),
            customer_name: "Asha Dairy Stand".to_string(),
            date: date.to_string(),
            status: OrderStatus::Delivered,
            items: vec![OrderItem {
                product: "Toned Milk 1L".to_string(),
                price: dec!(25.00),
                quantity: 2,
            }],
            total_amount: dec!(50.00),
        }
    }

    #[test]
    fn test_history_filters_to_customer() {
        let orders = vec![
            order("o1", "c1", "2024-01-05"),
            order("o2", "c2", "2024-01-06"),
            order("o3", "c1", "2024-01-07"),
        ];
        let history = customer_history(customer("c1"), &orders);
        assert_eq!(history.order_count, 2);
        assert!(history.orders.iter().all(|o| o.customer_id == "c1"));
    }

    #[test]
    fn test_history_sorted_descending() {
        let orders = vec![
            order("o1", "c1", "2024-01-05"),
            order("o2", "c1", "2024-03-01"),
            order("o3", "c1", "2024-02-10"),
        ];
        let history = customer_history(customer("c1"), &orders);
        let dates: Vec<&str> = history.orders.iter().map(|o| o.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-03-01", "2024-02-10", "2024-01-05"]);
    }

    #[test]
    fn test_history_keeps_stored_totals() {
        // Totals come from the customer record, not from the order list
        let history = customer_history(customer("c1"), &[]);
        assert_eq!(history.order_count, 0);
        assert_eq!(history.customer.total_amount, dec!(100.00));
        assert_eq!(history.customer.pending_amount, dec!(40.00));
    }
}
