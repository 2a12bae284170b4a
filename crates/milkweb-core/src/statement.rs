//! Transaction aggregation and statement summary
//!
//! A statement merges the orders and payments matching a filter window
//! into one date-sorted sequence of ledger lines, then reduces it to
//! billed/paid/pending totals. Everything here is a pure function over
//! freshly allocated data; the source collections are never touched.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Order, Payment};

/// Statement filter window
///
/// Both boundary dates are inclusive, matching the date-only
/// granularity of stored values. No customer id means all customers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementFilter {
    /// Restrict to one customer when set
    pub customer_id: Option<String>,
    /// Inclusive start date
    pub date_from: NaiveDate,
    /// Inclusive end date
    pub date_to: NaiveDate,
}

impl StatementFilter {
    /// Filter over all customers
    pub fn all_customers(date_from: NaiveDate, date_to: NaiveDate) -> Self {
        Self {
            customer_id: None,
            date_from,
            date_to,
        }
    }

    /// Filter pinned to one customer
    pub fn for_customer(customer_id: &str, date_from: NaiveDate, date_to: NaiveDate) -> Self {
        Self {
            customer_id: Some(customer_id.to_string()),
            date_from,
            date_to,
        }
    }

    /// Check if a date lies within the window (inclusive on both ends)
    pub fn contains(&self, date: &NaiveDate) -> bool {
        *date >= self.date_from && *date <= self.date_to
    }

    /// Check if a customer id passes the filter
    pub fn matches_customer(&self, customer_id: &str) -> bool {
        match &self.customer_id {
            Some(id) => id == customer_id,
            None => true,
        }
    }

    /// The date range rendered for headers and file names
    pub fn range_label(&self) -> String {
        format!("{} to {}", self.date_from, self.date_to)
    }
}

/// Kind of a statement transaction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Billing event derived from an order
    Order,
    /// Receipt event derived from a payment
    Payment,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Order => write!(f, "order"),
            TransactionKind::Payment => write!(f, "payment"),
        }
    }
}

/// Derived statement line over one order or one payment
///
/// Ephemeral: built fresh on every aggregation call, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Event date (YYYY-MM-DD)
    pub date: String,
    /// Billing or receipt
    pub kind: TransactionKind,
    /// Human-readable description
    pub description: String,
    /// Customer display name
    pub customer_name: String,
    /// Billed amount (zero for payments)
    pub billed: Decimal,
    /// Paid amount (zero for orders)
    pub paid: Decimal,
}

impl Transaction {
    /// Build the billing line for an order
    pub fn from_order(order: &Order) -> Self {
        let description = if order.items.is_empty() {
            format!("Order #{} ({})", order.id, order.status)
        } else {
            format!(
                "Order #{} - {} item{} ({})",
                order.id,
                order.item_count(),
                if order.item_count() == 1 { "" } else { "s" },
                order.status
            )
        };
        Self {
            date: order.date.clone(),
            kind: TransactionKind::Order,
            description,
            customer_name: order.customer_name.clone(),
            billed: order.total_amount,
            paid: Decimal::ZERO,
        }
    }

    /// Build the receipt line for a payment
    pub fn from_payment(payment: &Payment) -> Self {
        Self {
            date: payment.date.clone(),
            kind: TransactionKind::Payment,
            description: "Payment received".to_string(),
            customer_name: payment.customer_name.clone(),
            billed: Decimal::ZERO,
            paid: payment.amount,
        }
    }

    /// Get the transaction date as NaiveDate
    pub fn date_naive(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

/// Merge filtered orders and payments into a date-sorted transaction list
///
/// The sort is stable and keyed on the date alone, so an order and a
/// payment on the same date keep their relative input order (orders
/// first).
pub fn statement_transactions(orders: &[Order], payments: &[Payment]) -> Vec<Transaction> {
    let mut transactions: Vec<Transaction> = orders
        .iter()
        .map(Transaction::from_order)
        .chain(payments.iter().map(Transaction::from_payment))
        .collect();

    transactions.sort_by_key(|t| t.date_naive());
    transactions
}

/// Billed/paid/pending totals for a statement window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementSummary {
    /// Sum of billed fields
    pub total_billed: Decimal,
    /// Sum of paid fields
    pub total_paid: Decimal,
    /// total_billed - total_paid; negative under overpayment
    pub pending: Decimal,
}

impl StatementSummary {
    /// All-zero summary for empty windows
    pub fn zero() -> Self {
        Self {
            total_billed: Decimal::ZERO,
            total_paid: Decimal::ZERO,
            pending: Decimal::ZERO,
        }
    }
}

/// Reduce a transaction list to its summary totals
pub fn summarize(transactions: &[Transaction]) -> StatementSummary {
    let total_billed: Decimal = transactions.iter().map(|t| t.billed).sum();
    let total_paid: Decimal = transactions.iter().map(|t| t.paid).sum();
    StatementSummary {
        total_billed,
        total_paid,
        pending: total_billed - total_paid,
    }
}

/// Rendering configuration derived from the active filter
///
/// The customer column appears only when no single customer is pinned;
/// the table, PDF and CSV renderers all consume this instead of
/// branching on the filter themselves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatementColumns {
    /// Whether the customer-name column is shown
    pub show_customer: bool,
}

impl StatementColumns {
    /// Derive the column set from a filter
    pub fn for_filter(filter: &StatementFilter) -> Self {
        Self {
            show_customer: filter.customer_id.is_none(),
        }
    }

    /// Header labels in display order
    pub fn headers(&self) -> Vec<&'static str> {
        if self.show_customer {
            vec!["Date", "Customer", "Description", "Billed", "Paid"]
        } else {
            vec!["Date", "Description", "Billed", "Paid"]
        }
    }
}

/// A complete statement for one filter window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Statement {
    /// The window the statement covers
    pub filter: StatementFilter,
    /// Resolved customer name, None for all customers
    pub customer_name: Option<String>,
    /// Date-sorted transaction lines
    pub transactions: Vec<Transaction>,
    /// Reduced totals
    pub summary: StatementSummary,
}

impl Statement {
    /// Column configuration for this statement
    pub fn columns(&self) -> StatementColumns {
        StatementColumns::for_filter(&self.filter)
    }

    /// Label for the header block: customer name or "All Customers"
    pub fn customer_label(&self) -> &str {
        self.customer_name.as_deref().unwrap_or("All Customers")
    }
}

// ==================== Formatting helpers ====================

/// Format an amount with exactly two decimal places
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

/// Format an amount, rendering zero as an em-dash placeholder
pub fn format_amount_or_dash(amount: Decimal) -> String {
    if amount.is_zero() {
        "\u{2014}".to_string()
    } else {
        format_amount(amount)
    }
}

/// Render an ISO date for display as "MMM dd, yyyy"
///
/// Unparseable input is shown as-is; the stored value is never altered.
pub fn display_date(iso: &str) -> String {
    match NaiveDate::parse_from_str(iso, "%Y-%m-%d") {
        Ok(date) => date.format("%b %d, %Y").to_string(),
        Err(_) => iso.to_string(),
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OrderItem, OrderStatus};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn order(id: &str, date: &str, total: Decimal) -> Order {
        Order {
            id: id.to_string(),
            customer_id: "c1".to_string(),
            customer_name: "Asha Dairy Stand".to_string(),
            date: date.to_string(),
            status: OrderStatus::Delivered,
            items: vec![OrderItem {
                product: "Toned Milk 1L".to_string(),
                price: total,
                quantity: 1,
            }],
            total_amount: total,
        }
    }

    fn payment(id: &str, date: &str, amount: Decimal) -> Payment {
        Payment {
            id: id.to_string(),
            customer_id: "c1".to_string(),
            customer_name: "Asha Dairy Stand".to_string(),
            date: date.to_string(),
            amount,
        }
    }

    fn filter(from: &str, to: &str) -> StatementFilter {
        StatementFilter::all_customers(
            NaiveDate::parse_from_str(from, "%Y-%m-%d").unwrap(),
            NaiveDate::parse_from_str(to, "%Y-%m-%d").unwrap(),
        )
    }

    #[test]
    fn test_filter_inclusive_on_both_ends() {
        let f = filter("2024-01-01", "2024-01-31");
        assert!(f.contains(&NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));
        assert!(f.contains(&NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()));
        assert!(!f.contains(&NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()));
        assert!(!f.contains(&NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()));
    }

    #[test]
    fn test_filter_matches_customer() {
        let all = filter("2024-01-01", "2024-01-31");
        assert!(all.matches_customer("c1"));
        assert!(all.matches_customer("c2"));

        let pinned = StatementFilter::for_customer(
            "c1",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        );
        assert!(pinned.matches_customer("c1"));
        assert!(!pinned.matches_customer("c2"));
    }

    #[test]
    fn test_january_scenario() {
        // order(2024-01-05, 100) + payment(2024-01-10, 60)
        let orders = vec![order("o1", "2024-01-05", dec!(100))];
        let payments = vec![payment("p1", "2024-01-10", dec!(60))];

        let transactions = statement_transactions(&orders, &payments);
        assert_eq!(transactions.len(), 2);
        assert_eq!(transactions[0].date, "2024-01-05");
        assert_eq!(transactions[0].kind, TransactionKind::Order);
        assert_eq!(transactions[0].billed, dec!(100));
        assert_eq!(transactions[0].paid, Decimal::ZERO);
        assert_eq!(transactions[1].date, "2024-01-10");
        assert_eq!(transactions[1].kind, TransactionKind::Payment);
        assert_eq!(transactions[1].paid, dec!(60));

        let summary = summarize(&transactions);
        assert_eq!(format_amount(summary.total_billed), "100.00");
        assert_eq!(format_amount(summary.total_paid), "60.00");
        assert_eq!(format_amount(summary.pending), "40.00");
    }

    #[test]
    fn test_transactions_sorted_ascending() {
        let orders = vec![
            order("o2", "2024-03-20", dec!(50)),
            order("o1", "2024-01-05", dec!(100)),
        ];
        let payments = vec![
            payment("p2", "2024-02-11", dec!(30)),
            payment("p1", "2024-01-02", dec!(20)),
        ];

        let transactions = statement_transactions(&orders, &payments);
        let dates: Vec<&str> = transactions.iter().map(|t| t.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-01-02", "2024-01-05", "2024-02-11", "2024-03-20"]);

        for pair in transactions.windows(2) {
            assert!(pair[0].date_naive() <= pair[1].date_naive());
        }
    }

    #[test]
    fn test_same_date_tie_keeps_orders_first() {
        let orders = vec![order("o1", "2024-01-10", dec!(100))];
        let payments = vec![payment("p1", "2024-01-10", dec!(60))];

        let transactions = statement_transactions(&orders, &payments);
        assert_eq!(transactions[0].kind, TransactionKind::Order);
        assert_eq!(transactions[1].kind, TransactionKind::Payment);
    }

    #[test]
    fn test_billed_sum_matches_order_totals() {
        let orders = vec![
            order("o1", "2024-01-05", dec!(100.25)),
            order("o2", "2024-01-06", dec!(49.75)),
        ];
        let payments = vec![payment("p1", "2024-01-10", dec!(60))];

        let transactions = statement_transactions(&orders, &payments);
        let summary = summarize(&transactions);
        let expected: Decimal = orders.iter().map(|o| o.total_amount).sum();
        assert_eq!(summary.total_billed, expected);
        assert_eq!(summary.total_paid, dec!(60));
    }

    #[test]
    fn test_empty_window_summary_is_zero() {
        let transactions = statement_transactions(&[], &[]);
        assert!(transactions.is_empty());
        let summary = summarize(&transactions);
        assert_eq!(summary, StatementSummary::zero());
        assert_eq!(format_amount(summary.total_billed), "0.00");
        assert_eq!(format_amount(summary.total_paid), "0.00");
        assert_eq!(format_amount(summary.pending), "0.00");
    }

    #[test]
    fn test_no_rounding_drift() {
        // 25.50 + 24.50 must come out to exactly 50.00
        let payments = vec![
            payment("p1", "2024-01-03", dec!(25.50)),
            payment("p2", "2024-01-04", dec!(24.50)),
        ];
        let transactions = statement_transactions(&[], &payments);
        let summary = summarize(&transactions);
        assert_eq!(summary.total_paid, dec!(50.00));
        assert_eq!(format_amount(summary.total_paid), "50.00");
    }

    #[test]
    fn test_overpayment_gives_negative_pending() {
        let orders = vec![order("o1", "2024-01-05", dec!(40))];
        let payments = vec![payment("p1", "2024-01-10", dec!(60))];
        let summary = summarize(&statement_transactions(&orders, &payments));
        assert_eq!(summary.pending, dec!(-20));
    }

    #[test]
    fn test_columns_follow_filter() {
        let all = filter("2024-01-01", "2024-01-31");
        let pinned = StatementFilter::for_customer(
            "c1",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        );

        assert!(StatementColumns::for_filter(&all).show_customer);
        assert!(!StatementColumns::for_filter(&pinned).show_customer);
        assert_eq!(
            StatementColumns::for_filter(&all).headers(),
            vec!["Date", "Customer", "Description", "Billed", "Paid"]
        );
        assert_eq!(
            StatementColumns::for_filter(&pinned).headers(),
            vec!["Date", "Description", "Billed", "Paid"]
        );
    }

    #[test]
    fn test_order_description() {
        let o = order("o7", "2024-01-05", dec!(100));
        let t = Transaction::from_order(&o);
        assert!(t.description.contains("Order #o7"));
        assert!(t.description.contains("1 item"));
        assert!(t.description.contains("delivered"));
    }

    #[test]
    fn test_format_amount_and_dash() {
        assert_eq!(format_amount(dec!(7.5)), "7.50");
        assert_eq!(format_amount(Decimal::ZERO), "0.00");
        assert_eq!(format_amount_or_dash(Decimal::ZERO), "\u{2014}");
        assert_eq!(format_amount_or_dash(dec!(12.3)), "12.30");
    }

    #[test]
    fn test_display_date() {
        assert_eq!(display_date("2024-01-05"), "Jan 05, 2024");
        assert_eq!(display_date("not-a-date"), "not-a-date");
    }
}
