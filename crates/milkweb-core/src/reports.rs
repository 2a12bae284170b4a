//! Response structures for the JSON API

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::history::CustomerHistory;
use crate::models::Customer;
use crate::statement::{Statement, StatementColumns};

/// Customers list response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomersResponse {
    pub customers: Vec<Customer>,
    pub total_count: usize,
}

/// Customer history response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerHistoryResponse {
    pub history: CustomerHistory,
}

/// Statement response: transactions, totals and rendering config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementResponse {
    pub statement: Statement,
    pub columns: StatementColumns,
    pub total_count: usize,
}

/// Dashboard counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BooksStats {
    pub customer_count: usize,
    pub order_count: usize,
    pub payment_count: usize,
    pub total_billed: Decimal,
    pub total_received: Decimal,
    pub total_outstanding: Decimal,
}

/// Quick period option (for UI dropdowns)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodOption {
    pub value: String,
    pub label: String,
}
