//! Core statement processing and business logic
//!
//! The reporting pipeline lives here: domain models over the store
//! records, the quick-period system, the transaction aggregator and
//! summary calculator, the customer history view, and the `Books`
//! state the HTTP layer queries.

pub mod books;
pub mod error;
pub mod history;
pub mod models;
pub mod period;
pub mod reports;
pub mod statement;

pub use books::Books;
pub use error::{CoreError, ErrorCode};
pub use history::{customer_history, CustomerHistory};
pub use models::{Customer, Order, OrderItem, OrderStatus, Payment};
pub use period::PeriodContext;
pub use reports::{
    BooksStats, CustomerHistoryResponse, CustomersResponse, PeriodOption, StatementResponse,
};
pub use statement::{
    display_date, format_amount, format_amount_or_dash, statement_transactions, summarize,
    Statement, StatementColumns, StatementFilter, StatementSummary, Transaction, TransactionKind,
};
