//! CSV statement rendering
//!
//! RFC-4180 form: every field quoted, inner quotes doubled, rows
//! newline-terminated. Layout is header row, one row per transaction,
//! a blank separator row, then the totals row. Zero amounts appear as
//! the literal "0.00" here - the dash placeholder is a table/PDF
//! presentation rule only.

use ::csv::{QuoteStyle, WriterBuilder};
use milkweb_core::{format_amount, Statement};

use crate::error::ExportError;

/// Render a statement as CSV text
pub fn statement_csv(statement: &Statement) -> Result<String, ExportError> {
    let columns = statement.columns();
    let width = columns.headers().len();

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record(columns.headers())?;

    for transaction in &statement.transactions {
        let mut row = vec![transaction.date.clone()];
        if columns.show_customer {
            row.push(transaction.customer_name.clone());
        }
        row.push(transaction.description.clone());
        row.push(format_amount(transaction.billed));
        row.push(format_amount(transaction.paid));
        writer.write_record(&row)?;
    }

    // Blank separator row between the transactions and the totals
    writer.write_record(vec![""; width])?;

    let mut totals = vec!["Total".to_string()];
    while totals.len() < width - 2 {
        totals.push(String::new());
    }
    totals.push(format_amount(statement.summary.total_billed));
    totals.push(format_amount(statement.summary.total_paid));
    writer.write_record(&totals)?;

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|_| ExportError::InvalidUtf8)
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use ::csv::{ReaderBuilder, StringRecord};
    use chrono::NaiveDate;
    use milkweb_core::{
        statement_transactions, summarize, Order, OrderItem, OrderStatus, Payment, StatementFilter,
        Transaction,
    };
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_statement(customer_id: Option<&str>) -> Statement {
        let orders = vec![Order {
            id: "ord-1".to_string(),
            customer_id: "c1".to_string(),
            customer_name: "Asha Dairy Stand".to_string(),
            date: "2024-01-05".to_string(),
            status: OrderStatus::Delivered,
            items: vec![OrderItem {
                product: "Toned Milk 1L".to_string(),
                price: dec!(50.00),
                quantity: 2,
            }],
            total_amount: dec!(100.00),
        }];
        let payments = vec![Payment {
            id: "pay-1".to_string(),
            customer_id: "c1".to_string(),
            customer_name: "Asha Dairy Stand".to_string(),
            date: "2024-01-10".to_string(),
            amount: dec!(60.00),
        }];
        let filter = match customer_id {
            Some(id) => StatementFilter::for_customer(id, date(2024, 1, 1), date(2024, 1, 31)),
            None => StatementFilter::all_customers(date(2024, 1, 1), date(2024, 1, 31)),
        };
        let transactions = statement_transactions(&orders, &payments);
        let summary = summarize(&transactions);
        Statement {
            filter,
            customer_name: customer_id.map(|_| "Asha Dairy Stand".to_string()),
            transactions,
            summary,
        }
    }

    #[test]
    fn test_csv_round_trip_row_count_and_totals() {
        let statement = sample_statement(None);
        let csv_text = statement_csv(&statement).unwrap();

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .from_reader(csv_text.as_bytes());
        let rows: Vec<StringRecord> = reader.records().map(|r| r.unwrap()).collect();

        // transactions + 1 header + 1 blank + 1 totals
        assert_eq!(rows.len(), statement.transactions.len() + 3);

        let totals = rows.last().unwrap();
        assert_eq!(&totals[0], "Total");
        assert_eq!(&totals[3], "100.00");
        assert_eq!(&totals[4], "60.00");
    }

    #[test]
    fn test_csv_every_field_quoted() {
        let statement = sample_statement(None);
        let csv_text = statement_csv(&statement).unwrap();
        let first_line = csv_text.lines().next().unwrap();
        assert_eq!(first_line, r#""Date","Customer","Description","Billed","Paid""#);
    }

    #[test]
    fn test_csv_doubles_inner_quotes() {
        let mut statement = sample_statement(None);
        statement.transactions[0].description = r#"Order "special" run"#.to_string();
        let csv_text = statement_csv(&statement).unwrap();
        assert!(csv_text.contains(r#""Order ""special"" run""#));
    }

    #[test]
    fn test_csv_hides_customer_column_when_pinned() {
        let statement = sample_statement(Some("c1"));
        let csv_text = statement_csv(&statement).unwrap();
        let first_line = csv_text.lines().next().unwrap();
        assert_eq!(first_line, r#""Date","Description","Billed","Paid""#);
        assert!(!csv_text.contains("Asha Dairy Stand"));
    }

    #[test]
    fn test_csv_zero_amounts_are_literal() {
        let statement = sample_statement(None);
        let csv_text = statement_csv(&statement).unwrap();
        // An order row has zero paid, rendered as "0.00" not a dash
        assert!(csv_text.contains(r#""100.00","0.00""#));
        assert!(!csv_text.contains('\u{2014}'));
    }

    #[test]
    fn test_csv_empty_statement() {
        let filter = StatementFilter::all_customers(date(2024, 6, 1), date(2024, 6, 30));
        let transactions: Vec<Transaction> = Vec::new();
        let summary = summarize(&transactions);
        let statement = Statement {
            filter,
            customer_name: None,
            transactions,
            summary,
        };
        let csv_text = statement_csv(&statement).unwrap();

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .from_reader(csv_text.as_bytes());
        let rows: Vec<StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        let totals = rows.last().unwrap();
        assert_eq!(&totals[3], "0.00");
        assert_eq!(&totals[4], "0.00");
    }
}
