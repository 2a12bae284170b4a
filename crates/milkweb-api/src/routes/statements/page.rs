//! Statements page - HTMX page rendering
//!
//! The filter bar drives everything: quick-period buttons set both
//! bounds atomically, editing a date input flips the period to custom
//! while keeping the other bound, and the export buttons carry the
//! active filter in their query strings.

use axum::extract::Query;
use std::collections::HashMap;

use milkweb_config::QuickPeriod;
use milkweb_core::{
    display_date, format_amount, format_amount_or_dash, Statement, StatementColumns,
    StatementFilter,
};

use super::resolve_filter;
use crate::{page_response, ApiError, AppState};

/// Statements page with filter bar, table and export buttons
pub async fn page_statements(
    state: axum::extract::State<AppState>,
    params: Query<HashMap<String, String>>,
    headers: axum::http::HeaderMap,
) -> Result<axum::response::Html<String>, ApiError> {
    let (filter, period) = resolve_filter(&params.0, &state.config)?;

    let books = state.books.read().await;
    let statement = books.statement(&filter);
    let columns = statement.columns();
    let symbol = state.config.organization.currency_symbol.clone();
    let org_name = state.config.organization.name.clone();

    let customer_options: String = books
        .customers()
        .iter()
        .map(|c| {
            let selected = if filter.customer_id.as_deref() == Some(c.id.as_str()) {
                " selected"
            } else {
                ""
            };
            format!(r#"<option value='{}'{}>{}</option>"#, c.id, selected, c.name)
        })
        .collect();

    let quick_buttons: String = [
        (QuickPeriod::Today, "Today"),
        (QuickPeriod::Week, "Week"),
        (QuickPeriod::Month, "Month"),
    ]
    .iter()
    .map(|(value, label)| {
        let active = if *value == period {
            "bg-indigo-600 text-white"
        } else {
            "bg-white text-gray-600 hover:bg-gray-50"
        };
        format!(
            r#"<button type='submit' class='px-3 py-1.5 text-sm border rounded-lg {}' onclick="document.getElementById('period-field').value='{}'">{}</button>"#,
            active, value, label
        )
    })
    .collect();

    let query = filter_query(&filter, period);
    let table = statement_table_html(&statement, &columns, &symbol);

    let inner_content = format!(
        r#"<div class='mb-6 flex items-center justify-between'>
            <h2 class='text-2xl font-bold'>Account Statements</h2>
            <div class='flex gap-2'>
                <a href='/api/statements/export.csv?{}' class='px-3 py-1.5 text-sm border rounded-lg bg-white hover:bg-gray-50'>Export CSV</a>
                <a href='/api/statements/export.pdf?{}' class='px-3 py-1.5 text-sm border rounded-lg bg-white hover:bg-gray-50'>Export PDF</a>
            </div>
        </div>
        <form id='statement-filter' method='get' action='/statements' class='flex flex-wrap items-center gap-3 mb-4 p-3 bg-white rounded-lg border shadow-sm'>
            <select name='customer_id' class='px-2 py-1.5 text-sm border rounded-lg bg-white min-w-[160px]'>
                <option value=''>All Customers</option>
                {}
            </select>
            <input type='date' name='date_from' value='{}' class='px-2 py-1.5 text-sm border rounded' onchange="document.getElementById('period-field').value='custom'">
            <span class='text-gray-400'>to</span>
            <input type='date' name='date_to' value='{}' class='px-2 py-1.5 text-sm border rounded' onchange="document.getElementById('period-field').value='custom'">
            <input type='hidden' id='period-field' name='period' value='{}'>
            <div class='flex gap-1'>{}</div>
            <button type='submit' class='px-3 py-1.5 text-sm bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>Apply</button>
        </form>
        <div id='statement-table'>{}</div>"#,
        query,
        query,
        customer_options,
        filter.date_from,
        filter.date_to,
        period,
        quick_buttons,
        table
    );

    Ok(axum::response::Html(page_response(
        &headers,
        "Account Statements",
        &org_name,
        "/statements",
        &inner_content,
    )))
}

/// HTMX: Statement table - Partial page update
pub async fn htmx_statements_table(
    state: axum::extract::State<AppState>,
    params: Query<HashMap<String, String>>,
) -> Result<axum::response::Html<String>, ApiError> {
    let (filter, _period) = resolve_filter(&params.0, &state.config)?;

    let books = state.books.read().await;
    let statement = books.statement(&filter);
    let columns = statement.columns();
    let symbol = state.config.organization.currency_symbol.clone();

    Ok(axum::response::Html(statement_table_html(
        &statement, &columns, &symbol,
    )))
}

/// Render the statement table with its totals footer
fn statement_table_html(
    statement: &Statement,
    columns: &StatementColumns,
    symbol: &str,
) -> String {
    if statement.transactions.is_empty() {
        return format!(
            r#"<div class='bg-white rounded-lg border p-12 text-center text-gray-500'>
                <p class='font-medium'>No transactions found</p>
                <p class='text-sm mt-1'>Nothing recorded between {} and {}.</p>
            </div>"#,
            statement.filter.date_from, statement.filter.date_to
        );
    }

    let header_cells: String = columns
        .headers()
        .iter()
        .map(|h| {
            let align = if *h == "Billed" || *h == "Paid" {
                "text-right"
            } else {
                "text-left"
            };
            format!(
                r#"<th class='px-4 py-2 {} text-xs font-medium text-gray-500 uppercase'>{}</th>"#,
                align, h
            )
        })
        .collect();

    let mut rows = String::new();
    for transaction in &statement.transactions {
        let customer_cell = if columns.show_customer {
            format!(r#"<td class='px-4 py-2'>{}</td>"#, transaction.customer_name)
        } else {
            String::new()
        };
        rows.push_str(&format!(
            r#"<tr class='border-t hover:bg-gray-50'>
                <td class='px-4 py-2 text-gray-500'>{}</td>
                {}
                <td class='px-4 py-2'>{}</td>
                <td class='px-4 py-2 text-right'>{}</td>
                <td class='px-4 py-2 text-right'>{}</td>
            </tr>"#,
            display_date(&transaction.date),
            customer_cell,
            transaction.description,
            format_amount_or_dash(transaction.billed),
            format_amount_or_dash(transaction.paid),
        ));
    }

    let label_span = if columns.show_customer { 3 } else { 2 };
    let pending_class = if statement.summary.pending > rust_decimal::Decimal::ZERO {
        "text-red-700"
    } else {
        "text-green-700"
    };

    format!(
        r#"<div class='bg-white rounded-lg border overflow-hidden'>
            <table class='w-full text-sm'>
                <thead class='bg-gray-50'><tr>{}</tr></thead>
                <tbody>{}</tbody>
                <tfoot class='bg-gray-50 font-medium'>
                    <tr class='border-t'>
                        <td class='px-4 py-2' colspan='{}'>Total</td>
                        <td class='px-4 py-2 text-right'>{} {}</td>
                        <td class='px-4 py-2 text-right'>{} {}</td>
                    </tr>
                    <tr class='border-t'>
                        <td class='px-4 py-2' colspan='{}'>Pending Balance</td>
                        <td class='px-4 py-2 text-right {}' colspan='2'>{} {}</td>
                    </tr>
                </tfoot>
            </table>
        </div>"#,
        header_cells,
        rows,
        label_span,
        symbol,
        format_amount(statement.summary.total_billed),
        symbol,
        format_amount(statement.summary.total_paid),
        label_span,
        pending_class,
        symbol,
        format_amount(statement.summary.pending),
    )
}

/// Build the query string carrying the active filter
fn filter_query(filter: &StatementFilter, period: QuickPeriod) -> String {
    let customer = filter
        .customer_id
        .as_deref()
        .map(|id| urlencoding::encode(id).into_owned())
        .unwrap_or_default();
    format!(
        "customer_id={}&period={}&date_from={}&date_to={}",
        customer, period, filter.date_from, filter.date_to
    )
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use milkweb_core::{statement_transactions, summarize, Payment};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn statement(customer_id: Option<&str>) -> Statement {
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
        let transactions = statement_transactions(&[], &payments);
        let summary = summarize(&transactions);
        Statement {
            filter,
            customer_name: customer_id.map(|_| "Asha Dairy Stand".to_string()),
            transactions,
            summary,
        }
    }

    #[test]
    fn test_table_shows_customer_column_for_all_customers() {
        let s = statement(None);
        let html = statement_table_html(&s, &s.columns(), "Rs.");
        assert!(html.contains(">Customer</th>"));
        assert!(html.contains("Asha Dairy Stand"));
    }

    #[test]
    fn test_table_hides_customer_column_when_pinned() {
        let s = statement(Some("c1"));
        let html = statement_table_html(&s, &s.columns(), "Rs.");
        assert!(!html.contains(">Customer</th>"));
        assert!(!html.contains("<td class='px-4 py-2'>Asha Dairy Stand</td>"));
    }

    #[test]
    fn test_table_zero_billed_renders_dash() {
        let s = statement(None);
        let html = statement_table_html(&s, &s.columns(), "Rs.");
        // A payment row has zero billed
        assert!(html.contains('\u{2014}'));
        assert!(html.contains("60.00"));
    }

    #[test]
    fn test_empty_statement_renders_empty_state() {
        let filter = StatementFilter::all_customers(date(2024, 6, 1), date(2024, 6, 30));
        let transactions = Vec::new();
        let summary = summarize(&transactions);
        let s = Statement {
            filter,
            customer_name: None,
            transactions,
            summary,
        };
        let html = statement_table_html(&s, &s.columns(), "Rs.");
        assert!(html.contains("No transactions found"));
    }

    #[test]
    fn test_filter_query_encodes_customer() {
        let filter = StatementFilter::for_customer("c 1", date(2024, 1, 1), date(2024, 1, 31));
        let query = filter_query(&filter, QuickPeriod::Custom);
        assert!(query.contains("customer_id=c%201"));
        assert!(query.contains("period=custom"));
        assert!(query.contains("date_from=2024-01-01"));
        assert!(query.contains("date_to=2024-01-31"));
    }
}
