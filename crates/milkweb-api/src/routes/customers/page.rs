//! Customers pages - HTMX page rendering

use axum::extract::{Path, Query};
use std::collections::HashMap;

use milkweb_core::{display_date, format_amount, Customer};
use rust_decimal::Decimal;

use crate::{page_response, ApiError, AppState};

/// Customers list page with live search
pub async fn page_customers(
    state: axum::extract::State<AppState>,
    params: Query<HashMap<String, String>>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let books = state.books.read().await;
    let query = params.get("q").map(|s| s.as_str()).unwrap_or("");
    let customers = if query.is_empty() {
        books.customers().to_vec()
    } else {
        books.search_customers(query)
    };

    let org_name = state.config.organization.name.clone();
    let symbol = state.config.organization.currency_symbol.clone();

    let inner_content = format!(
        r#"<div class='mb-6 flex items-center justify-between'>
            <h2 class='text-2xl font-bold'>Customers</h2>
            <span class='text-sm text-gray-500'>{} customers</span>
        </div>
        <div class='mb-4'>
            <input type='search' name='q' value='{}' placeholder='Search by name or phone...'
                class='w-full max-w-md px-3 py-2 border rounded-lg bg-white text-sm'
                hx-get='/customers/list' hx-target='#customer-list'
                hx-trigger='keyup changed delay:300ms, search'>
        </div>
        <div id='customer-list'>{}</div>"#,
        customers.len(),
        query,
        customer_rows_html(&customers, &symbol)
    );

    axum::response::Html(page_response(
        &headers,
        "Customers",
        &org_name,
        "/customers",
        &inner_content,
    ))
}

/// Render the customer list rows
pub(crate) fn customer_rows_html(customers: &[Customer], symbol: &str) -> String {
    if customers.is_empty() {
        return r#"<div class='bg-white rounded-lg border p-12 text-center text-gray-500'><p>No customers found</p></div>"#.to_string();
    }

    let mut html = String::from("<div class='bg-white rounded-lg border divide-y'>");
    for customer in customers {
        let badge = if customer.has_outstanding() {
            format!(
                r#"<span class='px-2 py-0.5 text-xs rounded-full bg-red-50 text-red-700'>Due {} {}</span>"#,
                symbol,
                format_amount(customer.pending_amount)
            )
        } else {
            r#"<span class='px-2 py-0.5 text-xs rounded-full bg-green-50 text-green-700'>Settled</span>"#
                .to_string()
        };
        html.push_str(&format!(
            r#"<a href='/customers/{}' class='flex items-center justify-between px-4 py-3 hover:bg-gray-50'>
                <div>
                    <p class='font-medium'>{}</p>
                    <p class='text-sm text-gray-500'>{} &middot; {}</p>
                </div>
                {}
            </a>"#,
            customer.id, customer.name, customer.phone, customer.address, badge
        ));
    }
    html.push_str("</div>");
    html
}

/// Customer detail page: stored totals, payment form and order history
pub async fn page_customer_detail(
    state: axum::extract::State<AppState>,
    path: Path<String>,
    headers: axum::http::HeaderMap,
) -> Result<axum::response::Html<String>, ApiError> {
    let books = state.books.read().await;
    let history = books.customer_history(&path.0)?;
    let customer = &history.customer;

    let org_name = state.config.organization.name.clone();
    let symbol = state.config.organization.currency_symbol.clone();
    let today = chrono::Utc::now().date_naive();

    let pending_class = if customer.pending_amount > Decimal::ZERO {
        "text-red-700"
    } else {
        "text-green-700"
    };

    let mut orders_html = String::new();
    if history.orders.is_empty() {
        orders_html.push_str(
            r#"<div class='bg-white rounded-lg border p-8 text-center text-gray-500'><p>No orders yet</p></div>"#,
        );
    }
    for order in &history.orders {
        let items_rows: String = order
            .items
            .iter()
            .map(|item| {
                format!(
                    r#"<tr class='border-t'>
                        <td class='px-3 py-1.5'>{}</td>
                        <td class='px-3 py-1.5 text-right'>{}</td>
                        <td class='px-3 py-1.5 text-right'>{} {}</td>
                        <td class='px-3 py-1.5 text-right'>{} {}</td>
                    </tr>"#,
                    item.product,
                    item.quantity,
                    symbol,
                    format_amount(item.price),
                    symbol,
                    format_amount(item.line_total()),
                )
            })
            .collect();

        let status_badge = match order.status {
            milkweb_core::OrderStatus::Delivered => {
                r#"<span class='px-2 py-0.5 text-xs rounded-full bg-green-50 text-green-700'>delivered</span>"#
            }
            milkweb_core::OrderStatus::Pending => {
                r#"<span class='px-2 py-0.5 text-xs rounded-full bg-yellow-50 text-yellow-700'>pending</span>"#
            }
        };

        orders_html.push_str(&format!(
            r#"<div class='bg-white rounded-lg border mb-3'>
                <div class='flex items-center justify-between px-4 py-2 border-b bg-gray-50'>
                    <div class='flex items-center gap-2'>
                        <span class='font-medium'>{}</span>
                        {}
                    </div>
                    <span class='text-sm text-gray-500'>Order #{}</span>
                </div>
                <table class='w-full text-sm'>
                    <thead><tr class='text-xs text-gray-500 uppercase'>
                        <th class='px-3 py-1.5 text-left'>Product</th>
                        <th class='px-3 py-1.5 text-right'>Qty</th>
                        <th class='px-3 py-1.5 text-right'>Price</th>
                        <th class='px-3 py-1.5 text-right'>Total</th>
                    </tr></thead>
                    <tbody>{}</tbody>
                    <tfoot><tr class='border-t font-medium'>
                        <td class='px-3 py-1.5' colspan='3'>Order Total</td>
                        <td class='px-3 py-1.5 text-right'>{} {}</td>
                    </tr></tfoot>
                </table>
            </div>"#,
            display_date(&order.date),
            status_badge,
            order.id,
            items_rows,
            symbol,
            format_amount(order.total_amount),
        ));
    }

    let inner_content = format!(
        r#"<div class='mb-6 flex items-center justify-between'>
            <div>
                <h2 class='text-2xl font-bold'>{}</h2>
                <p class='text-sm text-gray-500'>{} &middot; {}</p>
            </div>
            <a href='/statements?customer_id={}' class='px-3 py-1.5 text-sm border rounded-lg bg-white hover:bg-gray-50'>View Statement</a>
        </div>
        <div class='grid grid-cols-1 md:grid-cols-3 gap-4 mb-6'>
            <div class='bg-white p-4 rounded-lg border'><p class='text-sm text-gray-500'>Total Billed</p><p class='text-2xl font-bold'>{} {}</p></div>
            <div class='bg-white p-4 rounded-lg border'><p class='text-sm text-gray-500'>Total Paid</p><p class='text-2xl font-bold'>{} {}</p></div>
            <div class='bg-white p-4 rounded-lg border'><p class='text-sm text-gray-500'>Pending</p><p class='text-2xl font-bold {}'>{} {}</p></div>
        </div>
        <div class='bg-white rounded-lg border p-4 mb-6'>
            <h3 class='font-semibold mb-3'>Record Payment</h3>
            <form method='post' action='/customers/{}/payments' class='flex flex-wrap items-center gap-3'>
                <input type='date' name='date' value='{}' class='px-2 py-1.5 text-sm border rounded' required>
                <input type='number' name='amount' step='0.01' min='0.01' placeholder='Amount' class='px-2 py-1.5 text-sm border rounded w-32' required>
                <button type='submit' class='px-3 py-1.5 text-sm bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>Record</button>
            </form>
        </div>
        <h3 class='font-semibold mb-3'>Order History ({} orders)</h3>
        {}"#,
        customer.name,
        customer.phone,
        customer.address,
        urlencoding::encode(&customer.id),
        symbol,
        format_amount(customer.total_amount),
        symbol,
        format_amount(customer.paid_amount),
        pending_class,
        symbol,
        format_amount(customer.pending_amount),
        customer.id,
        today,
        history.order_count,
        orders_html,
    );

    Ok(axum::response::Html(page_response(
        &headers,
        &customer.name,
        &org_name,
        "/customers",
        &inner_content,
    )))
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn customer(pending: Decimal) -> Customer {
        Customer {
            id: "c1".to_string(),
            name: "Asha Dairy Stand".to_string(),
            phone: "555-0101".to_string(),
            address: "12 Market Rd".to_string(),
            total_amount: dec!(100.00),
            paid_amount: dec!(100.00) - pending,
            pending_amount: pending,
        }
    }

    #[test]
    fn test_customer_rows_show_due_badge() {
        let html = customer_rows_html(&[customer(dec!(40.00))], "Rs.");
        assert!(html.contains("Due Rs. 40.00"));
        assert!(html.contains("/customers/c1"));
    }

    #[test]
    fn test_customer_rows_show_settled_badge() {
        let html = customer_rows_html(&[customer(dec!(0))], "Rs.");
        assert!(html.contains("Settled"));
    }

    #[test]
    fn test_customer_rows_empty_state() {
        let html = customer_rows_html(&[], "Rs.");
        assert!(html.contains("No customers found"));
    }
}
