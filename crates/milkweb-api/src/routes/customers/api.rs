//! Customers API endpoints - JSON API and HTMX partial responses
//!
//! Endpoints:
//! - api_customers: Get customers list with search (JSON)
//! - api_customer: Get single customer (JSON)
//! - api_customer_history: Order history for one customer (JSON)
//! - api_order_store: Record a new order (JSON)
//! - htmx_customers_list: Customer list (HTML fragment)
//! - payment_store: Record a payment (form POST, redirects back)

use axum::extract::{Path, Query};
use axum::response::Redirect;
use axum::{Form, Json};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;

use milkweb_core::{CustomerHistoryResponse, CustomersResponse, OrderItem};

use super::page::customer_rows_html;
use crate::routes::statements::parse_date;
use crate::{ApiError, AppState};

/// Get customers with optional search (JSON API)
pub async fn api_customers(
    state: axum::extract::State<AppState>,
    params: Query<HashMap<String, String>>,
) -> String {
    let books = state.books.read().await;
    let query = params.get("q").map(|s| s.as_str()).unwrap_or("");

    let customers = if query.is_empty() {
        books.customers().to_vec()
    } else {
        books.search_customers(query)
    };

    let total_count = customers.len();
    let response = CustomersResponse {
        customers,
        total_count,
    };
    serde_json::to_string(&response).unwrap_or_default()
}

/// Get single customer (JSON API)
pub async fn api_customer(
    state: axum::extract::State<AppState>,
    path: Path<String>,
) -> Result<String, ApiError> {
    let books = state.books.read().await;
    let customer = books.customer(&path.0).ok_or_else(|| ApiError::NotFound {
        resource: format!("customer {}", path.0),
    })?;
    Ok(serde_json::to_string(customer).unwrap_or_default())
}

/// Get order history for one customer (JSON API)
pub async fn api_customer_history(
    state: axum::extract::State<AppState>,
    path: Path<String>,
) -> Result<String, ApiError> {
    let books = state.books.read().await;
    let history = books.customer_history(&path.0)?;
    let response = CustomerHistoryResponse { history };
    Ok(serde_json::to_string(&response).unwrap_or_default())
}

/// Order entry payload
#[derive(Debug, Deserialize)]
pub struct OrderPayload {
    pub date: String,
    pub items: Vec<OrderItemPayload>,
}

/// One line item of an order entry payload
#[derive(Debug, Deserialize)]
pub struct OrderItemPayload {
    pub product: String,
    pub price: Decimal,
    pub quantity: u32,
}

/// Record a new order for a customer (JSON API)
pub async fn api_order_store(
    state: axum::extract::State<AppState>,
    path: Path<String>,
    payload: Json<OrderPayload>,
) -> Result<String, ApiError> {
    let date = parse_date(&payload.date)?;
    let items: Vec<OrderItem> = payload
        .items
        .iter()
        .map(|i| OrderItem {
            product: i.product.clone(),
            price: i.price,
            quantity: i.quantity,
        })
        .collect();

    let mut books = state.books.write().await;
    let order = books.record_order(&path.0, date, items).await?;
    Ok(serde_json::to_string(&order).unwrap_or_default())
}

/// HTMX: Customers list - Partial page update with search
pub async fn htmx_customers_list(
    state: axum::extract::State<AppState>,
    params: Query<HashMap<String, String>>,
) -> axum::response::Html<String> {
    let books = state.books.read().await;
    let query = params.get("q").map(|s| s.as_str()).unwrap_or("");

    let customers = if query.is_empty() {
        books.customers().to_vec()
    } else {
        books.search_customers(query)
    };

    let symbol = state.config.organization.currency_symbol.clone();
    axum::response::Html(customer_rows_html(&customers, &symbol))
}

/// Payment recording form fields
#[derive(Debug, Deserialize)]
pub struct PaymentForm {
    pub date: String,
    pub amount: String,
}

/// Record a payment for a customer and return to their detail page
pub async fn payment_store(
    state: axum::extract::State<AppState>,
    path: Path<String>,
    form: Form<PaymentForm>,
) -> Result<Redirect, ApiError> {
    let date = parse_date(&form.date)?;
    let amount: Decimal = form.amount.trim().parse().map_err(|_| ApiError::BadRequest {
        message: format!("Invalid amount: {}", form.amount),
    })?;

    let mut books = state.books.write().await;
    books.record_payment(&path.0, date, amount).await?;

    Ok(Redirect::to(&format!("/customers/{}", path.0)))
}
