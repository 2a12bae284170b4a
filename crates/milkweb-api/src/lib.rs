//! HTTP API server with HTMX support
//!
//! Routes are organized into modules:
//! - routes::customers: Customer list, detail/history, payment recording
//! - routes::statements: Statement page, table partial, exports
//! - routes::period: Quick-period options and bounds

pub mod error;
pub mod routes;

use axum::{
    routing::{get, post},
    Router,
};
use milkweb_config::Config;
use milkweb_core::{format_amount, Books};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub books: Arc<RwLock<Books>>,
    pub config: Config,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::customers::{
        api_customer, api_customer_history, api_customers, api_order_store, htmx_customers_list,
        page_customer_detail, page_customers, payment_store,
    };
    use routes::period::{api_period_bounds, api_period_options};
    use routes::statements::{
        api_statements, export_statement_csv, export_statement_pdf, htmx_statements_table,
        page_statements,
    };

    Router::new()
        // JSON API endpoints
        .route("/api/health", get(health_check))
        .route("/api/customers", get(api_customers))
        .route("/api/customers/:id", get(api_customer))
        .route("/api/customers/:id/history", get(api_customer_history))
        .route("/api/customers/:id/orders", post(api_order_store))
        .route("/api/statements", get(api_statements))
        .route("/api/statements/export.csv", get(export_statement_csv))
        .route("/api/statements/export.pdf", get(export_statement_pdf))
        .route("/api/period/options", get(api_period_options))
        .route("/api/period/bounds", get(api_period_bounds))
        .route("/api/reload", post(api_reload))
        // Page routes
        .route("/", get(page_dashboard))
        .route("/customers", get(page_customers))
        .route("/customers/:id", get(page_customer_detail))
        .route("/customers/:id/payments", post(payment_store))
        .route("/statements", get(page_statements))
        // HTMX partial routes
        .route("/customers/list", get(htmx_customers_list))
        .route("/statements/table", get(htmx_statements_table))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, org_name: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - {}</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
</body>
</html>"#,
        title, org_name, content
    )
}

/// Navigation sidebar
pub fn nav_sidebar(current_path: &str, org_name: &str) -> String {
    let links = [
        ("/", "Dashboard"),
        ("/customers", "Customers"),
        ("/statements", "Statements"),
    ];

    let mut nav = format!(
        "<div class='bg-white border-r h-screen flex flex-col'><div class='p-4 border-b'><h1 class='text-xl font-bold text-indigo-600'>{}</h1></div><ul class='flex-1 py-2 space-y-1 px-2'>",
        org_name
    );

    for (path, label) in &links {
        let is_active = if *path == "/" {
            current_path == "/"
        } else {
            current_path.starts_with(path)
        };
        let active_class = if is_active {
            "bg-indigo-50 text-indigo-600"
        } else {
            "text-gray-600 hover:bg-gray-50"
        };
        nav.push_str(&format!(
            r#"<li><a href='{}' class='flex items-center gap-2 px-3 py-2 rounded-lg {}'><span>{}</span></a></li>"#,
            path, active_class, label
        ));
    }
    nav.push_str("</ul></div>");
    nav
}

/// Check if request is from HTMX (partial page update)
fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for full page or HTMX partial
pub fn page_response(
    headers: &axum::http::HeaderMap,
    title: &str,
    org_name: &str,
    current_path: &str,
    inner_content: &str,
) -> String {
    if is_htmx_request(headers) {
        format!(
            r#"<main class='flex-1 overflow-auto bg-gray-50 p-6'>{}</main>"#,
            inner_content
        )
    } else {
        base_html(
            title,
            org_name,
            &format!(
                r#"<div class='flex flex-col h-screen'>
    <div class='flex flex-1 overflow-hidden'>
        <aside class='w-64 flex-shrink-0'>{}</aside>
        <main class='flex-1 overflow-auto bg-gray-50 p-6'>{}</main>
    </div>
</div>"#,
                nav_sidebar(current_path, org_name),
                inner_content
            ),
        )
    }
}

/// Dashboard page with business counters
async fn page_dashboard(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let books = state.books.read().await;
    let stats = books.stats();
    let org_name = state.config.organization.name.clone();
    let symbol = state.config.organization.currency_symbol.clone();

    let outstanding_class = if stats.total_outstanding > rust_decimal::Decimal::ZERO {
        "text-red-700"
    } else {
        "text-green-700"
    };

    let inner_content = format!(
        r#"<div class='mb-6'><h2 class='text-2xl font-bold'>Dashboard</h2></div>
        <div class='grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-4 mb-6'>
            <div class='bg-white p-4 rounded-lg border'><p class='text-sm text-gray-500'>Customers</p><p class='text-2xl font-bold'>{}</p></div>
            <div class='bg-white p-4 rounded-lg border'><p class='text-sm text-gray-500'>Orders</p><p class='text-2xl font-bold'>{}</p></div>
            <div class='bg-white p-4 rounded-lg border'><p class='text-sm text-gray-500'>Payments</p><p class='text-2xl font-bold'>{}</p></div>
            <div class='bg-white p-4 rounded-lg border'><p class='text-sm text-gray-500'>Outstanding</p><p class='text-2xl font-bold {}'>{} {}</p></div>
        </div>
        <div class='grid grid-cols-1 lg:grid-cols-2 gap-6'>
            <div class='bg-white rounded-xl shadow-sm p-6'>
                <h3 class='text-lg font-semibold mb-2'>Total Billed</h3>
                <p class='text-2xl font-bold text-blue-700'>{} {}</p>
            </div>
            <div class='bg-white rounded-xl shadow-sm p-6'>
                <h3 class='text-lg font-semibold mb-2'>Total Received</h3>
                <p class='text-2xl font-bold text-green-700'>{} {}</p>
            </div>
        </div>"#,
        stats.customer_count,
        stats.order_count,
        stats.payment_count,
        outstanding_class,
        symbol,
        format_amount(stats.total_outstanding),
        symbol,
        format_amount(stats.total_billed),
        symbol,
        format_amount(stats.total_received),
    );

    axum::response::Html(page_response(
        &headers,
        "Dashboard",
        &org_name,
        "/",
        &inner_content,
    ))
}

/// Reload vendor data API endpoint
async fn api_reload(state: axum::extract::State<AppState>) -> String {
    let mut books = state.books.write().await;
    match books.reload().await {
        Ok(_) => r#"{"success": true, "message": "Vendor data reloaded"}"#.to_string(),
        Err(e) => format!(r#"{{"success": false, "message": "{}"}}"#, e),
    }
}

/// Start the HTTP server
///
/// Creates the router, binds to the configured address, and serves
/// requests until the process exits.
pub async fn start_server(config: Config, books: Arc<RwLock<Books>>) {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState { books, config };

    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await.unwrap();
    log::info!("Starting milkweb server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - / (Dashboard)");
    log::info!("  - /customers (Customer records)");
    log::info!("  - /statements (Account statements)");
    log::info!("  - /api/* (JSON API endpoints)");

    match axum::serve(listener, router).await {
        Ok(_) => log::info!("Server stopped gracefully"),
        Err(e) => log::error!("Server error: {}", e),
    }
}
