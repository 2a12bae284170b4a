//! Statements API endpoints - JSON API and file exports
//!
//! Endpoints:
//! - api_statements: Statement for a filter window (JSON)
//! - export_statement_csv: CSV download
//! - export_statement_pdf: PDF download

use axum::extract::Query;
use axum::http::header;
use axum::response::IntoResponse;
use bytes::Bytes;
use std::collections::HashMap;

use milkweb_core::{StatementColumns, StatementResponse};
use milkweb_export::{statement_csv, statement_filename, statement_pdf};

use super::resolve_filter;
use crate::{ApiError, AppState};

/// Get the statement for a filter window (JSON API)
pub async fn api_statements(
    state: axum::extract::State<AppState>,
    params: Query<HashMap<String, String>>,
) -> Result<String, ApiError> {
    let (filter, _period) = resolve_filter(&params.0, &state.config)?;

    let books = state.books.read().await;
    let statement = books.statement(&filter);
    let columns = StatementColumns::for_filter(&filter);
    let total_count = statement.transactions.len();

    let response = StatementResponse {
        statement,
        columns,
        total_count,
    };
    Ok(serde_json::to_string(&response).unwrap_or_default())
}

/// Download the statement as a CSV file
pub async fn export_statement_csv(
    state: axum::extract::State<AppState>,
    params: Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, ApiError> {
    let (filter, _period) = resolve_filter(&params.0, &state.config)?;

    let books = state.books.read().await;
    let statement = books.statement(&filter);
    let body = statement_csv(&statement)?;
    let filename = statement_filename(&filter, "csv");

    log::info!("Exporting CSV statement {}", filename);
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    ))
}

/// Download the statement as a PDF file
pub async fn export_statement_pdf(
    state: axum::extract::State<AppState>,
    params: Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, ApiError> {
    let (filter, _period) = resolve_filter(&params.0, &state.config)?;

    let books = state.books.read().await;
    let statement = books.statement(&filter);
    let bytes = statement_pdf(
        &statement,
        &state.config.organization.name,
        &state.config.organization.currency_symbol,
    )?;
    let filename = statement_filename(&filter, "pdf");

    log::info!("Exporting PDF statement {}", filename);
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        Bytes::from(bytes),
    ))
}
