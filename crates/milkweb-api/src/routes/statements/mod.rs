//! Statement routes: page, table partial, JSON API and exports

pub mod api;
pub mod page;

pub use api::{api_statements, export_statement_csv, export_statement_pdf};
pub use page::{htmx_statements_table, page_statements};

use chrono::NaiveDate;
use milkweb_config::{Config, QuickPeriod};
use milkweb_core::{PeriodContext, StatementFilter};
use std::collections::HashMap;

use crate::ApiError;

/// Resolve the statement filter from request query parameters
///
/// A quick period ("today", "week", "month") sets both bounds
/// atomically, overriding any date parameters. Explicit dates without
/// a period mean a custom range; a missing bound falls back to the
/// other one so that editing a single date keeps the rest of the
/// filter intact.
pub(crate) fn resolve_filter(
    params: &HashMap<String, String>,
    config: &Config,
) -> Result<(StatementFilter, QuickPeriod), ApiError> {
    let customer_id = params
        .get("customer_id")
        .filter(|s| !s.is_empty())
        .cloned();
    let date_from = params.get("date_from").filter(|s| !s.is_empty());
    let date_to = params.get("date_to").filter(|s| !s.is_empty());

    let period = match params.get("period").filter(|s| !s.is_empty()) {
        Some(p) => p.parse::<QuickPeriod>().map_err(|message| ApiError::BadRequest { message })?,
        None if date_from.is_some() || date_to.is_some() => QuickPeriod::Custom,
        None => config.statement.default_period,
    };

    let week_start = config.statement.week_start;
    let (from, to) = match period {
        QuickPeriod::Custom => {
            let parsed_from = date_from.map(|s| parse_date(s)).transpose()?;
            let parsed_to = date_to.map(|s| parse_date(s)).transpose()?;
            let today = chrono::Utc::now().date_naive();
            let from = parsed_from.or(parsed_to).unwrap_or(today);
            let to = parsed_to.or(parsed_from).unwrap_or(today);
            (from, to)
        }
        quick => PeriodContext::new(quick, week_start).bounds(),
    };

    Ok((
        StatementFilter {
            customer_id,
            date_from: from,
            date_to: to,
        },
        period,
    ))
}

/// Parse a YYYY-MM-DD query parameter
pub(crate) fn parse_date(value: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| ApiError::BadRequest {
        message: format!("Invalid date: {}", value),
    })
}

// ==================== Tests ====================
