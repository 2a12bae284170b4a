//! Quick-period routes
//!
//! Small JSON endpoints the statement filter bar uses: the available
//! quick periods and the resolved bounds for one of them.

use axum::extract::Query;
use std::collections::HashMap;

use milkweb_config::QuickPeriod;
use milkweb_core::{PeriodContext, PeriodOption};

use crate::{ApiError, AppState};

/// Available quick period options (for UI)
pub async fn api_period_options() -> String {
    let options = vec![
        PeriodOption { value: "today".to_string(), label: "Today".to_string() },
        PeriodOption { value: "week".to_string(), label: "This Week".to_string() },
        PeriodOption { value: "month".to_string(), label: "This Month".to_string() },
        PeriodOption { value: "custom".to_string(), label: "Custom Range".to_string() },
    ];
    serde_json::to_string(&options).unwrap_or_default()
}

/// Resolved bounds for a quick period (JSON API)
pub async fn api_period_bounds(
    state: axum::extract::State<AppState>,
    params: Query<HashMap<String, String>>,
) -> Result<String, ApiError> {
    let period: QuickPeriod = params
        .get("period")
        .map(|s| s.as_str())
        .unwrap_or("month")
        .parse()
        .map_err(|message| ApiError::BadRequest { message })?;

    let context = PeriodContext::new(period, state.config.statement.week_start);
    let (from, to) = context.bounds();

    Ok(serde_json::to_string(&serde_json::json!({
        "period": period.to_string(),
        "label": context.description(),
        "date_from": from.to_string(),
        "date_to": to.to_string(),
    }))
    .unwrap_or_default())
}
