//! Weekly grid handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use shared::error::{ApiResponse, AppResult};

use crate::api::WeekParams;
use crate::auth::AccessScope;
use crate::core::ServerState;
use crate::scheduling::summary::{SortField, SortOrder};
use crate::scheduling::{
    ReconciledWeekView, SummaryQuery, WeekRange, WeekSummaryRow, build_week_view, summarize,
};

/// Plans merged with attendance for `?year=&week=`
pub async fn week(
    State(state): State<ServerState>,
    scope: AccessScope,
    Query(params): Query<WeekParams>,
) -> AppResult<Json<ApiResponse<ReconciledWeekView>>> {
    let week = params.resolve()?;
    let view = build_week_view(&state.db, &scope, week).await?;
    Ok(Json(ApiResponse::success(view)))
}

#[derive(Debug, Default, Deserialize)]
pub struct SummaryParams {
    pub year: Option<i32>,
    pub week: Option<u32>,
    pub search: Option<String>,
    pub sort: Option<SortField>,
    pub order: Option<SortOrder>,
}

#[derive(Debug, Serialize)]
pub struct WeekSummary {
    pub year: i32,
    pub week: u32,
    pub range: WeekRange,
    pub rows: Vec<WeekSummaryRow>,
}

/// Searchable, sortable table of the week with status labels and hours
pub async fn summary(
    State(state): State<ServerState>,
    scope: AccessScope,
    Query(params): Query<SummaryParams>,
) -> AppResult<Json<ApiResponse<WeekSummary>>> {
    let week = WeekParams {
        year: params.year,
        week: params.week,
    }
    .resolve()?;
    let view = build_week_view(&state.db, &scope, week).await?;

    let query = SummaryQuery {
        search: params.search,
        sort: params.sort,
        order: params.order.unwrap_or_default(),
    };
    Ok(Json(ApiResponse::success(WeekSummary {
        year: view.year,
        week: view.week,
        range: view.range,
        rows: summarize(&view.employees, &query),
    })))
}
