//! Calendar handlers

use axum::{Json, extract::Path};
use serde::Serialize;
use shared::error::{ApiResponse, AppResult};

use crate::scheduling::{IsoWeek, WeekRange, current_week, weeks_in_year};

/// A week with its dates and neighbours
#[derive(Debug, Serialize)]
pub struct WeekInfo {
    pub year: i32,
    pub week: u32,
    pub range: WeekRange,
    pub previous: IsoWeek,
    pub next: IsoWeek,
}

impl WeekInfo {
    fn of(week: IsoWeek) -> AppResult<Self> {
        Ok(Self {
            year: week.year,
            week: week.week,
            range: week.range()?,
            previous: week.previous(),
            next: week.next(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct YearInfo {
    pub year: i32,
    pub weeks: u32,
}

pub async fn current() -> AppResult<Json<ApiResponse<WeekInfo>>> {
    Ok(Json(ApiResponse::success(WeekInfo::of(current_week())?)))
}

pub async fn week(
    Path((year, week)): Path<(i32, u32)>,
) -> AppResult<Json<ApiResponse<WeekInfo>>> {
    let info = WeekInfo::of(IsoWeek::new(year, week)?)?;
    Ok(Json(ApiResponse::success(info)))
}

pub async fn year(Path(year): Path<i32>) -> Json<ApiResponse<YearInfo>> {
    Json(ApiResponse::success(YearInfo {
        year,
        weeks: weeks_in_year(year),
    }))
}
