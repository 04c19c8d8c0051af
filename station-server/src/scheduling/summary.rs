//! Weekly summary projection: search, sort and per-day status labels

use std::cmp::Ordering;

use serde::{Deserialize, Serialize, Serializer};
use shared::models::Day;

use super::reconcile::{DayCell, EmployeeWeek, UNSCHEDULED};
use crate::db::models::{EmployeeId, serde_helpers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    EmployeeName,
    TotalHours,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Search and ordering applied to the weekly rows
#[derive(Debug, Clone, Default)]
pub struct SummaryQuery {
    /// Case-insensitive substring of the employee name
    pub search: Option<String>,
    /// Without a sort field rows keep the merge order
    pub sort: Option<SortField>,
    pub order: SortOrder,
}

/// What the attendance mark of a day says
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceStatus {
    Present,
    Absent,
    NotRecorded,
}

impl AttendanceStatus {
    pub fn of(cell: &DayCell) -> Self {
        match &cell.attendance {
            Some(p) if p.is_present => AttendanceStatus::Present,
            Some(_) => AttendanceStatus::Absent,
            None => AttendanceStatus::NotRecorded,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "Présent",
            AttendanceStatus::Absent => "Absent",
            AttendanceStatus::NotRecorded => UNSCHEDULED,
        }
    }
}

impl Serialize for AttendanceStatus {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySummary {
    pub day: Day,
    pub scheduled: String,
    pub status: AttendanceStatus,
}

/// One employee's week, flattened for tables and exports
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekSummaryRow {
    #[serde(with = "serde_helpers::option_record_id")]
    pub employee_id: Option<EmployeeId>,
    pub employee_name: String,
    /// Station name, or [`UNSCHEDULED`]
    pub station: String,
    pub days: Vec<DaySummary>,
    pub total_hours: u32,
}

impl From<&EmployeeWeek> for WeekSummaryRow {
    fn from(row: &EmployeeWeek) -> Self {
        Self {
            employee_id: row.employee_id.clone(),
            employee_name: row.employee_name.clone(),
            station: row
                .station
                .clone()
                .unwrap_or_else(|| UNSCHEDULED.to_string()),
            days: row
                .days
                .iter()
                .map(|cell| DaySummary {
                    day: cell.day,
                    scheduled: cell.scheduled.clone(),
                    status: AttendanceStatus::of(cell),
                })
                .collect(),
            total_hours: row.total_hours(),
        }
    }
}

/// Filter, sort and project the reconciled rows
pub fn summarize(rows: &[EmployeeWeek], query: &SummaryQuery) -> Vec<WeekSummaryRow> {
    let needle = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut out: Vec<WeekSummaryRow> = rows
        .iter()
        .filter(|row| match &needle {
            Some(n) => row.employee_name.to_lowercase().contains(n.as_str()),
            None => true,
        })
        .map(WeekSummaryRow::from)
        .collect();

    if let Some(field) = query.sort {
        out.sort_by(|a, b| {
            let ord = match field {
                SortField::EmployeeName => compare_names(&a.employee_name, &b.employee_name),
                SortField::TotalHours => a.total_hours.cmp(&b.total_hours),
            };
            match query.order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });
    }
    out
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::Presence;

    fn row(name: &str, monday: &str, attendance: Option<bool>) -> EmployeeWeek {
        let days = Day::ALL
            .iter()
            .map(|&day| DayCell {
                day,
                scheduled: if day == Day::Monday {
                    monday.to_string()
                } else {
                    UNSCHEDULED.to_string()
                },
                attendance: match (day, attendance) {
                    (Day::Monday, Some(is_present)) => Some(Presence {
                        id: None,
                        week: 10,
                        day,
                        start_time: String::new(),
                        end_time: String::new(),
                        year: 2024,
                        employee: "employee:x".parse().unwrap(),
                        station: "station:nord".parse().unwrap(),
                        is_present,
                    }),
                    _ => None,
                },
            })
            .collect();
        EmployeeWeek {
            employee_id: None,
            employee_name: name.into(),
            station: Some("Nord".into()),
            days,
        }
    }

    fn rows() -> Vec<EmployeeWeek> {
        vec![
            row("Jean Dupont", "8h-16h", Some(true)),
            row("martin Louise", "6h-20h", Some(false)),
            row("Bernard Alice", "16h-8h", None),
        ]
    }

    #[test]
    fn test_status_labels() {
        let out = summarize(&rows(), &SummaryQuery::default());
        let by_name = |n: &str| out.iter().find(|r| r.employee_name == n).unwrap();

        assert_eq!(by_name("Jean Dupont").days[0].status.label(), "Présent");
        assert_eq!(by_name("martin Louise").days[0].status.label(), "Absent");
        assert_eq!(by_name("Bernard Alice").days[0].status.label(), "Non défini");
        assert_eq!(
            serde_json::to_value(by_name("Jean Dupont").days[0].status).unwrap(),
            "Présent"
        );
    }

    #[test]
    fn test_without_sort_rows_keep_merge_order() {
        let out = summarize(&rows(), &SummaryQuery::default());
        let names: Vec<_> = out.iter().map(|r| r.employee_name.as_str()).collect();
        assert_eq!(names, ["Jean Dupont", "martin Louise", "Bernard Alice"]);

        // Order alone does not trigger a sort
        let query = SummaryQuery {
            order: SortOrder::Desc,
            ..Default::default()
        };
        let out = summarize(&rows(), &query);
        assert_eq!(out[0].employee_name, "Jean Dupont");
    }

    #[test]
    fn test_sort_by_name_is_case_insensitive() {
        let query = SummaryQuery {
            sort: Some(SortField::EmployeeName),
            ..Default::default()
        };
        let out = summarize(&rows(), &query);
        let names: Vec<_> = out.iter().map(|r| r.employee_name.as_str()).collect();
        assert_eq!(names, ["Bernard Alice", "Jean Dupont", "martin Louise"]);
    }

    #[test]
    fn test_sort_by_hours_descending() {
        let query = SummaryQuery {
            search: None,
            sort: Some(SortField::TotalHours),
            order: SortOrder::Desc,
        };
        let out = summarize(&rows(), &query);
        let hours: Vec<_> = out.iter().map(|r| r.total_hours).collect();
        assert_eq!(hours, [14, 8, 0]);
    }

    #[test]
    fn test_search_filters_by_name() {
        let query = SummaryQuery {
            search: Some("  DUP ".into()),
            ..Default::default()
        };
        let out = summarize(&rows(), &query);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].employee_name, "Jean Dupont");

        let query = SummaryQuery {
            search: Some("nobody".into()),
            ..Default::default()
        };
        assert!(summarize(&rows(), &query).is_empty());
    }

    #[test]
    fn test_missing_station_gets_placeholder() {
        let mut no_station = row("Inconnu Paul", "8h-12h", None);
        no_station.station = None;
        let out = summarize(&[no_station], &SummaryQuery::default());
        assert_eq!(out[0].station, UNSCHEDULED);
        assert_eq!(out[0].total_hours, 4);
    }

    #[test]
    fn test_sort_params_deserialize_from_snake_case() {
        let sort: SortField = serde_json::from_str(r#""total_hours""#).unwrap();
        let order: SortOrder = serde_json::from_str(r#""desc""#).unwrap();
        assert_eq!(sort, SortField::TotalHours);
        assert_eq!(order, SortOrder::Desc);
    }
}
