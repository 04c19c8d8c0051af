//! Plan + attendance merge
//!
//! Builds the weekly grid from the plans and attendance records of one ISO
//! week. Pure: every input is fetched beforehand and nothing here touches
//! the database.

use std::collections::HashMap;

use serde::Serialize;
use shared::models::Day;

use super::hours;
use super::week::WeekRange;
use crate::db::models::{Employee, EmployeeId, Planning, Presence, Station, serde_helpers};

/// Placeholder for a day with no planned range
pub const UNSCHEDULED: &str = "Non défini";

/// Identity of one row of the grid
///
/// Rows are keyed by employee id. Plans written before plans carried an
/// employee link only have the stored name; when the roster has no
/// employee of that name the row stays keyed by the name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EmployeeKey {
    Id(String),
    LegacyName(String),
}

/// One day of one employee's week
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCell {
    pub day: Day,
    /// Raw planned range, or [`UNSCHEDULED`]
    pub scheduled: String,
    pub attendance: Option<Presence>,
}

/// One employee's row in the weekly grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeWeek {
    #[serde(with = "serde_helpers::option_record_id")]
    pub employee_id: Option<EmployeeId>,
    pub employee_name: String,
    pub station: Option<String>,
    /// Seven cells, Monday first
    pub days: Vec<DayCell>,
}

impl EmployeeWeek {
    fn unscheduled(employee_id: Option<EmployeeId>, employee_name: String) -> Self {
        Self {
            employee_id,
            employee_name,
            station: None,
            days: Day::ALL
                .iter()
                .map(|&day| DayCell {
                    day,
                    scheduled: UNSCHEDULED.to_string(),
                    attendance: None,
                })
                .collect(),
        }
    }

    pub fn day(&self, day: Day) -> &DayCell {
        &self.days[day.index()]
    }

    /// Planned hours across the week; malformed or inverted ranges count 0
    pub fn total_hours(&self) -> u32 {
        hours::total_hours(self.days.iter().map(|cell| Some(cell.scheduled.as_str())))
    }
}

/// The reconciled grid for one ISO week
#[derive(Debug, Clone, Serialize)]
pub struct ReconciledWeekView {
    pub year: i32,
    pub week: u32,
    pub range: WeekRange,
    pub employees: Vec<EmployeeWeek>,
}

/// Roster and station lookups shared by both merge passes
struct Lookup<'a> {
    by_id: HashMap<String, &'a Employee>,
    roster: &'a [Employee],
    station_names: HashMap<String, &'a str>,
}

impl<'a> Lookup<'a> {
    fn new(roster: &'a [Employee], stations: &'a [Station]) -> Self {
        let by_id = roster
            .iter()
            .filter_map(|e| e.id.as_ref().map(|id| (id.to_string(), e)))
            .collect();
        let station_names = stations
            .iter()
            .filter_map(|s| s.id.as_ref().map(|id| (id.to_string(), s.name.as_str())))
            .collect();
        Self {
            by_id,
            roster,
            station_names,
        }
    }

    /// First roster entry carrying this display name
    fn by_name(&self, name: &str) -> Option<&'a Employee> {
        self.roster.iter().find(|e| e.display_name() == name)
    }

    fn station_name(&self, id: &surrealdb::RecordId) -> Option<&'a str> {
        self.station_names.get(&id.to_string()).copied()
    }
}

/// Merge a week's plans and attendance into one row per employee
///
/// 1. Each plan fills its employee's seven slots (blank → "Non défini");
///    the station comes from the employee's own station, if any.
/// 2. Each attendance record lands on its day, creating an unscheduled row
///    when the employee has no plan; its station overrides the one from 1.
///
/// Rows come out in first-seen order.
pub fn reconcile(
    plans: &[Planning],
    presences: &[Presence],
    roster: &[Employee],
    stations: &[Station],
) -> Vec<EmployeeWeek> {
    let lookup = Lookup::new(roster, stations);
    let mut rows: Vec<EmployeeWeek> = Vec::new();
    let mut index: HashMap<EmployeeKey, usize> = HashMap::new();

    for plan in plans {
        let employee = match &plan.employee {
            Some(id) => lookup.by_id.get(&id.to_string()).copied(),
            None => lookup.by_name(&plan.employee_name),
        };
        let employee_id = plan
            .employee
            .clone()
            .or_else(|| employee.and_then(|e| e.id.clone()));
        let key = match &employee_id {
            Some(id) => EmployeeKey::Id(id.to_string()),
            None => EmployeeKey::LegacyName(plan.employee_name.clone()),
        };

        let pos = *index.entry(key).or_insert_with(|| {
            rows.push(EmployeeWeek::unscheduled(
                employee_id.clone(),
                plan.employee_name.clone(),
            ));
            rows.len() - 1
        });
        let row = &mut rows[pos];

        for cell in row.days.iter_mut() {
            cell.scheduled = plan.slot(cell.day).unwrap_or(UNSCHEDULED).to_string();
        }
        // Unknown employees leave the station unset
        if let Some(employee) = employee {
            row.station = employee
                .station
                .as_ref()
                .and_then(|s| lookup.station_name(s))
                .map(str::to_string);
        }
    }

    for presence in presences {
        let Some(employee) = lookup.by_id.get(&presence.employee.to_string()).copied() else {
            tracing::warn!(
                employee = %presence.employee,
                year = presence.year,
                week = presence.week,
                "Attendance record references an unknown employee, skipped"
            );
            continue;
        };

        let key = EmployeeKey::Id(presence.employee.to_string());
        let pos = *index.entry(key).or_insert_with(|| {
            rows.push(EmployeeWeek::unscheduled(
                Some(presence.employee.clone()),
                employee.display_name(),
            ));
            rows.len() - 1
        });
        let row = &mut rows[pos];

        row.days[presence.day.index()].attendance = Some(presence.clone());
        if let Some(name) = lookup.station_name(&presence.station) {
            row.station = Some(name.to_string());
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Position;

    fn rid(s: &str) -> surrealdb::RecordId {
        s.parse().unwrap()
    }

    fn employee(id: &str, last: &str, first: &str, station: Option<&str>) -> Employee {
        Employee {
            id: Some(rid(id)),
            last_name: last.into(),
            first_name: first.into(),
            address: String::new(),
            phone: String::new(),
            email: format!("{}@example.com", first.to_lowercase()),
            position: Position::Attendant,
            start_date: None,
            station: station.map(rid),
            image: String::new(),
        }
    }

    fn station(id: &str, name: &str) -> Station {
        Station {
            id: Some(rid(id)),
            name: name.into(),
            address: String::new(),
            city: String::new(),
            phone: String::new(),
            email: String::new(),
            capacity: 0,
            pump_count: 0,
        }
    }

    fn plan(employee: Option<&str>, name: &str, monday: &str) -> Planning {
        Planning {
            id: Some(rid("planning:p1")),
            employee: employee.map(rid),
            employee_name: name.into(),
            monday: Some(monday.into()),
            tuesday: Some(String::new()),
            wednesday: None,
            thursday: None,
            friday: None,
            saturday: None,
            sunday: None,
            year: 2024,
            week: 10,
            station: rid("station:nord"),
        }
    }

    fn presence(employee: &str, day: Day, station: &str, is_present: bool) -> Presence {
        Presence {
            id: Some(rid("presence:x1")),
            week: 10,
            day,
            start_time: String::new(),
            end_time: String::new(),
            year: 2024,
            employee: rid(employee),
            station: rid(station),
            is_present,
        }
    }

    fn fixtures() -> (Vec<Employee>, Vec<Station>) {
        (
            vec![
                employee("employee:jd", "Jean", "Dupont", Some("station:nord")),
                employee("employee:ml", "Martin", "Louise", None),
            ],
            vec![station("station:nord", "Nord"), station("station:sud", "Sud")],
        )
    }

    #[test]
    fn test_plan_without_attendance() {
        let (roster, stations) = fixtures();
        let plans = vec![plan(Some("employee:jd"), "Jean Dupont", "8h-16h")];

        let rows = reconcile(&plans, &[], &roster, &stations);
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.employee_name, "Jean Dupont");
        assert_eq!(row.station.as_deref(), Some("Nord"));
        assert_eq!(row.day(Day::Monday).scheduled, "8h-16h");
        assert!(row.day(Day::Monday).attendance.is_none());
        for day in &Day::ALL[1..] {
            assert_eq!(row.day(*day).scheduled, UNSCHEDULED);
        }
        assert_eq!(row.total_hours(), 8);
    }

    #[test]
    fn test_attendance_joins_plan_row_and_overrides_station() {
        let (roster, stations) = fixtures();
        let plans = vec![plan(Some("employee:jd"), "Jean Dupont", "8h-16h")];
        let presences = vec![presence("employee:jd", Day::Monday, "station:sud", true)];

        let rows = reconcile(&plans, &presences, &roster, &stations);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].station.as_deref(), Some("Sud"));
        let cell = rows[0].day(Day::Monday);
        assert_eq!(cell.scheduled, "8h-16h");
        assert!(cell.attendance.as_ref().unwrap().is_present);
    }

    #[test]
    fn test_attendance_without_plan_creates_unscheduled_row() {
        let (roster, stations) = fixtures();
        let presences = vec![presence("employee:ml", Day::Friday, "station:sud", false)];

        let rows = reconcile(&[], &presences, &roster, &stations);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].employee_name, "Martin Louise");
        assert_eq!(rows[0].station.as_deref(), Some("Sud"));
        assert!(rows[0].days.iter().all(|c| c.scheduled == UNSCHEDULED));
        assert!(!rows[0].day(Day::Friday).attendance.as_ref().unwrap().is_present);
        assert_eq!(rows[0].total_hours(), 0);
    }

    #[test]
    fn test_employee_without_station_leaves_station_unset() {
        let (roster, stations) = fixtures();
        let plans = vec![plan(Some("employee:ml"), "Martin Louise", "6h-14h")];

        let rows = reconcile(&plans, &[], &roster, &stations);
        assert!(rows[0].station.is_none());
    }

    #[test]
    fn test_legacy_plan_links_through_roster_name() {
        let (roster, stations) = fixtures();
        let plans = vec![plan(None, "Jean Dupont", "8h-16h")];
        let presences = vec![presence("employee:jd", Day::Tuesday, "station:nord", true)];

        let rows = reconcile(&plans, &presences, &roster, &stations);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].employee_id, Some(rid("employee:jd")));
        assert!(rows[0].day(Day::Tuesday).attendance.is_some());
    }

    #[test]
    fn test_legacy_plan_with_unknown_name_keeps_its_own_row() {
        let (roster, stations) = fixtures();
        let plans = vec![plan(None, "Inconnu Paul", "8h-12h")];

        let rows = reconcile(&plans, &[], &roster, &stations);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].employee_id.is_none());
        assert!(rows[0].station.is_none());
        assert_eq!(rows[0].total_hours(), 4);
    }

    #[test]
    fn test_unknown_employee_attendance_is_skipped() {
        let (roster, stations) = fixtures();
        let presences = vec![presence("employee:ghost", Day::Monday, "station:nord", true)];
        assert!(reconcile(&[], &presences, &roster, &stations).is_empty());
    }

    #[test]
    fn test_merge_is_idempotent() {
        let (roster, stations) = fixtures();
        let plans = vec![
            plan(Some("employee:jd"), "Jean Dupont", "8h-16h"),
            plan(Some("employee:ml"), "Martin Louise", "16h-8h"),
        ];
        let presences = vec![
            presence("employee:jd", Day::Monday, "station:nord", true),
            presence("employee:ml", Day::Sunday, "station:sud", false),
        ];

        let first = reconcile(&plans, &presences, &roster, &stations);
        let second = reconcile(&plans, &presences, &roster, &stations);
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].employee_name, "Jean Dupont");
        assert_eq!(first[1].employee_name, "Martin Louise");
        assert_eq!(first[1].total_hours(), 0);
    }
}
