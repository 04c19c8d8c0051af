//! Presence toggle and weekly grid against a real RocksDB store

mod common;

use common::*;
use shared::ErrorCode;
use shared::models::Day;
use station_server::auth::AccessScope;
use station_server::db::models::{
    Employee, PlanningDraft, PresenceDraft, PresenceToggle, Station,
};
use station_server::db::repository::{PlanningRepository, PresenceRepository, RepoError};
use station_server::scheduling::{
    IsoWeek, SummaryQuery, build_week_view, summarize, toggle_presence,
};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

fn toggle(employee: &Employee, day: Day, is_present: bool) -> PresenceToggle {
    PresenceToggle {
        employee: employee.id.clone(),
        employee_name: None,
        day,
        year: 2024,
        week: 10,
        is_present,
    }
}

/// Name-only plan for week 10/2024, the shape rows had before the employee link
async fn legacy_plan(
    db: &Surreal<Db>,
    name: &str,
    station: &Station,
    monday: &str,
) -> surrealdb::Result<()> {
    db.query(
        "CREATE planning SET employee_name = $name, monday = $monday, year = 2024, week = 10, station = $station",
    )
    .bind(("name", name.to_string()))
    .bind(("monday", monday.to_string()))
    .bind(("station", station.id.clone().unwrap()))
    .await?
    .check()?;
    Ok(())
}

#[tokio::test]
async fn test_toggle_creates_then_updates_one_record() {
    let (_tmp, db) = test_db().await;
    let nord = seed_station(&db, "Nord").await;
    let jean = seed_employee(&db, "Jean", "Dupont", Some(&nord)).await;
    seed_plan(&db, &jean, &nord, 2024, 10, "8h-16h").await;
    let admin = AccessScope::admin();

    let created = toggle_presence(&db, &admin, toggle(&jean, Day::Monday, true))
        .await
        .unwrap();
    assert!(created.is_present);
    assert_eq!(created.day, Day::Monday);
    assert_eq!(created.start_time, "");
    assert_eq!(created.end_time, "");
    assert_eq!(created.station, nord.id.clone().unwrap());

    let updated = toggle_presence(&db, &admin, toggle(&jean, Day::Monday, false))
        .await
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert!(!updated.is_present);

    let all = PresenceRepository::new(db.clone())
        .find_by_week(2024, 10, None)
        .await
        .unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn test_toggle_keeps_recorded_times() {
    let (_tmp, db) = test_db().await;
    let nord = seed_station(&db, "Nord").await;
    let jean = seed_employee(&db, "Jean", "Dupont", Some(&nord)).await;
    seed_plan(&db, &jean, &nord, 2024, 10, "8h-16h").await;

    PresenceRepository::new(db.clone())
        .create(PresenceDraft {
            week: 10,
            day: Day::Tuesday,
            start_time: "08:05".into(),
            end_time: "16:10".into(),
            year: 2024,
            employee: jean.id.clone().unwrap(),
            station: nord.id.clone().unwrap(),
            is_present: false,
        })
        .await
        .unwrap();

    let toggled = toggle_presence(&db, &AccessScope::admin(), toggle(&jean, Day::Tuesday, true))
        .await
        .unwrap();
    assert!(toggled.is_present);
    assert_eq!(toggled.start_time, "08:05");
    assert_eq!(toggled.end_time, "16:10");
}

#[tokio::test]
async fn test_toggle_without_plan_writes_nothing() {
    let (_tmp, db) = test_db().await;
    let nord = seed_station(&db, "Nord").await;
    let jean = seed_employee(&db, "Jean", "Dupont", Some(&nord)).await;

    let err = toggle_presence(&db, &AccessScope::admin(), toggle(&jean, Day::Monday, true))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::PlanningNotFound);

    let all = PresenceRepository::new(db.clone())
        .find_by_week(2024, 10, None)
        .await
        .unwrap();
    assert!(all.is_empty());
}

#[tokio::test]
async fn test_toggle_unknown_employee() {
    let (_tmp, db) = test_db().await;
    let request = PresenceToggle {
        employee: None,
        employee_name: Some("Personne Inconnue".into()),
        day: Day::Monday,
        year: 2024,
        week: 10,
        is_present: true,
    };
    let err = toggle_presence(&db, &AccessScope::admin(), request)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::EmployeeNotFound);
}

#[tokio::test]
async fn test_toggle_by_display_name_on_legacy_plan() {
    let (_tmp, db) = test_db().await;
    let nord = seed_station(&db, "Nord").await;
    let jean = seed_employee(&db, "Jean", "Dupont", Some(&nord)).await;

    // Plan written before plans carried the employee link
    legacy_plan(&db, "Jean Dupont", &nord, "6h-14h").await.unwrap();

    let request = PresenceToggle {
        employee: None,
        employee_name: Some("Jean Dupont".into()),
        day: Day::Monday,
        year: 2024,
        week: 10,
        is_present: true,
    };
    let created = toggle_presence(&db, &AccessScope::admin(), request)
        .await
        .unwrap();
    assert_eq!(created.employee, jean.id.clone().unwrap());

    let view = build_week_view(&db, &AccessScope::admin(), IsoWeek::new(2024, 10).unwrap())
        .await
        .unwrap();
    assert_eq!(view.employees.len(), 1);
    let row = &view.employees[0];
    assert_eq!(row.day(Day::Monday).scheduled, "6h-14h");
    assert!(row.day(Day::Monday).attendance.is_some());
}

#[tokio::test]
async fn test_scoped_toggle_on_other_station_is_denied() {
    let (_tmp, db) = test_db().await;
    let nord = seed_station(&db, "Nord").await;
    let sud = seed_station(&db, "Sud").await;
    let jean = seed_employee(&db, "Jean", "Dupont", Some(&nord)).await;
    seed_plan(&db, &jean, &nord, 2024, 10, "8h-16h").await;

    let err = toggle_presence(&db, &manager_of(&sud), toggle(&jean, Day::Monday, true))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::StationScopeDenied);

    let own = toggle_presence(&db, &manager_of(&nord), toggle(&jean, Day::Monday, true))
        .await
        .unwrap();
    assert_eq!(own.station, nord.id.clone().unwrap());
}

#[tokio::test]
async fn test_week_view_scenario() {
    let (_tmp, db) = test_db().await;
    let nord = seed_station(&db, "Nord").await;
    let jean = seed_employee(&db, "Jean", "Dupont", Some(&nord)).await;
    seed_plan(&db, &jean, &nord, 2024, 10, "8h-16h").await;

    let view = build_week_view(&db, &AccessScope::admin(), IsoWeek::new(2024, 10).unwrap())
        .await
        .unwrap();
    assert_eq!(view.range.start.to_string(), "2024-03-04");
    assert_eq!(view.range.end.to_string(), "2024-03-10");
    assert_eq!(view.employees.len(), 1);

    let row = &view.employees[0];
    assert_eq!(row.employee_name, "Jean Dupont");
    assert_eq!(row.station.as_deref(), Some("Nord"));
    assert_eq!(row.day(Day::Monday).scheduled, "8h-16h");
    assert!(row.day(Day::Monday).attendance.is_none());
    for day in &Day::ALL[1..] {
        assert_eq!(row.day(*day).scheduled, "Non défini");
    }
    assert_eq!(row.total_hours(), 8);

    toggle_presence(&db, &AccessScope::admin(), toggle(&jean, Day::Monday, true))
        .await
        .unwrap();
    let view = build_week_view(&db, &AccessScope::admin(), IsoWeek::new(2024, 10).unwrap())
        .await
        .unwrap();
    let rows = summarize(&view.employees, &SummaryQuery::default());
    assert_eq!(rows[0].days[0].status.label(), "Présent");
    assert_eq!(rows[0].days[1].status.label(), "Non défini");
}

#[tokio::test]
async fn test_week_view_is_filtered_by_scope() {
    let (_tmp, db) = test_db().await;
    let nord = seed_station(&db, "Nord").await;
    let sud = seed_station(&db, "Sud").await;
    let jean = seed_employee(&db, "Jean", "Dupont", Some(&nord)).await;
    let lea = seed_employee(&db, "Martin", "Léa", Some(&sud)).await;
    seed_plan(&db, &jean, &nord, 2024, 10, "8h-16h").await;
    seed_plan(&db, &lea, &sud, 2024, 10, "14h-22h").await;

    let week = IsoWeek::new(2024, 10).unwrap();
    let all = build_week_view(&db, &AccessScope::admin(), week).await.unwrap();
    assert_eq!(all.employees.len(), 2);

    let sud_only = build_week_view(&db, &manager_of(&sud), week).await.unwrap();
    assert_eq!(sud_only.employees.len(), 1);
    assert_eq!(sud_only.employees[0].employee_name, "Martin Léa");

    let empty = build_week_view(&db, &AccessScope::admin(), IsoWeek::new(2024, 11).unwrap())
        .await
        .unwrap();
    assert!(empty.employees.is_empty());
}

#[tokio::test]
async fn test_second_plan_for_same_week_is_rejected() {
    let (_tmp, db) = test_db().await;
    let nord = seed_station(&db, "Nord").await;
    let jean = seed_employee(&db, "Jean", "Dupont", Some(&nord)).await;
    let first = seed_plan(&db, &jean, &nord, 2024, 10, "8h-16h").await;

    let second = PlanningRepository::new(db.clone())
        .create(PlanningDraft {
            employee: jean.id.clone().unwrap(),
            employee_name: jean.display_name(),
            slots: Default::default(),
            year: 2024,
            week: 10,
            station: nord.id.clone().unwrap(),
        })
        .await;
    assert!(matches!(second, Err(RepoError::Duplicate(_))));

    // Another week is fine
    seed_plan(&db, &jean, &nord, 2024, 11, "8h-16h").await;
    assert!(first.id.is_some());
}

#[tokio::test]
async fn test_legacy_plans_for_different_names_share_a_week() {
    let (_tmp, db) = test_db().await;
    let nord = seed_station(&db, "Nord").await;

    legacy_plan(&db, "Jean Dupont", &nord, "6h-14h").await.unwrap();
    legacy_plan(&db, "Martin Léa", &nord, "14h-22h").await.unwrap();

    let view = build_week_view(&db, &AccessScope::admin(), IsoWeek::new(2024, 10).unwrap())
        .await
        .unwrap();
    assert_eq!(view.employees.len(), 2);

    // The stored name still identifies the plan
    assert!(legacy_plan(&db, "Jean Dupont", &nord, "8h-16h").await.is_err());
}

#[tokio::test]
async fn test_toggle_needs_a_station() {
    let (_tmp, db) = test_db().await;
    let nord = seed_station(&db, "Nord").await;
    let floater = seed_employee(&db, "Petit", "Marc", None).await;
    seed_plan(&db, &floater, &nord, 2024, 10, "8h-16h").await;

    // Admins write on the employee's station, which is unset here
    let err = toggle_presence(&db, &AccessScope::admin(), toggle(&floater, Day::Monday, true))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::StationRequired);

    let jean = seed_employee(&db, "Jean", "Dupont", Some(&nord)).await;
    seed_plan(&db, &jean, &nord, 2024, 10, "8h-16h").await;
    let err = toggle_presence(&db, &AccessScope::station(None), toggle(&jean, Day::Monday, true))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::StationRequired);

    let all = PresenceRepository::new(db.clone())
        .find_by_week(2024, 10, None)
        .await
        .unwrap();
    assert!(all.is_empty());
}

#[tokio::test]
async fn test_toggle_rejects_year_out_of_range() {
    let (_tmp, db) = test_db().await;
    let nord = seed_station(&db, "Nord").await;
    let jean = seed_employee(&db, "Jean", "Dupont", Some(&nord)).await;

    let mut request = toggle(&jean, Day::Monday, true);
    request.year = 1990;
    let err = toggle_presence(&db, &AccessScope::admin(), request)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValueOutOfRange);
}
