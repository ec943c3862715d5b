mod common;
use common::report_cmd;
use predicates::prelude::*;
use predicates::str::contains;
use std::fs;

#[test]
fn kpis_from_synthetic_data() {
    report_cmd()
        .args(["--sessions", "30", "--seed", "5", "kpis"])
        .assert()
        .success()
        .stdout(contains("Total revenue:"))
        .stdout(contains("Mean satisfaction:"));
}

#[test]
fn report_has_every_section() {
    report_cmd()
        .args(["--sessions", "60", "report"])
        .assert()
        .success()
        .stdout(contains("FINANCIAL SUMMARY"))
        .stdout(contains("TRAININGS AT RISK"))
        .stdout(contains("OBJECTIVES VS ACTUALS"))
        .stdout(contains("MOST PROFITABLE TRAININGS BY SITE"));
}

#[test]
fn unknown_grouping_key_fails() {
    report_cmd()
        .args(["group", "instructor"])
        .assert()
        .failure()
        .stderr(contains("Unknown grouping key: instructor"));
}

#[test]
fn group_by_site_lists_sites() {
    report_cmd()
        .args(["--sessions", "40", "group", "site"])
        .assert()
        .success()
        .stdout(contains("Auneau"))
        .stdout(contains("Gellainville"));
}

#[test]
fn reads_sessions_from_csv() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sessions.csv");
    fs::write(
        &path,
        "Training,Category,Date,Site,Capacity,Registrations,Attendance,Cost,Price,Satisfaction\n\
         Forklift,Logistics,2025-03-04,North,12,10,9,900,1400,8.2\n",
    )
    .unwrap();
    report_cmd()
        .args(["--sessions-csv", path.to_str().unwrap(), "kpis"])
        .assert()
        .success()
        .stdout(contains("12,600.00"));
}

#[test]
fn export_writes_tables_and_summary() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    report_cmd()
        .args(["--sessions", "50", "export", "--out", out.to_str().unwrap()])
        .assert()
        .success();
    for name in [
        "sessions.csv",
        "responses.csv",
        "training_profitability.csv",
        "top_trainings.csv",
        "site_performance.csv",
        "monthly_performance.csv",
        "satisfaction.csv",
        "summary.json",
    ] {
        assert!(out.join(name).exists(), "missing {name}");
    }
    let summary = fs::read_to_string(out.join("summary.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&summary).unwrap();
    assert!(json["kpis"]["total_revenue"].as_f64().unwrap() > 0.0);
    let top = fs::read_to_string(out.join("top_trainings.csv")).unwrap();
    assert!(top.starts_with("Group,Sessions,Revenue,Profit"));
    let sessions = fs::read_to_string(out.join("sessions.csv")).unwrap();
    assert!(sessions.starts_with(
        "Training,Category,Date,Site,Capacity,Registrations,Attendance,Cost,Price,Satisfaction"
    ));
    assert_eq!(sessions.lines().count(), 51);
}

#[test]
fn exported_sessions_reload_with_identical_kpis() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let generated = ["--sessions", "40", "--seed", "9", "--end-date", "2025-06-30"];

    let expected = report_cmd()
        .args(generated)
        .arg("kpis")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    report_cmd()
        .args(generated)
        .args(["export", "--out", out.to_str().unwrap()])
        .assert()
        .success();

    let sessions = out.join("sessions.csv");
    let responses = out.join("responses.csv");
    let reloaded = report_cmd()
        .args([
            "--sessions-csv",
            sessions.to_str().unwrap(),
            "--responses-csv",
            responses.to_str().unwrap(),
            "kpis",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert_eq!(String::from_utf8_lossy(&reloaded), String::from_utf8_lossy(&expected));
}

const DETAIL_CSV: &str = "Training,Category,Date,Site,Capacity,Registrations,Attendance,Cost,Price,Satisfaction\n\
     Forklift,Logistics,2025-03-04,North,12,10,9,900,1400,8.2\n\
     Crane,Construction,2025-03-11,North,10,8,8,1200,1500,7.9\n\
     Forklift,Logistics,2025-04-01,South,12,12,11,900,1400,8.6\n";

#[test]
fn detail_for_a_site_shows_its_top_trainings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sessions.csv");
    fs::write(&path, DETAIL_CSV).unwrap();
    report_cmd()
        .args(["--sessions-csv", path.to_str().unwrap(), "detail", "--site", "North"])
        .assert()
        .success()
        .stdout(contains("SITE: North"))
        .stdout(contains("MOST PROFITABLE TRAININGS"))
        .stdout(contains("Crane"))
        .stdout(contains("SESSIONS (2)"))
        .stdout(contains("2025-04-01").not());
}

#[test]
fn detail_for_a_training_spans_sites() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sessions.csv");
    fs::write(&path, DETAIL_CSV).unwrap();
    report_cmd()
        .args(["--sessions-csv", path.to_str().unwrap(), "detail", "--training", "Forklift"])
        .assert()
        .success()
        .stdout(contains("TRAINING: Forklift"))
        .stdout(contains("South"))
        .stdout(contains("SESSIONS (2)"));
}

#[test]
fn detail_of_unknown_site_reports_none_found() {
    report_cmd()
        .args(["--sessions", "20", "detail", "--site", "Atlantis"])
        .assert()
        .success()
        .stdout(contains("No sessions found for site 'Atlantis'."));
}

#[test]
fn detail_requires_exactly_one_scope() {
    report_cmd().arg("detail").assert().failure();
    report_cmd()
        .args(["detail", "--site", "North", "--training", "Forklift"])
        .assert()
        .failure();
}
