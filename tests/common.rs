#![allow(dead_code)]
use assert_cmd::{cargo_bin_cmd, Command};
use chrono::NaiveDate;
use training_report::types::{SessionFacts, SessionRecord};

pub fn report_cmd() -> Command {
    cargo_bin_cmd!("training_report")
}

/// A single-attendee session whose profit is exactly `profit` (cost 100).
pub fn session_with_profit(training: &str, site: &str, profit: f64) -> SessionRecord {
    SessionRecord::new(SessionFacts {
        training: training.to_string(),
        category: "Transport".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 2, 10).unwrap(),
        site: site.to_string(),
        capacity: 10,
        registrations: 9,
        attendance: 1,
        cost: 100.0,
        price: profit + 100.0,
        satisfaction: 8.0,
    })
}
