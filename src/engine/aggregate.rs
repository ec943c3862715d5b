//! Grouping of session records along one dimension.
//!
//! Volume and money fields are summed; rate and score fields are the
//! unweighted mean of the per-session values (each session counts once,
//! regardless of its size).

use crate::errors::{ReportError, ReportResult};
use crate::types::{AggregatedRow, GroupMetrics, SessionRecord, SiteTrainingRow};
use crate::util::{average, month_key};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Dimension a session table can be grouped along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKey {
    Training,
    Category,
    Site,
    Month,
}

impl GroupKey {
    pub const ALL: [GroupKey; 4] = [
        GroupKey::Training,
        GroupKey::Category,
        GroupKey::Site,
        GroupKey::Month,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GroupKey::Training => "training",
            GroupKey::Category => "category",
            GroupKey::Site => "site",
            GroupKey::Month => "month",
        }
    }

    fn key_of(&self, r: &SessionRecord) -> String {
        match self {
            GroupKey::Training => r.training.clone(),
            GroupKey::Category => r.category.clone(),
            GroupKey::Site => r.site.clone(),
            GroupKey::Month => month_key(r.date),
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupKey {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        GroupKey::ALL
            .into_iter()
            .find(|k| k.as_str() == wanted)
            .ok_or_else(|| ReportError::UnknownGroupingKey(s.to_string()))
    }
}

#[derive(Default)]
struct Acc {
    revenue: f64,
    profit: f64,
    registrations: u64,
    attendance: u64,
    capacity: u64,
    net_margins: Vec<f64>,
    fill_rates: Vec<f64>,
    attendance_rates: Vec<f64>,
    satisfactions: Vec<f64>,
}

impl Acc {
    fn push(&mut self, r: &SessionRecord) {
        self.revenue += r.revenue;
        self.profit += r.profit;
        self.registrations += u64::from(r.registrations);
        self.attendance += u64::from(r.attendance);
        self.capacity += u64::from(r.capacity);
        self.net_margins.push(r.net_margin);
        self.fill_rates.push(r.fill_rate);
        self.attendance_rates.push(r.attendance_rate);
        self.satisfactions.push(r.satisfaction);
    }

    fn finish(self) -> GroupMetrics {
        GroupMetrics {
            sessions: self.net_margins.len(),
            revenue: self.revenue,
            profit: self.profit,
            registrations: self.registrations,
            attendance: self.attendance,
            capacity: self.capacity,
            net_margin: average(&self.net_margins),
            fill_rate: average(&self.fill_rates),
            attendance_rate: average(&self.attendance_rates),
            satisfaction: average(&self.satisfactions),
        }
    }
}

/// Reduce a whole slice of sessions to one set of metrics. An empty slice
/// yields all-zero metrics.
pub fn summarize(records: &[SessionRecord]) -> GroupMetrics {
    let mut acc = Acc::default();
    for r in records {
        acc.push(r);
    }
    acc.finish()
}

/// One row per distinct key value, ordered by key. Keys with no sessions
/// never appear.
pub fn aggregate(records: &[SessionRecord], key: GroupKey) -> Vec<AggregatedRow> {
    let mut map: BTreeMap<String, Acc> = BTreeMap::new();
    for r in records {
        map.entry(key.key_of(r)).or_default().push(r);
    }
    debug!(key = %key, sessions = records.len(), groups = map.len(), "aggregated sessions");
    map.into_iter()
        .map(|(key, acc)| AggregatedRow {
            key,
            metrics: acc.finish(),
        })
        .collect()
}

/// Same as [`aggregate`], with the dimension given by name.
pub fn aggregate_by(records: &[SessionRecord], key: &str) -> ReportResult<Vec<AggregatedRow>> {
    let key: GroupKey = key.parse()?;
    Ok(aggregate(records, key))
}

/// Sessions whose `key` value equals `value` (surrounding blanks ignored),
/// in table order.
pub fn filter_sessions(records: &[SessionRecord], key: GroupKey, value: &str) -> Vec<SessionRecord> {
    let value = value.trim();
    records
        .iter()
        .filter(|r| key.key_of(r) == value)
        .cloned()
        .collect()
}

/// Joint grouping by (site, training), ordered by site then training.
pub fn aggregate_by_site_and_training(records: &[SessionRecord]) -> Vec<SiteTrainingRow> {
    let mut map: BTreeMap<(String, String), Acc> = BTreeMap::new();
    for r in records {
        map.entry((r.site.clone(), r.training.clone()))
            .or_default()
            .push(r);
    }
    map.into_iter()
        .map(|((site, training), acc)| SiteTrainingRow {
            site,
            training,
            metrics: acc.finish(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fixtures::{facts, session};
    use crate::types::SessionRecord;
    use chrono::NaiveDate;
    use std::collections::BTreeSet;

    fn sample() -> Vec<SessionRecord> {
        vec![
            session("Forklift", "North"),
            SessionRecord::new(crate::types::SessionFacts {
                registrations: 5,
                attendance: 4,
                satisfaction: 6.0,
                ..facts("Forklift", "South")
            }),
            SessionRecord::new(crate::types::SessionFacts {
                category: "Safety".to_string(),
                date: NaiveDate::from_ymd_opt(2025, 2, 3).unwrap(),
                ..facts("Road safety", "North")
            }),
        ]
    }

    #[test]
    fn sums_volumes_and_averages_rates() {
        let rows = aggregate(&sample(), GroupKey::Training);
        assert_eq!(rows.len(), 2);
        let forklift = &rows[0];
        assert_eq!(forklift.key, "Forklift");
        let m = forklift.metrics;
        assert_eq!(m.sessions, 2);
        assert_eq!(m.registrations, 13);
        assert_eq!(m.attendance, 12);
        assert_eq!(m.capacity, 20);
        // per-session fill rates 80.0 and 50.0, mean not ratio of sums
        assert_eq!(m.fill_rate, 65.0);
        assert_eq!(m.satisfaction, 7.0);
        assert_eq!(m.revenue, 800.0 + 400.0);
    }

    #[test]
    fn groups_by_month_key() {
        let rows = aggregate(&sample(), GroupKey::Month);
        let keys: Vec<&str> = rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["2025-01", "2025-02"]);
        assert_eq!(rows[0].metrics.sessions, 2);
    }

    #[test]
    fn keys_match_distinct_input_values() {
        let data = sample();
        for key in GroupKey::ALL {
            let rows = aggregate(&data, key);
            let got: BTreeSet<String> = rows.iter().map(|r| r.key.clone()).collect();
            let expected: BTreeSet<String> = data.iter().map(|r| key.key_of(r)).collect();
            assert_eq!(got, expected);
            let total: usize = rows.iter().map(|r| r.metrics.sessions).sum();
            assert_eq!(total, data.len());
        }
    }

    #[test]
    fn parses_keys_case_insensitively() {
        assert_eq!(" Site ".parse::<GroupKey>().unwrap(), GroupKey::Site);
        assert_eq!("MONTH".parse::<GroupKey>().unwrap(), GroupKey::Month);
    }

    #[test]
    fn filter_keeps_only_matching_sessions() {
        let data = sample();
        let picked = filter_sessions(&data, GroupKey::Site, " North ");
        assert!(!picked.is_empty());
        assert!(picked.iter().all(|r| r.site == "North"));
        let expected = data.iter().filter(|r| r.site == "North").count();
        assert_eq!(picked.len(), expected);
        assert!(filter_sessions(&data, GroupKey::Training, "Unknown").is_empty());
    }

    #[test]
    fn rerun_is_identical() {
        let data = sample();
        assert_eq!(aggregate(&data, GroupKey::Site), aggregate(&data, GroupKey::Site));
    }

    #[test]
    fn empty_input_gives_no_rows() {
        assert!(aggregate(&[], GroupKey::Category).is_empty());
        assert!(aggregate_by_site_and_training(&[]).is_empty());
    }

    #[test]
    fn rejects_unknown_grouping_key() {
        let err = aggregate_by(&sample(), "instructor").unwrap_err();
        assert!(matches!(err, ReportError::UnknownGroupingKey(ref k) if k == "instructor"));
        assert_eq!(aggregate_by(&sample(), "Site").unwrap().len(), 2);
    }

    #[test]
    fn joint_grouping_orders_by_site_then_training() {
        let rows = aggregate_by_site_and_training(&sample());
        let keys: Vec<(&str, &str)> = rows
            .iter()
            .map(|r| (r.site.as_str(), r.training.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![("North", "Forklift"), ("North", "Road safety"), ("South", "Forklift")]
        );
    }

    #[test]
    fn summarize_empty_is_all_zero() {
        let m = summarize(&[]);
        assert_eq!(m, GroupMetrics::default());
    }
}
