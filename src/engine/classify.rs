//! Risk and opportunity flags for training-level aggregates.
//!
//! Risk is a disjunction of weak signals, opportunity a conjunction of
//! strong ones. The two checks are independent: a row may land in neither
//! set, and nothing prevents it from landing in both.

use crate::types::{AggregatedRow, GroupMetrics};
use serde::Serialize;

/// Mean net margin (%) below which a training is at risk.
pub const RISK_MARGIN_FLOOR: f64 = 20.0;
/// Mean fill rate (%) below which a training is at risk.
pub const RISK_FILL_FLOOR: f64 = 60.0;
/// Mean satisfaction (0-10) below which a training is at risk.
pub const RISK_SATISFACTION_FLOOR: f64 = 7.0;

/// Mean net margin (%) a training must exceed to be an opportunity.
pub const OPPORTUNITY_MARGIN_FLOOR: f64 = 40.0;
/// Mean fill rate (%) a training must exceed to be an opportunity.
pub const OPPORTUNITY_FILL_FLOOR: f64 = 80.0;
/// Mean satisfaction a training must exceed to be an opportunity.
pub const OPPORTUNITY_SATISFACTION_FLOOR: f64 = 8.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Classification {
    /// Ascending by profit, worst first.
    pub risks: Vec<AggregatedRow>,
    /// Descending by profit, best first.
    pub opportunities: Vec<AggregatedRow>,
}

pub fn is_risk(m: &GroupMetrics) -> bool {
    m.net_margin < RISK_MARGIN_FLOOR
        || m.fill_rate < RISK_FILL_FLOOR
        || m.satisfaction < RISK_SATISFACTION_FLOOR
}

pub fn is_opportunity(m: &GroupMetrics) -> bool {
    m.net_margin > OPPORTUNITY_MARGIN_FLOOR
        && m.fill_rate > OPPORTUNITY_FILL_FLOOR
        && m.satisfaction > OPPORTUNITY_SATISFACTION_FLOOR
}

pub fn classify(training_rows: &[AggregatedRow]) -> Classification {
    let mut risks: Vec<AggregatedRow> = training_rows
        .iter()
        .filter(|r| is_risk(&r.metrics))
        .cloned()
        .collect();
    let mut opportunities: Vec<AggregatedRow> = training_rows
        .iter()
        .filter(|r| is_opportunity(&r.metrics))
        .cloned()
        .collect();

    risks.sort_by(|a, b| a.metrics.profit.total_cmp(&b.metrics.profit));
    opportunities.sort_by(|a, b| b.metrics.profit.total_cmp(&a.metrics.profit));
    Classification {
        risks,
        opportunities,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(key: &str, profit: f64, net_margin: f64, fill_rate: f64, satisfaction: f64) -> AggregatedRow {
        AggregatedRow {
            key: key.to_string(),
            metrics: GroupMetrics {
                sessions: 1,
                profit,
                net_margin,
                fill_rate,
                satisfaction,
                ..GroupMetrics::default()
            },
        }
    }

    #[test]
    fn low_margin_alone_is_a_risk_and_blocks_opportunity() {
        let c = classify(&[row("A", 500.0, 15.0, 90.0, 9.0)]);
        assert_eq!(c.risks.len(), 1);
        assert!(c.opportunities.is_empty());
    }

    #[test]
    fn each_risk_signal_is_sufficient() {
        assert!(is_risk(&row("x", 0.0, 50.0, 59.9, 9.0).metrics));
        assert!(is_risk(&row("x", 0.0, 50.0, 90.0, 6.9).metrics));
        assert!(!is_risk(&row("x", 0.0, 20.0, 60.0, 7.0).metrics));
    }

    #[test]
    fn opportunity_needs_all_three_strictly_above() {
        assert!(is_opportunity(&row("x", 0.0, 40.1, 80.1, 8.1).metrics));
        assert!(!is_opportunity(&row("x", 0.0, 40.0, 90.0, 9.0).metrics));
        assert!(!is_opportunity(&row("x", 0.0, 50.0, 80.0, 9.0).metrics));
        assert!(!is_opportunity(&row("x", 0.0, 50.0, 90.0, 8.0).metrics));
    }

    #[test]
    fn middling_row_is_in_neither_set() {
        let c = classify(&[row("M", 100.0, 30.0, 70.0, 7.5)]);
        assert!(c.risks.is_empty());
        assert!(c.opportunities.is_empty());
    }

    #[test]
    fn orders_risks_worst_first_and_opportunities_best_first() {
        let rows = vec![
            row("R1", 300.0, 10.0, 90.0, 9.0),
            row("R2", -200.0, 10.0, 90.0, 9.0),
            row("O1", 1000.0, 60.0, 90.0, 9.0),
            row("O2", 5000.0, 60.0, 90.0, 9.0),
        ];
        let c = classify(&rows);
        let risks: Vec<&str> = c.risks.iter().map(|r| r.key.as_str()).collect();
        let opps: Vec<&str> = c.opportunities.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(risks, vec!["R2", "R1"]);
        assert_eq!(opps, vec!["O2", "O1"]);
    }

    #[test]
    fn empty_input_gives_empty_sets() {
        assert_eq!(classify(&[]), Classification::default());
    }
}
