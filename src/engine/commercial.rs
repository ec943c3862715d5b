use crate::types::AggregatedRow;
use crate::util::{pct, ratio, round_to};
use serde::Serialize;

/// Commercial ratios for one site, computed from summed volumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommercialRow {
    pub site: String,
    pub capacity: u64,
    pub registrations: u64,
    pub attendance: u64,
    pub revenue: f64,
    pub conversion_rate: f64,
    pub presence_rate: f64,
    pub revenue_per_registrant: f64,
}

/// Conversion, presence and revenue-per-registrant for each site row.
///
/// Unlike the per-session rates these are ratios of sums. Zero denominators
/// resolve to `0`.
pub fn commercial_metrics(site_rows: &[AggregatedRow]) -> Vec<CommercialRow> {
    site_rows
        .iter()
        .map(|row| {
            let m = &row.metrics;
            let registrations = m.registrations as f64;
            CommercialRow {
                site: row.key.clone(),
                capacity: m.capacity,
                registrations: m.registrations,
                attendance: m.attendance,
                revenue: m.revenue,
                conversion_rate: pct(registrations, m.capacity as f64),
                presence_rate: pct(m.attendance as f64, registrations),
                revenue_per_registrant: round_to(ratio(m.revenue, registrations), 2),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GroupMetrics;

    fn site(key: &str, capacity: u64, registrations: u64, attendance: u64, revenue: f64) -> AggregatedRow {
        AggregatedRow {
            key: key.to_string(),
            metrics: GroupMetrics {
                sessions: 1,
                capacity,
                registrations,
                attendance,
                revenue,
                ..GroupMetrics::default()
            },
        }
    }

    #[test]
    fn computes_site_ratios() {
        let rows = commercial_metrics(&[site("North", 30, 20, 17, 2600.0)]);
        let r = &rows[0];
        assert_eq!(r.site, "North");
        assert_eq!(r.conversion_rate, 66.7);
        assert_eq!(r.presence_rate, 85.0);
        assert_eq!(r.revenue_per_registrant, 130.0);
    }

    #[test]
    fn site_without_registrations_yields_zero_rates() {
        let rows = commercial_metrics(&[site("New", 12, 0, 0, 0.0)]);
        assert_eq!(rows[0].conversion_rate, 0.0);
        assert_eq!(rows[0].presence_rate, 0.0);
        assert_eq!(rows[0].revenue_per_registrant, 0.0);
    }

    #[test]
    fn revenue_per_registrant_keeps_two_decimals() {
        let rows = commercial_metrics(&[site("South", 10, 3, 3, 1000.0)]);
        assert_eq!(rows[0].revenue_per_registrant, 333.33);
    }
}
