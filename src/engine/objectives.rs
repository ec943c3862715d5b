use crate::types::AggregatedRow;
use crate::util::pct;
use serde::Serialize;

/// Objectives are projected 20% above the current actuals.
pub const OBJECTIVE_MULTIPLIER: f64 = 1.2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectiveRow {
    pub site: String,
    pub revenue: f64,
    pub revenue_objective: f64,
    pub revenue_attainment: f64,
    pub registrations: u64,
    pub registrations_objective: f64,
    pub registrations_attainment: f64,
}

/// Project an objective per site and report attainment against it.
pub fn track_objectives(site_rows: &[AggregatedRow]) -> Vec<ObjectiveRow> {
    site_rows
        .iter()
        .map(|row| {
            let revenue = row.metrics.revenue;
            let registrations = row.metrics.registrations;
            let revenue_objective = revenue * OBJECTIVE_MULTIPLIER;
            let registrations_objective = registrations as f64 * OBJECTIVE_MULTIPLIER;
            ObjectiveRow {
                site: row.key.clone(),
                revenue,
                revenue_objective,
                revenue_attainment: pct(revenue, revenue_objective),
                registrations,
                registrations_objective,
                registrations_attainment: pct(registrations as f64, registrations_objective),
            }
        })
        .collect()
}
