use crate::types::{AggregatedRow, SiteTrainingRow};
use serde::Serialize;
use std::collections::BTreeMap;

/// Trainings listed in dashboard summaries.
pub const GLOBAL_TOP_K: usize = 5;
/// Trainings listed per site.
pub const SITE_TOP_K: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteTopTrainings {
    pub site: String,
    pub trainings: Vec<SiteTrainingRow>,
}

/// The `k` most profitable rows. The sort is stable, so equal profits keep
/// their input (key) order.
pub fn top_by_profit(rows: &[AggregatedRow], k: usize) -> Vec<AggregatedRow> {
    let mut sorted: Vec<&AggregatedRow> = rows.iter().collect();
    sorted.sort_by(|a, b| b.metrics.profit.total_cmp(&a.metrics.profit));
    sorted.into_iter().take(k).cloned().collect()
}

/// Top `k` trainings by profit within each site. Every site present in the
/// input gets its own list, shorter than `k` when it has fewer trainings.
pub fn top_trainings_by_site(rows: &[SiteTrainingRow], k: usize) -> Vec<SiteTopTrainings> {
    let mut by_site: BTreeMap<&str, Vec<&SiteTrainingRow>> = BTreeMap::new();
    for row in rows {
        by_site.entry(row.site.as_str()).or_default().push(row);
    }
    by_site
        .into_iter()
        .map(|(site, mut trainings)| {
            trainings.sort_by(|a, b| b.metrics.profit.total_cmp(&a.metrics.profit));
            SiteTopTrainings {
                site: site.to_string(),
                trainings: trainings.into_iter().take(k).cloned().collect(),
            }
        })
        .collect()
}
