//! One pass of every engine computation over a session table.
//!
//! The console report, the CSV/JSON export and the KPI snapshot all read
//! from the same [`Analysis`], so the numbers cannot drift between them.

use crate::engine::insights::{self, Recommendations, TrendChange, TREND_MONTHS};
use crate::engine::ranking::{GLOBAL_TOP_K, SITE_TOP_K};
use crate::engine::{
    aggregate, aggregate_by_site_and_training, classify, commercial_metrics, compute_kpis,
    summarize_satisfaction, top_by_profit, top_trainings_by_site, track_objectives,
    Classification, CommercialRow, GroupKey, Kpis, ObjectiveRow, SatisfactionSummary,
    SiteTopTrainings,
};
use crate::table::SessionTable;
use crate::types::AggregatedRow;
use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub sessions: usize,
    pub responses: usize,
    pub kpis: Kpis,
    pub by_training: Vec<AggregatedRow>,
    pub by_category: Vec<AggregatedRow>,
    pub by_site: Vec<AggregatedRow>,
    pub monthly: Vec<AggregatedRow>,
    pub satisfaction: Vec<SatisfactionSummary>,
    pub classification: Classification,
    pub commercial: Vec<CommercialRow>,
    pub objectives: Vec<ObjectiveRow>,
    pub top_trainings: Vec<AggregatedRow>,
    pub top_by_site: Vec<SiteTopTrainings>,
    pub recent_trend: Vec<AggregatedRow>,
    pub trend_change: Option<TrendChange>,
    pub profit_declining: bool,
    pub development: Vec<AggregatedRow>,
    pub recommendations: Recommendations,
}

/// The home-page view: headline numbers plus the most telling tables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub kpis: Kpis,
    pub top_trainings: Vec<AggregatedRow>,
    pub site_performance: Vec<AggregatedRow>,
    pub recent_trend: Vec<AggregatedRow>,
}

impl Analysis {
    pub fn compute(table: &SessionTable) -> Self {
        let sessions = table.sessions();
        let by_training = aggregate(sessions, GroupKey::Training);
        let by_category = aggregate(sessions, GroupKey::Category);
        let by_site = aggregate(sessions, GroupKey::Site);
        let monthly = aggregate(sessions, GroupKey::Month);
        let site_training = aggregate_by_site_and_training(sessions);
        let recent_trend = insights::recent_trend(&monthly, TREND_MONTHS);

        let analysis = Analysis {
            sessions: table.len(),
            responses: table.responses().len(),
            kpis: compute_kpis(sessions),
            satisfaction: summarize_satisfaction(table.responses()),
            classification: classify(&by_training),
            commercial: commercial_metrics(&by_site),
            objectives: track_objectives(&by_site),
            top_trainings: top_by_profit(&by_training, GLOBAL_TOP_K),
            top_by_site: top_trainings_by_site(&site_training, SITE_TOP_K),
            trend_change: insights::month_over_month(&recent_trend),
            profit_declining: insights::profit_declining(&recent_trend),
            development: insights::development_opportunities(&by_training),
            recommendations: insights::recommendations(&by_category, &by_site),
            recent_trend,
            by_training,
            by_category,
            by_site,
            monthly,
        };
        info!(
            sessions = analysis.sessions,
            responses = analysis.responses,
            trainings = analysis.by_training.len(),
            risks = analysis.classification.risks.len(),
            opportunities = analysis.classification.opportunities.len(),
            "analysis computed"
        );
        analysis
    }

    pub fn dashboard(&self) -> DashboardSummary {
        DashboardSummary {
            kpis: self.kpis,
            top_trainings: self.top_trainings.clone(),
            site_performance: self.by_site.clone(),
            recent_trend: self.recent_trend.clone(),
        }
    }
}
