//! The analytics engine: pure functions from the session table to the
//! aggregates, ratios, flags and rankings every report surface displays.

pub mod aggregate;
pub mod classify;
pub mod commercial;
pub mod detail;
pub mod insights;
pub mod kpi;
pub mod objectives;
pub mod ranking;
pub mod satisfaction;

pub use aggregate::{
    aggregate, aggregate_by, aggregate_by_site_and_training, filter_sessions, summarize, GroupKey,
};
pub use classify::{classify, Classification};
pub use commercial::{commercial_metrics, CommercialRow};
pub use detail::{group_detail, DetailScope, GroupDetail};
pub use insights::{Recommendations, TrendChange};
pub use kpi::{compute_kpis, Kpis};
pub use objectives::{track_objectives, ObjectiveRow};
pub use ranking::{top_by_profit, top_trainings_by_site, SiteTopTrainings};
pub use satisfaction::{summarize_satisfaction, SatisfactionSummary};
