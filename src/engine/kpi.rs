use crate::engine::aggregate::summarize;
use crate::types::SessionRecord;
use serde::Serialize;

/// Headline numbers over the whole session table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Kpis {
    pub total_revenue: f64,
    pub total_profit: f64,
    pub mean_net_margin: f64,
    pub total_registrations: u64,
    pub mean_fill_rate: f64,
    pub mean_attendance_rate: f64,
    pub mean_satisfaction: f64,
}

/// Means over an empty table are `0`.
pub fn compute_kpis(records: &[SessionRecord]) -> Kpis {
    let m = summarize(records);
    Kpis {
        total_revenue: m.revenue,
        total_profit: m.profit,
        mean_net_margin: m.net_margin,
        total_registrations: m.registrations,
        mean_fill_rate: m.fill_rate,
        mean_attendance_rate: m.attendance_rate,
        mean_satisfaction: m.satisfaction,
    }
}
