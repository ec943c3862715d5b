//! Management-report insights derived from the aggregates: recent monthly
//! trend, development opportunities and strategic pointers.

use crate::types::AggregatedRow;
use serde::Serialize;

/// Months kept in the recent trend.
pub const TREND_MONTHS: usize = 3;
/// Mean satisfaction a training must exceed to be worth developing.
pub const DEVELOPMENT_SATISFACTION_FLOOR: f64 = 8.0;
/// Mean fill rate (%) below which a well-rated training has room to grow.
pub const DEVELOPMENT_FILL_CEILING: f64 = 70.0;

/// Month-over-month percentage change between the last two trend months.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendChange {
    pub revenue_pct: f64,
    pub profit_pct: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Recommendations {
    pub top_profit_category: Option<String>,
    pub top_margin_category: Option<String>,
    pub top_site: Option<String>,
}

/// The last `months` rows of a month-keyed aggregate (rows are key-ordered).
pub fn recent_trend(monthly_rows: &[AggregatedRow], months: usize) -> Vec<AggregatedRow> {
    let start = monthly_rows.len().saturating_sub(months);
    monthly_rows[start..].to_vec()
}

fn change_pct(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    (current / previous - 1.0) * 100.0
}

pub fn month_over_month(trend: &[AggregatedRow]) -> Option<TrendChange> {
    let [.., previous, last] = trend else {
        return None;
    };
    Some(TrendChange {
        revenue_pct: change_pct(last.metrics.revenue, previous.metrics.revenue),
        profit_pct: change_pct(last.metrics.profit, previous.metrics.profit),
    })
}

/// True when profit fell in each of the last three months.
pub fn profit_declining(trend: &[AggregatedRow]) -> bool {
    match trend {
        [.., a, b, c] => c.metrics.profit < b.metrics.profit && b.metrics.profit < a.metrics.profit,
        _ => false,
    }
}

/// Well-rated trainings whose sessions are not filling up, best rated first.
pub fn development_opportunities(training_rows: &[AggregatedRow]) -> Vec<AggregatedRow> {
    let mut rows: Vec<AggregatedRow> = training_rows
        .iter()
        .filter(|r| {
            r.metrics.satisfaction > DEVELOPMENT_SATISFACTION_FLOOR
                && r.metrics.fill_rate < DEVELOPMENT_FILL_CEILING
        })
        .cloned()
        .collect();
    rows.sort_by(|a, b| b.metrics.satisfaction.total_cmp(&a.metrics.satisfaction));
    rows
}

fn best_by<F>(rows: &[AggregatedRow], value: F) -> Option<String>
where
    F: Fn(&AggregatedRow) -> f64,
{
    // first maximum wins so ties resolve to key order
    let mut best: Option<&AggregatedRow> = None;
    for row in rows {
        if best.is_none_or(|b| value(row) > value(b)) {
            best = Some(row);
        }
    }
    best.map(|r| r.key.clone())
}

pub fn recommendations(category_rows: &[AggregatedRow], site_rows: &[AggregatedRow]) -> Recommendations {
    Recommendations {
        top_profit_category: best_by(category_rows, |r| r.metrics.profit),
        top_margin_category: best_by(category_rows, |r| r.metrics.net_margin),
        top_site: best_by(site_rows, |r| r.metrics.profit),
    }
}
