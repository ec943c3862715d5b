use crate::util::{pct, round_to};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

// ---------------------------------------------------------------------------
// CSV input rows
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct RawSessionRow {
    #[serde(rename = "Training")]
    pub training: Option<String>,
    #[serde(rename = "Category")]
    pub category: Option<String>,
    #[serde(rename = "Date")]
    pub date: Option<String>,
    #[serde(rename = "Site")]
    pub site: Option<String>,
    #[serde(rename = "Capacity")]
    pub capacity: Option<String>,
    #[serde(rename = "Registrations")]
    pub registrations: Option<String>,
    #[serde(rename = "Attendance")]
    pub attendance: Option<String>,
    #[serde(rename = "Cost")]
    pub cost: Option<String>,
    #[serde(rename = "Price")]
    pub price: Option<String>,
    #[serde(rename = "Satisfaction")]
    pub satisfaction: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawResponseRow {
    #[serde(rename = "Training")]
    pub training: Option<String>,
    #[serde(rename = "Date")]
    pub date: Option<String>,
    #[serde(rename = "Site")]
    pub site: Option<String>,
    #[serde(rename = "Content")]
    pub content: Option<String>,
    #[serde(rename = "Instructor")]
    pub instructor: Option<String>,
    #[serde(rename = "Materials")]
    pub materials: Option<String>,
    #[serde(rename = "Environment")]
    pub environment: Option<String>,
    #[serde(rename = "Relevance")]
    pub relevance: Option<String>,
    #[serde(rename = "Overall")]
    pub overall: Option<String>,
}

// ---------------------------------------------------------------------------
// Session table
// ---------------------------------------------------------------------------

/// Primary facts of a session, before the derived ratios are computed.
#[derive(Debug, Clone)]
pub struct SessionFacts {
    pub training: String,
    pub category: String,
    pub date: NaiveDate,
    pub site: String,
    pub capacity: u32,
    pub registrations: u32,
    pub attendance: u32,
    pub cost: f64,
    pub price: f64,
    pub satisfaction: f64,
}

/// One training session. Immutable once built; the derived fields are always
/// finite because every division is zero-guarded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionRecord {
    pub training: String,
    pub category: String,
    pub date: NaiveDate,
    pub site: String,
    pub capacity: u32,
    pub registrations: u32,
    pub attendance: u32,
    pub fill_rate: f64,
    pub attendance_rate: f64,
    pub cost: f64,
    pub price: f64,
    pub revenue: f64,
    pub profit: f64,
    pub net_margin: f64,
    pub satisfaction: f64,
}

impl SessionRecord {
    /// Derive the ratio and money fields from the primary facts.
    ///
    /// Producer contract violations (e.g. registrations above capacity) are
    /// carried through unclamped.
    pub fn new(facts: SessionFacts) -> Self {
        let revenue = facts.attendance as f64 * facts.price;
        let profit = revenue - facts.cost;
        let net_margin = if revenue > 0.0 {
            round_to(profit / revenue * 100.0, 1)
        } else {
            0.0
        };
        Self {
            fill_rate: pct(facts.registrations as f64, facts.capacity as f64),
            attendance_rate: pct(facts.attendance as f64, facts.registrations as f64),
            revenue,
            profit,
            net_margin,
            training: facts.training,
            category: facts.category,
            date: facts.date,
            site: facts.site,
            capacity: facts.capacity,
            registrations: facts.registrations,
            attendance: facts.attendance,
            cost: facts.cost,
            price: facts.price,
            satisfaction: facts.satisfaction,
        }
    }
}

impl From<SessionFacts> for SessionRecord {
    fn from(facts: SessionFacts) -> Self {
        Self::new(facts)
    }
}

/// The six independent 0-10 ratings of one survey response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RatingScores {
    pub content: f64,
    pub instructor: f64,
    pub materials: f64,
    pub environment: f64,
    pub relevance: f64,
    pub overall: f64,
}

/// One survey response attached to a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SatisfactionResponse {
    pub training: String,
    pub date: NaiveDate,
    pub site: String,
    pub scores: RatingScores,
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

/// Metrics reduced over one group: sums for volume/money fields, unweighted
/// per-session means for rate/score fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct GroupMetrics {
    pub sessions: usize,
    pub revenue: f64,
    pub profit: f64,
    pub registrations: u64,
    pub attendance: u64,
    pub capacity: u64,
    pub net_margin: f64,
    pub fill_rate: f64,
    pub attendance_rate: f64,
    pub satisfaction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatedRow {
    pub key: String,
    pub metrics: GroupMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteTrainingRow {
    pub site: String,
    pub training: String,
    pub metrics: GroupMetrics,
}

// ---------------------------------------------------------------------------
// Display rows (presentation only: values are already formatted)
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct PerformanceDisplayRow {
    #[serde(rename = "Group")]
    #[tabled(rename = "Group")]
    pub group: String,
    #[serde(rename = "Sessions")]
    #[tabled(rename = "Sessions")]
    pub sessions: usize,
    #[serde(rename = "Revenue")]
    #[tabled(rename = "Revenue")]
    pub revenue: String,
    #[serde(rename = "Profit")]
    #[tabled(rename = "Profit")]
    pub profit: String,
    #[serde(rename = "NetMargin")]
    #[tabled(rename = "NetMargin")]
    pub net_margin: String,
    #[serde(rename = "Registrations")]
    #[tabled(rename = "Registrations")]
    pub registrations: u64,
    #[serde(rename = "FillRate")]
    #[tabled(rename = "FillRate")]
    pub fill_rate: String,
    #[serde(rename = "AttendanceRate")]
    #[tabled(rename = "AttendanceRate")]
    pub attendance_rate: String,
    #[serde(rename = "Satisfaction")]
    #[tabled(rename = "Satisfaction")]
    pub satisfaction: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct SessionDisplayRow {
    #[serde(rename = "Date")]
    #[tabled(rename = "Date")]
    pub date: String,
    #[serde(rename = "Training")]
    #[tabled(rename = "Training")]
    pub training: String,
    #[serde(rename = "Site")]
    #[tabled(rename = "Site")]
    pub site: String,
    #[serde(rename = "Registrations")]
    #[tabled(rename = "Registrations")]
    pub registrations: u32,
    #[serde(rename = "Attendance")]
    #[tabled(rename = "Attendance")]
    pub attendance: u32,
    #[serde(rename = "FillRate")]
    #[tabled(rename = "FillRate")]
    pub fill_rate: String,
    #[serde(rename = "Revenue")]
    #[tabled(rename = "Revenue")]
    pub revenue: String,
    #[serde(rename = "Profit")]
    #[tabled(rename = "Profit")]
    pub profit: String,
    #[serde(rename = "NetMargin")]
    #[tabled(rename = "NetMargin")]
    pub net_margin: String,
    #[serde(rename = "Satisfaction")]
    #[tabled(rename = "Satisfaction")]
    pub satisfaction: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct SatisfactionDisplayRow {
    #[serde(rename = "Training")]
    #[tabled(rename = "Training")]
    pub training: String,
    #[serde(rename = "Responses")]
    #[tabled(rename = "Responses")]
    pub responses: usize,
    #[serde(rename = "Content")]
    #[tabled(rename = "Content")]
    pub content: String,
    #[serde(rename = "Instructor")]
    #[tabled(rename = "Instructor")]
    pub instructor: String,
    #[serde(rename = "Materials")]
    #[tabled(rename = "Materials")]
    pub materials: String,
    #[serde(rename = "Environment")]
    #[tabled(rename = "Environment")]
    pub environment: String,
    #[serde(rename = "Relevance")]
    #[tabled(rename = "Relevance")]
    pub relevance: String,
    #[serde(rename = "Overall")]
    #[tabled(rename = "Overall")]
    pub overall: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct CommercialDisplayRow {
    #[serde(rename = "Site")]
    #[tabled(rename = "Site")]
    pub site: String,
    #[serde(rename = "ConversionRate")]
    #[tabled(rename = "ConversionRate")]
    pub conversion_rate: String,
    #[serde(rename = "PresenceRate")]
    #[tabled(rename = "PresenceRate")]
    pub presence_rate: String,
    #[serde(rename = "RevenuePerRegistrant")]
    #[tabled(rename = "RevenuePerRegistrant")]
    pub revenue_per_registrant: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct ObjectiveDisplayRow {
    #[serde(rename = "Site")]
    #[tabled(rename = "Site")]
    pub site: String,
    #[serde(rename = "Revenue")]
    #[tabled(rename = "Revenue")]
    pub revenue: String,
    #[serde(rename = "RevenueObjective")]
    #[tabled(rename = "RevenueObjective")]
    pub revenue_objective: String,
    #[serde(rename = "RevenueAttainment")]
    #[tabled(rename = "RevenueAttainment")]
    pub revenue_attainment: String,
    #[serde(rename = "Registrations")]
    #[tabled(rename = "Registrations")]
    pub registrations: u64,
    #[serde(rename = "RegistrationsObjective")]
    #[tabled(rename = "RegistrationsObjective")]
    pub registrations_objective: String,
    #[serde(rename = "RegistrationsAttainment")]
    #[tabled(rename = "RegistrationsAttainment")]
    pub registrations_attainment: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facts(capacity: u32, registrations: u32, attendance: u32, price: f64, cost: f64) -> SessionFacts {
        SessionFacts {
            training: "Forklift".to_string(),
            category: "Logistics".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 5, 12).unwrap(),
            site: "North".to_string(),
            capacity,
            registrations,
            attendance,
            cost,
            price,
            satisfaction: 8.1,
        }
    }

    #[test]
    fn derives_ratios_and_money_fields() {
        let r = SessionRecord::new(facts(12, 9, 8, 1400.0, 900.0));
        assert_eq!(r.fill_rate, 75.0);
        assert_eq!(r.attendance_rate, 88.9);
        assert_eq!(r.revenue, 11200.0);
        assert_eq!(r.profit, 10300.0);
        assert_eq!(r.net_margin, 92.0);
    }

    #[test]
    fn zero_denominators_resolve_to_zero() {
        let r = SessionRecord::new(facts(10, 0, 0, 1400.0, 900.0));
        assert_eq!(r.attendance_rate, 0.0);
        assert_eq!(r.revenue, 0.0);
        assert_eq!(r.profit, -900.0);
        assert_eq!(r.net_margin, 0.0);
        assert!(r.fill_rate.is_finite());
    }

    #[test]
    fn overbooked_session_is_not_clamped() {
        let r = SessionRecord::new(facts(10, 12, 12, 100.0, 0.0));
        assert_eq!(r.fill_rate, 120.0);
    }

    #[test]
    fn sixteenth_ties_round_to_even() {
        let r = SessionRecord::new(facts(16, 13, 13, 100.0, 0.0));
        assert_eq!(r.fill_rate, 81.2);
        let r = SessionRecord::new(facts(20, 16, 5, 100.0, 0.0));
        assert_eq!(r.attendance_rate, 31.2);
    }
}
