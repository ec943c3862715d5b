// Synthetic session data for demos and for running the report without a
// CSV export at hand.
//
// The output is fully determined by the seed and the reference date, so a
// report can be reproduced exactly.
use crate::errors::{ReportError, ReportResult};
use crate::table::SessionTable;
use crate::types::{RatingScores, SatisfactionResponse, SessionFacts, SessionRecord};
use crate::util::round_to;
use chrono::{Duration, NaiveDate};
use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use tracing::info;

/// One entry of the training catalog.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub training: &'static str,
    pub category: &'static str,
    pub cost: f64,
    pub price: f64,
}

pub static CATALOG: Lazy<Vec<CatalogEntry>> = Lazy::new(|| {
    let entry = |training: &'static str, category: &'static str, cost: f64, price: f64| CatalogEntry {
        training,
        category,
        cost,
        price,
    };
    vec![
        entry("Road freight transport", "Transport", 1200.0, 1800.0),
        entry("Forklift operator R489", "Logistics", 900.0, 1400.0),
        entry("HGV licence C", "Transport", 1500.0, 2300.0),
        entry("HGV licence CE", "Transport", 1800.0, 2800.0),
        entry("Warehouse logistics", "Logistics", 850.0, 1300.0),
        entry("Construction plant operation", "Construction", 1700.0, 2600.0),
        entry("Driver CPC", "Transport", 950.0, 1500.0),
        entry("Professional road safety", "Safety", 600.0, 900.0),
        entry("Eco-driving", "Transport", 500.0, 700.0),
        entry("Dangerous goods transport", "Transport", 1100.0, 1700.0),
    ]
});

pub const SITES: [&str; 2] = ["Auneau", "Gellainville"];

/// Days before the reference date that session dates are drawn from.
const HISTORY_DAYS: i64 = 365;

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub sessions: usize,
    pub seed: u64,
    /// Sessions fall in the year preceding this date.
    pub end_date: NaiveDate,
}

fn normal(mean: f64, std_dev: f64) -> ReportResult<Normal<f64>> {
    Normal::new(mean, std_dev).map_err(|e| ReportError::Generator(e.to_string()))
}

fn session(rng: &mut StdRng, cfg: &GeneratorConfig, satisfaction: &Normal<f64>) -> SessionRecord {
    let item = CATALOG[rng.random_range(0..CATALOG.len())];
    let site = SITES[rng.random_range(0..SITES.len())];
    let offset = rng.random_range(0..HISTORY_DAYS);
    let date = cfg.end_date - Duration::days(HISTORY_DAYS) + Duration::days(offset);

    let capacity: u32 = rng.random_range(8..=15);
    let registrations: u32 = rng.random_range(4..=capacity);
    let attendance: u32 = rng.random_range(registrations.saturating_sub(2)..=registrations);
    let cost = item.cost + rng.random_range(-100..=100i32) as f64;
    let price = item.price + rng.random_range(-200..=200i32) as f64;

    SessionFacts {
        training: item.training.to_string(),
        category: item.category.to_string(),
        date,
        site: site.to_string(),
        capacity,
        registrations,
        attendance,
        cost,
        price,
        satisfaction: round_to(satisfaction.sample(rng), 1),
    }
    .into()
}

/// Survey responses for one session: between `attendance - 2` (at least one)
/// and `attendance`, none when nobody attended.
fn responses(rng: &mut StdRng, s: &SessionRecord) -> ReportResult<Vec<SatisfactionResponse>> {
    if s.attendance == 0 {
        return Ok(Vec::new());
    }
    let count = rng.random_range(s.attendance.saturating_sub(2).max(1)..=s.attendance);
    let content = normal(8.0, 1.5)?;
    let instructor = normal(8.0, 1.5)?;
    let materials = normal(7.5, 1.5)?;
    let environment = normal(7.0, 1.5)?;
    let relevance = normal(7.5, 1.5)?;
    let overall = normal(s.satisfaction, 0.5)?;

    let mut out = Vec::with_capacity(count as usize);
    for _ in 0..count {
        out.push(SatisfactionResponse {
            training: s.training.clone(),
            date: s.date,
            site: s.site.clone(),
            scores: RatingScores {
                content: round_to(content.sample(rng), 1),
                instructor: round_to(instructor.sample(rng), 1),
                materials: round_to(materials.sample(rng), 1),
                environment: round_to(environment.sample(rng), 1),
                relevance: round_to(relevance.sample(rng), 1),
                overall: round_to(overall.sample(rng), 1),
            },
        });
    }
    Ok(out)
}

pub fn generate(cfg: &GeneratorConfig) -> ReportResult<SessionTable> {
    let mut rng = StdRng::seed_from_u64(cfg.seed);
    let satisfaction = normal(8.0, 1.0)?;

    let sessions: Vec<SessionRecord> = (0..cfg.sessions)
        .map(|_| session(&mut rng, cfg, &satisfaction))
        .collect();
    let mut survey = Vec::new();
    for s in &sessions {
        survey.extend(responses(&mut rng, s)?);
    }

    info!(
        sessions = sessions.len(),
        responses = survey.len(),
        seed = cfg.seed,
        "generated synthetic data"
    );
    Ok(SessionTable::new(sessions, survey))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(sessions: usize, seed: u64) -> GeneratorConfig {
        GeneratorConfig {
            sessions,
            seed,
            end_date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
        }
    }

    #[test]
    fn same_seed_same_table() {
        let a = generate(&cfg(40, 7)).unwrap();
        let b = generate(&cfg(40, 7)).unwrap();
        assert_eq!(a.sessions(), b.sessions());
        assert_eq!(a.responses(), b.responses());
    }

    #[test]
    fn generated_sessions_honor_the_invariants() {
        let table = generate(&cfg(200, 42)).unwrap();
        assert_eq!(table.len(), 200);
        let end = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        for s in table.sessions() {
            assert!(s.capacity > 0);
            assert!(s.registrations <= s.capacity);
            assert!(s.attendance <= s.registrations);
            assert!((0.0..=100.0).contains(&s.fill_rate));
            assert!(s.date < end && s.date >= end - Duration::days(HISTORY_DAYS));
            assert!(SITES.contains(&s.site.as_str()));
            assert!(CATALOG
                .iter()
                .any(|c| c.training == s.training && c.category == s.category));
        }
    }

    #[test]
    fn responses_reference_their_sessions() {
        let table = generate(&cfg(30, 3)).unwrap();
        assert!(!table.responses().is_empty());
        for r in table.responses() {
            assert!(table
                .sessions()
                .iter()
                .any(|s| s.training == r.training && s.date == r.date && s.site == r.site));
        }
    }
}
