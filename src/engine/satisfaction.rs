use crate::types::{RatingScores, SatisfactionResponse};
use crate::util::average;
use serde::Serialize;
use std::collections::BTreeMap;

/// Mean survey scores for one training.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SatisfactionSummary {
    pub training: String,
    pub responses: usize,
    pub scores: RatingScores,
}

/// Mean of each rating dimension per training, best overall rating first.
pub fn summarize_satisfaction(responses: &[SatisfactionResponse]) -> Vec<SatisfactionSummary> {
    #[derive(Default)]
    struct Acc {
        content: Vec<f64>,
        instructor: Vec<f64>,
        materials: Vec<f64>,
        environment: Vec<f64>,
        relevance: Vec<f64>,
        overall: Vec<f64>,
    }

    let mut map: BTreeMap<&str, Acc> = BTreeMap::new();
    for r in responses {
        let e = map.entry(r.training.as_str()).or_default();
        e.content.push(r.scores.content);
        e.instructor.push(r.scores.instructor);
        e.materials.push(r.scores.materials);
        e.environment.push(r.scores.environment);
        e.relevance.push(r.scores.relevance);
        e.overall.push(r.scores.overall);
    }

    let mut rows: Vec<SatisfactionSummary> = map
        .into_iter()
        .map(|(training, acc)| SatisfactionSummary {
            training: training.to_string(),
            responses: acc.overall.len(),
            scores: RatingScores {
                content: average(&acc.content),
                instructor: average(&acc.instructor),
                materials: average(&acc.materials),
                environment: average(&acc.environment),
                relevance: average(&acc.relevance),
                overall: average(&acc.overall),
            },
        })
        .collect();
    rows.sort_by(|a, b| b.scores.overall.total_cmp(&a.scores.overall));
    rows
}
