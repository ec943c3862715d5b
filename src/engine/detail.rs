//! Drill-down on one training or one site: its metrics, its sessions and,
//! for a site, the trainings that earn it the most.

use super::aggregate::{aggregate, aggregate_by_site_and_training, filter_sessions, GroupKey};
use super::ranking::{top_trainings_by_site, SITE_TOP_K};
use crate::types::{AggregatedRow, SessionRecord, SiteTrainingRow};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailScope {
    Training(String),
    Site(String),
}

impl DetailScope {
    pub fn key(&self) -> GroupKey {
        match self {
            DetailScope::Training(_) => GroupKey::Training,
            DetailScope::Site(_) => GroupKey::Site,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            DetailScope::Training(name) | DetailScope::Site(name) => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupDetail {
    pub scope: DetailScope,
    pub row: AggregatedRow,
    /// Matching sessions, oldest first.
    pub sessions: Vec<SessionRecord>,
    /// Most profitable trainings of a site; empty for a training scope.
    pub top_trainings: Vec<SiteTrainingRow>,
}

/// `None` when no session matches the scope.
pub fn group_detail(records: &[SessionRecord], scope: DetailScope) -> Option<GroupDetail> {
    let mut sessions = filter_sessions(records, scope.key(), scope.name());
    let row = aggregate(&sessions, scope.key()).into_iter().next()?;
    sessions.sort_by_key(|s| s.date);

    let top_trainings = match &scope {
        DetailScope::Site(_) => {
            top_trainings_by_site(&aggregate_by_site_and_training(&sessions), SITE_TOP_K)
                .into_iter()
                .next()
                .map(|site| site.trainings)
                .unwrap_or_default()
        }
        DetailScope::Training(_) => Vec::new(),
    };
    debug!(key = %scope.key(), name = scope.name(), sessions = sessions.len(), "group detail");

    Some(GroupDetail {
        scope,
        row,
        sessions,
        top_trainings,
    })
}
