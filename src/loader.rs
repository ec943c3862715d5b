use crate::errors::ReportResult;
use crate::types::{
    RatingScores, RawResponseRow, RawSessionRow, SatisfactionResponse, SessionFacts, SessionRecord,
};
use crate::util::{parse_date_safe, parse_f64_safe, parse_u32_safe};
use csv::ReaderBuilder;
use std::io;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub total_rows: usize,
    pub loaded_rows: usize,
    pub parse_errors: usize,
}

fn text(field: Option<String>) -> Option<String> {
    let s = field?.trim().to_string();
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

fn session_from_raw(row: RawSessionRow) -> Option<SessionRecord> {
    let facts = SessionFacts {
        training: text(row.training)?,
        category: text(row.category).unwrap_or_else(|| "Uncategorized".to_string()),
        date: parse_date_safe(row.date.as_deref())?,
        site: text(row.site)?,
        capacity: parse_u32_safe(row.capacity.as_deref())?,
        registrations: parse_u32_safe(row.registrations.as_deref())?,
        attendance: parse_u32_safe(row.attendance.as_deref())?,
        cost: parse_f64_safe(row.cost.as_deref())?,
        price: parse_f64_safe(row.price.as_deref())?,
        satisfaction: parse_f64_safe(row.satisfaction.as_deref())?,
    };
    Some(facts.into())
}

fn response_from_raw(row: RawResponseRow) -> Option<SatisfactionResponse> {
    Some(SatisfactionResponse {
        training: text(row.training)?,
        date: parse_date_safe(row.date.as_deref())?,
        site: text(row.site)?,
        scores: RatingScores {
            content: parse_f64_safe(row.content.as_deref())?,
            instructor: parse_f64_safe(row.instructor.as_deref())?,
            materials: parse_f64_safe(row.materials.as_deref())?,
            environment: parse_f64_safe(row.environment.as_deref())?,
            relevance: parse_f64_safe(row.relevance.as_deref())?,
            overall: parse_f64_safe(row.overall.as_deref())?,
        },
    })
}

/// Read session rows, skipping (and counting) rows that fail to parse.
///
/// Rows are trusted to honor the session invariants; nothing is clamped.
pub fn read_sessions<R: io::Read>(reader: R) -> ReportResult<(Vec<SessionRecord>, LoadReport)> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
    let mut report = LoadReport::default();
    let mut sessions = Vec::new();

    for result in rdr.deserialize::<RawSessionRow>() {
        report.total_rows += 1;
        match result.ok().and_then(session_from_raw) {
            Some(r) => sessions.push(r),
            None => report.parse_errors += 1,
        }
    }
    report.loaded_rows = sessions.len();
    Ok((sessions, report))
}

pub fn read_responses<R: io::Read>(
    reader: R,
) -> ReportResult<(Vec<SatisfactionResponse>, LoadReport)> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
    let mut report = LoadReport::default();
    let mut responses = Vec::new();

    for result in rdr.deserialize::<RawResponseRow>() {
        report.total_rows += 1;
        match result.ok().and_then(response_from_raw) {
            Some(r) => responses.push(r),
            None => report.parse_errors += 1,
        }
    }
    report.loaded_rows = responses.len();
    Ok((responses, report))
}

pub fn load_sessions(path: &Path) -> ReportResult<(Vec<SessionRecord>, LoadReport)> {
    let file = std::fs::File::open(path)?;
    let (sessions, report) = read_sessions(file)?;
    log_report("sessions", path, &report);
    Ok((sessions, report))
}

pub fn load_responses(path: &Path) -> ReportResult<(Vec<SatisfactionResponse>, LoadReport)> {
    let file = std::fs::File::open(path)?;
    let (responses, report) = read_responses(file)?;
    log_report("responses", path, &report);
    Ok((responses, report))
}

fn log_report(kind: &str, path: &Path, report: &LoadReport) {
    info!(
        kind,
        path = %path.display(),
        total = report.total_rows,
        loaded = report.loaded_rows,
        "loaded csv"
    );
    if report.parse_errors > 0 {
        warn!(kind, skipped = report.parse_errors, "rows skipped due to parse errors");
    }
}
