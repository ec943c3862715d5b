use crate::dashboard::Analysis;
use crate::engine::{CommercialRow, ObjectiveRow, SatisfactionSummary};
use crate::errors::ReportResult;
use crate::table::SessionTable;
use crate::types::{
    AggregatedRow, CommercialDisplayRow, GroupMetrics, ObjectiveDisplayRow, PerformanceDisplayRow,
    SatisfactionDisplayRow, SatisfactionResponse, SessionDisplayRow, SessionRecord,
    SiteTrainingRow,
};
use crate::util::format_number;
use chrono::NaiveDate;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};
use tracing::info;

pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> ReportResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> ReportResult<()> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

/// Markdown rendering of the first `max_rows` rows.
pub fn render_table<T>(rows: &[T], max_rows: usize) -> String
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().take(max_rows).cloned().collect();
    if slice.is_empty() {
        return "(no rows)".to_string();
    }
    Table::new(slice).with(Style::markdown()).to_string()
}

pub fn preview_table_rows<T>(rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    println!("{}\n", render_table(rows, max_rows));
}

// ---------------------------------------------------------------------------
// Flat CSV records (raw numbers, no formatting)
// ---------------------------------------------------------------------------

/// One session in the column layout `loader::read_sessions` reads back,
/// followed by the derived fields.
#[derive(Debug, Serialize)]
pub struct SessionCsvRecord<'a> {
    #[serde(rename = "Training")]
    pub training: &'a str,
    #[serde(rename = "Category")]
    pub category: &'a str,
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Site")]
    pub site: &'a str,
    #[serde(rename = "Capacity")]
    pub capacity: u32,
    #[serde(rename = "Registrations")]
    pub registrations: u32,
    #[serde(rename = "Attendance")]
    pub attendance: u32,
    #[serde(rename = "Cost")]
    pub cost: f64,
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "Satisfaction")]
    pub satisfaction: f64,
    #[serde(rename = "FillRate")]
    pub fill_rate: f64,
    #[serde(rename = "AttendanceRate")]
    pub attendance_rate: f64,
    #[serde(rename = "Revenue")]
    pub revenue: f64,
    #[serde(rename = "Profit")]
    pub profit: f64,
    #[serde(rename = "NetMargin")]
    pub net_margin: f64,
}

impl<'a> From<&'a SessionRecord> for SessionCsvRecord<'a> {
    fn from(r: &'a SessionRecord) -> Self {
        Self {
            training: &r.training,
            category: &r.category,
            date: r.date,
            site: &r.site,
            capacity: r.capacity,
            registrations: r.registrations,
            attendance: r.attendance,
            cost: r.cost,
            price: r.price,
            satisfaction: r.satisfaction,
            fill_rate: r.fill_rate,
            attendance_rate: r.attendance_rate,
            revenue: r.revenue,
            profit: r.profit,
            net_margin: r.net_margin,
        }
    }
}

/// One survey response in the column layout `loader::read_responses` reads.
#[derive(Debug, Serialize)]
pub struct ResponseCsvRecord<'a> {
    #[serde(rename = "Training")]
    pub training: &'a str,
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Site")]
    pub site: &'a str,
    #[serde(rename = "Content")]
    pub content: f64,
    #[serde(rename = "Instructor")]
    pub instructor: f64,
    #[serde(rename = "Materials")]
    pub materials: f64,
    #[serde(rename = "Environment")]
    pub environment: f64,
    #[serde(rename = "Relevance")]
    pub relevance: f64,
    #[serde(rename = "Overall")]
    pub overall: f64,
}

impl<'a> From<&'a SatisfactionResponse> for ResponseCsvRecord<'a> {
    fn from(r: &'a SatisfactionResponse) -> Self {
        let s = &r.scores;
        Self {
            training: &r.training,
            date: r.date,
            site: &r.site,
            content: s.content,
            instructor: s.instructor,
            materials: s.materials,
            environment: s.environment,
            relevance: s.relevance,
            overall: s.overall,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PerformanceRecord<'a> {
    #[serde(rename = "Group")]
    pub group: &'a str,
    #[serde(rename = "Sessions")]
    pub sessions: usize,
    #[serde(rename = "Revenue")]
    pub revenue: f64,
    #[serde(rename = "Profit")]
    pub profit: f64,
    #[serde(rename = "NetMargin")]
    pub net_margin: f64,
    #[serde(rename = "Registrations")]
    pub registrations: u64,
    #[serde(rename = "Attendance")]
    pub attendance: u64,
    #[serde(rename = "Capacity")]
    pub capacity: u64,
    #[serde(rename = "FillRate")]
    pub fill_rate: f64,
    #[serde(rename = "AttendanceRate")]
    pub attendance_rate: f64,
    #[serde(rename = "Satisfaction")]
    pub satisfaction: f64,
}

impl<'a> From<&'a AggregatedRow> for PerformanceRecord<'a> {
    fn from(row: &'a AggregatedRow) -> Self {
        let m = &row.metrics;
        Self {
            group: &row.key,
            sessions: m.sessions,
            revenue: m.revenue,
            profit: m.profit,
            net_margin: m.net_margin,
            registrations: m.registrations,
            attendance: m.attendance,
            capacity: m.capacity,
            fill_rate: m.fill_rate,
            attendance_rate: m.attendance_rate,
            satisfaction: m.satisfaction,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SatisfactionRecord<'a> {
    #[serde(rename = "Training")]
    pub training: &'a str,
    #[serde(rename = "Responses")]
    pub responses: usize,
    #[serde(rename = "Content")]
    pub content: f64,
    #[serde(rename = "Instructor")]
    pub instructor: f64,
    #[serde(rename = "Materials")]
    pub materials: f64,
    #[serde(rename = "Environment")]
    pub environment: f64,
    #[serde(rename = "Relevance")]
    pub relevance: f64,
    #[serde(rename = "Overall")]
    pub overall: f64,
}

impl<'a> From<&'a SatisfactionSummary> for SatisfactionRecord<'a> {
    fn from(row: &'a SatisfactionSummary) -> Self {
        let s = &row.scores;
        Self {
            training: &row.training,
            responses: row.responses,
            content: s.content,
            instructor: s.instructor,
            materials: s.materials,
            environment: s.environment,
            relevance: s.relevance,
            overall: s.overall,
        }
    }
}

fn performance(rows: &[AggregatedRow]) -> Vec<PerformanceRecord<'_>> {
    rows.iter().map(PerformanceRecord::from).collect()
}

/// Write the session table, the dashboard tables and the summary into `dir`;
/// returns the paths written. `sessions.csv` and `responses.csv` load back
/// through `--sessions-csv` / `--responses-csv`.
pub fn export_all(table: &SessionTable, analysis: &Analysis, dir: &Path) -> ReportResult<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::new();

    let sessions: Vec<SessionCsvRecord<'_>> =
        table.sessions().iter().map(SessionCsvRecord::from).collect();
    let path = dir.join("sessions.csv");
    write_csv(&path, &sessions)?;
    written.push(path);

    let responses: Vec<ResponseCsvRecord<'_>> =
        table.responses().iter().map(ResponseCsvRecord::from).collect();
    let path = dir.join("responses.csv");
    write_csv(&path, &responses)?;
    written.push(path);

    let tables: [(&str, Vec<PerformanceRecord<'_>>); 4] = [
        ("training_profitability.csv", performance(&analysis.by_training)),
        ("top_trainings.csv", performance(&analysis.top_trainings)),
        ("site_performance.csv", performance(&analysis.by_site)),
        ("monthly_performance.csv", performance(&analysis.monthly)),
    ];
    for (name, rows) in &tables {
        let path = dir.join(name);
        write_csv(&path, rows)?;
        written.push(path);
    }

    let satisfaction: Vec<SatisfactionRecord<'_>> =
        analysis.satisfaction.iter().map(SatisfactionRecord::from).collect();
    let path = dir.join("satisfaction.csv");
    write_csv(&path, &satisfaction)?;
    written.push(path);

    let path = dir.join("summary.json");
    write_json(&path, &analysis.dashboard())?;
    written.push(path);

    info!(dir = %dir.display(), files = written.len(), "exported report tables");
    Ok(written)
}

// ---------------------------------------------------------------------------
// Display rows
// ---------------------------------------------------------------------------

fn performance_row(group: &str, m: &GroupMetrics) -> PerformanceDisplayRow {
    PerformanceDisplayRow {
        group: group.to_string(),
        sessions: m.sessions,
        revenue: format_number(m.revenue, 2),
        profit: format_number(m.profit, 2),
        net_margin: format_number(m.net_margin, 1),
        registrations: m.registrations,
        fill_rate: format_number(m.fill_rate, 1),
        attendance_rate: format_number(m.attendance_rate, 1),
        satisfaction: format_number(m.satisfaction, 1),
    }
}

pub fn performance_rows(rows: &[AggregatedRow]) -> Vec<PerformanceDisplayRow> {
    rows.iter().map(|r| performance_row(&r.key, &r.metrics)).collect()
}

/// Per-site training rows, labelled by training.
pub fn site_training_rows(rows: &[SiteTrainingRow]) -> Vec<PerformanceDisplayRow> {
    rows.iter().map(|r| performance_row(&r.training, &r.metrics)).collect()
}

pub fn session_rows(rows: &[SessionRecord]) -> Vec<SessionDisplayRow> {
    rows.iter()
        .map(|r| SessionDisplayRow {
            date: r.date.format("%Y-%m-%d").to_string(),
            training: r.training.clone(),
            site: r.site.clone(),
            registrations: r.registrations,
            attendance: r.attendance,
            fill_rate: format_number(r.fill_rate, 1),
            revenue: format_number(r.revenue, 2),
            profit: format_number(r.profit, 2),
            net_margin: format_number(r.net_margin, 1),
            satisfaction: format_number(r.satisfaction, 1),
        })
        .collect()
}

pub fn satisfaction_rows(rows: &[SatisfactionSummary]) -> Vec<SatisfactionDisplayRow> {
    rows.iter()
        .map(|r| SatisfactionDisplayRow {
            training: r.training.clone(),
            responses: r.responses,
            content: format_number(r.scores.content, 1),
            instructor: format_number(r.scores.instructor, 1),
            materials: format_number(r.scores.materials, 1),
            environment: format_number(r.scores.environment, 1),
            relevance: format_number(r.scores.relevance, 1),
            overall: format_number(r.scores.overall, 1),
        })
        .collect()
}

pub fn commercial_rows(rows: &[CommercialRow]) -> Vec<CommercialDisplayRow> {
    rows.iter()
        .map(|r| CommercialDisplayRow {
            site: r.site.clone(),
            conversion_rate: format_number(r.conversion_rate, 1),
            presence_rate: format_number(r.presence_rate, 1),
            revenue_per_registrant: format_number(r.revenue_per_registrant, 2),
        })
        .collect()
}

pub fn objective_rows(rows: &[ObjectiveRow]) -> Vec<ObjectiveDisplayRow> {
    rows.iter()
        .map(|r| ObjectiveDisplayRow {
            site: r.site.clone(),
            revenue: format_number(r.revenue, 2),
            revenue_objective: format_number(r.revenue_objective, 2),
            revenue_attainment: format_number(r.revenue_attainment, 1),
            registrations: r.registrations,
            registrations_objective: format_number(r.registrations_objective, 1),
            registrations_attainment: format_number(r.registrations_attainment, 1),
        })
        .collect()
}
