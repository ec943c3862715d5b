//! Reporting engine for a multi-site vocational training provider.
//!
//! A [`table::SessionTable`] is built once (from CSV or the synthetic
//! generator) and handed by reference to the [`engine`], whose pure
//! functions produce the aggregates, ratios, flags and rankings. The
//! console report, the table previews and the CSV/JSON export are thin
//! adapters over one [`dashboard::Analysis`].

pub mod cli;
pub mod config;
pub mod dashboard;
pub mod engine;
pub mod errors;
pub mod generator;
pub mod loader;
pub mod output;
pub mod report;
pub mod table;
pub mod types;
pub mod util;

use cli::{Cli, Commands};
use config::ReportConfig;
use dashboard::Analysis;
use engine::DetailScope;
use errors::ReportResult;
use generator::GeneratorConfig;
use table::SessionTable;
use tracing::{info, warn};

/// Merge command-line overrides into the file (or default) configuration.
pub fn resolve_config(cli: &Cli) -> ReportResult<ReportConfig> {
    let mut cfg = ReportConfig::load(cli.config.as_deref())?;
    if let Some(path) = &cli.sessions_csv {
        cfg.sessions_csv = Some(path.clone());
        cfg.responses_csv = cli.responses_csv.clone();
    }
    if let Some(seed) = cli.seed {
        cfg.seed = seed;
    }
    if let Some(sessions) = cli.sessions {
        cfg.sessions = sessions;
    }
    if let Some(end_date) = cli.end_date {
        cfg.end_date = Some(end_date);
    }
    cfg.validate()?;
    Ok(cfg)
}

/// Build the session table once: from CSV when configured, otherwise from
/// the seeded generator. The generated history ends on `cfg.end_date`, or
/// today when it is unset.
pub fn load_table(cfg: &ReportConfig) -> ReportResult<SessionTable> {
    match &cfg.sessions_csv {
        Some(path) => {
            let (sessions, _) = loader::load_sessions(path)?;
            let responses = match &cfg.responses_csv {
                Some(p) => loader::load_responses(p)?.0,
                None => Vec::new(),
            };
            Ok(SessionTable::new(sessions, responses))
        }
        None => generator::generate(&GeneratorConfig {
            sessions: cfg.sessions,
            seed: cfg.seed,
            end_date: cfg
                .end_date
                .unwrap_or_else(|| chrono::Local::now().date_naive()),
        }),
    }
}

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &ReportConfig, table: &SessionTable) -> ReportResult<()> {
    match &cli.command {
        Commands::Report => {
            let analysis = Analysis::compute(table);
            print!("{}", report::build_management_report(&analysis));
        }
        Commands::Kpis => {
            let kpis = engine::compute_kpis(table.sessions());
            print!("{}", report::kpi_snapshot(&kpis));
        }
        Commands::Tables { rows } => {
            let rows = rows.unwrap_or(cfg.preview_rows);
            let analysis = Analysis::compute(table);
            println!("Top trainings by profit\n");
            output::preview_table_rows(&output::performance_rows(&analysis.top_trainings), rows);
            println!("Performance by category\n");
            output::preview_table_rows(&output::performance_rows(&analysis.by_category), rows);
            println!("Performance by site\n");
            output::preview_table_rows(&output::performance_rows(&analysis.by_site), rows);
            println!("Commercial performance\n");
            output::preview_table_rows(&output::commercial_rows(&analysis.commercial), rows);
            println!("Objectives vs actuals\n");
            output::preview_table_rows(&output::objective_rows(&analysis.objectives), rows);
            println!("Satisfaction by training\n");
            output::preview_table_rows(&output::satisfaction_rows(&analysis.satisfaction), rows);
        }
        Commands::Group { key } => {
            let grouped = engine::aggregate_by(table.sessions(), key)?;
            output::preview_table_rows(&output::performance_rows(&grouped), grouped.len());
        }
        Commands::Detail { training, site } => {
            let scope = match (training, site) {
                (Some(name), _) => DetailScope::Training(name.clone()),
                (None, Some(name)) => DetailScope::Site(name.clone()),
                (None, None) => {
                    return Err(errors::ReportError::Config(
                        "detail needs --training or --site".to_string(),
                    ))
                }
            };
            match engine::group_detail(table.sessions(), scope.clone()) {
                Some(detail) => print!("{}", report::build_detail(&detail)),
                None => println!("No sessions found for {} '{}'.", scope.key(), scope.name()),
            }
        }
        Commands::Export { out } => {
            let dir = out.clone().unwrap_or_else(|| cfg.output_dir.clone());
            let analysis = Analysis::compute(table);
            for path in output::export_all(table, &analysis, &dir)? {
                println!("Wrote {}", path.display());
            }
        }
    }
    Ok(())
}

pub fn run(cli: &Cli) -> ReportResult<()> {
    let cfg = resolve_config(cli)?;
    let table = load_table(&cfg)?;
    if table.is_empty() {
        warn!("session table is empty; every section will report none found");
    } else {
        info!(sessions = table.len(), responses = table.responses().len(), "session table ready");
    }
    dispatch(cli, &cfg, &table)
}
