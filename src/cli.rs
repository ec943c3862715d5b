use chrono::NaiveDate;
use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "training_report")]
#[command(about = "Profitability, capacity and satisfaction report for a training centre", long_about = None)]
pub struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Session CSV (synthetic data is generated when omitted)
    #[arg(long, global = true)]
    pub sessions_csv: Option<PathBuf>,

    /// Survey response CSV
    #[arg(long, global = true, requires = "sessions_csv")]
    pub responses_csv: Option<PathBuf>,

    /// Seed for synthetic data
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Number of synthetic sessions
    #[arg(long, global = true)]
    pub sessions: Option<usize>,

    /// Last day of the synthetic history (YYYY-MM-DD, defaults to today)
    #[arg(long, global = true)]
    pub end_date: Option<NaiveDate>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the management report
    Report,
    /// Print the headline KPIs
    Kpis,
    /// Preview the dashboard tables
    Tables {
        /// Rows shown per table
        #[arg(long)]
        rows: Option<usize>,
    },
    /// Aggregate sessions along one dimension (training, category, site, month)
    Group {
        key: String,
    },
    /// Metrics, sessions and (for a site) top trainings of one group
    #[command(group(
        ArgGroup::new("scope")
            .args(["training", "site"])
            .required(true)
            .multiple(false)
    ))]
    Detail {
        #[arg(long)]
        training: Option<String>,
        #[arg(long)]
        site: Option<String>,
    },
    /// Write the session table, dashboard tables and a JSON summary
    Export {
        #[arg(long)]
        out: Option<PathBuf>,
    },
}
