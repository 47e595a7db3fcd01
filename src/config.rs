use std::path::PathBuf;

use clap::builder::RangedU64ValueParser;
use clap::{Args, Parser, Subcommand};

use crate::data::filter::{FilterCriteria, ALL};
use crate::data::summary::DEFAULT_TOP_N;

/// Environment variable naming an extra dataset location.
pub const DATA_ENV_VAR: &str = "SALARY_DASH_DATA";

/// Built-in dataset locations, checked in order after any explicit ones.
pub const DEFAULT_CANDIDATES: [&str; 3] = [
    "Data Science Jobs Salaries.csv",
    "data_science_jobs_salaries.csv",
    "/mnt/data/Data Science Jobs Salaries.csv",
];

#[derive(Parser, Debug)]
#[command(
    name = "salary-dash",
    about = "Explore data science job salaries: filters, KPIs, charts and CSV export",
    version
)]
pub struct Cli {
    /// Dataset file to try before the defaults (repeatable)
    #[arg(long = "data", global = true)]
    pub data: Vec<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open the interactive dashboard (default command)
    Gui(GuiArgs),
    /// Print the summary and chart aggregates as JSON
    Summary(FilterArgs),
    /// Write the filtered rows as CSV
    Export {
        #[command(flatten)]
        filters: FilterArgs,
        /// Output file
        #[arg(long, short)]
        out: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct GuiArgs {
    /// Initial number of job titles in the ranking
    #[arg(long, default_value_t = DEFAULT_TOP_N, value_parser = top_n_parser())]
    pub top_n: usize,
}

impl Default for GuiArgs {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
        }
    }
}

fn top_n_parser() -> RangedU64ValueParser<usize> {
    RangedU64ValueParser::<usize>::new().range(1..)
}

#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// Work year, or "All"
    #[arg(long, default_value = ALL)]
    pub year: String,
    /// Experience label (Entry, Mid, Senior, Exec), or "All"
    #[arg(long, default_value = ALL)]
    pub experience: String,
    /// Remote label (On-site, Hybrid, Remote), or "All"
    #[arg(long, default_value = ALL)]
    pub remote: String,
    /// Number of job titles in the ranking
    #[arg(long, default_value_t = DEFAULT_TOP_N, value_parser = top_n_parser())]
    pub top_n: usize,
}

impl FilterArgs {
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::from_options(&self.year, &self.experience, &self.remote)
    }
}

/// Candidate dataset paths in priority order: CLI, environment, defaults.
pub fn candidate_paths(explicit: &[PathBuf], env_value: Option<String>) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = explicit.to_vec();
    if let Some(value) = env_value.filter(|v| !v.trim().is_empty()) {
        paths.push(PathBuf::from(value));
    }
    paths.extend(DEFAULT_CANDIDATES.iter().map(PathBuf::from));
    paths
}

impl Cli {
    /// Resolve the candidate list, reading `.env` and the environment.
    pub fn candidates(&self) -> Vec<PathBuf> {
        dotenvy::dotenv().ok();
        candidate_paths(&self.data, std::env::var(DATA_ENV_VAR).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_then_env_then_defaults() {
        let paths = candidate_paths(&[PathBuf::from("mine.csv")], Some("env.csv".into()));
        assert_eq!(paths[0], PathBuf::from("mine.csv"));
        assert_eq!(paths[1], PathBuf::from("env.csv"));
        assert_eq!(paths[2], PathBuf::from("Data Science Jobs Salaries.csv"));
        assert_eq!(paths.len(), 5);
    }

    #[test]
    fn blank_env_value_is_ignored() {
        let paths = candidate_paths(&[], Some("  ".into()));
        assert_eq!(paths.len(), DEFAULT_CANDIDATES.len());
    }

    #[test]
    fn summary_filters_parse_into_criteria() {
        let cli = Cli::parse_from([
            "salary-dash",
            "summary",
            "--year",
            "2021",
            "--experience",
            "Senior",
            "--top-n",
            "8",
        ]);
        match cli.command {
            Some(Command::Summary(args)) => {
                let criteria = args.criteria();
                assert_eq!(criteria.year, Some(2021));
                assert_eq!(criteria.experience.as_deref(), Some("Senior"));
                assert_eq!(criteria.remote, None);
                assert_eq!(args.top_n, 8);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn zero_top_n_is_rejected() {
        let result = Cli::try_parse_from(["salary-dash", "summary", "--top-n", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn data_flag_is_global_and_repeatable() {
        let cli = Cli::parse_from(["salary-dash", "gui", "--data", "a.csv", "--data", "b.csv"]);
        assert_eq!(cli.data, vec![PathBuf::from("a.csv"), PathBuf::from("b.csv")]);
    }
}
