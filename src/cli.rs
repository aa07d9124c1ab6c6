use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "statuschart")]
#[command(about = "Issue status transition time-series analyzer", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Aggregate a CSV export of status events into per-status time series
    Analyze {
        /// CSV file to analyze (columns: Issue Key, Date, Status)
        file: PathBuf,

        /// Aggregation mode
        #[arg(short, long, value_enum, default_value = "cumulative")]
        mode: Mode,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Status registry file (defaults to statuschart.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Treat this instant as "now" when closing open intervals
        /// (e.g. 2024-06-01T00:00:00; defaults to the local wall clock)
        #[arg(long)]
        now: Option<chrono::NaiveDateTime>,
    },

    /// Write a statuschart.toml with the default status registry
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    Cumulative,
    Event,
}

impl From<Mode> for crate::core::AggregationMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Cumulative => crate::core::AggregationMode::Cumulative,
            Mode::Event => crate::core::AggregationMode::Event,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Json => crate::io::output::OutputFormat::Json,
            OutputFormat::Markdown => crate::io::output::OutputFormat::Markdown,
            OutputFormat::Terminal => crate::io::output::OutputFormat::Terminal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn mode_converts_to_core() {
        assert_eq!(
            crate::core::AggregationMode::from(Mode::Cumulative),
            crate::core::AggregationMode::Cumulative
        );
        assert_eq!(
            crate::core::AggregationMode::from(Mode::Event),
            crate::core::AggregationMode::Event
        );
    }

    #[test]
    fn format_converts_to_io() {
        assert_eq!(
            crate::io::output::OutputFormat::from(OutputFormat::Json),
            crate::io::output::OutputFormat::Json
        );
    }
}
