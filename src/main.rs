use anyhow::Result;
use clap::Parser;
use statuschart::cli::{Cli, Commands};
use statuschart::commands::analyze::{analyze, AnalyzeConfig};

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            file,
            mode,
            format,
            output,
            config,
            now,
        } => analyze(AnalyzeConfig {
            file,
            mode: mode.into(),
            format: format.into(),
            output,
            config,
            now,
        }),
        Commands::Init { force } => statuschart::commands::init::init_config(force),
    }
}
