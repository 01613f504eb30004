use clap::Parser;

use cadmetrics::cli::{Cli, Commands};
use cadmetrics::commands::{analyze, config};
use cadmetrics::init_logging_with_level;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging_with_level(cli.log_level())?;

    match &cli.command {
        Commands::Analyze(args) => analyze::run(&cli, args),
        Commands::InitConfig(args) => config::run(&cli, args),
        #[cfg(feature = "http")]
        Commands::Layers(args) => cadmetrics::commands::fetch::layers(&cli, args),
        #[cfg(feature = "http")]
        Commands::Process(args) => cadmetrics::commands::fetch::process(&cli, args),
    }
}
