use anyhow::{Context, Result};

use cadmetrics_analyzer::{AnalyzerState, FileExtractionSource};
use cadmetrics_settings::AnalyzerConfig;

use crate::cli::{AnalyzeArgs, Cli};
use crate::commands::{finish_session, Report};

pub fn run(cli: &Cli, args: &AnalyzeArgs) -> Result<()> {
    let stdout = std::io::stdout();
    run_with_output(cli, args, &mut stdout.lock()).map(|_| ())
}

pub fn run_with_output(
    cli: &Cli,
    args: &AnalyzeArgs,
    out: &mut impl std::io::Write,
) -> Result<Report> {
    let config = AnalyzerConfig::load_or_default(cli.config.as_deref())?;
    let mut state = AnalyzerState::new(config.analyzer_options()?);

    let source = FileExtractionSource::new(&args.response);
    let response = source
        .response()
        .with_context(|| format!("load response {}", args.response.display()))?;
    state.load_response(&response);

    finish_session(&mut state, &config, &args.output, out)
}
