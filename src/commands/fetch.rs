use anyhow::Result;

use cadmetrics_analyzer::{AnalyzerState, ExtractionRequest, ExtractionSource, HttpExtractionClient};
use cadmetrics_settings::AnalyzerConfig;

use crate::cli::{Cli, LayersArgs, ProcessArgs};
use crate::commands::finish_session;

fn client(config: &AnalyzerConfig) -> Result<HttpExtractionClient> {
    Ok(HttpExtractionClient::new(
        config.extraction.service_url.clone(),
        config.service_timeout(),
    )?)
}

pub fn layers(cli: &Cli, args: &LayersArgs) -> Result<()> {
    let config = AnalyzerConfig::load_or_default(cli.config.as_deref())?;
    let request = ExtractionRequest::new(&args.drawing, Vec::new())?;
    for layer in client(&config)?.layers(&request)? {
        println!("{}", layer);
    }
    Ok(())
}

pub fn process(cli: &Cli, args: &ProcessArgs) -> Result<()> {
    let config = AnalyzerConfig::load_or_default(cli.config.as_deref())?;
    let mut state = AnalyzerState::new(config.analyzer_options()?);
    let request = ExtractionRequest::new(&args.drawing, args.layers.clone())?;

    state.load_from(&client(&config)?, &request)?;

    let stdout = std::io::stdout();
    finish_session(&mut state, &config, &args.output, &mut stdout.lock())?;
    Ok(())
}
