use anyhow::{bail, Result};

use cadmetrics_settings::AnalyzerConfig;

use crate::cli::{Cli, InitConfigArgs};

pub fn run(_cli: &Cli, args: &InitConfigArgs) -> Result<()> {
    let path = match &args.path {
        Some(path) => path.clone(),
        None => AnalyzerConfig::default_path()?,
    };
    if !args.force && path.exists() {
        bail!("Refusing to overwrite existing file: {} (use --force)", path.display());
    }

    AnalyzerConfig::default().save_to_file(&path)?;
    println!("{}", path.display());
    Ok(())
}
