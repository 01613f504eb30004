use std::path::PathBuf;

/// Site and building area analysis (argument schema only)
#[derive(clap::Parser, Debug)]
#[command(name = "cadmetrics", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (.toml or .json); defaults to the platform config directory
    #[arg(short, long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Analyze a saved extraction response
    Analyze(AnalyzeArgs),

    /// Write a default config file
    InitConfig(InitConfigArgs),

    /// List the layers of a drawing via the extraction service
    #[cfg(feature = "http")]
    Layers(LayersArgs),

    /// Extract a drawing via the extraction service and analyze it
    #[cfg(feature = "http")]
    Process(ProcessArgs),
}

/// Selection script and report outputs shared by the analysis commands.
#[derive(clap::Args, Debug, Default)]
pub struct OutputArgs {
    /// JSON array of analyzer commands to replay after loading
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub script: Option<PathBuf>,

    /// Write an SVG preview
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub svg: Option<PathBuf>,

    /// Write a PNG preview
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub png: Option<PathBuf>,

    /// Print the report as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args, Debug)]
pub struct AnalyzeArgs {
    /// Saved `/cad/process` response body
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub response: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(clap::Args, Debug)]
pub struct InitConfigArgs {
    /// Target file; defaults to the platform config path
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub path: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

#[cfg(feature = "http")]
#[derive(clap::Args, Debug)]
pub struct LayersArgs {
    /// DXF or DWG drawing
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub drawing: PathBuf,
}

#[cfg(feature = "http")]
#[derive(clap::Args, Debug)]
pub struct ProcessArgs {
    /// DXF or DWG drawing
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub drawing: PathBuf,

    /// Layers to extract (comma separated); all layers when omitted
    #[arg(short, long, value_delimiter = ',')]
    pub layers: Vec<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}
