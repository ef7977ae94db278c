use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use scoreboard::{BatchPolicy, ExportFormat, JsonExporter, TsvExporter};

#[derive(Debug, Parser)]
#[command(name = "scoreboard")]
#[command(about = "Tournament scoreboard xlog ingester", version)]
pub struct Cli {
    /// Config file (defaults to ./scoreboard.toml, then the user config dir)
    #[arg(short, long, global = true, env = "SCOREBOARD_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate xlog files and append accepted games to the output
    Ingest(IngestArgs),
    /// Validate one xlog file and list every rejected line
    Check(CheckArgs),
    /// Decode a bitmask value through the loaded label tables
    Decode(DecodeArgs),
}

#[derive(Debug, Args)]
pub struct IngestArgs {
    /// Server the files belong to; required with FILES
    #[arg(long, requires = "variant")]
    pub server: Option<String>,

    #[arg(long, requires = "server")]
    pub variant: Option<String>,

    /// xlog files; the configured sources are used when empty
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    #[arg(long, value_enum)]
    pub policy: Option<PolicyArg>,

    /// Fail when a label table cannot be loaded
    #[arg(long)]
    pub strict_tables: bool,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[arg(long)]
    pub server: String,

    #[arg(long)]
    pub variant: String,
}

#[derive(Debug, Args)]
pub struct DecodeArgs {
    /// xlog field name, e.g. conduct, achieve, tnntachieve0, flags
    #[arg(long)]
    pub field: String,

    /// Decimal or 0x-prefixed hex value
    #[arg(long)]
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One JSON object per line
    Json,
    /// Tab separated with a header row
    Tsv,
}

impl OutputFormat {
    pub fn exporter(self) -> Box<dyn ExportFormat> {
        match self {
            Self::Json => Box::new(JsonExporter),
            Self::Tsv => Box::new(TsvExporter),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    SkipInvalid,
    FailFast,
}

impl From<PolicyArg> for BatchPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::SkipInvalid => BatchPolicy::SkipInvalid,
            PolicyArg::FailFast => BatchPolicy::FailFast,
        }
    }
}
