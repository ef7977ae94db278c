//! Check command: dry run of one xlog file.

use anyhow::{Context, Result};
use scoreboard::{BatchPolicy, ScoreboardConfig, SourceConfig, Validator};

use super::Summary;
use super::ingest::ingest_source;
use crate::cli::CheckArgs;

pub fn run(config: &ScoreboardConfig, args: CheckArgs) -> Result<()> {
    let tables = config
        .load_tables()
        .context("Failed to load label tables")?;
    let validator = Validator::new(&tables);
    let source = SourceConfig {
        server: args.server,
        variant: args.variant,
        path: args.file,
    };

    let report = ingest_source(&validator, &source, BatchPolicy::SkipInvalid)?;
    for rejection in &report.rejected {
        println!("line {}: {}", rejection.line, rejection.reason);
    }

    let mut summary = Summary {
        sources: 1,
        ..Default::default()
    };
    summary.add_report(&report);
    summary.print();
    Ok(())
}
