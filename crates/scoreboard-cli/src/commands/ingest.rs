//! Ingest command: validate xlog sources and append accepted games.

use std::fs::File;
use std::io::BufReader;

use anyhow::{Context, Result, bail};
use scoreboard::{
    BatchPolicy, BatchReport, Clock, FileSink, RecordSink, ScoreboardConfig, SourceConfig,
    Validator, ingest_reader,
};
use tracing::{error, info};

use super::Summary;
use crate::cli::IngestArgs;

pub fn run(config: &ScoreboardConfig, args: IngestArgs) -> Result<Summary> {
    let mut config = config.clone();
    if args.strict_tables {
        config.strict_tables = true;
    }
    if let Some(policy) = args.policy {
        config.batch_policy = policy.into();
    }
    if let Some(output) = args.output {
        config.output_path = output;
    }

    let sources = resolve_sources(&config, args.server, args.variant, args.files)?;
    let tables = config
        .load_tables()
        .context("Failed to load label tables")?;
    let validator = Validator::new(&tables);
    let mut sink = FileSink::new(&config.output_path, args.format.exporter());

    info!(
        "Ingesting {} source(s) into {} ({})",
        sources.len(),
        sink.path().display(),
        config.batch_policy
    );

    let mut summary = Summary::default();
    let mut aborted = None;

    for source in &sources {
        summary.sources += 1;
        let result = ingest_source(&validator, source, config.batch_policy).and_then(|report| {
            summary.add_report(&report);
            sink.insert_many(&report.records)
                .context("Failed to write records")
        });

        match result {
            Ok(written) => summary.written += written,
            Err(e) => {
                error!("[{}] {}: {:#}", source.server, source.path.display(), e);
                summary.failed_sources += 1;
                if config.batch_policy == BatchPolicy::FailFast && aborted.is_none() {
                    aborted = Some(source.path.clone());
                }
            }
        }
    }

    if let Some(path) = aborted {
        summary.print();
        bail!("Fail-fast batch aborted on {}", path.display());
    }
    Ok(summary)
}

pub(crate) fn ingest_source<C: Clock>(
    validator: &Validator<'_, C>,
    source: &SourceConfig,
    policy: BatchPolicy,
) -> Result<BatchReport> {
    let file = File::open(&source.path)
        .with_context(|| format!("Failed to open {}", source.path.display()))?;
    let report = ingest_reader(validator, &source.context(), BufReader::new(file), policy)?;
    Ok(report)
}

fn resolve_sources(
    config: &ScoreboardConfig,
    server: Option<String>,
    variant: Option<String>,
    files: Vec<std::path::PathBuf>,
) -> Result<Vec<SourceConfig>> {
    if files.is_empty() {
        if config.sources.is_empty() {
            bail!(
                "No xlog sources: pass FILES with --server/--variant or add [[sources]] to the config"
            );
        }
        return Ok(config.sources.clone());
    }

    let (Some(server), Some(variant)) = (server, variant) else {
        bail!("--server and --variant are required when FILES are given");
    };
    Ok(files
        .into_iter()
        .map(|path| SourceConfig {
            server: server.clone(),
            variant: variant.clone(),
            path,
        })
        .collect())
}
