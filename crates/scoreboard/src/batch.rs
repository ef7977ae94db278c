//! Batch ingestion of xlog entries.
//!
//! Each entry runs through the [`Validator`] on its own; the only state shared
//! across a batch is the list of accepted records. What happens to a bad line
//! is decided by [`BatchPolicy`].

use std::io::BufRead;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::record::{GameRecord, IngestContext};
use crate::validate::{Clock, Validator};
use crate::xlog::{RawLogEntry, XlogReader};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Default,
    EnumString,
    IntoStaticStr,
    Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum BatchPolicy {
    /// Keep valid records, report each bad line
    #[default]
    SkipInvalid,
    /// Abort the whole batch on the first bad line
    FailFast,
}

/// A line that did not become a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub line: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub records: Vec<GameRecord>,
    pub rejected: Vec<Rejection>,
}

impl BatchReport {
    pub fn accepted(&self) -> usize {
        self.records.len()
    }

    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Validate already tokenized entries.
///
/// IO errors always abort. Record-level errors abort only under
/// [`BatchPolicy::FailFast`], wrapped in [`Error::Rejected`] with their line.
pub fn ingest_entries<C, I>(
    validator: &Validator<'_, C>,
    ctx: &IngestContext,
    entries: I,
    policy: BatchPolicy,
) -> Result<BatchReport>
where
    C: Clock,
    I: IntoIterator<Item = Result<(usize, RawLogEntry)>>,
{
    let mut report = BatchReport::default();

    for item in entries {
        let outcome = match item {
            Ok((line, entry)) => validator
                .validate(ctx, &entry)
                .map_err(|e| (line, e)),
            Err(Error::MalformedLine { line, message }) => {
                Err((line, Error::MalformedLine { line, message }))
            }
            Err(e) => return Err(e),
        };

        match outcome {
            Ok(record) => report.records.push(record),
            Err((line, e)) => match policy {
                BatchPolicy::FailFast => {
                    warn!("[{}] line {} rejected, aborting batch: {}", ctx.server, line, e);
                    return Err(match e {
                        e @ Error::MalformedLine { .. } => e,
                        e => Error::Rejected {
                            line,
                            source: Box::new(e),
                        },
                    });
                }
                BatchPolicy::SkipInvalid => {
                    warn!("[{}] line {} skipped: {}", ctx.server, line, e);
                    report.rejected.push(Rejection {
                        line,
                        reason: e.to_string(),
                    });
                }
            },
        }
    }

    info!(
        "[{}/{}] batch done: {} accepted, {} rejected",
        ctx.server,
        ctx.variant,
        report.accepted(),
        report.rejected.len()
    );
    Ok(report)
}

/// Tokenize and validate a whole stream
pub fn ingest_reader<C: Clock, R: BufRead>(
    validator: &Validator<'_, C>,
    ctx: &IngestContext,
    reader: R,
    policy: BatchPolicy,
) -> Result<BatchReport> {
    ingest_entries(validator, ctx, XlogReader::new(reader), policy)
}
