//! CLI command implementations.

pub mod check;
pub mod decode;
pub mod ingest;

use scoreboard::BatchReport;

/// Totals across every source of one run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    pub sources: usize,
    pub failed_sources: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub written: usize,
}

impl Summary {
    pub fn add_report(&mut self, report: &BatchReport) {
        self.accepted += report.accepted();
        self.rejected += report.rejected.len();
    }

    pub fn print(&self) {
        println!();
        println!("Sources:  {} ({} failed)", self.sources, self.failed_sources);
        println!("Accepted: {}", self.accepted);
        println!("Rejected: {}", self.rejected);
        println!("Written:  {}", self.written);
    }
}
