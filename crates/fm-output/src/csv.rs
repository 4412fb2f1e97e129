//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `tick_summaries.csv`
//! - `agent_snapshots.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::{AgentSnapshotRow, OutputResult, TickSummaryRow};
use crate::writer::OutputWriter;

pub const TICK_SUMMARY_HEADER: [&str; 8] = [
    "tick",
    "unbooked_loads",
    "unbooked_roll_total",
    "unbooked_roll_mean",
    "idle_carriers",
    "searching",
    "deadheading",
    "in_transit",
];

pub const AGENT_SNAPSHOT_HEADER: [&str; 6] =
    ["tick", "agent_kind", "agent_id", "loads_moved", "status", "earnings"];

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create the two CSV files in `dir` (which must exist) and write the
    /// header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(TICK_SUMMARY_HEADER)?;

        let mut snapshots = Writer::from_path(dir.join("agent_snapshots.csv"))?;
        snapshots.write_record(AGENT_SNAPSHOT_HEADER)?;

        Ok(Self {
            snapshots,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.tick.to_string(),
                row.kind.as_str().to_owned(),
                row.agent_id.to_string(),
                row.loads_moved.to_string(),
                row.status.map(|s| s.as_str()).unwrap_or_default().to_owned(),
                row.earnings.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.unbooked_loads.to_string(),
            row.unbooked_roll_total.to_string(),
            row.unbooked_roll_mean.to_string(),
            row.idle_carriers.to_string(),
            row.searching.to_string(),
            row.deadheading.to_string(),
            row.in_transit.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.summaries.flush()?;
        self.snapshots.flush()?;
        Ok(())
    }
}
