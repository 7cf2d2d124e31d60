//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `trials.csv`  — one row per trial
//! - `events.csv`  — one row per event occurrence (empty `t_end` marks the
//!   event's data missing for that trial)
//! - `samples.csv` — one row per measurement sample

use std::fs::File;
use std::path::Path;

use csv::Writer;

use bx_session::TrialRecord;

use crate::writer::TrialWriter;
use crate::OutputResult;

/// Writes session output to three CSV files.
pub struct CsvWriter {
    trials:   Writer<File>,
    events:   Writer<File>,
    samples:  Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the three CSV files in `dir` and write the header
    /// rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut trials = Writer::from_path(dir.join("trials.csv"))?;
        trials.write_record(["trial", "name", "t_start", "t_end"])?;

        let mut events = Writer::from_path(dir.join("events.csv"))?;
        events.write_record(["trial", "event", "t_start", "t_end", "error"])?;

        let mut samples = Writer::from_path(dir.join("samples.csv"))?;
        samples.write_record(["trial", "measurement", "t", "value"])?;

        Ok(Self { trials, events, samples, finished: false })
    }
}

impl TrialWriter for CsvWriter {
    fn write_trial(&mut self, record: &TrialRecord) -> OutputResult<()> {
        self.trials.write_record(&[
            record.index.to_string(),
            record.name.clone(),
            record.t_start.to_string(),
            record.t_end.to_string(),
        ])?;

        for event in &record.events {
            self.events.write_record(&[
                record.index.to_string(),
                event.name.clone(),
                event.t_start.map(|t| t.to_string()).unwrap_or_default(),
                event.t_end.map(|t| t.to_string()).unwrap_or_default(),
                event.error.clone().unwrap_or_default(),
            ])?;
        }

        for trace in &record.measurements {
            for (t, value) in trace.t.iter().zip(&trace.values) {
                self.samples.write_record(&[
                    record.index.to_string(),
                    trace.name.clone(),
                    t.to_string(),
                    value.to_string(),
                ])?;
            }
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.trials.flush()?;
        self.events.flush()?;
        self.samples.flush()?;
        Ok(())
    }
}
