use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::network::{RecallSummary, TrainingInfo};

pub const TRAINING_LOG: &str = "training.jsonl";
pub const RECALL_LOG: &str = "recall.jsonl";

fn timestamp_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

fn append_json_line<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    serde_json::to_writer(&mut file, value)
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
    file.write_all(b"\n")
}

#[derive(Debug, Serialize)]
pub struct TrainingLogEntry<'a> {
    pub timestamp_ms: u128,
    #[serde(flatten)]
    pub info: &'a TrainingInfo,
}

/// Append a training snapshot to `<dir>/training.jsonl`.
pub fn log_training<P: AsRef<Path>>(dir: P, info: &TrainingInfo) -> io::Result<()> {
    fs::create_dir_all(&dir)?;
    let entry = TrainingLogEntry {
        timestamp_ms: timestamp_ms(),
        info,
    };
    append_json_line(dir.as_ref().join(TRAINING_LOG), &entry)
}

#[derive(Debug, Serialize)]
pub struct RecallLogEntry {
    pub timestamp_ms: u128,
    /// Caller-chosen label, e.g. the probe's file name
    pub probe: String,
    #[serde(flatten)]
    pub summary: RecallSummary,
    /// Neurons that differ between probe and result
    pub flipped: usize,
}

/// Append one recall run to `<dir>/recall.jsonl`.
pub fn log_recall<P: AsRef<Path>>(
    dir: P,
    probe: &str,
    summary: &RecallSummary,
    flipped: usize,
) -> io::Result<()> {
    fs::create_dir_all(&dir)?;
    let entry = RecallLogEntry {
        timestamp_ms: timestamp_ms(),
        probe: probe.to_string(),
        summary: *summary,
        flipped,
    };
    append_json_line(dir.as_ref().join(RECALL_LOG), &entry)
}
