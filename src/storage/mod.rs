pub mod permissions;
pub mod record;

use std::{
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

use chrono::{Local, NaiveDate, NaiveDateTime};
use log::info;

use crate::error::CaptureError;
use crate::keystrokes::{Accumulator, LineSink};

use permissions::{ModeSwitch, WriteUnlock};
pub use record::{format_record, read_records, LogRecord};

pub const LOG_SUBDIR: &str = "key-stroke-logs";
const FILE_PREFIX: &str = "key-stroke-logger-";
const FILE_EXTENSION: &str = "log";

/// Outcome of a committed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlushReport {
    pub path: PathBuf,
    pub text: String,
}

/// One append-only, read-only-at-rest log file per calendar day under
/// `<output_dir>/key-stroke-logs/`.
#[derive(Debug, Clone)]
pub struct DailyLogStore {
    output_dir: PathBuf,
    modes: ModeSwitch,
}

impl DailyLogStore {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            modes: ModeSwitch::default(),
        }
    }

    /// Replaces the unlock/seal operations applied around each append.
    pub fn with_mode_switch(mut self, modes: ModeSwitch) -> Self {
        self.modes = modes;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn log_dir(&self) -> PathBuf {
        self.output_dir.join(LOG_SUBDIR)
    }

    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.log_dir()
            .join(format!("{FILE_PREFIX}{}.{FILE_EXTENSION}", date.format("%Y-%m-%d")))
    }

    /// Commits the accumulator to today's file using the local clock.
    pub fn flush(&self, accumulator: &mut Accumulator) -> Result<FlushReport, CaptureError> {
        self.flush_at(accumulator, Local::now().naive_local())
    }

    /// Appends the accumulated line stamped with `now`, clears the
    /// accumulator, then seals the file read-only.
    ///
    /// The accumulator is only cleared once the append succeeded. A seal
    /// failure is still reported, but with the accumulator already cleared.
    pub fn flush_at(
        &self,
        accumulator: &mut Accumulator,
        now: NaiveDateTime,
    ) -> Result<FlushReport, CaptureError> {
        let log_dir = self.log_dir();
        fs::create_dir_all(&log_dir).map_err(|source| CaptureError::CreateLogDir {
            path: log_dir.clone(),
            source,
        })?;

        let path = self.path_for(now.date());
        let text = accumulator.render();
        let record = format_record(now, &text);

        let unlock =
            WriteUnlock::acquire_with(&path, self.modes).map_err(|source| CaptureError::Unlock {
                path: path.clone(),
                source,
            })?;

        append(&path, &record).map_err(|source| CaptureError::Write {
            path: path.clone(),
            source,
        })?;

        accumulator.clear();

        unlock.seal().map_err(|source| CaptureError::Seal {
            path: path.clone(),
            source,
        })?;

        info!("Wrote log to {} and cleared the accumulator", path.display());
        Ok(FlushReport { path, text })
    }

    /// Log files currently on disk, oldest day first.
    pub fn list_files(&self) -> io::Result<Vec<PathBuf>> {
        let log_dir = self.log_dir();
        if !log_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(&log_dir)? {
            let path = entry?.path();
            let has_prefix = path
                .file_name()
                .and_then(|name| name.to_str())
                .map(|name| name.starts_with(FILE_PREFIX))
                .unwrap_or(false);
            let is_log = has_prefix
                && path.extension().and_then(|ext| ext.to_str()) == Some(FILE_EXTENSION);
            if is_log {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

impl LineSink for DailyLogStore {
    fn commit(&mut self, accumulator: &mut Accumulator) -> Result<FlushReport, CaptureError> {
        self.flush(accumulator)
    }
}

fn append(path: &Path, record: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(record.as_bytes())?;
    file.sync_data()
}
