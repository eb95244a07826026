use std::{fs, path::Path, str::FromStr};

use chrono::NaiveDateTime;

use crate::error::CaptureError;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `[<YYYY-MM-DD HH:MM:SS>] <text>\n`, second precision.
pub fn format_record(at: NaiveDateTime, text: &str) -> String {
    format!("[{}] {text}\n", at.format(TIMESTAMP_FORMAT))
}

/// One committed line read back from a log file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub timestamp: NaiveDateTime,
    pub text: String,
}

impl FromStr for LogRecord {
    type Err = CaptureError;

    fn from_str(line: &str) -> Result<Self, CaptureError> {
        let line = line.strip_suffix('\n').unwrap_or(line);
        let malformed = |reason: String| CaptureError::MalformedRecord {
            line: line.to_string(),
            reason,
        };

        let rest = line
            .strip_prefix('[')
            .ok_or_else(|| malformed("missing opening '['".into()))?;
        let (stamp, text) = rest
            .split_once("] ")
            .ok_or_else(|| malformed("missing closing '] '".into()))?;
        let timestamp = NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT)
            .map_err(|err| malformed(format!("invalid timestamp '{stamp}': {err}")))?;

        Ok(Self {
            timestamp,
            text: text.to_string(),
        })
    }
}

/// Reads every record of a log file, in append order.
pub fn read_records(path: &Path) -> Result<Vec<LogRecord>, CaptureError> {
    let contents = fs::read_to_string(path).map_err(|source| CaptureError::ReadLog {
        path: path.to_path_buf(),
        source,
    })?;

    contents.lines().map(str::parse::<LogRecord>).collect()
}
