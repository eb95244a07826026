use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("the directory '{}' does not exist", .0.display())]
    InvalidOutputDir(PathBuf),

    #[error("invalid settings file {}: {reason}", .path.display())]
    Settings { path: PathBuf, reason: String },

    #[error("failed to register the keyboard hook: {0}")]
    Hook(String),

    #[error("failed to create log directory {}", .path.display())]
    CreateLogDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to make {} writable", .path.display())]
    Unlock {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to append to {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("line written but {} could not be made read-only", .path.display())]
    Seal {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read log file {}", .path.display())]
    ReadLog {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed log record '{line}': {reason}")]
    MalformedRecord { line: String, reason: String },
}

impl CaptureError {
    /// Startup errors end the process; flush errors only cost one commit.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            CaptureError::InvalidOutputDir(_) | CaptureError::Settings { .. } | CaptureError::Hook(_)
        )
    }

    /// Whether the line reached the log file despite the error.
    pub fn line_written(&self) -> bool {
        matches!(self, CaptureError::Seal { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flush_errors_are_recoverable() {
        let err = CaptureError::Write {
            path: PathBuf::from("/tmp/x.log"),
            source: io::Error::new(io::ErrorKind::Other, "disk full"),
        };
        assert!(!err.is_fatal());
        assert!(!err.line_written());
        assert!(CaptureError::Hook("denied".into()).is_fatal());
    }

    #[test]
    fn only_seal_failures_report_a_written_line() {
        let io_err = || io::Error::new(io::ErrorKind::PermissionDenied, "chmod refused");
        let seal = CaptureError::Seal {
            path: PathBuf::from("/tmp/x.log"),
            source: io_err(),
        };
        let unlock = CaptureError::Unlock {
            path: PathBuf::from("/tmp/x.log"),
            source: io_err(),
        };
        assert!(seal.line_written());
        assert!(!seal.is_fatal());
        assert!(!unlock.line_written());
        assert!(!unlock.is_fatal());
    }

    #[test]
    fn messages_name_the_path() {
        let err = CaptureError::InvalidOutputDir(PathBuf::from("/nope"));
        assert_eq!(err.to_string(), "the directory '/nope' does not exist");
    }
}
