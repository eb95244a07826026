use log::LevelFilter;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::CaptureError;

/// Optional JSON settings file. Every field may be omitted.
///
/// ```json
/// { "outputFolder": "/home/me/logs", "logLevel": "debug" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub output_folder: Option<PathBuf>,
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, CaptureError> {
        let invalid = |reason: String| CaptureError::Settings {
            path: path.to_path_buf(),
            reason,
        };

        let contents = fs::read_to_string(path).map_err(|err| invalid(err.to_string()))?;
        let settings: Settings =
            serde_json::from_str(&contents).map_err(|err| invalid(err.to_string()))?;

        if let Some(level) = &settings.log_level {
            level
                .parse::<LevelFilter>()
                .map_err(|_| invalid(format!("unknown log level '{level}'")))?;
        }
        Ok(settings)
    }

    pub fn level_filter(&self) -> Option<LevelFilter> {
        self.log_level.as_deref().and_then(|level| level.parse().ok())
    }
}
