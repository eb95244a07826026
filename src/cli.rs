use clap::Parser;
use log::LevelFilter;
use std::path::{Path, PathBuf};

use crate::error::CaptureError;
use crate::settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "keystroke-logger")]
#[command(about = "Logs the keys pressed by the user to a log file.")]
pub struct Cli {
    /// The directory where the key stroke logs are written [default: system temp dir]
    #[arg(short, long, value_name = "DIR")]
    pub output_folder: Option<PathBuf>,

    /// JSON settings file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Debug-level diagnostics
    #[arg(short, long)]
    pub verbose: bool,
}

/// Everything the capture needs once arguments and settings are merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub output_dir: PathBuf,
    pub log_level: LevelFilter,
}

impl Cli {
    /// Merges flags over the settings file over defaults, then validates the
    /// output directory.
    pub fn resolve(&self) -> Result<RunConfig, CaptureError> {
        let settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };

        let output_dir = self
            .output_folder
            .clone()
            .or_else(|| settings.output_folder.clone())
            .unwrap_or_else(std::env::temp_dir);

        let log_level = if self.verbose {
            LevelFilter::Debug
        } else {
            settings.level_filter().unwrap_or(LevelFilter::Info)
        };

        Ok(RunConfig {
            output_dir: validate_output_dir(&output_dir)?,
            log_level,
        })
    }
}

pub fn validate_output_dir(path: &Path) -> Result<PathBuf, CaptureError> {
    if !path.is_dir() {
        return Err(CaptureError::InvalidOutputDir(path.to_path_buf()));
    }
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn defaults_to_temp_dir_at_info() {
        let cli = Cli::parse_from(["keystroke-logger"]);
        let config = cli.resolve().unwrap();
        assert_eq!(config.output_dir, std::env::temp_dir());
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn flag_wins_over_settings_file() {
        let flag_dir = tempdir().unwrap();
        let file_dir = tempdir().unwrap();
        let settings = file_dir.path().join("settings.json");
        let contents = serde_json::json!({
            "outputFolder": file_dir.path(),
            "logLevel": "warn",
        });
        fs::write(&settings, contents.to_string()).unwrap();
        let flag = flag_dir.path().to_str().unwrap();
        let config_path = settings.to_str().unwrap();

        let cli = Cli::parse_from([
            "keystroke-logger",
            "--output-folder",
            flag,
            "--config",
            config_path,
        ]);
        let config = cli.resolve().unwrap();
        assert_eq!(config.output_dir, flag_dir.path());
        assert_eq!(config.log_level, LevelFilter::Warn);

        let cli = Cli::parse_from(["keystroke-logger", "-c", config_path, "-v"]);
        let config = cli.resolve().unwrap();
        assert_eq!(config.output_dir, file_dir.path());
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn missing_directory_is_rejected() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = validate_output_dir(&missing).unwrap_err();
        assert!(err.is_fatal());
        assert!(err.to_string().contains("does not exist"));

        let file = dir.path().join("file");
        fs::write(&file, "").unwrap();
        assert!(validate_output_dir(&file).is_err());
    }
}
