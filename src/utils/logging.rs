//! Diagnostic logging setup plus `log_*!` macros gated on a module-level
//! `ENABLE_LOGS` flag.
//!
//! ```rust,ignore
//! const ENABLE_LOGS: bool = true;
//! use crate::{log_error, log_info};
//!
//! log_info!("hook installed");
//! ```

use std::io::Write;

use chrono::Local;
use log::LevelFilter;

use crate::storage::record::TIMESTAMP_FORMAT;

/// Installs the global logger: `[YYYY-MM-DD HH:MM:SS] LEVEL: message`.
///
/// `RUST_LOG` still overrides `default_level` when set.
pub fn init(default_level: LevelFilter) {
    let env = env_logger::Env::default().default_filter_or(default_level.to_string());
    env_logger::Builder::from_env(env)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {}: {}",
                Local::now().format(TIMESTAMP_FORMAT),
                record.level(),
                record.args()
            )
        })
        .init();
}

/// Logs at `$level` only when the calling module's `ENABLE_LOGS` is true.
#[macro_export]
macro_rules! log_gated {
    ($level:expr, $($arg:tt)*) => {
        if ENABLE_LOGS {
            log::log!($level, $($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => { $crate::log_gated!(log::Level::Info, $($arg)*) };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => { $crate::log_gated!(log::Level::Warn, $($arg)*) };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => { $crate::log_gated!(log::Level::Error, $($arg)*) };
}
