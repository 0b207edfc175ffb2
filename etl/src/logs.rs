//! Pipeline progress logging.
//!
//! Thin helpers over `tracing` events so pipeline steps read the same
//! everywhere. The binary decides where events go by installing a
//! subscriber; library users and tests get nothing printed unless they do.

use tracing::{error, info, warn};

/// Log level of a pipeline message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Emit `message` at `level`, indented by `indent` steps.
pub fn log(level: LogLevel, message: &str, indent: u8) {
    let pad = "   ".repeat(indent as usize);
    match level {
        LogLevel::Info => info!("{}{}", pad, message),
        LogLevel::Success => info!("{}✓ {}", pad, message),
        LogLevel::Warning => warn!("{}{}", pad, message),
        LogLevel::Error => error!("{}❌ {}", pad, message),
    }
}

/// Convenient logging functions
pub fn log_info(msg: impl AsRef<str>) {
    log(LogLevel::Info, msg.as_ref(), 0);
}

pub fn log_success(msg: impl AsRef<str>) {
    log(LogLevel::Success, msg.as_ref(), 0);
}

pub fn log_warning(msg: impl AsRef<str>) {
    log(LogLevel::Warning, msg.as_ref(), 0);
}

pub fn log_error(msg: impl AsRef<str>) {
    log(LogLevel::Error, msg.as_ref(), 0);
}

pub fn log_info_indent(msg: impl AsRef<str>, indent: u8) {
    log(LogLevel::Info, msg.as_ref(), indent);
}

pub fn log_success_indent(msg: impl AsRef<str>, indent: u8) {
    log(LogLevel::Success, msg.as_ref(), indent);
}
