//! Diagnostic trace files written when a command fails unexpectedly.

use crate::error::Result;
use crate::platform::platform_string;
use crate::version::VERSION;
use chrono::{SecondsFormat, Utc};
use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory, relative to the repository root, holding trace files
pub const LOG_DIR: &str = ".syncode-logs";

/// Everything recorded about one failure.
#[derive(Debug, Clone)]
pub struct TraceRecord {
    pub timestamp: String,
    pub version: String,
    pub platform: String,
    pub command: Option<String>,
    pub args: Vec<String>,
    pub error: ErrorDetail,
}

#[derive(Debug, Clone)]
pub struct ErrorDetail {
    pub name: String,
    pub message: String,
    pub stack: Option<String>,
    pub cause: Option<String>,
}

impl ErrorDetail {
    /// Describe an error: its message, its source chain as the cause,
    /// and a backtrace when `RUST_BACKTRACE` enables one.
    pub fn from_error(name: &str, error: &(dyn Error + 'static)) -> Self {
        let causes: Vec<String> = std::iter::successors(error.source(), |&e| e.source())
            .map(|e| e.to_string())
            .collect();

        let backtrace = Backtrace::capture();
        let stack = match backtrace.status() {
            BacktraceStatus::Captured => Some(backtrace.to_string()),
            _ => None,
        };

        Self {
            name: name.to_string(),
            message: error.to_string(),
            stack,
            cause: if causes.is_empty() {
                None
            } else {
                Some(causes.join("\n"))
            },
        }
    }

    pub fn from_message(name: &str, message: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            message: message.into(),
            stack: None,
            cause: None,
        }
    }
}

impl TraceRecord {
    pub fn new(command: Option<&str>, args: Vec<String>, error: ErrorDetail) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            version: VERSION.to_string(),
            platform: platform_string(),
            command: command.map(str::to_string),
            args,
            error,
        }
    }

    /// Human-readable trace block
    pub fn format(&self) -> String {
        let mut lines = vec![
            "=== Syncode Error Trace ===".to_string(),
            String::new(),
            format!("Timestamp: {}", self.timestamp),
            format!("Version: {}", self.version),
            format!("Platform: {}", self.platform),
        ];

        if let Some(command) = &self.command {
            lines.push(format!("Command: {}", command));
        }
        if !self.args.is_empty() {
            lines.push(format!("Arguments: {}", self.args.join(" ")));
        }

        lines.push(String::new());
        lines.push("=== Error Details ===".to_string());
        let name = if self.error.name.is_empty() {
            "Unknown"
        } else {
            self.error.name.as_str()
        };
        lines.push(format!("Type: {}", name));
        lines.push(format!("Message: {}", self.error.message));

        if let Some(stack) = &self.error.stack {
            lines.push(String::new());
            lines.push("=== Stack Trace ===".to_string());
            lines.push(stack.trim_end().to_string());
        }

        if let Some(cause) = &self.error.cause {
            lines.push(String::new());
            lines.push("=== Cause ===".to_string());
            lines.push(cause.clone());
        }

        lines.push(String::new());
        lines.push("=== End of Trace ===".to_string());
        lines.join("\n")
    }
}

/// Trace directory under a repository root
pub fn log_dir(repo_root: &Path) -> PathBuf {
    repo_root.join(LOG_DIR)
}

/// Write `record` into `dir` as `syncode-trace-<millis>.log`.
///
/// A numeric suffix is appended if a file for the same millisecond exists.
pub fn write_trace(dir: &Path, record: &TraceRecord) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;

    let millis = Utc::now().timestamp_millis();
    let mut path = dir.join(format!("syncode-trace-{}.log", millis));
    let mut attempt = 1;
    while path.exists() {
        path = dir.join(format!("syncode-trace-{}-{}.log", millis, attempt));
        attempt += 1;
    }

    fs::write(&path, record.format())?;
    tracing::debug!(path = %path.display(), "trace written");
    Ok(path)
}

/// Operator hint pointing at a trace file
pub fn issue_hint(trace: &Path) -> String {
    format!(
        "If this issue persists, open an issue and paste the full error trace from file {}",
        trace.display()
    )
}
