//! Logging setup and state-transition snapshots
//!
//! Configure via RUST_LOG:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=more_pane::model::pager=debug` - scroll arithmetic only
//! - `RUST_LOG=pager=debug` - session transitions only
//!
//! Logs are also written to `~/.config/more-pane/logs/more-pane.log` with
//! daily rotation, at debug level.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config_paths::LOG_FILE_PREFIX;
use crate::model::{PagerPrompt, PagerSession, PagerState};

/// Initialize tracing with a console layer and a rolling file layer
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, LOG_FILE_PREFIX);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight copy of a session's observable state for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub state: PagerState,
    pub scroll_offset: usize,
    pub prompt: PagerPrompt,
    pub total_lines: usize,
    pub close_pending: bool,
}

impl SessionSnapshot {
    pub fn from_session(session: &PagerSession) -> Self {
        Self {
            state: session.state(),
            scroll_offset: session.scroll_offset(),
            prompt: session.prompt(),
            total_lines: session.total_lines(),
            close_pending: session.is_close_pending(),
        }
    }

    /// Describe what changed between two snapshots
    pub fn diff(&self, other: &SessionSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.state != other.state {
            changes.push(format!("state: {:?} → {:?}", self.state, other.state));
        }
        if self.scroll_offset != other.scroll_offset {
            changes.push(format!(
                "offset: {} → {}",
                self.scroll_offset, other.scroll_offset
            ));
        }
        if self.prompt != other.prompt {
            changes.push(format!("prompt: {:?} → {:?}", self.prompt, other.prompt));
        }
        if self.total_lines != other.total_lines {
            changes.push(format!(
                "lines: {} → {}",
                self.total_lines, other.total_lines
            ));
        }
        if !self.close_pending && other.close_pending {
            changes.push("close requested".to_string());
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
