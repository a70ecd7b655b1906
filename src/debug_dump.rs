//! Debug state dump
//!
//! Serializes a snapshot of the model to JSON in the logs directory.
//! Triggered by F7 in debug builds.

use serde::Serialize;

use more_pane::model::{AppModel, PagerLayout, PagerMetrics, PagerState, Rect};

use crate::runtime::shell::{Focus, Shell};

#[derive(Serialize)]
pub struct StateDump {
    pub timestamp: u64,
    pub window_size: (u32, u32),
    pub metrics: PagerMetrics,
    pub start_at_top: bool,
    pub focus: String,
    pub targets: Vec<TargetDump>,
    pub sessions: Vec<SessionDump>,
}

#[derive(Serialize)]
pub struct TargetDump {
    pub id: u64,
    pub title: String,
    pub text_bytes: usize,
    pub viewport: Option<Rect>,
    pub overlay: Option<Rect>,
}

#[derive(Serialize)]
pub struct SessionDump {
    pub target: u64,
    pub state: PagerState,
    pub total_lines: usize,
    pub scroll_offset: usize,
    pub max_scroll: usize,
    pub prompt: &'static str,
    pub close_pending: bool,
    pub layout: Option<PagerLayout>,
}

impl StateDump {
    pub fn capture(model: &AppModel, shell: &Shell) -> Self {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();

        let targets = model
            .targets
            .values()
            .map(|view| TargetDump {
                id: view.id.0,
                title: view.title.clone(),
                text_bytes: view.text.len(),
                viewport: view.viewport,
                overlay: shell.overlay(view.id),
            })
            .collect();

        let mut sessions: Vec<SessionDump> = model
            .sessions
            .iter()
            .map(|s| SessionDump {
                target: s.target().0,
                state: s.state(),
                total_lines: s.total_lines(),
                scroll_offset: s.scroll_offset(),
                max_scroll: s.max_scroll(),
                prompt: s.status_message(),
                close_pending: s.is_close_pending(),
                layout: s.layout().copied(),
            })
            .collect();
        sessions.sort_by_key(|s| s.target);

        let focus = match shell.focus {
            Focus::Target(t) => format!("target {}", t),
            Focus::Pager(t) => format!("pager {}", t),
        };

        Self {
            timestamp,
            window_size: model.window_size,
            metrics: model.metrics,
            start_at_top: model.start_at_top(),
            focus,
            targets,
            sessions,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
    }

    /// Write the dump next to the log files, returning its path
    pub fn save_to_file(&self) -> Result<String, String> {
        let dir = more_pane::config_paths::ensure_logs_dir()?;
        let path = dir.join(format!("{}-state-dump.json", self.timestamp));
        std::fs::write(&path, self.to_json())
            .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
        Ok(path.display().to_string())
    }
}
