use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tactic_core::battle_log::LogEntry;
use tactic_core::roster::{Roster, default_data_dir};
use tactic_core::timeline::Timeline;
use tactic_types::TimelineSettings;

/// Persisted CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding `character.json` and `enemy.json`. Falls back to
    /// the platform data directory when unset.
    pub data_directory: Option<PathBuf>,
    pub timeline: TimelineSettings,
}

/// Everything the REPL session holds between commands.
#[derive(Debug, Default)]
pub struct AppState {
    pub config: AppConfig,
    pub roster: Option<Roster>,
    pub entries: Vec<LogEntry>,
    pub timeline: Option<Timeline>,
}

impl AppState {
    pub fn new() -> Self {
        let config = confy::load("tactic", None).unwrap_or_default();
        Self {
            config,
            ..Default::default()
        }
    }

    /// Effective data directory for roster loading.
    pub fn data_dir(&self) -> Option<PathBuf> {
        self.config.data_directory.clone().or_else(default_data_dir)
    }
}
