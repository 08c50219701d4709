//! Roster loading from JSON tables.
//!
//! The data directory holds `character.json` (characters with nested skills)
//! and `enemy.json` (flat name list). Loading happens once, before any
//! interaction begins.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use super::Roster;

/// Errors raised while loading the reference tables.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Load the character and enemy tables from a data directory.
pub async fn load_roster(dir: &Path) -> Result<Roster, RosterError> {
    let characters = read_json(&dir.join("character.json")).await?;
    let enemies = read_json(&dir.join("enemy.json")).await?;
    Ok(Roster {
        characters,
        enemies,
    })
}

async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, RosterError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| RosterError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| RosterError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Default location of the data directory.
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("tactic").join("data"))
}
