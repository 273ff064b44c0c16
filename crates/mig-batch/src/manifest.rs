use std::fs;
use std::path::Path;

use mig_core::{ErrorInfo, MigError};
use serde::{Deserialize, Serialize};

use crate::axes::AxisToggles;
use crate::decks::DeckRecord;

/// Filename of the generation manifest.
pub const MANIFEST_NAME: &str = "manifest.json";

/// Record of the submit script artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptRecord {
    /// Script filename relative to the output directory.
    pub filename: String,
    /// Hex SHA-256 of the script bytes.
    pub sha256: String,
}

/// Structured manifest describing every artifact a generation run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationManifest {
    /// RFC 3339 timestamp for when the run finished.
    pub created_at: String,
    /// Axis toggles the run was generated with.
    pub toggles: AxisToggles,
    /// Every deck written, in generation order.
    pub decks: Vec<DeckRecord>,
    /// The submit script, when the run produced one.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub script: Option<ScriptRecord>,
}

impl GenerationManifest {
    /// Creates a manifest stamped with the current time.
    pub fn new(toggles: AxisToggles, decks: Vec<DeckRecord>, script: Option<ScriptRecord>) -> Self {
        Self {
            created_at: chrono::Utc::now().to_rfc3339(),
            toggles,
            decks,
            script,
        }
    }

    /// Writes the manifest to a JSON file.
    pub fn write(&self, path: &Path) -> Result<(), MigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| {
                MigError::Io(
                    ErrorInfo::new("manifest-mkdir", err.to_string())
                        .with_context("path", parent.display().to_string()),
                )
            })?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|err| {
            MigError::Serde(
                ErrorInfo::new("manifest-serialize", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        fs::write(path, json).map_err(|err| {
            MigError::Io(
                ErrorInfo::new("manifest-write", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })
    }

    /// Loads a manifest from disk.
    pub fn load(path: &Path) -> Result<Self, MigError> {
        let contents = fs::read_to_string(path).map_err(|err| {
            MigError::Io(
                ErrorInfo::new("manifest-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        serde_json::from_str(&contents).map_err(|err| {
            MigError::Serde(
                ErrorInfo::new("manifest-parse", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })
    }
}
