// SPDX-License-Identifier: MIT OR Apache-2.0
//! Session files: a captured editor world plus the sequence to sync into.
//!
//! A session is a RON document holding:
//! - The editor world with each level's streaming state
//! - The level sequence and its visibility tracks
//! - Sync settings

use levelsync_sequencer::{AuthoredScene, Scene, SceneSource, Sequence};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Current session format version
pub const SESSION_FORMAT_VERSION: u32 = 1;

/// Session errors
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading or writing the file failed
    #[error("I/O error on {path:?}: {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The file is not valid RON for a session
    #[error("Invalid session file: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// The session could not be serialized
    #[error("Serialization error: {0}")]
    Serialize(#[from] ron::Error),

    /// The file was written by a newer version
    #[error("Session version {found} is newer than supported version {supported}")]
    UnsupportedVersion {
        /// Version in the file
        found: u32,
        /// Highest version this build reads
        supported: u32,
    },
}

/// Result type for session operations
pub type Result<T> = std::result::Result<T, SessionError>;

/// Settings stored alongside the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SyncSettings {
    /// Report what would be added without writing the file
    pub dry_run: bool,
    /// Write the result here instead of back to the input file
    pub output: Option<PathBuf>,
}

/// A session on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionFile {
    /// Format version
    pub version: u32,
    /// Sync settings
    #[serde(default)]
    pub settings: SyncSettings,
    /// Editor world, if one was open
    #[serde(default)]
    pub scene: Option<AuthoredScene>,
    /// Open level sequence, if any
    #[serde(default)]
    pub sequence: Option<Sequence>,
}

impl SessionFile {
    /// Create a session with a world and a sequence
    #[allow(dead_code)]
    pub fn new(scene: AuthoredScene, sequence: Sequence) -> Self {
        Self {
            version: SESSION_FORMAT_VERSION,
            settings: SyncSettings::default(),
            scene: Some(scene),
            sequence: Some(sequence),
        }
    }

    /// Parse a session from RON text
    pub fn from_ron(source: &str) -> Result<Self> {
        let session: SessionFile = ron::from_str(source)?;

        if session.version > SESSION_FORMAT_VERSION {
            return Err(SessionError::UnsupportedVersion {
                found: session.version,
                supported: SESSION_FORMAT_VERSION,
            });
        }

        Ok(session)
    }

    /// Serialize to pretty RON
    pub fn to_ron(&self) -> Result<String> {
        let config = ron::ser::PrettyConfig::default()
            .struct_names(true)
            .enumerate_arrays(false);
        Ok(ron::ser::to_string_pretty(self, config)?)
    }

    /// Load a session from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| SessionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&content)
    }

    /// Save the session to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_ron()?;
        std::fs::write(path, content).map_err(|source| SessionError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl SceneSource for SessionFile {
    fn active_scene(&self) -> Option<&dyn Scene> {
        self.scene.active_scene()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use levelsync_sequencer::{LevelEntry, TrackContainer};

    fn session() -> SessionFile {
        let mut scene = AuthoredScene::new("World")
            .with_persistent("/Game/Maps/Main")
            .with_streaming("/Game/Maps/Sub/MySub_A", true, true);
        scene.set_level(
            "/Game/Maps/Sub/Wrapper",
            LevelEntry::Streaming {
                visible: true,
                loaded: true,
                backing_asset: Some("/Game/Maps/Real/Portrait".to_string()),
            },
        );
        SessionFile::new(scene, Sequence::new("Shot010").with_playback_range(0, 100))
    }

    #[test]
    fn test_session_ron() {
        let mut session = session();
        session.settings.dry_run = true;
        session
            .sequence
            .as_mut()
            .unwrap()
            .find_or_create_visibility_track()
            .unwrap();

        let ron = session.to_ron().unwrap();
        let loaded = SessionFile::from_ron(&ron).unwrap();
        assert_eq!(loaded.version, SESSION_FORMAT_VERSION);
        assert!(loaded.settings.dry_run);
        assert_eq!(loaded.scene.as_ref().unwrap().levels.len(), 3);
        assert_eq!(loaded.sequence.as_ref().unwrap().track_count(), 1);
    }

    #[test]
    fn test_minimal_session_defaults() {
        let loaded = SessionFile::from_ron("(version: 1)").unwrap();
        assert!(loaded.scene.is_none());
        assert!(loaded.sequence.is_none());
        assert_eq!(loaded.settings, SyncSettings::default());
        assert!(loaded.active_scene().is_none());
    }

    #[test]
    fn test_newer_version_rejected() {
        let err = SessionFile::from_ron("(version: 99)").unwrap_err();
        assert!(matches!(
            err,
            SessionError::UnsupportedVersion { found: 99, supported: SESSION_FORMAT_VERSION }
        ));
    }

    #[test]
    fn test_invalid_ron() {
        assert!(matches!(SessionFile::from_ron("not ron at all"), Err(SessionError::Parse(_))));
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("levelsync_session_{}.ron", std::process::id()));
        let session = session();
        session.save(&path).unwrap();

        let loaded = SessionFile::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        let mut sequence = loaded.sequence.unwrap();
        let track = sequence.find_or_create_visibility_track().unwrap();
        assert_eq!(track.range().end, 100);
    }

    #[test]
    fn test_missing_file() {
        let path = Path::new("/nonexistent/levelsync/session.ron");
        assert!(matches!(SessionFile::load(path), Err(SessionError::Io { .. })));
    }
}
