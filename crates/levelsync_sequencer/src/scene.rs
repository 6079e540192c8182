// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scene access: the levels composing a world and their streaming state.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Live state read from a streaming level wrapper
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamingState {
    /// Level is currently visible
    pub visible: bool,
    /// Level is fully loaded
    pub loaded: bool,
    /// Package name of the backing world asset, when the wrapper exposes one
    pub backing_asset: Option<String>,
}

/// Failure reading one level's streaming state
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Streaming state for {path} is unreadable: {reason}")]
pub struct FragmentError {
    /// Package path of the level
    pub path: String,
    /// What went wrong
    pub reason: String,
}

/// A world made of a persistent level and streaming sublevels.
pub trait Scene {
    /// World name for logging
    fn name(&self) -> &str;

    /// Package paths of every level in the world, in world order
    fn fragments(&self) -> Vec<String>;

    /// Streaming state of a level.
    ///
    /// `None` means the level has no streaming wrapper and is part of the
    /// persistent world.
    fn streaming_state(&self, path: &str) -> Option<Result<StreamingState, FragmentError>>;
}

/// Provides the scene currently open in the editor, if any.
pub trait SceneSource {
    /// The active scene
    fn active_scene(&self) -> Option<&dyn Scene>;
}

/// How a level participates in an authored scene
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelEntry {
    /// Always-loaded base level
    Persistent,
    /// Streamed sublevel
    Streaming {
        /// Currently visible
        visible: bool,
        /// Fully loaded
        loaded: bool,
        /// Package name of the backing world asset
        #[serde(default)]
        backing_asset: Option<String>,
    },
    /// Streamed sublevel whose wrapper could not be queried
    Unreadable {
        /// Reason reported by the editor
        reason: String,
    },
}

/// In-memory scene, keyed by level package path
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthoredScene {
    /// World name
    pub name: String,
    /// Levels in world order
    pub levels: IndexMap<String, LevelEntry>,
}

impl AuthoredScene {
    /// Create an empty scene
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            levels: IndexMap::new(),
        }
    }

    /// Add a persistent level
    pub fn with_persistent(mut self, path: impl Into<String>) -> Self {
        self.levels.insert(path.into(), LevelEntry::Persistent);
        self
    }

    /// Add a streaming level
    pub fn with_streaming(mut self, path: impl Into<String>, visible: bool, loaded: bool) -> Self {
        self.levels.insert(
            path.into(),
            LevelEntry::Streaming {
                visible,
                loaded,
                backing_asset: None,
            },
        );
        self
    }

    /// Insert or replace a level entry
    pub fn set_level(&mut self, path: impl Into<String>, entry: LevelEntry) {
        self.levels.insert(path.into(), entry);
    }

    /// Update the visible/loaded flags of a streaming level.
    ///
    /// Returns `false` if the level is unknown or not streaming.
    pub fn set_streaming_flags(&mut self, path: &str, visible: bool, loaded: bool) -> bool {
        match self.levels.get_mut(path) {
            Some(LevelEntry::Streaming {
                visible: v,
                loaded: l,
                ..
            }) => {
                *v = visible;
                *l = loaded;
                true
            }
            _ => false,
        }
    }
}

impl Scene for AuthoredScene {
    fn name(&self) -> &str {
        &self.name
    }

    fn fragments(&self) -> Vec<String> {
        self.levels.keys().cloned().collect()
    }

    fn streaming_state(&self, path: &str) -> Option<Result<StreamingState, FragmentError>> {
        match self.levels.get(path)? {
            LevelEntry::Persistent => None,
            LevelEntry::Streaming {
                visible,
                loaded,
                backing_asset,
            } => Some(Ok(StreamingState {
                visible: *visible,
                loaded: *loaded,
                backing_asset: backing_asset.clone(),
            })),
            LevelEntry::Unreadable { reason } => Some(Err(FragmentError {
                path: path.to_string(),
                reason: reason.clone(),
            })),
        }
    }
}

impl SceneSource for AuthoredScene {
    fn active_scene(&self) -> Option<&dyn Scene> {
        Some(self)
    }
}

impl SceneSource for Option<AuthoredScene> {
    fn active_scene(&self) -> Option<&dyn Scene> {
        self.as_ref().map(|scene| scene as &dyn Scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_streaming_state() {
        let mut scene = AuthoredScene::new("World")
            .with_persistent("/Game/L/A")
            .with_streaming("/Game/L/B", true, true);
        scene.set_level(
            "/Game/L/C",
            LevelEntry::Unreadable {
                reason: "wrapper destroyed".to_string(),
            },
        );

        assert_eq!(scene.fragments(), vec!["/Game/L/A", "/Game/L/B", "/Game/L/C"]);
        assert!(scene.streaming_state("/Game/L/A").is_none());
        assert_eq!(
            scene.streaming_state("/Game/L/B"),
            Some(Ok(StreamingState {
                visible: true,
                loaded: true,
                backing_asset: None,
            }))
        );
        assert!(matches!(scene.streaming_state("/Game/L/C"), Some(Err(_))));
        assert!(scene.streaming_state("/Game/L/Missing").is_none());
    }

    #[test]
    fn test_set_streaming_flags() {
        let mut scene = AuthoredScene::new("World")
            .with_persistent("/Game/L/A")
            .with_streaming("/Game/L/B", false, false);

        assert!(scene.set_streaming_flags("/Game/L/B", true, true));
        assert!(!scene.set_streaming_flags("/Game/L/A", true, true));
        assert!(!scene.set_streaming_flags("/Game/L/Z", true, true));
        assert_eq!(
            scene.levels["/Game/L/B"],
            LevelEntry::Streaming {
                visible: true,
                loaded: true,
                backing_asset: None,
            }
        );
    }

    #[test]
    fn test_scene_source() {
        let none: Option<AuthoredScene> = None;
        assert!(none.active_scene().is_none());

        let some = Some(AuthoredScene::new("World"));
        assert_eq!(some.active_scene().map(|scene| scene.name()), Some("World"));
    }
}
