// SPDX-License-Identifier: MIT OR Apache-2.0
//! Point-in-time capture of a scene's level states.

use crate::name::NameResolver;
use crate::scene::Scene;

/// Classification of a level at capture time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentKind {
    /// No streaming wrapper; always part of the base world
    Persistent,
    /// Streamed sublevel with its live flags
    Streaming {
        /// Visible at capture time
        visible: bool,
        /// Loaded at capture time
        loaded: bool,
        /// Backing world asset, if the wrapper exposes one
        backing_asset: Option<String>,
    },
    /// Streaming wrapper exists but its flags could not be read
    Unreadable {
        /// Reason reported by the scene
        reason: String,
    },
}

/// One level of the captured scene
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneFragment {
    /// Package path
    pub path: String,
    /// Captured classification
    pub kind: FragmentKind,
}

impl SceneFragment {
    /// Whether the level is streaming, visible and loaded
    pub fn is_candidate(&self) -> bool {
        matches!(
            self.kind,
            FragmentKind::Streaming {
                visible: true,
                loaded: true,
                ..
            }
        )
    }

    /// Whether the level belongs to the persistent world
    pub fn is_persistent(&self) -> bool {
        matches!(self.kind, FragmentKind::Persistent)
    }

    /// Short name used as the dedup key
    pub fn display_name(&self) -> String {
        let backing_asset = match &self.kind {
            FragmentKind::Streaming { backing_asset, .. } => backing_asset.as_deref(),
            _ => None,
        };
        NameResolver::display_name(&self.path, backing_asset)
    }
}

/// Levels of a scene as they were when captured
#[derive(Debug, Clone, Default)]
pub struct StateSnapshot {
    fragments: Vec<SceneFragment>,
}

impl StateSnapshot {
    /// Read every level of `scene` once.
    ///
    /// A level whose flags cannot be read is kept as
    /// [`FragmentKind::Unreadable`] and the capture carries on.
    pub fn capture(scene: &dyn Scene) -> Self {
        let paths = scene.fragments();
        tracing::info!("[World] Found {} levels in world '{}'", paths.len(), scene.name());

        let fragments = paths
            .into_iter()
            .map(|path| {
                let kind = match scene.streaming_state(&path) {
                    None => {
                        tracing::info!("[World] Persistent level: {}", path);
                        FragmentKind::Persistent
                    }
                    Some(Ok(state)) => {
                        tracing::debug!(
                            "[World] Streaming: {} | visible: {} | loaded: {}",
                            path,
                            state.visible,
                            state.loaded
                        );
                        FragmentKind::Streaming {
                            visible: state.visible,
                            loaded: state.loaded,
                            backing_asset: state.backing_asset,
                        }
                    }
                    Some(Err(e)) => {
                        tracing::warn!("[World] Skipping level: {}", e);
                        FragmentKind::Unreadable { reason: e.reason }
                    }
                };
                SceneFragment { path, kind }
            })
            .collect();

        Self { fragments }
    }

    /// All captured levels in world order
    pub fn fragments(&self) -> &[SceneFragment] {
        &self.fragments
    }

    /// Streaming levels that are visible and loaded, in world order
    pub fn candidates(&self) -> impl Iterator<Item = &SceneFragment> {
        self.fragments.iter().filter(|f| f.is_candidate())
    }

    /// Number of persistent levels
    pub fn persistent_count(&self) -> usize {
        self.fragments.iter().filter(|f| f.is_persistent()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{AuthoredScene, LevelEntry};

    fn scene() -> AuthoredScene {
        let mut scene = AuthoredScene::new("World")
            .with_persistent("/Game/L/A")
            .with_streaming("/Game/L/B", true, true)
            .with_streaming("/Game/L/C", true, false)
            .with_streaming("/Game/L/D", false, true);
        scene.set_level(
            "/Game/L/E",
            LevelEntry::Unreadable {
                reason: "pending kill".to_string(),
            },
        );
        scene.set_level(
            "/Game/L/Wrapper",
            LevelEntry::Streaming {
                visible: true,
                loaded: true,
                backing_asset: Some("/Game/Real/Portrait.Portrait".to_string()),
            },
        );
        scene
    }

    #[test]
    fn test_capture_classifies_levels() {
        let snapshot = StateSnapshot::capture(&scene());
        assert_eq!(snapshot.fragments().len(), 6);
        assert_eq!(snapshot.persistent_count(), 1);
        assert!(matches!(snapshot.fragments()[4].kind, FragmentKind::Unreadable { .. }));
    }

    #[test]
    fn test_candidates_need_visible_and_loaded() {
        let snapshot = StateSnapshot::capture(&scene());
        let names: Vec<String> = snapshot.candidates().map(SceneFragment::display_name).collect();
        assert_eq!(names, vec!["B", "Portrait"]);
    }

    #[test]
    fn test_unreadable_level_does_not_abort_capture() {
        let mut scene = AuthoredScene::new("World");
        scene.set_level(
            "/Game/L/Broken",
            LevelEntry::Unreadable {
                reason: "pending kill".to_string(),
            },
        );
        let scene = scene.with_streaming("/Game/L/Fine", true, true);

        let snapshot = StateSnapshot::capture(&scene);
        assert_eq!(snapshot.fragments().len(), 2);
        assert_eq!(snapshot.candidates().count(), 1);
    }

    #[test]
    fn test_persistent_never_candidate() {
        let fragment = SceneFragment {
            path: "/Game/L/A".to_string(),
            kind: FragmentKind::Persistent,
        };
        assert!(fragment.is_persistent());
        assert!(!fragment.is_candidate());
    }
}
