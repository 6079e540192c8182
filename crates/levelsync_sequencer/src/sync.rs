// SPDX-License-Identifier: MIT OR Apache-2.0
//! Sync visible streaming levels into a level visibility track.
//!
//! A run is additive: it never edits or removes intervals, only appends one
//! `Visible` interval per streaming level that is visible, loaded and not yet
//! named on the track. Running it again without any change in the world adds
//! nothing.

use crate::error::{Result, SyncError};
use crate::rows::RowAllocator;
use crate::scene::{Scene, SceneSource};
use crate::sequence::TrackContainer;
use crate::snapshot::StateSnapshot;
use crate::track::{IntervalId, TimelineTrack, VisibilityState};
use crate::track_index::TrackIndex;

/// Notified once after a run has written to the track
pub trait RefreshHook {
    /// Redraw whatever displays the track
    fn refresh(&mut self);
}

impl<F: FnMut()> RefreshHook for F {
    fn refresh(&mut self) {
        self();
    }
}

/// An interval created by a sync run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedInterval {
    /// Level name stored on the interval
    pub name: String,
    /// Row the interval was placed on
    pub row_index: u32,
    /// ID assigned by the track
    pub id: IntervalId,
}

/// What a sync run did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncResult {
    /// Intervals created, in creation order
    pub added: Vec<AddedInterval>,
    /// Names already on the track (or repeated within the run)
    pub skipped: Vec<String>,
    /// Names the track refused to create an interval for
    pub failed: Vec<String>,
}

impl SyncResult {
    /// Number of intervals created
    pub fn added_count(&self) -> usize {
        self.added.len()
    }

    /// Names of the created intervals
    pub fn added_names(&self) -> impl Iterator<Item = &str> {
        self.added.iter().map(|a| a.name.as_str())
    }
}

/// Result of the top-level sync entry point
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// No streaming level was visible and loaded
    NothingToSync,
    /// The track was reconciled
    Synced(SyncResult),
}

/// Reconciles a scene snapshot with a visibility track
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncEngine;

impl SyncEngine {
    /// Create an engine
    pub fn new() -> Self {
        Self
    }

    /// Display names of visible, loaded streaming levels in world order.
    ///
    /// Empty names are kept: a level with a degenerate path still gets an
    /// interval rather than silently dropping out.
    pub fn candidates(snapshot: &StateSnapshot) -> Vec<String> {
        snapshot.candidates().map(|f| f.display_name()).collect()
    }

    /// Capture `scene` and add intervals for its missing visible levels
    pub fn sync(&self, scene: &dyn Scene, track: &mut dyn TimelineTrack) -> SyncResult {
        let snapshot = StateSnapshot::capture(scene);
        self.apply(&Self::candidates(&snapshot), track)
    }

    /// Add one interval per candidate name not already on `track`.
    pub fn apply(&self, candidates: &[String], track: &mut dyn TimelineTrack) -> SyncResult {
        let range = track.range();
        tracing::info!("[Sequencer] Playback frames: start={}, end={}", range.start, range.end);

        let mut existing = TrackIndex::from_track(track);
        tracing::info!("[Sequencer] Existing level visibility entries: {:?}", existing.sorted());

        let mut rows = RowAllocator::new();
        let mut result = SyncResult::default();

        for name in candidates {
            if existing.contains(name) {
                tracing::info!("[Sequencer] Skip (already present): {}", name);
                result.skipped.push(name.clone());
                continue;
            }
            // Each name is attempted once per run, even if creation fails
            existing.insert(name.clone());

            let row_index = rows.peek();
            match track.add_interval(row_index, VisibilityState::Visible, std::slice::from_ref(name), range) {
                Some(id) => {
                    rows.commit();
                    tracing::info!("[Sequencer] Added level visibility interval for: {} (row {})", name, row_index);
                    result.added.push(AddedInterval {
                        name: name.clone(),
                        row_index,
                        id,
                    });
                }
                None => {
                    tracing::warn!("[Sequencer] Failed to add interval for: {}", name);
                    result.failed.push(name.clone());
                }
            }
        }

        result
    }
}

/// Sync every visible, loaded streaming level into the sequence's
/// visibility track, covering the full playback range.
///
/// Fails only on missing preconditions. `refresh` runs once after the track
/// has been reconciled and is skipped when there was nothing to sync.
pub fn sync_visible_levels<S, C>(
    scenes: &S,
    sequence: Option<&mut C>,
    mut refresh: impl RefreshHook,
) -> Result<SyncOutcome>
where
    S: SceneSource + ?Sized,
    C: TrackContainer + ?Sized,
{
    let Some(sequence) = sequence else {
        let err = SyncError::NoActiveSequence;
        tracing::error!("{}", err);
        return Err(err);
    };
    tracing::info!("[Sequencer] Processing: {}", sequence.name());

    let sequence_name = sequence.name().to_string();
    let Some(track) = sequence.find_or_create_visibility_track() else {
        let err = SyncError::NoVisibilityTrack(sequence_name);
        tracing::error!("[Sequencer] {}", err);
        return Err(err);
    };
    tracing::info!("[Sequencer] Using level visibility track: {}", track.name());

    let Some(scene) = scenes.active_scene() else {
        let err = SyncError::NoActiveScene;
        tracing::error!("{}", err);
        return Err(err);
    };

    let snapshot = StateSnapshot::capture(scene);
    let candidates = SyncEngine::candidates(&snapshot);
    if candidates.is_empty() {
        tracing::warn!("[World] No visible, loaded streaming sublevels found to add.");
        return Ok(SyncOutcome::NothingToSync);
    }
    tracing::info!("[World] Visible levels to sync: {:?}", candidates);

    let result = SyncEngine::new().apply(&candidates, track);
    if result.failed.is_empty() {
        tracing::info!("[Sequencer] Sync complete. Added {} new level(s).", result.added_count());
    } else {
        tracing::warn!(
            "[Sequencer] Sync complete. Added {} new level(s), {} failed.",
            result.added_count(),
            result.failed.len()
        );
    }

    refresh.refresh();
    Ok(SyncOutcome::Synced(result))
}
