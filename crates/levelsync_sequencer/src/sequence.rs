// SPDX-License-Identifier: MIT OR Apache-2.0
//! Sequence owning level visibility tracks.

use crate::track::{FrameRange, TimelineTrack, TrackId, VisibilityTrack};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SequenceId(pub Uuid);

impl SequenceId {
    /// Create a new random sequence ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SequenceId {
    fn default() -> Self {
        Self::new()
    }
}

/// Something that can hand out the level visibility track of a sequence.
pub trait TrackContainer {
    /// Sequence name for logging
    fn name(&self) -> &str;

    /// Return the visibility track, creating one if the sequence has none.
    ///
    /// `None` means no track exists and none could be created.
    fn find_or_create_visibility_track(&mut self) -> Option<&mut dyn TimelineTrack>;
}

/// A level sequence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sequence {
    /// Unique sequence ID
    pub id: SequenceId,
    /// Sequence name
    pub name: String,
    /// Visibility tracks in this sequence
    tracks: IndexMap<TrackId, VisibilityTrack>,
    /// Playback range in frames
    playback_range: FrameRange,
    /// Read-only sequences refuse new tracks
    #[serde(default)]
    pub read_only: bool,
}

impl Sequence {
    /// Name given to tracks created on demand
    pub const VISIBILITY_TRACK_NAME: &str = "Level Visibility";

    /// Create a new sequence
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: SequenceId::new(),
            name: name.into(),
            tracks: IndexMap::new(),
            playback_range: FrameRange::new(0, 300),
            read_only: false,
        }
    }

    /// Set the playback range (builder)
    pub fn with_playback_range(mut self, start: i32, end: i32) -> Self {
        self.set_playback_range(FrameRange::new(start, end));
        self
    }

    /// Playback range in frames
    pub fn playback_range(&self) -> FrameRange {
        self.playback_range
    }

    /// Change the playback range. Tracks pick up the new range.
    pub fn set_playback_range(&mut self, range: FrameRange) {
        self.playback_range = range;
        for track in self.tracks.values_mut() {
            track.range = range;
        }
    }

    /// Add a track
    pub fn add_track(&mut self, mut track: VisibilityTrack) -> TrackId {
        track.range = self.playback_range;
        let id = track.id;
        self.tracks.insert(id, track);
        id
    }

    /// Get a track
    pub fn track(&self, track_id: TrackId) -> Option<&VisibilityTrack> {
        self.tracks.get(&track_id)
    }

    /// Get all tracks
    pub fn tracks(&self) -> impl Iterator<Item = &VisibilityTrack> {
        self.tracks.values()
    }

    /// Get track count
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Serialize to RON
    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }

    /// Deserialize from RON
    pub fn from_ron(source: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(source)
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Self::new("Untitled Sequence")
    }
}

impl TrackContainer for Sequence {
    fn name(&self) -> &str {
        &self.name
    }

    fn find_or_create_visibility_track(&mut self) -> Option<&mut dyn TimelineTrack> {
        if self.tracks.is_empty() {
            if self.read_only {
                return None;
            }
            self.add_track(VisibilityTrack::new(Self::VISIBILITY_TRACK_NAME, self.playback_range));
        }
        let range = self.playback_range;
        let track = self.tracks.values_mut().next()?;
        // The sequence's playback range wins over whatever the track stored
        track.range = range;
        Some(track as &mut dyn TimelineTrack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::track::VisibilityState;

    #[test]
    fn test_find_or_create_creates_once() {
        let mut sequence = Sequence::new("Shot010").with_playback_range(0, 120);
        assert_eq!(sequence.track_count(), 0);

        let track = sequence.find_or_create_visibility_track().unwrap();
        assert_eq!(track.name(), Sequence::VISIBILITY_TRACK_NAME);
        assert_eq!(track.range(), FrameRange::new(0, 120));

        sequence.find_or_create_visibility_track().unwrap();
        assert_eq!(sequence.track_count(), 1);
    }

    #[test]
    fn test_find_returns_first_existing_track() {
        let mut sequence = Sequence::new("Shot010");
        let first = sequence.add_track(VisibilityTrack::new("Main", FrameRange::default()));
        sequence.add_track(VisibilityTrack::new("Extra", FrameRange::default()));

        let track = sequence.find_or_create_visibility_track().unwrap();
        assert_eq!(track.name(), "Main");
        assert!(sequence.track(first).is_some());
    }

    #[test]
    fn test_read_only_sequence_has_no_track() {
        let mut sequence = Sequence::new("Locked");
        sequence.read_only = true;
        assert!(sequence.find_or_create_visibility_track().is_none());
    }

    #[test]
    fn test_playback_range_propagates() {
        let mut sequence = Sequence::new("Shot010");
        let id = sequence.add_track(VisibilityTrack::new("Main", FrameRange::default()));
        sequence.set_playback_range(FrameRange::new(10, 250));

        assert_eq!(sequence.track(id).unwrap().range, FrameRange::new(10, 250));
    }

    #[test]
    fn test_stale_track_range_follows_playback_range() {
        let mut sequence = Sequence::new("Shot010").with_playback_range(0, 100);
        sequence.find_or_create_visibility_track().unwrap();
        let mut loaded = Sequence::from_ron(&sequence.to_ron().unwrap()).unwrap();
        if let Some(track) = loaded.tracks.values_mut().next() {
            track.range = FrameRange::new(0, 200);
        }

        let track = loaded.find_or_create_visibility_track().unwrap();
        let range = track.range();
        assert_eq!(range, FrameRange::new(0, 100));
        track.add_interval(0, VisibilityState::Visible, &["B".to_string()], range);
        let interval_range = track.intervals()[0].range;
        assert_eq!(interval_range, loaded.playback_range());
    }

    #[test]
    fn test_reversed_playback_range_from_ron() {
        let mut sequence = Sequence::new("Shot010");
        sequence.playback_range = FrameRange { start: 100, end: 0 };

        let loaded = Sequence::from_ron(&sequence.to_ron().unwrap()).unwrap();
        assert_eq!(loaded.playback_range(), FrameRange::new(0, 100));
    }

    #[test]
    fn test_sequence_ron() {
        let mut sequence = Sequence::new("Shot010").with_playback_range(0, 100);
        let track = sequence.find_or_create_visibility_track().unwrap();
        track.add_interval(0, VisibilityState::Visible, &["B".to_string()], FrameRange::new(0, 100));

        let ron = sequence.to_ron().unwrap();
        let loaded = Sequence::from_ron(&ron).unwrap();
        assert_eq!(loaded.name, "Shot010");
        assert_eq!(loaded.playback_range(), FrameRange::new(0, 100));
        assert_eq!(loaded.tracks().next().unwrap().intervals(), sequence.tracks().next().unwrap().intervals());
    }
}
