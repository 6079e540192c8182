// SPDX-License-Identifier: MIT OR Apache-2.0
//! Level visibility track definitions.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackId(pub Uuid);

impl TrackId {
    /// Create a new random track ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TrackId {
    fn default() -> Self {
        Self::new()
    }
}

/// Unique identifier for a visibility interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntervalId(pub Uuid);

impl IntervalId {
    /// Create a new random interval ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for IntervalId {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether an interval shows or hides its levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum VisibilityState {
    /// Levels are shown for the interval
    #[default]
    Visible,
    /// Levels are hidden for the interval
    Hidden,
}

impl VisibilityState {
    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Visible => "Visible",
            Self::Hidden => "Hidden",
        }
    }
}

impl From<bool> for VisibilityState {
    fn from(visible: bool) -> Self {
        if visible {
            Self::Visible
        } else {
            Self::Hidden
        }
    }
}

/// Inclusive frame range.
///
/// Reversed bounds are swapped on construction and when read from a file, so
/// `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "RawFrameRange")]
pub struct FrameRange {
    /// First frame
    pub start: i32,
    /// Last frame
    pub end: i32,
}

#[derive(Deserialize)]
#[serde(rename = "FrameRange")]
struct RawFrameRange {
    start: i32,
    end: i32,
}

impl From<RawFrameRange> for FrameRange {
    fn from(raw: RawFrameRange) -> Self {
        Self::new(raw.start, raw.end)
    }
}

impl FrameRange {
    /// Create a range, swapping the bounds if they are reversed
    pub fn new(start: i32, end: i32) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }

    /// Number of frames between start and end
    pub fn len(&self) -> u32 {
        self.start.abs_diff(self.end)
    }

    /// Whether start and end are the same frame
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if a frame falls inside the range
    pub fn contains(&self, frame: i32) -> bool {
        frame >= self.start && frame <= self.end
    }

    /// Check if two ranges share at least one frame
    pub fn overlaps(&self, other: &FrameRange) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

/// A row of level visibility over a frame range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisibilityInterval {
    /// Unique interval ID
    pub id: IntervalId,
    /// Row the interval is drawn on
    pub row_index: u32,
    /// Shown or hidden
    pub visibility: VisibilityState,
    /// Short names of the levels this interval drives
    pub members: IndexSet<String>,
    /// Frames covered by the interval
    pub range: FrameRange,
}

impl VisibilityInterval {
    /// Create a new interval
    pub fn new(
        row_index: u32,
        visibility: VisibilityState,
        members: impl IntoIterator<Item = impl Into<String>>,
        range: FrameRange,
    ) -> Self {
        Self {
            id: IntervalId::new(),
            row_index,
            visibility,
            members: members.into_iter().map(Into::into).collect(),
            range,
        }
    }

    /// Check if the interval drives the given level
    pub fn has_member(&self, name: &str) -> bool {
        self.members.contains(name)
    }
}

/// Write access to a level visibility track.
///
/// This is the seam the sync pass writes through. [`VisibilityTrack`] is the
/// in-memory implementation; editor integrations provide their own.
pub trait TimelineTrack {
    /// Track name for logging
    fn name(&self) -> &str;

    /// Playback range new intervals should cover
    fn range(&self) -> FrameRange;

    /// Intervals currently on the track
    fn intervals(&self) -> &[VisibilityInterval];

    /// Add an interval.
    ///
    /// Returns `None` when the track refuses the interval; the caller decides
    /// whether that is fatal.
    fn add_interval(
        &mut self,
        row_index: u32,
        visibility: VisibilityState,
        members: &[String],
        range: FrameRange,
    ) -> Option<IntervalId>;
}

/// A level visibility track in a sequence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisibilityTrack {
    /// Unique track ID
    pub id: TrackId,
    /// Track name
    pub name: String,
    /// Playback range of the owning sequence
    pub range: FrameRange,
    /// Intervals on this track
    intervals: Vec<VisibilityInterval>,
    /// Whether the track is locked against edits
    pub locked: bool,
}

impl VisibilityTrack {
    /// Create a new track
    pub fn new(name: impl Into<String>, range: FrameRange) -> Self {
        Self {
            id: TrackId::new(),
            name: name.into(),
            range,
            intervals: Vec::new(),
            locked: false,
        }
    }

    /// Remove an interval
    pub fn remove_interval(&mut self, interval_id: IntervalId) -> Option<VisibilityInterval> {
        let idx = self.intervals.iter().position(|i| i.id == interval_id)?;
        Some(self.intervals.remove(idx))
    }

    /// Get interval by ID
    pub fn interval(&self, interval_id: IntervalId) -> Option<&VisibilityInterval> {
        self.intervals.iter().find(|i| i.id == interval_id)
    }

    /// Intervals that drive the given level
    pub fn intervals_for<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a VisibilityInterval> + 'a {
        self.intervals.iter().filter(move |i| i.has_member(name))
    }

    /// Intervals active at a frame
    pub fn intervals_at(&self, frame: i32) -> Vec<&VisibilityInterval> {
        self.intervals
            .iter()
            .filter(|i| i.range.contains(frame))
            .collect()
    }

    /// Get interval count
    pub fn interval_count(&self) -> usize {
        self.intervals.len()
    }

    /// Highest row in use, if any
    pub fn max_row(&self) -> Option<u32> {
        self.intervals.iter().map(|i| i.row_index).max()
    }
}

impl TimelineTrack for VisibilityTrack {
    fn name(&self) -> &str {
        &self.name
    }

    fn range(&self) -> FrameRange {
        self.range
    }

    fn intervals(&self) -> &[VisibilityInterval] {
        &self.intervals
    }

    fn add_interval(
        &mut self,
        row_index: u32,
        visibility: VisibilityState,
        members: &[String],
        range: FrameRange,
    ) -> Option<IntervalId> {
        if self.locked || members.is_empty() || range.start > range.end {
            return None;
        }
        let interval = VisibilityInterval::new(row_index, visibility, members.iter().cloned(), range);
        let id = interval.id;
        self.intervals.push(interval);
        Some(id)
    }
}

/// Add one interval showing or hiding `level_names` between two frames.
pub fn add_visibility_interval(
    track: &mut dyn TimelineTrack,
    level_names: &[String],
    visible: bool,
    start_frame: i32,
    end_frame: i32,
    row: u32,
) -> Option<IntervalId> {
    track.add_interval(
        row,
        VisibilityState::from(visible),
        level_names,
        FrameRange::new(start_frame, end_frame),
    )
}
