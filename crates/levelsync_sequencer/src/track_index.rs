// SPDX-License-Identifier: MIT OR Apache-2.0
//! Level names already represented on a track.

use crate::track::TimelineTrack;
use std::collections::HashSet;

/// Flat set of level names found on a track's intervals.
///
/// Membership is exact string equality. Names are taken as stored; no
/// further normalization is applied.
#[derive(Debug, Clone, Default)]
pub struct TrackIndex {
    names: HashSet<String>,
}

impl TrackIndex {
    /// Index every member of every interval on `track`
    pub fn from_track(track: &dyn TimelineTrack) -> Self {
        Self {
            names: Self::existing_names(track),
        }
    }

    /// Names of every member of every interval on `track`
    pub fn existing_names(track: &dyn TimelineTrack) -> HashSet<String> {
        track
            .intervals()
            .iter()
            .flat_map(|interval| interval.members.iter())
            .map(ToString::to_string)
            .collect()
    }

    /// Check if a level is already on the track
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Record a name added during this run
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    /// Number of distinct names
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the track had no names at all
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names in sorted order, for logging
    pub fn sorted(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.names.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
