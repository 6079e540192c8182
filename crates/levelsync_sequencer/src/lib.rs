// SPDX-License-Identifier: MIT OR Apache-2.0
//! Level visibility tracks and streaming-level sync.
//!
//! This crate keeps a sequence's level visibility track in step with the
//! streaming levels that are currently shown in the editor world:
//! - Visibility tracks with row-indexed intervals over a frame range
//! - Scene snapshots classifying persistent and streaming levels
//! - Level name normalization used as the dedup key
//! - An additive, idempotent sync pass
//!
//! ## Architecture
//!
//! The sync core never reaches for editor globals. The active scene, the
//! track container and the UI refresh are handed in through the
//! [`SceneSource`], [`TrackContainer`] and [`RefreshHook`] seams, so the
//! in-memory [`AuthoredScene`] and [`Sequence`] types are just one possible
//! backing.

pub mod error;
pub mod name;
pub mod rows;
pub mod scene;
pub mod sequence;
pub mod snapshot;
pub mod sync;
pub mod track;
pub mod track_index;

pub use error::{Result, SyncError};
pub use name::NameResolver;
pub use rows::RowAllocator;
pub use scene::{AuthoredScene, FragmentError, LevelEntry, Scene, SceneSource, StreamingState};
pub use sequence::{Sequence, SequenceId, TrackContainer};
pub use snapshot::{FragmentKind, SceneFragment, StateSnapshot};
pub use sync::{sync_visible_levels, AddedInterval, RefreshHook, SyncEngine, SyncOutcome, SyncResult};
pub use track::{
    add_visibility_interval, FrameRange, IntervalId, TimelineTrack, TrackId, VisibilityInterval,
    VisibilityState, VisibilityTrack,
};
pub use track_index::TrackIndex;
