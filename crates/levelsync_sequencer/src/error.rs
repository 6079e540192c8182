// SPDX-License-Identifier: MIT OR Apache-2.0
//! Errors that abort a sync run.

use thiserror::Error;

/// Precondition failures for a sync run.
///
/// These are raised before any interval is created, so a failed run never
/// leaves a half-written track behind. Per-level and per-interval problems are
/// not errors; they are reported through [`crate::SyncResult`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SyncError {
    /// No sequence is open
    #[error("No active level sequence found. Open a sequence in the editor and try again.")]
    NoActiveSequence,

    /// The sequence could neither provide nor create a visibility track
    #[error("Failed to get or create a level visibility track on sequence '{0}'")]
    NoVisibilityTrack(String),

    /// No editor world is available
    #[error("Unable to get the editor world")]
    NoActiveScene,
}

/// Result type for sync operations
pub type Result<T> = std::result::Result<T, SyncError>;
