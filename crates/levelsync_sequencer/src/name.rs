// SPDX-License-Identifier: MIT OR Apache-2.0
//! Level name normalization.
//!
//! Levels are identified by package paths such as `/Game/Maps/Sub/MySub_A`,
//! while visibility intervals store the short level name (`MySub_A`). Both
//! steps here are total: malformed input yields a best-effort name, never an
//! error.

/// Name normalization utilities
pub struct NameResolver;

impl NameResolver {
    /// Short name from a package path, preferring the backing asset if known.
    ///
    /// Takes the last `/` segment and drops everything up to the last `.` in
    /// it, so `/Game/X/Y.Y` becomes `Y`. An empty identity yields an empty
    /// name.
    pub fn resolve(identity: &str, backing_asset: Option<&str>) -> String {
        match backing_asset {
            Some(asset) if !asset.is_empty() => Self::tail(asset).to_string(),
            _ => Self::tail(identity).to_string(),
        }
    }

    /// Base filename of a path-like string (directory and extension removed).
    pub fn short_name(path: &str) -> String {
        let file = path.rsplit(['/', '\\']).next().unwrap_or(path);
        match file.rfind('.') {
            Some(idx) if idx > 0 => file[..idx].to_string(),
            _ => file.to_string(),
        }
    }

    /// The key stored on intervals and used for dedup.
    pub fn display_name(identity: &str, backing_asset: Option<&str>) -> String {
        Self::short_name(&Self::resolve(identity, backing_asset))
    }

    fn tail(path: &str) -> &str {
        let segment = path.rsplit('/').next().unwrap_or(path);
        segment.rsplit('.').next().unwrap_or(segment)
    }
}
