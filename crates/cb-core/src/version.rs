//! Migration versions and the identifier parser.
//!
//! A migration's identity is a filename stem or module-like name such as
//! `20091112150200__migration_two` or `app.migrations.v20260206024658_create_users`.
//! The first 14 digits (optionally behind a single `v`/`V`) are the version,
//! the rest (minus leading underscores) is the name.

use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

/// Width of the `YYYYMMDDHHMMSS` timestamp that forms a version.
pub const VERSION_LENGTH: usize = 14;

/// Characters that separate namespace or path segments in an identifier.
const SEGMENT_SEPARATORS: &[char] = &['/', '\\', '.', ':'];

/// Characters that separate path segments in a file stem.
const PATH_SEPARATORS: &[char] = &['/', '\\'];

/// A migration version.
///
/// Versions are compared as strings. For fixed-width zero-padded timestamps
/// that is chronological order, and the `"0"` marker sorts before all of them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Version(String);

impl Version {
    /// The marker of a database with no migrations applied.
    pub fn zero() -> Self {
        Self("0".to_string())
    }

    /// Wrap a raw version string read back from the database.
    ///
    /// No format check is applied; the stored marker is trusted. An empty
    /// string reads as [`Version::zero`].
    pub fn from_stored(value: impl Into<String>) -> Self {
        let s = value.into();
        if s.is_empty() {
            Self::zero()
        } else {
            Self(s)
        }
    }

    /// True for the `"0"` marker.
    pub fn is_zero(&self) -> bool {
        self.0 == "0"
    }

    /// Return the underlying version as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Version {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for Version {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Version {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Version {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Version {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl PartialEq<String> for Version {
    fn eq(&self, other: &String) -> bool {
        self.0 == *other
    }
}

/// Split `raw` into `(version, name)`.
///
/// Only the final path/namespace segment is considered. Returns `None` when
/// that segment does not start with 14 ASCII digits, optionally behind a single
/// `v` or `V`. Never panics.
pub fn parse_identifier(raw: &str) -> Option<(Version, String)> {
    parse_segment(final_segment(raw))
}

/// Split a file stem into `(version, name)`.
///
/// Unlike [`parse_identifier`], dots are part of the name; only path
/// separators start a new segment. `20091112130101_add_v1.2_column` is
/// version `20091112130101`, name `add_v1.2_column`.
pub fn parse_file_stem(stem: &str) -> Option<(Version, String)> {
    parse_segment(stem.rsplit(PATH_SEPARATORS).next().unwrap_or(stem))
}

fn parse_segment(segment: &str) -> Option<(Version, String)> {
    let (digits, rest) = split_version(segment)?;
    let name = rest.trim_start_matches('_').to_string();
    Some((Version(digits.to_string()), name))
}

/// Validate a declared version token.
///
/// Accepts exactly 14 ASCII digits, optionally behind a single `v`/`V`, and
/// nothing else.
pub fn normalize_version(raw: &str) -> Option<Version> {
    match split_version(raw.trim()) {
        Some((digits, "")) => Some(Version(digits.to_string())),
        _ => None,
    }
}

/// The last path/namespace segment of an identifier.
pub(crate) fn final_segment(raw: &str) -> &str {
    raw.rsplit(SEGMENT_SEPARATORS).next().unwrap_or(raw)
}

/// Split a segment into its 14 version digits and the remainder.
fn split_version(segment: &str) -> Option<(&str, &str)> {
    let unprefixed = segment
        .strip_prefix('v')
        .or_else(|| segment.strip_prefix('V'));

    if let Some(after) = unprefixed {
        if let Some(split) = leading_timestamp(after) {
            return Some(split);
        }
    }
    leading_timestamp(segment)
}

fn leading_timestamp(s: &str) -> Option<(&str, &str)> {
    let bytes = s.as_bytes();
    if bytes.len() < VERSION_LENGTH || !bytes[..VERSION_LENGTH].iter().all(u8::is_ascii_digit) {
        return None;
    }
    // The first 14 bytes are ASCII, so this is a char boundary.
    Some(s.split_at(VERSION_LENGTH))
}

#[cfg(test)]
#[path = "version_test.rs"]
mod tests;
