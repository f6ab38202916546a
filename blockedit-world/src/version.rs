use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum VersionParseError {
    #[error("Version {0} is obsolete and no longer supported!")]
    Obsolete(String),
    #[error("Invalid Format: {0}")]
    Invalid(String),
}

/// A parsed world version identifier: either a release triple such as
/// `1.8.8` (optionally a `-pre` variant of it) or a snapshot label such as
/// `12w34a`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorldVersion {
    Release { major: u8, minor: u8, patch: u8 },
    Snapshot(String),
}

impl WorldVersion {
    pub fn release(major: u8, minor: u8, patch: u8) -> Self {
        WorldVersion::Release {
            major,
            minor,
            patch,
        }
    }

    pub const fn is_release(&self) -> bool {
        matches!(self, WorldVersion::Release { .. })
    }

    pub const fn is_snapshot(&self) -> bool {
        matches!(self, WorldVersion::Snapshot(_))
    }
}

impl fmt::Display for WorldVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldVersion::Release {
                major,
                minor,
                patch,
            } => write!(f, "{major}.{minor}.{patch}"),
            WorldVersion::Snapshot(label) => f.write_str(label),
        }
    }
}

impl FromStr for WorldVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if is_obsolete_release_candidate(s) {
            return Err(VersionParseError::Obsolete(s.to_string()));
        }
        if is_snapshot_label(s) {
            return Ok(WorldVersion::Snapshot(s.to_string()));
        }
        if let Some((major, minor, patch)) = parse_release(s) {
            return Ok(WorldVersion::Release {
                major,
                minor,
                patch,
            });
        }
        Err(VersionParseError::Invalid(s.to_string()))
    }
}

/// `1.0.0-RC1` and `1.0.0-RC2` predate the release version scheme.
fn is_obsolete_release_candidate(s: &str) -> bool {
    matches!(s, "1.0.0-RC1" | "1.0.0-RC2")
}

/// Snapshot labels look like `12w34a`: one or two digits, a lowercase
/// letter, one or two digits, a lowercase letter.
fn is_snapshot_label(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut pos = 0;

    for _ in 0..2 {
        let digits = bytes[pos..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if !(1..=2).contains(&digits) {
            return false;
        }
        pos += digits;
        match bytes.get(pos) {
            Some(b) if b.is_ascii_lowercase() => pos += 1,
            _ => return false,
        }
    }

    pos == bytes.len()
}

/// Releases look like `1.8.8`, optionally suffixed `-pre` or `-preN`.
fn parse_release(s: &str) -> Option<(u8, u8, u8)> {
    let base = match s.split_once('-') {
        Some((base, suffix)) => {
            let n = suffix.strip_prefix("pre")?;
            if !(n.is_empty() || (n.len() == 1 && n.as_bytes()[0].is_ascii_digit())) {
                return None;
            }
            base
        }
        None => s,
    };

    let mut parts = base.split('.');
    let major = parts.next()?;
    let minor = parts.next()?;
    let patch = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    if major != "1" || minor.len() != 1 || !(1..=2).contains(&patch.len()) {
        return None;
    }
    if !minor.bytes().all(|b| b.is_ascii_digit()) || !patch.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    Some((1, minor.parse().ok()?, patch.parse().ok()?))
}
