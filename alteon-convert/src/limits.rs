//! Scan bounds for the numeric id spaces.
//!
//! The legacy platform caps virtual-server and group ids, so the converter
//! probes a bounded id range per element kind. The historical caps are the
//! defaults; a TOML file can override them for devices running with raised
//! limits.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Upper bounds (exclusive) on the scanned id ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScanLimits {
    pub max_virtual_servers: u32,
    pub max_service_groups: u32,
}

impl Default for ScanLimits {
    fn default() -> Self {
        ScanLimits {
            max_virtual_servers: 300,
            max_service_groups: 500,
        }
    }
}

/// Errors returned when loading a limits file.
#[derive(Debug, Error)]
pub enum LimitsLoadError {
    #[error("failed to read limits file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse limits file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Load scan limits from a TOML file. Absent keys keep their defaults.
pub fn load_limits(path: &Path) -> Result<ScanLimits, LimitsLoadError> {
    let raw = fs::read_to_string(path).map_err(|source| LimitsLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| LimitsLoadError::Parse {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::{load_limits, LimitsLoadError, ScanLimits};

    #[test]
    fn defaults_match_the_legacy_platform_caps() {
        let limits = ScanLimits::default();
        assert_eq!(limits.max_virtual_servers, 300);
        assert_eq!(limits.max_service_groups, 500);
    }

    #[test]
    fn loads_partial_override_keeping_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("limits.toml");
        fs::write(&path, "max_virtual_servers = 1024\n").expect("write limits");

        let limits = load_limits(&path).expect("limits should parse");
        assert_eq!(limits.max_virtual_servers, 1024);
        assert_eq!(limits.max_service_groups, 500);
    }

    #[test]
    fn returns_parse_error_for_invalid_toml() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.toml");
        fs::write(&path, "max_virtual_servers = [oops").expect("write broken file");

        let err = load_limits(&path).expect_err("should fail parse");
        match err {
            LimitsLoadError::Parse { .. } => {}
            other => panic!("unexpected error variant: {other}"),
        }
    }
}
