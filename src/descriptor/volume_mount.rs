//! Volume mount descriptors (spec §3, §4.5b).

use serde::{Deserialize, Serialize};

/// The access mode requested for a volume mount (spec §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessMode {
    ReadOnlyMany,
    ReadWriteMany,
    ReadWriteOnce,
}

impl AccessMode {
    /// Parses the wire form of an access mode, returning `None` for any
    /// value outside the closed set (spec §4.5b, `InvalidVolumeMountAccessMode`).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ReadOnlyMany" => Some(AccessMode::ReadOnlyMany),
            "ReadWriteMany" => Some(AccessMode::ReadWriteMany),
            "ReadWriteOnce" => Some(AccessMode::ReadWriteOnce),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccessMode::ReadOnlyMany => "ReadOnlyMany",
            AccessMode::ReadWriteMany => "ReadWriteMany",
            AccessMode::ReadWriteOnce => "ReadWriteOnce",
        }
    }
}

/// A volume a streamlet class requires be mounted (spec §3,
/// `VolumeMountDescriptor`). Stored with the access mode as the raw string
/// supplied by the caller so that an invalid mode can still be reported
/// with its offending value (spec §4.5b, `InvalidVolumeMountAccessMode`);
/// [`VolumeMountDescriptor::access_mode`] parses it on demand.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VolumeMountDescriptor {
    pub name: String,
    pub path: String,
    pub access_mode: String,
}

impl VolumeMountDescriptor {
    pub fn new(name: impl Into<String>, path: impl Into<String>, access_mode: AccessMode) -> Self {
        VolumeMountDescriptor {
            name: name.into(),
            path: path.into(),
            access_mode: access_mode.as_str().to_string(),
        }
    }

    /// Parses the stored access mode, returning `None` if it is not one of
    /// the closed set of recognized values.
    pub fn parsed_access_mode(&self) -> Option<AccessMode> {
        AccessMode::parse(&self.access_mode)
    }
}
