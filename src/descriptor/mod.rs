//! Streamlet descriptor catalog (spec §4.2) — immutable descriptions of
//! streamlet classes, supplied by the caller and never mutated by the core.

mod config_parameter;
mod shape;
mod volume_mount;

pub use config_parameter::{ConfigParameterDescriptor, ConfigParameterKind};
pub use shape::{Port, PortDirection, StreamletShape};
pub use volume_mount::{AccessMode, VolumeMountDescriptor};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An immutable description of a streamlet class (spec §3, `StreamletDescriptor`).
///
/// `StreamletDescriptor`s are supplied programmatically by the caller (§4.2)
/// and resolved by class name during verification; the core never
/// constructs or mutates one on its own.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StreamletDescriptor {
    pub class_name: String,
    pub runtime: String,
    pub image: String,
    pub shape: StreamletShape,
    pub config_parameters: Vec<ConfigParameterDescriptor>,
    pub volume_mounts: Vec<VolumeMountDescriptor>,
    pub server_attribute: bool,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

impl StreamletDescriptor {
    /// Convenience constructor for a non-server descriptor with no config
    /// parameters or volume mounts, for callers assembling catalogs inline.
    pub fn new(class_name: impl Into<String>, runtime: impl Into<String>, image: impl Into<String>, shape: StreamletShape) -> Self {
        StreamletDescriptor {
            class_name: class_name.into(),
            runtime: runtime.into(),
            image: image.into(),
            shape,
            config_parameters: Vec::new(),
            volume_mounts: Vec::new(),
            server_attribute: false,
            labels: BTreeMap::new(),
        }
    }

    pub fn with_server_attribute(mut self, server: bool) -> Self {
        self.server_attribute = server;
        self
    }

    pub fn with_config_parameters(mut self, params: Vec<ConfigParameterDescriptor>) -> Self {
        self.config_parameters = params;
        self
    }

    pub fn with_volume_mounts(mut self, mounts: Vec<VolumeMountDescriptor>) -> Self {
        self.volume_mounts = mounts;
        self
    }
}
