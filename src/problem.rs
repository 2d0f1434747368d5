//! Problem taxonomy — the closed, stable contract with callers.
//!
//! `Problem` is deliberately not a `thiserror` error: it never propagates as
//! `Err`. It is a plain tagged sum that accumulates in a blueprint's problem
//! lists and is reported back to callers as data; a single closed enum
//! covers every variant since each one's payload shape differs.

use serde::{Deserialize, Serialize};

/// Severity of a problem. The core only ever produces `Error`; the field
/// exists for a future caller-facing lint layer that may want to downgrade
/// some variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
}

/// An inlet left unconnected after a completed verification pass
/// (part of the payload of [`Problem::UnconnectedInlets`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnconnectedInlet {
    pub ref_name: String,
    pub inlet: String,
}

/// The closed set of verification findings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Problem {
    EmptyStreamlets,
    EmptyStreamletDescriptors,
    InvalidStreamletName {
        name: String,
    },
    InvalidStreamletClassName {
        ref_name: String,
        class_name: String,
    },
    InvalidInletName {
        class_name: String,
        name: String,
    },
    InvalidOutletName {
        class_name: String,
        name: String,
    },
    StreamletDescriptorNotFound {
        ref_name: String,
        class_name: String,
    },
    PortPathNotFound {
        path: String,
    },
    AmbiguousOutlet {
        ref_name: String,
    },
    IllegalConnection {
        sources: Vec<String>,
        target: String,
    },
    IncompatibleSchema {
        from: String,
        to: String,
    },
    UnconnectedInlets {
        inlets: Vec<UnconnectedInlet>,
    },
    DuplicateConfigParameterKeyFound {
        key: String,
    },
    InvalidValidationPatternConfigParameter {
        key: String,
    },
    InvalidDefaultValueInConfigParameter {
        key: String,
        kind: String,
        value: String,
    },
    DuplicateVolumeMountName {
        name: String,
    },
    DuplicateVolumeMountPath {
        path: String,
    },
    InvalidVolumeMountName {
        name: String,
    },
    EmptyVolumeMountPath {
        name: String,
    },
    NonAbsoluteVolumeMountPath {
        name: String,
    },
    BacktrackingVolumeMountPath {
        name: String,
    },
    InvalidVolumeMountAccessMode {
        name: String,
        mode: String,
    },
    InvalidApplicationId {
        raw: String,
    },
}

impl Problem {
    /// Every problem in this core is an error; see the doc comment on
    /// [`Severity`].
    pub fn severity(&self) -> Severity {
        Severity::Error
    }

    /// Human-readable message, independent of serialized field names.
    pub fn message(&self) -> String {
        match self {
            Problem::EmptyStreamlets => "blueprint has no streamlets".to_string(),
            Problem::EmptyStreamletDescriptors => {
                "blueprint has no streamlet descriptors".to_string()
            }
            Problem::InvalidStreamletName { name } => {
                format!("'{name}' is not a valid streamlet name")
            }
            Problem::InvalidStreamletClassName { ref_name, class_name } => {
                format!("streamlet '{ref_name}' has invalid class name '{class_name}'")
            }
            Problem::InvalidInletName { class_name, name } => {
                format!("streamlet class '{class_name}' has invalid inlet name '{name}'")
            }
            Problem::InvalidOutletName { class_name, name } => {
                format!("streamlet class '{class_name}' has invalid outlet name '{name}'")
            }
            Problem::StreamletDescriptorNotFound { ref_name, class_name } => format!(
                "streamlet '{ref_name}' references unknown class '{class_name}'"
            ),
            Problem::PortPathNotFound { path } => format!("port path '{path}' not found"),
            Problem::AmbiguousOutlet { ref_name } => format!(
                "streamlet '{ref_name}' has more than one outlet; a port name is required"
            ),
            Problem::IllegalConnection { sources, target } => format!(
                "inlet '{target}' has more than one incoming connection: {}",
                sources.join(", ")
            ),
            Problem::IncompatibleSchema { from, to } => {
                format!("schema of outlet '{from}' is incompatible with inlet '{to}'")
            }
            Problem::UnconnectedInlets { inlets } => format!(
                "unconnected inlets: {}",
                inlets
                    .iter()
                    .map(|i| format!("{}.{}", i.ref_name, i.inlet))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            Problem::DuplicateConfigParameterKeyFound { key } => {
                format!("duplicate config parameter key '{key}'")
            }
            Problem::InvalidValidationPatternConfigParameter { key } => format!(
                "config parameter '{key}' has an invalid validation pattern"
            ),
            Problem::InvalidDefaultValueInConfigParameter { key, kind, value } => format!(
                "config parameter '{key}' has default value '{value}' invalid for kind '{kind}'"
            ),
            Problem::DuplicateVolumeMountName { name } => {
                format!("duplicate volume mount name '{name}'")
            }
            Problem::DuplicateVolumeMountPath { path } => {
                format!("duplicate volume mount path '{path}'")
            }
            Problem::InvalidVolumeMountName { name } => {
                format!("'{name}' is not a valid volume mount name")
            }
            Problem::EmptyVolumeMountPath { name } => {
                format!("volume mount '{name}' has an empty path")
            }
            Problem::NonAbsoluteVolumeMountPath { name } => {
                format!("volume mount '{name}' has a non-absolute path")
            }
            Problem::BacktrackingVolumeMountPath { name } => format!(
                "volume mount '{name}' has a path containing a '..' segment"
            ),
            Problem::InvalidVolumeMountAccessMode { name, mode } => format!(
                "volume mount '{name}' has an unknown access mode '{mode}'"
            ),
            Problem::InvalidApplicationId { raw } => {
                format!("application id '{raw}' normalizes to an empty string")
            }
        }
    }
}

/// Deduplicates a problem list by structural equality, preserving first
/// occurrence order. Callers are expected to treat a problem list as a set,
/// but a stable order makes snapshot-style assertions practical.
pub fn dedup_problems(mut problems: Vec<Problem>) -> Vec<Problem> {
    let mut seen = std::collections::HashSet::new();
    problems.retain(|p| seen.insert(p.clone()));
    problems
}
