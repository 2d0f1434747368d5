//! `StreamletRef` — a named instance of a streamlet class within a
//! blueprint (spec §3).

use serde::{Deserialize, Serialize};

use crate::config_tree::ConfigTree;
use crate::descriptor::StreamletDescriptor;
use crate::problem::Problem;

/// A resolved streamlet ref, cached on [`StreamletRef::verified`] once its
/// `className` has been matched against the descriptor catalog (spec §4.5,
/// pass 3: "On success, attach `VerifiedStreamlet`").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerifiedStreamlet {
    pub ref_name: String,
    pub class_name: String,
    pub descriptor: StreamletDescriptor,
}

/// A named instance of a streamlet class (spec §3, `StreamletRef`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StreamletRef {
    pub name: String,
    pub class_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ConfigTree>,
    #[serde(default)]
    pub problems: Vec<Problem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<VerifiedStreamlet>,
}

impl StreamletRef {
    pub fn new(name: impl Into<String>, class_name: impl Into<String>) -> Self {
        StreamletRef {
            name: name.into(),
            class_name: class_name.into(),
            metadata: None,
            problems: Vec::new(),
            verified: None,
        }
    }

    pub fn with_metadata(mut self, metadata: ConfigTree) -> Self {
        self.metadata = Some(metadata);
        self
    }
}
