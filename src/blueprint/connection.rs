//! `StreamletConnection` — an edge from an outlet port path to an inlet
//! port path (spec §3).

use serde::{Deserialize, Serialize};

use crate::blueprint::port_path::{PortPath, ResolvedPort};
use crate::config_tree::ConfigTree;
use crate::problem::Problem;

/// A connection between a `from` outlet path and a `to` inlet path (spec
/// §3, `StreamletConnection`). `resolved` is populated by verification once
/// both sides have been normalized to a canonical `(refName, portName)`
/// pair (spec §4.4: "normalizes into a canonical `(refName, portName)` pair
/// during verification").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StreamletConnection {
    pub from: PortPath,
    pub to: PortPath,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ConfigTree>,
    #[serde(default)]
    pub problems: Vec<Problem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved: Option<ResolvedConnection>,
}

/// The canonical resolution of a connection's endpoints, set by the
/// verification engine's port-path resolution pass (spec §4.5, pass 4).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolvedConnection {
    pub from: ResolvedPort,
    pub to: ResolvedPort,
}

impl StreamletConnection {
    pub fn new(from: impl Into<PortPath>, to: impl Into<PortPath>) -> Self {
        StreamletConnection {
            from: from.into(),
            to: to.into(),
            metadata: None,
            problems: Vec::new(),
            resolved: None,
        }
    }

    pub fn with_metadata(mut self, metadata: ConfigTree) -> Self {
        self.metadata = Some(metadata);
        self
    }
}
