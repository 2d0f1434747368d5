//! `StreamletDeployment` — the per-ref deployment record lowered by the
//! descriptor builder (spec §3, §4.6 step 4).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::build::{Endpoint, Savepoint};
use crate::config_tree::ConfigTree;
use crate::descriptor::VolumeMountDescriptor;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StreamletDeployment {
    pub name: String,
    pub runtime: String,
    pub image: String,
    pub class_name: String,
    pub streamlet_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<Endpoint>,
    pub secret_name: String,
    pub config: ConfigTree,
    pub port_mappings: BTreeMap<String, Savepoint>,
    pub volume_mounts: Vec<VolumeMountDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<u32>,
}
