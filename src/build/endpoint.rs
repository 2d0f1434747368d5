//! `Endpoint` — the externally addressable port of a server streamlet
//! (spec §3).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub app_id: String,
    pub streamlet_ref_name: String,
    pub container_port: u16,
}

impl Endpoint {
    pub fn new(app_id: impl Into<String>, streamlet_ref_name: impl Into<String>, container_port: u16) -> Self {
        Endpoint {
            app_id: app_id.into(),
            streamlet_ref_name: streamlet_ref_name.into(),
            container_port,
        }
    }
}
