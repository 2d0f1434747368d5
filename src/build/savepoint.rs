//! `Savepoint` — the canonical name of the durable channel between an
//! outlet and its downstream inlets (spec §3).

use serde::{Deserialize, Serialize};

/// The canonical name of a durable channel, always keyed by the *outlet*
/// side of a connection (spec §3: "it always refers to the outlet side").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Savepoint {
    pub app_id: String,
    pub streamlet_ref_name: String,
    pub outlet_name: String,
}

impl Savepoint {
    pub fn new(app_id: impl Into<String>, streamlet_ref_name: impl Into<String>, outlet_name: impl Into<String>) -> Self {
        Savepoint {
            app_id: app_id.into(),
            streamlet_ref_name: streamlet_ref_name.into(),
            outlet_name: outlet_name.into(),
        }
    }
}
