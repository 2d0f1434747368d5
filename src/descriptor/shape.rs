//! Ports and streamlet shapes (spec §3, `Port`/`StreamletShape`).

use serde::{Deserialize, Serialize};

use crate::schema::Schema;

/// Whether a port is an inlet or an outlet. Not part of the wire shape of
/// [`Port`] itself (inlets and outlets are kept in separate vectors on
/// [`StreamletShape`]); used by the verification engine when it needs to
/// talk about "a port" without committing to which list it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PortDirection {
    Inlet,
    Outlet,
}

/// A typed port (spec §3, `Port`). Port names must match
/// `^[a-z0-9][a-z0-9-]*$` and not end with `-`; see [`crate::names::is_valid_port_name`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Port {
    pub name: String,
    pub schema: Schema,
}

impl Port {
    pub fn new(name: impl Into<String>, schema: Schema) -> Self {
        Port { name: name.into(), schema }
    }
}

/// The ordered inlets and outlets of a streamlet class (spec §3,
/// `StreamletShape`). Order is significant: it is how the positional
/// helpers (`in0`, `in1`, `in`, `out`) are defined.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StreamletShape {
    pub inlets: Vec<Port>,
    pub outlets: Vec<Port>,
}

impl StreamletShape {
    pub fn new(inlets: Vec<Port>, outlets: Vec<Port>) -> Self {
        StreamletShape { inlets, outlets }
    }

    /// Looks up an inlet by name.
    pub fn inlet(&self, name: &str) -> Option<&Port> {
        self.inlets.iter().find(|p| p.name == name)
    }

    /// Looks up an outlet by name.
    pub fn outlet(&self, name: &str) -> Option<&Port> {
        self.outlets.iter().find(|p| p.name == name)
    }

    /// The first inlet, positionally (`in0`).
    pub fn in0(&self) -> Option<&Port> {
        self.inlets.first()
    }

    /// The second inlet, positionally (`in1`).
    pub fn in1(&self) -> Option<&Port> {
        self.inlets.get(1)
    }

    /// The sole inlet, if there is exactly one.
    pub fn sole_inlet(&self) -> Option<&Port> {
        match self.inlets.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }

    /// The sole outlet, if there is exactly one.
    pub fn sole_outlet(&self) -> Option<&Port> {
        match self.outlets.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }
}
