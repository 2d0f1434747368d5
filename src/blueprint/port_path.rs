//! `PortPath` — a reference to a port, either by streamlet-ref name alone
//! (resolved positionally during verification) or fully qualified
//! (spec §3, `PortPath`; design rationale in `SPEC_FULL.md`/§9 Design Notes,
//! "Port path ambiguity").

use serde::{Deserialize, Serialize};

/// A path to a port: either a bare streamlet ref name (resolved uniquely
/// against the ref's shape during verification) or a `ref.port` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PortPath {
    Short(String),
    Qualified(String, String),
}

impl PortPath {
    /// Parses the conventional `"ref"` or `"ref.port"` string form used by
    /// blueprint documents.
    pub fn parse(s: &str) -> Self {
        match s.split_once('.') {
            Some((ref_name, port)) => PortPath::Qualified(ref_name.to_string(), port.to_string()),
            None => PortPath::Short(s.to_string()),
        }
    }

    /// The streamlet ref name this path refers to, regardless of form.
    pub fn ref_name(&self) -> &str {
        match self {
            PortPath::Short(r) => r,
            PortPath::Qualified(r, _) => r,
        }
    }

    /// Renders the path back to its canonical string form, for error
    /// messages and `PortPathNotFound` payloads.
    pub fn display(&self) -> String {
        match self {
            PortPath::Short(r) => r.clone(),
            PortPath::Qualified(r, p) => format!("{r}.{p}"),
        }
    }
}

impl From<&str> for PortPath {
    fn from(s: &str) -> Self {
        PortPath::parse(s)
    }
}

impl From<String> for PortPath {
    fn from(s: String) -> Self {
        PortPath::parse(&s)
    }
}

/// A fully resolved `(refName, portName)` pair — the canonical form a
/// `PortPath` normalizes to during verification (spec §4.4, §9).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedPort {
    pub ref_name: String,
    pub port_name: String,
}

impl ResolvedPort {
    pub fn new(ref_name: impl Into<String>, port_name: impl Into<String>) -> Self {
        ResolvedPort {
            ref_name: ref_name.into(),
            port_name: port_name.into(),
        }
    }

    pub fn display(&self) -> String {
        format!("{}.{}", self.ref_name, self.port_name)
    }
}
