//! The blueprint document and its incremental edit API (spec §3, §4.4).
//!
//! A [`Blueprint`] is an immutable value; every editing method here returns
//! a new instance rather than mutating `self` in place, matching the
//! "Functional edit operations... each return a new blueprint" contract.

mod connection;
mod port_path;
mod streamlet_ref;

pub use connection::{ResolvedConnection, StreamletConnection};
pub use port_path::{PortPath, ResolvedPort};
pub use streamlet_ref::{StreamletRef, VerifiedStreamlet};

use serde::{Deserialize, Serialize};

use crate::config_tree::ConfigTree;
use crate::descriptor::StreamletDescriptor;
use crate::problem::{dedup_problems, Problem};
use crate::verify;

/// The mutable-in-spirit, immutable-in-practice document a user edits:
/// defined descriptors, used streamlet refs, connections between their
/// ports, and the problem lists left by the last `verify()` (spec §3,
/// `Blueprint`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Blueprint {
    pub streamlets: Vec<StreamletRef>,
    pub connections: Vec<StreamletConnection>,
    pub streamlet_descriptors: Vec<StreamletDescriptor>,
    #[serde(default)]
    pub global_problems: Vec<Problem>,
}

/// A blueprint whose aggregate problem list is empty and whose refs and
/// connections are fully resolved (spec §3, `VerifiedBlueprint`). Obtained
/// only through [`Blueprint::verified`]; its fields are not constructible
/// directly, so a `VerifiedBlueprint` in hand is proof verification ran and
/// passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedBlueprint(Blueprint);

impl VerifiedBlueprint {
    pub fn blueprint(&self) -> &Blueprint {
        &self.0
    }

    pub fn into_blueprint(self) -> Blueprint {
        self.0
    }
}

/// Internal key used to compare two port paths for connection dedup /
/// disconnect matching once they've been normalized against the blueprint's
/// current streamlets and descriptor catalog (spec §4.4: duplicate
/// suppression compares endpoints "after resolving positional ports").
/// Falls back to the literal path text when resolution isn't yet possible
/// (unknown ref, unresolved descriptor, or ambiguous port) so that
/// dedup/disconnect still behaves predictably on not-yet-verified
/// blueprints rather than panicking or silently matching everything.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PortKey {
    Resolved(ResolvedPort),
    Unresolved(String),
}

impl Blueprint {
    pub fn new() -> Self {
        Blueprint::default()
    }

    /// Replaces the descriptor catalog wholesale (spec §4.4, `define`).
    pub fn define(&self, descriptors: Vec<StreamletDescriptor>) -> Blueprint {
        Blueprint {
            streamlet_descriptors: descriptors,
            ..self.clone()
        }
    }

    /// Appends a ref, replacing one of the same name in place if present
    /// (spec §4.4, `use`).
    pub fn use_streamlet(&self, r: StreamletRef) -> Blueprint {
        let mut streamlets = self.streamlets.clone();
        match streamlets.iter().position(|existing| existing.name == r.name) {
            Some(idx) => streamlets[idx] = r,
            None => streamlets.push(r),
        }
        Blueprint {
            streamlets,
            ..self.clone()
        }
    }

    /// Inserts or updates a ref by name (spec §4.4, `upsertStreamletRef`).
    ///
    /// * No existing ref, `class_name` given: inserts a new ref.
    /// * No existing ref, no `class_name`: no-op (nothing to create).
    /// * Existing ref, both arguments absent: returns `self` unchanged
    ///   (identity), per spec.
    /// * Existing ref, only some arguments given: the given ones are
    ///   applied, the rest (class name / metadata) are preserved.
    pub fn upsert_streamlet_ref(
        &self,
        name: &str,
        class_name: Option<String>,
        metadata: Option<ConfigTree>,
    ) -> Blueprint {
        let existing_idx = self.streamlets.iter().position(|r| r.name == name);

        match existing_idx {
            None => match class_name {
                None => self.clone(),
                Some(class_name) => {
                    let mut r = StreamletRef::new(name, class_name);
                    r.metadata = metadata;
                    self.use_streamlet(r)
                }
            },
            Some(idx) => {
                if class_name.is_none() && metadata.is_none() {
                    return self.clone();
                }
                let mut r = self.streamlets[idx].clone();
                if let Some(class_name) = class_name {
                    r.class_name = class_name;
                }
                if let Some(metadata) = metadata {
                    r.metadata = Some(metadata);
                }
                self.use_streamlet(r)
            }
        }
    }

    /// Removes a ref and every connection that touches it (spec §4.4, `remove`).
    pub fn remove(&self, name: &str) -> Blueprint {
        let streamlets: Vec<_> = self.streamlets.iter().filter(|r| r.name != name).cloned().collect();
        let connections: Vec<_> = self
            .connections
            .iter()
            .filter(|c| c.from.ref_name() != name && c.to.ref_name() != name)
            .cloned()
            .collect();
        Blueprint {
            streamlets,
            connections,
            ..self.clone()
        }
    }

    /// Looks up a ref's descriptor shape for port-path normalization,
    /// mirroring the verification engine's resolution but without emitting
    /// problems (spec §4.4, duplicate suppression).
    fn descriptor_for_ref(&self, ref_name: &str) -> Option<&StreamletDescriptor> {
        let r = self.streamlets.iter().find(|r| r.name == ref_name)?;
        self.streamlet_descriptors.iter().find(|d| d.class_name == r.class_name)
    }

    fn normalize_for_dedup(&self, path: &PortPath, is_outlet: bool) -> PortKey {
        let resolved = (|| {
            let descriptor = self.descriptor_for_ref(path.ref_name())?;
            match path {
                PortPath::Short(r) => {
                    let port = if is_outlet {
                        descriptor.shape.sole_outlet()?
                    } else {
                        descriptor.shape.sole_inlet()?
                    };
                    Some(ResolvedPort::new(r.clone(), port.name.clone()))
                }
                PortPath::Qualified(r, p) => {
                    let port = verify::resolve_named_port(&descriptor.shape, p, is_outlet)?;
                    Some(ResolvedPort::new(r.clone(), port.name.clone()))
                }
            }
        })();
        match resolved {
            Some(r) => PortKey::Resolved(r),
            None => PortKey::Unresolved(path.display()),
        }
    }

    /// Connects an outlet path to an inlet path, suppressing the insert if
    /// an equivalent connection (under normalization) already exists (spec
    /// §4.4, `connect`).
    pub fn connect(
        &self,
        from: impl Into<PortPath>,
        to: impl Into<PortPath>,
        metadata: Option<ConfigTree>,
    ) -> Blueprint {
        let from = from.into();
        let to = to.into();
        let from_key = self.normalize_for_dedup(&from, true);
        let to_key = self.normalize_for_dedup(&to, false);

        let duplicate = self.connections.iter().any(|c| {
            self.normalize_for_dedup(&c.from, true) == from_key
                && self.normalize_for_dedup(&c.to, false) == to_key
        });
        if duplicate {
            return self.clone();
        }

        let mut connection = StreamletConnection::new(from, to);
        connection.metadata = metadata;
        let mut connections = self.connections.clone();
        connections.push(connection);
        Blueprint {
            connections,
            ..self.clone()
        }
    }

    /// Removes every connection whose `from` or `to` matches `path` under
    /// normalization (spec §4.4, `disconnect`). A path matching nothing is
    /// a no-op.
    pub fn disconnect(&self, path: impl Into<PortPath>) -> Blueprint {
        let path = path.into();
        let as_outlet_key = self.normalize_for_dedup(&path, true);
        let as_inlet_key = self.normalize_for_dedup(&path, false);

        let connections: Vec<_> = self
            .connections
            .iter()
            .filter(|c| {
                let from_key = self.normalize_for_dedup(&c.from, true);
                let to_key = self.normalize_for_dedup(&c.to, false);
                from_key != as_outlet_key && to_key != as_inlet_key
            })
            .cloned()
            .collect();
        Blueprint {
            connections,
            ..self.clone()
        }
    }

    /// Runs the verification engine, returning a new blueprint with
    /// `global_problems` and every ref/connection's `problems` populated
    /// (spec §4.4, `verify`). Idempotent: verifying an already-verified
    /// blueprint reproduces the same result.
    pub fn verify(&self) -> Blueprint {
        verify::run(self)
    }

    /// All problems across the blueprint — global, per-ref, and
    /// per-connection — flattened and deduplicated (spec §4.4, `verified`;
    /// SPEC_FULL §B.2).
    pub fn report(&self) -> Vec<Problem> {
        let mut all = self.global_problems.clone();
        for r in &self.streamlets {
            all.extend(r.problems.iter().cloned());
        }
        for c in &self.connections {
            all.extend(c.problems.iter().cloned());
        }
        dedup_problems(all)
    }

    /// `Ok` with a [`VerifiedBlueprint`] when [`Blueprint::report`] is
    /// empty, else `Err` with the problem list (spec §4.4, `verified`).
    pub fn verified(&self) -> Result<VerifiedBlueprint, Vec<Problem>> {
        let problems = self.report();
        if problems.is_empty() {
            Ok(VerifiedBlueprint(self.clone()))
        } else {
            Err(problems)
        }
    }
}
