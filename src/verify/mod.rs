//! The verification engine (spec §4.5) — a multi-pass validator that turns
//! a [`Blueprint`] into the same blueprint with every problem list
//! populated. Each pass may short-circuit within a single ref or
//! connection, but never aborts the run: a broken ref still gets a
//! `problems` list, a broken connection still ends up in the output.

mod config_parameter;
mod volume_mount;

use std::collections::{HashMap, HashSet};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use tracing::{debug, instrument, warn};

use crate::blueprint::{
    Blueprint, PortPath, ResolvedConnection, ResolvedPort, StreamletConnection, StreamletRef,
    VerifiedStreamlet,
};
use crate::descriptor::{Port, StreamletShape};
use crate::names::{is_valid_class_name, is_valid_port_name, is_valid_ref_name};
use crate::problem::{dedup_problems, Problem, UnconnectedInlet};

/// Runs every pass in spec §4.5 order and returns a new blueprint with
/// `global_problems`, and every ref's and connection's `problems`,
/// populated. Pure and idempotent: re-running on the result reproduces it.
#[instrument(skip_all, fields(streamlets = bp.streamlets.len(), connections = bp.connections.len()))]
pub fn run(bp: &Blueprint) -> Blueprint {
    let mut global_problems = Vec::new();

    // Pass 1: empty checks.
    if bp.streamlet_descriptors.is_empty() {
        warn!("blueprint has no streamlet descriptors");
        global_problems.push(Problem::EmptyStreamletDescriptors);
    }
    if bp.streamlets.is_empty() {
        warn!("blueprint has no streamlets");
        global_problems.push(Problem::EmptyStreamlets);
    }

    // Passes 2 & 3: ref resolution + descriptor well-formedness, attributed
    // to whichever ref actually uses the descriptor (spec §4.5 pass 8:
    // descriptors no ref uses produce no problems).
    let streamlets = resolve_streamlets(bp);
    let ref_by_name: HashMap<&str, &StreamletRef> =
        streamlets.iter().map(|r| (r.name.as_str(), r)).collect();

    // Passes 4-7: port-path resolution, connection legality, schema
    // compatibility, unconnected inlets.
    let (connections, unconnected) = resolve_connections(&bp.connections, &ref_by_name);
    if !unconnected.is_empty() {
        global_problems.push(Problem::UnconnectedInlets { inlets: unconnected });
    }

    Blueprint {
        streamlets,
        connections,
        streamlet_descriptors: bp.streamlet_descriptors.clone(),
        global_problems: dedup_problems(global_problems),
    }
}

#[instrument(skip_all)]
fn resolve_streamlets(bp: &Blueprint) -> Vec<StreamletRef> {
    bp.streamlets
        .iter()
        .map(|r| {
            let mut problems = Vec::new();

            if !is_valid_ref_name(&r.name) {
                problems.push(Problem::InvalidStreamletName { name: r.name.clone() });
            }

            let descriptor = bp
                .streamlet_descriptors
                .iter()
                .find(|d| d.class_name == r.class_name);

            let verified = match descriptor {
                None => {
                    debug!(ref_name = %r.name, class_name = %r.class_name, "descriptor not found");
                    problems.push(Problem::StreamletDescriptorNotFound {
                        ref_name: r.name.clone(),
                        class_name: r.class_name.clone(),
                    });
                    None
                }
                Some(descriptor) => {
                    if !is_valid_class_name(&descriptor.class_name) {
                        problems.push(Problem::InvalidStreamletClassName {
                            ref_name: r.name.clone(),
                            class_name: descriptor.class_name.clone(),
                        });
                    }
                    for inlet in &descriptor.shape.inlets {
                        if !is_valid_port_name(&inlet.name) {
                            problems.push(Problem::InvalidInletName {
                                class_name: descriptor.class_name.clone(),
                                name: inlet.name.clone(),
                            });
                        }
                    }
                    for outlet in &descriptor.shape.outlets {
                        if !is_valid_port_name(&outlet.name) {
                            problems.push(Problem::InvalidOutletName {
                                class_name: descriptor.class_name.clone(),
                                name: outlet.name.clone(),
                            });
                        }
                    }
                    problems.extend(config_parameter::validate(&descriptor.config_parameters));
                    problems.extend(volume_mount::validate(&descriptor.volume_mounts));

                    Some(VerifiedStreamlet {
                        ref_name: r.name.clone(),
                        class_name: r.class_name.clone(),
                        descriptor: descriptor.clone(),
                    })
                }
            };

            StreamletRef {
                name: r.name.clone(),
                class_name: r.class_name.clone(),
                metadata: r.metadata.clone(),
                problems: dedup_problems(problems),
                verified,
            }
        })
        .collect()
}

/// Resolves a named port against a shape, honoring the positional
/// conveniences (`in`, `out`, `in0`, `in1`) alongside literal port names
/// (spec §9, "Positional inlets").
pub(crate) fn resolve_named_port<'a>(
    shape: &'a StreamletShape,
    name: &str,
    is_outlet: bool,
) -> Option<&'a Port> {
    match (name, is_outlet) {
        ("out", true) => shape.sole_outlet(),
        ("in", false) => shape.sole_inlet(),
        ("in0", false) => shape.in0(),
        ("in1", false) => shape.in1(),
        (other, true) => shape.outlet(other),
        (other, false) => shape.inlet(other),
    }
}

fn resolve_outlet_path(
    path: &PortPath,
    ref_by_name: &HashMap<&str, &StreamletRef>,
    problems: &mut Vec<Problem>,
) -> Option<ResolvedPort> {
    let ref_name = path.ref_name();
    let r = ref_by_name.get(ref_name)?;
    let verified = r.verified.as_ref()?;

    match path {
        PortPath::Short(_) => match verified.descriptor.shape.outlets.as_slice() {
            [only] => Some(ResolvedPort::new(ref_name, only.name.clone())),
            [] => None,
            _ => {
                problems.push(Problem::AmbiguousOutlet { ref_name: ref_name.to_string() });
                None
            }
        },
        PortPath::Qualified(_, port_name) => {
            resolve_named_port(&verified.descriptor.shape, port_name, true)
                .map(|p| ResolvedPort::new(ref_name, p.name.clone()))
        }
    }
}

fn resolve_inlet_path(
    path: &PortPath,
    ref_by_name: &HashMap<&str, &StreamletRef>,
) -> Option<ResolvedPort> {
    let ref_name = path.ref_name();
    let r = ref_by_name.get(ref_name)?;
    let verified = r.verified.as_ref()?;

    match path {
        PortPath::Short(_) => match verified.descriptor.shape.inlets.as_slice() {
            [only] => Some(ResolvedPort::new(ref_name, only.name.clone())),
            _ => None,
        },
        PortPath::Qualified(_, port_name) => {
            resolve_named_port(&verified.descriptor.shape, port_name, false)
                .map(|p| ResolvedPort::new(ref_name, p.name.clone()))
        }
    }
}

/// Interns a resolved port as a graph node, reusing the existing one if
/// this `(refName, portName)` pair was already seen.
fn port_node(
    graph: &mut DiGraph<ResolvedPort, ()>,
    node_of: &mut HashMap<(String, String), NodeIndex>,
    port: &ResolvedPort,
) -> NodeIndex {
    let key = (port.ref_name.clone(), port.port_name.clone());
    *node_of
        .entry(key)
        .or_insert_with(|| graph.add_node(port.clone()))
}

fn schema_of<'a>(
    ref_by_name: &HashMap<&str, &'a StreamletRef>,
    resolved: &ResolvedPort,
    is_outlet: bool,
) -> Option<&'a crate::schema::Schema> {
    let verified = ref_by_name.get(resolved.ref_name.as_str())?.verified.as_ref()?;
    let port = if is_outlet {
        verified.descriptor.shape.outlet(&resolved.port_name)
    } else {
        verified.descriptor.shape.inlet(&resolved.port_name)
    };
    port.map(|p| &p.schema)
}

#[instrument(skip_all, fields(count = connections.len()))]
fn resolve_connections(
    connections: &[StreamletConnection],
    ref_by_name: &HashMap<&str, &StreamletRef>,
) -> (Vec<StreamletConnection>, Vec<UnconnectedInlet>) {
    // Pass 4: port-path resolution.
    let mut resolved_from = Vec::with_capacity(connections.len());
    let mut resolved_to = Vec::with_capacity(connections.len());
    let mut per_connection_problems: Vec<Vec<Problem>> = Vec::with_capacity(connections.len());

    for c in connections {
        let mut problems = Vec::new();
        let from = resolve_outlet_path(&c.from, ref_by_name, &mut problems);
        if from.is_none() && !problems.iter().any(|p| matches!(p, Problem::AmbiguousOutlet { .. })) {
            problems.push(Problem::PortPathNotFound { path: c.from.display() });
        }
        let to = resolve_inlet_path(&c.to, ref_by_name);
        if to.is_none() {
            problems.push(Problem::PortPathNotFound { path: c.to.display() });
        }
        resolved_from.push(from);
        resolved_to.push(to);
        per_connection_problems.push(problems);
    }

    // Pass 5: connection legality — fan-in. Resolved ports become nodes in
    // a directed graph, one edge per outlet-to-inlet connection; an inlet
    // with more than one distinct incoming edge is an illegal fan-in. A
    // graph (rather than a plain multimap) keeps this symmetric with how
    // the descriptor builder's savepoint mapping walks the same topology.
    let mut graph: DiGraph<ResolvedPort, ()> = DiGraph::new();
    let mut node_of: HashMap<(String, String), NodeIndex> = HashMap::new();
    for (from, to) in resolved_from.iter().zip(resolved_to.iter()) {
        if let (Some(from), Some(to)) = (from, to) {
            let from_node = port_node(&mut graph, &mut node_of, from);
            let to_node = port_node(&mut graph, &mut node_of, to);
            if graph.find_edge(from_node, to_node).is_none() {
                graph.add_edge(from_node, to_node, ());
            }
        }
    }

    let mut addressed: HashSet<(String, String)> = HashSet::new();
    for (idx, to) in resolved_to.iter().enumerate() {
        let Some(to) = to else { continue };
        let key = (to.ref_name.clone(), to.port_name.clone());
        addressed.insert(key.clone());

        let to_node = node_of[&key];
        let mut sources: Vec<String> = graph
            .edges_directed(to_node, Direction::Incoming)
            .map(|edge| graph[edge.source()].display())
            .collect();
        sources.sort();
        sources.dedup();
        if sources.len() > 1 {
            per_connection_problems[idx].push(Problem::IllegalConnection {
                sources,
                target: to.display(),
            });
            continue;
        }

        // Pass 6: schema compatibility, only for non-illegal connections.
        if let Some(from) = &resolved_from[idx] {
            let from_schema = schema_of(ref_by_name, from, true);
            let to_schema = schema_of(ref_by_name, to, false);
            if let (Some(from_schema), Some(to_schema)) = (from_schema, to_schema) {
                if !from_schema.is_compatible_with(to_schema) {
                    per_connection_problems[idx].push(Problem::IncompatibleSchema {
                        from: from.display(),
                        to: to.display(),
                    });
                }
            }
        }
    }

    let resolved_connections: Vec<StreamletConnection> = connections
        .iter()
        .enumerate()
        .map(|(idx, c)| {
            let resolved = match (&resolved_from[idx], &resolved_to[idx]) {
                (Some(from), Some(to)) => Some(ResolvedConnection { from: from.clone(), to: to.clone() }),
                _ => None,
            };
            StreamletConnection {
                from: c.from.clone(),
                to: c.to.clone(),
                metadata: c.metadata.clone(),
                problems: dedup_problems(std::mem::take(&mut per_connection_problems[idx])),
                resolved,
            }
        })
        .collect();

    // Pass 7: unconnected inlets, excluding those already addressed by a
    // resolved connection (even one that went on to fail legality/schema).
    let mut unconnected = Vec::new();
    for r in ref_by_name.values() {
        let Some(verified) = &r.verified else { continue };
        for inlet in &verified.descriptor.shape.inlets {
            let key = (r.name.clone(), inlet.name.clone());
            if !addressed.contains(&key) {
                unconnected.push(UnconnectedInlet {
                    ref_name: r.name.clone(),
                    inlet: inlet.name.clone(),
                });
            }
        }
    }
    unconnected.sort_by(|a, b| (&a.ref_name, &a.inlet).cmp(&(&b.ref_name, &b.inlet)));

    (resolved_connections, unconnected)
}
