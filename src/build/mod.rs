//! The descriptor builder (spec §4.6) — lowers a [`VerifiedBlueprint`] into
//! a deployable [`ApplicationDescriptor`]. Pure: no I/O, no mutation of its
//! input, deterministic in `(appId, appVersion, blueprint, agentPaths)`.

mod deployment;
mod endpoint;
mod savepoint;

pub use deployment::StreamletDeployment;
pub use endpoint::Endpoint;
pub use savepoint::Savepoint;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::blueprint::{Blueprint, ResolvedConnection, VerifiedBlueprint, VerifiedStreamlet};
use crate::config_tree::ConfigTree;
use crate::constants::{DESCRIPTOR_VERSION, MINIMUM_ENDPOINT_CONTAINER_PORT};
use crate::error::{BlueprintError, Result};
use crate::names::{normalize_app_id, secret_name};

/// A verified connection carried forward into the descriptor for
/// documentation purposes only (spec §4.6 step 5, §9: "treat it as
/// advisory" — the orchestrator derives topics from savepoints alone).
pub type VerifiedConnection = ResolvedConnection;

/// The deployable lowering of a verified blueprint (spec §3,
/// `ApplicationDescriptor`). Serializable to JSON; field names are a stable
/// contract with the downstream operator (spec §6).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApplicationDescriptor {
    pub app_id: String,
    pub app_version: String,
    pub streamlets: Vec<VerifiedStreamlet>,
    pub connections: Vec<VerifiedConnection>,
    pub deployments: Vec<StreamletDeployment>,
    pub agent_paths: BTreeMap<String, String>,
    pub version: u32,
}

const SERVER_CONTAINER_PORT_KEY: &str = "cloudflow.internal.server.container-port";

/// Lowers a [`VerifiedBlueprint`] into an [`ApplicationDescriptor`] (spec
/// §4.6). `agent_paths` is threaded through verbatim (spec §6: "Prometheus
/// → jar path string" is the one enumerated entry, but the map is
/// caller-supplied and opaque to the core).
#[instrument(skip_all, fields(app_id = %app_id))]
pub fn build(
    app_id: &str,
    app_version: &str,
    blueprint: &VerifiedBlueprint,
    agent_paths: BTreeMap<String, String>,
) -> Result<ApplicationDescriptor> {
    let app_id = normalize_app_id(app_id)
        .ok_or_else(|| BlueprintError::InvalidApplicationId(app_id.to_string()))?;

    let bp = blueprint.blueprint();

    // Step 2: container port assignment, stable under re-verification
    // because it is driven purely by each ref's position in the
    // blueprint-declared streamlets vector.
    let mut container_ports: BTreeMap<&str, u16> = BTreeMap::new();
    for (index, r) in bp.streamlets.iter().enumerate() {
        let Some(verified) = &r.verified else { continue };
        if verified.descriptor.server_attribute {
            let port = MINIMUM_ENDPOINT_CONTAINER_PORT + index as u16;
            container_ports.insert(r.name.as_str(), port);
        }
    }

    // Step 3: inlet -> upstream outlet lookup, from each connection's
    // resolved endpoints.
    let mut upstream_of_inlet: BTreeMap<(&str, &str), (&str, &str)> = BTreeMap::new();
    for c in &bp.connections {
        if let Some(resolved) = &c.resolved {
            upstream_of_inlet.insert(
                (resolved.to.ref_name.as_str(), resolved.to.port_name.as_str()),
                (resolved.from.ref_name.as_str(), resolved.from.port_name.as_str()),
            );
        }
    }

    let mut deployments = Vec::with_capacity(bp.streamlets.len());
    for r in &bp.streamlets {
        let Some(verified) = &r.verified else { continue };
        let descriptor = &verified.descriptor;

        let mut port_mappings = BTreeMap::new();
        for inlet in &descriptor.shape.inlets {
            if let Some((upstream_ref, upstream_outlet)) =
                upstream_of_inlet.get(&(r.name.as_str(), inlet.name.as_str()))
            {
                port_mappings.insert(
                    inlet.name.clone(),
                    Savepoint::new(app_id.clone(), *upstream_ref, *upstream_outlet),
                );
            }
        }
        for outlet in &descriptor.shape.outlets {
            port_mappings.insert(
                outlet.name.clone(),
                Savepoint::new(app_id.clone(), r.name.clone(), outlet.name.clone()),
            );
        }

        let container_port = container_ports.get(r.name.as_str()).copied();
        let (config, endpoint) = match container_port {
            Some(port) => (
                ConfigTree::single(SERVER_CONTAINER_PORT_KEY, i64::from(port)),
                Some(Endpoint::new(app_id.clone(), r.name.clone(), port)),
            ),
            None => (ConfigTree::empty(), None),
        };

        deployments.push(StreamletDeployment {
            name: format!("{app_id}.{}", r.name),
            runtime: descriptor.runtime.clone(),
            image: descriptor.image.clone(),
            class_name: descriptor.class_name.clone(),
            streamlet_name: r.name.clone(),
            endpoint,
            secret_name: secret_name(&r.name),
            config,
            port_mappings,
            volume_mounts: descriptor.volume_mounts.clone(),
            replicas: None,
        });
    }

    let connections = bp
        .connections
        .iter()
        .filter_map(|c| c.resolved.clone())
        .collect();

    let streamlets = bp
        .streamlets
        .iter()
        .filter_map(|r| r.verified.clone())
        .collect();

    Ok(ApplicationDescriptor {
        app_id,
        app_version: app_version.to_string(),
        streamlets,
        connections,
        deployments,
        agent_paths,
        version: DESCRIPTOR_VERSION,
    })
}

/// Convenience entry point for callers holding a plain [`Blueprint`] rather
/// than a [`VerifiedBlueprint`] in hand: verifies it as a precondition and
/// fails with [`BlueprintError::InvalidBlueprint`] rather than emitting a
/// partial descriptor (spec §7: "invoking it otherwise is a programming
/// error... no partial descriptor is ever emitted").
pub fn build_from_blueprint(
    app_id: &str,
    app_version: &str,
    blueprint: &Blueprint,
    agent_paths: BTreeMap<String, String>,
) -> Result<ApplicationDescriptor> {
    let verified = blueprint
        .verify()
        .verified()
        .map_err(|_| BlueprintError::InvalidBlueprint)?;
    build(app_id, app_version, &verified, agent_paths)
}
