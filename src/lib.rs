//! # blueprint-compiler
//!
//! A blueprint compiler for streaming-dataflow applications. A user
//! declares an application as a set of *streamlets* — typed, reusable
//! stream-processing units — together with *connections* between their
//! ports. This crate validates that declaration against a catalog of
//! streamlet descriptors and, if it is valid, lowers it into an
//! **application descriptor**: a deterministic, deployable plan that a
//! separate orchestrator (out of scope here) turns into cluster workloads.
//!
//! ## Core pieces
//!
//! - [`Blueprint`](blueprint::Blueprint): the mutable-in-spirit, immutable
//!   document a user edits via `define`/`use_streamlet`/`connect`/etc.,
//!   each returning a new blueprint.
//! - [`verify`]: the multi-pass validator that checks structural, naming,
//!   schema-compatibility, configuration, and volume-mount rules, producing
//!   a typed [`Problem`](problem::Problem) list.
//! - [`build`]: lowers a verified blueprint into an
//!   [`ApplicationDescriptor`](build::ApplicationDescriptor) with stable
//!   names, port mappings (savepoints), and container-port assignments.
//!
//! Out of scope: the streamlet runtime, topic provisioning, the Kubernetes
//! operator that consumes the descriptor, schema registries, CLI parsing,
//! configuration-file loading, and packaging. This crate emits a plain
//! data value with no I/O.
//!
//! ## Example
//!
//! ```
//! use blueprint_compiler::blueprint::{Blueprint, StreamletRef};
//! use blueprint_compiler::descriptor::{Port, StreamletDescriptor, StreamletShape};
//! use blueprint_compiler::schema::Schema;
//! use std::collections::BTreeMap;
//!
//! let foo = Schema::new("Foo", vec![1, 2, 3]);
//! let ingress = StreamletDescriptor::new(
//!     "com.example.Ingress",
//!     "akka",
//!     "ingress:latest",
//!     StreamletShape::new(vec![], vec![Port::new("out", foo.clone())]),
//! );
//! let egress = StreamletDescriptor::new(
//!     "com.example.Egress",
//!     "akka",
//!     "egress:latest",
//!     StreamletShape::new(vec![Port::new("in", foo)], vec![]),
//! );
//!
//! let blueprint = Blueprint::new()
//!     .define(vec![ingress, egress])
//!     .use_streamlet(StreamletRef::new("in-0", "com.example.Ingress"))
//!     .use_streamlet(StreamletRef::new("out-0", "com.example.Egress"))
//!     .connect("in-0.out", "out-0.in", None)
//!     .verify();
//!
//! let verified = blueprint.verified().expect("no problems");
//! let descriptor = blueprint_compiler::build::build(
//!     "my-app",
//!     "1.0.0",
//!     &verified,
//!     BTreeMap::from([("prometheus".to_string(), "/opt/prometheus.jar".to_string())]),
//! )
//! .expect("valid app id");
//! assert_eq!(descriptor.deployments.len(), 2);
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

/// Fixed constants from spec §6 (container port base, length limits,
/// descriptor schema version).
pub mod constants;

/// Structured configuration values threaded through refs, connections, and
/// deployments (spec §3, `ConfigTree`).
pub mod config_tree;

/// Programming-error surface distinct from the `Problem` taxonomy (spec §7).
pub mod error;

/// Character-class rules and id derivation (spec §4.1).
pub mod names;

/// Fixed-grammar parsers for `duration`/`memorysize` config parameter
/// default values (spec §4.5a).
pub mod parse;

/// The closed problem taxonomy emitted by verification (spec §4.7).
pub mod problem;

/// Named schemas and fingerprint-equality compatibility (spec §4.3).
pub mod schema;

/// The streamlet descriptor catalog: class names, runtimes, images,
/// shapes, config parameters, and volume mounts (spec §4.2, §3).
pub mod descriptor;

/// The blueprint document and its incremental edit API (spec §3, §4.4).
pub mod blueprint;

/// The verification engine (spec §4.5).
pub mod verify;

/// The descriptor builder (spec §4.6).
pub mod build;

pub use blueprint::Blueprint;
pub use error::{BlueprintError, Result};
pub use problem::Problem;

/// Returns the current version of this crate.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
