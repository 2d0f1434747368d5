//! End-to-end blueprint scenarios (spec §8).
//!
//! These exercise the full edit-API -> verify -> build pipeline the way a
//! caller would, rather than unit-testing individual passes in isolation.

use std::collections::BTreeMap;

use blueprint_compiler::blueprint::{Blueprint, StreamletRef};
use blueprint_compiler::build::build;
use blueprint_compiler::descriptor::{
    ConfigParameterDescriptor, ConfigParameterKind, Port, StreamletDescriptor, StreamletShape,
};
use blueprint_compiler::problem::Problem;
use blueprint_compiler::schema::Schema;

fn schema(name: &str) -> Schema {
    Schema::new(name, vec![1, 2, 3])
}

fn ingress(out_schema: Schema) -> StreamletDescriptor {
    StreamletDescriptor::new(
        "com.example.Ingress",
        "akka",
        "ingress:1.0",
        StreamletShape::new(vec![], vec![Port::new("out", out_schema)]),
    )
}

fn processor(in_schema: Schema, out_schema: Schema) -> StreamletDescriptor {
    StreamletDescriptor::new(
        "com.example.Processor",
        "akka",
        "processor:1.0",
        StreamletShape::new(vec![Port::new("in", in_schema)], vec![Port::new("out", out_schema)]),
    )
}

fn egress(in_schema: Schema) -> StreamletDescriptor {
    StreamletDescriptor::new(
        "com.example.Egress",
        "akka",
        "egress:1.0",
        StreamletShape::new(vec![Port::new("in", in_schema)], vec![]),
    )
}

fn merge_two_inlets(in_schema: Schema) -> StreamletDescriptor {
    StreamletDescriptor::new(
        "com.example.Merge",
        "akka",
        "merge:1.0",
        StreamletShape::new(
            vec![Port::new("in-0", in_schema.clone()), Port::new("in-1", in_schema)],
            vec![],
        ),
    )
}

// S1 — empty blueprint.
#[test]
fn s1_empty_blueprint_reports_both_empty_problems() {
    let bp = Blueprint::new().verify();
    let problems = bp.report();
    assert_eq!(problems.len(), 2);
    assert!(problems.contains(&Problem::EmptyStreamlets));
    assert!(problems.contains(&Problem::EmptyStreamletDescriptors));
}

// S2 — simple chain, two deployments, savepoint naming.
#[test]
fn s2_simple_chain_has_no_problems_and_correct_savepoint() {
    let foo = schema("Foo");
    let bp = Blueprint::new()
        .define(vec![ingress(foo.clone()), processor(foo.clone(), foo)])
        .use_streamlet(StreamletRef::new("ingress-0", "com.example.Ingress"))
        .use_streamlet(StreamletRef::new("processor-0", "com.example.Processor"))
        .connect("ingress-0.out", "processor-0.in", None)
        .verify();

    assert!(bp.report().is_empty(), "unexpected problems: {:?}", bp.report());

    let verified = bp.verified().expect("blueprint should verify cleanly");
    let mut agent_paths = BTreeMap::new();
    agent_paths.insert("prometheus".to_string(), "/opt/prometheus.jar".to_string());
    let descriptor = build("my-app", "1.0.0", &verified, agent_paths).unwrap();

    assert_eq!(descriptor.deployments.len(), 2);
    let processor_deployment = descriptor
        .deployments
        .iter()
        .find(|d| d.streamlet_name == "processor-0")
        .unwrap();
    let savepoint = &processor_deployment.port_mappings["in"];
    assert_eq!(savepoint.app_id, "my-app");
    assert_eq!(savepoint.streamlet_ref_name, "ingress-0");
    assert_eq!(savepoint.outlet_name, "out");
}

// S3 — fan-in illegality.
#[test]
fn s3_fan_in_is_illegal_and_target_inlet_is_not_reported_unconnected() {
    let foo = schema("Foo");
    let bp = Blueprint::new()
        .define(vec![processor(foo.clone(), foo.clone()), egress(foo)])
        .use_streamlet(StreamletRef::new("p1", "com.example.Processor"))
        .use_streamlet(StreamletRef::new("p2", "com.example.Processor"))
        .use_streamlet(StreamletRef::new("out-0", "com.example.Egress"))
        .connect("p1.out", "out-0.in", None)
        .connect("p2.out", "out-0.in", None)
        .verify();

    let problems = bp.report();
    let illegal: Vec<_> = problems
        .iter()
        .filter(|p| matches!(p, Problem::IllegalConnection { .. }))
        .collect();
    assert_eq!(illegal.len(), 1);
    assert!(!problems.iter().any(|p| matches!(p, Problem::UnconnectedInlets { .. })));
}

// S4 — schema mismatch.
#[test]
fn s4_schema_mismatch_reports_incompatible_schema_not_unconnected() {
    let foo = schema("Foo");
    let bar = schema("Bar");
    let bp = Blueprint::new()
        .define(vec![ingress(foo), egress(bar)])
        .use_streamlet(StreamletRef::new("ingress-0", "com.example.Ingress"))
        .use_streamlet(StreamletRef::new("egress-0", "com.example.Egress"))
        .connect("ingress-0.out", "egress-0.in", None)
        .verify();

    let problems = bp.report();
    assert!(problems
        .iter()
        .any(|p| matches!(p, Problem::IncompatibleSchema { .. })));
    assert!(!problems.iter().any(|p| matches!(p, Problem::UnconnectedInlets { .. })));
}

// S5 — ambiguous short name into a two-inlet merge streamlet.
#[test]
fn s5_ambiguous_short_connect_yields_exactly_two_problems() {
    let foo = schema("Foo");
    let bp = Blueprint::new()
        .define(vec![ingress(foo.clone()), merge_two_inlets(foo)])
        .use_streamlet(StreamletRef::new("ingress-0", "com.example.Ingress"))
        .use_streamlet(StreamletRef::new("merge-0", "com.example.Merge"))
        .connect("ingress-0", "merge-0", None)
        .verify();

    let problems = bp.report();
    assert_eq!(problems.len(), 2, "problems: {problems:?}");
    assert!(problems.iter().any(|p| matches!(p, Problem::PortPathNotFound { .. })));
    match problems.iter().find(|p| matches!(p, Problem::UnconnectedInlets { .. })) {
        Some(Problem::UnconnectedInlets { inlets }) => assert_eq!(inlets.len(), 2),
        _ => panic!("expected UnconnectedInlets"),
    }
}

// S6 — appId normalization.
#[test]
fn s6_app_id_normalization_example() {
    let raw = "-monstrous-some-very-long-NAME-with-\u{fc}-in-the-middle-that-still-needs-more-characters-mite-12345.";
    let normalized = blueprint_compiler::names::normalize_app_id(raw).unwrap();
    assert_eq!(
        normalized,
        "monstrous-some-very-long-name-with-u-in-the-middle-that-still-n"
    );
}

// S7 — container-port assignment driven by blueprint-declared order.
#[test]
fn s7_container_ports_assigned_by_declared_order() {
    let foo = schema("Foo");
    let server_ingress = ingress(foo.clone()).with_server_attribute(true);
    let plain_processor = processor(foo.clone(), foo.clone());
    let server_egress = egress(foo).with_server_attribute(true);

    let bp = Blueprint::new()
        .define(vec![server_ingress, plain_processor, server_egress])
        .use_streamlet(StreamletRef::new("ingress-0", "com.example.Ingress"))
        .use_streamlet(StreamletRef::new("processor-0", "com.example.Processor"))
        .use_streamlet(StreamletRef::new("egress-0", "com.example.Egress"))
        .connect("ingress-0.out", "processor-0.in", None)
        .connect("processor-0.out", "egress-0.in", None)
        .verify();

    assert!(bp.report().is_empty(), "unexpected problems: {:?}", bp.report());
    let verified = bp.verified().unwrap();
    let descriptor = build("my-app", "1.0.0", &verified, BTreeMap::new()).unwrap();

    let port_of = |name: &str| {
        descriptor
            .deployments
            .iter()
            .find(|d| d.streamlet_name == name)
            .and_then(|d| d.endpoint.as_ref())
            .map(|e| e.container_port)
    };
    assert_eq!(port_of("ingress-0"), Some(3000));
    assert_eq!(port_of("processor-0"), None);
    assert_eq!(port_of("egress-0"), Some(3002));
}

// Invariant 1 (spec §8): verify is idempotent.
#[test]
fn verify_is_idempotent() {
    let foo = schema("Foo");
    let bp = Blueprint::new()
        .define(vec![ingress(foo.clone()), egress(foo)])
        .use_streamlet(StreamletRef::new("ingress-0", "com.example.Ingress"))
        .use_streamlet(StreamletRef::new("egress-0", "com.example.Egress"))
        .connect("ingress-0.out", "egress-0.in", None);

    let once = bp.verify();
    let twice = once.verify().verify();
    assert_eq!(once, twice);
}

// Invariant 2: use/use is idempotent on identical input.
#[test]
fn use_use_is_idempotent_on_identical_ref() {
    let r = StreamletRef::new("a", "com.example.Ingress");
    let bp = Blueprint::new().use_streamlet(r.clone());
    let bp2 = bp.use_streamlet(r);
    assert_eq!(bp, bp2);
}

// Invariant 3: connect after remove leaves connections unchanged except
// the new one (recorded with problems, since its endpoints no longer exist).
#[test]
fn connect_after_remove_records_problems_rather_than_resurrecting_ref() {
    let foo = schema("Foo");
    let bp = Blueprint::new()
        .define(vec![ingress(foo.clone()), egress(foo)])
        .use_streamlet(StreamletRef::new("ingress-0", "com.example.Ingress"))
        .use_streamlet(StreamletRef::new("egress-0", "com.example.Egress"));

    let bp = bp.remove("ingress-0");
    let bp = bp.connect("ingress-0.out", "egress-0.in", None).verify();

    let connection = &bp.connections[0];
    assert!(connection
        .problems
        .iter()
        .any(|p| matches!(p, Problem::PortPathNotFound { .. })));
}

// Invariant 4 & 5: every inlet maps to exactly one outlet-side savepoint,
// and outlet savepoints are keyed uniquely per (appId, refName, outletName).
#[test]
fn every_inlet_maps_to_a_savepoint_and_outlets_are_unique() {
    let foo = schema("Foo");
    let bp = Blueprint::new()
        .define(vec![ingress(foo.clone()), processor(foo.clone(), foo.clone()), egress(foo)])
        .use_streamlet(StreamletRef::new("ingress-0", "com.example.Ingress"))
        .use_streamlet(StreamletRef::new("processor-0", "com.example.Processor"))
        .use_streamlet(StreamletRef::new("egress-0", "com.example.Egress"))
        .connect("ingress-0.out", "processor-0.in", None)
        .connect("processor-0.out", "egress-0.in", None)
        .verify();

    let verified = bp.verified().unwrap();
    let descriptor = build("my-app", "1.0.0", &verified, BTreeMap::new()).unwrap();

    for deployment in &descriptor.deployments {
        for (port, savepoint) in &deployment.port_mappings {
            assert_eq!(savepoint.app_id, "my-app");
            assert!(!port.is_empty());
        }
    }

    let mut outlet_savepoints = std::collections::HashSet::new();
    for deployment in &descriptor.deployments {
        if let Some(savepoint) = deployment.port_mappings.get("out") {
            assert!(outlet_savepoints.insert(savepoint.clone()), "duplicate outlet savepoint");
        }
    }
}

// Boundary behavior (spec §8, items 8-9).
#[test]
fn ref_name_length_boundary() {
    let foo = schema("Foo");
    let ok_name = "a".repeat(253);
    let too_long = "a".repeat(254);
    let bp = Blueprint::new()
        .define(vec![ingress(foo)])
        .use_streamlet(StreamletRef::new(ok_name.clone(), "com.example.Ingress"))
        .use_streamlet(StreamletRef::new(too_long.clone(), "com.example.Ingress"))
        .verify();

    let ok_ref = bp.streamlets.iter().find(|r| r.name == ok_name).unwrap();
    assert!(ok_ref.problems.is_empty());
    let bad_ref = bp.streamlets.iter().find(|r| r.name == too_long).unwrap();
    assert!(bad_ref
        .problems
        .iter()
        .any(|p| matches!(p, Problem::InvalidStreamletName { .. })));
}

// Config parameter defaults (spec §8, item 12).
#[test]
fn duration_and_memorysize_default_validation() {
    let foo = schema("Foo");
    let descriptor = ingress(foo).with_config_parameters(vec![
        ConfigParameterDescriptor::new("timeout", ConfigParameterKind::Duration).with_default_value("20 parsec"),
        ConfigParameterDescriptor::new("buffer", ConfigParameterKind::Memorysize).with_default_value("42 pigeons"),
    ]);
    let bp = Blueprint::new()
        .define(vec![descriptor])
        .use_streamlet(StreamletRef::new("ingress-0", "com.example.Ingress"))
        .verify();

    let problems = bp.report();
    assert!(problems.iter().any(|p| matches!(
        p,
        Problem::InvalidDefaultValueInConfigParameter { key, .. } if key == "timeout"
    )));
    assert!(problems.iter().any(|p| matches!(
        p,
        Problem::InvalidDefaultValueInConfigParameter { key, .. } if key == "buffer"
    )));
}
