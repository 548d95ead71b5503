use glam::Vec3;
use serde_json::{json, Value};
use solidtree::evaluation::evaluate;
use solidtree::model::{InstanceArena, PropMap};
use solidtree::RenderError;

fn props(value: Value) -> PropMap {
    match value {
        Value::Object(map) => map,
        other => panic!("not an object: {other}"),
    }
}

#[test]
fn geometry_mirrors_the_instance_tree() {
    let mut arena = InstanceArena::new();
    let left = arena.create("cube", props(json!({"size": 2.0}))).unwrap();
    let right = arena.create("cube", props(json!({"size": 2.0}))).unwrap();
    let root = arena.create("union", PropMap::new()).unwrap();
    arena.append_child(root, left);
    arena.append_child(root, right);

    let geometry = evaluate(&arena, root).unwrap();
    assert_eq!(geometry.id, arena.get(root).id);
    assert_eq!(geometry.children.len(), 2);
    assert_eq!(geometry.children[0].id, arena.get(left).id);
    assert_eq!(geometry.children[1].id, arena.get(right).id);
    assert_eq!(geometry.children[0].solid.triangle_count(), 12);
}

#[test]
fn translate_leads_with_the_offset_value() {
    let mut arena = InstanceArena::new();
    let cube = arena.create("cube", props(json!({"size": 2.0}))).unwrap();
    let moved = arena
        .create("translate", props(json!({"offset": [1.0, 0.0, 0.0]})))
        .unwrap();
    arena.append_child(moved, cube);

    let geometry = evaluate(&arena, moved).unwrap();
    let (min, max) = geometry.solid.bounds().unwrap();
    assert_eq!(min, Vec3::new(0.0, -1.0, -1.0));
    assert_eq!(max, Vec3::new(2.0, 1.0, 1.0));
}

#[test]
fn union_spans_disjoint_children() {
    let mut arena = InstanceArena::new();
    let a = arena.create("cube", props(json!({"size": 2.0}))).unwrap();
    let b = arena.create("cube", props(json!({"size": 2.0}))).unwrap();
    let shifted = arena
        .create("translate", props(json!({"offset": [10.0, 0.0, 0.0]})))
        .unwrap();
    arena.append_child(shifted, b);
    let root = arena.create("union", PropMap::new()).unwrap();
    arena.append_child(root, a);
    arena.append_child(root, shifted);

    let geometry = evaluate(&arena, root).unwrap();
    let (min, max) = geometry.solid.bounds().unwrap();
    assert_eq!(min, Vec3::new(-1.0, -1.0, -1.0));
    assert_eq!(max, Vec3::new(11.0, 1.0, 1.0));
}

#[test]
fn colorize_tags_the_merged_children() {
    let mut arena = InstanceArena::new();
    let cube = arena.create("cube", props(json!({"size": 2.0}))).unwrap();
    let colored = arena
        .create("colorize", props(json!({"color": [1.0, 0.0, 0.0]})))
        .unwrap();
    arena.append_child(colored, cube);

    let geometry = evaluate(&arena, colored).unwrap();
    assert_eq!(geometry.solid.color, Some([1.0, 0.0, 0.0, 1.0]));
    // Decoration leaves the child untouched.
    assert_eq!(geometry.children[0].solid.color, None);
}

#[test]
fn missing_simple_property_is_an_operation_error() {
    let mut arena = InstanceArena::new();
    let cube = arena.create("cube", props(json!({"size": 2.0}))).unwrap();
    let moved = arena.create("translate", PropMap::new()).unwrap();
    arena.append_child(moved, cube);

    let err = evaluate(&arena, moved).unwrap_err();
    match err {
        RenderError::Operation { op, message } => {
            assert_eq!(op, "translate");
            assert!(message.contains("missing property"), "{message}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn re_evaluation_yields_value_equal_geometry() {
    let mut arena = InstanceArena::new();
    let cube = arena.create("cube", props(json!({"size": 4.0}))).unwrap();
    let scaled = arena
        .create("scale", props(json!({"factors": [1.0, 2.0, 1.0]})))
        .unwrap();
    arena.append_child(scaled, cube);

    let first = evaluate(&arena, scaled).unwrap();
    let second = evaluate(&arena, scaled).unwrap();
    assert_eq!(first, second);
}

#[test]
fn torus_decodes_camel_case_radii() {
    let mut arena = InstanceArena::new();
    let torus = arena
        .create("torus", props(json!({"innerRadius": 1.0, "outerRadius": 4.0})))
        .unwrap();

    let geometry = evaluate(&arena, torus).unwrap();
    let (min, max) = geometry.solid.bounds().unwrap();
    assert!((max.x - 5.0).abs() < 1e-4);
    assert!((min.x + 5.0).abs() < 1e-4);
    assert!((max.z - 1.0).abs() < 1e-5);
}

#[test]
fn transform_applies_a_column_major_matrix() {
    let matrix = [
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        3.0, 0.0, 0.0, 1.0,
    ];
    let mut arena = InstanceArena::new();
    let cube = arena.create("cube", props(json!({"size": 2.0}))).unwrap();
    let moved = arena
        .create("transform", props(json!({"matrix": matrix})))
        .unwrap();
    arena.append_child(moved, cube);

    let geometry = evaluate(&arena, moved).unwrap();
    let (min, max) = geometry.solid.bounds().unwrap();
    assert_eq!(min, Vec3::new(2.0, -1.0, -1.0));
    assert_eq!(max, Vec3::new(4.0, 1.0, 1.0));
}

#[test]
fn hull_spans_its_children() {
    let mut arena = InstanceArena::new();
    let near = arena.create("cube", props(json!({"size": 2.0}))).unwrap();
    let cube = arena.create("cube", props(json!({"size": 2.0}))).unwrap();
    let far = arena
        .create("translate", props(json!({"offset": [10.0, 0.0, 0.0]})))
        .unwrap();
    arena.append_child(far, cube);
    let hull = arena.create("hull", PropMap::new()).unwrap();
    arena.append_child(hull, near);
    arena.append_child(hull, far);

    let geometry = evaluate(&arena, hull).unwrap();
    let (min, max) = geometry.solid.bounds().unwrap();
    assert_eq!(min, Vec3::new(-1.0, -1.0, -1.0));
    assert_eq!(max, Vec3::new(11.0, 1.0, 1.0));
}

#[test]
fn hull_chain_links_consecutive_children() {
    let mut arena = InstanceArena::new();
    let mut link = |offset: [f32; 3]| {
        let cube = arena.create("cube", props(json!({"size": 2.0}))).unwrap();
        let moved = arena
            .create("translate", props(json!({"offset": offset})))
            .unwrap();
        arena.append_child(moved, cube);
        moved
    };
    let a = link([0.0, 0.0, 0.0]);
    let b = link([10.0, 0.0, 0.0]);
    let c = link([10.0, 10.0, 0.0]);
    let chain = arena.create("hullChain", PropMap::new()).unwrap();
    arena.append_child(chain, a);
    arena.append_child(chain, b);
    arena.append_child(chain, c);

    let geometry = evaluate(&arena, chain).unwrap();
    let (min, max) = geometry.solid.bounds().unwrap();
    assert!(min.distance(Vec3::new(-1.0, -1.0, -1.0)) < 1e-3);
    assert!(max.distance(Vec3::new(11.0, 11.0, 1.0)) < 1e-3);
}

#[test]
fn extrude_linear_builds_a_prism_from_inline_points() {
    let mut arena = InstanceArena::new();
    let prism = arena
        .create(
            "extrudeLinear",
            props(json!({
                "points": [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
                "height": 2.0
            })),
        )
        .unwrap();

    let geometry = evaluate(&arena, prism).unwrap();
    assert_eq!(geometry.solid.triangle_count(), 12);
    let (min, max) = geometry.solid.bounds().unwrap();
    assert_eq!(min, Vec3::ZERO);
    assert_eq!(max, Vec3::new(1.0, 1.0, 2.0));
}

#[test]
fn extrude_rotate_sweeps_a_ring() {
    let mut arena = InstanceArena::new();
    let ring = arena
        .create(
            "extrudeRotate",
            props(json!({
                "points": [[2.0, 0.0], [3.0, 0.0], [3.0, 1.0], [2.0, 1.0]],
                "segments": 16
            })),
        )
        .unwrap();

    let geometry = evaluate(&arena, ring).unwrap();
    let (min, max) = geometry.solid.bounds().unwrap();
    assert!((max.x - 3.0).abs() < 1e-4);
    assert!((min.y + 3.0).abs() < 1e-4);
    assert!(min.z.abs() < 1e-5 && (max.z - 1.0).abs() < 1e-5);
}

#[test]
fn expand_inflates_the_merged_children() {
    let mut arena = InstanceArena::new();
    let cube = arena.create("cube", props(json!({"size": 2.0}))).unwrap();
    let bigger = arena
        .create("expand", props(json!({"delta": 0.5})))
        .unwrap();
    arena.append_child(bigger, cube);

    let geometry = evaluate(&arena, bigger).unwrap();
    let (min, max) = geometry.solid.bounds().unwrap();
    // Corners move along their averaged normals, so the box grows by less
    // than the full delta per axis but strictly outward.
    assert!(max.x > 1.1 && max.x < 1.5);
    assert!((max + min).length() < 1e-4);
}

#[test]
fn generalize_snaps_vertices_to_the_grid() {
    let mut arena = InstanceArena::new();
    let cube = arena.create("cube", props(json!({"size": 2.0}))).unwrap();
    let scaled = arena
        .create("scale", props(json!({"factors": [1.25, 1.25, 1.25]})))
        .unwrap();
    arena.append_child(scaled, cube);
    let snapped = arena
        .create("generalize", props(json!({"snap": 0.5})))
        .unwrap();
    arena.append_child(snapped, scaled);

    let geometry = evaluate(&arena, snapped).unwrap();
    assert_eq!(geometry.solid.triangle_count(), 12);
    let (min, max) = geometry.solid.bounds().unwrap();
    assert_eq!(min, Vec3::splat(-1.5));
    assert_eq!(max, Vec3::splat(1.5));
}

#[test]
fn center_moves_children_onto_the_target() {
    let mut arena = InstanceArena::new();
    let cube = arena.create("cube", props(json!({"size": 2.0}))).unwrap();
    let moved = arena
        .create("translate", props(json!({"offset": [5.0, 5.0, 5.0]})))
        .unwrap();
    arena.append_child(moved, cube);
    let centered = arena
        .create("center", props(json!({"relativeTo": [1.0, 0.0, 0.0]})))
        .unwrap();
    arena.append_child(centered, moved);

    let geometry = evaluate(&arena, centered).unwrap();
    let (min, max) = geometry.solid.bounds().unwrap();
    assert_eq!(min, Vec3::new(0.0, -1.0, -1.0));
    assert_eq!(max, Vec3::new(2.0, 1.0, 1.0));
}

#[test]
fn mirror_reflects_across_the_plane() {
    let mut arena = InstanceArena::new();
    let cube = arena.create("cube", props(json!({"size": 2.0}))).unwrap();
    let moved = arena
        .create("translate", props(json!({"offset": [2.0, 0.0, 0.0]})))
        .unwrap();
    arena.append_child(moved, cube);
    let mirrored = arena
        .create("mirror", props(json!({"normal": [1.0, 0.0, 0.0]})))
        .unwrap();
    arena.append_child(mirrored, moved);

    let geometry = evaluate(&arena, mirrored).unwrap();
    let (min, max) = geometry.solid.bounds().unwrap();
    assert_eq!(min, Vec3::new(-3.0, -1.0, -1.0));
    assert_eq!(max, Vec3::new(-1.0, 1.0, 1.0));
    // The winding flip keeps normals pointing outward.
    for t in &geometry.solid.triangles {
        let centroid = (t.vertices[0] + t.vertices[1] + t.vertices[2]) / 3.0;
        assert!(t.normal().dot(centroid - Vec3::new(-2.0, 0.0, 0.0)) > 0.0);
    }
}

#[test]
fn unrecognized_type_fails_at_creation() {
    let mut arena = InstanceArena::new();
    let err = arena.create("frobnicate", PropMap::new()).unwrap_err();
    match err {
        RenderError::UnrecognizedType(name) => assert_eq!(name, "frobnicate"),
        other => panic!("unexpected error: {other}"),
    }
}
