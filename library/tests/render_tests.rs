use std::fs;

use glam::Vec3;
use serde_json::json;
use solidtree::host::HostBackend;
use solidtree::io::stl;
use solidtree::{Container, NodeDecl, RenderBackend, RenderError, Renderer};

fn cube(size: f64) -> NodeDecl {
    NodeDecl::new("cube").with_prop("size", size)
}

#[test]
fn rendering_populates_the_container() {
    let mut renderer = Renderer::new();
    let mut container = Container::new();

    renderer.render(&cube(10.0), &mut container).unwrap();

    let csg = container.csg().expect("committed geometry");
    let (min, max) = csg.solid.bounds().unwrap();
    assert_eq!(min, Vec3::splat(-5.0));
    assert_eq!(max, Vec3::splat(5.0));

    let shadow = container.shadow().expect("shadow tree");
    assert_eq!(shadow.type_name, "cube");
    assert_eq!(shadow.id, csg.id);
    assert!(shadow.children.is_empty());
}

#[test]
fn children_commit_in_declaration_order() {
    let element = NodeDecl::new("union")
        .with_child(cube(2.0))
        .with_child(NodeDecl::new("sphere").with_prop("radius", 1.0));

    let mut renderer = Renderer::new();
    let mut container = Container::new();
    renderer.render(&element, &mut container).unwrap();

    let shadow = container.shadow().unwrap();
    assert_eq!(shadow.type_name, "union");
    let child_types: Vec<_> = shadow
        .children
        .iter()
        .map(|c| c.type_name.as_str())
        .collect();
    assert_eq!(child_types, ["cube", "sphere"]);
}

#[test]
fn unknown_type_fails_before_commit() {
    let element = NodeDecl::new("union")
        .with_child(cube(2.0))
        .with_child(NodeDecl::new("frobnicate"));

    let mut renderer = Renderer::new();
    let mut container = Container::new();
    let err = renderer.render(&element, &mut container).unwrap_err();
    match err {
        RenderError::UnrecognizedType(name) => assert_eq!(name, "frobnicate"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(container.csg().is_none());
    assert!(container.shadow().is_none());
}

#[test]
fn failed_render_keeps_the_previous_commit() {
    let mut renderer = Renderer::new();
    let mut container = Container::new();
    renderer.render(&cube(10.0), &mut container).unwrap();

    let bad = NodeDecl::new("translate").with_child(cube(2.0));
    assert!(renderer.render(&bad, &mut container).is_err());

    let csg = container.csg().expect("previous commit intact");
    assert_eq!(csg.triangle_count(), 12);
}

#[test]
fn emission_writes_a_decodable_stl() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.stl");

    let mut renderer = Renderer::new();
    let mut container = Container::with_path(&path);
    renderer.render(&cube(10.0), &mut container).unwrap();

    let bytes = fs::read(&path).unwrap();
    let decoded = stl::decode(&bytes).unwrap();
    assert_eq!(
        decoded.triangle_count(),
        container.csg().unwrap().triangle_count()
    );
}

#[test]
fn no_path_means_no_emission() {
    let dir = tempfile::tempdir().unwrap();

    let mut renderer = Renderer::new();
    let mut quiet = Container::new();
    renderer.render(&cube(2.0), &mut quiet).unwrap();
    let mut emitting = Container::with_path(dir.path().join("only.stl"));
    renderer.render(&cube(2.0), &mut emitting).unwrap();

    // Both commits stored geometry, but only the path-carrying container
    // wrote a file.
    assert!(quiet.csg().is_some());
    assert!(quiet.path.is_none());
    let names: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(names, ["only.stl"]);
}

#[test]
fn output_path_changes_take_effect_between_renders() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.stl");
    let second = dir.path().join("second.stl");

    let mut renderer = Renderer::new();
    let mut container = Container::with_path(&first);
    renderer.render(&cube(2.0), &mut container).unwrap();
    container.path = Some(second.clone());
    renderer.render(&cube(4.0), &mut container).unwrap();

    assert!(first.exists());
    assert!(second.exists());
    assert_eq!(renderer.root_count(), 1);
}

#[test]
fn render_with_runs_the_callback_after_commit() {
    let mut renderer = Renderer::new();
    let mut container = Container::new();
    let mut seen = 0usize;
    renderer
        .render_with(&cube(2.0), &mut container, |c| {
            seen = c.csg().map_or(0, |csg| csg.triangle_count());
        })
        .unwrap();
    assert_eq!(seen, 12);
}

#[test]
fn clear_container_drops_committed_state() {
    let mut renderer = Renderer::new();
    let mut container = Container::new();
    renderer.render(&cube(2.0), &mut container).unwrap();

    RenderBackend::new().clear_container(&mut container);
    assert!(container.csg().is_none());
    assert!(container.shadow().is_none());
}

#[test]
fn roots_persist_until_disposed() {
    let mut renderer = Renderer::new();
    let mut container = Container::new();
    renderer.render(&cube(2.0), &mut container).unwrap();
    renderer.render(&cube(4.0), &mut container).unwrap();
    assert_eq!(renderer.root_count(), 1);

    let mut other = Container::new();
    renderer.render(&cube(2.0), &mut other).unwrap();
    assert_eq!(renderer.root_count(), 2);

    assert!(renderer.dispose(&container));
    assert!(!renderer.dispose(&container));
    assert_eq!(renderer.root_count(), 1);
}

#[test]
fn scene_files_round_trip_through_serde() {
    let scene = json!({
        "type": "subtract",
        "children": [
            {"type": "cube", "props": {"size": 8.0}},
            {"type": "sphere", "props": {"radius": 5.0, "segments": 16}}
        ]
    });
    let element: NodeDecl = serde_json::from_value(scene).unwrap();
    assert_eq!(element.type_name, "subtract");
    assert_eq!(element.children.len(), 2);

    let mut renderer = Renderer::new();
    let mut container = Container::new();
    renderer.render(&element, &mut container).unwrap();
    assert!(container.csg().unwrap().triangle_count() > 0);
}
