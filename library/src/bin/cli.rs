use std::fs;
use std::process::ExitCode;

use log::info;

use solidtree::{Container, NodeDecl, Renderer};

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(scene_path) = args.next() else {
        eprintln!("usage: cli <scene.json> [output.stl]");
        return ExitCode::FAILURE;
    };
    let output_path = args.next();

    let scene = match fs::read_to_string(&scene_path) {
        Ok(scene) => scene,
        Err(err) => {
            eprintln!("failed to read {scene_path}: {err}");
            return ExitCode::FAILURE;
        }
    };
    let element: NodeDecl = match serde_json::from_str(&scene) {
        Ok(element) => element,
        Err(err) => {
            eprintln!("failed to parse {scene_path}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut container = match output_path {
        Some(path) => Container::with_path(path),
        None => Container::new(),
    };
    let mut renderer = Renderer::new();
    if let Err(err) = renderer.render(&element, &mut container) {
        eprintln!("render failed: {err}");
        return ExitCode::FAILURE;
    }

    let triangles = container.csg().map_or(0, |csg| csg.triangle_count());
    info!("rendered {scene_path}: {triangles} triangles");
    println!("{triangles} triangles");
    ExitCode::SUCCESS
}
