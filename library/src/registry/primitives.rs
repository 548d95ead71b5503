//! Primitive shapes. All take an options bag; children, if any, are
//! ignored (leaves of the build tree).

use glam::Vec3;
use serde::Deserialize;

use super::{decode_props, OpCall, OpCategory, OpEntry};
use crate::error::RenderError;
use crate::modeling::{primitives, Solid};

pub(super) fn primitive_ops() -> Vec<OpEntry> {
    let cat = OpCategory::Primitive;
    vec![
        OpEntry::bag("cube", cat, cube),
        OpEntry::bag("cuboid", cat, cuboid),
        OpEntry::bag("sphere", cat, sphere),
        OpEntry::bag("cylinder", cat, cylinder),
        OpEntry::bag("torus", cat, torus),
    ]
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct CubeOpts {
    size: f32,
}

impl Default for CubeOpts {
    fn default() -> Self {
        Self { size: 2.0 }
    }
}

fn cube(call: &OpCall<'_>) -> Result<Solid, RenderError> {
    let opts: CubeOpts = decode_props("cube", call.lead_props("cube")?)?;
    if opts.size <= 0.0 {
        return Err(RenderError::operation("cube", "size must be positive"));
    }
    Ok(primitives::cube(opts.size))
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct CuboidOpts {
    size: [f32; 3],
}

impl Default for CuboidOpts {
    fn default() -> Self {
        Self { size: [2.0, 2.0, 2.0] }
    }
}

fn cuboid(call: &OpCall<'_>) -> Result<Solid, RenderError> {
    let opts: CuboidOpts = decode_props("cuboid", call.lead_props("cuboid")?)?;
    if opts.size.iter().any(|s| *s <= 0.0) {
        return Err(RenderError::operation("cuboid", "size must be positive"));
    }
    Ok(primitives::cuboid(Vec3::from_array(opts.size)))
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct SphereOpts {
    radius: f32,
    segments: u32,
}

impl Default for SphereOpts {
    fn default() -> Self {
        Self {
            radius: 1.0,
            segments: 32,
        }
    }
}

fn sphere(call: &OpCall<'_>) -> Result<Solid, RenderError> {
    let opts: SphereOpts = decode_props("sphere", call.lead_props("sphere")?)?;
    if opts.radius <= 0.0 {
        return Err(RenderError::operation("sphere", "radius must be positive"));
    }
    Ok(primitives::sphere(opts.radius, opts.segments))
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct CylinderOpts {
    radius: f32,
    height: f32,
    segments: u32,
}

impl Default for CylinderOpts {
    fn default() -> Self {
        Self {
            radius: 1.0,
            height: 2.0,
            segments: 32,
        }
    }
}

fn cylinder(call: &OpCall<'_>) -> Result<Solid, RenderError> {
    let opts: CylinderOpts = decode_props("cylinder", call.lead_props("cylinder")?)?;
    if opts.radius <= 0.0 || opts.height <= 0.0 {
        return Err(RenderError::operation(
            "cylinder",
            "radius and height must be positive",
        ));
    }
    Ok(primitives::cylinder(opts.radius, opts.height, opts.segments))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct TorusOpts {
    inner_radius: f32,
    outer_radius: f32,
    inner_segments: u32,
    outer_segments: u32,
}

impl Default for TorusOpts {
    fn default() -> Self {
        Self {
            inner_radius: 1.0,
            outer_radius: 4.0,
            inner_segments: 32,
            outer_segments: 32,
        }
    }
}

fn torus(call: &OpCall<'_>) -> Result<Solid, RenderError> {
    let opts: TorusOpts = decode_props("torus", call.lead_props("torus")?)?;
    if opts.inner_radius <= 0.0 || opts.outer_radius <= opts.inner_radius {
        return Err(RenderError::operation(
            "torus",
            "outerRadius must exceed innerRadius, both positive",
        ));
    }
    Ok(primitives::torus(
        opts.inner_radius,
        opts.outer_radius,
        opts.inner_segments,
        opts.outer_segments,
    ))
}
