//! Extrusions. The 2D profile is supplied inline through the `points` prop;
//! there is no separate 2D geometry pipeline.

use std::f32::consts::TAU;

use glam::Vec2;
use serde::Deserialize;

use super::{decode_props, OpCall, OpCategory, OpEntry};
use crate::error::RenderError;
use crate::modeling::{extrusions, Solid};

pub(super) fn extrusion_ops() -> Vec<OpEntry> {
    let cat = OpCategory::Extrusion;
    vec![
        OpEntry::bag("extrudeLinear", cat, extrude_linear),
        OpEntry::bag("extrudeRotate", cat, extrude_rotate),
    ]
}

fn profile(op: &str, points: &[[f32; 2]]) -> Result<Vec<Vec2>, RenderError> {
    if points.len() < 3 {
        return Err(RenderError::operation(op, "points must describe a polygon"));
    }
    Ok(points.iter().map(|p| Vec2::from_array(*p)).collect())
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct ExtrudeLinearOpts {
    points: Vec<[f32; 2]>,
    height: f32,
}

impl Default for ExtrudeLinearOpts {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            height: 1.0,
        }
    }
}

fn extrude_linear(call: &OpCall<'_>) -> Result<Solid, RenderError> {
    let opts: ExtrudeLinearOpts = decode_props("extrudeLinear", call.lead_props("extrudeLinear")?)?;
    if opts.height <= 0.0 {
        return Err(RenderError::operation("extrudeLinear", "height must be positive"));
    }
    let points = profile("extrudeLinear", &opts.points)?;
    Ok(extrusions::extrude_linear(&points, opts.height))
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct ExtrudeRotateOpts {
    points: Vec<[f32; 2]>,
    segments: u32,
    angle: f32,
}

impl Default for ExtrudeRotateOpts {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            segments: 12,
            angle: TAU,
        }
    }
}

fn extrude_rotate(call: &OpCall<'_>) -> Result<Solid, RenderError> {
    let opts: ExtrudeRotateOpts = decode_props("extrudeRotate", call.lead_props("extrudeRotate")?)?;
    let points = profile("extrudeRotate", &opts.points)?;
    Ok(extrusions::extrude_rotate(&points, opts.segments, opts.angle))
}
