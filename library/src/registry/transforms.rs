//! Transforms. The simple-argument entries (`rotate`, `translate`, `scale`
//! and their axis variants) extract one property value as the leading
//! argument; `center`, `mirror` and `transform` take an options bag. All of
//! them merge their children before transforming.

use glam::{EulerRot, Mat3, Mat4, Vec3};
use serde::Deserialize;

use super::{decode_props, decode_value, OpCall, OpCategory, OpEntry};
use crate::error::RenderError;
use crate::modeling::Solid;

pub(super) fn transform_ops() -> Vec<OpEntry> {
    let cat = OpCategory::Transform;
    vec![
        OpEntry::simple("rotate", cat, "angles", rotate),
        OpEntry::simple("rotateX", cat, "angle", rotate_x),
        OpEntry::simple("rotateY", cat, "angle", rotate_y),
        OpEntry::simple("rotateZ", cat, "angle", rotate_z),
        OpEntry::simple("translate", cat, "offset", translate),
        OpEntry::simple("translateX", cat, "offset", translate_x),
        OpEntry::simple("translateY", cat, "offset", translate_y),
        OpEntry::simple("translateZ", cat, "offset", translate_z),
        OpEntry::simple("scale", cat, "factors", scale),
        OpEntry::simple("scaleX", cat, "factor", scale_x),
        OpEntry::simple("scaleY", cat, "factor", scale_y),
        OpEntry::simple("scaleZ", cat, "factor", scale_z),
        OpEntry::bag("center", cat, center),
        OpEntry::bag("mirror", cat, mirror),
        OpEntry::bag("transform", cat, transform),
    ]
}

fn apply(op: &str, call: &OpCall<'_>, matrix: Mat4) -> Result<Solid, RenderError> {
    Ok(call.merged_children(op)?.transformed(&matrix))
}

/// `rotate(angles, ...children)`: Tait-Bryan angles in radians, applied in
/// x, y, z order.
fn rotate(call: &OpCall<'_>) -> Result<Solid, RenderError> {
    let [x, y, z]: [f32; 3] = decode_value("rotate", call.lead_value("rotate")?)?;
    apply("rotate", call, Mat4::from_euler(EulerRot::ZYX, z, y, x))
}

fn rotate_x(call: &OpCall<'_>) -> Result<Solid, RenderError> {
    let angle: f32 = decode_value("rotateX", call.lead_value("rotateX")?)?;
    apply("rotateX", call, Mat4::from_rotation_x(angle))
}

fn rotate_y(call: &OpCall<'_>) -> Result<Solid, RenderError> {
    let angle: f32 = decode_value("rotateY", call.lead_value("rotateY")?)?;
    apply("rotateY", call, Mat4::from_rotation_y(angle))
}

fn rotate_z(call: &OpCall<'_>) -> Result<Solid, RenderError> {
    let angle: f32 = decode_value("rotateZ", call.lead_value("rotateZ")?)?;
    apply("rotateZ", call, Mat4::from_rotation_z(angle))
}

fn translate(call: &OpCall<'_>) -> Result<Solid, RenderError> {
    let offset: [f32; 3] = decode_value("translate", call.lead_value("translate")?)?;
    apply("translate", call, Mat4::from_translation(Vec3::from_array(offset)))
}

fn translate_x(call: &OpCall<'_>) -> Result<Solid, RenderError> {
    let offset: f32 = decode_value("translateX", call.lead_value("translateX")?)?;
    apply("translateX", call, Mat4::from_translation(Vec3::new(offset, 0.0, 0.0)))
}

fn translate_y(call: &OpCall<'_>) -> Result<Solid, RenderError> {
    let offset: f32 = decode_value("translateY", call.lead_value("translateY")?)?;
    apply("translateY", call, Mat4::from_translation(Vec3::new(0.0, offset, 0.0)))
}

fn translate_z(call: &OpCall<'_>) -> Result<Solid, RenderError> {
    let offset: f32 = decode_value("translateZ", call.lead_value("translateZ")?)?;
    apply("translateZ", call, Mat4::from_translation(Vec3::new(0.0, 0.0, offset)))
}

fn scale(call: &OpCall<'_>) -> Result<Solid, RenderError> {
    let factors: [f32; 3] = decode_value("scale", call.lead_value("scale")?)?;
    apply("scale", call, Mat4::from_scale(Vec3::from_array(factors)))
}

fn scale_x(call: &OpCall<'_>) -> Result<Solid, RenderError> {
    let factor: f32 = decode_value("scaleX", call.lead_value("scaleX")?)?;
    apply("scaleX", call, Mat4::from_scale(Vec3::new(factor, 1.0, 1.0)))
}

fn scale_y(call: &OpCall<'_>) -> Result<Solid, RenderError> {
    let factor: f32 = decode_value("scaleY", call.lead_value("scaleY")?)?;
    apply("scaleY", call, Mat4::from_scale(Vec3::new(1.0, factor, 1.0)))
}

fn scale_z(call: &OpCall<'_>) -> Result<Solid, RenderError> {
    let factor: f32 = decode_value("scaleZ", call.lead_value("scaleZ")?)?;
    apply("scaleZ", call, Mat4::from_scale(Vec3::new(1.0, 1.0, factor)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct CenterOpts {
    relative_to: [f32; 3],
    axes: [bool; 3],
}

impl Default for CenterOpts {
    fn default() -> Self {
        Self {
            relative_to: [0.0; 3],
            axes: [true; 3],
        }
    }
}

/// `center({relativeTo?, axes?}, ...children)`: moves the bounding-box
/// center of the merged children onto `relativeTo`.
fn center(call: &OpCall<'_>) -> Result<Solid, RenderError> {
    let opts: CenterOpts = decode_props("center", call.lead_props("center")?)?;
    let solid = call.merged_children("center")?;
    let (min, max) = solid
        .bounds()
        .ok_or_else(|| RenderError::operation("center", "children have no geometry"))?;
    let middle = (min + max) * 0.5;
    let target = Vec3::from_array(opts.relative_to);
    let mut offset = target - middle;
    for axis in 0..3 {
        if !opts.axes[axis] {
            offset[axis] = 0.0;
        }
    }
    Ok(solid.transformed(&Mat4::from_translation(offset)))
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct MirrorOpts {
    normal: [f32; 3],
    origin: [f32; 3],
}

impl Default for MirrorOpts {
    fn default() -> Self {
        Self {
            normal: [0.0, 0.0, 1.0],
            origin: [0.0; 3],
        }
    }
}

/// `mirror({normal?, origin?}, ...children)`: reflects across the plane
/// through `origin` with the given normal.
fn mirror(call: &OpCall<'_>) -> Result<Solid, RenderError> {
    let opts: MirrorOpts = decode_props("mirror", call.lead_props("mirror")?)?;
    let normal = Vec3::from_array(opts.normal);
    if normal.length_squared() < f32::EPSILON {
        return Err(RenderError::operation("mirror", "normal must be non-zero"));
    }
    let n = normal.normalize();
    let reflection = Mat3::IDENTITY
        - Mat3::from_cols(n * (2.0 * n.x), n * (2.0 * n.y), n * (2.0 * n.z));
    let origin = Vec3::from_array(opts.origin);
    let matrix = Mat4::from_translation(origin)
        * Mat4::from_mat3(reflection)
        * Mat4::from_translation(-origin);
    apply("mirror", call, matrix)
}

#[derive(Debug, Deserialize)]
struct TransformOpts {
    /// Column-major 4x4 matrix.
    matrix: [f32; 16],
}

fn transform(call: &OpCall<'_>) -> Result<Solid, RenderError> {
    let opts: TransformOpts = decode_props("transform", call.lead_props("transform")?)?;
    apply("transform", call, Mat4::from_cols_array(&opts.matrix))
}
