//! Extrusions of 2D profiles into solids.
//!
//! Profiles are closed polygons in the XY plane, supplied directly by the
//! caller (there is no 2D geometry pipeline). Caps use fan triangulation,
//! so profiles are expected to be convex.

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};

use crate::modeling::Solid;

/// Reorders the profile counter-clockwise (positive signed area).
fn oriented(profile: &[Vec2]) -> Vec<Vec2> {
    let mut area = 0.0;
    for i in 0..profile.len() {
        let j = (i + 1) % profile.len();
        area += profile[i].perp_dot(profile[j]);
    }
    if area < 0.0 {
        profile.iter().rev().copied().collect()
    } else {
        profile.to_vec()
    }
}

/// Extrudes the profile from z = 0 to z = `height` (height must be
/// positive; the registry wrapper validates).
pub fn extrude_linear(profile: &[Vec2], height: f32) -> Solid {
    let points = oriented(profile);
    let n = points.len();
    let at = |p: Vec2, z: f32| Vec3::new(p.x, p.y, z);

    let mut solid = Solid::new();
    // Caps: bottom faces down, top faces up.
    for i in 1..n - 1 {
        solid.push(at(points[0], 0.0), at(points[i + 1], 0.0), at(points[i], 0.0));
        solid.push(at(points[0], height), at(points[i], height), at(points[i + 1], height));
    }
    // Sides: outward for a counter-clockwise profile.
    for i in 0..n {
        let j = (i + 1) % n;
        let (a, b) = (at(points[i], 0.0), at(points[j], 0.0));
        let (c, d) = (at(points[j], height), at(points[i], height));
        solid.push(a, b, c);
        solid.push(a, c, d);
    }
    solid
}

/// Rotates the profile about the Z axis: a point `(x, y)` sweeps to
/// `(x cos t, x sin t, y)`. A partial `angle` leaves the sweep open at both
/// ends, closed with flat caps.
pub fn extrude_rotate(profile: &[Vec2], segments: u32, angle: f32) -> Solid {
    let points = oriented(profile);
    let n = points.len();
    let segments = segments.max(3);
    let angle = angle.clamp(-TAU, TAU);
    let full = (angle.abs() - TAU).abs() < 1e-6;

    let at = |p: Vec2, step: u32| {
        let theta = angle * step as f32 / segments as f32;
        Vec3::new(p.x * theta.cos(), p.x * theta.sin(), p.y)
    };

    let mut solid = Solid::new();
    for step in 0..segments {
        for i in 0..n {
            let j = (i + 1) % n;
            let a = at(points[i], step);
            let b = at(points[i], step + 1);
            let c = at(points[j], step + 1);
            let d = at(points[j], step);
            if angle >= 0.0 {
                solid.push(a, b, c);
                solid.push(a, c, d);
            } else {
                solid.push(a, c, b);
                solid.push(a, d, c);
            }
        }
    }
    if !full {
        for i in 1..n - 1 {
            let (p0, pi, pj) = (points[0], points[i], points[i + 1]);
            solid.push(at(p0, 0), at(pi, 0), at(pj, 0));
            solid.push(at(p0, segments), at(pj, segments), at(pi, segments));
        }
    }
    // Profile points on the axis produce zero-area quads.
    solid.pruned()
}
