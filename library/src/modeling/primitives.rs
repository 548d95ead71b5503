//! Shape generators. All primitives are centered at the origin with the Z
//! axis up, following the conventions of the declared vocabulary.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::modeling::Solid;

/// Axis-aligned box with the given side lengths.
pub fn cuboid(size: Vec3) -> Solid {
    let h = size * 0.5;
    let p = |x: f32, y: f32, z: f32| Vec3::new(x * h.x, y * h.y, z * h.z);
    let mut solid = Solid::new();
    let mut face = |a: Vec3, b: Vec3, c: Vec3, d: Vec3| {
        solid.push(a, b, c);
        solid.push(a, c, d);
    };
    // +Z
    face(p(-1.0, -1.0, 1.0), p(1.0, -1.0, 1.0), p(1.0, 1.0, 1.0), p(-1.0, 1.0, 1.0));
    // -Z
    face(p(1.0, -1.0, -1.0), p(-1.0, -1.0, -1.0), p(-1.0, 1.0, -1.0), p(1.0, 1.0, -1.0));
    // +X
    face(p(1.0, -1.0, 1.0), p(1.0, -1.0, -1.0), p(1.0, 1.0, -1.0), p(1.0, 1.0, 1.0));
    // -X
    face(p(-1.0, -1.0, -1.0), p(-1.0, -1.0, 1.0), p(-1.0, 1.0, 1.0), p(-1.0, 1.0, -1.0));
    // +Y
    face(p(-1.0, 1.0, 1.0), p(1.0, 1.0, 1.0), p(1.0, 1.0, -1.0), p(-1.0, 1.0, -1.0));
    // -Y
    face(p(-1.0, -1.0, -1.0), p(1.0, -1.0, -1.0), p(1.0, -1.0, 1.0), p(-1.0, -1.0, 1.0));
    solid
}

/// Cube with equal side lengths.
pub fn cube(size: f32) -> Solid {
    cuboid(Vec3::splat(size))
}

/// UV sphere. `segments` counts subdivisions around the equator; rings are
/// derived from it. Poles are emitted as single triangles per segment.
pub fn sphere(radius: f32, segments: u32) -> Solid {
    let segments = segments.max(4);
    let rings = (segments / 2).max(2);
    let point = |ring: u32, seg: u32| {
        let phi = PI * ring as f32 / rings as f32;
        let theta = TAU * seg as f32 / segments as f32;
        Vec3::new(
            phi.sin() * theta.cos(),
            phi.sin() * theta.sin(),
            phi.cos(),
        ) * radius
    };
    let mut solid = Solid::new();
    for ring in 0..rings {
        for seg in 0..segments {
            let a = point(ring, seg);
            let b = point(ring, seg + 1);
            let c = point(ring + 1, seg + 1);
            let d = point(ring + 1, seg);
            if ring == 0 {
                solid.push(a, d, c);
            } else if ring == rings - 1 {
                solid.push(a, c, b);
            } else {
                solid.push(a, d, c);
                solid.push(a, c, b);
            }
        }
    }
    solid
}

/// Cylinder along Z, capped at both ends.
pub fn cylinder(radius: f32, height: f32, segments: u32) -> Solid {
    let segments = segments.max(3);
    let hz = height * 0.5;
    let rim = |seg: u32, z: f32| {
        let theta = TAU * seg as f32 / segments as f32;
        Vec3::new(radius * theta.cos(), radius * theta.sin(), z)
    };
    let top = Vec3::new(0.0, 0.0, hz);
    let bottom = Vec3::new(0.0, 0.0, -hz);
    let mut solid = Solid::new();
    for seg in 0..segments {
        let b0 = rim(seg, -hz);
        let b1 = rim(seg + 1, -hz);
        let t0 = rim(seg, hz);
        let t1 = rim(seg + 1, hz);
        solid.push(b0, b1, t1);
        solid.push(b0, t1, t0);
        solid.push(top, t0, t1);
        solid.push(bottom, b1, b0);
    }
    solid
}

/// Torus around Z. `inner_radius` is the tube radius, `outer_radius` the
/// distance from the axis to the tube center.
pub fn torus(
    inner_radius: f32,
    outer_radius: f32,
    inner_segments: u32,
    outer_segments: u32,
) -> Solid {
    let inner_segments = inner_segments.max(3);
    let outer_segments = outer_segments.max(3);
    let point = |i: u32, j: u32| {
        let u = TAU * i as f32 / outer_segments as f32;
        let v = TAU * j as f32 / inner_segments as f32;
        let ring = outer_radius + inner_radius * v.cos();
        Vec3::new(ring * u.cos(), ring * u.sin(), inner_radius * v.sin())
    };
    let mut solid = Solid::new();
    for i in 0..outer_segments {
        for j in 0..inner_segments {
            let a = point(i, j);
            let b = point(i + 1, j);
            let c = point(i + 1, j + 1);
            let d = point(i, j + 1);
            solid.push(a, b, c);
            solid.push(a, c, d);
        }
    }
    solid
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cube_has_twelve_triangles_and_symmetric_bounds() {
        let solid = cube(10.0);
        assert_eq!(solid.triangle_count(), 12);
        let (min, max) = solid.bounds().unwrap();
        assert_eq!(min, Vec3::splat(-5.0));
        assert_eq!(max, Vec3::splat(5.0));
    }

    #[test]
    fn cube_normals_point_outward() {
        for t in &cube(2.0).triangles {
            let centroid = (t.vertices[0] + t.vertices[1] + t.vertices[2]) / 3.0;
            assert!(t.normal().dot(centroid) > 0.0);
        }
    }

    #[test]
    fn sphere_vertices_lie_on_radius() {
        let solid = sphere(3.0, 16);
        for v in solid.vertices() {
            assert!((v.length() - 3.0).abs() < 1e-4);
        }
    }

    #[test]
    fn sphere_triangle_count_matches_grid() {
        // 16 segments -> 8 rings: poles contribute one triangle per segment,
        // middle rings two.
        let solid = sphere(1.0, 16);
        assert_eq!(solid.triangle_count(), (16 * 2) + (6 * 16 * 2));
    }

    #[test]
    fn cylinder_bounds_match_dimensions() {
        let solid = cylinder(2.0, 10.0, 24);
        let (min, max) = solid.bounds().unwrap();
        assert!((min.z + 5.0).abs() < 1e-5 && (max.z - 5.0).abs() < 1e-5);
        assert!((max.x - 2.0).abs() < 1e-5);
    }

    #[test]
    fn torus_stays_inside_outer_shell() {
        let solid = torus(1.0, 4.0, 8, 8);
        for v in solid.vertices() {
            let planar = (v.x * v.x + v.y * v.y).sqrt();
            assert!(planar <= 5.0 + 1e-4);
            assert!(v.z.abs() <= 1.0 + 1e-4);
        }
    }
}
