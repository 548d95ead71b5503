//! Convex hulls.
//!
//! Incremental construction: start from a tetrahedron of extreme points,
//! then add each remaining point by removing the faces it sees and fanning
//! new faces to the horizon edges.

use std::collections::HashSet;

use glam::Vec3;

use crate::modeling::Solid;

const EPSILON: f32 = 1e-5;

#[derive(Debug, Clone, Copy)]
struct Face {
    a: usize,
    b: usize,
    c: usize,
    normal: Vec3,
    offset: f32,
}

impl Face {
    fn new(points: &[Vec3], a: usize, b: usize, c: usize) -> Self {
        let normal = (points[b] - points[a])
            .cross(points[c] - points[a])
            .normalize_or_zero();
        Self {
            a,
            b,
            c,
            normal,
            offset: normal.dot(points[a]),
        }
    }

    fn sees(&self, point: Vec3) -> bool {
        self.normal.dot(point) - self.offset > EPSILON
    }

    fn edges(&self) -> [(usize, usize); 3] {
        [(self.a, self.b), (self.b, self.c), (self.c, self.a)]
    }
}

fn dedupe(input: &[Vec3]) -> Vec<Vec3> {
    let mut seen = HashSet::new();
    let mut points = Vec::with_capacity(input.len());
    for &v in input {
        let key = [v.x.to_bits(), v.y.to_bits(), v.z.to_bits()];
        if seen.insert(key) {
            points.push(v);
        }
    }
    points
}

fn initial_tetrahedron(points: &[Vec3]) -> Option<[usize; 4]> {
    let i0 = points
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.x.total_cmp(&b.x))?
        .0;
    let p0 = points[i0];

    let (i1, d1) = points
        .iter()
        .enumerate()
        .map(|(i, &p)| (i, p.distance_squared(p0)))
        .max_by(|a, b| a.1.total_cmp(&b.1))?;
    if d1 < EPSILON * EPSILON {
        return None;
    }
    let p1 = points[i1];

    let (i2, d2) = points
        .iter()
        .enumerate()
        .map(|(i, &p)| (i, (p1 - p0).cross(p - p0).length_squared()))
        .max_by(|a, b| a.1.total_cmp(&b.1))?;
    if d2 < EPSILON * EPSILON {
        return None;
    }
    let normal = (p1 - p0).cross(points[i2] - p0);

    let (i3, d3) = points
        .iter()
        .enumerate()
        .map(|(i, &p)| (i, normal.dot(p - p0).abs()))
        .max_by(|a, b| a.1.total_cmp(&b.1))?;
    if d3 < EPSILON {
        return None;
    }
    Some([i0, i1, i2, i3])
}

/// Convex hull of a point set, or `None` when the input is degenerate
/// (fewer than four distinct points, or all of them coplanar).
pub fn convex_hull(input: &[Vec3]) -> Option<Solid> {
    let points = dedupe(input);
    if points.len() < 4 {
        return None;
    }
    let seed = initial_tetrahedron(&points)?;
    let centroid = seed.iter().map(|&i| points[i]).sum::<Vec3>() / 4.0;

    let orient = |face: Face| {
        if face.sees(centroid) {
            Face::new(&points, face.a, face.c, face.b)
        } else {
            face
        }
    };
    let [s0, s1, s2, s3] = seed;
    let mut faces = vec![
        orient(Face::new(&points, s0, s1, s2)),
        orient(Face::new(&points, s0, s3, s1)),
        orient(Face::new(&points, s1, s3, s2)),
        orient(Face::new(&points, s2, s3, s0)),
    ];

    for (index, &point) in points.iter().enumerate() {
        if seed.contains(&index) {
            continue;
        }
        let visible: Vec<Face> = faces.iter().copied().filter(|f| f.sees(point)).collect();
        if visible.is_empty() {
            continue;
        }
        let visible_edges: HashSet<(usize, usize)> =
            visible.iter().flat_map(|f| f.edges()).collect();
        faces.retain(|f| !f.sees(point));
        for &(u, v) in &visible_edges {
            // Horizon edges are the ones whose reverse belongs to a kept face.
            if !visible_edges.contains(&(v, u)) {
                faces.push(Face::new(&points, u, v, index));
            }
        }
    }

    let mut solid = Solid::new();
    for face in faces {
        solid.push(points[face.a], points[face.b], points[face.c]);
    }
    Some(solid.pruned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modeling::primitives::cube;

    #[test]
    fn hull_of_a_cube_recovers_its_bounds() {
        let solid = cube(2.0);
        let hull = convex_hull(&solid.vertices().collect::<Vec<_>>()).unwrap();
        assert_eq!(hull.bounds(), solid.bounds());
    }

    #[test]
    fn hull_faces_point_away_from_the_center() {
        let solid = cube(2.0);
        let hull = convex_hull(&solid.vertices().collect::<Vec<_>>()).unwrap();
        for t in &hull.triangles {
            let centroid = (t.vertices[0] + t.vertices[1] + t.vertices[2]) / 3.0;
            assert!(t.normal().dot(centroid) > 0.0);
        }
    }

    #[test]
    fn interior_points_do_not_affect_the_hull() {
        let mut points: Vec<Vec3> = cube(2.0).vertices().collect();
        points.push(Vec3::ZERO);
        points.push(Vec3::splat(0.25));
        let hull = convex_hull(&points).unwrap();
        assert_eq!(hull.bounds(), cube(2.0).bounds());
    }

    #[test]
    fn coplanar_input_is_rejected() {
        let points = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
        ];
        assert!(convex_hull(&points).is_none());
    }
}
