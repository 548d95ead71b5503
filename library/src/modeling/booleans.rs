//! Boolean operations over solids.
//!
//! BSP-tree CSG: build a tree per operand, clip each against the other,
//! then gather the surviving polygons. The clip/invert sequences are the
//! classic ones; only the polygon bookkeeping differs from textbook
//! presentations because solids here are triangle soups.

use glam::Vec3;

use crate::modeling::solid::{Solid, Triangle};

const EPSILON: f32 = 1e-5;

const COPLANAR: u8 = 0;
const FRONT: u8 = 1;
const BACK: u8 = 2;
const SPANNING: u8 = 3;

#[derive(Debug, Clone, Copy)]
struct Plane {
    normal: Vec3,
    offset: f32,
}

impl Plane {
    fn from_points(a: Vec3, b: Vec3, c: Vec3) -> Option<Self> {
        let cross = (b - a).cross(c - a);
        if cross.length_squared() < EPSILON * EPSILON {
            return None;
        }
        let normal = cross.normalize();
        Some(Self {
            normal,
            offset: normal.dot(a),
        })
    }

    fn distance_to(&self, point: Vec3) -> f32 {
        self.normal.dot(point) - self.offset
    }

    fn flip(&mut self) {
        self.normal = -self.normal;
        self.offset = -self.offset;
    }
}

#[derive(Debug, Clone)]
struct Polygon {
    vertices: Vec<Vec3>,
    plane: Plane,
}

impl Polygon {
    fn new(vertices: Vec<Vec3>) -> Option<Self> {
        if vertices.len() < 3 {
            return None;
        }
        let plane = Plane::from_points(vertices[0], vertices[1], vertices[2])?;
        Some(Self { vertices, plane })
    }

    fn flip(&mut self) {
        self.vertices.reverse();
        self.plane.flip();
    }
}

/// Splits `polygon` by `plane` into the four output lists.
fn split_polygon(
    plane: &Plane,
    polygon: &Polygon,
    coplanar_front: &mut Vec<Polygon>,
    coplanar_back: &mut Vec<Polygon>,
    front: &mut Vec<Polygon>,
    back: &mut Vec<Polygon>,
) {
    let mut polygon_type = COPLANAR;
    let mut types = Vec::with_capacity(polygon.vertices.len());
    for &v in &polygon.vertices {
        let distance = plane.distance_to(v);
        let t = if distance > EPSILON {
            FRONT
        } else if distance < -EPSILON {
            BACK
        } else {
            COPLANAR
        };
        polygon_type |= t;
        types.push(t);
    }

    match polygon_type {
        COPLANAR => {
            if plane.normal.dot(polygon.plane.normal) > 0.0 {
                coplanar_front.push(polygon.clone());
            } else {
                coplanar_back.push(polygon.clone());
            }
        }
        FRONT => front.push(polygon.clone()),
        BACK => back.push(polygon.clone()),
        _ => {
            let mut front_vertices = Vec::new();
            let mut back_vertices = Vec::new();
            for i in 0..polygon.vertices.len() {
                let j = (i + 1) % polygon.vertices.len();
                let (vi, vj) = (polygon.vertices[i], polygon.vertices[j]);
                let (ti, tj) = (types[i], types[j]);
                if ti != BACK {
                    front_vertices.push(vi);
                }
                if ti != FRONT {
                    back_vertices.push(vi);
                }
                if (ti | tj) == SPANNING {
                    let t = (plane.offset - plane.normal.dot(vi)) / plane.normal.dot(vj - vi);
                    let intersection = vi + (vj - vi) * t;
                    front_vertices.push(intersection);
                    back_vertices.push(intersection);
                }
            }
            if let Some(p) = Polygon::new(front_vertices) {
                front.push(p);
            }
            if let Some(p) = Polygon::new(back_vertices) {
                back.push(p);
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
struct BspNode {
    plane: Option<Plane>,
    polygons: Vec<Polygon>,
    front: Option<Box<BspNode>>,
    back: Option<Box<BspNode>>,
}

impl BspNode {
    fn from_polygons(polygons: Vec<Polygon>) -> Self {
        let mut node = Self::default();
        node.build(polygons);
        node
    }

    fn build(&mut self, polygons: Vec<Polygon>) {
        if polygons.is_empty() {
            return;
        }
        if self.plane.is_none() {
            self.plane = Some(polygons[0].plane);
        }
        let plane = self.plane.expect("plane set above");

        let mut front = Vec::new();
        let mut back = Vec::new();
        for polygon in &polygons {
            // Coplanar polygons stay on this node.
            let mut coplanar_back = Vec::new();
            split_polygon(
                &plane,
                polygon,
                &mut self.polygons,
                &mut coplanar_back,
                &mut front,
                &mut back,
            );
            self.polygons.append(&mut coplanar_back);
        }

        if !front.is_empty() {
            self.front
                .get_or_insert_with(|| Box::new(BspNode::default()))
                .build(front);
        }
        if !back.is_empty() {
            self.back
                .get_or_insert_with(|| Box::new(BspNode::default()))
                .build(back);
        }
    }

    /// Converts the tree to represent the complement of its solid.
    fn invert(&mut self) {
        for polygon in &mut self.polygons {
            polygon.flip();
        }
        if let Some(plane) = &mut self.plane {
            plane.flip();
        }
        if let Some(front) = &mut self.front {
            front.invert();
        }
        if let Some(back) = &mut self.back {
            back.invert();
        }
        std::mem::swap(&mut self.front, &mut self.back);
    }

    /// Removes the parts of `polygons` inside this tree's solid.
    fn clip_polygons(&self, polygons: Vec<Polygon>) -> Vec<Polygon> {
        let Some(plane) = self.plane else {
            return polygons;
        };
        let mut front = Vec::new();
        let mut back = Vec::new();
        for polygon in &polygons {
            let mut coplanar_front = Vec::new();
            let mut coplanar_back = Vec::new();
            split_polygon(
                &plane,
                polygon,
                &mut coplanar_front,
                &mut coplanar_back,
                &mut front,
                &mut back,
            );
            front.append(&mut coplanar_front);
            back.append(&mut coplanar_back);
        }
        let mut front = match &self.front {
            Some(node) => node.clip_polygons(front),
            None => front,
        };
        let back = match &self.back {
            Some(node) => node.clip_polygons(back),
            None => Vec::new(),
        };
        front.extend(back);
        front
    }

    fn clip_to(&mut self, other: &BspNode) {
        self.polygons = other.clip_polygons(std::mem::take(&mut self.polygons));
        if let Some(front) = &mut self.front {
            front.clip_to(other);
        }
        if let Some(back) = &mut self.back {
            back.clip_to(other);
        }
    }

    fn collect_polygons(&self, out: &mut Vec<Polygon>) {
        out.extend(self.polygons.iter().cloned());
        if let Some(front) = &self.front {
            front.collect_polygons(out);
        }
        if let Some(back) = &self.back {
            back.collect_polygons(out);
        }
    }

    fn all_polygons(&self) -> Vec<Polygon> {
        let mut out = Vec::new();
        self.collect_polygons(&mut out);
        out
    }
}

fn to_polygons(solid: &Solid) -> Vec<Polygon> {
    solid
        .triangles
        .iter()
        .filter_map(|t| Polygon::new(t.vertices.to_vec()))
        .collect()
}

fn to_solid(polygons: &[Polygon], color: Option<[f32; 4]>) -> Solid {
    let mut solid = Solid::new();
    for polygon in polygons {
        // Fan triangulation; split polygons stay convex.
        for i in 1..polygon.vertices.len() - 1 {
            solid.triangles.push(Triangle::new(
                polygon.vertices[0],
                polygon.vertices[i],
                polygon.vertices[i + 1],
            ));
        }
    }
    solid.color = color;
    solid
}

/// A ∪ B.
pub fn union(a: &Solid, b: &Solid) -> Solid {
    let mut a_tree = BspNode::from_polygons(to_polygons(a));
    let mut b_tree = BspNode::from_polygons(to_polygons(b));

    a_tree.clip_to(&b_tree);
    b_tree.clip_to(&a_tree);
    b_tree.invert();
    b_tree.clip_to(&a_tree);
    b_tree.invert();

    let mut polygons = a_tree.all_polygons();
    polygons.extend(b_tree.all_polygons());
    to_solid(&polygons, a.color.or(b.color))
}

/// A − B.
pub fn subtract(a: &Solid, b: &Solid) -> Solid {
    let mut a_tree = BspNode::from_polygons(to_polygons(a));
    let mut b_tree = BspNode::from_polygons(to_polygons(b));

    a_tree.invert();
    a_tree.clip_to(&b_tree);
    b_tree.clip_to(&a_tree);
    b_tree.invert();
    b_tree.clip_to(&a_tree);
    b_tree.invert();
    a_tree.invert();

    let mut polygons = a_tree.all_polygons();
    polygons.extend(b_tree.all_polygons());
    to_solid(&polygons, a.color.or(b.color))
}

/// A ∩ B.
pub fn intersect(a: &Solid, b: &Solid) -> Solid {
    let mut a_tree = BspNode::from_polygons(to_polygons(a));
    let mut b_tree = BspNode::from_polygons(to_polygons(b));

    a_tree.invert();
    b_tree.clip_to(&a_tree);
    b_tree.invert();
    a_tree.clip_to(&b_tree);
    b_tree.clip_to(&a_tree);

    let mut polygons = a_tree.all_polygons();
    polygons.extend(b_tree.all_polygons());
    let mut combined = BspNode::from_polygons(polygons);
    combined.invert();
    to_solid(&combined.all_polygons(), a.color.or(b.color))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modeling::primitives::cube;
    use glam::Mat4;

    fn shifted_cube(size: f32, offset: Vec3) -> Solid {
        cube(size).transformed(&Mat4::from_translation(offset))
    }

    #[test]
    fn union_of_disjoint_cubes_keeps_both() {
        let a = cube(2.0);
        let b = shifted_cube(2.0, Vec3::new(10.0, 0.0, 0.0));
        let result = union(&a, &b);
        let (min, max) = result.bounds().unwrap();
        assert_eq!(min, Vec3::new(-1.0, -1.0, -1.0));
        assert_eq!(max, Vec3::new(11.0, 1.0, 1.0));
    }

    #[test]
    fn subtract_carves_into_the_first_operand() {
        let a = cube(4.0);
        let b = shifted_cube(4.0, Vec3::new(2.0, 0.0, 0.0));
        let result = subtract(&a, &b);
        let (min, max) = result.bounds().unwrap();
        assert!((min.x + 2.0).abs() < 1e-4);
        // Everything right of x = 0 was removed.
        assert!(max.x < 1e-3);
    }

    #[test]
    fn intersect_keeps_the_overlap() {
        let a = cube(4.0);
        let b = shifted_cube(4.0, Vec3::new(2.0, 0.0, 0.0));
        let result = intersect(&a, &b);
        let (min, max) = result.bounds().unwrap();
        assert!(min.x.abs() < 1e-4);
        assert!((max.x - 2.0).abs() < 1e-4);
        assert!((max.y - 2.0).abs() < 1e-4);
    }

    #[test]
    fn union_carries_a_color() {
        let a = cube(2.0).with_color([1.0, 0.0, 0.0, 1.0]);
        let b = shifted_cube(2.0, Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(union(&a, &b).color, Some([1.0, 0.0, 0.0, 1.0]));
    }
}
