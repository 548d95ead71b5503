//! Triangle-soup solid representation shared by every modeling operation.

use std::collections::HashMap;

use glam::{Mat4, Vec3};

/// Area below which a triangle counts as degenerate.
pub const DEGENERATE_AREA: f32 = 1e-9;

/// A single oriented triangle. Winding is counter-clockwise seen from
/// outside the solid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Vec3; 3],
}

impl Triangle {
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self { vertices: [a, b, c] }
    }

    /// Unit face normal, or zero for a degenerate triangle.
    pub fn normal(&self) -> Vec3 {
        let [a, b, c] = self.vertices;
        (b - a).cross(c - a).normalize_or_zero()
    }

    pub fn area(&self) -> f32 {
        let [a, b, c] = self.vertices;
        (b - a).cross(c - a).length() * 0.5
    }

    fn flipped(self) -> Self {
        let [a, b, c] = self.vertices;
        Self { vertices: [a, c, b] }
    }
}

/// RGBA color attribute attached by `colorize`.
pub type Rgba = [f32; 4];

/// A solid as an oriented triangle soup, optionally carrying a color.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Solid {
    pub triangles: Vec<Triangle>,
    pub color: Option<Rgba>,
}

impl Solid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_triangles(triangles: Vec<Triangle>) -> Self {
        Self {
            triangles,
            color: None,
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn push(&mut self, a: Vec3, b: Vec3, c: Vec3) {
        self.triangles.push(Triangle::new(a, b, c));
    }

    pub fn vertices(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.triangles.iter().flat_map(|t| t.vertices.into_iter())
    }

    /// Merges several solids into one soup, in order. The first explicit
    /// color wins.
    pub fn merged<'a>(parts: impl IntoIterator<Item = &'a Solid>) -> Solid {
        let mut out = Solid::new();
        for part in parts {
            out.triangles.extend_from_slice(&part.triangles);
            if out.color.is_none() {
                out.color = part.color;
            }
        }
        out
    }

    pub fn with_color(mut self, color: Rgba) -> Solid {
        self.color = Some(color);
        self
    }

    /// Applies an affine transform. Winding is reversed when the transform
    /// mirrors (negative determinant), so normals keep pointing outward.
    pub fn transformed(&self, matrix: &Mat4) -> Solid {
        let mirrored = matrix.determinant() < 0.0;
        let triangles = self
            .triangles
            .iter()
            .map(|t| {
                let mapped = Triangle {
                    vertices: t.vertices.map(|v| matrix.transform_point3(v)),
                };
                if mirrored { mapped.flipped() } else { mapped }
            })
            .collect();
        Solid {
            triangles,
            color: self.color,
        }
    }

    /// Axis-aligned bounding box, `None` for an empty solid.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut vertices = self.vertices();
        let first = vertices.next()?;
        let (mut min, mut max) = (first, first);
        for v in vertices {
            min = min.min(v);
            max = max.max(v);
        }
        Some((min, max))
    }

    /// Quantizes every vertex to a grid of the given spacing.
    pub fn snapped(&self, precision: f32) -> Solid {
        let snap = |v: Vec3| (v / precision).round() * precision;
        let triangles = self
            .triangles
            .iter()
            .map(|t| Triangle {
                vertices: t.vertices.map(snap),
            })
            .collect();
        Solid {
            triangles,
            color: self.color,
        }
    }

    /// Drops triangles whose area has collapsed to (near) zero.
    pub fn pruned(&self) -> Solid {
        let triangles = self
            .triangles
            .iter()
            .copied()
            .filter(|t| t.area() > DEGENERATE_AREA)
            .collect();
        Solid {
            triangles,
            color: self.color,
        }
    }

    /// Offsets every vertex along its accumulated area-weighted normal.
    ///
    /// Vertices are matched across triangles by quantized position, so the
    /// soup inflates coherently instead of splitting along shared edges.
    pub fn expanded(&self, delta: f32) -> Solid {
        let mut accumulated: HashMap<[i64; 3], Vec3> = HashMap::new();
        for t in &self.triangles {
            let weighted = t.normal() * t.area();
            for v in t.vertices {
                *accumulated.entry(position_key(v)).or_insert(Vec3::ZERO) += weighted;
            }
        }
        let triangles = self
            .triangles
            .iter()
            .map(|t| Triangle {
                vertices: t.vertices.map(|v| {
                    let normal = accumulated
                        .get(&position_key(v))
                        .copied()
                        .unwrap_or(Vec3::ZERO)
                        .normalize_or_zero();
                    v + normal * delta
                }),
            })
            .collect();
        Solid {
            triangles,
            color: self.color,
        }
    }
}

fn position_key(v: Vec3) -> [i64; 3] {
    const SCALE: f32 = 1.0e5;
    [
        (v.x * SCALE).round() as i64,
        (v.y * SCALE).round() as i64,
        (v.z * SCALE).round() as i64,
    ]
}
