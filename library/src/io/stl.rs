//! Binary STL encoding.
//!
//! Layout: 80-byte header, little-endian `u32` triangle count, then 50
//! bytes per triangle (normal, three vertices, `u16` attribute).

use glam::Vec3;

use crate::error::RenderError;
use crate::modeling::{Solid, Triangle};

const HEADER_LEN: usize = 80;
const TRIANGLE_LEN: usize = 50;

pub fn encode(solid: &Solid) -> Vec<u8> {
    let mut buf = Vec::with_capacity(HEADER_LEN + 4 + solid.triangle_count() * TRIANGLE_LEN);
    let mut header = [0u8; HEADER_LEN];
    let tag = b"solidtree binary STL";
    header[..tag.len()].copy_from_slice(tag);
    buf.extend_from_slice(&header);
    buf.extend_from_slice(&(solid.triangle_count() as u32).to_le_bytes());
    for triangle in &solid.triangles {
        put_vec3(&mut buf, triangle.normal());
        for vertex in triangle.vertices {
            put_vec3(&mut buf, vertex);
        }
        buf.extend_from_slice(&0u16.to_le_bytes());
    }
    buf
}

/// Decodes a binary STL buffer back into a solid (no color; STL does not
/// carry one). Used for verification; stored normals are discarded in
/// favor of the triangle winding.
pub fn decode(bytes: &[u8]) -> Result<Solid, RenderError> {
    if bytes.len() < HEADER_LEN + 4 {
        return Err(RenderError::operation("stl", "buffer too short"));
    }
    let count = u32::from_le_bytes(
        bytes[HEADER_LEN..HEADER_LEN + 4]
            .try_into()
            .expect("4-byte slice"),
    ) as usize;
    if bytes.len() != HEADER_LEN + 4 + count * TRIANGLE_LEN {
        return Err(RenderError::operation("stl", "unexpected buffer length"));
    }
    let mut solid = Solid::new();
    for i in 0..count {
        let base = HEADER_LEN + 4 + i * TRIANGLE_LEN;
        // Skip the stored normal at `base`.
        let a = get_vec3(bytes, base + 12);
        let b = get_vec3(bytes, base + 24);
        let c = get_vec3(bytes, base + 36);
        solid.triangles.push(Triangle::new(a, b, c));
    }
    Ok(solid)
}

fn put_vec3(buf: &mut Vec<u8>, v: Vec3) {
    for component in v.to_array() {
        buf.extend_from_slice(&component.to_le_bytes());
    }
}

fn get_vec3(bytes: &[u8], offset: usize) -> Vec3 {
    let component = |at: usize| {
        f32::from_le_bytes(bytes[at..at + 4].try_into().expect("4-byte slice"))
    };
    Vec3::new(component(offset), component(offset + 4), component(offset + 8))
}
