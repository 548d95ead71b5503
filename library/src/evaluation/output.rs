use uuid::Uuid;

use crate::modeling::Solid;

/// The geometry produced by evaluating one instance.
///
/// `id` and `children` mirror the originating instance, forming a shadow
/// tree for introspection; they decorate the value without altering the
/// solid the operation computed.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub id: Uuid,
    pub solid: Solid,
    pub children: Vec<Geometry>,
}

impl Geometry {
    pub fn triangle_count(&self) -> usize {
        self.solid.triangle_count()
    }
}
