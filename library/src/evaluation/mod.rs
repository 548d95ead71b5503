//! Bottom-up evaluation of a mounted instance tree.

mod adapter;
mod output;

pub use adapter::adapt;
pub use output::Geometry;

use log::debug;

use crate::error::RenderError;
use crate::model::{InstanceArena, InstanceId};

/// Evaluates the subtree rooted at `id` into one geometry value.
///
/// Strict post-order: every child is evaluated (in append order) before its
/// parent's operation is invoked. The produced geometry is decorated with
/// the instance's id and its child geometries; the solid itself is exactly
/// what the operation returned. There is no memoization: evaluating the
/// same instance twice invokes its operation twice and yields value-equal,
/// not identical, results.
pub fn evaluate(arena: &InstanceArena, id: InstanceId) -> Result<Geometry, RenderError> {
    let instance = arena.get(id);
    let mut children = Vec::with_capacity(instance.children.len());
    for &child in &instance.children {
        children.push(evaluate(arena, child)?);
    }
    let call = adapter::adapt(instance.entry, &instance.props, &children)?;
    let solid = (instance.entry.invoke)(&call)?;
    debug!(
        "evaluated {} ({} children, {} triangles)",
        instance.type_name,
        children.len(),
        solid.triangle_count()
    );
    Ok(Geometry {
        id: instance.id,
        solid,
        children,
    })
}
