use glam::Vec3;

use super::{OpCall, OpCategory, OpEntry};
use crate::error::RenderError;
use crate::modeling::{booleans, hulls, Solid};

pub(super) fn hull_ops() -> Vec<OpEntry> {
    let cat = OpCategory::Hull;
    vec![
        OpEntry::nary("hull", cat, hull),
        OpEntry::nary("hullChain", cat, hull_chain),
    ]
}

fn hull_of(op: &str, solids: &[&Solid]) -> Result<Solid, RenderError> {
    let points: Vec<Vec3> = solids.iter().flat_map(|s| s.vertices()).collect();
    let mut result = hulls::convex_hull(&points)
        .ok_or_else(|| RenderError::operation(op, "input is degenerate"))?;
    result.color = solids.iter().find_map(|s| s.color);
    Ok(result)
}

/// `hull(...children)`: convex hull over every child vertex.
fn hull(call: &OpCall<'_>) -> Result<Solid, RenderError> {
    let solids: Vec<&Solid> = call.child_solids().collect();
    if solids.is_empty() {
        return Err(RenderError::operation("hull", "requires at least one child"));
    }
    hull_of("hull", &solids)
}

/// `hullChain(...children)`: hulls each consecutive pair of children and
/// unions the results.
fn hull_chain(call: &OpCall<'_>) -> Result<Solid, RenderError> {
    let solids: Vec<&Solid> = call.child_solids().collect();
    match solids.len() {
        0 => Err(RenderError::operation(
            "hullChain",
            "requires at least one child",
        )),
        1 => hull_of("hullChain", &solids),
        _ => {
            let mut result: Option<Solid> = None;
            for pair in solids.windows(2) {
                let link = hull_of("hullChain", pair)?;
                result = Some(match result {
                    Some(acc) => booleans::union(&acc, &link),
                    None => link,
                });
            }
            Ok(result.expect("at least one pair"))
        }
    }
}
