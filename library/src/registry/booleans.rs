//! N-ary combinators over children. Props are never consulted.

use super::{OpCall, OpCategory, OpEntry};
use crate::error::RenderError;
use crate::modeling::{booleans, Solid};

pub(super) fn boolean_ops() -> Vec<OpEntry> {
    let cat = OpCategory::Boolean;
    vec![
        OpEntry::nary("union", cat, union),
        OpEntry::nary("subtract", cat, subtract),
        OpEntry::nary("intersect", cat, intersect),
    ]
}

fn fold_children(
    op: &str,
    call: &OpCall<'_>,
    combine: fn(&Solid, &Solid) -> Solid,
) -> Result<Solid, RenderError> {
    let mut solids = call.child_solids();
    let first = solids
        .next()
        .ok_or_else(|| RenderError::operation(op, "requires at least one child"))?;
    Ok(solids.fold(first.clone(), |acc, next| combine(&acc, next)))
}

fn union(call: &OpCall<'_>) -> Result<Solid, RenderError> {
    fold_children("union", call, booleans::union)
}

fn subtract(call: &OpCall<'_>) -> Result<Solid, RenderError> {
    fold_children("subtract", call, booleans::subtract)
}

fn intersect(call: &OpCall<'_>) -> Result<Solid, RenderError> {
    fold_children("intersect", call, booleans::intersect)
}
