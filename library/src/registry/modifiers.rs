use serde::Deserialize;

use super::{decode_props, OpCall, OpCategory, OpEntry};
use crate::error::RenderError;
use crate::modeling::Solid;

pub(super) fn modifier_ops() -> Vec<OpEntry> {
    vec![OpEntry::bag("generalize", OpCategory::Modifier, generalize)]
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GeneralizeOpts {
    snap: Option<f32>,
    /// Accepted for vocabulary compatibility; the soup is already triangles.
    #[allow(dead_code)]
    triangulate: bool,
}

/// `generalize({snap?, triangulate?}, ...children)`: normalizes the merged
/// soup: drops degenerate triangles and optionally quantizes vertices to a
/// grid. `triangulate` is trivially satisfied.
fn generalize(call: &OpCall<'_>) -> Result<Solid, RenderError> {
    let opts: GeneralizeOpts = decode_props("generalize", call.lead_props("generalize")?)?;
    let mut solid = call.merged_children("generalize")?;
    if let Some(precision) = opts.snap {
        if precision <= 0.0 {
            return Err(RenderError::operation("generalize", "snap must be positive"));
        }
        solid = solid.snapped(precision);
    }
    Ok(solid.pruned())
}
