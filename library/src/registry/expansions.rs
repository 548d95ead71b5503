use serde::Deserialize;

use super::{decode_props, OpCall, OpCategory, OpEntry};
use crate::error::RenderError;
use crate::modeling::Solid;

pub(super) fn expansion_ops() -> Vec<OpEntry> {
    vec![OpEntry::bag("expand", OpCategory::Expansion, expand)]
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct ExpandOpts {
    delta: f32,
}

impl Default for ExpandOpts {
    fn default() -> Self {
        Self { delta: 1.0 }
    }
}

/// `expand({delta}, ...children)`: offsets the merged surface along its
/// vertex normals.
fn expand(call: &OpCall<'_>) -> Result<Solid, RenderError> {
    let opts: ExpandOpts = decode_props("expand", call.lead_props("expand")?)?;
    Ok(call.merged_children("expand")?.expanded(opts.delta))
}
