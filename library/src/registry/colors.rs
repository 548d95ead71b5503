use super::{decode_value, OpCall, OpCategory, OpEntry};
use crate::error::RenderError;
use crate::modeling::{Rgba, Solid};

pub(super) fn color_ops() -> Vec<OpEntry> {
    vec![OpEntry::simple(
        "colorize",
        OpCategory::Color,
        "color",
        colorize,
    )]
}

/// `colorize(color, ...children)`: tags the merged children with an RGBA
/// color. Three-component colors get an alpha of 1.
fn colorize(call: &OpCall<'_>) -> Result<Solid, RenderError> {
    let components: Vec<f32> = decode_value("colorize", call.lead_value("colorize")?)?;
    let color: Rgba = match components.as_slice() {
        [r, g, b] => [*r, *g, *b, 1.0],
        [r, g, b, a] => [*r, *g, *b, *a],
        _ => {
            return Err(RenderError::operation(
                "colorize",
                "color must have 3 or 4 components",
            ));
        }
    };
    Ok(call.merged_children("colorize")?.with_color(color))
}
