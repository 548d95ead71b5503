//! Argument adaptation: shaping a `(type, props, children)` triple into the
//! calling convention the resolved operation expects.

use crate::error::RenderError;
use crate::evaluation::Geometry;
use crate::model::PropMap;
use crate::registry::{ArgPolicy, Lead, OpCall, OpEntry};

/// Shapes the call for `entry`. Pure function of its three inputs.
///
/// - `Children`: a combinator over child geometries; props are ignored.
/// - `Simple(key)`: the value of `props[key]` leads, children trail. A
///   missing key is an invocation error; the wrapped operation could never
///   have succeeded without it.
/// - `PropsBag`: the whole bag leads, children trail (options-bag
///   operations, mostly primitives).
pub fn adapt<'a>(
    entry: &OpEntry,
    props: &'a PropMap,
    children: &'a [Geometry],
) -> Result<OpCall<'a>, RenderError> {
    let lead = match entry.policy {
        ArgPolicy::Children => Lead::None,
        ArgPolicy::Simple(key) => Lead::Value(props.get(key).ok_or_else(|| {
            RenderError::operation(entry.name, format!("missing property `{key}`"))
        })?),
        ArgPolicy::PropsBag => Lead::Props(props),
    };
    Ok(OpCall { lead, children })
}
