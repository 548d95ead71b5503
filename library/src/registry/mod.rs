//! Operation registry: the mapping from declared type names to modeling
//! calls.
//!
//! Eight category modules contribute entries in a fixed order; the flat
//! table is assembled once, and the first category exporting a name wins.
//! Every entry carries an explicit [`ArgPolicy`], so the calling-convention
//! classification is declared here rather than inferred at call sites.

mod booleans;
mod colors;
mod expansions;
mod extrusions;
mod hulls;
mod modifiers;
mod primitives;
mod transforms;

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::RenderError;
use crate::evaluation::Geometry;
use crate::model::PropMap;
use crate::modeling::Solid;

/// Lookup order across categories. The first category exporting a name
/// wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpCategory {
    Color,
    Primitive,
    Boolean,
    Expansion,
    Extrusion,
    Hull,
    Modifier,
    Transform,
}

/// Declared parameter shape of the wrapped operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// One declared parameter; props feed the leading argument.
    Unary,
    /// Multiple declared parameters; a pure combinator over children.
    Nary,
}

/// How the leading argument of `invoke` is shaped.
///
/// The three branches reconcile a uniform `(type, props)` declaration with
/// the two incompatible calling conventions of the wrapped operations
/// (options bag vs. single scalar/vector argument). Every entry is
/// classified into exactly one branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgPolicy {
    /// Child geometries only; props are ignored entirely.
    Children,
    /// The value of one property key, then the child geometries.
    Simple(&'static str),
    /// The whole property bag, then the child geometries.
    PropsBag,
}

pub type OpFn = fn(&OpCall<'_>) -> Result<Solid, RenderError>;

/// One registered modeling operation.
#[derive(Clone, Copy)]
pub struct OpEntry {
    pub name: &'static str,
    pub category: OpCategory,
    pub arity: Arity,
    pub policy: ArgPolicy,
    pub invoke: OpFn,
}

impl fmt::Debug for OpEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpEntry")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("arity", &self.arity)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl OpEntry {
    fn nary(name: &'static str, category: OpCategory, invoke: OpFn) -> Self {
        Self {
            name,
            category,
            arity: Arity::Nary,
            policy: ArgPolicy::Children,
            invoke,
        }
    }

    fn simple(name: &'static str, category: OpCategory, key: &'static str, invoke: OpFn) -> Self {
        Self {
            name,
            category,
            arity: Arity::Unary,
            policy: ArgPolicy::Simple(key),
            invoke,
        }
    }

    fn bag(name: &'static str, category: OpCategory, invoke: OpFn) -> Self {
        Self {
            name,
            category,
            arity: Arity::Unary,
            policy: ArgPolicy::PropsBag,
            invoke,
        }
    }
}

/// Leading argument of a shaped call.
#[derive(Debug, Clone, Copy)]
pub enum Lead<'a> {
    None,
    Value(&'a Value),
    Props(&'a PropMap),
}

/// A fully shaped invocation, produced by the argument adapter from a fixed
/// `(entry, props, children)` triple.
#[derive(Debug)]
pub struct OpCall<'a> {
    pub lead: Lead<'a>,
    pub children: &'a [Geometry],
}

impl<'a> OpCall<'a> {
    pub fn lead_value(&self, op: &str) -> Result<&'a Value, RenderError> {
        match self.lead {
            Lead::Value(value) => Ok(value),
            _ => Err(RenderError::operation(op, "expected a single leading value")),
        }
    }

    pub fn lead_props(&self, op: &str) -> Result<&'a PropMap, RenderError> {
        match self.lead {
            Lead::Props(props) => Ok(props),
            _ => Err(RenderError::operation(op, "expected a property bag")),
        }
    }

    pub fn child_solids(&self) -> impl Iterator<Item = &'a Solid> {
        self.children.iter().map(|g| &g.solid)
    }

    /// Children merged into one soup; operations that transform or tag
    /// their children use this. Empty child lists are invalid here.
    pub fn merged_children(&self, op: &str) -> Result<Solid, RenderError> {
        if self.children.is_empty() {
            return Err(RenderError::operation(op, "requires at least one child"));
        }
        Ok(Solid::merged(self.child_solids()))
    }
}

/// Decodes the whole property bag into a typed options struct.
pub(crate) fn decode_props<T: DeserializeOwned>(op: &str, props: &PropMap) -> Result<T, RenderError> {
    serde_json::from_value(Value::Object(props.clone()))
        .map_err(|e| RenderError::operation(op, e.to_string()))
}

/// Decodes a single extracted property value.
pub(crate) fn decode_value<T: DeserializeOwned>(op: &str, value: &Value) -> Result<T, RenderError> {
    serde_json::from_value(value.clone()).map_err(|e| RenderError::operation(op, e.to_string()))
}

fn all_operations() -> Vec<OpEntry> {
    [
        colors::color_ops(),
        primitives::primitive_ops(),
        booleans::boolean_ops(),
        expansions::expansion_ops(),
        extrusions::extrusion_ops(),
        hulls::hull_ops(),
        modifiers::modifier_ops(),
        transforms::transform_ops(),
    ]
    .concat()
}

fn table() -> &'static HashMap<&'static str, OpEntry> {
    static TABLE: OnceLock<HashMap<&'static str, OpEntry>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut map = HashMap::new();
        for op in all_operations() {
            map.entry(op.name).or_insert(op);
        }
        map
    })
}

/// Pure lookup over the static table.
pub fn resolve(type_name: &str) -> Option<&'static OpEntry> {
    table().get(type_name)
}

/// The full operation vocabulary.
pub fn type_names() -> impl Iterator<Item = &'static str> {
    table().keys().copied()
}
