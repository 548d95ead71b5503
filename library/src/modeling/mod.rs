//! In-crate solid-modeling library backing the operation registry.
//!
//! Everything here operates on [`Solid`], an oriented triangle soup. The
//! registry wrappers in `crate::registry` adapt declared props into the
//! typed calls below.

pub mod booleans;
pub mod extrusions;
pub mod hulls;
pub mod primitives;
pub mod solid;

pub use solid::{Rgba, Solid, Triangle};
