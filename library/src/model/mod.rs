//! Build-tree declarations and the instance arena they are mounted into.

mod decl;
mod instance;

pub use decl::{NodeDecl, PropMap};
pub use instance::{Instance, InstanceArena, InstanceId};
