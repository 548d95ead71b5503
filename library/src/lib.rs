//! Declarative solid-modeling renderer.
//!
//! A build tree of [`NodeDecl`] nodes names modeling operations (primitives,
//! booleans, transforms, extrusions, hulls and so on); rendering mounts the
//! tree through a [`HostBackend`], evaluates it bottom-up into CSG geometry
//! and emits the result as binary STL into a [`Container`]'s output path.

pub mod error;
pub mod evaluation;
pub mod host;
pub mod io;
pub mod model;
pub mod modeling;
pub mod registry;
pub mod renderer;

pub use error::RenderError;
pub use evaluation::Geometry;
pub use host::{Container, HostBackend, HostContext, RenderBackend};
pub use model::NodeDecl;
pub use renderer::Renderer;
