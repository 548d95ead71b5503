//! The host-backend contract driven by the reconciliation engine, and the
//! arena-backed implementation of it.
//!
//! The engine owns diffing and scheduling; this side only interprets the
//! callbacks. Everything runs synchronously; each callback completes
//! before the engine proceeds.

use std::path::PathBuf;

use log::debug;
use serde::Serialize;
use uuid::Uuid;

use crate::error::RenderError;
use crate::evaluation::{self, Geometry};
use crate::io;
use crate::model::{InstanceArena, InstanceId, PropMap};

/// Cache directory used when a container does not configure one. Accepted
/// for configuration compatibility; evaluation never reads it.
pub const DEFAULT_CACHE_DIR: &str = ".render_cache";

/// One render target. Created by the caller, keyed by its identity in the
/// renderer's root registry, never destroyed implicitly.
#[derive(Debug)]
pub struct Container {
    id: Uuid,
    /// Output file location; emission is skipped when unset.
    pub path: Option<PathBuf>,
    /// Accepted but unused by evaluation.
    pub cache_dir: Option<String>,
    csg: Option<Geometry>,
    shadow: Option<ShadowNode>,
}

impl Container {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            path: None,
            cache_dir: None,
            csg: None,
            shadow: None,
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        let mut container = Self::new();
        container.path = Some(path.into());
        container
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The geometry of the last successful commit. Overwritten wholesale on
    /// each commit; cleared only by `clear_container`.
    pub fn csg(&self) -> Option<&Geometry> {
        self.csg.as_ref()
    }

    /// Debug shadow tree of the last successful commit.
    pub fn shadow(&self) -> Option<&ShadowNode> {
        self.shadow.as_ref()
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

/// Context handed to instance creation. Only the root context carries the
/// container's configuration; child contexts are deliberately fresh and do
/// not inherit their parent's fields.
#[derive(Debug, Clone)]
pub struct HostContext {
    pub output_path: Option<PathBuf>,
    pub cache_dir: String,
}

/// Type-and-identity tree of the committed instances, kept alongside the
/// geometry for introspection and debug dumps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShadowNode {
    pub type_name: String,
    pub id: Uuid,
    pub children: Vec<ShadowNode>,
}

/// The callbacks the reconciliation engine drives. One method per
/// callback; a single backend type implements them all.
pub trait HostBackend {
    type Instance: Copy;

    /// Structural replace-on-commit only; no fine-grained patching.
    fn supports_mutation(&self) -> bool {
        true
    }

    fn root_host_context(&self, container: &Container) -> HostContext {
        HostContext {
            output_path: container.path.clone(),
            cache_dir: container
                .cache_dir
                .clone()
                .unwrap_or_else(|| DEFAULT_CACHE_DIR.to_string()),
        }
    }

    /// Fresh context for a child; does not inherit from `parent`.
    fn child_host_context(&self, _parent: &HostContext, _type_name: &str) -> HostContext {
        HostContext {
            output_path: None,
            cache_dir: DEFAULT_CACHE_DIR.to_string(),
        }
    }

    fn create_instance(
        &mut self,
        type_name: &str,
        props: PropMap,
        container: &Container,
        context: &HostContext,
    ) -> Result<Self::Instance, RenderError>;

    /// The domain has no textual leaves.
    fn create_text_instance(&mut self, _text: &str) -> Option<Self::Instance> {
        None
    }

    fn should_set_text_content(&self) -> bool {
        false
    }

    fn finalize_initial_children(&self) -> bool {
        false
    }

    /// Ordered append; no uniqueness check, no reordering.
    fn append_initial_child(&mut self, parent: Self::Instance, child: Self::Instance);

    /// The commit trigger: evaluates `child`, stores the result on the
    /// container and emits it when an output path is configured. This is
    /// the only point at which evaluation happens.
    fn append_child_to_container(
        &mut self,
        container: &mut Container,
        child: Self::Instance,
    ) -> Result<(), RenderError>;

    fn clear_container(&self, container: &mut Container) {
        container.csg = None;
        container.shadow = None;
    }

    fn prepare_for_commit(&mut self, _container: &Container) {}

    fn reset_after_commit(&mut self, _container: &Container) {}
}

/// Arena-backed backend: instances live in an [`InstanceArena`] owned by
/// the render in progress.
#[derive(Debug, Default)]
pub struct RenderBackend {
    arena: InstanceArena,
}

impl RenderBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arena(&self) -> &InstanceArena {
        &self.arena
    }

    fn shadow_of(&self, id: InstanceId) -> ShadowNode {
        let instance = self.arena.get(id);
        ShadowNode {
            type_name: instance.type_name.clone(),
            id: instance.id,
            children: instance
                .children
                .iter()
                .map(|&child| self.shadow_of(child))
                .collect(),
        }
    }
}

impl HostBackend for RenderBackend {
    type Instance = InstanceId;

    fn create_instance(
        &mut self,
        type_name: &str,
        props: PropMap,
        _container: &Container,
        _context: &HostContext,
    ) -> Result<InstanceId, RenderError> {
        self.arena.create(type_name, props)
    }

    fn append_initial_child(&mut self, parent: InstanceId, child: InstanceId) {
        self.arena.append_child(parent, child);
    }

    fn append_child_to_container(
        &mut self,
        container: &mut Container,
        child: InstanceId,
    ) -> Result<(), RenderError> {
        let geometry = evaluation::evaluate(&self.arena, child)?;
        debug!(
            "commit: {} triangles into container {}",
            geometry.triangle_count(),
            container.id
        );
        container.shadow = Some(self.shadow_of(child));
        let emitted = io::emit(&geometry, container.path.as_deref());
        // The geometry is kept even when emission failed; the two steps are
        // sequential, not transactional.
        container.csg = Some(geometry);
        emitted
    }
}
