//! The render entry point: drives a host backend over a declarative build
//! tree and commits the result into a container.

use std::collections::HashMap;

use log::debug;
use uuid::Uuid;

use crate::error::RenderError;
use crate::host::{Container, HostBackend, HostContext, RenderBackend};
use crate::model::NodeDecl;

/// Per-container root state, created on the first render into a container
/// and kept until [`Renderer::dispose`] is called. The context is refreshed
/// from the container on every render, so path changes between renders are
/// picked up.
#[derive(Debug)]
struct RootHandle {
    context: HostContext,
}

/// Owns the root registry. Containers are registered lazily on first
/// render; they are never evicted implicitly, so a long-lived renderer
/// drops roots only when the caller disposes them.
#[derive(Debug, Default)]
pub struct Renderer {
    roots: HashMap<Uuid, RootHandle>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders `element` into `container`: mounts the tree bottom-up, then
    /// commits it, which evaluates the tree and emits the result when the
    /// container carries an output path.
    pub fn render(&mut self, element: &NodeDecl, container: &mut Container) -> Result<(), RenderError> {
        self.render_with(element, container, |_| {})
    }

    /// Like [`render`](Self::render), with a callback invoked after a
    /// successful commit.
    pub fn render_with<F>(
        &mut self,
        element: &NodeDecl,
        container: &mut Container,
        callback: F,
    ) -> Result<(), RenderError>
    where
        F: FnOnce(&Container),
    {
        let mut backend = RenderBackend::new();
        let root_context = backend.root_host_context(container);
        let handle = self
            .roots
            .entry(container.id())
            .and_modify(|handle| handle.context = root_context.clone())
            .or_insert_with(|| {
                debug!("registered root for container {}", container.id());
                RootHandle {
                    context: root_context.clone(),
                }
            });
        let context = handle.context.clone();
        let root = mount(&mut backend, &context, container, element)?;
        backend.prepare_for_commit(container);
        backend.append_child_to_container(container, root)?;
        backend.reset_after_commit(container);
        callback(container);
        Ok(())
    }

    pub fn root_count(&self) -> usize {
        self.roots.len()
    }

    /// Drops the container's root state. Returns whether the container was
    /// registered.
    pub fn dispose(&mut self, container: &Container) -> bool {
        self.roots.remove(&container.id()).is_some()
    }
}

/// Mounts `element` and its subtree, children before parents: each child is
/// mounted under a fresh child context, then the parent instance is created
/// and the children appended in declaration order.
fn mount<H: HostBackend>(
    host: &mut H,
    context: &HostContext,
    container: &Container,
    element: &NodeDecl,
) -> Result<H::Instance, RenderError> {
    let child_context = host.child_host_context(context, &element.type_name);
    let mut children = Vec::with_capacity(element.children.len());
    for child in &element.children {
        children.push(mount(host, &child_context, container, child)?);
    }
    let instance = host.create_instance(
        &element.type_name,
        element.props.clone(),
        container,
        context,
    )?;
    for child in children {
        host.append_initial_child(instance, child);
    }
    Ok(instance)
}
