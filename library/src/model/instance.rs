use log::debug;
use uuid::Uuid;

use crate::error::RenderError;
use crate::model::PropMap;
use crate::registry::{self, OpEntry};

/// Index of an [`Instance`] inside its [`InstanceArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceId(u32);

impl InstanceId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// The resolved, evaluable representation of one build-tree node.
///
/// Identity and the resolved operation are fixed at creation; only the child
/// list grows, and only during tree construction. Children are stored as
/// arena indices in append order, which is also evaluation order.
#[derive(Debug)]
pub struct Instance {
    pub id: Uuid,
    pub type_name: String,
    pub props: PropMap,
    pub entry: &'static OpEntry,
    pub children: Vec<InstanceId>,
}

/// Arena owning every instance of one render.
///
/// Construction appends and mutates child lists through `&mut self`;
/// evaluation only ever takes `&InstanceArena`, so the construction/
/// evaluation phase boundary is enforced by the borrow checker.
#[derive(Debug, Default)]
pub struct InstanceArena {
    nodes: Vec<Instance>,
}

impl InstanceArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves `type_name` against the registry and allocates a fresh
    /// instance with a new process-unique id and an empty child list.
    pub fn create(&mut self, type_name: &str, props: PropMap) -> Result<InstanceId, RenderError> {
        let entry = registry::resolve(type_name)
            .ok_or_else(|| RenderError::UnrecognizedType(type_name.to_string()))?;
        let id = InstanceId(self.nodes.len() as u32);
        let instance = Instance {
            id: Uuid::new_v4(),
            type_name: type_name.to_string(),
            props,
            entry,
            children: Vec::new(),
        };
        debug!("createInstance {} -> {}", type_name, instance.id);
        self.nodes.push(instance);
        Ok(id)
    }

    pub fn get(&self, id: InstanceId) -> &Instance {
        &self.nodes[id.index()]
    }

    /// Ordered append; no deduplication, no reordering.
    pub fn append_child(&mut self, parent: InstanceId, child: InstanceId) {
        self.nodes[parent.index()].children.push(child);
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
