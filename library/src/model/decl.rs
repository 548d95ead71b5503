use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Property bag of one build-tree node. Keys follow the operation
/// vocabulary (camelCase, matching the registered option structs).
pub type PropMap = serde_json::Map<String, Value>;

/// One node of the declarative build tree, as handed over by the
/// reconciliation engine (or parsed from a scene file by the CLI).
///
/// Opaque to the renderer except for `type` and the prop keys the resolved
/// operation consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeDecl {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub props: PropMap,
    #[serde(default)]
    pub children: Vec<NodeDecl>,
}

impl NodeDecl {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            props: PropMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: NodeDecl) -> Self {
        self.children.push(child);
        self
    }
}
