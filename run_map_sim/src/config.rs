// Data-driven map configuration.
//
// `MapConfig` holds the node blueprints a presentation host uses to bind
// visuals to nodes: each `NodeRecord::blueprint_name` names one
// `NodeBlueprint`. The config is loaded from JSON at startup so art and
// naming can change without recompiling.
//
// Blueprints are pure pass-through metadata. The resolver never reads them,
// and a node whose blueprint is missing still resolves normally.
//
// See also: `graph.rs` for `NodeRecord::blueprint_name`, `main.rs` which
// annotates its report with blueprint sprites when given a config.

use crate::graph::NodeRecord;
use crate::types::NodeType;
use serde::{Deserialize, Serialize};

/// Visual binding for one kind of node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeBlueprint {
    /// Key referenced by `NodeRecord::blueprint_name`.
    pub name: String,
    pub node_type: NodeType,
    /// Asset path of the node's sprite, interpreted by the host.
    pub sprite: String,
}

/// Top-level map configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapConfig {
    pub node_blueprints: Vec<NodeBlueprint>,
}

impl Default for MapConfig {
    /// One blueprint per node type, named after the type.
    fn default() -> Self {
        let node_blueprints = NodeType::ALL
            .iter()
            .map(|&node_type| {
                let name = format!("{node_type:?}");
                NodeBlueprint {
                    sprite: format!("sprites/map/{}.png", name.to_lowercase()),
                    name,
                    node_type,
                }
            })
            .collect();
        Self { node_blueprints }
    }
}

impl MapConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Look up a blueprint by name. The first match wins if names repeat.
    pub fn blueprint(&self, name: &str) -> Option<&NodeBlueprint> {
        self.node_blueprints.iter().find(|b| b.name == name)
    }

    /// The blueprint bound to a node, if any.
    pub fn blueprint_for(&self, node: &NodeRecord) -> Option<&NodeBlueprint> {
        self.blueprint(&node.blueprint_name)
    }
}
