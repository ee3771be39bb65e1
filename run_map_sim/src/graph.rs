// Graph model: the static node/edge structure of one run map plus the
// player's walked path.
//
// A `MapGraph` is built once per run (or floor) from generation data and is
// read-only afterwards except for path appends. Nodes are stored in a
// `BTreeMap<Point, NodeRecord>` so lookups are by key and iteration order is
// fixed. Edges live on their source node as a `BTreeSet<Point>` of outgoing
// targets. Generation data points them at a strictly greater layer; the
// graph does not re-check that.
//
// Outgoing targets do not have to exist. Generation data may reference
// pruned nodes, and both `edges()` and the resolver skip such targets
// instead of failing.
//
// The path is append-only. `append_to_path` enforces the walk invariants:
// the first point is on layer 0, and every later point is an outgoing
// neighbor of the current frontier. A failed append leaves the path exactly
// as it was.
//
// Save/load goes through `MapGraphData`, a flat `{ nodes, path }` form that
// is replayed through `add_node` / `append_to_path` on load, so a saved map
// can never bypass the invariants.
//
// See also: `resolve.rs` which derives node/edge states from this graph,
// `layout.rs` for geometry queries, `run.rs` which owns a graph during play.

use crate::error::{MapError, MapLoadError};
use crate::types::{MapEdge, MapPosition, NodeType, Point};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One vertex of the run map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub point: Point,
    pub node_type: NodeType,
    /// Targets of directed edges leaving this node, all on later layers.
    #[serde(default)]
    pub outgoing: BTreeSet<Point>,
    /// Assigned position in map space. Only used by `layout.rs`.
    #[serde(default)]
    pub position: MapPosition,
    /// Visual binding for the presentation host (see `config.rs`). Passed
    /// through untouched.
    #[serde(default)]
    pub blueprint_name: String,
}

impl NodeRecord {
    pub fn new(point: Point, node_type: NodeType) -> Self {
        Self {
            point,
            node_type,
            outgoing: BTreeSet::new(),
            position: MapPosition::default(),
            blueprint_name: String::new(),
        }
    }

    /// Builder: add outgoing edges to the given points.
    pub fn with_outgoing(mut self, targets: impl IntoIterator<Item = Point>) -> Self {
        self.outgoing.extend(targets);
        self
    }

    /// Builder: set the map-space position.
    pub fn at(mut self, position: MapPosition) -> Self {
        self.position = position;
        self
    }

    /// Builder: set the blueprint name.
    pub fn with_blueprint(mut self, name: impl Into<String>) -> Self {
        self.blueprint_name = name.into();
        self
    }
}

/// The full map for one run: nodes keyed by point, plus the walked path.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MapGraphData", into = "MapGraphData")]
pub struct MapGraph {
    nodes: BTreeMap<Point, NodeRecord>,
    path: Vec<Point>,
}

impl MapGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from a sequence of records, failing on the first
    /// duplicate point.
    pub fn from_nodes(records: impl IntoIterator<Item = NodeRecord>) -> Result<Self, MapError> {
        let mut graph = Self::new();
        for record in records {
            graph.add_node(record)?;
        }
        Ok(graph)
    }

    /// Insert a node. Fails if its point is already taken.
    pub fn add_node(&mut self, record: NodeRecord) -> Result<(), MapError> {
        if self.nodes.contains_key(&record.point) {
            return Err(MapError::DuplicatePoint(record.point));
        }
        self.nodes.insert(record.point, record);
        Ok(())
    }

    /// Walk to `point`, returning the new path length.
    ///
    /// With an empty path, `point` must be on layer 0. Otherwise it must be
    /// an outgoing neighbor of the frontier. On error nothing changes.
    pub fn append_to_path(&mut self, point: Point) -> Result<usize, MapError> {
        if !self.nodes.contains_key(&point) {
            return Err(MapError::UnknownPoint(point));
        }
        match self.frontier_node() {
            Some(frontier) => {
                if !frontier.outgoing.contains(&point) {
                    return Err(MapError::IllegalMove {
                        from: Some(frontier.point),
                        to: point,
                    });
                }
            }
            None => {
                if !point.is_entry() {
                    return Err(MapError::IllegalMove { from: None, to: point });
                }
            }
        }
        self.path.push(point);
        tracing::debug!(%point, path_len = self.path.len(), "path extended");
        Ok(self.path.len())
    }

    /// The player's current location, or `None` before the first move.
    pub fn current_frontier(&self) -> Option<Point> {
        self.path.last().copied()
    }

    /// The node record at the frontier.
    pub fn frontier_node(&self) -> Option<&NodeRecord> {
        self.current_frontier().and_then(|p| self.nodes.get(&p))
    }

    /// True once the frontier is the Boss node. The resolver itself never
    /// signals completion.
    pub fn is_complete(&self) -> bool {
        self.frontier_node()
            .is_some_and(|n| n.node_type == NodeType::Boss)
    }

    pub fn node(&self, point: Point) -> Option<&NodeRecord> {
        self.nodes.get(&point)
    }

    pub fn contains(&self, point: Point) -> bool {
        self.nodes.contains_key(&point)
    }

    /// All nodes in point order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeRecord> {
        self.nodes.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The walked path, oldest first.
    pub fn path(&self) -> &[Point] {
        &self.path
    }

    /// Every edge whose source and target both exist, ordered by
    /// `(from, to)`. Edges to pruned targets are skipped.
    pub fn edges(&self) -> impl Iterator<Item = MapEdge> + '_ {
        self.nodes.values().flat_map(move |node| {
            node.outgoing
                .iter()
                .filter(move |to| self.nodes.contains_key(*to))
                .map(move |&to| MapEdge::new(node.point, to))
        })
    }

    /// The Boss node. If generation data contains several, the lowest point
    /// wins.
    pub fn boss(&self) -> Option<&NodeRecord> {
        self.nodes.values().find(|n| n.node_type == NodeType::Boss)
    }

    /// Serialize the graph (nodes and path) to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Load a graph from JSON, replaying every node and path step through
    /// the same checks as live construction.
    pub fn from_json(json: &str) -> Result<Self, MapLoadError> {
        let data: MapGraphData = serde_json::from_str(json)?;
        Ok(Self::try_from(data)?)
    }
}

/// Flat save form of a `MapGraph`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MapGraphData {
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub path: Vec<Point>,
}

impl TryFrom<MapGraphData> for MapGraph {
    type Error = MapError;

    fn try_from(data: MapGraphData) -> Result<Self, Self::Error> {
        let mut graph = MapGraph::from_nodes(data.nodes)?;
        for point in data.path {
            graph.append_to_path(point)?;
        }
        Ok(graph)
    }
}

impl From<MapGraph> for MapGraphData {
    fn from(graph: MapGraph) -> Self {
        Self {
            nodes: graph.nodes.into_values().collect(),
            path: graph.path,
        }
    }
}
