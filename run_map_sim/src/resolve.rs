// State resolver: derives every node's and edge's traversal state from a
// `MapGraph` snapshot.
//
// `resolve()` is a pure, total function of `(nodes, path)`. It holds no
// memory between calls and every call recomputes everything from scratch,
// so the presentation layer re-renders from the full `Resolution` instead of
// diffing.
//
// Rules, in order:
// 1. Every node and every edge starts `Locked`.
// 2. Empty path: every layer-0 node is `Attainable`, no edge is lit. Done.
// 3. Every point on the path is `Visited` (the frontier included).
// 4. Every existing outgoing target of the frontier becomes `Attainable`,
//    unless it is already `Visited`. Visited always wins.
// 5. Edges from the frontier to those targets are `Lit`, as is every edge
//    between consecutive path points.
//
// Outgoing targets with no node are skipped. Generation data may reference
// pruned nodes; that is tolerated here, not reported.
//
// A frontier with no outgoing edges (the boss) lights nothing further. That
// is map completion, and detecting it is the caller's job (see
// `MapGraph::is_complete`).
//
// See also: `graph.rs` for the input model, `run.rs` which resolves after
// every successful travel and pushes the result to observers.
//
// **Critical constraint: determinism.** Output is stored in `BTreeMap`s keyed
// by `Point` / `MapEdge`, so two resolutions of equal graphs compare equal
// and serialize to identical bytes.

use crate::graph::MapGraph;
use crate::types::{EdgeState, MapEdge, NodeState, Point};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::collections::BTreeMap;

/// Full derived state of a map: one `NodeState` per node, one `EdgeState`
/// per edge whose endpoints both exist.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Resolution {
    nodes: BTreeMap<Point, NodeState>,
    edges: BTreeMap<MapEdge, EdgeState>,
}

impl Resolution {
    /// State of the node at `point`, or `None` if the graph has no such node.
    pub fn node_state(&self, point: Point) -> Option<NodeState> {
        self.nodes.get(&point).copied()
    }

    /// State of the edge `from -> to`, or `None` if it is not a drawable edge.
    pub fn edge_state(&self, from: Point, to: Point) -> Option<EdgeState> {
        self.edges.get(&MapEdge::new(from, to)).copied()
    }

    /// All node states in point order.
    pub fn nodes(&self) -> impl Iterator<Item = (Point, NodeState)> + '_ {
        self.nodes.iter().map(|(p, s)| (*p, *s))
    }

    /// All edge states in `(from, to)` order.
    pub fn edges(&self) -> impl Iterator<Item = (MapEdge, EdgeState)> + '_ {
        self.edges.iter().map(|(e, s)| (*e, *s))
    }

    fn points_in(&self, state: NodeState) -> Vec<Point> {
        self.nodes
            .iter()
            .filter(|(_, s)| **s == state)
            .map(|(p, _)| *p)
            .collect()
    }

    /// Points the player may travel to next, in point order.
    pub fn attainable(&self) -> Vec<Point> {
        self.points_in(NodeState::Attainable)
    }

    /// Points already walked, in point order (not path order).
    pub fn visited(&self) -> Vec<Point> {
        self.points_in(NodeState::Visited)
    }

    /// Lit edges in `(from, to)` order.
    pub fn lit_edges(&self) -> Vec<MapEdge> {
        self.edges
            .iter()
            .filter(|(_, s)| **s == EdgeState::Lit)
            .map(|(e, _)| *e)
            .collect()
    }
}

#[derive(serde::Serialize)]
struct NodeEntry {
    point: Point,
    state: NodeState,
}

#[derive(serde::Serialize)]
struct EdgeEntry {
    from: Point,
    to: Point,
    state: EdgeState,
}

// JSON object keys must be strings, so the maps are written as ordered
// lists of entries instead.
impl Serialize for Resolution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let nodes: Vec<NodeEntry> = self
            .nodes()
            .map(|(point, state)| NodeEntry { point, state })
            .collect();
        let edges: Vec<EdgeEntry> = self
            .edges()
            .map(|(edge, state)| EdgeEntry {
                from: edge.from,
                to: edge.to,
                state,
            })
            .collect();
        let mut s = serializer.serialize_struct("Resolution", 2)?;
        s.serialize_field("nodes", &nodes)?;
        s.serialize_field("edges", &edges)?;
        s.end()
    }
}

/// Compute node and edge states for the graph's current path.
pub fn resolve(graph: &MapGraph) -> Resolution {
    let mut nodes: BTreeMap<Point, NodeState> = graph
        .nodes()
        .map(|n| (n.point, NodeState::Locked))
        .collect();
    let mut edges: BTreeMap<MapEdge, EdgeState> =
        graph.edges().map(|e| (e, EdgeState::Locked)).collect();

    let path = graph.path();
    let Some(frontier) = graph.frontier_node() else {
        for (point, state) in nodes.iter_mut() {
            if point.is_entry() {
                *state = NodeState::Attainable;
            }
        }
        tracing::trace!(nodes = nodes.len(), "resolved map before first move");
        return Resolution { nodes, edges };
    };

    for point in path {
        if let Some(state) = nodes.get_mut(point) {
            *state = NodeState::Visited;
        }
    }

    for target in &frontier.outgoing {
        // Missing targets have no entry in either map and are skipped here.
        if let Some(state) = nodes.get_mut(target) {
            if *state != NodeState::Visited {
                *state = NodeState::Attainable;
            }
            edges.insert(MapEdge::new(frontier.point, *target), EdgeState::Lit);
        }
    }

    for step in path.windows(2) {
        let edge = MapEdge::new(step[0], step[1]);
        if let Some(state) = edges.get_mut(&edge) {
            *state = EdgeState::Lit;
        }
    }

    tracing::trace!(
        frontier = %frontier.point,
        path_len = path.len(),
        "resolved map"
    );
    Resolution { nodes, edges }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeRecord;
    use crate::types::NodeType;

    // Layer 0 = {A, B}, layer 1 = {C, D}. A -> C, B -> C, B -> D.
    const A: Point = Point::new(0, 0);
    const B: Point = Point::new(1, 0);
    const C: Point = Point::new(0, 1);
    const D: Point = Point::new(1, 1);

    fn diamond() -> MapGraph {
        MapGraph::from_nodes([
            NodeRecord::new(A, NodeType::MinorEnemy).with_outgoing([C]),
            NodeRecord::new(B, NodeType::EliteEnemy).with_outgoing([C, D]),
            NodeRecord::new(C, NodeType::Boss),
            NodeRecord::new(D, NodeType::Treasure),
        ])
        .unwrap()
    }

    fn states(resolution: &Resolution) -> Vec<NodeState> {
        [A, B, C, D]
            .iter()
            .map(|p| resolution.node_state(*p).unwrap())
            .collect()
    }

    #[test]
    fn empty_path_opens_entry_layer_only() {
        let res = resolve(&diamond());
        assert_eq!(
            states(&res),
            vec![
                NodeState::Attainable,
                NodeState::Attainable,
                NodeState::Locked,
                NodeState::Locked,
            ]
        );
        assert!(res.lit_edges().is_empty());
        assert_eq!(res.edges().count(), 3);
    }

    #[test]
    fn first_move_locks_other_entry_nodes() {
        let mut graph = diamond();
        graph.append_to_path(A).unwrap();
        let res = resolve(&graph);
        assert_eq!(
            states(&res),
            vec![
                NodeState::Visited,
                NodeState::Locked,
                NodeState::Attainable,
                NodeState::Locked,
            ]
        );
        assert_eq!(res.lit_edges(), vec![MapEdge::new(A, C)]);
        assert_eq!(res.edge_state(B, C), Some(EdgeState::Locked));
        assert_eq!(res.edge_state(B, D), Some(EdgeState::Locked));
    }

    #[test]
    fn terminal_frontier_leaves_nothing_attainable() {
        let mut graph = diamond();
        graph.append_to_path(A).unwrap();
        graph.append_to_path(C).unwrap();
        let res = resolve(&graph);
        assert_eq!(
            states(&res),
            vec![
                NodeState::Visited,
                NodeState::Locked,
                NodeState::Visited,
                NodeState::Locked,
            ]
        );
        assert!(res.attainable().is_empty());
        // The walked edge stays lit.
        assert_eq!(res.lit_edges(), vec![MapEdge::new(A, C)]);
    }

    #[test]
    fn frontier_edges_and_path_edges_are_both_lit() {
        let e = Point::new(0, 2);
        let f = Point::new(1, 2);
        let graph_nodes = [
            NodeRecord::new(A, NodeType::MinorEnemy).with_outgoing([C]),
            NodeRecord::new(C, NodeType::Mystery).with_outgoing([e, f]),
            NodeRecord::new(e, NodeType::Boss),
            NodeRecord::new(f, NodeType::RestSite).with_outgoing([e]),
        ];
        let mut graph = MapGraph::from_nodes(graph_nodes).unwrap();
        graph.append_to_path(A).unwrap();
        graph.append_to_path(C).unwrap();

        let res = resolve(&graph);
        assert_eq!(
            res.lit_edges(),
            vec![MapEdge::new(A, C), MapEdge::new(C, e), MapEdge::new(C, f)]
        );
        assert_eq!(res.edge_state(f, e), Some(EdgeState::Locked));
        assert_eq!(res.attainable(), vec![e, f]);
        assert_eq!(res.visited(), vec![A, C]);
    }

    #[test]
    fn pruned_outgoing_target_is_tolerated() {
        let ghost = Point::new(5, 1);
        let mut graph = MapGraph::from_nodes([
            NodeRecord::new(A, NodeType::MinorEnemy).with_outgoing([C, ghost]),
            NodeRecord::new(C, NodeType::Boss),
        ])
        .unwrap();
        graph.append_to_path(A).unwrap();

        let res = resolve(&graph);
        assert_eq!(res.node_state(ghost), None);
        assert_eq!(res.edge_state(A, ghost), None);
        assert_eq!(res.attainable(), vec![C]);
        assert_eq!(res.lit_edges(), vec![MapEdge::new(A, C)]);
    }

    #[test]
    fn visited_outranks_attainable() {
        // Malformed generation data: an edge back onto the path. Visited
        // must stay authoritative.
        let mut graph = MapGraph::from_nodes([
            NodeRecord::new(A, NodeType::MinorEnemy).with_outgoing([C]),
            NodeRecord::new(C, NodeType::Mystery).with_outgoing([A, D]),
            NodeRecord::new(D, NodeType::Boss),
        ])
        .unwrap();
        graph.append_to_path(A).unwrap();
        graph.append_to_path(C).unwrap();

        let res = resolve(&graph);
        assert_eq!(res.node_state(A), Some(NodeState::Visited));
        assert_eq!(res.attainable(), vec![D]);
    }

    #[test]
    fn resolve_is_idempotent() {
        let mut graph = diamond();
        graph.append_to_path(B).unwrap();
        let first = resolve(&graph);
        let second = resolve(&graph);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn empty_graph_resolves_to_nothing() {
        let res = resolve(&MapGraph::new());
        assert_eq!(res, Resolution::default());
    }

    #[test]
    fn serializes_as_ordered_entry_lists() {
        let mut graph = diamond();
        graph.append_to_path(A).unwrap();
        let json: serde_json::Value = serde_json::to_value(resolve(&graph)).unwrap();

        let nodes = json["nodes"].as_array().unwrap();
        assert_eq!(nodes.len(), 4);
        assert_eq!(nodes[0]["point"]["column"], 0);
        assert_eq!(nodes[0]["state"], "Visited");
        assert_eq!(nodes[2]["state"], "Attainable");

        let edges = json["edges"].as_array().unwrap();
        assert_eq!(edges.len(), 3);
        assert_eq!(edges[0]["state"], "Lit");
        assert_eq!(edges[1]["state"], "Locked");
    }
}
