// Core types shared across the run map engine.
//
// Defines grid keys (`Point`), map-space positions (`MapPosition`), node
// categories (`NodeType`), and the derived per-node and per-edge states the
// resolver produces (`NodeState`, `EdgeState`, keyed by `MapEdge`). All
// types derive `Serialize` and `Deserialize` for save/load and for handing
// snapshots to a presentation host.
//
// See also: `graph.rs` for `NodeRecord` / `MapGraph`, `resolve.rs` for the
// function that derives `NodeState` / `EdgeState`.
//
// **Critical constraint: determinism.** `Point` and `MapEdge` have a total
// order so they can key `BTreeMap`s. Resolution output is iterated in that
// order, never in hash order.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

// ---------------------------------------------------------------------------
// Grid keys and positions
// ---------------------------------------------------------------------------

/// A node's grid key: a column within a layer.
///
/// Layer 0 is the entry layer; layer values increase toward the boss.
/// Ordering is layer-major, so sorted collections walk the map from the
/// entry layer outward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub column: i32,
    pub layer: i32,
}

impl Point {
    pub const fn new(column: i32, layer: i32) -> Self {
        Self { column, layer }
    }

    /// True if this point sits on the entry layer.
    pub fn is_entry(self) -> bool {
        self.layer == 0
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        self.layer
            .cmp(&other.layer)
            .then_with(|| self.column.cmp(&other.column))
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.layer)
    }
}

/// A node's assigned position in map space, in presentation units.
///
/// - x: lateral axis (columns spread left/right of 0)
/// - y: primary axis (grows with layer, boss furthest out)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MapPosition {
    pub x: f32,
    pub y: f32,
}

impl MapPosition {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

// ---------------------------------------------------------------------------
// Node categories
// ---------------------------------------------------------------------------

/// Semantic category of an encounter node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeType {
    MinorEnemy,
    EliteEnemy,
    RestSite,
    Treasure,
    Store,
    Mystery,
    /// The final encounter. A map is expected to contain exactly one.
    Boss,
}

impl NodeType {
    pub const ALL: [NodeType; 7] = [
        NodeType::MinorEnemy,
        NodeType::EliteEnemy,
        NodeType::RestSite,
        NodeType::Treasure,
        NodeType::Store,
        NodeType::Mystery,
        NodeType::Boss,
    ];
}

// ---------------------------------------------------------------------------
// Derived states
// ---------------------------------------------------------------------------

/// Traversal state of a node, recomputed from `(nodes, path)` on every
/// resolve. Never stored on the node itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeState {
    /// Not reachable from the player's current location.
    Locked,
    /// On the walked path (the frontier included).
    Visited,
    /// A legal next step: a forward neighbor of the frontier, not yet walked.
    Attainable,
}

/// Highlight state of a directed edge. Two-tone: already-walked edges and
/// edges leaving the frontier share the same `Lit` state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeState {
    Locked,
    Lit,
}

/// A directed edge between two existing nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MapEdge {
    pub from: Point,
    pub to: Point,
}

impl MapEdge {
    pub const fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for MapEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}
