// run_map_sim — traversal state engine for branching roguelike run maps.
//
// A run map is a layered DAG of encounter nodes that the player walks from
// the entry layer toward a single boss. This crate holds the map and the
// walked path, and derives which nodes are Locked / Visited / Attainable and
// which edges are Lit. It has no rendering, input, animation, or camera
// code and can be tested and benchmarked headless.
//
// Module overview:
// - `types.rs`:   Point, MapPosition, NodeType, NodeState, EdgeState, MapEdge.
// - `error.rs`:   MapError (construction/traversal) and MapLoadError.
// - `graph.rs`:   NodeRecord + MapGraph: nodes keyed by point, append-only path, JSON save/load.
// - `resolve.rs`: resolve(): pure recomputation of node/edge states into a Resolution.
// - `layout.rs`:  Read-only geometry summary for viewport framing.
// - `config.rs`:  MapConfig / NodeBlueprint: JSON-loaded visual bindings.
// - `command.rs`: MapCommand / MapAction: the only way a map changes during play.
// - `event.rs`:   MapEvent: narrative output of applied commands.
// - `run.rs`:     MapRun: owns a map during play and pushes snapshots to MapObservers.
//
// The `resolve` binary (`main.rs`) loads a saved map, applies travel
// commands, and prints the resulting states as JSON.
//
// **Critical constraint: determinism.** Resolution is a pure function of
// `(nodes, path)`. No `HashMap`; all keyed storage is `BTreeMap`/`BTreeSet`
// so output order never depends on hashing.

pub mod command;
pub mod config;
pub mod error;
pub mod event;
pub mod graph;
pub mod layout;
pub mod resolve;
pub mod run;
pub mod types;
