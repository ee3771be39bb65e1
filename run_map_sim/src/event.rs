// Events emitted when a run map changes.
//
// `MapRun::apply` returns these after every successful command so the host
// can react (play an encounter, show a victory screen) without re-inspecting
// the graph. They are narrative output only; node and edge states always
// come from a fresh `Resolution`.

use crate::types::{NodeType, Point};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MapEvent {
    /// The player walked onto `point`, making it the frontier.
    NodeVisited {
        point: Point,
        node_type: NodeType,
        path_len: usize,
    },
    /// The frontier is now the Boss node. No node is attainable past it.
    BossReached { point: Point },
}
