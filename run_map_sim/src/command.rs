// Commands that mutate a run map.
//
// All external changes to a map go through `MapCommand`. During play the
// only mutation is walking: the player-choice collaborator turns a click on
// an attainable node into `MapAction::TravelTo`, and `MapRun::apply` in
// `run.rs` turns that into a path append.
//
// The host should only offer points the last `Resolution` marked
// `Attainable`. Anything else is still rejected by `MapGraph::append_to_path`
// with `IllegalMove`, leaving the path unchanged.

use crate::types::Point;
use serde::{Deserialize, Serialize};

/// A player-issued command against a run map.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapCommand {
    pub action: MapAction,
}

impl MapCommand {
    pub fn travel_to(point: Point) -> Self {
        Self {
            action: MapAction::TravelTo { point },
        }
    }
}

/// The specific action a command performs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MapAction {
    /// Commit to traveling to `point`, which becomes the new frontier.
    TravelTo { point: Point },
}
