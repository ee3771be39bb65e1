// Run driver: owns one map during play and pushes fresh resolutions to the
// presentation layer.
//
// `MapRun` is the seam between the engine and whatever draws the map. The
// host subscribes a `MapObserver` (or any `FnMut(&MapGraph, &Resolution)`
// closure) and receives the full snapshot:
// - once, immediately on subscribe (initial display), and
// - after every successful command.
//
// Failed commands push nothing and leave the path untouched. Hosts that
// prefer polling can call `resolution()` instead; it always reflects every
// command applied so far.
//
// There is no global instance. A host that needs to share a run across
// threads wraps it in its own lock.
//
// See also: `command.rs` for the input, `event.rs` for the narrative output,
// `resolve.rs` for how the snapshot is computed.

use crate::command::{MapAction, MapCommand};
use crate::error::MapError;
use crate::event::MapEvent;
use crate::graph::MapGraph;
use crate::resolve::{Resolution, resolve};
use crate::types::{NodeType, Point};

/// Receives a full state snapshot whenever a run map changes.
pub trait MapObserver {
    fn on_resolved(&mut self, graph: &MapGraph, resolution: &Resolution);
}

impl<F: FnMut(&MapGraph, &Resolution)> MapObserver for F {
    fn on_resolved(&mut self, graph: &MapGraph, resolution: &Resolution) {
        self(graph, resolution)
    }
}

/// One map being played.
pub struct MapRun {
    graph: MapGraph,
    resolution: Resolution,
    observers: Vec<Box<dyn MapObserver>>,
}

impl MapRun {
    pub fn new(graph: MapGraph) -> Self {
        let resolution = resolve(&graph);
        Self {
            graph,
            resolution,
            observers: Vec::new(),
        }
    }

    /// Register an observer and immediately hand it the current snapshot.
    pub fn subscribe(&mut self, mut observer: impl MapObserver + 'static) {
        observer.on_resolved(&self.graph, &self.resolution);
        self.observers.push(Box::new(observer));
    }

    pub fn graph(&self) -> &MapGraph {
        &self.graph
    }

    /// The latest snapshot.
    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    /// Give the graph back, ending the run.
    pub fn into_graph(self) -> MapGraph {
        self.graph
    }

    /// Apply a command, re-resolve, and notify observers.
    pub fn apply(&mut self, command: MapCommand) -> Result<Vec<MapEvent>, MapError> {
        let events = match command.action {
            MapAction::TravelTo { point } => self.travel_events(point)?,
        };
        self.resolution = resolve(&self.graph);
        for observer in &mut self.observers {
            observer.on_resolved(&self.graph, &self.resolution);
        }
        Ok(events)
    }

    /// Shorthand for `apply(MapCommand::travel_to(point))`.
    pub fn travel(&mut self, point: Point) -> Result<Vec<MapEvent>, MapError> {
        self.apply(MapCommand::travel_to(point))
    }

    fn travel_events(&mut self, point: Point) -> Result<Vec<MapEvent>, MapError> {
        let node_type = self
            .graph
            .node(point)
            .map(|n| n.node_type)
            .ok_or(MapError::UnknownPoint(point))?;
        let path_len = self.graph.append_to_path(point)?;
        let mut events = vec![MapEvent::NodeVisited {
            point,
            node_type,
            path_len,
        }];
        if node_type == NodeType::Boss {
            events.push(MapEvent::BossReached { point });
        }
        Ok(events)
    }
}
