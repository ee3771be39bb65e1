// Geometry summary of a map's assigned node positions.
//
// Presentation hosts need the map's extent to frame a viewport, but should
// not have to re-derive graph semantics (which layer is first, which is
// deepest) to get it. These queries are read-only over `NodeRecord::position`
// and take no part in state resolution.
//
// Axis convention (see `MapPosition`): x is lateral, y is the primary axis
// that grows with layer.

use crate::graph::MapGraph;

/// Largest absolute lateral offset of any node, for horizontal framing.
/// Returns 0.0 for an empty graph.
pub fn max_lateral_offset(graph: &MapGraph) -> f32 {
    graph
        .nodes()
        .map(|n| n.position.x.abs())
        .fold(0.0, f32::max)
}

/// Index of the deepest layer, or `None` for an empty graph.
pub fn deepest_layer(graph: &MapGraph) -> Option<i32> {
    graph.nodes().map(|n| n.point.layer).max()
}

/// Number of distinct layers from the entry layer through the deepest one.
/// Layers with no nodes in between still count.
pub fn layer_count(graph: &MapGraph) -> usize {
    deepest_layer(graph).map_or(0, |deepest| deepest.max(0) as usize + 1)
}

/// Primary-axis distance from the entry layer to the deepest layer:
/// the furthest deepest-layer node minus the nearest layer-0 node.
///
/// Returns 0.0 for an empty graph or one with no entry layer.
pub fn span_between_first_and_last_layer(graph: &MapGraph) -> f32 {
    let Some(deepest) = deepest_layer(graph) else {
        return 0.0;
    };
    let first = graph
        .nodes()
        .filter(|n| n.point.is_entry())
        .map(|n| n.position.y)
        .min_by(f32::total_cmp);
    let last = graph
        .nodes()
        .filter(|n| n.point.layer == deepest)
        .map(|n| n.position.y)
        .max_by(f32::total_cmp);
    match (first, last) {
        (Some(first), Some(last)) => last - first,
        _ => 0.0,
    }
}
