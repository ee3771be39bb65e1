// Error taxonomy for graph construction, traversal, and map loading.
//
// All errors are returned synchronously to the immediate caller. The engine
// never logs or swallows them, and none are transient: they indicate bad
// generation data or a caller offering a move the map does not allow.
//
// A missing outgoing target during resolution is deliberately NOT an error
// (see `resolve.rs`).

use crate::types::Point;

/// Structural or traversal violation on a `MapGraph`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    /// Two nodes were added with the same point. Fatal to map construction.
    #[error("duplicate node at point {0}")]
    DuplicatePoint(Point),

    /// The referenced point has no node in the graph. The path is unchanged.
    #[error("no node at point {0}")]
    UnknownPoint(Point),

    /// The target is not a legal next step. With an empty path only entry
    /// layer nodes are legal (`from` is `None`); otherwise the target must be
    /// an outgoing neighbor of the frontier. The path is unchanged.
    #[error("illegal move to {to} {}", origin(.from))]
    IllegalMove { from: Option<Point>, to: Point },
}

fn origin(from: &Option<Point>) -> String {
    match from {
        Some(p) => format!("from {p}"),
        None => "before entering the map".to_string(),
    }
}

/// Failure to load a saved map.
#[derive(Debug, thiserror::Error)]
pub enum MapLoadError {
    #[error("malformed map JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON parsed but describes a graph or path that violates the map
    /// invariants.
    #[error("invalid map: {0}")]
    Invalid(#[from] MapError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        let p = Point::new(1, 2);
        assert_eq!(MapError::DuplicatePoint(p).to_string(), "duplicate node at point (1, 2)");
        assert_eq!(MapError::UnknownPoint(p).to_string(), "no node at point (1, 2)");
        assert_eq!(
            MapError::IllegalMove { from: Some(Point::new(0, 1)), to: p }.to_string(),
            "illegal move to (1, 2) from (0, 1)"
        );
        assert_eq!(
            MapError::IllegalMove { from: None, to: p }.to_string(),
            "illegal move to (1, 2) before entering the map"
        );
    }

    #[test]
    fn load_error_wraps_map_error() {
        let err: MapLoadError = MapError::UnknownPoint(Point::new(0, 0)).into();
        assert!(matches!(err, MapLoadError::Invalid(MapError::UnknownPoint(_))));
        assert_eq!(err.to_string(), "invalid map: no node at point (0, 0)");
    }
}
