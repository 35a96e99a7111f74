//! Error taxonomy.
//!
//! [`GenerationError`] is the rich, context-carrying error each stage
//! returns internally; [`LastError`] is the stable, context-free enum
//! exposed on [`crate::generator::Generator::last_error`] for wire
//! comparison between embedders.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("rooms still overlap after relaxation and pruning")]
    SeparateRoomsFailed,

    #[error("Delaunay triangulation produced no triangles for {room_count} rooms")]
    TriangulationFailed { room_count: usize },

    #[error("A* could not route aisle #{aisle_index}")]
    RouteSearchFailed { aisle_index: usize },

    #[error("no valid gate cell found for aisle #{aisle_index} at endpoint {endpoint}")]
    GateSearchFailed { aisle_index: usize, endpoint: u8 },

    #[error("A* goal setup produced a point outside the goal room's range")]
    GoalPointIsOutsideGoalRange,
}

impl GenerationError {
    /// Whether the whole pipeline should be retried with a fresh random
    /// sequence: route/gate failures are retryable, separation failure is
    /// terminal.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, GenerationError::SeparateRoomsFailed)
    }

    pub fn to_last_error(&self) -> LastError {
        match self {
            GenerationError::SeparateRoomsFailed => LastError::SeparateRoomsFailed,
            GenerationError::TriangulationFailed { .. } => LastError::TriangulationFailed,
            GenerationError::RouteSearchFailed { .. } => LastError::RouteSearchFailed,
            GenerationError::GateSearchFailed { .. } => LastError::GateSearchFailed,
            GenerationError::GoalPointIsOutsideGoalRange => LastError::GoalPointIsOutsideGoalRange,
        }
    }
}

/// Stable, context-free mirror of [`GenerationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum LastError {
    #[default]
    Success,
    SeparateRoomsFailed,
    TriangulationFailed,
    RouteSearchFailed,
    GateSearchFailed,
    GoalPointIsOutsideGoalRange,
}
