//! Error types for grid construction, tessellation and snapshots.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridError {
    /// Spacing, bounds or styling cannot produce a usable lattice.
    #[error("invalid grid configuration: {0}")]
    InvalidConfiguration(String),

    /// A frame holds more segments than the renderer pool accepts.
    #[error("frame needs {emitted} segments but the budget is {capacity}")]
    SegmentBudgetExceeded { emitted: usize, capacity: usize },

    /// A snapshot was taken from a lattice of a different shape.
    #[error("snapshot has {found} {what} but the simulation has {expected}")]
    SnapshotMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("snapshot encoding failed: {0}")]
    Snapshot(#[from] bincode::Error),
}
