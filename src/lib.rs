//! Warping grid: a lattice of damped point masses that ripples under
//! directed, implosive and explosive forces, tessellated into line segments
//! every frame.

use std::time::Duration;

use bevy::prelude::*;

pub mod config;
pub mod error;
pub mod grid;
pub mod math;
pub mod render;
pub mod snapshot;
pub mod solver;

// Public re-exports for clean API
pub use crate::config::{AnchorConfig, DrawMode, GridConfig, OverflowPolicy, SpringParams};
pub use crate::error::GridError;
pub use crate::grid::{
    GridSimulation, LatestFrame, Lattice, LatticeBuilder, PointMass, Spring, SpringKind,
    advance_grid_physics, tessellate_grid,
};
pub use crate::render::{
    DepthPerspective, FlatProjection, LineSegment, ScreenProjection, SegmentKind,
    SegmentRenderer, TessellatedFrame, Tessellator,
};
pub use crate::snapshot::LatticeSnapshot;
pub use crate::solver::ForceField;

/// Simulation ticks per second.
pub const TICK_RATE: f64 = 60.0;

/// Runs one physics step and one tessellation per fixed tick.
pub struct WarpGridPlugin {
    pub config: GridConfig,
}

impl WarpGridPlugin {
    pub fn new(config: GridConfig) -> Self {
        Self { config }
    }
}

impl Plugin for WarpGridPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(LatestFrame::default());

        let simulation = match GridSimulation::new(&self.config) {
            Ok(simulation) => simulation,
            Err(err) => {
                error!("warping grid disabled: {err}");
                return;
            }
        };

        app.insert_resource(self.config.clone())
            .insert_resource(simulation)
            .insert_resource(Time::<Fixed>::from_duration(Duration::from_secs_f64(
                1.0 / TICK_RATE,
            )))
            .add_systems(FixedUpdate, (advance_grid_physics, tessellate_grid).chain());
    }
}
