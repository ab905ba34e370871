use bevy::prelude::*;

use crate::config::{DrawMode, GridConfig};
use crate::error::GridError;
use crate::math::{Real, Vector};
use crate::render::{FlatProjection, ScreenProjection, TessellatedFrame, Tessellator};
use crate::snapshot::LatticeSnapshot;
use crate::solver::{ForceField, integrate};

use super::lattice::{Lattice, LatticeBuilder};

/// Aggregate state of the warping grid.
///
/// Each frame runs physics (all springs, then all masses) and then
/// tessellation, strictly in that order.
#[derive(Resource)]
pub struct GridSimulation {
    lattice: Lattice,
    tessellator: Tessellator,
    projection: Box<dyn ScreenProjection>,
    frame: u64,
}

impl GridSimulation {
    pub fn new(config: &GridConfig) -> Result<Self, GridError> {
        config.validate()?;
        let lattice = LatticeBuilder::from_config(config).build()?;
        Ok(Self {
            lattice,
            tessellator: Tessellator::from_config(config),
            projection: Box::new(FlatProjection),
            frame: 0,
        })
    }

    pub fn with_projection<P: ScreenProjection + 'static>(mut self, projection: P) -> Self {
        self.projection = Box::new(projection);
        self
    }

    pub fn set_projection<P: ScreenProjection + 'static>(&mut self, projection: P) {
        self.projection = Box::new(projection);
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Movable masses can be displaced through this; springs and anchors
    /// have no mutable access.
    pub fn lattice_mut(&mut self) -> &mut Lattice {
        &mut self.lattice
    }

    pub fn tessellator(&self) -> &Tessellator {
        &self.tessellator
    }

    pub fn draw_mode(&self) -> DrawMode {
        self.tessellator.draw_mode
    }

    pub fn set_draw_mode(&mut self, draw_mode: DrawMode) {
        self.tessellator.draw_mode = draw_mode;
    }

    pub fn max_segments(&self) -> usize {
        self.tessellator.max_segments
    }

    /// Frames advanced so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn kinetic_energy(&self) -> Real {
        self.lattice.kinetic_energy()
    }

    pub fn apply_force(&mut self, field: ForceField, position: Vector, radius: Real) -> usize {
        field.apply(self.lattice.points_mut(), position, radius)
    }

    pub fn apply_directed_force(&mut self, force: Vector, position: Vector, radius: Real) -> usize {
        self.apply_force(ForceField::Directed { force }, position, radius)
    }

    pub fn apply_implosive_force(&mut self, magnitude: Real, position: Vector, radius: Real) -> usize {
        self.apply_force(ForceField::Implosive { magnitude }, position, radius)
    }

    pub fn apply_explosive_force(&mut self, magnitude: Real, position: Vector, radius: Real) -> usize {
        self.apply_force(ForceField::Explosive { magnitude }, position, radius)
    }

    /// Physics phase only.
    pub fn advance(&mut self) {
        integrate::advance(&mut self.lattice);
        self.frame += 1;
    }

    /// Tessellation phase only; reads the current positions.
    pub fn tessellate(&mut self) -> Result<TessellatedFrame, GridError> {
        self.tessellator.tessellate(&self.lattice, &*self.projection)
    }

    /// Advance one frame and derive the segments to draw.
    ///
    /// Physics has already advanced when a budget error is returned.
    pub fn step(&mut self) -> Result<TessellatedFrame, GridError> {
        self.advance();
        self.tessellate()
    }

    pub fn snapshot(&self) -> LatticeSnapshot {
        LatticeSnapshot::capture(&self.lattice, self.frame)
    }

    pub fn restore(&mut self, snapshot: &LatticeSnapshot) -> Result<(), GridError> {
        snapshot.apply_to(&mut self.lattice)?;
        self.frame = snapshot.frame;
        Ok(())
    }
}

/// Segments from the most recent tessellation pass.
#[derive(Resource, Default)]
pub struct LatestFrame {
    pub frame: TessellatedFrame,
    pub index: u64,
}

pub fn advance_grid_physics(mut simulation: ResMut<GridSimulation>) {
    simulation.advance();
}

pub fn tessellate_grid(mut simulation: ResMut<GridSimulation>, mut latest: ResMut<LatestFrame>) {
    match simulation.tessellate() {
        Ok(frame) => {
            latest.frame = frame;
            latest.index = simulation.frame();
        }
        Err(err) => warn!("frame {} not tessellated: {err}", simulation.frame()),
    }
}
