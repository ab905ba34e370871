//! Rectangular lattice of point masses and the springs linking them
//!
//! All masses live in one arena: the movable grid first, then a parallel grid
//! of anchors. Cell `(column, row)` maps to index `row * columns + column` in
//! the movable half and the same offset into the anchor half.

use bevy::prelude::*;

use crate::config::{AnchorConfig, GridConfig};
use crate::error::GridError;
use crate::math::Real;

use super::point_mass::PointMass;
use super::spring::{MassIndex, Spring, SpringKind};

#[derive(Clone, Debug, PartialEq)]
pub struct Lattice {
    columns: usize,
    rows: usize,
    masses: Vec<PointMass>,
    springs: Vec<Spring>,
}

impl Lattice {
    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.columns, self.rows)
    }

    pub fn cell_count(&self) -> usize {
        self.columns * self.rows
    }

    #[inline(always)]
    pub fn index(&self, column: usize, row: usize) -> MassIndex {
        row * self.columns + column
    }

    #[inline(always)]
    pub fn anchor_index(&self, column: usize, row: usize) -> MassIndex {
        self.cell_count() + self.index(column, row)
    }

    pub fn point(&self, column: usize, row: usize) -> &PointMass {
        &self.masses[self.index(column, row)]
    }

    pub fn point_mut(&mut self, column: usize, row: usize) -> &mut PointMass {
        let index = self.index(column, row);
        &mut self.masses[index]
    }

    pub fn anchor(&self, column: usize, row: usize) -> &PointMass {
        &self.masses[self.anchor_index(column, row)]
    }

    /// Movable masses in row-major order.
    pub fn points(&self) -> &[PointMass] {
        &self.masses[..self.cell_count()]
    }

    pub fn points_mut(&mut self) -> &mut [PointMass] {
        let count = self.cell_count();
        &mut self.masses[..count]
    }

    pub fn anchors(&self) -> &[PointMass] {
        &self.masses[self.cell_count()..]
    }

    /// The whole arena, movable masses followed by anchors.
    pub fn masses(&self) -> &[PointMass] {
        &self.masses
    }

    pub fn springs(&self) -> &[Spring] {
        &self.springs
    }

    pub fn springs_of_kind(&self, kind: SpringKind) -> impl Iterator<Item = &Spring> {
        self.springs.iter().filter(move |spring| spring.kind() == kind)
    }

    pub(crate) fn arena_mut(&mut self) -> (&mut [PointMass], &[Spring]) {
        (&mut self.masses, &self.springs)
    }

    pub(crate) fn replace_state(&mut self, masses: Vec<PointMass>, springs: Vec<Spring>) {
        self.masses = masses;
        self.springs = springs;
    }

    /// Sum of squared speeds over the movable masses.
    pub fn kinetic_energy(&self) -> Real {
        self.points().iter().map(PointMass::kinetic_energy).sum()
    }
}

/// Builds a `Lattice` over a rectangle.
pub struct LatticeBuilder {
    bounds: Rect,
    spacing: Vec2,
    anchors: AnchorConfig,
}

impl LatticeBuilder {
    pub fn new(bounds: Rect, spacing: Vec2) -> Self {
        Self {
            bounds,
            spacing,
            anchors: AnchorConfig::default(),
        }
    }

    pub fn from_config(config: &GridConfig) -> Self {
        Self::new(config.bounds, config.spacing).with_anchors(config.anchors)
    }

    pub fn with_anchors(mut self, anchors: AnchorConfig) -> Self {
        self.anchors = anchors;
        self
    }

    pub fn build(&self) -> Result<Lattice, GridError> {
        let config = GridConfig::new(self.bounds, self.spacing).with_anchors(self.anchors);
        config.validate()?;

        let (columns, rows) = config.dimensions();
        let cell_count = columns * rows;
        let origin = self.bounds.min;

        let mut masses = Vec::with_capacity(cell_count * 2);
        for row in 0..rows {
            for column in 0..columns {
                masses.push(PointMass::new(cell_position(origin, self.spacing, column, row), 1.0));
            }
        }
        for row in 0..rows {
            for column in 0..columns {
                masses.push(PointMass::anchor(cell_position(origin, self.spacing, column, row)));
            }
        }

        let mut springs = Vec::new();
        let stride = self.anchors.interior_stride;
        for row in 0..rows {
            for column in 0..columns {
                let index = row * columns + column;
                let anchor = cell_count + index;

                let on_border =
                    column == 0 || row == 0 || column == columns - 1 || row == rows - 1;
                if on_border {
                    springs.push(Spring::new(
                        &masses,
                        anchor,
                        index,
                        self.anchors.border,
                        SpringKind::BorderAnchor,
                    ));
                } else if column % stride == 0 && row % stride == 0 {
                    springs.push(Spring::new(
                        &masses,
                        anchor,
                        index,
                        self.anchors.interior,
                        SpringKind::InteriorAnchor,
                    ));
                }

                if column > 0 {
                    springs.push(Spring::new(
                        &masses,
                        index - 1,
                        index,
                        self.anchors.structural,
                        SpringKind::Structural,
                    ));
                }
                if row > 0 {
                    springs.push(Spring::new(
                        &masses,
                        index - columns,
                        index,
                        self.anchors.structural,
                        SpringKind::Structural,
                    ));
                }
            }
        }

        info!(
            "built {}x{} lattice with {} springs ({} anchored)",
            columns,
            rows,
            springs.len(),
            springs.iter().filter(|spring| spring.is_anchor()).count()
        );

        Ok(Lattice {
            columns,
            rows,
            masses,
            springs,
        })
    }
}

#[inline]
fn cell_position(origin: Vec2, spacing: Vec2, column: usize, row: usize) -> Vec3 {
    let offset = spacing * Vec2::new(column as Real, row as Real);
    (origin + offset).extend(0.0)
}
