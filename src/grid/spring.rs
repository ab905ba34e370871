//! Pull-only damped springs between point masses
//!
//! Springs refer to their endpoints by index into the lattice's mass arena.

use crate::config::{REST_LENGTH_FACTOR, SpringParams};
use crate::math::Real;

use super::point_mass::PointMass;

/// Index of a point mass inside a `Lattice`.
pub type MassIndex = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpringKind {
    /// Links two horizontally or vertically adjacent cells.
    Structural,
    /// Ties a border cell to its anchor.
    BorderAnchor,
    /// Loosely ties a sparse interior cell to its anchor.
    InteriorAnchor,
}

/// Fixed once built; only the masses it links move.
#[derive(Clone, Debug, PartialEq)]
pub struct Spring {
    end1: MassIndex,
    end2: MassIndex,
    target_length: Real,
    stiffness: Real,
    damping: Real,
    kind: SpringKind,
}

impl Spring {
    /// Connect two masses; the rest length is 95% of their current separation.
    pub fn new(
        masses: &[PointMass],
        end1: MassIndex,
        end2: MassIndex,
        params: SpringParams,
        kind: SpringKind,
    ) -> Self {
        let separation = masses[end1].position.distance(masses[end2].position);
        Self {
            end1,
            end2,
            target_length: separation * REST_LENGTH_FACTOR,
            stiffness: params.stiffness,
            damping: params.damping,
            kind,
        }
    }

    /// Rebuild a spring from previously captured state.
    pub(crate) fn from_parts(
        end1: MassIndex,
        end2: MassIndex,
        target_length: Real,
        params: SpringParams,
        kind: SpringKind,
    ) -> Self {
        Self {
            end1,
            end2,
            target_length,
            stiffness: params.stiffness,
            damping: params.damping,
            kind,
        }
    }

    #[inline(always)]
    pub fn end1(&self) -> MassIndex {
        self.end1
    }

    #[inline(always)]
    pub fn end2(&self) -> MassIndex {
        self.end2
    }

    #[inline(always)]
    pub fn target_length(&self) -> Real {
        self.target_length
    }

    #[inline(always)]
    pub fn stiffness(&self) -> Real {
        self.stiffness
    }

    #[inline(always)]
    pub fn damping(&self) -> Real {
        self.damping
    }

    #[inline(always)]
    pub fn kind(&self) -> SpringKind {
        self.kind
    }

    #[inline(always)]
    pub fn is_anchor(&self) -> bool {
        self.kind != SpringKind::Structural
    }

    /// Accumulate this spring's force on both endpoints.
    ///
    /// Does nothing while the spring is at or below its target length.
    /// Positions and velocities are only read, never written.
    pub fn update(&self, masses: &mut [PointMass]) {
        let (end1, end2) = (&masses[self.end1], &masses[self.end2]);

        let delta = end1.position - end2.position;
        let length = delta.length();
        if length <= self.target_length {
            return;
        }

        let stretch = (delta / length) * (length - self.target_length);
        let relative_velocity = end2.velocity - end1.velocity;
        let force = self.stiffness * stretch - relative_velocity * self.damping;

        masses[self.end1].apply_force(-force);
        masses[self.end2].apply_force(force);
    }
}
