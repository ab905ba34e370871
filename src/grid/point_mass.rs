//! Point masses for the warping grid
//!
//! Each mass carries position, velocity and an inverse mass. Forces are
//! accumulated as acceleration and consumed by `integrate` once per frame.

use crate::config::{BASE_DAMPING, VELOCITY_SNAP_EPSILON};
use crate::math::{Real, Vector, zero_vector};

#[derive(Clone, Debug, PartialEq)]
pub struct PointMass {
    pub position: Vector,
    pub velocity: Vector,
    inverse_mass: Real,
    acceleration: Vector,
    damping: Real,
}

impl PointMass {
    pub fn new(position: Vector, inverse_mass: Real) -> Self {
        Self {
            position,
            velocity: zero_vector(),
            inverse_mass,
            acceleration: zero_vector(),
            damping: BASE_DAMPING,
        }
    }

    /// An immovable attachment point.
    pub fn anchor(position: Vector) -> Self {
        Self::new(position, 0.0)
    }

    /// Rebuild a mass from previously captured state.
    pub(crate) fn from_parts(
        position: Vector,
        velocity: Vector,
        inverse_mass: Real,
        acceleration: Vector,
        damping: Real,
    ) -> Self {
        Self {
            position,
            velocity,
            inverse_mass,
            acceleration,
            damping,
        }
    }

    #[inline(always)]
    pub fn inverse_mass(&self) -> Real {
        self.inverse_mass
    }

    #[inline(always)]
    pub fn is_anchor(&self) -> bool {
        self.inverse_mass == 0.0
    }

    /// Acceleration accumulated since the last integration step.
    #[inline(always)]
    pub fn pending_acceleration(&self) -> Vector {
        self.acceleration
    }

    /// Damping that the next integration step will apply.
    #[inline(always)]
    pub fn damping(&self) -> Real {
        self.damping
    }

    #[inline(always)]
    pub fn apply_force(&mut self, force: Vector) {
        self.acceleration += force * self.inverse_mass;
    }

    /// Scale this step's damping. Resets to the base value after `integrate`.
    #[inline(always)]
    pub fn increase_damping(&mut self, factor: Real) {
        self.damping *= factor;
    }

    /// Advance one frame.
    ///
    /// Acceleration is consumed before damping is applied; near-zero velocity
    /// snaps to exactly zero so a settled grid stops jittering.
    pub fn integrate(&mut self) {
        self.velocity += self.acceleration;
        self.position += self.velocity;
        self.acceleration = zero_vector();

        if self.velocity.length_squared() < VELOCITY_SNAP_EPSILON * VELOCITY_SNAP_EPSILON {
            self.velocity = zero_vector();
        }

        self.velocity *= self.damping;
        self.damping = BASE_DAMPING;
    }

    #[inline(always)]
    pub fn kinetic_energy(&self) -> Real {
        self.velocity.length_squared()
    }
}
