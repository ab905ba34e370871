//! Localised force fields
//!
//! Each field perturbs every movable mass whose planar distance to `center` is
//! strictly less than `radius`. Fields only accumulate acceleration and damping;
//! positions change at the next integration step.

use bevy::prelude::*;

use crate::config::{
    DIRECTED_FALLOFF, EXPLOSIVE_FALLOFF, EXPLOSIVE_SCALE, IMPACT_DAMPING, IMPLOSIVE_FALLOFF,
    IMPLOSIVE_SCALE,
};
use crate::grid::PointMass;
use crate::math::{Real, Vector, planar_distance};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ForceField {
    /// Push every caught mass along `force`, fading with distance.
    Directed { force: Vector },
    /// Pull caught masses toward the center and make them heavier for a step.
    Implosive { magnitude: Real },
    /// Push caught masses away from the center and make them heavier for a step.
    Explosive { magnitude: Real },
}

impl ForceField {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Directed { .. } => "directed",
            Self::Implosive { .. } => "implosive",
            Self::Explosive { .. } => "explosive",
        }
    }

    /// Apply the field and return how many masses it reached.
    pub fn apply(&self, masses: &mut [PointMass], center: Vector, radius: Real) -> usize {
        let affected = match *self {
            Self::Directed { force } => apply_directed_force(masses, force, center, radius),
            Self::Implosive { magnitude } => {
                apply_implosive_force(masses, magnitude, center, radius)
            }
            Self::Explosive { magnitude } => {
                apply_explosive_force(masses, magnitude, center, radius)
            }
        };
        debug!(
            "{} force at ({:.1}, {:.1}) r={:.1} reached {} masses",
            self.name(),
            center.x,
            center.y,
            radius,
            affected
        );
        affected
    }
}

/// The radius test is planar but the falloff uses full 3D distance.
pub fn apply_directed_force(
    masses: &mut [PointMass],
    force: Vector,
    center: Vector,
    radius: Real,
) -> usize {
    let mut affected = 0;
    for mass in masses.iter_mut() {
        if planar_distance(center, mass.position) < radius {
            let falloff = DIRECTED_FALLOFF + center.distance(mass.position);
            mass.apply_force(DIRECTED_FALLOFF * force / falloff);
            affected += 1;
        }
    }
    affected
}

pub fn apply_implosive_force(
    masses: &mut [PointMass],
    magnitude: Real,
    center: Vector,
    radius: Real,
) -> usize {
    let mut affected = 0;
    for mass in masses.iter_mut() {
        let distance = planar_distance(center, mass.position);
        if distance < radius {
            let pull = IMPLOSIVE_SCALE * magnitude * (center - mass.position);
            mass.apply_force(pull / (IMPLOSIVE_FALLOFF + distance));
            mass.increase_damping(IMPACT_DAMPING);
            affected += 1;
        }
    }
    affected
}

pub fn apply_explosive_force(
    masses: &mut [PointMass],
    magnitude: Real,
    center: Vector,
    radius: Real,
) -> usize {
    let mut affected = 0;
    for mass in masses.iter_mut() {
        let distance = planar_distance(center, mass.position);
        if distance < radius {
            let push = EXPLOSIVE_SCALE * magnitude * (mass.position - center);
            mass.apply_force(push / (EXPLOSIVE_FALLOFF + distance));
            mass.increase_damping(IMPACT_DAMPING);
            affected += 1;
        }
    }
    affected
}
