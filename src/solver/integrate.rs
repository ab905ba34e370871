//! Physics pass
//!
//! Every spring accumulates force from last frame's state, then every movable
//! mass integrates. Anchors are never integrated.

use crate::grid::Lattice;

/// Accumulate forces from all springs. Springs only write acceleration, so
/// iteration order has no effect on the result.
pub fn update_springs(lattice: &mut Lattice) {
    let (masses, springs) = lattice.arena_mut();
    for spring in springs {
        spring.update(masses);
    }
}

pub fn integrate_points(lattice: &mut Lattice) {
    for mass in lattice.points_mut() {
        mass.integrate();
    }
}

/// One full physics step: springs first, then point masses.
pub fn advance(lattice: &mut Lattice) {
    update_springs(lattice);
    integrate_points(lattice);
}
