use bevy::prelude::*;
use warpgrid::{ForceField, GridConfig, GridSimulation, PointMass};

fn simulation() -> GridSimulation {
    GridSimulation::new(&GridConfig::new(Rect::new(0.0, 0.0, 80.0, 80.0), Vec2::splat(10.0)))
        .unwrap()
}

#[test]
fn zero_radius_reaches_nothing() {
    let mut simulation = simulation();
    let center = Vec3::new(40.0, 40.0, 0.0);

    assert_eq!(simulation.apply_explosive_force(10.0, center, 0.0), 0);
    assert_eq!(simulation.apply_implosive_force(10.0, center, 0.0), 0);
    assert_eq!(simulation.apply_directed_force(Vec3::X, center, 0.0), 0);
    assert!(
        simulation
            .lattice()
            .points()
            .iter()
            .all(|point| point.pending_acceleration() == Vec3::ZERO)
    );
}

#[test]
fn negative_radius_is_a_no_op() {
    let mut simulation = simulation();
    let reached = simulation.apply_explosive_force(10.0, Vec3::new(40.0, 40.0, 0.0), -5.0);
    assert_eq!(reached, 0);
}

#[test]
fn explosion_and_implosion_are_not_inverses() {
    let center = Vec3::new(0.0, 0.0, 0.0);
    let mut masses = vec![PointMass::new(Vec3::new(3.0, 4.0, 0.0), 1.0)];

    ForceField::Explosive { magnitude: 1.0 }.apply(&mut masses, center, 10.0);
    ForceField::Implosive { magnitude: 1.0 }.apply(&mut masses, center, 10.0);

    let explosive = 100.0 * Vec3::new(3.0, 4.0, 0.0) / (10_000.0 + 5.0);
    let implosive = 10.0 * Vec3::new(-3.0, -4.0, 0.0) / (100.0 + 5.0);
    let net = masses[0].pending_acceleration();
    assert_ne!(net, Vec3::ZERO);
    assert!((net - (explosive + implosive)).length() < 1e-6);

    masses[0].integrate();
    assert_ne!(masses[0].position, Vec3::new(3.0, 4.0, 0.0));
}

#[test]
fn radius_test_ignores_depth() {
    let mut masses = vec![PointMass::new(Vec3::new(1.0, 0.0, 500.0), 1.0)];
    let reached = ForceField::Explosive { magnitude: 1.0 }.apply(&mut masses, Vec3::ZERO, 2.0);
    assert_eq!(reached, 1);
    assert!(masses[0].pending_acceleration().z > 0.0);
}

#[test]
fn impact_damping_only_lasts_one_step() {
    let mut simulation = simulation();
    let center = Vec3::new(40.0, 40.0, 0.0);
    simulation.apply_implosive_force(5.0, center, 15.0);

    let base = simulation.lattice().point(0, 0).damping();
    assert!(simulation.lattice().point(4, 4).damping() < base);

    simulation.advance();
    assert_eq!(simulation.lattice().point(4, 4).damping(), base);
}

#[test]
fn forces_accumulate_until_integration() {
    let mut simulation = simulation();
    let center = Vec3::new(40.0, 40.0, 0.0);
    simulation.apply_directed_force(Vec3::new(0.0, 0.0, 5.0), center, 5.0);
    let once = simulation.lattice().point(4, 4).pending_acceleration();
    simulation.apply_directed_force(Vec3::new(0.0, 0.0, 5.0), center, 5.0);

    assert_eq!(simulation.lattice().point(4, 4).pending_acceleration(), once * 2.0);
    simulation.advance();
    assert!(simulation.lattice().point(4, 4).position.z > 0.0);
}
