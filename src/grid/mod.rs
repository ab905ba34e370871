pub mod grid_state;
pub mod lattice;
pub mod point_mass;
pub mod spring;

pub use grid_state::{GridSimulation, LatestFrame, advance_grid_physics, tessellate_grid};
pub use lattice::{Lattice, LatticeBuilder};
pub use point_mass::PointMass;
pub use spring::{MassIndex, Spring, SpringKind};
