//! Serializable lattice state
//!
//! Captures everything that influences later frames so a restored simulation
//! continues bit-for-bit where the captured one left off. Vectors are stored as
//! plain arrays and encoded with bincode, which keeps floats exact.

use serde::{Deserialize, Serialize};

use crate::grid::{Lattice, PointMass, Spring, SpringKind};
use crate::config::SpringParams;
use crate::error::GridError;
use crate::math::Real;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MassState {
    pub position: [Real; 3],
    pub velocity: [Real; 3],
    pub inverse_mass: Real,
    pub acceleration: [Real; 3],
    pub damping: Real,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpringKindState {
    Structural,
    BorderAnchor,
    InteriorAnchor,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpringState {
    pub end1: usize,
    pub end2: usize,
    pub target_length: Real,
    pub stiffness: Real,
    pub damping: Real,
    pub kind: SpringKindState,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatticeSnapshot {
    pub columns: usize,
    pub rows: usize,
    pub frame: u64,
    pub masses: Vec<MassState>,
    pub springs: Vec<SpringState>,
}

impl From<&PointMass> for MassState {
    fn from(mass: &PointMass) -> Self {
        Self {
            position: mass.position.to_array(),
            velocity: mass.velocity.to_array(),
            inverse_mass: mass.inverse_mass(),
            acceleration: mass.pending_acceleration().to_array(),
            damping: mass.damping(),
        }
    }
}

impl From<&MassState> for PointMass {
    fn from(state: &MassState) -> Self {
        PointMass::from_parts(
            state.position.into(),
            state.velocity.into(),
            state.inverse_mass,
            state.acceleration.into(),
            state.damping,
        )
    }
}

impl From<SpringKind> for SpringKindState {
    fn from(kind: SpringKind) -> Self {
        match kind {
            SpringKind::Structural => Self::Structural,
            SpringKind::BorderAnchor => Self::BorderAnchor,
            SpringKind::InteriorAnchor => Self::InteriorAnchor,
        }
    }
}

impl From<SpringKindState> for SpringKind {
    fn from(kind: SpringKindState) -> Self {
        match kind {
            SpringKindState::Structural => Self::Structural,
            SpringKindState::BorderAnchor => Self::BorderAnchor,
            SpringKindState::InteriorAnchor => Self::InteriorAnchor,
        }
    }
}

impl From<&Spring> for SpringState {
    fn from(spring: &Spring) -> Self {
        Self {
            end1: spring.end1(),
            end2: spring.end2(),
            target_length: spring.target_length(),
            stiffness: spring.stiffness(),
            damping: spring.damping(),
            kind: spring.kind().into(),
        }
    }
}

impl From<&SpringState> for Spring {
    fn from(state: &SpringState) -> Self {
        Spring::from_parts(
            state.end1,
            state.end2,
            state.target_length,
            SpringParams::new(state.stiffness, state.damping),
            state.kind.into(),
        )
    }
}

impl LatticeSnapshot {
    pub fn capture(lattice: &Lattice, frame: u64) -> Self {
        Self {
            columns: lattice.columns(),
            rows: lattice.rows(),
            frame,
            masses: lattice.masses().iter().map(MassState::from).collect(),
            springs: lattice.springs().iter().map(SpringState::from).collect(),
        }
    }

    /// Overwrite `lattice` with this snapshot.
    ///
    /// The snapshot must come from a lattice of the same shape: dimensions,
    /// mass and spring counts, which masses are anchors, and which masses each
    /// spring links all have to agree. Nothing is written unless every check
    /// passes.
    pub fn apply_to(&self, lattice: &mut Lattice) -> Result<(), GridError> {
        let checks = [
            ("columns", lattice.columns(), self.columns),
            ("rows", lattice.rows(), self.rows),
            ("masses", lattice.masses().len(), self.masses.len()),
            ("springs", lattice.springs().len(), self.springs.len()),
        ];
        for (what, expected, found) in checks {
            if expected != found {
                return Err(GridError::SnapshotMismatch {
                    what,
                    expected,
                    found,
                });
            }
        }

        let changed_mass = lattice
            .masses()
            .iter()
            .zip(&self.masses)
            .position(|(mass, state)| mass.inverse_mass() != state.inverse_mass);
        if let Some(index) = changed_mass {
            return Err(GridError::InvalidConfiguration(format!(
                "snapshot changes the inverse mass of mass {index}"
            )));
        }

        let relinked = lattice
            .springs()
            .iter()
            .zip(&self.springs)
            .position(|(spring, state)| {
                spring.end1() != state.end1
                    || spring.end2() != state.end2
                    || SpringKindState::from(spring.kind()) != state.kind
            });
        if let Some(index) = relinked {
            return Err(GridError::InvalidConfiguration(format!(
                "snapshot spring {index} links different masses than the lattice"
            )));
        }

        lattice.replace_state(
            self.masses.iter().map(PointMass::from).collect(),
            self.springs.iter().map(Spring::from).collect(),
        );
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, GridError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, GridError> {
        Ok(bincode::deserialize(bytes)?)
    }
}
