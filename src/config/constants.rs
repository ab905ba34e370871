// Physical and drawing constants for the warping grid
use crate::math::Real;

// Point mass integration
pub const BASE_DAMPING: Real = 0.98;
pub const VELOCITY_SNAP_EPSILON: Real = 1.0e-3;

// Damping multiplier applied to masses caught in an implosion/explosion
pub const IMPACT_DAMPING: Real = 0.6;

// Springs rest slightly shorter than their initial separation
pub const REST_LENGTH_FACTOR: Real = 0.95;

// Lattice anchoring
pub const BORDER_ANCHOR_STIFFNESS: Real = 0.1;
pub const BORDER_ANCHOR_DAMPING: Real = 0.1;
pub const INTERIOR_ANCHOR_STIFFNESS: Real = 0.002;
pub const INTERIOR_ANCHOR_DAMPING: Real = 0.02;
pub const INTERIOR_ANCHOR_STRIDE: usize = 3;
pub const STRUCTURAL_STIFFNESS: Real = 0.28;
pub const STRUCTURAL_DAMPING: Real = 0.06;

// Force falloff
pub const DIRECTED_FALLOFF: Real = 10.0;
pub const IMPLOSIVE_SCALE: Real = 10.0;
pub const IMPLOSIVE_FALLOFF: Real = 100.0;
pub const EXPLOSIVE_SCALE: Real = 100.0;
pub const EXPLOSIVE_FALLOFF: Real = 10_000.0;

// Tessellation
pub const THICK_LINE_STRIDE: usize = 3;
pub const CATMULL_ROM_MIDPOINT: Real = 0.5;
pub const CURVATURE_THRESHOLD_SQ: Real = 1.0;
pub const PERSPECTIVE_FOCAL_DEPTH: Real = 2000.0;

// Largest lattice accepted by `GridConfig::validate`
pub const MAX_LATTICE_CELLS: usize = 1 << 22;

// Renderer pool
pub const DEFAULT_MAX_SEGMENTS: usize = 1520;
pub const DEFAULT_MIN_LINE_WIDTH: Real = 0.01;
pub const DEFAULT_MAX_LINE_WIDTH: Real = 0.03;
