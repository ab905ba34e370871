use bevy::prelude::*;

use crate::error::GridError;
use crate::math::Real;

use super::constants::*;

/// Stiffness and damping pair shared by every spring of one kind.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringParams {
    pub stiffness: Real,
    pub damping: Real,
}

impl SpringParams {
    pub const fn new(stiffness: Real, damping: Real) -> Self {
        Self { stiffness, damping }
    }
}

/// How the lattice is pinned to its fixed anchor points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnchorConfig {
    /// Springs tying every border cell to its anchor.
    pub border: SpringParams,
    /// Loose springs tying every `interior_stride`-th interior cell to its anchor.
    pub interior: SpringParams,
    pub interior_stride: usize,
    /// Springs between horizontally and vertically adjacent cells.
    pub structural: SpringParams,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            border: SpringParams::new(BORDER_ANCHOR_STIFFNESS, BORDER_ANCHOR_DAMPING),
            interior: SpringParams::new(INTERIOR_ANCHOR_STIFFNESS, INTERIOR_ANCHOR_DAMPING),
            interior_stride: INTERIOR_ANCHOR_STRIDE,
            structural: SpringParams::new(STRUCTURAL_STIFFNESS, STRUCTURAL_DAMPING),
        }
    }
}

/// Tessellation strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DrawMode {
    /// One straight segment per lattice edge.
    Quick,
    /// Split visibly bent edges at their Catmull-Rom midpoint.
    #[default]
    Smooth,
}

impl DrawMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Quick => Self::Smooth,
            Self::Smooth => Self::Quick,
        }
    }
}

/// What to do when a frame holds more segments than `max_segments`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Shed filler segments from the end of the frame until it fits.
    #[default]
    DropFiller,
    /// Keep everything and raise the budget to the emitted count.
    Grow,
    /// Fail the frame with `GridError::SegmentBudgetExceeded`.
    Reject,
}

/// Grid settings recognised by the simulation
#[derive(Resource, Clone, Debug)]
pub struct GridConfig {
    /// World-space rectangle covered by the lattice.
    pub bounds: Rect,
    /// Distance between neighbouring point masses along each axis.
    pub spacing: Vec2,
    pub min_line_width: Real,
    pub max_line_width: Real,
    /// Maximum number of line segments the renderer accepts per frame.
    pub max_segments: usize,
    pub draw_mode: DrawMode,
    pub inside_color: Color,
    pub outside_color: Color,
    pub overflow: OverflowPolicy,
    pub anchors: AnchorConfig,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            bounds: Rect::new(0.0, 0.0, 320.0, 240.0),
            spacing: Vec2::new(16.0, 16.0),
            min_line_width: DEFAULT_MIN_LINE_WIDTH,
            max_line_width: DEFAULT_MAX_LINE_WIDTH,
            max_segments: DEFAULT_MAX_SEGMENTS,
            draw_mode: DrawMode::Smooth,
            inside_color: Color::srgb(1.0, 0.0, 0.0),
            outside_color: Color::srgb(0.0, 0.0, 1.0),
            overflow: OverflowPolicy::DropFiller,
            anchors: AnchorConfig::default(),
        }
    }
}

impl GridConfig {
    pub fn new(bounds: Rect, spacing: Vec2) -> Self {
        Self {
            bounds,
            spacing,
            ..Default::default()
        }
    }

    pub fn with_line_widths(mut self, min: Real, max: Real) -> Self {
        self.min_line_width = min;
        self.max_line_width = max;
        self
    }

    pub fn with_max_segments(mut self, max_segments: usize) -> Self {
        self.max_segments = max_segments;
        self
    }

    pub fn with_draw_mode(mut self, draw_mode: DrawMode) -> Self {
        self.draw_mode = draw_mode;
        self
    }

    pub fn with_colors(mut self, inside: Color, outside: Color) -> Self {
        self.inside_color = inside;
        self.outside_color = outside;
        self
    }

    pub fn with_overflow(mut self, overflow: OverflowPolicy) -> Self {
        self.overflow = overflow;
        self
    }

    pub fn with_anchors(mut self, anchors: AnchorConfig) -> Self {
        self.anchors = anchors;
        self
    }

    /// Lattice dimensions as `(columns, rows)`.
    ///
    /// Only meaningful once `validate` has accepted the spacing. Counts that do
    /// not fit a `usize` saturate instead of overflowing.
    pub fn dimensions(&self) -> (usize, usize) {
        let (columns, rows) = self.extent();
        (columns as usize, rows as usize)
    }

    fn extent(&self) -> (f64, f64) {
        let columns = (self.bounds.width() as f64 / self.spacing.x as f64).floor() + 1.0;
        let rows = (self.bounds.height() as f64 / self.spacing.y as f64).floor() + 1.0;
        (columns, rows)
    }

    pub fn validate(&self) -> Result<(), GridError> {
        let spacing = self.spacing;
        if !spacing.is_finite() || spacing.x <= 0.0 || spacing.y <= 0.0 {
            return Err(GridError::InvalidConfiguration(format!(
                "spacing must be positive and finite, got ({}, {})",
                spacing.x, spacing.y
            )));
        }

        let size = self.bounds.size();
        if !self.bounds.min.is_finite() || !size.is_finite() {
            return Err(GridError::InvalidConfiguration(
                "bounds must be finite".to_string(),
            ));
        }

        let (columns, rows) = self.extent();
        if columns * rows > MAX_LATTICE_CELLS as f64 {
            return Err(GridError::InvalidConfiguration(format!(
                "lattice of {columns}x{rows} cells exceeds the {MAX_LATTICE_CELLS} cell limit"
            )));
        }

        let (columns, rows) = self.dimensions();
        if columns < 2 || rows < 2 {
            return Err(GridError::InvalidConfiguration(format!(
                "lattice must be at least 2x2, got {columns}x{rows}"
            )));
        }

        if self.min_line_width < 0.0 || self.min_line_width > self.max_line_width {
            return Err(GridError::InvalidConfiguration(format!(
                "line widths must satisfy 0 <= min <= max, got [{}, {}]",
                self.min_line_width, self.max_line_width
            )));
        }

        if self.max_segments == 0 {
            return Err(GridError::InvalidConfiguration(
                "max_segments must be at least 1".to_string(),
            ));
        }

        if self.anchors.interior_stride == 0 {
            return Err(GridError::InvalidConfiguration(
                "interior anchor stride must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
