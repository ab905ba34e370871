//! Simulation-to-screen transforms
//!
//! The physics core never looks at the viewport. Tessellation receives a
//! `ScreenProjection` and projects every mass once per frame.

use bevy::math::{Vec2, Vec3};

use crate::config::PERSPECTIVE_FOCAL_DEPTH;
use crate::math::{Point, Real, Vector};

pub trait ScreenProjection: Send + Sync {
    fn project(&self, position: Vector) -> Point;
}

/// Any `Fn(Vec3) -> Vec2` closure can act as a projection.
impl<F> ScreenProjection for F
where
    F: Fn(Vector) -> Point + Send + Sync,
{
    fn project(&self, position: Vector) -> Point {
        self(position)
    }
}

/// Drops depth.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlatProjection;

impl ScreenProjection for FlatProjection {
    fn project(&self, position: Vector) -> Point {
        position.truncate()
    }
}

/// Scales positions toward `center` by `(z + focal_depth) / focal_depth`, so
/// masses pushed toward the viewer spread out and masses pushed away bunch up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DepthPerspective {
    pub center: Vec2,
    pub focal_depth: Real,
}

impl DepthPerspective {
    pub fn new(center: Vec2) -> Self {
        Self {
            center,
            focal_depth: PERSPECTIVE_FOCAL_DEPTH,
        }
    }

    /// Screen-pixel coordinates with the origin in a corner.
    pub fn from_screen_size(screen_size: Vec2) -> Self {
        Self::new(screen_size / 2.0)
    }
}

impl Default for DepthPerspective {
    fn default() -> Self {
        Self::new(Vec2::ZERO)
    }
}

impl ScreenProjection for DepthPerspective {
    fn project(&self, position: Vec3) -> Point {
        let factor = (position.z + self.focal_depth) / self.focal_depth;
        (position.truncate() - self.center) * factor + self.center
    }
}
