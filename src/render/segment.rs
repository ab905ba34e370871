use bevy::prelude::*;

use crate::error::GridError;
use crate::math::{Point, Real};

/// Drawing priority of a segment. Fillers go first when a frame is over budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// Follows a lattice edge, possibly split at its curved midpoint.
    Edge,
    /// Midline between two lattice edges, drawn for visual density only.
    Filler,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineSegment {
    pub start: Point,
    pub end: Point,
    pub color: Color,
    pub thickness: Real,
    pub kind: SegmentKind,
}

impl LineSegment {
    pub fn length(&self) -> Real {
        self.start.distance(self.end)
    }

    pub fn midpoint(&self) -> Point {
        (self.start + self.end) * 0.5
    }

    /// Angle of the segment in radians, measured from +X.
    pub fn angle(&self) -> Real {
        let heading = self.end - self.start;
        heading.y.atan2(heading.x)
    }
}

/// External drawing collaborator; accepts at most `capacity` segments per frame.
pub trait SegmentRenderer {
    fn capacity(&self) -> usize;
    fn draw(&mut self, segment: &LineSegment);
}

/// Segments produced by one tessellation pass, in slot order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TessellatedFrame {
    pub segments: Vec<LineSegment>,
    /// Filler segments shed to stay within the segment budget.
    pub dropped: usize,
}

impl TessellatedFrame {
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LineSegment> {
        self.segments.iter()
    }

    pub fn count_of_kind(&self, kind: SegmentKind) -> usize {
        self.segments.iter().filter(|segment| segment.kind == kind).count()
    }

    /// Hand every segment to `renderer`. Refuses up front rather than drawing
    /// a partial frame when the renderer cannot hold all of it.
    pub fn render_into<R: SegmentRenderer + ?Sized>(&self, renderer: &mut R) -> Result<(), GridError> {
        let capacity = renderer.capacity();
        if self.segments.len() > capacity {
            return Err(GridError::SegmentBudgetExceeded {
                emitted: self.segments.len(),
                capacity,
            });
        }

        for segment in &self.segments {
            renderer.draw(segment);
        }
        Ok(())
    }
}
