//! Per-frame line tessellation of the relaxed lattice
//!
//! Every cell with a left neighbour emits a horizontal edge and every cell
//! with an upper neighbour emits a vertical edge, starting one cell in from
//! the lattice origin. Cells with both neighbours add two filler midlines
//! between the surrounding edges. In `Smooth` mode an edge whose Catmull-Rom
//! midpoint strays more than one unit from the straight midpoint is split in
//! two at that curved midpoint.
//!
//! Rows are tessellated into independent buffers and concatenated, so a
//! segment's slot depends only on its row and position within the row.

use bevy::prelude::*;

use crate::config::{
    CATMULL_ROM_MIDPOINT, CURVATURE_THRESHOLD_SQ, DrawMode, GridConfig, OverflowPolicy,
    THICK_LINE_STRIDE,
};
use crate::grid::Lattice;
use crate::error::GridError;
use crate::math::{Point, Real, catmull_rom};

use super::projection::ScreenProjection;
use super::segment::{LineSegment, SegmentKind, TessellatedFrame};

/// Segment count of a `Quick` tessellation over a `columns x rows` lattice.
///
/// Horizontal edges skip the first column pair and the first row, vertical
/// edges skip the first row pair and the first column, and every cell with
/// both neighbours adds two fillers.
pub fn quick_segment_count(columns: usize, rows: usize) -> usize {
    let (c, r) = (columns.saturating_sub(1), rows.saturating_sub(1));
    let (c2, r2) = (columns.saturating_sub(2), rows.saturating_sub(2));
    c2 * r + c * r2 + 2 * c2 * r2
}

#[derive(Clone, Debug)]
pub struct Tessellator {
    pub draw_mode: DrawMode,
    pub min_line_width: Real,
    pub max_line_width: Real,
    pub inside_color: Color,
    pub outside_color: Color,
    pub max_segments: usize,
    pub overflow: OverflowPolicy,
}

impl Tessellator {
    pub fn from_config(config: &GridConfig) -> Self {
        Self {
            draw_mode: config.draw_mode,
            min_line_width: config.min_line_width,
            max_line_width: config.max_line_width,
            inside_color: config.inside_color,
            outside_color: config.outside_color,
            max_segments: config.max_segments,
            overflow: config.overflow,
        }
    }

    /// Project every movable mass, row-major.
    pub fn project<P: ScreenProjection + ?Sized>(lattice: &Lattice, projection: &P) -> Vec<Point> {
        lattice
            .points()
            .iter()
            .map(|mass| projection.project(mass.position))
            .collect()
    }

    pub fn tessellate<P: ScreenProjection + ?Sized>(
        &mut self,
        lattice: &Lattice,
        projection: &P,
    ) -> Result<TessellatedFrame, GridError> {
        let projected = Self::project(lattice, projection);
        let (columns, rows) = lattice.dimensions();

        let segments = (1..rows)
            .map(|row| {
                let mut buffer = Vec::with_capacity(4 * columns);
                self.tessellate_row(&projected, columns, rows, row, &mut buffer);
                buffer
            })
            .collect::<Vec<_>>()
            .concat();

        self.enforce_budget(segments)
    }

    /// Append the segments owned by `row` to `out`.
    pub fn tessellate_row(
        &self,
        projected: &[Point],
        columns: usize,
        rows: usize,
        row: usize,
        out: &mut Vec<LineSegment>,
    ) {
        let at = |column: usize, row: usize| projected[row * columns + column];

        for column in 1..columns {
            let point = at(column, row);

            if column > 1 {
                let left = at(column - 1, row);
                let before = at(column - 2, row);
                let after = at((column + 1).min(columns - 1), row);
                self.push_edge(out, [before, left, point, after], row % THICK_LINE_STRIDE == 1);
            }

            if row > 1 {
                let up = at(column, row - 1);
                let before = at(column, row - 2);
                let after = at(column, (row + 1).min(rows - 1));
                self.push_edge(out, [before, up, point, after], column % THICK_LINE_STRIDE == 1);
            }

            if column > 1 && row > 1 {
                let left = at(column - 1, row);
                let up = at(column, row - 1);
                let up_left = at(column - 1, row - 1);
                self.push_filler(out, 0.5 * (up_left + up), 0.5 * (left + point));
                self.push_filler(out, 0.5 * (up_left + left), 0.5 * (up + point));
            }
        }
    }

    /// `stencil` is `[before, from, to, after]` along one lattice line.
    fn push_edge(&self, out: &mut Vec<LineSegment>, stencil: [Point; 4], thick: bool) {
        let [before, from, to, after] = stencil;
        let (color, thickness) = if thick {
            (self.inside_color, self.max_line_width)
        } else {
            (self.outside_color, self.min_line_width)
        };
        let edge = |start, end| LineSegment {
            start,
            end,
            color,
            thickness,
            kind: SegmentKind::Edge,
        };

        if self.draw_mode == DrawMode::Smooth {
            let mid = catmull_rom(before, from, to, after, CATMULL_ROM_MIDPOINT);
            if mid.distance_squared((from + to) / 2.0) > CURVATURE_THRESHOLD_SQ {
                out.push(edge(from, mid));
                out.push(edge(mid, to));
                return;
            }
        }
        out.push(edge(from, to));
    }

    fn push_filler(&self, out: &mut Vec<LineSegment>, start: Point, end: Point) {
        out.push(LineSegment {
            start,
            end,
            color: self.outside_color,
            thickness: self.min_line_width,
            kind: SegmentKind::Filler,
        });
    }

    fn enforce_budget(&mut self, mut segments: Vec<LineSegment>) -> Result<TessellatedFrame, GridError> {
        let emitted = segments.len();
        let capacity = self.max_segments;
        if emitted <= capacity {
            return Ok(TessellatedFrame {
                segments,
                dropped: 0,
            });
        }

        match self.overflow {
            OverflowPolicy::Reject => {
                warn!("tessellation emitted {emitted} segments, budget is {capacity}");
                Err(GridError::SegmentBudgetExceeded { emitted, capacity })
            }
            OverflowPolicy::Grow => {
                warn!("tessellation emitted {emitted} segments, growing budget from {capacity}");
                self.max_segments = emitted;
                Ok(TessellatedFrame {
                    segments,
                    dropped: 0,
                })
            }
            OverflowPolicy::DropFiller => {
                let excess = emitted - capacity;
                let fillers = segments
                    .iter()
                    .filter(|segment| segment.kind == SegmentKind::Filler)
                    .count();
                if fillers < excess {
                    warn!(
                        "tessellation emitted {emitted} segments, budget is {capacity} \
                         and only {fillers} fillers can be dropped"
                    );
                    return Err(GridError::SegmentBudgetExceeded { emitted, capacity });
                }

                let mut keep = vec![true; emitted];
                let mut remaining = excess;
                for (index, segment) in segments.iter().enumerate().rev() {
                    if remaining == 0 {
                        break;
                    }
                    if segment.kind == SegmentKind::Filler {
                        keep[index] = false;
                        remaining -= 1;
                    }
                }
                let mut flags = keep.into_iter();
                segments.retain(|_| flags.next().unwrap_or(true));

                warn!("tessellation over budget by {excess}; dropped {excess} filler segments");
                Ok(TessellatedFrame {
                    segments,
                    dropped: excess,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::LatticeBuilder;
    use crate::render::FlatProjection;

    fn lattice(columns: usize, rows: usize) -> Lattice {
        let bounds = Rect::new(0.0, 0.0, (columns - 1) as f32 * 10.0, (rows - 1) as f32 * 10.0);
        LatticeBuilder::new(bounds, Vec2::splat(10.0)).build().unwrap()
    }

    #[test]
    fn closed_form_for_small_grids() {
        assert_eq!(quick_segment_count(2, 2), 0);
        assert_eq!(quick_segment_count(3, 2), 1);
        assert_eq!(quick_segment_count(3, 3), 2 + 2 + 2);
        assert_eq!(quick_segment_count(5, 5), 42);
    }

    #[test]
    fn thick_rows_use_inside_style() {
        let config = GridConfig::default().with_draw_mode(DrawMode::Quick);
        let tessellator = Tessellator::from_config(&config);
        let lattice = lattice(4, 4);
        let projected = Tessellator::project(&lattice, &FlatProjection);

        let mut row_one = Vec::new();
        tessellator.tessellate_row(&projected, 4, 4, 1, &mut row_one);
        // Row 1 has horizontal edges only, and 1 % 3 == 1 marks them thick.
        assert_eq!(row_one.len(), 2);
        assert!(row_one.iter().all(|segment| segment.thickness == config.max_line_width
            && segment.color == config.inside_color));

        let mut row_two = Vec::new();
        tessellator.tessellate_row(&projected, 4, 4, 2, &mut row_two);
        let horizontal: Vec<_> = row_two
            .iter()
            .filter(|segment| segment.kind == SegmentKind::Edge && segment.start.y == segment.end.y)
            .collect();
        assert!(horizontal.iter().all(|segment| segment.thickness == config.min_line_width
            && segment.color == config.outside_color));
    }

    #[test]
    fn fillers_sit_between_lattice_lines() {
        let tessellator = Tessellator::from_config(&GridConfig::default().with_draw_mode(DrawMode::Quick));
        let lattice = lattice(3, 3);
        let projected = Tessellator::project(&lattice, &FlatProjection);

        let mut out = Vec::new();
        tessellator.tessellate_row(&projected, 3, 3, 2, &mut out);
        let fillers: Vec<_> = out
            .iter()
            .filter(|segment| segment.kind == SegmentKind::Filler)
            .collect();

        assert_eq!(fillers.len(), 2);
        assert_eq!(fillers[0].start, Vec2::new(15.0, 10.0));
        assert_eq!(fillers[0].end, Vec2::new(15.0, 20.0));
        assert_eq!(fillers[1].start, Vec2::new(10.0, 15.0));
        assert_eq!(fillers[1].end, Vec2::new(20.0, 15.0));
    }

    #[test]
    fn sharp_bend_is_split_in_smooth_mode() {
        let mut lattice = lattice(5, 5);
        lattice.point_mut(2, 2).position.y += 40.0;

        let mut smooth = Tessellator::from_config(&GridConfig::default());
        let mut quick = Tessellator::from_config(&GridConfig::default().with_draw_mode(DrawMode::Quick));

        let smooth_frame = smooth.tessellate(&lattice, &FlatProjection).unwrap();
        let quick_frame = quick.tessellate(&lattice, &FlatProjection).unwrap();
        assert!(smooth_frame.len() > quick_frame.len());
        assert_eq!(quick_frame.len(), quick_segment_count(5, 5));
    }

    #[test]
    fn drop_filler_sheds_from_the_end() {
        let lattice = lattice(5, 5);
        let mut tessellator = Tessellator::from_config(
            &GridConfig::default()
                .with_draw_mode(DrawMode::Quick)
                .with_max_segments(40),
        );

        let frame = tessellator.tessellate(&lattice, &FlatProjection).unwrap();
        assert_eq!(frame.len(), 40);
        assert_eq!(frame.dropped, 2);
        assert_eq!(frame.count_of_kind(SegmentKind::Filler), 16);
        assert_eq!(frame.count_of_kind(SegmentKind::Edge), 24);
    }
}
