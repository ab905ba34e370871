//! Line geometry derived from the lattice each frame

pub mod projection;
pub mod segment;
pub mod tessellator;

pub use projection::{DepthPerspective, FlatProjection, ScreenProjection};
pub use segment::{LineSegment, SegmentKind, SegmentRenderer, TessellatedFrame};
pub use tessellator::{Tessellator, quick_segment_count};
