use bytemuck::{Pod, Zeroable};

/// Rectangle of the complex plane mapped onto the raster.
///
/// `(x0, y0)` is the top-left corner, `(x1, y1)` the bottom-right.
/// Shared read-only by every worker for the duration of a computation.
#[repr(C)]
#[derive(Pod, Zeroable, Clone, Copy, Debug, PartialEq)]
pub struct Region {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Region {
    /// The classic full-set view.
    pub const DEFAULT_VIEW: Self = Region {
        x0: -2.0,
        y0: -1.0,
        x1: 1.0,
        y1: 1.0,
    };

    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }
}
