//! Raster rendering of the hero scene.

pub(crate) mod gradient;
pub(crate) mod label;
pub(crate) mod raster;
pub(crate) mod scene;

/// The visible rendering area in device pixels.
///
/// Resize events republish this; a non-positive dimension marks a
/// degenerate viewport that renderers must skip rather than divide by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Viewport {
    pub(crate) width: i32,
    pub(crate) height: i32,
}

impl Viewport {
    pub(crate) fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub(crate) fn is_degenerate(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}
