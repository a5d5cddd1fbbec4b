pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Layer-local animation time, in frames.
///
/// Signed because layer time runs before the layer's start point when a layer is offset in its
/// parent composition.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Frame(pub i64);

impl Frame {
    /// Frame zero.
    pub const ZERO: Self = Self(0);

    /// Shift by `delta` frames using saturating arithmetic.
    pub fn offset(self, delta: i64) -> Self {
        Self(self.0.saturating_add(delta))
    }
}

/// Opaque identity of a renderable asset.
///
/// This is the key snapshots are cached under; two graphics that share an id must render the same
/// pixels at the same scale.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct AssetId(pub u64);

/// Pixel dimensions of a raster surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelSize {
    /// Build a size from explicit dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Size needed to hold `rect` at `scale`, rounding up and never collapsing below one pixel.
    pub fn covering(rect: Rect, scale: f64) -> Self {
        Self {
            width: crate::foundation::math::ceil_px(rect.width() * scale),
            height: crate::foundation::math::ceil_px(rect.height() * scale),
        }
    }

    /// Number of bytes in a tightly packed RGBA8 buffer of this size.
    pub fn byte_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4)
    }
}
