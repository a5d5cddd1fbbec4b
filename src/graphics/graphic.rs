use crate::cache::render_cache::RenderCache;
use crate::foundation::core::{BezPath, Rect};
use crate::graphics::snapshot::Snapshot;
use crate::render::canvas::Canvas;

/// A drawable node in a layer's content.
///
/// All methods take the per-thread [`RenderCache`] of the render pass they run in.
pub trait Graphic {
    /// Local-space extent of everything the graphic can draw.
    fn measure_bounds(&self) -> Rect;

    /// Whether `(x, y)` in local space hits the graphic.
    fn hit_test(&self, _cache: &mut RenderCache, _x: f64, _y: f64) -> bool {
        true
    }

    /// Vector outline, for graphics that have one.
    fn get_path(&self) -> Option<BezPath> {
        None
    }

    /// Warm up resources ahead of drawing.
    fn prepare(&self, _cache: &mut RenderCache) {}

    fn draw(&self, canvas: &mut Canvas, cache: &mut RenderCache);

    /// Render at `scale` into a standalone snapshot; `None` when rendering fails.
    fn make_snapshot(&self, cache: &mut RenderCache, scale: f64) -> Option<Snapshot>;
}
