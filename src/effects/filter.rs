use crate::effects::composite::MaskBlend;
use crate::foundation::core::{Frame, Rect, Vec2};
use crate::foundation::error::FeatherResult;
use crate::render::context::{RenderContext, Surface};

/// How a filter samples past the edge of its source raster.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EdgeMode {
    /// Outside pixels are transparent; the output may spread past the source.
    #[default]
    Transparent,
    /// Outside pixels repeat the nearest edge pixel; the output keeps the source extent.
    Clamp,
}

/// Raster handed to a filter as input.
pub struct FilterSource<'a> {
    pub surface: &'a Surface,
    pub edges: EdgeMode,
}

impl<'a> FilterSource<'a> {
    /// Source sampled with transparent edges.
    pub fn new(surface: &'a Surface) -> Self {
        Self {
            surface,
            edges: EdgeMode::Transparent,
        }
    }

    pub fn with_edges(mut self, edges: EdgeMode) -> Self {
        self.edges = edges;
        self
    }
}

/// Surface a filter draws into, and how its output merges with what is already there.
pub struct FilterTarget<'a> {
    pub surface: &'a mut Surface,
    pub blend: MaskBlend,
}

/// A layer filter with a fixed lifecycle: initialize once, then update and draw per input.
///
/// `update` describes where the next source sits relative to the target, in local units; the
/// filter turns that into a pixel placement at the given scale.
pub trait LayerFilter {
    /// Acquire any resources the filter needs. Failing here aborts the whole composite.
    fn initialize(&mut self, ctx: &mut RenderContext) -> FeatherResult<()>;

    fn update(&mut self, frame: Frame, source_bounds: Rect, target_bounds: Rect, scale: Vec2);

    /// Filter `source` and merge the result into `target`.
    fn draw(
        &mut self,
        ctx: &mut RenderContext,
        source: &FilterSource<'_>,
        target: &mut FilterTarget<'_>,
    ) -> FeatherResult<()>;
}
