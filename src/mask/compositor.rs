use std::sync::Arc;

use crate::effects::blur::GaussianBlurFilter;
use crate::effects::filter::{EdgeMode, FilterSource, FilterTarget, LayerFilter};
use crate::foundation::core::{Frame, PixelSize, Rect, Vec2};
use crate::foundation::error::{FeatherError, FeatherResult};
use crate::graphics::snapshot::Snapshot;
use crate::mask::descriptor::MaskData;
use crate::mask::opts::FeatherOpts;
use crate::mask::plan::plan_masks;
use crate::mask::raster::rasterize_mask;
use crate::render::context::RenderContext;

/// Render the feathered union of `masks` at `frame` into a snapshot.
///
/// `bounds` is the local extent measured for this mask set; the accumulation surface covers it at
/// `scale`. Each contributing mask is rasterized on its own surface, blurred, and merged into the
/// accumulation with its blend. Inverted masks are blurred with clamped edges so the complement
/// stays solid out to the layer edge. Any failure aborts the whole composite: no partial result is
/// returned, and every surface taken from `ctx` has been handed back by the time this returns.
#[tracing::instrument(skip(masks, ctx), fields(mask_count = masks.len()))]
pub fn composite_feather_masks(
    masks: &[Arc<MaskData>],
    frame: Frame,
    bounds: Rect,
    opts: &FeatherOpts,
    ctx: &mut RenderContext,
    scale: f64,
) -> FeatherResult<Snapshot> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(FeatherError::validation(format!(
            "scale factor must be finite and > 0, got {scale}"
        )));
    }
    opts.validate()?;

    let mut accum = ctx.make_surface(PixelSize::covering(bounds, scale))?;

    let mut filter = GaussianBlurFilter::new(opts.feather_radius, scale);
    filter.initialize(ctx)?;

    let plan = plan_masks(masks, frame);
    tracing::debug!(planned = plan.len(), "masks planned");

    for mask in &plan {
        let raster = rasterize_mask(ctx, mask, bounds, scale)?;
        // An inverted raster fills the whole accumulation; its outer edge is the layer edge.
        let edges = if mask.inverted {
            EdgeMode::Clamp
        } else {
            EdgeMode::Transparent
        };
        filter.update(frame, raster.region, bounds, Vec2::new(scale, scale));
        filter.draw(
            ctx,
            &FilterSource::new(&raster.surface).with_edges(edges),
            &mut FilterTarget {
                surface: &mut accum,
                blend: mask.blend,
            },
        )?;
    }

    let texture = accum.into_texture()?;
    Ok(Snapshot::new(texture, scale))
}

#[cfg(test)]
#[path = "../../tests/unit/mask/compositor.rs"]
mod tests;
