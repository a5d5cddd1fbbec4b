use std::sync::Arc;

use crate::cache::fingerprint::{InputFingerprint, fingerprint_masks};
use crate::cache::render_cache::RenderCache;
use crate::effects::blur::GaussianBlurFilter;
use crate::effects::filter::LayerFilter;
use crate::foundation::core::{AssetId, Frame, Rect};
use crate::foundation::error::FeatherResult;
use crate::graphics::graphic::Graphic;
use crate::graphics::snapshot::Snapshot;
use crate::mask::bounds::measure_feather_mask_bounds;
use crate::mask::compositor::composite_feather_masks;
use crate::mask::descriptor::MaskData;
use crate::mask::opts::FeatherOpts;
use crate::render::canvas::Canvas;

/// Soft-edged alpha coverage of a layer's mask set at one point in time.
///
/// Bounds and the input fingerprint are measured once at construction. Rendering goes through the
/// snapshot cache under `asset_id`.
#[derive(Clone, Debug)]
pub struct FeatherMask {
    asset_id: AssetId,
    masks: Arc<[Arc<MaskData>]>,
    layer_frame: Frame,
    opts: FeatherOpts,
    bounds: Rect,
    fingerprint: InputFingerprint,
}

impl FeatherMask {
    /// Build a feathered mask with default options; `None` for an empty mask set.
    pub fn make_from(asset_id: AssetId, masks: &[Arc<MaskData>], layer_frame: Frame) -> Option<Self> {
        Self::make_from_with_opts(asset_id, masks, layer_frame, FeatherOpts::default())
    }

    /// Build a feathered mask with explicit options; `None` for an empty mask set.
    pub fn make_from_with_opts(
        asset_id: AssetId,
        masks: &[Arc<MaskData>],
        layer_frame: Frame,
        opts: FeatherOpts,
    ) -> Option<Self> {
        if masks.is_empty() {
            return None;
        }
        let bounds = measure_feather_mask_bounds(masks, layer_frame, opts.bounds_margin);
        if !opts.feather_fits(bounds) {
            tracing::warn!(
                asset = asset_id.0,
                radius = opts.feather_radius,
                margin = opts.bounds_margin,
                "bounds margin is narrower than the feather; right and bottom edges will be clipped"
            );
        }
        let fingerprint = fingerprint_masks(masks, layer_frame, &opts);
        Some(Self {
            asset_id,
            masks: masks.into(),
            layer_frame,
            opts,
            bounds,
            fingerprint,
        })
    }

    pub fn asset_id(&self) -> AssetId {
        self.asset_id
    }

    pub fn layer_frame(&self) -> Frame {
        self.layer_frame
    }

    pub fn masks(&self) -> &[Arc<MaskData>] {
        &self.masks
    }

    pub fn opts(&self) -> &FeatherOpts {
        &self.opts
    }

    pub fn fingerprint(&self) -> InputFingerprint {
        self.fingerprint
    }

    fn render(&self, cache: &mut RenderCache, scale: f64) -> FeatherResult<Snapshot> {
        let snapshot = composite_feather_masks(
            &self.masks,
            self.layer_frame,
            self.bounds,
            &self.opts,
            cache.context_mut(),
            scale,
        )?;
        Ok(snapshot.with_fingerprint(self.fingerprint))
    }

    fn cached_snapshot(&self, cache: &mut RenderCache) -> Option<Arc<Snapshot>> {
        let snapshot = cache.get_snapshot(self.asset_id)?;
        match snapshot.fingerprint() {
            Some(fp) if fp != self.fingerprint => {
                tracing::debug!(asset = self.asset_id.0, "cached snapshot is stale; ignored");
                None
            }
            _ => Some(snapshot),
        }
    }
}

impl Graphic for FeatherMask {
    fn measure_bounds(&self) -> Rect {
        self.bounds
    }

    fn prepare(&self, cache: &mut RenderCache) {
        let mut filter = GaussianBlurFilter::new(self.opts.feather_radius, 1.0);
        if let Err(e) = filter.initialize(cache.context_mut()) {
            tracing::debug!(asset = self.asset_id.0, error = %e, "blur warm-up failed");
        }
    }

    fn draw(&self, canvas: &mut Canvas, cache: &mut RenderCache) {
        if let Some(snapshot) = self.cached_snapshot(cache) {
            canvas.draw_snapshot(&snapshot);
            return;
        }
        match self.render(cache, 1.0) {
            Ok(snapshot) => canvas.draw_snapshot(&snapshot),
            Err(e) => {
                tracing::warn!(asset = self.asset_id.0, error = %e, "feather mask not drawn");
            }
        }
    }

    #[tracing::instrument(skip(self, cache), fields(asset = self.asset_id.0))]
    fn make_snapshot(&self, cache: &mut RenderCache, scale: f64) -> Option<Snapshot> {
        match self.render(cache, scale) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                tracing::warn!(error = %e, "feather mask snapshot failed");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graphics/feather_mask.rs"]
mod tests;
