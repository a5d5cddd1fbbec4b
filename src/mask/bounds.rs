use std::sync::Arc;

use crate::{
    foundation::core::{Frame, Rect},
    mask::descriptor::MaskData,
};

/// Measure the local-space rectangle a feathered composite of `masks` needs at `frame`.
///
/// The result is anchored at the origin and spans the furthest right and bottom edge of any mask,
/// each path grown by its positive expansion, then scaled by `1 + margin` to leave room for the
/// blur spread. Masks with no usable path at `frame` are skipped; when none has one the extent is
/// zero.
pub fn measure_feather_mask_bounds(masks: &[Arc<MaskData>], frame: Frame, margin: f64) -> Rect {
    let mut max_right = 0.0f64;
    let mut max_bottom = 0.0f64;

    for (index, mask) in masks.iter().enumerate() {
        let path = match mask.path_at(frame) {
            Ok(Some(p)) => p,
            Ok(None) => continue,
            Err(e) => {
                tracing::debug!(index, error = %e, "mask path not sampleable; excluded from bounds");
                continue;
            }
        };
        let Some(bounds) = path.bounds() else {
            continue;
        };
        let grow = mask.expansion_at(frame).unwrap_or(0.0).max(0.0);
        let bounds = bounds.inflate(grow, grow);

        if bounds.x1 > max_right {
            max_right = bounds.x1;
        }
        if bounds.y1 > max_bottom {
            max_bottom = bounds.y1;
        }
    }

    let scale = 1.0 + margin.max(0.0);
    Rect::new(0.0, 0.0, max_right * scale, max_bottom * scale)
}

#[cfg(test)]
#[path = "../../tests/unit/mask/bounds.rs"]
mod tests;
