use kurbo::{Cap, Join, Stroke, StrokeOpts};

use crate::foundation::core::{Affine, PixelSize, Rect};
use crate::foundation::error::FeatherResult;
use crate::foundation::math::mul_div255_u8;
use crate::mask::plan::PreparedMask;
use crate::render::context::{RenderContext, Surface};

const STROKE_TOLERANCE: f64 = 0.1;

/// Coverage of one mask, isolated on its own surface.
pub(crate) struct MaskRaster {
    pub(crate) surface: Surface,
    /// Local-space rectangle the surface covers.
    pub(crate) region: Rect,
}

/// Rasterize `mask` at `scale` as premultiplied white coverage.
///
/// Expansion is applied geometrically: a round-joined band of width `2·|expansion|` around the
/// outline is added to (or removed from) the interior. Inverted masks cover `feather_bounds`.
pub(crate) fn rasterize_mask(
    ctx: &mut RenderContext,
    mask: &PreparedMask,
    feather_bounds: Rect,
    scale: f64,
) -> FeatherResult<MaskRaster> {
    let path = mask.path.bez_path();
    let grow = mask.expansion.max(0.0);
    let region = if mask.inverted {
        feather_bounds
    } else {
        mask.path
            .bounds()
            .map_or(Rect::ZERO, |b| b.inflate(grow, grow))
    };
    let (region, size) = snap_to_pixels(region, scale);
    let to_pixels = Affine::scale(scale) * Affine::translate(-region.origin().to_vec2());

    let mut surface = ctx.make_surface(size)?;
    ctx.fill_path(&mut surface, path, to_pixels)?;

    if mask.expansion != 0.0 {
        let style = Stroke::new(2.0 * mask.expansion.abs())
            .with_join(Join::Round)
            .with_caps(Cap::Round);
        let band = kurbo::stroke(
            path.elements().iter().copied(),
            &style,
            &StrokeOpts::default(),
            STROKE_TOLERANCE,
        );
        let mut band_surface = ctx.make_surface(size)?;
        ctx.fill_path(&mut band_surface, &band, to_pixels)?;

        let grow = mask.expansion > 0.0;
        for (d, b) in surface
            .data_mut()
            .chunks_exact_mut(4)
            .zip(band_surface.data().chunks_exact(4))
        {
            let a = u16::from(d[3]);
            let b = u16::from(b[3]);
            let v = if grow {
                (a + b).saturating_sub(u16::from(mul_div255_u8(a, b))).min(255) as u8
            } else {
                mul_div255_u8(a, 255 - b)
            };
            d.fill(v);
        }
    }

    if mask.inverted {
        for px in surface.data_mut().chunks_exact_mut(4) {
            let v = 255 - px[3];
            px.fill(v);
        }
    }

    Ok(MaskRaster { surface, region })
}

/// Grow `rect` outward to the pixel grid at `scale`, never below one pixel.
fn snap_to_pixels(rect: Rect, scale: f64) -> (Rect, PixelSize) {
    let x0 = (rect.x0 * scale).floor();
    let y0 = (rect.y0 * scale).floor();
    let x1 = (rect.x1 * scale).ceil().max(x0 + 1.0);
    let y1 = (rect.y1 * scale).ceil().max(y0 + 1.0);
    let size = PixelSize::new((x1 - x0) as u32, (y1 - y0) as u32);
    (Rect::new(x0 / scale, y0 / scale, x1 / scale, y1 / scale), size)
}

#[cfg(test)]
#[path = "../../tests/unit/mask/raster.rs"]
mod tests;
