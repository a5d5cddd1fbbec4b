use std::sync::Arc;

use rayon::prelude::*;

use crate::effects::composite::blend_mask_at;
use crate::effects::filter::{EdgeMode, FilterSource, FilterTarget, LayerFilter};
use crate::foundation::core::{Frame, PixelSize, Rect, Vec2};
use crate::foundation::error::{FeatherError, FeatherResult};
use crate::render::context::RenderContext;

/// Largest blur radius, in pixels, the filter accepts.
pub const MAX_BLUR_RADIUS_PX: u32 = 256;

/// Gaussian feather filter over premultiplied RGBA8 rasters.
///
/// The radius is given in local units and converted to pixels with the render scale. With
/// transparent edges the source is padded by the pixel radius so the blur spreads past the source
/// edge. With clamped edges the output keeps the source extent. Either way the result is merged into
/// the target at the source's placement, and every scratch raster comes from the context's pool.
#[derive(Debug)]
pub struct GaussianBlurFilter {
    radius: f64,
    scale: f64,
    radius_px: u32,
    kernel: Option<Arc<Vec<u32>>>,
    placement: (i64, i64),
}

impl GaussianBlurFilter {
    pub fn new(radius: f64, scale: f64) -> Self {
        Self {
            radius,
            scale,
            radius_px: 0,
            kernel: None,
            placement: (0, 0),
        }
    }

    /// Radius in pixels after [`LayerFilter::initialize`]; zero before.
    pub fn radius_px(&self) -> u32 {
        self.radius_px
    }
}

impl LayerFilter for GaussianBlurFilter {
    fn initialize(&mut self, ctx: &mut RenderContext) -> FeatherResult<()> {
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(FeatherError::filter(format!(
                "blur radius must be finite and >= 0, got {}",
                self.radius
            )));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(FeatherError::filter(format!(
                "blur scale must be finite and > 0, got {}",
                self.scale
            )));
        }
        let r = (self.radius * self.scale).ceil();
        if r > f64::from(MAX_BLUR_RADIUS_PX) {
            return Err(FeatherError::filter(format!(
                "blur radius {r}px exceeds {MAX_BLUR_RADIUS_PX}px"
            )));
        }
        let radius_px = r as u32;
        let sigma = radius_px as f32 / 3.0;
        self.kernel = Some(ctx.blur_kernel(radius_px, sigma)?);
        self.radius_px = radius_px;
        Ok(())
    }

    fn update(&mut self, _frame: Frame, source_bounds: Rect, target_bounds: Rect, scale: Vec2) {
        let x = ((source_bounds.x0 - target_bounds.x0) * scale.x).round() as i64;
        let y = ((source_bounds.y0 - target_bounds.y0) * scale.y).round() as i64;
        self.placement = (x, y);
    }

    fn draw(
        &mut self,
        ctx: &mut RenderContext,
        source: &FilterSource<'_>,
        target: &mut FilterTarget<'_>,
    ) -> FeatherResult<()> {
        let kernel = self
            .kernel
            .clone()
            .ok_or_else(|| FeatherError::filter("blur filter used before initialize"))?;
        let target_size = target.surface.size();

        if self.radius_px == 0 {
            let src = source.surface;
            return blend_mask_at(
                target.surface.data_mut(),
                target_size,
                src.data(),
                src.size(),
                self.placement,
                target.blend,
            );
        }

        let ss = source.surface.size();
        let (blurred, placement) = match source.edges {
            EdgeMode::Clamp => {
                let mut tmp = ctx.make_surface(ss)?;
                let mut out = ctx.make_surface(ss)?;
                let edges = EdgeMode::Clamp;
                horizontal_blur_q16(source.surface.data(), tmp.data_mut(), ss, &kernel, edges);
                vertical_blur_q16(tmp.data(), out.data_mut(), ss, &kernel, edges);
                (out, self.placement)
            }
            EdgeMode::Transparent => {
                let r = self.radius_px;
                let padded_size = PixelSize::new(
                    ss.width.saturating_add(2 * r),
                    ss.height.saturating_add(2 * r),
                );
                let mut padded = ctx.make_surface(padded_size)?;
                copy_into(padded.data_mut(), padded_size, source.surface.data(), ss, r);
                let mut tmp = ctx.make_surface(padded_size)?;
                let edges = EdgeMode::Transparent;
                horizontal_blur_q16(padded.data(), tmp.data_mut(), padded_size, &kernel, edges);
                vertical_blur_q16(tmp.data(), padded.data_mut(), padded_size, &kernel, edges);
                let r = i64::from(r);
                (padded, (self.placement.0 - r, self.placement.1 - r))
            }
        };

        blend_mask_at(
            target.surface.data_mut(),
            target_size,
            blurred.data(),
            blurred.size(),
            placement,
            target.blend,
        )
    }
}

fn copy_into(dst: &mut [u8], dst_size: PixelSize, src: &[u8], src_size: PixelSize, at: u32) {
    let row = (src_size.width as usize) * 4;
    let dst_row = (dst_size.width as usize) * 4;
    let at = at as usize;
    for (y, line) in src.chunks_exact(row).enumerate() {
        let start = (y + at) * dst_row + at * 4;
        dst[start..start + row].copy_from_slice(line);
    }
}

pub(crate) fn gaussian_kernel_q16(radius: u32, sigma: f32) -> FeatherResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(FeatherError::filter("blur sigma must be finite and > 0"));
    }

    let r = radius as i32;
    let mut weights_f = Vec::<f64>::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f64;
    let sigma = f64::from(sigma);
    let denom = 2.0 * sigma * sigma;
    for i in -r..=r {
        let x = f64::from(i);
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }
    if sum <= 0.0 {
        return Err(FeatherError::filter("gaussian kernel sum is zero"));
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = (((wf / sum) * 65536.0).round() as i64).clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }

    Ok(weights)
}

/// Row pass; `edges` decides what samples outside the raster read as.
pub(crate) fn horizontal_blur_q16(
    src: &[u8],
    dst: &mut [u8],
    size: PixelSize,
    k: &[u32],
    edges: EdgeMode,
) {
    let radius = (k.len() / 2) as i64;
    let w = i64::from(size.width);
    let row_bytes = (size.width as usize) * 4;
    dst.par_chunks_mut(row_bytes)
        .enumerate()
        .for_each(|(y, out_row)| {
            let src_row = &src[y * row_bytes..(y + 1) * row_bytes];
            for x in 0..w {
                let mut acc = [0u64; 4];
                for (ki, &kw) in k.iter().enumerate() {
                    let Some(sx) = edge_sample(x + ki as i64 - radius, w, edges) else {
                        continue;
                    };
                    let idx = (sx as usize) * 4;
                    for c in 0..4 {
                        acc[c] += u64::from(kw) * u64::from(src_row[idx + c]);
                    }
                }
                let o = (x as usize) * 4;
                for c in 0..4 {
                    out_row[o + c] = q16_to_u8(acc[c]);
                }
            }
        });
}

/// Column pass; `edges` decides what samples outside the raster read as.
pub(crate) fn vertical_blur_q16(
    src: &[u8],
    dst: &mut [u8],
    size: PixelSize,
    k: &[u32],
    edges: EdgeMode,
) {
    let radius = (k.len() / 2) as i64;
    let h = i64::from(size.height);
    let row_bytes = (size.width as usize) * 4;
    dst.par_chunks_mut(row_bytes)
        .enumerate()
        .for_each(|(y, out_row)| {
            let y = y as i64;
            for x in 0..row_bytes / 4 {
                let mut acc = [0u64; 4];
                for (ki, &kw) in k.iter().enumerate() {
                    let Some(sy) = edge_sample(y + ki as i64 - radius, h, edges) else {
                        continue;
                    };
                    let idx = (sy as usize) * row_bytes + x * 4;
                    for c in 0..4 {
                        acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                    }
                }
                for c in 0..4 {
                    out_row[x * 4 + c] = q16_to_u8(acc[c]);
                }
            }
        });
}

fn edge_sample(i: i64, len: i64, edges: EdgeMode) -> Option<i64> {
    match edges {
        _ if (0..len).contains(&i) => Some(i),
        EdgeMode::Transparent => None,
        EdgeMode::Clamp => Some(i.clamp(0, len - 1)),
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    v.min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
