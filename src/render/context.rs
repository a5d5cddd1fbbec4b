use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::effects::blur::gaussian_kernel_q16;
use crate::foundation::core::{Affine, BezPath, PixelSize};
use crate::foundation::error::{FeatherError, FeatherResult};
use crate::render::surface_pool::{SurfacePool, SurfacePoolOpts, SurfacePoolStats};
use crate::render::texture::Texture;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct BlurKernelKey {
    radius_px: u32,
    sigma_bits: u32,
}

/// Raster state for one render thread: surface allocation, path filling, and blur kernels.
///
/// Not `Send`: surfaces hand their pixmaps back to a pool shared through `Rc`, so one context must
/// never be driven from two threads. Use one context per thread.
pub struct RenderContext {
    pool: Rc<RefCell<SurfacePool>>,
    raster: Option<vello_cpu::RenderContext>,
    blur_kernels: HashMap<BlurKernelKey, Arc<Vec<u32>>>,
}

impl RenderContext {
    /// Create a context with the given pool configuration.
    pub fn new(opts: SurfacePoolOpts) -> Self {
        Self {
            pool: Rc::new(RefCell::new(SurfacePool::new(opts))),
            raster: None,
            blur_kernels: HashMap::new(),
        }
    }

    /// Borrow a transparent surface of `size` pixels.
    pub fn make_surface(&mut self, size: PixelSize) -> FeatherResult<Surface> {
        let pixmap = self.pool.borrow_mut().borrow(size)?;
        Ok(Surface {
            size,
            pixmap: Some(pixmap),
            pool: Rc::clone(&self.pool),
        })
    }

    /// Allocation counters for surfaces made by this context.
    pub fn pool_stats(&self) -> SurfacePoolStats {
        self.pool.borrow().stats()
    }

    /// Drop retained surfaces and cached kernels.
    pub fn purge(&mut self) {
        self.pool.borrow_mut().purge();
        self.blur_kernels.clear();
        self.raster = None;
    }

    /// Replace the contents of `surface` with the opaque white coverage of `path`.
    ///
    /// `transform` maps path coordinates to surface pixels. Filling uses the non-zero rule.
    pub(crate) fn fill_path(
        &mut self,
        surface: &mut Surface,
        path: &BezPath,
        transform: Affine,
    ) -> FeatherResult<()> {
        let width = u16::try_from(surface.size.width)
            .map_err(|_| FeatherError::evaluation("surface width exceeds u16"))?;
        let height = u16::try_from(surface.size.height)
            .map_err(|_| FeatherError::evaluation("surface height exceeds u16"))?;
        let pixmap = surface
            .pixmap
            .as_mut()
            .ok_or_else(|| FeatherError::evaluation("surface pixmap already extracted"))?;

        let mut ctx = match self.raster.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        ctx.set_transform(affine_to_cpu(transform));
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
        ctx.fill_path(&bezpath_to_cpu(path));
        ctx.flush();
        ctx.render_to_pixmap(pixmap);
        self.raster = Some(ctx);
        Ok(())
    }

    /// Quantized Gaussian kernel for `radius_px` and `sigma`, built once per pair.
    pub(crate) fn blur_kernel(&mut self, radius_px: u32, sigma: f32) -> FeatherResult<Arc<Vec<u32>>> {
        let key = BlurKernelKey {
            radius_px,
            sigma_bits: sigma.to_bits(),
        };
        if let Some(k) = self.blur_kernels.get(&key) {
            return Ok(Arc::clone(k));
        }
        let k = Arc::new(gaussian_kernel_q16(radius_px, sigma)?);
        self.blur_kernels.insert(key, Arc::clone(&k));
        Ok(k)
    }

    /// Number of distinct blur kernels built so far.
    pub fn cached_blur_kernels(&self) -> usize {
        self.blur_kernels.len()
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new(SurfacePoolOpts::default())
    }
}

impl fmt::Debug for RenderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderContext")
            .field("pool", &self.pool_stats())
            .field("blur_kernels", &self.blur_kernels.len())
            .finish_non_exhaustive()
    }
}

/// A borrowed raster surface. Dropping it returns the pixmap to its context's pool.
pub struct Surface {
    size: PixelSize,
    pixmap: Option<vello_cpu::Pixmap>,
    pool: Rc<RefCell<SurfacePool>>,
}

impl Surface {
    /// Pixel dimensions.
    pub fn size(&self) -> PixelSize {
        self.size
    }

    /// Row-major premultiplied RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        match &self.pixmap {
            Some(p) => p.data_as_u8_slice(),
            None => &[],
        }
    }

    /// Mutable row-major premultiplied RGBA8 bytes.
    pub fn data_mut(&mut self) -> &mut [u8] {
        match &mut self.pixmap {
            Some(p) => p.data_as_u8_slice_mut(),
            None => &mut [],
        }
    }

    /// Move the pixels out into an immutable texture.
    ///
    /// The pixmap leaves the pool for good; the pool stops counting it as live.
    pub fn into_texture(mut self) -> FeatherResult<Texture> {
        let pixmap = self
            .pixmap
            .take()
            .ok_or_else(|| FeatherError::evaluation("surface has no backing raster"))?;
        self.pool.borrow_mut().detach(self.size);
        Ok(Texture::from_pixmap(pixmap))
    }
}

impl Drop for Surface {
    fn drop(&mut self) {
        if let Some(pixmap) = self.pixmap.take() {
            self.pool.borrow_mut().release(self.size, pixmap);
        }
    }
}

impl fmt::Debug for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.size.width)
            .field("height", &self.size.height)
            .finish_non_exhaustive()
    }
}

pub(crate) fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

pub(crate) fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/context.rs"]
mod tests;
