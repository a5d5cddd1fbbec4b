use crate::foundation::core::Affine;
use crate::foundation::error::{FeatherError, FeatherResult};
use crate::graphics::snapshot::Snapshot;
use crate::render::context::affine_to_cpu;
use crate::render::texture::Texture;

/// A rendered frame in RGBA8 format.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Alpha at `(x, y)`; zero outside the frame.
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.data[((y as usize) * (self.width as usize) + (x as usize)) * 4 + 3]
    }
}

/// Drawing target for graphics.
///
/// Draw calls are recorded against the current matrix and rasterized on [`Canvas::to_frame`].
pub struct Canvas {
    ctx: vello_cpu::RenderContext,
    width: u16,
    height: u16,
    matrix: Affine,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> FeatherResult<Self> {
        if width == 0 || height == 0 {
            return Err(FeatherError::validation(format!(
                "canvas must be non-empty, got {width}x{height}"
            )));
        }
        let w: u16 = width
            .try_into()
            .map_err(|_| FeatherError::validation(format!("canvas width exceeds u16: {width}")))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| FeatherError::validation(format!("canvas height exceeds u16: {height}")))?;
        Ok(Self {
            ctx: vello_cpu::RenderContext::new(w, h),
            width: w,
            height: h,
            matrix: Affine::IDENTITY,
        })
    }

    pub fn width(&self) -> u32 {
        u32::from(self.width)
    }

    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    /// Current local-to-device matrix.
    pub fn matrix(&self) -> Affine {
        self.matrix
    }

    pub fn set_matrix(&mut self, matrix: Affine) {
        self.matrix = matrix;
    }

    /// Pre-multiply the current matrix by `transform`.
    pub fn concat(&mut self, transform: Affine) {
        self.matrix *= transform;
    }

    /// Draw `texture` with its pixel space mapped to local space by `transform`.
    pub fn draw_texture(&mut self, texture: &Texture, transform: Affine) {
        let tr = self.matrix * transform;
        self.ctx
            .set_blend_mode(vello_cpu::peniko::BlendMode::default());
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(affine_to_cpu(tr));
        self.ctx.set_paint(texture.to_paint());
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(texture.width()),
            f64::from(texture.height()),
        ));
    }

    /// Draw a snapshot at unit scale in local space.
    pub fn draw_snapshot(&mut self, snapshot: &Snapshot) {
        self.draw_texture(snapshot.texture(), snapshot.transform());
    }

    /// Discard everything drawn so far.
    pub fn clear(&mut self) {
        self.ctx.reset();
    }

    /// Rasterize what has been drawn and read it back.
    pub fn to_frame(&mut self) -> FrameRGBA {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
