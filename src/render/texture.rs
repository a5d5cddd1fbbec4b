use std::fmt;
use std::sync::Arc;

use crate::foundation::core::PixelSize;

/// Immutable RGBA8 premultiplied raster extracted from a surface.
///
/// Cheap to clone; clones share pixels.
#[derive(Clone)]
pub struct Texture {
    size: PixelSize,
    pixmap: Arc<vello_cpu::Pixmap>,
}

impl Texture {
    pub(crate) fn from_pixmap(pixmap: vello_cpu::Pixmap) -> Self {
        let size = PixelSize::new(u32::from(pixmap.width()), u32::from(pixmap.height()));
        Self {
            size,
            pixmap: Arc::new(pixmap),
        }
    }

    /// Pixel dimensions.
    pub fn size(&self) -> PixelSize {
        self.size
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.size.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.size.height
    }

    /// Row-major premultiplied RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    /// Premultiplied RGBA8 at `(x, y)`; `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let idx = ((y as usize) * (self.size.width as usize) + (x as usize)) * 4;
        let d = self.data();
        Some([d[idx], d[idx + 1], d[idx + 2], d[idx + 3]])
    }

    /// Alpha at `(x, y)`; zero outside the raster.
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        self.pixel(x, y).map_or(0, |px| px[3])
    }

    /// `true` when every pixel is fully transparent.
    pub fn is_blank(&self) -> bool {
        self.data().chunks_exact(4).all(|px| px[3] == 0)
    }

    /// Bytes held by the pixel buffer.
    pub fn byte_len(&self) -> usize {
        self.size.byte_len()
    }

    pub(crate) fn to_paint(&self) -> vello_cpu::Image {
        vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(self.pixmap.clone()),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        }
    }
}

impl fmt::Debug for Texture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Texture")
            .field("width", &self.size.width)
            .field("height", &self.size.height)
            .finish_non_exhaustive()
    }
}
