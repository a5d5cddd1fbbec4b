use crate::foundation::core::PixelSize;
use crate::foundation::error::{FeatherError, FeatherResult};
use crate::foundation::math::mul_div255_u16;

/// Porter-Duff operator used to merge one blurred mask into the accumulated coverage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MaskBlend {
    /// Source over destination.
    Union,
    /// Destination out: removes source coverage.
    Subtract,
    /// Destination in: keeps coverage only where the source has it.
    Intersect,
    /// Exclusive or.
    Difference,
}

impl MaskBlend {
    /// Combine destination coverage `d` with source coverage `s`.
    pub fn apply(self, d: u8, s: u8) -> u8 {
        let d = u16::from(d);
        let s = u16::from(s);
        let v = match self {
            Self::Union => s + mul_div255_u16(d, 255 - s),
            Self::Subtract => mul_div255_u16(d, 255 - s),
            Self::Intersect => mul_div255_u16(d, s),
            Self::Difference => mul_div255_u16(s, 255 - d) + mul_div255_u16(d, 255 - s),
        };
        v.min(255) as u8
    }

    /// `true` when a zero source leaves the destination untouched.
    fn is_local(self) -> bool {
        !matches!(self, Self::Intersect)
    }
}

/// Merge a premultiplied white coverage raster into `dst` with its top-left at `offset`.
///
/// Coverage is read from the alpha channel and written to every channel. Source pixels outside
/// `dst` are clipped. For [`MaskBlend::Intersect`] the destination outside the placed source is
/// treated as meeting zero coverage and cleared.
pub fn blend_mask_at(
    dst: &mut [u8],
    dst_size: PixelSize,
    src: &[u8],
    src_size: PixelSize,
    offset: (i64, i64),
    blend: MaskBlend,
) -> FeatherResult<()> {
    if dst.len() != dst_size.byte_len() || src.len() != src_size.byte_len() {
        return Err(FeatherError::evaluation(
            "blend_mask_at expects buffers matching width*height*4",
        ));
    }

    let dw = i64::from(dst_size.width);
    let dh = i64::from(dst_size.height);
    let sw = i64::from(src_size.width);
    let sh = i64::from(src_size.height);
    let (ox, oy) = offset;

    let (y0, y1, x0, x1) = if blend.is_local() {
        (oy.max(0), (oy + sh).min(dh), ox.max(0), (ox + sw).min(dw))
    } else {
        (0, dh, 0, dw)
    };

    for y in y0..y1 {
        let sy = y - oy;
        for x in x0..x1 {
            let sx = x - ox;
            let s = if (0..sw).contains(&sx) && (0..sh).contains(&sy) {
                src[((sy * sw + sx) as usize) * 4 + 3]
            } else {
                0
            };
            let di = ((y * dw + x) as usize) * 4;
            let out = blend.apply(dst[di + 3], s);
            dst[di..di + 4].fill(out);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
