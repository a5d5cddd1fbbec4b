pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Round a non-negative pixel extent up to whole pixels, clamped to at least one.
///
/// Non-finite and negative inputs map to one pixel so degenerate bounds still yield a surface.
pub(crate) fn ceil_px(v: f64) -> u32 {
    if !v.is_finite() || v <= 1.0 {
        return 1;
    }
    let c = v.ceil();
    if c >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        c as u32
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
