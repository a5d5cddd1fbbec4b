use std::sync::Arc;

use kurbo::{PathEl, Point};
use xxhash_rust::xxh3::Xxh3;

use crate::foundation::core::Frame;
use crate::mask::descriptor::MaskData;
use crate::mask::opts::FeatherOpts;

const XXH3_SEED: u64 = 0x5f3c_91a7_e2d4_0b68;

/// Stable digest of everything a feathered composite depends on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InputFingerprint {
    pub hi: u64,
    pub lo: u64,
}

/// Fingerprint the mask state sampled at `frame`, together with the feather options.
///
/// The frame index itself is not hashed, so a mask set that does not animate fingerprints the same
/// at every time.
pub fn fingerprint_masks(
    masks: &[Arc<MaskData>],
    frame: Frame,
    opts: &FeatherOpts,
) -> InputFingerprint {
    let mut h = StableHasher::new();
    h.write_f64(opts.feather_radius);
    h.write_f64(opts.bounds_margin);
    h.write_u32(masks.len() as u32);
    for mask in masks {
        h.write_u8(mask.mode.tag());
        h.write_bool(mask.inverted);
        match mask.expansion_at(frame) {
            Ok(e) => h.write_f64(e),
            Err(_) => h.write_u8(0xff),
        }
        match mask.path_at(frame) {
            Ok(Some(p)) => {
                h.write_u8(1);
                let els = p.bez_path().elements();
                h.write_u32(els.len() as u32);
                for &el in els {
                    write_path_el(&mut h, el);
                }
            }
            Ok(None) => h.write_u8(0),
            Err(_) => h.write_u8(2),
        }
    }
    h.finish()
}

fn write_path_el(h: &mut StableHasher, el: PathEl) {
    match el {
        PathEl::MoveTo(p) => {
            h.write_u8(0);
            h.write_point(p);
        }
        PathEl::LineTo(p) => {
            h.write_u8(1);
            h.write_point(p);
        }
        PathEl::QuadTo(p1, p2) => {
            h.write_u8(2);
            h.write_point(p1);
            h.write_point(p2);
        }
        PathEl::CurveTo(p1, p2, p3) => {
            h.write_u8(3);
            h.write_point(p1);
            h.write_point(p2);
            h.write_point(p3);
        }
        PathEl::ClosePath => h.write_u8(4),
    }
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_bytes(&v.to_bits().to_le_bytes());
    }

    fn write_point(&mut self, p: Point) {
        self.write_f64(p.x);
        self.write_f64(p.y);
    }

    fn finish(self) -> InputFingerprint {
        let v = self.inner.digest128();
        InputFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/cache/fingerprint.rs"]
mod tests;
