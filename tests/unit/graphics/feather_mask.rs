use super::*;
use crate::mask::descriptor::{MaskMode, MaskPath};

fn square() -> Vec<Arc<MaskData>> {
    vec![Arc::new(MaskData::new(
        MaskPath::rect(2.0, 2.0, 12.0, 12.0),
        MaskMode::Add,
    ))]
}

#[test]
fn empty_mask_set_is_rejected() {
    assert!(FeatherMask::make_from(AssetId(1), &[], Frame::ZERO).is_none());
}

#[test]
fn construction_measures_bounds_once() {
    let m = FeatherMask::make_from(AssetId(1), &square(), Frame::ZERO).unwrap();
    let b = m.measure_bounds();
    assert_eq!((b.x0, b.y0), (0.0, 0.0));
    assert!((b.x1 - 13.2).abs() < 1e-9);
    assert!(m.get_path().is_none());
    let mut cache = RenderCache::default();
    assert!(m.hit_test(&mut cache, -100.0, 1e9));
}

#[test]
fn snapshots_carry_the_input_fingerprint() {
    let m = FeatherMask::make_from(AssetId(1), &square(), Frame::ZERO).unwrap();
    let mut cache = RenderCache::default();
    let s = m.make_snapshot(&mut cache, 1.0).unwrap();
    assert_eq!(s.fingerprint(), Some(m.fingerprint()));
}

#[test]
fn prepare_warms_the_blur_kernel() {
    let m = FeatherMask::make_from(AssetId(1), &square(), Frame::ZERO).unwrap();
    let mut cache = RenderCache::default();
    m.prepare(&mut cache);
    assert_eq!(cache.context().cached_blur_kernels(), 1);
    m.make_snapshot(&mut cache, 1.0).unwrap();
    assert_eq!(cache.context().cached_blur_kernels(), 1);
}

#[test]
fn draw_ignores_stale_cached_snapshots_and_never_inserts() {
    let m = FeatherMask::make_from(AssetId(9), &square(), Frame::ZERO).unwrap();
    let other = FeatherMask::make_from_with_opts(
        AssetId(9),
        &square(),
        Frame::ZERO,
        FeatherOpts::default().with_feather_radius(1.0),
    )
    .unwrap();
    assert_ne!(m.fingerprint(), other.fingerprint());

    let mut cache = RenderCache::default();
    let stale = other.make_snapshot(&mut cache, 1.0).unwrap();
    cache.insert_snapshot(AssetId(9), Arc::new(stale));
    assert!(m.cached_snapshot(&mut cache).is_none());
    assert!(other.cached_snapshot(&mut cache).is_some());

    let mut canvas = Canvas::new(16, 16).unwrap();
    let before = cache.stats().entries;
    m.draw(&mut canvas, &mut cache);
    assert_eq!(cache.stats().entries, before);
    assert!(canvas.to_frame().alpha_at(7, 7) > 128);
}
