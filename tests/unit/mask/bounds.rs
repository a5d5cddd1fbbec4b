use super::*;
use crate::animation::anim::Anim;
use crate::mask::descriptor::{MaskMode, MaskPath};

fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Arc<MaskData> {
    Arc::new(MaskData::new(MaskPath::rect(x0, y0, x1, y1), MaskMode::Add))
}

#[test]
fn union_of_right_and_bottom_edges_with_margin() {
    let masks = vec![square(0.0, 0.0, 10.0, 40.0), square(5.0, 5.0, 30.0, 20.0)];
    let r = measure_feather_mask_bounds(&masks, Frame(0), 0.1);
    assert_eq!(r.x0, 0.0);
    assert_eq!(r.y0, 0.0);
    assert!((r.x1 - 33.0).abs() < 1e-9);
    assert!((r.y1 - 44.0).abs() < 1e-9);
}

#[test]
fn absent_paths_contribute_nothing() {
    let absent = Arc::new(MaskData {
        path: Anim::hold([
            (Frame(0), Some(MaskPath::rect(0.0, 0.0, 50.0, 50.0))),
            (Frame(5), None),
        ]),
        mode: MaskMode::Add,
        expansion: Anim::constant(0.0),
        inverted: false,
    });
    let r = measure_feather_mask_bounds(&[absent.clone()], Frame(5), 0.1);
    assert_eq!(r, Rect::new(0.0, 0.0, 0.0, 0.0));

    let masks = vec![absent, square(0.0, 0.0, 10.0, 10.0)];
    let r = measure_feather_mask_bounds(&masks, Frame(5), 0.0);
    assert_eq!(r, Rect::new(0.0, 0.0, 10.0, 10.0));
}

#[test]
fn bounds_never_shrink_as_expansion_grows() {
    let mut prev = Rect::ZERO;
    for e in [-10.0, -2.0, 0.0, 0.5, 3.0, 12.0] {
        let m = Arc::new(
            MaskData::new(MaskPath::rect(10.0, 10.0, 30.0, 20.0), MaskMode::Add)
                .with_expansion(Anim::constant(e)),
        );
        let r = measure_feather_mask_bounds(&[m], Frame(0), 0.1);
        assert!(r.x1 >= prev.x1 && r.y1 >= prev.y1, "expansion {e}");
        prev = r;
    }
    assert!((prev.x1 - 42.0 * 1.1).abs() < 1e-9);
}

#[test]
fn negative_coordinates_clamp_to_origin_extent() {
    let r = measure_feather_mask_bounds(&[square(-20.0, -20.0, -5.0, -5.0)], Frame(0), 0.1);
    assert_eq!(r, Rect::new(0.0, 0.0, 0.0, 0.0));
}
