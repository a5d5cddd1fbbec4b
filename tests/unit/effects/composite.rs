use super::*;

fn solid(size: PixelSize, a: u8) -> Vec<u8> {
    vec![a; size.byte_len()]
}

#[test]
fn blend_operators_match_porter_duff() {
    assert_eq!(MaskBlend::Union.apply(0, 200), 200);
    assert_eq!(MaskBlend::Union.apply(255, 10), 255);
    assert_eq!(MaskBlend::Union.apply(128, 128), 192);

    assert_eq!(MaskBlend::Subtract.apply(255, 255), 0);
    assert_eq!(MaskBlend::Subtract.apply(255, 0), 255);
    assert_eq!(MaskBlend::Subtract.apply(200, 0), 200);

    assert_eq!(MaskBlend::Intersect.apply(255, 0), 0);
    assert_eq!(MaskBlend::Intersect.apply(255, 255), 255);
    assert_eq!(MaskBlend::Intersect.apply(0, 255), 0);

    assert_eq!(MaskBlend::Difference.apply(255, 255), 0);
    assert_eq!(MaskBlend::Difference.apply(255, 0), 255);
    assert_eq!(MaskBlend::Difference.apply(0, 255), 255);
}

#[test]
fn union_places_source_at_offset_and_clips() {
    let ds = PixelSize::new(4, 4);
    let ss = PixelSize::new(2, 2);
    let mut dst = solid(ds, 0);
    let src = solid(ss, 255);

    blend_mask_at(&mut dst, ds, &src, ss, (3, -1), MaskBlend::Union).unwrap();

    let a = |x: usize, y: usize| dst[(y * 4 + x) * 4 + 3];
    assert_eq!(a(3, 0), 255);
    assert_eq!(a(2, 0), 0);
    assert_eq!(a(3, 1), 0);
    assert_eq!(&dst[12..16], &[255, 255, 255, 255]);
}

#[test]
fn intersect_clears_outside_the_placed_source() {
    let ds = PixelSize::new(4, 1);
    let ss = PixelSize::new(2, 1);
    let mut dst = solid(ds, 255);
    let src = solid(ss, 255);

    blend_mask_at(&mut dst, ds, &src, ss, (1, 0), MaskBlend::Intersect).unwrap();

    let alphas: Vec<u8> = dst.chunks_exact(4).map(|p| p[3]).collect();
    assert_eq!(alphas, vec![0, 255, 255, 0]);
}

#[test]
fn subtract_leaves_pixels_outside_source_alone() {
    let ds = PixelSize::new(3, 1);
    let ss = PixelSize::new(1, 1);
    let mut dst = solid(ds, 255);
    let src = solid(ss, 255);

    blend_mask_at(&mut dst, ds, &src, ss, (1, 0), MaskBlend::Subtract).unwrap();

    let alphas: Vec<u8> = dst.chunks_exact(4).map(|p| p[3]).collect();
    assert_eq!(alphas, vec![255, 0, 255]);
}

#[test]
fn mismatched_buffers_are_rejected() {
    let ds = PixelSize::new(2, 2);
    let mut dst = vec![0u8; 3];
    let src = solid(ds, 0);
    assert!(blend_mask_at(&mut dst, ds, &src, ds, (0, 0), MaskBlend::Union).is_err());
}
