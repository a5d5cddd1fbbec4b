use super::*;
use crate::animation::anim::Anim;
use crate::mask::descriptor::{MaskMode, MaskPath};

fn square(mode: MaskMode) -> Arc<MaskData> {
    Arc::new(MaskData::new(MaskPath::rect(0.0, 0.0, 10.0, 10.0), mode))
}

#[test]
fn identical_inputs_fingerprint_identically() {
    let opts = FeatherOpts::default();
    let a = fingerprint_masks(&[square(MaskMode::Add)], Frame(0), &opts);
    let b = fingerprint_masks(&[square(MaskMode::Add)], Frame(0), &opts);
    assert_eq!(a, b);
}

#[test]
fn static_masks_fingerprint_the_same_across_time() {
    let opts = FeatherOpts::default();
    let masks = [square(MaskMode::Add)];
    assert_eq!(
        fingerprint_masks(&masks, Frame(0), &opts),
        fingerprint_masks(&masks, Frame(90), &opts)
    );
}

#[test]
fn mode_inversion_expansion_and_opts_all_change_the_digest() {
    let opts = FeatherOpts::default();
    let base = fingerprint_masks(&[square(MaskMode::Add)], Frame(0), &opts);

    let sub = fingerprint_masks(&[square(MaskMode::Subtract)], Frame(0), &opts);
    assert_ne!(base, sub);

    let inv = MaskData::new(MaskPath::rect(0.0, 0.0, 10.0, 10.0), MaskMode::Add).with_inverted(true);
    assert_ne!(base, fingerprint_masks(&[Arc::new(inv)], Frame(0), &opts));

    let grown = MaskData::new(MaskPath::rect(0.0, 0.0, 10.0, 10.0), MaskMode::Add)
        .with_expansion(Anim::constant(2.0));
    assert_ne!(base, fingerprint_masks(&[Arc::new(grown)], Frame(0), &opts));

    let wide = opts.with_feather_radius(12.0);
    assert_ne!(base, fingerprint_masks(&[square(MaskMode::Add)], Frame(0), &wide));
}

#[test]
fn animated_paths_fingerprint_per_sampled_state() {
    let opts = FeatherOpts::default();
    let mut m = MaskData::new(MaskPath::rect(0.0, 0.0, 10.0, 10.0), MaskMode::Add);
    m.path = Anim::hold([
        (Frame(0), Some(MaskPath::rect(0.0, 0.0, 10.0, 10.0))),
        (Frame(5), None),
    ]);
    let masks = [Arc::new(m)];
    assert_ne!(
        fingerprint_masks(&masks, Frame(0), &opts),
        fingerprint_masks(&masks, Frame(5), &opts)
    );
}
