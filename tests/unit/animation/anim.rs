use super::*;

#[test]
fn constant_samples_everywhere() {
    let a = Anim::constant(4.0);
    assert_eq!(a.sample(Frame(-10)).unwrap(), 4.0);
    assert_eq!(a.sample(Frame(0)).unwrap(), 4.0);
    assert_eq!(a.sample(Frame(1_000)).unwrap(), 4.0);
}

#[test]
fn linear_interpolates_between_keys_and_holds_edges() {
    let a = Anim::linear([(Frame(0), 0.0), (Frame(10), 20.0)]);
    assert_eq!(a.sample(Frame(-5)).unwrap(), 0.0);
    assert_eq!(a.sample(Frame(5)).unwrap(), 10.0);
    assert_eq!(a.sample(Frame(10)).unwrap(), 20.0);
    assert_eq!(a.sample(Frame(99)).unwrap(), 20.0);
}

#[test]
fn hold_jumps_at_next_key() {
    let a = Anim::hold([(Frame(0), 1.0), (Frame(4), 2.0)]);
    assert_eq!(a.sample(Frame(3)).unwrap(), 1.0);
    assert_eq!(a.sample(Frame(4)).unwrap(), 2.0);
}

#[test]
fn option_presence_follows_earlier_key() {
    let a: Anim<Option<f64>> = Anim::linear([(Frame(0), Some(0.0)), (Frame(10), None)]);
    assert_eq!(a.sample(Frame(5)).unwrap(), Some(0.0));
    assert_eq!(a.sample(Frame(10)).unwrap(), None);

    let b: Anim<Option<f64>> = Anim::linear([(Frame(0), None), (Frame(10), Some(1.0))]);
    assert_eq!(b.sample(Frame(5)).unwrap(), None);
    assert_eq!(b.sample(Frame(10)).unwrap(), Some(1.0));
}

#[test]
fn empty_keyframes_use_default_or_fail() {
    let with_default = Anim::Keyframes(Keyframes::<f64> {
        keys: vec![],
        mode: InterpMode::Linear,
        default: Some(3.0),
    });
    assert_eq!(with_default.sample(Frame(7)).unwrap(), 3.0);
    assert!(with_default.validate().is_ok());

    let empty = Anim::Keyframes(Keyframes::<f64> {
        keys: vec![],
        mode: InterpMode::Linear,
        default: None,
    });
    assert!(empty.validate().is_err());
    assert!(empty.sample(Frame(0)).is_err());
}

#[test]
fn unsorted_keys_fail_validation() {
    let a = Anim::linear([(Frame(5), 0.0), (Frame(1), 1.0)]);
    assert!(a.validate().is_err());
}

#[test]
fn delay_shifts_time() {
    let inner = Anim::linear([(Frame(0), 0.0), (Frame(10), 10.0)]);
    let a = Anim::Expr(Expr::Delay {
        inner: Box::new(inner),
        by: 5,
    });
    assert_eq!(a.sample(Frame(5)).unwrap(), 0.0);
    assert_eq!(a.sample(Frame(10)).unwrap(), 5.0);
}

#[test]
fn loop_repeat_and_ping_pong() {
    let inner = Anim::linear([(Frame(0), 0.0), (Frame(3), 3.0)]);
    let repeat = Anim::Expr(Expr::Loop {
        inner: Box::new(inner.clone()),
        start: Frame(0),
        period: 4,
        mode: LoopMode::Repeat,
    });
    assert_eq!(repeat.sample(Frame(5)).unwrap(), 1.0);
    assert_eq!(repeat.sample(Frame(-1)).unwrap(), 3.0);

    let ping = Anim::Expr(Expr::Loop {
        inner: Box::new(inner),
        start: Frame(0),
        period: 4,
        mode: LoopMode::PingPong,
    });
    assert_eq!(ping.sample(Frame(3)).unwrap(), 3.0);
    assert_eq!(ping.sample(Frame(4)).unwrap(), 2.0);
    assert_eq!(ping.sample(Frame(6)).unwrap(), 0.0);
}

#[test]
fn loop_rejects_non_positive_period() {
    let a = Anim::Expr(Expr::Loop {
        inner: Box::new(Anim::constant(1.0)),
        start: Frame(0),
        period: 0,
        mode: LoopMode::Repeat,
    });
    assert!(a.validate().is_err());
    assert!(a.sample(Frame(0)).is_err());
}

#[test]
fn ping_pong_with_huge_period_does_not_overflow() {
    let a = Anim::Expr(Expr::Loop {
        inner: Box::new(Anim::linear([(Frame(0), 0.0), (Frame(3), 3.0)])),
        start: Frame(0),
        period: i64::MAX,
        mode: LoopMode::PingPong,
    });
    assert!(a.validate().is_ok());
    assert_eq!(a.sample(Frame(2)).unwrap(), 2.0);
    assert!(a.sample(Frame(i64::MIN)).is_ok());
}

#[test]
fn keyframes_deserialize_with_and_without_default() {
    use crate::mask::descriptor::MaskPath;

    let path: Anim<Option<MaskPath>> = serde_json::from_str(
        r#"{"keyframes":{"keys":[{"frame":0,"value":"M0 0 L4 0 L4 4 Z"}],"mode":"hold"}}"#,
    )
    .unwrap();
    let Anim::Keyframes(kf) = &path else {
        panic!("expected keyframes");
    };
    assert!(kf.default.is_none());
    assert!(path.sample(Frame(9)).unwrap().is_some_and(|p| p.is_closed()));

    let fallback: Anim<f64> =
        serde_json::from_str(r#"{"keyframes":{"keys":[],"mode":"linear","default":2.5}}"#).unwrap();
    assert_eq!(fallback.sample(Frame(0)).unwrap(), 2.5);
}
