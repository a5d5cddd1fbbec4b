use crate::{
    animation::ease::Ease,
    foundation::core::Frame,
    foundation::error::{FeatherError, FeatherResult},
};

/// Interpolation contract for animated value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

/// Presence is held from the earlier key: a value only interpolates while both sides exist.
impl<T> Lerp for Option<T>
where
    T: Lerp + Clone,
{
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        match (a, b) {
            (Some(a), Some(b)) => Some(T::lerp(a, b, t)),
            _ => a.clone(),
        }
    }
}

/// Animated property: keyframes, optionally wrapped in time-remapping expressions.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anim<T> {
    /// Piecewise animation defined by explicit keyframes.
    Keyframes(Keyframes<T>),
    /// Time remap applied to an inner animation.
    Expr(Expr<T>),
}

impl<T> Anim<T>
where
    T: Lerp + Clone,
{
    /// Build an animation that returns `value` at every frame.
    pub fn constant(value: T) -> Self {
        Self::Keyframes(Keyframes {
            keys: vec![Keyframe {
                frame: Frame::ZERO,
                value,
                ease: Ease::Linear,
            }],
            mode: InterpMode::Hold,
            default: None,
        })
    }

    /// Build a keyframed animation from `(frame, value)` pairs with linear easing.
    pub fn linear(keys: impl IntoIterator<Item = (Frame, T)>) -> Self {
        Self::Keyframes(Keyframes::from_pairs(keys, InterpMode::Linear))
    }

    /// Build a keyframed animation that jumps between `(frame, value)` pairs.
    pub fn hold(keys: impl IntoIterator<Item = (Frame, T)>) -> Self {
        Self::Keyframes(Keyframes::from_pairs(keys, InterpMode::Hold))
    }

    /// Sample the value at `frame`.
    pub fn sample(&self, frame: Frame) -> FeatherResult<T> {
        match self {
            Self::Keyframes(kf) => kf.sample(frame),
            Self::Expr(expr) => expr.sample(frame),
        }
    }

    /// Validate static invariants for this animation tree.
    pub fn validate(&self) -> FeatherResult<()> {
        match self {
            Self::Keyframes(kf) => kf.validate(),
            Self::Expr(expr) => expr.validate(),
        }
    }
}

/// Keyframed animation with optional fallback value.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Keyframes<T> {
    /// Keyframes sorted by `frame`.
    pub keys: Vec<Keyframe<T>>,
    /// Interpolation between adjacent keyframes.
    pub mode: InterpMode,
    /// Value used when `keys` is empty.
    #[serde(default = "no_default")]
    pub default: Option<T>,
}

fn no_default<T>() -> Option<T> {
    None
}

impl<T> Keyframes<T>
where
    T: Lerp + Clone,
{
    fn from_pairs(keys: impl IntoIterator<Item = (Frame, T)>, mode: InterpMode) -> Self {
        Self {
            keys: keys
                .into_iter()
                .map(|(frame, value)| Keyframe {
                    frame,
                    value,
                    ease: Ease::Linear,
                })
                .collect(),
            mode,
            default: None,
        }
    }

    /// Validate keyframe ordering and fallback requirements.
    pub fn validate(&self) -> FeatherResult<()> {
        if self.keys.is_empty() && self.default.is_none() {
            return Err(FeatherError::animation(
                "keyframes must have at least one key or a default value",
            ));
        }
        if !self.keys.windows(2).all(|w| w[0].frame <= w[1].frame) {
            return Err(FeatherError::animation("keyframes must be sorted by frame"));
        }
        Ok(())
    }

    /// Sample in layer-local time. Before the first key and after the last, the edge key holds.
    pub fn sample(&self, frame: Frame) -> FeatherResult<T> {
        if self.keys.is_empty() {
            return self
                .default
                .clone()
                .ok_or_else(|| FeatherError::animation("keyframes have no keys and no default"));
        }

        let idx = self.keys.partition_point(|k| k.frame <= frame);
        if idx == 0 {
            return Ok(self.keys[0].value.clone());
        }
        if idx >= self.keys.len() {
            return Ok(self.keys[self.keys.len() - 1].value.clone());
        }

        let a = &self.keys[idx - 1];
        let b = &self.keys[idx];
        let span = b.frame.0.saturating_sub(a.frame.0);
        if span <= 0 {
            return Ok(a.value.clone());
        }

        match self.mode {
            InterpMode::Hold => Ok(a.value.clone()),
            InterpMode::Linear => {
                let t = (frame.0 - a.frame.0) as f64 / span as f64;
                Ok(T::lerp(&a.value, &b.value, a.ease.apply(t)))
            }
        }
    }
}

/// One keyframe.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Keyframe<T> {
    /// Layer-local frame of this key.
    pub frame: Frame,
    /// Value at `frame`.
    pub value: T,
    /// Easing toward the next key.
    #[serde(default = "default_ease")]
    pub ease: Ease,
}

fn default_ease() -> Ease {
    Ease::Linear
}

/// Interpolation strategy between keyframes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpMode {
    /// Hold the earlier key until the next one.
    Hold,
    /// Interpolate with the earlier key's [`Ease`].
    Linear,
}

/// Time remapping expressions.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr<T> {
    /// Sample `inner` `by` frames earlier.
    Delay {
        /// Inner animation.
        inner: Box<Anim<T>>,
        /// Delay in frames; negative values advance.
        by: i64,
    },
    /// Repeat `inner` over `[start, start + period)`.
    Loop {
        /// Inner animation.
        inner: Box<Anim<T>>,
        /// First frame of the loop window.
        start: Frame,
        /// Window length in frames (`> 0`).
        period: i64,
        /// Wrap strategy.
        mode: LoopMode,
    },
}

/// Looping strategy for [`Expr::Loop`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopMode {
    /// Wrap at the window end.
    Repeat,
    /// Bounce back and forth across the window.
    PingPong,
}

impl<T> Expr<T>
where
    T: Lerp + Clone,
{
    /// Validate expression invariants recursively.
    pub fn validate(&self) -> FeatherResult<()> {
        match self {
            Self::Delay { inner, by: _ } => inner.validate(),
            Self::Loop { inner, period, .. } => {
                if *period <= 0 {
                    return Err(FeatherError::animation("loop period must be > 0"));
                }
                inner.validate()
            }
        }
    }

    /// Sample by remapping `frame` and delegating to the inner animation.
    pub fn sample(&self, frame: Frame) -> FeatherResult<T> {
        match self {
            Self::Delay { inner, by } => inner.sample(Frame(frame.0.saturating_sub(*by))),
            Self::Loop {
                inner,
                start,
                period,
                mode,
            } => {
                if *period <= 0 {
                    return Err(FeatherError::animation("loop period must be > 0"));
                }
                let local = frame.0.saturating_sub(start.0);
                let mapped = match mode {
                    LoopMode::Repeat => local.rem_euclid(*period),
                    LoopMode::PingPong => {
                        if *period == 1 {
                            0
                        } else {
                            let cycle = (period - 1).saturating_mul(2);
                            let pos = local.rem_euclid(cycle);
                            if pos < *period { pos } else { cycle - pos }
                        }
                    }
                };
                inner.sample(start.offset(mapped))
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/anim.rs"]
mod tests;
