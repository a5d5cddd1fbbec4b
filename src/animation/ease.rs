/// Temporal easing applied between two keyframes.
///
/// Animation containers describe keyframe easing as a cubic-bezier timing curve from `(0, 0)` to
/// `(1, 1)` with two control points, the same model CSS `cubic-bezier()` uses.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Constant-rate progress.
    Linear,
    /// Cubic-bezier timing curve.
    CubicBezier {
        /// First control point x, clamped to `[0, 1]`.
        x1: f64,
        /// First control point y.
        y1: f64,
        /// Second control point x, clamped to `[0, 1]`.
        x2: f64,
        /// Second control point y.
        y2: f64,
    },
}

impl Ease {
    /// The common "ease" preset (`0.25, 0.1, 0.25, 1.0`).
    pub const EASE: Self = Self::CubicBezier {
        x1: 0.25,
        y1: 0.1,
        x2: 0.25,
        y2: 1.0,
    };

    /// Map normalized progress `t` in `[0, 1]` through this curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::CubicBezier { x1, y1, x2, y2 } => {
                if t == 0.0 || t == 1.0 {
                    return t;
                }
                let x1 = x1.clamp(0.0, 1.0);
                let x2 = x2.clamp(0.0, 1.0);
                let u = solve_bezier_param(x1, x2, t);
                bezier_component(y1, y2, u)
            }
        }
    }
}

fn bezier_component(p1: f64, p2: f64, u: f64) -> f64 {
    let inv = 1.0 - u;
    3.0 * inv * inv * u * p1 + 3.0 * inv * u * u * p2 + u * u * u
}

fn bezier_component_slope(p1: f64, p2: f64, u: f64) -> f64 {
    let inv = 1.0 - u;
    3.0 * inv * inv * p1 + 6.0 * inv * u * (p2 - p1) + 3.0 * u * u * (1.0 - p2)
}

// x(u) is monotone for control x in [0, 1]; Newton first, bisection as fallback.
fn solve_bezier_param(x1: f64, x2: f64, x: f64) -> f64 {
    const EPS: f64 = 1e-7;

    let mut u = x;
    for _ in 0..8 {
        let err = bezier_component(x1, x2, u) - x;
        if err.abs() < EPS {
            return u;
        }
        let slope = bezier_component_slope(x1, x2, u);
        if slope.abs() < 1e-6 {
            break;
        }
        u -= err / slope;
    }

    let (mut lo, mut hi) = (0.0f64, 1.0f64);
    u = x;
    for _ in 0..64 {
        let v = bezier_component(x1, x2, u);
        if (v - x).abs() < EPS {
            break;
        }
        if v < x {
            lo = u;
        } else {
            hi = u;
        }
        u = 0.5 * (lo + hi);
    }
    u
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
