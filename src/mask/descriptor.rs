use crate::{
    animation::anim::{Anim, Lerp},
    foundation::core::{BezPath, Frame, Point, Rect},
    foundation::error::{FeatherError, FeatherResult},
};
use kurbo::{PathEl, Shape};

/// How a mask combines with the masks before it in the same set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskMode {
    /// Disabled; the mask contributes nothing.
    None,
    /// Union with the previous result.
    Add,
    /// Remove the shape from the previous result.
    Subtract,
    /// Keep only the overlap with the previous result.
    Intersect,
    /// Keep the symmetric difference with the previous result.
    Difference,
}

impl MaskMode {
    pub(crate) fn tag(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Add => 1,
            Self::Subtract => 2,
            Self::Intersect => 3,
            Self::Difference => 4,
        }
    }
}

/// A mask outline in layer-local coordinates.
///
/// Serialized as SVG path data.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MaskPath {
    path: BezPath,
}

impl MaskPath {
    /// Wrap an existing path.
    pub fn new(path: BezPath) -> Self {
        Self { path }
    }

    /// Parse SVG path data.
    pub fn from_svg(d: &str) -> FeatherResult<Self> {
        BezPath::from_svg(d.trim())
            .map(Self::new)
            .map_err(|e| FeatherError::validation(format!("invalid mask path data: {e}")))
    }

    /// Closed axis-aligned rectangle with corners `(x0, y0)` and `(x1, y1)`.
    pub fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        let mut p = BezPath::new();
        p.move_to(Point::new(x0, y0));
        p.line_to(Point::new(x1, y0));
        p.line_to(Point::new(x1, y1));
        p.line_to(Point::new(x0, y1));
        p.close_path();
        Self::new(p)
    }

    /// Borrow the underlying path.
    pub fn bez_path(&self) -> &BezPath {
        &self.path
    }

    /// `true` when the path has no elements.
    pub fn is_empty(&self) -> bool {
        self.path.elements().is_empty()
    }

    /// `true` when the path is non-empty and every subpath ends with `ClosePath`.
    pub fn is_closed(&self) -> bool {
        let els = self.path.elements();
        if els.is_empty() {
            return false;
        }
        let mut open = false;
        for el in els {
            match el {
                PathEl::MoveTo(_) => {
                    if open {
                        return false;
                    }
                    open = true;
                }
                PathEl::ClosePath => open = false,
                _ => {}
            }
        }
        !open
    }

    /// Axis-aligned bounds of the path geometry, `None` for an empty path.
    pub fn bounds(&self) -> Option<Rect> {
        if self.is_empty() {
            return None;
        }
        Some(self.path.bounding_box())
    }
}

impl TryFrom<String> for MaskPath {
    type Error = FeatherError;

    fn try_from(d: String) -> Result<Self, Self::Error> {
        Self::from_svg(&d)
    }
}

impl From<MaskPath> for String {
    fn from(p: MaskPath) -> Self {
        p.path.to_svg()
    }
}

/// Vertex-wise interpolation between structurally identical paths; otherwise the earlier path
/// holds.
impl Lerp for MaskPath {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        let ea = a.path.elements();
        let eb = b.path.elements();
        if ea.len() != eb.len() {
            return a.clone();
        }

        let lp = |p: Point, q: Point| p.lerp(q, t);
        let mut out = BezPath::new();
        for (&x, &y) in ea.iter().zip(eb) {
            let el = match (x, y) {
                (PathEl::MoveTo(p), PathEl::MoveTo(q)) => PathEl::MoveTo(lp(p, q)),
                (PathEl::LineTo(p), PathEl::LineTo(q)) => PathEl::LineTo(lp(p, q)),
                (PathEl::QuadTo(p1, p2), PathEl::QuadTo(q1, q2)) => {
                    PathEl::QuadTo(lp(p1, q1), lp(p2, q2))
                }
                (PathEl::CurveTo(p1, p2, p3), PathEl::CurveTo(q1, q2, q3)) => {
                    PathEl::CurveTo(lp(p1, q1), lp(p2, q2), lp(p3, q3))
                }
                (PathEl::ClosePath, PathEl::ClosePath) => PathEl::ClosePath,
                _ => return a.clone(),
            };
            out.push(el);
        }
        Self::new(out)
    }
}

/// Animatable state of one mask, owned by the animation tree.
///
/// The compositor only reads it; sets of masks are shared as `Arc<MaskData>` handles.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct MaskData {
    /// Outline over time; `None` where the mask has no path.
    pub path: Anim<Option<MaskPath>>,
    /// Combination mode.
    pub mode: MaskMode,
    /// Outline offset over time, in local units. Positive grows the shape.
    #[serde(default = "zero_expansion")]
    pub expansion: Anim<f64>,
    /// Fill the complement of the outline.
    #[serde(default)]
    pub inverted: bool,
}

fn zero_expansion() -> Anim<f64> {
    Anim::constant(0.0)
}

impl MaskData {
    /// A static, non-inverted, unexpanded mask.
    pub fn new(path: MaskPath, mode: MaskMode) -> Self {
        Self {
            path: Anim::constant(Some(path)),
            mode,
            expansion: zero_expansion(),
            inverted: false,
        }
    }

    /// Replace the expansion animation.
    pub fn with_expansion(mut self, expansion: Anim<f64>) -> Self {
        self.expansion = expansion;
        self
    }

    /// Set the inversion flag.
    pub fn with_inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    /// Validate the animated properties.
    pub fn validate(&self) -> FeatherResult<()> {
        self.path.validate()?;
        self.expansion.validate()
    }

    /// Outline at `frame`. Sampling failures are reported; callers decide whether to skip.
    pub fn path_at(&self, frame: Frame) -> FeatherResult<Option<MaskPath>> {
        self.path.sample(frame)
    }

    /// Expansion at `frame`; non-finite values collapse to zero.
    pub fn expansion_at(&self, frame: Frame) -> FeatherResult<f64> {
        let e = self.expansion.sample(frame)?;
        Ok(if e.is_finite() { e } else { 0.0 })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mask/descriptor.rs"]
mod tests;
