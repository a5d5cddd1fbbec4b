use crate::foundation::core::Rect;
use crate::foundation::error::{FeatherError, FeatherResult};

/// Fractional margin added to the right and bottom of the measured mask extent.
///
/// The margin scales with the extent, not with the feather radius. A mask whose extent times the
/// margin is smaller than the radius has its feather clipped at the right and bottom edges; see
/// [`FeatherOpts::feather_fits`].
pub const DEFAULT_BOUNDS_MARGIN: f64 = 0.1;

/// Feather spread in local units at unit scale.
pub const DEFAULT_FEATHER_RADIUS: f64 = 8.0;

/// Options shared by bounds measurement and compositing of one feathered mask.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FeatherOpts {
    /// Blur radius in local units; the Gaussian sigma is a third of it.
    pub feather_radius: f64,
    /// Fractional margin applied to the measured extent.
    pub bounds_margin: f64,
}

impl Default for FeatherOpts {
    fn default() -> Self {
        Self {
            feather_radius: DEFAULT_FEATHER_RADIUS,
            bounds_margin: DEFAULT_BOUNDS_MARGIN,
        }
    }
}

impl FeatherOpts {
    /// Return options with a different feather radius.
    pub fn with_feather_radius(mut self, radius: f64) -> Self {
        self.feather_radius = radius;
        self
    }

    /// Return options with a different bounds margin.
    pub fn with_bounds_margin(mut self, margin: f64) -> Self {
        self.bounds_margin = margin;
        self
    }

    /// Whether `bounds` leave room for the full feather spread past the measured extent.
    ///
    /// `bounds` is the result of measuring with these options. The room past the mask edge on
    /// each axis is `extent · margin / (1 + margin)`.
    pub fn feather_fits(&self, bounds: Rect) -> bool {
        if self.feather_radius <= 0.0 || bounds.width() <= 0.0 || bounds.height() <= 0.0 {
            return true;
        }
        let keep = self.bounds_margin.max(0.0) / (1.0 + self.bounds_margin.max(0.0));
        bounds.x1 * keep >= self.feather_radius && bounds.y1 * keep >= self.feather_radius
    }

    /// Check that both values are finite and non-negative.
    pub fn validate(&self) -> FeatherResult<()> {
        if !self.feather_radius.is_finite() || self.feather_radius < 0.0 {
            return Err(FeatherError::validation(
                "feather radius must be finite and >= 0",
            ));
        }
        if !self.bounds_margin.is_finite() || self.bounds_margin < 0.0 {
            return Err(FeatherError::validation(
                "bounds margin must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mask/opts.rs"]
mod tests;
