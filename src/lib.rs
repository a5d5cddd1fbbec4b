//! Feathered mask compositing for frame-based 2D animation.
//!
//! A layer's animated vector masks are combined into one soft-edged alpha raster:
//!
//! - Describe masks with [`MaskData`] (animated path, mode, expansion, inversion)
//! - Build a [`FeatherMask`] for a layer at a frame
//! - Draw it onto a [`Canvas`] or render a [`Snapshot`] through a per-thread [`RenderCache`]
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod cache;
pub(crate) mod effects;
pub(crate) mod graphics;
pub(crate) mod mask;
pub(crate) mod render;

pub use crate::foundation::core::{Affine, AssetId, BezPath, Frame, PixelSize, Point, Rect, Vec2};
pub use crate::foundation::error::{FeatherError, FeatherResult};

pub use crate::animation::anim::{
    Anim, Expr, InterpMode, Keyframe, Keyframes, Lerp, LoopMode,
};
pub use crate::animation::ease::Ease;
pub use crate::cache::fingerprint::{InputFingerprint, fingerprint_masks};
pub use crate::cache::render_cache::{RenderCache, RenderCacheOpts, RenderCacheStats};
pub use crate::effects::blur::{GaussianBlurFilter, MAX_BLUR_RADIUS_PX};
pub use crate::effects::composite::{MaskBlend, blend_mask_at};
pub use crate::effects::filter::{EdgeMode, FilterSource, FilterTarget, LayerFilter};
pub use crate::graphics::feather_mask::FeatherMask;
pub use crate::graphics::graphic::Graphic;
pub use crate::graphics::snapshot::Snapshot;
pub use crate::mask::bounds::measure_feather_mask_bounds;
pub use crate::mask::compositor::composite_feather_masks;
pub use crate::mask::descriptor::{MaskData, MaskMode, MaskPath};
pub use crate::mask::opts::{DEFAULT_BOUNDS_MARGIN, DEFAULT_FEATHER_RADIUS, FeatherOpts};
pub use crate::mask::plan::{FoldState, MaskPlan, PreparedMask, plan_masks};
pub use crate::render::canvas::{Canvas, FrameRGBA};
pub use crate::render::context::{RenderContext, Surface};
pub use crate::render::surface_pool::{SurfacePoolOpts, SurfacePoolStats};
pub use crate::render::texture::Texture;
