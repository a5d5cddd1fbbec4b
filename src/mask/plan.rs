use std::sync::Arc;

use smallvec::SmallVec;

use crate::effects::composite::MaskBlend;
use crate::foundation::core::Frame;
use crate::mask::descriptor::{MaskData, MaskMode, MaskPath};

/// Where the fold over a mask set stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FoldState {
    NoMaskProcessed,
    AtLeastOneProcessed,
}

/// One mask resolved at a frame and ready to rasterize.
#[derive(Clone, Debug)]
pub struct PreparedMask {
    /// Position in the original mask set.
    pub index: usize,
    pub path: MaskPath,
    pub expansion: f64,
    /// Inversion after the leading-subtract rule.
    pub inverted: bool,
    pub blend: MaskBlend,
}

pub type MaskPlan = SmallVec<[PreparedMask; 4]>;

/// Resolve `masks` at `frame` into the ordered list of masks that contribute coverage.
///
/// Masks without a closed path at `frame`, or disabled with [`MaskMode::None`], are skipped. A
/// subtract mask with nothing before it has no coverage to remove from, so it is drawn as the
/// complement of its shape instead. The first contributing mask always lands as a union on the
/// empty accumulation.
pub fn plan_masks(masks: &[Arc<MaskData>], frame: Frame) -> MaskPlan {
    let mut plan = MaskPlan::new();
    let mut state = FoldState::NoMaskProcessed;

    for (index, mask) in masks.iter().enumerate() {
        if mask.mode == MaskMode::None {
            tracing::debug!(index, "mask disabled; skipped");
            continue;
        }
        let path = match mask.path_at(frame) {
            Ok(Some(p)) if p.is_closed() => p,
            Ok(Some(_)) => {
                tracing::debug!(index, "mask path is empty or open; skipped");
                continue;
            }
            Ok(None) => {
                tracing::debug!(index, frame = frame.0, "mask path absent; skipped");
                continue;
            }
            Err(e) => {
                tracing::debug!(index, error = %e, "mask path not sampleable; skipped");
                continue;
            }
        };
        let expansion = mask.expansion_at(frame).unwrap_or(0.0);

        let (inverted, blend) = match state {
            FoldState::NoMaskProcessed => (
                mask.inverted ^ (mask.mode == MaskMode::Subtract),
                MaskBlend::Union,
            ),
            FoldState::AtLeastOneProcessed => (mask.inverted, blend_for(mask.mode)),
        };

        plan.push(PreparedMask {
            index,
            path,
            expansion,
            inverted,
            blend,
        });
        state = FoldState::AtLeastOneProcessed;
    }

    plan
}

fn blend_for(mode: MaskMode) -> MaskBlend {
    match mode {
        MaskMode::None | MaskMode::Add => MaskBlend::Union,
        MaskMode::Subtract => MaskBlend::Subtract,
        MaskMode::Intersect => MaskBlend::Intersect,
        MaskMode::Difference => MaskBlend::Difference,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mask/plan.rs"]
mod tests;
