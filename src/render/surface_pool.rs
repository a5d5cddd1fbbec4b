use crate::foundation::core::PixelSize;
use crate::foundation::error::{FeatherError, FeatherResult};
use std::collections::HashMap;

/// Pool configuration for raster surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SurfacePoolOpts {
    /// Maximum bytes retained for reuse across all buckets.
    pub max_pool_bytes: usize,
    /// Maximum number of retained surfaces per `(w,h)` bucket.
    pub max_surfaces_per_bucket: usize,
    /// Upper bound on bytes held by surfaces that are currently borrowed.
    ///
    /// `None` leaves allocation unbounded. A borrow that would exceed the budget fails with an
    /// allocation error.
    pub max_live_bytes: Option<usize>,
}

impl Default for SurfacePoolOpts {
    fn default() -> Self {
        Self {
            max_pool_bytes: 64 * 1024 * 1024,
            max_surfaces_per_bucket: 4,
            max_live_bytes: None,
        }
    }
}

/// Allocation and reuse counters.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SurfacePoolStats {
    /// Surfaces currently borrowed and not yet released.
    pub live_surfaces: usize,
    /// Bytes held by borrowed surfaces.
    pub live_bytes: usize,
    /// Surfaces parked for reuse.
    pub retained_surfaces: usize,
    /// Bytes parked for reuse.
    pub retained_bytes: usize,
    /// Fresh pixmap allocations.
    pub alloc_surfaces: u64,
    /// Bytes of fresh pixmap allocations.
    pub alloc_bytes: u64,
    /// Borrows served from a bucket.
    pub reused_surfaces: u64,
    /// Releases that were dropped because a cap was hit.
    pub dropped_on_release: u64,
    /// Borrows refused by the live budget or size limits.
    pub failed_allocations: u64,
}

struct Bucket {
    size: PixelSize,
    surfaces: Vec<vello_cpu::Pixmap>,
}

/// Bounded pooled allocator for CPU pixmaps.
///
/// Keyed by `(width, height)`. Reused pixmaps are cleared before they are handed out, so a borrow
/// always starts fully transparent.
pub(crate) struct SurfacePool {
    opts: SurfacePoolOpts,
    stats: SurfacePoolStats,

    bucket_idx_by_size: HashMap<PixelSize, usize>,
    buckets: Vec<Bucket>,
}

impl SurfacePool {
    pub(crate) fn new(opts: SurfacePoolOpts) -> Self {
        Self {
            opts,
            stats: SurfacePoolStats::default(),
            bucket_idx_by_size: HashMap::new(),
            buckets: Vec::new(),
        }
    }

    pub(crate) fn stats(&self) -> SurfacePoolStats {
        self.stats.clone()
    }

    pub(crate) fn borrow(&mut self, size: PixelSize) -> FeatherResult<vello_cpu::Pixmap> {
        let (w, h) = match pixmap_dims(size) {
            Ok(d) => d,
            Err(e) => {
                self.stats.failed_allocations = self.stats.failed_allocations.saturating_add(1);
                return Err(e);
            }
        };
        let bytes = size.byte_len();
        if let Some(budget) = self.opts.max_live_bytes
            && self.stats.live_bytes.saturating_add(bytes) > budget
        {
            self.stats.failed_allocations = self.stats.failed_allocations.saturating_add(1);
            return Err(FeatherError::allocation(format!(
                "surface {}x{} exceeds live budget ({} of {budget} bytes in use)",
                size.width, size.height, self.stats.live_bytes
            )));
        }

        self.stats.live_surfaces = self.stats.live_surfaces.saturating_add(1);
        self.stats.live_bytes = self.stats.live_bytes.saturating_add(bytes);

        if let Some(&bi) = self.bucket_idx_by_size.get(&size)
            && let Some(mut p) = self.buckets[bi].surfaces.pop()
        {
            self.stats.retained_surfaces = self.stats.retained_surfaces.saturating_sub(1);
            self.stats.retained_bytes = self.stats.retained_bytes.saturating_sub(bytes);
            self.stats.reused_surfaces = self.stats.reused_surfaces.saturating_add(1);
            p.data_as_u8_slice_mut().fill(0);
            return Ok(p);
        }

        self.stats.alloc_surfaces = self.stats.alloc_surfaces.saturating_add(1);
        self.stats.alloc_bytes = self.stats.alloc_bytes.saturating_add(bytes as u64);
        Ok(vello_cpu::Pixmap::new(w, h))
    }

    pub(crate) fn release(&mut self, size: PixelSize, pixmap: vello_cpu::Pixmap) {
        self.detach(size);

        if self.opts.max_pool_bytes == 0 || self.opts.max_surfaces_per_bucket == 0 {
            self.stats.dropped_on_release = self.stats.dropped_on_release.saturating_add(1);
            return;
        }

        let bytes = size.byte_len();
        if self.stats.retained_bytes.saturating_add(bytes) > self.opts.max_pool_bytes {
            self.stats.dropped_on_release = self.stats.dropped_on_release.saturating_add(1);
            return;
        }

        let bi = match self.bucket_idx_by_size.get(&size).copied() {
            Some(i) => i,
            None => {
                let i = self.buckets.len();
                self.buckets.push(Bucket {
                    size,
                    surfaces: Vec::new(),
                });
                self.bucket_idx_by_size.insert(size, i);
                i
            }
        };

        let bucket = &mut self.buckets[bi];
        debug_assert_eq!(bucket.size, size);
        if bucket.surfaces.len() >= self.opts.max_surfaces_per_bucket {
            self.stats.dropped_on_release = self.stats.dropped_on_release.saturating_add(1);
            return;
        }

        bucket.surfaces.push(pixmap);
        self.stats.retained_surfaces = self.stats.retained_surfaces.saturating_add(1);
        self.stats.retained_bytes = self.stats.retained_bytes.saturating_add(bytes);
    }

    /// Stop tracking a borrowed surface whose pixmap left the pool for good.
    pub(crate) fn detach(&mut self, size: PixelSize) {
        self.stats.live_surfaces = self.stats.live_surfaces.saturating_sub(1);
        self.stats.live_bytes = self.stats.live_bytes.saturating_sub(size.byte_len());
    }

    /// Drop every retained pixmap.
    pub(crate) fn purge(&mut self) {
        for bucket in &mut self.buckets {
            bucket.surfaces.clear();
        }
        self.stats.retained_surfaces = 0;
        self.stats.retained_bytes = 0;
    }
}

fn pixmap_dims(size: PixelSize) -> FeatherResult<(u16, u16)> {
    if size.width == 0 || size.height == 0 {
        return Err(FeatherError::allocation(format!(
            "surface must be non-empty, got {}x{}",
            size.width, size.height
        )));
    }
    let w: u16 = size
        .width
        .try_into()
        .map_err(|_| FeatherError::allocation(format!("surface width exceeds u16: {}", size.width)))?;
    let h: u16 = size.height.try_into().map_err(|_| {
        FeatherError::allocation(format!("surface height exceeds u16: {}", size.height))
    })?;
    Ok((w, h))
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface_pool.rs"]
mod tests;
