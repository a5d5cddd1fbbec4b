use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use crate::foundation::core::AssetId;
use crate::graphics::snapshot::Snapshot;
use crate::render::context::RenderContext;
use crate::render::surface_pool::SurfacePoolOpts;

/// Render cache configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderCacheOpts {
    /// Surface pool of the owned render context.
    pub pool: SurfacePoolOpts,
    /// Upper bound on texture bytes held by cached snapshots. Zero disables snapshot caching.
    pub max_snapshot_bytes: usize,
}

impl Default for RenderCacheOpts {
    fn default() -> Self {
        Self {
            pool: SurfacePoolOpts::default(),
            max_snapshot_bytes: 128 * 1024 * 1024,
        }
    }
}

/// Snapshot cache counters.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RenderCacheStats {
    pub entries: usize,
    pub snapshot_bytes: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

struct Entry {
    snapshot: Arc<Snapshot>,
    bytes: usize,
}

/// Per-thread render state: the render context plus snapshots keyed by asset identity.
///
/// One entry per asset. Lookups and inserts move an entry to the most recently used end; inserts
/// evict from the other end until the byte budget holds.
pub struct RenderCache {
    ctx: RenderContext,
    opts: RenderCacheOpts,
    entries: HashMap<AssetId, Entry>,
    lru: VecDeque<AssetId>,
    stats: RenderCacheStats,
}

impl RenderCache {
    pub fn new(opts: RenderCacheOpts) -> Self {
        Self {
            ctx: RenderContext::new(opts.pool),
            opts,
            entries: HashMap::new(),
            lru: VecDeque::new(),
            stats: RenderCacheStats::default(),
        }
    }

    /// Cached snapshot for `asset`, at whatever scale it was rendered.
    pub fn get_snapshot(&mut self, asset: AssetId) -> Option<Arc<Snapshot>> {
        let found = self.entries.get(&asset).map(|e| Arc::clone(&e.snapshot));
        match &found {
            Some(_) => {
                self.stats.hits = self.stats.hits.saturating_add(1);
                self.touch(asset);
                tracing::debug!(asset = asset.0, "snapshot cache hit");
            }
            None => {
                self.stats.misses = self.stats.misses.saturating_add(1);
                tracing::debug!(asset = asset.0, "snapshot cache miss");
            }
        }
        found
    }

    /// Cached snapshot for `asset` only if it was rendered at exactly `scale`.
    pub fn get_snapshot_at(&mut self, asset: AssetId, scale: f64) -> Option<Arc<Snapshot>> {
        let matches = self
            .entries
            .get(&asset)
            .is_some_and(|e| e.snapshot.scale_factor() == scale);
        if !matches {
            self.stats.misses = self.stats.misses.saturating_add(1);
            return None;
        }
        self.get_snapshot(asset)
    }

    /// Store `snapshot` for `asset`, replacing any previous one.
    ///
    /// Returns `false` when the snapshot alone exceeds the byte budget and was not stored.
    pub fn insert_snapshot(&mut self, asset: AssetId, snapshot: Arc<Snapshot>) -> bool {
        let bytes = snapshot.memory_usage();
        self.remove(asset);
        if bytes > self.opts.max_snapshot_bytes {
            return false;
        }

        while self.stats.snapshot_bytes.saturating_add(bytes) > self.opts.max_snapshot_bytes {
            let Some(oldest) = self.lru.pop_front() else {
                break;
            };
            if let Some(e) = self.entries.remove(&oldest) {
                self.stats.snapshot_bytes = self.stats.snapshot_bytes.saturating_sub(e.bytes);
                self.stats.evictions = self.stats.evictions.saturating_add(1);
                tracing::debug!(asset = oldest.0, bytes = e.bytes, "snapshot evicted");
            }
        }

        self.entries.insert(asset, Entry { snapshot, bytes });
        self.lru.push_back(asset);
        self.stats.snapshot_bytes = self.stats.snapshot_bytes.saturating_add(bytes);
        self.stats.entries = self.entries.len();
        true
    }

    pub fn remove(&mut self, asset: AssetId) -> Option<Arc<Snapshot>> {
        let e = self.entries.remove(&asset)?;
        self.lru.retain(|&a| a != asset);
        self.stats.snapshot_bytes = self.stats.snapshot_bytes.saturating_sub(e.bytes);
        self.stats.entries = self.entries.len();
        Some(e.snapshot)
    }

    /// Drop every snapshot and all pooled surfaces.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
        self.stats.entries = 0;
        self.stats.snapshot_bytes = 0;
        self.ctx.purge();
    }

    pub fn stats(&self) -> RenderCacheStats {
        self.stats.clone()
    }

    pub fn context(&self) -> &RenderContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut RenderContext {
        &mut self.ctx
    }

    fn touch(&mut self, asset: AssetId) {
        if let Some(pos) = self.lru.iter().position(|&a| a == asset) {
            self.lru.remove(pos);
        }
        self.lru.push_back(asset);
    }
}

impl Default for RenderCache {
    fn default() -> Self {
        Self::new(RenderCacheOpts::default())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/cache/render_cache.rs"]
mod tests;
