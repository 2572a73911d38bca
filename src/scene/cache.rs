//! Replayable static layer cache.
//!
//! A generation pass composes groups of consecutive static components into
//! segment layers and appends them here; later passes replay the layers in
//! insertion order wherever a cache mark appears, skipping the re-render.
//! The cache cannot see component classification itself: whenever the
//! static/dynamic grouping of a scene may have changed, the orchestrator
//! must [`clear`](LayerCache::clear) it before the next pass.

use crate::foundation::error::{VignetteError, VignetteResult};
use crate::foundation::raster::RasterBuf;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum CacheState {
    /// No entries since the last clear.
    #[default]
    Empty,
    /// A build pass is appending layers.
    Building,
    /// A replay pass is walking layers.
    Replaying,
}

/// Ordered store of composed static layers.
#[derive(Debug, Default)]
pub struct LayerCache {
    entries: Vec<RasterBuf>,
    cursor: Option<usize>,
    state: CacheState,
}

impl LayerCache {
    /// An empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// True once at least one layer has been appended since the last clear.
    /// Orchestrators pick build or replay mode for a whole pass from this.
    pub fn has_entries(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Number of cached layers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no layers are cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append a composed static layer during a build pass.
    ///
    /// Rejected while a replay pass is active: a build interleaved with a
    /// replay means the orchestration is inconsistent.
    pub fn append(&mut self, layer: RasterBuf) -> VignetteResult<()> {
        if self.state == CacheState::Replaying {
            return Err(VignetteError::cache("append while a replay pass is active"));
        }
        self.state = CacheState::Building;
        self.entries.push(layer);
        tracing::debug!(layers = self.entries.len(), "static layer cached");
        Ok(())
    }

    /// Start (or restart) a replay pass: the cursor returns to the first
    /// layer. Replays are repeatable; entries are kept until
    /// [`clear`](Self::clear).
    pub fn reset_cursor(&mut self) {
        self.state = CacheState::Replaying;
        self.cursor = if self.entries.is_empty() { None } else { Some(0) };
    }

    /// Next layer of the replay pass, or `None` once past the last entry
    /// (the caller draws nothing for that cache mark).
    pub fn next(&mut self) -> Option<&RasterBuf> {
        if self.state != CacheState::Replaying {
            tracing::warn!("cache layer requested outside a replay pass");
            return None;
        }
        let index = self.cursor?;
        self.cursor = if index + 1 < self.entries.len() { Some(index + 1) } else { None };
        Some(&self.entries[index])
    }

    /// Drop all layers and return to the empty state.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
        self.state = CacheState::Empty;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/cache.rs"]
mod tests;
