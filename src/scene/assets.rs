//! Prepared raster store.
//!
//! All decoding and IO happens before composition: the host inserts ready
//! premultiplied rasters under namespaced keys and passes only look them
//! up. Emoji art is keyed by code point sequence (`emoji_u1f600` style) and
//! falls back to the base glyph when a modifier-qualified sequence has no
//! dedicated art.

use std::collections::HashMap;

use crate::foundation::raster::RasterBuf;
use crate::render::backend::GlyphSource;
use crate::text::scan::next_codepoint;

/// Derive the storage key for an emoji sequence: `emoji_u` followed by the
/// lowercase hex code points joined with `_`.
pub fn emoji_key(emoji: &str) -> String {
    let bytes = emoji.as_bytes();
    let mut key = String::from("emoji_u");
    let mut offset = 0;
    let mut first = true;
    while offset < bytes.len() {
        let (cp, len) = next_codepoint(bytes, offset);
        offset += len;
        if !first {
            key.push('_');
        }
        key.push_str(&format!("{cp:04x}"));
        first = false;
    }
    key
}

/// Prepared rasters for scene composition, keyed by namespace.
#[derive(Clone, Debug, Default)]
pub struct SceneAssets {
    rasters: HashMap<String, RasterBuf>,
}

impl SceneAssets {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rasters.
    pub fn len(&self) -> usize {
        self.rasters.len()
    }

    /// True when nothing has been inserted.
    pub fn is_empty(&self) -> bool {
        self.rasters.is_empty()
    }

    /// Insert a background raster under `name`.
    pub fn insert_background(&mut self, name: &str, raster: RasterBuf) {
        self.rasters.insert(format!("background/{name}"), raster);
    }

    /// Insert character art for `name` at emotion variant `emotion`.
    pub fn insert_character(&mut self, name: &str, emotion: u32, raster: RasterBuf) {
        self.rasters.insert(format!("chara/{name}/{emotion}"), raster);
    }

    /// Insert an overlay raster (text boxes, plates, effects) under `name`.
    pub fn insert_overlay(&mut self, name: &str, raster: RasterBuf) {
        self.rasters.insert(format!("overlay/{name}"), raster);
    }

    /// Insert emoji art for the glyph text `emoji` (for example `"😀"`).
    pub fn insert_emoji(&mut self, emoji: &str, raster: RasterBuf) {
        self.rasters.insert(format!("emoji/{}", emoji_key(emoji)), raster);
    }

    /// Background raster for `name`; overlays double as backgrounds when no
    /// dedicated one exists.
    pub fn background(&self, name: &str) -> Option<&RasterBuf> {
        self.rasters
            .get(&format!("background/{name}"))
            .or_else(|| self.rasters.get(&format!("overlay/{name}")))
    }

    /// Character art for `name` at `emotion`.
    pub fn character(&self, name: &str, emotion: u32) -> Option<&RasterBuf> {
        self.rasters.get(&format!("chara/{name}/{emotion}"))
    }

    /// Overlay raster for `name`.
    pub fn overlay(&self, name: &str) -> Option<&RasterBuf> {
        self.rasters.get(&format!("overlay/{name}"))
    }

    fn emoji(&self, emoji: &str) -> Option<&RasterBuf> {
        let key = emoji_key(emoji);
        if let Some(raster) = self.rasters.get(&format!("emoji/{key}")) {
            return Some(raster);
        }
        // Modifier fallback: a skin-tone or variation qualified sequence
        // without dedicated art retries the base glyph.
        let (base, _) = key.rsplit_once('_')?;
        if !base.starts_with("emoji_u") {
            return None;
        }
        tracing::debug!(key, base, "emoji art missing, trying base glyph");
        self.rasters.get(&format!("emoji/{base}"))
    }
}

impl GlyphSource for SceneAssets {
    fn glyph_lookup(&self, emoji: &str, _size_px: u32) -> Option<&RasterBuf> {
        // Art is stored pre-scaled; the requested size is advisory.
        self.emoji(emoji)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/assets.rs"]
mod tests;
