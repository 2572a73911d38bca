//! Scene composition passes.
//!
//! A [`SceneContext`] owns everything that persists between passes: the
//! style document, the static layer cache, and the retained base scene.
//! Passes borrow it exclusively, so a context is single-writer by
//! construction; hosts that compose from several threads give each its own
//! context.

use std::borrow::Cow;

use crate::foundation::error::{VignetteError, VignetteResult};
use crate::foundation::raster::{Canvas, RasterBuf, Rgba8};
use crate::render::backend::{FontRef, GlyphSource, TextEngine};
use crate::render::text::{draw_plain_block, draw_plate_runs, draw_rich_text};
use crate::scene::assets::SceneAssets;
use crate::scene::cache::LayerCache;
use crate::scene::model::{ComponentKind, SceneComponent, StyleConfig};
use crate::scene::region::{aligned_origin, anchored_origin, plan_regions};
use crate::text::scan::count_codepoints;
use crate::text::segment::EmojiRange;

/// Per-scene composition state: style, static layer cache, and the
/// retained base scene.
#[derive(Debug)]
pub struct SceneContext {
    style: StyleConfig,
    cache: LayerCache,
    base_scene: Option<RasterBuf>,
}

impl SceneContext {
    /// Create a context with `style` (validated).
    pub fn new(style: StyleConfig) -> VignetteResult<Self> {
        style.validate()?;
        Ok(Self { style, cache: LayerCache::new(), base_scene: None })
    }

    /// Current style document.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Replace the style document. Cached layers and the retained base
    /// scene were composed under the old style, so both are dropped.
    pub fn set_style(&mut self, style: StyleConfig) -> VignetteResult<()> {
        style.validate()?;
        self.style = style;
        self.cache.clear();
        self.base_scene = None;
        Ok(())
    }

    /// The static layer cache, for orchestrator inspection.
    pub fn cache(&self) -> &LayerCache {
        &self.cache
    }

    /// Drop cached static layers, forcing the next generation pass to
    /// rebuild them. Must be called whenever the static/dynamic grouping of
    /// the scene may have changed.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// The base scene composed by the last generation pass, if any.
    pub fn base_scene(&self) -> Option<&RasterBuf> {
        self.base_scene.as_ref()
    }

    /// Run one generation pass over `components`, back to front, producing
    /// and retaining the base scene.
    ///
    /// Replay mode is chosen for the whole pass up front: if the cache
    /// already has layers, cache marks replay them in order and static
    /// components render without being re-cached. Otherwise consecutive
    /// static components are grouped into segment layers and appended to
    /// the cache as they complete. A component that fails to draw is
    /// skipped with a warning; the pass itself still succeeds.
    #[tracing::instrument(skip_all, fields(components = components.len(), replay = self.cache.has_entries()))]
    pub fn compose_scene(
        &mut self,
        components: &[SceneComponent],
        canvas_size: Canvas,
        assets: &SceneAssets,
        engine: &dyn TextEngine,
    ) -> VignetteResult<&RasterBuf> {
        let mut canvas = RasterBuf::new(canvas_size.width, canvas_size.height);
        let replay = self.cache.has_entries();
        if replay {
            self.cache.reset_cursor();
        } else {
            self.cache.clear();
        }

        // Consecutive static components share one segment layer; hitting a
        // dynamic component seals it into the cache.
        let mut segment: Option<RasterBuf> = None;

        for component in components {
            if matches!(component.kind, ComponentKind::CacheMark) {
                if replay {
                    if let Some(layer) = self.cache.next() {
                        canvas.blit_over(layer, 0, 0);
                    }
                }
                continue;
            }
            if !component.enabled {
                continue;
            }

            if !replay {
                if component.is_static() {
                    if segment.is_none() {
                        segment = Some(RasterBuf::new(canvas_size.width, canvas_size.height));
                    }
                } else if let Some(layer) = segment.take() {
                    self.cache.append(layer)?;
                }
            }

            if let Err(err) = draw_component(
                &mut canvas,
                segment.as_mut(),
                component,
                canvas_size,
                &self.style,
                assets,
                engine,
            ) {
                tracing::warn!(%err, "component draw failed, skipping");
            }
        }

        if let Some(layer) = segment.take() {
            self.cache.append(layer)?;
        }

        Ok(self.base_scene.insert(canvas))
    }

    /// Run one content pass: clone the retained base scene and draw the
    /// dialogue text and optional inline image onto the copy.
    ///
    /// Fails with a validation error when no generation pass has produced a
    /// base scene yet. The base scene itself is never modified, so content
    /// passes are repeatable.
    #[tracing::instrument(skip_all, fields(text_len = text.len(), has_image = image.is_some()))]
    pub fn draw_content(
        &self,
        text: &str,
        emoji: &[EmojiRange],
        image: Option<&RasterBuf>,
        engine: &dyn TextEngine,
        glyphs: &dyn GlyphSource,
    ) -> VignetteResult<RasterBuf> {
        let base = self.base_scene.as_ref().ok_or_else(|| {
            VignetteError::validation("no composed scene: run compose_scene before draw_content")
        })?;
        let mut canvas = base.clone();

        let has_text = !text.is_empty();
        let regions = plan_regions(
            has_text,
            image.is_some(),
            &self.style,
            count_codepoints(text.as_bytes()),
        );

        if let Some(img) = image {
            let (x, y) = aligned_origin(
                regions.image,
                img.width(),
                img.height(),
                self.style.paste_align,
                self.style.paste_valign,
            );
            canvas.blit_over(img, x, y);
        }
        if has_text {
            draw_rich_text(&mut canvas, engine, glyphs, text, emoji, &self.style, regions.text)?;
        }
        Ok(canvas)
    }
}

/// Render one component and blend it onto the canvas (and the open static
/// segment, when present) at its anchored position.
fn draw_component(
    canvas: &mut RasterBuf,
    segment: Option<&mut RasterBuf>,
    component: &SceneComponent,
    canvas_size: Canvas,
    style: &StyleConfig,
    assets: &SceneAssets,
    engine: &dyn TextEngine,
) -> VignetteResult<()> {
    let Some(layer) = render_component(component, canvas_size, style, assets, engine)? else {
        return Ok(());
    };
    let (x, y) =
        anchored_origin(component.anchor, component.offset, canvas_size, layer.width(), layer.height());
    canvas.blit_over(&layer, x, y);
    if let Some(segment) = segment {
        segment.blit_over(&layer, x, y);
    }
    Ok(())
}

/// Produce the layer raster for one component, borrowing straight from the
/// asset store when no per-pass drawing is needed.
fn render_component<'a>(
    component: &SceneComponent,
    canvas_size: Canvas,
    style: &StyleConfig,
    assets: &'a SceneAssets,
    engine: &dyn TextEngine,
) -> VignetteResult<Option<Cow<'a, RasterBuf>>> {
    match &component.kind {
        ComponentKind::Background { source, .. } => {
            if let Some(hex) = source.strip_prefix('#') {
                let color = Rgba8::from_hex(hex)?;
                let mut fill = RasterBuf::new(canvas_size.width, canvas_size.height);
                fill.fill(color);
                return Ok(Some(Cow::Owned(fill)));
            }
            let raster = assets.background(source).ok_or_else(|| {
                VignetteError::validation(format!("background {source:?} not in asset store"))
            })?;
            Ok(Some(Cow::Borrowed(raster)))
        }
        ComponentKind::Character { name, emotion, .. } => {
            let raster = assets.character(name, *emotion).ok_or_else(|| {
                VignetteError::validation(format!(
                    "character {name:?} emotion {emotion} not in asset store"
                ))
            })?;
            Ok(Some(Cow::Borrowed(raster)))
        }
        ComponentKind::NamePlate { source, runs } => {
            let mut plate = assets
                .overlay(source)
                .ok_or_else(|| {
                    VignetteError::validation(format!("name plate {source:?} not in asset store"))
                })?
                .clone();
            draw_plate_runs(&mut plate, engine, &style.font_family, runs, &style.plate)?;
            Ok(Some(Cow::Owned(plate)))
        }
        ComponentKind::Text { text, size_px, color, max_width } => {
            if text.is_empty() {
                return Ok(None);
            }
            let font = FontRef::new(&style.font_family, size_px.unwrap_or(style.font_size));
            let shadow = (style.shadow_offset != (0, 0))
                .then_some((style.shadow_color, style.shadow_offset));
            let block = draw_plain_block(
                engine,
                &font,
                text,
                color.unwrap_or(Rgba8::WHITE),
                shadow,
                *max_width,
            )?;
            Ok(Some(Cow::Owned(block)))
        }
        ComponentKind::Overlay { source, .. } => {
            let raster = assets.overlay(source).ok_or_else(|| {
                VignetteError::validation(format!("overlay {source:?} not in asset store"))
            })?;
            Ok(Some(Cow::Borrowed(raster)))
        }
        ComponentKind::CacheMark => Ok(None),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/compose.rs"]
mod tests;
