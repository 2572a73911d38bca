//! Scene component and style documents.
//!
//! Everything here deserializes from host-provided JSON. All style fields
//! carry defaults, so a partial document overrides only what it names.

use crate::foundation::error::{VignetteError, VignetteResult};
use crate::foundation::raster::Rgba8;
use crate::scene::region::PixelRect;

/// Horizontal placement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignX {
    /// Flush left.
    #[default]
    Left,
    /// Centered.
    Center,
    /// Flush right.
    Right,
}

/// Vertical placement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignY {
    /// Flush top.
    #[default]
    Top,
    /// Centered.
    Middle,
    /// Flush bottom.
    Bottom,
}

/// Combined placement anchor for a scene component.
///
/// Deserializes either from an object `{"x": "center", "y": "middle"}` or
/// from a combined string such as `"bottom-center"`; unrecognized words in
/// the string form fall back to top-left.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct Anchor {
    /// Horizontal component.
    pub x: AlignX,
    /// Vertical component.
    pub y: AlignY,
}

impl Anchor {
    /// Build an anchor from its components.
    pub const fn new(x: AlignX, y: AlignY) -> Self {
        Self { x, y }
    }

    fn from_words(s: &str) -> Self {
        let x = if s.contains("right") {
            AlignX::Right
        } else if s.contains("center") {
            AlignX::Center
        } else {
            AlignX::Left
        };
        let y = if s.contains("bottom") {
            AlignY::Bottom
        } else if s.contains("middle") {
            AlignY::Middle
        } else {
            AlignY::Top
        };
        Self { x, y }
    }
}

impl<'de> serde::Deserialize<'de> for Anchor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Words(String),
            Parts {
                #[serde(default)]
                x: AlignX,
                #[serde(default)]
                y: AlignY,
            },
        }
        Ok(match Repr::deserialize(deserializer)? {
            Repr::Words(s) => Anchor::from_words(&s),
            Repr::Parts { x, y } => Anchor { x, y },
        })
    }
}

/// How a source raster is scaled to a destination box. The engine itself
/// never resamples; hosts use [`fit_rect`] to compute the target size and
/// pre-scale their assets.
///
/// [`fit_rect`]: crate::scene::region::fit_rect
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillMode {
    /// Largest size preserving aspect that fits both dimensions.
    Fit,
    /// Match the destination width, height follows aspect.
    #[default]
    Width,
    /// Match the destination height, width follows aspect.
    Height,
}

/// When the inline paste image may share the frame with dialogue text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasteMode {
    /// Never planned into its own region; with text present the text box is
    /// split between the two.
    Off,
    /// Image keeps its own region when text is present; alone it takes over
    /// the text box.
    #[default]
    Mixed,
    /// Image always stays in its configured region.
    Always,
}

/// One styled run on a name plate.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlateRun {
    /// Run text.
    pub text: String,
    /// Run font size in pixels.
    #[serde(default = "default_plate_run_size")]
    pub size_px: u32,
    /// Run color.
    #[serde(default = "default_text_color")]
    pub color: Rgba8,
}

fn default_plate_run_size() -> u32 {
    92
}

fn default_text_color() -> Rgba8 {
    Rgba8::WHITE
}

/// Component payload, discriminated by `type`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ComponentKind {
    /// Full-canvas scene background.
    Background {
        /// Asset key, or a `#rrggbb` hex color for a flat fill.
        source: String,
        /// Pinned backgrounds do not change between passes and are
        /// cacheable.
        #[serde(default)]
        pinned: bool,
    },
    /// Character art keyed by name and emotion variant.
    Character {
        /// Character name (asset namespace).
        name: String,
        /// Emotion variant index.
        emotion: u32,
        /// Pinned character art is cacheable.
        #[serde(default)]
        pinned: bool,
    },
    /// A name plate raster with styled text runs on a shared baseline.
    NamePlate {
        /// Plate asset key.
        source: String,
        /// Runs drawn left to right.
        #[serde(default)]
        runs: Vec<PlateRun>,
    },
    /// A plain wrapped text block at a fixed size.
    Text {
        /// UTF-8 content.
        text: String,
        /// Font size override; the style font size when absent.
        #[serde(default)]
        size_px: Option<u32>,
        /// Color override; white when absent.
        #[serde(default)]
        color: Option<Rgba8>,
        /// Wrap width in pixels; `0` draws one unwrapped line.
        #[serde(default)]
        max_width: u32,
    },
    /// A prepared raster layer: text box frames, vignettes, effects.
    Overlay {
        /// Overlay asset key.
        source: String,
        /// Pinned overlays are cacheable.
        #[serde(default)]
        pinned: bool,
    },
    /// Replay the next cached static layer instead of drawing anything.
    CacheMark,
}

/// One entry of a scene component list, drawn back to front.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneComponent {
    /// Disabled components are skipped entirely.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Placement anchor within the canvas.
    #[serde(default)]
    pub anchor: Anchor,
    /// Pixel offset applied after anchoring.
    #[serde(default)]
    pub offset: (i32, i32),
    /// What to draw.
    #[serde(flatten)]
    pub kind: ComponentKind,
}

fn default_enabled() -> bool {
    true
}

impl SceneComponent {
    /// A component with default placement.
    pub fn new(kind: ComponentKind) -> Self {
        Self { enabled: true, anchor: Anchor::default(), offset: (0, 0), kind }
    }

    /// Whether this component's output is constant across passes and may be
    /// folded into a cached static layer.
    pub fn is_static(&self) -> bool {
        match &self.kind {
            ComponentKind::NamePlate { .. } | ComponentKind::Text { .. } => true,
            ComponentKind::Background { pinned, .. }
            | ComponentKind::Character { pinned, .. }
            | ComponentKind::Overlay { pinned, .. } => *pinned,
            ComponentKind::CacheMark => false,
        }
    }
}

/// Parse a scene component list from its JSON array form.
pub fn parse_components(json: &str) -> VignetteResult<Vec<SceneComponent>> {
    serde_json::from_str(json).map_err(|err| VignetteError::serde(format!("scene components: {err}")))
}

/// Name plate text placement constants.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlateStyle {
    /// Horizontal center of the run row on the plate raster.
    pub center_x: i32,
    /// Shared baseline as a fraction of plate height.
    pub baseline: f32,
    /// Run shadow offset in pixels.
    pub shadow_px: i32,
}

impl Default for PlateStyle {
    fn default() -> Self {
        Self { center_x: 270, baseline: 0.65, shadow_px: 2 }
    }
}

/// Style configuration for the dialogue box, inline paste image, and name
/// plate.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Font family key passed to the text engine.
    pub font_family: String,
    /// Largest permitted dialogue font size in pixels.
    pub font_size: u32,
    /// Smallest size the fitter may fall back to.
    pub min_font_size: u32,
    /// Base dialogue text color.
    pub text_color: Rgba8,
    /// Accent color for matched bracket and quote regions.
    pub bracket_color: Rgba8,
    /// Dialogue text shadow color.
    pub shadow_color: Rgba8,
    /// Shadow offset in pixels; `(0, 0)` disables the shadow pass.
    pub shadow_offset: (i32, i32),
    /// Dialogue text box region.
    pub text_box: PixelRect,
    /// Horizontal alignment of lines inside the text box.
    pub text_align: AlignX,
    /// Vertical alignment of the wrapped block inside the text box.
    pub text_valign: AlignY,
    /// Inline paste image region.
    pub paste_region: PixelRect,
    /// Paste image alignment inside its planned region.
    pub paste_align: AlignX,
    /// Paste image vertical alignment inside its planned region.
    pub paste_valign: AlignY,
    /// When the paste image may appear.
    pub paste_mode: PasteMode,
    /// How hosts should scale the paste image to its region.
    pub paste_fill: FillMode,
    /// Name plate text constants.
    pub plate: PlateStyle,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font_family: "font3".to_owned(),
            font_size: 55,
            min_font_size: 12,
            text_color: Rgba8::WHITE,
            bracket_color: Rgba8::rgb(0xef, 0x4f, 0x54),
            shadow_color: Rgba8::BLACK,
            shadow_offset: (0, 0),
            text_box: PixelRect::new(470, 1080, 1579, 245),
            text_align: AlignX::Left,
            text_valign: AlignY::Top,
            paste_region: PixelRect::new(1500, 200, 800, 800),
            paste_align: AlignX::Center,
            paste_valign: AlignY::Middle,
            paste_mode: PasteMode::Mixed,
            paste_fill: FillMode::Width,
            plate: PlateStyle::default(),
        }
    }
}

impl StyleConfig {
    /// Parse a possibly partial style document; absent fields keep their
    /// built-in defaults.
    pub fn from_json(json: &str) -> VignetteResult<Self> {
        let style: Self = serde_json::from_str(json)
            .map_err(|err| VignetteError::serde(format!("style config: {err}")))?;
        style.validate()?;
        Ok(style)
    }

    /// Check invariants a pass relies on.
    pub fn validate(&self) -> VignetteResult<()> {
        if self.font_family.is_empty() {
            return Err(VignetteError::validation("style: font family must not be empty"));
        }
        if self.min_font_size == 0 {
            return Err(VignetteError::validation("style: minimum font size must be non-zero"));
        }
        if self.min_font_size > self.font_size {
            return Err(VignetteError::validation(format!(
                "style: minimum font size {} exceeds maximum {}",
                self.min_font_size, self.font_size
            )));
        }
        if self.text_box.w == 0 || self.text_box.h == 0 {
            return Err(VignetteError::validation("style: text box must have non-zero size"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
