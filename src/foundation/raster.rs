//! Premultiplied RGBA8 raster primitives.
//!
//! Every buffer in the engine is premultiplied straight through: components
//! render into layers, layers blend onto the canvas with source-over, and
//! the static layer cache stores finished layers verbatim. Keeping one pixel
//! format end to end means blending is a pure integer kernel with no
//! conversions at the seams.

use crate::foundation::error::{VignetteError, VignetteResult};

/// Premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Straight-alpha RGBA color as it appears in style documents.
///
/// Deserializes from `"#rrggbb"` / `"#rrggbbaa"` hex strings or `[r, g, b]`
/// / `[r, g, b, a]` arrays; serializes back to the hex form.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Straight (non-premultiplied) alpha.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white.
    pub const WHITE: Self = Self { r: 255, g: 255, b: 255, a: 255 };
    /// Opaque black.
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0, a: 255 };

    /// Opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color from RGBA channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a `#rrggbb` or `#rrggbbaa` hex string (leading `#` optional).
    pub fn from_hex(s: &str) -> VignetteResult<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if !hex.is_ascii() {
            return Err(VignetteError::validation(format!("invalid hex color {s:?}")));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| VignetteError::validation(format!("invalid hex color {s:?}")))
        };
        match hex.len() {
            6 => Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => Err(VignetteError::validation(format!(
                "invalid hex color {s:?}: expected #rrggbb or #rrggbbaa"
            ))),
        }
    }

    /// Premultiply into the pixel format used by [`RasterBuf`].
    pub fn to_premul(self) -> PremulRgba8 {
        let premul = |c: u8| (((u32::from(c) * u32::from(self.a)) + 127) / 255) as u8;
        [premul(self.r), premul(self.g), premul(self.b), self.a]
    }
}

impl serde::Serialize for Rgba8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if self.a == 255 {
            serializer.serialize_str(&format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b))
        } else {
            serializer.serialize_str(&format!(
                "#{:02x}{:02x}{:02x}{:02x}",
                self.r, self.g, self.b, self.a
            ))
        }
    }
}

impl<'de> serde::Deserialize<'de> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Rgba([u8; 4]),
            Rgb([u8; 3]),
        }
        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => Rgba8::from_hex(&s).map_err(serde::de::Error::custom),
            Repr::Rgba([r, g, b, a]) => Ok(Rgba8::rgba(r, g, b, a)),
            Repr::Rgb([r, g, b]) => Ok(Rgba8::rgb(r, g, b)),
        }
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels (non-zero).
    pub width: u32,
    /// Height in pixels (non-zero).
    pub height: u32,
}

impl Canvas {
    /// Create a canvas size, rejecting zero dimensions.
    pub fn new(width: u32, height: u32) -> VignetteResult<Self> {
        if width == 0 || height == 0 {
            return Err(VignetteError::validation(format!(
                "canvas dimensions must be non-zero, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }
}

/// Owned premultiplied RGBA8 pixel buffer, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterBuf {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RasterBuf {
    /// Create a fully transparent buffer.
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize * 4;
        Self { width, height, data: vec![0; len] }
    }

    /// Wrap existing premultiplied RGBA8 bytes (4 bytes per pixel, row-major).
    pub fn from_premul_data(width: u32, height: u32, data: Vec<u8>) -> VignetteResult<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(VignetteError::validation(format!(
                "raster data is {} bytes, {width}x{height} needs {expected}",
                data.len()
            )));
        }
        Ok(Self { width, height, data })
    }

    /// Buffer width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Buffer height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw premultiplied RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Read one pixel.
    ///
    /// # Panics
    ///
    /// Panics when `(x, y)` is outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> PremulRgba8 {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let i = self.index(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    /// Overwrite every pixel with `color` (no blending).
    pub fn fill(&mut self, color: Rgba8) {
        let px = color.to_premul();
        for chunk in self.data.chunks_exact_mut(4) {
            chunk.copy_from_slice(&px);
        }
    }

    /// Overwrite an axis-aligned rectangle with `color`, clipped to the
    /// buffer (no blending).
    pub fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Rgba8) {
        let px = color.to_premul();
        let x0 = i64::from(x).max(0);
        let y0 = i64::from(y).max(0);
        let x1 = (i64::from(x) + i64::from(w)).min(i64::from(self.width));
        let y1 = (i64::from(y) + i64::from(h)).min(i64::from(self.height));
        if x1 <= x0 {
            return;
        }
        for row in y0..y1 {
            let start = (row as usize * self.width as usize + x0 as usize) * 4;
            let end = (row as usize * self.width as usize + x1 as usize) * 4;
            for chunk in self.data[start..end].chunks_exact_mut(4) {
                chunk.copy_from_slice(&px);
            }
        }
    }

    /// Source-over blend `src` onto `self` with its top-left corner at
    /// `(x, y)`. Regions falling outside the buffer are clipped.
    pub fn blit_over(&mut self, src: &RasterBuf, x: i32, y: i32) {
        let x0 = i64::from(x).max(0);
        let y0 = i64::from(y).max(0);
        let x1 = (i64::from(x) + i64::from(src.width)).min(i64::from(self.width));
        let y1 = (i64::from(y) + i64::from(src.height)).min(i64::from(self.height));
        for dy in y0..y1 {
            let sy = (dy - i64::from(y)) as u32;
            for dx in x0..x1 {
                let sx = (dx - i64::from(x)) as u32;
                let s = src.pixel(sx, sy);
                if s[3] == 0 {
                    continue;
                }
                let i = self.index(dx as u32, dy as u32);
                let d = [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]];
                self.data[i..i + 4].copy_from_slice(&over(d, s));
            }
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

/// Source-over in premultiplied space: `out = src + dst * (1 - src.a)`.
fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let inv = 255 - u16::from(src[3]);
    [
        src[0].saturating_add(mul_div255(u16::from(dst[0]), inv)),
        src[1].saturating_add(mul_div255(u16::from(dst[1]), inv)),
        src[2].saturating_add(mul_div255(u16::from(dst[2]), inv)),
        src[3].saturating_add(mul_div255(u16::from(dst[3]), inv)),
    ]
}
