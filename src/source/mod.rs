//! Rasterization engine boundary.
//!
//! The build pipeline only sees this module's types: an opened face, its
//! line metrics, and rendered glyph bitmaps with FreeType-shaped 26.6
//! fixed-point metrics. The shipped backend is [`FontdueSource`];
//! [`SyntheticSource`] is a deterministic scripted backend for tests and
//! embedders that need builds without font files.

use std::path::Path;

use crate::error::SourceError;

pub mod fontdue;
pub mod synthetic;

pub use self::fontdue::FontdueSource;
pub use self::synthetic::{FacePlan, SyntheticSource};

/// 26.6 fixed-point pixel value (1/64 pixel), the `FreeType` convention.
pub type F26Dot6 = i32;

/// Convert a 26.6 fixed-point value to float pixels.
pub fn to_pixels(v: F26Dot6) -> f32 {
    v as f32 / 64.0
}

/// Convert float pixels to 26.6 fixed point, rounding to the nearest 1/64.
pub fn from_pixels(v: f32) -> F26Dot6 {
    (v * 64.0).round() as F26Dot6
}

/// Pixel layout of a rendered glyph bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 8-bit antialiased coverage, one byte per pixel. The only format
    /// the packer accepts.
    Gray8,
    /// 1-bit monochrome.
    Mono,
    /// 32-bit color (embedded bitmap strikes).
    Bgra8,
}

/// One rendered glyph bitmap.
///
/// `data` is row-major from the top-left; for `Gray8` it holds exactly
/// `width * height` bytes. Other formats are backend-defined and never
/// consumed by the packer.
#[derive(Debug, Clone)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub data: Vec<u8>,
}

/// Per-glyph metrics in 26.6 fixed point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlyphMetrics {
    pub width: F26Dot6,
    pub height: F26Dot6,
    pub hori_bearing_x: F26Dot6,
    /// Distance from the baseline up to the bitmap's top edge.
    pub hori_bearing_y: F26Dot6,
    pub hori_advance: F26Dot6,
    pub vert_bearing_x: F26Dot6,
    pub vert_bearing_y: F26Dot6,
    pub vert_advance: F26Dot6,
}

/// Face-wide metrics at the opened pixel size, in 26.6 fixed point.
///
/// `descender` is negative for glyphs reaching below the baseline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FaceMetrics {
    pub ascender: F26Dot6,
    pub descender: F26Dot6,
    pub height: F26Dot6,
    pub max_advance: F26Dot6,
}

/// A rendered glyph: bitmap plus its metrics.
#[derive(Debug, Clone)]
pub struct RenderedGlyph {
    pub bitmap: Bitmap,
    pub metrics: GlyphMetrics,
}

/// Capability trait for rasterization backends.
///
/// A face is opened once per registered font at a fixed pixel size and
/// dropped when the build ends. Glyph indices are backend values; index 0
/// always means "this face has no glyph for that code point".
pub trait GlyphSource {
    /// Handle to one opened face at a fixed pixel size.
    type Face;

    fn open_face(
        &mut self,
        path: &Path,
        face_index: u32,
        pixel_size: u32,
    ) -> Result<Self::Face, SourceError>;

    /// Map a code point to the face's glyph index; 0 when unmapped.
    fn glyph_index(&self, face: &Self::Face, code_point: u32) -> u16;

    /// Bitmap dimensions the glyph would render at, without rendering it.
    fn probe_glyph(&self, face: &Self::Face, glyph: u16) -> Result<(u32, u32), SourceError>;

    /// Render one glyph to a bitmap with full metrics.
    fn render_glyph(&self, face: &Self::Face, glyph: u16) -> Result<RenderedGlyph, SourceError>;

    /// Face-wide line metrics at the opened pixel size.
    fn face_metrics(&self, face: &Self::Face) -> FaceMetrics;
}
