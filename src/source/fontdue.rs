//! Glyph source backed by the pure-Rust fontdue rasterizer.

use std::path::Path;

use crate::error::SourceError;
use crate::source::{
    Bitmap, FaceMetrics, GlyphMetrics, GlyphSource, PixelFormat, RenderedGlyph, from_pixels,
};

/// The shipped [`GlyphSource`]. Stateless; every face owns its parsed
/// font data.
#[derive(Debug, Clone, Copy, Default)]
pub struct FontdueSource;

impl FontdueSource {
    pub fn new() -> Self {
        Self
    }
}

/// One parsed face scaled to a fixed pixel size.
pub struct FontdueFace {
    font: fontdue::Font,
    px: f32,
    metrics: FaceMetrics,
}

impl GlyphSource for FontdueSource {
    type Face = FontdueFace;

    fn open_face(
        &mut self,
        path: &Path,
        face_index: u32,
        pixel_size: u32,
    ) -> Result<Self::Face, SourceError> {
        let data = std::fs::read(path).map_err(|e| SourceError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let settings = fontdue::FontSettings {
            collection_index: face_index,
            ..fontdue::FontSettings::default()
        };
        let font = fontdue::Font::from_bytes(data, settings).map_err(|e| SourceError::Parse {
            path: path.to_path_buf(),
            face_index,
            reason: e.to_owned(),
        })?;

        let px = pixel_size as f32;
        let line = font
            .horizontal_line_metrics(px)
            .ok_or(SourceError::NoMetrics { pixel_size })?;

        // fontdue has no hhea advanceWidthMax accessor; scan the glyph
        // table once at open time.
        let mut max_advance = 0.0_f32;
        for id in 0..font.glyph_count() {
            max_advance = max_advance.max(font.metrics_indexed(id, px).advance_width);
        }

        let metrics = FaceMetrics {
            ascender: from_pixels(line.ascent),
            descender: from_pixels(line.descent),
            height: from_pixels(line.new_line_size),
            max_advance: from_pixels(max_advance),
        };
        Ok(FontdueFace { font, px, metrics })
    }

    fn glyph_index(&self, face: &Self::Face, code_point: u32) -> u16 {
        // Surrogates and out-of-range values cannot be chars and map to 0.
        char::from_u32(code_point).map_or(0, |ch| face.font.lookup_glyph_index(ch))
    }

    fn probe_glyph(&self, face: &Self::Face, glyph: u16) -> Result<(u32, u32), SourceError> {
        let m = face.font.metrics_indexed(glyph, face.px);
        Ok((m.width as u32, m.height as u32))
    }

    fn render_glyph(&self, face: &Self::Face, glyph: u16) -> Result<RenderedGlyph, SourceError> {
        let (m, data) = face.font.rasterize_indexed(glyph, face.px);

        let width = m.width as i32 * 64;
        let height = m.height as i32 * 64;
        let hori_bearing_x = m.xmin * 64;
        // ymin is the bottom edge relative to the baseline; the bearing
        // is the top edge.
        let hori_bearing_y = (m.ymin + m.height as i32) * 64;
        let hori_advance = from_pixels(m.advance_width);

        // Vertical metrics the way FreeType synthesizes them for fonts
        // without a vmtx table.
        let vert_advance = if m.advance_height > 0.0 {
            from_pixels(m.advance_height)
        } else {
            face.metrics.ascender - face.metrics.descender
        };
        let metrics = GlyphMetrics {
            width,
            height,
            hori_bearing_x,
            hori_bearing_y,
            hori_advance,
            vert_bearing_x: hori_bearing_x - hori_advance / 2,
            vert_bearing_y: (vert_advance - height) / 2,
            vert_advance,
        };

        Ok(RenderedGlyph {
            bitmap: Bitmap {
                width: m.width as u32,
                height: m.height as u32,
                format: PixelFormat::Gray8,
                data,
            },
            metrics,
        })
    }

    fn face_metrics(&self, face: &Self::Face) -> FaceMetrics {
        face.metrics
    }
}
