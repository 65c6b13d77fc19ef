//! Shelf packer: a left-to-right, top-to-bottom cursor over fixed pages.

use crate::collect::GlyphDescriptor;
use crate::logger::BuildLog;
use crate::source::{Bitmap, PixelFormat, RenderedGlyph, to_pixels};

use super::GlyphRecord;
use super::page::PageBuffer;

/// Page geometry and packing knobs.
#[derive(Debug, Clone, Copy)]
pub struct PackParams {
    pub page_width: u32,
    pub page_height: u32,
    /// Spacing between cells and around the page border, in pixels.
    pub texture_edge: u32,
    /// Transparent padding baked around each glyph bitmap, in pixels.
    pub glyph_edge: u32,
    /// Cycle overflowing glyph runs through the R, G, B, A channels
    /// before starting a new page.
    pub multi_channel: bool,
}

/// Shelf packer over a reusable page buffer.
///
/// Glyphs land on left-to-right shelves; a shelf is as tall as its tallest
/// cell. A glyph that would cross the right edge wraps to a new shelf, and
/// one that would cross the bottom edge either hands the page to `flush`
/// (single-channel) or restarts at the top in the next channel, flushing
/// only once the alpha channel fills. Feed it glyphs in `packing_order`
/// for dense pages; the packer itself accepts any order.
///
/// A glyph taller than the page interior is still placed after the wrap
/// with no second fit check; its pixels are clipped to the page and its
/// record keeps the computed rectangle.
pub struct AtlasPacker<'a, F: FnMut(&PageBuffer, u32, u32)> {
    params: &'a PackParams,
    page: PageBuffer,
    x: u32,
    y: u32,
    /// Height of the tallest cell on the current shelf.
    shelf: u32,
    channel: u8,
    page_no: u32,
    page_glyphs: u32,
    flush: F,
}

impl<'a, F: FnMut(&PageBuffer, u32, u32)> AtlasPacker<'a, F> {
    /// `flush` receives each finished page, its 1-based number, and the
    /// number of glyphs placed on it.
    pub fn new(params: &'a PackParams, flush: F) -> Self {
        Self {
            params,
            page: PageBuffer::new(params.page_width, params.page_height),
            x: params.texture_edge,
            y: params.texture_edge,
            shelf: 0,
            channel: 0,
            page_no: 1,
            page_glyphs: 0,
            flush,
        }
    }

    /// Place one rendered glyph and return its placement record.
    ///
    /// Bitmaps that are not 8-bit grayscale are skipped and yield `None`.
    pub fn place(
        &mut self,
        desc: &GlyphDescriptor,
        glyph: &RenderedGlyph,
        log: &mut dyn BuildLog,
    ) -> Option<GlyphRecord> {
        if glyph.bitmap.format != PixelFormat::Gray8 {
            // Only antialiased 256-level bitmaps are packed.
            return None;
        }
        let edge = self.params.texture_edge;
        let pad = self.params.glyph_edge;
        let cell_w = glyph.bitmap.width + 2 * pad;
        let cell_h = glyph.bitmap.height + 2 * pad;

        if self.x + cell_w > self.params.page_width - edge {
            // Wrap to the next shelf.
            self.x = edge;
            self.y += self.shelf + edge;
            self.shelf = 0;
        }
        if self.y + cell_h > self.params.page_height - edge {
            if !self.params.multi_channel {
                self.flush_page(log);
            } else if self.channel == 3 {
                self.flush_page(log);
                self.channel = 0;
            } else {
                self.channel += 1;
            }
            self.x = edge;
            self.y = edge;
            self.shelf = 0;
        }

        self.blit(&glyph.bitmap);
        let record = self.record(desc, glyph);

        self.x += cell_w + edge;
        self.shelf = self.shelf.max(cell_h);
        self.page_glyphs += 1;
        Some(record)
    }

    /// Flush the final page. Always emits, so an empty build still
    /// produces exactly one blank page.
    pub fn finish(mut self, log: &mut dyn BuildLog) {
        self.flush_page(log);
    }

    fn flush_page(&mut self, log: &mut dyn BuildLog) {
        (self.flush)(&self.page, self.page_no, self.page_glyphs);
        log.info(&format!("page {}: {} glyphs", self.page_no, self.page_glyphs));
        self.page.clear();
        self.page_no += 1;
        self.page_glyphs = 0;
    }

    fn blit(&mut self, bitmap: &Bitmap) {
        if bitmap.width == 0 {
            return;
        }
        let x0 = self.x + self.params.glyph_edge;
        let y0 = self.y + self.params.glyph_edge;
        for (row, line) in bitmap.data.chunks_exact(bitmap.width as usize).enumerate() {
            for (col, &value) in line.iter().enumerate() {
                let x = x0 + col as u32;
                let y = y0 + row as u32;
                if self.params.multi_channel {
                    self.page.put_channel(x, y, self.channel, value);
                } else {
                    self.page.put_mask(x, y, value);
                }
            }
        }
    }

    fn record(&self, desc: &GlyphDescriptor, glyph: &RenderedGlyph) -> GlyphRecord {
        let pad = self.params.glyph_edge;
        let padf = pad as f32;
        let m = &glyph.metrics;
        GlyphRecord {
            code_point: desc.code_point,
            font: desc.font,
            channel: self.channel,
            page: self.page_no,
            x: self.x,
            y: self.y,
            width: glyph.bitmap.width + 2 * pad,
            height: glyph.bitmap.height + 2 * pad,
            draw_width: to_pixels(m.width) + 2.0 * padf,
            draw_height: to_pixels(m.height) + 2.0 * padf,
            h_pen_x: to_pixels(m.hori_bearing_x) - padf,
            h_pen_y: to_pixels(m.hori_bearing_y) + padf,
            h_advance: to_pixels(m.hori_advance),
            v_pen_x: to_pixels(m.vert_bearing_x) - padf,
            v_pen_y: to_pixels(m.vert_bearing_y) + padf,
            v_advance: to_pixels(m.vert_advance),
        }
    }
}
