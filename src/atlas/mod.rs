//! Fixed-size texture pages and the shelf packer that fills them.

mod packer;
mod page;


pub use packer::{AtlasPacker, PackParams};
pub use page::PageBuffer;

/// Placement and draw metrics for one packed glyph.
///
/// Written once at placement time, immutable afterward. The rectangle is
/// in page pixels and includes the glyph-edge padding; pen and advance
/// fields are float pixels ready for text layout, with pen offsets
/// inflated by the same padding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphRecord {
    pub code_point: u32,
    /// Registration index of the owning font.
    pub font: u32,
    /// Channel the glyph occupies; always 0 on single-channel pages.
    pub channel: u8,
    /// 1-based page number.
    pub page: u32,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub draw_width: f32,
    pub draw_height: f32,
    pub h_pen_x: f32,
    pub h_pen_y: f32,
    pub h_advance: f32,
    pub v_pen_x: f32,
    pub v_pen_y: f32,
    pub v_advance: f32,
}
