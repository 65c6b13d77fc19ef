//! Metrics index emission: one Lua table keyed by font name, glyph
//! entries keyed by code point.

use std::fmt::Write as _;

use crate::builder::{BuildReport, FontEntry};

/// Render the report as Lua source.
///
/// Byte-for-byte deterministic: fonts appear in registration order,
/// glyph entries in code point order. Every registered font gets a block
/// even when it packed zero glyphs.
pub fn render(report: &BuildReport) -> String {
    let mut out = String::new();
    out.push_str("local font = {}\n");
    for font in &report.fonts {
        render_font(&mut out, font);
    }
    out.push_str("return font\n");
    out
}

fn render_font(out: &mut String, font: &FontEntry) {
    let _ = writeln!(out, "font[\"{}\"] = {{", font.name);
    let _ = writeln!(out, "  multi_channel={},", font.multi_channel);
    let _ = writeln!(out, "  ascender={},", font.ascender);
    let _ = writeln!(out, "  descender={},", font.descender);
    let _ = writeln!(out, "  height={},", font.height);
    let _ = writeln!(out, "  max_advance={},", font.max_advance);
    for g in &font.glyphs {
        let _ = write!(out, "  [{}]={{", g.code_point);
        if font.multi_channel {
            let _ = write!(out, "{},", g.channel);
        }
        let _ = writeln!(
            out,
            "{},{},{},{},{},{},{},{},{},{},{},{}}},",
            g.x,
            g.y,
            g.width,
            g.height,
            g.draw_width,
            g.draw_height,
            g.h_pen_x,
            g.h_pen_y,
            g.h_advance,
            g.v_pen_x,
            g.v_pen_y,
            g.v_advance
        );
    }
    out.push_str("}\n");
}
