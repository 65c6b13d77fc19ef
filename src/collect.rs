//! Glyph collection: resolve code points to glyph indices and probe
//! bitmap sizes ahead of packing.

use crate::logger::BuildLog;
use crate::registry::FontRegistry;
use crate::source::GlyphSource;

/// One glyph selected for packing: code point, probed bitmap size, and
/// the registration index of the owning font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphDescriptor {
    pub code_point: u32,
    pub width: u32,
    pub height: u32,
    pub font: u32,
}

/// Probe every requested code point of every registered font.
///
/// `faces` must parallel the registry's iteration order. Code points the
/// face cannot map are warned about on `log` and dropped; the build keeps
/// going.
pub fn collect_glyphs<S: GlyphSource>(
    source: &S,
    faces: &[S::Face],
    registry: &FontRegistry,
    log: &mut dyn BuildLog,
) -> Vec<GlyphDescriptor> {
    let mut glyphs = Vec::new();
    for (font, cfg) in registry.iter().enumerate() {
        let face = &faces[font];
        for &code_point in &cfg.code_points {
            let glyph = source.glyph_index(face, code_point);
            if glyph == 0 {
                log.warn(&format!("font {:?}: glyph {code_point} not found", cfg.name));
                continue;
            }
            match source.probe_glyph(face, glyph) {
                Ok((width, height)) => glyphs.push(GlyphDescriptor {
                    code_point,
                    width,
                    height,
                    font: font as u32,
                }),
                Err(e) => log.warn(&format!(
                    "font {:?}: glyph {code_point} failed to load: {e}",
                    cfg.name
                )),
            }
        }
    }
    glyphs
}

/// Sort glyphs into packing order: height, then width, then code point,
/// then font index, all ascending.
///
/// Similar heights land on the same shelf so little vertical space is
/// wasted, and the fully-determined key places every glyph identically
/// across repeated builds.
pub fn packing_order(glyphs: &mut [GlyphDescriptor]) {
    glyphs.sort_unstable_by_key(|g| (g.height, g.width, g.code_point, g.font));
}
