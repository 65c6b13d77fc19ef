//! Build orchestration: open faces, collect and sort glyphs, pack pages,
//! write images and the metrics index.

use std::fs;
use std::path::PathBuf;

use crate::atlas::{AtlasPacker, GlyphRecord, PackParams};
use crate::collect::{collect_glyphs, packing_order};
use crate::encode::{self, ImageFormat};
use crate::error::{BuildError, RegistryError};
use crate::index;
use crate::logger::{BuildLog, LogFacade};
use crate::registry::FontRegistry;
use crate::source::{FontdueSource, GlyphSource, to_pixels};

/// Parameters for one build run.
#[derive(Debug, Clone)]
pub struct BuildParams {
    /// Output prefix: pages land at `<prefix><n>.<ext>` and the index at
    /// `<prefix>index.lua`. End it with a separator to fill a directory.
    pub out_prefix: PathBuf,
    pub format: ImageFormat,
    pub page_width: u32,
    pub page_height: u32,
    /// Spacing between cells and around the page border, in pixels.
    pub texture_edge: u32,
    /// Transparent padding baked around each glyph bitmap, in pixels.
    pub glyph_edge: u32,
    pub multi_channel: bool,
}

impl Default for BuildParams {
    fn default() -> Self {
        Self {
            out_prefix: PathBuf::from("font/"),
            format: ImageFormat::Png,
            page_width: 2048,
            page_height: 2048,
            texture_edge: 1,
            glyph_edge: 0,
            multi_channel: false,
        }
    }
}

/// Per-font section of a finished build.
#[derive(Debug, Clone)]
pub struct FontEntry {
    pub name: String,
    pub multi_channel: bool,
    /// Face line metrics in float pixels; `descender` is negative.
    pub ascender: f32,
    pub descender: f32,
    pub height: f32,
    pub max_advance: f32,
    /// Sorted by code point ascending.
    pub glyphs: Vec<GlyphRecord>,
}

/// Everything a finished build produced, mirroring the emitted files.
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// Pages written; at least 1, even for an empty build.
    pub pages: u32,
    /// Fonts in registration order.
    pub fonts: Vec<FontEntry>,
}

/// Top-level entry point: register fonts and code points, then build.
///
/// ```no_run
/// use fontatlas::{BuildParams, Builder};
///
/// let mut builder = Builder::new();
/// builder.add_font("Sans24", "NotoSans-Regular.ttf", 0, 24)?;
/// builder.add_range("Sans24", 0x20, 0x7E)?;
/// let report = builder.build(&BuildParams::default())?;
/// assert!(report.pages >= 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Default)]
pub struct Builder {
    registry: FontRegistry,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a font under a unique name. See [`FontRegistry::add_font`].
    pub fn add_font(
        &mut self,
        name: &str,
        path: impl Into<PathBuf>,
        face_index: u32,
        pixel_size: u32,
    ) -> Result<(), RegistryError> {
        self.registry.add_font(name, path, face_index, pixel_size)
    }

    /// Request one code point for a registered font.
    pub fn add_code(&mut self, name: &str, code_point: u32) -> Result<(), RegistryError> {
        self.registry.add_code(name, code_point)
    }

    /// Request an inclusive code point range for a registered font.
    pub fn add_range(&mut self, name: &str, first: u32, last: u32) -> Result<(), RegistryError> {
        self.registry.add_range(name, first, last)
    }

    /// Request every distinct character of `text` for a registered font.
    pub fn add_text(&mut self, name: &str, text: &str) -> Result<(), RegistryError> {
        self.registry.add_text(name, text)
    }

    pub fn registry(&self) -> &FontRegistry {
        &self.registry
    }

    /// Build with the shipped fontdue backend, logging through the `log`
    /// crate.
    pub fn build(&self, params: &BuildParams) -> Result<BuildReport, BuildError> {
        self.build_with(&mut FontdueSource::new(), params, &mut LogFacade)
    }

    /// Build with any backend and diagnostics sink.
    ///
    /// Phases: validate parameters, open every face (a face that cannot
    /// open aborts before anything is written), collect and sort glyphs,
    /// pack pages, write the index. Encode and write failures are
    /// latched: the remaining pages and the index are still attempted,
    /// and the first error is returned at the end.
    pub fn build_with<S: GlyphSource>(
        &self,
        source: &mut S,
        params: &BuildParams,
        log: &mut dyn BuildLog,
    ) -> Result<BuildReport, BuildError> {
        validate(params)?;
        log.info(&format!(
            "building {} fonts onto {}x{} pages",
            self.registry.len(),
            params.page_width,
            params.page_height
        ));

        let mut faces = Vec::with_capacity(self.registry.len());
        for cfg in self.registry.iter() {
            faces.push(source.open_face(&cfg.path, cfg.face_index, cfg.pixel_size)?);
        }

        let mut glyphs = collect_glyphs(source, &faces, &self.registry, log);
        packing_order(&mut glyphs);
        log.debug(&format!("collected {} glyphs", glyphs.len()));

        // Nothing can be written without the output directory; this is
        // the one write failure that aborts instead of latching.
        if let Some(dir) = index_path(params).parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir).map_err(|e| BuildError::Io {
                    path: dir.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let pack = PackParams {
            page_width: params.page_width,
            page_height: params.page_height,
            texture_edge: params.texture_edge,
            glyph_edge: params.glyph_edge,
            multi_channel: params.multi_channel,
        };
        let mut failure: Option<BuildError> = None;
        let mut pages = 0_u32;
        let mut records: Vec<GlyphRecord> = Vec::new();
        {
            let mut packer = AtlasPacker::new(&pack, |page, page_no, _| {
                let path = page_path(params, page_no);
                let written = encode::encode_page(
                    page.pixels(),
                    page.width(),
                    page.height(),
                    params.format,
                )
                .map_err(|e| BuildError::Encode {
                    page: page_no,
                    source: e,
                })
                .and_then(|bytes| {
                    fs::write(&path, bytes).map_err(|e| BuildError::Io {
                        path: path.clone(),
                        source: e,
                    })
                });
                match written {
                    Ok(()) => pages += 1,
                    Err(e) => {
                        if failure.is_none() {
                            failure = Some(e);
                        }
                    }
                }
            });
            for desc in &glyphs {
                let face = &faces[desc.font as usize];
                let glyph = source.glyph_index(face, desc.code_point);
                match source.render_glyph(face, glyph) {
                    Ok(rendered) => {
                        if let Some(record) = packer.place(desc, &rendered, log) {
                            records.push(record);
                        }
                    }
                    Err(e) => {
                        log.warn(&format!("glyph {} failed to render: {e}", desc.code_point));
                    }
                }
            }
            packer.finish(log);
        }

        let mut per_font: Vec<Vec<GlyphRecord>> = vec![Vec::new(); self.registry.len()];
        for record in records {
            per_font[record.font as usize].push(record);
        }
        let mut fonts = Vec::with_capacity(self.registry.len());
        for (i, cfg) in self.registry.iter().enumerate() {
            let mut glyphs = std::mem::take(&mut per_font[i]);
            glyphs.sort_unstable_by_key(|g| g.code_point);
            let fm = source.face_metrics(&faces[i]);
            fonts.push(FontEntry {
                name: cfg.name.clone(),
                multi_channel: params.multi_channel,
                ascender: to_pixels(fm.ascender),
                descender: to_pixels(fm.descender),
                height: to_pixels(fm.height),
                max_advance: to_pixels(fm.max_advance),
                glyphs,
            });
        }

        let report = BuildReport { pages, fonts };
        let path = index_path(params);
        if let Err(e) = fs::write(&path, index::render(&report)) {
            if failure.is_none() {
                failure = Some(BuildError::Io { path, source: e });
            }
        }

        match failure {
            Some(e) => {
                log.fatal(&e.to_string());
                Err(e)
            }
            None => {
                log.info(&format!("wrote {} pages and the index", report.pages));
                Ok(report)
            }
        }
    }
}

fn validate(params: &BuildParams) -> Result<(), BuildError> {
    let edge = 2 * u64::from(params.texture_edge);
    if u64::from(params.page_width) <= edge || u64::from(params.page_height) <= edge {
        return Err(BuildError::InvalidParams(
            "page must be larger than twice the texture edge",
        ));
    }
    Ok(())
}

/// `<prefix><page>.<ext>`: string concatenation, not path joining, so a
/// prefix without a trailing separator becomes a file name prefix.
fn page_path(params: &BuildParams, page: u32) -> PathBuf {
    let mut path = params.out_prefix.as_os_str().to_os_string();
    path.push(format!("{page}.{}", params.format.extension()));
    PathBuf::from(path)
}

fn index_path(params: &BuildParams) -> PathBuf {
    let mut path = params.out_prefix.as_os_str().to_os_string();
    path.push("index.lua");
    PathBuf::from(path)
}
