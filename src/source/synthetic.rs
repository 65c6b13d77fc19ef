//! Deterministic scripted glyph source.
//!
//! Renders nothing real: every glyph is a coverage ramp of a scripted
//! size, so builds are reproducible byte for byte without any font file
//! on disk. Used by the test suite and useful to embedders exercising
//! packing behavior in isolation.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use crate::error::SourceError;
use crate::source::{
    Bitmap, FaceMetrics, GlyphMetrics, GlyphSource, PixelFormat, RenderedGlyph,
};

/// Scripted behavior for one face.
///
/// Code points map to glyph index `code + 1` (so index 0 keeps meaning
/// "unmapped"); code points at or above `0xFFFF` are never mapped.
#[derive(Debug, Clone)]
pub struct FacePlan {
    default_size: (u32, u32),
    sizes: BTreeMap<u32, (u32, u32)>,
    missing: BTreeSet<u32>,
    broken: BTreeSet<u32>,
    format: PixelFormat,
}

impl Default for FacePlan {
    fn default() -> Self {
        Self::new(8, 8)
    }
}

impl FacePlan {
    /// A plan where every glyph renders at `width` x `height`.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            default_size: (width, height),
            sizes: BTreeMap::new(),
            missing: BTreeSet::new(),
            broken: BTreeSet::new(),
            format: PixelFormat::Gray8,
        }
    }

    /// Override the bitmap size of one code point.
    pub fn size(mut self, code_point: u32, width: u32, height: u32) -> Self {
        self.sizes.insert(code_point, (width, height));
        self
    }

    /// Mark a code point as unmapped.
    pub fn missing(mut self, code_point: u32) -> Self {
        self.missing.insert(code_point);
        self
    }

    /// Make rendering fail for a code point that still maps and probes.
    pub fn broken(mut self, code_point: u32) -> Self {
        self.broken.insert(code_point);
        self
    }

    /// Report every bitmap in the given format instead of `Gray8`.
    pub fn format(mut self, format: PixelFormat) -> Self {
        self.format = format;
        self
    }

    fn size_for(&self, code_point: u32) -> (u32, u32) {
        self.sizes.get(&code_point).copied().unwrap_or(self.default_size)
    }
}

/// Scripted [`GlyphSource`].
///
/// Faces resolve their plan by font path; paths without one use the
/// fallback plan. `fail_open` scripts engine startup failures.
#[derive(Debug, Default)]
pub struct SyntheticSource {
    fallback: FacePlan,
    plans: HashMap<PathBuf, FacePlan>,
    failing: BTreeSet<PathBuf>,
}

/// One opened synthetic face.
pub struct SyntheticFace {
    plan: FacePlan,
    pixel_size: i32,
}

impl SyntheticSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `plan` for every face without a per-path plan.
    pub fn with_fallback(plan: FacePlan) -> Self {
        Self {
            fallback: plan,
            ..Self::default()
        }
    }

    /// Script a plan for one font path.
    pub fn set_plan(&mut self, path: impl Into<PathBuf>, plan: FacePlan) {
        self.plans.insert(path.into(), plan);
    }

    /// Make `open_face` fail for one font path.
    pub fn fail_open(&mut self, path: impl Into<PathBuf>) {
        self.failing.insert(path.into());
    }
}

impl GlyphSource for SyntheticSource {
    type Face = SyntheticFace;

    fn open_face(
        &mut self,
        path: &Path,
        face_index: u32,
        pixel_size: u32,
    ) -> Result<Self::Face, SourceError> {
        if self.failing.contains(path) {
            return Err(SourceError::Parse {
                path: path.to_path_buf(),
                face_index,
                reason: "scripted open failure".to_owned(),
            });
        }
        let plan = self.plans.get(path).cloned().unwrap_or_else(|| self.fallback.clone());
        Ok(SyntheticFace {
            plan,
            pixel_size: pixel_size as i32,
        })
    }

    fn glyph_index(&self, face: &Self::Face, code_point: u32) -> u16 {
        if code_point >= 0xFFFF || face.plan.missing.contains(&code_point) {
            0
        } else {
            (code_point + 1) as u16
        }
    }

    fn probe_glyph(&self, face: &Self::Face, glyph: u16) -> Result<(u32, u32), SourceError> {
        let code_point = u32::from(glyph).saturating_sub(1);
        Ok(face.plan.size_for(code_point))
    }

    fn render_glyph(&self, face: &Self::Face, glyph: u16) -> Result<RenderedGlyph, SourceError> {
        let code_point = u32::from(glyph).saturating_sub(1);
        if face.plan.broken.contains(&code_point) {
            return Err(SourceError::Render {
                glyph,
                reason: "scripted render failure".to_owned(),
            });
        }
        let (w, h) = face.plan.size_for(code_point);

        // Nonzero diagonal ramp, so blits are visible in page buffers.
        let mut data = Vec::with_capacity((w * h) as usize);
        for row in 0..h {
            for col in 0..w {
                data.push(((row + col) % 255 + 1) as u8);
            }
        }

        let width = w as i32 * 64;
        let height = h as i32 * 64;
        let metrics = GlyphMetrics {
            width,
            height,
            hori_bearing_x: 64,
            hori_bearing_y: height,
            hori_advance: width + 128,
            vert_bearing_x: -(width / 2),
            vert_bearing_y: 64,
            vert_advance: height + 128,
        };
        Ok(RenderedGlyph {
            bitmap: Bitmap {
                width: w,
                height: h,
                format: face.plan.format,
                data,
            },
            metrics,
        })
    }

    fn face_metrics(&self, face: &Self::Face) -> FaceMetrics {
        // Plausible proportions scaled from the requested pixel size:
        // 0.75 em ascent, 0.25 em descent, 1.25 em line height.
        let px = face.pixel_size;
        FaceMetrics {
            ascender: px * 48,
            descender: -(px * 16),
            height: px * 80,
            max_advance: px * 64,
        }
    }
}
