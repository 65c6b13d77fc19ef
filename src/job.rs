//! TOML job descriptions for the command line front end.
//!
//! A job file names the output settings and the fonts to pack:
//!
//! ```toml
//! [output]
//! prefix = "font/"
//! format = "png"
//!
//! [[font]]
//! name = "Sans24"
//! path = "NotoSans-Regular.ttf"
//! pixel_size = 24
//! ranges = [[0x20, 0x7E]]
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::builder::BuildParams;
use crate::encode::ImageFormat;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Job {
    pub output: OutputConfig,
    #[serde(rename = "font")]
    pub fonts: Vec<FontDecl>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output prefix; end it with `/` to fill a directory.
    pub prefix: String,
    /// Page image format, `"png"` or `"bmp"`.
    pub format: String,
    pub page_width: u32,
    pub page_height: u32,
    pub texture_edge: u32,
    pub glyph_edge: u32,
    pub multi_channel: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            prefix: "font/".to_owned(),
            format: "png".to_owned(),
            page_width: 2048,
            page_height: 2048,
            texture_edge: 1,
            glyph_edge: 0,
            multi_channel: false,
        }
    }
}

/// One font to register. `name`, `path` and `pixel_size` are required;
/// the code point fields are additive and may be combined.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontDecl {
    pub name: String,
    pub path: PathBuf,
    #[serde(default)]
    pub face_index: u32,
    pub pixel_size: u32,
    /// Individual code points.
    #[serde(default)]
    pub codes: Vec<u32>,
    /// Inclusive `[first, last]` ranges.
    #[serde(default)]
    pub ranges: Vec<(u32, u32)>,
    /// Every distinct character of this string.
    #[serde(default)]
    pub text: String,
}

impl Job {
    /// Load a job description, returning an error message on failure.
    pub fn load(path: &Path) -> Result<Self, String> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
        toml::from_str(&data).map_err(|e| format!("parse error in {}: {e}", path.display()))
    }

    /// Translate the output section into build parameters.
    pub fn build_params(&self) -> Result<BuildParams, String> {
        let format = ImageFormat::parse(&self.output.format)
            .ok_or_else(|| format!("unknown image format {:?}", self.output.format))?;
        Ok(BuildParams {
            out_prefix: PathBuf::from(&self.output.prefix),
            format,
            page_width: self.output.page_width,
            page_height: self.output.page_height,
            texture_edge: self.output.texture_edge,
            glyph_edge: self.output.glyph_edge,
            multi_channel: self.output.multi_channel,
        })
    }

    /// A starting point for `--print-job`: ASCII from one face.
    pub fn sample() -> Self {
        Self {
            output: OutputConfig::default(),
            fonts: vec![FontDecl {
                name: "Sans24".to_owned(),
                path: PathBuf::from("NotoSans-Regular.ttf"),
                face_index: 0,
                pixel_size: 24,
                codes: Vec::new(),
                ranges: vec![(0x20, 0x7E)],
                text: String::new(),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_job_roundtrip() {
        let job = Job::default();
        let toml_str = toml::to_string_pretty(&job).expect("serialize");
        let parsed: Job = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.output.prefix, "font/");
        assert_eq!(parsed.output.format, "png");
        assert_eq!(parsed.output.page_width, 2048);
        assert_eq!(parsed.output.page_height, 2048);
        assert_eq!(parsed.output.texture_edge, 1);
        assert_eq!(parsed.output.glyph_edge, 0);
        assert!(!parsed.output.multi_channel);
        assert!(parsed.fonts.is_empty());
    }

    #[test]
    fn empty_toml_gives_defaults() {
        let parsed: Job = toml::from_str("").expect("deserialize");
        assert_eq!(parsed.output.page_width, 2048);
        assert!(parsed.fonts.is_empty());
    }

    #[test]
    fn partial_output_uses_defaults() {
        let toml_str = r#"
[output]
prefix = "atlas/"
multi_channel = true
"#;
        let parsed: Job = toml::from_str(toml_str).expect("deserialize");
        assert_eq!(parsed.output.prefix, "atlas/");
        assert!(parsed.output.multi_channel);
        // Other fields should be defaults
        assert_eq!(parsed.output.format, "png");
        assert_eq!(parsed.output.texture_edge, 1);
    }

    #[test]
    fn font_tables_parse_with_hex_ranges() {
        let toml_str = r#"
[[font]]
name = "Mono16"
path = "mono.ttf"
pixel_size = 16
codes = [0x2026]
ranges = [[0x20, 0x7E], [0xA0, 0xFF]]
text = "fi"

[[font]]
name = "Mono32"
path = "mono.ttf"
pixel_size = 32
"#;
        let parsed: Job = toml::from_str(toml_str).expect("deserialize");
        assert_eq!(parsed.fonts.len(), 2);
        let first = &parsed.fonts[0];
        assert_eq!(first.name, "Mono16");
        assert_eq!(first.path, PathBuf::from("mono.ttf"));
        assert_eq!(first.pixel_size, 16);
        assert_eq!(first.codes, vec![0x2026]);
        assert_eq!(first.ranges, vec![(0x20, 0x7E), (0xA0, 0xFF)]);
        assert_eq!(first.text, "fi");
        let second = &parsed.fonts[1];
        assert_eq!(second.face_index, 0);
        assert!(second.codes.is_empty());
        assert!(second.ranges.is_empty());
        assert!(second.text.is_empty());
    }

    #[test]
    fn missing_required_font_field_is_an_error() {
        let toml_str = r#"
[[font]]
name = "NoSize"
path = "mono.ttf"
"#;
        assert!(toml::from_str::<Job>(toml_str).is_err());
    }

    #[test]
    fn build_params_translate_the_output_section() {
        let job = Job {
            output: OutputConfig {
                prefix: "out/run-".to_owned(),
                format: "BMP".to_owned(),
                page_width: 512,
                glyph_edge: 2,
                ..OutputConfig::default()
            },
            ..Job::default()
        };
        let params = job.build_params().expect("valid output section");
        assert_eq!(params.out_prefix, PathBuf::from("out/run-"));
        assert_eq!(params.format, ImageFormat::Bmp);
        assert_eq!(params.page_width, 512);
        assert_eq!(params.page_height, 2048);
        assert_eq!(params.glyph_edge, 2);
    }

    #[test]
    fn unknown_format_is_reported() {
        let job = Job {
            output: OutputConfig {
                format: "gif".to_owned(),
                ..OutputConfig::default()
            },
            ..Job::default()
        };
        let err = job.build_params().unwrap_err();
        assert!(err.contains("gif"), "{err}");
    }

    #[test]
    fn sample_job_parses_back() {
        let toml_str = toml::to_string_pretty(&Job::sample()).expect("serialize");
        let parsed: Job = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.fonts.len(), 1);
        assert_eq!(parsed.fonts[0].ranges, vec![(0x20, 0x7E)]);
        parsed.build_params().expect("sample output section is valid");
    }
}
