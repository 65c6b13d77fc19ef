//! Error types for registration, rasterization, and the build pipeline.
//!
//! No panics cross the public boundary: every operation reports failure
//! through these enums, and warnings travel on the log side channel
//! instead of becoming errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from font registration and code point operations.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("font {name:?} is already registered")]
    DuplicateFont { name: String },

    #[error("no font registered under {name:?}")]
    UnknownFont { name: String },

    #[error("font file {path:?} is not a regular file")]
    NotAFile { path: PathBuf },
}

/// Errors from a glyph source backend.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("failed to read font file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse face {face_index} of {path:?}: {reason}")]
    Parse {
        path: PathBuf,
        face_index: u32,
        reason: String,
    },

    #[error("face reports no line metrics at {pixel_size}px")]
    NoMetrics { pixel_size: u32 },

    #[error("glyph {glyph} failed to render: {reason}")]
    Render { glyph: u16, reason: String },
}

/// Errors from a full atlas build.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("invalid build parameters: {0}")]
    InvalidParams(&'static str),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("failed to encode page {page}: {source}")]
    Encode {
        page: u32,
        source: image::ImageError,
    },

    #[error("failed to write {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}
