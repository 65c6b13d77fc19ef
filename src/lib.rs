//! Font glyph atlas builder.
//!
//! Registers fonts and code points, rasterizes glyphs through a
//! pluggable backend, shelf-packs them onto fixed size RGBA pages and
//! writes the page images next to a Lua metrics index.

pub mod atlas;
pub mod builder;
pub mod collect;
pub mod encode;
pub mod error;
pub mod index;
pub mod job;
pub mod logger;
pub mod registry;
pub mod source;

pub use atlas::{AtlasPacker, GlyphRecord, PackParams, PageBuffer};
pub use builder::{BuildParams, BuildReport, Builder, FontEntry};
pub use collect::GlyphDescriptor;
pub use encode::ImageFormat;
pub use error::{BuildError, RegistryError, SourceError};
pub use job::{FontDecl, Job, OutputConfig};
pub use logger::{BuildLog, Level, LogFacade, MemoryLog};
pub use registry::{FontConfig, FontRegistry};
pub use source::{FontdueSource, GlyphSource, SyntheticSource};
