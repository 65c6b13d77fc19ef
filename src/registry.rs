//! Font registration and per-font code point sets.

use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;

use crate::error::RegistryError;

/// One registered font: identity, face selection, pixel size, and the
/// code points to pack for it.
#[derive(Debug, Clone)]
pub struct FontConfig {
    pub name: String,
    pub path: PathBuf,
    /// Face within a collection file (0 for plain TTF/OTF).
    pub face_index: u32,
    pub pixel_size: u32,
    /// Set semantics: duplicates collapse, iteration is code point order.
    pub code_points: BTreeSet<u32>,
}

/// Ordered font registry.
///
/// Fonts iterate in registration order (the index file preserves it) while
/// the name map backs duplicate and lookup checks.
#[derive(Debug, Default)]
pub struct FontRegistry {
    order: Vec<String>,
    fonts: HashMap<String, FontConfig>,
}

impl FontRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a font under a unique name.
    ///
    /// Fails without mutating state when `path` is not a regular file or
    /// the name is already taken.
    pub fn add_font(
        &mut self,
        name: &str,
        path: impl Into<PathBuf>,
        face_index: u32,
        pixel_size: u32,
    ) -> Result<(), RegistryError> {
        let path = path.into();
        if !path.is_file() {
            return Err(RegistryError::NotAFile { path });
        }
        if self.fonts.contains_key(name) {
            return Err(RegistryError::DuplicateFont {
                name: name.to_owned(),
            });
        }
        self.order.push(name.to_owned());
        self.fonts.insert(
            name.to_owned(),
            FontConfig {
                name: name.to_owned(),
                path,
                face_index,
                pixel_size,
                code_points: BTreeSet::new(),
            },
        );
        Ok(())
    }

    /// Request one code point. Re-adding is a no-op.
    pub fn add_code(&mut self, name: &str, code_point: u32) -> Result<(), RegistryError> {
        self.font_mut(name)?.code_points.insert(code_point);
        Ok(())
    }

    /// Request every code point in `first..=last` inclusive. An inverted
    /// range is accepted and adds nothing.
    pub fn add_range(&mut self, name: &str, first: u32, last: u32) -> Result<(), RegistryError> {
        self.font_mut(name)?.code_points.extend(first..=last);
        Ok(())
    }

    /// Request every distinct character of `text`.
    pub fn add_text(&mut self, name: &str, text: &str) -> Result<(), RegistryError> {
        self.font_mut(name)?
            .code_points
            .extend(text.chars().map(u32::from));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn font(&self, name: &str) -> Option<&FontConfig> {
        self.fonts.get(name)
    }

    /// Fonts in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &FontConfig> {
        self.order
            .iter()
            .map(|name| self.fonts.get(name).expect("ordered name must be registered"))
    }

    fn font_mut(&mut self, name: &str) -> Result<&mut FontConfig, RegistryError> {
        self.fonts.get_mut(name).ok_or_else(|| RegistryError::UnknownFont {
            name: name.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn stub_font(tag: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "fontatlas-registry-{}-{tag}.ttf",
            std::process::id()
        ));
        std::fs::write(&path, b"stub").expect("write stub font");
        path
    }

    #[test]
    fn add_font_then_lookup() {
        let path = stub_font("lookup");
        let mut reg = FontRegistry::new();
        reg.add_font("Sans24", &path, 0, 24).expect("add");
        let cfg = reg.font("Sans24").expect("registered");
        assert_eq!(cfg.path, path);
        assert_eq!(cfg.face_index, 0);
        assert_eq!(cfg.pixel_size, 24);
        assert!(cfg.code_points.is_empty());
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn duplicate_name_rejected_without_mutation() {
        let path = stub_font("dup");
        let mut reg = FontRegistry::new();
        reg.add_font("Sans", &path, 0, 24).expect("add");
        reg.add_range("Sans", 65, 70).expect("range");

        let err = reg.add_font("Sans", &path, 1, 48).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateFont { .. }));

        // First registration is untouched.
        let cfg = reg.font("Sans").expect("registered");
        assert_eq!(cfg.pixel_size, 24);
        assert_eq!(cfg.code_points.len(), 6);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn missing_file_rejected() {
        let mut reg = FontRegistry::new();
        let err = reg
            .add_font("Ghost", "definitely-not-here.ttf", 0, 24)
            .unwrap_err();
        assert!(matches!(err, RegistryError::NotAFile { .. }));
        assert!(reg.is_empty());
    }

    #[test]
    fn code_ops_require_known_font() {
        let mut reg = FontRegistry::new();
        assert!(matches!(
            reg.add_code("Nope", 65).unwrap_err(),
            RegistryError::UnknownFont { .. }
        ));
        assert!(matches!(
            reg.add_range("Nope", 0, 10).unwrap_err(),
            RegistryError::UnknownFont { .. }
        ));
        assert!(matches!(
            reg.add_text("Nope", "hi").unwrap_err(),
            RegistryError::UnknownFont { .. }
        ));
    }

    #[test]
    fn code_points_deduplicate() {
        let path = stub_font("dedup");
        let mut reg = FontRegistry::new();
        reg.add_font("Sans", &path, 0, 24).expect("add");
        reg.add_code("Sans", 65).expect("code");
        reg.add_code("Sans", 65).expect("code again");
        reg.add_range("Sans", 64, 66).expect("range");
        let cfg = reg.font("Sans").expect("registered");
        assert_eq!(
            cfg.code_points.iter().copied().collect::<Vec<_>>(),
            vec![64, 65, 66]
        );
    }

    #[test]
    fn range_is_inclusive_and_inverted_is_empty() {
        let path = stub_font("range");
        let mut reg = FontRegistry::new();
        reg.add_font("Sans", &path, 0, 24).expect("add");
        reg.add_range("Sans", 32, 32).expect("single");
        assert_eq!(reg.font("Sans").expect("font").code_points.len(), 1);
        reg.add_range("Sans", 100, 40).expect("inverted is fine");
        assert_eq!(reg.font("Sans").expect("font").code_points.len(), 1);
    }

    #[test]
    fn text_collects_distinct_chars() {
        let path = stub_font("text");
        let mut reg = FontRegistry::new();
        reg.add_font("Sans", &path, 0, 24).expect("add");
        reg.add_text("Sans", "héllo").expect("text");
        let codes = &reg.font("Sans").expect("font").code_points;
        // h, é, l, o
        assert_eq!(codes.len(), 4);
        assert!(codes.contains(&u32::from('é')));
    }

    #[test]
    fn iteration_preserves_registration_order() {
        let path = stub_font("order");
        let mut reg = FontRegistry::new();
        reg.add_font("Zeta", &path, 0, 24).expect("add");
        reg.add_font("Alpha", &path, 0, 24).expect("add");
        reg.add_font("Mid", &path, 0, 24).expect("add");
        let names: Vec<&str> = reg.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
    }
}
