//! Builder configuration, read from YAML.
//!
//! ```yaml
//! user: alice
//! storage_root: ./data
//! pages_collection: pages
//! pages_key: all
//! root_drop_zone: root-drop-zone
//! export:
//!   lang: en
//!   include_base_styles: true
//! ```
//!
//! Every field is optional.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::dnd::ROOT_DROP_ZONE;
use crate::error::{BuilderError, BuilderResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// `<html lang>`
    pub lang: String,
    /// Emit the reset and hover rules the generators rely on
    pub include_base_styles: bool,
    /// `<meta name="generator">` content; omitted when empty
    pub generator: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            lang: "en".to_string(),
            include_base_styles: true,
            generator: "pagesmith".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Owner of the documents in the file store
    pub user: String,
    pub storage_root: PathBuf,
    /// Collection and key of the `pages` list document
    pub pages_collection: String,
    pub pages_key: String,
    /// Drop target id of the page's root surface
    pub root_drop_zone: String,
    pub export: ExportOptions,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            user: "default".to_string(),
            storage_root: PathBuf::from("data"),
            pages_collection: "pages".to_string(),
            pages_key: "all".to_string(),
            root_drop_zone: ROOT_DROP_ZONE.to_string(),
            export: ExportOptions::default(),
        }
    }
}

impl BuilderConfig {
    pub fn from_yaml_str(yaml: &str) -> BuilderResult<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: BuilderConfig = serde_yaml::from_str(yaml)?;
        config.check()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> BuilderResult<Self> {
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| BuilderError::Config(format!("read {}: {}", path.display(), e)))?;
        Self::from_yaml_str(&yaml)
    }

    fn check(&self) -> BuilderResult<()> {
        for (name, value) in [
            ("user", &self.user),
            ("pages_collection", &self.pages_collection),
            ("pages_key", &self.pages_key),
            ("root_drop_zone", &self.root_drop_zone),
        ] {
            if value.trim().is_empty() {
                return Err(BuilderError::Config(format!("{} must not be empty", name)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = BuilderConfig::from_yaml_str("user: alice\nexport:\n  lang: de\n").unwrap();
        assert_eq!(config.user, "alice");
        assert_eq!(config.pages_collection, "pages");
        assert_eq!(config.root_drop_zone, ROOT_DROP_ZONE);
        assert_eq!(config.export.lang, "de");
        assert!(config.export.include_base_styles);
    }

    #[test]
    fn empty_input_is_default() {
        assert_eq!(BuilderConfig::from_yaml_str("").unwrap(), BuilderConfig::default());
    }

    #[test]
    fn rejects_bad_documents() {
        assert!(matches!(
            BuilderConfig::from_yaml_str("pages_key: ''"),
            Err(BuilderError::Config(_))
        ));
        assert!(matches!(
            BuilderConfig::from_yaml_str("user: [1, 2"),
            Err(BuilderError::Config(_))
        ));
    }
}
