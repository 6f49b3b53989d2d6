//! Format-agnostic document loading and saving

use serde::{Serialize, de::DeserializeOwned};

use crate::{Error, NormalizedPath, Result, io};

/// Serialization formats understood by [`ConfigStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Toml,
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Detect the format from a file extension (case-insensitive).
    pub fn from_extension(extension: &str) -> Result<Self> {
        match extension.to_lowercase().as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(Error::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }

    /// Detect the format from a path's extension.
    pub fn from_path(path: &NormalizedPath) -> Result<Self> {
        Self::from_extension(path.extension().unwrap_or(""))
    }

    fn label(self) -> &'static str {
        match self {
            Self::Toml => "TOML",
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        }
    }
}

/// Format-agnostic document store.
///
/// Detects format from the file extension and handles
/// serialization/deserialization transparently.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    /// Load a document from a file.
    ///
    /// Format is detected from file extension:
    /// - `.toml` -> TOML
    /// - `.json` -> JSON
    /// - `.yaml`, `.yml` -> YAML
    pub fn load<T: DeserializeOwned>(&self, path: &NormalizedPath) -> Result<T> {
        let format = DocumentFormat::from_path(path)?;
        let content = io::read_text(path)?;
        tracing::debug!(%path, format = format.label(), "loading document");
        self.parse(&content, format, path)
    }

    /// Parse document content that did not come from disk.
    ///
    /// `origin` is only used in error messages.
    pub fn parse<T: DeserializeOwned>(
        &self,
        content: &str,
        format: DocumentFormat,
        origin: &NormalizedPath,
    ) -> Result<T> {
        let parse_error = |message: String| Error::ConfigParse {
            path: origin.to_native(),
            format: format.label().into(),
            message,
        };
        match format {
            DocumentFormat::Toml => toml::from_str(content).map_err(|e| parse_error(e.to_string())),
            DocumentFormat::Json => {
                serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))
            }
            DocumentFormat::Yaml => {
                serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))
            }
        }
    }

    /// Save a document to a file.
    ///
    /// Format is determined from file extension. Uses atomic write.
    pub fn save<T: Serialize>(&self, path: &NormalizedPath, value: &T) -> Result<()> {
        let format = DocumentFormat::from_path(path)?;
        let serialize_error = |message: String| Error::ConfigSerialize {
            path: path.to_native(),
            format: format.label().into(),
            message,
        };

        let content = match format {
            DocumentFormat::Toml => {
                toml::to_string_pretty(value).map_err(|e| serialize_error(e.to_string()))?
            }
            DocumentFormat::Json => {
                serde_json::to_string_pretty(value).map_err(|e| serialize_error(e.to_string()))?
            }
            DocumentFormat::Yaml => {
                serde_yaml::to_string(value).map_err(|e| serialize_error(e.to_string()))?
            }
        };

        io::write_atomic(path, content.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[rstest]
    #[case("toml", DocumentFormat::Toml)]
    #[case("JSON", DocumentFormat::Json)]
    #[case("yml", DocumentFormat::Yaml)]
    #[case("yaml", DocumentFormat::Yaml)]
    fn detects_format_from_extension(#[case] ext: &str, #[case] expected: DocumentFormat) {
        assert_eq!(DocumentFormat::from_extension(ext).unwrap(), expected);
    }

    #[test]
    fn rejects_unknown_extension() {
        let err = DocumentFormat::from_extension("ini").unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat { .. }));
    }

    #[test]
    fn save_then_load_yaml() {
        let temp = TempDir::new().unwrap();
        let path = NormalizedPath::new(temp.path().join("doc.yaml"));
        let mut doc = BTreeMap::new();
        doc.insert("repo".to_string(), vec!["master".to_string()]);

        let store = ConfigStore::new();
        store.save(&path, &doc).unwrap();
        let loaded: BTreeMap<String, Vec<String>> = store.load(&path).unwrap();

        assert_eq!(loaded, doc);
    }

    #[test]
    fn parse_error_names_format_and_path() {
        let store = ConfigStore::new();
        let origin = NormalizedPath::new("policy.yaml");
        let err = store
            .parse::<BTreeMap<String, String>>("key: [unclosed", DocumentFormat::Yaml, &origin)
            .unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("YAML"), "got: {msg}");
        assert!(msg.contains("policy.yaml"), "got: {msg}");
    }
}
