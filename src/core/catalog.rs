//! Engine catalog: engine label to model identifier

use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

use crate::core::errors::{Result, TranslationError};
use crate::core::models::Backend;

/// Default location of the catalog file
pub const DEFAULT_CATALOG_PATH: &str = "configs/avail_models.yaml";

/// Read-only mapping from engine label to backend model identifier.
///
/// Labels keep the order in which they appear in the source file.
#[derive(Debug, Clone, Default)]
pub struct EngineCatalog {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl EngineCatalog {
    /// Load the catalog from a YAML mapping
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| TranslationError::ConfigError {
                message: format!("cannot read catalog {}: {}", path.display(), e),
            })?;

        let catalog = Self::from_yaml(&content).map_err(|e| {
            let reason = match e {
                TranslationError::ConfigError { message } => message,
                other => other.to_string(),
            };
            TranslationError::ConfigError {
                message: format!("invalid catalog {}: {}", path.display(), reason),
            }
        })?;

        info!(
            "Loaded {} translation engines from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Parse the catalog from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let value: serde_yaml::Value = serde_yaml::from_str(content)?;
        let mapping = match value {
            serde_yaml::Value::Mapping(mapping) => mapping,
            other => {
                return Err(TranslationError::ConfigError {
                    message: format!("expected a mapping, found {}", yaml_kind(&other)),
                })
            }
        };

        let mut entries = Vec::with_capacity(mapping.len());
        for (key, value) in mapping {
            let label = scalar_text(&key).ok_or_else(|| TranslationError::ConfigError {
                message: format!("engine label must be a scalar, found {}", yaml_kind(&key)),
            })?;
            let model = scalar_text(&value).ok_or_else(|| TranslationError::ConfigError {
                message: format!(
                    "model identifier for {} must be a scalar, found {}",
                    label,
                    yaml_kind(&value)
                ),
            })?;
            entries.push((label, model));
        }

        Ok(Self::from_entries(entries))
    }

    /// Build a catalog from `(label, model)` pairs.
    ///
    /// A repeated label keeps its first position and its last model.
    pub fn from_entries<I, L, M>(entries: I) -> Self
    where
        I: IntoIterator<Item = (L, M)>,
        L: Into<String>,
        M: Into<String>,
    {
        let mut catalog = Self::default();
        for (label, model) in entries {
            let (label, model) = (label.into(), model.into());
            match catalog.index.get(&label) {
                Some(&pos) => catalog.entries[pos].1 = model,
                None => {
                    if Backend::from_label(&label) == Backend::Unrecognized {
                        debug!("Engine {} has no supported backend prefix", label);
                    }
                    catalog.index.insert(label.clone(), catalog.entries.len());
                    catalog.entries.push((label, model));
                }
            }
        }
        catalog
    }

    /// All engine labels, in file order
    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|(label, _)| label.as_str()).collect()
    }

    /// Model identifier configured for `label`
    pub fn model_id(&self, label: &str) -> Result<&str> {
        self.index
            .get(label)
            .map(|&pos| self.entries[pos].1.as_str())
            .ok_or_else(|| TranslationError::UnknownEngine {
                label: label.to_string(),
            })
    }

    /// `(label, model)` pairs, in file order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(label, model)| (label.as_str(), model.as_str()))
    }

    /// Whether `label` is configured
    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    /// Number of engines
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no engines
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Strings, numbers and booleans are taken as their YAML text
fn scalar_text(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(text) => Some(text.clone()),
        serde_yaml::Value::Number(number) => Some(number.to_string()),
        serde_yaml::Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn yaml_kind(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "a boolean",
        serde_yaml::Value::Number(_) => "a number",
        serde_yaml::Value::String(_) => "a string",
        serde_yaml::Value::Sequence(_) => "a sequence",
        serde_yaml::Value::Mapping(_) => "a mapping",
        serde_yaml::Value::Tagged(_) => "a tagged value",
    }
}
