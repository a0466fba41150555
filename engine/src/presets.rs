//! Named roll expressions loaded from YAML or JSON, e.g.
//!
//! ```yaml
//! ability_score: 4d6k3
//! fireball: 8d6
//! ```

use std::{fs, path::Path};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DiceError, Result};
use crate::notation::RollSpec;

const BUILTIN_TABLETOP: &str = include_str!("../content/presets/tabletop.yaml");

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Presets {
    entries: IndexMap<String, RollSpec>,
}

impl Presets {
    pub fn builtin() -> Result<Self> {
        Self::from_yaml_str(BUILTIN_TABLETOP)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load from a file; `.json` files are read as JSON, everything else as YAML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| DiceError::PresetIo {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_file_text(path, &text)
    }

    /// Parse `text` already read from `path`, picking the format from its extension.
    pub fn from_file_text(path: &Path, text: &str) -> Result<Self> {
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let presets = if is_json {
            Self::from_json_str(text)?
        } else {
            Self::from_yaml_str(text)?
        };
        debug!(path = %path.display(), count = presets.len(), "loaded presets");
        Ok(presets)
    }

    pub fn get(&self, name: &str) -> Result<RollSpec> {
        self.entries
            .get(name)
            .copied()
            .ok_or_else(|| DiceError::UnknownPreset(name.to_string()))
    }

    pub fn insert(&mut self, name: impl Into<String>, spec: RollSpec) -> Option<RollSpec> {
        self.entries.insert(name.into(), spec)
    }

    /// Presets in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, RollSpec)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
