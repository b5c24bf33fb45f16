//! Worlds: a named domain together with named sets over it.
//!
//! A world can be described in JSON:
//!
//! ```json
//! {
//!   "entities": ["rex", "fido", "tom"],
//!   "sets": { "dog": ["rex", "fido"], "brown": ["fido", "tom"] }
//! }
//! ```

use std::fs;
use std::path::Path;

use candle_core::Device;
use indexmap::IndexMap;
use serde::Deserialize;
use tracing::debug;

use crate::domain::{Domain, ExtensionVector};
use crate::error::{Result, TensemError};
use crate::predicate::{PropositionalPredicate, SetPredicate};

/// Serialized description of a world.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorldConfig {
    pub entities: Vec<String>,
    #[serde(default)]
    pub sets: IndexMap<String, Vec<String>>,
}

impl WorldConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| TensemError::Config(e.to_string()))
    }

    /// Read a world file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

/// A domain with named extensions.
#[derive(Debug, Clone)]
pub struct World {
    domain: Domain,
    sets: IndexMap<String, ExtensionVector>,
}

impl World {
    pub fn from_config(config: &WorldConfig, device: &Device) -> Result<Self> {
        let domain = Domain::with_entities(config.entities.iter().cloned(), device)?;

        let mut sets = IndexMap::new();
        for (name, members) in &config.sets {
            let members: Vec<&str> = members.iter().map(|s| s.as_str()).collect();
            sets.insert(name.clone(), domain.extension_of_names(&members)?);
        }

        debug!(entities = domain.size(), sets = sets.len(), "built world");
        Ok(Self { domain, sets })
    }

    /// `rex` and `fido` are dogs, `tom` is a cat, `fido` and `tom` are brown.
    pub fn pets(device: &Device) -> Result<Self> {
        Self::from_config(
            &WorldConfig {
                entities: vec!["rex".to_string(), "fido".to_string(), "tom".to_string()],
                sets: IndexMap::from([
                    ("dog".to_string(), vec!["rex".to_string(), "fido".to_string()]),
                    ("cat".to_string(), vec!["tom".to_string()]),
                    ("brown".to_string(), vec!["fido".to_string(), "tom".to_string()]),
                ]),
            },
            device,
        )
    }

    /// `john` and `chris` are mathematicians, `tom` is not.
    pub fn mathematicians(device: &Device) -> Result<Self> {
        Self::from_config(
            &WorldConfig {
                entities: vec!["john".to_string(), "chris".to_string(), "tom".to_string()],
                sets: IndexMap::from([(
                    "mathematician".to_string(),
                    vec!["john".to_string(), "chris".to_string()],
                )]),
            },
            device,
        )
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Set names in definition order.
    pub fn set_names(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(|s| s.as_str())
    }

    /// Extension of a named set.
    pub fn set(&self, name: &str) -> Result<&ExtensionVector> {
        self.sets
            .get(name)
            .ok_or_else(|| TensemError::UnknownSet(name.to_string()))
    }

    /// Diagonal filter for a named set.
    pub fn predicate(&self, name: &str) -> Result<SetPredicate> {
        SetPredicate::from_extension(self.set(name)?)
    }

    /// `(2, N)` form of a named set.
    pub fn propositional(&self, name: &str) -> Result<PropositionalPredicate> {
        PropositionalPredicate::from_extension(self.set(name)?)
    }
}
