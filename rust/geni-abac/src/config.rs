use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::Deserialize;

use crate::{ConfigError, Method, PrivilegeTable};

/// Binder names used when the configuration does not list any.
pub const DEFAULT_BINDERS: [&str; 3] = ["standard", "credential", "stitching"];

/// Authorization settings, loaded once at startup and shared read-only.
///
/// ```toml
/// binders = ["standard", "credential", "stitching"]
/// trust_roots = ["/etc/geni/trusted_roots"]
///
/// # Optional; when present it must list every method.
/// [privileges]
/// GetVersion = []
/// CreateSliverV2 = ["createsliver"]
/// # ...
/// ```
#[derive(Debug, Clone)]
pub struct AbacConfig {
    binders: Vec<String>,
    trust_roots: Vec<PathBuf>,
    privileges: Arc<PrivilegeTable>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    binders: Option<Vec<String>>,
    #[serde(default)]
    trust_roots: Vec<PathBuf>,
    privileges: Option<BTreeMap<String, BTreeSet<String>>>,
}

impl AbacConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(source)?;

        let privileges = match raw.privileges {
            Some(entries) => {
                let entries = entries
                    .into_iter()
                    .map(|(method, privileges)| {
                        Ok::<_, ConfigError>((method.parse::<Method>()?, privileges))
                    })
                    .collect::<Result<Vec<_>, ConfigError>>()?;
                PrivilegeTable::from_entries(entries)?
            }
            None => PrivilegeTable::default(),
        };

        Ok(Self {
            binders: raw
                .binders
                .unwrap_or_else(|| DEFAULT_BINDERS.map(String::from).to_vec()),
            trust_roots: raw.trust_roots,
            privileges: Arc::new(privileges),
        })
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Binder names, in the order their output is merged.
    pub fn binders(&self) -> &[String] {
        &self.binders
    }

    /// Trusted root certificates for credential verification.
    pub fn trust_roots(&self) -> &[PathBuf] {
        &self.trust_roots
    }

    pub fn privileges(&self) -> Arc<PrivilegeTable> {
        self.privileges.clone()
    }
}

impl Default for AbacConfig {
    fn default() -> Self {
        Self {
            binders: DEFAULT_BINDERS.map(String::from).to_vec(),
            trust_roots: Vec::new(),
            privileges: Arc::new(PrivilegeTable::default()),
        }
    }
}
