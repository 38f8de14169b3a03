use std::{collections::BTreeMap, sync::Arc};

use crate::{
    AbacConfig, Binder, Clock, ConfigError, CredentialCheckBinder, CredentialVerifier,
    IdentityDecoder, NullBinder, StandardContextBinder, StitchingBinder,
};

/// Builds a binder from the loaded configuration.
pub type BinderFactory =
    Box<dyn Fn(&AbacConfig) -> Result<Arc<dyn Binder>, ConfigError> + Send + Sync>;

/// Named binder factories, so configuration can refer to binders by name.
#[derive(Default)]
pub struct BinderRegistry {
    factories: BTreeMap<String, BinderFactory>,
}

impl BinderRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in binders: `null`, `standard`,
    /// `credential` and `stitching`.
    pub fn standard(
        decoder: Arc<dyn IdentityDecoder>,
        verifier: Arc<dyn CredentialVerifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let mut registry = Self::new();

        registry
            .register("null", |_| Ok(Arc::new(NullBinder)))
            .register("standard", move |_| {
                Ok(Arc::new(StandardContextBinder::new(
                    decoder.clone(),
                    clock.clone(),
                )))
            })
            .register("credential", move |config| {
                Ok(Arc::new(CredentialCheckBinder::new(
                    verifier.clone(),
                    config.privileges(),
                )))
            })
            .register("stitching", |_| Ok(Arc::new(StitchingBinder)));

        registry
    }

    /// Register `factory` under `name`, replacing any previous factory of
    /// that name.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn(&AbacConfig) -> Result<Arc<dyn Binder>, ConfigError> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Build the binder registered under `name`.
    pub fn build(&self, name: &str, config: &AbacConfig) -> Result<Arc<dyn Binder>, ConfigError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| ConfigError::UnknownBinder(name.to_owned()))?;
        factory(config)
    }

    /// Build every binder the configuration lists, in order.
    pub fn build_all(&self, config: &AbacConfig) -> Result<Vec<Arc<dyn Binder>>, ConfigError> {
        config
            .binders()
            .iter()
            .map(|name| self.build(name, config))
            .collect()
    }
}
