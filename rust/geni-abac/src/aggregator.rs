use std::sync::Arc;

use crate::{
    AbacConfig, Binder, BinderRegistry, Bindings, CallContext, CallOutcome, ConfigError,
    HookFailure, ResolveError,
};

/// Runs a fixed, ordered list of binders and merges their output.
///
/// The binder list is set once and never changes, so one aggregator can
/// serve any number of concurrent calls.
#[derive(Clone, Default)]
pub struct BindingAggregator {
    binders: Vec<Arc<dyn Binder>>,
}

impl BindingAggregator {
    /// Aggregate `binders`; later binders override earlier ones on collision.
    pub fn configure(binders: impl IntoIterator<Item = Arc<dyn Binder>>) -> Self {
        Self {
            binders: binders.into_iter().collect(),
        }
    }

    /// Build the binders named in `config` from `registry`.
    pub fn from_config(config: &AbacConfig, registry: &BinderRegistry) -> Result<Self, ConfigError> {
        Ok(Self::configure(registry.build_all(config)?))
    }

    /// Names of the configured binders, in order.
    pub fn binder_names(&self) -> impl Iterator<Item = &str> {
        self.binders.iter().map(|binder| binder.name())
    }

    /// Produce the bindings for a call.
    ///
    /// Each binder runs in order and its output is merged last-write-wins. A
    /// failing best-effort binder is logged and skipped; any other failure
    /// aborts the round and names the binder responsible.
    pub async fn resolve(&self, context: &CallContext) -> Result<Bindings, ResolveError> {
        let mut bindings = Bindings::new();

        for binder in &self.binders {
            match binder.generate_bindings(context).await {
                Ok(contribution) => {
                    tracing::debug!(
                        binder = binder.name(),
                        bound = contribution.len(),
                        "Merged binder output"
                    );
                    bindings.merge(contribution);
                }
                Err(error) if binder.is_best_effort() => {
                    tracing::warn!(
                        binder = binder.name(),
                        %error,
                        "Best-effort binder failed; continuing without it"
                    );
                }
                Err(source) => {
                    tracing::warn!(
                        binder = binder.name(),
                        error = %source,
                        method = %context.method(),
                        "Binding resolution failed"
                    );
                    return Err(ResolveError {
                        binder: binder.name().to_owned(),
                        source,
                    });
                }
            }
        }

        Ok(bindings)
    }

    /// Hand the outcome of a call to every binder's result hook.
    ///
    /// Hooks run in order; a failing hook is logged and reported in the
    /// returned list but does not stop later hooks.
    pub async fn notify(&self, context: &CallContext, outcome: &CallOutcome) -> Vec<HookFailure> {
        let mut failures = Vec::new();

        for binder in &self.binders {
            if let Err(error) = binder.handle_result(context, outcome).await {
                tracing::warn!(binder = binder.name(), %error, "Result hook failed");
                failures.push(HookFailure {
                    binder: binder.name().to_owned(),
                    error,
                });
            }
        }

        failures
    }
}
