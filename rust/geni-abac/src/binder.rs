use crate::{BinderError, Bindings, CallContext, CallOutcome};

mod credential;
pub use credential::*;

mod standard;
pub use standard::*;

mod stitching;
pub use stitching::*;

/// Derives a subset of the policy variables for a call.
///
/// Binders are composed by a [`crate::BindingAggregator`], which runs them in
/// configured order and merges their output. New binders only need to
/// implement this trait (and, to be named in configuration, be registered in
/// a [`crate::BinderRegistry`]).
///
/// # Example
///
/// ```
/// use async_trait::async_trait;
/// use geni_abac::{Binder, BinderError, Bindings, CallContext};
///
/// struct Constant;
///
/// #[async_trait]
/// impl Binder for Constant {
///     fn name(&self) -> &str {
///         "constant"
///     }
///
///     async fn generate_bindings(&self, _: &CallContext) -> Result<Bindings, BinderError> {
///         Ok([("$SITE", "lab")].into_iter().collect())
///     }
/// }
/// ```
#[async_trait::async_trait]
pub trait Binder: Send + Sync {
    /// Name used in configuration and in error reports.
    fn name(&self) -> &str;

    /// Whether a failure of this binder may be logged and skipped instead of
    /// failing the whole resolution.
    fn is_best_effort(&self) -> bool {
        false
    }

    /// Produce this binder's bindings for `context`.
    async fn generate_bindings(&self, context: &CallContext) -> Result<Bindings, BinderError>;

    /// Observe the outcome of an authorized call, e.g. for auditing.
    async fn handle_result(
        &self,
        _context: &CallContext,
        _outcome: &CallOutcome,
    ) -> Result<(), BinderError> {
        Ok(())
    }
}

/// A binder that binds nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullBinder;

#[async_trait::async_trait]
impl Binder for NullBinder {
    fn name(&self) -> &str {
        "null"
    }

    async fn generate_bindings(&self, _context: &CallContext) -> Result<Bindings, BinderError> {
        Ok(Bindings::new())
    }
}
