use std::path::PathBuf;

use geni_rspec::RspecError;
use geni_urn::UrnError;

use crate::{IdentityDecodeError, Method};

/// Errors a binder can raise while generating bindings or handling a result.
#[derive(Debug, thiserror::Error)]
pub enum BinderError {
    /// A URN-valued field does not have the required shape.
    #[error("Malformed URN in '{field}': {source}")]
    MalformedUrn {
        /// The argument or derived value that was malformed.
        field: &'static str,
        /// The underlying parse failure.
        #[source]
        source: UrnError,
    },

    /// The caller identity could not be turned into a URN.
    #[error("Cannot decode caller identity: {0}")]
    IdentityDecode(#[from] IdentityDecodeError),

    /// A resource description argument is not a usable document.
    #[error("Malformed '{field}' document: {source}")]
    DocumentParse {
        /// The argument carrying the document.
        field: &'static str,
        /// The underlying parse failure.
        #[source]
        source: RspecError,
    },

    /// A result hook failed.
    #[error("Result hook failed: {0}")]
    Hook(String),
}

/// A binding round failed; the policy evaluator must treat this as deny.
#[derive(Debug, thiserror::Error)]
#[error("Binder '{binder}' failed: {source}")]
pub struct ResolveError {
    /// Name of the binder that failed.
    pub binder: String,
    /// What went wrong.
    #[source]
    pub source: BinderError,
}

/// A result hook that failed during [`crate::BindingAggregator::notify`].
#[derive(Debug)]
pub struct HookFailure {
    /// Name of the binder whose hook failed.
    pub binder: String,
    /// What went wrong.
    pub error: BinderError,
}

/// Errors raised while loading configuration or assembling binders.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read configuration {path}: {source}")]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid TOML or has the wrong shape.
    #[error("Invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// A method name is not one of the known methods.
    #[error("Unknown method '{0}'")]
    UnknownMethod(String),

    /// The privilege table leaves some methods out.
    #[error(
        "Privilege table is missing methods: {}",
        .0.iter().map(Method::as_str).collect::<Vec<_>>().join(", ")
    )]
    MissingPrivileges(Vec<Method>),

    /// No factory is registered under this binder name.
    #[error("Unknown binder '{0}'")]
    UnknownBinder(String),

    /// A registered factory refused to build its binder.
    #[error("Binder '{name}' could not be built: {message}")]
    Binder {
        /// Name the binder was requested under.
        name: String,
        /// Why it could not be built.
        message: String,
    },
}
