//! Attribute-based access control bindings for GENI aggregate managers.
//!
//! Before an aggregate authorizes a call, it needs the facts a policy can
//! talk about: who is calling, on which slice and project, at what time,
//! whether their credentials check out, and which cross-aggregate circuits
//! they are asking for. Each of these is produced by a [`Binder`] as a set
//! of `$VARIABLE` → string [`Bindings`], and a [`BindingAggregator`] merges
//! the output of its configured binders for the policy evaluator.
//!
//! # Binders
//!
//! | Binder | Name | Binds |
//! |--------|------|-------|
//! | [`NullBinder`] | `null` | nothing |
//! | [`StandardContextBinder`] | `standard` | `$METHOD`, `$CALLER`, `$CALLER_AUTHORITY`, `$SLICE_URN`, `$PROJECT_URN`, `$HOUR`, `$MONTH`, `$YEAR`, `$DAY_OF_WEEK` |
//! | [`CredentialCheckBinder`] | `credential` | `$SFA_AUTHORIZED` |
//! | [`StitchingBinder`] | `stitching` | `$REQUESTED_STITCH_POINTS` |
//!
//! # Collaborators
//!
//! Credential verification ([`CredentialVerifier`]), identity decoding
//! ([`IdentityDecoder`]) and the serving aggregate ([`Aggregate`]) are
//! provided by the host service.
//!
//! # Example
//!
//! ```no_run
//! # async fn example(verifier: std::sync::Arc<dyn geni_abac::CredentialVerifier>) -> anyhow::Result<()> {
//! use std::sync::Arc;
//! use geni_abac::*;
//! use geni_urn::Urn;
//!
//! let config = AbacConfig::load("/etc/geni/abac.toml")?;
//! let registry = BinderRegistry::standard(
//!     Arc::new(UrnIdentityDecoder),
//!     verifier,
//!     Arc::new(SystemClock),
//! );
//! let aggregator = BindingAggregator::from_config(&config, &registry)?;
//!
//! let me: Urn = "urn:publicid:IDN+example.org+authority+am".parse()?;
//! let context = CallContext::builder(
//!     Method::AllocateV3,
//!     "urn:publicid:IDN+example.org:proj+user+alice",
//!     Arc::new(me),
//! )
//! .argument("slice_urn", "urn:publicid:IDN+example.org:proj+slice+demo")
//! .build();
//!
//! let bindings = aggregator.resolve(&context).await?;
//! assert_eq!(bindings.get("$METHOD"), Some("AllocateV3"));
//! # Ok(())
//! # }
//! ```

mod error;
pub use error::*;

mod method;
pub use method::*;

mod privilege;
pub use privilege::*;

mod config;
pub use config::*;

mod bindings;
pub use bindings::*;

mod clock;
pub use clock::*;

mod aggregate;
pub use aggregate::*;

mod identity;
pub use identity::*;

mod verifier;
pub use verifier::*;

mod context;
pub use context::*;

mod binder;
pub use binder::*;

mod registry;
pub use registry::*;

mod aggregator;
pub use aggregator::*;
