use std::collections::{BTreeMap, BTreeSet};

/// Reasons a credential chain fails verification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerificationError {
    /// A credential signature does not verify.
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    /// A credential in the chain has expired.
    #[error("Credential expired: {0}")]
    Expired(String),

    /// The chain does not lead back to a trusted root.
    #[error("Untrusted issuer: {0}")]
    UntrustedIssuer(String),

    /// The credentials do not grant the required privileges.
    #[error("Missing privileges: {}", .0.iter().cloned().collect::<Vec<_>>().join(", "))]
    InsufficientPrivileges(BTreeSet<String>),

    /// A credential could not be parsed.
    #[error("Malformed credential: {0}")]
    Malformed(String),

    /// No credential was presented for the target.
    #[error("No credential presented for {0}")]
    NoCredential(String),
}

/// Verifies that a caller's credentials grant a set of privileges.
///
/// Implementations may perform network or cryptographic work, so the check
/// is asynchronous.
#[async_trait::async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Succeeds if `credentials` authorize `caller` to exercise every one of
    /// `privileges`, on `slice_urn` when one is given.
    async fn verify(
        &self,
        caller: &str,
        credentials: &[String],
        slice_urn: Option<&str>,
        privileges: &BTreeSet<String>,
        options: &BTreeMap<String, serde_json::Value>,
    ) -> Result<(), VerificationError>;
}
