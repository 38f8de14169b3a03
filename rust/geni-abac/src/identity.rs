use geni_urn::{Urn, UrnError};

/// The caller identity could not be decoded.
#[derive(Debug, thiserror::Error)]
pub enum IdentityDecodeError {
    /// The identity does not carry a URN.
    #[error("No URN found in caller identity")]
    MissingUrn,

    /// The identity carries something that is not a valid URN.
    #[error("Caller identity URN is invalid: {0}")]
    InvalidUrn(#[from] UrnError),

    /// Any other decoder-specific failure.
    #[error("{0}")]
    Other(String),
}

/// Turns a caller identity (typically a certificate) into its URN.
pub trait IdentityDecoder: Send + Sync {
    /// Extract the URN naming the caller.
    fn identity_to_urn(&self, identity: &str) -> Result<Urn, IdentityDecodeError>;
}

/// Decoder for identities that are already URN strings, for transports that
/// extract the certificate's subjectAltName before dispatch.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrnIdentityDecoder;

impl IdentityDecoder for UrnIdentityDecoder {
    fn identity_to_urn(&self, identity: &str) -> Result<Urn, IdentityDecodeError> {
        let identity = identity.trim();
        if identity.is_empty() {
            return Err(IdentityDecodeError::MissingUrn);
        }
        Ok(identity.parse()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_decodes_urn_identities() {
        let urn = UrnIdentityDecoder
            .identity_to_urn(" urn:publicid:IDN+example.org:bob+user+bob\n")
            .unwrap();
        assert_eq!(urn.name(), "bob");
    }

    #[test]
    fn it_rejects_blank_and_invalid_identities() {
        assert!(matches!(
            UrnIdentityDecoder.identity_to_urn("  "),
            Err(IdentityDecodeError::MissingUrn)
        ));
        assert!(matches!(
            UrnIdentityDecoder.identity_to_urn("-----BEGIN CERTIFICATE-----"),
            Err(IdentityDecodeError::InvalidUrn(_))
        ));
    }
}
