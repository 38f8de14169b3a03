use std::sync::Arc;

use crate::{
    Binder, BinderError, Bindings, CallContext, CredentialVerifier, PrivilegeTable,
    SLICE_URN_ARGUMENT, VerificationError, variable,
};

/// What the credential check established about a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialFact {
    /// The credentials grant every privilege the method requires.
    Verified,
    /// The credentials could not be verified, for this reason.
    Unverified(VerificationError),
}

/// Binds `$SFA_AUTHORIZED` to `True` when the caller's credentials grant the
/// privileges the method requires.
///
/// A failed check binds nothing: policies must read a missing
/// `$SFA_AUTHORIZED` as "not authorized by credentials". The reason is kept
/// on the returned [`Bindings`] as a withheld variable.
pub struct CredentialCheckBinder {
    verifier: Arc<dyn CredentialVerifier>,
    privileges: Arc<PrivilegeTable>,
}

impl CredentialCheckBinder {
    pub fn new(verifier: Arc<dyn CredentialVerifier>, privileges: Arc<PrivilegeTable>) -> Self {
        Self {
            verifier,
            privileges,
        }
    }

    /// Run the credential check for `context`.
    pub async fn check(&self, context: &CallContext) -> CredentialFact {
        let verified = self
            .verifier
            .verify(
                context.caller(),
                context.credentials(),
                context.argument(SLICE_URN_ARGUMENT),
                self.privileges.required(context.method()),
                context.options(),
            )
            .await;

        match verified {
            Ok(()) => CredentialFact::Verified,
            Err(reason) => CredentialFact::Unverified(reason),
        }
    }
}

#[async_trait::async_trait]
impl Binder for CredentialCheckBinder {
    fn name(&self) -> &str {
        "credential"
    }

    fn is_best_effort(&self) -> bool {
        true
    }

    async fn generate_bindings(&self, context: &CallContext) -> Result<Bindings, BinderError> {
        let mut bindings = Bindings::new();

        match self.check(context).await {
            CredentialFact::Verified => {
                bindings.bind(variable::SFA_AUTHORIZED, "True");
            }
            CredentialFact::Unverified(reason) => {
                tracing::warn!(
                    method = %context.method(),
                    %reason,
                    "Credential check failed; {} left unbound",
                    variable::SFA_AUTHORIZED
                );
                bindings.withhold(variable::SFA_AUTHORIZED, reason.to_string());
            }
        }

        Ok(bindings)
    }
}
