use std::sync::Arc;

use chrono::{Datelike, Timelike};
use geni_urn::{authority_urn_from_user, project_urn_from_slice};

use crate::{
    Binder, BinderError, Bindings, CallContext, Clock, IdentityDecoder, SLICE_URN_ARGUMENT,
    variable,
};

/// Binds the context every policy may refer to: the method, the caller and
/// its authority, the slice and its project, and the local time.
///
/// `$DAY_OF_WEEK` counts from Monday = `0` to Sunday = `6`.
///
/// When the call has no `slice_urn` argument, `$SLICE_URN` and `$PROJECT_URN`
/// are left unbound.
pub struct StandardContextBinder {
    decoder: Arc<dyn IdentityDecoder>,
    clock: Arc<dyn Clock>,
}

impl StandardContextBinder {
    pub fn new(decoder: Arc<dyn IdentityDecoder>, clock: Arc<dyn Clock>) -> Self {
        Self { decoder, clock }
    }
}

#[async_trait::async_trait]
impl Binder for StandardContextBinder {
    fn name(&self) -> &str {
        "standard"
    }

    async fn generate_bindings(&self, context: &CallContext) -> Result<Bindings, BinderError> {
        let mut bindings = Bindings::new();

        bindings.bind(variable::METHOD, context.method().as_str());

        let caller = self.decoder.identity_to_urn(context.caller())?.to_string();
        let caller_authority =
            authority_urn_from_user(&caller).map_err(|source| BinderError::MalformedUrn {
                field: "caller",
                source,
            })?;
        bindings.bind(variable::CALLER, caller);
        bindings.bind(variable::CALLER_AUTHORITY, caller_authority.to_string());

        match context.argument(SLICE_URN_ARGUMENT) {
            Some(slice_urn) => {
                let project =
                    project_urn_from_slice(slice_urn).map_err(|source| BinderError::MalformedUrn {
                        field: SLICE_URN_ARGUMENT,
                        source,
                    })?;
                bindings.bind(variable::SLICE_URN, slice_urn);
                bindings.bind(variable::PROJECT_URN, project.to_string());
            }
            None => {
                tracing::debug!(
                    method = %context.method(),
                    "No slice_urn argument; slice and project variables left unbound"
                );
            }
        }

        let now = self.clock.now();
        bindings.bind(variable::HOUR, now.hour().to_string());
        bindings.bind(variable::MONTH, now.month().to_string());
        bindings.bind(variable::YEAR, now.year().to_string());
        bindings.bind(
            variable::DAY_OF_WEEK,
            now.weekday().num_days_from_monday().to_string(),
        );

        Ok(bindings)
    }
}
