use geni_rspec::requested_stitch_points;

use crate::{Binder, BinderError, Bindings, CallContext, Method, RSPEC_ARGUMENT, variable};

/// Methods whose request RSpec may ask this aggregate to stitch circuits.
pub const STITCHING_METHODS: [Method; 2] = [Method::CreateSliverV2, Method::AllocateV3];

/// Binds `$REQUESTED_STITCH_POINTS` for sliver-creating calls whose RSpec
/// routes stitched links through this aggregate.
///
/// The value renders the points as `[L1, L2]`, in document order and with
/// duplicates kept. Calls without stitching bind nothing; an RSpec that is
/// not well-formed fails the binder.
#[derive(Debug, Clone, Copy, Default)]
pub struct StitchingBinder;

#[async_trait::async_trait]
impl Binder for StitchingBinder {
    fn name(&self) -> &str {
        "stitching"
    }

    async fn generate_bindings(&self, context: &CallContext) -> Result<Bindings, BinderError> {
        let mut bindings = Bindings::new();

        if !STITCHING_METHODS.contains(&context.method()) {
            return Ok(bindings);
        }

        let Some(rspec) = context.argument(RSPEC_ARGUMENT) else {
            return Ok(bindings);
        };

        let points = requested_stitch_points(rspec, context.aggregate().own_urn()).map_err(
            |source| BinderError::DocumentParse {
                field: RSPEC_ARGUMENT,
                source,
            },
        )?;

        if let Some(points) = points {
            tracing::debug!(count = points.len(), "Requested stitch points");
            bindings.bind(variable::REQUESTED_STITCH_POINTS, points.to_string());
        }

        Ok(bindings)
    }
}
