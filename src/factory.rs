//! Builder factories - facility/instrument dispatch.
//!
//! One `get_<facet>_builder` function per configuration facet. Dispatch is a
//! two-level lookup: the facility tag is resolved first, then the instrument
//! beneath it; both levels are exhaustive matches over the closed
//! [`Facility`]/[`Instrument`] enums. A pairing without a registered builder
//! fails with `UnsupportedConfiguration`, never a fallback to a "default"
//! instrument, because silently reducing data with the wrong geometry is a
//! correctness bug, not a recoverable condition.
//!
//! Context-dependent default population (detector names, monitor offsets
//! from instrument geometry) happens in the builder constructors invoked
//! here; it is the only place context flows into configuration.

use tracing::{debug, warn};

use crate::context::{Facility, Instrument, ReductionContext};
use crate::error::{StateError, StateResult};
use crate::facets::adjustment::AdjustmentBuilder;
use crate::facets::mask::MaskBuilder;
use crate::facets::mover::MoveBuilder;
use crate::facets::reduction::ReductionBuilder;
use crate::facets::slice::SliceEventBuilder;
use crate::facets::wavelength::WavelengthBuilder;

/// Resolve the facility level of the lookup and confirm the instrument is
/// one of its own. A mismatched pairing is a configuration error.
fn resolve(context: &ReductionContext) -> StateResult<Instrument> {
    let registered = match context.facility {
        Facility::Isis => matches!(
            context.instrument,
            Instrument::Sans2d | Instrument::Loq | Instrument::Larmor | Instrument::Zoom
        ),
        Facility::Ill => matches!(
            context.instrument,
            Instrument::D11 | Instrument::D22 | Instrument::D33
        ),
    };
    if registered {
        Ok(context.instrument)
    } else {
        Err(unsupported(context))
    }
}

fn unsupported(context: &ReductionContext) -> StateError {
    warn!(
        facility = %context.facility,
        instrument = %context.instrument,
        "no builder registered for context"
    );
    StateError::UnsupportedConfiguration {
        facility: context.facility,
        instrument: context.instrument,
    }
}

/// Obtain a slicing builder for the given context.
pub fn get_slice_event_builder(context: &ReductionContext) -> StateResult<SliceEventBuilder> {
    let instrument = resolve(context)?;
    debug!(%instrument, "dispatching slice builder");
    Ok(SliceEventBuilder::new())
}

/// Obtain a wavelength builder for the given context.
pub fn get_wavelength_builder(context: &ReductionContext) -> StateResult<WavelengthBuilder> {
    let instrument = resolve(context)?;
    debug!(%instrument, "dispatching wavelength builder");
    Ok(WavelengthBuilder::new())
}

/// Obtain a mask builder for the given context.
pub fn get_mask_builder(context: &ReductionContext) -> StateResult<MaskBuilder> {
    let instrument = resolve(context)?;
    debug!(%instrument, "dispatching mask builder");
    Ok(MaskBuilder::new())
}

/// Obtain an adjustment builder for the given context.
pub fn get_adjustment_builder(context: &ReductionContext) -> StateResult<AdjustmentBuilder> {
    let instrument = resolve(context)?;
    debug!(%instrument, "dispatching adjustment builder");
    Ok(AdjustmentBuilder::new())
}

/// Obtain a move builder with geometry-derived defaults for the context's
/// instrument.
///
/// Registered for ISIS instruments only: the ILL geometry table carries no
/// bank corrections, so requesting a move builder there is unsupported
/// rather than silently empty.
pub fn get_move_builder(context: &ReductionContext) -> StateResult<MoveBuilder> {
    let instrument = resolve(context)?;
    match context.facility {
        Facility::Isis => {
            debug!(%instrument, "dispatching move builder");
            MoveBuilder::for_instrument(instrument)
        }
        Facility::Ill => Err(unsupported(context)),
    }
}

/// Obtain a composite reduction builder for the given context.
///
/// Like [`get_move_builder`], registered for ISIS instruments only, since
/// the composite tree embeds the move facet.
pub fn get_reduction_builder(context: &ReductionContext) -> StateResult<ReductionBuilder> {
    let instrument = resolve(context)?;
    match context.facility {
        Facility::Isis => {
            debug!(%instrument, "dispatching reduction builder");
            ReductionBuilder::for_context(context)
        }
        Facility::Ill => Err(unsupported(context)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registered_pairs_resolve() {
        for instrument in Instrument::ALL {
            let context = ReductionContext::for_instrument(instrument);
            assert!(get_slice_event_builder(&context).is_ok());
            assert!(get_wavelength_builder(&context).is_ok());
            assert!(get_mask_builder(&context).is_ok());
            assert!(get_adjustment_builder(&context).is_ok());
        }
    }

    #[test]
    fn test_mismatched_pairing_is_unsupported() {
        let context = ReductionContext::new(Facility::Isis, Instrument::D22);
        let err = get_wavelength_builder(&context).unwrap_err();
        assert!(matches!(err, StateError::UnsupportedConfiguration { .. }));

        let context = ReductionContext::new(Facility::Ill, Instrument::Sans2d);
        assert!(get_slice_event_builder(&context).is_err());
    }

    #[test]
    fn test_move_builder_registered_for_isis_only() {
        for instrument in Instrument::ALL {
            let context = ReductionContext::for_instrument(instrument);
            let result = get_move_builder(&context);
            match context.facility {
                Facility::Isis => assert!(result.is_ok()),
                Facility::Ill => {
                    assert!(matches!(
                        result.unwrap_err(),
                        StateError::UnsupportedConfiguration { .. }
                    ));
                }
            }
        }
    }

    #[test]
    fn test_move_builder_carries_instrument_defaults() {
        let context = ReductionContext::for_instrument(Instrument::Zoom);
        let builder = get_move_builder(&context).unwrap();
        assert_eq!(
            builder.state().detector_name.get().map(String::as_str),
            Some("rear-detector")
        );
    }
}
