//! Composite reduction state.
//!
//! The full configuration tree handed to the reduction engine: one group per
//! facet plus the instrument tag the configuration was assembled for.
//! Facet snapshots are built and frozen independently, then attached here.
//! Only frozen sub-states can be attached, which is what makes the
//! composite's own build-time copy safe for concurrent readers.

use crate::context::{Instrument, ReductionContext};
use crate::error::StateResult;
use crate::param::{Group, Param};
use crate::state_object;
use crate::validate::ValidationMessage;

use super::adjustment::AdjustmentState;
use super::mask::MaskState;
use super::mover::{MoveBuilder, MoveState};
use super::slice::SliceEventState;
use super::wavelength::WavelengthState;

state_object! {
    /// Complete reduction configuration consumed by the reduction engine.
    pub struct ReductionState("reduction") builder ReductionBuilder {
        /// Instrument this configuration was assembled for; populated from
        /// context by the factory, not settable.
        param instrument: Instrument = Param::new("instrument");
        /// Event-time slicing.
        group slice: SliceEventState = Group::new("slice") => set_slice;
        /// Wavelength range and binning.
        group wavelength: WavelengthState = Group::new("wavelength") => set_wavelength;
        /// Per-bank adjustments.
        group adjustment: AdjustmentState = Group::new("adjustment") => set_adjustment;
        /// Detector and bin masking.
        group mask: MaskState = Group::new("mask") => set_mask;
        /// Detector positioning (wire key `"move"`).
        group detector_move: MoveState = Group::new("move") => set_move;
    }
    checks |state, report| {
        if state.instrument.get().is_none() {
            report.add(
                "instrument",
                ValidationMessage::new(
                    "instrument missing",
                    "obtain this builder through get_reduction_builder so the \
                     instrument tag is populated from context",
                ),
            );
        }
    }
}

impl ReductionBuilder {
    /// Pre-populate the instrument tag and geometry-derived move defaults.
    pub(crate) fn for_context(context: &ReductionContext) -> StateResult<Self> {
        let mut state = ReductionState::default();
        state.instrument.set(context.instrument)?;
        state
            .detector_move
            .replace(MoveBuilder::for_instrument(context.instrument)?.build()?.into_inner());
        Ok(Self::from_state(state))
    }
}
