//! Detector positioning facet.
//!
//! Carries the bank-position corrections applied before the reduction runs.
//! The wire key for this facet is `"move"`; the Rust module and field names
//! differ because `move` is a reserved identifier; the storage-key
//! indirection on the descriptors exists for exactly this case.
//!
//! `detector_name` is looked up from instrument geometry when the factory
//! constructs the builder; it is deliberately excluded from the generated
//! setters so callers cannot override it with a name the instrument does not
//! have.

use std::collections::BTreeMap;

use crate::context::Instrument;
use crate::error::StateResult;
use crate::param::Param;
use crate::state_object;
use crate::validate::ValidationMessage;

state_object! {
    /// Detector bank position corrections (wire key `"move"`).
    pub struct MoveState("move") builder MoveBuilder {
        /// Geometry-derived bank name; populated by the factory, not settable.
        param detector_name: String = Param::new("detector_name").non_empty();
        /// Sample position offset along the beam, in metres.
        param sample_offset: f64 = Param::new("sample_offset") => set_sample_offset;
        /// Bank translation correction along x, in metres.
        param x_translation_correction: f64 =
            Param::new("x_translation_correction").with_default(0.0)
                => set_x_translation_correction;
        /// Bank translation correction along y, in metres.
        param y_translation_correction: f64 =
            Param::new("y_translation_correction").with_default(0.0)
                => set_y_translation_correction;
        /// Per-monitor z offsets in metres, keyed by monitor name.
        param monitor_offsets: BTreeMap<String, f64> =
            Param::new("monitor_offsets") => set_monitor_offsets;
    }
    checks |state, report| {
        if state.detector_name.get().is_none() {
            report.add(
                "detector",
                ValidationMessage::new(
                    "detector name missing",
                    "detector_name is populated from instrument geometry; \
                     obtain this builder through get_move_builder",
                ),
            );
        }
    }
}

impl MoveBuilder {
    /// Pre-populate geometry-derived defaults for one instrument.
    ///
    /// This is the single point where context flows into the facet; the
    /// returned builder is independent of the context afterwards.
    pub(crate) fn for_instrument(instrument: Instrument) -> StateResult<Self> {
        let geometry = instrument.geometry();
        let mut state = MoveState::default();
        state.detector_name.set(geometry.low_angle_bank.to_string())?;
        state.sample_offset.set(geometry.sample_offset)?;

        let mut offsets = BTreeMap::new();
        offsets.insert(format!("monitor{}", geometry.incident_monitor), 0.0);
        offsets.insert(format!("monitor{}", geometry.transmission_monitor), 0.0);
        state.monitor_offsets.set(offsets)?;

        Ok(Self::from_state(state))
    }
}
