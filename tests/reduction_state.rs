//! End-to-end tests of the configuration framework: builder dispatch,
//! aggregate validation, and wire round-trips over the composite tree.

use pretty_assertions::assert_eq;

use reduction_state::context::{Facility, Instrument, ReductionContext};
use reduction_state::facets::adjustment::AdjustmentState;
use reduction_state::facets::reduction::ReductionState;
use reduction_state::facets::slice::SliceEventState;
use reduction_state::facets::wavelength::RangeStepType;
use reduction_state::factory::{
    get_adjustment_builder, get_mask_builder, get_move_builder, get_reduction_builder,
    get_slice_event_builder, get_wavelength_builder,
};
use reduction_state::serializer::{decode, decode_frozen, encode};
use reduction_state::validate::validate;
use reduction_state::{Frozen, StateError, WireValue};

fn isis() -> ReductionContext {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("reduction_state=debug")
        .try_init();
    ReductionContext::for_instrument(Instrument::Sans2d)
}

fn full_tree() -> Frozen<ReductionState> {
    let context = isis();

    let slice = get_slice_event_builder(&context)
        .unwrap()
        .set_start_time(vec![0.1, 1.3])
        .unwrap()
        .set_end_time(vec![0.2, 1.6])
        .unwrap()
        .build()
        .unwrap();

    let wavelength = get_wavelength_builder(&context)
        .unwrap()
        .set_wavelength_low(2.0)
        .unwrap()
        .set_wavelength_high(14.0)
        .unwrap()
        .set_wavelength_step(0.125)
        .unwrap()
        .set_wavelength_step_type(RangeStepType::Log)
        .unwrap()
        .build()
        .unwrap();

    let adjustment = {
        let builder = get_adjustment_builder(&context).unwrap();
        let lab = reduction_state::facets::adjustment::AdjustmentFilesBuilder::new()
            .set_wavelength_adjustment_file("lab_wave.nxs".to_string())
            .unwrap()
            .set_pixel_adjustment_file("lab_flood.nxs".to_string())
            .unwrap()
            .build()
            .unwrap();
        let hab = reduction_state::facets::adjustment::AdjustmentFilesBuilder::new()
            .set_wavelength_adjustment_file("hab_wave.nxs".to_string())
            .unwrap()
            .build()
            .unwrap();
        builder
            .set_low_angle_bank(lab)
            .set_high_angle_bank(hab)
            .set_wide_angle_correction(true)
            .unwrap()
            .build()
            .unwrap()
    };

    let mask = get_mask_builder(&context)
        .unwrap()
        .set_radius_min(0.04)
        .unwrap()
        .set_radius_max(0.26)
        .unwrap()
        .set_mask_files(vec!["MASK_SANS2D.xml".to_string()])
        .unwrap()
        .build()
        .unwrap();

    let detector_move = get_move_builder(&context)
        .unwrap()
        .set_x_translation_correction(-0.002)
        .unwrap()
        .build()
        .unwrap();

    get_reduction_builder(&context)
        .unwrap()
        .set_slice(slice)
        .set_wavelength(wavelength)
        .set_adjustment(adjustment)
        .set_mask(mask)
        .set_move(detector_move)
        .build()
        .unwrap()
}

// -----------------------------------------------------------------------------
// Concrete scenarios
// -----------------------------------------------------------------------------

#[test]
fn slice_with_paired_windows_builds_with_zero_messages() {
    let frozen = get_slice_event_builder(&isis())
        .unwrap()
        .set_start_time(vec![0.1, 1.3])
        .unwrap()
        .set_end_time(vec![0.2, 1.6])
        .unwrap()
        .build()
        .unwrap();
    frozen.validate().unwrap();
}

#[test]
fn slice_with_mismatched_lengths_fails_with_one_message_naming_both_fields() {
    let err = get_slice_event_builder(&isis())
        .unwrap()
        .set_start_time(vec![0.1, 1.3])
        .unwrap()
        .set_end_time(vec![0.2])
        .unwrap()
        .build()
        .unwrap_err();

    let report = err.report().expect("validation error");
    assert_eq!(report.message_count(), 1);

    let message = &report.messages("slice_boundaries")[0];
    let fields: Vec<&str> = message.values.iter().map(|(f, _)| f.as_str()).collect();
    assert_eq!(fields, vec!["start_time", "end_time"]);
}

#[test]
fn wavelength_low_above_high_reports_both_literal_values() {
    let err = get_wavelength_builder(&isis())
        .unwrap()
        .set_wavelength_low(10.0)
        .unwrap()
        .set_wavelength_high(5.0)
        .unwrap()
        .build()
        .unwrap_err();

    let report = err.report().expect("validation error");
    let payload = report.to_wire();
    let values = &payload["wavelength_range"][0]["values"];
    assert_eq!(values["wavelength_low"], WireValue::from(10.0));
    assert_eq!(values["wavelength_high"], WireValue::from(5.0));
}

#[test]
fn nested_bank_adjustments_round_trip_exactly() {
    let lab = reduction_state::facets::adjustment::AdjustmentFilesBuilder::new()
        .set_wavelength_adjustment_file("lab_wave.nxs".to_string())
        .unwrap()
        .build()
        .unwrap();
    let hab = reduction_state::facets::adjustment::AdjustmentFilesBuilder::new()
        .set_wavelength_adjustment_file("hab_wave.nxs".to_string())
        .unwrap()
        .set_pixel_adjustment_file("hab_flood.nxs".to_string())
        .unwrap()
        .build()
        .unwrap();

    let frozen = get_adjustment_builder(&isis())
        .unwrap()
        .set_low_angle_bank(lab)
        .set_high_angle_bank(hab)
        .build()
        .unwrap();

    let decoded: AdjustmentState = decode(&encode(&*frozen)).unwrap();
    assert_eq!(decoded, (*frozen).clone());
    assert_eq!(
        decoded
            .high_angle_bank
            .get()
            .pixel_adjustment_file
            .get()
            .map(String::as_str),
        Some("hab_flood.nxs")
    );
}

// -----------------------------------------------------------------------------
// Round trip and wire shape
// -----------------------------------------------------------------------------

#[test]
fn full_reduction_tree_round_trips() {
    let frozen = full_tree();
    let wire = encode(&*frozen);
    let restored = decode_frozen::<ReductionState>(&wire).unwrap();
    assert_eq!(restored, frozen);
}

#[test]
fn enum_tags_encode_as_canonical_strings() {
    let frozen = full_tree();
    let wire = encode(&*frozen);
    assert_eq!(wire["instrument"], "SANS2D");
    assert_eq!(wire["wavelength"]["wavelength_step_type"], "log");
    assert_eq!(wire["slice"]["ordering"], "strict");
}

#[test]
fn unset_fields_encode_as_null_not_missing() {
    let frozen = full_tree();
    let wire = encode(&*frozen);
    // sample_offset for SANS2D comes from geometry; y translation defaulted.
    assert_eq!(wire["move"]["sample_offset"], WireValue::from(0.053));
    // The HAB pixel adjustment was never configured.
    assert_eq!(
        wire["adjustment"]["high_angle_bank"]["pixel_adjustment_file"],
        WireValue::Null
    );
}

#[test]
fn decoding_a_dropped_field_fails_fast() {
    let frozen = full_tree();
    let mut wire = encode(&*frozen);
    wire.as_object_mut()
        .unwrap()
        .insert("gravity".to_string(), WireValue::Bool(true));

    let err = decode::<ReductionState>(&wire).unwrap_err();
    assert!(matches!(err, StateError::SchemaMismatch { .. }));
    assert!(err.to_string().contains("gravity"));
}

#[test]
fn decoding_wrong_scalar_type_names_field_and_type() {
    let wire = serde_json::json!({ "start_time": "soon" });
    let err = decode::<SliceEventState>(&wire).unwrap_err();
    assert!(err.to_string().contains("start_time"));
}

// -----------------------------------------------------------------------------
// Aggregation
// -----------------------------------------------------------------------------

#[test]
fn composite_validation_reports_every_problem_once() {
    // Root violation (no instrument) plus one violation in each of three
    // nested facets: slice pairing, wavelength range, move detector name.
    let mut state = ReductionState::default();
    state.slice.get_mut().start_time.set(vec![0.1]).unwrap();
    state.wavelength.get_mut().wavelength_low.set(10.0).unwrap();
    state.wavelength.get_mut().wavelength_high.set(5.0).unwrap();

    let err = validate(&state).unwrap_err();
    let report = err.report().expect("validation error");

    assert_eq!(
        report.categories(),
        vec![
            "instrument",
            "move.detector",
            "slice.slice_boundaries",
            "wavelength.wavelength_range",
        ]
    );
    assert_eq!(report.message_count(), 4);
}

#[test]
fn validation_is_idempotent() {
    let mut state = ReductionState::default();
    state.mask.get_mut().radius_min.set(0.5).unwrap();
    state.mask.get_mut().radius_max.set(0.1).unwrap();

    let first = validate(&state).unwrap_err();
    let second = validate(&state).unwrap_err();
    assert_eq!(
        first.report().expect("report"),
        second.report().expect("report")
    );
}

#[test]
fn frozen_state_validates_cleanly_after_build() {
    let frozen = full_tree();
    frozen.validate().unwrap();
    frozen.validate().unwrap();
}

// -----------------------------------------------------------------------------
// Factory dispatch
// -----------------------------------------------------------------------------

#[test]
fn every_registered_pair_yields_a_builder() {
    for instrument in Instrument::ALL {
        let context = ReductionContext::for_instrument(instrument);
        get_slice_event_builder(&context).unwrap();
        get_wavelength_builder(&context).unwrap();
        get_mask_builder(&context).unwrap();
        get_adjustment_builder(&context).unwrap();
        if context.facility == Facility::Isis {
            get_move_builder(&context).unwrap();
            get_reduction_builder(&context).unwrap();
        }
    }
}

#[test]
fn unregistered_pairs_never_fall_back_to_a_default() {
    let mismatched = [
        ReductionContext::new(Facility::Isis, Instrument::D11),
        ReductionContext::new(Facility::Ill, Instrument::Zoom),
    ];
    for context in mismatched {
        let err = get_reduction_builder(&context).unwrap_err();
        assert!(matches!(err, StateError::UnsupportedConfiguration { .. }));
    }

    // Move corrections are not registered for ILL at all.
    let ill = ReductionContext::for_instrument(Instrument::D33);
    assert!(matches!(
        get_move_builder(&ill).unwrap_err(),
        StateError::UnsupportedConfiguration { .. }
    ));
}
