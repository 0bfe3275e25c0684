//! Beam-stop and bin masking facet.

use crate::param::Param;
use crate::state_object;
use crate::validate::ValidationMessage;

state_object! {
    /// Masking applied to the detector and to time-of-flight bins.
    pub struct MaskState("mask") builder MaskBuilder {
        /// Inner beam-stop mask radius in metres.
        param radius_min: f64 = Param::new("radius_min").with_lower_bound(0.0)
            => set_radius_min;
        /// Outer mask radius in metres.
        param radius_max: f64 = Param::new("radius_max").with_lower_bound(0.0)
            => set_radius_max;
        /// Mask files to apply, in order.
        param mask_files: Vec<String> = Param::new("mask_files") => set_mask_files;
        /// Start edges of masked time-of-flight bins.
        param bin_mask_start: Vec<f64> = Param::new("bin_mask_start") => set_bin_mask_start;
        /// Stop edges of masked time-of-flight bins.
        param bin_mask_stop: Vec<f64> = Param::new("bin_mask_stop") => set_bin_mask_stop;
    }
    checks |state, report| {
        if let (Some(min), Some(max)) = (state.radius_min.get(), state.radius_max.get()) {
            if min > max {
                report.add(
                    "mask_radius",
                    ValidationMessage::new(
                        "inverted mask radius",
                        format!("radius_min ({min}) must not exceed radius_max ({max})"),
                    )
                    .with_value("radius_min", min)
                    .with_value("radius_max", max),
                );
            }
        }

        match (state.bin_mask_start.get(), state.bin_mask_stop.get()) {
            (Some(start), Some(stop)) => {
                if start.len() != stop.len() {
                    report.add(
                        "bin_mask",
                        ValidationMessage::new(
                            "mismatched bin mask edges",
                            "bin_mask_start and bin_mask_stop must pair element-wise",
                        )
                        .with_value("bin_mask_start", start)
                        .with_value("bin_mask_stop", stop),
                    );
                } else {
                    for (index, (s, e)) in start.iter().zip(stop.iter()).enumerate() {
                        if s > e {
                            report.add(
                                "bin_mask",
                                ValidationMessage::new(
                                    "inverted bin mask",
                                    format!("mask {index} starts at {s} but stops at {e}"),
                                )
                                .with_value("bin_mask_start", s)
                                .with_value("bin_mask_stop", e),
                            );
                        }
                    }
                }
            }
            (Some(start), None) => {
                report.add(
                    "bin_mask",
                    ValidationMessage::new(
                        "incomplete bin mask",
                        "bin_mask_start is set but bin_mask_stop is not",
                    )
                    .with_value("bin_mask_start", start),
                );
            }
            (None, Some(stop)) => {
                report.add(
                    "bin_mask",
                    ValidationMessage::new(
                        "incomplete bin mask",
                        "bin_mask_stop is set but bin_mask_start is not",
                    )
                    .with_value("bin_mask_stop", stop),
                );
            }
            (None, None) => {}
        }
    }
}
