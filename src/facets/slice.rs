//! Event-time slicing facet.
//!
//! Splits an event-mode run into time windows `[start_time[i], end_time[i]]`
//! (seconds since run start). The two boundary lists must pair element-wise;
//! whether each list must additionally be monotonically non-decreasing is an
//! explicit option ([`SliceOrdering`]) rather than an implicit
//! per-facility difference.

use serde::{Deserialize, Serialize};

use crate::param::Param;
use crate::state_object;
use crate::validate::ValidationMessage;

/// Ordering policy for slice boundary lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SliceOrdering {
    /// Boundary lists must be monotonically non-decreasing.
    Strict,
    /// Only the pairing checks apply (windows may be listed out of order).
    Relaxed,
}

state_object! {
    /// Event-time slicing of a run into time windows.
    pub struct SliceEventState("slice") builder SliceEventBuilder {
        /// Window start times in seconds since run start.
        param start_time: Vec<f64> = Param::new("start_time") => set_start_time;
        /// Window end times in seconds since run start.
        param end_time: Vec<f64> = Param::new("end_time") => set_end_time;
        /// Whether boundary lists must be monotonically non-decreasing.
        param ordering: SliceOrdering =
            Param::new("ordering").with_default(SliceOrdering::Strict) => set_ordering;
    }
    checks |state, report| {
        match (state.start_time.get(), state.end_time.get()) {
            (Some(start), Some(end)) => {
                if start.len() != end.len() {
                    report.add(
                        "slice_boundaries",
                        ValidationMessage::new(
                            "mismatched slice boundaries",
                            "start_time and end_time must contain the same number of entries",
                        )
                        .with_value("start_time", start)
                        .with_value("end_time", end),
                    );
                } else {
                    for (index, (s, e)) in start.iter().zip(end.iter()).enumerate() {
                        if s > e {
                            report.add(
                                "slice_boundaries",
                                ValidationMessage::new(
                                    "inverted slice window",
                                    format!("window {index} starts at {s} but ends at {e}"),
                                )
                                .with_value("start_time", s)
                                .with_value("end_time", e),
                            );
                        }
                    }
                }

                if state.ordering.get() == Some(&SliceOrdering::Strict) {
                    for (key, values) in [("start_time", start), ("end_time", end)] {
                        if values.windows(2).any(|pair| pair[0] > pair[1]) {
                            report.add(
                                "slice_ordering",
                                ValidationMessage::new(
                                    "slice boundaries out of order",
                                    format!("{key} must be monotonically non-decreasing"),
                                )
                                .with_value(key, values),
                            );
                        }
                    }
                }
            }
            (Some(start), None) => {
                report.add(
                    "slice_boundaries",
                    ValidationMessage::new(
                        "incomplete slice definition",
                        "start_time is set but end_time is not",
                    )
                    .with_value("start_time", start),
                );
            }
            (None, Some(end)) => {
                report.add(
                    "slice_boundaries",
                    ValidationMessage::new(
                        "incomplete slice definition",
                        "end_time is set but start_time is not",
                    )
                    .with_value("end_time", end),
                );
            }
            (None, None) => {}
        }
    }
}
