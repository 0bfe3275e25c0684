//! Wavelength conversion and binning facet.

use serde::{Deserialize, Serialize};

use crate::param::Param;
use crate::state_object;
use crate::validate::ValidationMessage;

/// Step scaling used when rebinning onto the wavelength range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeStepType {
    /// Linear bin widths.
    Lin,
    /// Logarithmic bin widths.
    Log,
}

state_object! {
    /// Wavelength range and rebinning parameters.
    pub struct WavelengthState("wavelength") builder WavelengthBuilder {
        /// Lower wavelength limit in Angstrom.
        param wavelength_low: f64 =
            Param::new("wavelength_low").with_lower_bound(0.0) => set_wavelength_low;
        /// Upper wavelength limit in Angstrom.
        param wavelength_high: f64 =
            Param::new("wavelength_high").with_lower_bound(0.0) => set_wavelength_high;
        /// Rebin step width.
        param wavelength_step: f64 =
            Param::new("wavelength_step").with_validator(|step| {
                if *step > 0.0 {
                    Ok(())
                } else {
                    Err("step must be positive".to_string())
                }
            }) => set_wavelength_step;
        /// Linear or logarithmic binning.
        param wavelength_step_type: RangeStepType =
            Param::new("wavelength_step_type").with_default(RangeStepType::Lin)
                => set_wavelength_step_type;
    }
    checks |state, report| {
        match (state.wavelength_low.get(), state.wavelength_high.get()) {
            (Some(low), Some(high)) => {
                if low > high {
                    report.add(
                        "wavelength_range",
                        ValidationMessage::new(
                            "inverted wavelength range",
                            format!(
                                "wavelength_low ({low}) must not exceed wavelength_high ({high})"
                            ),
                        )
                        .with_value("wavelength_low", low)
                        .with_value("wavelength_high", high),
                    );
                }
            }
            (Some(low), None) => {
                report.add(
                    "wavelength_range",
                    ValidationMessage::new(
                        "incomplete wavelength range",
                        "wavelength_low is set but wavelength_high is not",
                    )
                    .with_value("wavelength_low", low),
                );
            }
            (None, Some(high)) => {
                report.add(
                    "wavelength_range",
                    ValidationMessage::new(
                        "incomplete wavelength range",
                        "wavelength_high is set but wavelength_low is not",
                    )
                    .with_value("wavelength_high", high),
                );
            }
            (None, None) => {}
        }
    }
}
