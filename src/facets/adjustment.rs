//! Wavelength- and pixel-adjustment facet.
//!
//! Adjustment workspaces are loaded per detector bank, so the facet nests
//! one [`AdjustmentFiles`] sub-state for each bank. The nesting also
//! exercises the serializer's recursive encoding: both sub-objects round
//! trip with zero facet-specific serialization code.

use crate::param::{Group, Param};
use crate::state_object;

state_object! {
    /// Adjustment file references for one detector bank.
    pub struct AdjustmentFiles("adjustment_files") builder AdjustmentFilesBuilder {
        /// Wavelength-dependent efficiency correction file.
        param wavelength_adjustment_file: String =
            Param::new("wavelength_adjustment_file").non_empty()
                => set_wavelength_adjustment_file;
        /// Pixel-dependent flood correction file.
        param pixel_adjustment_file: String =
            Param::new("pixel_adjustment_file").non_empty() => set_pixel_adjustment_file;
    }
}

state_object! {
    /// Adjustment configuration covering both detector banks.
    pub struct AdjustmentState("adjustment") builder AdjustmentBuilder {
        /// Adjustments for the main (low-angle) bank.
        group low_angle_bank: AdjustmentFiles = Group::new("low_angle_bank")
            => set_low_angle_bank;
        /// Adjustments for the high-angle bank.
        group high_angle_bank: AdjustmentFiles = Group::new("high_angle_bank")
            => set_high_angle_bank;
        /// Whether to apply the wide-angle transmission correction.
        param wide_angle_correction: bool =
            Param::new("wide_angle_correction").with_default(false)
                => set_wide_angle_correction;
    }
}
