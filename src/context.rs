//! Facility and instrument identity.
//!
//! The two-level identity used to select instrument-specific defaults and
//! builder implementations. Both levels are closed sum types, so the builder
//! factory matches them exhaustively and adding a new instrument without a
//! corresponding builder arm is caught at compile time rather than surfacing
//! as a runtime error.
//!
//! [`ReductionContext`] carries the pairing as supplied by the caller;
//! because facility and instrument arrive independently (scripts and legacy
//! configuration files name both), a mismatched pairing is representable and
//! must be rejected by dispatch, never silently corrected.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Facility / Instrument tags
// =============================================================================

/// Facility operating the instrument.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Facility {
    /// ISIS Neutron and Muon Source.
    Isis,
    /// Institut Laue-Langevin.
    Ill,
}

impl Facility {
    /// Canonical name, as used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Facility::Isis => "ISIS",
            Facility::Ill => "ILL",
        }
    }
}

impl fmt::Display for Facility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Instrument a reduction is configured for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Instrument {
    /// ISIS small-angle instrument with front and rear banks.
    Sans2d,
    /// ISIS low-Q instrument.
    Loq,
    /// ISIS polarized small-angle instrument.
    Larmor,
    /// ISIS high-flux small-angle instrument.
    Zoom,
    /// ILL lowest-momentum-transfer instrument.
    D11,
    /// ILL large-dynamic-range instrument.
    D22,
    /// ILL time-of-flight-capable instrument.
    D33,
}

impl Instrument {
    /// Every known instrument, for registry-totality iteration.
    pub const ALL: [Instrument; 7] = [
        Instrument::Sans2d,
        Instrument::Loq,
        Instrument::Larmor,
        Instrument::Zoom,
        Instrument::D11,
        Instrument::D22,
        Instrument::D33,
    ];

    /// The facility this instrument belongs to.
    pub fn facility(self) -> Facility {
        match self {
            Instrument::Sans2d | Instrument::Loq | Instrument::Larmor | Instrument::Zoom => {
                Facility::Isis
            }
            Instrument::D11 | Instrument::D22 | Instrument::D33 => Facility::Ill,
        }
    }

    /// Canonical name, as used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Instrument::Sans2d => "SANS2D",
            Instrument::Loq => "LOQ",
            Instrument::Larmor => "LARMOR",
            Instrument::Zoom => "ZOOM",
            Instrument::D11 => "D11",
            Instrument::D22 => "D22",
            Instrument::D33 => "D33",
        }
    }

    /// Static geometry lookup for this instrument.
    ///
    /// Stands in for the instrument definition file: consulted exactly once,
    /// at builder construction time, never on the hot path.
    pub fn geometry(self) -> InstrumentGeometry {
        match self {
            Instrument::Sans2d => InstrumentGeometry {
                low_angle_bank: "rear-detector",
                high_angle_bank: Some("front-detector"),
                incident_monitor: 1,
                transmission_monitor: 4,
                sample_offset: 0.053,
            },
            Instrument::Loq => InstrumentGeometry {
                low_angle_bank: "main-detector-bank",
                high_angle_bank: Some("HAB"),
                incident_monitor: 1,
                transmission_monitor: 2,
                sample_offset: 0.0,
            },
            Instrument::Larmor => InstrumentGeometry {
                low_angle_bank: "DetectorBench",
                high_angle_bank: None,
                incident_monitor: 1,
                transmission_monitor: 2,
                sample_offset: 0.0,
            },
            Instrument::Zoom => InstrumentGeometry {
                low_angle_bank: "rear-detector",
                high_angle_bank: None,
                incident_monitor: 3,
                transmission_monitor: 4,
                sample_offset: 0.0,
            },
            Instrument::D11 | Instrument::D22 | Instrument::D33 => InstrumentGeometry {
                low_angle_bank: "detector",
                high_angle_bank: None,
                incident_monitor: 1,
                transmission_monitor: 1,
                sample_offset: 0.0,
            },
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Context
// =============================================================================

/// The context a configuration session is opened with.
///
/// Context flows into configuration in exactly one place: builder
/// constructors, which may pre-populate per-instrument defaults from
/// [`Instrument::geometry`]. Once a builder is constructed it is independent
/// of the context object.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReductionContext {
    /// Facility tag, as supplied by the caller.
    pub facility: Facility,
    /// Instrument tag, as supplied by the caller.
    pub instrument: Instrument,
}

impl ReductionContext {
    /// Create a context from an explicit (possibly inconsistent) pairing.
    pub fn new(facility: Facility, instrument: Instrument) -> Self {
        Self {
            facility,
            instrument,
        }
    }

    /// Create a context with the facility derived from the instrument.
    pub fn for_instrument(instrument: Instrument) -> Self {
        Self {
            facility: instrument.facility(),
            instrument,
        }
    }

    /// Whether the supplied facility actually operates the instrument.
    pub fn is_consistent(&self) -> bool {
        self.instrument.facility() == self.facility
    }
}

// =============================================================================
// Geometry
// =============================================================================

/// Per-instrument geometry defaults read at builder construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InstrumentGeometry {
    /// Name of the main (low-angle) detector bank.
    pub low_angle_bank: &'static str,
    /// Name of the high-angle bank, if the instrument has one.
    pub high_angle_bank: Option<&'static str>,
    /// Spectrum number of the incident-beam monitor.
    pub incident_monitor: i64,
    /// Spectrum number of the transmission monitor.
    pub transmission_monitor: i64,
    /// Default sample offset in metres.
    pub sample_offset: f64,
}

// =============================================================================
// Tests
// =============================================================================
