//! Custom error types for the framework.
//!
//! This module defines the primary error type, `StateError`, for the entire
//! crate. Using the `thiserror` crate, it provides a centralized and
//! consistent way to handle the different failure modes of a configuration
//! session.
//!
//! ## Error Hierarchy
//!
//! `StateError` is an enum that consolidates the four failure modes:
//!
//! - **`Constraint`**: A single field assignment violates its descriptor's
//!   type or bounds. Raised immediately at the setter call, never deferred,
//!   so programmer errors are not mixed in with semantic validation results.
//! - **`Validation`**: One or more semantic or cross-field problems found by
//!   `validate()`. Always carries the *complete* [`ValidationReport`], never
//!   just the first problem: a reduction run is expensive, so the caller
//!   must see every problem in one pass.
//! - **`UnsupportedConfiguration`**: The builder factory could not resolve a
//!   builder for the given facility/instrument pairing. Fatal to the
//!   configuration session; reducing data with the wrong geometry is a
//!   correctness bug, so there is no fallback instrument.
//! - **`SchemaMismatch`**: A wire value's shape does not match the declared
//!   fields of the target state type. Fatal, since proceeding with a
//!   partially decoded configuration risks running with wrong parameters.
//!
//! ## Propagation policy
//!
//! `Constraint` and `SchemaMismatch` are never recovered locally; they abort
//! the configuration session and surface to the caller as-is. `Validation` is
//! the one kind a caller is expected to catch, display field-by-field, and
//! retry `build()` after corrections.

use thiserror::Error;

use crate::context::{Facility, Instrument};
use crate::validate::ValidationReport;

/// Convenience alias for results using the framework error type.
pub type StateResult<T> = std::result::Result<T, StateError>;

/// Error type covering every failure mode of a configuration session.
#[derive(Error, Debug)]
pub enum StateError {
    /// A single field assignment violated its descriptor's constraint.
    #[error("constraint violated for '{field}': {detail} (got {value})")]
    Constraint {
        /// Storage key of the offending field.
        field: &'static str,
        /// Debug rendering of the rejected value.
        value: String,
        /// What the constraint required.
        detail: String,
    },

    /// Semantic validation failed; carries every problem found, aggregated.
    #[error("configuration validation failed:\n{0}")]
    Validation(ValidationReport),

    /// No builder is registered for this facility/instrument pairing.
    #[error("no builder registered for facility '{facility}' and instrument '{instrument}'")]
    UnsupportedConfiguration {
        /// Facility tag from the rejected context.
        facility: Facility,
        /// Instrument tag from the rejected context.
        instrument: Instrument,
    },

    /// A wire value did not match the declared schema of the target state.
    #[error("wire value does not match the schema of '{context}': {detail}")]
    SchemaMismatch {
        /// State name or field key where decoding failed.
        context: String,
        /// Description of the shape mismatch.
        detail: String,
    },
}

impl StateError {
    /// The aggregated validation report, if this is a `Validation` error.
    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            StateError::Validation(report) => Some(report),
            _ => None,
        }
    }
}
