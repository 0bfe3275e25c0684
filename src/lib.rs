//! Typed state/configuration framework for scientific reduction pipelines.
//!
//! Large reduction pipelines are configured by dozens of interdependent,
//! instrument-specific parameters before any computation runs. This crate
//! provides the framework those configurations are built from:
//!
//! - [`param`]: typed parameter descriptors with per-assignment constraint
//!   checking and storage-key indirection,
//! - [`state`]: state objects (aggregates of descriptors and nested
//!   sub-states) and immutable [`Frozen`](state::Frozen) snapshots,
//! - [`serializer`]: generic recursive encode/decode between a state graph
//!   and a textual wire format, defined once over the declared schema,
//! - [`macros`]: the `state_object!` declaration macro that derives the
//!   schema and the fluent builder setters from one field list,
//! - [`factory`]: facility/instrument dispatch returning the builder
//!   registered for a context, with no silent defaults,
//! - [`validate`]: aggregate validation that reports *every* configuration
//!   problem in one structured report.
//!
//! # Control flow
//!
//! ```text
//! get_<facet>_builder(context) -> Builder  (per-instrument defaults applied)
//!     .set_<field>(value)?  ...            (constraints checked immediately)
//!     .build() -> Frozen<FacetState>       (validated, copied, immutable)
//! Frozen snapshots -> ReductionBuilder -> Frozen<ReductionState>
//!     -> encode() for storage / diagnostics / remote execution
//! ```
//!
//! The framework is synchronous and single-threaded by design: construction,
//! mutation, validation and serialization are pure in-memory operations. The
//! only object intended for concurrent read access is the frozen snapshot,
//! which is an owned copy and never mutated after `build()`.
//!
//! # Example
//!
//! ```rust
//! use reduction_state::context::{Instrument, ReductionContext};
//! use reduction_state::factory::{get_slice_event_builder, get_reduction_builder};
//! use reduction_state::serializer::{decode_frozen, encode};
//! use reduction_state::facets::reduction::ReductionState;
//!
//! # fn main() -> reduction_state::error::StateResult<()> {
//! let context = ReductionContext::for_instrument(Instrument::Sans2d);
//!
//! let slice = get_slice_event_builder(&context)?
//!     .set_start_time(vec![0.1, 1.3])?
//!     .set_end_time(vec![0.2, 1.6])?
//!     .build()?;
//!
//! let reduction = get_reduction_builder(&context)?
//!     .set_slice(slice)
//!     .build()?;
//!
//! let wire = encode(&*reduction);
//! let restored = decode_frozen::<ReductionState>(&wire)?;
//! assert_eq!(restored, reduction);
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod error;
pub mod facets;
pub mod factory;
pub mod macros;
pub mod param;
pub mod serializer;
pub mod state;
pub mod validate;

pub use context::{Facility, Instrument, ReductionContext};
pub use error::{StateError, StateResult};
pub use param::{Constraint, Field, Group, Param};
pub use serializer::{decode, decode_frozen, decode_into, encode, WireValue};
pub use state::{Frozen, State};
pub use validate::{validate, ValidationMessage, ValidationReport};
