//! Concrete configuration facets.
//!
//! Each facet is one independently configurable aspect of a reduction run,
//! declared through `state_object!` and assembled into the composite
//! [`ReductionState`](reduction::ReductionState) tree consumed by the
//! reduction engine.

pub mod adjustment;
pub mod mask;
pub mod mover;
pub mod reduction;
pub mod slice;
pub mod wavelength;
