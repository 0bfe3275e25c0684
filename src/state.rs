//! State objects and frozen snapshots.
//!
//! A state object is a plain aggregate of [`Param`](crate::param::Param)
//! slots and nested [`Group`](crate::param::Group) sub-states representing
//! one configuration facet. The [`State`] trait is the declared schema:
//! every state type lists its slots explicitly, and the generic serializer
//! and validator walk that list: adding a field to a state declaration is
//! all it takes for serialization and recursion to pick it up, with no
//! runtime reflection involved.
//!
//! Lifecycle: created empty (or pre-populated with per-instrument defaults)
//! by a builder, mutated only through the builder's setters, then frozen
//! into an immutable [`Frozen`] snapshot by `build()`.

use std::fmt::Debug;
use std::ops::Deref;

use crate::error::StateResult;
use crate::param::Field;
use crate::validate::ValidationReport;

// =============================================================================
// State trait
// =============================================================================

/// Declared schema of one configuration facet.
///
/// Object-safe so nested groups and the serializer can work with
/// `&dyn State`. Implemented by the `state_object!` macro; hand
/// implementations only need to keep `fields` and `fields_mut` listing the
/// same slots in the same order.
pub trait State: Debug {
    /// Canonical name of this state type (used in diagnostics).
    fn state_name(&self) -> &'static str;

    /// The declared slots, in declaration order.
    fn fields(&self) -> Vec<&dyn Field>;

    /// Mutable access to the declared slots, in declaration order.
    fn fields_mut(&mut self) -> Vec<&mut dyn Field>;

    /// Local consistency checks; append one message per problem found.
    ///
    /// Cross-field checks (paired lists, low/high ordering) live here,
    /// referencing multiple slots of the same state. Nested states are
    /// *not* checked here; the validation driver recurses on its own.
    fn check(&self, report: &mut ValidationReport) {
        let _ = report;
    }
}

// =============================================================================
// Frozen snapshots
// =============================================================================

/// An immutable, validated snapshot of a state object.
///
/// Produced by a builder's `build()` (or by
/// [`decode_frozen`](crate::serializer::decode_frozen)). The snapshot owns a
/// copy of the builder's working state, so later builder mutations can never
/// reach it; because it is never mutated after construction, concurrent
/// readers need no synchronization.
///
/// `Deref` gives read access to the underlying fields; there is no mutable
/// access.
#[derive(Clone, Debug, PartialEq)]
pub struct Frozen<S>(S);

impl<S: State + Clone> Frozen<S> {
    /// Validate a state and take ownership of it as a snapshot.
    ///
    /// Fails with [`StateError::Validation`](crate::error::StateError) when
    /// the state has any semantic problem; the report covers every problem
    /// found, including those of nested states.
    pub fn freeze(state: S) -> StateResult<Self> {
        crate::validate::validate(&state)?;
        Ok(Self(state))
    }

    /// Re-run validation on the snapshot.
    ///
    /// Idempotent and side-effect-free; a snapshot that froze successfully
    /// always validates cleanly again.
    pub fn validate(&self) -> StateResult<()> {
        crate::validate::validate(&self.0)
    }

    /// Unwrap the snapshot, e.g. to attach it to a composite builder.
    pub fn into_inner(self) -> S {
        self.0
    }
}

impl<S> Deref for Frozen<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.0
    }
}

// =============================================================================
// Tests
// =============================================================================
