//! Parameter descriptors - typed, constrained configuration slots.
//!
//! Every configuration facet is an aggregate of [`Param<T>`] slots (and
//! nested [`Group<S>`] sub-states). A `Param<T>` couples three things:
//!
//! - a **storage key**: the externally visible wire name, which may differ
//!   from the Rust field name (some natural field names, like `move`, are
//!   reserved identifiers),
//! - an optional **value**: `None` means "not yet configured", which is
//!   distinct from an explicitly assigned empty value,
//! - a **constraint**: checked on *every* assignment, so an invalid value can
//!   never be stored.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut low = Param::new("wavelength_low").with_lower_bound(0.0);
//! low.set(1.5)?;                  // ok
//! assert!(low.set(-2.0).is_err()); // constraint violated, 1.5 retained
//! ```
//!
//! The [`Field`] trait gives the serializer and the validator uniform,
//! type-erased access to the declared slots of any state object, in the same
//! way the generic parameter collections work elsewhere in the codebase.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;
use std::sync::Arc;

use crate::error::{StateError, StateResult};
use crate::serializer::WireValue;
use crate::state::State;

// =============================================================================
// Constraints
// =============================================================================

/// Value constraint attached to a parameter descriptor.
#[derive(Clone, Default)]
pub enum Constraint<T> {
    /// No constraint - all values accepted.
    #[default]
    None,

    /// Numeric bounds (inclusive). Either side may be absent.
    ///
    /// Values must satisfy `min <= value <= max` for whichever bounds are
    /// present. The presence of each bound is introspectable via
    /// [`Param::has_lower_bound`] / [`Param::has_upper_bound`] so generic
    /// validators can distinguish "not configured" from "explicitly zero".
    Bounds {
        /// Minimum allowed value (inclusive), if any.
        min: Option<T>,
        /// Maximum allowed value (inclusive), if any.
        max: Option<T>,
    },

    /// Discrete choice constraint; the value must match one choice exactly.
    Choices(Vec<T>),

    /// Custom validation function (not serializable).
    Custom(Arc<dyn Fn(&T) -> Result<(), String> + Send + Sync>),
}

impl<T: PartialOrd + Debug> Constraint<T> {
    /// Validate a candidate value, returning a human-readable reason on
    /// rejection.
    pub fn validate(&self, value: &T) -> Result<(), String> {
        match self {
            Constraint::None => Ok(()),

            Constraint::Bounds { min, max } => {
                if let Some(min) = min {
                    if value < min {
                        return Err(format!("value must be >= {min:?}"));
                    }
                }
                if let Some(max) = max {
                    if value > max {
                        return Err(format!("value must be <= {max:?}"));
                    }
                }
                Ok(())
            }

            Constraint::Choices(choices) => {
                if choices.iter().any(|c| c == value) {
                    Ok(())
                } else {
                    Err(format!("value must be one of {choices:?}"))
                }
            }

            Constraint::Custom(validator) => validator(value),
        }
    }
}

impl<T: Debug> Debug for Constraint<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Constraint::None => write!(f, "None"),
            Constraint::Bounds { min, max } => f
                .debug_struct("Bounds")
                .field("min", min)
                .field("max", max)
                .finish(),
            Constraint::Choices(choices) => f.debug_tuple("Choices").field(choices).finish(),
            Constraint::Custom(_) => write!(f, "Custom(<function>)"),
        }
    }
}

// =============================================================================
// Value requirements
// =============================================================================

/// Requirements for any value a parameter descriptor can hold.
///
/// Blanket-implemented; scalars, strings, enum tags with serde derives,
/// homogeneous lists and string-keyed maps all qualify.
pub trait ParamValue:
    Clone + PartialEq + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
}

impl<T> ParamValue for T where
    T: Clone + PartialEq + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
}

/// Types with a notion of emptiness, for the `non_empty` constraint.
pub trait Emptiness {
    /// Whether the value is empty.
    fn is_empty_value(&self) -> bool;
}

impl Emptiness for String {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Emptiness for Vec<T> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

// =============================================================================
// Param<T>
// =============================================================================

/// A typed, constrained parameter slot on a state object.
///
/// Assignment through [`Param::set`] is the only mutation path; there are no
/// computed or derived descriptors (derived values belong to validators or
/// downstream consumers, never cached here).
#[derive(Clone, Debug)]
pub struct Param<T> {
    /// Externally visible storage key (wire name).
    key: &'static str,
    /// Current value; `None` means "not yet configured".
    value: Option<T>,
    /// Constraint checked on every assignment.
    constraint: Constraint<T>,
}

impl<T: PartialEq> PartialEq for Param<T> {
    // Equality is value equality: constraints are static per state type and
    // closures cannot be compared anyway.
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.value == other.value
    }
}

impl<T> Param<T> {
    /// Create an unset parameter with the given storage key.
    pub fn new(key: &'static str) -> Self {
        Self {
            key,
            value: None,
            constraint: Constraint::None,
        }
    }

    /// Pre-assign a default value (assumed to satisfy the constraint).
    pub fn with_default(mut self, value: T) -> Self {
        self.value = Some(value);
        self
    }

    /// Constrain to an inclusive range.
    pub fn with_range(mut self, min: T, max: T) -> Self {
        self.constraint = Constraint::Bounds {
            min: Some(min),
            max: Some(max),
        };
        self
    }

    /// Constrain to an inclusive lower bound, keeping any upper bound.
    pub fn with_lower_bound(mut self, min: T) -> Self {
        self.constraint = match self.constraint {
            Constraint::Bounds { max, .. } => Constraint::Bounds {
                min: Some(min),
                max,
            },
            _ => Constraint::Bounds {
                min: Some(min),
                max: None,
            },
        };
        self
    }

    /// Constrain to an inclusive upper bound, keeping any lower bound.
    pub fn with_upper_bound(mut self, max: T) -> Self {
        self.constraint = match self.constraint {
            Constraint::Bounds { min, .. } => Constraint::Bounds {
                min,
                max: Some(max),
            },
            _ => Constraint::Bounds {
                min: None,
                max: Some(max),
            },
        };
        self
    }

    /// Constrain to a closed set of choices.
    pub fn with_choices(mut self, choices: Vec<T>) -> Self {
        self.constraint = Constraint::Choices(choices);
        self
    }

    /// Attach a custom validation function.
    pub fn with_validator(
        mut self,
        validator: impl Fn(&T) -> Result<(), String> + Send + Sync + 'static,
    ) -> Self {
        self.constraint = Constraint::Custom(Arc::new(validator));
        self
    }

    /// Reject empty strings/lists (unset remains allowed).
    pub fn non_empty(self) -> Self
    where
        T: Emptiness,
    {
        self.with_validator(|value| {
            if value.is_empty_value() {
                Err("value must not be empty".to_string())
            } else {
                Ok(())
            }
        })
    }

    /// Storage key (wire name) of this parameter.
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Current value, or `None` when not yet configured.
    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Whether a value has been assigned.
    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    /// Return the slot to the "not yet configured" sentinel.
    pub fn clear(&mut self) {
        self.value = None;
    }

    /// Whether the constraint declares a lower bound.
    pub fn has_lower_bound(&self) -> bool {
        matches!(self.constraint, Constraint::Bounds { min: Some(_), .. })
    }

    /// Whether the constraint declares an upper bound.
    pub fn has_upper_bound(&self) -> bool {
        matches!(self.constraint, Constraint::Bounds { max: Some(_), .. })
    }
}

impl<T: PartialOrd + Debug> Param<T> {
    /// Assign a value, checking the constraint first.
    ///
    /// On rejection the previously stored value is left untouched.
    pub fn set(&mut self, value: T) -> StateResult<()> {
        if let Err(detail) = self.constraint.validate(&value) {
            return Err(StateError::Constraint {
                field: self.key,
                value: format!("{value:?}"),
                detail,
            });
        }
        self.value = Some(value);
        Ok(())
    }
}

// =============================================================================
// Field - type-erased slot access
// =============================================================================

/// Uniform access to one declared slot of a state object.
///
/// The serializer and validator walk `State::fields()` as `&dyn Field`, so
/// concrete state types need zero per-type serialization code.
pub trait Field {
    /// Storage key of this slot.
    fn key(&self) -> &'static str;

    /// Encode the current value (unset encodes as `null`).
    fn encode(&self) -> WireValue;

    /// Decode and assign from a wire value.
    ///
    /// `null` resets the slot to unset. Type mismatches are
    /// [`StateError::SchemaMismatch`]; decoded values still pass the
    /// declared constraint.
    fn decode(&mut self, value: &WireValue) -> StateResult<()>;

    /// The nested state object, if this slot is a group.
    fn as_state(&self) -> Option<&dyn State> {
        None
    }
}

impl<T: ParamValue + PartialOrd> Field for Param<T> {
    fn key(&self) -> &'static str {
        self.key
    }

    fn encode(&self) -> WireValue {
        match &self.value {
            Some(value) => serde_json::to_value(value).unwrap_or(WireValue::Null),
            None => WireValue::Null,
        }
    }

    fn decode(&mut self, value: &WireValue) -> StateResult<()> {
        if value.is_null() {
            self.value = None;
            return Ok(());
        }
        let typed: T = serde_json::from_value(value.clone()).map_err(|e| {
            StateError::SchemaMismatch {
                context: self.key.to_string(),
                detail: format!("{e} (expected {})", std::any::type_name::<T>()),
            }
        })?;
        self.set(typed)
    }
}

// =============================================================================
// Group<S> - nested state slot
// =============================================================================

/// A nested state object slot.
///
/// Groups are always present (a nested facet has its own "unset" params);
/// encode/decode recurse through the generic serializer and validation
/// recurses through [`Field::as_state`].
#[derive(Clone, Debug, PartialEq)]
pub struct Group<S> {
    key: &'static str,
    inner: S,
}

impl<S: Default> Group<S> {
    /// Create a group holding the default (all-unset) nested state.
    pub fn new(key: &'static str) -> Self {
        Self {
            key,
            inner: S::default(),
        }
    }
}

impl<S> Group<S> {
    /// Storage key of this group.
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// The nested state.
    pub fn get(&self) -> &S {
        &self.inner
    }

    /// Mutable access to the nested state.
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    /// Replace the nested state wholesale.
    pub fn replace(&mut self, inner: S) {
        self.inner = inner;
    }
}

impl<S: State> Field for Group<S> {
    fn key(&self) -> &'static str {
        self.key
    }

    fn encode(&self) -> WireValue {
        crate::serializer::encode(&self.inner)
    }

    fn decode(&mut self, value: &WireValue) -> StateResult<()> {
        crate::serializer::decode_into(&mut self.inner, value)
    }

    fn as_state(&self) -> Option<&dyn State> {
        Some(&self.inner)
    }
}

// =============================================================================
// Tests
// =============================================================================
