//! Generic recursive serialization of state object graphs.
//!
//! `encode`/`decode` are defined once, over the declared slots of whatever
//! [`State`] they are given, so concrete state types need zero additional
//! serialization code. The wire format is `serde_json::Value` (with insertion
//! order preserved, so encoded objects list fields in declaration order and
//! diff cleanly in a settings-inspection panel):
//!
//! - scalars encode as-is,
//! - lists as ordered arrays,
//! - enum tags as their canonical string names (stable across reorderings of
//!   the enum definition),
//! - nested state objects recursively,
//! - unset parameters as `null` (distinct from an explicit empty list).
//!
//! Decoding is strict: a wire key absent from the target type's declared
//! slots is a [`SchemaMismatch`](crate::error::StateError::SchemaMismatch):
//! schema drift fails fast instead of being silently ignored.
//!
//! Round-trip law: `decode(encode(s)) == s` (field-by-field equality) for
//! any valid, fully built state `s`.

use crate::error::{StateError, StateResult};
use crate::state::{Frozen, State};

/// Format-neutral structured value produced and consumed by the serializer.
pub type WireValue = serde_json::Value;

/// Encode a state object graph to a wire value.
pub fn encode(state: &dyn State) -> WireValue {
    let fields = state.fields();
    let mut object = serde_json::Map::with_capacity(fields.len());
    for field in fields {
        object.insert(field.key().to_string(), field.encode());
    }
    WireValue::Object(object)
}

/// Decode a wire value into a fresh state of type `S`.
pub fn decode<S: State + Default>(wire: &WireValue) -> StateResult<S> {
    let mut state = S::default();
    decode_into(&mut state, wire)?;
    Ok(state)
}

/// Decode a wire value, validate, and freeze in one step.
pub fn decode_frozen<S: State + Default + Clone>(wire: &WireValue) -> StateResult<Frozen<S>> {
    Frozen::freeze(decode::<S>(wire)?)
}

/// Decode a wire value into an existing state object.
///
/// Every key present on the wire must be a declared slot of the target
/// state; fields absent from the wire keep their current values.
pub fn decode_into(state: &mut dyn State, wire: &WireValue) -> StateResult<()> {
    let name = state.state_name();
    let object = wire.as_object().ok_or_else(|| StateError::SchemaMismatch {
        context: name.to_string(),
        detail: format!("expected an object, got {}", wire_kind(wire)),
    })?;

    // Reject schema drift before touching any slot.
    let declared: Vec<&'static str> = state.fields().iter().map(|field| field.key()).collect();
    if let Some(unknown) = object
        .keys()
        .find(|key| !declared.iter().any(|d| *d == key.as_str()))
    {
        return Err(StateError::SchemaMismatch {
            context: name.to_string(),
            detail: format!("field '{unknown}' is not declared on this state"),
        });
    }

    for field in state.fields_mut() {
        if let Some(value) = object.get(field.key()) {
            field.decode(value)?;
        }
    }
    Ok(())
}

fn wire_kind(value: &WireValue) -> &'static str {
    match value {
        WireValue::Null => "null",
        WireValue::Bool(_) => "a boolean",
        WireValue::Number(_) => "a number",
        WireValue::String(_) => "a string",
        WireValue::Array(_) => "an array",
        WireValue::Object(_) => "an object",
    }
}

// =============================================================================
// Tests
// =============================================================================
