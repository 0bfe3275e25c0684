//! Aggregate validation.
//!
//! A `validate()` call runs in three phases:
//!
//! 1. **collect**: every local check of the state appends zero or more
//!    [`ValidationMessage`]s to an accumulator keyed by category,
//! 2. **recurse**: every nested state is validated the same way and its
//!    messages are merged under a `"<group-key>."` prefix instead of being
//!    propagated immediately,
//! 3. **decide**: a non-empty accumulator is raised as *one*
//!    [`StateError::Validation`](crate::error::StateError) carrying the full
//!    report; an empty one returns normally.
//!
//! The caller therefore sees every configuration problem in one report
//! instead of fixing and re-running once per error, which matters when a single
//! reduction run is expensive.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{StateError, StateResult};
use crate::serializer::WireValue;
use crate::state::State;

// =============================================================================
// Validation messages
// =============================================================================

/// One structured record describing a failed check.
#[derive(Clone, Debug, PartialEq)]
pub struct ValidationMessage {
    /// Short headline, e.g. "inverted wavelength range".
    pub title: String,
    /// Full description of what is wrong.
    pub detail: String,
    /// The offending field values, by storage key.
    pub values: Vec<(String, WireValue)>,
}

impl ValidationMessage {
    /// Create a message with a headline and description.
    pub fn new(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            detail: detail.into(),
            values: Vec::new(),
        }
    }

    /// Attach an offending field value to the message.
    pub fn with_value(mut self, field: impl Into<String>, value: impl Serialize) -> Self {
        self.values.push((
            field.into(),
            serde_json::to_value(value).unwrap_or(WireValue::Null),
        ));
        self
    }

    /// Wire rendering of this message.
    pub fn to_wire(&self) -> WireValue {
        let mut object = serde_json::Map::new();
        object.insert("title".to_string(), WireValue::String(self.title.clone()));
        object.insert("detail".to_string(), WireValue::String(self.detail.clone()));
        if !self.values.is_empty() {
            let mut values = serde_json::Map::new();
            for (field, value) in &self.values {
                values.insert(field.clone(), value.clone());
            }
            object.insert("values".to_string(), WireValue::Object(values));
        }
        WireValue::Object(object)
    }
}

// =============================================================================
// Validation report
// =============================================================================

/// Accumulator of validation messages, keyed by category.
///
/// Nested state categories are prefixed with the group key on merge, so a
/// report over a composite reduction tree reads like a path-addressed
/// diagnostic listing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidationReport {
    messages: BTreeMap<String, Vec<ValidationMessage>>,
}

impl ValidationReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message under a category.
    pub fn add(&mut self, category: impl Into<String>, message: ValidationMessage) {
        self.messages.entry(category.into()).or_default().push(message);
    }

    /// Merge a nested state's report, prefixing its categories with `key`.
    pub fn merge_nested(&mut self, key: &str, nested: ValidationReport) {
        for (category, messages) in nested.messages {
            self.messages
                .entry(format!("{key}.{category}"))
                .or_default()
                .extend(messages);
        }
    }

    /// Whether any message was recorded.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Total number of messages across all categories.
    pub fn message_count(&self) -> usize {
        self.messages.values().map(Vec::len).sum()
    }

    /// The recorded categories, in sorted order.
    pub fn categories(&self) -> Vec<&str> {
        self.messages.keys().map(String::as_str).collect()
    }

    /// The messages recorded under one category.
    pub fn messages(&self, category: &str) -> &[ValidationMessage] {
        self.messages
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Iterate over `(category, messages)` pairs in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ValidationMessage])> {
        self.messages
            .iter()
            .map(|(category, messages)| (category.as_str(), messages.as_slice()))
    }

    /// Wire rendering of the whole report (the aggregate failure payload).
    pub fn to_wire(&self) -> WireValue {
        let mut object = serde_json::Map::new();
        for (category, messages) in &self.messages {
            object.insert(
                category.clone(),
                WireValue::Array(messages.iter().map(ValidationMessage::to_wire).collect()),
            );
        }
        WireValue::Object(object)
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered =
            serde_json::to_string_pretty(&self.to_wire()).unwrap_or_else(|_| "{}".to_string());
        write!(f, "{rendered}")
    }
}

// =============================================================================
// Validation driver
// =============================================================================

/// Validate a state object graph, aggregating every problem found.
///
/// Pure and idempotent: two calls on the same state produce identical
/// reports (or both succeed).
pub fn validate(state: &dyn State) -> StateResult<()> {
    let report = collect(state);
    if report.is_empty() {
        Ok(())
    } else {
        tracing::debug!(
            state = state.state_name(),
            problems = report.message_count(),
            "validation failed"
        );
        Err(StateError::Validation(report))
    }
}

/// Collect local messages, then recurse into every nested group.
pub(crate) fn collect(state: &dyn State) -> ValidationReport {
    let mut report = ValidationReport::new();
    state.check(&mut report);
    for field in state.fields() {
        if let Some(nested) = field.as_state() {
            report.merge_nested(field.key(), collect(nested));
        }
    }
    report
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_wire_shape() {
        let message = ValidationMessage::new("inverted range", "low exceeds high")
            .with_value("low", 10.0)
            .with_value("high", 5.0);

        let wire = message.to_wire();
        assert_eq!(wire["title"], "inverted range");
        assert_eq!(wire["values"]["low"], 10.0);
        assert_eq!(wire["values"]["high"], 5.0);
    }

    #[test]
    fn test_report_merge_nested_prefixes_categories() {
        let mut nested = ValidationReport::new();
        nested.add("range", ValidationMessage::new("a", "b"));

        let mut report = ValidationReport::new();
        report.add("instrument", ValidationMessage::new("c", "d"));
        report.merge_nested("wavelength", nested);

        assert_eq!(report.categories(), vec!["instrument", "wavelength.range"]);
        assert_eq!(report.message_count(), 2);
    }

    #[test]
    fn test_report_merge_extends_existing_category() {
        let mut first = ValidationReport::new();
        first.add("range", ValidationMessage::new("a", "b"));
        let mut second = ValidationReport::new();
        second.add("range", ValidationMessage::new("c", "d"));

        let mut report = ValidationReport::new();
        report.merge_nested("mask", first);
        report.merge_nested("mask", second);
        assert_eq!(report.messages("mask.range").len(), 2);
    }

    #[test]
    fn test_report_display_is_wire_json() {
        let mut report = ValidationReport::new();
        report.add(
            "slice_boundaries",
            ValidationMessage::new("mismatched", "lengths differ"),
        );

        let rendered = report.to_string();
        assert!(rendered.contains("slice_boundaries"));
        assert!(rendered.contains("mismatched"));
    }
}
