//! Validation engine: runs a [`FormSchema`] against a [`FormValues`] snapshot

use super::rules::{FormSchema, Predicate};
use std::collections::BTreeMap;

/// Raw input for a single field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldInput {
    Text(String),
    Number(f64),
}

impl FieldInput {
    fn as_text(&self) -> String {
        match self {
            FieldInput::Text(s) => s.clone(),
            FieldInput::Number(n) => n.to_string(),
        }
    }

    fn as_number(&self) -> f64 {
        match self {
            FieldInput::Number(n) => *n,
            FieldInput::Text(s) => coerce_number(s),
        }
    }
}

impl From<&str> for FieldInput {
    fn from(value: &str) -> Self {
        FieldInput::Text(value.to_string())
    }
}

impl From<String> for FieldInput {
    fn from(value: String) -> Self {
        FieldInput::Text(value)
    }
}

impl From<f64> for FieldInput {
    fn from(value: f64) -> Self {
        FieldInput::Number(value)
    }
}

/// Current user-entered data for a form instance
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValues {
    entries: BTreeMap<String, FieldInput>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, field: &str, value: impl Into<FieldInput>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: &str, value: impl Into<FieldInput>) {
        self.entries.insert(field.to_string(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&FieldInput> {
        self.entries.get(field)
    }

    pub fn remove(&mut self, field: &str) -> Option<FieldInput> {
        self.entries.remove(field)
    }
}

/// A coerced, typed value for a field that passed validation
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Text(String),
    Number(f64),
}

/// Values of a form that passed validation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidValues {
    values: BTreeMap<&'static str, TypedValue>,
}

impl ValidValues {
    /// Text value of a field; numeric fields are rendered back to text
    pub fn text(&self, field: &str) -> Option<String> {
        match self.values.get(field)? {
            TypedValue::Text(s) => Some(s.clone()),
            TypedValue::Number(n) => Some(n.to_string()),
        }
    }

    pub fn number(&self, field: &str) -> Option<f64> {
        match self.values.get(field)? {
            TypedValue::Number(n) => Some(*n),
            TypedValue::Text(_) => None,
        }
    }
}

/// Field name to error message, one entry per failing rule
pub type FieldErrors = BTreeMap<&'static str, &'static str>;

/// Outcome of running a schema against a set of values
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    Valid(ValidValues),
    Invalid(FieldErrors),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid(_))
    }

    /// Errors of a failed result, empty for a valid one
    pub fn errors(&self) -> FieldErrors {
        match self {
            ValidationResult::Valid(_) => FieldErrors::new(),
            ValidationResult::Invalid(errors) => errors.clone(),
        }
    }
}

/// Coerce text to a number. Surrounding whitespace is ignored and anything
/// that does not parse becomes NaN, so empty input never counts as zero.
pub fn coerce_number(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(f64::NAN)
}

/// Evaluate every rule of `schema` against `values`.
///
/// All failing fields are reported, not only the first one. Missing entries
/// read as an empty string for text rules and as NaN for numeric rules.
pub fn validate(schema: &FormSchema, values: &FormValues) -> ValidationResult {
    let mut valid = ValidValues::default();
    let mut errors = FieldErrors::new();

    for rule in schema.rules() {
        let input = values.get(rule.field);

        let checked = if rule.predicate.is_numeric() {
            let number = input.map(FieldInput::as_number).unwrap_or(f64::NAN);
            (number.is_finite() && number > 0.0).then_some(TypedValue::Number(number))
        } else {
            let text = input.map(FieldInput::as_text).unwrap_or_default();
            let passes = match rule.predicate {
                Predicate::Required => !text.trim().is_empty(),
                Predicate::Custom(check) => check(&text),
                Predicate::Optional | Predicate::PositiveNumber => true,
            };
            passes.then_some(TypedValue::Text(text))
        };

        match checked {
            Some(value) => {
                valid.values.insert(rule.field, value);
            }
            None => {
                errors.insert(rule.field, rule.message);
            }
        }
    }

    if errors.is_empty() {
        ValidationResult::Valid(valid)
    } else {
        ValidationResult::Invalid(errors)
    }
}
