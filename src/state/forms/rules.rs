//! Declarative field rules and form schemas

use thiserror::Error;

/// Predicate a single field must satisfy
#[derive(Debug, Clone, Copy)]
pub enum Predicate {
    /// Non-empty after trimming whitespace
    Required,
    /// Coercible to a finite number strictly greater than zero
    PositiveNumber,
    /// Always passes; the raw text is carried through as-is
    Optional,
    /// Passes when the function returns true for the field text
    Custom(fn(&str) -> bool),
}

impl Predicate {
    /// Whether this predicate reads the value as a number
    pub fn is_numeric(&self) -> bool {
        matches!(self, Predicate::PositiveNumber)
    }
}

/// A single named validation predicate plus its failure message
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    pub predicate: Predicate,
    pub message: &'static str,
}

impl FieldRule {
    pub const fn required(field: &'static str, message: &'static str) -> Self {
        Self {
            field,
            predicate: Predicate::Required,
            message,
        }
    }

    pub const fn positive_number(field: &'static str, message: &'static str) -> Self {
        Self {
            field,
            predicate: Predicate::PositiveNumber,
            message,
        }
    }

    pub const fn optional(field: &'static str) -> Self {
        Self {
            field,
            predicate: Predicate::Optional,
            message: "",
        }
    }

    pub const fn custom(
        field: &'static str,
        predicate: fn(&str) -> bool,
        message: &'static str,
    ) -> Self {
        Self {
            field,
            predicate: Predicate::Custom(predicate),
            message,
        }
    }
}

/// Errors raised when assembling a schema at runtime
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("a form schema needs at least one rule")]
    Empty,
    #[error("field `{0}` appears more than once in the schema")]
    DuplicateField(&'static str),
}

/// Ordered set of field rules, keyed by field name
#[derive(Debug, Clone, Copy)]
pub struct FormSchema {
    rules: &'static [FieldRule],
}

impl FormSchema {
    /// Wrap a statically declared rule table.
    ///
    /// Uniqueness of the keys is not checked here; every static table in the
    /// crate has a test that runs it through [`FormSchema::try_new`].
    pub const fn from_static(rules: &'static [FieldRule]) -> Self {
        Self { rules }
    }

    /// Build a schema, rejecting empty tables and duplicate field names
    pub fn try_new(rules: &'static [FieldRule]) -> Result<Self, SchemaError> {
        if rules.is_empty() {
            return Err(SchemaError::Empty);
        }
        for (idx, rule) in rules.iter().enumerate() {
            if rules[..idx].iter().any(|r| r.field == rule.field) {
                return Err(SchemaError::DuplicateField(rule.field));
            }
        }
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &'static [FieldRule] {
        self.rules
    }

    pub fn rule(&self, field: &str) -> Option<&'static FieldRule> {
        self.rules.iter().find(|r| r.field == field)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> {
        self.rules.iter().map(|r| r.field)
    }
}
