//! Form domain layer
//!
//! Declarative field rules, the validation engine that runs them, and the
//! login and transfer forms built on top.

mod field;
mod form_state;
mod outcome;
mod rules;
mod validation;

pub use field::FormField;
pub use form_state::*;
pub use outcome::SubmissionOutcome;
