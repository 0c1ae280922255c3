//! Banking service abstraction and its in-memory placeholder

mod error;
mod placeholder;
mod traits;

pub use error::BankError;
pub use placeholder::PlaceholderBank;
pub use traits::BankService;

#[cfg(test)]
pub use traits::MockBankService;
