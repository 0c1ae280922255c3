//! Trait abstraction for the banking backend to enable mocking in tests

use super::BankError;
use crate::state::{Account, CardSettings, SessionToken, TransferReceipt, TransferRequest, TransferSource};
use async_trait::async_trait;

/// Operations the pages need from a bank. The placeholder answers from
/// static data; a real backend slots in behind the same calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BankService: Send + Sync {
    /// Check credentials. `None` means rejected, without saying which part was wrong.
    async fn authenticate(
        &self,
        user_id: &str,
        password: &str,
    ) -> Result<Option<SessionToken>, BankError>;

    /// Accounts shown on the dashboard
    async fn list_accounts(&self) -> Result<Vec<Account>, BankError>;

    /// Accounts money can be moved from
    async fn list_transfer_sources(&self) -> Result<Vec<TransferSource>, BankError>;

    /// Initiate a transfer
    async fn submit_transfer(&self, request: &TransferRequest) -> Result<TransferReceipt, BankError>;

    /// Persist card control settings
    async fn save_card_controls(&self, settings: &CardSettings) -> Result<(), BankError>;

    /// Report the card of an account as lost or stolen
    async fn report_lost_stolen(&self, account_id: Option<String>) -> Result<(), BankError>;
}
