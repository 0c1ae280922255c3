//! In-memory placeholder bank
//!
//! Answers every call from static data. Nothing is stored: transfers always
//! succeed and card settings are only logged.

use super::{BankError, BankService};
use crate::state::{
    Account, CardSettings, QuickInfo, SessionToken, TransferReceipt, TransferRequest,
    TransferSource,
};
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

/// The one identifier/secret pair the placeholder accepts
const DEMO_USER_ID: &str = "user123";
const DEMO_PASSWORD: &str = "password123";

/// Exact, case-sensitive comparison with no trimming
pub fn credentials_match(user_id: &str, password: &str) -> bool {
    user_id == DEMO_USER_ID && password == DEMO_PASSWORD
}

/// Bank backed by static demo data
#[derive(Debug, Clone, Default)]
pub struct PlaceholderBank;

impl PlaceholderBank {
    pub fn new() -> Self {
        Self
    }

    fn accounts() -> Vec<Account> {
        vec![
            Account {
                id: "acc123".to_string(),
                name: "Everyday Checking".to_string(),
                masked_number: "•••• 6789".to_string(),
                balance: 5250.75,
                currency_symbol: None,
                quick_info: Some(QuickInfo {
                    title: Some("Recent Transactions".to_string()),
                    lines: vec![
                        "Withdrawal: $50.00 - ATM".to_string(),
                        "Deposit: $200.00 - Mobile Check".to_string(),
                        "Payment: $75.20 - Gas Station".to_string(),
                    ],
                }),
            },
            Account {
                id: "acc456".to_string(),
                name: "High-Yield Savings".to_string(),
                masked_number: "•••• 1234".to_string(),
                balance: 12870.22,
                currency_symbol: Some("$".to_string()),
                quick_info: Some(QuickInfo {
                    title: Some("Interest Earned".to_string()),
                    lines: vec!["Last interest payment: $12.50".to_string()],
                }),
            },
            Account {
                id: "acc789".to_string(),
                name: "Home Loan Account".to_string(),
                masked_number: "Loan •••• 5555".to_string(),
                balance: -150000.00,
                currency_symbol: None,
                quick_info: None,
            },
        ]
    }

    fn transfer_sources() -> Vec<TransferSource> {
        vec![
            TransferSource {
                id: "acc123".to_string(),
                name: "Everyday Checking (•••• 6789)".to_string(),
                balance: 5250.75,
            },
            TransferSource {
                id: "acc456".to_string(),
                name: "High-Yield Savings (•••• 1234)".to_string(),
                balance: 12870.22,
            },
        ]
    }
}

#[async_trait]
impl BankService for PlaceholderBank {
    async fn authenticate(
        &self,
        user_id: &str,
        password: &str,
    ) -> Result<Option<SessionToken>, BankError> {
        Ok(credentials_match(user_id, password).then(SessionToken::generate))
    }

    async fn list_accounts(&self) -> Result<Vec<Account>, BankError> {
        Ok(Self::accounts())
    }

    async fn list_transfer_sources(&self) -> Result<Vec<TransferSource>, BankError> {
        Ok(Self::transfer_sources())
    }

    async fn submit_transfer(&self, request: &TransferRequest) -> Result<TransferReceipt, BankError> {
        // No balance check and no idempotency key: every request is accepted.
        let receipt = TransferReceipt {
            reference: Uuid::new_v4(),
            request: request.clone(),
            submitted_at: Utc::now(),
        };
        tracing::info!(
            reference = %receipt.reference,
            from = %request.from_account,
            to = %request.to_account,
            amount = request.amount,
            "Transfer accepted"
        );
        Ok(receipt)
    }

    async fn save_card_controls(&self, settings: &CardSettings) -> Result<(), BankError> {
        tracing::info!(?settings, "Saving card control changes");
        Ok(())
    }

    async fn report_lost_stolen(&self, account_id: Option<String>) -> Result<(), BankError> {
        tracing::warn!(?account_id, "Card reported lost/stolen");
        Ok(())
    }
}
