//! Card controls panel state and its reducer

use super::notifications::Toast;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Duration;

/// Default monthly spending limit
pub const DEFAULT_SPENDING_LIMIT: u32 = 500;

/// Lifetime of the lost/stolen notification
const LOST_STOLEN_TOAST_DURATION: Duration = Duration::from_secs(10);

/// Largest limit accepted from digit-wise editing
const MAX_SPENDING_LIMIT: u32 = 1_000_000;

/// Kinds of card usage that can be allowed or blocked
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransactionType {
    Online,
    InStore,
    Atm,
    Contactless,
}

impl TransactionType {
    pub const ALL: [TransactionType; 4] = [
        TransactionType::Online,
        TransactionType::InStore,
        TransactionType::Atm,
        TransactionType::Contactless,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Online => "Online Purchases",
            Self::InStore => "In-Store Purchases",
            Self::Atm => "ATM Withdrawals",
            Self::Contactless => "Contactless",
        }
    }
}

/// Settings sent to the bank on save
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSettings {
    pub account_id: Option<String>,
    pub frozen: bool,
    pub spending_limit_enabled: bool,
    pub spending_limit: u32,
    pub transaction_types: BTreeSet<TransactionType>,
}

/// User actions on the card controls panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardEvent {
    SetFrozen(bool),
    SetSpendingLimitEnabled(bool),
    /// Append a digit to the limit amount
    PushLimitDigit(u32),
    /// Drop the last digit of the limit amount
    PopLimitDigit,
    ToggleTransactionType(TransactionType),
    ReportLostStolen,
    Save,
}

/// Rows of the panel, in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardControlsFocus {
    #[default]
    Freeze,
    SpendingLimit,
    LimitAmount,
    TransactionTypes,
}

impl CardControlsFocus {
    pub fn next(&self, limit_enabled: bool) -> Self {
        match self {
            Self::Freeze => Self::SpendingLimit,
            Self::SpendingLimit if limit_enabled => Self::LimitAmount,
            Self::SpendingLimit | Self::LimitAmount => Self::TransactionTypes,
            Self::TransactionTypes => Self::Freeze,
        }
    }

    pub fn prev(&self, limit_enabled: bool) -> Self {
        match self {
            Self::Freeze => Self::TransactionTypes,
            Self::SpendingLimit => Self::Freeze,
            Self::LimitAmount => Self::SpendingLimit,
            Self::TransactionTypes if limit_enabled => Self::LimitAmount,
            Self::TransactionTypes => Self::SpendingLimit,
        }
    }
}

/// Local state of the card controls panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardControls {
    pub account_id: Option<String>,
    pub frozen: bool,
    pub spending_limit_enabled: bool,
    pub spending_limit: u32,
    pub transaction_types: BTreeSet<TransactionType>,
    pub focus: CardControlsFocus,
    /// Highlighted entry of the transaction type toggle group
    pub selected_type: usize,
}

impl CardControls {
    pub fn new(account_id: Option<String>, spending_limit: u32) -> Self {
        Self {
            account_id,
            frozen: false,
            spending_limit_enabled: false,
            spending_limit,
            transaction_types: BTreeSet::from([TransactionType::Online, TransactionType::Atm]),
            focus: CardControlsFocus::default(),
            selected_type: 0,
        }
    }

    /// Apply an event, returning the new state and the notification to show
    pub fn apply(mut self, event: CardEvent) -> (Self, Option<Toast>) {
        let toast = match event {
            CardEvent::SetFrozen(frozen) => {
                self.frozen = frozen;
                let label = if frozen { "Frozen" } else { "Unfrozen" };
                Some(Toast::info(format!("Card is now {label}.")))
            }
            CardEvent::SetSpendingLimitEnabled(enabled) => {
                self.spending_limit_enabled = enabled;
                if !enabled && self.focus == CardControlsFocus::LimitAmount {
                    self.focus = CardControlsFocus::SpendingLimit;
                }
                None
            }
            CardEvent::PushLimitDigit(digit) => {
                let next = self
                    .spending_limit
                    .saturating_mul(10)
                    .saturating_add(digit.min(9));
                if next <= MAX_SPENDING_LIMIT {
                    self.spending_limit = next;
                }
                None
            }
            CardEvent::PopLimitDigit => {
                self.spending_limit /= 10;
                None
            }
            CardEvent::ToggleTransactionType(kind) => {
                if !self.transaction_types.remove(&kind) {
                    self.transaction_types.insert(kind);
                }
                None
            }
            CardEvent::ReportLostStolen => {
                self.frozen = true;
                Some(
                    Toast::error("Card Reported Lost/Stolen!")
                        .with_description(
                            "Your card has been frozen. Please contact support for a replacement.",
                        )
                        .with_duration(LOST_STOLEN_TOAST_DURATION),
                )
            }
            CardEvent::Save => Some(Toast::success("Card settings updated successfully!")),
        };
        (self, toast)
    }

    pub fn settings(&self) -> CardSettings {
        CardSettings {
            account_id: self.account_id.clone(),
            frozen: self.frozen,
            spending_limit_enabled: self.spending_limit_enabled,
            spending_limit: self.spending_limit,
            transaction_types: self.transaction_types.clone(),
        }
    }

    pub fn next_focus(&mut self) {
        self.focus = self.focus.next(self.spending_limit_enabled);
    }

    pub fn prev_focus(&mut self) {
        self.focus = self.focus.prev(self.spending_limit_enabled);
    }

    pub fn selected_transaction_type(&self) -> TransactionType {
        TransactionType::ALL[self.selected_type % TransactionType::ALL.len()]
    }

    pub fn select_next_type(&mut self) {
        self.selected_type = (self.selected_type + 1) % TransactionType::ALL.len();
    }

    pub fn select_prev_type(&mut self) {
        self.selected_type = self
            .selected_type
            .checked_sub(1)
            .unwrap_or(TransactionType::ALL.len() - 1);
    }

    /// Last four characters of the account id, for the panel subtitle
    pub fn account_suffix(&self) -> Option<&str> {
        let id = self.account_id.as_deref()?;
        let start = id
            .char_indices()
            .rev()
            .nth(3)
            .map(|(i, _)| i)
            .unwrap_or(0);
        Some(&id[start..])
    }
}

impl Default for CardControls {
    fn default() -> Self {
        Self::new(None, DEFAULT_SPENDING_LIMIT)
    }
}
