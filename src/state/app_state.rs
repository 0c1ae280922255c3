//! Application state definitions

use super::card_controls::CardControls;
use super::forms::FormState;
use super::notifications::Notifications;
use super::route::Route;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque token handed out on a successful login
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(Uuid);

impl SessionToken {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Collapsible extra details of an account card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickInfo {
    pub title: Option<String>,
    pub lines: Vec<String>,
}

/// Account information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub masked_number: String,
    /// Negative for loans
    pub balance: f64,
    pub currency_symbol: Option<String>,
    pub quick_info: Option<QuickInfo>,
}

impl Account {
    /// Balance with its currency symbol, falling back to `default_symbol`
    pub fn display_balance(&self, default_symbol: &str) -> String {
        let symbol = self.currency_symbol.as_deref().unwrap_or(default_symbol);
        format!("{symbol}{}", format_balance(self.balance))
    }
}

/// Account money can be moved from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferSource {
    pub id: String,
    pub name: String,
    pub balance: f64,
}

/// A validated transfer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub from_account: String,
    pub to_account: String,
    pub amount: f64,
    pub reference: Option<String>,
}

/// Acknowledgement of an initiated transfer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferReceipt {
    pub reference: Uuid,
    pub request: TransferRequest,
    pub submitted_at: DateTime<Utc>,
}

/// Two decimals with thousands separators, e.g. `-150,000.00`
pub fn format_balance(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{cents}")
}

/// Dashboard list state
#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub selected_index: usize,
    /// Account ids whose quick info is expanded
    pub expanded: Vec<String>,
}

impl DashboardState {
    pub fn toggle_expanded(&mut self, account_id: &str) {
        if let Some(pos) = self.expanded.iter().position(|id| id == account_id) {
            self.expanded.remove(pos);
        } else {
            self.expanded.push(account_id.to_string());
        }
    }

    pub fn is_expanded(&self, account_id: &str) -> bool {
        self.expanded.iter().any(|id| id == account_id)
    }
}

/// Main application state
#[derive(Default)]
pub struct AppState {
    // Navigation
    pub current_route: Route,
    pub route_history: Vec<Route>,

    // Session
    pub session: Option<SessionToken>,

    // Data
    pub accounts: Vec<Account>,
    pub transfer_sources: Vec<TransferSource>,

    // Pages
    pub form: FormState,
    pub dashboard: DashboardState,
    pub card_controls: CardControls,

    pub notifications: Notifications,
}

impl AppState {
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Move selection down
    pub fn move_selection_down(&mut self) {
        let max = self.accounts.len();
        if max > 0 && self.dashboard.selected_index < max - 1 {
            self.dashboard.selected_index += 1;
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.dashboard.selected_index > 0 {
            self.dashboard.selected_index -= 1;
        }
    }

    pub fn selected_account(&self) -> Option<&Account> {
        self.accounts.get(self.dashboard.selected_index)
    }

    /// Drop the session and everything loaded under it
    pub fn clear_session(&mut self) {
        self.session = None;
        self.accounts.clear();
        self.transfer_sources.clear();
        self.route_history.clear();
        self.dashboard = DashboardState::default();
        self.form = FormState::None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(id: &str) -> Account {
        Account {
            id: id.to_string(),
            name: "Test".to_string(),
            masked_number: "•••• 0000".to_string(),
            balance: 0.0,
            currency_symbol: None,
            quick_info: None,
        }
    }

    #[test]
    fn test_format_balance() {
        assert_eq!(format_balance(5250.75), "5,250.75");
        assert_eq!(format_balance(12870.22), "12,870.22");
        assert_eq!(format_balance(-150000.0), "-150,000.00");
        assert_eq!(format_balance(0.0), "0.00");
        assert_eq!(format_balance(999.999), "1,000.00");
        assert_eq!(format_balance(1234567.5), "1,234,567.50");
    }

    #[test]
    fn test_format_balance_negative_zero_has_no_sign() {
        assert_eq!(format_balance(-0.001), "0.00");
    }

    #[test]
    fn test_display_balance_prefers_account_symbol() {
        let mut acc = account("a");
        acc.balance = 10.0;
        assert_eq!(acc.display_balance("$"), "$10.00");
        acc.currency_symbol = Some("£".to_string());
        assert_eq!(acc.display_balance("$"), "£10.00");
    }

    #[test]
    fn test_selection_bounds() {
        let mut state = AppState {
            accounts: vec![account("a"), account("b")],
            ..Default::default()
        };
        state.move_selection_up();
        assert_eq!(state.dashboard.selected_index, 0);
        state.move_selection_down();
        state.move_selection_down();
        assert_eq!(state.dashboard.selected_index, 1);
        assert_eq!(state.selected_account().unwrap().id, "b");
    }

    #[test]
    fn test_toggle_expanded() {
        let mut dashboard = DashboardState::default();
        dashboard.toggle_expanded("acc123");
        assert!(dashboard.is_expanded("acc123"));
        dashboard.toggle_expanded("acc123");
        assert!(!dashboard.is_expanded("acc123"));
    }

    #[test]
    fn test_clear_session() {
        let mut state = AppState {
            session: Some(SessionToken::generate()),
            accounts: vec![account("a")],
            route_history: vec![Route::AccountsDashboard],
            ..Default::default()
        };
        state.clear_session();
        assert!(!state.is_authenticated());
        assert!(state.accounts.is_empty());
        assert!(state.route_history.is_empty());
    }
}
