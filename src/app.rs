//! Application state and core logic

use crate::bank::{BankService, PlaceholderBank};
use crate::config::TuiConfig;
use crate::state::{
    AppState, CardControls, CardControlsFocus, CardEvent, FormState, LoginForm,
    LoginOutcome, Notifications, Route, Toast, TransferForm,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Banking backend
    pub bank: Box<dyn BankService>,
    /// Loaded user configuration
    pub config: TuiConfig,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance backed by the placeholder bank
    pub async fn new(config: TuiConfig) -> Result<Self> {
        let mut app = Self::with_bank(Box::new(PlaceholderBank::new()), config);
        app.mount().await;
        Ok(app)
    }

    /// Create an App around any bank implementation; starts on the login screen
    pub fn with_bank(bank: Box<dyn BankService>, config: TuiConfig) -> Self {
        let state = AppState {
            notifications: Notifications::new(config.toast_duration()),
            card_controls: CardControls::new(None, config.spending_limit()),
            ..Default::default()
        };

        Self {
            state,
            bank,
            config,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Periodic housekeeping between frames
    pub fn tick(&mut self) {
        self.state.notifications.prune();
    }

    /// Push a notification
    pub fn notify(&mut self, toast: Toast) {
        self.state.notifications.push(toast);
    }

    /// Navigate to a path such as `/move-money?accountId=acc123`
    pub async fn navigate_path(&mut self, path: &str) {
        self.navigate(Route::parse(path)).await;
    }

    /// Navigate to a new route, mounting its page
    pub async fn navigate(&mut self, route: Route) {
        let route = if route.requires_session() && !self.state.is_authenticated() {
            tracing::info!("No session for {route}, redirecting to login");
            Route::Login
        } else {
            route
        };

        tracing::info!("Navigate to {route}");
        let previous = std::mem::replace(&mut self.state.current_route, route);
        if previous != self.state.current_route {
            self.state.route_history.push(previous);
        }
        self.mount().await;
    }

    /// Go back to the previous route
    pub async fn go_back(&mut self) {
        // Abandoned forms are not restored; the home route covers login
        while let Some(route) = self.state.route_history.pop() {
            if route.is_form_view() || route == self.state.current_route {
                continue;
            }
            self.state.current_route = route;
            self.mount().await;
            return;
        }

        let home = self.home_route();
        if home != self.state.current_route {
            self.state.current_route = home;
            self.mount().await;
        }
    }

    fn home_route(&self) -> Route {
        if self.state.is_authenticated() {
            Route::AccountsDashboard
        } else {
            Route::Login
        }
    }

    /// Create the page state of the current route. Forms of the previous
    /// route are discarded here.
    async fn mount(&mut self) {
        self.state.form = FormState::None;

        match self.state.current_route.clone() {
            Route::Login => {
                let form = match &self.config.prefill_user_id {
                    Some(user_id) => LoginForm::with_user_id(user_id),
                    None => LoginForm::new(),
                };
                self.state.form = FormState::Login(form);
            }
            Route::AccountsDashboard => {
                self.load_accounts().await;
            }
            Route::MoveMoney { account_id } => {
                self.load_transfer_sources().await;
                self.state.form = FormState::Transfer(TransferForm::new(
                    &self.state.transfer_sources,
                    account_id.as_deref(),
                ));
            }
            Route::CardControls { account_id } => {
                tracing::debug!(?account_id, "Card controls loaded");
                self.state.card_controls =
                    CardControls::new(account_id, self.config.spending_limit());
            }
            Route::NotFound(path) => {
                tracing::warn!("No route matches {path}");
            }
        }
    }

    async fn load_accounts(&mut self) {
        match self.bank.list_accounts().await {
            Ok(accounts) => {
                self.state.accounts = accounts;
                let last = self.state.accounts.len().saturating_sub(1);
                self.state.dashboard.selected_index = self.state.dashboard.selected_index.min(last);
            }
            Err(err) => {
                tracing::error!("Failed to load accounts: {err}");
                self.notify(Toast::error("Unable to load accounts").with_description(err.to_string()));
            }
        }
    }

    async fn load_transfer_sources(&mut self) {
        match self.bank.list_transfer_sources().await {
            Ok(sources) => self.state.transfer_sources = sources,
            Err(err) => {
                tracing::error!("Failed to load transfer sources: {err}");
                self.notify(
                    Toast::error("Unable to load your accounts").with_description(err.to_string()),
                );
            }
        }
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        match self.state.current_route {
            Route::Login => self.handle_login_key(key).await?,
            Route::AccountsDashboard => self.handle_dashboard_key(key).await?,
            Route::MoveMoney { .. } => self.handle_move_money_key(key).await?,
            Route::CardControls { .. } => self.handle_card_controls_key(key).await?,
            Route::NotFound(_) => self.handle_not_found_key(key).await?,
        }
        Ok(())
    }

    fn is_submit_key(key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('s') => key.modifiers.contains(KeyModifiers::CONTROL),
            KeyCode::Enter => key.modifiers.contains(crate::platform::SUBMIT_MODIFIER),
            _ => false,
        }
    }

    /// Shared text editing for the mounted form
    fn handle_form_edit_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.state.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.state.form.prev_field(),
            KeyCode::Right => {
                if let Some(field) = self.state.form.get_active_field_mut() {
                    field.next_option();
                }
            }
            KeyCode::Left => {
                if let Some(field) = self.state.form.get_active_field_mut() {
                    field.prev_option();
                }
            }
            KeyCode::Char(c) => {
                if let Some(field) = self.state.form.get_active_field_mut() {
                    field.push_char(c);
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = self.state.form.get_active_field_mut() {
                    field.pop_char();
                }
            }
            _ => {}
        }
    }

    /// Handle keys in Login view
    async fn handle_login_key(&mut self, key: KeyEvent) -> Result<()> {
        if Self::is_submit_key(&key) {
            self.submit_login().await;
            return Ok(());
        }
        match key.code {
            KeyCode::Enter if self.state.form.is_last_field_active() => self.submit_login().await,
            KeyCode::Enter => self.state.form.next_field(),
            _ => self.handle_form_edit_key(key),
        }
        Ok(())
    }

    /// Validate the login form and run the credential check
    pub async fn submit_login(&mut self) {
        let FormState::Login(form) = &mut self.state.form else {
            return;
        };
        let Some(credentials) = form.begin_submit() else {
            tracing::debug!("Login form has field errors");
            return;
        };

        tracing::info!(user_id = %credentials.user_id, "Login attempt");
        let result = self
            .bank
            .authenticate(&credentials.user_id, &credentials.password)
            .await;

        let FormState::Login(form) = &mut self.state.form else {
            return;
        };
        match form.resolve(result) {
            LoginOutcome::NavigateToDashboard(token) => {
                tracing::info!("Login successful, navigating to dashboard");
                self.state.session = Some(token);
                self.navigate(Route::AccountsDashboard).await;
            }
            LoginOutcome::Rejected => {
                tracing::info!(user_id = %credentials.user_id, "Login rejected");
            }
        }
    }

    /// Drop the session and return to the login screen
    pub async fn logout(&mut self) {
        tracing::info!("User logging out");
        self.state.clear_session();
        self.state.notifications.clear();
        self.state.current_route = Route::Login;
        self.mount().await;
    }

    /// Handle keys in Accounts Dashboard view
    async fn handle_dashboard_key(&mut self, key: KeyEvent) -> Result<()> {
        let selected_id = self.state.selected_account().map(|a| a.id.clone());

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.move_selection_down(),
            KeyCode::Char('k') | KeyCode::Up => self.state.move_selection_up(),
            KeyCode::Enter | KeyCode::Char('m') => {
                if let Some(account_id) = selected_id {
                    self.navigate(Route::MoveMoney {
                        account_id: Some(account_id),
                    })
                    .await;
                }
            }
            KeyCode::Char('c') => {
                if let Some(account_id) = selected_id {
                    self.navigate(Route::CardControls {
                        account_id: Some(account_id),
                    })
                    .await;
                }
            }
            KeyCode::Char(' ') => {
                if let Some(account) = self.state.selected_account() {
                    if account.quick_info.is_some() {
                        let id = account.id.clone();
                        self.state.dashboard.toggle_expanded(&id);
                    }
                }
            }
            KeyCode::Char('1') => self.navigate(Route::AccountsDashboard).await,
            KeyCode::Char('2') => self.navigate_path("/move-money").await,
            KeyCode::Char('3') => self.navigate_path("/card-controls").await,
            KeyCode::Char('s') => self.navigate_path("/settings").await,
            KeyCode::Char('y') => {
                if let Some(account_id) = selected_id {
                    match self.copy_to_clipboard(&account_id) {
                        Ok(()) => self.notify(Toast::info(format!("Copied {account_id}"))),
                        Err(err) => {
                            tracing::warn!("Clipboard unavailable: {err}");
                            self.notify(Toast::error("Copy failed"));
                        }
                    }
                }
            }
            KeyCode::Char('L') => self.logout().await,
            KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
        Ok(())
    }

    /// Handle keys in Move Money view
    async fn handle_move_money_key(&mut self, key: KeyEvent) -> Result<()> {
        if Self::is_submit_key(&key) {
            self.submit_transfer().await;
            return Ok(());
        }
        match key.code {
            KeyCode::Esc => self.go_back().await,
            KeyCode::Enter if self.state.form.is_last_field_active() => {
                self.submit_transfer().await
            }
            KeyCode::Enter => self.state.form.next_field(),
            _ => self.handle_form_edit_key(key),
        }
        Ok(())
    }

    /// Validate the transfer form and submit it
    pub async fn submit_transfer(&mut self) {
        let FormState::Transfer(form) = &mut self.state.form else {
            return;
        };
        let Some(request) = form.begin_submit() else {
            tracing::debug!("Transfer form has field errors");
            return;
        };

        tracing::info!(
            from = %request.from_account,
            to = %request.to_account,
            amount = request.amount,
            "Move money submission"
        );
        let result = self.bank.submit_transfer(&request).await;

        let FormState::Transfer(form) = &mut self.state.form else {
            return;
        };
        let toast = form.complete(result);
        self.notify(toast);
    }

    /// Handle keys in Card Controls view
    async fn handle_card_controls_key(&mut self, key: KeyEvent) -> Result<()> {
        if Self::is_submit_key(&key) {
            self.dispatch_card_event(CardEvent::Save).await;
            return Ok(());
        }

        let controls = &self.state.card_controls;
        let event = match (key.code, controls.focus) {
            (KeyCode::Esc, _) => {
                self.go_back().await;
                return Ok(());
            }
            (KeyCode::Tab | KeyCode::Down | KeyCode::Char('j'), _) => {
                self.state.card_controls.next_focus();
                return Ok(());
            }
            (KeyCode::BackTab | KeyCode::Up | KeyCode::Char('k'), _) => {
                self.state.card_controls.prev_focus();
                return Ok(());
            }
            (KeyCode::Char('r'), _) => Some(CardEvent::ReportLostStolen),
            (KeyCode::Char('s'), _) => Some(CardEvent::Save),
            (KeyCode::Enter | KeyCode::Char(' '), CardControlsFocus::Freeze) => {
                Some(CardEvent::SetFrozen(!controls.frozen))
            }
            (KeyCode::Enter | KeyCode::Char(' '), CardControlsFocus::SpendingLimit) => Some(
                CardEvent::SetSpendingLimitEnabled(!controls.spending_limit_enabled),
            ),
            (KeyCode::Char(c), CardControlsFocus::LimitAmount) => {
                c.to_digit(10).map(CardEvent::PushLimitDigit)
            }
            (KeyCode::Backspace, CardControlsFocus::LimitAmount) => Some(CardEvent::PopLimitDigit),
            (KeyCode::Left | KeyCode::Char('h'), CardControlsFocus::TransactionTypes) => {
                self.state.card_controls.select_prev_type();
                return Ok(());
            }
            (KeyCode::Right | KeyCode::Char('l'), CardControlsFocus::TransactionTypes) => {
                self.state.card_controls.select_next_type();
                return Ok(());
            }
            (KeyCode::Enter | KeyCode::Char(' '), CardControlsFocus::TransactionTypes) => Some(
                CardEvent::ToggleTransactionType(controls.selected_transaction_type()),
            ),
            _ => None,
        };

        if let Some(event) = event {
            self.dispatch_card_event(event).await;
        }
        Ok(())
    }

    /// Run a card event through the reducer, talking to the bank where needed
    pub async fn dispatch_card_event(&mut self, event: CardEvent) {
        let service_result = match event {
            CardEvent::ReportLostStolen => {
                let account_id = self.state.card_controls.account_id.clone();
                Some(self.bank.report_lost_stolen(account_id).await)
            }
            CardEvent::Save => {
                let settings = self.state.card_controls.settings();
                Some(self.bank.save_card_controls(&settings).await)
            }
            _ => None,
        };

        if let Some(Err(err)) = &service_result {
            tracing::error!("Card control request failed: {err}");
            // Freezing still applies locally; a failed save changes nothing
            if event == CardEvent::Save {
                self.notify(Toast::error("Could not save card settings").with_description(err.to_string()));
                return;
            }
        }

        let controls = std::mem::take(&mut self.state.card_controls);
        let (controls, toast) = controls.apply(event);
        self.state.card_controls = controls;
        if let Some(toast) = toast {
            self.notify(toast);
        }
    }

    /// Handle keys in Not Found view
    async fn handle_not_found_key(&mut self, key: KeyEvent) -> Result<()> {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            let home = self.home_route();
            self.navigate(home).await;
        }
        Ok(())
    }

    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new()?;
        clipboard.set_text(text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::{BankError, MockBankService};
    use crate::state::{SessionToken, SubmissionOutcome, INVALID_CREDENTIALS, PASSWORD, USER_ID};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    async fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).await.unwrap();
        }
    }

    async fn placeholder_app() -> App {
        App::new(TuiConfig::default()).await.unwrap()
    }

    async fn logged_in_app() -> App {
        let mut app = placeholder_app().await;
        type_text(&mut app, "user123").await;
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        type_text(&mut app, "password123").await;
        app.handle_key(key(KeyCode::Enter)).await.unwrap();
        assert_eq!(app.state.current_route, Route::AccountsDashboard);
        app
    }

    fn login_form(app: &App) -> &LoginForm {
        match &app.state.form {
            FormState::Login(form) => form,
            other => panic!("expected login form, got {other:?}"),
        }
    }

    fn transfer_form(app: &App) -> &TransferForm {
        match &app.state.form {
            FormState::Transfer(form) => form,
            other => panic!("expected transfer form, got {other:?}"),
        }
    }

    mod navigation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_starts_on_login() {
            let app = placeholder_app().await;
            assert_eq!(app.state.current_route, Route::Login);
            assert!(matches!(app.state.form, FormState::Login(_)));
            assert!(!app.should_quit());
        }

        #[tokio::test]
        async fn test_protected_route_redirects_without_session() {
            let mut app = placeholder_app().await;
            app.navigate_path("/accounts-dashboard").await;
            assert_eq!(app.state.current_route, Route::Login);
        }

        #[tokio::test]
        async fn test_unknown_path_is_not_found() {
            let mut app = placeholder_app().await;
            app.navigate_path("/nowhere").await;
            assert_eq!(
                app.state.current_route,
                Route::NotFound("/nowhere".to_string())
            );
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            assert_eq!(app.state.current_route, Route::Login);
        }

        #[tokio::test]
        async fn test_settings_link_is_not_found() {
            let mut app = logged_in_app().await;
            app.handle_key(key(KeyCode::Char('s'))).await.unwrap();
            assert_eq!(
                app.state.current_route,
                Route::NotFound("/settings".to_string())
            );
            app.handle_key(key(KeyCode::Esc)).await.unwrap();
            assert_eq!(app.state.current_route, Route::AccountsDashboard);
        }

        #[tokio::test]
        async fn test_back_skips_login_once_authenticated() {
            let mut app = logged_in_app().await;
            app.handle_key(key(KeyCode::Char('c'))).await.unwrap();
            assert_eq!(
                app.state.current_route,
                Route::CardControls {
                    account_id: Some("acc123".to_string())
                }
            );
            app.handle_key(key(KeyCode::Esc)).await.unwrap();
            assert_eq!(app.state.current_route, Route::AccountsDashboard);
            app.go_back().await;
            assert_eq!(app.state.current_route, Route::AccountsDashboard);
        }

        #[tokio::test]
        async fn test_leaving_a_form_discards_its_values() {
            let mut app = logged_in_app().await;
            app.handle_key(key(KeyCode::Char('m'))).await.unwrap();
            app.handle_key(key(KeyCode::Tab)).await.unwrap();
            type_text(&mut app, "acc999").await;
            app.handle_key(key(KeyCode::Esc)).await.unwrap();
            assert!(matches!(app.state.form, FormState::None));

            app.handle_key(key(KeyCode::Char('m'))).await.unwrap();
            assert_eq!(transfer_form(&app).to_account.as_text(), "");
        }

        #[tokio::test]
        async fn test_same_route_navigation_does_not_grow_history() {
            let mut app = logged_in_app().await;
            let depth = app.state.route_history.len();
            for _ in 0..5 {
                app.handle_key(key(KeyCode::Char('1'))).await.unwrap();
            }
            assert_eq!(app.state.route_history.len(), depth);
            assert_eq!(app.state.current_route, Route::AccountsDashboard);
        }

        #[tokio::test]
        async fn test_q_on_dashboard_quits() {
            let mut app = logged_in_app().await;
            app.handle_key(key(KeyCode::Char('q'))).await.unwrap();
            assert!(app.should_quit());
        }

        #[tokio::test]
        async fn test_logout_clears_session() {
            let mut app = logged_in_app().await;
            app.handle_key(key(KeyCode::Char('L'))).await.unwrap();
            assert_eq!(app.state.current_route, Route::Login);
            assert!(!app.state.is_authenticated());
            assert!(app.state.route_history.is_empty());
        }
    }

    mod login {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_valid_credentials_navigate_to_dashboard() {
            let app = logged_in_app().await;
            assert!(app.state.is_authenticated());
            assert_eq!(app.state.accounts.len(), 3);
        }

        #[tokio::test]
        async fn test_wrong_password_sets_single_form_error() {
            let mut app = placeholder_app().await;
            type_text(&mut app, "user123").await;
            app.handle_key(key(KeyCode::Tab)).await.unwrap();
            type_text(&mut app, "wrong").await;
            app.handle_key(ctrl('s')).await.unwrap();

            assert_eq!(app.state.current_route, Route::Login);
            let form = login_form(&app);
            assert_eq!(form.form_error.as_deref(), Some(INVALID_CREDENTIALS));
            assert!(form.field_errors.is_empty());
            assert!(!app.state.is_authenticated());
        }

        #[tokio::test]
        async fn test_empty_submit_shows_field_errors_without_calling_bank() {
            let mut bank = MockBankService::new();
            bank.expect_authenticate().never();
            let mut app = App::with_bank(Box::new(bank), TuiConfig::default());
            app.mount().await;

            app.submit_login().await;
            let form = login_form(&app);
            assert!(form.field_error(USER_ID).is_some());
            assert!(form.field_error(PASSWORD).is_some());
            assert!(form.form_error.is_none());
        }

        #[tokio::test]
        async fn test_enter_on_first_field_moves_to_password() {
            let mut app = placeholder_app().await;
            type_text(&mut app, "user123").await;
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            assert_eq!(login_form(&app).active_field_index, 1);
            assert_eq!(app.state.current_route, Route::Login);
        }

        #[tokio::test]
        async fn test_prefill_user_id_from_config() {
            let config = TuiConfig {
                prefill_user_id: Some("user123".to_string()),
                ..Default::default()
            };
            let app = App::new(config).await.unwrap();
            assert_eq!(login_form(&app).user_id.as_text(), "user123");
        }

        #[tokio::test]
        async fn test_service_receives_exact_credentials() {
            let mut bank = MockBankService::new();
            bank.expect_authenticate()
                .withf(|user, pass| user.to_string() == "user123" && pass.to_string() == "password123")
                .times(1)
                .returning(|_, _| Ok(Some(SessionToken::generate())));
            bank.expect_list_accounts().returning(|| Ok(vec![]));
            let mut app = App::with_bank(Box::new(bank), TuiConfig::default());
            app.mount().await;

            type_text(&mut app, "user123").await;
            app.handle_key(key(KeyCode::Tab)).await.unwrap();
            type_text(&mut app, "password123").await;
            app.submit_login().await;
            assert_eq!(app.state.current_route, Route::AccountsDashboard);
        }
    }

    mod move_money {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_dashboard_preselects_source_account() {
            let mut app = logged_in_app().await;
            app.handle_key(key(KeyCode::Char('j'))).await.unwrap();
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            assert_eq!(
                app.state.current_route,
                Route::MoveMoney {
                    account_id: Some("acc456".to_string())
                }
            );
            assert_eq!(transfer_form(&app).from_account.as_text(), "acc456");
        }

        #[tokio::test]
        async fn test_valid_transfer_succeeds_and_resets() {
            let mut app = logged_in_app().await;
            app.navigate_path("/move-money?accountId=acc123").await;
            app.handle_key(key(KeyCode::Tab)).await.unwrap();
            type_text(&mut app, "acc999").await;
            app.handle_key(key(KeyCode::Tab)).await.unwrap();
            type_text(&mut app, "25.5").await;
            app.handle_key(ctrl('s')).await.unwrap();

            let form = transfer_form(&app);
            assert!(form.outcome.is_success());
            let message = form.outcome.message().unwrap();
            assert!(message.contains("25.5"));
            assert!(message.contains("acc999"));
            assert_eq!(form.to_account.as_text(), "");
            assert_eq!(form.amount.as_text(), "");
            assert_eq!(form.from_account.as_text(), "acc123");

            let titles: Vec<_> = app
                .state
                .notifications
                .visible()
                .map(|t| t.title.clone())
                .collect();
            assert_eq!(titles, vec!["Transfer Initiated!".to_string()]);
        }

        #[tokio::test]
        async fn test_invalid_amount_is_not_submitted() {
            let mut app = logged_in_app().await;
            app.handle_key(key(KeyCode::Char('m'))).await.unwrap();
            app.handle_key(key(KeyCode::Tab)).await.unwrap();
            type_text(&mut app, "acc999").await;
            app.handle_key(key(KeyCode::Tab)).await.unwrap();
            type_text(&mut app, "-5").await;
            app.submit_transfer().await;

            let form = transfer_form(&app);
            assert!(form.outcome.is_idle());
            assert_eq!(form.field_error("amount"), Some("Amount must be positive."));
            assert_eq!(form.field_errors.len(), 1);
        }

        #[tokio::test]
        async fn test_choice_field_cycles_with_arrows() {
            let mut app = logged_in_app().await;
            app.handle_key(key(KeyCode::Char('m'))).await.unwrap();
            app.handle_key(key(KeyCode::Right)).await.unwrap();
            assert_eq!(transfer_form(&app).from_account.as_text(), "acc456");
        }

        #[tokio::test]
        async fn test_service_rejection_becomes_error_outcome() {
            let mut bank = MockBankService::new();
            bank.expect_list_transfer_sources().returning(|| {
                Ok(vec![crate::state::TransferSource {
                    id: "acc123".to_string(),
                    name: "Everyday Checking".to_string(),
                    balance: 10.0,
                }])
            });
            bank.expect_submit_transfer()
                .times(1)
                .returning(|_| Err(BankError::Rejected("Insufficient funds".to_string())));

            let mut app = App::with_bank(Box::new(bank), TuiConfig::default());
            app.state.session = Some(SessionToken::generate());
            app.navigate_path("/move-money").await;
            app.handle_key(key(KeyCode::Tab)).await.unwrap();
            type_text(&mut app, "acc999").await;
            app.handle_key(key(KeyCode::Tab)).await.unwrap();
            type_text(&mut app, "500").await;
            app.submit_transfer().await;

            let form = transfer_form(&app);
            assert_eq!(
                form.outcome,
                SubmissionOutcome::error("Insufficient funds")
            );
            assert_eq!(form.to_account.as_text(), "acc999");
        }
    }

    mod card_controls {
        use super::*;
        use crate::state::TransactionType;
        use pretty_assertions::assert_eq;
        use std::collections::BTreeSet;

        async fn card_app() -> App {
            let mut app = logged_in_app().await;
            app.handle_key(key(KeyCode::Char('c'))).await.unwrap();
            app
        }

        #[tokio::test]
        async fn test_report_lost_stolen_freezes_card() {
            let mut app = card_app().await;
            assert!(!app.state.card_controls.frozen);
            app.handle_key(key(KeyCode::Char('r'))).await.unwrap();
            assert!(app.state.card_controls.frozen);
            app.handle_key(key(KeyCode::Char('r'))).await.unwrap();
            assert!(app.state.card_controls.frozen);
        }

        #[tokio::test]
        async fn test_freeze_toggle_with_space() {
            let mut app = card_app().await;
            app.handle_key(key(KeyCode::Char(' '))).await.unwrap();
            assert!(app.state.card_controls.frozen);
            app.handle_key(key(KeyCode::Char(' '))).await.unwrap();
            assert!(!app.state.card_controls.frozen);
        }

        #[tokio::test]
        async fn test_limit_editing_flow() {
            let mut app = card_app().await;
            app.handle_key(key(KeyCode::Down)).await.unwrap();
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            assert!(app.state.card_controls.spending_limit_enabled);
            app.handle_key(key(KeyCode::Down)).await.unwrap();
            assert_eq!(app.state.card_controls.focus, CardControlsFocus::LimitAmount);
            app.handle_key(key(KeyCode::Char('0'))).await.unwrap();
            assert_eq!(app.state.card_controls.spending_limit, 5000);
            app.handle_key(key(KeyCode::Backspace)).await.unwrap();
            app.handle_key(key(KeyCode::Backspace)).await.unwrap();
            assert_eq!(app.state.card_controls.spending_limit, 50);
        }

        #[tokio::test]
        async fn test_toggle_transaction_type() {
            let mut app = card_app().await;
            app.state.card_controls.focus = CardControlsFocus::TransactionTypes;
            app.handle_key(key(KeyCode::Right)).await.unwrap();
            app.handle_key(key(KeyCode::Char(' '))).await.unwrap();
            assert_eq!(
                app.state.card_controls.transaction_types,
                BTreeSet::from([
                    TransactionType::Online,
                    TransactionType::InStore,
                    TransactionType::Atm
                ])
            );
        }

        #[tokio::test]
        async fn test_save_sends_settings_and_confirms() {
            let mut bank = MockBankService::new();
            bank.expect_save_card_controls()
                .withf(|settings| settings.account_id.as_deref() == Some("acc456"))
                .times(1)
                .returning(|_| Ok(()));
            let mut app = App::with_bank(Box::new(bank), TuiConfig::default());
            app.state.session = Some(SessionToken::generate());
            app.navigate_path("/card-controls?accountId=acc456").await;

            app.handle_key(ctrl('s')).await.unwrap();
            let titles: Vec<_> = app
                .state
                .notifications
                .visible()
                .map(|t| t.title.clone())
                .collect();
            assert_eq!(titles, vec!["Card settings updated successfully!".to_string()]);
        }

        #[tokio::test]
        async fn test_failed_report_still_freezes_locally() {
            let mut bank = MockBankService::new();
            bank.expect_report_lost_stolen()
                .returning(|_| Err(BankError::Unavailable("offline".to_string())));
            let mut app = App::with_bank(Box::new(bank), TuiConfig::default());
            app.state.session = Some(SessionToken::generate());
            app.navigate_path("/card-controls").await;

            app.dispatch_card_event(CardEvent::ReportLostStolen).await;
            assert!(app.state.card_controls.frozen);
        }

        #[tokio::test]
        async fn test_spending_limit_default_from_config() {
            let config = TuiConfig {
                default_spending_limit: Some(250),
                ..Default::default()
            };
            let mut app = App::new(config).await.unwrap();
            app.state.session = Some(SessionToken::generate());
            app.navigate_path("/card-controls").await;
            assert_eq!(app.state.card_controls.spending_limit, 250);
        }
    }

    #[tokio::test]
    async fn test_account_load_failure_notifies() {
        let mut bank = MockBankService::new();
        bank.expect_list_accounts()
            .returning(|| Err(BankError::Unavailable("timeout".to_string())));
        let mut app = App::with_bank(Box::new(bank), TuiConfig::default());
        app.state.session = Some(SessionToken::generate());
        app.navigate(Route::AccountsDashboard).await;

        assert!(app.state.accounts.is_empty());
        assert!(!app.state.notifications.is_empty());
    }

    #[tokio::test]
    async fn test_space_expands_quick_info() {
        let mut app = logged_in_app().await;
        app.handle_key(key(KeyCode::Char(' '))).await.unwrap();
        assert!(app.state.dashboard.is_expanded("acc123"));
    }
}
