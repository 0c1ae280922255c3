//! Form state management and form structs

use super::field::{ChoiceOption, FieldValue, FormField};
use super::outcome::SubmissionOutcome;
use super::rules::{FieldRule, FormSchema};
use super::validation::{validate, FieldErrors, FormValues, ValidValues, ValidationResult};
use crate::bank::BankError;
use crate::state::notifications::Toast;
use crate::state::{SessionToken, TransferReceipt, TransferRequest, TransferSource};

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> &mut FormField;
    fn get_field(&self, index: usize) -> Option<&FormField>;

    /// Snapshot of every field for the validation engine
    fn values(&self) -> FormValues {
        let mut values = FormValues::new();
        let mut index = 0;
        while let Some(field) = self.get_field(index) {
            values.set(field.name, field.to_input());
            index += 1;
        }
        values
    }
}

/// Enum representing the form mounted on the current screen
#[derive(Debug, Clone, Default)]
pub enum FormState {
    #[default]
    None,
    Login(LoginForm),
    Transfer(TransferForm),
}

impl FormState {
    pub fn next_field(&mut self) {
        match self {
            FormState::None => {}
            FormState::Login(f) => f.next_field(),
            FormState::Transfer(f) => f.next_field(),
        }
    }

    pub fn prev_field(&mut self) {
        match self {
            FormState::None => {}
            FormState::Login(f) => f.prev_field(),
            FormState::Transfer(f) => f.prev_field(),
        }
    }

    pub fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        match self {
            FormState::None => None,
            FormState::Login(f) => Some(f.get_active_field_mut()),
            FormState::Transfer(f) => Some(f.get_active_field_mut()),
        }
    }

    pub fn is_last_field_active(&self) -> bool {
        match self {
            FormState::None => false,
            FormState::Login(f) => f.active_field() + 1 == f.field_count(),
            FormState::Transfer(f) => f.active_field() + 1 == f.field_count(),
        }
    }
}

// Login Form

pub const USER_ID: &str = "userId";
pub const PASSWORD: &str = "password";

const LOGIN_RULES: &[FieldRule] = &[
    FieldRule::required(USER_ID, "User ID is required."),
    FieldRule::required(PASSWORD, "Password is required."),
];

pub const LOGIN_SCHEMA: FormSchema = FormSchema::from_static(LOGIN_RULES);

/// Form-level message when the credential check fails
pub const INVALID_CREDENTIALS: &str = "Invalid User ID or Password. Please try again.";
const LOGIN_UNAVAILABLE: &str = "Login is unavailable right now. Please try again later.";

/// Validated credentials ready for the credential check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user_id: String,
    pub password: String,
}

/// What the page should do after a login attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    NavigateToDashboard(SessionToken),
    /// A form-level error is showing; no field is singled out
    Rejected,
}

#[derive(Debug, Clone)]
pub struct LoginForm {
    pub user_id: FormField,
    pub password: FormField,
    pub active_field_index: usize,
    pub field_errors: FieldErrors,
    pub form_error: Option<String>,
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            user_id: FormField::text(USER_ID, "User ID", "Enter your User ID"),
            password: FormField::secret(PASSWORD, "Password", "Enter your password"),
            active_field_index: 0,
            field_errors: FieldErrors::new(),
            form_error: None,
        }
    }

    /// Start with a user id already filled in
    pub fn with_user_id(user_id: &str) -> Self {
        let mut form = Self::new();
        form.user_id.set_text(user_id.to_string());
        form.active_field_index = 1;
        form
    }

    pub fn validate(&self) -> ValidationResult {
        validate(&LOGIN_SCHEMA, &self.values())
    }

    /// Run validation. Field errors are replaced by this attempt's; on
    /// success the credentials to check are returned.
    pub fn begin_submit(&mut self) -> Option<Credentials> {
        match self.validate() {
            ValidationResult::Valid(values) => {
                self.field_errors.clear();
                Some(Credentials {
                    user_id: values.text(USER_ID).unwrap_or_default(),
                    password: values.text(PASSWORD).unwrap_or_default(),
                })
            }
            ValidationResult::Invalid(errors) => {
                self.field_errors = errors;
                None
            }
        }
    }

    /// Apply the credential check result
    pub fn resolve(&mut self, result: Result<Option<SessionToken>, BankError>) -> LoginOutcome {
        match result {
            Ok(Some(token)) => {
                self.form_error = None;
                LoginOutcome::NavigateToDashboard(token)
            }
            Ok(None) => {
                self.form_error = Some(INVALID_CREDENTIALS.to_string());
                LoginOutcome::Rejected
            }
            Err(err) => {
                tracing::warn!("Login failed: {err}");
                self.form_error = Some(LOGIN_UNAVAILABLE.to_string());
                LoginOutcome::Rejected
            }
        }
    }

    pub fn field_error(&self, field: &str) -> Option<&'static str> {
        self.field_errors.get(field).copied()
    }
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for LoginForm {
    fn field_count(&self) -> usize {
        2
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(1);
    }
    fn get_active_field_mut(&mut self) -> &mut FormField {
        match self.active_field_index {
            0 => &mut self.user_id,
            _ => &mut self.password,
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            0 => Some(&self.user_id),
            1 => Some(&self.password),
            _ => None,
        }
    }
}

// Transfer Form

pub const FROM_ACCOUNT: &str = "fromAccount";
pub const TO_ACCOUNT: &str = "toAccount";
pub const AMOUNT: &str = "amount";
pub const REFERENCE: &str = "reference";

const TRANSFER_RULES: &[FieldRule] = &[
    FieldRule::required(FROM_ACCOUNT, "Please select an account to transfer from."),
    FieldRule::required(TO_ACCOUNT, "Recipient account number is required."),
    FieldRule::positive_number(AMOUNT, "Amount must be positive."),
    FieldRule::optional(REFERENCE),
];

pub const TRANSFER_SCHEMA: FormSchema = FormSchema::from_static(TRANSFER_RULES);

/// Validate raw transfer values and build the request
pub fn transfer_request(values: &FormValues) -> Result<TransferRequest, FieldErrors> {
    match validate(&TRANSFER_SCHEMA, values) {
        ValidationResult::Valid(valid) => Ok(request_from_valid(&valid)),
        ValidationResult::Invalid(errors) => Err(errors),
    }
}

fn request_from_valid(valid: &ValidValues) -> TransferRequest {
    TransferRequest {
        from_account: valid.text(FROM_ACCOUNT).unwrap_or_default(),
        to_account: valid.text(TO_ACCOUNT).unwrap_or_default(),
        amount: valid.number(AMOUNT).unwrap_or_default(),
        reference: valid.text(REFERENCE).filter(|r| !r.trim().is_empty()),
    }
}

/// Shortest round-trip rendering of an amount, switching to exponent
/// notation outside `[1e-6, 1e21)` the way JavaScript number printing does
pub fn display_amount(amount: f64) -> String {
    let magnitude = amount.abs();
    if magnitude != 0.0 && magnitude.is_finite() && !(1e-6..1e21).contains(&magnitude) {
        let exp = format!("{amount:e}");
        match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
            _ => exp,
        }
    } else {
        format!("{amount}")
    }
}

/// Confirmation shown after a transfer is accepted
pub fn transfer_confirmation(request: &TransferRequest) -> String {
    format!(
        "Successfully initiated transfer of ${} from account {} to {}.",
        display_amount(request.amount),
        request.from_account,
        request.to_account
    )
}

#[derive(Debug, Clone)]
pub struct TransferForm {
    pub from_account: FormField,
    pub to_account: FormField,
    pub amount: FormField,
    pub reference: FormField,
    pub active_field_index: usize,
    pub field_errors: FieldErrors,
    pub outcome: SubmissionOutcome,
    default_from: Option<String>,
}

impl TransferForm {
    /// Mount the form. The source defaults to `account_id`, else the first source.
    pub fn new(sources: &[TransferSource], account_id: Option<&str>) -> Self {
        let default_from = account_id
            .map(str::to_string)
            .or_else(|| sources.first().map(|s| s.id.clone()));
        let options = sources
            .iter()
            .map(|s| ChoiceOption {
                value: s.id.clone(),
                label: format!("{} - Balance: ${:.2}", s.name, s.balance),
            })
            .collect();

        Self {
            from_account: FormField::choice(
                FROM_ACCOUNT,
                "From Account",
                "Select an account to transfer from",
                options,
                default_from.as_deref(),
            ),
            to_account: FormField::text(
                TO_ACCOUNT,
                "To Account / Recipient ID",
                "Enter recipient account number or ID",
            ),
            amount: FormField::text(AMOUNT, "Amount ($)", "0.00"),
            reference: FormField::text(
                REFERENCE,
                "Reference (Optional)",
                "e.g., Rent payment, Birthday gift",
            ),
            active_field_index: 0,
            field_errors: FieldErrors::new(),
            outcome: SubmissionOutcome::Idle,
            default_from,
        }
    }

    pub fn validate(&self) -> ValidationResult {
        validate(&TRANSFER_SCHEMA, &self.values())
    }

    /// Run validation and return the request to submit when it passes
    pub fn begin_submit(&mut self) -> Option<TransferRequest> {
        match transfer_request(&self.values()) {
            Ok(request) => {
                self.field_errors.clear();
                Some(request)
            }
            Err(errors) => {
                self.field_errors = errors;
                None
            }
        }
    }

    /// Record the submission result. A successful transfer resets the fields.
    pub fn complete(&mut self, result: Result<TransferReceipt, BankError>) -> Toast {
        match result {
            Ok(receipt) => {
                let request = &receipt.request;
                self.outcome = SubmissionOutcome::success(transfer_confirmation(request));
                let toast = Toast::success("Transfer Initiated!").with_description(format!(
                    "Amount: ${}, To: {}",
                    display_amount(request.amount),
                    request.to_account
                ));
                self.reset();
                toast
            }
            Err(err) => {
                self.outcome = SubmissionOutcome::error(err.to_string());
                Toast::error("Transfer Failed").with_description(err.to_string())
            }
        }
    }

    /// Restore every field to its mount-time default
    pub fn reset(&mut self) {
        if let FieldValue::Choice { options, selected } = &mut self.from_account.value {
            *selected = self
                .default_from
                .as_ref()
                .and_then(|d| options.iter().position(|o| &o.value == d));
        }
        self.to_account.clear();
        self.amount.clear();
        self.reference.clear();
        self.active_field_index = 0;
        self.field_errors.clear();
    }

    pub fn field_error(&self, field: &str) -> Option<&'static str> {
        self.field_errors.get(field).copied()
    }
}

impl Form for TransferForm {
    fn field_count(&self) -> usize {
        4
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(3);
    }
    fn get_active_field_mut(&mut self) -> &mut FormField {
        match self.active_field_index {
            0 => &mut self.from_account,
            1 => &mut self.to_account,
            2 => &mut self.amount,
            _ => &mut self.reference,
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            0 => Some(&self.from_account),
            1 => Some(&self.to_account),
            2 => Some(&self.amount),
            3 => Some(&self.reference),
            _ => None,
        }
    }
}
