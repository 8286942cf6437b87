use soroban_sdk::{contracttype, Address, Env, String, Symbol};

use crate::events;

/// Error categories for classifying different types of errors
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorCategory {
    /// Validation errors: invalid input parameters or format errors
    Validation = 1,
    /// Authorization errors: access gate failures
    Authorization = 2,
    /// Not found errors: token or role holder lookup failures
    NotFound = 3,
    /// State conflict errors: duplicate whitelist entries or roles
    StateConflict = 4,
    /// Payment errors: fees below the required amount or failed transfers
    Payment = 5,
    /// System errors: pausing and reentrancy
    System = 6,
}

/// Error severity levels indicating the impact and urgency of errors
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorSeverity {
    /// Low severity: rejected input, nothing changed
    Low = 1,
    /// Medium severity: a caller attempted something it may not do
    Medium = 2,
    /// High severity: value movement failed
    High = 3,
    /// Critical severity: the registry is halted or under attack
    Critical = 4,
}

/// The precondition that failed, with the values needed to reconstruct it.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ErrorDetail {
    None,
    /// (required, provided)
    Funds(i128, i128),
    /// Name of the empty argument.
    Field(Symbol),
    /// Caller that failed an access gate.
    Caller(Address),
    /// Token that does not exist or is not in the expected state.
    Token(u64),
    /// Address that is invalid, absent, or already registered.
    Account(Address),
    /// (requested, max)
    Batch(u64, u32),
    /// (offset, total)
    Offset(u64, u64),
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct ErrorContext {
    pub category: ErrorCategory,
    pub severity: ErrorSeverity,
    pub message: String,
    pub detail: ErrorDetail,
    pub timestamp: u64,
    pub retryable: bool,
}

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    NotFound = 4,
    InvalidAddress = 5,
    EmptyField = 6,
    InsufficientFunds = 7,
    AlreadyExists = 8,
    BatchSizeExceeded = 9,
    OffsetOutOfBounds = 10,
    ReentrantCall = 11,
    Paused = 12,
    TransferFailed = 13,
}

impl ContractError {
    /// Returns the error category for this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ContractError::NotInitialized
            | ContractError::AlreadyInitialized
            | ContractError::InvalidAddress
            | ContractError::EmptyField
            | ContractError::BatchSizeExceeded
            | ContractError::OffsetOutOfBounds => ErrorCategory::Validation,
            ContractError::Unauthorized => ErrorCategory::Authorization,
            ContractError::NotFound => ErrorCategory::NotFound,
            ContractError::AlreadyExists => ErrorCategory::StateConflict,
            ContractError::InsufficientFunds | ContractError::TransferFailed => {
                ErrorCategory::Payment
            }
            ContractError::ReentrantCall | ContractError::Paused => ErrorCategory::System,
        }
    }

    /// Returns the severity level for this error.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ContractError::NotInitialized
            | ContractError::AlreadyInitialized
            | ContractError::InvalidAddress
            | ContractError::EmptyField
            | ContractError::NotFound
            | ContractError::AlreadyExists
            | ContractError::BatchSizeExceeded
            | ContractError::OffsetOutOfBounds
            | ContractError::InsufficientFunds => ErrorSeverity::Low,
            ContractError::Unauthorized => ErrorSeverity::Medium,
            ContractError::TransferFailed => ErrorSeverity::High,
            ContractError::ReentrantCall | ContractError::Paused => ErrorSeverity::Critical,
        }
    }

    /// A failed fee transfer can succeed once the payer is funded; nothing
    /// else changes without a different request.
    pub fn retryable(&self) -> bool {
        matches!(self, ContractError::TransferFailed)
    }

    /// Returns a human-readable error message for this error.
    pub fn message(&self) -> &'static str {
        match self {
            ContractError::NotInitialized => "Registry has not been initialized",
            ContractError::AlreadyInitialized => "Registry is already initialized",
            ContractError::Unauthorized => "Caller is not authorized for this operation",
            ContractError::NotFound => "Token or role holder not found",
            ContractError::InvalidAddress => "Address cannot hold tokens or roles",
            ContractError::EmptyField => "A required field is empty",
            ContractError::InsufficientFunds => "Attached fee is below the required amount",
            ContractError::AlreadyExists => "Entry already exists",
            ContractError::BatchSizeExceeded => "Requested batch exceeds the maximum batch size",
            ContractError::OffsetOutOfBounds => "Offset is past the last token",
            ContractError::ReentrantCall => "Reentrant call rejected",
            ContractError::Paused => "Registry operations are currently paused",
            ContractError::TransferFailed => "Token transfer failed",
        }
    }
}

/// Creates an ErrorContext from an error and the failed precondition.
pub fn create_error_context(env: &Env, error: ContractError, detail: ErrorDetail) -> ErrorContext {
    ErrorContext {
        category: error.category(),
        severity: error.severity(),
        message: String::from_str(env, error.message()),
        detail,
        timestamp: env.ledger().timestamp(),
        retryable: error.retryable(),
    }
}

/// Logs the failure with its detail and hands the error back so call sites
/// can write `return Err(raise(..))`.
pub fn raise(env: &Env, error: ContractError, detail: ErrorDetail) -> ContractError {
    let context = create_error_context(env, error, detail);
    events::log_error(env, error as u32, context);
    error
}
