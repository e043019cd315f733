use crate::domain::money::Money;
use miette::Diagnostic;
use thiserror::Error;

/// Errors raised by the ATM core.
///
/// Every variant is terminal for the withdrawal that produced it; nothing is
/// retried internally.
#[derive(Error, Diagnostic, Debug)]
pub enum AtmError {
    #[error("Wrong money amount {money}: {reason}")]
    #[diagnostic(
        code(atm::wrong_money_amount),
        help("request a non-negative amount made of available banknotes")
    )]
    WrongMoneyAmount { money: Money, reason: String },

    #[error("Card authorization failed")]
    #[diagnostic(code(atm::card_authorization_failed))]
    CardAuthorizationFailed,

    #[error("Insufficient funds to withdraw {0}")]
    #[diagnostic(code(atm::insufficient_funds))]
    InsufficientFunds(Money),

    #[error("Money depot cannot release banknotes for {0}")]
    #[diagnostic(code(atm::money_depot))]
    MoneyDepotError(Money),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(atm::configuration))]
    ConfigurationError(String),

    #[error("Collaborator error: {0}")]
    #[diagnostic(code(atm::collaborator))]
    CollaboratorError(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("IO error: {0}")]
    #[diagnostic(code(atm::io))]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    #[diagnostic(code(atm::json))]
    JsonError(#[from] serde_json::Error),
}

impl AtmError {
    /// Wraps a failure reported by a card provider, bank or depot adapter.
    pub fn collaborator<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::CollaboratorError(error.into())
    }

    pub(crate) fn wrong_amount(money: Money, reason: impl Into<String>) -> Self {
        Self::WrongMoneyAmount {
            money,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AtmError>;
