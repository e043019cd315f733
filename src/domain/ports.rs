use super::banknote::Banknote;
use super::card::{AuthenticationToken, Card};
use super::money::Money;
use crate::error::Result;
use async_trait::async_trait;

/// Authorizes cards with the issuing authority.
///
/// A normal denial is `Ok(None)`; `Err` means the provider itself failed.
#[async_trait]
pub trait CardProviderService: Send + Sync {
    async fn authorize(&self, card: &Card) -> Result<Option<AuthenticationToken>>;
}

/// Charges and reverses operations on the customer's bank account.
#[async_trait]
pub trait BankService: Send + Sync {
    /// Returns `Ok(false)` when the bank declines the charge.
    async fn charge(&self, token: &AuthenticationToken, money: &Money) -> Result<bool>;

    /// Reverses a charge or hold made under `token`.
    ///
    /// The ATM calls this at most once per failed withdrawal. Implementations
    /// should still tolerate repeated calls. An `Err` returned here is logged
    /// by the ATM and never replaces the error that caused the abort.
    async fn abort(&self, token: &AuthenticationToken) -> Result<()>;
}

/// The physical cash cassettes of the ATM.
#[async_trait]
pub trait MoneyDepot: Send + Sync {
    /// Returns `Ok(false)` when the notes cannot be dispensed, e.g. out of stock.
    async fn release_banknotes(&self, banknotes: &[Banknote]) -> Result<bool>;
}

pub type CardProviderServiceBox = Box<dyn CardProviderService>;
pub type BankServiceBox = Box<dyn BankService>;
pub type MoneyDepotBox = Box<dyn MoneyDepot>;
