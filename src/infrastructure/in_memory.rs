use crate::domain::banknote::Banknote;
use crate::domain::card::{AuthenticationToken, Card};
use crate::domain::money::{Currency, Money};
use crate::domain::ports::{BankService, CardProviderService, MoneyDepot};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// A thread-safe in-memory card authority.
///
/// Cards are registered together with the token issued on successful
/// authorization. Unknown cards and wrong PINs are denied.
#[derive(Default, Clone)]
pub struct InMemoryCardProvider {
    cards: Arc<RwLock<HashMap<String, (u32, AuthenticationToken)>>>,
}

impl InMemoryCardProvider {
    /// Creates a new card provider with no registered cards.
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn register(&self, card: &Card, token: AuthenticationToken) {
        let mut cards = self.cards.write().await;
        cards.insert(card.card_number().to_string(), (card.pin(), token));
    }
}

#[async_trait]
impl CardProviderService for InMemoryCardProvider {
    async fn authorize(&self, card: &Card) -> Result<Option<AuthenticationToken>> {
        let cards = self.cards.read().await;
        Ok(cards
            .get(card.card_number())
            .filter(|(pin, _)| *pin == card.pin())
            .map(|(_, token)| token.clone()))
    }
}

#[derive(Default)]
struct Ledger {
    balances: HashMap<(String, Currency), i64>,
    holds: HashMap<AuthenticationToken, Money>,
}

/// A thread-safe in-memory bank.
///
/// Keeps one balance per user and currency. A successful charge deducts the
/// amount and remembers it under the token so that `abort` can give it back.
#[derive(Default, Clone)]
pub struct InMemoryBank {
    ledger: Arc<RwLock<Ledger>>,
}

impl InMemoryBank {
    /// Creates a new bank with no accounts.
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn deposit(&self, user_id: &str, money: Money) {
        let mut ledger = self.ledger.write().await;
        *ledger
            .balances
            .entry((user_id.to_string(), money.currency()))
            .or_default() += money.amount();
    }

    pub async fn balance(&self, user_id: &str, currency: Currency) -> i64 {
        let ledger = self.ledger.read().await;
        ledger
            .balances
            .get(&(user_id.to_string(), currency))
            .copied()
            .unwrap_or_default()
    }
}

#[async_trait]
impl BankService for InMemoryBank {
    async fn charge(&self, token: &AuthenticationToken, money: &Money) -> Result<bool> {
        let mut ledger = self.ledger.write().await;
        // A new charge settles whatever an earlier charge under this token held.
        ledger.holds.remove(token);
        let key = (token.user_id().to_string(), money.currency());
        let Some(balance) = ledger.balances.get_mut(&key) else {
            return Ok(false);
        };
        if *balance < money.amount() {
            return Ok(false);
        }

        *balance -= money.amount();
        ledger.holds.insert(token.clone(), *money);
        Ok(true)
    }

    async fn abort(&self, token: &AuthenticationToken) -> Result<()> {
        let mut ledger = self.ledger.write().await;
        if let Some(money) = ledger.holds.remove(token) {
            debug!(user_id = token.user_id(), %money, "charge reversed");
            *ledger
                .balances
                .entry((token.user_id().to_string(), money.currency()))
                .or_default() += money.amount();
        }
        Ok(())
    }
}

/// A thread-safe in-memory cash depot.
///
/// Tracks how many notes of each kind are loaded. A release either hands out
/// every requested note or none of them.
#[derive(Default, Clone)]
pub struct InMemoryMoneyDepot {
    stock: Arc<RwLock<HashMap<Banknote, usize>>>,
}

impl InMemoryMoneyDepot {
    /// Creates a new, empty depot.
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load(&self, banknote: Banknote, count: usize) {
        let mut stock = self.stock.write().await;
        *stock.entry(banknote).or_default() += count;
    }

    pub async fn available(&self, banknote: Banknote) -> usize {
        let stock = self.stock.read().await;
        stock.get(&banknote).copied().unwrap_or_default()
    }
}

#[async_trait]
impl MoneyDepot for InMemoryMoneyDepot {
    async fn release_banknotes(&self, banknotes: &[Banknote]) -> Result<bool> {
        let mut requested: HashMap<Banknote, usize> = HashMap::new();
        for note in banknotes {
            *requested.entry(*note).or_default() += 1;
        }

        let mut stock = self.stock.write().await;
        let sufficient = requested
            .iter()
            .all(|(note, count)| stock.get(note).is_some_and(|available| available >= count));
        if !sufficient {
            return Ok(false);
        }

        for (note, count) in requested {
            if let Some(available) = stock.get_mut(&note) {
                *available -= count;
            }
        }
        Ok(true)
    }
}
