#![allow(dead_code)]

use async_trait::async_trait;
use atm_withdrawal::domain::banknote::Banknote;
use atm_withdrawal::domain::card::{AuthenticationToken, Card};
use atm_withdrawal::domain::money::{Currency, Money};
use atm_withdrawal::domain::ports::{BankService, CardProviderService, MoneyDepot};
use atm_withdrawal::error::{AtmError, Result};
use std::sync::{Arc, Mutex};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn money() -> Money {
    Money::new(100, Currency::Pl)
}

pub fn card() -> Card {
    Card::new("string", 100)
}

pub fn token() -> AuthenticationToken {
    AuthenticationToken::new(111, "111")
}

/// What a stubbed collaborator answers.
#[derive(Clone, Copy)]
pub enum Reply {
    Yes,
    No,
    Fail,
}

impl Reply {
    fn resolve(self) -> Result<bool> {
        match self {
            Reply::Yes => Ok(true),
            Reply::No => Ok(false),
            Reply::Fail => Err(AtmError::collaborator("collaborator unavailable")),
        }
    }
}

#[derive(Clone)]
pub struct StubCardProvider {
    reply: Reply,
    token: AuthenticationToken,
    pub calls: Arc<Mutex<Vec<Card>>>,
}

impl StubCardProvider {
    pub fn authorizing(token: AuthenticationToken) -> Self {
        Self {
            reply: Reply::Yes,
            token,
            calls: Arc::default(),
        }
    }

    pub fn denying() -> Self {
        Self {
            reply: Reply::No,
            token: token(),
            calls: Arc::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: Reply::Fail,
            token: token(),
            calls: Arc::default(),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl CardProviderService for StubCardProvider {
    async fn authorize(&self, card: &Card) -> Result<Option<AuthenticationToken>> {
        self.calls.lock().unwrap().push(card.clone());
        Ok(self.reply.resolve()?.then(|| self.token.clone()))
    }
}

#[derive(Clone)]
pub struct StubBank {
    charge_reply: Reply,
    abort_fails: bool,
    pub charges: Arc<Mutex<Vec<(AuthenticationToken, Money)>>>,
    pub aborts: Arc<Mutex<Vec<AuthenticationToken>>>,
}

impl StubBank {
    pub fn new(charge_reply: Reply) -> Self {
        Self {
            charge_reply,
            abort_fails: false,
            charges: Arc::default(),
            aborts: Arc::default(),
        }
    }

    pub fn with_failing_abort(mut self) -> Self {
        self.abort_fails = true;
        self
    }

    pub fn charge_count(&self) -> usize {
        self.charges.lock().unwrap().len()
    }

    pub fn aborted_tokens(&self) -> Vec<AuthenticationToken> {
        self.aborts.lock().unwrap().clone()
    }
}

#[async_trait]
impl BankService for StubBank {
    async fn charge(&self, token: &AuthenticationToken, money: &Money) -> Result<bool> {
        self.charges.lock().unwrap().push((token.clone(), *money));
        self.charge_reply.resolve()
    }

    async fn abort(&self, token: &AuthenticationToken) -> Result<()> {
        self.aborts.lock().unwrap().push(token.clone());
        if self.abort_fails {
            return Err(AtmError::collaborator("abort rejected"));
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct StubDepot {
    reply: Reply,
    pub releases: Arc<Mutex<Vec<Vec<Banknote>>>>,
}

impl StubDepot {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            releases: Arc::default(),
        }
    }

    pub fn release_count(&self) -> usize {
        self.releases.lock().unwrap().len()
    }
}

#[async_trait]
impl MoneyDepot for StubDepot {
    async fn release_banknotes(&self, banknotes: &[Banknote]) -> Result<bool> {
        self.releases.lock().unwrap().push(banknotes.to_vec());
        self.reply.resolve()
    }
}
