use crate::config::AtmConfig;
use crate::domain::banknote::{Banknote, Payment};
use crate::domain::card::{AuthenticationToken, Card};
use crate::domain::denomination::DenominationTable;
use crate::domain::money::Money;
use crate::domain::ports::{
    BankService, BankServiceBox, CardProviderService, CardProviderServiceBox, MoneyDepot,
    MoneyDepotBox,
};
use crate::error::{AtmError, Result};
use tracing::{debug, error, info, instrument, warn};

/// The withdrawal orchestrator.
///
/// `AtmMachine` owns its collaborators and the denomination table and keeps no
/// state between withdrawals, so one instance can serve successive customers.
/// Each [`withdraw`](Self::withdraw) awaits its steps strictly in order.
pub struct AtmMachine {
    card_provider: CardProviderServiceBox,
    bank: BankServiceBox,
    depot: MoneyDepotBox,
    denominations: DenominationTable,
}

impl AtmMachine {
    /// Creates a new `AtmMachine` using the default denomination table.
    ///
    /// # Arguments
    ///
    /// * `card_provider` - Authorizes cards.
    /// * `bank` - Charges and aborts operations on the customer's account.
    /// * `depot` - Releases the physical banknotes.
    pub fn new(
        card_provider: CardProviderServiceBox,
        bank: BankServiceBox,
        depot: MoneyDepotBox,
    ) -> Self {
        Self::with_denominations(card_provider, bank, depot, DenominationTable::default())
    }

    pub fn with_denominations(
        card_provider: CardProviderServiceBox,
        bank: BankServiceBox,
        depot: MoneyDepotBox,
        denominations: DenominationTable,
    ) -> Self {
        Self {
            card_provider,
            bank,
            depot,
            denominations,
        }
    }

    pub fn builder() -> AtmMachineBuilder {
        AtmMachineBuilder::default()
    }

    pub fn denominations(&self) -> &DenominationTable {
        &self.denominations
    }

    /// Withdraws `money` using `card`.
    ///
    /// The amount is validated and split into banknotes before any
    /// collaborator is contacted, so a negative or unpayable amount fails with
    /// [`AtmError::WrongMoneyAmount`] without the card provider ever being
    /// called. Otherwise the card is authorized once, the bank
    /// is charged and the depot releases the notes. If the charge or the
    /// release fails after a successful authorization, the bank operation is
    /// aborted exactly once before the error is returned.
    ///
    /// # Errors
    ///
    /// * [`AtmError::WrongMoneyAmount`] - negative or unpayable amount.
    /// * [`AtmError::CardAuthorizationFailed`] - the card was not authorized.
    /// * [`AtmError::InsufficientFunds`] - the bank declined the charge.
    /// * [`AtmError::MoneyDepotError`] - the depot could not release the notes.
    /// * [`AtmError::CollaboratorError`] - a collaborator failed outright.
    #[instrument(skip(self, card), fields(amount = money.amount(), currency = %money.currency()))]
    pub async fn withdraw(&self, money: Money, card: Card) -> Result<Payment> {
        let banknotes = self.denominations.break_down(&money).inspect_err(|e| {
            warn!(error = %e, "rejected withdrawal amount");
        })?;
        debug!(notes = banknotes.len(), "banknotes selected");

        let token = self.authorize(&card).await?;

        if let Err(e) = self.perform_payment(&token, &money, &banknotes).await {
            warn!(error = %e, "withdrawal failed, aborting bank operation");
            self.abort(&token).await;
            return Err(e);
        }

        info!(notes = banknotes.len(), "withdrawal completed");
        Ok(Payment::new(banknotes))
    }

    async fn authorize(&self, card: &Card) -> Result<AuthenticationToken> {
        match self.card_provider.authorize(card).await? {
            Some(token) => {
                debug!(user_id = token.user_id(), "card authorized");
                Ok(token)
            }
            None => {
                warn!("card authorization denied");
                Err(AtmError::CardAuthorizationFailed)
            }
        }
    }

    async fn perform_payment(
        &self,
        token: &AuthenticationToken,
        money: &Money,
        banknotes: &[Banknote],
    ) -> Result<()> {
        if !self.bank.charge(token, money).await? {
            return Err(AtmError::InsufficientFunds(*money));
        }
        debug!("bank charged");

        if !self.depot.release_banknotes(banknotes).await? {
            return Err(AtmError::MoneyDepotError(*money));
        }
        debug!("banknotes released");
        Ok(())
    }

    async fn abort(&self, token: &AuthenticationToken) {
        if let Err(e) = self.bank.abort(token).await {
            error!(error = %e, user_id = token.user_id(), "failed to abort bank operation");
        }
    }
}

/// Assembles an [`AtmMachine`], checking that every collaborator is present.
#[derive(Default)]
pub struct AtmMachineBuilder {
    card_provider: Option<CardProviderServiceBox>,
    bank: Option<BankServiceBox>,
    depot: Option<MoneyDepotBox>,
    denominations: Option<DenominationTable>,
}

impl AtmMachineBuilder {
    pub fn card_provider(mut self, card_provider: impl CardProviderService + 'static) -> Self {
        self.card_provider = Some(Box::new(card_provider));
        self
    }

    pub fn bank(mut self, bank: impl BankService + 'static) -> Self {
        self.bank = Some(Box::new(bank));
        self
    }

    pub fn depot(mut self, depot: impl MoneyDepot + 'static) -> Self {
        self.depot = Some(Box::new(depot));
        self
    }

    pub fn denominations(mut self, denominations: DenominationTable) -> Self {
        self.denominations = Some(denominations);
        self
    }

    pub fn config(self, config: &AtmConfig) -> Self {
        self.denominations(config.denomination_table())
    }

    /// Fails with [`AtmError::ConfigurationError`] if a collaborator is missing.
    pub fn build(self) -> Result<AtmMachine> {
        let card_provider = self.card_provider.ok_or_else(|| missing("card provider service"))?;
        let bank = self.bank.ok_or_else(|| missing("bank service"))?;
        let depot = self.depot.ok_or_else(|| missing("money depot"))?;

        Ok(AtmMachine::with_denominations(
            card_provider,
            bank,
            depot,
            self.denominations.unwrap_or_default(),
        ))
    }
}

fn missing(collaborator: &str) -> AtmError {
    AtmError::ConfigurationError(format!("{collaborator} is required"))
}
