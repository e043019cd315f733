use serde::{Deserialize, Serialize};
use std::fmt;

/// A payment card presented at the ATM.
#[derive(Clone, PartialEq, Eq)]
pub struct Card {
    card_number: String,
    pin: u32,
}

impl Card {
    pub fn new(card_number: impl Into<String>, pin: u32) -> Self {
        Self {
            card_number: card_number.into(),
            pin,
        }
    }

    pub fn card_number(&self) -> &str {
        &self.card_number
    }

    pub fn pin(&self) -> u32 {
        self.pin
    }
}

// The PIN never appears in debug output or logs.
impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Card")
            .field("card_number", &self.card_number)
            .field("pin", &"****")
            .finish()
    }
}

/// Proof of a successful card authorization.
///
/// Issued by a [`CardProviderService`](super::ports::CardProviderService) and
/// handed back unchanged to the bank for `charge` and `abort`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthenticationToken {
    authorization_code: u32,
    user_id: String,
}

impl AuthenticationToken {
    pub fn new(authorization_code: u32, user_id: impl Into<String>) -> Self {
        Self {
            authorization_code,
            user_id: user_id.into(),
        }
    }

    pub fn authorization_code(&self) -> u32 {
        self.authorization_code
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}
