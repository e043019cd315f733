//! Transactional core of an ATM cash withdrawal.
//!
//! [`AtmMachine`](application::atm::AtmMachine) authorizes a card, charges the
//! bank and releases banknotes from the depot, aborting the bank operation
//! when a step after authorization fails.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
