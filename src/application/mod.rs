//! Application layer containing the withdrawal orchestration.
//!
//! This module defines the `AtmMachine`, the entry point for withdrawals. It
//! drives the card provider, bank and money depot ports in sequence and
//! compensates the bank when a later step fails.

pub mod atm;
