//! Domain model: value types, the banknote-selection algorithm and the ports
//! the ATM talks to.

pub mod banknote;
pub mod card;
pub mod denomination;
pub mod money;
pub mod ports;
