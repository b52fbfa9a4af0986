//! Settlement engine: derived views over a [`Ledger`](splitledger_ledger::Ledger).
//!
//! Every view is recomputed from scratch on each call; nothing is cached.
//!
//! - [`compute_balances`]: net balance per member.
//! - [`raw_transactions`]: one debt edge per (expense, non-payer participant).
//! - [`net_pairwise`]: raw edges collapsed to one edge per unordered pair.
//! - [`settle`]: greedy two-pointer payments that zero every balance.

pub mod balances;
pub mod config;
pub mod net;
pub mod optimizer;
pub mod raw;
pub mod transaction;
pub mod views;

pub use balances::{Balances, compute_balances};
pub use config::SettlementConfig;
pub use net::net_pairwise;
pub use optimizer::settle;
pub use raw::raw_transactions;
pub use transaction::Transaction;
pub use views::SettlementViews;
