use serde::Serialize;

use splitledger_ledger::Ledger;

use crate::balances::{Balances, compute_balances};
use crate::config::SettlementConfig;
use crate::net::net_pairwise;
use crate::optimizer::settle;
use crate::raw::raw_transactions;
use crate::transaction::Transaction;

/// All four derived views of one ledger snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettlementViews {
    pub balances: Balances,
    pub raw: Vec<Transaction>,
    pub net: Vec<Transaction>,
    pub settlement: Vec<Transaction>,
}

impl SettlementViews {
    pub fn compute(ledger: &Ledger, config: &SettlementConfig) -> Self {
        let balances = compute_balances(ledger);
        let raw = raw_transactions(ledger);
        let net = net_pairwise(&raw, config);
        let settlement = settle(&balances, config);

        tracing::debug!(
            members = balances.len(),
            expenses = ledger.expenses().len(),
            raw = raw.len(),
            net = net.len(),
            settlement = settlement.len(),
            "settlement views computed"
        );

        Self {
            balances,
            raw,
            net,
            settlement,
        }
    }
}
