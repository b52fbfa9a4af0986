use serde::{Deserialize, Serialize};

use splitledger_ledger::Member;

/// A directed payment: `from` owes `to` the given amount.
///
/// `amount` is kept unrounded; render it with
/// [`SettlementConfig::format_amount`](crate::SettlementConfig::format_amount).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub from: Member,
    pub to: Member,
    pub amount: f64,
}

impl Transaction {
    pub fn new(from: Member, to: Member, amount: f64) -> Self {
        Self { from, to, amount }
    }

    /// True if this edge connects `a` and `b` in either direction.
    pub fn connects(&self, a: &Member, b: &Member) -> bool {
        (&self.from == a && &self.to == b) || (&self.from == b && &self.to == a)
    }
}
