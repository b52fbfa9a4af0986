//! Raw transaction deriver.

use splitledger_ledger::Ledger;

use crate::transaction::Transaction;

/// Expand every expense into per-participant debt edges.
///
/// Each participant other than the payer owes the payer one share. Emission
/// order is expense order, then participant order. A payer who also
/// participates owes nothing to themself, and a participant-less expense
/// produces no edges.
pub fn raw_transactions(ledger: &Ledger) -> Vec<Transaction> {
    let mut raw = Vec::new();

    for expense in ledger.expenses() {
        let Some(share) = expense.share() else {
            continue;
        };
        for participant in expense.participants() {
            if participant != expense.payer() {
                raw.push(Transaction::new(participant.clone(), expense.payer().clone(), share));
            }
        }
    }

    tracing::trace!(edges = raw.len(), "raw transactions derived");
    raw
}
