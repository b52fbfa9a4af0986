//! Settlement optimizer (greedy two-pointer sweep).

use splitledger_ledger::Member;

use crate::balances::Balances;
use crate::config::SettlementConfig;
use crate::transaction::Transaction;

#[derive(Debug)]
struct Position<'a> {
    member: &'a Member,
    remaining: f64,
}

/// Produce payments that bring every balance to zero.
///
/// Debtors and creditors keep the balance order (no sorting by magnitude).
/// Each step pays `min(debtor, creditor)` and advances whichever side is
/// exhausted, so the result has at most `debtors + creditors - 1` entries.
/// This is a greedy sweep and is not guaranteed to be the minimum number of
/// payments.
///
/// Balances within tolerance of zero take no part, and a remainder counts as
/// exhausted once it falls within tolerance. Exact float equality would leave
/// rounding residue behind as spurious micro-payments.
pub fn settle(balances: &Balances, config: &SettlementConfig) -> Vec<Transaction> {
    let mut debtors: Vec<Position<'_>> = Vec::new();
    let mut creditors: Vec<Position<'_>> = Vec::new();

    for (member, balance) in balances.iter() {
        if config.is_zero(balance) {
            continue;
        }
        if balance < 0.0 {
            debtors.push(Position { member, remaining: -balance });
        } else {
            creditors.push(Position { member, remaining: balance });
        }
    }

    let mut payments = Vec::new();
    let (mut i, mut j) = (0, 0);

    while i < debtors.len() && j < creditors.len() {
        let pay = debtors[i].remaining.min(creditors[j].remaining);
        payments.push(Transaction::new(
            debtors[i].member.clone(),
            creditors[j].member.clone(),
            pay,
        ));

        debtors[i].remaining -= pay;
        creditors[j].remaining -= pay;

        if config.is_zero(debtors[i].remaining) {
            i += 1;
        }
        if config.is_zero(creditors[j].remaining) {
            j += 1;
        }
    }

    let leftover: f64 = debtors[i..]
        .iter()
        .chain(&creditors[j..])
        .map(|p| p.remaining)
        .sum();
    if !config.is_zero(leftover) {
        tracing::debug!(leftover, "balances did not net to zero; residue left unsettled");
    }

    tracing::trace!(
        debtors = debtors.len(),
        creditors = creditors.len(),
        payments = payments.len(),
        "settlement computed"
    );
    payments
}
