//! Net pairwise reducer.

use std::collections::HashMap;

use splitledger_ledger::Member;

use crate::config::SettlementConfig;
use crate::transaction::Transaction;

/// Collapse raw debt edges into at most one edge per unordered member pair.
///
/// Members are ordered by first appearance in `raw` (`from` before `to`
/// within an edge). For every pair `A` before `B`, the accumulated `A→B` and
/// `B→A` totals cancel and the difference is emitted in the direction of the
/// larger side. Pairs whose totals match within tolerance emit nothing.
pub fn net_pairwise(raw: &[Transaction], config: &SettlementConfig) -> Vec<Transaction> {
    let mut people: Vec<&Member> = Vec::new();
    let mut position: HashMap<&Member, usize> = HashMap::new();
    let mut totals: HashMap<(usize, usize), f64> = HashMap::new();

    for edge in raw {
        let from = *position.entry(&edge.from).or_insert_with(|| {
            people.push(&edge.from);
            people.len() - 1
        });
        let to = *position.entry(&edge.to).or_insert_with(|| {
            people.push(&edge.to);
            people.len() - 1
        });
        *totals.entry((from, to)).or_insert(0.0) += edge.amount;
    }

    let mut net = Vec::new();
    for a in 0..people.len() {
        for b in (a + 1)..people.len() {
            let a_to_b = totals.get(&(a, b)).copied().unwrap_or(0.0);
            let b_to_a = totals.get(&(b, a)).copied().unwrap_or(0.0);
            let diff = a_to_b - b_to_a;

            if config.is_zero(diff) {
                continue;
            }
            if diff > 0.0 {
                net.push(Transaction::new(people[a].clone(), people[b].clone(), diff));
            } else {
                net.push(Transaction::new(people[b].clone(), people[a].clone(), -diff));
            }
        }
    }

    tracing::trace!(raw = raw.len(), net = net.len(), "net pairwise transactions reduced");
    net
}
