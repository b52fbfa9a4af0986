//! Balance calculator.

use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use splitledger_ledger::{Ledger, Member};

/// Net balance per member, in ledger member order.
///
/// Positive: the member is owed money. Negative: the member owes money.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Balances {
    entries: Vec<(Member, f64)>,
}

impl Balances {
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries.iter().find(|(m, _)| m == name).map(|(_, b)| *b)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Member, f64)> {
        self.entries.iter().map(|(m, b)| (m, *b))
    }

    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.entries.iter().map(|(m, _)| m)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all balances. Zero (up to rounding) unless a degenerate split exists.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, b)| b).sum()
    }
}

impl FromIterator<(Member, f64)> for Balances {
    fn from_iter<I: IntoIterator<Item = (Member, f64)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Balances {
    type Item = (Member, f64);
    type IntoIter = std::vec::IntoIter<(Member, f64)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for Balances {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (member, balance) in &self.entries {
            map.serialize_entry(member, balance)?;
        }
        map.end()
    }
}

/// Compute every current member's balance.
///
/// Each expense credits its payer with the full amount and debits each
/// participant one equal share. An expense without participants credits the
/// payer and debits nobody.
pub fn compute_balances(ledger: &Ledger) -> Balances {
    let mut entries: Vec<(Member, f64)> = ledger.members().iter().map(|m| (m.clone(), 0.0)).collect();
    let index: HashMap<&Member, usize> = ledger.members().iter().enumerate().map(|(i, m)| (m, i)).collect();

    for (position, expense) in ledger.expenses().iter().enumerate() {
        let amount = expense.amount().value();
        if let Some(&payer) = index.get(expense.payer()) {
            entries[payer].1 += amount;
        }

        match expense.share() {
            Some(share) => {
                for participant in expense.participants() {
                    if let Some(&p) = index.get(participant) {
                        entries[p].1 -= share;
                    }
                }
            }
            None => {
                tracing::warn!(
                    expense = position,
                    payer = %expense.payer(),
                    amount,
                    "expense has no participants; crediting payer without debits"
                );
            }
        }
    }

    tracing::trace!(members = entries.len(), "balances computed");
    Balances { entries }
}
