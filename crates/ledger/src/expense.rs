use serde::{Deserialize, Serialize};

use splitledger_core::Amount;

use crate::member::Member;

/// One recorded payment, split equally among its participants.
///
/// `participants` is a snapshot taken when the expense was recorded; later
/// membership changes only touch it through the member-removal cascade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    payer: Member,
    amount: Amount,
    participants: Vec<Member>,
}

impl Expense {
    /// Build an expense. Duplicate participants collapse to their first occurrence.
    pub fn new(payer: Member, amount: Amount, participants: Vec<Member>) -> Self {
        let mut unique: Vec<Member> = Vec::with_capacity(participants.len());
        for p in participants {
            if !unique.contains(&p) {
                unique.push(p);
            }
        }
        Self {
            payer,
            amount,
            participants: unique,
        }
    }

    pub fn payer(&self) -> &Member {
        &self.payer
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn participants(&self) -> &[Member] {
        &self.participants
    }

    /// Per-head share, or `None` for a degenerate (participant-less) split.
    pub fn share(&self) -> Option<f64> {
        self.amount.share(self.participants.len())
    }

    /// True when nobody is left to share this expense.
    pub fn is_degenerate(&self) -> bool {
        self.participants.is_empty()
    }

    pub(crate) fn set_amount(&mut self, amount: Amount) {
        self.amount = amount;
    }

    /// Drop `member` from the split. Returns whether anything changed.
    pub(crate) fn strip_participant(&mut self, member: &Member) -> bool {
        let before = self.participants.len();
        self.participants.retain(|p| p != member);
        before != self.participants.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(name: &str) -> Member {
        Member::parse(name).unwrap()
    }

    #[test]
    fn duplicate_participants_collapse() {
        let e = Expense::new(
            m("A"),
            Amount::new(30.0).unwrap(),
            vec![m("A"), m("B"), m("A"), m("C")],
        );
        assert_eq!(e.participants(), &[m("A"), m("B"), m("C")]);
        assert_eq!(e.share(), Some(10.0));
    }

    #[test]
    fn stripping_last_participant_leaves_degenerate_split() {
        let mut e = Expense::new(m("A"), Amount::new(30.0).unwrap(), vec![m("B")]);
        assert!(e.strip_participant(&m("B")));
        assert!(!e.strip_participant(&m("B")));
        assert!(e.is_degenerate());
        assert_eq!(e.share(), None);
    }
}
