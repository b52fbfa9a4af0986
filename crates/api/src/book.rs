//! `SplitBook`: the facade handed to presentation-layer collaborators.
//!
//! Mutating methods never fail from the caller's point of view: invalid input
//! and out-of-range indices are logged and ignored, leaving the ledger
//! untouched. Use [`SplitBook::execute`] to observe the rejection instead.

use splitledger_core::{Aggregate, AggregateRoot, DomainResult, GroupId};
use splitledger_ledger::{
    AddExpense, AddMember, EditExpenseAmount, Ledger, LedgerCommand, LedgerEvent, MemberSelector,
    RemoveExpense, RemoveMember,
};
use splitledger_settlement::{
    Balances, SettlementConfig, SettlementViews, Transaction, compute_balances, net_pairwise,
    raw_transactions, settle,
};

/// One group's ledger plus the settings used to derive its views.
#[derive(Debug, Clone)]
pub struct SplitBook {
    ledger: Ledger,
    config: SettlementConfig,
}

impl SplitBook {
    pub fn new(config: SettlementConfig) -> Self {
        Self::with_ledger(Ledger::empty(GroupId::new()), config)
    }

    pub fn with_ledger(ledger: Ledger, config: SettlementConfig) -> Self {
        Self { ledger, config }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn config(&self) -> &SettlementConfig {
        &self.config
    }

    /// Number of accepted commands so far.
    pub fn revision(&self) -> u64 {
        self.ledger.version()
    }

    /// Run a command, returning the rejection if it is invalid.
    pub fn execute(&mut self, command: &LedgerCommand) -> DomainResult<()> {
        let events = self.ledger.execute(command).inspect_err(|err| {
            tracing::debug!(
                group = %self.ledger.id_typed(),
                op = command.op(),
                kind = err.kind(),
                error = %err,
                "command rejected"
            );
        })?;

        for event in &events {
            if let LedgerEvent::MemberRemoved(e) = event {
                if e.emptied_splits > 0 {
                    tracing::warn!(
                        member = %e.member,
                        emptied_splits = e.emptied_splits,
                        "member removal left expenses without participants"
                    );
                }
            }
            tracing::debug!(
                group = %self.ledger.id_typed(),
                event_type = event.event_type(),
                revision = self.ledger.version(),
                "command applied"
            );
        }
        Ok(())
    }

    fn submit(&mut self, command: LedgerCommand) {
        // Rejections are already logged by `execute`.
        let _ = self.execute(&command);
    }

    pub fn add_member(&mut self, name: &str) {
        self.submit(LedgerCommand::AddMember(AddMember { name: name.to_string() }));
    }

    pub fn remove_member(&mut self, index: usize) {
        self.submit(LedgerCommand::RemoveMember(RemoveMember {
            member: MemberSelector::Index(index),
        }));
    }

    pub fn remove_member_named(&mut self, name: &str) {
        self.submit(LedgerCommand::RemoveMember(RemoveMember {
            member: MemberSelector::Name(name.to_string()),
        }));
    }

    /// Record an expense split among exactly `participants` (possibly nobody).
    pub fn add_expense(&mut self, payer: &str, amount: f64, participants: &[&str]) {
        self.submit(LedgerCommand::AddExpense(AddExpense {
            payer: payer.to_string(),
            amount,
            participants: Some(participants.iter().map(|p| p.to_string()).collect()),
        }));
    }

    /// Record an expense split among every current member.
    pub fn add_shared_expense(&mut self, payer: &str, amount: f64) {
        self.submit(LedgerCommand::AddExpense(AddExpense {
            payer: payer.to_string(),
            amount,
            participants: None,
        }));
    }

    pub fn edit_expense_amount(&mut self, index: usize, new_amount: f64) {
        self.submit(LedgerCommand::EditExpenseAmount(EditExpenseAmount {
            index,
            amount: new_amount,
        }));
    }

    pub fn remove_expense(&mut self, index: usize) {
        self.submit(LedgerCommand::RemoveExpense(RemoveExpense { index }));
    }

    pub fn balances(&self) -> Balances {
        compute_balances(&self.ledger)
    }

    pub fn raw_transactions(&self) -> Vec<Transaction> {
        raw_transactions(&self.ledger)
    }

    pub fn net_pairwise_transactions(&self) -> Vec<Transaction> {
        net_pairwise(&raw_transactions(&self.ledger), &self.config)
    }

    pub fn optimized_settlement(&self) -> Vec<Transaction> {
        settle(&compute_balances(&self.ledger), &self.config)
    }

    /// All four views at once, from the same ledger snapshot.
    pub fn views(&self) -> SettlementViews {
        SettlementViews::compute(&self.ledger, &self.config)
    }
}

impl Default for SplitBook {
    fn default() -> Self {
        Self::new(SettlementConfig::default())
    }
}
