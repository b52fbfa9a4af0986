use serde::{Deserialize, Serialize};

use splitledger_core::{Aggregate, AggregateRoot, Amount, DomainError, GroupId};

use crate::expense::Expense;
use crate::member::Member;

/// Aggregate root: Ledger (members and expenses of one group).
///
/// Note: Ledger does NOT hold balances; balances and transactions are derived
/// views recomputed from the ledger on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    id: GroupId,
    members: Vec<Member>,
    expenses: Vec<Expense>,
    version: u64,
}

impl Ledger {
    /// Empty ledger: no members, no expenses.
    pub fn empty(id: GroupId) -> Self {
        Self {
            id,
            members: Vec::new(),
            expenses: Vec::new(),
            version: 0,
        }
    }

    pub fn id_typed(&self) -> GroupId {
        self.id
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn member_index(&self, name: &str) -> Option<usize> {
        self.members.iter().position(|m| m == name)
    }

    pub fn contains_member(&self, name: &str) -> bool {
        self.member_index(name).is_some()
    }
}

impl AggregateRoot for Ledger {
    type Id = GroupId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Which member a removal targets: by position or by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MemberSelector {
    Index(usize),
    Name(String),
}

/// Command: AddMember.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddMember {
    pub name: String,
}

/// Command: RemoveMember (cascades into expenses).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveMember {
    pub member: MemberSelector,
}

/// Command: AddExpense.
///
/// `participants: None` splits among every current member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddExpense {
    pub payer: String,
    pub amount: f64,
    #[serde(default)]
    pub participants: Option<Vec<String>>,
}

/// Command: EditExpenseAmount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditExpenseAmount {
    pub index: usize,
    pub amount: f64,
}

/// Command: RemoveExpense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveExpense {
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum LedgerCommand {
    AddMember(AddMember),
    RemoveMember(RemoveMember),
    AddExpense(AddExpense),
    EditExpenseAmount(EditExpenseAmount),
    RemoveExpense(RemoveExpense),
}

impl LedgerCommand {
    /// Wire name of the command (the `op` tag).
    pub fn op(&self) -> &'static str {
        match self {
            LedgerCommand::AddMember(_) => "add_member",
            LedgerCommand::RemoveMember(_) => "remove_member",
            LedgerCommand::AddExpense(_) => "add_expense",
            LedgerCommand::EditExpenseAmount(_) => "edit_expense_amount",
            LedgerCommand::RemoveExpense(_) => "remove_expense",
        }
    }
}

/// Event: MemberAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberAdded {
    pub member: Member,
}

/// Event: MemberRemoved.
///
/// Applying it drops the member, every expense they paid, and their seat in
/// every other expense's split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRemoved {
    pub member: Member,
    /// Expenses paid by the member (deleted by the cascade).
    pub dropped_expenses: usize,
    /// Expenses left with no participants once the member is stripped.
    pub emptied_splits: usize,
}

/// Event: ExpenseAdded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseAdded {
    pub expense: Expense,
}

/// Event: ExpenseAmountEdited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseAmountEdited {
    pub index: usize,
    pub amount: Amount,
}

/// Event: ExpenseRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRemoved {
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LedgerEvent {
    MemberAdded(MemberAdded),
    MemberRemoved(MemberRemoved),
    ExpenseAdded(ExpenseAdded),
    ExpenseAmountEdited(ExpenseAmountEdited),
    ExpenseRemoved(ExpenseRemoved),
}

impl LedgerEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            LedgerEvent::MemberAdded(_) => "ledger.member_added",
            LedgerEvent::MemberRemoved(_) => "ledger.member_removed",
            LedgerEvent::ExpenseAdded(_) => "ledger.expense_added",
            LedgerEvent::ExpenseAmountEdited(_) => "ledger.expense_amount_edited",
            LedgerEvent::ExpenseRemoved(_) => "ledger.expense_removed",
        }
    }
}

impl Aggregate for Ledger {
    type Command = LedgerCommand;
    type Event = LedgerEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            LedgerEvent::MemberAdded(e) => {
                self.members.push(e.member.clone());
            }
            LedgerEvent::MemberRemoved(e) => {
                self.members.retain(|m| m != &e.member);
                self.expenses.retain(|x| x.payer() != &e.member);
                for expense in &mut self.expenses {
                    expense.strip_participant(&e.member);
                }
            }
            LedgerEvent::ExpenseAdded(e) => {
                self.expenses.push(e.expense.clone());
            }
            LedgerEvent::ExpenseAmountEdited(e) => {
                if let Some(expense) = self.expenses.get_mut(e.index) {
                    expense.set_amount(e.amount);
                }
            }
            LedgerEvent::ExpenseRemoved(e) => {
                if e.index < self.expenses.len() {
                    self.expenses.remove(e.index);
                }
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            LedgerCommand::AddMember(cmd) => self.handle_add_member(cmd),
            LedgerCommand::RemoveMember(cmd) => self.handle_remove_member(cmd),
            LedgerCommand::AddExpense(cmd) => self.handle_add_expense(cmd),
            LedgerCommand::EditExpenseAmount(cmd) => self.handle_edit_amount(cmd),
            LedgerCommand::RemoveExpense(cmd) => self.handle_remove_expense(cmd),
        }
    }
}

impl Ledger {
    fn resolve_member(&self, name: &str) -> Result<Member, DomainError> {
        let member = Member::parse(name)?;
        if !self.members.contains(&member) {
            return Err(DomainError::not_found(format!("member '{member}'")));
        }
        Ok(member)
    }

    fn ensure_expense_index(&self, index: usize) -> Result<(), DomainError> {
        if index >= self.expenses.len() {
            return Err(DomainError::out_of_range(index, self.expenses.len()));
        }
        Ok(())
    }

    fn handle_add_member(&self, cmd: &AddMember) -> Result<Vec<LedgerEvent>, DomainError> {
        let member = Member::parse(&cmd.name)?;
        if self.members.contains(&member) {
            return Err(DomainError::invariant(format!("member '{member}' already exists")));
        }
        Ok(vec![LedgerEvent::MemberAdded(MemberAdded { member })])
    }

    fn handle_remove_member(&self, cmd: &RemoveMember) -> Result<Vec<LedgerEvent>, DomainError> {
        let member = match &cmd.member {
            MemberSelector::Index(index) => self
                .members
                .get(*index)
                .cloned()
                .ok_or_else(|| DomainError::out_of_range(*index, self.members.len()))?,
            MemberSelector::Name(name) => self.resolve_member(name)?,
        };

        let dropped_expenses = self.expenses.iter().filter(|e| e.payer() == &member).count();
        let emptied_splits = self
            .expenses
            .iter()
            .filter(|e| e.payer() != &member && e.participants() == [member.clone()])
            .count();

        Ok(vec![LedgerEvent::MemberRemoved(MemberRemoved {
            member,
            dropped_expenses,
            emptied_splits,
        })])
    }

    fn handle_add_expense(&self, cmd: &AddExpense) -> Result<Vec<LedgerEvent>, DomainError> {
        if cmd.payer.trim().is_empty() {
            return Err(DomainError::validation("payer must be set"));
        }
        let payer = self.resolve_member(&cmd.payer)?;
        let amount = Amount::new(cmd.amount)?;

        let participants = match &cmd.participants {
            None => self.members.clone(),
            Some(names) => names
                .iter()
                .map(|name| self.resolve_member(name))
                .collect::<Result<Vec<_>, _>>()?,
        };

        Ok(vec![LedgerEvent::ExpenseAdded(ExpenseAdded {
            expense: Expense::new(payer, amount, participants),
        })])
    }

    fn handle_edit_amount(&self, cmd: &EditExpenseAmount) -> Result<Vec<LedgerEvent>, DomainError> {
        self.ensure_expense_index(cmd.index)?;
        let amount = Amount::new(cmd.amount)?;
        Ok(vec![LedgerEvent::ExpenseAmountEdited(ExpenseAmountEdited {
            index: cmd.index,
            amount,
        })])
    }

    fn handle_remove_expense(&self, cmd: &RemoveExpense) -> Result<Vec<LedgerEvent>, DomainError> {
        self.ensure_expense_index(cmd.index)?;
        Ok(vec![LedgerEvent::ExpenseRemoved(ExpenseRemoved { index: cmd.index })])
    }
}
