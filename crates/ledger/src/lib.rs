//! Ledger module (members + expenses of one group, command-driven).
//!
//! Pure domain logic only: no IO, no logging setup, no persistence concerns.

pub mod expense;
pub mod ledger;
pub mod member;

pub use expense::Expense;
pub use ledger::{
    AddExpense, AddMember, EditExpenseAmount, ExpenseAdded, ExpenseAmountEdited, ExpenseRemoved,
    Ledger, LedgerCommand, LedgerEvent, MemberAdded, MemberRemoved, MemberSelector,
    RemoveExpense, RemoveMember,
};
pub use member::Member;
