//! Display-ready snapshot of a book: members, expenses and every derived view.
//!
//! This is the only place amounts are rounded.

use std::fmt::Write as _;

use serde::Serialize;

use splitledger_settlement::{SettlementConfig, Transaction};

use crate::book::SplitBook;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpenseLine {
    pub payer: String,
    pub amount: String,
    pub participants: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceLine {
    pub member: String,
    pub balance: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionLine {
    pub from: String,
    pub to: String,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettlementReport {
    pub members: Vec<String>,
    pub expenses: Vec<ExpenseLine>,
    pub balances: Vec<BalanceLine>,
    pub raw_transactions: Vec<TransactionLine>,
    pub net_pairwise: Vec<TransactionLine>,
    pub optimized_settlement: Vec<TransactionLine>,
}

impl SettlementReport {
    pub fn from_book(book: &SplitBook) -> Self {
        let config = book.config();
        let ledger = book.ledger();
        let views = book.views();

        Self {
            members: ledger.members().iter().map(|m| m.to_string()).collect(),
            expenses: ledger
                .expenses()
                .iter()
                .map(|e| ExpenseLine {
                    payer: e.payer().to_string(),
                    amount: config.format_amount(e.amount().value()),
                    participants: e.participants().iter().map(|p| p.to_string()).collect(),
                })
                .collect(),
            balances: views
                .balances
                .iter()
                .map(|(member, balance)| BalanceLine {
                    member: member.to_string(),
                    balance: format_signed(config, balance),
                })
                .collect(),
            raw_transactions: lines(config, &views.raw),
            net_pairwise: lines(config, &views.net),
            optimized_settlement: lines(config, &views.settlement),
        }
    }

    /// Plain-text rendering, one section per view.
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        section(&mut out, "Members", self.members.iter().cloned());
        section(
            &mut out,
            "Expenses",
            self.expenses.iter().map(|e| {
                format!("{} paid {} (split: {})", e.payer, e.amount, e.participants.join(", "))
            }),
        );
        section(
            &mut out,
            "Balances",
            self.balances.iter().map(|b| format!("{}: {}", b.member, b.balance)),
        );
        section(&mut out, "Raw Transactions", transaction_texts(&self.raw_transactions));
        section(&mut out, "Pairwise Net", transaction_texts(&self.net_pairwise));
        section(&mut out, "Optimized Settlement", transaction_texts(&self.optimized_settlement));

        out
    }
}

/// Balances within tolerance of zero print as zero, never "-0.00".
fn format_signed(config: &SettlementConfig, value: f64) -> String {
    if config.is_zero(value) {
        config.format_amount(0.0)
    } else {
        config.format_amount(value)
    }
}

fn lines(config: &SettlementConfig, transactions: &[Transaction]) -> Vec<TransactionLine> {
    transactions
        .iter()
        .map(|t| TransactionLine {
            from: t.from.to_string(),
            to: t.to.to_string(),
            amount: config.format_amount(t.amount),
        })
        .collect()
}

fn transaction_texts(lines: &[TransactionLine]) -> impl Iterator<Item = String> + '_ {
    lines.iter().map(|t| format!("{} -> {} {}", t.from, t.to, t.amount))
}

fn section(out: &mut String, title: &str, items: impl Iterator<Item = String>) {
    let _ = writeln!(out, "{title}");
    let mut empty = true;
    for item in items {
        empty = false;
        let _ = writeln!(out, "  {item}");
    }
    if empty {
        let _ = writeln!(out, "  (none)");
    }
    out.push('\n');
}
