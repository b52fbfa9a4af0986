use proptest::prelude::*;

use splitledger_api::{Script, SettlementReport, SplitBook};
use splitledger_settlement::Transaction;

fn book_with(members: &[&str]) -> SplitBook {
    let mut book = SplitBook::default();
    for m in members {
        book.add_member(m);
    }
    book
}

fn edges(transactions: &[Transaction]) -> Vec<(String, String, f64)> {
    transactions
        .iter()
        .map(|t| (t.from.to_string(), t.to.to_string(), t.amount))
        .collect()
}

fn edge(from: &str, to: &str, amount: f64) -> (String, String, f64) {
    (from.to_string(), to.to_string(), amount)
}

#[test]
fn three_way_dinner() {
    let mut book = book_with(&["A", "B", "C"]);
    book.add_expense("A", 90.0, &["A", "B", "C"]);

    let balances = book.balances();
    assert_eq!(balances.get("A"), Some(60.0));
    assert_eq!(balances.get("B"), Some(-30.0));
    assert_eq!(balances.get("C"), Some(-30.0));

    assert_eq!(
        edges(&book.raw_transactions()),
        [edge("B", "A", 30.0), edge("C", "A", 30.0)]
    );

    let mut settlement = edges(&book.optimized_settlement());
    settlement.sort_by(|a, b| a.0.cmp(&b.0));
    assert_eq!(settlement, [edge("B", "A", 30.0), edge("C", "A", 30.0)]);
}

#[test]
fn degenerate_split_credits_payer_without_fault() {
    let mut book = book_with(&["A", "B"]);
    book.add_expense("A", 100.0, &[]);

    let balances = book.balances();
    assert_eq!(balances.get("A"), Some(100.0));
    assert_eq!(balances.get("B"), Some(0.0));
    assert!(book.raw_transactions().is_empty());
    assert!(book.net_pairwise_transactions().is_empty());
    // Nobody owes anything, so nothing can be settled.
    assert!(book.optimized_settlement().is_empty());
}

#[test]
fn mutual_expenses_cancel_in_net_view() {
    let mut book = book_with(&["A", "B"]);
    book.add_expense("A", 100.0, &["A", "B"]);
    book.add_expense("B", 100.0, &["A", "B"]);

    assert!(book.balances().iter().all(|(_, b)| b.abs() < 1e-9));
    assert!(book.net_pairwise_transactions().is_empty());
    assert!(book.optimized_settlement().is_empty());

    let raw = book.raw_transactions();
    assert_eq!(raw.len(), 2);
    assert!(raw.iter().all(|t| t.amount > 0.0));
}

#[test]
fn removing_a_member_cascades_through_views() {
    let mut book = book_with(&["A", "B", "C"]);
    book.add_shared_expense("A", 90.0);
    book.add_shared_expense("B", 60.0);
    book.add_expense("C", 30.0, &["B"]);

    book.remove_member(1);

    let ledger = book.ledger();
    assert!(!ledger.contains_member("B"));
    assert_eq!(ledger.expenses().len(), 2);
    assert!(ledger.expenses().iter().all(|e| e.payer() != &"B"));

    let balances = book.balances();
    assert_eq!(balances.get("B"), None);
    assert_eq!(balances.len(), 2);
    // A's 90 is now split between A and C; C's 30 has nobody left to share it.
    assert_eq!(balances.get("A"), Some(45.0));
    assert_eq!(balances.get("C"), Some(-15.0));
    assert!(book.raw_transactions().iter().all(|t| t.from != "B" && t.to != "B"));
}

#[test]
fn float_residue_does_not_leak_into_the_settlement() {
    let mut book = book_with(&["A", "B", "C", "D"]);
    book.add_expense("A", 0.1, &["A", "B", "D", "C"]);
    book.add_expense("B", 0.1, &["A", "D", "C", "B"]);

    let settlement = edges(&book.optimized_settlement());
    assert_eq!(settlement.len(), 2, "{settlement:?}");
    assert_eq!((settlement[0].0.as_str(), settlement[0].1.as_str()), ("C", "A"));
    assert_eq!((settlement[1].0.as_str(), settlement[1].1.as_str()), ("D", "B"));
    assert!(settlement.iter().all(|e| (e.2 - 0.05).abs() < 1e-12));
}

#[test]
fn later_members_do_not_join_earlier_splits() {
    let mut book = book_with(&["A", "B"]);
    book.add_shared_expense("A", 50.0);
    book.add_member("C");

    assert_eq!(book.balances().get("C"), Some(0.0));
    assert_eq!(book.raw_transactions().len(), 1);
}

#[test]
fn script_drives_the_whole_pipeline() {
    let script = Script::from_json(
        r#"{"commands": [
            {"op": "add_member", "name": "Asha"},
            {"op": "add_member", "name": "Ben"},
            {"op": "add_member", "name": "Caro"},
            {"op": "add_expense", "payer": "Asha", "amount": 120},
            {"op": "add_expense", "payer": "Ben", "amount": 30, "participants": ["Ben", "Caro"]},
            {"op": "edit_expense_amount", "index": 1, "amount": 60},
            {"op": "add_expense", "payer": "Caro", "amount": 15},
            {"op": "remove_expense", "index": 2},
            {"op": "remove_member", "member": "Nobody"}
        ]}"#,
    )
    .unwrap();

    let mut book = SplitBook::default();
    let outcome = script.replay(&mut book);
    assert_eq!(outcome.accepted, 8);
    assert_eq!(outcome.rejected.len(), 1);
    assert_eq!(outcome.rejected[0].kind, "not_found");

    let report = SettlementReport::from_book(&book);
    let balances: Vec<(&str, &str)> = report
        .balances
        .iter()
        .map(|b| (b.member.as_str(), b.balance.as_str()))
        .collect();
    assert_eq!(balances, [("Asha", "80.00"), ("Ben", "-10.00"), ("Caro", "-70.00")]);

    let net: Vec<(&str, &str, &str)> = report
        .net_pairwise
        .iter()
        .map(|t| (t.from.as_str(), t.to.as_str(), t.amount.as_str()))
        .collect();
    assert_eq!(
        net,
        [("Ben", "Asha", "40.00"), ("Caro", "Ben", "30.00"), ("Caro", "Asha", "40.00")]
    );

    let settlement: Vec<(&str, &str, &str)> = report
        .optimized_settlement
        .iter()
        .map(|t| (t.from.as_str(), t.to.as_str(), t.amount.as_str()))
        .collect();
    assert_eq!(settlement, [("Ben", "Asha", "10.00"), ("Caro", "Asha", "70.00")]);
}

#[test]
fn report_serializes_to_json() {
    let mut book = book_with(&["A", "B"]);
    book.add_shared_expense("A", 10.0);

    let json = serde_json::to_value(SettlementReport::from_book(&book)).unwrap();
    assert_eq!(json["members"], serde_json::json!(["A", "B"]));
    assert_eq!(json["optimized_settlement"][0]["amount"], "5.00");
}

#[derive(Debug, Clone)]
struct ExpenseSpec {
    payer: usize,
    amount: f64,
    participants: Vec<usize>,
}

fn expense_spec(members: usize) -> impl Strategy<Value = ExpenseSpec> {
    (
        0..members,
        0.01f64..5_000.0,
        prop::collection::vec(0..members, 1..=members),
    )
        .prop_map(|(payer, amount, participants)| ExpenseSpec {
            payer,
            amount,
            participants,
        })
}

const NAMES: [&str; 6] = ["Ana", "Bo", "Cy", "Di", "Ed", "Fay"];

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        ..ProptestConfig::default()
    })]

    /// Balances always net to zero when every expense has participants, and
    /// applying the settlement brings everyone back to zero.
    #[test]
    fn settlement_round_trip(expenses in prop::collection::vec(expense_spec(NAMES.len()), 0..25)) {
        let mut book = book_with(&NAMES);
        for e in &expenses {
            let participants: Vec<&str> = e.participants.iter().map(|&i| NAMES[i]).collect();
            book.add_expense(NAMES[e.payer], e.amount, &participants);
        }

        let balances = book.balances();
        prop_assert!(balances.total().abs() < 1e-6);

        let mut after: Vec<(String, f64)> = balances.iter().map(|(m, b)| (m.to_string(), b)).collect();
        for t in book.optimized_settlement() {
            for (name, b) in after.iter_mut() {
                if t.from == name.as_str() {
                    *b += t.amount;
                }
                if t.to == name.as_str() {
                    *b -= t.amount;
                }
            }
        }
        for (name, b) in &after {
            prop_assert!(b.abs() < 1e-6, "{} left with {}", name, b);
        }

        let net = book.net_pairwise_transactions();
        for (i, x) in net.iter().enumerate() {
            for y in &net[i + 1..] {
                prop_assert!(!x.connects(&y.from, &y.to));
            }
        }
    }
}
