//! Command scripts: a JSON list of ledger commands replayed against a book.
//!
//! Accepted shapes:
//!
//! ```json
//! [{"op": "add_member", "name": "Asha"}, ...]
//! {"commands": [{"op": "add_member", "name": "Asha"}, ...]}
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use splitledger_ledger::LedgerCommand;

use crate::book::SplitBook;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to parse script: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct WrappedScript {
    commands: Vec<LedgerCommand>,
}

/// An ordered list of commands.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Script {
    commands: Vec<LedgerCommand>,
}

/// A command the ledger refused during replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    /// Zero-based position of the command in the script.
    pub position: usize,
    pub op: &'static str,
    pub kind: &'static str,
    pub message: String,
}

/// Summary of one replay.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ReplayOutcome {
    pub accepted: usize,
    pub rejected: Vec<Rejection>,
}

impl ReplayOutcome {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

impl Script {
    /// Parse either accepted shape.
    ///
    /// The top-level JSON type picks the shape before any command is decoded,
    /// so errors keep the line and column of the offending command.
    pub fn from_json(input: &str) -> Result<Self, ScriptError> {
        let commands = if input.trim_start().starts_with('[') {
            serde_json::from_str::<Vec<LedgerCommand>>(input)?
        } else {
            serde_json::from_str::<WrappedScript>(input)?.commands
        };
        Ok(Self { commands })
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Apply every command in order. Rejected commands are recorded and skipped.
    pub fn replay(&self, book: &mut SplitBook) -> ReplayOutcome {
        let mut outcome = ReplayOutcome::default();

        for (position, command) in self.commands.iter().enumerate() {
            match book.execute(command) {
                Ok(()) => outcome.accepted += 1,
                Err(err) => outcome.rejected.push(Rejection {
                    position,
                    op: command.op(),
                    kind: err.kind(),
                    message: err.to_string(),
                }),
            }
        }

        tracing::info!(
            commands = self.commands.len(),
            accepted = outcome.accepted,
            rejected = outcome.rejected.len(),
            "script replayed"
        );
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bare_and_wrapped_documents() {
        let bare = Script::from_json(r#"[{"op":"add_member","name":"A"}]"#).unwrap();
        let wrapped = Script::from_json(r#"{"commands":[{"op":"add_member","name":"A"}]}"#).unwrap();
        assert_eq!(bare, wrapped);
        assert_eq!(bare.len(), 1);
    }

    #[test]
    fn unknown_op_is_a_parse_error() {
        let err = Script::from_json(r#"[{"op":"teleport"}]"#).unwrap_err();
        assert!(matches!(err, ScriptError::Parse(_)));
    }

    #[test]
    fn parse_errors_point_at_the_bad_command() {
        let err = Script::from_json(
            "[\n  {\"op\":\"add_member\",\"name\":\"A\"},\n  {\"op\":\"add_expense\",\"payer\":\"A\"}\n]",
        )
        .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("missing field `amount`"), "{message}");
        assert!(message.contains("line 3"), "{message}");

        let err = Script::from_json("{\"commands\": [\n  {\"op\":\"teleport\"}\n]}").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("teleport"), "{message}");
        assert!(message.contains("line 2"), "{message}");
    }

    #[test]
    fn replay_records_rejections_and_continues() {
        let script = Script::from_json(
            r#"[
                {"op":"add_member","name":"A"},
                {"op":"add_member","name":"A"},
                {"op":"add_expense","payer":"A","amount":0},
                {"op":"remove_expense","index":3},
                {"op":"add_member","name":"B"},
                {"op":"add_expense","payer":"A","amount":10}
            ]"#,
        )
        .unwrap();

        let mut book = SplitBook::default();
        let outcome = script.replay(&mut book);

        assert_eq!(outcome.accepted, 3);
        let positions: Vec<usize> = outcome.rejected.iter().map(|r| r.position).collect();
        assert_eq!(positions, [1, 2, 3]);
        assert_eq!(outcome.rejected[2].kind, "out_of_range");
        assert_eq!(outcome.rejected[1].op, "add_expense");
        assert_eq!(book.balances().get("B"), Some(-5.0));
    }
}
