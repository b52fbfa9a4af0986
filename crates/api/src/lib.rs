//! In-process API over the settlement engine: the [`SplitBook`] facade, command
//! scripts, reports and environment configuration.

pub mod book;
pub mod config;
pub mod report;
pub mod script;

pub use book::SplitBook;
pub use config::AppConfig;
pub use report::SettlementReport;
pub use script::{ReplayOutcome, Script, ScriptError};
