//! `splitledger-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the ledger and the
//! settlement engine (no IO, no logging setup).

pub mod aggregate;
pub mod error;
pub mod id;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot};
pub use error::{DomainError, DomainResult};
pub use id::GroupId;
pub use value_object::{Amount, ValueObject};
