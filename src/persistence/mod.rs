//! Persistence module for storing successful scrape results
//!
//! The orchestrator only depends on the `Persistence` trait; this module also
//! ships a JSON Lines sink for file-based runs.

mod jsonl;
mod traits;

pub use jsonl::JsonLinesPersistence;
pub use traits::{Persistence, PersistenceError, PersistenceResult, SaveReceipt};
