//! fundrecon-core: reconciles an authoritative fund registry against a
//! downstream tracking table and enriches the differences.
//!
//! Entry point: [`engine::reconcile`] or [`engine::ReconEngine`].

pub mod assemble;
pub mod classify;
pub mod config;
pub mod date;
pub mod diagnostic;
pub mod engine;
pub mod enrich;
pub mod error;
pub mod filter;
pub mod key;
pub mod lookup;
pub mod table;
pub mod types;

pub use assemble::{ReconOutput, RunSummary};
pub use config::ReconConfig;
pub use engine::{reconcile, ReconEngine, ReconInputs};
pub use error::{ReconError, ReconResult};
pub use table::Table;
