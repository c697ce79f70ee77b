//! Adapters Layer - Hexagonal Architecture Outer Ring
//!
//! Implements the port traits defined in `crate::ports` with concrete
//! external dependencies. Each sub-module groups adapters by
//! infrastructure concern.
//!
//! Adapter categories:
//! - `solver`: intents solver relay JSON-RPC client (quotes)
//! - `paper`: dry-run signer with synthetic receipts

pub mod paper;
pub mod solver;
