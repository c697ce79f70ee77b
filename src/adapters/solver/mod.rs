//! Solver Relay Adapter
//!
//! Implements quote fetching against the intents solver relay
//! (JSON-RPC over HTTPS). Handles transport concerns only: the relay
//! wire format, per-request timeouts, rate limiting, and bounded
//! transport retries.
//!
//! Sub-modules:
//! - `client`: rate-limited JSON-RPC client
//! - `quotes`: `QuoteService` port implementation
//! - `types`: relay wire types

pub mod client;
pub mod quotes;
pub mod types;
