//! Use Cases Layer - Application Business Logic
//!
//! Orchestrates domain logic with port interfaces to implement
//! the executor's core workflows. Each use case is a self-contained
//! business operation.
//!
//! Use cases:
//! - `PriceOracle`: quote fetching, best-offer selection, pricing
//! - `SwapMonitor`: price-conditioned polling state machine
//! - `SwapExecutor`: accepted quote submission
//! - `WithdrawalCoordinator`: post-swap fund routing
//! - `SwapOrchestrator`: full lifecycle sequencing

pub mod executor;
pub mod monitor;
pub mod oracle;
pub mod orchestrator;
pub mod withdrawal;
