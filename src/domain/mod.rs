//! Domain layer - Core business logic and models.
//!
//! This module contains the pure domain logic for the swap executor.
//! No external dependencies allowed here (hexagonal architecture inner ring).
//! All types are serializable and testable in isolation.

pub mod assets;
pub mod swap;
pub mod wait_policy;

// Re-export core types for convenience
pub use assets::{AssetError, AssetInfo, AssetRegistry, ChainInfo, ChainKind};
pub use swap::{
    ChainId, Quote, Stage, SwapError, SwapOutcome, SwapReceipt, SwapRequest,
    TokenSymbol, WithdrawalReceipt, WithdrawalRequest,
};
pub use wait_policy::{WaitDecision, WaitPolicy};
