//! Core swap domain types.
//!
//! Defines the business entities of a single swap orchestration: the
//! caller-owned request, ephemeral quotes, receipts, and the terminal
//! outcome. These types are the foundation of the hexagonal
//! architecture's inner ring.

use std::time::Duration;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ────────────────────────────────────────────
// Type aliases consumed by ports and adapters
// ────────────────────────────────────────────

/// Token symbol as used at the ports boundary (e.g. "NEAR", "USDC").
pub type TokenSymbol = String;

/// Chain identifier as used at the ports boundary (e.g. "near", "eth").
pub type ChainId = String;

// ────────────────────────────────────────────
// Error taxonomy
// ────────────────────────────────────────────

/// Failure taxonomy for a swap orchestration.
///
/// Timeouts and cancellation are not errors: they are terminal
/// [`SwapOutcome`] variants of their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum SwapError {
    #[error("quote service unavailable: {0}")]
    OracleUnavailable(String),

    #[error("quote service rate limited")]
    RateLimited,

    #[error("unsupported token pair: {token_in} -> {token_out}")]
    InvalidPair {
        token_in: TokenSymbol,
        token_out: TokenSymbol,
    },

    #[error("accepted quote expired before submission")]
    QuoteExpired,

    #[error("submission rejected: {0}")]
    SubmissionRejected(String),

    #[error("signer unavailable: {0}")]
    SignerUnavailable(String),

    #[error("unsupported destination: {0}")]
    UnsupportedDestination(String),

    #[error("invalid swap request: {0}")]
    InvalidRequest(String),
}

/// Orchestration stage at which a failure occurred.
///
/// Everything before `Execute` implies no funds moved; a failure at
/// `Withdraw` means the swap itself settled and only the withdrawal
/// is in an uncertain state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    Validate,
    Monitor,
    Execute,
    Withdraw,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validate => write!(f, "validate"),
            Self::Monitor => write!(f, "monitor"),
            Self::Execute => write!(f, "execute"),
            Self::Withdraw => write!(f, "withdraw"),
        }
    }
}

// ────────────────────────────────────────────
// Request
// ────────────────────────────────────────────

/// A caller-owned swap request, passed by value into the orchestrator.
///
/// When `min_price` is absent, monitoring is skipped and the first
/// quote is accepted immediately regardless of price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapRequest {
    /// Input token symbol.
    pub token_in: TokenSymbol,
    /// Amount of input token (human units, must be positive).
    pub amount_in: Decimal,
    /// Output token symbol.
    pub token_out: TokenSymbol,
    /// Chain on which the output token is quoted/settled.
    pub chain_out: ChainId,
    /// Minimum acceptable price in USD per unit of `token_in`.
    pub min_price: Option<Decimal>,
    /// Fixed spacing between successive quote polls.
    pub monitor_interval: Duration,
    /// Maximum total time to poll before giving up.
    pub max_wait_time: Duration,
    /// Destination chain for the post-swap withdrawal.
    pub destination_chain: Option<ChainId>,
    /// Destination address for the post-swap withdrawal.
    pub destination_address: Option<String>,
}

impl SwapRequest {
    /// Create a request with monitoring disabled (first quote wins)
    /// and no withdrawal.
    pub fn new(
        token_in: impl Into<TokenSymbol>,
        amount_in: Decimal,
        token_out: impl Into<TokenSymbol>,
        chain_out: impl Into<ChainId>,
    ) -> Self {
        Self {
            token_in: token_in.into(),
            amount_in,
            token_out: token_out.into(),
            chain_out: chain_out.into(),
            min_price: None,
            monitor_interval: Duration::from_secs(5),
            max_wait_time: Duration::from_secs(300),
            destination_chain: None,
            destination_address: None,
        }
    }

    /// Derive the withdrawal step implied by this request, if any.
    ///
    /// A withdrawal is requested when the caller named a destination
    /// (chain or address), or when `chain_out` differs from the
    /// account's native holding chain. Returns `None` when the swap
    /// settles on the native chain and no destination was supplied.
    pub fn withdrawal_request(&self, native_chain: &str) -> Option<WithdrawalRequest> {
        if let Some(chain) = &self.destination_chain {
            return Some(WithdrawalRequest {
                destination_chain: chain.clone(),
                destination_address: self.destination_address.clone(),
            });
        }
        if self.destination_address.is_some() || self.chain_out != native_chain {
            return Some(WithdrawalRequest {
                destination_chain: self.chain_out.clone(),
                destination_address: self.destination_address.clone(),
            });
        }
        None
    }

    /// Basic shape validation (amount, cadence). Registry-backed
    /// checks (token/pair/chain support) happen in the orchestrator.
    pub fn validate_shape(&self) -> Result<(), SwapError> {
        if self.amount_in <= Decimal::ZERO {
            return Err(SwapError::InvalidRequest(format!(
                "amount_in must be positive, got {}",
                self.amount_in
            )));
        }
        if self.monitor_interval.is_zero() {
            return Err(SwapError::InvalidRequest(
                "monitor_interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

// ────────────────────────────────────────────
// Quote
// ────────────────────────────────────────────

/// A solver quote for a token pair, immutable once produced.
///
/// Each poll yields a fresh `Quote`; superseded instances are
/// discarded by the monitor loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Input token symbol.
    pub token_in: TokenSymbol,
    /// Output token symbol.
    pub token_out: TokenSymbol,
    /// Price in USD per unit of `token_in`.
    pub price: Decimal,
    /// Quoted output amount (human units).
    pub amount_out: Decimal,
    /// Solver-assigned quote hash, echoed back on submission.
    pub quote_hash: String,
    /// When the quote was obtained.
    pub timestamp: DateTime<Utc>,
    /// Solver-side expiry; acting after this point is rejected.
    pub expiry: Option<DateTime<Utc>>,
}

impl Quote {
    /// Whether the quote price clears the given minimum.
    pub fn clears(&self, min_price: Decimal) -> bool {
        self.price >= min_price
    }

    /// Whether the quote has expired as of `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiry.is_some_and(|deadline| now >= deadline)
    }
}

// ────────────────────────────────────────────
// Receipts and withdrawal
// ────────────────────────────────────────────

/// Receipt for a settled swap intent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapReceipt {
    /// Intent hash for cross-referencing with the withdrawal step.
    pub intent_hash: String,
    /// Settled output amount (human units).
    pub amount_out: Decimal,
    /// Output token symbol.
    pub token_out: TokenSymbol,
    /// Chain on which the swap settled.
    pub chain: ChainId,
    /// Submission timestamp.
    pub submitted_at: DateTime<Utc>,
}

/// Withdrawal parameters, created only after a swap succeeds.
///
/// An absent `destination_address` defaults to the caller's own
/// account on `destination_chain`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithdrawalRequest {
    pub destination_chain: ChainId,
    pub destination_address: Option<String>,
}

/// Receipt for a submitted withdrawal intent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithdrawalReceipt {
    /// Intent hash of the withdrawal.
    pub intent_hash: String,
    /// Chain the funds were routed to.
    pub destination_chain: ChainId,
    /// Effective destination address after defaulting.
    pub destination_address: String,
    /// Submission timestamp.
    pub submitted_at: DateTime<Utc>,
}

// ────────────────────────────────────────────
// Terminal outcome
// ────────────────────────────────────────────

/// Terminal result of one orchestration run, produced exactly once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SwapOutcome {
    /// Swap settled; withdrawal receipt present when one was requested
    /// and succeeded.
    Executed {
        swap: SwapReceipt,
        withdrawal: Option<WithdrawalReceipt>,
    },
    /// Wait budget exhausted before the price condition was met.
    TimedOut { last_quote: Option<Quote> },
    /// Cancellation signal observed before acceptance.
    Cancelled,
    /// A stage failed. `swap` is populated when the failure occurred
    /// after the swap itself settled (withdraw stage).
    Failed {
        stage: Stage,
        error: SwapError,
        swap: Option<SwapReceipt>,
    },
}

impl SwapOutcome {
    /// Whether any funds moved during this orchestration.
    pub fn funds_moved(&self) -> bool {
        match self {
            Self::Executed { .. } => true,
            Self::Failed { swap, .. } => swap.is_some(),
            Self::TimedOut { .. } | Self::Cancelled => false,
        }
    }
}

/// Generate a fresh client-side identifier for an orchestration run.
pub fn new_run_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn request() -> SwapRequest {
        SwapRequest::new("NEAR", dec!(100), "USDC", "near")
    }

    #[test]
    fn test_validate_rejects_non_positive_amount() {
        let mut req = request();
        req.amount_in = dec!(0);
        assert!(matches!(
            req.validate_shape(),
            Err(SwapError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let mut req = request();
        req.monitor_interval = Duration::ZERO;
        assert!(req.validate_shape().is_err());
    }

    #[test]
    fn test_no_withdrawal_on_native_chain_without_destination() {
        let req = request();
        assert!(req.withdrawal_request("near").is_none());
    }

    #[test]
    fn test_withdrawal_implied_by_foreign_chain_out() {
        let mut req = request();
        req.chain_out = "eth".to_string();
        let w = req.withdrawal_request("near").unwrap();
        assert_eq!(w.destination_chain, "eth");
        assert!(w.destination_address.is_none());
    }

    #[test]
    fn test_explicit_destination_chain_wins() {
        let mut req = request();
        req.destination_chain = Some("aurora".to_string());
        req.destination_address = Some("0xabc".to_string());
        let w = req.withdrawal_request("near").unwrap();
        assert_eq!(w.destination_chain, "aurora");
        assert_eq!(w.destination_address.as_deref(), Some("0xabc"));
    }

    #[test]
    fn test_quote_expiry() {
        let now = Utc::now();
        let quote = Quote {
            token_in: "NEAR".to_string(),
            token_out: "USDC".to_string(),
            price: dec!(3.5),
            amount_out: dec!(350),
            quote_hash: "q1".to_string(),
            timestamp: now,
            expiry: Some(now + chrono::Duration::seconds(60)),
        };
        assert!(!quote.is_expired_at(now));
        assert!(quote.is_expired_at(now + chrono::Duration::seconds(61)));

        let open_ended = Quote { expiry: None, ..quote };
        assert!(!open_ended.is_expired_at(now + chrono::Duration::days(365)));
    }

    #[test]
    fn test_funds_moved_classification() {
        let receipt = SwapReceipt {
            intent_hash: "h".to_string(),
            amount_out: dec!(350),
            token_out: "USDC".to_string(),
            chain: "near".to_string(),
            submitted_at: Utc::now(),
        };

        let executed = SwapOutcome::Executed {
            swap: receipt.clone(),
            withdrawal: None,
        };
        assert!(executed.funds_moved());

        let failed_withdraw = SwapOutcome::Failed {
            stage: Stage::Withdraw,
            error: SwapError::SubmissionRejected("solver refused".to_string()),
            swap: Some(receipt),
        };
        assert!(failed_withdraw.funds_moved());

        let failed_early = SwapOutcome::Failed {
            stage: Stage::Monitor,
            error: SwapError::OracleUnavailable("down".to_string()),
            swap: None,
        };
        assert!(!failed_early.funds_moved());
        assert!(!SwapOutcome::Cancelled.funds_moved());
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(format!("{}", Stage::Withdraw), "withdraw");
        assert_eq!(format!("{}", Stage::Validate), "validate");
    }
}
