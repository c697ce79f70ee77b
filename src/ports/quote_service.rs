//! Quote Service Port - Solver-Bus Quoting Interface
//!
//! Defines the trait for fetching swap quotes from the intents
//! solver network, keyed by a (token_in, token_out) pair expressed
//! as solver asset identifiers. The transport itself (JSON-RPC,
//! retries, rate limits) lives behind this boundary.

use async_trait::async_trait;

use crate::domain::swap::SwapError;

/// Failure modes of a quote fetch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuoteError {
  /// The solver bus could not be reached, timed out, or returned
  /// garbage. Transient: the monitor retries these.
  #[error("quote service unavailable: {0}")]
  Unavailable(String),

  /// The solver bus throttled us. Transient.
  #[error("quote service rate limited")]
  RateLimited,

  /// The pair is unknown to the solver network. Permanent.
  #[error("invalid pair: {token_in} -> {token_out}")]
  InvalidPair { token_in: String, token_out: String },
}

impl QuoteError {
  /// Whether the monitor should retry this failure locally.
  pub fn is_transient(&self) -> bool {
    matches!(self, Self::Unavailable(_) | Self::RateLimited)
  }
}

impl From<QuoteError> for SwapError {
  fn from(err: QuoteError) -> Self {
    match err {
      QuoteError::Unavailable(msg) => Self::OracleUnavailable(msg),
      QuoteError::RateLimited => Self::RateLimited,
      QuoteError::InvalidPair { token_in, token_out } => {
        Self::InvalidPair { token_in, token_out }
      }
    }
  }
}

/// A quote request as the solver network understands it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairQuoteRequest {
  /// Solver asset identifier of the input leg.
  pub asset_in: String,
  /// Exact input amount in atomic units.
  pub exact_amount_in: String,
  /// Solver asset identifier of the output leg.
  pub asset_out: String,
  /// Minimum quote validity the solvers must offer (milliseconds).
  pub min_deadline_ms: u64,
}

/// A single solver quote, as returned by the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverQuote {
  /// Solver-assigned hash, echoed back when publishing the intent.
  pub quote_hash: String,
  /// Asset identifier of the input leg.
  pub asset_in: String,
  /// Asset identifier of the output leg.
  pub asset_out: String,
  /// Input amount in atomic units.
  pub amount_in: String,
  /// Offered output amount in atomic units.
  pub amount_out: String,
  /// Quote expiry as a Unix timestamp in seconds, if the solver set one.
  pub expiration_time: Option<i64>,
}

/// Trait for quote providers.
///
/// Implementors talk to the solver bus (or a simulation of it) and
/// return every quote the network offered for the pair. Selection of
/// the best quote is the oracle's job, not the transport's.
///
/// Must be safely shareable across concurrently running
/// orchestrations.
#[async_trait]
pub trait QuoteService: Send + Sync + 'static {
  /// Fetch current quotes for a pair.
  ///
  /// An empty result means no solver is currently quoting the pair;
  /// implementors should surface that as `Unavailable` so the
  /// monitor's retry policy applies.
  async fn fetch_quotes(
    &self,
    request: &PairQuoteRequest,
  ) -> Result<Vec<SolverQuote>, QuoteError>;
}
