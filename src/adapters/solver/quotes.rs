//! Solver Bus Quote Service - QuoteService Port Adapter
//!
//! Implements the `QuoteService` port over the shared relay client.
//! Transport failures are mapped onto the port's failure taxonomy so
//! the monitor's retry policy can distinguish transient from
//! permanent errors.

use async_trait::async_trait;
use tracing::debug;

use super::client::{SolverBusClient, SolverError};
use super::types::{QuoteRequestMessage, SolverQuoteMessage};
use crate::ports::quote_service::{PairQuoteRequest, QuoteError, QuoteService, SolverQuote};

/// JSON-RPC "invalid params" — the relay does not know the pair.
const RPC_INVALID_PARAMS: i64 = -32602;

/// Quote provider backed by the solver relay.
pub struct SolverBusQuoteService {
  client: SolverBusClient,
}

impl SolverBusQuoteService {
  /// Create a quote service over an existing relay client.
  pub fn new(client: SolverBusClient) -> Self {
    Self { client }
  }

  fn map_error(err: SolverError, request: &PairQuoteRequest) -> QuoteError {
    match err {
      SolverError::RateLimited => QuoteError::RateLimited,
      SolverError::Rpc { code, .. } if code == RPC_INVALID_PARAMS => QuoteError::InvalidPair {
        token_in: request.asset_in.clone(),
        token_out: request.asset_out.clone(),
      },
      SolverError::Timeout => QuoteError::Unavailable("relay request timed out".to_string()),
      other => QuoteError::Unavailable(other.to_string()),
    }
  }
}

#[async_trait]
impl QuoteService for SolverBusQuoteService {
  async fn fetch_quotes(
    &self,
    request: &PairQuoteRequest,
  ) -> Result<Vec<SolverQuote>, QuoteError> {
    let message = QuoteRequestMessage::from(request);

    // The relay returns null instead of [] when nothing is quoting.
    let quotes: Vec<SolverQuote> = self
      .client
      .call::<_, Vec<SolverQuoteMessage>>("quote", message)
      .await
      .map_err(|e| Self::map_error(e, request))?
      .unwrap_or_default()
      .into_iter()
      .map(SolverQuote::from)
      .collect();

    if quotes.is_empty() {
      return Err(QuoteError::Unavailable(
        "no solver is currently quoting the pair".to_string(),
      ));
    }

    debug!(
      asset_in = %request.asset_in,
      asset_out = %request.asset_out,
      count = quotes.len(),
      "Quotes received from relay"
    );

    Ok(quotes)
  }
}
