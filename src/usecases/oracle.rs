//! Price Oracle - Quote Fetching and Selection
//!
//! Thin use-case adapter over the `QuoteService` port. For each poll
//! it resolves the pair to solver asset identifiers, fetches the
//! current quote set, selects the best offer by output amount, and
//! derives the per-unit price the wait policy compares against.
//! Stateless per call; the per-request timeout lives in the transport
//! behind the port, so a stalled fetch surfaces as `Unavailable`
//! instead of blocking the monitor loop.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use tracing::debug;

use crate::domain::assets::AssetRegistry;
use crate::domain::swap::{Quote, SwapRequest};
use crate::ports::quote_service::{PairQuoteRequest, QuoteError, QuoteService, SolverQuote};

/// Oracle over the solver network's quote endpoint.
pub struct PriceOracle<Q: QuoteService> {
  quotes: Arc<Q>,
  registry: Arc<AssetRegistry>,
  /// Minimum quote validity requested from solvers (milliseconds).
  min_deadline_ms: u64,
}

impl<Q: QuoteService> PriceOracle<Q> {
  /// Create an oracle over a quote service and asset registry.
  pub fn new(quotes: Arc<Q>, registry: Arc<AssetRegistry>, min_deadline_ms: u64) -> Self {
    Self {
      quotes,
      registry,
      min_deadline_ms,
    }
  }

  /// Fetch a fresh quote for the request's pair.
  pub async fn fetch(&self, request: &SwapRequest) -> Result<Quote, QuoteError> {
    let invalid_pair = || QuoteError::InvalidPair {
      token_in: request.token_in.clone(),
      token_out: request.token_out.clone(),
    };

    let asset_in = self
      .registry
      .asset_id(&request.token_in, self.registry.native_chain())
      .map_err(|_| invalid_pair())?;
    let asset_out = self
      .registry
      .asset_id(&request.token_out, &request.chain_out)
      .map_err(|_| invalid_pair())?;
    let exact_amount_in = self
      .registry
      .to_atomic(&request.token_in, request.amount_in)
      .map_err(|_| invalid_pair())?;

    let pair_request = PairQuoteRequest {
      asset_in,
      exact_amount_in,
      asset_out,
      min_deadline_ms: self.min_deadline_ms,
    };

    let offers = self.quotes.fetch_quotes(&pair_request).await?;
    let best = select_best(&offers)
      .ok_or_else(|| QuoteError::Unavailable("no usable quote in relay response".to_string()))?;

    let amount_out = self
      .registry
      .from_atomic(&request.token_out, &best.amount_out)
      .map_err(|e| QuoteError::Unavailable(format!("quote carried malformed amount: {e}")))?;

    let price = amount_out
      .checked_div(request.amount_in)
      .ok_or_else(|| QuoteError::Unavailable("quote implies undefined price".to_string()))?;

    debug!(
      offers = offers.len(),
      quote_hash = %best.quote_hash,
      price = %price,
      amount_out = %amount_out,
      "Best quote selected"
    );

    Ok(Quote {
      token_in: request.token_in.clone(),
      token_out: request.token_out.clone(),
      price,
      amount_out,
      quote_hash: best.quote_hash.clone(),
      timestamp: Utc::now(),
      expiry: best.expiration_time.and_then(parse_expiry),
    })
  }
}

/// Pick the offer maximizing output amount; ties keep the earliest.
fn select_best(offers: &[SolverQuote]) -> Option<&SolverQuote> {
  offers
    .iter()
    .filter_map(|q| q.amount_out.parse::<u128>().ok().map(|amount| (q, amount)))
    .fold(None, |best, (q, amount)| match best {
      Some((_, best_amount)) if amount <= best_amount => best,
      _ => Some((q, amount)),
    })
    .map(|(q, _)| q)
}

fn parse_expiry(secs: i64) -> Option<DateTime<Utc>> {
  Utc.timestamp_opt(secs, 0).single()
}

#[cfg(test)]
mod tests {
  use super::*;
  use async_trait::async_trait;
  use rust_decimal_macros::dec;

  use crate::domain::assets::{AssetInfo, ChainInfo, ChainKind};

  struct FixedQuotes(Vec<SolverQuote>);

  #[async_trait]
  impl QuoteService for FixedQuotes {
    async fn fetch_quotes(
      &self,
      _request: &PairQuoteRequest,
    ) -> Result<Vec<SolverQuote>, QuoteError> {
      Ok(self.0.clone())
    }
  }

  fn registry() -> Arc<AssetRegistry> {
    Arc::new(AssetRegistry::new(
      vec![
        AssetInfo {
          symbol: "NEAR".to_string(),
          token_id: "wrap.near".to_string(),
          omft: None,
          decimals: 24,
          chains: vec!["near".to_string()],
        },
        AssetInfo {
          symbol: "USDC".to_string(),
          token_id: "usdc.token.near".to_string(),
          omft: None,
          decimals: 6,
          chains: vec!["near".to_string()],
        },
      ],
      vec![ChainInfo {
        id: "near".to_string(),
        name: "NEAR Protocol".to_string(),
        kind: ChainKind::Near,
        enabled: true,
      }],
      "near".to_string(),
    ))
  }

  fn offer(hash: &str, amount_out: &str) -> SolverQuote {
    SolverQuote {
      quote_hash: hash.to_string(),
      asset_in: "nep141:wrap.near".to_string(),
      asset_out: "nep141:usdc.token.near".to_string(),
      amount_in: "100000000000000000000000000".to_string(),
      amount_out: amount_out.to_string(),
      expiration_time: None,
    }
  }

  #[tokio::test]
  async fn test_fetch_selects_best_offer_and_derives_price() {
    let quotes = Arc::new(FixedQuotes(vec![
      offer("low", "340000000"),
      offer("high", "350000000"),
      offer("mid", "345000000"),
    ]));
    let oracle = PriceOracle::new(quotes, registry(), 120_000);
    let request = SwapRequest::new("NEAR", dec!(100), "USDC", "near");

    let quote = oracle.fetch(&request).await.unwrap();
    assert_eq!(quote.quote_hash, "high");
    assert_eq!(quote.amount_out, dec!(350));
    assert_eq!(quote.price, dec!(3.5));
  }

  #[tokio::test]
  async fn test_fetch_rejects_unknown_pair_before_network() {
    let quotes = Arc::new(FixedQuotes(vec![offer("q", "1")]));
    let oracle = PriceOracle::new(quotes, registry(), 120_000);
    let request = SwapRequest::new("DOGE", dec!(1), "USDC", "near");

    assert!(matches!(
      oracle.fetch(&request).await,
      Err(QuoteError::InvalidPair { .. })
    ));
  }

  #[test]
  fn test_select_best_skips_malformed_amounts() {
    let offers = vec![offer("bad", "not-a-number"), offer("good", "10")];
    assert_eq!(select_best(&offers).unwrap().quote_hash, "good");
  }
}
