//! Solver Bus Wire Types
//!
//! JSON-RPC envelope and quote message shapes for the solver relay.
//! Field names follow the relay's wire format verbatim.

use serde::{Deserialize, Serialize};

use crate::ports::quote_service::{PairQuoteRequest, SolverQuote};

/// JSON-RPC 2.0 request envelope. The relay expects params as a
/// single-element array.
#[derive(Debug, Serialize)]
pub struct RpcEnvelope<P: Serialize> {
  pub jsonrpc: &'static str,
  pub id: &'static str,
  pub method: String,
  pub params: [P; 1],
}

impl<P: Serialize> RpcEnvelope<P> {
  pub fn new(method: &str, params: P) -> Self {
    Self {
      jsonrpc: "2.0",
      id: "dontcare",
      method: method.to_string(),
      params: [params],
    }
  }
}

/// JSON-RPC 2.0 response envelope.
#[derive(Debug, Deserialize)]
pub struct RpcResponse<R> {
  #[serde(default)]
  pub result: Option<R>,
  #[serde(default)]
  pub error: Option<RpcErrorBody>,
}

/// JSON-RPC error object.
#[derive(Debug, Clone, Deserialize)]
pub struct RpcErrorBody {
  pub code: i64,
  pub message: String,
}

/// Quote request message for the relay's `quote` method.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteRequestMessage {
  pub defuse_asset_identifier_in: String,
  pub defuse_asset_identifier_out: String,
  pub exact_amount_in: String,
  pub min_deadline_ms: u64,
}

impl From<&PairQuoteRequest> for QuoteRequestMessage {
  fn from(request: &PairQuoteRequest) -> Self {
    Self {
      defuse_asset_identifier_in: request.asset_in.clone(),
      defuse_asset_identifier_out: request.asset_out.clone(),
      exact_amount_in: request.exact_amount_in.clone(),
      min_deadline_ms: request.min_deadline_ms,
    }
  }
}

/// A single quote as returned by the relay.
#[derive(Debug, Clone, Deserialize)]
pub struct SolverQuoteMessage {
  pub quote_hash: String,
  pub defuse_asset_identifier_in: String,
  pub defuse_asset_identifier_out: String,
  pub amount_in: String,
  pub amount_out: String,
  #[serde(default)]
  pub expiration_time: Option<i64>,
}

impl From<SolverQuoteMessage> for SolverQuote {
  fn from(msg: SolverQuoteMessage) -> Self {
    Self {
      quote_hash: msg.quote_hash,
      asset_in: msg.defuse_asset_identifier_in,
      asset_out: msg.defuse_asset_identifier_out,
      amount_in: msg.amount_in,
      amount_out: msg.amount_out,
      expiration_time: msg.expiration_time,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_quote_message_deserializes_relay_payload() {
    let raw = r#"{
      "quote_hash": "9f2c",
      "defuse_asset_identifier_in": "nep141:wrap.near",
      "defuse_asset_identifier_out": "nep141:usdc.token.near",
      "amount_in": "100000000000000000000000000",
      "amount_out": "350000000",
      "expiration_time": 1736000000
    }"#;
    let msg: SolverQuoteMessage = serde_json::from_str(raw).unwrap();
    assert_eq!(msg.quote_hash, "9f2c");
    assert_eq!(msg.expiration_time, Some(1_736_000_000));

    let quote: SolverQuote = msg.into();
    assert_eq!(quote.asset_out, "nep141:usdc.token.near");
    assert_eq!(quote.amount_out, "350000000");
  }

  #[test]
  fn test_quote_message_without_expiry() {
    let raw = r#"{
      "quote_hash": "aa",
      "defuse_asset_identifier_in": "a",
      "defuse_asset_identifier_out": "b",
      "amount_in": "1",
      "amount_out": "2"
    }"#;
    let msg: SolverQuoteMessage = serde_json::from_str(raw).unwrap();
    assert!(msg.expiration_time.is_none());
  }

  #[test]
  fn test_envelope_shape() {
    let envelope = RpcEnvelope::new(
      "quote",
      QuoteRequestMessage {
        defuse_asset_identifier_in: "a".to_string(),
        defuse_asset_identifier_out: "b".to_string(),
        exact_amount_in: "1".to_string(),
        min_deadline_ms: 120_000,
      },
    );
    let value = serde_json::to_value(&envelope).unwrap();
    assert_eq!(value["jsonrpc"], "2.0");
    assert_eq!(value["method"], "quote");
    assert!(value["params"].as_array().unwrap().len() == 1);
  }
}
