//! Paper Signer - Dry-run Intent Submission
//!
//! Implements the `Signer` port without keys or network calls:
//! submissions are logged and answered with synthetic receipts. Used
//! in dry-run mode and in local testing, mirroring live submission
//! closely enough that the orchestration path is identical.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::domain::swap::{SwapReceipt, WithdrawalReceipt};
use crate::ports::signer::{Signer, SignerError, SwapSubmission, WithdrawalSubmission};

/// Dry-run signer producing synthetic receipts.
pub struct PaperSigner {
  account_id: String,
}

impl PaperSigner {
  /// Create a paper signer acting for the given account.
  pub fn new(account_id: impl Into<String>) -> Self {
    Self {
      account_id: account_id.into(),
    }
  }

  /// Synthetic 32-byte intent hash, base64-encoded like relay hashes.
  fn synthetic_hash() -> String {
    let mut bytes = [0u8; 32];
    bytes[..16].copy_from_slice(Uuid::new_v4().as_bytes());
    bytes[16..].copy_from_slice(Uuid::new_v4().as_bytes());
    BASE64.encode(bytes)
  }
}

#[async_trait]
impl Signer for PaperSigner {
  fn account_id(&self) -> &str {
    &self.account_id
  }

  async fn submit_swap(
    &self,
    submission: &SwapSubmission,
  ) -> Result<SwapReceipt, SignerError> {
    let intent_hash = Self::synthetic_hash();
    info!(
      token_in = %submission.token_in,
      amount_in = %submission.amount_in,
      token_out = %submission.token_out,
      amount_out = %submission.amount_out,
      quote_hash = %submission.quote_hash,
      intent_hash = %intent_hash,
      "Paper mode: swap intent NOT submitted"
    );
    Ok(SwapReceipt {
      intent_hash,
      amount_out: submission.amount_out,
      token_out: submission.token_out.clone(),
      chain: submission.chain_out.clone(),
      submitted_at: Utc::now(),
    })
  }

  async fn submit_withdrawal(
    &self,
    submission: &WithdrawalSubmission,
  ) -> Result<WithdrawalReceipt, SignerError> {
    let intent_hash = Self::synthetic_hash();
    info!(
      token = %submission.token,
      amount = %submission.amount,
      destination_chain = %submission.destination_chain,
      destination_address = %submission.destination_address,
      intent_hash = %intent_hash,
      "Paper mode: withdrawal intent NOT submitted"
    );
    Ok(WithdrawalReceipt {
      intent_hash,
      destination_chain: submission.destination_chain.clone(),
      destination_address: submission.destination_address.clone(),
      submitted_at: Utc::now(),
    })
  }
}
