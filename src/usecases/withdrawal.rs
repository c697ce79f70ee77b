//! Withdrawal Coordinator - Post-swap Fund Routing
//!
//! Routes settled swap output to a destination chain/address. Only
//! invoked when a withdrawal was requested; an absent destination
//! address defaults to the caller's own account. One submission per
//! call, no internal retry: the swap output stays in the intents
//! balance and the caller can retry the withdrawal alone.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::domain::assets::AssetRegistry;
use crate::domain::swap::{SwapError, SwapReceipt, WithdrawalReceipt, WithdrawalRequest};
use crate::ports::signer::{Signer, WithdrawalSubmission};

/// Submits withdrawals of settled swap output.
pub struct WithdrawalCoordinator<S: Signer> {
  signer: Arc<S>,
  registry: Arc<AssetRegistry>,
}

impl<S: Signer> WithdrawalCoordinator<S> {
  /// Create a coordinator over a signer capability.
  pub fn new(signer: Arc<S>, registry: Arc<AssetRegistry>) -> Self {
    Self { signer, registry }
  }

  /// Submit a withdrawal of the swap output.
  #[instrument(skip_all, fields(destination_chain = %request.destination_chain))]
  pub async fn withdraw(
    &self,
    swap: &SwapReceipt,
    request: &WithdrawalRequest,
  ) -> Result<WithdrawalReceipt, SwapError> {
    self
      .registry
      .chain(&request.destination_chain)
      .map_err(|e| SwapError::UnsupportedDestination(e.to_string()))?;

    // The settled token must be routable to the destination chain.
    self
      .registry
      .asset_id(&swap.token_out, &request.destination_chain)
      .map_err(|e| SwapError::UnsupportedDestination(e.to_string()))?;

    // Only caller-supplied addresses get the format check; the
    // defaulted account id is resolved by the signer to its own
    // representation on the destination chain.
    let destination_address = match &request.destination_address {
      Some(address) => {
        self
          .registry
          .validate_address(&request.destination_chain, address)
          .map_err(|e| SwapError::UnsupportedDestination(e.to_string()))?;
        address.clone()
      }
      None => self.signer.account_id().to_string(),
    };

    let submission = WithdrawalSubmission {
      token: swap.token_out.clone(),
      amount: swap.amount_out,
      destination_chain: request.destination_chain.clone(),
      destination_address,
    };

    let receipt = self.signer.submit_withdrawal(&submission).await?;

    info!(
      intent_hash = %receipt.intent_hash,
      destination_address = %receipt.destination_address,
      swap_intent = %swap.intent_hash,
      "Withdrawal intent submitted"
    );

    Ok(receipt)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::Mutex;

  use async_trait::async_trait;
  use chrono::Utc;
  use rust_decimal_macros::dec;

  use crate::domain::assets::{AssetInfo, ChainInfo, ChainKind};
  use crate::ports::signer::{SignerError, SwapSubmission};

  struct RecordingSigner {
    submissions: Mutex<Vec<WithdrawalSubmission>>,
  }

  #[async_trait]
  impl Signer for RecordingSigner {
    fn account_id(&self) -> &str {
      "alice.near"
    }

    async fn submit_swap(
      &self,
      _submission: &SwapSubmission,
    ) -> Result<SwapReceipt, SignerError> {
      unreachable!("coordinator never swaps")
    }

    async fn submit_withdrawal(
      &self,
      submission: &WithdrawalSubmission,
    ) -> Result<WithdrawalReceipt, SignerError> {
      self.submissions.lock().unwrap().push(submission.clone());
      Ok(WithdrawalReceipt {
        intent_hash: "wd-1".to_string(),
        destination_chain: submission.destination_chain.clone(),
        destination_address: submission.destination_address.clone(),
        submitted_at: Utc::now(),
      })
    }
  }

  fn registry() -> Arc<AssetRegistry> {
    Arc::new(AssetRegistry::new(
      vec![AssetInfo {
        symbol: "USDC".to_string(),
        token_id: "usdc.token.near".to_string(),
        omft: Some("eth-0xa0b8.omft.near".to_string()),
        decimals: 6,
        chains: vec!["near".to_string(), "eth".to_string()],
      }],
      vec![
        ChainInfo {
          id: "near".to_string(),
          name: "NEAR Protocol".to_string(),
          kind: ChainKind::Near,
          enabled: true,
        },
        ChainInfo {
          id: "eth".to_string(),
          name: "Ethereum".to_string(),
          kind: ChainKind::Evm,
          enabled: true,
        },
      ],
      "near".to_string(),
    ))
  }

  fn swap_receipt() -> SwapReceipt {
    SwapReceipt {
      intent_hash: "swap-1".to_string(),
      amount_out: dec!(350),
      token_out: "USDC".to_string(),
      chain: "near".to_string(),
      submitted_at: Utc::now(),
    }
  }

  fn coordinator() -> (Arc<RecordingSigner>, WithdrawalCoordinator<RecordingSigner>) {
    let signer = Arc::new(RecordingSigner {
      submissions: Mutex::new(Vec::new()),
    });
    let coordinator = WithdrawalCoordinator::new(Arc::clone(&signer), registry());
    (signer, coordinator)
  }

  #[tokio::test]
  async fn test_native_withdrawal_defaults_to_own_account() {
    let (signer, coordinator) = coordinator();
    let receipt = coordinator
      .withdraw(
        &swap_receipt(),
        &WithdrawalRequest {
          destination_chain: "near".to_string(),
          destination_address: None,
        },
      )
      .await
      .unwrap();

    assert_eq!(receipt.destination_address, "alice.near");
    let recorded = signer.submissions.lock().unwrap();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].amount, dec!(350));
  }

  #[tokio::test]
  async fn test_unknown_chain_fails_without_submission() {
    let (signer, coordinator) = coordinator();
    let result = coordinator
      .withdraw(
        &swap_receipt(),
        &WithdrawalRequest {
          destination_chain: "sol".to_string(),
          destination_address: None,
        },
      )
      .await;

    assert!(matches!(result, Err(SwapError::UnsupportedDestination(_))));
    assert!(signer.submissions.lock().unwrap().is_empty());
  }

  #[tokio::test]
  async fn test_address_format_checked_against_destination_chain() {
    let (signer, coordinator) = coordinator();
    // NEAR-style address on an EVM destination is a format error.
    let result = coordinator
      .withdraw(
        &swap_receipt(),
        &WithdrawalRequest {
          destination_chain: "eth".to_string(),
          destination_address: Some("alice.near".to_string()),
        },
      )
      .await;

    assert!(matches!(result, Err(SwapError::UnsupportedDestination(_))));
    assert!(signer.submissions.lock().unwrap().is_empty());
  }
}
