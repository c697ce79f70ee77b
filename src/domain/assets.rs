//! Asset and chain registry.
//!
//! Maps token symbols to their on-chain representations (NEP-141
//! token id on the native chain, omni-token id elsewhere), carries
//! per-token decimals for atomic-unit conversion, and knows which
//! chains are enabled. The registry is loaded from config at startup;
//! nothing here is hardcoded.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::swap::{ChainId, TokenSymbol};

/// Registry lookup and conversion failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssetError {
    #[error("token {0} is not supported")]
    UnsupportedToken(TokenSymbol),

    #[error("chain {0} is not supported or disabled")]
    UnsupportedChain(ChainId),

    #[error("token {token} is not available on chain {chain}")]
    TokenNotOnChain { token: TokenSymbol, chain: ChainId },

    #[error("amount {0} cannot be represented in atomic units")]
    AmountOutOfRange(String),

    #[error("address {address} is not valid for chain {chain}")]
    InvalidAddress { chain: ChainId, address: String },
}

/// Address encoding used by a chain, for format-correctness checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainKind {
    /// NEAR named or implicit accounts.
    Near,
    /// 0x-prefixed 20-byte hex addresses.
    Evm,
}

/// A supported token and its on-chain representations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetInfo {
    /// Token symbol (e.g. "NEAR", "USDC").
    pub symbol: TokenSymbol,
    /// NEP-141 contract id on the native chain.
    pub token_id: String,
    /// Omni-token contract id for cross-chain routing, if bridged.
    pub omft: Option<String>,
    /// Token decimals for atomic-unit conversion.
    pub decimals: u32,
    /// Chains this token is available on.
    pub chains: Vec<ChainId>,
}

/// A known chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainInfo {
    /// Chain identifier (e.g. "near", "eth").
    pub id: ChainId,
    /// Human-readable name.
    pub name: String,
    /// Address encoding.
    pub kind: ChainKind,
    /// Whether operations targeting this chain are allowed.
    pub enabled: bool,
}

/// Registry of supported assets and chains.
#[derive(Debug, Clone)]
pub struct AssetRegistry {
    tokens: HashMap<TokenSymbol, AssetInfo>,
    chains: HashMap<ChainId, ChainInfo>,
    native_chain: ChainId,
}

impl AssetRegistry {
    /// Build a registry from config-loaded entries.
    pub fn new(
        tokens: Vec<AssetInfo>,
        chains: Vec<ChainInfo>,
        native_chain: ChainId,
    ) -> Self {
        Self {
            tokens: tokens.into_iter().map(|t| (t.symbol.clone(), t)).collect(),
            chains: chains.into_iter().map(|c| (c.id.clone(), c)).collect(),
            native_chain,
        }
    }

    /// The chain on which intent balances are natively held.
    pub fn native_chain(&self) -> &str {
        &self.native_chain
    }

    /// Look up a token by symbol.
    pub fn asset(&self, symbol: &str) -> Result<&AssetInfo, AssetError> {
        self.tokens
            .get(symbol)
            .ok_or_else(|| AssetError::UnsupportedToken(symbol.to_string()))
    }

    /// Look up an enabled chain by id.
    pub fn chain(&self, id: &str) -> Result<&ChainInfo, AssetError> {
        match self.chains.get(id) {
            Some(chain) if chain.enabled => Ok(chain),
            _ => Err(AssetError::UnsupportedChain(id.to_string())),
        }
    }

    /// Resolve the solver asset identifier for a token on a chain.
    ///
    /// On the native chain this is the NEP-141 contract; elsewhere it
    /// is the omni-token representation used for bridged routing.
    pub fn asset_id(&self, symbol: &str, chain: &str) -> Result<String, AssetError> {
        let asset = self.asset(symbol)?;
        if !asset.chains.iter().any(|c| c == chain) {
            return Err(AssetError::TokenNotOnChain {
                token: symbol.to_string(),
                chain: chain.to_string(),
            });
        }
        if chain == self.native_chain {
            return Ok(format!("nep141:{}", asset.token_id));
        }
        match &asset.omft {
            Some(omft) => Ok(format!("nep141:{omft}")),
            None => Err(AssetError::TokenNotOnChain {
                token: symbol.to_string(),
                chain: chain.to_string(),
            }),
        }
    }

    /// Convert a human-unit amount to an atomic-unit decimal string.
    pub fn to_atomic(&self, symbol: &str, amount: Decimal) -> Result<String, AssetError> {
        let asset = self.asset(symbol)?;
        let normalized = amount.normalize();
        let scale = normalized.scale();
        if scale > asset.decimals {
            return Err(AssetError::AmountOutOfRange(format!(
                "{amount} has more fractional digits than {symbol} supports ({})",
                asset.decimals
            )));
        }
        let exp = asset.decimals - scale;
        let factor = 10i128
            .checked_pow(exp)
            .ok_or_else(|| AssetError::AmountOutOfRange(amount.to_string()))?;
        let atomic = normalized
            .mantissa()
            .checked_mul(factor)
            .ok_or_else(|| AssetError::AmountOutOfRange(amount.to_string()))?;
        Ok(atomic.to_string())
    }

    /// Convert an atomic-unit decimal string back to human units.
    pub fn from_atomic(&self, symbol: &str, raw: &str) -> Result<Decimal, AssetError> {
        let asset = self.asset(symbol)?;
        let value: i128 = raw
            .parse()
            .map_err(|_| AssetError::AmountOutOfRange(raw.to_string()))?;
        let amount = Decimal::try_from_i128_with_scale(value, asset.decimals)
            .map_err(|_| AssetError::AmountOutOfRange(raw.to_string()))?;
        Ok(amount.normalize())
    }

    /// Basic format-correctness check for a destination address.
    ///
    /// Nothing chain-deeper than format: checksum and existence are
    /// the destination chain's problem.
    pub fn validate_address(&self, chain_id: &str, address: &str) -> Result<(), AssetError> {
        let chain = self.chain(chain_id)?;
        let ok = match chain.kind {
            ChainKind::Near => is_near_account(address),
            ChainKind::Evm => is_evm_address(address),
        };
        if ok {
            Ok(())
        } else {
            Err(AssetError::InvalidAddress {
                chain: chain_id.to_string(),
                address: address.to_string(),
            })
        }
    }
}

/// Named account ("alice.near") or 64-hex implicit account.
fn is_near_account(address: &str) -> bool {
    if address.len() == 64 && address.bytes().all(|b| b.is_ascii_hexdigit()) {
        return true;
    }
    match address.strip_suffix(".near") {
        Some(prefix) if !prefix.is_empty() => prefix
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-' || b == b'.'),
        _ => false,
    }
}

/// 0x-prefixed 20-byte hex address.
fn is_evm_address(address: &str) -> bool {
    match address.strip_prefix("0x") {
        Some(hex) => hex.len() == 40 && hex.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn registry() -> AssetRegistry {
        AssetRegistry::new(
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
                    omft: Some("eth-0xa0b8.omft.near".to_string()),
                    decimals: 6,
                    chains: vec!["near".to_string(), "eth".to_string()],
                },
            ],
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
                ChainInfo {
                    id: "aurora".to_string(),
                    name: "Aurora".to_string(),
                    kind: ChainKind::Evm,
                    enabled: false,
                },
            ],
            "near".to_string(),
        )
    }

    #[test]
    fn test_asset_id_native_vs_bridged() {
        let reg = registry();
        assert_eq!(
            reg.asset_id("USDC", "near").unwrap(),
            "nep141:usdc.token.near"
        );
        assert_eq!(
            reg.asset_id("USDC", "eth").unwrap(),
            "nep141:eth-0xa0b8.omft.near"
        );
        assert_eq!(
            reg.asset_id("NEAR", "eth"),
            Err(AssetError::TokenNotOnChain {
                token: "NEAR".to_string(),
                chain: "eth".to_string(),
            })
        );
    }

    #[test]
    fn test_unknown_token() {
        assert!(matches!(
            registry().asset("DOGE"),
            Err(AssetError::UnsupportedToken(_))
        ));
    }

    #[test]
    fn test_disabled_chain_rejected() {
        assert!(registry().chain("eth").is_ok());
        assert!(registry().chain("aurora").is_err());
        assert!(registry().chain("sol").is_err());
    }

    #[test]
    fn test_to_atomic_conversion() {
        let reg = registry();
        assert_eq!(reg.to_atomic("USDC", dec!(3.5)).unwrap(), "3500000");
        assert_eq!(
            reg.to_atomic("NEAR", dec!(100)).unwrap(),
            "100000000000000000000000000"
        );
    }

    #[test]
    fn test_to_atomic_rejects_excess_precision() {
        let reg = registry();
        // USDC has 6 decimals; 7 fractional digits cannot settle.
        assert!(reg.to_atomic("USDC", dec!(0.0000001)).is_err());
    }

    #[test]
    fn test_from_atomic_round_trip() {
        let reg = registry();
        let atomic = reg.to_atomic("USDC", dec!(123.456789)).unwrap();
        assert_eq!(reg.from_atomic("USDC", &atomic).unwrap(), dec!(123.456789));
    }

    #[test]
    fn test_near_address_formats() {
        let reg = registry();
        assert!(reg.validate_address("near", "alice.near").is_ok());
        assert!(reg.validate_address("near", "sub.alice.near").is_ok());
        assert!(reg
            .validate_address("near", &"a".repeat(64).replace('a', "f"))
            .is_ok());
        assert!(reg.validate_address("near", ".near").is_err());
        assert!(reg.validate_address("near", "0xdeadbeef").is_err());
    }

    #[test]
    fn test_evm_address_formats() {
        let reg = registry();
        assert!(reg
            .validate_address("eth", "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48")
            .is_ok());
        assert!(reg.validate_address("eth", "0x1234").is_err());
        assert!(reg.validate_address("eth", "alice.near").is_err());
    }
}
