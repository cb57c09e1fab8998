//! Exchange configuration.
//!
//! Runtime parameters with sensible defaults, JSON file loading, and
//! environment overrides. The two rate scale factors are deliberately
//! independent: the observed system quotes the value→token direction at 1e8
//! and the token→value direction at 1e18, and this engine preserves that
//! asymmetry rather than silently unifying it.

use amm::{ETH_TO_TOKEN_SCALE, TOKEN_TO_ETH_SCALE};
use serde::{Deserialize, Serialize};

/// Complete configuration for the exchange engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeConfig {
    /// Token metadata
    pub token: TokenConfig,
    /// Rate oracle scale factors
    pub rates: RateConfig,
}

/// Static metadata for the paired fungible token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenConfig {
    pub name: String,
    pub symbol: String,
}

/// Fixed-point scale factors for the two directional exchange rates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateConfig {
    /// Scale of the value→token rate
    pub eth_to_token_scale: u128,
    /// Scale of the token→value rate
    pub token_to_eth_scale: u128,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            token: TokenConfig::default(),
            rates: RateConfig::default(),
        }
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            name: "loveFaceBook".to_string(),
            symbol: "LFB".to_string(),
        }
    }
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            eth_to_token_scale: ETH_TO_TOKEN_SCALE,
            token_to_eth_scale: TOKEN_TO_ETH_SCALE,
        }
    }
}

impl ExchangeConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(name) = std::env::var("TIDEPOOL_TOKEN_NAME") {
            config.token.name = name;
        }

        if let Ok(symbol) = std::env::var("TIDEPOOL_TOKEN_SYMBOL") {
            config.token.symbol = symbol;
        }

        if let Ok(scale) = std::env::var("TIDEPOOL_ETH_TO_TOKEN_SCALE") {
            if let Ok(value) = scale.parse::<u128>() {
                config.rates.eth_to_token_scale = value;
            }
        }

        if let Ok(scale) = std::env::var("TIDEPOOL_TOKEN_TO_ETH_SCALE") {
            if let Ok(value) = scale.parse::<u128>() {
                config.rates.token_to_eth_scale = value;
            }
        }

        config
    }

    /// Save configuration to a JSON file
    pub fn save_to_file(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.token.name.is_empty() {
            anyhow::bail!("token name must not be empty");
        }

        if self.token.symbol.is_empty() {
            anyhow::bail!("token symbol must not be empty");
        }

        if self.rates.eth_to_token_scale == 0 {
            anyhow::bail!("eth_to_token_scale must be positive");
        }

        if self.rates.token_to_eth_scale == 0 {
            anyhow::bail!("token_to_eth_scale must be positive");
        }

        Ok(())
    }
}
