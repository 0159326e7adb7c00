//! Dashboard configuration.

use crate::{
    constants::{DEVNET_GATEWAY_URL, MAINNET_GATEWAY_URL, TESTNET_GATEWAY_URL},
    types::{Address, AddressError},
};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// The network the dashboard talks to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Development network; the documented default.
    #[default]
    Devnet,
    /// Public test network.
    Testnet,
    /// The production network.
    Mainnet,
}

impl Network {
    /// The default public gateway for this network.
    pub fn default_gateway(self) -> &'static str {
        match self {
            Self::Devnet => DEVNET_GATEWAY_URL,
            Self::Testnet => TESTNET_GATEWAY_URL,
            Self::Mainnet => MAINNET_GATEWAY_URL,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Devnet => "devnet",
            Self::Testnet => "testnet",
            Self::Mainnet => "mainnet",
        };
        f.write_str(s)
    }
}

/// Errors building a [`DashboardConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configured contract address does not parse.
    #[error("invalid contract address: {0}")]
    ContractAddress(#[source] AddressError),
    /// The gateway URL does not parse.
    #[error("invalid gateway url: {0}")]
    GatewayUrl(#[from] url::ParseError),
}

/// Validated runtime configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Selected network.
    pub network: Network,
    /// Gateway base URL.
    pub gateway: Url,
    /// The escrow contract every query and intent is addressed to.
    pub contract: Address,
}

impl DashboardConfig {
    /// Builds a validated configuration.
    ///
    /// A malformed contract address is fatal: the dashboard must not come up
    /// pointed at something it cannot call.
    pub fn new(
        network: Network,
        contract: &str,
        gateway_override: Option<Url>,
    ) -> Result<Self, ConfigError> {
        let contract = contract.trim().parse().map_err(ConfigError::ContractAddress)?;
        let gateway = match gateway_override {
            Some(url) => url,
            None => Url::parse(network.default_gateway())?,
        };
        Ok(Self { network, gateway, contract })
    }
}
