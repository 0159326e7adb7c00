//! # Escrow Dashboard CLI

use crate::{
    config::{DashboardConfig, Network},
    constants::DEFAULT_CONTRACT_ADDRESS,
    dashboard::{EscrowDashboard, Notification},
    gateway::{ChainClient, GatewayClient},
    session::{WalletSession, WatchOnlySession},
    types::Address,
};
use clap::Parser;
use eyre::WrapErr;
use std::{sync::Arc, time::Duration};
use tracing::{error, info};
use url::Url;

/// The escrow dashboard observes a wallet's escrows on the contract and, when
/// a signing session is attached, submits create/release/cancel transactions.
#[derive(Debug, Parser)]
#[command(author, about = "Escrow dashboard", long_about = None)]
pub struct Args {
    /// The network to connect to.
    #[arg(long, value_enum, env = "ESCROW_NETWORK", default_value_t = Network::Devnet)]
    pub network: Network,
    /// The escrow contract address.
    #[arg(
        long,
        value_name = "ADDRESS",
        env = "ESCROW_CONTRACT_ADDRESS",
        default_value = DEFAULT_CONTRACT_ADDRESS
    )]
    pub contract: String,
    /// Gateway URL override.
    ///
    /// Defaults to the selected network's public gateway.
    #[arg(long, value_name = "URL", env = "ESCROW_GATEWAY_URL")]
    pub gateway: Option<Url>,
    /// The wallet address whose escrows are observed.
    #[arg(long, value_name = "ADDRESS")]
    pub address: String,
    /// Seconds between escrow list refreshes.
    #[arg(long, value_name = "SECONDS", value_parser = parse_duration_secs, default_value = "30")]
    pub refresh_interval: Duration,
}

impl Args {
    /// Runs the dashboard in watch-only mode until interrupted.
    pub async fn run(self) -> eyre::Result<()> {
        let config = DashboardConfig::new(self.network, &self.contract, self.gateway.clone())?;
        let observer: Address =
            self.address.parse().wrap_err("invalid wallet address")?;

        let chain = Arc::new(GatewayClient::new(config.gateway.clone())?);
        let session = Arc::new(WatchOnlySession::connected(observer));
        let (dashboard, mut notifications) =
            EscrowDashboard::new(session, chain, config.clone());

        info!(
            network = %config.network,
            gateway = %config.gateway,
            contract = %config.contract,
            "starting escrow dashboard"
        );
        dashboard.sync_session().await;
        log_escrows(&dashboard).await;

        let mut ticker = tokio::time::interval(self.refresh_interval);
        ticker.tick().await;
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    dashboard.refresh_list().await;
                    log_escrows(&dashboard).await;
                }
                notice = notifications.recv() => match notice {
                    Some(Notification::Info(message)) => info!("{message}"),
                    Some(Notification::Error(message)) => error!("{message}"),
                    None => break,
                },
                _ = tokio::signal::ctrl_c() => {
                    info!("shutting down");
                    break;
                }
            }
        }

        Ok(())
    }
}

async fn log_escrows<S, C>(dashboard: &EscrowDashboard<S, C>)
where
    S: WalletSession,
    C: ChainClient,
{
    let escrows = dashboard.escrows().await;
    info!(count = escrows.len(), "escrow list");
    for escrow in escrows {
        info!(
            id = escrow.id,
            seller = %escrow.seller,
            buyer = %escrow.buyer,
            amount = %escrow.amount,
            status = %escrow.status,
            "escrow"
        );
    }
}

/// Parses a string representing seconds to a [`Duration`].
fn parse_duration_secs(arg: &str) -> Result<Duration, std::num::ParseIntError> {
    let seconds = arg.parse()?;
    Ok(Duration::from_secs(seconds))
}
