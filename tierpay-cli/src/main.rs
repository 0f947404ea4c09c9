//! tierpay - link a membership site to Stripe from the command line.
//!
//! Reads site state through the admin API, prints the connect URL, saves a
//! pasted secure key (pricing the default tier once Stripe is ready), saves
//! direct keys, and disconnects.

#![allow(clippy::print_stdout, reason = "CLI tool outputs to stdout")]

use anyhow::{Context, Result};
use clap::Parser;
use tierpay_client::{AdminClient, ClientConfig, StripeConnect};
use tierpay_types::SiteConfig;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod cli;
mod commands;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("setting default subscriber failed")?;

    let config = ClientConfig {
        base_url: cli.url.clone(),
        api_token: cli.token.clone(),
        timeout_secs: cli.timeout_secs,
        ..Default::default()
    };
    let retry = config.retry;
    let client = AdminClient::new(config)?;
    let site = SiteConfig { stripe_direct: cli.stripe_direct };

    let connect = StripeConnect::new(client, retry);

    match cli.command {
        Commands::Status { json } => commands::show_status(&connect, &site, json).await?,
        Commands::ConnectUrl { test } => commands::print_connect_url(connect.api(), test)?,
        Commands::Connect { secure_key } => {
            let cancel = CancellationToken::new();
            let on_interrupt = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    tracing::warn!("Interrupted, abandoning tier save");
                    on_interrupt.cancel();
                }
            });
            commands::connect(&connect, &secure_key, &cancel).await?;
        },
        Commands::Direct { publishable_key, secret_key } => {
            commands::save_direct(&connect, &publishable_key, &secret_key).await?
        },
        Commands::Disconnect => commands::disconnect(&connect).await?,
    }

    Ok(())
}
