use anyhow::Result;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use tierpay_client::{AdminClient, ConnectMode, ConnectReport, MembershipApi, StripeConnect, TierSave};
use tierpay_types::view::dialog_width;
use tierpay_types::{select_view, ConnectStep, ConnectView, SiteConfig};
use tokio_util::sync::CancellationToken;

pub async fn show_status(connect: &StripeConnect<AdminClient>, config: &SiteConfig, json: bool) -> Result<()> {
    let settings = connect.api().browse_settings().await?;
    let view = select_view(config, &settings, ConnectStep::Start);
    let account = connect.connected_account().await?;

    if json {
        let value = serde_json::json!({
            "view": view,
            "account_name": account.account_name,
            "livemode": account.livemode,
            "dialog_width": dialog_width(&settings),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["View", "Account", "Mode"]);
    let mode = match (view, account.livemode) {
        (ConnectView::Connected, true) => Cell::new("Live").fg(Color::Green),
        (ConnectView::Connected, false) => Cell::new("Test mode").fg(Color::Yellow),
        _ => Cell::new("-"),
    };
    table.add_row(vec![
        Cell::new(view_label(view)),
        Cell::new(account.account_name.as_deref().unwrap_or("-")),
        mode,
    ]);
    println!("{table}");
    Ok(())
}

fn view_label(view: ConnectView) -> &'static str {
    match view {
        ConnectView::DirectEntry => "Direct keys",
        ConnectView::Connected => "Connected",
        ConnectView::NotStarted => "Not connected",
        ConnectView::AwaitingKey => "Awaiting secure key",
    }
}

pub fn print_connect_url(client: &AdminClient, test: bool) -> Result<()> {
    let mode = if test { ConnectMode::Test } else { ConnectMode::Live };
    println!("{}", client.stripe_connect_url(mode)?);
    Ok(())
}

pub async fn connect(connect: &StripeConnect<AdminClient>, secure_key: &str, cancel: &CancellationToken) -> Result<()> {
    println!("{}", "Saving secure key...".cyan());
    let ConnectReport { tier, portal_plans_updated } = connect.connect(secure_key, cancel).await?;

    match tier {
        TierSave::NoTier => println!("{} No active paid tier to price", "•".dimmed()),
        TierSave::Saved { tier, attempts } => {
            println!("{} Tier {} priced after {} attempt(s)", "✓".green(), tier.id, attempts)
        },
        TierSave::Exhausted { tier, attempts } => println!(
            "{} Stripe was still not ready after {} attempts; tier {} keeps its old prices",
            "!".yellow(),
            attempts,
            tier.id
        ),
        TierSave::Cancelled { tier, .. } => println!(
            "{} Cancelled; the secure key stays saved but tier {} was not priced",
            "!".yellow(),
            tier.id
        ),
    }
    if portal_plans_updated {
        println!("{} Connected with Stripe", "✓".green());
    }
    Ok(())
}

pub async fn save_direct(connect: &StripeConnect<AdminClient>, publishable_key: &str, secret_key: &str) -> Result<()> {
    connect.save_direct_keys(publishable_key, secret_key).await?;
    println!("{} Stripe keys saved", "✓".green());
    Ok(())
}

pub async fn disconnect(connect: &StripeConnect<AdminClient>) -> Result<()> {
    let account = connect.connected_account().await?;
    connect.disconnect().await?;
    println!(
        "{} Disconnected {}; paid memberships are now off",
        "✓".green(),
        account.account_name.as_deref().unwrap_or("Stripe account")
    );
    Ok(())
}
