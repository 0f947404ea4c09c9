use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tierpay",
    about = "Link a membership site to Stripe",
    version = env!("CARGO_PKG_VERSION"),
    author,
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, env = "TIERPAY_ADMIN_URL", default_value = "http://localhost:2368/ghost/api/admin")]
    pub url: String,

    #[arg(long, env = "TIERPAY_ADMIN_TOKEN", hide_env_values = true)]
    pub token: String,

    #[arg(long, env = "TIERPAY_TIMEOUT_SECS", default_value = "30")]
    pub timeout_secs: u64,

    #[arg(long, env = "TIERPAY_STRIPE_DIRECT", help = "Site is configured for direct key entry")]
    pub stripe_direct: bool,

    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Show which connection step the site is in")]
    Status {
        #[arg(short, long, help = "Output as JSON")]
        json: bool,
    },

    #[command(about = "Print the URL that generates a secure key")]
    ConnectUrl {
        #[arg(long, help = "Generate a key for Stripe test mode")]
        test: bool,
    },

    #[command(about = "Connect using a secure key and set default tier prices")]
    Connect {
        #[arg(help = "Secure key copied from the connect page")]
        secure_key: String,
    },

    #[command(about = "Save publishable and secret keys directly")]
    Direct {
        #[arg(long, help = "Stripe publishable key")]
        publishable_key: String,

        #[arg(long, env = "TIERPAY_STRIPE_SECRET_KEY", hide_env_values = true, help = "Stripe secret key")]
        secret_key: String,
    },

    #[command(about = "Disconnect the Stripe account")]
    Disconnect,
}
