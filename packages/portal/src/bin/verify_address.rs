//! CLI for checking addresses and member settings against the live services
//!
//! Prints JSON so results can be piped into other tooling.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use portal_core::common::{Address, AddressKind};
use portal_core::config::Config;
use portal_core::domains::addresses::AddressValidator;
use portal_core::domains::settings;
use portal_core::kernel::PortalDeps;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "verify_address")]
#[command(about = "Verify a postal address the way the member portal does")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify one address and print the classification
    Verify {
        #[arg(long)]
        street: String,
        #[arg(long)]
        city: String,
        #[arg(long)]
        state: String,
        #[arg(long)]
        postal_code: String,
        #[arg(long, default_value = "US")]
        country: String,
        /// Which address this is (P.O. boxes are only accepted for mailing)
        #[arg(long, value_enum, default_value_t = KindArg::Home)]
        kind: KindArg,
    },

    /// Fetch the member's settings using MEMBER_API_TOKEN
    Settings,

    /// Change one setting using MEMBER_API_TOKEN
    SetSetting {
        #[arg(long)]
        key: String,
        /// JSON value; anything that does not parse is sent as a string
        #[arg(long)]
        value: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Home,
    Mailing,
    Recipient,
}

impl From<KindArg> for AddressKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Home => AddressKind::Home,
            KindArg::Mailing => AddressKind::Mailing,
            KindArg::Recipient => AddressKind::Recipient,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,portal_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;
    let deps = PortalDeps::from_config(&config);

    match cli.command {
        Commands::Verify {
            street,
            city,
            state,
            postal_code,
            country,
            kind,
        } => {
            let address = Address::new(street, city, state, postal_code, country);
            let validator = AddressValidator::new(deps.address_verifier.clone());
            let result = validator.validate(&address, kind.into()).await;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Settings => {
            let token = deps
                .auth
                .bearer_token()
                .await?
                .context("MEMBER_API_TOKEN must be set to read settings")?;
            let response = deps.member_api.get_settings(&token).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Commands::SetSetting { key, value } => {
            let value = serde_json::from_str(&value).unwrap_or(serde_json::Value::String(value));
            let response = settings::update_setting(&deps, &key, value).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
