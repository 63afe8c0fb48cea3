//! Motormart command line client

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;

use motormart::config::Config;
use motormart::entities::Vehicle;
use motormart::models::{NoFilter, PageArgs, PageQuery};
use motormart::session::Credentials;
use motormart::MarketClient;

#[derive(Parser)]
#[command(name = "motormart", version, about = "Motormart marketplace client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in as a vendor
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "MOTORMART_PASSWORD")]
        password: String,
    },
    Logout,
    /// Show the signed-in vendor
    Whoami,
    /// List one page of vehicles
    Vehicles {
        #[arg(long, default_value_t = 20)]
        first: u32,
        #[arg(long)]
        after: Option<String>,
    },
    Vehicle {
        id: String,
    },
    /// Delete a vehicle and print the refreshed first page
    RemoveVehicle {
        id: String,
    },
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let client = MarketClient::from_config(&config)?;
    let session = client.session();
    if let Some(at) = session.take_reload_marker()? {
        tracing::debug!(%at, "Resuming after reload");
    }

    match cli.command {
        Command::Login { email, password } => {
            let identity = session.login(&Credentials { email, password }).await?;
            print_json(&identity)?;
        }
        Command::Logout => {
            session.logout().await?;
            println!("Logged out");
        }
        Command::Whoami => match session.current_identity()? {
            Some(identity) => print_json(&identity)?,
            None => println!("Not logged in"),
        },
        Command::Vehicles { first, after } => {
            session.restore()?;
            let mut page = PageArgs::first(first);
            if let Some(cursor) = after {
                page = page.after(cursor);
            }
            let vehicles = client
                .repo::<Vehicle>()
                .fetch_page(&PageQuery::unfiltered(page))
                .await?;
            print_json(&vehicles)?;
        }
        Command::Vehicle { id } => {
            session.restore()?;
            let vehicle = client.repo::<Vehicle>().fetch_by_id(&id).await?;
            print_json(&vehicle)?;
        }
        Command::RemoveVehicle { id } => {
            session.restore()?;
            let query = PageQuery::<NoFilter>::unfiltered(PageArgs::first(20));
            let vehicles = client
                .actions()
                .remove_then_refetch::<Vehicle, _>(&id, &query)
                .await?;
            print_json(&vehicles)?;
        }
    }

    Ok(())
}
