//! Wiring & DI. Entry point: parse the CLI, bootstrap adapters, inject into
//! services, dispatch one subcommand. No business logic here.

use clap::{Parser, Subcommand};
use dotenv::dotenv;
use hipchat_cli::adapters::hipchat::HipchatGateway;
use hipchat_cli::adapters::persistence::DirectoryJson;
use hipchat_cli::adapters::ui::{inline_image, render};
use hipchat_cli::domain::DomainError;
use hipchat_cli::ports::{ChatGateway, DirectoryStore};
use hipchat_cli::shared::config::AppConfig;
use hipchat_cli::usecases::{DirectoryService, LookupService, UnreadService};
use std::io::Write;
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "hc", version, about = "HipChat rooms, unread messages and emoticons")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show a room's details
    Room { room_name: String },
    /// List unread messages across all conversations
    Unread,
    /// Preview a custom emoticon in the terminal
    Emoticon { emoticon_name: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env first: it may carry RUST_LOG as well as the HIPCHAT_* variables.
    dotenv().ok();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => Ok(()),
        // Missing configuration and rejected credentials end the run cleanly:
        // one line on stderr, exit 0. Everything else crashes the process.
        Err(err) => {
            let clean_exit = matches!(
                err.downcast_ref::<DomainError>(),
                Some(DomainError::Config(_) | DomainError::Auth(_))
            );
            if clean_exit {
                eprintln!("{}", err);
                return Ok(());
            }
            Err(err)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = AppConfig::load()
        .map_err(|e| DomainError::Config(e.to_string()))?
        .resolve()?;
    debug!(
        base_url = %settings.base_url,
        cache = %settings.cache_path.display(),
        "configured"
    );

    let gateway: Arc<dyn ChatGateway> =
        Arc::new(HipchatGateway::new(settings.base_url, settings.token));
    let store: Arc<dyn DirectoryStore> = Arc::new(DirectoryJson::new(&settings.cache_path));
    let directory = Arc::new(DirectoryService::new(Arc::clone(&gateway), store));

    let mut out = std::io::stdout();
    match cli.command {
        Command::Room { room_name } => {
            let room = LookupService::new(gateway).room(&room_name).await?;
            render::write_room(&mut out, &room)?;
        }
        Command::Unread => {
            let blocks = UnreadService::new(gateway, directory).collect().await?;
            render::write_unread_report(&mut out, &blocks)?;
        }
        Command::Emoticon { emoticon_name } => {
            let (emoticon, image) = LookupService::new(gateway).emoticon(&emoticon_name).await?;
            render::write_emoticon(&mut out, &emoticon)?;
            inline_image::write_inline_image(
                &mut out,
                emoticon.file_name(),
                &image,
                emoticon.width,
                emoticon.height,
            )?;
        }
    }
    out.flush()?;
    Ok(())
}
