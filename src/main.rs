mod bot;
mod handlers;

use bot::offset::OffsetStore;
use bot::BotServer;
use clap::{Parser, Subcommand};
use handlers::{Outcome, Router};
use myna_core::config;
use myna_telegram::{Client, Credentials};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "myna", version, about = "Myna — long-polling Telegram command bot")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "myna.toml")]
    config: String,

    /// Token file override; first line of the file is the bot token.
    #[arg(long)]
    token_file: Option<String>,

    /// Offset file override.
    #[arg(long)]
    offset_file: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot.
    Start,
    /// Check the bot identity and the persisted offset.
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cfg = config::load(&cli.config)?;
    let token_file = cli
        .token_file
        .unwrap_or_else(|| cfg.telegram.token_file.clone());
    let offset_file = cli
        .offset_file
        .unwrap_or_else(|| cfg.state.offset_file.clone());

    let token = match config::read_token(&token_file) {
        Ok(token) => token,
        Err(e) => {
            error!("{e}");
            std::process::exit(-1);
        }
    };

    let client = Client::new(Credentials {
        token,
        api_url: cfg.telegram.endpoint(),
    });

    match cli.command {
        Commands::Start => {
            let store = OffsetStore::new(&offset_file);
            let mut server = BotServer::new(
                client,
                Router::with_defaults(),
                store,
                cfg.telegram.poll_timeout(),
            )?;

            match server.run().await {
                Outcome::Abort => {
                    error!("aborting on handler request");
                    std::process::exit(-1);
                }
                _ => info!("shut down gracefully"),
            }
        }
        Commands::Status => {
            let me = client.get_me().await?;
            println!("Myna — Status Check\n");
            println!("Config: {}", cli.config);
            println!("Transport: {}", cfg.telegram.transport.display_name());
            println!("Bot: {} (id {})", me.first_name, me.id);
            if let Some(username) = me.username {
                println!("Username: @{username}");
            }

            let store = OffsetStore::new(&offset_file);
            match store.load()? {
                Some(offset) => println!("Last acknowledged update: {offset}"),
                None => println!("Last acknowledged update: none"),
            }
        }
    }

    Ok(())
}
