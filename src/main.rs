use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cmd;

#[derive(Parser)]
#[command(name = "relay")]
#[command(version, about = "Batch publisher for pub/sub channels")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format: text, json, yaml
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// Publish endpoint base URL
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// API key sent as the bearer token on publishes
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Path to the relay.toml config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Publish messages to a channel
    Channels {
        #[command(subcommand)]
        command: ChannelsCommands,
    },
    /// Send chat messages and reactions to rooms
    Rooms {
        #[command(subcommand)]
        command: RoomsCommands,
    },
    /// View or scaffold configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
pub enum ChannelsCommands {
    /// Publish a message to a channel
    Publish {
        /// Channel to publish to
        channel: String,

        /// Message body; supports {{.Count}} and {{.Timestamp}} tokens
        message: String,

        /// Number of messages to send
        #[arg(short, long, default_value = "1")]
        count: usize,

        /// Milliseconds to wait between initiating consecutive sends
        #[arg(short, long, default_value = "0")]
        delay: u64,

        /// Message name attached to each publish
        #[arg(short, long, default_value = "message")]
        event: String,
    },
}

#[derive(Subcommand, Clone)]
pub enum RoomsCommands {
    /// Chat messages
    Messages {
        #[command(subcommand)]
        command: MessagesCommands,
    },
    /// Room reactions
    Reactions {
        #[command(subcommand)]
        command: ReactionsCommands,
    },
}

#[derive(Subcommand, Clone)]
pub enum MessagesCommands {
    /// Send a chat message to a room
    Send {
        /// Room to send to
        room: String,

        /// Message text; supports {{.Count}} and {{.Timestamp}} tokens
        text: String,

        /// Number of messages to send
        #[arg(short, long, default_value = "1")]
        count: usize,

        /// Milliseconds to wait between initiating consecutive sends
        #[arg(short, long, default_value = "0")]
        delay: u64,
    },
}

#[derive(Subcommand, Clone)]
pub enum ReactionsCommands {
    /// Send a reaction to a room
    Send {
        /// Room to send to
        room: String,

        /// Reaction name (e.g. an emoji)
        name: String,

        /// Number of reactions to send
        #[arg(short, long, default_value = "1")]
        count: usize,

        /// Milliseconds to wait between initiating consecutive sends
        #[arg(short, long, default_value = "0")]
        delay: u64,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show the resolved configuration
    Show,
    /// Initialize a default relay.toml file
    Init,
    /// Validate configuration and show any warnings
    Validate,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Channels { command } => match command {
            ChannelsCommands::Publish {
                channel,
                message,
                count,
                delay,
                event,
            } => {
                cmd::cmd_publish(&cli, channel, message, *count, *delay, event).await?;
            }
        },
        Commands::Rooms { command } => match command {
            RoomsCommands::Messages {
                command:
                    MessagesCommands::Send {
                        room,
                        text,
                        count,
                        delay,
                    },
            } => {
                cmd::cmd_send_message(&cli, room, text, *count, *delay).await?;
            }
            RoomsCommands::Reactions {
                command:
                    ReactionsCommands::Send {
                        room,
                        name,
                        count,
                        delay,
                    },
            } => {
                cmd::cmd_send_reaction(&cli, room, name, *count, *delay).await?;
            }
        },
        Commands::Config { command } => cmd::cmd_config(&cli, command.clone())?,
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default_filter = if verbose { "relay=debug" } else { "relay=warn" };
    let filter =
        EnvFilter::try_from_env("RELAY_LOG").unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
