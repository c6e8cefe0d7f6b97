use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod context;
mod helper;
mod render;

#[derive(Parser)]
#[command(name = "cadchat")]
#[command(about = "cadchat - describe mechanical parts in plain language and inspect the CAD results", long_about = None)]
struct Cli {
    /// Config file to use instead of ~/.config/cadchat/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// CAD service base URL (overrides config and CADCHAT_BASE_URL)
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive session (default)
    Repl,
    /// Submit a single query and print the result
    Ask {
        /// Part description
        #[arg(required = true)]
        text: Vec<String>,
        /// Requested render mode: 2d or 3d
        #[arg(long)]
        mode: Option<String>,
    },
    /// List stored conversations, or the replies of one conversation
    Conversations {
        /// Conversation to list replies for
        id: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let ctx = context::AppContext::load(cli.config, cli.server)?;

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => commands::repl::run(&ctx).await?,
        Commands::Ask { text, mode } => commands::ask::run(&ctx, &text.join(" "), mode.as_deref()).await?,
        Commands::Conversations { id } => commands::conversations::run(&ctx, id.as_deref()).await?,
    }

    Ok(())
}
