pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "posts-api")]
#[command(about = "Posts REST API server and token tooling")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default when no command is given)")]
    Serve {
        #[arg(long, help = "Port to listen on, overrides POSTS_API_PORT / PORT")]
        port: Option<u16>,
    },

    #[command(about = "Issue a signed bearer token for local testing")]
    Token {
        #[arg(long, help = "User id to put in the userId claim")]
        user_id: i32,

        #[arg(long, help = "Token lifetime in hours, overrides SECURITY_JWT_EXPIRY_HOURS")]
        hours: Option<u64>,
    },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => commands::serve::handle(port).await,
        Commands::Token { user_id, hours } => commands::token::handle(user_id, hours),
    }
}
