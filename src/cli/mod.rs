pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::client::{Credentials, TaskClient};

#[derive(Parser)]
#[command(name = "tasks")]
#[command(about = "Tasks CLI - Command-line client for the task manager API")]
#[command(version)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "TASKS_API_URL",
        default_value = "http://127.0.0.1:3000",
        help = "Base URL of the task API"
    )]
    pub url: String,

    #[arg(long, global = true, env = "TASKS_TOKEN", hide_env_values = true, help = "Bearer token")]
    pub token: Option<String>,

    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(flatten)]
    Task(commands::tasks::TaskCommands),

    #[command(about = "Mint a development token with the locally configured secret")]
    Token {
        #[arg(help = "User ID the token identifies")]
        user_id: uuid::Uuid,
        #[arg(long, help = "Token lifetime in hours (defaults to configuration)")]
        hours: Option<u64>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

impl Cli {
    fn credentials(&self) -> anyhow::Result<Credentials> {
        self.token
            .clone()
            .map(Credentials::new)
            .ok_or_else(|| anyhow::anyhow!("No token given; pass --token or set TASKS_TOKEN"))
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    let creds = cli.credentials();
    match cli.command {
        Commands::Token { user_id, hours } => commands::token::handle(user_id, hours, output_format),
        Commands::Task(cmd) => {
            let client = TaskClient::new(&cli.url)?;
            commands::tasks::handle(cmd, &client, &creds?, output_format).await
        }
    }
}
