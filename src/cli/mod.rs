pub mod client;
pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use client::ApiClient;

#[derive(Parser)]
#[command(name = "medium")]
#[command(about = "Medium CLI - Command-line client for the Medium signup/signin API")]
#[command(version)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        default_value = "http://localhost:3000",
        help = "Base URL of the API server"
    )]
    pub url: String,

    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Create accounts and obtain tokens")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Inspect the API server")]
    Server {
        #[command(subcommand)]
        cmd: commands::server::ServerCommands,
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

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let client = ApiClient::new(&cli.url)?;

    match cli.command {
        Commands::Auth { cmd } => commands::auth::handle(cmd, &client, output_format).await,
        Commands::Server { cmd } => commands::server::handle(cmd, &client, output_format).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_signup_with_global_flags() {
        let cli = Cli::try_parse_from([
            "medium", "--json", "--url", "http://api:8080", "auth", "signup", "alice",
            "--password", "pw1", "--name", "Alice",
        ])
        .unwrap();

        assert_eq!(OutputFormat::from_cli(&cli), OutputFormat::Json);
        assert_eq!(cli.url, "http://api:8080");
        match cli.command {
            Commands::Auth {
                cmd: commands::auth::AuthCommands::Signup { username, password, name },
            } => {
                assert_eq!(username, "alice");
                assert_eq!(password, "pw1");
                assert_eq!(name.as_deref(), Some("Alice"));
            }
            _ => panic!("expected auth signup"),
        }
    }

    #[test]
    fn signin_requires_password() {
        assert!(Cli::try_parse_from(["medium", "auth", "signin", "alice"]).is_err());
    }
}
