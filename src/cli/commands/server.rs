use clap::Subcommand;

use crate::cli::client::ApiClient;
use crate::cli::utils::{output_error, output_success};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum ServerCommands {
    #[command(about = "Show server information from API root endpoint")]
    Info,

    #[command(about = "Check server health status from API /health endpoint")]
    Health,
}

pub async fn handle(
    cmd: ServerCommands,
    client: &ApiClient,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        ServerCommands::Info => {
            let reply = client.get("/").await?;
            output_success(&output_format, &format!("Server at {}", client.url("/")), Some(reply.body))
        }
        ServerCommands::Health => {
            let reply = client.get("/health").await?;
            if reply.status.is_success() {
                output_success(&output_format, "Server is healthy", Some(reply.body))
            } else {
                if output_format == OutputFormat::Json {
                    output_error(&output_format, "Server is degraded", Some("SERVICE_UNAVAILABLE"))?;
                }
                anyhow::bail!("health check returned {}", reply.status)
            }
        }
    }
}
