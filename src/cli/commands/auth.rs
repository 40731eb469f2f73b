use clap::Subcommand;
use serde_json::json;

use crate::cli::client::{ApiClient, ApiReply};
use crate::cli::utils::{output_error, output_success};
use crate::cli::OutputFormat;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Create an account and print its token")]
    Signup {
        #[arg(help = "Username")]
        username: String,
        #[arg(long, help = "Password")]
        password: String,
        #[arg(long, help = "Display name")]
        name: Option<String>,
    },

    #[command(about = "Sign in and print a token")]
    Signin {
        #[arg(help = "Username")]
        username: String,
        #[arg(long, help = "Password")]
        password: String,
    },
}

pub async fn handle(
    cmd: AuthCommands,
    client: &ApiClient,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Signup { username, password, name } => {
            let mut body = json!({ "username": username, "password": password });
            if let Some(name) = name {
                body["name"] = json!(name);
            }
            let reply = client.post_json("/signup", &body).await?;
            report_token(reply, &format!("Signed up as {}", username), output_format)
        }
        AuthCommands::Signin { username, password } => {
            let body = json!({ "username": username, "password": password });
            let reply = client.post_json("/signin", &body).await?;
            report_token(reply, &format!("Signed in as {}", username), output_format)
        }
    }
}

fn report_token(reply: ApiReply, message: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    if !reply.status.is_success() {
        if output_format == OutputFormat::Json {
            let code = reply.body.get("code").and_then(|c| c.as_str());
            output_error(&output_format, &reply.message(), code)?;
        }
        anyhow::bail!("{} ({})", reply.message(), reply.status);
    }

    let token = reply
        .body
        .get("token")
        .and_then(|t| t.as_str())
        .ok_or_else(|| anyhow::anyhow!("response did not contain a token"))?;

    output_success(&output_format, message, Some(json!({ "token": token })))
}
