use anyhow::Context;
use reqwest::StatusCode;
use serde_json::Value;

/// Thin JSON client for the API. Non-2xx responses are returned, not raised,
/// so commands can report the server's own message.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

pub struct ApiReply {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiReply {
    /// The server's `message` field, falling back to the status text.
    pub fn message(&self) -> String {
        self.body
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| self.status.to_string())
    }
}

impl ApiClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        url::Url::parse(base_url).with_context(|| format!("invalid server URL: {}", base_url))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str) -> anyhow::Result<ApiReply> {
        let res = self
            .http
            .get(self.url(path))
            .send()
            .await
            .with_context(|| format!("request to {} failed", self.url(path)))?;
        Self::reply(res).await
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> anyhow::Result<ApiReply> {
        let res = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .with_context(|| format!("request to {} failed", self.url(path)))?;
        Self::reply(res).await
    }

    async fn reply(res: reqwest::Response) -> anyhow::Result<ApiReply> {
        let status = res.status();
        let body = res
            .json::<Value>()
            .await
            .context("server returned a non-JSON body")?;
        Ok(ApiReply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn joins_paths_without_double_slash() {
        let client = ApiClient::new("http://localhost:3000/").unwrap();
        assert_eq!(client.url("/signup"), "http://localhost:3000/signup");
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(ApiClient::new("localhost without scheme").is_err());
    }

    #[test]
    fn reply_message_prefers_server_text() {
        let reply = ApiReply {
            status: StatusCode::CONFLICT,
            body: json!({"message": "User already exists"}),
        };
        assert_eq!(reply.message(), "User already exists");

        let reply = ApiReply {
            status: StatusCode::BAD_GATEWAY,
            body: json!({}),
        };
        assert_eq!(reply.message(), "502 Bad Gateway");
    }
}
