#[cfg(test)]
#[path = "query_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;
use tokio_util::io::StreamReader;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Backend;
use crate::domain::models::BackendName;
use crate::domain::models::BackendPrompt;
use crate::domain::models::BackendResponse;

fn convert_err(err: reqwest::Error) -> std::io::Error {
    let err_msg = err.to_string();
    return std::io::Error::new(std::io::ErrorKind::Interrupted, err_msg);
}

/// Plain query endpoint: `GET /?query=...`, answered with a text body that
/// is streamed back one line, terminator included, at a time.
pub struct Query {
    url: String,
    timeout: String,
}

impl Default for Query {
    fn default() -> Query {
        return Query {
            url: Config::get(ConfigKey::BackendURL),
            timeout: Config::get(ConfigKey::BackendTimeout),
        };
    }
}

#[async_trait]
impl Backend for Query {
    fn name(&self) -> BackendName {
        return BackendName::Query;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("Backend URL is not defined");
        }

        let res = reqwest::Client::new()
            .get(&self.url)
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await;

        let status = match res {
            Ok(res) => res.status().as_u16(),
            Err(err) => {
                tracing::error!(error = ?err, "Query backend is not reachable");
                bail!("Query backend is not reachable");
            }
        };
        // The root path may well reject a request without a query, all that
        // matters here is that something is listening.
        if status >= 500 {
            tracing::error!(status = status, "Query backend health check failed");
            bail!("Query backend health check failed");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn get_completion<'a>(
        &self,
        prompt: BackendPrompt,
        tx: &'a mpsc::UnboundedSender<BackendResponse>,
    ) -> Result<()> {
        let res = reqwest::Client::new()
            .get(&self.url)
            .query(&[("query", &prompt.text)])
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                "Failed to make query request to backend"
            );
            bail!("Failed to make query request to backend");
        }

        let stream = res.bytes_stream().map_err(convert_err);
        let mut reader = StreamReader::new(stream);

        // Each token keeps its own line terminator so the tokens join back
        // into the exact body.
        let mut line = String::new();
        while reader.read_line(&mut line).await? > 0 {
            tracing::debug!(line = %line, "Query response");
            tx.send(BackendResponse {
                text: std::mem::take(&mut line),
                done: false,
                artifact: None,
            })?;
        }

        tx.send(BackendResponse {
            text: "".to_string(),
            done: true,
            artifact: None,
        })?;

        return Ok(());
    }
}
