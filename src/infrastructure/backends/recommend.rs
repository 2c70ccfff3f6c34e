#[cfg(test)]
#[path = "recommend_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ArtifactContent;
use crate::domain::models::Backend;
use crate::domain::models::BackendName;
use crate::domain::models::BackendPrompt;
use crate::domain::models::BackendResponse;
use crate::domain::models::ClientMessage;
use crate::domain::models::Filters;

/// Course recommendation endpoint. It keeps no session of its own, instead
/// the artifact it returns holds the conversation so far and has to be sent
/// back with the next question.
pub struct Recommend {
    url: String,
    timeout: String,
}

impl Default for Recommend {
    fn default() -> Recommend {
        return Recommend {
            url: Config::get(ConfigKey::BackendURL),
            timeout: Config::get(ConfigKey::BackendTimeout),
        };
    }
}

#[async_trait]
impl Backend for Recommend {
    fn name(&self) -> BackendName {
        return BackendName::Recommend;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("Backend URL is not defined");
        }

        let res = reqwest::Client::new()
            .get(format!("{url}/openapi.json", url = self.url))
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await;

        let status = match res {
            Ok(res) => res.status().as_u16(),
            Err(err) => {
                tracing::error!(error = ?err, "Recommend backend is not reachable");
                bail!("Recommend backend is not reachable");
            }
        };
        if status >= 400 {
            tracing::error!(status = status, "Recommend backend health check failed");
            bail!("Recommend backend health check failed");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn get_completion<'a>(
        &self,
        prompt: BackendPrompt,
        tx: &'a mpsc::UnboundedSender<BackendResponse>,
    ) -> Result<()> {
        let artifact = match prompt.artifact {
            Some(previous) => previous.next_turn(&prompt.text),
            None => ArtifactContent {
                query_message: prompt.text.to_string(),
                ..ArtifactContent::default()
            },
        };

        let req = ClientMessage {
            artifact,
            filters: Filters::default(),
        };

        let res = reqwest::Client::new()
            .post(format!("{url}/recommend", url = self.url))
            .json(&req)
            .send()
            .await?;

        if !res.status().is_success() {
            tracing::error!(
                status = res.status().as_u16(),
                "Failed to make recommend request to backend"
            );
            bail!("Failed to make recommend request to backend");
        }

        let artifact = res.json::<ArtifactContent>().await?;
        tracing::debug!(body = ?artifact, "Recommend response");

        tx.send(BackendResponse {
            text: artifact.answer.to_string(),
            done: true,
            artifact: Some(artifact),
        })?;

        return Ok(());
    }
}
