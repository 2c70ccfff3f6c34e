#[cfg(test)]
#[path = "backend_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

use super::ArtifactContent;

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    strum::EnumIter,
    strum::EnumString,
    strum::EnumVariantNames,
    strum::Display,
)]
#[strum(serialize_all = "kebab-case")]
pub enum BackendName {
    Query,
    Recommend,
}

impl BackendName {
    pub fn parse(text: &str) -> Result<BackendName> {
        return text
            .parse::<BackendName>()
            .map_err(|_| return anyhow::anyhow!("No backend named {text}"));
    }
}

pub struct BackendPrompt {
    pub text: String,
    /// Artifact returned by the previous turn, for backends that track the
    /// conversation on their side.
    pub artifact: Option<ArtifactContent>,
}

impl BackendPrompt {
    pub fn new(text: &str, artifact: Option<ArtifactContent>) -> BackendPrompt {
        return BackendPrompt {
            text: text.to_string(),
            artifact,
        };
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendResponse {
    pub text: String,
    pub done: bool,
    pub artifact: Option<ArtifactContent>,
}

#[async_trait]
pub trait Backend {
    fn name(&self) -> BackendName;

    /// Used before chatting to verify the backend is reachable.
    async fn health_check(&self) -> Result<()>;

    /// Requests an answer from the backend. Chunks are streamed back through
    /// the channel as they arrive, and a final response with `done` set is
    /// always sent last.
    async fn get_completion<'a>(
        &self,
        prompt: BackendPrompt,
        tx: &'a mpsc::UnboundedSender<BackendResponse>,
    ) -> Result<()>;
}

pub type BackendBox = Box<dyn Backend + Send + Sync>;
