#[cfg(test)]
#[path = "query_gateway_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::sync::Mutex;

use super::ChatStore;
use super::InputListener;
use crate::domain::models::ArtifactContent;
use crate::domain::models::BackendBox;
use crate::domain::models::BackendPrompt;
use crate::domain::models::BackendResponse;
use crate::domain::models::BackendState;
use crate::domain::models::SearchInput;

/// Sends user queries to the backend and streams the reply into the chat
/// transcript.
///
/// Queries are not correlated with replies. Callers that submit while a
/// reply is still streaming will see both interleaved into the most recent
/// assistant message.
pub struct QueryGateway {
    store: Arc<ChatStore>,
    backend: BackendBox,
    artifact: Mutex<Option<ArtifactContent>>,
}

impl QueryGateway {
    pub fn new(store: Arc<ChatStore>, backend: BackendBox) -> QueryGateway {
        return QueryGateway {
            store,
            backend,
            artifact: Mutex::new(None),
        };
    }

    /// Submits whatever is in the search box. Nothing happens if there is no
    /// search box.
    pub async fn submit_current_query(&self, search: &dyn SearchInput) -> Result<()> {
        let query = match search.value() {
            Some(query) => query,
            None => {
                tracing::debug!("No search box, skipping query");
                return Ok(());
            }
        };

        return self.submit(&query).await;
    }

    pub async fn submit(&self, query: &str) -> Result<()> {
        self.begin();
        return self.finish(query).await;
    }

    /// Wires the gateway in as a chat input listener. Each dispatched message
    /// starts a reply right away and streams it on the current runtime.
    pub fn listener(self: &Arc<Self>) -> InputListener {
        let gateway = Arc::downgrade(self);

        return Arc::new(move |text: &str| -> Result<()> {
            let gateway = match gateway.upgrade() {
                Some(gateway) => gateway,
                None => return Ok(()),
            };

            let runtime = Handle::try_current()?;
            gateway.begin();

            let query = text.to_string();
            runtime.spawn(async move {
                if let Err(err) = gateway.finish(&query).await {
                    tracing::error!(error = ?err, "Query failed");
                }
            });

            return Ok(());
        });
    }

    fn begin(&self) {
        self.store.set_backend_state(BackendState::Generating);
        self.store.initialize_new_system_message();
    }

    async fn finish(&self, query: &str) -> Result<()> {
        let res = self.stream_reply(query).await;
        if let Err(err) = &res {
            tracing::error!(error = ?err, backend = %self.backend.name(), "Backend request failed");
            self.store.set_backend_state(BackendState::Error);
        } else {
            self.store.set_backend_state(BackendState::Default);
        }

        return res;
    }

    async fn stream_reply(&self, query: &str) -> Result<()> {
        let prompt = BackendPrompt::new(query, self.artifact.lock().await.clone());
        let (tx, mut rx) = mpsc::unbounded_channel::<BackendResponse>();

        let request = async move {
            let res = self.backend.get_completion(prompt, &tx).await;
            drop(tx);
            return res;
        };

        let relay = async {
            while let Some(res) = rx.recv().await {
                if !res.text.is_empty() {
                    self.store.append_to_most_recent_system_message(&res.text);
                }
                if let Some(artifact) = res.artifact {
                    *self.artifact.lock().await = Some(artifact);
                }
                if res.done {
                    break;
                }
            }
        };

        let (res, _) = tokio::join!(request, relay);
        return res;
    }
}
