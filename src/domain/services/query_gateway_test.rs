use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

use super::QueryGateway;
use crate::domain::models::ArtifactContent;
use crate::domain::models::Backend;
use crate::domain::models::BackendName;
use crate::domain::models::BackendPrompt;
use crate::domain::models::BackendResponse;
use crate::domain::models::BackendState;
use crate::domain::models::SearchBox;
use crate::domain::models::Sender;
use crate::domain::services::ChatStore;

#[derive(Default)]
struct FakeBackend {
    chunks: Vec<String>,
    fail: bool,
    artifact: Option<ArtifactContent>,
    prompts: Arc<Mutex<Vec<(String, Option<ArtifactContent>)>>>,
}

#[async_trait]
impl Backend for FakeBackend {
    fn name(&self) -> BackendName {
        return BackendName::Query;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn get_completion<'a>(
        &self,
        prompt: BackendPrompt,
        tx: &'a mpsc::UnboundedSender<BackendResponse>,
    ) -> Result<()> {
        self.prompts
            .lock()
            .unwrap()
            .push((prompt.text.to_string(), prompt.artifact.clone()));

        for chunk in &self.chunks {
            tx.send(BackendResponse {
                text: chunk.to_string(),
                done: false,
                artifact: None,
            })?;
        }

        if self.fail {
            bail!("Connection refused");
        }

        tx.send(BackendResponse {
            text: "".to_string(),
            done: true,
            artifact: self.artifact.clone(),
        })?;

        return Ok(());
    }
}

fn chunks(parts: &[&str]) -> Vec<String> {
    return parts.iter().map(|part| return part.to_string()).collect();
}

#[tokio::test]
async fn it_streams_the_reply_into_the_transcript() -> Result<()> {
    let store = Arc::new(ChatStore::new("Welcome!"));
    let backend = FakeBackend {
        chunks: chunks(&["Try ", "COMPSCI 50", "."]),
        ..FakeBackend::default()
    };
    let gateway = QueryGateway::new(store.clone(), Box::new(backend));

    gateway.submit("intro programming").await?;

    let messages = store.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].sender(), Sender::System);
    assert_eq!(messages[1].tokens(), &["Try ", "COMPSCI 50", "."]);
    assert_eq!(store.backend_state(), BackendState::Default);

    return Ok(());
}

#[tokio::test]
async fn it_submits_the_search_box_text() -> Result<()> {
    let store = Arc::new(ChatStore::new("Welcome!"));
    let prompts = Arc::new(Mutex::new(vec![]));
    let backend = FakeBackend {
        chunks: chunks(&["ok"]),
        prompts: prompts.clone(),
        ..FakeBackend::default()
    };
    let gateway = QueryGateway::new(store.clone(), Box::new(backend));

    gateway
        .submit_current_query(&SearchBox::new("ethics courses"))
        .await?;

    assert_eq!(prompts.lock().unwrap()[0].0, "ethics courses");
    assert_eq!(store.messages().len(), 2);

    return Ok(());
}

#[tokio::test]
async fn it_skips_when_there_is_no_search_box() -> Result<()> {
    let store = Arc::new(ChatStore::new("Welcome!"));
    let prompts = Arc::new(Mutex::new(vec![]));
    let backend = FakeBackend {
        prompts: prompts.clone(),
        ..FakeBackend::default()
    };
    let gateway = QueryGateway::new(store.clone(), Box::new(backend));

    gateway.submit_current_query(&SearchBox::missing()).await?;

    assert!(prompts.lock().unwrap().is_empty());
    assert_eq!(store.messages().len(), 1);
    assert_eq!(store.backend_state(), BackendState::Default);

    return Ok(());
}

#[tokio::test]
async fn it_sets_error_state_on_failure() {
    let store = Arc::new(ChatStore::new("Welcome!"));
    let backend = FakeBackend {
        chunks: chunks(&["partial"]),
        fail: true,
        ..FakeBackend::default()
    };
    let gateway = QueryGateway::new(store.clone(), Box::new(backend));

    let res = gateway.submit("anything").await;

    assert!(res.is_err());
    assert_eq!(store.backend_state(), BackendState::Error);
    assert_eq!(store.messages()[1].text(), "partial");
}

#[tokio::test]
async fn it_carries_the_artifact_to_the_next_turn() -> Result<()> {
    let store = Arc::new(ChatStore::new("Welcome!"));
    let prompts = Arc::new(Mutex::new(vec![]));
    let artifact = ArtifactContent {
        query_message: "first".to_string(),
        prompts: vec!["first".to_string()],
        response_contents: vec!["answer".to_string()],
        answer: "answer".to_string(),
        ..ArtifactContent::default()
    };
    let backend = FakeBackend {
        chunks: chunks(&["answer"]),
        artifact: Some(artifact.clone()),
        prompts: prompts.clone(),
        ..FakeBackend::default()
    };
    let gateway = QueryGateway::new(store.clone(), Box::new(backend));

    gateway.submit("first").await?;
    gateway.submit("second").await?;

    let prompts = prompts.lock().unwrap();
    assert_eq!(prompts[0].1, None);
    assert_eq!(prompts[1].1, Some(artifact));

    return Ok(());
}

#[tokio::test]
async fn it_answers_dispatched_input_as_a_listener() -> Result<()> {
    let store = Arc::new(ChatStore::new("Welcome!"));
    let backend = FakeBackend {
        chunks: chunks(&["Hello ", "there"]),
        ..FakeBackend::default()
    };
    let gateway = Arc::new(QueryGateway::new(store.clone(), Box::new(backend)));
    store.add_input_listener(gateway.listener());

    let mut state_rx = store.subscribe_backend_state();
    store.dispatch_user_input("hi");
    assert_eq!(store.backend_state(), BackendState::Generating);

    tokio::time::timeout(
        Duration::from_secs(5),
        state_rx.wait_for(|state| return *state != BackendState::Generating),
    )
    .await??;

    let messages = store.messages();
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[1].sender(), Sender::User);
    assert_eq!(messages[2].text(), "Hello there");
    assert_eq!(store.backend_state(), BackendState::Default);

    return Ok(());
}
