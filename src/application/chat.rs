#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;

use std::future::Future;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;

use super::cli::help_text;
use super::portal::courses_message;
use super::portal::requirements_message;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::BackendBox;
use crate::domain::models::BackendName;
use crate::domain::models::BackendState;
use crate::domain::models::Message;
use crate::domain::models::SearchBox;
use crate::domain::models::Sender;
use crate::domain::services::wait_until;
use crate::domain::services::ChatStore;
use crate::domain::services::QueryGateway;
use crate::domain::services::WaitOutcome;
use crate::infrastructure::backends::BackendManager;
use crate::infrastructure::portal::Portal;

const HEALTH_CHECK_INTERVAL: Duration = Duration::from_millis(500);
const HEALTH_CHECK_WAIT: Duration = Duration::from_secs(10);

/// Turns transcript snapshots into terminal output, printing only what has
/// not been printed before. User messages are skipped since the terminal
/// already shows what was typed.
#[derive(Default)]
pub struct TranscriptPrinter {
    message_idx: usize,
    token_idx: usize,
    printed_any: bool,
}

impl TranscriptPrinter {
    pub fn starting_at(message_idx: usize) -> TranscriptPrinter {
        return TranscriptPrinter {
            message_idx,
            token_idx: 0,
            printed_any: false,
        };
    }

    pub fn render(&mut self, messages: &[Message]) -> String {
        let mut out = String::new();

        while self.message_idx < messages.len() {
            let tokens = messages[self.message_idx].tokens();
            let sender = messages[self.message_idx].sender();

            if sender == Sender::System && self.token_idx < tokens.len() {
                if self.token_idx == 0 && self.printed_any {
                    out.push_str("\n\n");
                }
                out.push_str(&tokens[self.token_idx..].concat());
                self.printed_any = true;
            }
            self.token_idx = tokens.len();

            if self.message_idx + 1 >= messages.len() {
                break;
            }
            self.message_idx += 1;
            self.token_idx = 0;
        }

        return out;
    }
}

fn flush(text: &str) -> Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;

    return Ok(());
}

/// Prints transcript updates until `until` resolves.
async fn follow_transcript<F: Future>(
    store: &ChatStore,
    printer: &mut TranscriptPrinter,
    until: F,
) -> Result<F::Output> {
    let mut messages_rx = store.subscribe_messages();
    tokio::pin!(until);

    loop {
        let update = printer.render(&messages_rx.borrow_and_update());
        flush(&update)?;

        tokio::select! {
            res = &mut until => {
                flush(&printer.render(&store.messages()))?;
                return Ok(res);
            }
            res = messages_rx.changed() => res?,
        }
    }
}

fn backend() -> Result<BackendBox> {
    let name = BackendName::parse(&Config::get(ConfigKey::Backend))?;
    return Ok(BackendManager::get(name));
}

async fn wait_for_backend(backend: &BackendBox) -> WaitOutcome {
    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    let watcher = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let outcome = wait_until(
        move || return async move { return backend.health_check().await.is_ok() },
        HEALTH_CHECK_INTERVAL,
        HEALTH_CHECK_WAIT,
        &cancel,
    )
    .await;

    watcher.abort();
    tracing::debug!(outcome = ?outcome, "Backend health check");

    return outcome;
}

/// One shot query, as if typed into the portal search box.
pub async fn ask(query: &str) -> Result<()> {
    let store = Arc::new(ChatStore::default());
    let gateway = QueryGateway::new(store.clone(), backend()?);
    let mut printer = TranscriptPrinter::starting_at(store.messages().len());

    let search = SearchBox::new(query);
    let res = follow_transcript(
        &store,
        &mut printer,
        gateway.submit_current_query(&search),
    )
    .await?;
    flush("\n")?;

    return res;
}

pub async fn start() -> Result<()> {
    let store = Arc::new(ChatStore::default());
    let portal = Portal::default();
    let backend = backend()?;
    let backend_name = backend.name();

    match wait_for_backend(&backend).await {
        WaitOutcome::Ready => {}
        WaitOutcome::Cancelled => return Ok(()),
        WaitOutcome::TimedOut => {
            store.add_message(Message::new(
                Sender::System,
                &format!("Hey, it looks like the {backend_name} backend at {} isn't running. You should double check that before we start talking.", Config::get(ConfigKey::BackendURL)),
            ));
        }
    }

    let gateway = Arc::new(QueryGateway::new(store.clone(), backend));
    let listener = gateway.listener();
    store.add_input_listener(listener.clone());
    store.set_panel_open(true);

    let mut printer = TranscriptPrinter::default();
    flush(&printer.render(&store.messages()))?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        flush("\n> ")?;
        let line = match lines.next_line().await? {
            Some(line) => line,
            None => break,
        };

        let text = line.trim();
        match text {
            "" => continue,
            "/quit" | "/exit" | "/q" => break,
            "/help" | "/h" => {
                store.add_message(Message::new(Sender::System, &help_text()));
            }
            "/courses" => {
                store.add_message(Message::new(
                    Sender::System,
                    &courses_message(&portal).await,
                ));
            }
            "/requirements" => {
                store.add_message(Message::new(
                    Sender::System,
                    &requirements_message(&portal).await,
                ));
            }
            _ => {
                store.dispatch_user_input(text);
            }
        }

        let mut state_rx = store.subscribe_backend_state();
        let state = *follow_transcript(
            &store,
            &mut printer,
            state_rx.wait_for(|state| return *state != BackendState::Generating),
        )
        .await??;

        if state == BackendState::Error {
            flush("\n\n(The backend failed to answer. Run with RUST_LOG=coursechat for details.)")?;
        }
    }

    store.remove_input_listener(&listener);
    store.set_panel_open(false);

    return Ok(());
}
