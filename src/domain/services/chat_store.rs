#[cfg(test)]
#[path = "chat_store_test.rs"]
mod tests;

use std::panic;
use std::sync::Arc;

use anyhow::Result;
use rust_embed::RustEmbed;
use tokio::sync::watch;

use crate::domain::models::BackendState;
use crate::domain::models::Message;
use crate::domain::models::Sender;

#[derive(RustEmbed)]
#[folder = "assets/"]
struct Assets;

/// Called with the raw user text every time input is dispatched. Listeners
/// are compared by reference, so keep the `Arc` around to remove one later.
pub type InputListener = Arc<dyn Fn(&str) -> Result<()> + Send + Sync>;

pub fn welcome_text() -> String {
    if let Some(file) = Assets::get("welcome.md") {
        return String::from_utf8_lossy(&file.data).trim().to_string();
    }

    return "Hey there! What can I help you find?".to_string();
}

/// Chat session state. Each cell is a watch channel, so a mutation is
/// visible to every subscriber as soon as the call returns.
pub struct ChatStore {
    messages: watch::Sender<Vec<Message>>,
    panel_open: watch::Sender<bool>,
    input_listeners: watch::Sender<Vec<InputListener>>,
    backend_state: watch::Sender<BackendState>,
}

impl Default for ChatStore {
    fn default() -> ChatStore {
        return ChatStore::new(&welcome_text());
    }
}

impl ChatStore {
    pub fn new(welcome: &str) -> ChatStore {
        return ChatStore {
            messages: watch::channel(vec![Message::new(Sender::System, welcome)]).0,
            panel_open: watch::channel(false).0,
            input_listeners: watch::channel(vec![]).0,
            backend_state: watch::channel(BackendState::Default).0,
        };
    }

    pub fn messages(&self) -> Vec<Message> {
        return self.messages.borrow().clone();
    }

    pub fn subscribe_messages(&self) -> watch::Receiver<Vec<Message>> {
        return self.messages.subscribe();
    }

    pub fn panel_open(&self) -> bool {
        return *self.panel_open.borrow();
    }

    pub fn subscribe_panel_open(&self) -> watch::Receiver<bool> {
        return self.panel_open.subscribe();
    }

    pub fn set_panel_open(&self, open: bool) {
        self.panel_open.send_if_modified(|current| {
            if *current == open {
                return false;
            }
            *current = open;
            return true;
        });
    }

    pub fn backend_state(&self) -> BackendState {
        return *self.backend_state.borrow();
    }

    pub fn subscribe_backend_state(&self) -> watch::Receiver<BackendState> {
        return self.backend_state.subscribe();
    }

    pub fn set_backend_state(&self, state: BackendState) {
        tracing::debug!(state = %state, "Backend state");
        self.backend_state.send_replace(state);
    }

    pub fn input_listener_count(&self) -> usize {
        return self.input_listeners.borrow().len();
    }

    pub fn add_input_listener(&self, listener: InputListener) {
        self.input_listeners.send_modify(|listeners| {
            listeners.push(listener);
        });
    }

    /// Removes every registration of this exact listener.
    pub fn remove_input_listener(&self, listener: &InputListener) {
        self.input_listeners.send_if_modified(|listeners| {
            let before = listeners.len();
            listeners.retain(|registered| return !Arc::ptr_eq(registered, listener));
            return listeners.len() != before;
        });
    }

    /// Records the user's message, then hands the text to every listener in
    /// registration order. A failing or panicking listener is logged and
    /// skipped.
    pub fn dispatch_user_input(&self, text: &str) {
        self.add_message(Message::new(Sender::User, text));

        // Snapshot so listeners are free to (un)register while running.
        let listeners = self.input_listeners.borrow().clone();
        for (idx, listener) in listeners.iter().enumerate() {
            let res = panic::catch_unwind(panic::AssertUnwindSafe(|| return listener(text)));
            match res {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    tracing::warn!(listener = idx, error = ?err, "Input listener failed");
                }
                Err(_) => {
                    tracing::warn!(listener = idx, "Input listener panicked");
                }
            }
        }
    }

    pub fn add_message(&self, message: Message) {
        self.messages.send_modify(|messages| {
            messages.push(message);
        });
    }

    /// Opens a new, empty assistant reply for streamed chunks to land in.
    pub fn initialize_new_system_message(&self) {
        self.add_message(Message::empty_system());
    }

    /// Appends a chunk to the last message if it is an assistant reply. Does
    /// nothing when the transcript is empty or ends with a user message.
    pub fn append_to_most_recent_system_message(&self, chunk: &str) {
        self.messages.send_if_modified(|messages| {
            let last_idx = match messages.len().checked_sub(1) {
                Some(idx) => idx,
                None => return false,
            };
            if messages[last_idx].sender() != Sender::System {
                return false;
            }

            messages[last_idx] = messages[last_idx].with_token(chunk);
            return true;
        });
    }
}
