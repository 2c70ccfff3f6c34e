#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;

/// Who a chat message came from. `System` covers everything the assistant
/// says, `User` is whatever was typed in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Sender {
    System,
    User,
}

/// A single transcript entry. Assistant replies are streamed in, so the
/// text is kept as the ordered list of chunks that were received.
///
/// Messages are values: appending a token produces a new message and the
/// sender is fixed at creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    tokens: Vec<String>,
    sender: Sender,
}

impl Message {
    pub fn new(sender: Sender, text: &str) -> Message {
        return Message {
            tokens: vec![text.to_string()],
            sender,
        };
    }

    /// An assistant message waiting for its first streamed chunk.
    pub fn empty_system() -> Message {
        return Message {
            tokens: vec![],
            sender: Sender::System,
        };
    }

    pub fn sender(&self) -> Sender {
        return self.sender;
    }

    pub fn tokens(&self) -> &[String] {
        return &self.tokens;
    }

    pub fn with_token(&self, token: &str) -> Message {
        let mut tokens = Vec::with_capacity(self.tokens.len() + 1);
        tokens.extend(self.tokens.iter().cloned());
        tokens.push(token.to_string());

        return Message {
            tokens,
            sender: self.sender,
        };
    }

    pub fn text(&self) -> String {
        return self.tokens.concat();
    }
}
