use serde_derive::Deserialize;
use serde_derive::Serialize;

/// Conversation artifact exchanged with the recommendation backend. The
/// backend rebuilds the chat history from `prompts` and `response_contents`,
/// so the client has to send back what it last received.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactContent {
    pub query_message: String,
    pub prompts: Vec<String>,
    pub response_objects: Vec<String>,
    pub response_contents: Vec<String>,
    pub references: Vec<Vec<String>>,
    pub answer: String,
}

impl ArtifactContent {
    /// Carries this turn's history forward for a new question.
    pub fn next_turn(&self, query: &str) -> ArtifactContent {
        let mut next = self.clone();
        next.query_message = query.to_string();
        next.answer = "".to_string();

        return next;
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    pub num_embeds: u32,
    #[serde(rename = "termDescription")]
    pub term_description: String,
    #[serde(rename = "catalogSubject")]
    pub catalog_subject: String,
}

impl Default for Filters {
    fn default() -> Filters {
        return Filters {
            num_embeds: 3,
            term_description: "".to_string(),
            catalog_subject: "".to_string(),
        };
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientMessage {
    pub artifact: ArtifactContent,
    pub filters: Filters,
}
