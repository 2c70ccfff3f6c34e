use serde_derive::Deserialize;
use serde_derive::Serialize;

/// Processing phase of the assistant, independent of the transcript.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BackendState {
    #[default]
    Default,
    Generating,
    Error,
}
