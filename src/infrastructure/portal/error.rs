use thiserror::Error;

#[derive(Debug, Error)]
pub enum PortalError {
    #[error("Failed to reach the portal: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Portal responded to {url} with status {status}")]
    Status { url: String, status: u16 },
    #[error("Portal page is missing the expected element `{0}`")]
    MissingElement(&'static str),
    #[error("Invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },
    #[error("Portal returned malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl PortalError {
    /// True for failures to fetch the page, false when the page arrived but
    /// could not be understood.
    pub fn is_network(&self) -> bool {
        return matches!(self, PortalError::Network(_) | PortalError::Status { .. });
    }
}
