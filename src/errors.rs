use thiserror::Error;

/// Everything that can go wrong inside one poll iteration. The loop catches
/// all of these at its top level and turns them into a failure notification.
#[derive(Debug, Error)]
pub enum PollError {
    #[error("API request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("API answered with status {status}: {message}")]
    EndpointStatus { status: u16, message: String },
    #[error("API response body is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{0}")]
    UnexpectedShape(&'static str),
    #[error("expected key \"{0}\" is missing from the response")]
    MissingKey(&'static str),
    #[error("unknown homework status: {0}")]
    UnknownStatus(String),
}

/// Failure to deliver a chat message. Never propagated past the send site.
#[derive(Debug, Error)]
#[error("failed to send message to Telegram: {0}")]
pub struct SendError(#[from] pub reqwest::Error);
