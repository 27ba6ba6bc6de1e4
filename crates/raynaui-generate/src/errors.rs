use thiserror::Error;

/// Errors raised while turning a model reply into a generation record.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("no JSON object found in AI response")]
    NoJsonObject,
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("{0}")]
    InvalidRecord(#[from] raynaui_core::Error),
}

/// Errors emitted by the generation engine.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("API key is required for AI generation")]
    MissingApiKey,
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("AI service returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("unexpected response type from AI: {0}")]
    UnexpectedContent(String),
    #[error("failed to parse AI response: {0}")]
    Parse(#[from] ParseError),
}
