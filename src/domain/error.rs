use thiserror::Error;

/// Pacicli unified error type
#[derive(Error, Debug)]
pub enum PaciError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode {format} data: {message}")]
    Decode { format: String, message: String },

    #[error("Failed to encode request: {0}")]
    Encode(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Output error: {0}")]
    Output(String),
}

impl PaciError {
    pub fn decode(format: impl Into<String>, message: impl ToString) -> Self {
        Self::Decode {
            format: format.into(),
            message: message.to_string(),
        }
    }
}

pub type PaciResult<T> = Result<T, PaciError>;
