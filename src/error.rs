use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Question must not be empty")]
    EmptyQuestion,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Backend returned {status} {reason}: {body}")]
    Status {
        status: u16,
        reason: String,
        body: String,
    },

    #[error("Backend response has no answer")]
    MissingAnswer,

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid state transition: {current} -> {requested}")]
    InvalidTransition { current: String, requested: String },

    #[error("A question is already awaiting a response")]
    Busy,

    #[error("Sorry, your system does not support speech synthesis.")]
    SpeechUnsupported,

    #[error("Speech error: {0}")]
    Speech(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn speech(msg: impl Into<String>) -> Self {
        Self::Speech(msg.into())
    }
}
