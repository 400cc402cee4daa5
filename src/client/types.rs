use serde::{Deserialize, Serialize};

/// Reply shown when the backend answers with a non-2xx status.
pub const SERVER_ERROR_REPLY: &str = "Sorry, could not get a response from the server.";
/// Reply shown when the backend answers 2xx without a usable `answer`.
pub const NO_ANSWER_REPLY: &str = "Sorry, no answer available.";
/// Reply shown when the backend cannot be reached or its body cannot be read.
pub const CONTACT_ERROR_REPLY: &str = "An error occurred while contacting the AI service.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AskRequest {
    pub question: String,
    pub language: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AskResponse {
    #[serde(default)]
    pub answer: Option<String>,
}

impl AskRequest {
    pub fn new(question: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            language: language.into(),
        }
    }
}

impl AskResponse {
    /// The answer text, if present and non-empty. Whitespace is kept as is.
    pub fn into_answer(self) -> Option<String> {
        self.answer.filter(|a| !a.is_empty())
    }
}
