use super::{
    fsm::{ChatEvent, ChatState, ChatStateMachine},
    message::{ChatMessage, MessageLog},
};
use crate::{
    Error, Result,
    client::{NO_ANSWER_REPLY, Responder},
};
use tracing::{debug, info};
use uuid::Uuid;

pub const GREETING: &str = "Hello! I'm your AI Farming Advisor. I can help you with crop \
management, pest control, weather planning, subsidies, and more. What farming question can I \
help you with today?";

pub const EMPTY_QUESTION_HINT: &str = "Please enter a question.";

pub const SUGGESTED_QUESTIONS: [&str; 4] = [
    "What's the best time to plant tomatoes?",
    "How do I identify crop diseases?",
    "Tell me about organic fertilizers",
    "What subsidies are available for small farmers?",
];

/// A question that has been logged and is waiting for its reply.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingTurn {
    pub question: String,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The input was blank; nothing was logged or sent.
    Rejected { hint: &'static str },
    /// The bot entry appended for this turn.
    Answered(ChatMessage),
}

/// One chat session: the message log plus the turn-taking state.
#[derive(Debug)]
pub struct Conversation {
    session_id: String,
    log: MessageLog,
    fsm: ChatStateMachine,
    language: String,
}

impl Conversation {
    /// Starts a session whose log holds the greeting.
    pub fn new(language: impl Into<String>) -> Self {
        let conversation = Self::without_greeting(language);
        let greeting = ChatMessage::bot(conversation.log.next_id(), GREETING);
        Self {
            log: conversation.log.append(greeting),
            ..conversation
        }
    }

    pub fn without_greeting(language: impl Into<String>) -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            log: MessageLog::new(),
            fsm: ChatStateMachine::new(),
            language: language.into(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Snapshot of the log; later turns do not change it.
    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    pub fn state(&self) -> ChatState {
        self.fsm.current_state()
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn set_language(&mut self, language: impl Into<String>) {
        self.language = language.into();
        info!(session_id = %self.session_id, "Selected language: {}", self.language);
    }

    /// Accepts a question: logs it and enters the awaiting state.
    ///
    /// Blank input fails with [`Error::EmptyQuestion`] and a question while
    /// another is pending fails with [`Error::Busy`]; neither touches the log.
    pub fn begin_turn(&mut self, input: &str, language: Option<&str>) -> Result<PendingTurn> {
        let question = input.trim();
        if question.is_empty() {
            return Err(Error::EmptyQuestion);
        }
        if !self.fsm.is_idle() {
            return Err(Error::Busy);
        }

        self.fsm.transition(ChatEvent::Submit)?;
        let message = ChatMessage::user(self.log.next_id(), question);
        self.log = self.log.append(message);

        let turn = PendingTurn {
            question: question.to_string(),
            language: language.unwrap_or(self.language.as_str()).to_string(),
        };
        info!(
            session_id = %self.session_id,
            "Question submitted (language: {})", turn.language
        );
        Ok(turn)
    }

    /// Logs the reply for the pending turn and returns to idle.
    ///
    /// An empty reply is logged as [`NO_ANSWER_REPLY`].
    pub fn settle_turn(&mut self, reply: &str) -> Result<ChatMessage> {
        self.fsm.transition(ChatEvent::Settle)?;

        let content = if reply.is_empty() {
            debug!(session_id = %self.session_id, "Empty reply, using placeholder");
            NO_ANSWER_REPLY
        } else {
            reply
        };
        let message = ChatMessage::bot(self.log.next_id(), content);
        self.log = self.log.append(message.clone());
        Ok(message)
    }

    pub async fn submit(
        &mut self,
        input: &str,
        responder: &dyn Responder,
    ) -> Result<SubmitOutcome> {
        self.submit_in(input, None, responder).await
    }

    /// Runs one full turn, optionally overriding the selected language for
    /// this question only.
    pub async fn submit_in(
        &mut self,
        input: &str,
        language: Option<&str>,
        responder: &dyn Responder,
    ) -> Result<SubmitOutcome> {
        let turn = match self.begin_turn(input, language) {
            Ok(turn) => turn,
            Err(Error::EmptyQuestion) => {
                return Ok(SubmitOutcome::Rejected {
                    hint: EMPTY_QUESTION_HINT,
                });
            }
            Err(e) => return Err(e),
        };

        let reply = responder.respond(&turn.question, &turn.language).await;
        let message = self.settle_turn(&reply)?;
        Ok(SubmitOutcome::Answered(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::Role;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    struct Echo;

    #[async_trait]
    impl Responder for Echo {
        async fn respond(&self, question: &str, language: &str) -> String {
            format!("{language}: {question}")
        }
    }

    #[test]
    fn test_new_conversation_has_greeting() {
        let conversation = Conversation::new("en");
        assert_eq!(conversation.log().len(), 1);
        let greeting = conversation.log().last().unwrap();
        assert_eq!(greeting.role, Role::Bot);
        assert_eq!(greeting.content, GREETING);
        assert_eq!(conversation.state(), ChatState::Idle);
    }

    #[test]
    fn test_begin_turn_trims_and_logs_user_entry() {
        let mut conversation = Conversation::without_greeting("te");
        let turn = conversation.begin_turn("  When to sow?  ", None).unwrap();

        assert_eq!(turn.question, "When to sow?");
        assert_eq!(turn.language, "te");
        assert_eq!(conversation.state(), ChatState::AwaitingResponse);
        let entry = conversation.log().last().unwrap();
        assert_eq!(entry.role, Role::User);
        assert_eq!(entry.content, "When to sow?");
    }

    #[test]
    fn test_second_question_while_awaiting_is_busy() {
        let mut conversation = Conversation::without_greeting("en");
        conversation.begin_turn("first", None).unwrap();

        let err = conversation.begin_turn("second", None).unwrap_err();
        assert!(matches!(err, Error::Busy));
        assert_eq!(conversation.log().len(), 1);
    }

    #[test]
    fn test_settle_without_pending_turn_fails() {
        let mut conversation = Conversation::without_greeting("en");
        assert!(matches!(
            conversation.settle_turn("answer"),
            Err(Error::InvalidTransition { .. })
        ));
        assert!(conversation.log().is_empty());
    }

    #[test]
    fn test_empty_reply_becomes_placeholder() {
        let mut conversation = Conversation::without_greeting("en");
        conversation.begin_turn("anything", None).unwrap();
        let message = conversation.settle_turn("").unwrap();
        assert_eq!(message.content, NO_ANSWER_REPLY);
        assert_eq!(conversation.state(), ChatState::Idle);
    }

    #[test]
    fn test_whitespace_reply_is_logged_unchanged() {
        let mut conversation = Conversation::without_greeting("en");
        conversation.begin_turn("anything", None).unwrap();
        let message = conversation.settle_turn(" \n").unwrap();
        assert_eq!(message.content, " \n");
    }

    #[tokio::test]
    async fn test_blank_input_is_rejected_without_log_change() {
        let mut conversation = Conversation::new("en");
        let before = conversation.log().clone();

        let outcome = conversation.submit("   \t", &Echo).await.unwrap();

        assert_eq!(
            outcome,
            SubmitOutcome::Rejected {
                hint: EMPTY_QUESTION_HINT
            }
        );
        assert_eq!(conversation.log(), &before);
        assert_eq!(conversation.state(), ChatState::Idle);
    }

    #[tokio::test]
    async fn test_submit_uses_override_language_once() {
        let mut conversation = Conversation::without_greeting("en");

        let outcome = conversation
            .submit_in("పంట", Some("telugu"), &Echo)
            .await
            .unwrap();
        let SubmitOutcome::Answered(message) = outcome else {
            panic!("expected an answer");
        };
        assert_eq!(message.content, "telugu: పంట");

        conversation.submit("rice", &Echo).await.unwrap();
        assert_eq!(conversation.log().last().unwrap().content, "en: rice");
        assert_eq!(conversation.log().len(), 4);
    }

    #[tokio::test]
    async fn test_earlier_snapshot_is_not_mutated() {
        let mut conversation = Conversation::new("en");
        let snapshot = conversation.log().clone();

        conversation.submit("rice", &Echo).await.unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(conversation.log().len(), 3);
    }
}
