use crate::{Error, Result};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatState {
    Idle,
    AwaitingResponse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatEvent {
    /// A non-empty question was accepted.
    Submit,
    /// The responder produced its reply.
    Settle,
}

/// Turn-taking state of a conversation: one question in flight at most.
#[derive(Debug)]
pub struct ChatStateMachine {
    state: ChatState,
}

impl Default for ChatStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatStateMachine {
    pub fn new() -> Self {
        Self {
            state: ChatState::Idle,
        }
    }

    pub fn current_state(&self) -> ChatState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == ChatState::Idle
    }

    pub fn transition(&mut self, event: ChatEvent) -> Result<()> {
        debug!("Chat FSM processing event {:?} in state {:?}", event, self.state);

        let new_state = match (self.state, event) {
            (ChatState::Idle, ChatEvent::Submit) => ChatState::AwaitingResponse,
            (ChatState::AwaitingResponse, ChatEvent::Settle) => ChatState::Idle,
            _ => {
                warn!(
                    "Invalid chat transition from {:?} with event {:?}",
                    self.state, event
                );
                return Err(Error::InvalidTransition {
                    current: format!("{:?}", self.state),
                    requested: format!("{event:?}"),
                });
            }
        };

        info!(
            "Chat state transition: {:?} -> {:?} (event: {:?})",
            self.state, new_state, event
        );
        self.state = new_state;
        Ok(())
    }
}
