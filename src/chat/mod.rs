pub mod conversation;
pub mod fallback;
pub mod fsm;
pub mod message;

pub use conversation::*;
pub use fallback::{FallbackResponder, bot_response};
pub use fsm::{ChatEvent, ChatState, ChatStateMachine};
pub use message::*;
