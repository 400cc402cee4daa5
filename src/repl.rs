//! Line-oriented chat front end used by the `farm-advisor` binary.

use crate::{
    Error, Result,
    chat::{Conversation, Role, SUGGESTED_QUESTIONS, SubmitOutcome},
    client::Responder,
    speech::SpeechPlayer,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{info, warn};

const PROMPT: &str = "> ";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Exit,
    Ask {
        question: String,
        language: Option<String>,
    },
    SetLanguage(String),
    ShowLanguage,
    Speak,
    History,
    Suggest,
    Help,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();

        match line.to_lowercase().as_str() {
            "exit" | "quit" => return Command::Exit,
            "/speak" => return Command::Speak,
            "/history" => return Command::History,
            "/suggest" => return Command::Suggest,
            "/help" => return Command::Help,
            _ => {}
        }

        let mut words = line.split_whitespace();
        if words.next().is_some_and(|w| w.eq_ignore_ascii_case("/lang")) {
            return match words.next() {
                Some(code) => Command::SetLanguage(code.to_string()),
                None => Command::ShowLanguage,
            };
        }

        // `question | language` asks with a one-off language.
        if let Some((question, language)) = line.split_once('|') {
            let language = language.trim();
            return Command::Ask {
                question: question.trim().to_string(),
                language: (!language.is_empty()).then(|| language.to_string()),
            };
        }

        Command::Ask {
            question: line.to_string(),
            language: None,
        }
    }
}

pub struct Repl {
    conversation: Conversation,
    responder: Box<dyn Responder>,
    speech: SpeechPlayer,
}

impl Repl {
    pub fn new(
        conversation: Conversation,
        responder: Box<dyn Responder>,
        speech: SpeechPlayer,
    ) -> Self {
        Self {
            conversation,
            responder,
            speech,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Reads commands from `input` until `exit` or end of input.
    pub async fn run<R, W>(&mut self, input: R, output: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!(session_id = %self.conversation.session_id(), "Chat session started");

        if let Some(greeting) = self.conversation.log().last() {
            write_entry(output, greeting.role, &greeting.display_time(), &greeting.content)
                .await?;
        }

        let mut lines = input.lines();
        loop {
            output.write_all(PROMPT.as_bytes()).await?;
            output.flush().await?;

            let Some(line) = lines.next_line().await? else {
                break;
            };

            match Command::parse(&line) {
                Command::Exit => {
                    output.write_all(b"Goodbye, farmer!\n").await?;
                    break;
                }
                Command::Ask { question, language } => {
                    self.ask(&question, language.as_deref(), output).await?;
                }
                Command::SetLanguage(code) => {
                    self.conversation.set_language(code);
                    let line = format!("Language set to {}\n", self.conversation.language());
                    output.write_all(line.as_bytes()).await?;
                }
                Command::ShowLanguage => {
                    let line = format!("Current language: {}\n", self.conversation.language());
                    output.write_all(line.as_bytes()).await?;
                }
                Command::Speak => self.speak_last(output).await?,
                Command::History => {
                    for entry in self.conversation.log().iter() {
                        write_entry(output, entry.role, &entry.display_time(), &entry.content)
                            .await?;
                    }
                }
                Command::Suggest => {
                    for question in SUGGESTED_QUESTIONS {
                        output.write_all(format!("  - {question}\n").as_bytes()).await?;
                    }
                }
                Command::Help => output.write_all(HELP.as_bytes()).await?,
            }
        }

        if let Err(e) = self.speech.stop().await {
            warn!("Failed to stop speech playback: {}", e);
        }

        output.flush().await?;
        info!(session_id = %self.conversation.session_id(), "Chat session ended");
        Ok(())
    }

    async fn ask<W>(&mut self, question: &str, language: Option<&str>, output: &mut W) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let outcome = self
            .conversation
            .submit_in(question, language, self.responder.as_ref())
            .await?;

        match outcome {
            SubmitOutcome::Rejected { hint } => {
                output.write_all(format!("{hint}\n").as_bytes()).await?;
            }
            SubmitOutcome::Answered(message) => {
                write_entry(output, message.role, &message.display_time(), &message.content)
                    .await?;
            }
        }
        Ok(())
    }

    async fn speak_last<W>(&self, output: &mut W) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let Some(message) = self.conversation.log().last_bot() else {
            output.write_all(b"Nothing to read aloud yet.\n").await?;
            return Ok(());
        };

        match self.speech.speak(&message.content).await {
            Ok(tag) => {
                output
                    .write_all(format!("Listening to FarmAI ({tag})\n").as_bytes())
                    .await?;
            }
            Err(e @ (Error::SpeechUnsupported | Error::Speech(_))) => {
                warn!("Speech playback failed: {}", e);
                output.write_all(format!("{e}\n").as_bytes()).await?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }
}

const HELP: &str = "\
Type a farming question, or `question | language` to ask in another language.
  /lang [code]  show or change the answer language
  /speak        read the last answer aloud
  /history      show the conversation so far
  /suggest      show example questions
  exit, quit    leave
";

async fn write_entry<W>(output: &mut W, role: Role, time: &str, content: &str) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let speaker = match role {
        Role::User => "You",
        Role::Bot => "FarmAI",
    };
    output
        .write_all(format!("[{time}] {speaker}: {content}\n").as_bytes())
        .await?;
    Ok(())
}
