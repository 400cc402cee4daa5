use super::LanguageTag;
use crate::{Error, Result};
use async_trait::async_trait;
use std::{env, path::Path};
use tokio::{
    process::{Child, Command},
    sync::Mutex,
};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub tag: LanguageTag,
}

/// On-device text-to-speech backend.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    fn is_available(&self) -> bool;

    /// Stops the current utterance, if any.
    async fn cancel(&self) -> Result<()>;

    /// Starts playback and returns without waiting for it to finish.
    async fn speak(&self, utterance: &Utterance) -> Result<()>;
}

/// Synthesizer that is never available.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSynthesizer;

#[async_trait]
impl SpeechSynthesizer for NullSynthesizer {
    fn is_available(&self) -> bool {
        false
    }

    async fn cancel(&self) -> Result<()> {
        Ok(())
    }

    async fn speak(&self, _utterance: &Utterance) -> Result<()> {
        Err(Error::SpeechUnsupported)
    }
}

/// Speaks through an espeak-ng compatible program: `<program> -v <voice> <text>`.
#[derive(Debug)]
pub struct CommandSynthesizer {
    program: String,
    current: Mutex<Option<Child>>,
}

impl CommandSynthesizer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            current: Mutex::new(None),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for CommandSynthesizer {
    fn is_available(&self) -> bool {
        locate_program(&self.program)
    }

    async fn cancel(&self) -> Result<()> {
        let Some(mut child) = self.current.lock().await.take() else {
            return Ok(());
        };

        if child.try_wait()?.is_some() {
            return Ok(());
        }

        debug!("Cancelling in-progress utterance");
        child.kill().await?;
        Ok(())
    }

    async fn speak(&self, utterance: &Utterance) -> Result<()> {
        let child = Command::new(&self.program)
            .arg("-v")
            .arg(utterance.tag.voice())
            .arg(&utterance.text)
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                warn!("Failed to start {}: {}", self.program, e);
                Error::speech(format!("cannot start {}: {e}", self.program))
            })?;

        *self.current.lock().await = Some(child);
        Ok(())
    }
}

/// True if `program` is a path to a file or names a file on `PATH`.
fn locate_program(program: &str) -> bool {
    let path = Path::new(program);
    if path.components().count() > 1 {
        return path.is_file();
    }

    env::var_os("PATH")
        .map(|paths| env::split_paths(&paths).any(|dir| dir.join(program).is_file()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utterance() -> Utterance {
        Utterance {
            text: "hello".to_string(),
            tag: LanguageTag::English,
        }
    }

    #[tokio::test]
    async fn test_null_synthesizer_is_unsupported() {
        let synth = NullSynthesizer;
        assert!(!synth.is_available());
        assert!(synth.cancel().await.is_ok());
        assert!(matches!(
            synth.speak(&utterance()).await,
            Err(Error::SpeechUnsupported)
        ));
    }

    #[test]
    fn test_missing_program_is_unavailable() {
        let synth = CommandSynthesizer::new("definitely-not-a-speech-engine-xyz");
        assert!(!synth.is_available());

        let synth = CommandSynthesizer::new("/nonexistent/dir/espeak-ng");
        assert!(!synth.is_available());
    }

    #[tokio::test]
    async fn test_cancel_without_utterance_is_noop() {
        let synth = CommandSynthesizer::new("espeak-ng");
        assert!(synth.cancel().await.is_ok());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_speak_then_cancel_with_stand_in_program() {
        // `true` ignores its arguments and exits at once.
        let synth = CommandSynthesizer::new("true");
        assert!(synth.is_available());

        synth.speak(&utterance()).await.unwrap();
        synth.cancel().await.unwrap();
        synth.cancel().await.unwrap();
    }

    #[tokio::test]
    async fn test_speak_with_missing_program_fails() {
        let synth = CommandSynthesizer::new("definitely-not-a-speech-engine-xyz");
        assert!(matches!(
            synth.speak(&utterance()).await,
            Err(Error::Speech(_))
        ));
    }
}
