//! Reading bot replies aloud.
//!
//! [`SpeechPlayer`] picks a language tag from the scripts in the text and
//! hands the utterance to a [`SpeechSynthesizer`], cancelling whatever was
//! playing before so at most one utterance is active.

mod language;
mod synthesizer;

pub use language::*;
pub use synthesizer::*;

use crate::{Error, Result};
use tracing::{info, warn};

pub struct SpeechPlayer {
    synthesizer: Box<dyn SpeechSynthesizer>,
}

impl SpeechPlayer {
    pub fn new(synthesizer: impl SpeechSynthesizer + 'static) -> Self {
        Self {
            synthesizer: Box::new(synthesizer),
        }
    }

    pub fn is_supported(&self) -> bool {
        self.synthesizer.is_available()
    }

    /// Speaks `text` and returns the tag it was spoken with.
    ///
    /// Fails with [`Error::SpeechUnsupported`] when no synthesizer is
    /// available; its message is the notice to show the user.
    pub async fn speak(&self, text: &str) -> Result<LanguageTag> {
        if !self.synthesizer.is_available() {
            warn!("Speech synthesis requested but not supported");
            return Err(Error::SpeechUnsupported);
        }

        self.synthesizer.cancel().await?;

        let tag = detect_language_tag(text);
        let utterance = Utterance {
            text: text.to_string(),
            tag,
        };
        self.synthesizer.speak(&utterance).await?;

        info!("Speaking {} characters as {}", text.chars().count(), tag);
        Ok(tag)
    }

    /// Stops any utterance still playing.
    pub async fn stop(&self) -> Result<()> {
        self.synthesizer.cancel().await
    }
}
