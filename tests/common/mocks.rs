use async_trait::async_trait;
use farm_advisor::{
    Result,
    client::Responder,
    speech::{SpeechSynthesizer, Utterance},
};
use std::sync::{Arc, Mutex};

/// Responder that records every question it is asked and replies with a
/// fixed string.
#[derive(Debug, Clone)]
pub struct RecordingResponder {
    pub calls: Arc<Mutex<Vec<(String, String)>>>,
    pub reply: String,
}

impl RecordingResponder {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            reply: reply.into(),
        }
    }

    pub fn get_calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Responder for RecordingResponder {
    async fn respond(&self, question: &str, language: &str) -> String {
        self.calls
            .lock()
            .unwrap()
            .push((question.to_string(), language.to_string()));
        self.reply.clone()
    }
}

/// Synthesizer that records `cancel`/`speak` calls in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSynthesizer {
    pub events: Arc<Mutex<Vec<String>>>,
}

impl RecordingSynthesizer {
    pub fn get_events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechSynthesizer for RecordingSynthesizer {
    fn is_available(&self) -> bool {
        true
    }

    async fn cancel(&self) -> Result<()> {
        self.events.lock().unwrap().push("cancel".to_string());
        Ok(())
    }

    async fn speak(&self, utterance: &Utterance) -> Result<()> {
        self.events
            .lock()
            .unwrap()
            .push(format!("speak:{}", utterance.tag));
        Ok(())
    }
}
