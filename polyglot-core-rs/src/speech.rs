// polyglot-core-rs/src/speech.rs
//
// Speech input/output capability. Implementations live with the UI (the
// browser's recognition and synthesis APIs); the core only defines the seam.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpeechError {
    #[error("speech capability is not supported on this platform")]
    Unsupported,

    #[error("microphone permission denied")]
    PermissionDenied,

    #[error("no speech was detected")]
    NoSpeech,

    #[error("no voice available for language {0}")]
    UnsupportedLanguage(String),

    #[error("speech capture was aborted")]
    Aborted,

    #[error("speech engine error: {0}")]
    Engine(String),
}

/// Speech-to-text and text-to-speech provided by the host environment
#[async_trait]
pub trait SpeechCapability: Send + Sync {
    /// Capture one utterance and return its transcript
    async fn start_capture(&self) -> Result<String, SpeechError>;

    /// Read `text` aloud with a voice for `language_tag` (BCP-47, e.g. `es-ES`)
    async fn speak(&self, text: &str, language_tag: &str) -> Result<(), SpeechError>;
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::languages;

    /// Records what it was asked to say
    #[derive(Default)]
    struct RecordingSpeech {
        spoken: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl SpeechCapability for RecordingSpeech {
        async fn start_capture(&self) -> Result<String, SpeechError> {
            Err(SpeechError::NoSpeech)
        }

        async fn speak(&self, text: &str, language_tag: &str) -> Result<(), SpeechError> {
            if languages::find_by_tag(language_tag).is_none() {
                return Err(SpeechError::UnsupportedLanguage(language_tag.to_string()));
            }
            self.spoken
                .lock()
                .unwrap()
                .push((text.to_string(), language_tag.to_string()));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_capability_is_object_safe() {
        let speech: Box<dyn SpeechCapability> = Box::new(RecordingSpeech::default());

        assert_eq!(speech.start_capture().await, Err(SpeechError::NoSpeech));
        assert!(speech.speak("Hola", "es-ES").await.is_ok());
        assert_eq!(
            speech.speak("Hallo", "xx-XX").await,
            Err(SpeechError::UnsupportedLanguage("xx-XX".to_string()))
        );
    }
}
