use std::{fmt, ops::RangeInclusive};

const TELUGU: RangeInclusive<char> = '\u{0C00}'..='\u{0C7F}';
const KANNADA: RangeInclusive<char> = '\u{0C80}'..='\u{0CFF}';
const DEVANAGARI: RangeInclusive<char> = '\u{0900}'..='\u{097F}';

/// Spoken-language tag for an utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageTag {
    Telugu,
    Kannada,
    Hindi,
    English,
}

impl LanguageTag {
    /// BCP 47 tag, e.g. `te-IN`.
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageTag::Telugu => "te-IN",
            LanguageTag::Kannada => "kn-IN",
            LanguageTag::Hindi => "hi-IN",
            LanguageTag::English => "en-US",
        }
    }

    /// Voice name understood by espeak-ng.
    pub fn voice(&self) -> &'static str {
        match self {
            LanguageTag::Telugu => "te",
            LanguageTag::Kannada => "kn",
            LanguageTag::Hindi => "hi",
            LanguageTag::English => "en-us",
        }
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Picks the speech language from the scripts present in `text`.
///
/// Any Telugu character wins, then Kannada, then Devanagari; otherwise
/// English.
pub fn detect_language_tag(text: &str) -> LanguageTag {
    let contains = |range: &RangeInclusive<char>| text.chars().any(|c| range.contains(&c));

    if contains(&TELUGU) {
        LanguageTag::Telugu
    } else if contains(&KANNADA) {
        LanguageTag::Kannada
    } else if contains(&DEVANAGARI) {
        LanguageTag::Hindi
    } else {
        LanguageTag::English
    }
}
