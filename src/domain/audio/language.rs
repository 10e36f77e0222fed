use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// ISO 639-1 language codes supported by the synthesis pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LanguageCode {
    #[serde(rename = "it")]
    Italian,
    #[serde(rename = "ru")]
    Russian,
    #[serde(rename = "en")]
    English,
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "de")]
    German,
    #[serde(rename = "pt")]
    Portuguese,
    #[serde(rename = "ja")]
    Japanese,
    #[serde(rename = "ko")]
    Korean,
    #[serde(rename = "zh")]
    Chinese,
}

impl LanguageCode {
    /// Get the ISO 639-1 code as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageCode::Italian => "it",
            LanguageCode::Russian => "ru",
            LanguageCode::English => "en",
            LanguageCode::Spanish => "es",
            LanguageCode::French => "fr",
            LanguageCode::German => "de",
            LanguageCode::Portuguese => "pt",
            LanguageCode::Japanese => "ja",
            LanguageCode::Korean => "ko",
            LanguageCode::Chinese => "zh",
        }
    }

    /// Human-readable language name shown in the API
    pub fn display_name(&self) -> &'static str {
        match self {
            LanguageCode::Italian => "Italian",
            LanguageCode::Russian => "Russian",
            LanguageCode::English => "English",
            LanguageCode::Spanish => "Spanish",
            LanguageCode::French => "French",
            LanguageCode::German => "German",
            LanguageCode::Portuguese => "Portuguese",
            LanguageCode::Japanese => "Japanese",
            LanguageCode::Korean => "Korean",
            LanguageCode::Chinese => "Chinese",
        }
    }

    /// Every supported language, in API listing order
    pub fn all() -> &'static [LanguageCode] {
        &[
            LanguageCode::Italian,
            LanguageCode::Russian,
            LanguageCode::English,
            LanguageCode::Spanish,
            LanguageCode::French,
            LanguageCode::German,
            LanguageCode::Portuguese,
            LanguageCode::Japanese,
            LanguageCode::Korean,
            LanguageCode::Chinese,
        ]
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LanguageCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LanguageCode::all()
            .iter()
            .find(|code| code.as_str() == s)
            .copied()
            .ok_or_else(|| format!("Unsupported language code: {}", s))
    }
}

/// Code -> display name mapping for the capability endpoint
pub fn supported_languages() -> BTreeMap<&'static str, &'static str> {
    LanguageCode::all()
        .iter()
        .map(|code| (code.as_str(), code.display_name()))
        .collect()
}
