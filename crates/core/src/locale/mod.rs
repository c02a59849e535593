//! Languages, localized text tables and the selected-language store.

use serde::{Deserialize, Serialize};

pub mod store;
pub mod text;

pub use store::LocalizationStore;
pub use text::{LocalizedText, TextKey};

/// A language the page can be displayed in.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LanguageCode {
    #[default]
    En,
    Ko,
    Ja,
    Zh,
}

impl LanguageCode {
    /// Parses a language code, accepting region-qualified forms such as
    /// `zh-CN` or `ko_KR`. Anything unsupported resolves to English.
    pub fn parse_or_default(code: &str) -> Self {
        let primary = code
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        primary.parse().unwrap_or_else(|_| {
            tracing::debug!(code, "unsupported language code, using en");
            Self::En
        })
    }

    pub fn code(&self) -> &'static str {
        (*self).into()
    }
}
