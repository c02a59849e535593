use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::locale::LanguageCode;

/// Names of the fixed text tables shown on the page.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TextKey {
    HomeInfo,
    StationInfo,
    TransitShow,
    TransitHide,
    DirectionsButton,
    ParkingShow,
    ParkingHide,
    LegendTitle,
    LegendFree,
    LegendPaid,
}

/// One piece of text (plain or an HTML fragment) in every available language.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedText(BTreeMap<LanguageCode, String>);

impl LocalizedText {
    pub fn new(entries: impl IntoIterator<Item = (LanguageCode, String)>) -> Self {
        Self(entries.into_iter().collect())
    }

    /// Text for `lang`, or the English text when that language is missing.
    pub fn get(&self, lang: LanguageCode) -> &str {
        self.0
            .get(&lang)
            .filter(|text| !text.is_empty())
            .or_else(|| self.0.get(&LanguageCode::En))
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn has_fallback(&self) -> bool {
        self.0
            .get(&LanguageCode::En)
            .is_some_and(|text| !text.trim().is_empty())
    }

    pub fn languages(&self) -> impl Iterator<Item = LanguageCode> + '_ {
        self.0.keys().copied()
    }
}

impl<const N: usize> From<[(LanguageCode, &str); N]> for LocalizedText {
    fn from(entries: [(LanguageCode, &str); N]) -> Self {
        Self::new(entries.map(|(lang, text)| (lang, text.to_owned())))
    }
}
