use std::sync::Arc;

use crate::config::SiteConfig;
use crate::locale::{LanguageCode, LocalizedText, TextKey};

/// Text lookups plus the one piece of UI state everything reads: the
/// selected language.
#[derive(Clone, Debug)]
pub struct LocalizationStore {
    config: Arc<SiteConfig>,
    selected: LanguageCode,
}

impl LocalizationStore {
    pub fn new(config: Arc<SiteConfig>) -> Self {
        Self {
            config,
            selected: LanguageCode::default(),
        }
    }

    pub fn selected(&self) -> LanguageCode {
        self.selected
    }

    pub(crate) fn select(&mut self, lang: LanguageCode) {
        self.selected = lang;
    }

    /// Text of `key` in `lang`, falling back to English.
    pub fn get_text(&self, key: TextKey, lang: LanguageCode) -> &str {
        self.config
            .text(key)
            .map(|text| text.get(lang))
            .unwrap_or_default()
    }

    /// Text of `key` in the selected language.
    pub fn text(&self, key: TextKey) -> &str {
        self.get_text(key, self.selected)
    }

    /// Picks the selected language out of an ad-hoc text such as a parking label.
    pub fn pick<'a>(&self, text: &'a LocalizedText) -> &'a str {
        text.get(self.selected)
    }

    pub fn widget_locale(&self) -> &str {
        self.config.widget_locale(self.selected)
    }

    pub fn config(&self) -> &Arc<SiteConfig> {
        &self.config
    }
}
