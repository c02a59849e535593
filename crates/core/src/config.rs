//! Static site configuration: languages, coordinates, text tables and the
//! widget script credentials.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::locale::{LanguageCode, LocalizedText, TextKey};
use crate::map::GeoPoint;
use crate::map::widget::PolylineStyle;

const DEFAULT_SITE: &str = include_str!("../../../assets/site.json");

/// Overrides `maps_script.api_key` when set.
pub const API_KEY_ENV: &str = "CHAEUM_MAPS_API_KEY";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid site configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("text table `{0}` is missing")]
    MissingText(TextKey),

    #[error("{0} has no English text to fall back on")]
    MissingFallback(String),

    #[error("no widget locale for language `{0}`")]
    MissingWidgetLocale(LanguageCode),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 640,
            height: 400,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapSettings {
    pub zoom: u8,
    #[serde(default)]
    pub viewport: Viewport,
    #[serde(default)]
    pub map_type_control: bool,
    #[serde(default)]
    pub street_view_control: bool,
    #[serde(default)]
    pub fullscreen_control: bool,
    /// Rebuild the widget after a language change so its own chrome follows.
    #[serde(default = "default_true")]
    pub reinitialize_on_language_change: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub position: GeoPoint,
    pub title: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Locations {
    pub home: Place,
    pub station: Place,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Icons {
    pub station: String,
    pub free: String,
    pub paid: String,
}

impl Icons {
    pub fn for_category(&self, category: ParkingCategory) -> &str {
        match category {
            ParkingCategory::Free => &self.free,
            ParkingCategory::Paid => &self.paid,
        }
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ParkingCategory {
    Free,
    Paid,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParkingSpot {
    pub position: GeoPoint,
    pub category: ParkingCategory,
    pub label: LocalizedText,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapsScript {
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    pub callback: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContentSettings {
    /// File name of a language's fragment; `{lang}` is replaced by the code.
    pub path_pattern: String,
}

impl ContentSettings {
    pub fn path_for(&self, lang: LanguageCode) -> String {
        self.path_pattern.replace("{lang}", lang.code())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub widget_locales: BTreeMap<LanguageCode, String>,
    pub map: MapSettings,
    pub locations: Locations,
    pub icons: Icons,
    pub route: PolylineStyle,
    pub texts: BTreeMap<TextKey, LocalizedText>,
    pub parking: Vec<ParkingSpot>,
    pub maps_script: MapsScript,
    pub content: ContentSettings,
}

impl SiteConfig {
    /// The configuration compiled into the binary.
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::from_json(DEFAULT_SITE)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Applies environment overrides on top of the loaded values.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Applies overrides read through `lookup`. Empty values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(key) = lookup(API_KEY_ENV).filter(|key| !key.is_empty()) {
            tracing::debug!("using maps api key from {API_KEY_ENV}");
            self.maps_script.api_key = key;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for key in TextKey::iter() {
            let text = self.texts.get(&key).ok_or(ConfigError::MissingText(key))?;
            if !text.has_fallback() {
                return Err(ConfigError::MissingFallback(format!("text table `{key}`")));
            }
        }

        for (index, spot) in self.parking.iter().enumerate() {
            if !spot.label.has_fallback() {
                return Err(ConfigError::MissingFallback(format!("parking spot {index}")));
            }
        }

        for lang in LanguageCode::iter() {
            if !self.widget_locales.contains_key(&lang) {
                return Err(ConfigError::MissingWidgetLocale(lang));
            }
        }

        Ok(())
    }

    pub fn text(&self, key: TextKey) -> Option<&LocalizedText> {
        self.texts.get(&key)
    }

    /// Locale string handed to the map widget for `lang`.
    pub fn widget_locale(&self, lang: LanguageCode) -> &str {
        self.widget_locales
            .get(&lang)
            .or_else(|| self.widget_locales.get(&LanguageCode::En))
            .map(String::as_str)
            .unwrap_or("en")
    }

    /// URL of the widget script bundle localized for `lang`.
    pub fn maps_script_url(&self, lang: LanguageCode) -> String {
        let script = &self.maps_script;
        format!(
            "{}?key={}&callback={}&language={}",
            script.base_url,
            script.api_key,
            script.callback,
            self.widget_locale(lang)
        )
    }
}
