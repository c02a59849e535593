//! Deep link into the external maps service's directions page.

use std::fmt;

use crate::locale::LocalizationStore;
use crate::map::GeoPoint;

const DIRECTIONS_URL: &str = "https://www.google.com/maps/dir/?api=1";

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum TravelMode {
    Transit,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DirectionsLink {
    pub origin: GeoPoint,
    pub destination: GeoPoint,
    pub mode: TravelMode,
    /// Locale hint for the directions page.
    pub locale: String,
}

impl DirectionsLink {
    /// Transit directions from the station to the guesthouse, localized for
    /// the selected language.
    pub fn station_to_home(store: &LocalizationStore) -> Self {
        let locations = &store.config().locations;
        Self {
            origin: locations.station.position,
            destination: locations.home.position,
            mode: TravelMode::Transit,
            locale: store.widget_locale().to_owned(),
        }
    }

    pub fn url(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DirectionsLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{DIRECTIONS_URL}&origin={},{}&destination={},{}&travelmode={}&hl={}",
            self.origin.latitude,
            self.origin.longitude,
            self.destination.latitude,
            self.destination.longitude,
            self.mode,
            self.locale
        )
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::SiteConfig;
    use crate::locale::LanguageCode;

    #[test]
    fn test_station_to_home_link() {
        let store = LocalizationStore::new(Arc::new(SiteConfig::embedded().unwrap()));
        let link = DirectionsLink::station_to_home(&store);

        assert_eq!(
            link.url(),
            "https://www.google.com/maps/dir/?api=1&origin=37.265961,127.00011\
             &destination=37.290236,127.017845&travelmode=transit&hl=en"
        );
    }

    #[test]
    fn test_locale_hint_follows_language() {
        let mut store = LocalizationStore::new(Arc::new(SiteConfig::embedded().unwrap()));
        store.select(LanguageCode::Zh);

        let link = DirectionsLink::station_to_home(&store);
        assert_eq!(link.locale, "zh-CN");
        assert!(link.url().ends_with("&travelmode=transit&hl=zh-CN"));
    }

    #[test]
    fn test_travel_mode_names() {
        assert_eq!(TravelMode::Transit.to_string(), "transit");
    }
}
