//! # chaeum-core
//!
//! View-state model of the Chaeum guesthouse location page: a map widget
//! centred on the guesthouse, a transit overlay (station marker and route
//! line), a parking overlay (markers and legend), and a four-language text
//! switcher.
//!
//! The mapping widget is reached only through [`map::widget::MapBackend`]
//! and [`map::widget::MapWidget`]. [`map::scene::SceneBackend`] implements
//! them in memory.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use chaeum_core::prelude::*;
//!
//! let config = Arc::new(SiteConfig::embedded().unwrap());
//! let backend = SceneBackend::new(config.map.viewport);
//! let mut page = Page::new(config, backend);
//! page.initialize();
//!
//! page.select_language(LanguageCode::Ko);
//! assert_eq!(page.toggle_parking(), Visibility::Visible);
//! assert_eq!(page.button_labels().parking, "주차장 숨기기");
//! ```

pub mod config;
pub mod content;
pub mod directions;
pub mod handles;
pub mod locale;
pub mod map;
pub mod overlay;
pub mod page;

pub mod prelude {
    pub use crate::config::{ParkingCategory, ParkingSpot, SiteConfig};
    pub use crate::content::{
        ContentLoader, ContentOutcome, ContentRequest, ContentResponse, FragmentFetcher,
    };
    pub use crate::directions::{DirectionsLink, TravelMode};
    pub use crate::locale::{LanguageCode, LocalizationStore, LocalizedText, TextKey};
    pub use crate::map::scene::{SceneBackend, SceneMap};
    pub use crate::map::view::MapViewController;
    pub use crate::map::widget::{MapBackend, MapWidget};
    pub use crate::map::{GeoBounds, GeoPoint};
    pub use crate::overlay::{OverlayState, OverlayToggleManager, Visibility};
    pub use crate::page::{ButtonLabels, Page};
}
