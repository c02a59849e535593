//! Application state of the location page and its event handlers.

use std::sync::Arc;

use serde::Serialize;

use crate::config::SiteConfig;
use crate::content::{ContentLoader, ContentOutcome, ContentRequest, ContentResponse, LoadedContent};
use crate::directions::DirectionsLink;
use crate::locale::{LanguageCode, LocalizationStore, TextKey};
use crate::map::view::MapViewController;
use crate::map::widget::MapBackend;
use crate::overlay::{OverlayToggleManager, Visibility};

/// Texts of the page's buttons for the current state and language.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ButtonLabels {
    pub transit: String,
    pub directions: String,
    pub parking: String,
}

impl ButtonLabels {
    /// Labels of a page in `lang` with both overlays hidden.
    pub fn hidden(store: &LocalizationStore, lang: LanguageCode) -> Self {
        Self {
            transit: store.get_text(TextKey::TransitShow, lang).to_owned(),
            directions: store.get_text(TextKey::DirectionsButton, lang).to_owned(),
            parking: store.get_text(TextKey::ParkingShow, lang).to_owned(),
        }
    }
}

/// Everything the page keeps between events. Only the handlers below
/// mutate it.
pub struct Page<B: MapBackend> {
    config: Arc<SiteConfig>,
    store: LocalizationStore,
    view: MapViewController<B>,
    overlays: OverlayToggleManager,
    content: ContentLoader,
}

impl<B: MapBackend> Page<B> {
    pub fn new(config: Arc<SiteConfig>, backend: B) -> Self {
        Self {
            store: LocalizationStore::new(Arc::clone(&config)),
            view: MapViewController::new(backend, Arc::clone(&config)),
            overlays: OverlayToggleManager::new(),
            content: ContentLoader::new(config.content.clone()),
            config,
        }
    }

    /// Page load: builds the map and requests the initial content.
    pub fn initialize(&mut self) -> ContentRequest {
        self.view.initialize(&self.store);
        self.content.request(self.store.selected())
    }

    /// Language selector click.
    pub fn select_language(&mut self, lang: LanguageCode) -> ContentRequest {
        self.view.set_language(lang, &mut self.store, &self.overlays);

        if self.config.map.reinitialize_on_language_change {
            self.view
                .reinitialize_map_for_locale(lang, &mut self.store, &mut self.overlays);
        }

        self.content.request(lang)
    }

    pub fn toggle_transit(&mut self) -> Visibility {
        self.overlays.toggle_transit(&mut self.view, &self.store)
    }

    pub fn toggle_parking(&mut self) -> Visibility {
        self.overlays.toggle_parking(&mut self.view, &self.store)
    }

    pub fn open_directions(&self) -> DirectionsLink {
        DirectionsLink::station_to_home(&self.store)
    }

    pub fn apply_content(&mut self, response: ContentResponse) -> ContentOutcome {
        self.content.complete(response)
    }

    pub fn button_labels(&self) -> ButtonLabels {
        ButtonLabels {
            transit: self.overlays.transit_label(&self.store).to_owned(),
            directions: self.store.text(TextKey::DirectionsButton).to_owned(),
            parking: self.overlays.parking_label(&self.store).to_owned(),
        }
    }

    pub fn language(&self) -> LanguageCode {
        self.store.selected()
    }

    pub fn content(&self) -> Option<&LoadedContent> {
        self.content.current()
    }

    pub fn store(&self) -> &LocalizationStore {
        &self.store
    }

    pub fn view(&self) -> &MapViewController<B> {
        &self.view
    }

    pub fn overlays(&self) -> &OverlayToggleManager {
        &self.overlays
    }

    pub fn widget(&self) -> Option<&B::Widget> {
        self.view.widget()
    }

    pub fn config(&self) -> &Arc<SiteConfig> {
        &self.config
    }
}
