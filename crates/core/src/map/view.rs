//! Owner of the live widget and the home marker.

use std::sync::Arc;

use crate::config::SiteConfig;
use crate::handles::{InfoWindowHandle, MarkerHandle};
use crate::locale::{LanguageCode, LocalizationStore, TextKey};
use crate::map::GeoPoint;
use crate::map::widget::{MapBackend, MapOptions, MapWidget, MarkerOptions, WidgetError};
use crate::overlay::OverlayToggleManager;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HomeMarker {
    pub marker: MarkerHandle,
    pub info_window: InfoWindowHandle,
}

pub struct MapViewController<B: MapBackend> {
    backend: B,
    config: Arc<SiteConfig>,
    widget: Option<B::Widget>,
    home: Option<HomeMarker>,
}

impl<B: MapBackend> MapViewController<B> {
    pub fn new(backend: B, config: Arc<SiteConfig>) -> Self {
        Self {
            backend,
            config,
            widget: None,
            home: None,
        }
    }

    /// Creates the widget around the home location, places the home marker
    /// and opens its info window. Without a map container this does nothing.
    pub fn initialize(&mut self, store: &LocalizationStore) {
        if self.widget.is_some() {
            tracing::debug!("map already initialized");
            return;
        }

        let home = &self.config.locations.home;
        let options = MapOptions {
            center: home.position,
            zoom: self.config.map.zoom,
            locale: store.widget_locale().to_owned(),
            map_type_control: self.config.map.map_type_control,
            street_view_control: self.config.map.street_view_control,
            fullscreen_control: self.config.map.fullscreen_control,
        };

        let mut widget = match self.backend.create_map(options) {
            Ok(widget) => widget,
            Err(WidgetError::ContainerMissing(container)) => {
                tracing::debug!(%container, "no map container, skipping map setup");
                return;
            }
        };

        let marker = widget.create_marker(MarkerOptions {
            position: home.position,
            title: home.title.clone(),
            icon: None,
        });
        let info_window = widget.create_info_window(store.text(TextKey::HomeInfo));
        widget.bind_click(marker, info_window);
        widget.open_info_window(info_window, marker);

        tracing::info!(locale = widget.locale(), "map initialized");
        self.home = Some(HomeMarker {
            marker,
            info_window,
        });
        self.widget = Some(widget);
    }

    /// Switches the selected language and rewrites every visible text in
    /// place. Markers and lines are left where they are.
    pub fn set_language(
        &mut self,
        lang: LanguageCode,
        store: &mut LocalizationStore,
        overlays: &OverlayToggleManager,
    ) {
        store.select(lang);
        tracing::info!(%lang, "language selected");

        let Some(widget) = self.widget.as_mut() else {
            return;
        };

        if let Some(home) = self.home {
            widget.set_info_window_content(home.info_window, store.text(TextKey::HomeInfo));
        }
        overlays.refresh_text(widget, store);
    }

    /// Rebuilds the widget so its own chrome (controls, map labels) follows
    /// `lang`. A widget's locale cannot change after construction, so this is
    /// the only way to get there. Visible overlays are drawn again on the new
    /// widget at the same positions.
    pub fn reinitialize_map_for_locale(
        &mut self,
        lang: LanguageCode,
        store: &mut LocalizationStore,
        overlays: &mut OverlayToggleManager,
    ) {
        store.select(lang);

        if let Some(widget) = &self.widget {
            if widget.locale() == store.widget_locale() {
                tracing::debug!(locale = widget.locale(), "widget locale unchanged");
                return;
            }
        }

        tracing::info!(locale = store.widget_locale(), "rebuilding map widget");
        self.widget = None;
        self.home = None;
        self.initialize(store);

        let home = self.home_position();
        match self.widget.as_mut() {
            Some(widget) => overlays.reattach(widget, store, home),
            None => overlays.forget(),
        }
    }

    /// Puts the viewport back on the home location at the configured zoom.
    pub fn recenter_home(&mut self) {
        let zoom = self.config.map.zoom;
        let center = self.config.locations.home.position;
        if let Some(widget) = self.widget.as_mut() {
            widget.set_center(center);
            widget.set_zoom(zoom);
        }
    }

    /// Where the home marker currently sits.
    pub fn home_position(&self) -> GeoPoint {
        self.widget
            .as_ref()
            .zip(self.home)
            .and_then(|(widget, home)| widget.marker_position(home.marker))
            .unwrap_or(self.config.locations.home.position)
    }

    pub fn home(&self) -> Option<HomeMarker> {
        self.home
    }

    pub fn widget(&self) -> Option<&B::Widget> {
        self.widget.as_ref()
    }

    pub fn widget_mut(&mut self) -> Option<&mut B::Widget> {
        self.widget.as_mut()
    }

    pub fn is_initialized(&self) -> bool {
        self.widget.is_some()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn config(&self) -> &Arc<SiteConfig> {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::map::scene::{SceneBackend, SceneMap};
    use crate::overlay::Visibility;

    struct Fixture {
        store: LocalizationStore,
        view: MapViewController<SceneBackend>,
        overlays: OverlayToggleManager,
    }

    fn fixture(backend: SceneBackend) -> Fixture {
        let config = Arc::new(SiteConfig::embedded().unwrap());
        Fixture {
            store: LocalizationStore::new(Arc::clone(&config)),
            view: MapViewController::new(backend, config),
            overlays: OverlayToggleManager::new(),
        }
    }

    fn initialized() -> Fixture {
        let mut f = fixture(SceneBackend::new(Default::default()));
        f.view.initialize(&f.store);
        f
    }

    fn widget(f: &Fixture) -> &SceneMap {
        f.view.widget().unwrap()
    }

    #[test]
    fn test_initialize_places_home_marker_with_open_window() {
        let f = initialized();
        let map = widget(&f);
        let home = f.view.home().unwrap();

        assert_eq!(map.center(), GeoPoint::new(37.290236, 127.017845));
        assert_eq!(map.zoom(), 16);
        assert_eq!(map.locale(), "en");
        assert!(!map.options().map_type_control);
        assert!(map.options().fullscreen_control);

        let marker = map.marker(home.marker).unwrap();
        assert_eq!(marker.title, "Accommodation Location");
        assert_eq!(marker.position, GeoPoint::new(37.290236, 127.017845));

        let window = map.info_window(home.info_window).unwrap();
        assert!(window.open);
        assert!(window.content.contains("Check-in: From 3:00 PM"));
    }

    #[test]
    fn test_home_click_reopens_window() {
        let mut f = initialized();
        let home = f.view.home().unwrap();
        let map = f.view.widget_mut().unwrap();

        map.close_info_window(home.info_window);
        assert!(!map.info_window(home.info_window).unwrap().open);

        assert!(map.click(home.marker));
        assert!(map.info_window(home.info_window).unwrap().open);
    }

    #[test]
    fn test_missing_container_is_a_silent_no_op() {
        let mut f = fixture(SceneBackend::without_container(Default::default()));
        f.view.initialize(&f.store);

        assert!(!f.view.is_initialized());
        assert!(f.view.home().is_none());
        assert_eq!(f.view.home_position(), GeoPoint::new(37.290236, 127.017845));

        // language changes still work without a map
        f.view.set_language(LanguageCode::Ja, &mut f.store, &f.overlays);
        assert_eq!(f.store.selected(), LanguageCode::Ja);
    }

    #[test]
    fn test_initialize_twice_keeps_first_widget() {
        let mut f = initialized();
        f.view.initialize(&f.store);
        assert_eq!(f.view.backend().maps_created(), 1);
    }

    #[test]
    fn test_set_language_rewrites_home_window_in_place() {
        let mut f = initialized();
        let home = f.view.home().unwrap();

        f.view.set_language(LanguageCode::Ko, &mut f.store, &f.overlays);

        let map = widget(&f);
        assert_eq!(f.view.home(), Some(home));
        assert!(map.info_window(home.info_window).unwrap().content.contains("체크인"));
        // chrome locale only changes through a rebuild
        assert_eq!(map.locale(), "en");
    }

    #[test]
    fn test_reinitialize_builds_localized_widget() {
        let mut f = initialized();
        f.view
            .reinitialize_map_for_locale(LanguageCode::Zh, &mut f.store, &mut f.overlays);

        let map = widget(&f);
        assert_eq!(map.locale(), "zh-CN");
        assert_eq!(f.view.backend().maps_created(), 2);

        let home = f.view.home().unwrap();
        let window = map.info_window(home.info_window).unwrap();
        assert!(window.open);
        assert!(window.content.contains("入住时间"));
    }

    #[test]
    fn test_reinitialize_same_locale_is_skipped() {
        let mut f = initialized();
        f.view
            .reinitialize_map_for_locale(LanguageCode::En, &mut f.store, &mut f.overlays);
        assert_eq!(f.view.backend().maps_created(), 1);
    }

    #[test]
    fn test_failed_rebuild_hides_overlays() {
        let mut f = initialized();
        f.overlays.toggle_transit(&mut f.view, &f.store);
        f.overlays.toggle_parking(&mut f.view, &f.store);
        assert!(f.overlays.transit().is_present());
        assert!(f.overlays.parking().is_present());

        f.view.backend_mut().set_container_present(false);
        f.view
            .reinitialize_map_for_locale(LanguageCode::Ko, &mut f.store, &mut f.overlays);

        assert!(!f.view.is_initialized());
        assert!(f.view.home().is_none());
        assert_eq!(f.overlays.transit().visibility(), Visibility::Hidden);
        assert_eq!(f.overlays.parking().visibility(), Visibility::Hidden);
        assert_eq!(f.store.selected(), LanguageCode::Ko);

        assert_eq!(
            f.overlays.toggle_transit(&mut f.view, &f.store),
            Visibility::Hidden
        );
        assert_eq!(
            f.overlays.toggle_parking(&mut f.view, &f.store),
            Visibility::Hidden
        );
    }

    #[test]
    fn test_recenter_home() {
        let mut f = initialized();
        let map = f.view.widget_mut().unwrap();
        map.set_center(GeoPoint::new(0.0, 0.0));
        map.set_zoom(3);

        f.view.recenter_home();
        let map = widget(&f);
        assert_eq!(map.center(), GeoPoint::new(37.290236, 127.017845));
        assert_eq!(map.zoom(), 16);
    }
}
