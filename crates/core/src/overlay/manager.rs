use crate::locale::{LocalizationStore, TextKey};
use crate::map::GeoPoint;
use crate::map::view::MapViewController;
use crate::map::widget::{MapBackend, MapWidget};
use crate::overlay::{OverlayState, ParkingOverlay, TransitOverlay, Visibility};

/// The transit and parking toggles.
///
/// Each toggle flips between hidden and visible. Button labels are computed
/// from the current state and language whenever they are needed.
#[derive(Debug, Default)]
pub struct OverlayToggleManager {
    transit: OverlayState<TransitOverlay>,
    parking: OverlayState<ParkingOverlay>,
}

impl OverlayToggleManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transit(&self) -> &OverlayState<TransitOverlay> {
        &self.transit
    }

    pub fn parking(&self) -> &OverlayState<ParkingOverlay> {
        &self.parking
    }

    pub fn toggle_transit<B: MapBackend>(
        &mut self,
        view: &mut MapViewController<B>,
        store: &LocalizationStore,
    ) -> Visibility {
        let home = view.home_position();
        let Some(widget) = view.widget_mut() else {
            tracing::debug!("no map, transit toggle ignored");
            return self.transit.visibility();
        };

        match self.transit.take() {
            None => {
                self.transit = OverlayState::Visible(TransitOverlay::render(widget, store, home));
            }
            Some(overlay) => {
                overlay.remove(widget);
                view.recenter_home();
            }
        }

        let visibility = self.transit.visibility();
        tracing::info!(%visibility, "transit overlay toggled");
        visibility
    }

    pub fn toggle_parking<B: MapBackend>(
        &mut self,
        view: &mut MapViewController<B>,
        store: &LocalizationStore,
    ) -> Visibility {
        let Some(widget) = view.widget_mut() else {
            tracing::debug!("no map, parking toggle ignored");
            return self.parking.visibility();
        };

        match self.parking.take() {
            None => {
                let overlay = ParkingOverlay::render(widget, store);
                tracing::debug!(markers = overlay.markers.len(), "parking markers placed");
                self.parking = OverlayState::Visible(overlay);
            }
            Some(overlay) => overlay.remove(widget),
        }

        let visibility = self.parking.visibility();
        tracing::info!(%visibility, "parking overlay toggled");
        visibility
    }

    pub fn transit_label<'a>(&self, store: &'a LocalizationStore) -> &'a str {
        store.text(match self.transit.visibility() {
            Visibility::Hidden => TextKey::TransitShow,
            Visibility::Visible => TextKey::TransitHide,
        })
    }

    pub fn parking_label<'a>(&self, store: &'a LocalizationStore) -> &'a str {
        store.text(match self.parking.visibility() {
            Visibility::Hidden => TextKey::ParkingShow,
            Visibility::Visible => TextKey::ParkingHide,
        })
    }

    /// Rewrites the text of every visible element for the selected language.
    pub(crate) fn refresh_text<W: MapWidget>(&self, widget: &mut W, store: &LocalizationStore) {
        if let Some(transit) = self.transit.handle() {
            transit.refresh_text(widget, store);
        }
        if let Some(parking) = self.parking.handle() {
            parking.refresh_text(widget, store);
        }
    }

    /// Draws the visible overlays on a freshly built widget. Handles from the
    /// previous widget are dropped with it.
    pub(crate) fn reattach<W: MapWidget>(
        &mut self,
        widget: &mut W,
        store: &LocalizationStore,
        home: GeoPoint,
    ) {
        if self.transit.take().is_some() {
            self.transit = OverlayState::Visible(TransitOverlay::render(widget, store, home));
        }
        if self.parking.take().is_some() {
            self.parking = OverlayState::Visible(ParkingOverlay::render(widget, store));
        }
    }

    /// Drops every overlay without touching a widget, for when the widget
    /// they lived on is gone.
    pub(crate) fn forget(&mut self) {
        self.transit = OverlayState::Hidden;
        self.parking = OverlayState::Hidden;
    }
}
