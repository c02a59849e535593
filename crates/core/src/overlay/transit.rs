//! Station marker plus the line from the station to home.

use serde::Serialize;

use crate::handles::{InfoWindowHandle, MarkerHandle, PolylineHandle};
use crate::locale::{LocalizationStore, TextKey};
use crate::map::widget::{MapWidget, MarkerOptions};
use crate::map::{GeoBounds, GeoPoint};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TransitOverlay {
    pub station: MarkerHandle,
    pub info_window: InfoWindowHandle,
    pub route: PolylineHandle,
}

impl TransitOverlay {
    /// Draws the station marker with its (already open) info window and the
    /// route line, then fits the viewport around station and home.
    pub(crate) fn render<W: MapWidget>(
        widget: &mut W,
        store: &LocalizationStore,
        home: GeoPoint,
    ) -> Self {
        let config = store.config();
        let station_place = &config.locations.station;

        let station = widget.create_marker(MarkerOptions {
            position: station_place.position,
            title: station_place.title.clone(),
            icon: Some(config.icons.station.clone()),
        });
        let info_window = widget.create_info_window(store.text(TextKey::StationInfo));
        widget.bind_click(station, info_window);
        widget.open_info_window(info_window, station);

        let route = widget.create_polyline(&[station_place.position, home], &config.route);

        let station_position = widget.marker_position(station).unwrap_or(station_place.position);
        if let Some(bounds) = GeoBounds::from_points([station_position, home]) {
            widget.fit_bounds(bounds);
        }

        Self {
            station,
            info_window,
            route,
        }
    }

    pub(crate) fn refresh_text<W: MapWidget>(&self, widget: &mut W, store: &LocalizationStore) {
        widget.set_info_window_content(self.info_window, store.text(TextKey::StationInfo));
    }

    pub(crate) fn remove<W: MapWidget>(self, widget: &mut W) {
        widget.close_info_window(self.info_window);
        widget.remove_info_window(self.info_window);
        widget.remove_marker(self.station);
        widget.remove_polyline(self.route);
    }
}
