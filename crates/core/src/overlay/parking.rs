//! Parking markers and their legend.

use serde::Serialize;

use crate::config::ParkingCategory;
use crate::handles::{ControlHandle, InfoWindowHandle, MarkerHandle};
use crate::locale::{LocalizationStore, TextKey};
use crate::map::widget::{
    ControlElement, ControlPosition, Legend, LegendEntry, MapWidget, MarkerOptions,
};

pub const LEGEND_POSITION: ControlPosition = ControlPosition::LeftBottom;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ParkingMarker {
    /// Index into the configured parking spots.
    pub spot: usize,
    pub marker: MarkerHandle,
    pub info_window: InfoWindowHandle,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ParkingOverlay {
    pub markers: Vec<ParkingMarker>,
    pub legend: ControlHandle,
}

impl ParkingOverlay {
    pub(crate) fn render<W: MapWidget>(widget: &mut W, store: &LocalizationStore) -> Self {
        let config = store.config();

        let markers = config
            .parking
            .iter()
            .enumerate()
            .map(|(spot, parking)| {
                let label = store.pick(&parking.label);
                let marker = widget.create_marker(MarkerOptions {
                    position: parking.position,
                    title: label.to_owned(),
                    icon: Some(config.icons.for_category(parking.category).to_owned()),
                });
                let info_window = widget.create_info_window(&info_content(label));
                widget.bind_click(marker, info_window);

                ParkingMarker {
                    spot,
                    marker,
                    info_window,
                }
            })
            .collect();

        let legend = widget.add_control(LEGEND_POSITION, legend(store));

        Self { markers, legend }
    }

    pub(crate) fn refresh_text<W: MapWidget>(&self, widget: &mut W, store: &LocalizationStore) {
        let spots = &store.config().parking;
        for item in &self.markers {
            let Some(parking) = spots.get(item.spot) else {
                continue;
            };
            let label = store.pick(&parking.label);
            widget.set_marker_title(item.marker, label);
            widget.set_info_window_content(item.info_window, &info_content(label));
        }
        widget.update_control(self.legend, legend(store));
    }

    pub(crate) fn remove<W: MapWidget>(self, widget: &mut W) {
        for item in self.markers {
            widget.close_info_window(item.info_window);
            widget.remove_info_window(item.info_window);
            widget.remove_marker(item.marker);
        }
        widget.remove_control(self.legend);
    }
}

fn info_content(label: &str) -> String {
    format!("<strong>{label}</strong>")
}

/// The legend explaining the free/paid marker colors in the selected language.
pub fn legend(store: &LocalizationStore) -> ControlElement {
    let icons = &store.config().icons;
    let entry = |category: ParkingCategory, key: TextKey| LegendEntry {
        icon: icons.for_category(category).to_owned(),
        label: store.text(key).to_owned(),
    };

    ControlElement::Legend(Legend {
        title: store.text(TextKey::LegendTitle).to_owned(),
        entries: vec![
            entry(ParkingCategory::Free, TextKey::LegendFree),
            entry(ParkingCategory::Paid, TextKey::LegendPaid),
        ],
    })
}
