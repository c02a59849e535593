//! The slice of a map widget's object model the page relies on.
//!
//! Everything the page draws goes through [`MapBackend`] and [`MapWidget`].
//! A browser binding implements them against the real widget; [`SceneMap`]
//! implements them in memory.
//!
//! [`SceneMap`]: crate::map::scene::SceneMap

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::handles::{ControlHandle, InfoWindowHandle, MarkerHandle, PolylineHandle};
use crate::map::{GeoBounds, GeoPoint};

#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
    #[error("map container `{0}` is not present")]
    ContainerMissing(String),
}

/// Construction parameters for a widget instance.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MapOptions {
    pub center: GeoPoint,
    pub zoom: u8,
    /// Locale of the widget chrome. Fixed for the lifetime of the instance.
    pub locale: String,
    pub map_type_control: bool,
    pub street_view_control: bool,
    pub fullscreen_control: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MarkerOptions {
    pub position: GeoPoint,
    pub title: String,
    pub icon: Option<String>,
}

/// Arrow drawn along a polyline.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArrowSymbol {
    pub scale: f64,
    pub offset_percent: u8,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolylineStyle {
    pub color: StrokeColor,
    pub opacity: f64,
    pub weight: u32,
    #[serde(default)]
    pub geodesic: bool,
    #[serde(default)]
    pub arrow: Option<ArrowSymbol>,
}

/// An opaque RGB stroke color, written as `#rrggbb`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StrokeColor(pub palette::Srgb<u8>);

impl StrokeColor {
    pub fn to_hex(&self) -> String {
        format!("#{:x}", self.0)
    }
}

impl FromStr for StrokeColor {
    type Err = palette::rgb::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        palette::Srgb::<u8>::from_str(s).map(Self)
    }
}

impl Serialize for StrokeColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for StrokeColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        hex.parse().map_err(serde::de::Error::custom)
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
    strum::EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ControlPosition {
    TopLeft,
    TopRight,
    LeftBottom,
    RightBottom,
    BottomCenter,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub icon: String,
    pub label: String,
}

/// Explains the marker icons of an overlay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Legend {
    pub title: String,
    pub entries: Vec<LegendEntry>,
}

impl Legend {
    pub fn to_html(&self) -> String {
        let entries: String = self
            .entries
            .iter()
            .map(|entry| {
                let icon = format!(r#"<img src="{}" width="20" height="20">"#, entry.icon);
                format!(
                    r#"<div class="legend-entry">{icon}<span>{}</span></div>"#,
                    entry.label
                )
            })
            .collect();

        format!(
            r#"<div class="legend"><div class="legend-title">{}</div>{entries}</div>"#,
            self.title
        )
    }
}

/// Custom element placed in one of the widget's control slots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ControlElement {
    Legend(Legend),
}

/// Creates widget instances. Each instance has its locale baked in.
pub trait MapBackend {
    type Widget: MapWidget;

    fn create_map(&mut self, options: MapOptions) -> Result<Self::Widget, WidgetError>;
}

/// A live map widget instance.
///
/// Removal methods tolerate handles the widget no longer knows about.
pub trait MapWidget {
    fn locale(&self) -> &str;

    fn center(&self) -> GeoPoint;
    fn zoom(&self) -> u8;
    fn set_center(&mut self, center: GeoPoint);
    fn set_zoom(&mut self, zoom: u8);
    fn fit_bounds(&mut self, bounds: GeoBounds);

    fn create_marker(&mut self, options: MarkerOptions) -> MarkerHandle;
    fn marker_position(&self, marker: MarkerHandle) -> Option<GeoPoint>;
    fn set_marker_title(&mut self, marker: MarkerHandle, title: &str);
    fn remove_marker(&mut self, marker: MarkerHandle);

    fn create_info_window(&mut self, content: &str) -> InfoWindowHandle;
    fn set_info_window_content(&mut self, window: InfoWindowHandle, content: &str);
    fn open_info_window(&mut self, window: InfoWindowHandle, anchor: MarkerHandle);
    fn close_info_window(&mut self, window: InfoWindowHandle);
    fn remove_info_window(&mut self, window: InfoWindowHandle);

    /// Clicking `marker` opens `window` anchored on it.
    fn bind_click(&mut self, marker: MarkerHandle, window: InfoWindowHandle);

    fn create_polyline(&mut self, path: &[GeoPoint], style: &PolylineStyle) -> PolylineHandle;
    fn remove_polyline(&mut self, polyline: PolylineHandle);

    fn add_control(&mut self, position: ControlPosition, element: ControlElement) -> ControlHandle;
    fn update_control(&mut self, control: ControlHandle, element: ControlElement);
    fn remove_control(&mut self, control: ControlHandle);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_color_hex() {
        let color: StrokeColor = "#2ea1ff".parse().unwrap();
        assert_eq!(color.0, palette::Srgb::new(0x2e, 0xa1, 0xff));
        assert_eq!(color.to_hex(), "#2ea1ff");
        assert!("not-a-color".parse::<StrokeColor>().is_err());
    }

    #[test]
    fn test_polyline_style_from_json() {
        let style: PolylineStyle = serde_json::from_str(
            r##"{"color": "#2ea1ff", "opacity": 0.7, "weight": 3,
                 "arrow": {"scale": 3.0, "offset_percent": 50}}"##,
        )
        .unwrap();

        assert_eq!(style.weight, 3);
        assert!(!style.geodesic);
        assert_eq!(style.arrow.map(|a| a.offset_percent), Some(50));
        assert_eq!(serde_json::to_value(&style).unwrap()["color"], "#2ea1ff");
    }

    #[test]
    fn test_legend_html_lists_entries() {
        let legend = Legend {
            title: "Parking Legend".into(),
            entries: vec![
                LegendEntry {
                    icon: "green.png".into(),
                    label: "Free Parking".into(),
                },
                LegendEntry {
                    icon: "blue.png".into(),
                    label: "Paid Parking".into(),
                },
            ],
        };

        let html = legend.to_html();
        assert!(html.contains("Parking Legend"));
        assert!(html.find("Free Parking") < html.find("Paid Parking"));
        assert!(html.contains(r#"src="green.png""#));
    }

    #[test]
    fn test_control_position_names() {
        assert_eq!(ControlPosition::LeftBottom.to_string(), "LEFT_BOTTOM");
        assert_eq!("TOP_RIGHT".parse::<ControlPosition>().unwrap(), ControlPosition::TopRight);
    }
}
