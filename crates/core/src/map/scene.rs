//! In-memory map widget.
//!
//! Records what a real widget would display so the page can be rendered
//! headless, inspected in tests, or shipped to a client as JSON.

use std::collections::BTreeMap;
use std::f64::consts::PI;

use serde::Serialize;

use crate::config::Viewport;
use crate::handles::{
    ControlHandle, HandleAllocator, InfoWindowHandle, MarkerHandle, PolylineHandle,
};
use crate::map::widget::{
    ControlElement, ControlPosition, MapBackend, MapOptions, MapWidget, MarkerOptions,
    PolylineStyle, WidgetError,
};
use crate::map::{GeoBounds, GeoPoint};

const TILE_SIZE: f64 = 256.0;
const MAX_ZOOM: u8 = 21;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SceneMarker {
    pub position: GeoPoint,
    pub title: String,
    pub icon: Option<String>,
    pub on_click: Option<InfoWindowHandle>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SceneInfoWindow {
    pub content: String,
    pub open: bool,
    pub anchor: Option<MarkerHandle>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScenePolyline {
    pub path: Vec<GeoPoint>,
    pub style: PolylineStyle,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SceneControl {
    pub position: ControlPosition,
    pub element: ControlElement,
}

/// Builds [`SceneMap`]s.
#[derive(Clone, Debug)]
pub struct SceneBackend {
    viewport: Viewport,
    container_present: bool,
    maps_created: usize,
}

impl SceneBackend {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            container_present: true,
            maps_created: 0,
        }
    }

    /// A backend whose page has no map container.
    pub fn without_container(viewport: Viewport) -> Self {
        Self {
            container_present: false,
            ..Self::new(viewport)
        }
    }

    /// Attaches or detaches the map container. Takes effect on the next
    /// `create_map`.
    pub fn set_container_present(&mut self, present: bool) {
        self.container_present = present;
    }

    pub fn maps_created(&self) -> usize {
        self.maps_created
    }
}

impl MapBackend for SceneBackend {
    type Widget = SceneMap;

    fn create_map(&mut self, options: MapOptions) -> Result<SceneMap, WidgetError> {
        if !self.container_present {
            return Err(WidgetError::ContainerMissing("map".into()));
        }

        self.maps_created += 1;
        Ok(SceneMap::new(options, self.viewport))
    }
}

#[derive(Debug, Serialize)]
pub struct SceneMap {
    options: MapOptions,
    center: GeoPoint,
    zoom: u8,
    fitted_bounds: Option<GeoBounds>,
    markers: BTreeMap<MarkerHandle, SceneMarker>,
    info_windows: BTreeMap<InfoWindowHandle, SceneInfoWindow>,
    polylines: BTreeMap<PolylineHandle, ScenePolyline>,
    controls: BTreeMap<ControlHandle, SceneControl>,
    #[serde(skip)]
    viewport: Viewport,
    #[serde(skip)]
    handles: HandleAllocator,
}

impl SceneMap {
    pub fn new(options: MapOptions, viewport: Viewport) -> Self {
        Self {
            center: options.center,
            zoom: options.zoom,
            options,
            fitted_bounds: None,
            markers: BTreeMap::new(),
            info_windows: BTreeMap::new(),
            polylines: BTreeMap::new(),
            controls: BTreeMap::new(),
            viewport,
            handles: HandleAllocator::new(),
        }
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    /// Bounds requested by the last `fit_bounds`, cleared by any later
    /// explicit center or zoom change.
    pub fn fitted_bounds(&self) -> Option<GeoBounds> {
        self.fitted_bounds
    }

    pub fn markers(&self) -> impl Iterator<Item = (MarkerHandle, &SceneMarker)> {
        self.markers.iter().map(|(handle, marker)| (*handle, marker))
    }

    pub fn marker(&self, marker: MarkerHandle) -> Option<&SceneMarker> {
        self.markers.get(&marker)
    }

    pub fn info_windows(&self) -> impl Iterator<Item = (InfoWindowHandle, &SceneInfoWindow)> {
        self.info_windows.iter().map(|(handle, window)| (*handle, window))
    }

    pub fn info_window(&self, window: InfoWindowHandle) -> Option<&SceneInfoWindow> {
        self.info_windows.get(&window)
    }

    pub fn polylines(&self) -> impl Iterator<Item = (PolylineHandle, &ScenePolyline)> {
        self.polylines.iter().map(|(handle, line)| (*handle, line))
    }

    pub fn controls(&self) -> impl Iterator<Item = (ControlHandle, &SceneControl)> {
        self.controls.iter().map(|(handle, control)| (*handle, control))
    }

    pub fn control(&self, control: ControlHandle) -> Option<&SceneControl> {
        self.controls.get(&control)
    }

    /// Simulates a user click. Returns whether anything reacted to it.
    pub fn click(&mut self, marker: MarkerHandle) -> bool {
        let Some(window) = self.markers.get(&marker).and_then(|m| m.on_click) else {
            return false;
        };
        if !self.info_windows.contains_key(&window) {
            return false;
        }

        self.open_info_window(window, marker);
        true
    }
}

impl MapWidget for SceneMap {
    fn locale(&self) -> &str {
        &self.options.locale
    }

    fn center(&self) -> GeoPoint {
        self.center
    }

    fn zoom(&self) -> u8 {
        self.zoom
    }

    fn set_center(&mut self, center: GeoPoint) {
        self.center = center;
        self.fitted_bounds = None;
    }

    fn set_zoom(&mut self, zoom: u8) {
        self.zoom = zoom.min(MAX_ZOOM);
        self.fitted_bounds = None;
    }

    fn fit_bounds(&mut self, bounds: GeoBounds) {
        self.center = bounds.center();
        self.zoom = zoom_for_bounds(bounds, self.viewport);
        self.fitted_bounds = Some(bounds);
    }

    fn create_marker(&mut self, options: MarkerOptions) -> MarkerHandle {
        let handle = self.handles.next();
        self.markers.insert(
            handle,
            SceneMarker {
                position: options.position,
                title: options.title,
                icon: options.icon,
                on_click: None,
            },
        );
        handle
    }

    fn marker_position(&self, marker: MarkerHandle) -> Option<GeoPoint> {
        self.markers.get(&marker).map(|m| m.position)
    }

    fn set_marker_title(&mut self, marker: MarkerHandle, title: &str) {
        if let Some(m) = self.markers.get_mut(&marker) {
            m.title = title.to_owned();
        }
    }

    fn remove_marker(&mut self, marker: MarkerHandle) {
        if self.markers.remove(&marker).is_none() {
            return;
        }

        // windows anchored on a removed marker close with it
        for window in self.info_windows.values_mut() {
            if window.anchor == Some(marker) {
                window.open = false;
                window.anchor = None;
            }
        }
    }

    fn create_info_window(&mut self, content: &str) -> InfoWindowHandle {
        let handle = self.handles.next();
        self.info_windows.insert(
            handle,
            SceneInfoWindow {
                content: content.to_owned(),
                open: false,
                anchor: None,
            },
        );
        handle
    }

    fn set_info_window_content(&mut self, window: InfoWindowHandle, content: &str) {
        if let Some(w) = self.info_windows.get_mut(&window) {
            w.content = content.to_owned();
        }
    }

    fn open_info_window(&mut self, window: InfoWindowHandle, anchor: MarkerHandle) {
        if !self.markers.contains_key(&anchor) {
            return;
        }
        if let Some(w) = self.info_windows.get_mut(&window) {
            w.open = true;
            w.anchor = Some(anchor);
        }
    }

    fn close_info_window(&mut self, window: InfoWindowHandle) {
        if let Some(w) = self.info_windows.get_mut(&window) {
            w.open = false;
        }
    }

    fn remove_info_window(&mut self, window: InfoWindowHandle) {
        self.info_windows.remove(&window);
        for marker in self.markers.values_mut() {
            if marker.on_click == Some(window) {
                marker.on_click = None;
            }
        }
    }

    fn bind_click(&mut self, marker: MarkerHandle, window: InfoWindowHandle) {
        if let Some(m) = self.markers.get_mut(&marker) {
            m.on_click = Some(window);
        }
    }

    fn create_polyline(&mut self, path: &[GeoPoint], style: &PolylineStyle) -> PolylineHandle {
        let handle = self.handles.next();
        self.polylines.insert(
            handle,
            ScenePolyline {
                path: path.to_vec(),
                style: style.clone(),
            },
        );
        handle
    }

    fn remove_polyline(&mut self, polyline: PolylineHandle) {
        self.polylines.remove(&polyline);
    }

    fn add_control(&mut self, position: ControlPosition, element: ControlElement) -> ControlHandle {
        let handle = self.handles.next();
        self.controls
            .insert(handle, SceneControl { position, element });
        handle
    }

    fn update_control(&mut self, control: ControlHandle, element: ControlElement) {
        if let Some(c) = self.controls.get_mut(&control) {
            c.element = element;
        }
    }

    fn remove_control(&mut self, control: ControlHandle) {
        self.controls.remove(&control);
    }
}

fn mercator_y(latitude: f64) -> f64 {
    let sin = latitude.to_radians().sin().clamp(-0.9999, 0.9999);
    0.5 * ((1.0 + sin) / (1.0 - sin)).ln()
}

/// Largest whole zoom level at which `bounds` fits inside the viewport.
fn zoom_for_bounds(bounds: GeoBounds, viewport: Viewport) -> u8 {
    let south_west = bounds.south_west();
    let north_east = bounds.north_east();

    let lng_fraction = (north_east.longitude - south_west.longitude) / 360.0;
    let lat_fraction =
        (mercator_y(north_east.latitude) - mercator_y(south_west.latitude)) / (2.0 * PI);

    let fit = |pixels: u32, fraction: f64| {
        if fraction <= f64::EPSILON {
            f64::from(MAX_ZOOM)
        } else {
            (f64::from(pixels) / TILE_SIZE / fraction).log2()
        }
    };

    let zoom = fit(viewport.width, lng_fraction).min(fit(viewport.height, lat_fraction));
    zoom.floor().clamp(0.0, f64::from(MAX_ZOOM)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    fn options() -> MapOptions {
        MapOptions {
            center: GeoPoint::new(37.290236, 127.017845),
            zoom: 16,
            locale: "ko".into(),
            map_type_control: false,
            street_view_control: false,
            fullscreen_control: true,
        }
    }

    fn scene() -> SceneMap {
        SceneBackend::new(Viewport::default())
            .create_map(options())
            .unwrap()
    }

    #[test]
    fn test_backend_without_container() {
        let mut backend = SceneBackend::without_container(Viewport::default());
        assert!(matches!(
            backend.create_map(options()),
            Err(WidgetError::ContainerMissing(_))
        ));
        assert_eq!(backend.maps_created(), 0);
    }

    #[test]
    fn test_new_map_uses_options() {
        let map = scene();
        assert_eq!(map.locale(), "ko");
        assert_eq!(map.zoom(), 16);
        assert_eq!(map.center(), GeoPoint::new(37.290236, 127.017845));
        assert!(map.fitted_bounds().is_none());
    }

    #[test]
    fn test_click_opens_bound_window() {
        let mut map = scene();
        let marker = map.create_marker(MarkerOptions {
            position: GeoPoint::new(1.0, 2.0),
            title: "m".into(),
            icon: None,
        });
        let window = map.create_info_window("hello");

        assert!(!map.click(marker));

        map.bind_click(marker, window);
        assert!(map.click(marker));
        let opened = map.info_window(window).unwrap();
        assert!(opened.open);
        assert_eq!(opened.anchor, Some(marker));
    }

    #[test]
    fn test_removing_marker_closes_its_window() {
        let mut map = scene();
        let marker = map.create_marker(MarkerOptions {
            position: GeoPoint::new(1.0, 2.0),
            title: "m".into(),
            icon: None,
        });
        let window = map.create_info_window("hello");
        map.open_info_window(window, marker);

        map.remove_marker(marker);
        assert!(!map.info_window(window).unwrap().open);
        assert!(map.marker_position(marker).is_none());

        // opening on a gone marker does nothing
        map.open_info_window(window, marker);
        assert!(!map.info_window(window).unwrap().open);
    }

    #[test]
    fn test_removing_window_unbinds_clicks() {
        let mut map = scene();
        let marker = map.create_marker(MarkerOptions {
            position: GeoPoint::new(1.0, 2.0),
            title: "m".into(),
            icon: None,
        });
        let window = map.create_info_window("hello");
        map.bind_click(marker, window);

        map.remove_info_window(window);
        assert_eq!(map.marker(marker).unwrap().on_click, None);
        assert!(!map.click(marker));
    }

    #[test]
    fn test_fit_bounds_zooms_out_to_cover_points() {
        let mut map = scene();
        let bounds = GeoBounds::from_points([
            GeoPoint::new(37.265961, 127.00011),
            GeoPoint::new(37.290236, 127.017845),
        ])
        .unwrap();

        map.fit_bounds(bounds);
        assert_eq!(map.fitted_bounds(), Some(bounds));
        assert_eq!(map.center(), bounds.center());
        assert!(map.zoom() < 16);
        assert!(map.zoom() >= 12);

        map.set_zoom(16);
        assert!(map.fitted_bounds().is_none());
    }

    #[test]
    fn test_fit_bounds_on_single_point_uses_max_zoom() {
        let mut map = scene();
        map.fit_bounds(GeoBounds::from_point(GeoPoint::new(10.0, 10.0)));
        assert_eq!(map.zoom(), MAX_ZOOM);
    }

    #[test]
    fn test_handles_are_unique_across_kinds() {
        let config = SiteConfig::embedded().unwrap();
        let mut map = scene();
        let marker = map.create_marker(MarkerOptions {
            position: GeoPoint::new(1.0, 2.0),
            title: "m".into(),
            icon: None,
        });
        let line = map.create_polyline(
            &[GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0)],
            &config.route,
        );
        assert_ne!(marker.raw(), line.raw());
    }

    #[test]
    fn test_scene_serializes() {
        let mut map = scene();
        map.create_marker(MarkerOptions {
            position: GeoPoint::new(1.0, 2.0),
            title: "m".into(),
            icon: Some("dot.png".into()),
        });

        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json["zoom"], 16);
        assert_eq!(json["options"]["locale"], "ko");
        assert_eq!(json["markers"]["1"]["icon"], "dot.png");
        assert!(json.get("viewport").is_none());
    }
}
