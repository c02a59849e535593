//! GeoJSON rendition of a scene.

use chaeum_core::map::GeoPoint;
use chaeum_core::map::scene::{SceneMarker, ScenePolyline, SceneMap};
use geojson::{Feature, FeatureCollection, Geometry, Value};

fn position(point: &GeoPoint) -> Vec<f64> {
    vec![point.longitude, point.latitude]
}

fn marker_to_feature(handle: u64, marker: &SceneMarker, map: &SceneMap) -> Feature {
    let mut properties = serde_json::Map::new();
    properties.insert("feature_type".to_string(), serde_json::json!("marker"));
    properties.insert("handle".to_string(), serde_json::json!(handle));
    properties.insert("title".to_string(), serde_json::json!(marker.title));
    properties.insert("icon".to_string(), serde_json::json!(marker.icon));

    if let Some(window) = marker.on_click.and_then(|w| map.info_window(w)) {
        properties.insert("popup".to_string(), serde_json::json!(window.content));
        properties.insert("popup_open".to_string(), serde_json::json!(window.open));
    }

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(position(&marker.position)))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

fn polyline_to_feature(handle: u64, line: &ScenePolyline) -> Feature {
    let mut properties = serde_json::Map::new();
    properties.insert("feature_type".to_string(), serde_json::json!("route"));
    properties.insert("handle".to_string(), serde_json::json!(handle));
    properties.insert("stroke".to_string(), serde_json::json!(line.style.color.to_hex()));
    properties.insert("stroke-opacity".to_string(), serde_json::json!(line.style.opacity));
    properties.insert("stroke-width".to_string(), serde_json::json!(line.style.weight));

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::LineString(
            line.path.iter().map(position).collect(),
        ))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// Markers become points, polylines become line strings. Controls and closed
/// info windows have no geometry and are left out.
pub fn scene_to_geojson(map: &SceneMap) -> FeatureCollection {
    let markers = map
        .markers()
        .map(|(handle, marker)| marker_to_feature(handle.raw(), marker, map));
    let lines = map
        .polylines()
        .map(|(handle, line)| polyline_to_feature(handle.raw(), line));

    FeatureCollection {
        bbox: None,
        features: markers.chain(lines).collect(),
        foreign_members: None,
    }
}
