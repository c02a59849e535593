//! Geographic primitives, the widget abstraction, and the view controller.

use geo::{Coord, Point, Rect};
use serde::{Deserialize, Serialize};

pub mod scene;
pub mod view;
pub mod widget;

/// A latitude/longitude pair in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lng")]
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    fn coord(&self) -> Coord {
        Coord {
            x: self.longitude,
            y: self.latitude,
        }
    }
}

impl From<GeoPoint> for Point {
    fn from(value: GeoPoint) -> Self {
        Point::new(value.longitude, value.latitude)
    }
}

impl From<Point> for GeoPoint {
    fn from(value: Point) -> Self {
        GeoPoint::new(value.y(), value.x())
    }
}

/// Smallest lat/lng rectangle containing a set of points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoBounds(Rect);

impl GeoBounds {
    pub fn from_point(point: GeoPoint) -> Self {
        Self(Rect::new(point.coord(), point.coord()))
    }

    /// Returns `None` for an empty set of points.
    pub fn from_points(points: impl IntoIterator<Item = GeoPoint>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = Self::from_point(points.next()?);
        Some(points.fold(first, Self::extend))
    }

    pub fn extend(self, point: GeoPoint) -> Self {
        let min = self.0.min();
        let max = self.0.max();
        Self(Rect::new(
            Coord {
                x: min.x.min(point.longitude),
                y: min.y.min(point.latitude),
            },
            Coord {
                x: max.x.max(point.longitude),
                y: max.y.max(point.latitude),
            },
        ))
    }

    pub fn south_west(&self) -> GeoPoint {
        GeoPoint::new(self.0.min().y, self.0.min().x)
    }

    pub fn north_east(&self) -> GeoPoint {
        GeoPoint::new(self.0.max().y, self.0.max().x)
    }

    pub fn center(&self) -> GeoPoint {
        let center = self.0.center();
        GeoPoint::new(center.y, center.x)
    }

    pub fn contains(&self, point: GeoPoint) -> bool {
        let min = self.0.min();
        let max = self.0.max();
        (min.x..=max.x).contains(&point.longitude) && (min.y..=max.y).contains(&point.latitude)
    }
}

impl Serialize for GeoBounds {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("GeoBounds", 2)?;
        state.serialize_field("south_west", &self.south_west())?;
        state.serialize_field("north_east", &self.north_east())?;
        state.end()
    }
}
