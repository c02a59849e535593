//! Toggleable groups of map elements.
//!
//! An overlay is either hidden, or visible together with every handle it
//! drew. There is no in-between: a visible overlay owns all of its elements
//! and a hidden one owns none.

use serde::Serialize;

pub mod manager;
pub mod parking;
pub mod transit;

pub use manager::OverlayToggleManager;
pub use parking::{ParkingMarker, ParkingOverlay};
pub use transit::TransitOverlay;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Visibility {
    Hidden,
    Visible,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OverlayState<H> {
    Hidden,
    Visible(H),
}

impl<H> Default for OverlayState<H> {
    fn default() -> Self {
        Self::Hidden
    }
}

impl<H> OverlayState<H> {
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Visible(_))
    }

    pub fn handle(&self) -> Option<&H> {
        match self {
            Self::Visible(handle) => Some(handle),
            Self::Hidden => None,
        }
    }

    pub fn visibility(&self) -> Visibility {
        match self {
            Self::Visible(_) => Visibility::Visible,
            Self::Hidden => Visibility::Hidden,
        }
    }

    /// Moves the handle out, leaving the overlay hidden.
    pub fn take(&mut self) -> Option<H> {
        match std::mem::take(self) {
            Self::Visible(handle) => Some(handle),
            Self::Hidden => None,
        }
    }
}
