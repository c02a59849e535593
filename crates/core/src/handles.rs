//! Opaque handles for objects living inside a map widget.
//!
//! Handles are plain numbers issued by the widget that owns the object. They
//! carry no meaning outside that widget instance.

use std::fmt;

use serde::Serialize;

macro_rules! impl_handle {
    ($name:ident, $prefix:literal) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            pub fn new(raw: u64) -> Self {
                Self(raw)
            }

            pub fn raw(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}#{}", $prefix, self.0)
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                Self::new(raw)
            }
        }
    };
}

impl_handle!(MarkerHandle, "marker");
impl_handle!(InfoWindowHandle, "info-window");
impl_handle!(PolylineHandle, "polyline");
impl_handle!(ControlHandle, "control");

/// Hands out handles from a single counter so no two objects of a widget
/// ever share a number, whatever their kind.
#[derive(Debug, Default)]
pub struct HandleAllocator {
    next: u64,
}

impl HandleAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn next<H: From<u64>>(&mut self) -> H {
        let raw = self.next.max(1);
        self.next = raw + 1;
        H::from(raw)
    }
}
