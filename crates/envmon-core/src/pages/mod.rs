//! Full-screen layouts
//!
//! Each page paints one complete frame onto a [`Renderer`](crate::ui::Renderer)
//! and commits it. Pages hold no state of their own.

pub mod boot;
pub mod fatal_error;
pub mod power_off;
pub mod sensor_data;

/// Left margin shared by all pages.
pub const MARGIN_X: i32 = 10;
