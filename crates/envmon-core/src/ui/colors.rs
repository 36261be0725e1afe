//! Fixed RGB565 palette
//!
//! The reading colors match the classic M5 GFX constants so the device looks
//! the same as the stock firmware.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::{RgbColor, WebColors};

use crate::sensors::Quantity;

pub const COLOR_BACKGROUND: Rgb565 = Rgb565::BLACK;

pub const COLOR_TEXT: Rgb565 = Rgb565::WHITE;

/// Full-screen fill of the fail-safe error screen
pub const COLOR_FATAL_BACKGROUND: Rgb565 = Rgb565::RED;

/// "Sensor Ready!" notice
pub const COLOR_READY: Rgb565 = Rgb565::GREEN;

pub const COLOR_HUMIDITY: Rgb565 = Rgb565::CYAN;

pub const COLOR_TEMPERATURE: Rgb565 = Rgb565::CSS_ORANGE;

pub const COLOR_PRESSURE: Rgb565 = Rgb565::CSS_GREEN_YELLOW;

/// Text color used for a quantity on the sensor data screen.
pub const fn quantity_color(quantity: Quantity) -> Rgb565 {
    match quantity {
        Quantity::Humidity => COLOR_HUMIDITY,
        Quantity::Temperature => COLOR_TEMPERATURE,
        Quantity::Pressure => COLOR_PRESSURE,
    }
}
