//! Live sensor data page
//!
//! ```text
//! === Sensor Data ===        y = 5
//! Humidity:    55.3 %        y = 35
//! Temperature: 23.1 C        y = 60
//! Pressure:  1013.3 hPa      y = 85
//! ```

use core::fmt::Write;

use embedded_graphics::prelude::Point;
use heapless::String;
use log::warn;

use super::MARGIN_X;
use crate::config::MissingReadingPolicy;
use crate::sensors::{Quantity, Readings, SensorReading};
use crate::ui::Renderer;
use crate::ui::colors::{COLOR_BACKGROUND, COLOR_TEXT, quantity_color};

pub const TITLE: &str = "=== Sensor Data ===";

pub const TITLE_Y: i32 = 5;

/// Top of the first reading line.
pub const FIRST_LINE_Y: i32 = 35;

/// Vertical distance between reading lines.
pub const LINE_PITCH: i32 = 25;

/// Widest prefix (13) + `{:.1}` of `-f32::MAX` (42) + widest unit suffix (4).
pub const LINE_CAPACITY: usize = 64;

/// Format one reading line, e.g. `Pressure:  1013.3 hPa`.
pub fn format_line(
    quantity: Quantity,
    reading: &SensorReading,
    policy: MissingReadingPolicy,
) -> String<LINE_CAPACITY> {
    let mut line = String::new();
    let prefix = match quantity {
        Quantity::Humidity => "Humidity:    ",
        Quantity::Temperature => "Temperature: ",
        Quantity::Pressure => "Pressure:  ",
    };

    let written = if policy == MissingReadingPolicy::ShowPlaceholder && !reading.has_data() {
        write!(line, "{prefix}--.- {}", quantity.unit())
    } else {
        write!(line, "{prefix}{:.1} {}", reading.value(), quantity.unit())
    };
    if written.is_err() {
        warn!("{} line truncated: {}", quantity.label(), line.as_str());
    }

    line
}

/// Paint the header and every reading, then commit the frame.
pub fn draw<R: Renderer>(
    renderer: &mut R,
    readings: &Readings,
    policy: MissingReadingPolicy,
) -> Result<(), R::Error> {
    renderer.clear(COLOR_BACKGROUND);
    renderer.draw_text(Point::new(MARGIN_X, TITLE_Y), TITLE, COLOR_TEXT);

    let mut y = FIRST_LINE_Y;
    for quantity in Quantity::ALL {
        let line = format_line(quantity, readings.get(quantity), policy);
        renderer.draw_text(Point::new(MARGIN_X, y), &line, quantity_color(quantity));
        y += LINE_PITCH;
    }

    renderer.commit()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{DrawCall, MockRenderer};
    use crate::ui::colors::{COLOR_HUMIDITY, COLOR_PRESSURE, COLOR_TEMPERATURE};

    fn sample_readings() -> Readings {
        let mut readings = Readings::default();
        readings.get_mut(Quantity::Humidity).store(55.3);
        readings.get_mut(Quantity::Temperature).store(23.14);
        readings.get_mut(Quantity::Pressure).store(1013.27);
        readings
    }

    #[test]
    fn lines_use_one_decimal_digit() {
        let readings = sample_readings();
        let policy = MissingReadingPolicy::ShowDefault;

        assert_eq!(
            format_line(Quantity::Humidity, &readings.humidity, policy).as_str(),
            "Humidity:    55.3 %"
        );
        assert_eq!(
            format_line(Quantity::Temperature, &readings.temperature, policy).as_str(),
            "Temperature: 23.1 C"
        );
        assert_eq!(
            format_line(Quantity::Pressure, &readings.pressure, policy).as_str(),
            "Pressure:  1013.3 hPa"
        );
    }

    #[test]
    fn extreme_values_fit_on_one_line() {
        let policy = MissingReadingPolicy::ShowDefault;
        let mut reading = SensorReading::default();
        reading.store(-f32::MAX);

        let line = format_line(Quantity::Temperature, &reading, policy);
        assert!(line.starts_with("Temperature: -3402823"));
        assert!(line.ends_with(".0 C"));

        reading.store(f32::MAX);
        let line = format_line(Quantity::Pressure, &reading, policy);
        assert!(line.ends_with(".0 hPa"));
        assert_eq!(line.len(), "Pressure:  ".len() + 41 + " hPa".len());
    }

    #[test]
    fn missing_reading_policy() {
        let empty = SensorReading::default();
        let line = |policy| format_line(Quantity::Temperature, &empty, policy);

        assert_eq!(
            line(MissingReadingPolicy::ShowDefault).as_str(),
            "Temperature: 0.0 C"
        );
        assert_eq!(
            line(MissingReadingPolicy::ShowPlaceholder).as_str(),
            "Temperature: --.- C"
        );
    }

    #[test]
    fn layout_stacks_humidity_temperature_pressure() {
        let mut renderer = MockRenderer::new();
        let policy = MissingReadingPolicy::ShowDefault;
        draw(&mut renderer, &sample_readings(), policy).unwrap();

        let calls = renderer.calls();
        assert_eq!(calls[0], DrawCall::Clear(COLOR_BACKGROUND));
        assert_eq!(calls[1], DrawCall::text(10, 5, TITLE, COLOR_TEXT));
        assert_eq!(
            calls[2],
            DrawCall::text(10, 35, "Humidity:    55.3 %", COLOR_HUMIDITY)
        );
        assert_eq!(
            calls[3],
            DrawCall::text(10, 60, "Temperature: 23.1 C", COLOR_TEMPERATURE)
        );
        assert_eq!(
            calls[4],
            DrawCall::text(10, 85, "Pressure:  1013.3 hPa", COLOR_PRESSURE)
        );
        assert_eq!(calls[5], DrawCall::Commit);
        assert_eq!(calls.len(), 6);
    }
}
