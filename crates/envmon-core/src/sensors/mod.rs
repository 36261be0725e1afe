//! Sensor capability traits and shared sensor types
//!
//! The core never talks to a bus. Drivers live behind [`SensorHub`], which
//! handles unit registration and drives conversions, and hands out one
//! [`Sensor`] capability per measured [`Quantity`].

mod latched;
mod profile;
mod reading;

pub use latched::LatchedSensor;
pub use profile::{HardwareProfile, ProfileParseError, UnitKind};
pub use reading::{Readings, SensorReading};

use thiserror_no_std::Error;

/// A physical quantity measured by the sensor cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    /// Relative humidity in %RH
    Humidity,
    /// Temperature in °C
    Temperature,
    /// Barometric pressure, stored in hPa
    Pressure,
}

impl Quantity {
    /// All quantities in the order they are sampled and drawn.
    pub const ALL: [Quantity; 3] = [Self::Humidity, Self::Temperature, Self::Pressure];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Humidity => "Humidity",
            Self::Temperature => "Temperature",
            Self::Pressure => "Pressure",
        }
    }

    pub const fn unit(self) -> &'static str {
        match self {
            Self::Humidity => "%",
            Self::Temperature => "C",
            Self::Pressure => "hPa",
        }
    }

    /// Convert a value in the sensor's native unit into the stored unit.
    ///
    /// Pressure sensors report pascal; readings are kept in hectopascal.
    pub fn from_native(self, raw: f32) -> f32 {
        match self {
            Self::Pressure => raw / 100.0,
            Self::Humidity | Self::Temperature => raw,
        }
    }
}

/// Per-quantity capability: "has new data" and "read value".
///
/// Both calls are cheap and perform no bus I/O; the hub fetches data during
/// [`SensorHub::poll`].
pub trait Sensor {
    /// Whether a new value arrived during the latest hub poll.
    fn updated(&mut self) -> bool;

    /// The latest value in the sensor's native unit.
    fn read(&mut self) -> f32;
}

/// Registration and polling collaborator for the sensor units on the bus.
pub trait SensorHub {
    /// Capability type handed out for each quantity.
    type Channel: Sensor;

    /// Register one unit with the hub. Returns `false` on failure.
    fn register(&mut self, unit: UnitKind) -> impl Future<Output = bool>;

    /// Bring up every registered unit. Returns `false` if any unit failed.
    fn begin_all(&mut self) -> impl Future<Output = bool>;

    /// Drive pending conversions and latch any new data into the channels.
    fn poll(&mut self) -> impl Future<Output = ()>;

    /// Capability for a single quantity.
    fn channel(&mut self, quantity: Quantity) -> &mut Self::Channel;
}

/// Driver-level failures, reported by hub implementations before they are
/// collapsed into the boolean registration/begin results.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SensorError {
    #[error("{sensor}: {details}")]
    InitializationFailed {
        sensor: &'static str,
        details: &'static str,
    },
    #[error("{sensor}: failed to {operation}")]
    ReadFailed {
        sensor: &'static str,
        operation: &'static str,
    },
    #[error("{sensor}: unit already registered")]
    AlreadyRegistered { sensor: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn pressure_is_scaled_to_hectopascal() {
        assert_eq!(Quantity::Pressure.from_native(101325.0), 1013.25);
    }

    #[test]
    fn humidity_and_temperature_pass_through() {
        assert_eq!(Quantity::Humidity.from_native(55.3), 55.3);
        assert_eq!(Quantity::Temperature.from_native(-4.2), -4.2);
    }

    #[test]
    fn quantities_are_ordered_for_display() {
        assert_eq!(
            Quantity::ALL,
            [
                Quantity::Humidity,
                Quantity::Temperature,
                Quantity::Pressure
            ]
        );
    }

    #[test]
    fn sensor_error_messages() {
        let error = SensorError::InitializationFailed {
            sensor: "BMP280",
            details: "chip id mismatch",
        };
        assert_eq!(error.to_string(), "BMP280: chip id mismatch");

        let error = SensorError::ReadFailed {
            sensor: "SHT40",
            operation: "measure temperature/humidity",
        };
        assert_eq!(
            error.to_string(),
            "SHT40: failed to measure temperature/humidity"
        );
    }
}
