use super::Quantity;

/// Last known value of one quantity.
///
/// Holds `0.0` and reports [`has_data`](Self::has_data) as `false` until the
/// source sensor has produced its first update.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SensorReading {
    value: f32,
    has_data: bool,
}

impl SensorReading {
    pub const fn value(&self) -> f32 {
        self.value
    }

    /// Whether the sensor has reported at least one update.
    pub const fn has_data(&self) -> bool {
        self.has_data
    }

    pub(crate) fn store(&mut self, value: f32) {
        self.value = value;
        self.has_data = true;
    }
}

/// Snapshot of all readings, owned by the monitor loop.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Readings {
    pub humidity: SensorReading,
    pub temperature: SensorReading,
    pub pressure: SensorReading,
}

impl Readings {
    pub fn get(&self, quantity: Quantity) -> &SensorReading {
        match quantity {
            Quantity::Humidity => &self.humidity,
            Quantity::Temperature => &self.temperature,
            Quantity::Pressure => &self.pressure,
        }
    }

    pub(crate) fn get_mut(&mut self, quantity: Quantity) -> &mut SensorReading {
        match quantity {
            Quantity::Humidity => &mut self.humidity,
            Quantity::Temperature => &mut self.temperature,
            Quantity::Pressure => &mut self.pressure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty_at_zero() {
        let readings = Readings::default();
        for quantity in Quantity::ALL {
            let reading = readings.get(quantity);
            assert_eq!(reading.value(), 0.0);
            assert!(!reading.has_data());
        }
    }

    #[test]
    fn store_marks_reading_valid() {
        let mut readings = Readings::default();
        readings.get_mut(Quantity::Temperature).store(0.0);

        assert!(readings.temperature.has_data());
        assert_eq!(readings.temperature.value(), 0.0);
        assert!(!readings.humidity.has_data());
    }
}
