use super::Sensor;

/// A [`Sensor`] channel fed by a hub.
///
/// The hub calls [`begin_poll`](Self::begin_poll) at the start of every poll
/// and [`publish`](Self::publish) whenever a conversion completes. The
/// `updated` flag therefore only stays set for the tick in which the value
/// arrived.
#[derive(Debug, Clone, Copy, Default)]
pub struct LatchedSensor {
    value: f32,
    fresh: bool,
    reads: u32,
}

impl LatchedSensor {
    pub const fn new() -> Self {
        Self {
            value: 0.0,
            fresh: false,
            reads: 0,
        }
    }

    /// Drop the `updated` flag left over from the previous poll.
    pub fn begin_poll(&mut self) {
        self.fresh = false;
    }

    /// Latch a new value in the sensor's native unit.
    pub fn publish(&mut self, value: f32) {
        self.value = value;
        self.fresh = true;
    }

    /// Number of times the value has been read through [`Sensor::read`].
    pub const fn reads(&self) -> u32 {
        self.reads
    }
}

impl Sensor for LatchedSensor {
    fn updated(&mut self) -> bool {
        self.fresh
    }

    fn read(&mut self) -> f32 {
        self.reads = self.reads.saturating_add(1);
        self.value
    }
}
