//! Simulated board: virtual time, synthetic sensors, power button and PMIC.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use embedded_hal_async::delay::DelayNs;
use envmon_core::power::{HoldButton, PowerControl};
use envmon_core::sensors::{HardwareProfile, LatchedSensor, Quantity, SensorHub, UnitKind};
use envmon_core::time::Clock;
use log::{debug, info, warn};

/// SHT40 high-repeatability measurement cadence.
const HUMIDITY_PERIOD: Duration = Duration::from_secs(1);

/// BMP280 normal-mode cadence with 500 ms standby.
const PRESSURE_PERIOD: Duration = Duration::from_millis(500);

/// Shared simulated time, advanced only by [`SimDelay`].
#[derive(Debug, Clone, Default)]
pub struct VirtualTime(Rc<Cell<Duration>>);

impl VirtualTime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.0.set(self.0.get() + by);
    }
}

impl Clock for VirtualTime {
    fn now(&self) -> Duration {
        self.0.get()
    }
}

/// Delay that moves virtual time forward, optionally sleeping as well.
#[derive(Debug, Clone)]
pub struct SimDelay {
    time: VirtualTime,
    realtime: bool,
}

impl SimDelay {
    pub fn new(time: VirtualTime, realtime: bool) -> Self {
        Self { time, realtime }
    }

    fn pause(&self, duration: Duration) {
        self.time.advance(duration);
        if self.realtime {
            std::thread::sleep(duration);
        }
    }
}

impl DelayNs for SimDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.pause(Duration::from_nanos(u64::from(ns)));
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.pause(Duration::from_millis(u64::from(ms)));
    }
}

/// Generates synthetic readings that vary over time.
fn synthetic_value(quantity: Quantity, t: f64) -> f32 {
    let value = match quantity {
        // Temperature: 20-26 °C sinusoidal with slow drift
        Quantity::Temperature => 23.0 + 3.0 * (t / 120.0).sin() + 0.5 * (t / 37.0).cos(),
        // Humidity: 40-60 % with different period
        Quantity::Humidity => 50.0 + 10.0 * (t / 180.0).sin() + 2.0 * (t / 23.0).cos(),
        // Pressure in Pa, the way the BMP280 reports it
        Quantity::Pressure => 101_325.0 + 250.0 * (t / 300.0).sin() + 20.0 * (t / 41.0).cos(),
    };
    value as f32
}

/// Sensor hub backed by [`synthetic_value`] instead of a bus.
pub struct SyntheticHub {
    time: VirtualTime,
    profile: HardwareProfile,
    channels: [LatchedSensor; 3],
    next_due: [Duration; 3],
    registered: Vec<UnitKind>,
    fail_register: Option<UnitKind>,
    fail_begin: bool,
    begun: bool,
}

impl SyntheticHub {
    pub fn new(time: VirtualTime, profile: HardwareProfile) -> Self {
        Self {
            time,
            profile,
            channels: [LatchedSensor::new(); 3],
            next_due: [Duration::ZERO; 3],
            registered: Vec::new(),
            fail_register: None,
            fail_begin: false,
            begun: false,
        }
    }

    /// Make registration of `unit` report failure.
    pub fn fail_register(mut self, unit: Option<UnitKind>) -> Self {
        self.fail_register = unit;
        self
    }

    pub fn fail_begin(mut self, fail: bool) -> Self {
        self.fail_begin = fail;
        self
    }

    pub fn registered(&self) -> &[UnitKind] {
        &self.registered
    }

    fn index(quantity: Quantity) -> usize {
        match quantity {
            Quantity::Humidity => 0,
            Quantity::Temperature => 1,
            Quantity::Pressure => 2,
        }
    }

    fn period(quantity: Quantity) -> Duration {
        match quantity {
            Quantity::Humidity | Quantity::Temperature => HUMIDITY_PERIOD,
            Quantity::Pressure => PRESSURE_PERIOD,
        }
    }
}

impl SensorHub for SyntheticHub {
    type Channel = LatchedSensor;

    async fn register(&mut self, unit: UnitKind) -> bool {
        if self.fail_register == Some(unit) {
            warn!("{}: not answering on the bus", unit.name());
            return false;
        }
        if self.registered.contains(&unit) {
            warn!("{}: unit already registered", unit.name());
            return false;
        }
        debug!("{}: registered", unit.name());
        self.registered.push(unit);
        true
    }

    async fn begin_all(&mut self) -> bool {
        if self.fail_begin || self.registered.is_empty() {
            warn!("Simulated bring-up failure");
            return false;
        }
        let now = self.time.now();
        self.next_due = [now; 3];
        self.begun = true;
        true
    }

    async fn poll(&mut self) {
        for channel in &mut self.channels {
            channel.begin_poll();
        }
        if !self.begun {
            return;
        }

        let now = self.time.now();
        for quantity in Quantity::ALL {
            let source = self.profile.source_of(quantity);
            let idx = Self::index(quantity);
            if !self.registered.contains(&source) || now < self.next_due[idx] {
                continue;
            }

            let value = synthetic_value(quantity, now.as_secs_f64());
            self.channels[idx].publish(value);
            self.next_due[idx] = now + Self::period(quantity);
        }
    }

    fn channel(&mut self, quantity: Quantity) -> &mut LatchedSensor {
        &mut self.channels[Self::index(quantity)]
    }
}

/// Power button that is held once at a scripted time.
pub struct ScriptedButton {
    time: VirtualTime,
    hold_at: Option<Duration>,
}

impl ScriptedButton {
    pub fn new(time: VirtualTime, hold_at: Option<Duration>) -> Self {
        Self { time, hold_at }
    }
}

impl HoldButton for ScriptedButton {
    async fn was_held(&mut self) -> bool {
        match self.hold_at {
            Some(at) if self.time.now() >= at => {
                self.hold_at = None;
                true
            }
            _ => false,
        }
    }
}

/// PMIC stand-in that records when power was cut.
pub struct SimPower {
    time: VirtualTime,
    off_at: Option<Duration>,
}

impl SimPower {
    pub fn new(time: VirtualTime) -> Self {
        Self { time, off_at: None }
    }

    pub fn off_at(&self) -> Option<Duration> {
        self.off_at
    }
}

impl PowerControl for SimPower {
    async fn power_off(&mut self) {
        let now = self.time.now();
        info!("Power off at {} ms", now.as_millis());
        self.off_at = Some(now);
    }
}
