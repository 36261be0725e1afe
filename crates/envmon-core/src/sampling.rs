//! Sample scheduling
//!
//! Drains whatever data the sensor capabilities have ready on each tick.
//! There is no fixed sampling period here: conversion timing is owned by the
//! sensors, and a tick without new data leaves the readings untouched.

use log::debug;

use crate::sensors::{Quantity, Readings, Sensor, SensorHub};

#[derive(Debug, Clone, Copy, Default)]
pub struct SampleScheduler;

impl SampleScheduler {
    pub const fn new() -> Self {
        Self
    }

    /// Copy every freshly updated value from the hub's channels into `readings`.
    pub fn sample<H: SensorHub>(&self, hub: &mut H, readings: &mut Readings) {
        for quantity in Quantity::ALL {
            let channel = hub.channel(quantity);
            if !channel.updated() {
                continue;
            }

            let value = quantity.from_native(channel.read());
            readings.get_mut(quantity).store(value);

            debug!("{}: {:.1} {}", quantity.label(), value, quantity.unit());
        }
    }
}
