//! Recording collaborators for unit tests.

use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use core::cell::Cell;
use core::convert::Infallible;
use core::time::Duration;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PointsIter, Rectangle};
use embedded_hal_async::delay::DelayNs;

use crate::power::{HoldButton, PowerControl};
use crate::sensors::{LatchedSensor, Quantity, SensorHub, UnitKind};
use crate::time::Clock;
use crate::ui::Renderer;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear(Rgb565),
    Text {
        position: Point,
        text: String,
        color: Rgb565,
    },
    Commit,
}

impl DrawCall {
    pub fn text(x: i32, y: i32, text: &str, color: Rgb565) -> Self {
        Self::Text {
            position: Point::new(x, y),
            text: text.to_string(),
            color,
        }
    }
}

#[derive(Default)]
pub struct MockRenderer {
    calls: Vec<DrawCall>,
    fail_commits: bool,
}

impl MockRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn commits(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| **call == DrawCall::Commit)
            .count()
    }

    pub fn fail_commits(&mut self, fail: bool) {
        self.fail_commits = fail;
    }
}

impl Renderer for MockRenderer {
    type Error = &'static str;

    fn clear(&mut self, color: Rgb565) {
        self.calls.push(DrawCall::Clear(color));
    }

    fn draw_text(&mut self, position: Point, text: &str, color: Rgb565) {
        self.calls.push(DrawCall::Text {
            position,
            text: text.to_string(),
            color,
        });
    }

    fn commit(&mut self) -> Result<(), Self::Error> {
        self.calls.push(DrawCall::Commit);
        if self.fail_commits {
            Err("panel not responding")
        } else {
            Ok(())
        }
    }
}

/// Panel stand-in that keeps its pixels and every `fill_contiguous` area.
pub struct RecordingDisplay {
    size: Size,
    pixels: Vec<Rgb565>,
    transfers: Vec<Rectangle>,
}

impl RecordingDisplay {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            pixels: vec![Rgb565::BLACK; (size.width * size.height) as usize],
            transfers: Vec::new(),
        }
    }

    pub fn transfers(&self) -> &[Rectangle] {
        &self.transfers
    }

    pub fn pixel(&self, point: Point) -> Option<Rgb565> {
        self.index_of(point).map(|idx| self.pixels[idx])
    }

    fn index_of(&self, point: Point) -> Option<usize> {
        let inside = point.x >= 0
            && point.y >= 0
            && (point.x as u32) < self.size.width
            && (point.y as u32) < self.size.height;
        inside.then(|| point.y as usize * self.size.width as usize + point.x as usize)
    }
}

impl OriginDimensions for RecordingDisplay {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for RecordingDisplay {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(idx) = self.index_of(point) {
                self.pixels[idx] = color;
            }
        }
        Ok(())
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        self.transfers.push(*area);
        let pixels = area.points().zip(colors).map(|(p, c)| Pixel(p, c));
        self.draw_iter(pixels)
    }
}

/// Hub whose channels are fed from a per-poll queue.
pub struct MockHub {
    channels: [LatchedSensor; 3],
    queued: Vec<(Quantity, f32)>,
    registered: Vec<UnitKind>,
    reject_unit: Option<UnitKind>,
    fail_begin: bool,
    begun: bool,
    polls: usize,
}

impl MockHub {
    pub fn new() -> Self {
        Self {
            channels: [LatchedSensor::new(); 3],
            queued: Vec::new(),
            registered: Vec::new(),
            reject_unit: None,
            fail_begin: false,
            begun: false,
            polls: 0,
        }
    }

    /// Make registration of `unit` fail.
    pub fn reject(mut self, unit: UnitKind) -> Self {
        self.reject_unit = Some(unit);
        self
    }

    pub fn failing_begin(mut self) -> Self {
        self.fail_begin = true;
        self
    }

    /// Publish `value` on `quantity` during the next poll.
    pub fn queue(&mut self, quantity: Quantity, value: f32) {
        self.queued.push((quantity, value));
    }

    pub fn registered(&self) -> &[UnitKind] {
        &self.registered
    }

    pub fn begun(&self) -> bool {
        self.begun
    }

    pub fn polls(&self) -> usize {
        self.polls
    }

    pub fn total_reads(&self) -> u32 {
        self.channels.iter().map(LatchedSensor::reads).sum()
    }

    fn index(quantity: Quantity) -> usize {
        match quantity {
            Quantity::Humidity => 0,
            Quantity::Temperature => 1,
            Quantity::Pressure => 2,
        }
    }
}

impl SensorHub for MockHub {
    type Channel = LatchedSensor;

    async fn register(&mut self, unit: UnitKind) -> bool {
        if self.reject_unit == Some(unit) {
            return false;
        }
        self.registered.push(unit);
        true
    }

    async fn begin_all(&mut self) -> bool {
        self.begun = !self.fail_begin;
        self.begun
    }

    async fn poll(&mut self) {
        self.polls += 1;
        for channel in &mut self.channels {
            channel.begin_poll();
        }
        for (quantity, value) in self.queued.drain(..) {
            self.channels[Self::index(quantity)].publish(value);
        }
    }

    fn channel(&mut self, quantity: Quantity) -> &mut LatchedSensor {
        &mut self.channels[Self::index(quantity)]
    }
}

/// Button that reports a hold on one chosen poll.
#[derive(Default)]
pub struct MockButton {
    hold_on: Option<usize>,
    polls: usize,
}

impl MockButton {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a hold on the `poll`-th call (0-based).
    pub fn hold_on_poll(&mut self, poll: usize) {
        self.hold_on = Some(poll);
    }

    pub fn polls(&self) -> usize {
        self.polls
    }
}

impl HoldButton for MockButton {
    async fn was_held(&mut self) -> bool {
        let held = self.hold_on == Some(self.polls);
        self.polls += 1;
        held
    }
}

#[derive(Default)]
pub struct MockPower {
    power_offs: usize,
}

impl MockPower {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn power_offs(&self) -> usize {
        self.power_offs
    }
}

impl PowerControl for MockPower {
    async fn power_off(&mut self) {
        self.power_offs += 1;
    }
}

#[derive(Default)]
pub struct MockClock {
    now_ms: Cell<u64>,
}

impl MockClock {
    pub fn at(ms: u64) -> Self {
        Self {
            now_ms: Cell::new(ms),
        }
    }

    pub fn set_ms(&self, ms: u64) {
        self.now_ms.set(ms);
    }
}

impl Clock for MockClock {
    fn now(&self) -> Duration {
        Duration::from_millis(self.now_ms.get())
    }
}

/// Records every pause instead of sleeping.
#[derive(Default)]
pub struct MockDelay {
    pauses_ms: Vec<u32>,
}

impl MockDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pauses(&self) -> &[u32] {
        &self.pauses_ms
    }

    pub fn total_ms(&self) -> u64 {
        self.pauses_ms.iter().map(|&ms| u64::from(ms)).sum()
    }
}

impl DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.pauses_ms.push(ns / 1_000_000);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.pauses_ms.push(ms);
    }
}
