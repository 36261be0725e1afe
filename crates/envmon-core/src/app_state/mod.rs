//! Application state and the monitor loop
//!
//! [`Monitor`] owns everything the loop touches: the collaborators, the
//! reading snapshot, the render timer and the system state. Setup runs once;
//! after that the caller invokes [`Monitor::tick`] at whatever cadence it
//! likes.
//!
//! Within one tick the order is fixed: poll the hub, sample, check the power
//! button, then decide whether to repaint. A hold event therefore preempts a
//! repaint that was due on the same tick.

use embedded_hal_async::delay::DelayNs;
use log::{debug, info, warn};
use thiserror_no_std::Error;

use crate::config::MonitorConfig;
use crate::display_manager::RenderThrottle;
use crate::fail_safe::FailSafeHalt;
use crate::pages::boot;
use crate::power::{HoldButton, PowerControl, ShutdownWatcher};
use crate::sampling::SampleScheduler;
use crate::sensors::{Readings, SensorHub, UnitKind};
use crate::time::Clock;
use crate::ui::Renderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemState {
    /// Normal acquisition/render loop
    Running,
    /// Hold event seen, power-off issued. Terminal.
    ShuttingDown,
    /// Hardware bring-up failed. Terminal.
    Halted,
}

/// Unrecoverable bring-up failure.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitError {
    #[error("unit registration failed: {0:?}")]
    Registration(UnitKind),
    #[error("sensor bring-up failed")]
    Begin,
    #[error("sensor bus unavailable")]
    Bus,
}

impl InitError {
    /// Text shown on the fail-safe screen.
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Registration(unit) => unit.registration_failure(),
            Self::Begin => "Failed to begin!",
            Self::Bus => "Failed to open I2C bus!",
        }
    }
}

/// Collaborators handed to [`Monitor::setup`].
pub struct MonitorParts<H, R, B, P, C, D> {
    pub hub: H,
    pub renderer: R,
    pub button: B,
    pub power: P,
    pub clock: C,
    pub delay: D,
}

enum Mode {
    Running,
    ShuttingDown,
    Halted(FailSafeHalt),
}

pub struct Monitor<H, R, B, P, C, D> {
    config: MonitorConfig,
    mode: Mode,
    hub: H,
    renderer: R,
    clock: C,
    delay: D,
    readings: Readings,
    scheduler: SampleScheduler,
    throttle: RenderThrottle,
    shutdown: ShutdownWatcher<B, P>,
}

impl<H, R, B, P, C, D> Monitor<H, R, B, P, C, D>
where
    H: SensorHub,
    R: Renderer,
    B: HoldButton,
    P: PowerControl,
    C: Clock,
    D: DelayNs,
{
    /// Register and bring up the sensor units for the configured profile.
    ///
    /// Always returns a monitor: in [`SystemState::Running`] on success, or
    /// in [`SystemState::Halted`] with the error screen up on failure.
    pub async fn setup(config: MonitorConfig, parts: MonitorParts<H, R, B, P, C, D>) -> Self {
        let mut monitor = Self::assemble(config, parts);

        match monitor.bring_up().await {
            Ok(()) => info!("Monitor running ({})", config.hardware),
            Err(e) => monitor.halt(e),
        }

        monitor
    }

    /// Skip bring-up and go straight to the fail-safe screen.
    ///
    /// For failures the board detects before the hub can be used, such as a
    /// sensor bus that could not be opened.
    pub fn halted(
        config: MonitorConfig,
        parts: MonitorParts<H, R, B, P, C, D>,
        error: InitError,
    ) -> Self {
        let mut monitor = Self::assemble(config, parts);
        monitor.halt(error);
        monitor
    }

    fn assemble(config: MonitorConfig, parts: MonitorParts<H, R, B, P, C, D>) -> Self {
        let MonitorParts {
            hub,
            renderer,
            button,
            power,
            clock,
            delay,
        } = parts;

        Self {
            config,
            mode: Mode::Running,
            hub,
            renderer,
            clock,
            delay,
            readings: Readings::default(),
            scheduler: SampleScheduler::new(),
            throttle: RenderThrottle::new(config.render_interval()),
            shutdown: ShutdownWatcher::new(button, power, clamp_ms(config.shutdown_notice_ms)),
        }
    }

    fn halt(&mut self, error: InitError) {
        warn!("Setup failed: {}", error);
        let halt = FailSafeHalt::enter(
            &mut self.renderer,
            error.message(),
            clamp_ms(self.config.halt_idle_ms),
        );
        self.mode = Mode::Halted(halt);
    }

    async fn bring_up(&mut self) -> Result<(), InitError> {
        let profile = self.config.hardware;
        info!("Initializing sensors for profile {}", profile);

        if let Err(e) = boot::draw_initializing(&mut self.renderer, profile) {
            warn!("Failed to show startup screen: {:?}", e);
        }

        for &unit in profile.units() {
            if !self.hub.register(unit).await {
                return Err(InitError::Registration(unit));
            }
            debug!("Registered {}", unit.name());
        }

        if !self.hub.begin_all().await {
            return Err(InitError::Begin);
        }
        info!("Sensor hub begun");

        if let Err(e) = boot::draw_ready(&mut self.renderer) {
            warn!("Failed to show ready screen: {:?}", e);
        }
        self.delay
            .delay_ms(clamp_ms(self.config.ready_notice_ms))
            .await;

        Ok(())
    }

    /// Run one iteration of the loop body and return the resulting state.
    ///
    /// Once halted, a tick is a single idle pause. Once shutting down, a tick
    /// does nothing at all.
    pub async fn tick(&mut self) -> SystemState {
        match &self.mode {
            Mode::Halted(halt) => halt.idle(&mut self.delay).await,
            Mode::ShuttingDown => {}
            Mode::Running => {
                self.hub.poll().await;
                self.scheduler.sample(&mut self.hub, &mut self.readings);

                if self
                    .shutdown
                    .check(&mut self.renderer, &mut self.delay)
                    .await
                {
                    self.mode = Mode::ShuttingDown;
                } else {
                    let now = self.clock.now();
                    self.throttle.poll(
                        now,
                        &self.readings,
                        self.config.missing_readings,
                        &mut self.renderer,
                    );
                }
            }
        }

        self.state()
    }

    pub fn state(&self) -> SystemState {
        match self.mode {
            Mode::Running => SystemState::Running,
            Mode::ShuttingDown => SystemState::ShuttingDown,
            Mode::Halted(_) => SystemState::Halted,
        }
    }

    /// Message on the fail-safe screen, if halted.
    pub fn halt_message(&self) -> Option<&'static str> {
        match &self.mode {
            Mode::Halted(halt) => Some(halt.message()),
            _ => None,
        }
    }

    pub fn readings(&self) -> &Readings {
        &self.readings
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn throttle(&self) -> &RenderThrottle {
        &self.throttle
    }

    pub fn hub(&self) -> &H {
        &self.hub
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn shutdown(&self) -> &ShutdownWatcher<B, P> {
        &self.shutdown
    }

    pub fn into_parts(self) -> MonitorParts<H, R, B, P, C, D> {
        let Self {
            hub,
            renderer,
            clock,
            delay,
            shutdown,
            ..
        } = self;
        let (button, power) = shutdown.into_parts();

        MonitorParts {
            hub,
            renderer,
            button,
            power,
            clock,
            delay,
        }
    }
}

fn clamp_ms(ms: u64) -> u32 {
    u32::try_from(ms).unwrap_or(u32::MAX)
}
