//! Runtime configuration for the monitor loop
//!
//! All timings default to the values the device ships with. The hardware
//! profile is the only setting that normally differs between builds.

use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::sensors::HardwareProfile;

/// Minimum time between two screen repaints.
pub const DEFAULT_RENDER_INTERVAL_MS: u64 = 500;

/// How long the "Power Off..." notice stays up before power is cut.
pub const DEFAULT_SHUTDOWN_NOTICE_MS: u64 = 1000;

/// Idle pause per tick once the fail-safe halt has been entered.
pub const DEFAULT_HALT_IDLE_MS: u64 = 10_000;

/// How long the "Sensor Ready!" notice stays up after a successful setup.
pub const DEFAULT_READY_NOTICE_MS: u64 = 2000;

/// What to paint for a quantity whose sensor has never reported data.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum MissingReadingPolicy {
    /// Paint the default zero value like any other reading.
    #[default]
    ShowDefault,
    /// Paint `--.-` until the first update arrives.
    ShowPlaceholder,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct MonitorConfig {
    pub hardware: HardwareProfile,
    pub render_interval_ms: u64,
    pub shutdown_notice_ms: u64,
    pub halt_idle_ms: u64,
    pub ready_notice_ms: u64,
    pub missing_readings: MissingReadingPolicy,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            hardware: HardwareProfile::default(),
            render_interval_ms: DEFAULT_RENDER_INTERVAL_MS,
            shutdown_notice_ms: DEFAULT_SHUTDOWN_NOTICE_MS,
            halt_idle_ms: DEFAULT_HALT_IDLE_MS,
            ready_notice_ms: DEFAULT_READY_NOTICE_MS,
            missing_readings: MissingReadingPolicy::default(),
        }
    }
}

impl MonitorConfig {
    /// Default configuration for the given hardware profile.
    pub fn for_profile(hardware: HardwareProfile) -> Self {
        Self {
            hardware,
            ..Self::default()
        }
    }

    pub const fn render_interval(&self) -> Duration {
        Duration::from_millis(self.render_interval_ms)
    }
}
