//! Hardware profiles for the sensor cluster
//!
//! The device ships in two configurations: a combined ENV IV unit carrying
//! both an SHT40 and a BMP280, or the same two chips as standalone units.
//! The profile is picked once at startup and decides which units get
//! registered with the hub.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror_no_std::Error;

use super::Quantity;

/// A sensor unit that can be registered with a hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitKind {
    /// Combined SHT40 + BMP280 unit
    EnvIv,
    /// Standalone SHT40 temperature/humidity unit
    Sht40,
    /// Standalone BMP280 pressure unit
    Bmp280,
}

impl UnitKind {
    pub const fn name(self) -> &'static str {
        match self {
            Self::EnvIv => "ENV4",
            Self::Sht40 => "SHT40",
            Self::Bmp280 => "BMP280",
        }
    }

    /// Message shown by the fail-safe screen when registration fails.
    pub const fn registration_failure(self) -> &'static str {
        match self {
            Self::EnvIv => "Failed to add ENV4!",
            Self::Sht40 => "Failed to add SHT40",
            Self::Bmp280 => "Failed to add BMP280",
        }
    }

    /// Whether this unit measures the given quantity.
    pub const fn provides(self, quantity: Quantity) -> bool {
        match self {
            Self::EnvIv => true,
            Self::Sht40 => matches!(quantity, Quantity::Humidity | Quantity::Temperature),
            Self::Bmp280 => matches!(quantity, Quantity::Pressure),
        }
    }
}

/// Physical sensor layout of the device.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum HardwareProfile {
    /// One ENV IV unit on port A
    #[default]
    EnvIv,
    /// Separate SHT40 and BMP280 units
    Discrete,
}

impl HardwareProfile {
    /// Units to register, in registration order.
    pub const fn units(self) -> &'static [UnitKind] {
        match self {
            Self::EnvIv => &[UnitKind::EnvIv],
            Self::Discrete => &[UnitKind::Sht40, UnitKind::Bmp280],
        }
    }

    /// The unit that supplies a quantity under this profile.
    pub fn source_of(self, quantity: Quantity) -> UnitKind {
        self.units()
            .iter()
            .copied()
            .find(|unit| unit.provides(quantity))
            .unwrap_or(UnitKind::EnvIv)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::EnvIv => "ENV IV",
            Self::Discrete => "SHT40 + BMP280",
        }
    }
}

impl fmt::Display for HardwareProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown hardware profile (expected `env-iv` or `discrete`)")]
pub struct ProfileParseError;

impl FromStr for HardwareProfile {
    type Err = ProfileParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if ["env-iv", "env_iv", "enviv", "env4"]
            .iter()
            .any(|name| s.eq_ignore_ascii_case(name))
        {
            Ok(Self::EnvIv)
        } else if s.eq_ignore_ascii_case("discrete") {
            Ok(Self::Discrete)
        } else {
            Err(ProfileParseError)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_iv_registers_a_single_unit() {
        assert_eq!(HardwareProfile::EnvIv.units(), &[UnitKind::EnvIv]);
        for quantity in Quantity::ALL {
            assert_eq!(HardwareProfile::EnvIv.source_of(quantity), UnitKind::EnvIv);
        }
    }

    #[test]
    fn discrete_registers_sht40_before_bmp280() {
        let profile = HardwareProfile::Discrete;
        assert_eq!(profile.units(), &[UnitKind::Sht40, UnitKind::Bmp280]);
        assert_eq!(profile.source_of(Quantity::Humidity), UnitKind::Sht40);
        assert_eq!(profile.source_of(Quantity::Temperature), UnitKind::Sht40);
        assert_eq!(profile.source_of(Quantity::Pressure), UnitKind::Bmp280);
    }

    #[test]
    fn parses_profile_names() {
        assert_eq!("env-iv".parse(), Ok(HardwareProfile::EnvIv));
        assert_eq!(" ENV4 ".parse(), Ok(HardwareProfile::EnvIv));
        assert_eq!("Discrete".parse(), Ok(HardwareProfile::Discrete));
        assert_eq!("env3".parse::<HardwareProfile>(), Err(ProfileParseError));
    }

    #[test]
    fn registration_failure_messages() {
        let messages = [UnitKind::EnvIv, UnitKind::Sht40, UnitKind::Bmp280]
            .map(UnitKind::registration_failure);
        assert_eq!(
            messages,
            [
                "Failed to add ENV4!",
                "Failed to add SHT40",
                "Failed to add BMP280"
            ]
        );
    }
}
