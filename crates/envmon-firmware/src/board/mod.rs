//! Board bring-up for the M5Stack CoreS3
//!
//! Two I2C buses are used: the internal one (PMIC and GPIO expander) on I2C0,
//! and port A (the sensor units) on I2C1. Both run at 400 kHz.

pub mod display;
pub mod power;
pub mod sensors;

use core::time::Duration;

use axp2101_embedded::AsyncAxp2101;
use embassy_embedded_hal::shared_bus::asynch::i2c::I2cDevice;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::mutex::Mutex;
use esp_hal::i2c::master::{Config as I2cConfig, ConfigError, I2c};
use esp_hal::peripherals::{GPIO1, GPIO2, GPIO11, GPIO12, I2C0, I2C1};
use esp_hal::time::Rate;
use esp_hal::Async;
use envmon_core::time::Clock;
use log::{info, warn};
use static_cell::StaticCell;

use power::{PmicButton, PmicPower, init_power_rails};

pub type BoardI2c = I2c<'static, Async>;

/// A bus shared by every driver on it. All users run on the main task.
pub type SharedBus = Mutex<NoopRawMutex, BoardI2c>;

/// One driver's handle on a [`SharedBus`].
pub type BusDevice = I2cDevice<'static, NoopRawMutex, BoardI2c>;

const I2C_FREQUENCY_KHZ: u32 = 400;

const AW9523_ADDRESS: u8 = 0x58;

/// Monotonic time since boot from the embassy time driver.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now(&self) -> Duration {
        Duration::from_micros(embassy_time::Instant::now().as_micros())
    }
}

fn create_bus(
    i2c: impl esp_hal::i2c::master::Instance + 'static,
    sda: impl esp_hal::gpio::interconnect::PeripheralOutput<'static>,
    scl: impl esp_hal::gpio::interconnect::PeripheralOutput<'static>,
) -> Result<BoardI2c, ConfigError> {
    Ok(
        I2c::new(
            i2c,
            I2cConfig::default().with_frequency(Rate::from_khz(I2C_FREQUENCY_KHZ)),
        )?
        .with_sda(sda)
        .with_scl(scl)
        .into_async(),
    )
}

/// Internal bus: PMIC rails, then the expander that owns the panel reset line.
///
/// Returns the power key and power switch, both backed by the PMIC.
pub async fn init_internal_bus(
    i2c0: I2C0<'static>,
    sda: GPIO12<'static>,
    scl: GPIO11<'static>,
) -> Result<(PmicButton<BusDevice>, PmicPower<BusDevice>), ConfigError> {
    static INTERNAL_BUS: StaticCell<SharedBus> = StaticCell::new();
    let bus: &'static SharedBus = INTERNAL_BUS.init(Mutex::new(create_bus(i2c0, sda, scl)?));

    let mut pmic = AsyncAxp2101::new(I2cDevice::new(bus));
    init_power_rails(&mut pmic).await;

    info!("Configuring GPIO expander");
    let mut expander =
        aw9523_embedded::r#async::Aw9523Async::new(I2cDevice::new(bus), AW9523_ADDRESS);
    if let Err(e) = expander.init().await {
        warn!("GPIO expander init failed: {:?}", e);
    }

    let button = PmicButton::new(I2cDevice::new(bus)).await;
    let power = PmicPower::new(I2cDevice::new(bus));
    Ok((button, power))
}

/// Port A, where the sensor units are plugged in.
pub fn init_port_a(
    i2c1: I2C1<'static>,
    sda: GPIO2<'static>,
    scl: GPIO1<'static>,
) -> Result<&'static SharedBus, ConfigError> {
    info!("Port A: SDA GPIO2, SCL GPIO1 @ {} kHz", I2C_FREQUENCY_KHZ);

    static PORT_A_BUS: StaticCell<SharedBus> = StaticCell::new();
    Ok(PORT_A_BUS.init(Mutex::new(create_bus(i2c1, sda, scl)?)))
}
