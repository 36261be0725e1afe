//! AXP2101 power management: rail bring-up, power key and power switch.
//!
//! Rails are configured through `axp2101-embedded`. The power key IRQ and the
//! software power-off bit are plain register accesses on the same chip.

use core::fmt::Debug;

use axp2101_embedded::{AsyncAxp2101, ChargeLedMode};
use embedded_hal_async::i2c::I2c;
use envmon_core::power::{HoldButton, PowerControl};
use log::{error, info, warn};

const AXP2101_ADDRESS: u8 = 0x34;

/// Common configuration register, bit 0 requests power-off.
const REG_COMMON_CONFIG: u8 = 0x10;
const SOFT_POWER_OFF: u8 = 0x01;

/// IRQ enable 1 / IRQ status 1 hold the power key events.
const REG_IRQ_ENABLE_1: u8 = 0x41;
const REG_IRQ_STATUS_1: u8 = 0x49;
const PKEY_LONG_PRESS: u8 = 0x04;

fn check<T, E: Debug>(step: &str, result: Result<T, E>) {
    if let Err(e) = result {
        warn!("PMIC {} failed: {:?}", step, e);
    }
}

/// Bring the PMIC up and switch on every rail the board uses.
pub async fn init_power_rails<I: I2c>(pmic: &mut AsyncAxp2101<I>) {
    info!("Configuring power management");
    match pmic.init().await {
        Ok(_) => info!("Power management ready"),
        Err(e) => error!("Power init failed: {:?}", e),
    }

    check(
        "charge LED",
        pmic.set_charging_led_mode(ChargeLedMode::On).await,
    );
    check("ALDO1", pmic.enable_aldo1().await);
    check("ALDO2", pmic.enable_aldo2().await);
    check("ALDO3", pmic.enable_aldo3().await);
    check("ALDO4", pmic.enable_aldo4().await);
    check("BLDO1", pmic.enable_bldo1().await);
    check("BLDO2", pmic.enable_bldo2().await);
    check("DLDO1", pmic.enable_dldo1().await);
    // 3.3 V for the display
    check("ALDO4 voltage", pmic.set_aldo4_voltage(3300).await);
}

async fn update_register<I: I2c>(i2c: &mut I, reg: u8, set: u8) -> Result<(), I::Error> {
    let mut value = [0u8];
    i2c.write_read(AXP2101_ADDRESS, &[reg], &mut value).await?;
    i2c.write(AXP2101_ADDRESS, &[reg, value[0] | set]).await
}

/// Power key long-press events, read from the PMIC IRQ status.
pub struct PmicButton<I> {
    i2c: I,
}

impl<I: I2c> PmicButton<I> {
    /// Enable the long-press IRQ and drop any event latched before boot.
    pub async fn new(mut i2c: I) -> Self {
        if let Err(e) = update_register(&mut i2c, REG_IRQ_ENABLE_1, PKEY_LONG_PRESS).await {
            warn!("Failed to enable power key IRQ: {:?}", e);
        }
        if let Err(e) = i2c
            .write(AXP2101_ADDRESS, &[REG_IRQ_STATUS_1, PKEY_LONG_PRESS])
            .await
        {
            warn!("Failed to clear power key IRQ: {:?}", e);
        }
        Self { i2c }
    }
}

impl<I: I2c> HoldButton for PmicButton<I> {
    async fn was_held(&mut self) -> bool {
        let mut status = [0u8];
        if let Err(e) = self
            .i2c
            .write_read(AXP2101_ADDRESS, &[REG_IRQ_STATUS_1], &mut status)
            .await
        {
            warn!("Power key status read failed: {:?}", e);
            return false;
        }

        if status[0] & PKEY_LONG_PRESS == 0 {
            return false;
        }

        // Write-one-to-clear
        if let Err(e) = self
            .i2c
            .write(AXP2101_ADDRESS, &[REG_IRQ_STATUS_1, PKEY_LONG_PRESS])
            .await
        {
            warn!("Failed to clear power key IRQ: {:?}", e);
        }
        true
    }
}

/// Software power switch on the PMIC.
pub struct PmicPower<I> {
    i2c: I,
}

impl<I: I2c> PmicPower<I> {
    pub fn new(i2c: I) -> Self {
        Self { i2c }
    }
}

impl<I: I2c> PowerControl for PmicPower<I> {
    async fn power_off(&mut self) {
        info!("Cutting power");
        if let Err(e) = update_register(&mut self.i2c, REG_COMMON_CONFIG, SOFT_POWER_OFF).await {
            error!("Power off request failed: {:?}", e);
        }
    }
}
