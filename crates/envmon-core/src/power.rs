//! Power button handling and the shutdown path

use embedded_hal_async::delay::DelayNs;
use log::{error, info};

use crate::pages::power_off;
use crate::ui::Renderer;

/// Debounced "button held past the long-press threshold" event source.
pub trait HoldButton {
    /// Whether a hold event occurred since the previous call.
    fn was_held(&mut self) -> impl Future<Output = bool>;
}

/// Removes power from the device.
pub trait PowerControl {
    /// Cut power. On hardware this does not return; simulated and test
    /// implementations return and the monitor stays in `ShuttingDown`.
    fn power_off(&mut self) -> impl Future<Output = ()>;
}

/// Watches the power button and runs the shutdown sequence on a hold event.
pub struct ShutdownWatcher<B, P> {
    button: B,
    power: P,
    notice_ms: u32,
}

impl<B, P> ShutdownWatcher<B, P>
where
    B: HoldButton,
    P: PowerControl,
{
    pub fn new(button: B, power: P, notice_ms: u32) -> Self {
        Self {
            button,
            power,
            notice_ms,
        }
    }

    /// Poll the button once. Returns `false` while no hold event is pending.
    ///
    /// On a hold event the shutdown notice is shown, left up for the notice
    /// duration, then power is cut, and `true` is returned.
    pub async fn check<R, D>(&mut self, renderer: &mut R, delay: &mut D) -> bool
    where
        R: Renderer,
        D: DelayNs,
    {
        if !self.button.was_held().await {
            return false;
        }

        info!("Power button held, shutting down");
        if let Err(e) = power_off::draw(renderer) {
            error!("Failed to show shutdown notice: {:?}", e);
        }

        delay.delay_ms(self.notice_ms).await;
        self.power.power_off().await;

        true
    }

    pub fn button(&self) -> &B {
        &self.button
    }

    pub fn power(&self) -> &P {
        &self.power
    }

    pub fn into_parts(self) -> (B, P) {
        (self.button, self.power)
    }
}
