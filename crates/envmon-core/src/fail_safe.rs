//! Fail-safe halt
//!
//! Entered when the sensor hardware cannot be brought up. The failure is
//! assumed to be physical (miswiring, dead unit, shorted bus), so there is no
//! retry: the error screen stays up and every later tick only idles.

use embedded_hal_async::delay::DelayNs;
use log::{error, trace};

use crate::pages::fatal_error;
use crate::ui::Renderer;

#[derive(Debug)]
pub struct FailSafeHalt {
    message: &'static str,
    idle_ms: u32,
}

impl FailSafeHalt {
    /// Log `message`, paint the error screen and return the halt state.
    pub fn enter<R: Renderer>(renderer: &mut R, message: &'static str, idle_ms: u32) -> Self {
        error!("{}", message);

        if let Err(e) = fatal_error::draw(renderer, message) {
            error!("Failed to show error screen: {:?}", e);
        }

        Self { message, idle_ms }
    }

    pub const fn message(&self) -> &'static str {
        self.message
    }

    /// One idle period. Callers invoke this in place of the normal tick.
    pub async fn idle<D: DelayNs>(&self, delay: &mut D) {
        trace!("Halted ({}), idling for {} ms", self.message, self.idle_ms);
        delay.delay_ms(self.idle_ms).await;
    }
}
