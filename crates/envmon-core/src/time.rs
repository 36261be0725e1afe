//! Monotonic time source

use core::time::Duration;

/// Monotonic clock measured from boot.
pub trait Clock {
    /// Time elapsed since boot. Never goes backwards.
    fn now(&self) -> Duration;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Duration {
        (**self).now()
    }
}
