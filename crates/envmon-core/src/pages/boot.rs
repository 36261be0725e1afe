//! Startup progress screens

use core::fmt::Write;

use embedded_graphics::prelude::Point;
use heapless::String;

use super::MARGIN_X;
use crate::sensors::HardwareProfile;
use crate::ui::Renderer;
use crate::ui::colors::{COLOR_BACKGROUND, COLOR_READY, COLOR_TEXT};

pub const INITIALIZING: &str = "Initializing...";

pub const READY: &str = "Sensor Ready!";

/// Shown while units are registered and brought up.
pub fn draw_initializing<R: Renderer>(
    renderer: &mut R,
    profile: HardwareProfile,
) -> Result<(), R::Error> {
    let mut profile_line: String<32> = String::new();
    let _ = write!(profile_line, "Profile: {profile}");

    renderer.clear(COLOR_BACKGROUND);
    renderer.draw_text(Point::new(MARGIN_X, 10), INITIALIZING, COLOR_TEXT);
    renderer.draw_text(Point::new(MARGIN_X, 30), &profile_line, COLOR_TEXT);
    renderer.commit()
}

/// Shown once every unit has been brought up.
pub fn draw_ready<R: Renderer>(renderer: &mut R) -> Result<(), R::Error> {
    renderer.clear(COLOR_BACKGROUND);
    renderer.draw_text(Point::new(MARGIN_X, 100), READY, COLOR_READY);
    renderer.commit()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{DrawCall, MockRenderer};

    #[test]
    fn initializing_names_the_profile() {
        let mut renderer = MockRenderer::new();
        draw_initializing(&mut renderer, HardwareProfile::Discrete).unwrap();

        assert_eq!(
            renderer.calls(),
            &[
                DrawCall::Clear(COLOR_BACKGROUND),
                DrawCall::text(10, 10, INITIALIZING, COLOR_TEXT),
                DrawCall::text(10, 30, "Profile: SHT40 + BMP280", COLOR_TEXT),
                DrawCall::Commit,
            ]
        );
    }
}
