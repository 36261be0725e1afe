//! Fail-safe error screen
//!
//! Fills the panel red and shows the failure message in white. Nothing
//! draws over it afterwards.

use embedded_graphics::prelude::Point;

use super::MARGIN_X;
use crate::ui::Renderer;
use crate::ui::colors::{COLOR_FATAL_BACKGROUND, COLOR_TEXT};

pub const MESSAGE_Y: i32 = 100;

pub fn draw<R: Renderer>(renderer: &mut R, message: &str) -> Result<(), R::Error> {
    renderer.clear(COLOR_FATAL_BACKGROUND);
    renderer.draw_text(Point::new(MARGIN_X, MESSAGE_Y), message, COLOR_TEXT);
    renderer.commit()
}
