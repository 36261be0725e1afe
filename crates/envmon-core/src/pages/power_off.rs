//! Shutdown notice

use embedded_graphics::prelude::Point;

use crate::ui::Renderer;
use crate::ui::colors::{COLOR_BACKGROUND, COLOR_TEXT};

pub const MESSAGE: &str = "Power Off...";

pub const POSITION: Point = Point::new(60, 100);

pub fn draw<R: Renderer>(renderer: &mut R) -> Result<(), R::Error> {
    renderer.clear(COLOR_BACKGROUND);
    renderer.draw_text(POSITION, MESSAGE, COLOR_TEXT);
    renderer.commit()
}
