use embedded_graphics::{
    Drawable as EgDrawable,
    mono_font::{MonoTextStyle, ascii::FONT_10X20},
    pixelcolor::Rgb565,
    prelude::*,
    text::{Baseline, Text},
};

use super::Renderer;
use crate::framebuffer::FrameBuffer;

/// [`Renderer`] that composes frames in a [`FrameBuffer`] and flushes them to
/// a panel on commit.
pub struct Screen<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    canvas: FrameBuffer,
    display: D,
}

impl<D> Screen<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    /// Wrap `display` with a canvas of the same size.
    pub fn new(display: D) -> Self {
        let size = display.bounding_box().size;
        Self {
            canvas: FrameBuffer::new(size),
            display,
        }
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn canvas(&self) -> &FrameBuffer {
        &self.canvas
    }

    pub fn into_display(self) -> D {
        self.display
    }
}

impl<D> Renderer for Screen<D>
where
    D: DrawTarget<Color = Rgb565>,
    D::Error: core::fmt::Debug,
{
    type Error = D::Error;

    fn clear(&mut self, color: Rgb565) {
        // Canvas drawing is infallible
        let _ = self.canvas.clear(color);
    }

    fn draw_text(&mut self, position: Point, text: &str, color: Rgb565) {
        let style = MonoTextStyle::new(&FONT_10X20, color);
        let _ = EgDrawable::draw(
            &Text::with_baseline(text, position, style, Baseline::Top),
            &mut self.canvas,
        );
    }

    fn commit(&mut self) -> Result<(), Self::Error> {
        self.canvas.flush(&mut self.display)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingDisplay;
    use embedded_graphics::primitives::Rectangle;

    #[test]
    fn nothing_reaches_the_panel_before_commit() {
        let mut screen = Screen::new(RecordingDisplay::new(Size::new(64, 32)));
        screen.commit().unwrap();
        let transfers = screen.display().transfers().len();

        screen.clear(Rgb565::BLUE);
        screen.draw_text(Point::new(2, 2), "Hi", Rgb565::WHITE);
        assert_eq!(screen.display().transfers().len(), transfers);
        let inside_point = Point::new(40, 20);
        assert_eq!(screen.display().pixel(inside_point), Some(Rgb565::BLACK));

        screen.commit().unwrap();
        assert_eq!(screen.display().transfers().len(), transfers + 1);
        assert_eq!(screen.display().pixel(inside_point), Some(Rgb565::BLUE));
    }

    #[test]
    fn text_is_anchored_at_top_left() {
        let mut screen = Screen::new(RecordingDisplay::new(Size::new(64, 32)));
        screen.commit().unwrap();

        screen.draw_text(Point::new(10, 5), "#", Rgb565::WHITE);
        screen.commit().unwrap();

        let drawn = screen.display().transfers().last().copied().unwrap();
        let glyph_cell = Rectangle::new(Point::new(10, 5), Size::new(10, 20));
        assert_eq!(drawn.intersection(&glyph_cell), drawn);
    }
}
