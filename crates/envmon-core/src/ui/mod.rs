//! Rendering primitives shared by every screen
//!
//! - [`Renderer`]: the clear / draw text / commit capability the loop paints with
//! - [`Screen`]: a [`Renderer`] backed by a [`FrameBuffer`](crate::framebuffer::FrameBuffer)
//!   and any `DrawTarget<Color = Rgb565>` panel
//! - [`colors`]: the fixed palette

pub mod colors;
mod screen;

pub use screen::Screen;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::Point;

/// Panel width in pixels (ILI9342C in landscape).
pub const DISPLAY_WIDTH_PX: u16 = 320;

/// Panel height in pixels.
pub const DISPLAY_HEIGHT_PX: u16 = 240;

/// Surface the monitor paints on.
///
/// Drawing calls only touch an off-screen surface; nothing becomes visible
/// until [`commit`](Renderer::commit) pushes the whole frame at once.
pub trait Renderer {
    type Error: core::fmt::Debug;

    /// Fill the whole surface with `color`.
    fn clear(&mut self, color: Rgb565);

    /// Draw `text` with its top-left corner at `position`.
    fn draw_text(&mut self, position: Point, text: &str, color: Rgb565);

    /// Make the composed frame visible.
    fn commit(&mut self) -> Result<(), Self::Error>;
}
