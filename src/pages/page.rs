//! Core page abstraction for the UI page system.
//!
//! [`Page`] defines the lifecycle and rendering contract for every screen.
//! Implementors handle their own layout, dirty tracking and drawing. The
//! host calls the methods in a fixed order each frame:
//!
//! 1. **`on_activate`**: once, when the page becomes visible.
//! 2. **`update`**: once per frame, after the frame scheduler has run.
//! 3. **`draw_page`**: when `is_dirty()` is true.
//! 4. **`on_deactivate`**: once, when the page goes away.

use embassy_time::Instant;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Trait that all UI pages must implement.
pub trait Page {
    /// Human-readable title (shown in the header and in logs).
    fn title(&self) -> &str;

    /// Called once when this page becomes the active page.
    fn on_activate(&mut self) {}

    /// Called once when this page is no longer the active page.
    ///
    /// Pages must release any running animation here.
    fn on_deactivate(&mut self) {}

    /// Pick up state changes made by timers since the last frame.
    fn update(&mut self, now: Instant);

    /// Render the dirty parts of the page.
    fn draw_page<D: DrawTarget<Color = Rgb565>>(&mut self, display: &mut D)
    -> Result<(), D::Error>;

    /// Bounding rectangle of this page (typically the full screen).
    fn bounds(&self) -> Rectangle;

    /// Whether the page has regions that need redrawing.
    fn is_dirty(&self) -> bool;

    /// Force the page to be redrawn on the next frame.
    fn mark_dirty(&mut self);
}
