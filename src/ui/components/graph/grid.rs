//! Horizontal reference lines behind the history chart

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};
use micromath::F32;

use super::constants::{REFERENCE_LINE_COUNT, REFERENCE_LINE_PERCENTS};
use super::viewport::ChartViewport;

/// Screen rows of the reference lines, bottom to top
pub(super) fn reference_line_rows(viewport: &ChartViewport) -> [i32; REFERENCE_LINE_COUNT] {
    REFERENCE_LINE_PERCENTS
        .map(|percent| F32(viewport.score_to_y(f32::from(percent))).round().0 as i32)
}

/// Draw 1 px reference lines across the full chart width
pub(super) fn draw_reference_lines<D: DrawTarget<Color = Rgb565>>(
    viewport: &ChartViewport,
    color: Rgb565,
    display: &mut D,
) -> Result<(), D::Error> {
    let style = PrimitiveStyle::with_stroke(color, 1);

    for y in reference_line_rows(viewport) {
        Line::new(
            Point::new(viewport.left(), y),
            Point::new(viewport.right(), y),
        )
        .into_styled(style)
        .draw(display)?;
    }

    Ok(())
}
