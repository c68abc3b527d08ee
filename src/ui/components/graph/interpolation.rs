//! Smoothed series line and gradient fill
//!
//! The series is a chain of quadratic Bézier segments. Each raw point is the
//! control point of a segment ending at the midpoint to the next raw point,
//! and a final segment curves from the second-to-last raw point into the
//! last one. Segments are flattened into short straight lines for drawing.

use alloc::vec::Vec;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};

use super::constants::{CURVE_SUBDIVISIONS, FILL_BANDS, FILL_TOP_OPACITY};
use super::viewport::{ChartViewport, PlotPoint};
use crate::ui::styling::{blend, lerp_color};

/// One quadratic Bézier segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadSegment {
    pub start: PlotPoint,
    pub control: PlotPoint,
    pub end: PlotPoint,
}

impl QuadSegment {
    /// Point at parameter `t` in 0.0-1.0
    pub fn point_at(&self, t: f32) -> PlotPoint {
        let inv = 1.0 - t;
        let a = inv * inv;
        let b = 2.0 * inv * t;
        let c = t * t;
        PlotPoint::new(
            a * self.start.x + b * self.control.x + c * self.end.x,
            a * self.start.y + b * self.control.y + c * self.end.y,
        )
    }
}

/// Build the smoothed segment chain through `points`
///
/// Returns no segments for fewer than two points.
pub fn quadratic_segments(points: &[PlotPoint]) -> Vec<QuadSegment> {
    let [.., second_last, last] = points else {
        return Vec::new();
    };

    let mut segments = Vec::with_capacity(points.len());
    let mut pen = points[0];

    for pair in points.windows(2) {
        let end = pair[0].midpoint(pair[1]);
        segments.push(QuadSegment {
            start: pen,
            control: pair[0],
            end,
        });
        pen = end;
    }

    segments.push(QuadSegment {
        start: pen,
        control: *second_last,
        end: *last,
    });

    segments
}

/// Flatten segments into a pixel polyline without consecutive duplicates
pub fn flatten(segments: &[QuadSegment]) -> Vec<Point> {
    let mut screen_points: Vec<Point> = Vec::with_capacity(segments.len() * CURVE_SUBDIVISIONS + 1);
    let step = 1.0 / CURVE_SUBDIVISIONS as f32;

    if let Some(first) = segments.first() {
        screen_points.push(first.start.to_point());
    }

    for segment in segments {
        for j in 1..=CURVE_SUBDIVISIONS {
            let point = segment.point_at(j as f32 * step).to_point();
            if screen_points.last().copied() != Some(point) {
                screen_points.push(point);
            }
        }
    }

    screen_points
}

/// Stroke a polyline with straight segments
pub(super) fn draw_polyline<D: DrawTarget<Color = Rgb565>>(
    screen_points: &[Point],
    color: Rgb565,
    width: u32,
    display: &mut D,
) -> Result<(), D::Error> {
    let style = PrimitiveStyle::with_stroke(color, width);
    for pair in screen_points.windows(2) {
        Line::new(pair[0], pair[1]).into_styled(style).draw(display)?;
    }
    Ok(())
}

/// Gradient band colors, top to bottom
///
/// The top band is `color` at [`FILL_TOP_OPACITY`] over `background`; the
/// gradient fades to the plain background at the baseline.
pub(super) fn gradient_colors(color: Rgb565, background: Rgb565) -> [Rgb565; FILL_BANDS] {
    let top = blend(background, color, FILL_TOP_OPACITY);
    core::array::from_fn(|band| {
        let t = band as f32 / (FILL_BANDS - 1) as f32;
        lerp_color(top, background, t)
    })
}

/// Fill the area between the polyline and the baseline
///
/// Bands are anchored to the chart area, not to each column, so the
/// gradient runs from the top edge to the baseline like a single vertical
/// linear gradient.
pub(super) fn draw_gradient_fill<D: DrawTarget<Color = Rgb565>>(
    screen_points: &[Point],
    viewport: &ChartViewport,
    colors: &[Rgb565],
    display: &mut D,
) -> Result<(), D::Error> {
    for pair in screen_points.windows(2) {
        let (mut start, mut end) = (pair[0], pair[1]);
        if start.x > end.x {
            core::mem::swap(&mut start, &mut end);
        }

        let dx = (end.x - start.x).max(1) as f32;
        for x in start.x..=end.x {
            let t = (x - start.x) as f32 / dx;
            let y_line = start.y + ((end.y - start.y) as f32 * t) as i32;
            draw_gradient_column(x, y_line, viewport, colors, display)?;
        }
    }

    Ok(())
}

fn draw_gradient_column<D: DrawTarget<Color = Rgb565>>(
    x: i32,
    y_line: i32,
    viewport: &ChartViewport,
    colors: &[Rgb565],
    display: &mut D,
) -> Result<(), D::Error> {
    let top = viewport.top();
    let bottom = viewport.baseline();
    if y_line >= bottom || colors.is_empty() {
        return Ok(());
    }

    let band_height = (bottom - top) as f32 / colors.len() as f32;

    for (index, color) in colors.iter().enumerate() {
        let band_start = top + (band_height * index as f32) as i32;
        let band_end = if index == colors.len() - 1 {
            bottom
        } else {
            top + (band_height * (index as f32 + 1.0)) as i32
        };

        let start = band_start.max(y_line);
        let end = band_end - 1;
        if end >= start {
            Line::new(Point::new(x, start), Point::new(x, end))
                .into_styled(PrimitiveStyle::with_stroke(*color, 1))
                .draw(display)?;
        }
    }

    Ok(())
}
