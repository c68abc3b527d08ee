//! Safety score history chart component
//!
//! The chart is redrawn from scratch every time: background, reference
//! lines, gradient fill, series line, markers. It only becomes dirty when a
//! different history record is attached.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use log::{debug, warn};

use super::constants::{LINE_COLOR, LINE_WIDTH_PX, REFERENCE_LINE_COLOR};
use super::grid::draw_reference_lines;
use super::interpolation::{
    draw_gradient_fill, draw_polyline, flatten, gradient_colors, quadratic_segments,
};
use super::markers::{Marker, draw_markers, select_markers};
use super::viewport::{ChartViewport, PlotPoint};
use crate::model::{HistorySample, SafetyScore};
use crate::ui::core::Drawable;
use crate::ui::styling::COLOR_SURFACE;

/// Line chart of the safety score history
pub struct HistoryChart {
    viewport: ChartViewport,
    score: Rc<SafetyScore>,
    background: Rgb565,
    /// Opaque styling hook forwarded to the host
    style_class: Option<String>,
    dirty: bool,
}

impl HistoryChart {
    pub fn new(bounds: Rectangle, score: Rc<SafetyScore>) -> Self {
        warn_if_degenerate(&score.history);
        Self {
            viewport: ChartViewport::new(bounds),
            score,
            background: COLOR_SURFACE,
            style_class: None,
            dirty: true,
        }
    }

    /// Set background color
    pub fn with_background(mut self, color: Rgb565) -> Self {
        self.background = color;
        self
    }

    pub fn with_style_class(mut self, style_class: Option<String>) -> Self {
        self.style_class = style_class;
        self
    }

    pub fn style_class(&self) -> Option<&str> {
        self.style_class.as_deref()
    }

    /// Attach a score record
    ///
    /// Returns `true` if it is a different record from the current one; only
    /// then is the chart scheduled for a full redraw.
    pub fn set_score(&mut self, score: Rc<SafetyScore>) -> bool {
        if Rc::ptr_eq(&self.score, &score) {
            return false;
        }

        debug!("History chart got {} samples", score.history.len());
        warn_if_degenerate(&score.history);
        self.score = score;
        self.dirty = true;
        true
    }

    pub fn history(&self) -> &[HistorySample] {
        &self.score.history
    }

    /// Screen positions of all samples (empty below two samples)
    pub fn plot_points(&self) -> Vec<PlotPoint> {
        let history = self.history();
        if history.len() < 2 {
            return Vec::new();
        }

        history
            .iter()
            .enumerate()
            .map(|(index, sample)| {
                self.viewport
                    .sample_to_screen(index, history.len(), sample.score)
            })
            .collect()
    }

    /// Marked samples (endpoints and local maxima)
    pub fn markers(&self) -> Vec<Marker> {
        let scores: Vec<u8> = self.history().iter().map(|sample| sample.score).collect();
        select_markers(&scores)
    }

    fn draw_series<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        let line = flatten(&quadratic_segments(&self.plot_points()));
        let colors = gradient_colors(LINE_COLOR, self.background);

        draw_gradient_fill(&line, &self.viewport, &colors, display)?;
        draw_polyline(&line, LINE_COLOR, LINE_WIDTH_PX, display)
    }
}

fn warn_if_degenerate(history: &[HistorySample]) {
    if history.len() < 2 {
        warn!(
            "History chart needs at least 2 samples, got {}; drawing grid only",
            history.len()
        );
    }
}

impl Drawable for HistoryChart {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        let bounds = self.viewport.area();
        let mut display = display.clipped(&bounds);

        // Layered rendering: background → grid → fill → line → markers
        bounds
            .into_styled(PrimitiveStyle::with_fill(self.background))
            .draw(&mut display)?;
        draw_reference_lines(&self.viewport, REFERENCE_LINE_COLOR, &mut display)?;

        if self.history().len() < 2 {
            return Ok(());
        }

        self.draw_series(&mut display)?;
        draw_markers(self.history(), &self.viewport, &mut display)
    }

    fn bounds(&self) -> Rectangle {
        self.viewport.area()
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::super::constants::{LABEL_COLOR, MARKER_FILL_COLOR};
    use super::super::interpolation::gradient_colors;
    use super::*;
    use crate::framebuffer::FrameBuffer;
    use crate::model::{CalendarDate, SafetyCategory};
    use crate::ui::styling::COLOR_GRID;

    fn score(scores: &[u8]) -> Rc<SafetyScore> {
        let history: Vec<HistorySample> = scores
            .iter()
            .enumerate()
            .map(|(i, &score)| {
                HistorySample::new(CalendarDate::new(2025, i as u8 + 1, 15).unwrap(), score)
            })
            .collect();
        Rc::new(SafetyScore {
            score: scores.last().copied().unwrap_or(0),
            category: SafetyCategory::Safe,
            last_updated: CalendarDate::new(2025, 5, 15).unwrap(),
            history,
        })
    }

    fn chart(record: Rc<SafetyScore>) -> HistoryChart {
        HistoryChart::new(
            Rectangle::new(Point::new(10, 10), Size::new(500, 200)),
            record,
        )
    }

    #[test]
    fn test_rerender_is_pixel_identical() {
        let chart = chart(score(&[78, 82, 85, 84, 87]));

        let mut first = FrameBuffer::new(520, 220);
        chart.draw(&mut first).unwrap();
        let snapshot = first.pixels().to_vec();

        chart.draw(&mut first).unwrap();
        assert!(first.pixels() == snapshot.as_slice());

        let mut second = FrameBuffer::new(520, 220);
        chart.draw(&mut second).unwrap();
        assert!(second.pixels() == snapshot.as_slice());
    }

    #[test]
    fn test_draws_line_and_markers() {
        let chart = chart(score(&[78, 82, 85, 84, 87]));
        let mut fb = FrameBuffer::new(520, 220);
        chart.draw(&mut fb).unwrap();

        let center = chart.plot_points()[2].to_point();
        assert_eq!(
            fb.pixel(center.x as u32, center.y as u32),
            Some(MARKER_FILL_COLOR)
        );
    }

    #[test]
    fn test_gradient_fills_below_curve_only() {
        let chart = chart(score(&[78, 82, 85, 84, 87]));
        let mut fb = FrameBuffer::new(520, 220);
        chart.draw(&mut fb).unwrap();

        // Third band (y 60..85) under the curve, fading out at the baseline
        let colors = gradient_colors(LINE_COLOR, COLOR_SURFACE);
        assert_eq!(fb.pixel(200, 80), Some(colors[2]));
        assert_ne!(fb.pixel(200, 80), Some(COLOR_SURFACE));
        assert_eq!(fb.pixel(200, 209), Some(COLOR_SURFACE));
        assert_ne!(fb.pixel(200, 80), fb.pixel(200, 209));

        // The curve never rises above y=36, so the strip above it stays blank
        let above = Rectangle::new(Point::new(11, 11), Size::new(470, 20));
        assert_eq!(fb.count_color(&above, COLOR_SURFACE), 470 * 20);
    }

    #[test]
    fn test_scores_labelled_on_endpoints_only() {
        let chart = chart(score(&[78, 82, 85, 84, 87]));
        let mut fb = FrameBuffer::new(520, 220);
        chart.draw(&mut fb).unwrap();

        // First marker at (10, 54), last at (510, 36), peak at (260, 40)
        let first = Rectangle::new(Point::new(10, 30), Size::new(24, 14));
        let last = Rectangle::new(Point::new(480, 14), Size::new(30, 16));
        let peak = Rectangle::new(Point::new(245, 18), Size::new(30, 14));

        assert!(fb.count_color(&first, LABEL_COLOR) > 0);
        assert!(fb.count_color(&last, LABEL_COLOR) > 0);
        assert_eq!(fb.count_color(&peak, LABEL_COLOR), 0);
    }

    #[test]
    fn test_drawing_stays_inside_bounds() {
        let chart = chart(score(&[100, 0, 100]));
        let mut fb = FrameBuffer::new(520, 220);
        chart.draw(&mut fb).unwrap();

        let drawn = fb.dirty_area().unwrap();
        assert_eq!(drawn, chart.bounds());
    }

    #[test]
    fn test_single_sample_draws_grid_only() {
        let chart = chart(score(&[42]));
        assert!(chart.plot_points().is_empty());

        let mut fb = FrameBuffer::new(520, 220);
        chart.draw(&mut fb).unwrap();

        // Reference line at 80% of a 200 px area starting at y=10
        assert_eq!(fb.pixel(250, 50), Some(COLOR_GRID));
        assert_eq!(fb.pixel(250, 100), Some(COLOR_SURFACE));
    }

    #[test]
    fn test_empty_history_does_not_panic() {
        let chart = chart(score(&[]));
        let mut fb = FrameBuffer::new(520, 220);
        assert!(chart.draw(&mut fb).is_ok());
        assert!(chart.markers().is_empty());
    }

    #[test]
    fn test_only_new_records_mark_dirty() {
        let record = score(&[70, 80]);
        let mut chart = chart(record.clone());
        chart.mark_clean();

        assert!(!chart.set_score(record));
        assert!(!chart.is_dirty());

        assert!(chart.set_score(score(&[70, 80])));
        assert!(chart.is_dirty());
    }

    #[test]
    fn test_style_class_passthrough() {
        let chart = chart(score(&[70, 80])).with_style_class(Some(String::from("col-span-2")));
        assert_eq!(chart.style_class(), Some("col-span-2"));
    }
}
