//! Score band legend drawn under the safety score gauge
//!
//! Three rows: the band labels (risk, moderate, safe), a horizontal bar
//! shading red through amber to green, and the 0/50/100 scale ticks.

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

use crate::metrics::ScoreBand;
use crate::ui::core::Drawable;
use crate::ui::styling::fonts::FONT_6X10_CHAR_HEIGHT_PX;
use crate::ui::styling::{COLOR_TEXT_MUTED, TextSize, lerp_color};

/// Gap between legend rows in pixels
pub const LEGEND_ROW_GAP_PX: u32 = 3;

/// Height of the gradient bar in pixels
pub const LEGEND_BAR_HEIGHT_PX: u32 = 6;

/// Total legend height: label row, bar, tick row
pub const LEGEND_HEIGHT_PX: u32 =
    2 * FONT_6X10_CHAR_HEIGHT_PX + LEGEND_BAR_HEIGHT_PX + 2 * LEGEND_ROW_GAP_PX;

/// Band order from left to right
const BANDS: [ScoreBand; 3] = [ScoreBand::Risk, ScoreBand::Moderate, ScoreBand::Safe];

const TICKS: [&str; 3] = ["0", "50", "100"];

pub struct ScoreLegend {
    bounds: Rectangle,
    dirty: bool,
}

impl ScoreLegend {
    /// Legend spanning the width of `bounds`, anchored to its top edge
    pub fn new(bounds: Rectangle) -> Self {
        Self {
            bounds,
            dirty: true,
        }
    }

    /// Top edge of the gradient bar
    pub fn bar_top(&self) -> i32 {
        self.bounds.top_left.y + (FONT_6X10_CHAR_HEIGHT_PX + LEGEND_ROW_GAP_PX) as i32
    }

    /// Bar color at `column` pixels from the left edge
    pub fn bar_color(&self, column: u32) -> Rgb565 {
        let last = self.bounds.size.width.saturating_sub(1).max(1);
        let middle = last / 2;
        let column = column.min(last);

        if column <= middle {
            let t = column as f32 / middle.max(1) as f32;
            lerp_color(ScoreBand::Risk.color(), ScoreBand::Moderate.color(), t)
        } else {
            let t = (column - middle) as f32 / (last - middle) as f32;
            lerp_color(ScoreBand::Moderate.color(), ScoreBand::Safe.color(), t)
        }
    }

    /// Draw one row of three texts pinned left, center and right
    fn draw_row<D: DrawTarget<Color = Rgb565>>(
        &self,
        texts: [(&str, Rgb565); 3],
        y: i32,
        display: &mut D,
    ) -> Result<(), D::Error> {
        let left = self.bounds.top_left.x;
        let anchors = [
            (left, Alignment::Left),
            (left + self.bounds.size.width as i32 / 2, Alignment::Center),
            (left + self.bounds.size.width as i32 - 1, Alignment::Right),
        ];

        for ((text, color), (x, alignment)) in texts.into_iter().zip(anchors) {
            let style = TextStyleBuilder::new()
                .alignment(alignment)
                .baseline(Baseline::Top)
                .build();
            Text::with_text_style(
                text,
                Point::new(x, y),
                MonoTextStyle::new(TextSize::Caption.font(), color),
                style,
            )
            .draw(display)?;
        }

        Ok(())
    }
}

impl Drawable for ScoreLegend {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        let mut display = display.clipped(&self.bounds);
        let top = self.bounds.top_left.y;

        self.draw_row(BANDS.map(|band| (band.label(), band.color())), top, &mut display)?;

        let bar_top = self.bar_top();
        let bar_bottom = bar_top + LEGEND_BAR_HEIGHT_PX as i32 - 1;
        for column in 0..self.bounds.size.width {
            let x = self.bounds.top_left.x + column as i32;
            Line::new(Point::new(x, bar_top), Point::new(x, bar_bottom))
                .into_styled(PrimitiveStyle::with_stroke(self.bar_color(column), 1))
                .draw(&mut display)?;
        }

        let ticks_top = bar_bottom + 1 + LEGEND_ROW_GAP_PX as i32;
        self.draw_row(TICKS.map(|tick| (tick, COLOR_TEXT_MUTED)), ticks_top, &mut display)
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
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
    use super::*;
    use crate::framebuffer::FrameBuffer;
    use crate::ui::styling::{COLOR_MODERATE, COLOR_RISK, COLOR_SAFE};

    fn legend() -> ScoreLegend {
        ScoreLegend::new(Rectangle::new(
            Point::new(4, 4),
            Size::new(229, LEGEND_HEIGHT_PX),
        ))
    }

    #[test]
    fn test_bar_runs_red_amber_green() {
        let legend = legend();
        assert_eq!(legend.bar_color(0), COLOR_RISK);
        assert_eq!(legend.bar_color(114), COLOR_MODERATE);
        assert_eq!(legend.bar_color(228), COLOR_SAFE);
        assert_ne!(legend.bar_color(57), COLOR_RISK);
        assert_ne!(legend.bar_color(57), COLOR_MODERATE);
    }

    #[test]
    fn test_draws_labels_bar_and_ticks() {
        let legend = legend();
        let mut fb = FrameBuffer::new(240, 40);
        legend.draw(&mut fb).unwrap();

        let y = legend.bar_top() as u32;
        assert_eq!(fb.pixel(4, y), Some(COLOR_RISK));
        assert_eq!(fb.pixel(4 + 114, y), Some(COLOR_MODERATE));
        assert_eq!(fb.pixel(4 + 228, y), Some(COLOR_SAFE));

        let label_row = Rectangle::new(Point::new(4, 4), Size::new(229, 10));
        let third = Rectangle::new(Point::new(4, 4), Size::new(76, 10));
        assert!(fb.count_color(&third, COLOR_RISK) > 0);
        assert_eq!(fb.count_color(&third, COLOR_SAFE), 0);
        assert!(fb.count_color(&label_row, COLOR_MODERATE) > 0);
        assert!(fb.count_color(&label_row, COLOR_SAFE) > 0);

        let tick_row = Rectangle::new(
            Point::new(4, legend.bar_top() + (LEGEND_BAR_HEIGHT_PX + LEGEND_ROW_GAP_PX) as i32),
            Size::new(229, 10),
        );
        assert!(fb.count_color(&tick_row, COLOR_TEXT_MUTED) > 0);
    }

    #[test]
    fn test_drawing_stays_inside_bounds() {
        let legend = legend();
        let mut fb = FrameBuffer::new(240, 40);
        legend.draw(&mut fb).unwrap();
        assert_eq!(
            legend.bounds().intersection(&fb.dirty_area().unwrap()),
            fb.dirty_area().unwrap()
        );
    }
}
