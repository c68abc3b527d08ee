//! Card panel with a title header and stacked body lines

use alloc::string::String;
use alloc::vec::Vec;

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    Line, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, RoundedRectangle,
};
use embedded_graphics::text::{Baseline, Text};

use crate::ui::core::Drawable;
use crate::ui::styling::{
    COLOR_BORDER, COLOR_GRID, COLOR_SURFACE, COLOR_TEXT_PRIMARY, TextSize,
};

/// Maximum characters stored per card line
pub const CARD_LINE_CAPACITY: usize = 64;

/// Inner padding in pixels
pub const CARD_PADDING_PX: u32 = 12;

/// Corner radius in pixels
pub const CARD_CORNER_RADIUS_PX: u32 = 8;

/// Width of the accent stripe on the left edge
pub const CARD_ACCENT_WIDTH_PX: u32 = 4;

/// Vertical gap between body lines
pub const CARD_LINE_GAP_PX: u32 = 3;

/// Height of a progress bar line
pub const CARD_PROGRESS_HEIGHT_PX: u32 = 6;

/// One row of card body content
#[derive(Debug, Clone, PartialEq)]
pub enum CardLine {
    Text {
        text: heapless::String<CARD_LINE_CAPACITY>,
        size: TextSize,
        color: Rgb565,
    },
    /// Horizontal bar filled to `ratio` (0.0-1.0)
    Progress { ratio: f32, color: Rgb565 },
    /// Blank spacer row
    Gap,
}

impl CardLine {
    /// Build a text line, truncating at the capacity limit
    pub fn text(text: &str, size: TextSize, color: Rgb565) -> Self {
        Self::Text {
            text: truncated(text),
            size,
            color,
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            Self::Text { size, .. } => size.font().character_size.height,
            Self::Progress { .. } => CARD_PROGRESS_HEIGHT_PX,
            Self::Gap => CARD_LINE_GAP_PX * 2,
        }
    }
}

fn truncated<const N: usize>(text: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    for ch in text.chars() {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}

/// Prefix of `text` with at most `max_chars` characters
fn clip_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// White rounded panel with a title, optional subtitle and body lines
///
/// Text that does not fit the card width is clipped.
pub struct Card {
    bounds: Rectangle,
    title: heapless::String<CARD_LINE_CAPACITY>,
    subtitle: Option<(heapless::String<CARD_LINE_CAPACITY>, Rgb565)>,
    accent: Option<Rgb565>,
    lines: Vec<CardLine>,
    dirty: bool,
}

impl Card {
    pub fn new(bounds: Rectangle, title: &str) -> Self {
        Self {
            bounds,
            title: truncated(title),
            subtitle: None,
            accent: None,
            lines: Vec::new(),
            dirty: true,
        }
    }

    pub fn with_subtitle(mut self, subtitle: &str, color: Rgb565) -> Self {
        self.subtitle = Some((truncated(subtitle), color));
        self
    }

    /// Draw a colored stripe along the left edge
    pub fn with_accent(mut self, color: Rgb565) -> Self {
        self.accent = Some(color);
        self
    }

    pub fn push(&mut self, line: CardLine) {
        self.lines.push(line);
        self.dirty = true;
    }

    pub fn push_text(&mut self, text: &str, size: TextSize, color: Rgb565) {
        self.push(CardLine::text(text, size, color));
    }

    /// Push `text` word-wrapped to the card width
    pub fn push_wrapped(&mut self, text: &str, size: TextSize, color: Rgb565) {
        let max_chars = self.max_chars(size).max(1);
        let mut line = String::new();
        let mut line_chars = 0;

        for word in text.split_whitespace() {
            let word_chars = word.chars().count();
            if line_chars > 0 && line_chars + 1 + word_chars > max_chars {
                self.push_text(&line, size, color);
                line.clear();
                line_chars = 0;
            }
            if line_chars > 0 {
                line.push(' ');
                line_chars += 1;
            }
            line.push_str(word);
            line_chars += word_chars;
        }

        if line_chars > 0 {
            self.push_text(&line, size, color);
        }
    }

    pub fn push_progress(&mut self, ratio: f32, color: Rgb565) {
        self.push(CardLine::Progress {
            ratio: ratio.clamp(0.0, 1.0),
            color,
        });
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_ref().map(|(text, _)| text.as_str())
    }

    pub fn lines(&self) -> &[CardLine] {
        &self.lines
    }

    /// Text of every text line, in order
    pub fn text_lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().filter_map(|line| match line {
            CardLine::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Height of the title block including the separator
    pub fn header_height(&self) -> u32 {
        let mut height = CARD_PADDING_PX + TextSize::Title.font().character_size.height;
        if self.subtitle.is_some() {
            height += CARD_LINE_GAP_PX + TextSize::Caption.font().character_size.height;
        }
        height + CARD_PADDING_PX / 2
    }

    /// Area below the header available to embedded widgets
    pub fn body_area(&self) -> Rectangle {
        let header = self.header_height() + 1;
        let inset = CARD_PADDING_PX;
        Rectangle::new(
            self.bounds.top_left + Point::new(inset as i32, (header + inset / 2) as i32),
            Size::new(
                self.bounds.size.width.saturating_sub(2 * inset),
                self.bounds
                    .size
                    .height
                    .saturating_sub(header + inset + inset / 2),
            ),
        )
    }

    fn max_chars(&self, size: TextSize) -> usize {
        let font = size.font();
        let advance = font.character_size.width + font.character_spacing;
        (self.bounds.size.width.saturating_sub(2 * CARD_PADDING_PX) / advance.max(1)) as usize
    }

    fn draw_text<D: DrawTarget<Color = Rgb565>>(
        &self,
        text: &str,
        position: Point,
        size: TextSize,
        color: Rgb565,
        display: &mut D,
    ) -> Result<(), D::Error> {
        let style = MonoTextStyle::new(size.font(), color);
        let visible = clip_chars(text, self.max_chars(size));
        Text::with_baseline(visible, position, style, Baseline::Top).draw(display)?;
        Ok(())
    }

    fn draw_header<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        let left = self.bounds.top_left.x + CARD_PADDING_PX as i32;
        let mut y = self.bounds.top_left.y + CARD_PADDING_PX as i32;

        self.draw_text(&self.title, Point::new(left, y), TextSize::Title, COLOR_TEXT_PRIMARY, display)?;
        y += TextSize::Title.font().character_size.height as i32;

        if let Some((subtitle, color)) = &self.subtitle {
            y += CARD_LINE_GAP_PX as i32;
            self.draw_text(subtitle, Point::new(left, y), TextSize::Caption, *color, display)?;
        }

        let separator_y = self.bounds.top_left.y + self.header_height() as i32;
        Line::new(
            Point::new(self.bounds.top_left.x + 1, separator_y),
            Point::new(
                self.bounds.top_left.x + self.bounds.size.width as i32 - 2,
                separator_y,
            ),
        )
        .into_styled(PrimitiveStyle::with_stroke(COLOR_BORDER, 1))
        .draw(display)
    }

    fn draw_lines<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        let body = self.body_area();
        let left = body.top_left.x;
        let mut y = body.top_left.y;

        for line in &self.lines {
            match line {
                CardLine::Text { text, size, color } => {
                    self.draw_text(text, Point::new(left, y), *size, *color, display)?;
                }
                CardLine::Progress { ratio, color } => {
                    let track = Rectangle::new(
                        Point::new(left, y),
                        Size::new(body.size.width, CARD_PROGRESS_HEIGHT_PX),
                    );
                    let radius = Size::new_equal(CARD_PROGRESS_HEIGHT_PX / 2);
                    RoundedRectangle::with_equal_corners(track, radius)
                        .into_styled(PrimitiveStyle::with_fill(COLOR_GRID))
                        .draw(display)?;

                    let filled = (body.size.width as f32 * ratio) as u32;
                    if filled > 0 {
                        RoundedRectangle::with_equal_corners(
                            Rectangle::new(track.top_left, Size::new(filled, CARD_PROGRESS_HEIGHT_PX)),
                            radius,
                        )
                        .into_styled(PrimitiveStyle::with_fill(*color))
                        .draw(display)?;
                    }
                }
                CardLine::Gap => {}
            }
            y += (line.height() + CARD_LINE_GAP_PX) as i32;
        }

        Ok(())
    }
}

impl Drawable for Card {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        let mut display = display.clipped(&self.bounds);

        let panel_style = PrimitiveStyleBuilder::new()
            .fill_color(COLOR_SURFACE)
            .stroke_color(COLOR_BORDER)
            .stroke_width(1)
            .build();
        let corner_radius = Size::new_equal(CARD_CORNER_RADIUS_PX);
        RoundedRectangle::with_equal_corners(self.bounds, corner_radius)
            .into_styled(panel_style)
            .draw(&mut display)?;

        if let Some(accent) = self.accent {
            Rectangle::new(
                self.bounds.top_left,
                Size::new(CARD_ACCENT_WIDTH_PX, self.bounds.size.height),
            )
            .into_styled(PrimitiveStyle::with_fill(accent))
            .draw(&mut display)?;
        }

        self.draw_header(&mut display)?;
        self.draw_lines(&mut display)
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
