//! Font selection for dashboard text
//!
//! Body text uses the `embedded-graphics` Latin-1 fonts so the degree sign
//! renders. The large gauge readout uses ProFont, which goes beyond the
//! 10x20 built-in maximum.

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::mono_font::iso_8859_1::{FONT_6X10, FONT_7X13, FONT_9X15_BOLD, FONT_10X20};
use profont::PROFONT_24_POINT;

/// Character width of the 6x10 caption font in pixels
pub const FONT_6X10_CHAR_WIDTH_PX: u32 = 6;

/// Character height of the 6x10 caption font in pixels
pub const FONT_6X10_CHAR_HEIGHT_PX: u32 = 10;

/// Text size presets
///
/// - `Caption`: 6x10, chart labels and card body text
/// - `Body`: 7x13, card titles and gauge category labels
/// - `Title`: 9x15 bold, page header and small gauge readout
/// - `Large`: 10x20, medium gauge readout
/// - `Display`: ProFont 24pt, large gauge readout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    Caption,
    Body,
    Title,
    Large,
    Display,
}

impl TextSize {
    pub fn font(&self) -> &'static MonoFont<'static> {
        match self {
            TextSize::Caption => &FONT_6X10,
            TextSize::Body => &FONT_7X13,
            TextSize::Title => &FONT_9X15_BOLD,
            TextSize::Large => &FONT_10X20,
            TextSize::Display => &PROFONT_24_POINT,
        }
    }

    /// Rendered width of `text` in pixels
    pub fn text_width(&self, text: &str) -> u32 {
        let font = self.font();
        let chars = text.chars().count() as u32;
        chars * font.character_size.width + chars.saturating_sub(1) * font.character_spacing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caption_metrics_match_constants() {
        let font = TextSize::Caption.font();
        assert_eq!(font.character_size.width, FONT_6X10_CHAR_WIDTH_PX);
        assert_eq!(font.character_size.height, FONT_6X10_CHAR_HEIGHT_PX);
    }

    #[test]
    fn test_text_width() {
        assert_eq!(TextSize::Caption.text_width(""), 0);
        assert_eq!(TextSize::Caption.text_width("Jan 15"), 36);
    }
}
