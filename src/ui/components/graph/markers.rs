//! Point markers and their date/score labels
//!
//! Markers sit on the first sample, the last sample and every interior
//! local maximum. A local maximum must rise strictly above its left
//! neighbour but only match its right neighbour (`score > prev &&
//! score >= next`), so a plateau is marked at its left end only.

use alloc::vec::Vec;

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyleBuilder};
use embedded_graphics::text::{Alignment, Text};

use super::constants::{
    DATE_LABEL_BOTTOM_OFFSET_PX, LABEL_COLOR, MARKER_DIAMETER_PX, MARKER_FILL_COLOR,
    MARKER_RING_COLOR, MARKER_RING_WIDTH_PX, SCORE_LABEL_OFFSET_PX,
};
use super::viewport::ChartViewport;
use crate::model::HistorySample;
use crate::ui::styling::TextSize;

/// Why a sample carries a marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerRole {
    First,
    Last,
    Peak,
}

impl MarkerRole {
    /// Label alignment keeping edge labels inside the chart
    pub const fn alignment(self) -> Alignment {
        match self {
            Self::First => Alignment::Left,
            Self::Last => Alignment::Right,
            Self::Peak => Alignment::Center,
        }
    }

    /// Only the endpoints print their score
    pub const fn shows_score(self) -> bool {
        matches!(self, Self::First | Self::Last)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    pub index: usize,
    pub role: MarkerRole,
}

/// Select the samples that get a marker, in index order
pub fn select_markers(scores: &[u8]) -> Vec<Marker> {
    let last = scores.len().saturating_sub(1);

    scores
        .iter()
        .enumerate()
        .filter_map(|(index, &score)| {
            let role = if index == 0 {
                MarkerRole::First
            } else if index == last {
                MarkerRole::Last
            } else if score > scores[index - 1] && score >= scores[index + 1] {
                MarkerRole::Peak
            } else {
                return None;
            };
            Some(Marker { index, role })
        })
        .collect()
}

/// Draw every marker dot with its labels
pub(super) fn draw_markers<D: DrawTarget<Color = Rgb565>>(
    history: &[HistorySample],
    viewport: &ChartViewport,
    display: &mut D,
) -> Result<(), D::Error> {
    let scores: Vec<u8> = history.iter().map(|sample| sample.score).collect();
    let dot_style = PrimitiveStyleBuilder::new()
        .fill_color(MARKER_FILL_COLOR)
        .stroke_color(MARKER_RING_COLOR)
        .stroke_width(MARKER_RING_WIDTH_PX)
        .build();
    let label_style = MonoTextStyle::new(TextSize::Caption.font(), LABEL_COLOR);
    let date_y = viewport.baseline() - DATE_LABEL_BOTTOM_OFFSET_PX;

    for marker in select_markers(&scores) {
        let sample = &history[marker.index];
        let center = viewport
            .sample_to_screen(marker.index, history.len(), sample.score)
            .to_point();
        let alignment = marker.role.alignment();

        Circle::with_center(center, MARKER_DIAMETER_PX)
            .into_styled(dot_style)
            .draw(display)?;

        let date = sample.date.short_label();
        Text::with_alignment(
            date.as_str(),
            Point::new(center.x, date_y),
            label_style,
            alignment,
        )
        .draw(display)?;

        if marker.role.shows_score() {
            let mut score: heapless::String<4> = heapless::String::new();
            let _ = core::fmt::write(&mut score, format_args!("{}", sample.score));
            Text::with_alignment(
                score.as_str(),
                center - Point::new(0, SCORE_LABEL_OFFSET_PX),
                label_style,
                alignment,
            )
            .draw(display)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indices(scores: &[u8]) -> Vec<usize> {
        select_markers(scores).iter().map(|m| m.index).collect()
    }

    #[test]
    fn test_markers_on_endpoints_and_peaks() {
        assert_eq!(indices(&[78, 82, 85, 84, 87]), [0, 2, 4]);

        let markers = select_markers(&[78, 82, 85, 84, 87]);
        assert_eq!(markers[0].role, MarkerRole::First);
        assert_eq!(markers[1].role, MarkerRole::Peak);
        assert_eq!(markers[2].role, MarkerRole::Last);
    }

    #[test]
    fn test_plateau_marked_on_left_edge_only() {
        // 90 at index 1 rises and matches its right neighbour; index 2 does not rise
        assert_eq!(indices(&[80, 90, 90, 70, 75]), [0, 1, 4]);
    }

    #[test]
    fn test_monotonic_series_marks_endpoints_only() {
        assert_eq!(indices(&[10, 20, 30, 40]), [0, 3]);
        assert_eq!(indices(&[40, 30, 20, 10]), [0, 3]);
    }

    #[test]
    fn test_short_inputs() {
        assert!(select_markers(&[]).is_empty());
        assert_eq!(
            select_markers(&[50]),
            [Marker {
                index: 0,
                role: MarkerRole::First
            }]
        );
        assert_eq!(indices(&[50, 60]), [0, 1]);
    }

    #[test]
    fn test_edge_labels_stay_inside() {
        assert_eq!(MarkerRole::First.alignment(), Alignment::Left);
        assert_eq!(MarkerRole::Last.alignment(), Alignment::Right);
        assert_eq!(MarkerRole::Peak.alignment(), Alignment::Center);
        assert!(!MarkerRole::Peak.shows_score());
    }
}
