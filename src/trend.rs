//! Safety score trend between the oldest and newest history sample
//!
//! The trend is a pure function of the history slice: it never looks at
//! intermediate samples and never fails. A zero baseline makes the percent
//! change undefined, which degrades to 0% instead of surfacing an error.

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use log::debug;
use thiserror_no_std::Error;

use crate::model::HistorySample;
use crate::ui::styling::{COLOR_RISK, COLOR_SAFE, COLOR_TEXT_MUTED};

/// Label shown when the score did not move
pub const NO_CHANGE_LABEL: &str = "No change";

/// Maximum length of a formatted trend label
pub const MAX_TREND_LABEL_LENGTH: usize = 40;

/// Error conditions of the trend arithmetic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TrendError {
    /// Percent change against a zero baseline
    #[error("Percent change is undefined for a zero baseline")]
    DivisionUndefined,
}

/// Result type for trend arithmetic
pub type TrendResult<T> = Result<T, TrendError>;

/// Sign of the change between first and last sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    Positive,
    Negative,
    Neutral,
}

impl TrendDirection {
    /// Color used for the trend subtitle
    pub const fn color(self) -> Rgb565 {
        match self {
            Self::Positive => COLOR_SAFE,
            Self::Negative => COLOR_RISK,
            Self::Neutral => COLOR_TEXT_MUTED,
        }
    }
}

/// Net change across a history window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trend {
    /// `last.score - first.score`
    pub delta: i32,
    /// Change relative to the first score, in percent
    pub percent: f64,
    pub direction: TrendDirection,
}

impl Trend {
    /// Trend for windows that cannot show any movement
    pub const fn unchanged() -> Self {
        Self {
            delta: 0,
            percent: 0.0,
            direction: TrendDirection::Neutral,
        }
    }

    /// Compute the trend of an ordered history
    ///
    /// Fewer than two samples yields [`Trend::unchanged`].
    pub fn from_history(history: &[HistorySample]) -> Self {
        let [first, .., last] = history else {
            return Self::unchanged();
        };

        let delta = i32::from(last.score) - i32::from(first.score);
        let percent = percent_change(first.score, last.score).unwrap_or_else(|err| {
            debug!("Trend percent fallback to 0%: {}", err);
            0.0
        });

        let direction = match delta {
            d if d > 0 => TrendDirection::Positive,
            d if d < 0 => TrendDirection::Negative,
            _ => TrendDirection::Neutral,
        };

        Self {
            delta,
            percent,
            direction,
        }
    }

    /// Display label, e.g. `+9 points (11.5%)` or `No change`
    ///
    /// The percent is rounded to one decimal with ties away from zero, so
    /// `1.25` prints as `1.3` and `-1.25` as `-1.3`.
    pub fn label(&self) -> heapless::String<MAX_TREND_LABEL_LENGTH> {
        let mut label = heapless::String::new();
        let tenths = round_to_tenths(self.percent);
        let sign = if tenths < 0 { "-" } else { "" };
        let magnitude = tenths.unsigned_abs();

        let _ = match self.direction {
            TrendDirection::Positive => write!(
                label,
                "+{} points ({}{}.{}%)",
                self.delta,
                sign,
                magnitude / 10,
                magnitude % 10
            ),
            TrendDirection::Negative => write!(
                label,
                "{} points ({}{}.{}%)",
                self.delta,
                sign,
                magnitude / 10,
                magnitude % 10
            ),
            TrendDirection::Neutral => write!(label, "{}", NO_CHANGE_LABEL),
        };
        label
    }

    pub const fn color(&self) -> Rgb565 {
        self.direction.color()
    }
}

/// Percent change from `first` to `last`
///
/// Fails with [`TrendError::DivisionUndefined`] when `first` is zero.
pub fn percent_change(first: u8, last: u8) -> TrendResult<f64> {
    if first == 0 {
        return Err(TrendError::DivisionUndefined);
    }
    let delta = f64::from(last) - f64::from(first);
    Ok(delta / f64::from(first) * 100.0)
}

/// `value` in tenths, rounded half away from zero
fn round_to_tenths(value: f64) -> i64 {
    let scaled = value * 10.0;
    if scaled < 0.0 {
        -((-scaled + 0.5) as i64)
    } else {
        (scaled + 0.5) as i64
    }
}
