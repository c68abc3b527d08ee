//! Metrics and band assessment for dashboard readings
//!
//! This module maps raw readings (safety score, battery temperature,
//! charging frequency) onto display bands. Each band knows its color and
//! label so widgets never duplicate threshold logic.

use embedded_graphics::pixelcolor::Rgb565;

use crate::ui::styling::{COLOR_MODERATE, COLOR_RISK, COLOR_SAFE};

// ============================================================================
// Safety score thresholds
// ============================================================================

/// Lowest score drawn in the "safe" color
pub const SCORE_SAFE_MIN: u8 = 80;

/// Lowest score drawn in the "moderate" color
pub const SCORE_MODERATE_MIN: u8 = 60;

const _: () = assert!(SCORE_MODERATE_MIN < SCORE_SAFE_MIN);

// ============================================================================
// Battery health thresholds
// ============================================================================

/// Average temperatures at or below this are optimal (°C)
pub const TEMPERATURE_OPTIMAL_MAX: f32 = 25.0;

/// Average temperatures at or below this are elevated but tolerable (°C)
pub const TEMPERATURE_ELEVATED_MAX: f32 = 35.0;

/// Above this a high-temperature tip is shown (°C)
pub const TEMPERATURE_TIP_THRESHOLD: f32 = 30.0;

/// Charges per week at or below this are optimal
pub const CHARGING_LOW_MAX: f32 = 2.0;

/// Charges per week at or below this are moderate
pub const CHARGING_MODERATE_MAX: f32 = 5.0;

/// Above this a charging-frequency tip is shown
pub const CHARGING_TIP_THRESHOLD: f32 = 4.0;

/// Days since maintenance after which a service tip is shown
pub const MAINTENANCE_OVERDUE_DAYS: u32 = 90;

/// Three-level band shared by every dashboard reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    /// Optimal, drawn green
    Safe,
    /// Acceptable but worth watching, drawn amber
    Moderate,
    /// Problematic, drawn red
    Risk,
}

impl ScoreBand {
    /// Assess a safety score: `>=80` safe, `>=60` moderate, otherwise risk
    pub const fn for_score(score: u8) -> Self {
        if score >= SCORE_SAFE_MIN {
            Self::Safe
        } else if score >= SCORE_MODERATE_MIN {
            Self::Moderate
        } else {
            Self::Risk
        }
    }

    /// Assess an average battery temperature in °C
    pub fn for_temperature(celsius: f32) -> Self {
        if celsius <= TEMPERATURE_OPTIMAL_MAX {
            Self::Safe
        } else if celsius <= TEMPERATURE_ELEVATED_MAX {
            Self::Moderate
        } else {
            Self::Risk
        }
    }

    /// Assess a charging frequency in charges per week
    pub fn for_charging_frequency(per_week: f32) -> Self {
        if per_week <= CHARGING_LOW_MAX {
            Self::Safe
        } else if per_week <= CHARGING_MODERATE_MAX {
            Self::Moderate
        } else {
            Self::Risk
        }
    }

    /// Get the display color for this band
    pub const fn color(self) -> Rgb565 {
        match self {
            Self::Safe => COLOR_SAFE,
            Self::Moderate => COLOR_MODERATE,
            Self::Risk => COLOR_RISK,
        }
    }

    /// Get the label used on the gauge legend
    pub const fn label(self) -> &'static str {
        match self {
            Self::Safe => "Safe",
            Self::Moderate => "Moderate",
            Self::Risk => "Risk",
        }
    }
}

/// Human-readable charging frequency assessment
pub fn charging_frequency_label(per_week: f32) -> &'static str {
    match ScoreBand::for_charging_frequency(per_week) {
        ScoreBand::Safe => "Low (Optimal)",
        ScoreBand::Moderate => "Moderate",
        ScoreBand::Risk => "High (Consider reducing)",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_band_boundaries() {
        assert_eq!(ScoreBand::for_score(100), ScoreBand::Safe);
        assert_eq!(ScoreBand::for_score(80), ScoreBand::Safe);
        assert_eq!(ScoreBand::for_score(79), ScoreBand::Moderate);
        assert_eq!(ScoreBand::for_score(60), ScoreBand::Moderate);
        assert_eq!(ScoreBand::for_score(59), ScoreBand::Risk);
        assert_eq!(ScoreBand::for_score(0), ScoreBand::Risk);
    }

    #[test]
    fn test_band_colors_are_distinct() {
        assert_ne!(ScoreBand::Safe.color(), ScoreBand::Moderate.color());
        assert_ne!(ScoreBand::Moderate.color(), ScoreBand::Risk.color());
        assert_ne!(ScoreBand::Safe.color(), ScoreBand::Risk.color());
    }

    #[test]
    fn test_temperature_bands() {
        assert_eq!(ScoreBand::for_temperature(25.0), ScoreBand::Safe);
        assert_eq!(ScoreBand::for_temperature(28.3), ScoreBand::Moderate);
        assert_eq!(ScoreBand::for_temperature(35.1), ScoreBand::Risk);
    }

    #[test]
    fn test_charging_frequency_labels() {
        assert_eq!(charging_frequency_label(1.0), "Low (Optimal)");
        assert_eq!(charging_frequency_label(3.5), "Moderate");
        assert_eq!(charging_frequency_label(6.0), "High (Consider reducing)");
    }
}
