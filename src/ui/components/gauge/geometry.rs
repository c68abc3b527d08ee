//! Gauge sizes and ring geometry
//!
//! The ring is a circle of fixed circumference; the score is shown by how
//! much of it is stroked. `dash_offset` is the unstroked remainder, so a
//! score of 0 leaves the full circumference and 100 leaves nothing.

use alloc::string::String;
use core::convert::Infallible;
use core::f32::consts::PI;
use core::str::FromStr;

use embedded_graphics::prelude::*;
use log::warn;
use micromath::F32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::constants::{
    ARC_START_DEGREES, LARGE_FOOTPRINT_PX, LARGE_LABEL_Y_UNITS, LARGE_RADIUS_UNITS,
    MEDIUM_FOOTPRINT_PX, MEDIUM_LABEL_Y_UNITS, MEDIUM_RADIUS_UNITS, SMALL_FOOTPRINT_PX,
    SMALL_LABEL_Y_UNITS, SMALL_RADIUS_UNITS, STROKE_WIDTH_UNITS, VIEW_BOX_CENTER_UNITS,
    VIEW_BOX_UNITS,
};
use crate::ui::styling::TextSize;

/// Gauge size preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GaugeSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl GaugeSize {
    /// Parse a size token, falling back to [`GaugeSize::Medium`]
    ///
    /// Accepts `sm`/`small`, `md`/`medium` and `lg`/`large`.
    pub fn from_token(token: &str) -> Self {
        match token {
            "sm" | "small" => Self::Small,
            "md" | "medium" => Self::Medium,
            "lg" | "large" => Self::Large,
            other => {
                warn!("Unknown gauge size '{}', using medium", other);
                Self::Medium
            }
        }
    }

    /// Short token for this size
    pub const fn token(self) -> &'static str {
        match self {
            Self::Small => "sm",
            Self::Medium => "md",
            Self::Large => "lg",
        }
    }

    /// Next size in small → medium → large order, wrapping around
    pub const fn next(self) -> Self {
        match self {
            Self::Small => Self::Medium,
            Self::Medium => Self::Large,
            Self::Large => Self::Small,
        }
    }

    /// Side length of the square the gauge occupies
    pub const fn footprint_px(self) -> u32 {
        match self {
            Self::Small => SMALL_FOOTPRINT_PX,
            Self::Medium => MEDIUM_FOOTPRINT_PX,
            Self::Large => LARGE_FOOTPRINT_PX,
        }
    }

    pub const fn radius_units(self) -> f32 {
        match self {
            Self::Small => SMALL_RADIUS_UNITS,
            Self::Medium => MEDIUM_RADIUS_UNITS,
            Self::Large => LARGE_RADIUS_UNITS,
        }
    }

    pub const fn label_y_units(self) -> f32 {
        match self {
            Self::Small => SMALL_LABEL_Y_UNITS,
            Self::Medium => MEDIUM_LABEL_Y_UNITS,
            Self::Large => LARGE_LABEL_Y_UNITS,
        }
    }

    /// Font of the numeric readout
    pub const fn value_text_size(self) -> TextSize {
        match self {
            Self::Small => TextSize::Title,
            Self::Medium => TextSize::Large,
            Self::Large => TextSize::Display,
        }
    }

    /// Font of the category label
    pub const fn label_text_size(self) -> TextSize {
        match self {
            Self::Small | Self::Medium => TextSize::Caption,
            Self::Large => TextSize::Body,
        }
    }

    pub fn geometry(self) -> GaugeGeometry {
        GaugeGeometry::for_size(self)
    }
}

impl FromStr for GaugeSize {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_token(s))
    }
}

impl Serialize for GaugeSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.token())
    }
}

impl<'de> Deserialize<'de> for GaugeSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        Ok(Self::from_token(&token))
    }
}

/// Pixel geometry of a gauge ring
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeGeometry {
    pub footprint_px: u32,
    pub radius_px: f32,
    pub stroke_width_px: f32,
    /// Category label position below the center
    pub label_offset_px: f32,
}

impl GaugeGeometry {
    pub fn for_size(size: GaugeSize) -> Self {
        let footprint_px = size.footprint_px();
        let scale = footprint_px as f32 / VIEW_BOX_UNITS;

        Self {
            footprint_px,
            radius_px: size.radius_units() * scale,
            stroke_width_px: STROKE_WIDTH_UNITS * scale,
            label_offset_px: (size.label_y_units() - VIEW_BOX_CENTER_UNITS) * scale,
        }
    }

    pub fn circumference(&self) -> f32 {
        2.0 * PI * self.radius_px
    }

    /// Unstroked length of the ring for `score` (clamped to 0-100)
    pub fn dash_offset(&self, score: u8) -> f32 {
        let circumference = self.circumference();
        circumference - (f32::from(score.min(100)) / 100.0) * circumference
    }

    /// Clockwise sweep of the stroked arc in degrees
    pub fn sweep_degrees(&self, score: u8) -> f32 {
        let circumference = self.circumference();
        (circumference - self.dash_offset(score)) / circumference * 360.0
    }

    pub fn diameter_px(&self) -> u32 {
        round_px(2.0 * self.radius_px).max(1) as u32
    }

    pub fn stroke_px(&self) -> u32 {
        round_px(self.stroke_width_px).max(1) as u32
    }

    /// Point on the ring `degrees` clockwise from 12 o'clock
    pub fn ring_point(&self, center: Point, degrees: f32) -> Point {
        let radians = (ARC_START_DEGREES + degrees) * PI / 180.0;
        let x = center.x as f32 + self.radius_px * F32(radians).cos().0;
        let y = center.y as f32 + self.radius_px * F32(radians).sin().0;
        Point::new(round_px(x), round_px(y))
    }
}

fn round_px(value: f32) -> i32 {
    F32(value).round().0 as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZES: [GaugeSize; 3] = [GaugeSize::Small, GaugeSize::Medium, GaugeSize::Large];

    #[test]
    fn test_dash_offset_endpoints_for_every_size() {
        for size in SIZES {
            let geometry = size.geometry();
            let circumference = geometry.circumference();

            assert_eq!(geometry.dash_offset(0), circumference);
            assert_eq!(geometry.dash_offset(100), 0.0);
            assert_eq!(geometry.dash_offset(50), circumference / 2.0);
            assert!(!geometry.dash_offset(37).is_nan());
        }
    }

    #[test]
    fn test_out_of_range_score_is_clamped() {
        let geometry = GaugeSize::Medium.geometry();
        assert_eq!(geometry.dash_offset(250), 0.0);
        assert_eq!(geometry.sweep_degrees(250), 360.0);
    }

    #[test]
    fn test_sweep_degrees() {
        let geometry = GaugeSize::Large.geometry();
        assert_eq!(geometry.sweep_degrees(0), 0.0);
        assert!((geometry.sweep_degrees(25) - 90.0).abs() < 0.01);
    }

    #[test]
    fn test_radius_scales_with_footprint() {
        let large = GaugeSize::Large.geometry();
        let expected = 100.0 * 224.0 / 232.0;
        assert!((large.radius_px - expected).abs() < 0.001);

        let small = GaugeSize::Small.geometry();
        assert!(small.radius_px < GaugeSize::Medium.geometry().radius_px);
        assert!((small.stroke_width_px - 16.0 * 96.0 / 232.0).abs() < 0.001);
    }

    #[test]
    fn test_ring_point_starts_at_twelve_o_clock() {
        let geometry = GaugeSize::Medium.geometry();
        let center = Point::new(100, 100);
        let radius = round_px(geometry.radius_px);

        assert_eq!(geometry.ring_point(center, 0.0), Point::new(100, 100 - radius));
        assert_eq!(geometry.ring_point(center, 90.0), Point::new(100 + radius, 100));
    }

    #[test]
    fn test_size_tokens() {
        assert_eq!(GaugeSize::from_token("sm"), GaugeSize::Small);
        assert_eq!(GaugeSize::from_token("large"), GaugeSize::Large);
        assert_eq!(GaugeSize::from_token("md"), GaugeSize::Medium);
        assert_eq!("xl".parse::<GaugeSize>(), Ok(GaugeSize::Medium));
        assert_eq!(GaugeSize::from_token(""), GaugeSize::Medium);
    }

    #[test]
    fn test_size_cycle_visits_every_size() {
        let mut size = GaugeSize::Small;
        for expected in [GaugeSize::Medium, GaugeSize::Large, GaugeSize::Small] {
            size = size.next();
            assert_eq!(size, expected);
        }
    }
}
