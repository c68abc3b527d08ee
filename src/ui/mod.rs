//! SwapSafe UI system
//!
//! This module provides the widgets the dashboard is composed from:
//! - Core [`Drawable`] trait with dirty tracking
//! - The animated safety score gauge
//! - The safety score history chart
//! - The score band legend under the gauge
//! - Info cards for the static dashboard panels
//! - Color and font styling

pub mod components;
pub mod core;
pub mod styling;

pub use components::{Card, GaugeSize, HistoryChart, ScoreGauge, ScoreLegend};
pub use core::Drawable;
pub use styling::TextSize;
pub use styling::fonts::{FONT_6X10_CHAR_HEIGHT_PX, FONT_6X10_CHAR_WIDTH_PX};

/// Dashboard display width in pixels
pub const DISPLAY_WIDTH_PX: u32 = 1024;

/// Dashboard display height in pixels
pub const DISPLAY_HEIGHT_PX: u32 = 600;
