//! Circular safety score gauge
//!
//! - [`geometry`] - size presets and ring math (circumference, dash offset)
//! - [`component`] - the [`ScoreGauge`] widget and its reveal animation

mod component;
pub mod constants;
pub mod geometry;

pub use component::{GaugeDisplayState, ScoreAnimation, ScoreGauge};
pub use geometry::{GaugeGeometry, GaugeSize};
