//! Safety score history chart
//!
//! Renders an ordered score history into a caller-sized area:
//!
//! - Reference lines at 20/40/60/80% of the score scale
//! - A smoothed line built from chained quadratic segments
//! - A vertical gradient fill under the line
//! - Markers with date and score labels on endpoints and local maxima
//!
//! # Examples
//!
//! ```ignore
//! use swapsafe::ui::components::graph::HistoryChart;
//!
//! let bounds = Rectangle::new(Point::new(24, 260), Size::new(500, 200));
//! let chart = HistoryChart::new(bounds, state.safety_score.clone());
//! chart.draw(&mut framebuffer)?;
//! ```

mod component;
pub mod constants;
mod grid;
pub mod interpolation;
pub mod markers;
pub mod viewport;

pub use component::HistoryChart;
pub use interpolation::{QuadSegment, flatten, quadratic_segments};
pub use markers::{Marker, MarkerRole, select_markers};
pub use viewport::{ChartViewport, PlotPoint};
