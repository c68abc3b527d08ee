//! Dashboard widgets

pub mod card;
pub mod gauge;
pub mod graph;
pub mod legend;

pub use card::{Card, CardLine};
pub use gauge::{GaugeSize, ScoreGauge};
pub use graph::HistoryChart;
pub use legend::ScoreLegend;
