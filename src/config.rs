use alloc::string::String;

use serde::{Deserialize, Serialize};

use crate::ui::GaugeSize;

/// Dashboard presentation options
///
/// Every field has a default, so a partial document only overrides what it
/// names. Unknown gauge sizes fall back to medium.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    pub gauge: GaugeConfig,
    pub chart: ChartConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct GaugeConfig {
    pub size: GaugeSize,
    pub show_label: bool,
    pub animated: bool,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self {
            size: GaugeSize::Medium,
            show_label: true,
            animated: true,
        }
    }
}

impl GaugeConfig {
    /// Dashboard gauge: large, labelled, animated
    pub fn dashboard() -> Self {
        Self {
            size: GaugeSize::Large,
            ..Self::default()
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ChartConfig {
    /// Opaque styling hook passed through to the chart
    pub style_class: Option<String>,
}

impl DashboardConfig {
    /// Configuration of the main dashboard page
    pub fn dashboard() -> Self {
        Self {
            gauge: GaugeConfig::dashboard(),
            chart: ChartConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::value::{Error as ValueError, MapDeserializer};

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.gauge.size, GaugeSize::Medium);
        assert!(config.gauge.show_label);
        assert!(config.gauge.animated);
        assert_eq!(config.chart.style_class, None);

        assert_eq!(DashboardConfig::dashboard().gauge.size, GaugeSize::Large);
    }

    fn gauge_from(entries: &[(&'static str, &'static str)]) -> GaugeConfig {
        let map = MapDeserializer::<_, ValueError>::new(entries.iter().copied());
        GaugeConfig::deserialize(map).unwrap()
    }

    #[test]
    fn test_size_tokens_deserialize() {
        assert_eq!(gauge_from(&[("size", "lg")]).size, GaugeSize::Large);
        assert_eq!(gauge_from(&[("size", "small")]).size, GaugeSize::Small);
    }

    #[test]
    fn test_unknown_size_falls_back_to_medium() {
        let config = gauge_from(&[("size", "huge")]);
        assert_eq!(config.size, GaugeSize::Medium);
        assert!(config.animated);
    }
}
