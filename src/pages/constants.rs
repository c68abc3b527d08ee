//! Shared layout constants for pages
//!
//! The dashboard is laid out on a fixed 1024x600 grid: a header bar, a left
//! column with the gauge and closest station cards, a middle column with the
//! chart above the battery and rewards cards and a right column listing the
//! nearby stations.

/// Standard page header height in pixels
pub const PAGE_HEADER_HEIGHT_PX: u32 = 32;

/// Outer margin around the card grid in pixels
pub const PAGE_MARGIN_PX: u32 = 8;

/// Gap between neighbouring cards in pixels
pub const CARD_GAP_PX: u32 = 8;

// ============================================================================
// Dashboard grid
// ============================================================================

/// Width of the left column (gauge card and station card)
pub const LEFT_COLUMN_WIDTH_PX: u32 = 252;

/// Width of the right column (nearby stations card)
pub const RIGHT_COLUMN_WIDTH_PX: u32 = 216;

/// Height of the gauge card, which also holds the score band legend
pub const GAUGE_CARD_HEIGHT_PX: u32 = 317;

/// Height of the chart card
pub const CHART_CARD_HEIGHT_PX: u32 = 275;

/// Width of the battery health card
pub const BATTERY_CARD_WIDTH_PX: u32 = 248;

/// Space between the gauge ring area and the legend
pub const GAUGE_LEGEND_GAP_PX: u32 = 8;

/// Chart canvas size, matching the logical chart surface
pub const CHART_WIDTH_PX: u32 = 500;
pub const CHART_HEIGHT_PX: u32 = 200;

/// Rewards and achievements listed on the rewards card
pub const REWARDS_SHOWN: usize = 2;
pub const ACHIEVEMENTS_SHOWN: usize = 2;

/// Stations listed on the nearby stations card
pub const NEARBY_STATIONS_SHOWN: usize = 3;
