//! Coordinate transformation for the history chart
//!
//! Samples are spread evenly across the width (`x = i / (n - 1) * width`)
//! and scores map linearly onto the height with 100 at the top
//! (`y = height - score / 100 * height`). Neither axis is clamped.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use micromath::F32;

use super::constants::SCORE_SCALE_MAX;

/// Point in screen space with sub-pixel precision
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotPoint {
    pub x: f32,
    pub y: f32,
}

impl PlotPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Midpoint between `self` and `other`
    pub fn midpoint(self, other: Self) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Nearest pixel
    pub fn to_point(self) -> Point {
        Point::new(F32(self.x).round().0 as i32, F32(self.y).round().0 as i32)
    }
}

/// Maps sample indices and scores onto the chart area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartViewport {
    area: Rectangle,
}

impl ChartViewport {
    pub const fn new(area: Rectangle) -> Self {
        Self { area }
    }

    pub fn area(&self) -> Rectangle {
        self.area
    }

    pub fn left(&self) -> i32 {
        self.area.top_left.x
    }

    pub fn right(&self) -> i32 {
        self.area.top_left.x + self.area.size.width as i32
    }

    pub fn top(&self) -> i32 {
        self.area.top_left.y
    }

    /// Bottom edge (score 0)
    pub fn baseline(&self) -> i32 {
        self.area.top_left.y + self.area.size.height as i32
    }

    /// Screen position of sample `index` of `count` with `score`
    ///
    /// Needs `count >= 2`; a single sample has no horizontal scale.
    pub fn sample_to_screen(&self, index: usize, count: usize, score: u8) -> PlotPoint {
        let width = self.area.size.width as f32;
        let x = index as f32 / (count - 1) as f32 * width;
        PlotPoint::new(self.left() as f32 + x, self.score_to_y(f32::from(score)))
    }

    /// Vertical position of a value on the 0-100 scale
    pub fn score_to_y(&self, score: f32) -> f32 {
        let height = self.area.size.height as f32;
        self.top() as f32 + height - height * score / SCORE_SCALE_MAX
    }
}
