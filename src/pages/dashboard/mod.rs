//! Main dashboard page
//!
//! Composes the safety score gauge and history chart with the static info
//! cards. The page only selects and arranges content; every number it shows
//! comes from [`AppState`] or the components themselves.
//!
//! Layout (1024x600):
//! - Header bar with the page title and user name
//! - Left column: gauge card with the score band legend, closest station card
//! - Middle column: chart card above the battery and rewards cards
//! - Right column: nearby stations card

pub mod cards;

use alloc::rc::Rc;
use alloc::string::String;

use embassy_time::Instant;
use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use log::{debug, info};

use crate::animation::FrameScheduler;
use crate::app_state::AppState;
use crate::config::DashboardConfig;
use crate::model::SafetyScore;
use crate::pages::constants::{
    ACHIEVEMENTS_SHOWN, BATTERY_CARD_WIDTH_PX, CARD_GAP_PX, CHART_CARD_HEIGHT_PX, CHART_HEIGHT_PX,
    CHART_WIDTH_PX, GAUGE_CARD_HEIGHT_PX, GAUGE_LEGEND_GAP_PX, LEFT_COLUMN_WIDTH_PX,
    NEARBY_STATIONS_SHOWN, PAGE_HEADER_HEIGHT_PX, PAGE_MARGIN_PX, REWARDS_SHOWN,
    RIGHT_COLUMN_WIDTH_PX,
};
use crate::pages::page::Page;
use crate::trend::Trend;
use crate::ui::components::Card;
use crate::ui::components::legend::LEGEND_HEIGHT_PX;
use crate::ui::styling::{
    COLOR_BACKGROUND, COLOR_BORDER, COLOR_SURFACE, COLOR_TEXT_MUTED, COLOR_TEXT_PRIMARY, TextSize,
};
use crate::ui::{Drawable, GaugeSize, HistoryChart, ScoreGauge, ScoreLegend};

/// Card rectangles of the dashboard grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashboardLayout {
    pub header: Rectangle,
    pub gauge_card: Rectangle,
    pub chart_card: Rectangle,
    pub station_card: Rectangle,
    pub battery_card: Rectangle,
    pub rewards_card: Rectangle,
    pub nearby_card: Rectangle,
}

impl DashboardLayout {
    pub fn new(bounds: Rectangle) -> Self {
        let origin = bounds.top_left;
        let margin = PAGE_MARGIN_PX as i32;
        let gap = CARD_GAP_PX as i32;

        let top_y = origin.y + (PAGE_HEADER_HEIGHT_PX + PAGE_MARGIN_PX) as i32;
        let bottom_y = origin.y + bounds.size.height as i32 - margin;
        let column_height = (bottom_y - top_y).max(0) as u32;

        let left_x = origin.x + margin;
        let middle_x = left_x + LEFT_COLUMN_WIDTH_PX as i32 + gap;
        let middle_width = bounds.size.width.saturating_sub(
            2 * PAGE_MARGIN_PX + LEFT_COLUMN_WIDTH_PX + RIGHT_COLUMN_WIDTH_PX + 2 * CARD_GAP_PX,
        );
        let right_x = middle_x + middle_width as i32 + gap;

        let station_y = top_y + GAUGE_CARD_HEIGHT_PX as i32 + gap;
        let info_y = top_y + CHART_CARD_HEIGHT_PX as i32 + gap;
        let rewards_x = middle_x + BATTERY_CARD_WIDTH_PX as i32 + gap;
        let rewards_width = middle_width.saturating_sub(BATTERY_CARD_WIDTH_PX + CARD_GAP_PX);

        let below = |y: i32| (bottom_y - y).max(0) as u32;

        Self {
            header: Rectangle::new(origin, Size::new(bounds.size.width, PAGE_HEADER_HEIGHT_PX)),
            gauge_card: Rectangle::new(
                Point::new(left_x, top_y),
                Size::new(LEFT_COLUMN_WIDTH_PX, GAUGE_CARD_HEIGHT_PX),
            ),
            station_card: Rectangle::new(
                Point::new(left_x, station_y),
                Size::new(LEFT_COLUMN_WIDTH_PX, below(station_y)),
            ),
            chart_card: Rectangle::new(
                Point::new(middle_x, top_y),
                Size::new(middle_width, CHART_CARD_HEIGHT_PX),
            ),
            battery_card: Rectangle::new(
                Point::new(middle_x, info_y),
                Size::new(BATTERY_CARD_WIDTH_PX, below(info_y)),
            ),
            rewards_card: Rectangle::new(
                Point::new(rewards_x, info_y),
                Size::new(rewards_width, below(info_y)),
            ),
            nearby_card: Rectangle::new(
                Point::new(right_x, top_y),
                Size::new(RIGHT_COLUMN_WIDTH_PX, column_height),
            ),
        }
    }

    pub fn cards(&self) -> [Rectangle; 6] {
        [
            self.gauge_card,
            self.chart_card,
            self.station_card,
            self.battery_card,
            self.rewards_card,
            self.nearby_card,
        ]
    }
}

/// Chart canvas at the top left of the chart card body
fn chart_area(card: &Card) -> Rectangle {
    Rectangle::new(
        card.body_area().top_left,
        Size::new(CHART_WIDTH_PX, CHART_HEIGHT_PX),
    )
}

/// Gauge card body above the legend
fn gauge_area(card: &Card) -> Rectangle {
    let body = card.body_area();
    Rectangle::new(
        body.top_left,
        Size::new(
            body.size.width,
            body.size
                .height
                .saturating_sub(LEGEND_HEIGHT_PX + GAUGE_LEGEND_GAP_PX),
        ),
    )
}

/// Legend strip along the bottom of the gauge card body
fn legend_area(card: &Card) -> Rectangle {
    let body = card.body_area();
    let height = LEGEND_HEIGHT_PX.min(body.size.height);
    Rectangle::new(
        body.top_left + Point::new(0, (body.size.height - height) as i32),
        Size::new(body.size.width, height),
    )
}

pub struct DashboardPage {
    bounds: Rectangle,
    layout: DashboardLayout,
    config: DashboardConfig,
    scheduler: FrameScheduler,
    /// Time of the last frame, used to start animations
    now: Instant,
    score: Rc<SafetyScore>,
    user_name: String,
    gauge_card: Card,
    gauge: ScoreGauge,
    legend: ScoreLegend,
    chart_card: Card,
    chart: HistoryChart,
    station_card: Card,
    battery_card: Card,
    rewards_card: Card,
    nearby_card: Card,
    dirty: bool,
}

impl DashboardPage {
    pub fn new(
        bounds: Rectangle,
        state: &AppState,
        config: DashboardConfig,
        scheduler: FrameScheduler,
        now: Instant,
    ) -> Self {
        let layout = DashboardLayout::new(bounds);
        let score = state.safety_score.clone();
        let trend = Trend::from_history(&score.history);

        let gauge_card = cards::gauge_card(layout.gauge_card, &score);
        let gauge = ScoreGauge::new(gauge_area(&gauge_card).center(), &config.gauge);
        let legend = ScoreLegend::new(legend_area(&gauge_card));

        let chart_card = cards::chart_card(layout.chart_card, &trend);
        let chart = HistoryChart::new(chart_area(&chart_card), score.clone())
            .with_style_class(config.chart.style_class.clone());

        let mut page = Self {
            bounds,
            layout,
            config,
            scheduler,
            now,
            score,
            user_name: String::new(),
            gauge_card,
            gauge,
            legend,
            chart_card,
            chart,
            station_card: Card::new(layout.station_card, ""),
            battery_card: Card::new(layout.battery_card, ""),
            rewards_card: Card::new(layout.rewards_card, ""),
            nearby_card: Card::new(layout.nearby_card, ""),
            dirty: true,
        };
        page.refresh_info_cards(state);
        page
    }

    fn refresh_info_cards(&mut self, state: &AppState) {
        self.user_name = state.user.name.clone();
        self.station_card =
            cards::station_card(self.layout.station_card, state.closest_available_station());
        self.battery_card =
            cards::battery_card(self.layout.battery_card, &state.battery, &state.battery_tips());
        self.rewards_card = cards::rewards_card(
            self.layout.rewards_card,
            state.points,
            &state.rewards,
            &state.achievements,
            REWARDS_SHOWN,
            ACHIEVEMENTS_SHOWN,
        );
        self.nearby_card = cards::nearby_card(
            self.layout.nearby_card,
            state.nearby_stations(NEARBY_STATIONS_SHOWN),
        );
    }

    /// Pick up a changed application state
    ///
    /// A new safety score record restarts the gauge and redraws the chart;
    /// the info cards are always rebuilt.
    pub fn set_state(&mut self, state: &AppState) {
        if self.chart.set_score(state.safety_score.clone()) {
            self.score = state.safety_score.clone();
            let trend = Trend::from_history(&self.score.history);
            self.chart_card = cards::chart_card(self.layout.chart_card, &trend);
            self.gauge_card = cards::gauge_card(self.layout.gauge_card, &self.score);
            self.gauge
                .set_score(self.score.score, self.score.category, &self.scheduler, self.now);
        }
        self.refresh_info_cards(state);
        self.dirty = true;
    }

    /// Restart the gauge reveal from 0
    pub fn replay_animation(&mut self) {
        debug!("Replaying gauge animation");
        self.gauge.replay(&self.scheduler, self.now);
    }

    /// Flip gauge animation on or off, returning the new setting
    pub fn toggle_animation(&mut self) -> bool {
        let animated = !self.gauge.is_animated();
        self.gauge.set_animated(animated);
        self.config.gauge.animated = animated;
        info!("Gauge animation {}", if animated { "on" } else { "off" });
        animated
    }

    /// Switch the gauge to the next size, returning it
    pub fn cycle_gauge_size(&mut self) -> GaugeSize {
        let size = self.gauge.size().next();
        self.gauge.set_size(size);
        self.config.gauge.size = size;
        // A smaller ring does not cover the previous one
        self.gauge_card.mark_dirty();
        info!("Gauge size {}", size.token());
        size
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn layout(&self) -> &DashboardLayout {
        &self.layout
    }

    pub fn gauge(&self) -> &ScoreGauge {
        &self.gauge
    }

    pub fn chart(&self) -> &HistoryChart {
        &self.chart
    }

    pub fn station_card(&self) -> &Card {
        &self.station_card
    }

    pub fn battery_card(&self) -> &Card {
        &self.battery_card
    }

    pub fn rewards_card(&self) -> &Card {
        &self.rewards_card
    }

    pub fn nearby_card(&self) -> &Card {
        &self.nearby_card
    }

    pub fn legend(&self) -> &ScoreLegend {
        &self.legend
    }

    fn draw_header<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        let header = self.layout.header;
        header
            .into_styled(PrimitiveStyle::with_fill(COLOR_SURFACE))
            .draw(display)?;

        let bottom = header.top_left.y + header.size.height as i32 - 1;
        Line::new(
            Point::new(header.top_left.x, bottom),
            Point::new(header.top_left.x + header.size.width as i32 - 1, bottom),
        )
        .into_styled(PrimitiveStyle::with_stroke(COLOR_BORDER, 1))
        .draw(display)?;

        let middle_y = header.top_left.y + header.size.height as i32 / 2;
        let margin = PAGE_MARGIN_PX as i32 * 2;

        let title_style = MonoTextStyle::new(TextSize::Title.font(), COLOR_TEXT_PRIMARY);
        let left = TextStyleBuilder::new()
            .alignment(Alignment::Left)
            .baseline(Baseline::Middle)
            .build();
        Text::with_text_style(
            self.title(),
            Point::new(header.top_left.x + margin, middle_y),
            title_style,
            left,
        )
        .draw(display)?;

        let user_style = MonoTextStyle::new(TextSize::Caption.font(), COLOR_TEXT_MUTED);
        let right = TextStyleBuilder::new()
            .alignment(Alignment::Right)
            .baseline(Baseline::Middle)
            .build();
        Text::with_text_style(
            &self.user_name,
            Point::new(
                header.top_left.x + header.size.width as i32 - margin,
                middle_y,
            ),
            user_style,
            right,
        )
        .draw(display)?;

        Ok(())
    }
}

impl Page for DashboardPage {
    fn title(&self) -> &str {
        "Dashboard"
    }

    fn on_activate(&mut self) {
        info!(
            "Dashboard active: score {} ({}), {} history samples",
            self.score.score,
            self.score.category.label(),
            self.score.history.len()
        );
        self.gauge
            .set_score(self.score.score, self.score.category, &self.scheduler, self.now);
        self.dirty = true;
    }

    fn on_deactivate(&mut self) {
        self.gauge.dispose();
    }

    fn update(&mut self, now: Instant) {
        self.now = now;
    }

    fn draw_page<D: DrawTarget<Color = Rgb565>>(
        &mut self,
        display: &mut D,
    ) -> Result<(), D::Error> {
        if self.dirty {
            self.bounds
                .into_styled(PrimitiveStyle::with_fill(COLOR_BACKGROUND))
                .draw(display)?;
            self.draw_header(display)?;

            for card in [
                &mut self.gauge_card,
                &mut self.chart_card,
                &mut self.station_card,
                &mut self.battery_card,
                &mut self.rewards_card,
                &mut self.nearby_card,
            ] {
                card.mark_dirty();
            }
            self.dirty = false;
        }

        for card in [
            &mut self.station_card,
            &mut self.battery_card,
            &mut self.rewards_card,
            &mut self.nearby_card,
        ] {
            if card.is_dirty() {
                card.draw(display)?;
                card.mark_clean();
            }
        }

        if self.gauge_card.is_dirty() {
            self.gauge_card.draw(display)?;
            self.gauge_card.mark_clean();
            self.legend.mark_dirty();
            self.gauge.mark_dirty();
        }
        if self.legend.is_dirty() {
            self.legend.draw(display)?;
            self.legend.mark_clean();
        }
        if self.gauge.is_dirty() {
            let area = gauge_area(&self.gauge_card);
            self.gauge.draw(&mut display.clipped(&area))?;
            self.gauge.mark_clean();
        }

        if self.chart_card.is_dirty() {
            self.chart_card.draw(display)?;
            self.chart_card.mark_clean();
            self.chart.mark_dirty();
        }
        if self.chart.is_dirty() {
            self.chart.draw(display)?;
            self.chart.mark_clean();
        }

        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty
            || self.gauge.is_dirty()
            || self.chart.is_dirty()
            || self.legend.is_dirty()
            || [
                &self.gauge_card,
                &self.chart_card,
                &self.station_card,
                &self.battery_card,
                &self.rewards_card,
                &self.nearby_card,
            ]
            .iter()
            .any(|card| card.is_dirty())
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use embassy_time::Duration;

    use super::*;
    use crate::animation::FRAME_INTERVAL;
    use alloc::vec::Vec;

    use crate::framebuffer::FrameBuffer;
    use crate::ui::styling::{COLOR_RISK, COLOR_SAFE};
    use crate::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX};

    fn screen() -> Rectangle {
        Rectangle::new(Point::zero(), Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX))
    }

    fn page(scheduler: &FrameScheduler) -> DashboardPage {
        DashboardPage::new(
            screen(),
            &AppState::demo(),
            DashboardConfig::dashboard(),
            scheduler.clone(),
            Instant::from_millis(0),
        )
    }

    fn run_frames(scheduler: &FrameScheduler, page: &mut DashboardPage, frames: u32) {
        let start = page.now;
        for frame in 1..=frames {
            let now = start + FRAME_INTERVAL * frame;
            scheduler.advance(now);
            page.update(now);
        }
    }

    #[test]
    fn test_layout_fits_screen_without_overlap() {
        let layout = DashboardLayout::new(screen());
        let cards = layout.cards();

        for (i, card) in cards.iter().enumerate() {
            assert_eq!(screen().intersection(card), *card, "card {} off screen", i);
            assert!(layout.header.intersection(card).is_zero_sized());
            for other in &cards[i + 1..] {
                assert!(card.intersection(other).is_zero_sized());
            }
        }
    }

    #[test]
    fn test_chart_canvas_fits_card_body() {
        let scheduler = FrameScheduler::new();
        let page = page(&scheduler);
        let body = cards::chart_card(page.layout().chart_card, &Trend::unchanged()).body_area();
        let chart = page.chart().bounds();

        assert_eq!(chart.size, Size::new(CHART_WIDTH_PX, CHART_HEIGHT_PX));
        assert_eq!(body.intersection(&chart), chart);
    }

    #[test]
    fn test_large_gauge_ring_fits_above_legend() {
        let scheduler = FrameScheduler::new();
        let page = page(&scheduler);
        let card = cards::gauge_card(page.layout().gauge_card, &AppState::demo().safety_score);
        let area = gauge_area(&card);
        let geometry = page.gauge().geometry();
        let outer = geometry.diameter_px() + geometry.stroke_px();

        assert_eq!(page.gauge().size(), GaugeSize::Large);
        assert!(outer <= area.size.height && outer <= area.size.width);

        let legend = page.legend().bounds();
        assert_eq!(card.body_area().intersection(&legend), legend);
        assert!(area.intersection(&legend).is_zero_sized());
    }

    #[test]
    fn test_full_draw_shows_legend_and_nearby_stations() {
        let scheduler = FrameScheduler::new();
        let mut page = page(&scheduler);
        let mut fb = FrameBuffer::default();
        page.draw_page(&mut fb).unwrap();

        let legend = page.legend().bounds();
        assert!(fb.count_color(&legend, COLOR_RISK) > 0);
        assert!(fb.count_color(&legend, COLOR_SAFE) > 0);

        let lines: Vec<&str> = page.nearby_card().text_lines().collect();
        assert_eq!(lines[0], "Urban Swap Center");
        assert!(lines.contains(&"EcoSwap Station"));
        assert!(!lines.contains(&"BatteryPlus Exchange"));
    }

    #[test]
    fn test_activation_animates_gauge_to_score() {
        let scheduler = FrameScheduler::new();
        let mut page = page(&scheduler);
        page.on_activate();
        assert!(page.gauge().is_animating());
        assert_eq!(page.gauge().display_score(), 0);

        run_frames(&scheduler, &mut page, 60);
        assert_eq!(page.gauge().display_score(), 87);
        assert_eq!(scheduler.active_timers(), 0);
    }

    #[test]
    fn test_deactivation_stops_animation() {
        let scheduler = FrameScheduler::new();
        let mut page = page(&scheduler);
        page.on_activate();
        run_frames(&scheduler, &mut page, 5);

        page.on_deactivate();
        let shown = page.gauge().display_score();
        run_frames(&scheduler, &mut page, 30);

        assert_eq!(page.gauge().display_score(), shown);
        assert_eq!(scheduler.active_timers(), 0);
    }

    #[test]
    fn test_dropping_page_releases_timer() {
        let scheduler = FrameScheduler::new();
        let mut page = page(&scheduler);
        page.on_activate();
        assert_eq!(scheduler.active_timers(), 1);

        drop(page);
        assert_eq!(scheduler.active_timers(), 0);
        assert_eq!(scheduler.advance(Instant::from_millis(0) + Duration::from_secs(1)), 0);
    }

    #[test]
    fn test_toggle_animation_snaps_to_target() {
        let scheduler = FrameScheduler::new();
        let mut page = page(&scheduler);
        page.on_activate();

        assert!(!page.toggle_animation());
        assert_eq!(page.gauge().display_score(), 87);
        assert!(!page.config().gauge.animated);

        page.replay_animation();
        assert_eq!(page.gauge().display_score(), 87);
        assert!(page.toggle_animation());
    }

    #[test]
    fn test_cycle_size_redraws_gauge_card() {
        let scheduler = FrameScheduler::new();
        let mut page = page(&scheduler);
        let mut fb = FrameBuffer::default();
        page.draw_page(&mut fb).unwrap();
        assert!(!page.is_dirty());

        assert_eq!(page.cycle_gauge_size(), GaugeSize::Small);
        assert_eq!(page.config().gauge.size, GaugeSize::Small);
        assert!(page.is_dirty());
    }

    #[test]
    fn test_full_draw_then_only_gauge_frames() {
        let scheduler = FrameScheduler::new();
        let mut page = page(&scheduler);
        page.on_activate();

        let mut fb = FrameBuffer::default();
        page.draw_page(&mut fb).unwrap();
        assert_eq!(fb.dirty_area(), Some(screen()));
        assert!(!page.is_dirty());

        run_frames(&scheduler, &mut page, 1);
        assert!(page.is_dirty());

        let mut frame = FrameBuffer::default();
        page.draw_page(&mut frame).unwrap();
        let drawn = frame.dirty_area().unwrap();
        let body = page.gauge_card.body_area();
        assert_eq!(body.intersection(&drawn), drawn);
    }

    #[test]
    fn test_new_score_record_restarts_gauge() {
        let scheduler = FrameScheduler::new();
        let mut page = page(&scheduler);
        page.on_activate();
        run_frames(&scheduler, &mut page, 60);

        let mut state = AppState::demo();
        let mut record = (*state.safety_score).clone();
        record.score = 64;
        state.set_safety_score(record);
        page.set_state(&state);

        assert_eq!(page.gauge().target(), 64);
        run_frames(&scheduler, &mut page, 60);
        assert_eq!(page.gauge().display_score(), 64);
    }
}
