//! Animated circular safety score gauge

use alloc::rc::{Rc, Weak};
use core::cell::RefCell;
use core::fmt::Write;

use embassy_time::Instant;
use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Arc, Circle, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use log::debug;

use super::constants::{ANIMATION_STEPS, ANIMATION_TICK, ARC_START_DEGREES, TRACK_OPACITY};
use super::geometry::{GaugeGeometry, GaugeSize};
use crate::animation::{FrameScheduler, IntervalHandle, TickControl};
use crate::config::GaugeConfig;
use crate::metrics::ScoreBand;
use crate::model::SafetyCategory;
use crate::ui::core::Drawable;
use crate::ui::styling::{COLOR_GRID, COLOR_SURFACE, COLOR_TEXT_MUTED, blend};

/// View-local gauge state shared with the animation timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GaugeDisplayState {
    /// Value currently shown
    pub display_score: u8,
    /// Value the animation is heading to
    pub target: u8,
    /// Incremented on every write of `display_score`
    pub revision: u32,
}

impl GaugeDisplayState {
    fn show(&mut self, value: u8) {
        self.display_score = value;
        self.revision = self.revision.wrapping_add(1);
    }
}

/// Incremental reveal from 0 to a target score
///
/// Each step adds `target / 60` to an accumulator and shows its floor. The
/// step that reaches or passes the target shows the target exactly and ends
/// the animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreAnimation {
    target: u8,
    increment: f32,
    accumulated: f32,
    steps: u32,
}

impl ScoreAnimation {
    pub fn new(target: u8) -> Self {
        Self {
            target,
            increment: f32::from(target) / ANIMATION_STEPS as f32,
            accumulated: 0.0,
            steps: 0,
        }
    }

    /// Advance one tick, returning the value to show
    pub fn step(&mut self) -> (u8, TickControl) {
        self.accumulated += self.increment;
        self.steps += 1;

        // Float drift must not push the reveal past its step budget
        if self.accumulated >= f32::from(self.target) || self.steps >= ANIMATION_STEPS {
            (self.target, TickControl::Stop)
        } else {
            (self.accumulated as u8, TickControl::Continue)
        }
    }
}

/// Circular gauge showing a 0-100 safety score
///
/// The ring is stroked clockwise from 12 o'clock in the band color of the
/// displayed score, over a faint track. With animation enabled every new
/// score is revealed from 0 by a [`FrameScheduler`] timer that the gauge
/// owns; disposing or dropping the gauge cancels it.
pub struct ScoreGauge {
    center: Point,
    size: GaugeSize,
    geometry: GaugeGeometry,
    show_label: bool,
    animated: bool,
    category: SafetyCategory,
    background: Rgb565,
    state: Rc<RefCell<GaugeDisplayState>>,
    animation: Option<IntervalHandle>,
    drawn_revision: u32,
    dirty: bool,
}

impl ScoreGauge {
    pub fn new(center: Point, config: &GaugeConfig) -> Self {
        Self {
            center,
            size: config.size,
            geometry: config.size.geometry(),
            show_label: config.show_label,
            animated: config.animated,
            category: SafetyCategory::Safe,
            background: COLOR_SURFACE,
            state: Rc::new(RefCell::new(GaugeDisplayState::default())),
            animation: None,
            drawn_revision: 0,
            dirty: true,
        }
    }

    /// Set the surface color the gauge is drawn over
    pub fn with_background(mut self, color: Rgb565) -> Self {
        self.background = color;
        self
    }

    /// Show a new score, restarting the reveal when animated
    pub fn set_score(
        &mut self,
        score: u8,
        category: SafetyCategory,
        scheduler: &FrameScheduler,
        now: Instant,
    ) {
        self.category = category;
        self.dirty = true;
        self.start(score.min(100), scheduler, now);
    }

    /// Run the reveal again for the current target
    pub fn replay(&mut self, scheduler: &FrameScheduler, now: Instant) {
        let target = self.state.borrow().target;
        self.start(target, scheduler, now);
    }

    fn start(&mut self, target: u8, scheduler: &FrameScheduler, now: Instant) {
        // The previous timer must be gone before the state is rewritten
        self.animation = None;

        if !self.animated {
            let mut state = self.state.borrow_mut();
            state.target = target;
            state.show(target);
            return;
        }

        {
            let mut state = self.state.borrow_mut();
            state.target = target;
            state.show(0);
        }

        debug!("Animating gauge to {}", target);
        let state = Rc::downgrade(&self.state);
        let mut animation = ScoreAnimation::new(target);
        let handle = scheduler.schedule_interval(ANIMATION_TICK, now, move || {
            let Some(state) = state.upgrade() else {
                return TickControl::Stop;
            };
            let (value, control) = animation.step();
            state.borrow_mut().show(value);
            control
        });
        self.animation = Some(handle);
    }

    /// Enable or disable the reveal; disabling snaps to the target
    pub fn set_animated(&mut self, animated: bool) {
        self.animated = animated;
        if !animated && self.animation.take().is_some() {
            let mut state = self.state.borrow_mut();
            let target = state.target;
            state.show(target);
        }
    }

    pub fn set_size(&mut self, size: GaugeSize) {
        self.size = size;
        self.geometry = size.geometry();
        self.dirty = true;
    }

    pub fn set_show_label(&mut self, show_label: bool) {
        self.show_label = show_label;
        self.dirty = true;
    }

    /// Cancel any in-flight animation; the displayed value stays where it is
    pub fn dispose(&mut self) {
        if self.animation.take().is_some() {
            debug!("Gauge disposed with animation in flight");
        }
    }

    pub fn size(&self) -> GaugeSize {
        self.size
    }

    pub fn is_animated(&self) -> bool {
        self.animated
    }

    pub fn display_score(&self) -> u8 {
        self.state.borrow().display_score
    }

    pub fn target(&self) -> u8 {
        self.state.borrow().target
    }

    /// Number of display writes so far
    pub fn revision(&self) -> u32 {
        self.state.borrow().revision
    }

    pub fn is_animating(&self) -> bool {
        self.animation.as_ref().is_some_and(IntervalHandle::is_active)
    }

    /// Observe the display state without keeping it alive
    pub fn state_observer(&self) -> Weak<RefCell<GaugeDisplayState>> {
        Rc::downgrade(&self.state)
    }

    pub fn geometry(&self) -> &GaugeGeometry {
        &self.geometry
    }

    pub fn center(&self) -> Point {
        self.center
    }

    /// Band of the displayed value
    pub fn band(&self) -> ScoreBand {
        ScoreBand::for_score(self.display_score())
    }

    pub fn track_color(&self) -> Rgb565 {
        blend(self.background, COLOR_GRID, TRACK_OPACITY)
    }

    fn draw_ring<D: DrawTarget<Color = Rgb565>>(
        &self,
        score: u8,
        color: Rgb565,
        display: &mut D,
    ) -> Result<(), D::Error> {
        let diameter = self.geometry.diameter_px();
        let stroke = self.geometry.stroke_px();

        Circle::with_center(self.center, diameter)
            .into_styled(PrimitiveStyle::with_stroke(self.track_color(), stroke))
            .draw(display)?;

        if score == 0 {
            return Ok(());
        }

        let sweep = self.geometry.sweep_degrees(score);
        Arc::with_center(
            self.center,
            diameter,
            Angle::from_degrees(ARC_START_DEGREES),
            Angle::from_degrees(sweep),
        )
        .into_styled(PrimitiveStyle::with_stroke(color, stroke))
        .draw(display)?;

        // Round caps
        let cap_style = PrimitiveStyle::with_fill(color);
        for degrees in [0.0, sweep] {
            Circle::with_center(self.geometry.ring_point(self.center, degrees), stroke)
                .into_styled(cap_style)
                .draw(display)?;
        }

        Ok(())
    }

    fn draw_labels<D: DrawTarget<Color = Rgb565>>(
        &self,
        score: u8,
        color: Rgb565,
        display: &mut D,
    ) -> Result<(), D::Error> {
        let centered = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Middle)
            .build();

        let mut value: heapless::String<4> = heapless::String::new();
        let _ = write!(value, "{}", score);
        let value_style = MonoTextStyle::new(self.size.value_text_size().font(), color);
        Text::with_text_style(value.as_str(), self.center, value_style, centered).draw(display)?;

        if self.show_label {
            let label_style =
                MonoTextStyle::new(self.size.label_text_size().font(), COLOR_TEXT_MUTED);
            let position = self.center + Point::new(0, self.geometry.label_offset_px as i32);
            Text::with_text_style(self.category.label(), position, label_style, centered)
                .draw(display)?;
        }

        Ok(())
    }
}

impl Drawable for ScoreGauge {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        let score = self.display_score();
        let color = ScoreBand::for_score(score).color();

        self.bounds()
            .into_styled(PrimitiveStyle::with_fill(self.background))
            .draw(display)?;
        self.draw_ring(score, color, display)?;
        self.draw_labels(score, color, display)
    }

    fn bounds(&self) -> Rectangle {
        Rectangle::with_center(self.center, Size::new_equal(self.geometry.footprint_px))
    }

    fn is_dirty(&self) -> bool {
        self.dirty || self.state.borrow().revision != self.drawn_revision
    }

    fn mark_clean(&mut self) {
        self.drawn_revision = self.state.borrow().revision;
        self.dirty = false;
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::FrameBuffer;
    use crate::ui::styling::{COLOR_RISK, COLOR_SAFE};
    use alloc::vec::Vec;

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    fn gauge(animated: bool) -> ScoreGauge {
        let config = GaugeConfig {
            size: GaugeSize::Medium,
            show_label: true,
            animated,
        };
        ScoreGauge::new(Point::new(100, 100), &config)
    }

    /// Advance one animation tick at a time, collecting displayed values
    fn run_ticks(scheduler: &FrameScheduler, gauge: &ScoreGauge, ticks: u64) -> Vec<u8> {
        (1..=ticks)
            .map(|tick| {
                scheduler.advance(at(tick * 16));
                gauge.display_score()
            })
            .collect()
    }

    #[test]
    fn test_animation_reaches_target_exactly_within_sixty_ticks() {
        let scheduler = FrameScheduler::new();
        let mut gauge = gauge(true);
        gauge.set_score(60, SafetyCategory::ModerateRisk, &scheduler, at(0));
        assert_eq!(gauge.display_score(), 0);

        let values = run_ticks(&scheduler, &gauge, 60);
        assert!(values.iter().all(|&v| v <= 60));
        assert!(values.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(values.last(), Some(&60));
        assert!(!gauge.is_animating());
        assert_eq!(scheduler.active_timers(), 0);
    }

    #[test]
    fn test_intermediate_values_are_floored() {
        let scheduler = FrameScheduler::new();
        let mut gauge = gauge(true);
        gauge.set_score(87, SafetyCategory::Safe, &scheduler, at(0));

        // 87 / 60 = 1.45 per tick
        assert_eq!(run_ticks(&scheduler, &gauge, 3), [1, 2, 4]);
    }

    #[test]
    fn test_animation_step_stops_on_reaching_target() {
        let mut animation = ScoreAnimation::new(0);
        assert_eq!(animation.step(), (0, TickControl::Stop));

        let mut animation = ScoreAnimation::new(100);
        let mut last = (0, TickControl::Continue);
        for _ in 0..ANIMATION_STEPS {
            last = animation.step();
            if last.1 == TickControl::Stop {
                break;
            }
        }
        assert_eq!(last, (100, TickControl::Stop));
    }

    #[test]
    fn test_dispose_mid_animation_stops_writes() {
        let scheduler = FrameScheduler::new();
        let mut gauge = gauge(true);
        gauge.set_score(87, SafetyCategory::Safe, &scheduler, at(0));
        run_ticks(&scheduler, &gauge, 10);

        let revision = gauge.revision();
        let shown = gauge.display_score();
        gauge.dispose();

        for tick in 11..=80 {
            scheduler.advance(at(tick * 16));
        }
        assert_eq!(gauge.revision(), revision);
        assert_eq!(gauge.display_score(), shown);
        assert_eq!(scheduler.active_timers(), 0);
    }

    #[test]
    fn test_dropping_gauge_releases_timer_and_state() {
        let scheduler = FrameScheduler::new();
        let mut gauge = gauge(true);
        gauge.set_score(87, SafetyCategory::Safe, &scheduler, at(0));
        let observer = gauge.state_observer();

        drop(gauge);
        assert_eq!(scheduler.active_timers(), 0);
        assert!(observer.upgrade().is_none());
        assert_eq!(scheduler.advance(at(1_000)), 0);
    }

    #[test]
    fn test_new_target_cancels_running_animation() {
        let scheduler = FrameScheduler::new();
        let mut gauge = gauge(true);
        gauge.set_score(87, SafetyCategory::Safe, &scheduler, at(0));
        run_ticks(&scheduler, &gauge, 10);

        gauge.set_score(40, SafetyCategory::HighRisk, &scheduler, at(160));
        assert_eq!(gauge.display_score(), 0);
        assert_eq!(gauge.target(), 40);
        assert_eq!(scheduler.active_timers(), 1);

        for tick in 11..=70 {
            scheduler.advance(at(tick * 16));
        }
        assert_eq!(gauge.display_score(), 40);
        assert_eq!(scheduler.active_timers(), 0);
    }

    #[test]
    fn test_non_animated_gauge_shows_target_immediately() {
        let scheduler = FrameScheduler::new();
        let mut gauge = gauge(false);
        gauge.set_score(73, SafetyCategory::ModerateRisk, &scheduler, at(0));

        assert_eq!(gauge.display_score(), 73);
        assert!(!gauge.is_animating());
        assert_eq!(scheduler.active_timers(), 0);
    }

    #[test]
    fn test_disabling_animation_snaps_to_target() {
        let scheduler = FrameScheduler::new();
        let mut gauge = gauge(true);
        gauge.set_score(87, SafetyCategory::Safe, &scheduler, at(0));
        run_ticks(&scheduler, &gauge, 5);

        gauge.set_animated(false);
        assert_eq!(gauge.display_score(), 87);
        assert_eq!(scheduler.active_timers(), 0);
    }

    #[test]
    fn test_display_writes_mark_gauge_dirty() {
        let scheduler = FrameScheduler::new();
        let mut gauge = gauge(true);
        gauge.set_score(87, SafetyCategory::Safe, &scheduler, at(0));
        gauge.mark_clean();
        assert!(!gauge.is_dirty());

        scheduler.advance(at(16));
        assert!(gauge.is_dirty());
    }

    #[test]
    fn test_ring_color_follows_band() {
        let scheduler = FrameScheduler::new();
        let mut gauge = gauge(false);
        let top = gauge.geometry().ring_point(gauge.center(), 0.0);

        gauge.set_score(87, SafetyCategory::Safe, &scheduler, at(0));
        let mut fb = FrameBuffer::new(200, 200);
        gauge.draw(&mut fb).unwrap();
        assert_eq!(fb.pixel(top.x as u32, top.y as u32), Some(COLOR_SAFE));

        gauge.set_score(42, SafetyCategory::HighRisk, &scheduler, at(0));
        gauge.draw(&mut fb).unwrap();
        assert_eq!(fb.pixel(top.x as u32, top.y as u32), Some(COLOR_RISK));
    }

    #[test]
    fn test_zero_score_draws_track_only() {
        let scheduler = FrameScheduler::new();
        let mut gauge = gauge(false);
        gauge.set_score(0, SafetyCategory::HighRisk, &scheduler, at(0));

        let mut fb = FrameBuffer::new(200, 200);
        gauge.draw(&mut fb).unwrap();

        let top = gauge.geometry().ring_point(gauge.center(), 0.0);
        assert_eq!(fb.pixel(top.x as u32, top.y as u32), Some(gauge.track_color()));
    }
}
