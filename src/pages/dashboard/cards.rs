//! Card builders for the dashboard panels
//!
//! Pure functions from records to [`Card`]s, so each panel's content can be
//! checked without drawing.

use alloc::format;
use alloc::string::{String, ToString};

use embedded_graphics::primitives::Rectangle;

use crate::app_state::BatteryTip;
use crate::metrics::{ScoreBand, charging_frequency_label};
use crate::model::{Achievement, BatteryData, Reward, SafetyScore, SwapStation};
use crate::trend::Trend;
use crate::ui::components::{Card, CardLine};
use crate::ui::styling::{
    COLOR_BRAND, COLOR_MODERATE, COLOR_RISK, COLOR_SAFE, COLOR_TEXT_MUTED, COLOR_TEXT_PRIMARY,
    COLOR_TEXT_SECONDARY, TextSize,
};

pub fn gauge_card(bounds: Rectangle, score: &SafetyScore) -> Card {
    let updated = format!("Last updated: {}", score.last_updated.numeric_label());
    Card::new(bounds, "Safety Score").with_subtitle(&updated, COLOR_TEXT_MUTED)
}

/// History chart frame, subtitled with the trend in its direction color
pub fn chart_card(bounds: Rectangle, trend: &Trend) -> Card {
    Card::new(bounds, "Safety Score History").with_subtitle(&trend.label(), trend.color())
}

pub fn battery_card(bounds: Rectangle, battery: &BatteryData, tips: &[BatteryTip]) -> Card {
    let mut card = Card::new(bounds, "Battery Health");

    card.push_text(
        &format!("{} {}", battery.make, battery.model),
        TextSize::Body,
        COLOR_TEXT_PRIMARY,
    );
    card.push_text(
        &format!("Avg. temperature: {}°C", battery.average_temperature),
        TextSize::Caption,
        ScoreBand::for_temperature(battery.average_temperature).color(),
    );
    card.push_text(
        &format!(
            "Charging: {}",
            charging_frequency_label(battery.charging_frequency)
        ),
        TextSize::Caption,
        ScoreBand::for_charging_frequency(battery.charging_frequency).color(),
    );

    let certification = if battery.is_certified {
        "certified"
    } else {
        "not certified"
    };
    card.push_text(
        &format!("Age: {} years, {}", battery.age, certification),
        TextSize::Caption,
        COLOR_TEXT_SECONDARY,
    );

    let incidents = match battery.incident_count {
        0 => "Incidents: None reported".to_string(),
        count => format!("Incidents: {} reported", count),
    };
    card.push_text(&incidents, TextSize::Caption, COLOR_TEXT_SECONDARY);

    for tip in tips {
        card.push_wrapped(tip.text(), TextSize::Caption, COLOR_BRAND);
    }

    card
}

/// Point balance, the first rewards and the first achievements
pub fn rewards_card(
    bounds: Rectangle,
    points: u32,
    rewards: &[Reward],
    achievements: &[Achievement],
    rewards_shown: usize,
    achievements_shown: usize,
) -> Card {
    let mut card = Card::new(bounds, "Rewards & Achievements");

    card.push_text(
        &format!("Your reward points: {}", points),
        TextSize::Body,
        COLOR_BRAND,
    );

    for reward in rewards.iter().take(rewards_shown) {
        let (state, color) = if reward.is_affordable(points) {
            ("Redeem", COLOR_SAFE)
        } else {
            ("Locked", COLOR_TEXT_MUTED)
        };
        card.push_text(
            &format!("{} ({}) {}", reward.title, reward.points, state),
            TextSize::Caption,
            color,
        );
    }

    for achievement in achievements.iter().take(achievements_shown) {
        let (line, bar) = if achievement.is_completed {
            (format!("{} - Completed!", achievement.title), COLOR_SAFE)
        } else {
            (
                format!(
                    "{} - {}/{}",
                    achievement.title, achievement.progress, achievement.total_needed
                ),
                COLOR_MODERATE,
            )
        };
        card.push_text(&line, TextSize::Caption, COLOR_TEXT_PRIMARY);
        card.push_progress(achievement.progress_ratio(), bar);
    }

    card
}

pub fn station_card(bounds: Rectangle, station: Option<&SwapStation>) -> Card {
    let mut card = Card::new(bounds, "Closest Swap Station").with_accent(COLOR_BRAND);

    let Some(station) = station else {
        card.push_text(
            "No stations available nearby",
            TextSize::Caption,
            COLOR_TEXT_MUTED,
        );
        return card;
    };

    card.push_text(&station.name, TextSize::Body, COLOR_TEXT_PRIMARY);
    card.push_text(
        &distance_label(station.distance),
        TextSize::Caption,
        COLOR_TEXT_SECONDARY,
    );
    card.push_text(
        &format!("{} batteries available", station.available_batteries),
        TextSize::Caption,
        COLOR_SAFE,
    );
    card.push_text(&station.address, TextSize::Caption, COLOR_TEXT_MUTED);
    card.push_text(
        &format!("Open {}", station.operating_hours),
        TextSize::Caption,
        COLOR_TEXT_MUTED,
    );

    card
}

/// Stations in listing order with their open state and stock
///
/// Closed and empty stations are listed too, flagged in red.
pub fn nearby_card(bounds: Rectangle, stations: &[SwapStation]) -> Card {
    let mut card = Card::new(bounds, "Nearby Stations");

    if stations.is_empty() {
        card.push_text("No stations nearby", TextSize::Caption, COLOR_TEXT_MUTED);
        return card;
    }

    for (index, station) in stations.iter().enumerate() {
        if index > 0 {
            card.push(CardLine::Gap);
        }

        card.push_text(&station.name, TextSize::Body, COLOR_TEXT_PRIMARY);
        card.push_text(&station.address, TextSize::Caption, COLOR_TEXT_MUTED);

        let (state, color) = if station.is_open {
            ("Open", COLOR_SAFE)
        } else {
            ("Closed", COLOR_RISK)
        };
        card.push_text(state, TextSize::Caption, color);
        card.push_text(
            &distance_label(station.distance),
            TextSize::Caption,
            COLOR_TEXT_SECONDARY,
        );

        let stock = if station.available_batteries > 0 {
            COLOR_SAFE
        } else {
            COLOR_RISK
        };
        card.push_text(
            &format!("{} batteries available", station.available_batteries),
            TextSize::Caption,
            stock,
        );
        card.push_text(
            &format!("Hours: {}", station.operating_hours),
            TextSize::Caption,
            COLOR_TEXT_MUTED,
        );
    }

    card
}

fn distance_label(distance: Option<f32>) -> String {
    match distance {
        Some(km) => format!("{} km away", km),
        None => "Distance unknown".to_string(),
    }
}
