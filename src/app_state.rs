//! Application-wide state for the dashboard
//!
//! `AppState` is built once at start-up and handed to the pages that need
//! it. There are no globals: the simulator owns one instance and tests
//! construct their own.

use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;

use log::debug;

use crate::metrics::{CHARGING_TIP_THRESHOLD, MAINTENANCE_OVERDUE_DAYS, TEMPERATURE_TIP_THRESHOLD};
use crate::model::{
    Achievement, BatteryData, CalendarDate, HistorySample, Reward, SafetyCategory, SafetyScore,
    SwapStation, User,
};

/// Date the demo records were last refreshed
const DEMO_TODAY: CalendarDate = CalendarDate::from_ymd(2025, 5, 15);

/// Reward points held by the demo user
const DEMO_POINTS: u32 = 325;

/// Battery care suggestion shown under the battery health card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryTip {
    CoolerStorage,
    ReduceCharging,
    ScheduleMaintenance,
    KeepItUp,
}

impl BatteryTip {
    pub const fn text(self) -> &'static str {
        match self {
            Self::CoolerStorage => {
                "Consider storing in cooler conditions to reduce average temperature"
            }
            Self::ReduceCharging => "Reduce charging frequency to extend battery lifespan",
            Self::ScheduleMaintenance => "Schedule maintenance check (last check > 90 days ago)",
            Self::KeepItUp => "Your battery is in good condition, continue current practices",
        }
    }
}

/// Tips for `battery` as of `today`, in display order
///
/// The tips are independent: an incident-free battery still gets the
/// "good condition" note even when other tips apply.
pub fn battery_tips(battery: &BatteryData, today: CalendarDate) -> Vec<BatteryTip> {
    let mut tips = Vec::new();

    if battery.average_temperature > TEMPERATURE_TIP_THRESHOLD {
        tips.push(BatteryTip::CoolerStorage);
    }
    if battery.charging_frequency > CHARGING_TIP_THRESHOLD {
        tips.push(BatteryTip::ReduceCharging);
    }
    if battery.last_maintenance.days_until(today) > i64::from(MAINTENANCE_OVERDUE_DAYS) {
        tips.push(BatteryTip::ScheduleMaintenance);
    }
    if battery.incident_count == 0 {
        tips.push(BatteryTip::KeepItUp);
    }

    tips
}

/// Main application state container
///
/// Holds the user, their point balance and every record the dashboard
/// shows. The safety score is reference counted so the history chart can
/// detect a replaced record by identity.
pub struct AppState {
    pub user: User,
    pub points: u32,
    /// Reference date for age-based checks such as overdue maintenance
    pub today: CalendarDate,
    pub safety_score: Rc<SafetyScore>,
    pub battery: BatteryData,
    pub rewards: Vec<Reward>,
    pub achievements: Vec<Achievement>,
    pub stations: Vec<SwapStation>,
}

impl AppState {
    /// State populated with the built-in demo records
    pub fn demo() -> Self {
        debug!("Loading demo application state");
        Self {
            user: User {
                id: "1".to_string(),
                name: "Alex Johnson".to_string(),
                email: "alex@example.com".to_string(),
            },
            points: DEMO_POINTS,
            today: DEMO_TODAY,
            safety_score: Rc::new(demo_safety_score()),
            battery: demo_battery(),
            rewards: demo_rewards(),
            achievements: demo_achievements(),
            stations: demo_stations(),
        }
    }

    /// Nearest open station with at least one battery
    ///
    /// Stations with an unknown distance sort as if they were 0 km away;
    /// ties keep the listing order.
    pub fn closest_available_station(&self) -> Option<&SwapStation> {
        self.stations
            .iter()
            .filter(|station| station.is_available())
            .min_by(|a, b| {
                let a = a.distance.unwrap_or(0.0);
                let b = b.distance.unwrap_or(0.0);
                a.total_cmp(&b)
            })
    }

    /// The first `count` stations in listing order, whatever their state
    pub fn nearby_stations(&self, count: usize) -> &[SwapStation] {
        &self.stations[..count.min(self.stations.len())]
    }

    pub fn battery_tips(&self) -> Vec<BatteryTip> {
        battery_tips(&self.battery, self.today)
    }

    /// Replace the safety score record
    pub fn set_safety_score(&mut self, score: SafetyScore) {
        debug!(
            "Safety score replaced: {} ({} samples)",
            score.score,
            score.history.len()
        );
        self.safety_score = Rc::new(score);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::demo()
    }
}

fn demo_safety_score() -> SafetyScore {
    const HISTORY: [(CalendarDate, u8); 5] = [
        (CalendarDate::from_ymd(2025, 1, 15), 78),
        (CalendarDate::from_ymd(2025, 2, 15), 82),
        (CalendarDate::from_ymd(2025, 3, 15), 85),
        (CalendarDate::from_ymd(2025, 4, 15), 84),
        (CalendarDate::from_ymd(2025, 5, 15), 87),
    ];

    SafetyScore {
        score: 87,
        category: SafetyCategory::Safe,
        last_updated: DEMO_TODAY,
        history: HISTORY
            .iter()
            .map(|&(date, score)| HistorySample::new(date, score))
            .collect(),
    }
}

fn demo_battery() -> BatteryData {
    BatteryData {
        id: "bat-123456".to_string(),
        make: "EnergyX".to_string(),
        model: "MaxCharge Pro".to_string(),
        age: 1.5,
        is_certified: true,
        last_maintenance: CalendarDate::from_ymd(2025, 3, 15),
        charging_frequency: 3.5,
        average_temperature: 28.3,
        incident_count: 0,
    }
}

fn reward(id: &str, title: &str, points: u32, description: &str) -> Reward {
    Reward {
        id: id.to_string(),
        title: title.to_string(),
        points,
        description: description.to_string(),
    }
}

fn demo_rewards() -> Vec<Reward> {
    vec![
        reward(
            "reward-1",
            "Battery Inspection Discount",
            200,
            "15% off your next battery inspection service",
        ),
        reward(
            "reward-2",
            "Premium Insurance Discount",
            350,
            "10% discount on battery insurance premium",
        ),
        reward(
            "reward-3",
            "Free Battery Swap",
            500,
            "One free battery swap at any partner station",
        ),
        reward(
            "reward-4",
            "Priority Service",
            300,
            "Priority service at all maintenance centers",
        ),
    ]
}

fn achievement(
    id: &str,
    title: &str,
    description: &str,
    progress: u32,
    total_needed: u32,
) -> Achievement {
    Achievement {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        is_completed: progress >= total_needed,
        progress,
        total_needed,
    }
}

fn demo_achievements() -> Vec<Achievement> {
    vec![
        achievement(
            "achievement-1",
            "Safety Streak",
            "Maintain a \"Safe\" rating for 4 consecutive weeks",
            4,
            4,
        ),
        achievement(
            "achievement-2",
            "Maintenance Master",
            "Complete 5 battery maintenance checks",
            3,
            5,
        ),
        achievement(
            "achievement-3",
            "Temperature Tamer",
            "Keep battery temperature below 30°C for 30 days",
            21,
            30,
        ),
    ]
}

struct StationSeed {
    id: &'static str,
    name: &'static str,
    address: &'static str,
    latitude: f64,
    longitude: f64,
    available_batteries: u32,
    distance: f32,
    is_open: bool,
    operating_hours: &'static str,
}

const STATIONS: [StationSeed; 4] = [
    StationSeed {
        id: "station-1",
        name: "Urban Swap Center",
        address: "123 Main St, Cityville",
        latitude: 37.7749,
        longitude: -122.4194,
        available_batteries: 8,
        distance: 1.2,
        is_open: true,
        operating_hours: "8:00 AM - 9:00 PM",
    },
    StationSeed {
        id: "station-2",
        name: "Express Swap Hub",
        address: "456 Market St, Cityville",
        latitude: 37.7665,
        longitude: -122.4219,
        available_batteries: 3,
        distance: 2.5,
        is_open: true,
        operating_hours: "8:00 AM - 10:00 PM",
    },
    StationSeed {
        id: "station-3",
        name: "EcoSwap Station",
        address: "789 Park Ave, Cityville",
        latitude: 37.7834,
        longitude: -122.4252,
        available_batteries: 0,
        distance: 3.7,
        is_open: true,
        operating_hours: "7:00 AM - 8:00 PM",
    },
    StationSeed {
        id: "station-4",
        name: "BatteryPlus Exchange",
        address: "101 Tech Blvd, Cityville",
        latitude: 37.7707,
        longitude: -122.4120,
        available_batteries: 5,
        distance: 4.1,
        is_open: false,
        operating_hours: "9:00 AM - 7:00 PM",
    },
];

fn demo_stations() -> Vec<SwapStation> {
    STATIONS
        .iter()
        .map(|seed| SwapStation {
            id: seed.id.to_string(),
            name: seed.name.to_string(),
            address: seed.address.to_string(),
            latitude: seed.latitude,
            longitude: seed.longitude,
            available_batteries: seed.available_batteries,
            distance: Some(seed.distance),
            is_open: seed.is_open,
            operating_hours: String::from(seed.operating_hours),
        })
        .collect()
}
