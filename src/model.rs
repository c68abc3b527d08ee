//! Data records consumed by the dashboard
//!
//! The safety score and its history feed the gauge, the chart and the trend
//! calculator. Everything else here is display-only: the static cards print
//! these records verbatim and never write back.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror_no_std::Error;

// ============================================================================
// Calendar dates
// ============================================================================

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Errors produced while parsing an ISO `YYYY-MM-DD` date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DateParseError {
    /// Input is not shaped like `YYYY-MM-DD`
    #[error("Expected a date formatted as YYYY-MM-DD")]
    Format,

    /// Month outside 1-12
    #[error("Month out of range: {month}")]
    Month {
        /// The rejected month
        month: u8,
    },

    /// Day outside the month's length
    #[error("Day out of range: {day}")]
    Day {
        /// The rejected day
        day: u8,
    },
}

/// Result type for date parsing
pub type DateResult<T> = Result<T, DateParseError>;

/// A calendar date without time-of-day
///
/// Ordering is chronological (year, then month, then day).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    year: u16,
    month: u8,
    day: u8,
}

impl CalendarDate {
    /// Create a validated date
    pub fn new(year: u16, month: u8, day: u8) -> DateResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(DateParseError::Month { month });
        }
        if day == 0 || day > days_in_month(year, month) {
            return Err(DateParseError::Day { day });
        }
        Ok(Self { year, month, day })
    }

    /// Build a date from literal parts
    ///
    /// Meant for constants, where an invalid date fails compilation.
    pub const fn from_ymd(year: u16, month: u8, day: u8) -> Self {
        assert!(month >= 1 && month <= 12, "month out of range");
        assert!(day >= 1 && day <= days_in_month(year, month), "day out of range");
        Self { year, month, day }
    }

    pub const fn year(&self) -> u16 {
        self.year
    }

    pub const fn month(&self) -> u8 {
        self.month
    }

    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Three-letter month abbreviation ("Jan" .. "Dec")
    pub fn month_abbreviation(&self) -> &'static str {
        MONTH_ABBREVIATIONS[(self.month - 1) as usize]
    }

    /// Short label used under chart markers, e.g. "Jan 15"
    pub fn short_label(&self) -> heapless::String<8> {
        let mut label = heapless::String::new();
        let _ = fmt::write(
            &mut label,
            format_args!("{} {}", self.month_abbreviation(), self.day),
        );
        label
    }

    /// Signed number of days from `self` to `later`
    pub fn days_until(&self, later: CalendarDate) -> i64 {
        later.day_number() - self.day_number()
    }

    /// Days since the start of the proleptic Gregorian era (March-based year)
    fn day_number(&self) -> i64 {
        let month = i64::from(self.month);
        let year = i64::from(self.year) - i64::from(month <= 2);
        let era = year / 400;
        let year_of_era = year - era * 400;
        let shifted_month = if month > 2 { month - 3 } else { month + 9 };
        let day_of_year = (153 * shifted_month + 2) / 5 + i64::from(self.day) - 1;
        let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
        era * 146_097 + day_of_era
    }

    /// Numeric US-style label used for "Last updated", e.g. "5/15/2025"
    pub fn numeric_label(&self) -> heapless::String<12> {
        let mut label = heapless::String::new();
        let _ = fmt::write(
            &mut label,
            format_args!("{}/{}/{}", self.month, self.day, self.year),
        );
        label
    }
}

const fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

const fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

fn parse_digits(field: &str) -> DateResult<u16> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DateParseError::Format);
    }
    field.parse().map_err(|_| DateParseError::Format)
}

impl FromStr for CalendarDate {
    type Err = DateParseError;

    fn from_str(s: &str) -> DateResult<Self> {
        let mut parts = s.trim().split('-');
        let (Some(year), Some(month), Some(day), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(DateParseError::Format);
        };

        if year.len() != 4 || month.len() != 2 || day.len() != 2 {
            return Err(DateParseError::Format);
        }

        let year = parse_digits(year)?;
        let month = parse_digits(month)? as u8;
        let day = parse_digits(day)? as u8;

        Self::new(year, month, day)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Safety score
// ============================================================================

/// Risk bucket attached to a safety score by the data source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SafetyCategory {
    #[serde(rename = "Safe")]
    Safe,
    #[serde(rename = "Moderate Risk")]
    ModerateRisk,
    #[serde(rename = "High Risk")]
    HighRisk,
}

impl SafetyCategory {
    /// Display label for this category
    pub const fn label(self) -> &'static str {
        match self {
            Self::Safe => "Safe",
            Self::ModerateRisk => "Moderate Risk",
            Self::HighRisk => "High Risk",
        }
    }
}

/// One dated observation of the safety score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySample {
    pub date: CalendarDate,
    pub score: u8,
}

impl HistorySample {
    pub const fn new(date: CalendarDate, score: u8) -> Self {
        Self { date, score }
    }
}

/// Current safety score with its chronological history
///
/// `history` is ascending by date and `score` matches its last entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyScore {
    pub score: u8,
    pub category: SafetyCategory,
    pub last_updated: CalendarDate,
    pub history: Vec<HistorySample>,
}

// ============================================================================
// Display-only records
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Battery the user currently rides on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatteryData {
    pub id: String,
    pub make: String,
    pub model: String,
    /// Age in years
    pub age: f32,
    pub is_certified: bool,
    pub last_maintenance: CalendarDate,
    /// Average charges per week
    pub charging_frequency: f32,
    /// Average temperature in °C
    pub average_temperature: f32,
    pub incident_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reward {
    pub id: String,
    pub title: String,
    pub points: u32,
    pub description: String,
}

impl Reward {
    /// Whether a user holding `user_points` can redeem this reward
    pub fn is_affordable(&self, user_points: u32) -> bool {
        user_points >= self.points
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub is_completed: bool,
    pub progress: u32,
    pub total_needed: u32,
}

impl Achievement {
    /// Completion ratio in 0.0-1.0 (0.0 when nothing is needed)
    pub fn progress_ratio(&self) -> f32 {
        if self.total_needed == 0 {
            return 0.0;
        }
        (self.progress as f32 / self.total_needed as f32).clamp(0.0, 1.0)
    }
}

/// Battery swap station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapStation {
    pub id: String,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub available_batteries: u32,
    /// Distance from the user in km, when known
    pub distance: Option<f32>,
    pub is_open: bool,
    pub operating_hours: String,
}

impl SwapStation {
    /// Open and holding at least one charged battery
    pub fn is_available(&self) -> bool {
        self.is_open && self.available_batteries > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iso_date() {
        let date: CalendarDate = "2025-01-15".parse().unwrap();
        assert_eq!(date.year(), 2025);
        assert_eq!(date.month(), 1);
        assert_eq!(date.day(), 15);
        assert_eq!(date.short_label().as_str(), "Jan 15");
        assert_eq!(date.numeric_label().as_str(), "1/15/2025");
    }

    #[test]
    fn test_parse_rejects_malformed_dates() {
        assert_eq!("2025/01/15".parse::<CalendarDate>(), Err(DateParseError::Format));
        assert_eq!("2025-1-15".parse::<CalendarDate>(), Err(DateParseError::Format));
        assert_eq!("2025-01-15-01".parse::<CalendarDate>(), Err(DateParseError::Format));
        assert_eq!("20x5-01-15".parse::<CalendarDate>(), Err(DateParseError::Format));
        assert_eq!(
            "2025-13-01".parse::<CalendarDate>(),
            Err(DateParseError::Month { month: 13 })
        );
        assert_eq!(
            "2025-02-29".parse::<CalendarDate>(),
            Err(DateParseError::Day { day: 29 })
        );
    }

    #[test]
    fn test_const_constructor_matches_parser() {
        const RELEASE: CalendarDate = CalendarDate::from_ymd(2025, 5, 15);
        assert_eq!(Ok(RELEASE), "2025-05-15".parse());
    }

    #[test]
    fn test_leap_day_accepted() {
        assert!("2024-02-29".parse::<CalendarDate>().is_ok());
    }

    #[test]
    fn test_dates_order_chronologically() {
        let earlier: CalendarDate = "2025-01-31".parse().unwrap();
        let later: CalendarDate = "2025-02-01".parse().unwrap();
        assert!(earlier < later);
    }

    #[test]
    fn test_days_until_spans_month_and_leap_day() {
        let start: CalendarDate = "2024-02-28".parse().unwrap();
        let end: CalendarDate = "2024-03-01".parse().unwrap();
        assert_eq!(start.days_until(end), 2);
        assert_eq!(end.days_until(start), -2);

        let maintenance: CalendarDate = "2025-03-15".parse().unwrap();
        let today: CalendarDate = "2025-05-15".parse().unwrap();
        assert_eq!(maintenance.days_until(today), 61);
    }

    #[test]
    fn test_display_round_trips_iso_format() {
        let date = CalendarDate::new(2025, 5, 3).unwrap();
        assert_eq!(alloc::format!("{}", date), "2025-05-03");
    }

    #[test]
    fn test_achievement_progress_ratio() {
        let achievement = Achievement {
            id: String::from("a"),
            title: String::from("Maintenance Master"),
            description: String::new(),
            is_completed: false,
            progress: 3,
            total_needed: 5,
        };
        assert!((achievement.progress_ratio() - 0.6).abs() < f32::EPSILON);
    }
}
