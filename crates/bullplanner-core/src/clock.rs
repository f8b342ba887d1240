//! Wall-clock time codec.
//!
//! Every boundary of the planner (the store, the grid, the AI gateway) speaks
//! the canonical 24-hour `HH:mm` form. The 12-hour [`DisplayTime`] exists only
//! for entry and display, and converts back without loss:
//!
//! ```text
//! 00:05 <-> 12:05 AM
//! 12:00 <-> 12:00 PM
//! 23:59 <-> 11:59 PM
//! ```

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// A naive time of day with minute precision. No date, no timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WallTime(NaiveTime);

impl WallTime {
    /// Build from 24-hour parts.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidTime`] if `hour > 23` or `minute > 59`.
    pub fn from_hm(hour: u32, minute: u32) -> Result<Self, ValidationError> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(|| {
                ValidationError::invalid_time(
                    format!("{hour}:{minute:02}"),
                    "hour must be 0-23 and minute 0-59",
                )
            })
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Minutes since midnight, the sort key of the weekly grid.
    pub fn minutes_since_midnight(&self) -> u32 {
        self.hour() * 60 + self.minute()
    }

    /// Convert to the 12-hour display form.
    pub fn to_display(&self) -> DisplayTime {
        let hour = self.hour();
        let meridiem = if hour >= 12 { Meridiem::Pm } else { Meridiem::Am };
        let hour12 = match hour % 12 {
            0 => 12,
            h => h,
        };
        DisplayTime {
            hour: hour12 as u8,
            minute: self.minute() as u8,
            meridiem,
        }
    }

    pub fn as_naive(&self) -> NaiveTime {
        self.0
    }
}

impl From<NaiveTime> for WallTime {
    fn from(t: NaiveTime) -> Self {
        // Drop seconds so equality stays at minute precision.
        Self(NaiveTime::from_hms_opt(t.hour(), t.minute(), 0).unwrap_or(t))
    }
}

impl fmt::Display for WallTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for WallTime {
    type Err = ValidationError;

    /// Parses `HH:mm` (a single-digit hour is tolerated, the minute must have
    /// two digits).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let Some((h, m)) = trimmed.split_once(':') else {
            return Err(ValidationError::invalid_time(s, "expected HH:mm"));
        };
        if h.is_empty() || h.len() > 2 || m.len() != 2 {
            return Err(ValidationError::invalid_time(s, "expected HH:mm"));
        }
        if !h.bytes().chain(m.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::invalid_time(s, "expected digits"));
        }
        let hour: u32 = h
            .parse()
            .map_err(|_| ValidationError::invalid_time(s, "bad hour"))?;
        let minute: u32 = m
            .parse()
            .map_err(|_| ValidationError::invalid_time(s, "bad minute"))?;
        Self::from_hm(hour, minute).map_err(|_| {
            ValidationError::invalid_time(s, "hour must be 0-23 and minute 0-59")
        })
    }
}

impl TryFrom<String> for WallTime {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WallTime> for String {
    fn from(t: WallTime) -> Self {
        t.to_string()
    }
}

/// AM/PM marker of the 12-hour form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Meridiem {
    #[serde(rename = "AM")]
    Am,
    #[serde(rename = "PM")]
    Pm,
}

impl Meridiem {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Am => "AM",
            Self::Pm => "PM",
        }
    }
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Meridiem {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AM" => Ok(Self::Am),
            "PM" => Ok(Self::Pm),
            _ => Err(ValidationError::InvalidValue {
                field: "meridiem".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// 12-hour display form: hour 1..=12, minute 0..=59.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DisplayTime {
    pub hour: u8,
    pub minute: u8,
    pub meridiem: Meridiem,
}

impl DisplayTime {
    pub fn new(hour: u8, minute: u8, meridiem: Meridiem) -> Self {
        Self {
            hour,
            minute,
            meridiem,
        }
    }

    /// Convert back to the canonical 24-hour form.
    ///
    /// `12 AM` is midnight, `12 PM` is noon, any other PM hour adds twelve.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidTime`] if the hour is outside 1..=12
    /// or the minute outside 0..=59.
    pub fn to_canonical(&self) -> Result<WallTime, ValidationError> {
        if !(1..=12).contains(&self.hour) || self.minute > 59 {
            return Err(ValidationError::invalid_time(
                self.to_string(),
                "hour must be 1-12 and minute 0-59",
            ));
        }
        let hour = match (self.hour, self.meridiem) {
            (12, Meridiem::Am) => 0,
            (12, Meridiem::Pm) => 12,
            (h, Meridiem::Am) => h,
            (h, Meridiem::Pm) => h + 12,
        };
        WallTime::from_hm(u32::from(hour), u32::from(self.minute))
    }

    pub fn with_hour(self, hour: u8) -> Self {
        Self { hour, ..self }
    }

    pub fn with_minute(self, minute: u8) -> Self {
        Self { minute, ..self }
    }

    pub fn with_meridiem(self, meridiem: Meridiem) -> Self {
        Self { meridiem, ..self }
    }
}

impl From<WallTime> for DisplayTime {
    fn from(t: WallTime) -> Self {
        t.to_display()
    }
}

impl fmt::Display for DisplayTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02} {}", self.hour, self.minute, self.meridiem)
    }
}

/// Render a range as `9:00 AM - 10:15 AM`.
pub fn format_range(start: WallTime, end: WallTime) -> String {
    format!("{} - {}", start.to_display(), end.to_display())
}
