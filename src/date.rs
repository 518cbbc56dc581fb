//! Calendar dates and their offset from the J2000 epoch.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Gregorian calendar date with time of day in hours UT.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalendarDate {
    pub month: u32,
    pub day: u32,
    pub year: i32,
    pub universal_time: f64, // h
}

impl CalendarDate {
    pub fn new(month: u32, day: u32, year: i32) -> Result<Self> {
        let date = Self { month, day, year, universal_time: 0.0 };
        date.validate()?;
        Ok(date)
    }

    pub fn with_time(mut self, hours: f64) -> Result<Self> {
        if !(0.0..24.0).contains(&hours) {
            return Err(Error::InvalidArgument(format!("time of day must be in [0, 24) h, got {}", hours)));
        }
        self.universal_time = hours;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        if !(1..=12).contains(&self.month) || !(1..=31).contains(&self.day) {
            return Err(Error::DateFormat(self.to_string()));
        }
        Ok(())
    }

    /// Days since 2000-01-01 0h UT (Julian day 2451544.5).
    pub fn days_since_epoch(&self) -> f64 {
        let y = self.year as i64;
        let m = self.month as i64;
        let d = self.day as i64;
        let whole = 367 * y - 7 * (y + (m + 9) / 12) / 4 - 3 * ((y + (m - 9) / 7) / 100 + 1) / 4
            + 275 * m / 9
            + d
            - 730_515;
        whole as f64 + self.universal_time / 24.0 - 1.0
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}/{:04}", self.month, self.day, self.year)
    }
}

impl FromStr for CalendarDate {
    type Err = Error;

    /// `MM/DD/YYYY`
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let bad = || Error::DateFormat(s.to_string());

        let mut parts = s.split('/');
        let (Some(m), Some(d), Some(y), None) = (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(bad());
        };
        if m.len() != 2 || d.len() != 2 || y.len() != 4 {
            return Err(bad());
        }

        let month = m.parse().map_err(|_| bad())?;
        let day = d.parse().map_err(|_| bad())?;
        let year = y.parse().map_err(|_| bad())?;
        CalendarDate::new(month, day, year).map_err(|_| bad())
    }
}
