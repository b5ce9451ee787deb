//! Calendar correspondence records.
//!
//! A [`CalendarItem`] pairs one solar (Gregorian) date with its lunar
//! rendition. The solar side carries three fields the service transmits
//! redundantly (leap-year flag, weekday, Julian day number); the decode
//! boundary checks them against the values computed here, so a
//! disagreement is caught before a record reaches callers.

use std::cmp::{Ordering, Reverse};
use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Offset between chrono's day count from 0001-01-01 and the Julian day
/// number. Anchor: 2000-01-01 is Julian day 2_451_545.
const JULIAN_DAY_OFFSET: i64 = 1_721_425;

/// Marker glyph the wire format uses for "leap" (`윤`).
pub const LEAP_MARKER: &str = "윤";
/// Marker glyph the wire format uses for "ordinary" (`평`).
pub const NORMAL_MARKER: &str = "평";

/// Weekday glyphs of the wire format, Monday first.
const WEEKDAY_GLYPHS: [(&str, Weekday); 7] = [
    ("월", Weekday::Mon),
    ("화", Weekday::Tue),
    ("수", Weekday::Wed),
    ("목", Weekday::Thu),
    ("금", Weekday::Fri),
    ("토", Weekday::Sat),
    ("일", Weekday::Sun),
];

/// Gregorian leap-year rule.
pub fn is_gregorian_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Julian day number of a solar date.
pub fn julian_day(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce()) + JULIAN_DAY_OFFSET
}

/// Renders a leap flag as the single-glyph marker used on the wire.
pub fn leap_marker(leap: bool) -> &'static str {
    if leap {
        LEAP_MARKER
    } else {
        NORMAL_MARKER
    }
}

/// Parses the single-glyph leap marker.
pub fn parse_leap_marker(field: &'static str, value: &str) -> Result<bool, Error> {
    match value.trim() {
        LEAP_MARKER => Ok(true),
        NORMAL_MARKER => Ok(false),
        other => Err(Error::MalformedField {
            field,
            reason: format!("unknown leap marker `{other}`"),
        }),
    }
}

/// Renders a weekday as the single-glyph abbreviation used on the wire.
pub fn weekday_glyph(weekday: Weekday) -> &'static str {
    WEEKDAY_GLYPHS[weekday.num_days_from_monday() as usize].0
}

/// Parses the single-glyph weekday abbreviation.
pub fn parse_weekday(field: &'static str, value: &str) -> Result<Weekday, Error> {
    let trimmed = value.trim();
    WEEKDAY_GLYPHS
        .iter()
        .find(|(glyph, _)| *glyph == trimmed)
        .map(|(_, weekday)| *weekday)
        .ok_or_else(|| Error::MalformedField {
            field,
            reason: format!("unknown weekday `{trimmed}`"),
        })
}

/// Sexagenary-cycle label as transmitted, e.g. `경자(庚子)`.
///
/// Opaque metadata: the raw token is kept verbatim and the Korean and
/// Chinese-script halves are only split on access, never computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SexagenaryLabel(String);

impl SexagenaryLabel {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Korean reading, the token before the parenthesized hanja.
    pub fn korean(&self) -> &str {
        self.0.split('(').next().unwrap_or(&self.0).trim()
    }

    /// Chinese-script form, if the token carries one.
    pub fn hanja(&self) -> Option<&str> {
        let start = self.0.find('(')? + 1;
        let end = self.0.rfind(')')?;
        (start <= end).then(|| &self.0[start..end])
    }
}

impl fmt::Display for SexagenaryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A date in the traditional lunisolar calendar.
///
/// Field order matters: the derived ordering compares year, month, leap
/// flag, then day, which is chronological order (a leap month follows
/// the ordinary month of the same number).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct LunarDate {
    pub year: i32,
    pub month: u32,
    pub leap: bool,
    pub day: u32,
}

impl LunarDate {
    /// Builds a lunar date, rejecting out-of-range month or day values.
    pub fn new(year: i32, month: u32, leap: bool, day: u32) -> Result<Self, Error> {
        if !(1..=12).contains(&month) {
            return Err(Error::MalformedField {
                field: "lunMonth",
                reason: format!("month {month} out of range 1-12"),
            });
        }
        if !(1..=30).contains(&day) {
            return Err(Error::MalformedField {
                field: "lunDay",
                reason: format!("day {day} out of range 1-30"),
            });
        }
        Ok(Self {
            year,
            month,
            leap,
            day,
        })
    }

    /// Total order where the leap instance of a month number sorts
    /// before the ordinary instance; day of month is the last tie-break.
    pub fn cmp_leap_first(&self, other: &Self) -> Ordering {
        (self.year, self.month, Reverse(self.leap), self.day).cmp(&(
            other.year,
            other.month,
            Reverse(other.leap),
            other.day,
        ))
    }

    /// Total order where the ordinary instance sorts first; this is
    /// chronological order and identical to the derived `Ord`.
    pub fn cmp_leap_last(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl fmt::Display for LunarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.leap {
            write!(f, "{:04}-윤{:02}-{:02}", self.year, self.month, self.day)
        } else {
            write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
        }
    }
}

/// Solar half of a record, including the redundant derived fields.
///
/// Built through [`SolarFields::from_date`] so the derived fields can
/// never be stale relative to year/month/day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolarFields {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub leap_year: bool,
    pub weekday: Weekday,
    pub julian_day: i64,
}

impl SolarFields {
    /// Derives the whole field group from a date in one step.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
            leap_year: is_gregorian_leap_year(date.year()),
            weekday: date.weekday(),
            julian_day: julian_day(date),
        }
    }

    pub fn to_date(&self) -> Result<NaiveDate, Error> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day).ok_or_else(|| {
            Error::MalformedField {
                field: "solDay",
                reason: format!(
                    "{:04}-{:02}-{:02} is not a calendar date",
                    self.year, self.month, self.day
                ),
            }
        })
    }

    /// True when the stored leap-year flag matches the Gregorian rule.
    pub fn leap_year_consistent(&self) -> bool {
        self.leap_year == is_gregorian_leap_year(self.year)
    }

    /// True when the stored weekday is the weekday of the date.
    pub fn weekday_consistent(&self) -> bool {
        self.to_date().is_ok_and(|date| date.weekday() == self.weekday)
    }

    /// True when the stored Julian day is the day number of the date.
    pub fn julian_day_consistent(&self) -> bool {
        self.to_date().is_ok_and(|date| julian_day(date) == self.julian_day)
    }
}

/// Lunar half of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LunarFields {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub leap_month: bool,
    /// Length of this lunar month in days (29 or 30), when reported.
    pub month_days: Option<u32>,
}

impl LunarFields {
    pub fn from_date(date: LunarDate) -> Self {
        Self {
            year: date.year,
            month: date.month,
            day: date.day,
            leap_month: date.leap,
            month_days: None,
        }
    }

    pub fn to_date(&self) -> Result<LunarDate, Error> {
        LunarDate::new(self.year, self.month, self.leap_month, self.day)
    }
}

/// One solar/lunar correspondence record.
///
/// Either field group may be absent on a synthesized item
/// ([`CalendarItem::from_solar_date`] fills only the solar group);
/// records decoded from the service always carry both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalendarItem {
    pub solar: Option<SolarFields>,
    pub lunar: Option<LunarFields>,
    /// Sexagenary label of the lunar year (`lunSecha`).
    pub year_label: Option<SexagenaryLabel>,
    /// Sexagenary label of the lunar month (`lunWolgeon`); the service
    /// sends it blank for leap months.
    pub month_label: Option<SexagenaryLabel>,
    /// Sexagenary label of the day (`lunIljin`).
    pub day_label: Option<SexagenaryLabel>,
}

impl CalendarItem {
    /// Item with the solar group fully derived from `date`.
    pub fn from_solar_date(date: NaiveDate) -> Self {
        Self {
            solar: Some(SolarFields::from_date(date)),
            ..Self::default()
        }
    }

    /// Item with the lunar group taken from `date`.
    pub fn from_lunar_date(date: LunarDate) -> Self {
        Self {
            lunar: Some(LunarFields::from_date(date)),
            ..Self::default()
        }
    }

    /// Returns the item with its solar group rebuilt from `date`.
    ///
    /// The whole group is replaced in one step, so the derived fields
    /// can never be stale relative to the new date.
    pub fn with_solar_date(mut self, date: NaiveDate) -> Self {
        self.solar = Some(SolarFields::from_date(date));
        self
    }

    /// Returns the item with its lunar group rebuilt from `date`.
    pub fn with_lunar_date(mut self, date: LunarDate) -> Self {
        self.lunar = Some(LunarFields::from_date(date));
        self
    }

    pub fn to_solar_date(&self) -> Result<NaiveDate, Error> {
        self.solar
            .as_ref()
            .ok_or(Error::MissingField("solYear"))?
            .to_date()
    }

    pub fn to_lunar_date(&self) -> Result<LunarDate, Error> {
        self.lunar
            .as_ref()
            .ok_or(Error::MissingField("lunYear"))?
            .to_date()
    }

    /// Solar-date key, usable for de-duplication across pages.
    pub fn solar_key(&self) -> Option<(i32, u32, u32)> {
        self.solar.as_ref().map(|solar| (solar.year, solar.month, solar.day))
    }

    /// Lunar-date key, the alternate de-duplication key.
    pub fn lunar_key(&self) -> Option<LunarDate> {
        self.lunar.as_ref().and_then(|lunar| lunar.to_date().ok())
    }

    /// Orders by lunar date with the leap instance of a month number
    /// first; items without a usable lunar group sort first.
    pub fn cmp_lunar_leap_first(&self, other: &Self) -> Ordering {
        match (self.lunar_key(), other.lunar_key()) {
            (Some(a), Some(b)) => a.cmp_leap_first(&b),
            (a, b) => a.is_some().cmp(&b.is_some()),
        }
    }

    /// Orders by lunar date chronologically (ordinary month before the
    /// leap month of the same number).
    pub fn cmp_lunar_leap_last(&self, other: &Self) -> Ordering {
        match (self.lunar_key(), other.lunar_key()) {
            (Some(a), Some(b)) => a.cmp_leap_last(&b),
            (a, b) => a.is_some().cmp(&b.is_some()),
        }
    }

    /// Orders by solar date only; items without a solar group sort
    /// first.
    pub fn cmp_solar(&self, other: &Self) -> Ordering {
        self.solar_key().cmp(&other.solar_key())
    }
}
