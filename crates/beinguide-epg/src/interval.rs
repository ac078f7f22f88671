//! Clock ranges scraped as `"H:MM - H:MM"` and their UTC timestamps.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveTime, Timelike, Utc};
use regex::Regex;

/// Regex for the raw time range text shown next to each program.
#[allow(clippy::expect_used)]
static TIME_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\p{Nd}{1,2}):(\p{Nd}{1,2}) - (\p{Nd}{1,2}):(\p{Nd}{1,2})$")
        .expect("failed to compile time range regex")
});

/// Failure to turn scraped clock text into a `TimeInterval`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeRangeError {
    /// The text is not two `H:MM` pairs separated by `" - "`.
    Malformed(String),
    /// A component is not a number.
    InvalidComponent {
        /// Component name (e.g. `"start hour"`).
        component: &'static str,
        /// Raw text of the component.
        value: String,
    },
    /// A component is outside its clock range.
    OutOfRange {
        /// Component name (e.g. `"end minute"`).
        component: &'static str,
        /// Parsed value.
        value: u32,
    },
    /// The day after the date cannot be represented.
    DateOutOfRange(NaiveDate),
}

impl std::fmt::Display for TimeRangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(text) => write!(f, "malformed time range: {text:?}"),
            Self::InvalidComponent { component, value } => {
                write!(f, "{component} is not numeric: {value:?}")
            }
            Self::OutOfRange { component, value } => {
                write!(f, "{component} out of range: {value}")
            }
            Self::DateOutOfRange(date) => write!(f, "date has no following day: {date}"),
        }
    }
}

impl std::error::Error for TimeRangeError {}

/// A clock range on the day being scraped, possibly rolling past midnight.
///
/// The date is the listing's day, not necessarily the day the program
/// ends on. Timestamps are derived on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeInterval {
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
}

/// Zero of each digit run accepted in clock text: ASCII, Arabic-Indic and
/// Extended Arabic-Indic (Persian).
const DIGIT_ZEROS: [char; 3] = ['0', '\u{0660}', '\u{06F0}'];

/// Decimal value of a digit from one of the `DIGIT_ZEROS` runs.
fn digit_value(c: char) -> Option<u32> {
    let code = u32::from(c);
    DIGIT_ZEROS
        .iter()
        .find_map(|zero| code.checked_sub(u32::from(*zero)).filter(|v| *v < 10))
}

/// Parses one clock component.
fn parse_component(component: &'static str, raw: &str) -> Result<u32, TimeRangeError> {
    let invalid = || TimeRangeError::InvalidComponent {
        component,
        value: String::from(raw),
    };
    let digits = raw.trim();
    if digits.is_empty() {
        return Err(invalid());
    }
    digits
        .chars()
        .try_fold(0_u32, |acc, c| acc.checked_mul(10)?.checked_add(digit_value(c)?))
        .ok_or_else(invalid)
}

/// Builds a clock time, reporting which component is out of range.
fn clock_time(
    (hour_name, hour): (&'static str, u32),
    (minute_name, minute): (&'static str, u32),
) -> Result<NaiveTime, TimeRangeError> {
    if hour >= 24 {
        return Err(TimeRangeError::OutOfRange {
            component: hour_name,
            value: hour,
        });
    }
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or(TimeRangeError::OutOfRange {
        component: minute_name,
        value: minute,
    })
}

impl TimeInterval {
    /// Creates an interval from numeric-bearing clock components.
    ///
    /// # Errors
    ///
    /// - `InvalidComponent` if a component is not numeric.
    /// - `OutOfRange` if an hour is not in `0..24` or a minute not in `0..60`.
    /// - `DateOutOfRange` if `date` is the last representable day.
    pub fn new(
        date: NaiveDate,
        start_hour: &str,
        start_minute: &str,
        end_hour: &str,
        end_minute: &str,
    ) -> Result<Self, TimeRangeError> {
        let start = clock_time(
            ("start hour", parse_component("start hour", start_hour)?),
            ("start minute", parse_component("start minute", start_minute)?),
        )?;
        let end = clock_time(
            ("end hour", parse_component("end hour", end_hour)?),
            ("end minute", parse_component("end minute", end_minute)?),
        )?;
        if date.succ_opt().is_none() {
            return Err(TimeRangeError::DateOutOfRange(date));
        }
        Ok(Self { date, start, end })
    }

    /// Parses a raw `"H:MM - H:MM"` range against the listing's date.
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns `Malformed` if the text does not match the format, or any
    /// error from [`TimeInterval::new`].
    pub fn parse(date: NaiveDate, text: &str) -> Result<Self, TimeRangeError> {
        let trimmed = text.trim();
        let caps = TIME_RANGE_RE
            .captures(trimmed)
            .ok_or_else(|| TimeRangeError::Malformed(String::from(trimmed)))?;
        let group = |i: usize| caps.get(i).map_or("", |m| m.as_str());
        Self::new(date, group(1), group(2), group(3), group(4))
    }

    /// Listing date the interval was scraped for.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Start hour (`0..24`).
    #[must_use]
    pub fn start_hour(&self) -> u32 {
        self.start.hour()
    }

    /// Start minute (`0..60`).
    #[must_use]
    pub fn start_minute(&self) -> u32 {
        self.start.minute()
    }

    /// End hour (`0..24`).
    #[must_use]
    pub fn end_hour(&self) -> u32 {
        self.end.hour()
    }

    /// End minute (`0..60`).
    #[must_use]
    pub fn end_minute(&self) -> u32 {
        self.end.minute()
    }

    /// Whether the program is taken to cross midnight.
    ///
    /// Compares hours only: `23:00 - 01:00` overlaps, `23:50 - 23:55`
    /// and `22:10 - 22:05` do not.
    #[must_use]
    pub fn day_overlap(&self) -> bool {
        self.start.hour() > self.end.hour()
    }

    /// Start of the program in UTC.
    #[must_use]
    pub fn start_timestamp(&self) -> DateTime<Utc> {
        self.date.and_time(self.start).and_utc()
    }

    /// End of the program in UTC, on the next day when `day_overlap()` holds.
    #[must_use]
    pub fn end_timestamp(&self) -> DateTime<Utc> {
        let end_date = if self.day_overlap() {
            // new() rejects dates without a successor.
            self.date.succ_opt().unwrap_or(self.date)
        } else {
            self.date
        };
        end_date.and_time(self.end).and_utc()
    }
}
