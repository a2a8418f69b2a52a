use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use thiserror::Error;
use time::{
    format_description::{well_known::Rfc3339, BorrowedFormatItem},
    macros::format_description,
    Date, Duration, Month, OffsetDateTime, UtcOffset,
};
use tracing::trace;

/// Shapes accepted by the native parser, tried in order
static NATIVE_SHAPES: &[&[BorrowedFormatItem<'_>]] = &[
    format_description!("[month padding:none]/[day padding:none]/[year padding:none]"),
    format_description!("[month repr:short case_sensitive:false] [day padding:none], [year]"),
    format_description!("[month repr:long case_sensitive:false] [day padding:none], [year]"),
    format_description!(
        "[weekday repr:short case_sensitive:false] [month repr:short case_sensitive:false] [day] [year]"
    ),
];

/// More days than separate `Date::MIN` from `Date::MAX`
const MAX_SHIFT_DAYS: i64 = 10_000_000;

/// Source of the current date.  Everything that compares against "today"
/// goes through this so that tests can pin the date.
pub(crate) trait Clock {
    fn today(&self) -> Date;
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct LocalClock {
    offset: UtcOffset,
}

impl LocalClock {
    // The offset has to be looked up before any other threads are spawned,
    // as `time` refuses to read it from a multithreaded process on Unix.
    pub(crate) fn new(offset: UtcOffset) -> LocalClock {
        LocalClock { offset }
    }
}

impl Clock for LocalClock {
    fn today(&self) -> Date {
        floor_to_day(OffsetDateTime::now_utc().to_offset(self.offset))
    }
}

#[cfg(test)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct FixedClock(pub(crate) Date);

#[cfg(test)]
impl Clock for FixedClock {
    fn today(&self) -> Date {
        self.0
    }
}

pub(crate) fn floor_to_day(when: OffsetDateTime) -> Date {
    when.date()
}

pub(crate) fn floor_to_month(date: Date) -> Date {
    date.replace_day(1).unwrap_or(date)
}

/// Returns the first day of the month after the one containing `date`, or
/// `None` at the end of time
pub(crate) fn next_month(date: Date) -> Option<Date> {
    let month = date.month().next();
    let year = if month == Month::January {
        date.year().checked_add(1)?
    } else {
        date.year()
    };
    Date::from_calendar_date(year, month, 1).ok()
}

/// Returns the first day of the month before the one containing `date`, or
/// `None` at the start of time
pub(crate) fn previous_month(date: Date) -> Option<Date> {
    let month = date.month().previous();
    let year = if month == Month::December {
        date.year().checked_sub(1)?
    } else {
        date.year()
    };
    Date::from_calendar_date(year, month, 1).ok()
}

pub(crate) fn days_between(from: Date, to: Date) -> i64 {
    (to - from).whole_days()
}

/// Shifts `date` by `days`, saturating at the ends of the representable
/// range
pub(crate) fn shift_days(date: Date, days: i64) -> Date {
    let days = days.clamp(-MAX_SHIFT_DAYS, MAX_SHIFT_DAYS);
    match date.checked_add(Duration::days(days)) {
        Some(d) => d,
        None if days < 0 => Date::MIN,
        None => Date::MAX,
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) enum DateFormat {
    /// The host's short date, e.g. `3/7/2024`
    Native,
    /// `YYYY-MM-DD`
    #[default]
    Iso,
}

impl DateFormat {
    pub(crate) fn parse(self, text: &str) -> Result<Date, ParseDateError> {
        match self {
            DateFormat::Iso => parse_iso(text),
            DateFormat::Native => parse_native(text),
        }
    }

    pub(crate) fn format(self, date: Date) -> String {
        match self {
            DateFormat::Iso => format!(
                "{:04}-{:02}-{:02}",
                date.year(),
                u8::from(date.month()),
                date.day()
            ),
            DateFormat::Native => {
                format!("{}/{}/{}", u8::from(date.month()), date.day(), date.year())
            }
        }
    }

    fn name(self) -> &'static str {
        match self {
            DateFormat::Native => "native",
            DateFormat::Iso => "iso",
        }
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DateFormat {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<DateFormat, ParseFormatError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "iso" => Ok(DateFormat::Iso),
            "native" | "js" => Ok(DateFormat::Native),
            _ => Err(ParseFormatError(s.to_owned())),
        }
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unknown date format {0:?}; expected \"iso\" or \"native\"")]
pub(crate) struct ParseFormatError(String);

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum ParseDateError {
    #[error("expected three dash-separated components")]
    Shape,
    #[error("invalid number in date")]
    Number(#[from] ParseIntError),
    #[error("date does not exist")]
    Range(#[from] time::error::ComponentRange),
    #[error("text does not match any known date shape")]
    Unrecognized,
}

fn parse_iso(text: &str) -> Result<Date, ParseDateError> {
    let mut parts = text.trim().split('-').map(str::trim);
    let (Some(year), Some(month), Some(day), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(ParseDateError::Shape);
    };
    let year = year.parse::<i32>()?;
    let month = Month::try_from(month.parse::<u8>()?)?;
    let day = day.parse::<u8>()?;
    Ok(Date::from_calendar_date(year, month, day)?)
}

fn parse_native(text: &str) -> Result<Date, ParseDateError> {
    let text = text.trim();
    NATIVE_SHAPES
        .iter()
        .find_map(|shape| Date::parse(text, *shape).ok())
        .or_else(|| {
            OffsetDateTime::parse(text, &Rfc3339)
                .ok()
                .map(floor_to_day)
        })
        .ok_or(ParseDateError::Unrecognized)
}

/// Ordered list of formats consulted when reading a field.  The preferred
/// format is always tried first; the rest follow in registration order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct FormatRegistry {
    formats: Vec<DateFormat>,
}

impl FormatRegistry {
    pub(crate) fn new(formats: Vec<DateFormat>) -> FormatRegistry {
        FormatRegistry { formats }
    }

    pub(crate) fn parse_date(&self, text: &str, preferred: DateFormat) -> Option<Date> {
        if text.trim().is_empty() {
            return None;
        }
        std::iter::once(preferred)
            .chain(self.formats.iter().copied().filter(|&f| f != preferred))
            .find_map(|format| match format.parse(text) {
                Ok(date) => Some(date),
                Err(e) => {
                    trace!(%format, text, error = %e, "date parser rejected input");
                    None
                }
            })
    }
}

impl Default for FormatRegistry {
    fn default() -> FormatRegistry {
        FormatRegistry::new(vec![DateFormat::Iso, DateFormat::Native])
    }
}
