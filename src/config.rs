use crate::dates::DateFormat;
use std::num::NonZeroUsize;
use std::str::FromStr;
use thiserror::Error;

const DEFAULT_MONTHS: NonZeroUsize = NonZeroUsize::MIN.saturating_add(2);

/// Settings for one picker attached to a start-date field.
///
/// Selectors are field names in the host form.  A selector that names no
/// field leaves the corresponding feature inert.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Options {
    /// Field receiving the inclusive number of days in the range
    pub(crate) days_field: Option<String>,
    /// Field receiving the last date of the range
    pub(crate) end_field: Option<String>,
    /// Format used when writing dates, and tried first when reading them
    pub(crate) format: DateFormat,
    /// Number of months visible in the panel at once
    pub(crate) months: NonZeroUsize,
    /// Whether days after today are unselectable
    pub(crate) no_future: bool,
    /// Field under which the panel is docked; defaults to the start field
    pub(crate) container: Option<String>,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            days_field: None,
            end_field: None,
            format: DateFormat::Iso,
            months: DEFAULT_MONTHS,
            no_future: true,
            container: None,
        }
    }
}

/// A `NAME=VALUE` pre-fill for one form field
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Assignment {
    pub(crate) name: String,
    pub(crate) value: String,
}

impl FromStr for Assignment {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Assignment, ParseOptionError> {
        let Some((name, value)) = s.split_once('=') else {
            return Err(ParseOptionError::NoEquals);
        };
        let name = name.trim();
        if name.is_empty() {
            return Err(ParseOptionError::EmptyName);
        }
        Ok(Assignment {
            name: name.to_owned(),
            value: value.to_owned(),
        })
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum ParseOptionError {
    #[error("expected NAME=VALUE")]
    NoEquals,
    #[error("field name is empty")]
    EmptyName,
}
