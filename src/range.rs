use crate::dates::{days_between, shift_days, DateFormat};
use time::Date;

/// The user's selection.  `last` is `None` while waiting for the second
/// click.
///
/// Invariant: when `last` is present, `first <= last`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Range {
    first: Date,
    last: Option<Date>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Phase {
    /// Only a start day has been picked
    PendingEnd,
    /// Both ends are set
    Closed,
}

/// Field contents read when the picker opens
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Seed {
    pub(crate) start: Option<Date>,
    pub(crate) end: Option<Date>,
    /// Raw day count; `None` when no day-count field is bound
    pub(crate) days: Option<i64>,
}

/// Values to write back into the bound fields after a transition
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct FieldUpdate {
    pub(crate) start: String,
    pub(crate) days: String,
    pub(crate) end: String,
}

impl Range {
    /// Creates a closed range, swapping the ends if they are out of order
    pub(crate) fn new(first: Date, last: Date) -> Range {
        Range {
            first: first.min(last),
            last: Some(first.max(last)),
        }
    }

    /// Derives the initial range from whatever the fields held.
    ///
    /// A day count (at least 1) fills in whichever boundary is missing,
    /// counting back from `today` when neither is set.  Without a day count,
    /// each missing boundary defaults to `today`.
    pub(crate) fn seed(seed: Seed, today: Date) -> Range {
        let Seed { start, end, days } = seed;
        let span = days.map_or(0, |d| d.max(1) - 1);
        let (first, last) = match (start, end, days) {
            (Some(first), Some(last), _) => (first, last),
            (Some(first), None, Some(_)) => (first, shift_days(first, span)),
            (None, last, Some(_)) => {
                let last = last.unwrap_or(today);
                (shift_days(last, -span), last)
            }
            (first, last, None) => (first.unwrap_or(today), last.unwrap_or(today)),
        };
        Range::new(first, last)
    }

    pub(crate) fn first(&self) -> Date {
        self.first
    }

    pub(crate) fn last(&self) -> Option<Date> {
        self.last
    }

    pub(crate) fn phase(&self) -> Phase {
        if self.last.is_some() {
            Phase::Closed
        } else {
            Phase::PendingEnd
        }
    }

    /// Applies a click on `date`.  A click after a completed range starts a
    /// new one; otherwise it closes the pending range, putting the ends in
    /// order.
    pub(crate) fn click(&mut self, date: Date) {
        match self.phase() {
            Phase::Closed => {
                self.first = date;
                self.last = None;
            }
            Phase::PendingEnd if date < self.first => {
                self.last = Some(self.first);
                self.first = date;
            }
            Phase::PendingEnd => self.last = Some(date),
        }
    }

    /// Whether a day cell for `date` should be highlighted
    pub(crate) fn contains(&self, date: Date) -> bool {
        self.first == date || self.last.is_some_and(|last| self.first <= date && date <= last)
    }

    /// Inclusive number of days; 1 while the end is pending
    pub(crate) fn day_count(&self) -> i64 {
        self.last
            .map_or(1, |last| days_between(self.first, last) + 1)
    }

    /// The effective end date: `last`, or `first` while the end is pending
    pub(crate) fn end(&self) -> Date {
        self.last.unwrap_or(self.first)
    }

    pub(crate) fn field_update(&self, format: DateFormat) -> FieldUpdate {
        FieldUpdate {
            start: format.format(self.first),
            days: self.day_count().to_string(),
            end: format.format(self.end()),
        }
    }
}

/// Reads a day-count field leniently: anything unparseable counts as zero
pub(crate) fn parse_day_count(text: &str) -> i64 {
    text.trim().parse::<i64>().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    const TODAY: Date = date!(2024 - 03 - 15);

    #[test]
    fn test_seed_start_and_days() {
        let range = Range::seed(
            Seed {
                start: Some(date!(2024 - 03 - 15)),
                end: None,
                days: Some(5),
            },
            TODAY,
        );
        assert_eq!(range.first(), date!(2024 - 03 - 15));
        assert_eq!(range.last(), Some(date!(2024 - 03 - 19)));
        assert_eq!(range.day_count(), 5);
    }

    #[test]
    fn test_seed_end_and_days() {
        let range = Range::seed(
            Seed {
                start: None,
                end: Some(date!(2024 - 03 - 10)),
                days: Some(3),
            },
            TODAY,
        );
        assert_eq!(range.first(), date!(2024 - 03 - 08));
        assert_eq!(range.last(), Some(date!(2024 - 03 - 10)));
    }

    #[test]
    fn test_seed_days_only_ends_today() {
        let range = Range::seed(
            Seed {
                start: None,
                end: None,
                days: Some(7),
            },
            TODAY,
        );
        assert_eq!(range.first(), date!(2024 - 03 - 09));
        assert_eq!(range.last(), Some(TODAY));
    }

    #[test]
    fn test_seed_day_count_at_least_one() {
        for days in [0, -4] {
            let range = Range::seed(
                Seed {
                    start: Some(date!(2024 - 03 - 01)),
                    end: None,
                    days: Some(days),
                },
                TODAY,
            );
            assert_eq!(range.first(), date!(2024 - 03 - 01));
            assert_eq!(range.last(), Some(date!(2024 - 03 - 01)));
        }
    }

    #[test]
    fn test_seed_nothing() {
        let range = Range::seed(Seed::default(), TODAY);
        assert_eq!(range.first(), TODAY);
        assert_eq!(range.last(), Some(TODAY));
        assert_eq!(range.phase(), Phase::Closed);
    }

    #[test]
    fn test_seed_start_without_days_field_runs_to_today() {
        let range = Range::seed(
            Seed {
                start: Some(date!(2024 - 01 - 20)),
                end: None,
                days: None,
            },
            TODAY,
        );
        assert_eq!(range.first(), date!(2024 - 01 - 20));
        assert_eq!(range.last(), Some(TODAY));
    }

    #[test]
    fn test_seed_future_start_without_days_field_is_swapped() {
        let range = Range::seed(
            Seed {
                start: Some(date!(2024 - 03 - 20)),
                end: None,
                days: None,
            },
            TODAY,
        );
        assert_eq!(range.first(), TODAY);
        assert_eq!(range.last(), Some(date!(2024 - 03 - 20)));
    }

    #[test]
    fn test_seed_end_without_days_field_starts_today() {
        let range = Range::seed(
            Seed {
                start: None,
                end: Some(date!(2024 - 03 - 10)),
                days: None,
            },
            date!(2024 - 03 - 01),
        );
        assert_eq!(range.first(), date!(2024 - 03 - 01));
        assert_eq!(range.last(), Some(date!(2024 - 03 - 10)));
        assert_eq!(range.day_count(), 10);
    }

    #[test]
    fn test_seed_both_ends_win_over_days() {
        let range = Range::seed(
            Seed {
                start: Some(date!(2024 - 03 - 01)),
                end: Some(date!(2024 - 03 - 04)),
                days: Some(30),
            },
            TODAY,
        );
        assert_eq!(range.day_count(), 4);
    }

    #[test]
    fn test_seed_reversed_fields_are_swapped() {
        let range = Range::seed(
            Seed {
                start: Some(date!(2024 - 03 - 10)),
                end: Some(date!(2024 - 03 - 02)),
                days: None,
            },
            TODAY,
        );
        assert_eq!(range.first(), date!(2024 - 03 - 02));
        assert_eq!(range.last(), Some(date!(2024 - 03 - 10)));
    }

    #[test]
    fn test_click_after_closed_starts_new_range() {
        for d in [
            date!(2024 - 01 - 01),
            date!(2024 - 03 - 05),
            date!(2024 - 03 - 09),
            date!(2024 - 06 - 30),
        ] {
            let mut range = Range::new(date!(2024 - 03 - 05), date!(2024 - 03 - 09));
            range.click(d);
            assert_eq!(range.phase(), Phase::PendingEnd);
            assert_eq!(range.first(), d);
            assert_eq!(range.last(), None);
            assert_eq!(range.day_count(), 1);
            assert_eq!(range.end(), d);
        }
    }

    #[test]
    fn test_click_before_pending_start_swaps() {
        let mut range = Range::new(TODAY, TODAY);
        range.click(date!(2024 - 03 - 12));
        range.click(date!(2024 - 03 - 02));
        assert_eq!(range.phase(), Phase::Closed);
        assert_eq!(range.first(), date!(2024 - 03 - 02));
        assert_eq!(range.last(), Some(date!(2024 - 03 - 12)));
    }

    #[test]
    fn test_click_after_pending_start() {
        let mut range = Range::new(TODAY, TODAY);
        range.click(date!(2024 - 03 - 10));
        range.click(date!(2024 - 03 - 20));
        assert_eq!(range.first(), date!(2024 - 03 - 10));
        assert_eq!(range.last(), Some(date!(2024 - 03 - 20)));
        assert_eq!(range.day_count(), 11);
    }

    #[test]
    fn test_click_same_day_twice() {
        let mut range = Range::new(TODAY, TODAY);
        range.click(date!(2024 - 03 - 10));
        range.click(date!(2024 - 03 - 10));
        assert_eq!(range.phase(), Phase::Closed);
        assert_eq!(range.last(), Some(date!(2024 - 03 - 10)));
        assert_eq!(range.day_count(), 1);
    }

    #[test]
    fn test_contains() {
        let mut range = Range::new(date!(2024 - 03 - 10), date!(2024 - 03 - 12));
        assert!(!range.contains(date!(2024 - 03 - 09)));
        assert!(range.contains(date!(2024 - 03 - 10)));
        assert!(range.contains(date!(2024 - 03 - 11)));
        assert!(range.contains(date!(2024 - 03 - 12)));
        assert!(!range.contains(date!(2024 - 03 - 13)));
        range.click(date!(2024 - 03 - 20));
        assert!(range.contains(date!(2024 - 03 - 20)));
        assert!(!range.contains(date!(2024 - 03 - 21)));
        assert!(!range.contains(date!(2024 - 03 - 11)));
    }

    #[test]
    fn test_field_update() {
        let mut range = Range::new(date!(2024 - 03 - 10), date!(2024 - 03 - 20));
        assert_eq!(
            range.field_update(DateFormat::Iso),
            FieldUpdate {
                start: String::from("2024-03-10"),
                days: String::from("11"),
                end: String::from("2024-03-20"),
            }
        );
        range.click(date!(2024 - 04 - 02));
        assert_eq!(
            range.field_update(DateFormat::Native),
            FieldUpdate {
                start: String::from("4/2/2024"),
                days: String::from("1"),
                end: String::from("4/2/2024"),
            }
        );
    }

    #[test]
    fn test_parse_day_count() {
        assert_eq!(parse_day_count("5"), 5);
        assert_eq!(parse_day_count(" 12 "), 12);
        assert_eq!(parse_day_count(""), 0);
        assert_eq!(parse_day_count("five"), 0);
    }
}
