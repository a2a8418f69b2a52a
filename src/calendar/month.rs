use crate::dates::floor_to_month;
use std::iter::successors;
use time::{Date, Weekday, Weekday::*};

const DAYS_IN_WEEK: usize = 7;

/// Single-letter weekday labels, Sunday first
pub(crate) static WEEKDAY_LABELS: [&str; DAYS_IN_WEEK] = ["S", "M", "T", "W", "T", "F", "S"];

pub(crate) trait WeekdayExt {
    fn index0(&self) -> u16;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> u16 {
        self.number_days_from_sunday().into()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum DayKind {
    /// Belongs to an adjacent month; shown only to fill out the grid
    Overflow,
    /// After today while future dates are disallowed
    Future,
    Selectable,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct DayCell {
    pub(crate) date: Date,
    pub(crate) kind: DayKind,
    pub(crate) is_today: bool,
}

impl DayCell {
    pub(crate) fn is_interactive(&self) -> bool {
        self.kind == DayKind::Selectable
    }

    pub(crate) fn show(&self) -> String {
        format!("{:2}", self.date.day())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
// Invariant: At least one element of the array is Some
pub(crate) struct Week([Option<DayCell>; DAYS_IN_WEEK]);

impl Week {
    fn new(cell: DayCell) -> Self {
        let mut this = Week([None; DAYS_IN_WEEK]);
        this.set(cell);
        this
    }

    fn set(&mut self, cell: DayCell) {
        let i = usize::from(cell.date.weekday().index0());
        assert!(i < DAYS_IN_WEEK, "weekday index should be less than seven");
        self.0[i] = Some(cell);
    }

    pub(crate) fn get(&self, wd: Weekday) -> Option<DayCell> {
        self.0.get(usize::from(wd.index0())).copied().flatten()
    }

    pub(crate) fn enumerate(&self) -> EnumerateWeek<'_> {
        EnumerateWeek::new(self)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct EnumerateWeek<'a> {
    week: &'a Week,
    next_weekday: Option<Weekday>,
}

impl<'a> EnumerateWeek<'a> {
    fn new(week: &'a Week) -> Self {
        EnumerateWeek {
            week,
            next_weekday: Some(Sunday),
        }
    }
}

impl Iterator for EnumerateWeek<'_> {
    type Item = (Weekday, DayCell);

    fn next(&mut self) -> Option<(Weekday, DayCell)> {
        loop {
            let wd = self.next_weekday?;
            self.next_weekday = match wd.next() {
                Sunday => None,
                wd2 => Some(wd2),
            };
            if let Some(cell) = self.week.get(wd) {
                return Some((wd, cell));
            }
        }
    }
}

/// The logical grid of one calendar month: whole weeks from the Sunday on
/// or before the 1st through the Saturday on or after the last day
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MonthGrid {
    anchor: Date,
    weeks: Vec<Week>,
}

impl MonthGrid {
    pub(crate) fn anchor(&self) -> Date {
        self.anchor
    }

    /// The month name, with the year appended for January only
    pub(crate) fn title(&self) -> String {
        let month = self.anchor.month();
        if month == time::Month::January {
            format!("{month} {}", self.anchor.year())
        } else {
            month.to_string()
        }
    }

    pub(crate) fn weeks(&self) -> &[Week] {
        &self.weeks
    }

    pub(crate) fn cells(&self) -> impl Iterator<Item = DayCell> + '_ {
        self.weeks
            .iter()
            .flat_map(|w| w.enumerate().map(|(_, cell)| cell))
    }

    /// Days that accept clicks and carry a range marker
    pub(crate) fn selectable_days(&self) -> impl Iterator<Item = Date> + '_ {
        self.cells()
            .filter(DayCell::is_interactive)
            .map(|cell| cell.date)
    }
}

/// Builds month grids relative to a fixed "today"
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct MonthFactory {
    today: Date,
    no_future: bool,
}

impl MonthFactory {
    pub(crate) fn new(today: Date, no_future: bool) -> Self {
        MonthFactory { today, no_future }
    }

    pub(crate) fn today(&self) -> Date {
        self.today
    }

    pub(crate) fn no_future(&self) -> bool {
        self.no_future
    }

    /// Builds the grid for the month containing `date`, which may be any
    /// day of the month
    pub(crate) fn build(&self, date: Date) -> MonthGrid {
        let anchor = floor_to_month(date);
        let lead = usize::from(anchor.weekday().index0());
        let start = iter_days_before(anchor).take(lead).last().unwrap_or(anchor);
        let mut weeks = Vec::with_capacity(6);
        let mut week: Option<Week> = None;
        for date in successors(Some(start), |&d| d.next_day()) {
            if date > anchor && !same_month(date, anchor) && date.weekday() == Sunday {
                break;
            }
            let cell = self.classify(date, anchor);
            match week.as_mut() {
                Some(w) => w.set(cell),
                None => week = Some(Week::new(cell)),
            }
            if date.weekday() == Saturday {
                weeks.extend(week.take());
            }
        }
        // Only reached with a partial week at the end of time
        weeks.extend(week);
        MonthGrid { anchor, weeks }
    }

    fn classify(&self, date: Date, anchor: Date) -> DayCell {
        let kind = if !same_month(date, anchor) {
            DayKind::Overflow
        } else if self.no_future && date > self.today {
            DayKind::Future
        } else {
            DayKind::Selectable
        };
        DayCell {
            date,
            kind,
            is_today: kind != DayKind::Overflow && date == self.today,
        }
    }
}

fn same_month(a: Date, b: Date) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

fn iter_days_before(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.previous_day()).skip(1)
}
