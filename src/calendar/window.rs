use super::month::{MonthFactory, MonthGrid};
use crate::dates::{floor_to_month, next_month, previous_month};
use crate::range::Range;
use std::collections::VecDeque;
use std::num::NonZeroUsize;
use thiserror::Error;
use time::Date;

/// Fewest months generated when the panel opens
const MIN_INITIAL_MONTHS: usize = 3;

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MonthEntry {
    pub(crate) anchor: Date,
    pub(crate) view: MonthGrid,
}

impl MonthEntry {
    fn new(view: MonthGrid) -> Self {
        MonthEntry {
            anchor: view.anchor(),
            view,
        }
    }
}

/// A chronological list of generated months plus the window of `visible`
/// months starting at `scroll_index` that is currently on screen.  The list
/// only ever grows, and only at its ends.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct MonthWindow {
    months: VecDeque<MonthEntry>,
    scroll_index: usize,
    visible: NonZeroUsize,
}

impl MonthWindow {
    /// Generates months from the one containing the end of `range`
    /// backwards for as long as each month starts on or after the first day
    /// of `range`, producing at least three (and at least `visible`) months,
    /// and scrolls so that the window ends on the latest month.
    ///
    /// A month that starts before the first day is only generated to make
    /// up the minimum count.
    pub(crate) fn spanning(range: &Range, visible: NonZeroUsize, factory: &MonthFactory) -> Self {
        let first = range.first();
        let want = visible.get().max(MIN_INITIAL_MONTHS);
        let mut months = VecDeque::with_capacity(want);
        let mut cursor = Some(floor_to_month(range.end()));
        while let Some(anchor) = cursor {
            if anchor < first && months.len() >= want {
                break;
            }
            months.push_front(MonthEntry::new(factory.build(anchor)));
            cursor = previous_month(anchor);
        }
        let scroll_index = months.len().saturating_sub(visible.get());
        MonthWindow {
            months,
            scroll_index,
            visible,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.months.len()
    }

    pub(crate) fn scroll_index(&self) -> usize {
        self.scroll_index
    }

    pub(crate) fn months(&self) -> impl Iterator<Item = &MonthEntry> {
        self.months.iter()
    }

    pub(crate) fn grids(&self) -> impl Iterator<Item = &MonthGrid> {
        self.months.iter().map(|m| &m.view)
    }

    #[cfg(test)]
    pub(crate) fn visible_months(&self) -> impl Iterator<Item = &MonthEntry> {
        self.months.iter().skip(self.scroll_index).take(self.visible.get())
    }

    /// Horizontal distance from the start of the month list to the month at
    /// the left edge of the window, given the width each month occupies
    pub(crate) fn viewport_offset(&self, month_stride: usize) -> usize {
        self.scroll_index.saturating_mul(month_stride)
    }

    /// Moves the window one month into the past, generating a new earliest
    /// month if the window is already at the start of the list
    pub(crate) fn scroll_left(&mut self, factory: &MonthFactory) -> Result<(), ScrollError> {
        if let Some(i) = self.scroll_index.checked_sub(1) {
            self.scroll_index = i;
        } else {
            let earliest = self.months.front().map(|m| m.anchor);
            let anchor = earliest.and_then(previous_month).ok_or(ScrollError::OutOfTime)?;
            self.months.push_front(MonthEntry::new(factory.build(anchor)));
        }
        Ok(())
    }

    /// Moves the window one month into the future, generating a new latest
    /// month if the window would run past the end of the list
    pub(crate) fn scroll_right(&mut self, factory: &MonthFactory) -> Result<(), ScrollError> {
        if !self.right_visible(factory) {
            return Err(ScrollError::FutureBound);
        }
        let scroll_index = self.scroll_index + 1;
        if scroll_index + self.visible.get() > self.months.len() {
            let latest = self.months.back().map(|m| m.anchor);
            let anchor = latest.and_then(next_month).ok_or(ScrollError::OutOfTime)?;
            self.months.push_back(MonthEntry::new(factory.build(anchor)));
        }
        self.scroll_index = scroll_index;
        Ok(())
    }

    /// Whether the scroll-right control is offered.  With future dates
    /// disallowed, it is hidden once the month after the last visible one
    /// starts after today.
    pub(crate) fn right_visible(&self, factory: &MonthFactory) -> bool {
        if !factory.no_future() {
            return true;
        }
        let last_visible = (self.scroll_index + self.visible.get())
            .min(self.months.len())
            .checked_sub(1)
            .and_then(|i| self.months.get(i));
        last_visible
            .and_then(|m| next_month(m.anchor))
            .is_some_and(|d| d <= factory.today())
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum ScrollError {
    #[error("no selectable days lie beyond this month")]
    FutureBound,
    #[error("reached the end of time")]
    OutOfTime,
}
