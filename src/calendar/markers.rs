use super::month::MonthGrid;
use crate::range::Range;
use std::collections::BTreeMap;
use time::Date;

/// Highlight state of every selectable day cell currently on the panel,
/// keyed by date.  Overflow and future cells have no marker.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Markers(BTreeMap<Date, bool>);

impl Markers {
    pub(crate) fn new() -> Self {
        Markers::default()
    }

    /// Discards all markers and registers one per selectable day of
    /// `grids`, unmarked
    pub(crate) fn rebuild<'a, I>(&mut self, grids: I)
    where
        I: IntoIterator<Item = &'a MonthGrid>,
    {
        self.0.clear();
        for grid in grids {
            self.0.extend(grid.selectable_days().map(|d| (d, false)));
        }
    }

    /// Re-evaluates every marker against `range`
    pub(crate) fn mark(&mut self, range: &Range) {
        for (&date, in_range) in &mut self.0 {
            *in_range = range.contains(date);
        }
    }

    pub(crate) fn contains(&self, date: Date) -> bool {
        self.0.contains_key(&date)
    }

    pub(crate) fn is_marked(&self, date: Date) -> bool {
        self.0.get(&date).copied().unwrap_or(false)
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }
}
