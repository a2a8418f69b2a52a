use crate::calendar::{Markers, MonthFactory, MonthWindow, ScrollError};
use crate::config::Options;
use crate::dates::{Clock, FormatRegistry};
use crate::form::Form;
use crate::range::{parse_day_count, Range, Seed};
use time::Date;
use tracing::debug;

/// Everything built when the panel opens and discarded when it closes
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct RangePickerState {
    range: Range,
    window: MonthWindow,
    markers: Markers,
}

impl RangePickerState {
    pub(crate) fn range(&self) -> &Range {
        &self.range
    }

    pub(crate) fn window(&self) -> &MonthWindow {
        &self.window
    }

    pub(crate) fn markers(&self) -> &Markers {
        &self.markers
    }

    fn remark(&mut self) {
        self.markers.mark(&self.range);
    }

    fn rebuild_markers(&mut self) {
        self.markers.rebuild(self.window.grids());
        self.remark();
    }
}

/// A drop-down date-range picker bound to a start-date field and,
/// optionally, day-count and end-date fields of a [`Form`]
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct DateRangePicker<C> {
    start_field: String,
    options: Options,
    formats: FormatRegistry,
    clock: C,
    state: Option<RangePickerState>,
}

impl<C: Clock> DateRangePicker<C> {
    pub(crate) fn new<S: Into<String>>(start_field: S, options: Options, clock: C) -> Self {
        DateRangePicker {
            start_field: start_field.into(),
            options,
            formats: FormatRegistry::default(),
            clock,
            state: None,
        }
    }

    pub(crate) fn options(&self) -> &Options {
        &self.options
    }

    pub(crate) fn start_field(&self) -> &str {
        &self.start_field
    }

    /// The field under which the panel is docked
    pub(crate) fn container(&self) -> &str {
        self.options
            .container
            .as_deref()
            .unwrap_or(&self.start_field)
    }

    pub(crate) fn is_open(&self) -> bool {
        self.state.is_some()
    }

    pub(crate) fn state(&self) -> Option<&RangePickerState> {
        self.state.as_ref()
    }

    /// Opens the panel if closed and closes it if open
    pub(crate) fn toggle(&mut self, form: &mut Form) {
        if self.is_open() {
            self.hide(form);
        } else {
            self.show(form);
        }
    }

    /// Reads the bound fields, builds the range, months & markers, locks
    /// the fields, and opens the panel.  Opening an already open panel
    /// rebuilds it from the fields.
    pub(crate) fn show(&mut self, form: &mut Form) {
        let factory = self.factory();
        let format = self.options.format;
        let start_text = form.value(&self.start_field);
        let end_text = self.bound_value(form, self.options.end_field.as_deref());
        let days_text = self.bound_value(form, self.options.days_field.as_deref());
        let seed = Seed {
            start: start_text.and_then(|t| self.formats.parse_date(t, format)),
            end: end_text.and_then(|t| self.formats.parse_date(t, format)),
            days: days_text.map(parse_day_count),
        };
        let blank_start = seed.start.is_none();
        let blank_end = seed.end.is_none();
        let blank_days = seed.days.is_some_and(|d| d < 1);
        let range = Range::seed(seed, factory.today());
        let window = MonthWindow::spanning(&range, self.options.months, &factory);
        debug!(
            first = %range.first(),
            last = ?range.last(),
            months = window.len(),
            "opening date range panel"
        );
        let mut state = RangePickerState {
            range,
            window,
            markers: Markers::new(),
        };
        state.rebuild_markers();
        // Fill in only what had to be derived; fields the user filled keep
        // their text until a day is clicked.
        let update = range.field_update(format);
        if blank_start {
            form.set_value(&self.start_field, update.start);
        }
        if blank_days {
            self.write(form, self.options.days_field.as_deref(), update.days);
        }
        if blank_end {
            self.write(form, self.options.end_field.as_deref(), update.end);
        }
        for name in self.bound_fields() {
            form.set_disabled(name, true);
        }
        self.state = Some(state);
    }

    /// Closes the panel, discarding the months & markers, and unlocks the
    /// fields.  Hiding a closed panel does nothing.
    pub(crate) fn hide(&mut self, form: &mut Form) {
        if self.state.take().is_some() {
            debug!("closing date range panel");
        }
        for name in self.bound_fields() {
            form.set_disabled(name, false);
        }
    }

    /// The close button: always leaves the panel closed
    pub(crate) fn close(&mut self, form: &mut Form) {
        self.hide(form);
    }

    /// Handles a click on the day cell for `date`, updating the range and
    /// writing it to the fields.  Returns `false` if the panel is closed or
    /// `date` is not a selectable day on it.
    pub(crate) fn click_day(&mut self, date: Date, form: &mut Form) -> bool {
        let Some(state) = self.state.as_mut() else {
            return false;
        };
        if !state.markers.contains(date) {
            return false;
        }
        state.range.click(date);
        state.remark();
        let range = state.range;
        debug!(first = %range.first(), last = ?range.last(), "range updated");
        let update = range.field_update(self.options.format);
        form.set_value(&self.start_field, update.start);
        self.write(form, self.options.days_field.as_deref(), update.days);
        self.write(form, self.options.end_field.as_deref(), update.end);
        true
    }

    pub(crate) fn scroll_left(&mut self) -> Result<(), ScrollError> {
        let factory = self.factory();
        if let Some(state) = self.state.as_mut() {
            state.window.scroll_left(&factory)?;
            state.rebuild_markers();
            debug!(
                scroll_index = state.window.scroll_index(),
                months = state.window.len(),
                selectable = state.markers.len(),
                "scrolled left"
            );
        }
        Ok(())
    }

    pub(crate) fn scroll_right(&mut self) -> Result<(), ScrollError> {
        let factory = self.factory();
        if let Some(state) = self.state.as_mut() {
            state.window.scroll_right(&factory)?;
            state.rebuild_markers();
            debug!(
                scroll_index = state.window.scroll_index(),
                months = state.window.len(),
                selectable = state.markers.len(),
                "scrolled right"
            );
        }
        Ok(())
    }

    /// Whether the scroll-right control should be offered
    pub(crate) fn right_visible(&self) -> bool {
        let factory = self.factory();
        self.state
            .as_ref()
            .is_some_and(|state| state.window.right_visible(&factory))
    }

    fn factory(&self) -> MonthFactory {
        MonthFactory::new(self.clock.today(), self.options.no_future)
    }

    fn bound_fields(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.start_field.as_str())
            .chain(self.options.days_field.as_deref())
            .chain(self.options.end_field.as_deref())
    }

    fn bound_value<'f>(&self, form: &'f Form, selector: Option<&str>) -> Option<&'f str> {
        let selector = selector?;
        let value = form.value(selector);
        if value.is_none() {
            debug!(selector, "selector matches no field; ignoring it");
        }
        value
    }

    fn write(&self, form: &mut Form, selector: Option<&str>, value: String) {
        if let Some(selector) = selector {
            if !form.set_value(selector, value) {
                debug!(selector, "selector matches no field; not writing");
            }
        }
    }
}
