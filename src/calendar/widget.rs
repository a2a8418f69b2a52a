use super::markers::Markers;
use super::month::{DayCell, DayKind, MonthGrid, WeekdayExt, WEEKDAY_LABELS};
use super::window::MonthWindow;
use crate::hits::{Hits, Target};
use crate::theme::{
    CLOSE_STYLE, DATE_STYLE, FUTURE_STYLE, INRANGE_STYLE, MONTH_NAME_STYLE, OVERFLOW_STYLE,
    PANEL_STYLE, SCROLL_STYLE, TODAY_STYLE, WEEKDAY_STYLE,
};
use ratatui::{prelude::*, widgets::*};
use std::num::NonZeroUsize;

/// Number of columns per day of week, including the gap after the day
const DAY_WIDTH: u16 = 3;

/// Width of a month grid in columns
pub(crate) const MONTH_WIDTH: u16 = DAY_WIDTH * 7 - 1;

/// Columns between adjacent months
const MONTH_GAP: u16 = 2;

const MONTH_STRIDE: u16 = MONTH_WIDTH + MONTH_GAP;

/// Title line, weekday header, and up to six weeks
pub(crate) const MONTH_HEIGHT: u16 = 8;

/// Columns reserved on either side of the months for the scroll controls
const SCROLL_WIDTH: u16 = 2;

/// Lines between the months and the close button
const CLOSE_GAP: u16 = 1;

const CLOSE_LABEL: &str = "[Close]";

const PANEL_TITLE: &str = " Select dates ";

/// Draws one month grid, highlighting marked days and recording a click
/// region for each selectable day
#[derive(Debug)]
pub(crate) struct MonthView<'a> {
    grid: &'a MonthGrid,
    markers: &'a Markers,
    hits: &'a mut Hits,
}

impl<'a> MonthView<'a> {
    pub(crate) fn new(grid: &'a MonthGrid, markers: &'a Markers, hits: &'a mut Hits) -> Self {
        MonthView {
            grid,
            markers,
            hits,
        }
    }

    fn day_style(&self, cell: DayCell) -> Style {
        let style = match cell.kind {
            DayKind::Overflow => OVERFLOW_STYLE,
            DayKind::Future => FUTURE_STYLE,
            DayKind::Selectable if self.markers.is_marked(cell.date) => INRANGE_STYLE,
            DayKind::Selectable => DATE_STYLE,
        };
        if cell.is_today {
            style.patch(TODAY_STYLE)
        } else {
            style
        }
    }
}

impl Widget for MonthView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut canvas = BufferCanvas::new(area, buf);
        let title = self.grid.title();
        let title_width = u16::try_from(title.len()).unwrap_or(u16::MAX);
        canvas.mvprint(
            0,
            MONTH_WIDTH.saturating_sub(title_width) / 2,
            &title,
            MONTH_NAME_STYLE,
        );
        for (x, label) in std::iter::zip((1..).step_by(DAY_WIDTH.into()), WEEKDAY_LABELS) {
            canvas.mvprint(1, x, label, WEEKDAY_STYLE);
        }
        for (i, week) in std::iter::zip(0u16.., self.grid.weeks()) {
            let y = i + 2;
            for (wd, cell) in week.enumerate() {
                let x = DAY_WIDTH * wd.index0();
                canvas.mvprint(y, x, cell.show(), self.day_style(cell));
                if cell.is_interactive() {
                    if let Some(region) = canvas.region(y, x, DAY_WIDTH - 1) {
                        self.hits.push(region, Target::Day(cell.date));
                    }
                }
            }
        }
    }
}

/// The drop-down panel: scroll controls, the visible months, and a close
/// button inside a frame
#[derive(Debug)]
pub(crate) struct Panel<'a> {
    window: &'a MonthWindow,
    markers: &'a Markers,
    show_right: bool,
    hits: &'a mut Hits,
}

impl<'a> Panel<'a> {
    pub(crate) fn new(
        window: &'a MonthWindow,
        markers: &'a Markers,
        show_right: bool,
        hits: &'a mut Hits,
    ) -> Self {
        Panel {
            window,
            markers,
            show_right,
            hits,
        }
    }

    /// Width & height of a panel showing `months` months, frame included
    pub(crate) fn size(months: NonZeroUsize) -> (u16, u16) {
        let months = u16::try_from(months.get()).unwrap_or(u16::MAX);
        let width = months
            .saturating_mul(MONTH_STRIDE)
            .saturating_sub(MONTH_GAP)
            .saturating_add(2 * SCROLL_WIDTH + 2);
        (width, MONTH_HEIGHT + CLOSE_GAP + 1 + 2)
    }
}

impl Widget for Panel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Panel {
            window,
            markers,
            show_right,
            hits,
        } = self;
        Clear.render(area, buf);
        let block = Block::bordered().title(PANEL_TITLE).style(PANEL_STYLE);
        let inner = block.inner(area);
        block.render(area, buf);
        let mut canvas = BufferCanvas::new(inner, buf);
        let mid = MONTH_HEIGHT / 2;
        canvas.mvprint(mid, 0, "<", SCROLL_STYLE);
        if let Some(region) = canvas.region(mid, 0, 1) {
            hits.push(region, Target::ScrollLeft);
        }
        let right_x = inner.width.saturating_sub(1);
        if show_right {
            canvas.mvprint(mid, right_x, ">", SCROLL_STYLE);
            if let Some(region) = canvas.region(mid, right_x, 1) {
                hits.push(region, Target::ScrollRight);
            }
        }
        let close_width = u16::try_from(CLOSE_LABEL.len()).unwrap_or(u16::MAX);
        let close_x = inner.width.saturating_sub(close_width);
        let close_y = MONTH_HEIGHT + CLOSE_GAP;
        canvas.mvprint(close_y, close_x, CLOSE_LABEL, CLOSE_STYLE);
        if let Some(region) = canvas.region(close_y, close_x, close_width) {
            hits.push(region, Target::Close);
        }

        let months_area = Rect {
            x: inner.x.saturating_add(SCROLL_WIDTH),
            y: inner.y,
            width: inner.width.saturating_sub(2 * SCROLL_WIDTH),
            height: MONTH_HEIGHT.min(inner.height),
        };
        // Lay the whole month list out in a row and slide it left so that
        // the month at the scroll index sits at the left edge.
        let offset = window.viewport_offset(MONTH_STRIDE.into());
        for (i, entry) in window.months().enumerate() {
            let Some(x) = i
                .saturating_mul(MONTH_STRIDE.into())
                .checked_sub(offset)
            else {
                continue;
            };
            let Ok(x) = u16::try_from(x) else {
                break;
            };
            if x.saturating_add(MONTH_WIDTH) > months_area.width {
                break;
            }
            let month_area = Rect {
                x: months_area.x + x,
                width: MONTH_WIDTH,
                ..months_area
            };
            MonthView::new(&entry.view, markers, &mut *hits).render(month_area, buf);
        }
    }
}

#[derive(Debug)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Style) {
        if y < self.area.height && x < self.area.width {
            // `set_stringn` truncates at the given width, keeping the text
            // inside the canvas.
            self.buf.set_stringn(
                x + self.area.x,
                y + self.area.y,
                s,
                usize::from(self.area.width - x),
                style,
            );
        }
    }

    /// The on-screen rectangle for `width` columns at (`y`, `x`), clipped to
    /// the canvas, or `None` if nothing of it is visible
    fn region(&self, y: u16, x: u16, width: u16) -> Option<Rect> {
        (y < self.area.height && x < self.area.width).then(|| Rect {
            x: x + self.area.x,
            y: y + self.area.y,
            width: width.min(self.area.width - x),
            height: 1,
        })
    }
}
