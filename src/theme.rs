//! Styles for everything the picker draws.
//!
//! Each style corresponds to one class of element; the class names in the
//! docs below are the names used when describing a theme:
//!
//! | Class                  | Element                                    |
//! | ---------------------- | ------------------------------------------ |
//! | `dr-field`             | an editable form field                     |
//! | `dr-field-disabled`    | a field locked while the panel is open     |
//! | `dr-field-focused`     | the field receiving typed characters       |
//! | `dr-dropdown`          | the drop-down trigger, panel closed        |
//! | `dr-open`              | the drop-down trigger, panel open          |
//! | `dr-panel`             | the panel frame                            |
//! | `dr-scroll`            | the `<` (`dr-left`) and `>` (`dr-right`) scroll controls |
//! | `dr-close`             | the close button                           |
//! | `dr-month`             | one month grid; no style of its own        |
//! | `dr-month-name`        | a month title                              |
//! | `dr-month-days`        | the weekday header row                     |
//! | `dr-week`              | one week row; no style of its own          |
//! | `dr-date`              | a selectable day                           |
//! | `dr-overflow`          | a day from an adjacent month               |
//! | `dr-future`            | a day after today that cannot be picked    |
//! | `dr-inrange`           | a day within the selected range            |
//! | `dr-today`             | today's date; layered over the above       |
use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const LABEL_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const STATUS_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

/// `dr-field`
pub(crate) const FIELD_STYLE: Style = Style::new().fg(Color::White).bg(Color::Blue);

/// `dr-field-disabled`
pub(crate) const FIELD_DISABLED_STYLE: Style = Style::new().fg(Color::Gray).bg(Color::DarkGray);

/// `dr-field-focused`
pub(crate) const FIELD_FOCUSED_STYLE: Style = FIELD_STYLE.add_modifier(Modifier::REVERSED);

/// `dr-dropdown`
pub(crate) const DROPDOWN_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

/// `dr-open`
pub(crate) const DROPDOWN_OPEN_STYLE: Style = DROPDOWN_STYLE.fg(Color::LightYellow);

/// `dr-panel`
pub(crate) const PANEL_STYLE: Style = BASE_STYLE;

/// `dr-scroll`
pub(crate) const SCROLL_STYLE: Style = BASE_STYLE.fg(Color::LightCyan).add_modifier(Modifier::BOLD);

/// `dr-close`
pub(crate) const CLOSE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::REVERSED);

/// `dr-month-name`
pub(crate) const MONTH_NAME_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

/// `dr-month-days`
pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

/// `dr-date`
pub(crate) const DATE_STYLE: Style = BASE_STYLE;

/// `dr-overflow`
pub(crate) const OVERFLOW_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

/// `dr-future`
pub(crate) const FUTURE_STYLE: Style = BASE_STYLE.fg(Color::DarkGray).add_modifier(Modifier::DIM);

/// `dr-inrange`
pub(crate) const INRANGE_STYLE: Style = Style::new().fg(Color::Black).bg(Color::LightBlue);

/// `dr-today`; patched onto whichever of the day styles applies
pub(crate) const TODAY_STYLE: Style = Style::new().add_modifier(Modifier::BOLD.union(Modifier::UNDERLINED));
