mod markers;
mod month;
mod widget;
mod window;
pub(crate) use self::markers::Markers;
pub(crate) use self::month::MonthFactory;
pub(crate) use self::widget::Panel;
pub(crate) use self::window::{MonthWindow, ScrollError};
