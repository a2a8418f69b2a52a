use ratatui::layout::{Position, Rect};
use time::Date;

/// Something on screen that reacts to a mouse click
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Target {
    /// The drop-down button next to the start field
    Trigger,
    ScrollLeft,
    ScrollRight,
    Close,
    /// A selectable day cell
    Day(Date),
    /// The form field at the given index
    Field(usize),
}

/// Click regions recorded while rendering a frame.  Regions recorded later
/// sit on top of earlier ones.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Hits(Vec<(Rect, Target)>);

impl Hits {
    pub(crate) fn new() -> Self {
        Hits::default()
    }

    pub(crate) fn clear(&mut self) {
        self.0.clear();
    }

    pub(crate) fn push(&mut self, area: Rect, target: Target) {
        if !area.is_empty() {
            self.0.push((area, target));
        }
    }

    pub(crate) fn at(&self, x: u16, y: u16) -> Option<Target> {
        self.0
            .iter()
            .rev()
            .find(|(area, _)| area.contains(Position { x, y }))
            .map(|&(_, target)| target)
    }

    #[cfg(test)]
    pub(crate) fn find(&self, target: Target) -> Option<Rect> {
        self.0
            .iter()
            .rev()
            .find(|&&(_, t)| t == target)
            .map(|&(area, _)| area)
    }
}
