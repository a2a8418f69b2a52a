use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Paragraph, Widget},
};

static COMMANDS: &[(&str, &str)] = &[
    ("Click [▼], SPACE", "Open or close the calendar"),
    ("Click a day", "Start or finish a range"),
    ("Click [Close]", "Close the calendar"),
    ("<, LEFT", "Scroll back one month"),
    (">, RIGHT", "Scroll forward one month"),
    ("Click a field", "Edit it while the calendar is closed"),
    ("?", "Show this help"),
    ("q, ESC", "Quit"),
];

static DISMISS: &str = "Press the Any Key to dismiss.";

/// Columns between a command and its description
const COLUMN_GAP: usize = 3;

/// The command summary, drawn as a box centered over whatever is below it
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help(pub(crate) Style);

impl Help {
    fn text() -> Text<'static> {
        let key_width = COMMANDS
            .iter()
            .map(|(keys, _)| keys.chars().count())
            .max()
            .unwrap_or_default()
            + COLUMN_GAP;
        let mut lines = COMMANDS
            .iter()
            .map(|(keys, what)| Line::raw(format!("{keys:<key_width$}{what}")))
            .collect::<Vec<_>>();
        lines.push(Line::default());
        lines.push(Line::raw(DISMISS));
        Text::from(lines)
    }
}

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Help::text();
        // Border plus one column of padding on either side
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(area.height);
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .saturating_add(4)
            .min(area.width);
        let [help_area] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(area);
        let [help_area] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(help_area);
        Clear.render(help_area, buf);
        Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Commands ")
                    .title_alignment(Alignment::Center)
                    .padding(Padding::horizontal(1)),
            )
            .style(self.0)
            .render(help_area, buf);
    }
}
