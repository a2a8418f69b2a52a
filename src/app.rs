use crate::calendar::Panel;
use crate::dates::Clock;
use crate::form::Form;
use crate::help::Help;
use crate::hits::{Hits, Target};
use crate::picker::DateRangePicker;
use crate::theme::{
    BASE_STYLE, DROPDOWN_OPEN_STYLE, DROPDOWN_STYLE, FIELD_DISABLED_STYLE, FIELD_FOCUSED_STYLE,
    FIELD_STYLE, LABEL_STYLE, STATUS_STYLE,
};
use crossterm::{
    event::{
        read, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::Rect,
    widgets::Widget,
    Terminal,
};
use std::io::{self, Write};

/// Column at which the form starts
const FORM_LEFT: u16 = 2;

/// Line at which the form starts
const FORM_TOP: u16 = 1;

const LABEL_WIDTH: u16 = 12;

const FIELD_WIDTH: u16 = 16;

/// Columns between a field and its drop-down trigger
const TRIGGER_GAP: u16 = 1;

const TRIGGER_CLOSED: &str = "[▼]";

const TRIGGER_OPEN: &str = "[▲]";

const TRIGGER_WIDTH: u16 = 3;

const STATUS_HINT: &str = "SPACE open/close · ? help · q quit";

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App<C> {
    form: Form,
    picker: DateRangePicker<C>,
    hits: Hits,
    state: AppState,
}

impl<C: Clock> App<C> {
    pub(crate) fn new(form: Form, picker: DateRangePicker<C>) -> App<C> {
        App {
            form,
            picker,
            hits: Hits::new(),
            state: AppState::Form,
        }
    }

    /// Runs until the user quits, returning the form with its final values
    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<Form> {
        execute!(io::stdout(), EnableMouseCapture)?;
        let r = self.event_loop(&mut terminal);
        execute!(io::stdout(), DisableMouseCapture)?;
        r?;
        Ok(self.form)
    }

    fn event_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(terminal)?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        match read()? {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) => {
                if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                    self.state = AppState::Quitting;
                } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                    self.beep()?;
                }
            }
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                ..
            }) => {
                if !self.handle_click(column, row) {
                    self.beep()?;
                }
            }
            // Redraw on resize, and we might as well redraw on other stuff
            // too
            _ => (),
        }
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state {
            AppState::Form if self.form.focused().is_some() => match key {
                KeyCode::Char(ch) => self.form.type_char(ch),
                KeyCode::Backspace | KeyCode::Delete => self.form.backspace(),
                KeyCode::Enter | KeyCode::Esc | KeyCode::Tab => {
                    self.form.unfocus();
                    true
                }
                _ => false,
            },
            AppState::Form => match key {
                KeyCode::Char(' ') => {
                    self.picker.toggle(&mut self.form);
                    true
                }
                KeyCode::Char('<') | KeyCode::Left if self.picker.is_open() => {
                    self.picker.scroll_left().is_ok()
                }
                KeyCode::Char('>') | KeyCode::Right if self.picker.is_open() => {
                    self.picker.scroll_right().is_ok()
                }
                KeyCode::Esc if self.picker.is_open() => {
                    self.picker.close(&mut self.form);
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Form;
                true
            }
            AppState::Quitting => false,
        }
    }

    // Returns `false` if the click landed on something that refused it
    fn handle_click(&mut self, x: u16, y: u16) -> bool {
        if self.state == AppState::Helping {
            self.state = AppState::Form;
            return true;
        }
        let Some(target) = self.hits.at(x, y) else {
            self.form.unfocus();
            return true;
        };
        match target {
            Target::Trigger => {
                self.form.unfocus();
                self.picker.toggle(&mut self.form);
                true
            }
            Target::Close => {
                self.picker.close(&mut self.form);
                true
            }
            Target::ScrollLeft => self.picker.scroll_left().is_ok(),
            Target::ScrollRight => self.picker.scroll_right().is_ok(),
            Target::Day(date) => self.picker.click_day(date, &mut self.form),
            Target::Field(i) => self.form.focus(i),
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn status(&self) -> String {
        let Some(state) = self.picker.state() else {
            return String::from(STATUS_HINT);
        };
        let range = state.range();
        let format = self.picker.options().format;
        let first = format.format(range.first());
        match range.last() {
            Some(last) => format!(
                "{first} – {} ({} days) · {STATUS_HINT}",
                format.format(last),
                range.day_count()
            ),
            None => format!("{first} – … · {STATUS_HINT}"),
        }
    }
}

impl<C: Clock> Widget for &mut App<C> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        self.hits.clear();
        let left = area.x.saturating_add(FORM_LEFT);
        let field_x = left.saturating_add(LABEL_WIDTH);
        let panel_size = Panel::size(self.picker.options().months);
        let mut panel_top = None;
        let mut y = area.y.saturating_add(FORM_TOP);
        for (i, field) in self.form.fields().iter().enumerate() {
            if y >= area.bottom() {
                break;
            }
            buf.set_stringn(left, y, field.label(), usize::from(LABEL_WIDTH), LABEL_STYLE);
            let style = if field.is_disabled() {
                FIELD_DISABLED_STYLE
            } else if self.form.focused() == Some(i) {
                FIELD_FOCUSED_STYLE
            } else {
                FIELD_STYLE
            };
            let width = usize::from(FIELD_WIDTH);
            let value = field.value();
            // Keep the end of long values in view
            let skip = value.chars().count().saturating_sub(width);
            let shown = value.chars().skip(skip).collect::<String>();
            let text = format!("{shown:<width$}");
            let field_area = Rect::new(field_x, y, FIELD_WIDTH, 1).intersection(area);
            buf.set_stringn(field_x, y, text, usize::from(field_area.width), style);
            self.hits.push(field_area, Target::Field(i));
            if field.name() == self.picker.start_field() {
                let trigger_x = field_x.saturating_add(FIELD_WIDTH + TRIGGER_GAP);
                let (label, style) = if self.picker.is_open() {
                    (TRIGGER_OPEN, DROPDOWN_OPEN_STYLE)
                } else {
                    (TRIGGER_CLOSED, DROPDOWN_STYLE)
                };
                let trigger_area = Rect::new(trigger_x, y, TRIGGER_WIDTH, 1).intersection(area);
                buf.set_stringn(
                    trigger_x,
                    y,
                    label,
                    usize::from(trigger_area.width),
                    style,
                );
                self.hits.push(trigger_area, Target::Trigger);
            }
            y = y.saturating_add(1);
            // The open panel sits directly under its container, pushing the
            // rest of the form down.
            if self.picker.is_open() && field.name() == self.picker.container() {
                panel_top = Some(y);
                y = y.saturating_add(panel_size.1);
            }
        }

        if let Some(state) = self.picker.state() {
            let top = panel_top.unwrap_or(y);
            let (width, height) = panel_size;
            let panel_area = Rect::new(left, top, width, height).intersection(area);
            if !panel_area.is_empty() {
                Panel::new(
                    state.window(),
                    state.markers(),
                    self.picker.right_visible(),
                    &mut self.hits,
                )
                .render(panel_area, buf);
            }
        }

        if area.height > 0 {
            let status_y = area.bottom() - 1;
            buf.set_stringn(
                left,
                status_y,
                self.status(),
                usize::from(area.width.saturating_sub(FORM_LEFT)),
                STATUS_STYLE,
            );
        }

        if self.state == AppState::Helping {
            Help(BASE_STYLE).render(area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Form,
    Helping,
    Quitting,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Options;
    use crate::dates::FixedClock;
    use crate::theme::INRANGE_STYLE;
    use time::{macros::date, Date};

    fn app(today: Date) -> App<FixedClock> {
        let form = Form::new()
            .with_field("start", "Start date")
            .with_field("days", "Days")
            .with_field("end", "End date");
        let options = Options {
            days_field: Some(String::from("days")),
            end_field: Some(String::from("end")),
            ..Options::default()
        };
        App::new(form, DateRangePicker::new("start", options, FixedClock(today)))
    }

    fn render(app: &mut App<FixedClock>) -> Buffer {
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        buffer
    }

    fn click(app: &mut App<FixedClock>, target: Target) -> bool {
        let area = app.hits.find(target).unwrap();
        let ok = app.handle_click(area.x, area.y);
        render(app);
        ok
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_owned())
            .collect()
    }

    #[test]
    fn test_closed_form() {
        let mut app = app(date!(2024 - 03 - 15));
        let buffer = render(&mut app);
        assert!(row(&buffer, 1).starts_with(&format!("  Start date{}[▼]", " ".repeat(19))));
        assert!(row(&buffer, 2).starts_with("  Days"));
        assert!(row(&buffer, 3).starts_with("  End date"));
        assert!(row(&buffer, 23).contains("SPACE open/close"));
        assert_eq!(app.hits.find(Target::Trigger), Some(Rect::new(31, 1, 3, 1)));
        assert_eq!(app.hits.find(Target::Close), None);
    }

    #[test]
    fn test_pick_a_range_with_the_mouse() {
        let mut app = app(date!(2024 - 03 - 25));
        render(&mut app);
        assert!(click(&mut app, Target::Trigger));
        assert!(app.picker.is_open());
        assert!(app.form.fields().iter().all(|f| f.is_disabled()));
        assert!(click(&mut app, Target::Day(date!(2024 - 03 - 10))));
        assert!(click(&mut app, Target::Day(date!(2024 - 03 - 20))));
        assert_eq!(app.form.value("start"), Some("2024-03-10"));
        assert_eq!(app.form.value("days"), Some("11"));
        assert_eq!(app.form.value("end"), Some("2024-03-20"));
        let buffer = render(&mut app);
        let day = app.hits.find(Target::Day(date!(2024 - 03 - 15))).unwrap();
        assert_eq!(buffer[(day.x, day.y)].style(), INRANGE_STYLE);
        assert!(row(&buffer, 23).contains("2024-03-10 – 2024-03-20 (11 days)"));
        assert!(row(&buffer, 14).starts_with("  Days"));
        assert!(row(&buffer, 15).starts_with("  End date"));
        assert!(click(&mut app, Target::Close));
        assert!(!app.picker.is_open());
        assert!(app.form.fields().iter().all(|f| !f.is_disabled()));
        assert_eq!(app.form.value("days"), Some("11"));
    }

    #[test]
    fn test_future_day_click_does_nothing() {
        let mut app = app(date!(2024 - 03 - 15));
        render(&mut app);
        assert!(click(&mut app, Target::Trigger));
        assert_eq!(app.hits.find(Target::Day(date!(2024 - 03 - 20))), None);
        // The 14th is a Thursday; the 20th is the Wednesday of the week after.
        let thursday = app.hits.find(Target::Day(date!(2024 - 03 - 14))).unwrap();
        let before = app.form.clone();
        app.handle_click(thursday.x - 3, thursday.y + 1);
        assert_eq!(app.form, before);
        assert_eq!(app.form.value("start"), Some("2024-03-15"));
    }

    #[test]
    fn test_scroll_controls() {
        let mut app = app(date!(2024 - 03 - 15));
        render(&mut app);
        assert!(click(&mut app, Target::Trigger));
        assert_eq!(app.hits.find(Target::ScrollRight), None);
        assert!(app.hits.find(Target::Day(date!(2024 - 01 - 02))).is_some());
        assert!(click(&mut app, Target::ScrollLeft));
        assert!(app.hits.find(Target::Day(date!(2023 - 12 - 02))).is_some());
        assert!(app.hits.find(Target::Day(date!(2024 - 03 - 02))).is_none());
        assert!(click(&mut app, Target::ScrollRight));
        assert!(app.hits.find(Target::Day(date!(2024 - 03 - 02))).is_some());
        assert_eq!(app.hits.find(Target::ScrollRight), None);
    }

    #[test]
    fn test_typed_value_seeds_panel() {
        let mut app = app(date!(2024 - 03 - 15));
        render(&mut app);
        assert!(click(&mut app, Target::Field(0)));
        for ch in "2/5/2024".chars() {
            assert!(app.handle_key(KeyCode::Char(ch)));
        }
        assert!(app.handle_key(KeyCode::Enter));
        assert!(click(&mut app, Target::Field(1)));
        assert!(app.handle_key(KeyCode::Char('3')));
        assert!(app.handle_key(KeyCode::Enter));
        assert!(app.handle_key(KeyCode::Char(' ')));
        assert!(app.picker.is_open());
        assert_eq!(app.form.value("start"), Some("2/5/2024"));
        assert_eq!(app.form.value("end"), Some("2024-02-07"));
        assert!(!app.form.focus(0));
    }

    #[test]
    fn test_keys() {
        let mut app = app(date!(2024 - 03 - 15));
        render(&mut app);
        assert!(!app.handle_key(KeyCode::Char('>')));
        assert!(app.handle_key(KeyCode::Char(' ')));
        assert!(!app.handle_key(KeyCode::Char('>')));
        assert!(app.handle_key(KeyCode::Char('<')));
        assert!(app.handle_key(KeyCode::Right));
        assert!(app.handle_key(KeyCode::Esc));
        assert!(!app.picker.is_open());
        assert!(app.handle_key(KeyCode::Char('?')));
        assert!(app.handle_key(KeyCode::Char('x')));
        assert!(app.handle_key(KeyCode::Esc));
        assert!(app.quitting());
    }

    #[test]
    fn test_help() {
        let mut app = app(date!(2024 - 03 - 15));
        assert!(app.handle_key(KeyCode::Char('?')));
        let buffer = render(&mut app);
        let text = (0..24).map(|y| row(&buffer, y)).collect::<Vec<_>>().join("\n");
        assert!(text.contains("Commands"), "{text}");
        assert!(text.contains("Press the Any Key to dismiss."), "{text}");
        assert!(app.handle_click(0, 0));
        assert_eq!(app.state, AppState::Form);
    }
}
