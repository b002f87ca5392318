use crate::help::Help;
use crate::picker::{DatePicker, PickerOutput, PickerState};
use crate::theme::BASE_STYLE;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    read,
};
use ratatui::{
    Terminal,
    backend::Backend,
    buffer::Buffer,
    layout::{Position, Rect},
    widgets::{StatefulWidget, Widget},
};
use std::io::{self, Write};
use time::Date;

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App {
    selected: Option<Date>,
    today: Date,
    picker: PickerState,
    state: AppState,
}

impl App {
    pub(crate) fn new(selected: Option<Date>, today: Date) -> App {
        App {
            selected,
            today,
            picker: PickerState::new(),
            state: AppState::Picking,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.refresh_today();
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        Ok(())
    }

    // "Today" can roll over while the picker is up, so re-resolve it before
    // every draw.  If the local offset has become indeterminate, the last
    // known date stays in effect.
    fn refresh_today(&mut self) {
        if let Ok(now) = time::OffsetDateTime::now_local() {
            self.today = now.date();
        }
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
            }) => self.handle_click(Position::new(column, row))?,
            // Redraw on resize, and we might as well redraw on other stuff
            // too
            _ => (),
        }
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state {
            AppState::Picking => match self.picker.handle_key(key, self.selected, self.today) {
                PickerOutput::Ignored => match key {
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
                output => self.apply(output),
            },
            AppState::Helping => {
                self.state = AppState::Picking;
                true
            }
            AppState::Quitting => false,
        }
    }

    fn handle_click(&mut self, position: Position) -> io::Result<()> {
        match self.state {
            AppState::Picking => {
                let output = self.picker.handle_click(position, self.selected, self.today);
                // While the popover is open, the only click it ignores is
                // navigation off the edge of the calendar; stray clicks while
                // closed stay silent.
                if !self.apply(output) && self.picker.is_open() {
                    self.beep()?;
                }
            }
            // Any click dismisses the help overlay.
            AppState::Helping => self.state = AppState::Picking,
            AppState::Quitting => (),
        }
        Ok(())
    }

    fn apply(&mut self, output: PickerOutput) -> bool {
        match output {
            PickerOutput::Handled => true,
            PickerOutput::Picked(date) => {
                self.selected = Some(date);
                true
            }
            PickerOutput::Ignored => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let picker = DatePicker::new(self.selected, self.today);
        picker.render(area, buf, &mut self.picker);
        if self.state == AppState::Helping {
            Help(BASE_STYLE).render(area, buf);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Picking,
    Helping,
    Quitting,
}
