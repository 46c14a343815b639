use std::io::stdout;

use crossterm::cursor::SetCursorStyle;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, MouseButton, MouseEventKind,
};
use crossterm::execute;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::Stylize,
    text::ToLine,
    widgets::Padding,
};
use scimitar::TypingSession;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::AppError;
use crate::page::{self, Control};
use crate::utils::{KeyEventHelper, ROUNDED_BLOCK};

/// An app message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// A header control was clicked or its shortcut pressed
    Press(Control),
    /// Quit the application
    Quit,
}

/// Holds the terminal in raw mode with mouse capture until dropped
struct TerminalGuard;

impl TerminalGuard {
    fn acquire() -> Result<(DefaultTerminal, Self), AppError> {
        let terminal = ratatui::try_init()?;
        let guard = Self;
        execute!(stdout(), EnableMouseCapture, SetCursorStyle::SteadyBar)?;
        Ok((terminal, guard))
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(error) = execute!(
            stdout(),
            DisableMouseCapture,
            SetCursorStyle::DefaultUserShape
        ) {
            warn!(%error, "failed to release the mouse");
        }
        if let Err(error) = ratatui::try_restore() {
            warn!(%error, "failed to restore the terminal");
        }
    }
}

/// The app itself
pub struct App {
    session: page::Session,
    menu: page::Menu,
    config: Config,
}

impl App {
    /// Creates a new `App`
    pub fn new(config: Config, session: TypingSession) -> Self {
        Self {
            session: page::Session::new(session, config.settings.wrap_words),
            menu: page::Menu::default(),
            config,
        }
    }

    /// Runs the app
    ///
    /// The loop blocks on input, but never past the next clock tick while a test is running.
    pub fn run(&mut self) -> Result<(), AppError> {
        let (mut terminal, _guard) = TerminalGuard::acquire()?;

        loop {
            terminal.draw(|frame| self.draw(frame))?;

            if event::poll(self.session.poll_timeout())? {
                let event = event::read()?;
                match self.handle_events(&event) {
                    Some(Message::Quit) => break,
                    Some(Message::Press(control)) => self.press(control),
                    None => {}
                }
            }

            self.session.poll();
        }

        info!("quitting");
        Ok(())
    }

    /// Draws the next frame
    fn draw(&mut self, frame: &mut Frame) {
        let block = ROUNDED_BLOCK
            .padding(Padding::new(1, 1, 0, 0))
            .title_top("DUOTYPE".to_line().bold().centered())
            .title_top("<CTRL-Q> to exit".to_line().right_aligned());

        let area = frame.area();
        let content = block.inner(area);
        frame.render_widget(block, area);

        let [header, body] =
            Layout::vertical([Constraint::Length(page::Menu::height()), Constraint::Min(0)])
                .areas(content);

        self.menu
            .render(frame, header, self.session.typing(), &self.config);
        self.session.render(frame, body, &self.config);
    }

    /// Global event handler
    fn handle_events(&mut self, event: &Event) -> Option<Message> {
        match event {
            Event::Key(key) if key.is_press() => {
                if key.is_ctrl_press_char('q') {
                    return Some(Message::Quit);
                }
                if let Some(control) = Control::from_key(key) {
                    return Some(Message::Press(control));
                }
                self.session.handle_key(key);
                None
            }
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                if let Some(control) = self.menu.control_at(mouse.column, mouse.row) {
                    return Some(Message::Press(control));
                }
                self.session.handle_click(mouse.column, mouse.row);
                None
            }
            _ => None,
        }
    }

    fn press(&mut self, control: Control) {
        debug!(%control, "control pressed");
        match control {
            Control::ChangeText => self.session.toggle_editor(),
            Control::Direction => self.session.toggle_direction(),
            Control::Restart => self.session.restart(),
        }
    }
}
