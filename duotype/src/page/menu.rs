use crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Position, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};
use scimitar::{Direction, TypingSession};
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::{
    config::Config,
    utils::{KeyEventHelper, visual_line},
};

pub const TITLE: &str = "Typing Test / מבחן הקלדה";

/// A button in the header
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, Display)]
pub enum Control {
    #[strum(to_string = "Change Text")]
    ChangeText,
    #[strum(to_string = "Direction")]
    Direction,
    #[strum(to_string = "Restart Test")]
    Restart,
}

impl Control {
    /// Character that triggers the control together with CTRL
    pub const fn shortcut(self) -> char {
        match self {
            Self::ChangeText => 't',
            Self::Direction => 'd',
            Self::Restart => 'r',
        }
    }

    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        Self::iter().find(|control| key.is_ctrl_press_char(control.shortcut()))
    }

    pub fn label(self, session: &TypingSession) -> String {
        match self {
            Self::ChangeText if session.overlay().is_open() => "Cancel Change".to_string(),
            Self::Direction => format!("{self}: {}", session.direction()),
            _ => self.to_string(),
        }
    }

    /// Restarting is pointless before anything happened
    pub fn is_enabled(self, session: &TypingSession) -> bool {
        match self {
            Self::Restart => session.can_restart(),
            _ => true,
        }
    }
}

/// Two lines of usage hints, in the language of the text direction
pub const fn instructions(direction: Direction) -> [&'static str; 2] {
    match direction {
        Direction::Ltr => [
            "Type the text below. Use arrows/click to navigate. Backspace deletes.",
            "Ctrl/Cmd+Arrows for word jump, Ctrl/Cmd+Backspace for word delete.",
        ],
        Direction::Rtl => [
            "הקלד את הטקסט למטה. השתמש בחצים/קליק לניווט. Backspace מוחק.",
            "Ctrl/Cmd+חצים לקפיצה בין מילים, Ctrl/Cmd+Backspace למחיקת מילה.",
        ],
    }
}

/// Page section: header with the controls, the title and the instructions
#[derive(Debug, Default)]
pub struct Menu {
    buttons: Vec<(Control, Rect)>,
}

impl Menu {
    /// The control drawn at the given terminal cell during the last frame
    pub fn control_at(&self, column: u16, row: u16) -> Option<Control> {
        self.buttons
            .iter()
            .find(|(_, area)| area.contains(Position::new(column, row)))
            .map(|(control, _)| *control)
    }

    /// Rows needed by [`Menu::render`]
    pub const fn height() -> u16 {
        5
    }
}

// Rendering logic
impl Menu {
    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        session: &TypingSession,
        config: &Config,
    ) {
        let [controls, _, title, first, second] =
            Layout::vertical([Constraint::Length(1); 5]).areas(area);

        self.render_controls(frame, controls, session, config);

        frame.render_widget(Line::from(TITLE).bold().centered(), title);

        let direction = session.direction();
        for (text, area) in instructions(direction).into_iter().zip([first, second]) {
            let (text, _) = visual_line(text, direction);
            frame.render_widget(
                Paragraph::new(Line::from(text).fg(config.settings.theme.text.muted)).centered(),
                area,
            );
        }
    }

    fn render_controls(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        session: &TypingSession,
        config: &Config,
    ) {
        let theme = &config.settings.theme;
        let labels: Vec<(Control, String)> = Control::iter()
            .map(|control| (control, format!("[ {} ]", control.label(session))))
            .collect();

        let constraints = labels.iter().map(|(_, label)| {
            Constraint::Length(u16::try_from(label.chars().count()).unwrap_or(u16::MAX))
        });
        let areas = Layout::horizontal(constraints)
            .spacing(2)
            .flex(Flex::Center)
            .split(area);

        self.buttons.clear();
        for ((control, label), button) in labels.into_iter().zip(areas.iter()) {
            let style = if control.is_enabled(session) {
                Style::new().fg(theme.text.highlight).bold()
            } else {
                Style::new().fg(theme.text.muted).dim()
            };
            frame.render_widget(Span::styled(label, style), *button);

            if control.is_enabled(session) {
                self.buttons.push((control, *button));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};
    use scimitar::{Direction, Key, NoGeometry};

    use super::*;

    #[test]
    fn test_shortcuts() {
        let key = KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL);
        assert_eq!(Control::from_key(&key), Some(Control::Direction));

        let key = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE);
        assert_eq!(Control::from_key(&key), None);
    }

    #[test]
    fn test_labels_follow_session() {
        let mut session = TypingSession::with_text("cat", Direction::Rtl);
        assert_eq!(Control::Direction.label(&session), "Direction: RTL");
        assert_eq!(Control::ChangeText.label(&session), "Change Text");
        assert!(!Control::Restart.is_enabled(&session));

        session.toggle_overlay();
        assert_eq!(Control::ChangeText.label(&session), "Cancel Change");

        session.toggle_overlay();
        session.handle_key(&scimitar::KeyEvent::new(Key::Char('c')), &NoGeometry);
        assert!(Control::Restart.is_enabled(&session));
    }

    #[test]
    fn test_instructions_follow_direction() {
        assert!(instructions(Direction::Ltr)[0].starts_with("Type the text below"));
        assert!(instructions(Direction::Rtl)[1].contains("Ctrl/Cmd+Backspace"));
    }
}
