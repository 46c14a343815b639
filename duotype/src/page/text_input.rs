use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Position, Rect},
    style::{Style, Stylize},
    text::{Line, Text},
    widgets::{Padding, Paragraph},
};
use scimitar::navigation::{step, word_delete_range};
use scimitar::{Direction, Horizontal, ReferenceText};

use crate::{
    config::Config,
    utils::{KeyEventHelper, ROUNDED_BLOCK, visual_line},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Submit,
    Cancel,
}

/// Multi-line editor for a replacement text
#[derive(Debug, Default)]
pub struct TextInput {
    text: String,
    /// Cursor position as a char index (0 = before first char).
    cursor: usize,
}

impl TextInput {
    pub fn value(&self) -> &str {
        &self.text
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Convert char index to byte offset.
    fn char_to_byte(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map_or(self.text.len(), |(byte, _)| byte)
    }

    fn insert(&mut self, character: char) {
        let byte_offset = self.char_to_byte(self.cursor);
        self.text.insert(byte_offset, character);
        self.cursor += 1;
    }

    fn remove(&mut self, range: std::ops::Range<usize>) {
        let start = self.char_to_byte(range.start);
        let end = self.char_to_byte(range.end);
        self.text.replace_range(start..end, "");
        self.cursor = range.start;
    }

    /// Handle a key press. Arrows follow the visual order of `direction`.
    pub fn handle(&mut self, key: &KeyEvent, direction: Direction) -> InputResult {
        if key.is_ctrl_press_char('s') {
            return InputResult::Submit;
        }

        if key.is_word_delete() {
            let range = word_delete_range(&ReferenceText::new(&self.text), self.cursor);
            self.remove(range);
            return InputResult::Continue;
        }

        match key.code {
            KeyCode::Esc => return InputResult::Cancel,
            KeyCode::Enter => self.insert('\n'),
            KeyCode::Left => self.cursor = step(self.len(), self.cursor, direction, Horizontal::Left),
            KeyCode::Right => {
                self.cursor = step(self.len(), self.cursor, direction, Horizontal::Right);
            }
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.len(),
            KeyCode::Backspace if self.cursor > 0 => self.remove(self.cursor - 1..self.cursor),
            KeyCode::Delete if self.cursor < self.len() => {
                self.remove(self.cursor..self.cursor + 1);
            }
            KeyCode::Char('u') if key.has_mods(KeyModifiers::CONTROL) => self.clear(),
            KeyCode::Char(character) if !key.has_mods(KeyModifiers::CONTROL) => {
                self.insert(character);
            }
            _ => {}
        }

        InputResult::Continue
    }

    /// Row and column of the cursor, counting lines split at `'\n'`
    pub fn cursor_position(&self) -> (usize, usize) {
        let before = self.text.chars().take(self.cursor);
        before.fold((0, 0), |(row, col), character| {
            if character == '\n' {
                (row + 1, 0)
            } else {
                (row, col + 1)
            }
        })
    }
}

/// Placeholder shown while the editor is empty
pub const fn placeholder(direction: Direction) -> &'static str {
    match direction {
        Direction::Ltr => "Paste LTR text...",
        Direction::Rtl => "...הדבק טקסט RTL",
    }
}

// Rendering logic
impl TextInput {
    /// Renders the overlay, placing the terminal cursor when `focused`
    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        config: &Config,
        direction: Direction,
        focused: bool,
    ) {
        let theme = &config.settings.theme;
        let border = if focused {
            theme.text.highlight
        } else {
            theme.text.muted
        };

        let block = ROUNDED_BLOCK
            .border_style(Style::new().fg(border))
            .padding(Padding::horizontal(1))
            .title_top(Line::from(" Change Text ").bold())
            .title_bottom(
                Line::from(" <CTRL-S> Set Text & Restart | <ESC> Cancel | <TAB> Switch focus ")
                    .centered(),
            );
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let alignment = if direction.is_rtl() {
            Alignment::Right
        } else {
            Alignment::Left
        };

        let is_empty = self.text.is_empty();
        let source = if is_empty {
            placeholder(direction)
        } else {
            self.text.as_str()
        };
        let lines: Vec<(String, Vec<usize>)> = source
            .split('\n')
            .map(|line| visual_line(line, direction))
            .collect();

        let (row, col) = self.cursor_position();
        let scroll = (row + 1).saturating_sub(usize::from(inner.height));

        let style = if is_empty {
            Style::new().fg(theme.text.muted)
        } else {
            Style::new()
        };
        let text: Text = lines
            .iter()
            .map(|(line, _)| Line::styled(line.as_str(), style))
            .collect();
        frame.render_widget(
            Paragraph::new(text)
                .alignment(alignment)
                .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0)),
            inner,
        );

        if focused && inner.width > 0 {
            let width = usize::from(inner.width);
            let (len, offset) = match lines.get(row) {
                Some((_, offsets)) if !is_empty => (offsets.len(), offsets.get(col).copied()),
                _ => (0, None),
            };
            let start = if direction.is_rtl() {
                width.saturating_sub(len)
            } else {
                0
            };
            // Past the end of a line the cursor sits beyond its leading edge
            let x = match offset {
                Some(offset) => start + offset,
                None if direction.is_rtl() => start.saturating_sub(1),
                None => start + len,
            };
            let x = u16::try_from(x.min(width - 1)).unwrap_or(u16::MAX);
            let y = u16::try_from(row.saturating_sub(scroll)).unwrap_or(u16::MAX);
            frame.set_cursor_position(Position::new(inner.x + x, inner.y + y));
        }
    }
}
