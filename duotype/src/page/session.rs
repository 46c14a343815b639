use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};
use scimitar::{
    GeometryLocator, Overlay, TypingSession,
    render::{Layout as TextLayout, LineRenderConfig},
};
use tracing::trace;

use crate::{
    config::Config,
    page::text_input::{InputResult, TextInput},
    utils::{KeyEventHelper, relative_position},
};

/// How long to wait for input while the clock is not running
const IDLE_TIMEOUT: Duration = Duration::from_millis(500);

/// Rows of the text editor, borders included
const EDITOR_HEIGHT: u16 = 12;

/// Drawn in place of a line break
const NEWLINE_GLYPH: &str = "↵";

/// Where things ended up during the last frame
#[derive(Debug, Default)]
struct View {
    editor: Option<Rect>,
    text: Rect,
    scroll: usize,
}

/// Page: the typing area, the editor overlay and the metrics bar
#[derive(Debug)]
pub struct Session {
    typing: TypingSession,
    editor: TextInput,
    wrap_words: bool,
    view: View,
}

impl Session {
    pub fn new(typing: TypingSession, wrap_words: bool) -> Self {
        Self {
            typing,
            editor: TextInput::default(),
            wrap_words,
            view: View::default(),
        }
    }

    pub const fn typing(&self) -> &TypingSession {
        &self.typing
    }

    /// How long the event loop may block before calling [`Session::poll`]
    pub fn poll_timeout(&self) -> Duration {
        self.typing.poll_timeout().unwrap_or(IDLE_TIMEOUT)
    }

    /// Advance the clock. Returns true if the metrics changed.
    pub fn poll(&mut self) -> bool {
        self.typing.tick()
    }

    pub fn toggle_editor(&mut self) {
        self.typing.toggle_overlay();
    }

    pub fn toggle_direction(&mut self) {
        self.typing.toggle_direction();
    }

    pub fn restart(&mut self) {
        if self.typing.can_restart() {
            self.typing.reset();
        }
    }

    fn line_config(&self, width: u16) -> LineRenderConfig {
        // The last column is kept free for a cursor past the end of a line
        let line_length = usize::from(width).saturating_sub(1).max(1);
        LineRenderConfig::new(line_length).with_word_wrapping(self.wrap_words)
    }

    fn layout(&self, width: u16) -> TextLayout {
        TextLayout::new(self.typing.text(), &self.line_config(width))
    }

    fn locator(&self) -> GeometryLocator {
        let width = self.view.text.width;
        self.layout(width)
            .locator(self.typing.direction(), usize::from(width))
    }
}

// Event handling
impl Session {
    pub fn handle_key(&mut self, key: &KeyEvent) {
        if let Overlay::Open { focused } = self.typing.overlay() {
            match key.code {
                KeyCode::Tab => {
                    if focused {
                        self.typing.blur_overlay();
                    } else {
                        self.typing.focus_overlay();
                    }
                    return;
                }
                KeyCode::Esc if !focused => {
                    self.typing.toggle_overlay();
                    return;
                }
                _ if focused => {
                    self.handle_editor_key(key);
                    return;
                }
                _ => {}
            }
        }

        let event = key.to_session_event();
        let outcome = self.typing.handle_key(&event, &self.locator());
        trace!(?event, ?outcome, "key forwarded");
    }

    fn handle_editor_key(&mut self, key: &KeyEvent) {
        match self.editor.handle(key, self.typing.direction()) {
            InputResult::Submit => {
                self.typing.replace_text(self.editor.value());
                self.editor.clear();
            }
            InputResult::Cancel => self.typing.toggle_overlay(),
            InputResult::Continue => {}
        }
    }

    /// A left click at the given terminal cell
    pub fn handle_click(&mut self, column: u16, row: u16) {
        if let Some(editor) = self.view.editor
            && relative_position(editor, column, row).is_some()
        {
            self.typing.focus_overlay();
            return;
        }

        let Some((row, x)) = relative_position(self.view.text, column, row) else {
            return;
        };

        let width = self.view.text.width;
        let index = self.layout(width).index_at_visual(
            row + self.view.scroll,
            x,
            self.typing.direction(),
            usize::from(width),
        );
        if let Some(index) = index {
            self.typing.select(index);
        }
    }
}

// Rendering logic
impl Session {
    pub fn render(&mut self, frame: &mut Frame, area: Rect, config: &Config) {
        let overlay = self.typing.overlay();
        let editor_height = if overlay.is_open() { EDITOR_HEIGHT } else { 0 };

        let [editor, _, text, _, metrics] = Layout::vertical([
            Constraint::Length(editor_height),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        self.view.editor = None;
        if let Overlay::Open { focused } = overlay {
            self.editor
                .render(frame, editor, config, self.typing.direction(), focused);
            self.view.editor = Some(editor);
        }

        self.render_text(frame, text, config);
        self.render_metrics(frame, metrics, config);
    }

    fn render_text(&mut self, frame: &mut Frame, area: Rect, config: &Config) {
        let layout = self.layout(area.width);
        let direction = self.typing.direction();
        let cursor = self.typing.cursor();
        let height = usize::from(area.height);

        let scroll = layout.scroll_offset(cursor, height);
        let (cursor_row, _) = layout.cursor_position(cursor);
        let past_end = cursor >= self.typing.text().len();
        let cursor_style = cursor_style(config);

        let lines: Vec<Line> = (scroll..layout.row_count().min(scroll + height))
            .map(|row| {
                let mut spans: Vec<Span> = layout
                    .visual_order(row, direction)
                    .into_iter()
                    .map(|index| self.glyph(index, config))
                    .collect();

                if past_end && row == cursor_row {
                    let end_cell = Span::styled(" ", cursor_style);
                    if direction.is_rtl() {
                        spans.insert(0, end_cell);
                    } else {
                        spans.push(end_cell);
                    }
                }

                if direction.is_rtl() {
                    Line::from(spans).right_aligned()
                } else {
                    Line::from(spans)
                }
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), area);
        self.view.text = area;
        self.view.scroll = scroll;
    }

    /// The styled cell for the character at `index`
    fn glyph(&self, index: usize, config: &Config) -> Span<'static> {
        let theme = &config.settings.theme;
        let expected = self.typing.text().get(index).unwrap_or(' ');
        let content = if expected == '\n' {
            NEWLINE_GLYPH.to_string()
        } else {
            expected.to_string()
        };

        let style = match self.typing.buffer().get(index) {
            None => Style::new().fg(theme.text.untyped),
            Some(typed) if typed == expected => Style::new().fg(theme.text.correct),
            // A wrong space has nothing to color but its background
            Some(_) if expected.is_whitespace() => Style::new().bg(theme.text.incorrect),
            Some(_) => Style::new().fg(theme.text.incorrect),
        };

        let style = if index == self.typing.cursor() {
            cursor_style(config)
        } else {
            style
        };

        Span::styled(content, style)
    }

    fn render_metrics(&self, frame: &mut Frame, area: Rect, config: &Config) {
        let theme = &config.settings.theme;
        let metrics = self.typing.metrics();
        let summary = metrics.summary();
        let separator = Span::from(" | ").fg(theme.text.muted);

        let mut spans = vec![
            Span::from(summary.time()),
            separator.clone(),
            Span::from(summary.accuracy()),
            separator.clone(),
            Span::from(summary.wpm()),
            separator.clone(),
            Span::from(summary.completion()),
        ];
        if metrics.finished {
            spans.push(separator);
            spans.push(Span::from("Finished!").fg(theme.text.correct).bold());
        }

        frame.render_widget(Line::from(spans).centered(), area);
    }
}

fn cursor_style(config: &Config) -> Style {
    let theme = &config.settings.theme.cursor;
    Style::new().fg(theme.foreground).bg(theme.background)
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use ratatui::{Terminal, backend::TestBackend};
    use scimitar::Direction;

    use super::*;
    use crate::config::Settings;

    fn config() -> Config {
        Config {
            settings: Settings::default(),
            config_dir: std::path::PathBuf::new(),
            data_dir: None,
        }
    }

    fn draw(
        session: &mut Session,
        config: &Config,
        width: u16,
        height: u16,
    ) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("test backend");
        terminal
            .draw(|frame| session.render(frame, frame.area(), config))
            .expect("draw");
        terminal
    }

    fn row_text(terminal: &Terminal<TestBackend>, row: u16) -> String {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.width)
            .map(|x| buffer[(x, row)].symbol())
            .collect()
    }

    fn press(session: &mut Session, code: KeyCode) {
        session.handle_key(&KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_typing_and_metrics_bar() {
        let config = config();
        let mut session = Session::new(TypingSession::with_text("cat", Direction::Ltr), false);

        for character in "cat".chars() {
            press(&mut session, KeyCode::Char(character));
        }
        assert!(session.typing().metrics().finished);

        let terminal = draw(&mut session, &config, 120, 6);
        assert!(row_text(&terminal, 1).starts_with("cat"));
        assert!(row_text(&terminal, 5).contains("Finished!"));
    }

    #[test]
    fn test_rtl_rows_are_right_aligned() {
        let config = config();
        let mut session = Session::new(TypingSession::with_text("אבג", Direction::Rtl), false);

        let terminal = draw(&mut session, &config, 10, 6);
        // Drawn right to left, against the right edge
        assert!(row_text(&terminal, 1).ends_with("גבא"));
    }

    #[test]
    fn test_cursor_inside_long_whitespace_run_is_drawn() {
        let config = config();
        let mut session = Session::new(
            TypingSession::with_text("ab        cd", Direction::Ltr),
            false,
        );
        for character in "ab      ".chars() {
            press(&mut session, KeyCode::Char(character));
        }
        assert_eq!(session.typing().cursor(), 8);

        let terminal = draw(&mut session, &config, 6, 6);
        let buffer = terminal.backend().buffer();
        let background = config.settings.theme.cursor.background;
        let cursor_cells: Vec<(u16, u16)> = (0..6)
            .flat_map(|y| (0..6).map(move |x| (x, y)))
            .filter(|&position| buffer[position].bg == background)
            .collect();
        // Rows are "ab   ", "     " and "cd", so the cursor is the fourth cell of the second
        assert_eq!(cursor_cells, vec![(3, 2)]);
    }

    #[test]
    fn test_click_selects_in_visual_order() {
        let config = config();
        let mut session = Session::new(TypingSession::with_text("אבג", Direction::Rtl), false);
        draw(&mut session, &config, 10, 6);

        // The rightmost cell holds the first character
        session.handle_click(9, 1);
        assert_eq!(session.typing().cursor(), 0);
        session.handle_click(7, 1);
        assert_eq!(session.typing().cursor(), 2);

        // Empty cells and the metrics bar select nothing
        session.handle_click(0, 1);
        session.handle_click(9, 5);
        assert_eq!(session.typing().cursor(), 2);
    }

    #[test]
    fn test_editor_replaces_text() {
        let config = config();
        let mut session = Session::new(TypingSession::with_text("cat", Direction::Ltr), false);

        session.toggle_editor();
        for character in "dog".chars() {
            press(&mut session, KeyCode::Char(character));
        }
        // The editor has focus, so the test is untouched
        assert_eq!(session.typing().cursor(), 0);

        session.handle_key(&KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert_eq!(session.typing().text().to_string(), "dog");
        assert!(!session.typing().overlay().is_open());

        let terminal = draw(&mut session, &config, 40, 20);
        assert!(row_text(&terminal, 1).starts_with("dog"));
    }

    #[test]
    fn test_blurred_editor_lets_typing_through() {
        let mut session = Session::new(TypingSession::with_text("cat", Direction::Ltr), false);

        session.toggle_editor();
        press(&mut session, KeyCode::Tab);
        press(&mut session, KeyCode::Char('c'));
        assert_eq!(session.typing().cursor(), 1);

        press(&mut session, KeyCode::Esc);
        assert!(!session.typing().overlay().is_open());
    }

    #[test]
    fn test_restart_needs_progress() {
        let mut session = Session::new(TypingSession::with_text("cat", Direction::Ltr), false);
        session.restart();
        assert_eq!(session.typing().cursor(), 0);

        press(&mut session, KeyCode::Char('c'));
        session.restart();
        assert_eq!(session.typing().cursor(), 0);
        assert!(!session.typing().can_restart());
    }
}
