//! # Session Module - The Session Controller
//!
//! This module owns every piece of mutable state of a typing test and is the only place where
//! that state changes.
//!
//! - [`SessionState`] is the session record. Each classified action maps to exactly one
//!   transition on it, so every transition can be tested without a clock or a screen.
//! - [`TypingSession`] wraps the record with a [`Clock`], a [`Ticker`] and the
//!   [`Configuration`], and exposes the event-level API a front end calls: key presses, ticks,
//!   pointer selection and the explicit UI actions.
//!
//! ## Session Lifecycle
//!
#![doc = simple_mermaid::mermaid!("../diagrams/session_lifecycle.mmd")]
//!
//! ## Usage Examples
//!
//! ### Correcting a mistake
//!
//! ```rust
//! use scimitar::{Direction, Key, KeyEvent, NoGeometry, TypingSession};
//!
//! let mut session = TypingSession::with_text("cat", Direction::Ltr);
//! for key in [Key::Char('c'), Key::Char('x'), Key::Backspace, Key::Char('a'), Key::Char('t')] {
//!     session.handle_key(&KeyEvent::new(key), &NoGeometry);
//! }
//!
//! // Backspace cleared 'x', so 'a' took its slot
//! assert_eq!(session.metrics().correct, 3);
//! assert!(session.metrics().finished);
//! ```
//!
//! ### Right-to-left navigation
//!
//! ```rust
//! use scimitar::{Direction, Key, KeyEvent, NoGeometry, TypingSession};
//!
//! let mut session = TypingSession::with_text("שלום עולם", Direction::Rtl);
//!
//! // Visual left moves forward through right-to-left text
//! session.handle_key(&KeyEvent::new(Key::ArrowLeft).with_ctrl(), &NoGeometry);
//! assert_eq!(session.cursor(), 5);
//! ```

use tracing::{debug, info};
use web_time::{Duration, Instant};

use crate::buffer::TypedBuffer;
use crate::config::Configuration;
use crate::input_handler::{Action, KeyEvent, KeyOutcome, classify};
use crate::locator::{Vertical, VerticalLocator};
use crate::navigation::{self, Horizontal, Movement};
use crate::statistics::Metrics;
use crate::text::{Direction, ReferenceText};
use crate::timer::{Clock, SessionTimer, SystemClock, Ticker};

/// State of the text-replacement overlay
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    #[default]
    Closed,
    Open {
        /// Whether the overlay's input has keyboard focus
        focused: bool,
    },
}

impl Overlay {
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open { .. })
    }

    /// Whether key presses belong to the overlay instead of the session
    pub const fn captures_keys(self) -> bool {
        matches!(self, Self::Open { focused: true })
    }
}

/// The complete state of one typing test
///
/// The buffer always has the length of the reference text and the cursor always lies in
/// `[0, text.len()]`. Every method keeps both invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    text: ReferenceText,
    buffer: TypedBuffer,
    cursor: usize,
    direction: Direction,
    timer: SessionTimer,
    overlay: Overlay,
}

impl SessionState {
    pub fn new(text: ReferenceText, direction: Direction) -> Self {
        Self {
            buffer: TypedBuffer::new(text.len()),
            text,
            cursor: 0,
            direction,
            timer: SessionTimer::new(),
            overlay: Overlay::Closed,
        }
    }

    pub fn text(&self) -> &ReferenceText {
        &self.text
    }

    pub fn buffer(&self) -> &TypedBuffer {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn timer(&self) -> &SessionTimer {
        &self.timer
    }

    pub fn overlay(&self) -> Overlay {
        self.overlay
    }

    /// Metrics of the current state, computed from scratch
    pub fn metrics(&self) -> Metrics {
        Metrics::compute(&self.text, &self.buffer, self.timer.elapsed())
    }

    /// Restarting only makes sense once something happened
    pub fn can_restart(&self) -> bool {
        self.timer.has_started() || self.cursor != 0
    }

    fn move_to(&mut self, cursor: usize) {
        self.cursor = navigation::clamp(cursor, self.text.len());
    }

    /// Move one character visually
    pub fn step(&mut self, horizontal: Horizontal) {
        self.move_to(navigation::step(
            self.text.len(),
            self.cursor,
            self.direction,
            horizontal,
        ));
    }

    /// Jump one word visually
    pub fn word_jump(&mut self, horizontal: Horizontal) {
        self.move_to(navigation::word_jump(
            &self.text,
            self.cursor,
            self.direction,
            horizontal,
        ));
    }

    /// Move one rendered line up or down
    pub fn line<L: VerticalLocator + ?Sized>(&mut self, vertical: Vertical, locator: &L) {
        self.move_to(navigation::vertical(
            locator,
            self.cursor,
            self.text.len(),
            vertical,
        ));
    }

    pub fn apply_movement<L: VerticalLocator + ?Sized>(&mut self, movement: Movement, locator: &L) {
        match movement {
            Movement::Step(horizontal) => self.step(horizontal),
            Movement::Word(horizontal) => self.word_jump(horizontal),
            Movement::Line(vertical) => self.line(vertical, locator),
        }
    }

    /// Clear back to the previous word start. Returns true if anything was cleared.
    pub fn delete_word(&mut self) -> bool {
        let range = navigation::word_delete_range(&self.text, self.cursor);
        if range.is_empty() {
            return false;
        }

        self.cursor = range.start;
        self.buffer.clear_range(range);
        true
    }

    /// Clear the character before the cursor. Returns true if the cursor was not at the start.
    pub fn delete_char(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }

        self.cursor -= 1;
        self.buffer.clear(self.cursor);
        true
    }

    /// Type `char` at the cursor, starting the timer on the first accepted character
    ///
    /// Returns false, and changes nothing, when the cursor is past the end of the text.
    pub fn insert(&mut self, char: char, now: Instant) -> bool {
        if self.cursor >= self.text.len() {
            return false;
        }

        if !self.timer.has_started() {
            info!(length = self.text.len(), "typing started");
        }
        self.timer.start(now);
        self.buffer.set(self.cursor, char);
        self.cursor += 1;
        true
    }

    /// Refresh the timer's `now`
    pub fn refresh(&mut self, now: Instant) {
        self.timer.refresh(now);
    }

    /// Pointer selection: put the cursor on `index` and give focus back to the text
    pub fn select(&mut self, index: usize) {
        self.move_to(index);
        self.blur_overlay();
    }

    /// Clear the buffer, cursor and timer, and close the overlay
    ///
    /// Keeps the reference text and the direction.
    pub fn reset(&mut self) {
        self.buffer.reset(self.text.len());
        self.cursor = 0;
        self.timer.clear();
        self.overlay = Overlay::Closed;
    }

    /// Switch direction, swapping in the other default text if the text is the current default
    pub fn toggle_direction(&mut self) {
        let text = std::mem::take(&mut self.text);
        self.text = text.after_toggle(self.direction);
        self.direction = self.direction.toggled();
        self.reset();
    }

    /// Replace the reference text. Empty input falls back to the direction's default text.
    pub fn replace_text(&mut self, input: &str) {
        self.text = ReferenceText::for_direction(Some(input), self.direction);
        self.reset();
    }

    /// Open the overlay with focus, or close it
    pub fn toggle_overlay(&mut self) {
        self.overlay = match self.overlay {
            Overlay::Closed => Overlay::Open { focused: true },
            Overlay::Open { .. } => Overlay::Closed,
        };
    }

    pub fn focus_overlay(&mut self) {
        if self.overlay.is_open() {
            self.overlay = Overlay::Open { focused: true };
        }
    }

    pub fn blur_overlay(&mut self) {
        if self.overlay.is_open() {
            self.overlay = Overlay::Open { focused: false };
        }
    }

    /// Whether the platform should skip its default handling of `action`
    fn outcome(&self, action: Action) -> KeyOutcome {
        match action {
            Action::Ignore => KeyOutcome::Ignored,
            Action::Insert(' ') => KeyOutcome::Consumed,
            Action::Insert(_) if self.cursor >= self.text.len() => KeyOutcome::Ignored,
            _ => KeyOutcome::Consumed,
        }
    }
}

/// A typing test driven by key events and a clock
///
/// The session keeps its ticker armed exactly while the timer runs and the text is not
/// finished. Front ends wait at most [`poll_timeout`](Self::poll_timeout) for the next event and
/// call [`tick`](Self::tick) when it elapses.
///
/// # Examples
///
/// ```rust
/// use scimitar::{Direction, Key, KeyEvent, ManualClock, NoGeometry, TypingSession};
/// use web_time::Duration;
///
/// let clock = ManualClock::new();
/// let mut session = TypingSession::with_text("hi", Direction::Ltr).with_clock(&clock);
///
/// session.handle_key(&KeyEvent::new(Key::Char('h')), &NoGeometry);
/// clock.advance(Duration::from_secs(1));
/// assert!(session.tick());
/// assert_eq!(session.metrics().elapsed, Duration::from_secs(1));
/// ```
#[derive(Debug, Clone)]
pub struct TypingSession<C: Clock = SystemClock> {
    state: SessionState,
    clock: C,
    ticker: Ticker,
    config: Configuration,
}

impl TypingSession {
    /// Create a session on the default text for `direction`
    pub fn new(direction: Direction) -> Self {
        Self::from_text(ReferenceText::for_direction(None, direction), direction)
    }

    /// Create a session on `text`, or on the default text for `direction` if `text` is empty
    pub fn with_text(text: &str, direction: Direction) -> Self {
        Self::from_text(ReferenceText::for_direction(Some(text), direction), direction)
    }

    fn from_text(text: ReferenceText, direction: Direction) -> Self {
        let config = Configuration::default();
        Self {
            state: SessionState::new(text, direction),
            clock: SystemClock,
            ticker: Ticker::new(config.tick_interval),
            config,
        }
    }
}

impl<C: Clock> TypingSession<C> {
    /// Replace the clock (builder pattern)
    pub fn with_clock<D: Clock>(self, clock: D) -> TypingSession<D> {
        TypingSession {
            state: self.state,
            clock,
            ticker: self.ticker,
            config: self.config,
        }
    }

    /// Configure the session with custom settings (builder pattern)
    pub fn with_configuration(mut self, config: Configuration) -> Self {
        self.ticker = Ticker::new(config.tick_interval);
        self.config = config;
        self.sync_ticker(self.clock.now());
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    pub fn text(&self) -> &ReferenceText {
        self.state.text()
    }

    pub fn buffer(&self) -> &TypedBuffer {
        self.state.buffer()
    }

    pub fn cursor(&self) -> usize {
        self.state.cursor()
    }

    pub fn direction(&self) -> Direction {
        self.state.direction()
    }

    pub fn overlay(&self) -> Overlay {
        self.state.overlay()
    }

    pub fn metrics(&self) -> Metrics {
        self.state.metrics()
    }

    pub fn can_restart(&self) -> bool {
        self.state.can_restart()
    }

    /// Whether the refresh ticker is running
    pub fn is_ticking(&self) -> bool {
        self.ticker.is_armed()
    }

    /// Handle one key press
    ///
    /// Does nothing while the overlay has focus. Otherwise the key is classified and applied,
    /// and the returned outcome tells the caller whether to suppress the key's default
    /// handling.
    pub fn handle_key<L: VerticalLocator + ?Sized>(
        &mut self,
        event: &KeyEvent,
        locator: &L,
    ) -> KeyOutcome {
        if self.state.overlay().captures_keys() {
            return KeyOutcome::Ignored;
        }

        let action = classify(event);
        let outcome = self.state.outcome(action);

        let edited = match action {
            Action::Move(movement) => {
                self.state.apply_movement(movement, locator);
                false
            }
            Action::DeleteWord => self.state.delete_word(),
            Action::DeleteChar => self.state.delete_char(),
            Action::Insert(char) => self.state.insert(char, self.clock.now()),
            Action::Ignore => false,
        };

        debug!(?action, cursor = self.state.cursor(), edited, "key handled");

        if edited {
            let now = self.clock.now();
            self.state.refresh(now);
            self.sync_ticker(now);
            if !self.ticker.is_armed() && self.state.metrics().finished {
                info!(elapsed = ?self.state.timer().elapsed(), "text finished");
            }
        }

        outcome
    }

    /// Refresh the clock if a tick is due. Returns true if it refreshed.
    pub fn tick(&mut self) -> bool {
        let now = self.clock.now();
        if !self.ticker.poll(now) {
            return false;
        }

        self.state.refresh(now);
        self.sync_ticker(now);
        true
    }

    /// Time until the next tick is due, or `None` while nothing needs refreshing
    pub fn poll_timeout(&self) -> Option<Duration> {
        self.ticker.remaining(self.clock.now())
    }

    /// Pointer selection of the character at `index`
    pub fn select(&mut self, index: usize) {
        self.state.select(index);
        debug!(cursor = self.state.cursor(), "selected");
    }

    /// Restart the test on the same text
    pub fn reset(&mut self) {
        self.state.reset();
        self.ticker.disarm();
        info!("session reset");
    }

    pub fn toggle_direction(&mut self) {
        self.state.toggle_direction();
        self.ticker.disarm();
        info!(direction = %self.state.direction(), "direction toggled");
    }

    /// Replace the reference text and restart
    pub fn replace_text(&mut self, input: &str) {
        self.state.replace_text(input);
        self.ticker.disarm();
        info!(length = self.state.text().len(), "text replaced");
    }

    pub fn toggle_overlay(&mut self) {
        self.state.toggle_overlay();
    }

    pub fn focus_overlay(&mut self) {
        self.state.focus_overlay();
    }

    pub fn blur_overlay(&mut self) {
        self.state.blur_overlay();
    }

    fn sync_ticker(&mut self, now: Instant) {
        if self.state.timer().has_started() && !self.state.metrics().finished {
            self.ticker.arm(now);
        } else {
            self.ticker.disarm();
        }
    }
}
