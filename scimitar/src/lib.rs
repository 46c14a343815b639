//! # Scimitar - A library for bidirectional typing tests
//!
//! Scimitar holds the logic of a practice typing test: a fixed reference text, a sparse buffer
//! of what has been typed at an editable cursor, and live metrics derived from the two.
//! Reference texts may run left-to-right or right-to-left, which flips the meaning of the
//! horizontal arrow keys but never the meaning of deletions.
//!
//! ## Components
//!
//! - [`statistics`] / [`math`]: the metrics engine (accuracy, net WPM, completion, finished)
//! - [`navigation`]: cursor movement and word-deletion ranges
//! - [`locator`]: the vertical locator, which finds the nearest glyph on an adjacent line
//! - [`render`]: a deterministic line model that can feed the locator
//! - [`input_handler`]: classifies raw key events into actions
//! - [`session`]: the session controller that owns all mutable state
//!
#![doc = simple_mermaid::mermaid!("../diagrams/key_dispatch.mmd")]
//!
//! ## Quick start
//!
//! ```rust
//! use scimitar::{Direction, Key, KeyEvent, NoGeometry, TypingSession};
//!
//! let mut session = TypingSession::with_text("cat", Direction::Ltr);
//! for ch in "cat".chars() {
//!     session.handle_key(&KeyEvent::new(Key::Char(ch)), &NoGeometry);
//! }
//!
//! let metrics = session.metrics();
//! assert!(metrics.finished);
//! assert_eq!(metrics.accuracy, 100.0);
//! ```

pub mod buffer;
pub mod config;
pub mod input_handler;
pub mod locator;
pub mod math;
pub mod navigation;
pub mod render;
pub mod session;
pub mod statistics;
pub mod text;
pub mod timer;

pub use buffer::TypedBuffer;
pub use config::Configuration;
pub use input_handler::{Action, Key, KeyEvent, KeyOutcome, Modifiers, classify};
pub use locator::{GeometryLocator, GlyphBox, NoGeometry, Vertical, VerticalLocator};
pub use navigation::{Horizontal, Movement};
pub use session::{Overlay, SessionState, TypingSession};
pub use statistics::Metrics;
pub use text::{DEFAULT_LTR_TEXT, DEFAULT_RTL_TEXT, Direction, ReferenceText};
pub use timer::{Clock, ManualClock, SessionTimer, SystemClock, Ticker};

/// Number of characters that count as one word when calculating WPM
pub const AVERAGE_WORD_LENGTH: usize = 5;

// Types for more general type-safety
type Minutes = f64;
type Float = f64;
