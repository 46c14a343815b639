//! Session settings that are not part of the test itself
//!
//! ```rust
//! use scimitar::{Configuration, Direction, TypingSession};
//! use web_time::Duration;
//!
//! let session = TypingSession::new(Direction::Ltr).with_configuration(Configuration {
//!     tick_interval: Duration::from_millis(250),
//! });
//! assert_eq!(session.configuration().tick_interval, Duration::from_millis(250));
//! ```

use web_time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    /// How often the clock is refreshed while the timer runs
    ///
    /// Elapsed time, and with it WPM, only moves on a refresh or an edit.
    pub tick_interval: Duration,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
        }
    }
}
