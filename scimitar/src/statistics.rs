//! # Statistics Module - The Metrics Engine
//!
//! Turns a reference text, a typed buffer and an elapsed time into a [`Metrics`] snapshot.
//!
//! Snapshots are never cached or accumulated. The buffer can be edited anywhere (the cursor
//! moves freely and deletions clear arbitrary ranges), so every call walks the buffer from
//! scratch. This is O(n) in the text length, which is cheap for any text a human types.

use std::fmt;

use web_time::Duration;

use crate::buffer::TypedBuffer;
use crate::math;
use crate::text::ReferenceText;
use crate::Float;

/// A point-in-time view of the typing performance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    /// Number of set slots within the reference text
    pub typed: usize,
    /// Number of set slots matching the reference character
    pub correct: usize,
    /// Percentage of typed characters that are correct (100.0 when nothing is typed)
    pub accuracy: Float,
    /// Net words per minute, counting only correct characters
    pub wpm: Float,
    /// Percentage of the reference text typed correctly
    pub completion: Float,
    /// True once every reference character has been typed correctly
    pub finished: bool,
    /// Time since the first accepted character
    pub elapsed: Duration,
}

impl Metrics {
    /// Compute a snapshot
    ///
    /// ```rust
    /// use scimitar::{Metrics, ReferenceText, TypedBuffer};
    /// use web_time::Duration;
    ///
    /// let text = ReferenceText::new("cat");
    /// let mut buffer = TypedBuffer::new(text.len());
    /// buffer.set(0, 'c');
    /// buffer.set(1, 'x');
    ///
    /// let metrics = Metrics::compute(&text, &buffer, Duration::from_secs(6));
    /// assert_eq!(metrics.typed, 2);
    /// assert_eq!(metrics.correct, 1);
    /// assert_eq!(metrics.accuracy, 50.0);
    /// assert!(!metrics.finished);
    /// ```
    pub fn compute(text: &ReferenceText, buffer: &TypedBuffer, elapsed: Duration) -> Self {
        let (typed, correct) = text
            .chars()
            .iter()
            .enumerate()
            .filter_map(|(index, expected)| buffer.get(index).map(|typed| typed == *expected))
            .fold((0, 0), |(typed, correct), is_correct| {
                (typed + 1, correct + usize::from(is_correct))
            });

        // `correct == len` already implies the last character matches. An empty text counts
        // as finished.
        let finished = correct == text.len();

        Self {
            typed,
            correct,
            accuracy: math::accuracy(correct, typed),
            wpm: math::net_wpm(correct, math::minutes(elapsed)),
            completion: math::completion(correct, text.len()),
            finished,
            elapsed,
        }
    }

    /// Returns a displayable summary of the snapshot
    pub const fn summary(&self) -> Summary<'_> {
        Summary(self)
    }
}

/// Display adapter rendering the metrics as a single status line
///
/// ```text
/// Time: 12.3s | Accuracy: 97.5% | WPM (Net): 41.0 | Completed: 80.0%
/// ```
pub struct Summary<'a>(&'a Metrics);

impl Summary<'_> {
    pub fn time(&self) -> String {
        format!("Time: {:.1}s", self.0.elapsed.as_secs_f64())
    }

    pub fn accuracy(&self) -> String {
        format!("Accuracy: {:.1}%", self.0.accuracy)
    }

    pub fn wpm(&self) -> String {
        format!("WPM (Net): {:.1}", self.0.wpm)
    }

    pub fn completion(&self) -> String {
        format!("Completed: {:.1}%", self.0.completion)
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} | {}",
            self.time(),
            self.accuracy(),
            self.wpm(),
            self.completion()
        )?;
        if self.0.finished {
            f.write_str(" | Finished!")?;
        }
        Ok(())
    }
}
