//! Formulas behind the metrics engine.
//!
//! Every function is total: the degenerate inputs (nothing typed, empty text, no time elapsed)
//! have a defined value instead of producing `NaN` or infinity.

use web_time::Duration;

use crate::{AVERAGE_WORD_LENGTH, Float, Minutes};

/// Get the minutes elapsed in a duration
pub fn minutes(duration: Duration) -> Minutes {
    duration.as_secs_f64() / 60.0
}

/// Typing accuracy as a percentage between 0.0 - 100.0
///
/// * `correct` - How many typed characters match the reference
/// * `typed` - How many characters are currently typed
///
/// Defined as 100.0 when nothing has been typed.
pub fn accuracy(correct: usize, typed: usize) -> Float {
    if typed == 0 {
        return 100.0;
    }
    (correct as Float / typed as Float) * 100.0
}

/// Share of the reference text that is typed correctly, between 0.0 - 100.0
///
/// * `correct` - How many typed characters match the reference
/// * `text_len` - Length of the reference text
///
/// Defined as 0.0 for an empty text.
pub fn completion(correct: usize, text_len: usize) -> Float {
    if text_len == 0 {
        return 0.0;
    }
    (correct as Float / text_len as Float) * 100.0
}

/// Net Words Per Minute
///
/// Only correctly typed characters count, and a word is [`AVERAGE_WORD_LENGTH`] characters.
///
/// * `correct` - How many typed characters match the reference
/// * `minutes` - How many minutes have gone by
///
/// Defined as 0.0 when no time has elapsed.
pub fn net_wpm(correct: usize, minutes: Minutes) -> Float {
    if minutes <= 0.0 {
        return 0.0;
    }
    (correct as Float / AVERAGE_WORD_LENGTH as Float) / minutes
}
