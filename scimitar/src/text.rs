use std::fmt;

/// Sample text shown when no text has been supplied in [`Direction::Ltr`] mode
pub const DEFAULT_LTR_TEXT: &str = "This is a sample text for LTR typing. Use arrows/click to navigate. Backspace deletes. Restart or change the text using the buttons.";

/// Sample text shown when no text has been supplied in [`Direction::Rtl`] mode
pub const DEFAULT_RTL_TEXT: &str = "זהו טקסט לדוגמה להקלדה מימין לשמאל. השתמש בחצים/קליק לניווט. Backspace מוחק. הפעל מחדש או שנה את הטקסט באמצעות הכפתורים.";

/// Which way the reference text runs on screen
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Left-to-right
    #[default]
    Ltr,
    /// Right-to-left
    Rtl,
}

impl Direction {
    /// Returns the opposite direction
    pub const fn toggled(self) -> Self {
        match self {
            Self::Ltr => Self::Rtl,
            Self::Rtl => Self::Ltr,
        }
    }

    pub const fn is_rtl(self) -> bool {
        matches!(self, Self::Rtl)
    }

    /// The built-in sample text for this direction
    pub const fn default_text(self) -> &'static str {
        match self {
            Self::Ltr => DEFAULT_LTR_TEXT,
            Self::Rtl => DEFAULT_RTL_TEXT,
        }
    }

    /// Upper-case label, as shown on a direction toggle
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ltr => "LTR",
            Self::Rtl => "RTL",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The fixed text the user has to reproduce
///
/// Stored as individual `char`s so that every index lines up with the typed buffer and the
/// cursor. A `'\n'` is an explicit line break from the supplied text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceText {
    characters: Vec<char>,
}

impl ReferenceText {
    pub fn new(string: &str) -> Self {
        Self {
            characters: string.chars().collect(),
        }
    }

    /// Builds the text for a replacement request
    ///
    /// Empty or absent input falls back to the default text of `direction`.
    ///
    /// ```rust
    /// use scimitar::{Direction, ReferenceText, DEFAULT_RTL_TEXT};
    ///
    /// let text = ReferenceText::for_direction(Some(""), Direction::Rtl);
    /// assert_eq!(text.to_string(), DEFAULT_RTL_TEXT);
    ///
    /// let text = ReferenceText::for_direction(Some("hello"), Direction::Rtl);
    /// assert_eq!(text.to_string(), "hello");
    /// ```
    pub fn for_direction(input: Option<&str>, direction: Direction) -> Self {
        match input {
            Some(string) if !string.is_empty() => Self::new(string),
            _ => Self::new(direction.default_text()),
        }
    }

    /// Returns the text to use after switching from `from` to `from.toggled()`
    ///
    /// Only an untouched default text is swapped. Anything the user supplied is kept verbatim.
    pub fn after_toggle(self, from: Direction) -> Self {
        if self.is_default_for(from) {
            Self::new(from.toggled().default_text())
        } else {
            self
        }
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<char> {
        self.characters.get(index).copied()
    }

    pub fn last(&self) -> Option<char> {
        self.characters.last().copied()
    }

    /// Returns true if the character at `index` is Unicode whitespace
    ///
    /// Out of range indices are not whitespace.
    pub fn is_whitespace_at(&self, index: usize) -> bool {
        self.get(index).is_some_and(char::is_whitespace)
    }

    pub fn chars(&self) -> &[char] {
        &self.characters
    }

    pub fn is_default_for(&self, direction: Direction) -> bool {
        self.characters.iter().copied().eq(direction.default_text().chars())
    }
}

impl Default for ReferenceText {
    fn default() -> Self {
        Self::new(DEFAULT_LTR_TEXT)
    }
}

impl fmt::Display for ReferenceText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.characters.iter().try_for_each(|c| fmt::Write::write_char(f, *c))
    }
}

impl From<&str> for ReferenceText {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
