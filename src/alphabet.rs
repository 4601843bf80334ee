use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AlphabetError;

/// Uppercase form of `c` when it maps to exactly one character, `c` otherwise.
///
/// Labels are compared one character at a time, so expansions such as
/// `ß` -> `SS` are left alone to keep indices aligned with the original text.
pub fn upper(c: char) -> char {
    let mut mapped = c.to_uppercase();
    match (mapped.next(), mapped.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

/// Ordered set of uppercase characters that may become accelerators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Alphabet {
    chars: Vec<char>,
}

impl Alphabet {
    pub const DEFAULT: &'static str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

    /// Builds an alphabet from literal characters, uppercasing them and
    /// dropping repeats. No range expansion takes place.
    pub fn new(chars: impl IntoIterator<Item = char>) -> Self {
        let mut alphabet = Alphabet { chars: Vec::new() };
        for c in chars {
            alphabet.insert(c);
        }
        alphabet
    }

    /// Parses the compact notation used for alphabets, where `a-b` expands to
    /// every character from `a` to `b` inclusive (`0-9A-Z`). A `-` at either
    /// end of the text is taken literally.
    pub fn parse(text: &str) -> Result<Self, AlphabetError> {
        let chars: Vec<char> = text.chars().collect();
        if chars.is_empty() {
            return Err(AlphabetError::Empty);
        }

        let mut alphabet = Alphabet { chars: Vec::new() };
        let mut i = 0;
        while i < chars.len() {
            let start = chars[i];
            if start.is_whitespace() || start.is_control() {
                return Err(AlphabetError::InvalidCharacter(start));
            }

            match (chars.get(i + 1), chars.get(i + 2)) {
                (Some('-'), Some(&end)) => {
                    if end.is_whitespace() || end.is_control() {
                        return Err(AlphabetError::InvalidCharacter(end));
                    }
                    if end < start {
                        return Err(AlphabetError::DescendingRange { start, end });
                    }
                    (start..=end)
                        .filter(|c| !c.is_whitespace() && !c.is_control())
                        .for_each(|c| alphabet.insert(c));
                    i += 3;
                }
                _ => {
                    alphabet.insert(start);
                    i += 1;
                }
            }
        }
        Ok(alphabet)
    }

    fn insert(&mut self, c: char) {
        let c = upper(c);
        if !self.chars.contains(&c) {
            self.chars.push(c);
        }
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&upper(c))
    }

    /// Removes `c` (case-insensitively), returning whether it was present.
    pub fn remove(&mut self, c: char) -> bool {
        let c = upper(c);
        match self.chars.iter().position(|&a| a == c) {
            Some(i) => {
                self.chars.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.chars.iter().copied()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Alphabet::new(Alphabet::DEFAULT.chars())
    }
}

impl FromStr for Alphabet {
    type Err = AlphabetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Alphabet::parse(s)
    }
}

impl TryFrom<String> for Alphabet {
    type Error = AlphabetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Alphabet::parse(&value)
    }
}

impl From<Alphabet> for String {
    fn from(alphabet: Alphabet) -> Self {
        alphabet.chars.into_iter().collect()
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.chars.iter().try_for_each(|c| write!(f, "{c}"))
    }
}
