//! Scanning labels for accelerator markers.
//!
//! A marker immediately followed by any other character makes that character
//! the label's accelerator. Two markers in a row stand for one literal marker
//! character and never mark anything.

pub const DEFAULT_MARKER: char = '&';

/// A live marker found in a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkedChar {
    /// Char index of the marker itself.
    pub position: usize,
    /// The accelerator character, as written.
    pub key: char,
    /// Visible character shown just before the accelerator, if any.
    pub preceded_by: Option<char>,
}

impl MarkedChar {
    pub fn tier(&self) -> Tier {
        match self.preceded_by {
            None => Tier::FirstCharacter,
            Some(c) if c.is_whitespace() => Tier::StartOfWord,
            Some(_) => Tier::InString,
        }
    }
}

/// How good a marker position is for the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    InString,
    StartOfWord,
    FirstCharacter,
}

impl Tier {
    pub const BEST: u32 = Tier::FirstCharacter.weight();

    pub const fn weight(self) -> u32 {
        match self {
            Tier::FirstCharacter => 4,
            Tier::StartOfWord => 2,
            Tier::InString => 1,
        }
    }
}

/// Returns the first live marker in `label`, skipping doubled markers.
/// A marker at the very end of the label marks nothing.
pub fn find_accelerator(label: &str, marker: char) -> Option<MarkedChar> {
    let mut chars = label.chars().enumerate();
    let mut preceded_by = None;
    while let Some((position, c)) = chars.next() {
        if c != marker {
            preceded_by = Some(c);
            continue;
        }
        match chars.next() {
            Some((_, next)) if next == marker => preceded_by = Some(marker),
            Some((_, key)) => {
                return Some(MarkedChar {
                    position,
                    key,
                    preceded_by,
                })
            }
            None => return None,
        }
    }
    None
}

/// Copy of `label` with `marker` inserted before the char at `index`.
pub fn insert_marker(label: &str, index: usize, marker: char) -> String {
    let mut decorated = String::with_capacity(label.len() + marker.len_utf8());
    for (i, c) in label.chars().enumerate() {
        if i == index {
            decorated.push(marker);
        }
        decorated.push(c);
    }
    decorated
}
