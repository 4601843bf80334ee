use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlphabetError {
    #[error("alphabet is empty")]
    Empty,

    #[error("descending range {start}-{end} in alphabet")]
    DescendingRange { start: char, end: char },

    #[error("character {0:?} cannot be an accelerator")]
    InvalidCharacter(char),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Alphabet Error: {0}")]
    Alphabet(#[from] AlphabetError),

    #[error("Configuration Error: marker {0:?} must be a visible non-alphanumeric character")]
    InvalidMarker(char),

    #[error("Configuration Error: marker {0:?} is also a member of the alphabet")]
    MarkerInAlphabet(char),
}

pub type Result<T> = std::result::Result<T, Error>;

/// First offending marker found while validating a list of labels.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("label {label}: accelerator {key:?} at {position} is already used")]
    Duplicate {
        label: usize,
        position: usize,
        key: char,
    },

    #[error("label {label}: accelerator {key:?} at {position} is not in the alphabet")]
    OutsideAlphabet {
        label: usize,
        position: usize,
        key: char,
    },
}

impl ValidationError {
    /// `(label index, char index of the marker within that label)`
    pub fn location(&self) -> (usize, usize) {
        match *self {
            ValidationError::Duplicate {
                label, position, ..
            }
            | ValidationError::OutsideAlphabet {
                label, position, ..
            } => (label, position),
        }
    }

    pub fn key(&self) -> char {
        match *self {
            ValidationError::Duplicate { key, .. } | ValidationError::OutsideAlphabet { key, .. } => {
                key
            }
        }
    }
}
