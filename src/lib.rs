//! Keyboard accelerators for groups of UI labels.
//!
//! Given the labels of one menu or dialog, [`accelerated`] marks one
//! character in each label (`&Open`, `Save &As`) so that no two labels share
//! a character and each gets the best position available: the first
//! character, then the start of a word, then anywhere. Choosing the
//! characters is an assignment problem, solved optimally by [`hungarian`].
//!
//! ```
//! use altkey::{accelerated, is_valid, Alphabet};
//!
//! let alphabet = Alphabet::default();
//! let labels = accelerated(&["Open", "Save", "Save As", "Quit"], &alphabet);
//! assert_eq!(labels, ["&Open", "&Save", "Save &As", "&Quit"]);
//! assert!(is_valid(&labels, &alphabet));
//! ```

pub mod accelerator;
pub mod alphabet;
pub mod config;
pub mod error;
pub mod markup;
pub mod solver;
pub mod validate;
pub mod weights;

pub use accelerator::{accelerated, Accelerator};
pub use alphabet::Alphabet;
pub use config::AcceleratorConfig;
pub use error::{AlphabetError, Error, Result, ValidationError};
pub use markup::{find_accelerator, MarkedChar, Tier, DEFAULT_MARKER};
pub use solver::{hungarian, Allocation};
pub use weights::{WeightMatrix, INFEASIBLE};

pub fn check<S: AsRef<str>>(
    labels: &[S],
    alphabet: &Alphabet,
) -> std::result::Result<(), ValidationError> {
    validate::check(labels, alphabet, DEFAULT_MARKER)
}

pub fn is_valid<S: AsRef<str>>(labels: &[S], alphabet: &Alphabet) -> bool {
    validate::is_valid(labels, alphabet, DEFAULT_MARKER)
}

pub fn number_accelerated<S: AsRef<str>>(labels: &[S]) -> usize {
    validate::number_accelerated(labels, DEFAULT_MARKER)
}

pub fn quality<S: AsRef<str>>(labels: &[S]) -> f64 {
    validate::quality(labels, DEFAULT_MARKER)
}
