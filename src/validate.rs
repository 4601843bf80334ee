//! Checks over a list of labels that may already carry accelerators.

use std::collections::HashSet;

use crate::alphabet::{upper, Alphabet};
use crate::error::ValidationError;
use crate::markup::{find_accelerator, Tier};

/// Fails on the first label whose accelerator is outside `alphabet` or
/// repeats one used by an earlier label. Labels without an accelerator are
/// fine.
pub fn check<S: AsRef<str>>(
    labels: &[S],
    alphabet: &Alphabet,
    marker: char,
) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for (label, text) in labels.iter().enumerate() {
        let Some(found) = find_accelerator(text.as_ref(), marker) else {
            continue;
        };
        let key = upper(found.key);
        if !alphabet.contains(key) {
            return Err(ValidationError::OutsideAlphabet {
                label,
                position: found.position,
                key,
            });
        }
        if !seen.insert(key) {
            return Err(ValidationError::Duplicate {
                label,
                position: found.position,
                key,
            });
        }
    }
    Ok(())
}

pub fn is_valid<S: AsRef<str>>(labels: &[S], alphabet: &Alphabet, marker: char) -> bool {
    check(labels, alphabet, marker).is_ok()
}

pub fn number_accelerated<S: AsRef<str>>(labels: &[S], marker: char) -> usize {
    labels
        .iter()
        .filter(|l| find_accelerator(l.as_ref(), marker).is_some())
        .count()
}

/// Scores a list of labels from 0.0 (no accelerators) to 1.0 (every label
/// accelerated on its first character).
///
/// Each accelerator earns its [`Tier`] weight; the sum is then scaled by the
/// fraction of labels that have one.
pub fn quality<S: AsRef<str>>(labels: &[S], marker: char) -> f64 {
    if labels.is_empty() {
        return 0.;
    }

    let tiers: Vec<Tier> = labels
        .iter()
        .filter_map(|l| find_accelerator(l.as_ref(), marker))
        .map(|m| m.tier())
        .collect();
    let weight: u32 = tiers.iter().map(|t| t.weight()).sum();
    let total = labels.len() as f64;
    let done = tiers.len() as f64;

    (weight as f64 * (done / total)) / (total * Tier::BEST as f64)
}
