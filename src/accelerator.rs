use tracing::debug;

use crate::alphabet::Alphabet;
use crate::config::AcceleratorConfig;
use crate::error::{Result, ValidationError};
use crate::markup::find_accelerator;
use crate::solver::{hungarian, is_feasible};
use crate::validate;
use crate::weights::WeightMatrix;

/// Picks accelerators for groups of labels shown together, such as the items
/// of one menu or the buttons of one dialog.
#[derive(Debug, Clone, Default)]
pub struct Accelerator {
    config: AcceleratorConfig,
}

impl Accelerator {
    pub fn new(config: AcceleratorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Accelerator { config })
    }

    pub fn config(&self) -> &AcceleratorConfig {
        &self.config
    }

    /// Returns `labels` with an accelerator marked in as many of them as
    /// possible.
    ///
    /// Labels that already carry an accelerator are returned unchanged and
    /// their characters are not handed out again. Every other label gets at
    /// most one marker, in front of the best available character, and no two
    /// labels share a character.
    pub fn accelerated<S: AsRef<str>>(&self, labels: &[S]) -> Vec<String> {
        let marker = self.config.marker;
        let mut alphabet = self.config.alphabet.clone();
        // a marker in front of a literal marker would read as a doubled one
        alphabet.remove(marker);
        let mut pending = Vec::new();
        for (i, label) in labels.iter().enumerate() {
            match find_accelerator(label.as_ref(), marker) {
                Some(found) => {
                    alphabet.remove(found.key);
                }
                None => pending.push(i),
            }
        }

        let mut results: Vec<String> = labels.iter().map(|l| l.as_ref().to_owned()).collect();
        if pending.is_empty() {
            debug!(labels = labels.len(), "all labels already accelerated");
            return results;
        }

        let texts: Vec<&str> = pending.iter().map(|&i| labels[i].as_ref()).collect();
        let matrix = WeightMatrix::build(&texts, &alphabet);
        debug!(
            reserved = labels.len() - pending.len(),
            rows = matrix.rows(),
            columns = matrix.columns().len(),
            "built weight matrix"
        );

        let mut decorated = 0;
        for allocation in hungarian(matrix.costs()) {
            let (row, col) = allocation.assignment();
            if !is_feasible(matrix.costs()[(row, col)]) {
                continue;
            }
            let key = matrix.columns()[col];
            if let Some(label) = matrix.decorate(row, key, marker) {
                results[pending[row]] = label;
                decorated += 1;
            }
        }
        debug!(
            decorated,
            unassigned = pending.len() - decorated,
            "assigned accelerators"
        );

        results
    }

    pub fn check<S: AsRef<str>>(&self, labels: &[S]) -> std::result::Result<(), ValidationError> {
        validate::check(labels, &self.config.alphabet, self.config.marker)
    }

    pub fn is_valid<S: AsRef<str>>(&self, labels: &[S]) -> bool {
        validate::is_valid(labels, &self.config.alphabet, self.config.marker)
    }

    pub fn number_accelerated<S: AsRef<str>>(&self, labels: &[S]) -> usize {
        validate::number_accelerated(labels, self.config.marker)
    }

    pub fn quality<S: AsRef<str>>(&self, labels: &[S]) -> f64 {
        validate::quality(labels, self.config.marker)
    }
}

/// [`Accelerator::accelerated`] with the default marker and the given
/// alphabet.
pub fn accelerated<S: AsRef<str>>(labels: &[S], alphabet: &Alphabet) -> Vec<String> {
    Accelerator {
        config: AcceleratorConfig::with_alphabet(alphabet.clone()),
    }
    .accelerated(labels)
}
