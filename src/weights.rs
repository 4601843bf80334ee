//! Cost of using each alphabet character as each label's accelerator.
//!
//! Lower is better. Costs fall into tiers: the first character, then a word
//! start written in uppercase, then any word start, then any other
//! occurrence. Within a tier an earlier position is cheaper. The position is
//! added to the tier offset, so the offsets dominate for short labels but a
//! late word start can cost more than an early one from a weaker tier.
//! The tier offsets are scaled by how many candidates the label has relative
//! to the whole column set, so labels with few options are served first.

use std::collections::BTreeSet;

use nalgebra::DMatrix;

use crate::alphabet::{upper, Alphabet};
use crate::markup::insert_marker;

pub const INFEASIBLE: f64 = f64::INFINITY;

const EXACT_WORD_START: f64 = 10.;
const WORD_START: f64 = 100.;
const ANYWHERE: f64 = 1000.;

#[derive(Debug, Clone)]
struct LabelProfile {
    text: String,
    original: Vec<char>,
    upper: Vec<char>,
    candidates: BTreeSet<char>,
}

impl LabelProfile {
    fn new(label: &str, alphabet: &Alphabet) -> Self {
        let original: Vec<char> = label.chars().collect();
        let upper: Vec<char> = original.iter().map(|&c| upper(c)).collect();
        let candidates = upper
            .iter()
            .copied()
            .filter(|&c| alphabet.contains(c))
            .collect();
        LabelProfile {
            text: label.to_owned(),
            original,
            upper,
            candidates,
        }
    }

    fn word_starts<'a>(chars: &'a [char], key: char) -> impl Iterator<Item = usize> + 'a {
        chars
            .windows(2)
            .enumerate()
            .filter(move |(_, pair)| pair[0].is_whitespace() && pair[1] == key)
            .map(|(i, _)| i + 1)
    }

    fn cost(&self, key: char, factor: f64) -> f64 {
        if !self.candidates.contains(&key) {
            return INFEASIBLE;
        }
        if self.upper.first() == Some(&key) {
            return factor;
        }
        if let Some(pos) = Self::word_starts(&self.original, key).next() {
            return factor * EXACT_WORD_START + pos as f64;
        }
        if let Some(pos) = Self::word_starts(&self.upper, key).next() {
            return factor * WORD_START + pos as f64;
        }
        match self.upper.iter().position(|&c| c == key) {
            Some(pos) => factor * ANYWHERE + pos as f64,
            None => INFEASIBLE,
        }
    }

    /// Char index the marker goes in front of when `key` is this label's
    /// accelerator.
    fn insertion_point(&self, key: char) -> Option<usize> {
        if self.upper.first() == Some(&key) {
            return Some(0);
        }
        Self::word_starts(&self.upper, key)
            .next()
            .or_else(|| self.upper.iter().position(|&c| c == key))
    }
}

/// Rows follow the label order, columns are the sorted union of every
/// label's candidate characters.
#[derive(Debug, Clone)]
pub struct WeightMatrix {
    profiles: Vec<LabelProfile>,
    columns: Vec<char>,
    costs: DMatrix<f64>,
}

impl WeightMatrix {
    pub fn build<S: AsRef<str>>(labels: &[S], alphabet: &Alphabet) -> Self {
        let profiles: Vec<LabelProfile> = labels
            .iter()
            .map(|label| LabelProfile::new(label.as_ref(), alphabet))
            .collect();

        let columns: Vec<char> = profiles
            .iter()
            .flat_map(|p| p.candidates.iter().copied())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let factors: Vec<f64> = profiles
            .iter()
            .map(|p| p.candidates.len() as f64 / columns.len().max(1) as f64)
            .collect();

        let costs = DMatrix::from_fn(profiles.len(), columns.len(), |row, col| {
            profiles[row].cost(columns[col], factors[row])
        });

        WeightMatrix {
            profiles,
            columns,
            costs,
        }
    }

    pub fn rows(&self) -> usize {
        self.profiles.len()
    }

    pub fn columns(&self) -> &[char] {
        &self.columns
    }

    pub fn costs(&self) -> &DMatrix<f64> {
        &self.costs
    }

    /// Cost of giving `key` to the label in `row`, `None` when either is
    /// out of range.
    pub fn cost(&self, row: usize, key: char) -> Option<f64> {
        let col = self.columns.binary_search(&upper(key)).ok()?;
        self.costs.get((row, col)).copied()
    }

    /// The label in `row` with `marker` placed before `key`, or `None` if
    /// `key` does not occur in it.
    pub fn decorate(&self, row: usize, key: char, marker: char) -> Option<String> {
        let profile = self.profiles.get(row)?;
        let index = profile.insertion_point(upper(key))?;
        Some(insert_marker(&profile.text, index, marker))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn alphabet() -> Alphabet {
        Alphabet::default()
    }

    #[test]
    fn columns_are_sorted_union() {
        let matrix = WeightMatrix::build(&["Quit", "Open"], &alphabet());
        assert_eq!(matrix.columns(), &['E', 'I', 'N', 'O', 'P', 'Q', 'T', 'U']);
        assert_eq!(matrix.rows(), 2);
        assert_eq!(matrix.costs().shape(), (2, 8));
    }

    #[test]
    fn tier_costs() {
        let matrix = WeightMatrix::build(&["Save as Copy"], &alphabet());
        // S A V E C O P Y
        let f = 8. / 8.;
        assert_eq!(matrix.cost(0, 'S'), Some(f));
        assert_eq!(matrix.cost(0, 'C'), Some(f * 10. + 8.));
        assert_eq!(matrix.cost(0, 'A'), Some(f * 100. + 5.));
        assert_eq!(matrix.cost(0, 'V'), Some(f * 1000. + 2.));
        assert_eq!(matrix.cost(0, 'Z'), None);
    }

    #[test]
    fn early_positions_follow_tier_order() {
        let matrix = WeightMatrix::build(&["x yz Wa", "Xylophone"], &alphabet());
        let first = matrix.cost(1, 'X').expect("candidate");
        let exact = matrix.cost(0, 'W').expect("candidate");
        let any_case = matrix.cost(0, 'Y').expect("candidate");
        let anywhere = matrix.cost(0, 'Z').expect("candidate");
        assert!(first < exact);
        assert!(exact < any_case);
        assert!(any_case < anywhere);
    }

    #[test]
    fn late_word_start_can_outweigh_weaker_tier() {
        let long = format!("ab{} Zed", "x".repeat(120));
        let matrix = WeightMatrix::build(&[long.as_str(), "a bz"], &alphabet());
        let late_exact = matrix.cost(0, 'Z').expect("candidate");
        let early_any_case = matrix.cost(1, 'B').expect("candidate");
        assert!(late_exact > early_any_case);
    }

    #[test]
    fn non_candidates_are_infeasible() {
        let matrix = WeightMatrix::build(&["Ab", "Cd"], &alphabet());
        assert_eq!(matrix.cost(0, 'C'), Some(INFEASIBLE));
        assert_eq!(matrix.cost(1, 'A'), Some(INFEASIBLE));
    }

    #[test]
    fn alphabet_limits_candidates() {
        let restricted = Alphabet::parse("A-C").expect("valid alphabet");
        let matrix = WeightMatrix::build(&["Abcdef", "xyz"], &restricted);
        assert_eq!(matrix.columns(), &['A', 'B', 'C']);
        assert!(matrix.costs().row(1).iter().all(|&c| c == INFEASIBLE));
    }

    #[test]
    fn empty_labels() {
        let matrix = WeightMatrix::build(&["", "   "], &alphabet());
        assert_eq!(matrix.costs().shape(), (2, 0));
    }

    #[test]
    fn decorate_prefers_word_start() {
        let matrix = WeightMatrix::build(&["Save As", "data base"], &alphabet());
        assert_eq!(matrix.decorate(0, 'S', '&').as_deref(), Some("&Save As"));
        assert_eq!(matrix.decorate(0, 'a', '&').as_deref(), Some("Save &As"));
        assert_eq!(matrix.decorate(0, 'V', '&').as_deref(), Some("Sa&ve As"));
        assert_eq!(matrix.decorate(1, 'B', '&').as_deref(), Some("data &base"));
        assert_eq!(matrix.decorate(1, 'Q', '&'), None);
    }
}
