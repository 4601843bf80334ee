//! Minimum-cost assignment over a rectangular cost matrix (Kuhn-Munkres).
//!
//! Any non-finite cost (infinity, NaN) marks a pair that must not be
//! assigned. Such cells, and the rows and columns added to make the matrix
//! square, never appear in the result.

use nalgebra::{DMatrix, Scalar};
use num_traits::Float;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    None,
    Star,
    Prime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Allocation {
    row: usize,
    col: usize,
}

impl Allocation {
    pub fn assignment(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }
}

pub fn is_feasible<T: Float>(cost: T) -> bool {
    cost.is_finite()
}

/// Finds a minimum-cost assignment of rows to columns.
///
/// The solver first maximises the number of feasible pairs, then minimises
/// their total cost. Pairs come back in row order; a row or column with no
/// feasible partner is simply left out.
pub fn hungarian<T>(costs: &DMatrix<T>) -> Vec<Allocation>
where
    T: Float + Scalar,
{
    let (h, w) = costs.shape();
    if h == 0 || w == 0 {
        return Vec::new();
    }

    let mut munkres = Munkres::new(costs);
    munkres.solve();

    munkres
        .starred()
        .filter(|a| a.row < h && a.col < w && is_feasible(costs[(a.row, a.col)]))
        .collect()
}

enum Step {
    CoverStarredColumns,
    FindZero,
    Augment(usize, usize),
    Adjust,
}

/// Working state for one solve.
///
/// The reduced cost of a cell is its padded cost minus the offsets of its
/// row and column, so adjusting covered rows and uncovered columns touches
/// `2n` offsets instead of `n²` cells.
struct Munkres<T: Scalar> {
    costs: DMatrix<T>,
    row_offset: Vec<T>,
    col_offset: Vec<T>,
    marks: Vec<Mark>,
    covered_rows: Vec<bool>,
    covered_cols: Vec<bool>,
    // column of each uncovered row's smallest reduced cost among uncovered columns
    row_min: Vec<usize>,
    size: usize,
    tolerance: T,
}

impl<T> Munkres<T>
where
    T: Float + Scalar,
{
    /// Pads `costs` to a square matrix. Padding cells get the filler value,
    /// which is no larger than any real cost; infeasible cells get a finite
    /// value large enough that using one more of them always costs more than
    /// any combination of real costs.
    fn new(costs: &DMatrix<T>) -> Self {
        let (h, w) = costs.shape();
        let size = h.max(w);

        let (lo, hi) = costs
            .iter()
            .copied()
            .filter(|&c| is_feasible(c))
            .fold((T::zero(), T::zero()), |(lo, hi), c| (lo.min(c), hi.max(c)));
        let filler = lo;
        let scale = <T as num_traits::NumCast>::from(size + 1).unwrap_or_else(T::max_value);
        let infeasible = hi + (hi - lo + T::one()) * scale;

        let padded = DMatrix::from_fn(size, size, |row, col| {
            if row >= h || col >= w {
                filler
            } else if is_feasible(costs[(row, col)]) {
                costs[(row, col)]
            } else {
                infeasible
            }
        });

        Munkres {
            costs: padded,
            row_offset: vec![T::zero(); size],
            col_offset: vec![T::zero(); size],
            marks: vec![Mark::None; size * size],
            covered_rows: vec![false; size],
            covered_cols: vec![false; size],
            row_min: vec![0; size],
            size,
            tolerance: T::epsilon() * infeasible.abs().max(T::one()),
        }
    }

    fn solve(&mut self) {
        self.reduce_rows();
        self.star_zeros();

        let mut step = Step::CoverStarredColumns;
        loop {
            step = match step {
                Step::CoverStarredColumns => {
                    if self.cover_starred_columns() >= self.size {
                        break;
                    }
                    self.scan_rows();
                    Step::FindZero
                }
                Step::FindZero => match self.prime_zeros() {
                    Some((row, col)) => Step::Augment(row, col),
                    None => Step::Adjust,
                },
                Step::Augment(row, col) => {
                    self.augment(row, col);
                    Step::CoverStarredColumns
                }
                Step::Adjust => {
                    self.adjust();
                    Step::FindZero
                }
            };
        }
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    fn reduced(&self, row: usize, col: usize) -> T {
        self.costs[(row, col)] - self.row_offset[row] - self.col_offset[col]
    }

    fn is_zero(&self, row: usize, col: usize) -> bool {
        self.reduced(row, col).abs() <= self.tolerance
    }

    fn is_covered(&self, row: usize, col: usize) -> bool {
        self.covered_rows[row] || self.covered_cols[col]
    }

    fn starred(&self) -> impl Iterator<Item = Allocation> + '_ {
        self.marks
            .iter()
            .enumerate()
            .filter(|&(_, &m)| m == Mark::Star)
            .map(|(i, _)| Allocation {
                row: i / self.size,
                col: i % self.size,
            })
    }

    fn find_in_row(&self, row: usize, mark: Mark) -> Option<usize> {
        (0..self.size).find(|&col| self.marks[self.index(row, col)] == mark)
    }

    fn find_in_col(&self, col: usize, mark: Mark) -> Option<usize> {
        (0..self.size).find(|&row| self.marks[self.index(row, col)] == mark)
    }

    // subtract minimum value from each respective row
    fn reduce_rows(&mut self) {
        self.costs.row_iter_mut().for_each(|mut r| {
            let min = r.iter().copied().fold(T::infinity(), Float::min);
            r.apply(|v| *v = *v - min);
        });
    }

    // star zeros on distinct rows and columns, scanning row-major
    fn star_zeros(&mut self) {
        for row in 0..self.size {
            for col in 0..self.size {
                if self.is_zero(row, col) && !self.is_covered(row, col) {
                    let i = self.index(row, col);
                    self.marks[i] = Mark::Star;
                    self.covered_rows[row] = true;
                    self.covered_cols[col] = true;
                }
            }
        }
        self.clear_covers();
    }

    fn cover_starred_columns(&mut self) -> usize {
        for col in 0..self.size {
            self.covered_cols[col] = self.find_in_col(col, Mark::Star).is_some();
        }
        self.covered_cols.iter().filter(|&&c| c).count()
    }

    /// Recomputes every row's smallest uncovered cost. Lower columns win ties.
    fn scan_rows(&mut self) {
        for row in 0..self.size {
            let mut best = None;
            for col in (0..self.size).filter(|&c| !self.covered_cols[c]) {
                let value = self.reduced(row, col);
                if best.map_or(true, |(_, min)| value < min) {
                    best = Some((col, value));
                }
            }
            if let Some((col, _)) = best {
                self.row_min[row] = col;
            }
        }
    }

    /// Folds a newly uncovered column into the uncovered rows' minima.
    fn uncover_col(&mut self, col: usize) {
        self.covered_cols[col] = false;
        for row in (0..self.size).filter(|&r| !self.covered_rows[r]) {
            let current = self.row_min[row];
            let value = self.reduced(row, col);
            let min = self.reduced(row, current);
            if value < min || (value <= min && col < current) {
                self.row_min[row] = col;
            }
        }
    }

    /// First uncovered row, in index order, whose smallest uncovered cost is
    /// zero, paired with the column holding that cost.
    fn find_uncovered_zero(&self) -> Option<(usize, usize)> {
        (0..self.size)
            .filter(|&row| !self.covered_rows[row])
            .find(|&row| self.is_zero(row, self.row_min[row]))
            .map(|row| (row, self.row_min[row]))
    }

    /// Primes uncovered zeros until one is found whose row holds no star,
    /// which is where an augmenting path starts.
    fn prime_zeros(&mut self) -> Option<(usize, usize)> {
        while let Some((row, col)) = self.find_uncovered_zero() {
            let i = self.index(row, col);
            self.marks[i] = Mark::Prime;
            match self.find_in_row(row, Mark::Star) {
                Some(star_col) => {
                    self.covered_rows[row] = true;
                    self.uncover_col(star_col);
                }
                None => return Some((row, col)),
            }
        }
        None
    }

    fn augment(&mut self, row: usize, col: usize) {
        let mut path = vec![(row, col)];
        let mut col = col;
        while let Some(star_row) = self.find_in_col(col, Mark::Star) {
            path.push((star_row, col));
            // the star's row was covered when its prime was placed
            let Some(prime_col) = self.find_in_row(star_row, Mark::Prime) else {
                break;
            };
            path.push((star_row, prime_col));
            col = prime_col;
        }
        trace!(length = path.len(), "augmenting path");

        for (r, c) in path {
            let i = self.index(r, c);
            self.marks[i] = match self.marks[i] {
                Mark::Star => Mark::None,
                _ => Mark::Star,
            };
        }

        self.clear_covers();
        self.marks.iter_mut().for_each(|m| {
            if *m == Mark::Prime {
                *m = Mark::None;
            }
        });
    }

    fn adjust(&mut self) {
        let min = (0..self.size)
            .filter(|&row| !self.covered_rows[row])
            .map(|row| self.reduced(row, self.row_min[row]))
            .fold(T::infinity(), Float::min);
        trace!(?min, "adjusting uncovered costs");

        // add min to all covered rows
        for row in (0..self.size).filter(|&r| self.covered_rows[r]) {
            self.row_offset[row] = self.row_offset[row] - min;
        }

        // subtract min from all uncovered columns
        for col in (0..self.size).filter(|&c| !self.covered_cols[c]) {
            self.col_offset[col] = self.col_offset[col] + min;
        }
    }

    fn clear_covers(&mut self) {
        self.covered_rows.fill(false);
        self.covered_cols.fill(false);
    }
}

#[cfg(test)]
mod test {
    use nalgebra::{DMatrix, Dim, Matrix, RawStorage};

    use super::*;

    fn assert_costs<R, C, S>(
        costs: &Matrix<f64, R, C, S>,
        assignments: &[Allocation],
        cost_expected: f64,
        epsilon: f64,
    ) -> bool
    where
        R: Dim,
        C: Dim,
        S: RawStorage<f64, R, C>,
    {
        (assignments
            .iter()
            .map(|a| costs.get(a.assignment()).expect("within cost bounds"))
            .sum::<f64>()
            - cost_expected)
            .abs()
            < epsilon
    }

    fn assert_distinct(assignments: &[Allocation]) {
        for (i, a) in assignments.iter().enumerate() {
            for b in &assignments[i + 1..] {
                assert_ne!(a.row(), b.row());
                assert_ne!(a.col(), b.col());
            }
        }
    }

    #[test]
    fn basic_two() {
        #[rustfmt::skip]
        let costs = DMatrix::from_row_slice(2, 2,
            &[
                1., 2.,
                2., 1.,
            ]
        );
        let assignments = hungarian(&costs);
        assert_eq!(assignments.len(), 2);
        assert!(assert_costs(&costs, &assignments, 2., f64::EPSILON));
    }

    #[test]
    fn basic_two_rev() {
        #[rustfmt::skip]
        let costs = DMatrix::from_row_slice(2, 2,
            &[
                1., 2.,
                2., 100.
            ]
        );
        let assignments = hungarian(&costs);
        assert!(assert_costs(&costs, &assignments, 4., f64::EPSILON));
    }

    #[test]
    fn basic_four() {
        #[rustfmt::skip]
        let costs = DMatrix::from_row_slice(4, 4,
            &[
                82., 83., 69., 92.,
                77., 37., 49., 92.,
                11., 69.,  5., 86.,
                 8.,  9., 98., 23.,
            ]
        );
        let assignments = hungarian(&costs);
        assert_distinct(&assignments);
        assert!(assert_costs(&costs, &assignments, 140., f64::EPSILON));
    }

    #[test]
    fn basic_five() {
        #[rustfmt::skip]
        let costs = DMatrix::from_row_slice(5, 5,
            &[
                10., 5.,13.,15.,16.,
                 3., 9.,18.,13., 6.,
                10., 7., 2., 2., 2.,
                 7.,11., 9., 7.,12.,
                 7., 9.,10., 4.,12.,
            ]
        );
        let assignments = hungarian(&costs);
        assert_distinct(&assignments);
        assert!(assert_costs(&costs, &assignments, 23., f64::EPSILON));
    }

    #[test]
    fn basic_five_2() {
        #[rustfmt::skip]
        let costs = DMatrix::from_row_slice(5, 5,
            &[
                20., 15., 18., 20., 25.,
                18., 20., 12., 14., 15.,
                21., 23., 25., 27., 25.,
                17., 18., 21., 23., 20.,
                18., 18., 16., 19., 20.,
            ]
        );
        let assignments = hungarian(&costs);
        assert!(assert_costs(&costs, &assignments, 86., f64::EPSILON));
    }

    #[test]
    fn wide_matrix_uses_cheapest_columns() {
        #[rustfmt::skip]
        let costs = DMatrix::from_row_slice(2, 4,
            &[
                9., 1., 8., 7.,
                9., 2., 3., 7.,
            ]
        );
        let assignments = hungarian(&costs);
        assert_eq!(assignments.len(), 2);
        assert!(assert_costs(&costs, &assignments, 4., f64::EPSILON));
    }

    #[test]
    fn tall_matrix_drops_padded_columns() {
        #[rustfmt::skip]
        let costs = DMatrix::from_row_slice(3, 1,
            &[
                5.,
                1.,
                3.,
            ]
        );
        let assignments = hungarian(&costs);
        assert_eq!(
            assignments.iter().map(Allocation::assignment).collect::<Vec<_>>(),
            vec![(1, 0)]
        );
    }

    #[test]
    fn empty_shapes() {
        assert!(hungarian(&DMatrix::<f64>::zeros(0, 0)).is_empty());
        assert!(hungarian(&DMatrix::<f64>::zeros(3, 0)).is_empty());
        assert!(hungarian(&DMatrix::<f64>::zeros(0, 3)).is_empty());
    }

    #[test]
    fn infeasible_cells_are_avoided() {
        let inf = f64::INFINITY;
        #[rustfmt::skip]
        let costs = DMatrix::from_row_slice(3, 3,
            &[
                1.,  inf, inf,
                2.,  inf, inf,
                inf, 4.,  5.,
            ]
        );
        let assignments = hungarian(&costs);
        assert_distinct(&assignments);
        assert_eq!(assignments.len(), 2);
        assert!(assert_costs(&costs, &assignments, 5., f64::EPSILON));
    }

    #[test]
    fn fully_infeasible_row_is_absent() {
        let inf = f64::INFINITY;
        #[rustfmt::skip]
        let costs = DMatrix::from_row_slice(2, 2,
            &[
                inf, inf,
                3.,  1.,
            ]
        );
        let assignments = hungarian(&costs);
        assert_eq!(
            assignments.iter().map(Allocation::assignment).collect::<Vec<_>>(),
            vec![(1, 1)]
        );
    }

    #[test]
    fn prefers_more_feasible_pairs_over_cheaper_ones() {
        let inf = f64::INFINITY;
        #[rustfmt::skip]
        let costs = DMatrix::from_row_slice(2, 2,
            &[
                1.,   100.,
                1.,   inf,
            ]
        );
        let assignments = hungarian(&costs);
        assert_eq!(assignments.len(), 2);
        assert!(assert_costs(&costs, &assignments, 101., f64::EPSILON));
    }

    #[test]
    fn finds_hidden_permutation() {
        let n = 48;
        let target = |row: usize| (row * 7 + 3) % n;
        let costs = DMatrix::from_fn(n, n, |row, col| {
            if col == target(row) {
                0.
            } else {
                1. + ((row + col) % 5) as f64
            }
        });
        let assignments = hungarian(&costs);
        assert_eq!(assignments.len(), n);
        assert!(assignments.iter().all(|a| a.col() == target(a.row())));
    }

    #[test]
    fn product_costs_pair_opposite_ends() {
        // smallest sum of i * j over a permutation pairs i with n - 1 - i
        let n = 40;
        let costs = DMatrix::from_fn(n, n, |row, col| (row * col) as f64);
        let expected: f64 = (0..n).map(|i| (i * (n - 1 - i)) as f64).sum();
        let assignments = hungarian(&costs);
        assert_distinct(&assignments);
        assert_eq!(assignments.len(), n);
        assert!(assert_costs(&costs, &assignments, expected, 1e-9));
    }

    #[test]
    fn works_with_f32() {
        let costs = DMatrix::from_row_slice(2, 2, &[4.0f32, 1., 2., 8.]);
        let assignments = hungarian(&costs);
        let total: f32 = assignments.iter().map(|a| costs[a.assignment()]).sum();
        assert_eq!(total, 3.);
    }
}
