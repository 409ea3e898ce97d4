use std::collections::HashMap;
use std::fmt;

use log::{debug, trace};
use num_traits::{One, Signed, Zero};

use crate::linalg::SparseMatrix;
use crate::model::{Equation, Relation};
use crate::solver::Bounds;

/// Outcome of one round of pivot selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Step<T> {
    /// The current assignment respects every bound.
    Feasible,
    /// Some basic variable violates a bound and no column can fix it.
    Infeasible,
    /// Pivot `row` against the non-basic at `column`, driving the
    /// leaving basic variable to `target`.
    Pivot {
        row: usize,
        column: usize,
        target: T,
    },
}

/// Feasibility checker for a conjunction of linear equations.
///
/// `prepare` normalises variable names to slots, introduces one slack
/// variable per equation and fills the sparse tableau; `solve` then
/// pivots under Bland's rule until the assignment is feasible or some
/// bound violation has no remedy.
#[derive(Clone)]
pub struct Solver<T> {
    equations: Vec<Equation<T>>,
    tableau: SparseMatrix<T>,
    bounds: Bounds<T>,
    /// Value per slot. Slots `[0, n)` are the structural variables in
    /// sorted-name order, `[n, n+m)` the slacks in equation order.
    assignment: Vec<T>,
    /// The permutation: slot id at each position. Positions past
    /// `n_basic` hold the basic variables.
    variables: Vec<usize>,
    n_basic: usize,
    n_pivots: usize,
    prepared: bool,
}

impl<T> Solver<T> {
    pub fn new(equations: Vec<Equation<T>>) -> Self {
        Solver {
            equations,
            tableau: SparseMatrix::new(),
            bounds: Bounds::new(),
            assignment: Vec::new(),
            variables: Vec::new(),
            n_basic: 0,
            n_pivots: 0,
            prepared: false,
        }
    }

    /// Number of pivots applied since the last `prepare`.
    pub fn n_pivots(&self) -> usize {
        self.n_pivots
    }

    /// Sorted distinct variable names across all equations.
    pub fn vars(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .equations
            .iter()
            .flat_map(|equation| equation.variables())
            .map(str::to_owned)
            .collect();
        names.sort();
        names.dedup();
        names
    }
}

impl<T> Solver<T>
where
    T: Clone + Signed + PartialOrd,
{
    /// Builds the tableau, slack bounds, zeroed assignment and identity
    /// permutation from the equations.
    pub fn prepare(&mut self) {
        let names = self.vars();
        let index: HashMap<&str, usize> = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), i))
            .collect();
        let n = names.len();
        let m = self.equations.len();

        let mut tableau = SparseMatrix::new();
        let mut bounds = Bounds::new();
        for (i, equation) in self.equations.iter().enumerate() {
            for term in &equation.lhs {
                let j = index[term.variable.as_str()];
                let sum = tableau.get(i, j) + term.coefficient.clone();
                tableau.set(i, j, sum);
            }
            match equation.relation {
                Relation::LessEqual => bounds.set_upper(n + i, equation.rhs.clone()),
                Relation::GreaterEqual => bounds.set_lower(n + i, equation.rhs.clone()),
                Relation::Equal => {
                    bounds.set_lower(n + i, equation.rhs.clone());
                    bounds.set_upper(n + i, equation.rhs.clone());
                }
            }
        }

        self.tableau = tableau;
        self.bounds = bounds;
        self.assignment = vec![T::zero(); m + n];
        self.variables = (0..m + n).collect();
        self.n_basic = n;
        self.n_pivots = 0;
        self.prepared = true;

        debug!("prepared {m} equations over {n} variables");
    }

    /// Audits the row invariant: every tableau row evaluated over the
    /// non-basic slots must equal the value of its basic slot.
    pub(crate) fn check(&self) -> bool {
        for i in 0..self.equations.len() {
            let mut value = T::zero();
            for (j, a_ij) in self.tableau.row(i) {
                value = value + a_ij.clone() * self.assignment[self.variables[j]].clone();
            }
            if value != self.assignment[self.variables[self.n_basic + i]] {
                return false;
            }
        }
        true
    }

    /// Chooses the next pivot under Bland's rule: the bound-violating
    /// basic with the smallest slot id, paired with the smallest-slot
    /// non-basic column whose direction of movement stays inside that
    /// column's own bounds.
    pub(crate) fn select(&self) -> Step<T> {
        let mut basic: Vec<(usize, usize)> = (0..self.equations.len())
            .map(|i| (i, self.variables[self.n_basic + i]))
            .collect();
        basic.sort_by_key(|&(_, slot)| slot);
        let mut nonbasic: Vec<(usize, usize)> = (0..self.n_basic)
            .map(|j| (j, self.variables[j]))
            .collect();
        nonbasic.sort_by_key(|&(_, slot)| slot);

        for &(i, xi) in &basic {
            let value = &self.assignment[xi];

            if let Some(low) = self.bounds.lower(xi) {
                if value < low {
                    // raising x_i needs a column that may move towards it
                    for &(j, xj) in &nonbasic {
                        let a_ij = self.tableau.get(i, j);
                        if (a_ij.is_positive() && self.can_increase(xj))
                            || (a_ij.is_negative() && self.can_decrease(xj))
                        {
                            return Step::Pivot {
                                row: i,
                                column: j,
                                target: low.clone(),
                            };
                        }
                    }
                    return Step::Infeasible;
                }
            }

            if let Some(up) = self.bounds.upper(xi) {
                if value > up {
                    for &(j, xj) in &nonbasic {
                        let a_ij = self.tableau.get(i, j);
                        if (a_ij.is_negative() && self.can_increase(xj))
                            || (a_ij.is_positive() && self.can_decrease(xj))
                        {
                            return Step::Pivot {
                                row: i,
                                column: j,
                                target: up.clone(),
                            };
                        }
                    }
                    return Step::Infeasible;
                }
            }
        }

        Step::Feasible
    }

    /// A non-basic slot may move up while below its upper bound.
    fn can_increase(&self, slot: usize) -> bool {
        self.bounds
            .upper(slot)
            .is_none_or(|up| self.assignment[slot] < *up)
    }

    /// A non-basic slot may move down while above its lower bound.
    fn can_decrease(&self, slot: usize) -> bool {
        self.bounds
            .lower(slot)
            .is_none_or(|low| self.assignment[slot] > *low)
    }

    /// Exchanges the basic variable of `row` with the non-basic variable
    /// at `column`, driving the leaving variable to `target` and
    /// rewriting the tableau to express the new basic set.
    pub(crate) fn pivot(&mut self, row: usize, column: usize, target: T) {
        let a_ij = self.tableau.get(row, column);
        assert!(!a_ij.is_zero(), "pivot element must be non-zero");

        let ii = self.n_basic + row;
        let leaving = self.variables[ii];
        let entering = self.variables[column];
        trace!("pivot {}: row {row} column {column} (slot {leaving} out, slot {entering} in)", self.n_pivots);

        // The entering variable moves by the amount that lands the
        // leaving variable exactly on its target bound.
        let delta = (target.clone() - self.assignment[leaving].clone()) / a_ij.clone();
        self.assignment[entering] = self.assignment[entering].clone() + delta;
        self.assignment[leaving] = target;

        // Invert the pivot row so it expresses the entering variable.
        let old_row: Vec<(usize, T)> = self
            .tableau
            .row(row)
            .map(|(k, v)| (k, v.clone()))
            .collect();
        for (k, a_ik) in old_row {
            if k == column {
                self.tableau.set(row, k, T::one() / a_ij.clone());
            } else {
                self.tableau.set(row, k, a_ik / -a_ij.clone());
            }
        }

        // The leaving variable takes over the entering one's position, so
        // the recomputation below reads both through the permutation.
        self.variables.swap(ii, column);

        // Substitute the inverted row into every other row that mentions
        // the pivot column, refreshing the affected basic values.
        let pivot_row: Vec<(usize, T)> = self
            .tableau
            .row(row)
            .map(|(l, v)| (l, v.clone()))
            .collect();
        let column_rows: Vec<(usize, T)> = self
            .tableau
            .col(column)
            .filter(|&(k, _)| k != row)
            .map(|(k, v)| (k, v.clone()))
            .collect();
        for (k, a_kj) in column_rows {
            for (l, a_il) in &pivot_row {
                let updated = if *l == column {
                    a_kj.clone() / a_ij.clone()
                } else {
                    self.tableau.get(k, *l) + a_il.clone() * a_kj.clone()
                };
                self.tableau.set(k, *l, updated);
            }
            let mut value = T::zero();
            for (l, a_kl) in self.tableau.row(k) {
                value = value + a_kl.clone() * self.assignment[self.variables[l]].clone();
            }
            self.assignment[self.variables[self.n_basic + k]] = value;
        }

        self.n_pivots += 1;
        debug_assert!(self.check(), "row invariant broken by pivot");
    }

    /// Runs the feasibility search. `Some` maps every structural
    /// variable, in sorted-name order, to a value satisfying all
    /// equations; `None` means the system has no solution.
    pub fn solve(&mut self) -> Option<Vec<(String, T)>> {
        assert!(self.prepared, "solve requires a prepared tableau");

        loop {
            match self.select() {
                Step::Feasible => {
                    debug!("feasible after {} pivots", self.n_pivots);
                    let model = self
                        .vars()
                        .into_iter()
                        .enumerate()
                        .map(|(slot, name)| (name, self.assignment[slot].clone()))
                        .collect();
                    return Some(model);
                }
                Step::Infeasible => {
                    debug!("infeasible after {} pivots", self.n_pivots);
                    return None;
                }
                Step::Pivot {
                    row,
                    column,
                    target,
                } => self.pivot(row, column, target),
            }
        }
    }
}

impl<T> fmt::Display for Solver<T>
where
    T: Signed + PartialOrd + fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for equation in &self.equations {
            writeln!(f, "{equation}")?;
        }
        Ok(())
    }
}

impl<T> fmt::Debug for Solver<T>
where
    T: Clone + Signed + PartialOrd + fmt::Display,
{
    /// Diagnostic dump: the permutation with per-slot values, then the
    /// dense projection of the tableau rows.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Solver ({} pivots)", self.n_pivots)?;
        for (position, &slot) in self.variables.iter().enumerate() {
            let role = if position < self.n_basic {
                "nonbasic"
            } else {
                "basic"
            };
            writeln!(
                f,
                "  position {position:>3} -> slot {slot:>3} ({role:>8}) = {}",
                self.assignment[slot]
            )?;
        }
        for i in 0..self.equations.len() {
            write!(f, "  row {i:>3} |")?;
            for j in 0..self.n_basic {
                write!(f, " {:>8}", format!("{}", self.tableau.get(i, j)))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
