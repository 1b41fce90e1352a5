use crate::problem::{LpProblem, Mode};
use crate::tableau::Tableau;

/// How the initial tableau is derived from a problem.
///
/// Both formulations produce a tableau to be maximized, so the pivoting loop
/// never needs to know which one it is working on. The formulation is kept to
/// decode the final tableau.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formulation {
    /// Maximize `c·x` s.t. `Ax <= b` directly
    Primal,
    /// Minimize `c·x` s.t. `Ax >= b` by maximizing `b·y` s.t. `Aᵀy <= c`
    Dual,
}

impl Formulation {
    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Maximize => Formulation::Primal,
            Mode::Minimize => Formulation::Dual,
        }
    }

    pub fn build(self, problem: &LpProblem) -> Tableau {
        match self {
            Formulation::Primal => primal_tableau(problem),
            Formulation::Dual => dual_tableau(problem),
        }
    }

    /// Read the variable assignment and optimum out of an optimal tableau.
    ///
    /// Returns `None` for a dual tableau whose slack columns still carry a
    /// negative objective-row entry. Slack columns never enter the basis, so
    /// such a tableau is not dual optimal and decodes to a negative assignment.
    pub fn extract(self, tableau: &Tableau, problem: &LpProblem) -> Option<(Vec<f64>, f64)> {
        let n = problem.num_variables();

        let values = match self {
            // A basic column also has an exact zero in the objective row, and a
            // row can be basic for one variable only. A non-basic column that
            // merely looks like a unit column reads as zero.
            Formulation::Primal => {
                let mut claimed = vec![false; tableau.rows()];
                (0..n)
                    .map(|j| match tableau.basic_row(j) {
                        Some(row) if tableau.get(0, j) == 0.0 && !claimed[row] => {
                            claimed[row] = true;
                            tableau.rhs(row)
                        }
                        _ => 0.0,
                    })
                    .collect()
            }
            // The dual slack columns of the objective row hold the primal values
            Formulation::Dual => {
                let m = problem.num_constraints();
                let values: Vec<f64> = (0..n).map(|j| tableau.get(0, m + j)).collect();
                if values.iter().any(|&v| v < 0.0) {
                    return None;
                }
                values
            }
        };

        Some((values, tableau.objective_value()))
    }
}

/// `(m+1) x (n+m+1)`: `[-c | 0 | 0]` over `[A | I | b]`
fn primal_tableau(problem: &LpProblem) -> Tableau {
    let n = problem.num_variables();
    let m = problem.num_constraints();
    let total_cols = n + m + 1;

    let mut objective_row = vec![0.0; total_cols];
    for (j, &c) in problem.objective().iter().enumerate() {
        objective_row[j] = -c;
    }

    let rows = (0..m)
        .map(|i| {
            let mut row = vec![0.0; total_cols];
            row[..n].copy_from_slice(problem.coefficients(i));
            row[n + i] = 1.0;
            row[total_cols - 1] = problem.rhs(i);
            row
        })
        .collect();

    Tableau::from_rows(objective_row, rows, n)
}

/// `(n+1) x (n+m+1)`: `[-bᵀ | 0 | 0]` over `[Aᵀ | I | c]`
fn dual_tableau(problem: &LpProblem) -> Tableau {
    let n = problem.num_variables();
    let m = problem.num_constraints();
    let total_cols = n + m + 1;

    let mut objective_row = vec![0.0; total_cols];
    for (i, value) in objective_row.iter_mut().take(m).enumerate() {
        *value = -problem.rhs(i);
    }

    let rows = (0..n)
        .map(|j| {
            let mut row = vec![0.0; total_cols];
            for (i, value) in row.iter_mut().take(m).enumerate() {
                *value = problem.coefficients(i)[j];
            }
            row[m + j] = 1.0;
            row[total_cols - 1] = problem.objective()[j];
            row
        })
        .collect();

    Tableau::from_rows(objective_row, rows, m)
}
