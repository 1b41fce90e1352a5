use log::{debug, trace};

use crate::error::Result;
use crate::formulation::Formulation;
use crate::problem::{LpProblem, Mode};
use crate::solution::{Solution, SolutionStatus};
use crate::tableau::Tableau;

/// Tableau simplex solver for standard-form problems
pub struct Solver {
    /// Maximum pivots before giving up
    max_iterations: usize,
}

impl Default for Solver {
    fn default() -> Self {
        Self {
            max_iterations: 10000,
        }
    }
}

impl Solver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Build the tableau for the problem's mode, pivot to a terminal state and decode it
    pub fn solve(&self, problem: &LpProblem) -> Solution {
        let formulation = Formulation::for_mode(problem.mode());
        let mut tableau = formulation.build(problem);

        debug!(
            "built {:?} tableau: {}x{}, {} entering columns",
            formulation,
            tableau.rows(),
            tableau.cols(),
            tableau.entering_columns()
        );

        let (result, iterations) = self.iterate(&mut tableau);
        let solution = match result {
            SimplexResult::Optimal => match formulation.extract(&tableau, problem) {
                Some((values, objective_value)) => {
                    Solution::optimal(values, objective_value, iterations)
                }
                None => Solution::inconclusive(iterations),
            },
            SimplexResult::Unbounded => Solution::unbounded(iterations),
            SimplexResult::IterationLimit => Solution::iteration_limit(iterations),
        };

        debug!(
            "{:?} after {} pivots, objective {}",
            solution.status, solution.iterations, solution.objective_value
        );
        solution
    }

    /// Pivot until no entering column improves the objective.
    ///
    /// Returns the terminal state and the number of pivots performed.
    fn iterate(&self, tableau: &mut Tableau) -> (SimplexResult, usize) {
        for iteration in 0..self.max_iterations {
            let Some(pivot_col) = tableau.find_pivot_column() else {
                return (SimplexResult::Optimal, iteration);
            };
            let Some(pivot_row) = tableau.find_pivot_row(pivot_col) else {
                return (SimplexResult::Unbounded, iteration);
            };

            trace!(
                "pivot {}: column {} (cost {}), row {} (ratio {})",
                iteration,
                pivot_col,
                tableau.get(0, pivot_col),
                pivot_row,
                tableau.rhs(pivot_row) / tableau.get(pivot_row, pivot_col)
            );
            tableau.pivot(pivot_row, pivot_col);
        }

        // The last allowed pivot may have reached the optimum
        match tableau.find_pivot_column() {
            None => (SimplexResult::Optimal, self.max_iterations),
            Some(_) => (SimplexResult::IterationLimit, self.max_iterations),
        }
    }
}

enum SimplexResult {
    Optimal,
    Unbounded,
    IterationLimit,
}

/// One problem, solved once.
///
/// Construction validates the input and runs the solver to completion;
/// the instance then only answers queries about the result.
#[derive(Debug, Clone)]
pub struct SimplexSolver {
    problem: LpProblem,
    solution: Solution,
}

impl SimplexSolver {
    pub fn new(mode: Mode, objective: Vec<f64>, constraints: Vec<Vec<f64>>) -> Result<Self> {
        let problem = LpProblem::new(mode, objective, constraints)?;
        Ok(Self::with_solver(&Solver::default(), problem))
    }

    pub fn with_solver(solver: &Solver, problem: LpProblem) -> Self {
        let solution = solver.solve(&problem);
        Self { problem, solution }
    }

    pub fn has_solution(&self) -> bool {
        self.solution.is_optimal()
    }

    /// Maximum or minimum of the objective; meaningful only if `has_solution()`
    pub fn optimum(&self) -> f64 {
        self.solution.objective_value
    }

    /// Variable values, one per objective coefficient; empty without a solution
    pub fn solution(&self) -> &[f64] {
        &self.solution.values
    }

    pub fn status(&self) -> SolutionStatus {
        self.solution.status
    }

    pub fn problem(&self) -> &LpProblem {
        &self.problem
    }

    pub fn into_solution(self) -> Solution {
        self.solution
    }
}
