//! Tableau simplex solver for standard-form linear programs.
//!
//! Maximization problems are solved directly; minimization problems are
//! solved through their dual, so one pivoting loop serves both directions.

mod error;
mod formulation;
mod problem;
mod simplex;
mod solution;
mod tableau;

pub use error::{InvalidProblem, Result};
pub use formulation::Formulation;
pub use problem::{LpProblem, Mode, Sense};
pub use simplex::{SimplexSolver, Solver};
pub use solution::{ConstraintViolation, Solution, SolutionStatus};
pub use tableau::Tableau;
