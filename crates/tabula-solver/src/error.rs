use thiserror::Error;

/// Reasons a problem is rejected before any tableau is built.
///
/// Variants are listed in the order the checks run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidProblem {
    #[error("Invalid value for the mode: {0:?} (expected \"min\" or \"max\")")]
    UnknownMode(String),
    #[error("The objective function must have at least one coefficient")]
    EmptyObjective,
    #[error("The constraint matrix must contain at least one row")]
    NoConstraints,
    #[error(
        "Constraint row {row} has {found} columns, but should have {expected}, \
         because the objective function has {variables} coefficients"
    )]
    ColumnMismatch {
        row: usize,
        found: usize,
        expected: usize,
        variables: usize,
    },
    #[error("Objective coefficient {index} is zero")]
    ZeroObjectiveCoefficient { index: usize },
    #[error("Right-hand side of constraint row {row} is negative ({value})")]
    NegativeRhs { row: usize, value: f64 },
    #[error("Objective coefficient {index} is not a finite number")]
    NonFiniteObjective { index: usize },
    #[error("Entry {column} of constraint row {row} is not a finite number")]
    NonFiniteConstraint { row: usize, column: usize },
}

impl InvalidProblem {
    /// Numeric code for the failed check, 1-based in validation order.
    pub fn code(&self) -> u8 {
        match self {
            InvalidProblem::UnknownMode(_) => 1,
            InvalidProblem::EmptyObjective => 2,
            InvalidProblem::NoConstraints => 3,
            InvalidProblem::ColumnMismatch { .. } => 4,
            InvalidProblem::ZeroObjectiveCoefficient { .. } => 5,
            InvalidProblem::NegativeRhs { .. } => 6,
            InvalidProblem::NonFiniteObjective { .. } => 7,
            InvalidProblem::NonFiniteConstraint { .. } => 8,
        }
    }
}

pub type Result<T> = std::result::Result<T, InvalidProblem>;
