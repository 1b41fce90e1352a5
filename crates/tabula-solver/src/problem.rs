use std::fmt;
use std::str::FromStr;

use crate::error::{InvalidProblem, Result};
use crate::solution::ConstraintViolation;

/// Optimization direction
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Minimize,
    Maximize,
}

impl FromStr for Mode {
    type Err = InvalidProblem;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "min" | "minimize" => Ok(Mode::Minimize),
            "max" | "maximize" => Ok(Mode::Maximize),
            _ => Err(InvalidProblem::UnknownMode(s.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Minimize => write!(f, "minimize"),
            Mode::Maximize => write!(f, "maximize"),
        }
    }
}

/// Direction of every constraint row, implied by the mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    /// Less than or equal (<=), used when maximizing
    Le,
    /// Greater than or equal (>=), used when minimizing
    Ge,
}

/// A validated standard-form linear program.
///
/// Each constraint row holds `n` coefficients followed by the right-hand side.
/// When maximizing the rows read `a·x <= b`; when minimizing they read
/// `a·x >= b`, which is the form whose dual the solver maximizes.
#[derive(Debug, Clone, PartialEq)]
pub struct LpProblem {
    mode: Mode,
    objective: Vec<f64>,
    constraints: Vec<Vec<f64>>,
}

impl LpProblem {
    pub fn new(mode: Mode, objective: Vec<f64>, constraints: Vec<Vec<f64>>) -> Result<Self> {
        let n = objective.len();
        if n < 1 {
            return Err(InvalidProblem::EmptyObjective);
        }
        if constraints.is_empty() {
            return Err(InvalidProblem::NoConstraints);
        }
        for (row, c) in constraints.iter().enumerate() {
            if c.len() != n + 1 {
                return Err(InvalidProblem::ColumnMismatch {
                    row,
                    found: c.len(),
                    expected: n + 1,
                    variables: n,
                });
            }
        }
        if let Some(index) = objective.iter().position(|&c| c == 0.0) {
            return Err(InvalidProblem::ZeroObjectiveCoefficient { index });
        }
        for (row, c) in constraints.iter().enumerate() {
            let value = c[n];
            if value < 0.0 {
                return Err(InvalidProblem::NegativeRhs { row, value });
            }
        }
        // NaN slips through the two checks above
        if let Some(index) = objective.iter().position(|c| !c.is_finite()) {
            return Err(InvalidProblem::NonFiniteObjective { index });
        }
        for (row, c) in constraints.iter().enumerate() {
            if let Some(column) = c.iter().position(|v| !v.is_finite()) {
                return Err(InvalidProblem::NonFiniteConstraint { row, column });
            }
        }

        Ok(Self {
            mode,
            objective,
            constraints,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn sense(&self) -> Sense {
        match self.mode {
            Mode::Maximize => Sense::Le,
            Mode::Minimize => Sense::Ge,
        }
    }

    pub fn objective(&self) -> &[f64] {
        &self.objective
    }

    pub fn constraints(&self) -> &[Vec<f64>] {
        &self.constraints
    }

    pub fn num_variables(&self) -> usize {
        self.objective.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Coefficients of constraint `i`, without the right-hand side
    pub fn coefficients(&self, i: usize) -> &[f64] {
        &self.constraints[i][..self.num_variables()]
    }

    pub fn rhs(&self, i: usize) -> f64 {
        self.constraints[i][self.num_variables()]
    }

    /// Objective function evaluated at `values`
    pub fn evaluate(&self, values: &[f64]) -> f64 {
        self.objective.iter().zip(values).map(|(c, x)| c * x).sum()
    }

    /// Check an assignment against every constraint and the non-negativity bounds.
    ///
    /// Returns the violated ones, worst first.
    pub fn violations(&self, values: &[f64], tolerance: f64) -> Vec<ConstraintViolation> {
        let mut violations = Vec::new();

        for i in 0..self.num_constraints() {
            let lhs: f64 = self
                .coefficients(i)
                .iter()
                .zip(values)
                .map(|(a, x)| a * x)
                .sum();
            let rhs = self.rhs(i);

            let violation = match self.sense() {
                Sense::Le if lhs > rhs + tolerance => Some((
                    lhs - rhs,
                    format!("row {} exceeds its bound of {:.4} by {:.4}", i, rhs, lhs - rhs),
                )),
                Sense::Ge if lhs < rhs - tolerance => Some((
                    rhs - lhs,
                    format!("row {} is below its bound of {:.4} by {:.4}", i, rhs, rhs - lhs),
                )),
                _ => None,
            };

            if let Some((violation_amount, description)) = violation {
                violations.push(ConstraintViolation {
                    constraint: format!("row {}", i),
                    required: rhs,
                    actual: lhs,
                    violation_amount,
                    description,
                });
            }
        }

        for (j, &x) in values.iter().enumerate() {
            if x < -tolerance {
                violations.push(ConstraintViolation {
                    constraint: format!("x{} >= 0", j),
                    required: 0.0,
                    actual: x,
                    violation_amount: -x,
                    description: format!("variable x{} is negative ({:.4})", j, x),
                });
            }
        }

        violations.sort_by(|a, b| {
            b.violation_amount
                .partial_cmp(&a.violation_amount)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rows() -> Vec<Vec<f64>> {
        vec![
            vec![2.0, 3.0, 34.0],
            vec![1.0, 5.0, 45.0],
            vec![1.0, 0.0, 15.0],
        ]
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("max".parse::<Mode>(), Ok(Mode::Maximize));
        assert_eq!(" Minimize ".parse::<Mode>(), Ok(Mode::Minimize));
        assert_eq!(
            "sideways".parse::<Mode>(),
            Err(InvalidProblem::UnknownMode("sideways".to_string()))
        );
    }

    #[test]
    fn test_valid_problem() {
        let problem = LpProblem::new(Mode::Maximize, vec![1.0, 2.0], sample_rows()).unwrap();
        assert_eq!(problem.num_variables(), 2);
        assert_eq!(problem.num_constraints(), 3);
        assert_eq!(problem.coefficients(1), &[1.0, 5.0]);
        assert_eq!(problem.rhs(2), 15.0);
        assert_eq!(problem.sense(), Sense::Le);
    }

    #[test]
    fn test_empty_objective() {
        let err = LpProblem::new(Mode::Maximize, vec![], vec![vec![1.0]]).unwrap_err();
        assert_eq!(err, InvalidProblem::EmptyObjective);
    }

    #[test]
    fn test_no_constraints() {
        let err = LpProblem::new(Mode::Maximize, vec![1.0], vec![]).unwrap_err();
        assert_eq!(err, InvalidProblem::NoConstraints);
    }

    #[test]
    fn test_column_mismatch_reports_first_bad_row() {
        let rows = vec![vec![1.0, 1.0, 4.0], vec![1.0, 4.0]];
        let err = LpProblem::new(Mode::Minimize, vec![1.0, 1.0], rows).unwrap_err();
        assert_eq!(
            err,
            InvalidProblem::ColumnMismatch {
                row: 1,
                found: 2,
                expected: 3,
                variables: 2,
            }
        );
    }

    #[test]
    fn test_zero_objective_coefficient() {
        let err = LpProblem::new(Mode::Maximize, vec![0.0, 1.0], sample_rows()).unwrap_err();
        assert_eq!(err, InvalidProblem::ZeroObjectiveCoefficient { index: 0 });
    }

    #[test]
    fn test_negative_rhs() {
        let rows = vec![vec![1.0, 1.0, 4.0], vec![1.0, 0.0, -1.0]];
        let err = LpProblem::new(Mode::Maximize, vec![1.0, 1.0], rows).unwrap_err();
        assert_eq!(err, InvalidProblem::NegativeRhs { row: 1, value: -1.0 });
    }

    #[test]
    fn test_non_finite_objective() {
        let err = LpProblem::new(Mode::Maximize, vec![1.0, f64::NAN], sample_rows()).unwrap_err();
        assert_eq!(err, InvalidProblem::NonFiniteObjective { index: 1 });

        let err =
            LpProblem::new(Mode::Minimize, vec![f64::INFINITY, 1.0], sample_rows()).unwrap_err();
        assert_eq!(err, InvalidProblem::NonFiniteObjective { index: 0 });
    }

    #[test]
    fn test_non_finite_constraint() {
        let rows = vec![vec![1.0, 1.0, 4.0], vec![1.0, 0.0, f64::NAN]];
        let err = LpProblem::new(Mode::Maximize, vec![1.0, 1.0], rows).unwrap_err();
        assert_eq!(err, InvalidProblem::NonFiniteConstraint { row: 1, column: 2 });

        let rows = vec![vec![f64::NEG_INFINITY, 1.0, 4.0]];
        let err = LpProblem::new(Mode::Maximize, vec![1.0, 1.0], rows).unwrap_err();
        assert_eq!(err, InvalidProblem::NonFiniteConstraint { row: 0, column: 0 });
    }

    #[test]
    fn test_checks_run_in_order() {
        // Both a zero coefficient and a negative rhs: the coefficient check comes first
        let rows = vec![vec![1.0, 1.0, -4.0]];
        let err = LpProblem::new(Mode::Maximize, vec![1.0, 0.0], rows).unwrap_err();
        assert_eq!(err.code(), 5);
    }

    #[test]
    fn test_violations_le() {
        let problem = LpProblem::new(Mode::Maximize, vec![1.0, 2.0], sample_rows()).unwrap();
        assert!(problem.violations(&[5.0, 8.0], 1e-9).is_empty());

        let violations = problem.violations(&[16.0, 8.0], 1e-9);
        assert_eq!(violations.len(), 3);
        // 2*16 + 3*8 = 56 exceeds 34 by 22, the worst one
        assert_eq!(violations[0].constraint, "row 0");
        assert!((violations[0].violation_amount - 22.0).abs() < 1e-9);
    }

    #[test]
    fn test_violations_ge_and_bounds() {
        let rows = vec![vec![2.0, 1.0, 8.0], vec![1.0, 2.0, 13.0]];
        let problem = LpProblem::new(Mode::Minimize, vec![3.0, 4.0], rows).unwrap();
        assert!(problem.violations(&[1.0, 6.0], 1e-9).is_empty());

        let violations = problem.violations(&[-1.0, 7.0], 1e-9);
        assert_eq!(violations.len(), 2);
        assert!(violations.iter().any(|v| v.constraint == "x0 >= 0"));
    }
}
