/// Dense simplex tableau.
///
/// Row 0 is the objective row, rows `1..` are constraints, and the last column
/// holds the right-hand sides. `data[0][constant_column]` is the current
/// objective value. Only the first `entering_columns` columns may enter the basis.
#[derive(Debug, Clone, PartialEq)]
pub struct Tableau {
    data: Vec<Vec<f64>>,
    entering_columns: usize,
}

impl Tableau {
    /// Assemble a tableau from its objective row and constraint rows
    pub(crate) fn from_rows(
        objective_row: Vec<f64>,
        rows: Vec<Vec<f64>>,
        entering_columns: usize,
    ) -> Self {
        let mut data = Vec::with_capacity(rows.len() + 1);
        data.push(objective_row);
        data.extend(rows);
        debug_assert!(data.iter().all(|r| r.len() == data[0].len()));
        debug_assert!(entering_columns < data[0].len());
        Self {
            data,
            entering_columns,
        }
    }

    pub fn rows(&self) -> usize {
        self.data.len()
    }

    pub fn cols(&self) -> usize {
        self.data[0].len()
    }

    pub fn constant_column(&self) -> usize {
        self.cols() - 1
    }

    pub fn entering_columns(&self) -> usize {
        self.entering_columns
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row][col]
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row]
    }

    /// Right-hand side of `row`
    pub fn rhs(&self, row: usize) -> f64 {
        self.data[row][self.constant_column()]
    }

    pub fn objective_value(&self) -> f64 {
        self.rhs(0)
    }

    /// Column with the most negative objective-row entry among the entering columns.
    ///
    /// Returns `None` once no entry is negative, i.e. the tableau is optimal.
    /// On ties the leftmost column wins.
    pub fn find_pivot_column(&self) -> Option<usize> {
        let objective_row = &self.data[0][..self.entering_columns];

        let mut min_col = 0;
        for (j, &value) in objective_row.iter().enumerate() {
            if value < objective_row[min_col] {
                min_col = j;
            }
        }

        if objective_row[min_col] >= 0.0 {
            None
        } else {
            Some(min_col)
        }
    }

    /// Leaving row for `col` by the minimum-ratio test.
    ///
    /// Rows whose pivot-column entry is zero or whose ratio is negative are skipped.
    /// When the running minimum and a new ratio are both zero, the row with the
    /// strictly smaller right-hand side wins, so `0/negative` is ranked apart from
    /// `0/positive`. Returns `None` if no row qualifies (unbounded).
    pub fn find_pivot_row(&self, col: usize) -> Option<usize> {
        let rhs_col = self.constant_column();

        let mut best: Option<(usize, f64, f64)> = None;

        for i in 1..self.rows() {
            let entry = self.data[i][col];
            if entry == 0.0 {
                continue;
            }

            let constant = self.data[i][rhs_col];
            let ratio = constant / entry;
            if ratio < 0.0 {
                continue;
            }

            best = match best {
                None => Some((i, ratio, constant)),
                Some((_, min_ratio, min_constant)) if ratio == 0.0 && min_ratio == 0.0 => {
                    if constant < min_constant {
                        Some((i, ratio, constant))
                    } else {
                        best
                    }
                }
                Some((_, min_ratio, _)) if ratio < min_ratio => Some((i, ratio, constant)),
                _ => best,
            };
        }

        best.map(|(row, _, _)| row)
    }

    /// Row reduction around `(row, col)`.
    ///
    /// The pivot entry becomes exactly 1 and the rest of the column exactly 0,
    /// so unit columns can later be detected with exact comparisons.
    pub fn pivot(&mut self, row: usize, col: usize) {
        let pivot_val = self.data[row][col];
        for value in self.data[row].iter_mut() {
            *value /= pivot_val;
        }
        self.data[row][col] = 1.0;

        let pivot_row = self.data[row].clone();
        for (i, current) in self.data.iter_mut().enumerate() {
            if i == row {
                continue;
            }
            let factor = current[col];
            if factor != 0.0 {
                for (value, &p) in current.iter_mut().zip(&pivot_row) {
                    *value -= factor * p;
                }
            }
            current[col] = 0.0;
        }
    }

    /// Row in which `col` is a unit column, if it is one.
    ///
    /// The objective row is ignored. Exactly one constraint row must hold `1`
    /// and every other constraint row `0`; anything else yields `None`.
    pub fn basic_row(&self, col: usize) -> Option<usize> {
        let mut one_row = None;

        for i in 1..self.rows() {
            let value = self.data[i][col];
            if value == 1.0 {
                if one_row.is_some() {
                    return None;
                }
                one_row = Some(i);
            } else if value != 0.0 {
                return None;
            }
        }

        one_row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tableau(rows: Vec<Vec<f64>>, entering_columns: usize) -> Tableau {
        let mut rows = rows.into_iter();
        let objective_row = rows.next().unwrap();
        Tableau::from_rows(objective_row, rows.collect(), entering_columns)
    }

    #[test]
    fn test_pivot_column_most_negative() {
        let t = tableau(
            vec![
                vec![-1.0, -2.0, 0.0, 0.0],
                vec![2.0, 3.0, 1.0, 34.0],
            ],
            2,
        );
        assert_eq!(t.find_pivot_column(), Some(1));
    }

    #[test]
    fn test_pivot_column_ignores_slack_columns() {
        // The slack column is the most negative but may not enter
        let t = tableau(
            vec![
                vec![1.0, 0.5, -9.0, 4.0],
                vec![2.0, 3.0, 1.0, 34.0],
            ],
            2,
        );
        assert_eq!(t.find_pivot_column(), None);
    }

    #[test]
    fn test_pivot_column_tie_takes_leftmost() {
        let t = tableau(
            vec![
                vec![-3.0, -3.0, 0.0, 0.0],
                vec![1.0, 1.0, 1.0, 5.0],
            ],
            2,
        );
        assert_eq!(t.find_pivot_column(), Some(0));
    }

    #[test]
    fn test_pivot_row_minimum_ratio() {
        let t = tableau(
            vec![
                vec![-1.0, -2.0, 0.0, 0.0, 0.0, 0.0],
                vec![2.0, 3.0, 1.0, 0.0, 0.0, 34.0],
                vec![1.0, 5.0, 0.0, 1.0, 0.0, 45.0],
                vec![1.0, 0.0, 0.0, 0.0, 1.0, 15.0],
            ],
            2,
        );
        // 34/3 vs 45/5, the zero entry in row 3 is skipped
        assert_eq!(t.find_pivot_row(1), Some(2));
        // 34/2, 45/1, 15/1
        assert_eq!(t.find_pivot_row(0), Some(3));
    }

    #[test]
    fn test_pivot_row_skips_negative_ratios() {
        let t = tableau(
            vec![
                vec![-1.0, 0.0, 0.0, 0.0],
                vec![-1.0, 1.0, 0.0, 2.0],
                vec![4.0, 0.0, 1.0, 8.0],
            ],
            1,
        );
        assert_eq!(t.find_pivot_row(0), Some(2));
    }

    #[test]
    fn test_pivot_row_unbounded() {
        let t = tableau(
            vec![
                vec![-1.0, 0.0, 0.0, 0.0],
                vec![-1.0, 1.0, 0.0, 2.0],
                vec![0.0, 0.0, 1.0, 8.0],
            ],
            1,
        );
        assert_eq!(t.find_pivot_row(0), None);
    }

    #[test]
    fn test_pivot_row_zero_ratio_tie_is_deterministic() {
        // Rows 1 and 2 both give a zero ratio; the first one found is kept
        // because neither has a strictly smaller right-hand side.
        let t = tableau(
            vec![
                vec![-1.0, 0.0, 0.0, 0.0, 0.0],
                vec![1.0, 1.0, 0.0, 0.0, 0.0],
                vec![2.0, 0.0, 1.0, 0.0, 0.0],
                vec![1.0, 0.0, 0.0, 1.0, 3.0],
            ],
            1,
        );
        for _ in 0..10 {
            assert_eq!(t.find_pivot_row(0), Some(1));
        }
    }

    #[test]
    fn test_pivot_row_zero_ratio_compares_constants() {
        // 1e-300 / 1e300 underflows to a zero ratio; the tie with row 2 is
        // settled on the right-hand side, not on the ratio.
        let t = tableau(
            vec![
                vec![-1.0, 0.0, 0.0, 0.0],
                vec![1e300, 1.0, 0.0, 1e-300],
                vec![1.0, 0.0, 1.0, 0.0],
            ],
            1,
        );
        assert_eq!(t.find_pivot_row(0), Some(2));
    }

    #[test]
    fn test_pivot_row_signed_zero_constant() {
        // -0.0 / -2 is a zero ratio too, but -0.0 is not smaller than 0.0
        let t = tableau(
            vec![
                vec![-1.0, 0.0, 0.0, 0.0],
                vec![1.0, 1.0, 0.0, 0.0],
                vec![-2.0, 0.0, 1.0, -0.0],
            ],
            1,
        );
        assert_eq!(t.find_pivot_row(0), Some(1));
    }

    #[test]
    fn test_pivot_produces_exact_unit_column() {
        let mut t = tableau(
            vec![
                vec![-1.0, -2.0, 0.0, 0.0, 0.0, 0.0],
                vec![2.0, 3.0, 1.0, 0.0, 0.0, 34.0],
                vec![1.0, 5.0, 0.0, 1.0, 0.0, 45.0],
                vec![1.0, 0.0, 0.0, 0.0, 1.0, 15.0],
            ],
            2,
        );
        t.pivot(2, 1);

        assert_eq!(t.get(2, 1), 1.0);
        assert_eq!(t.get(0, 1), 0.0);
        assert_eq!(t.get(1, 1), 0.0);
        assert_eq!(t.get(3, 1), 0.0);
        assert_eq!(t.basic_row(1), Some(2));
        assert!((t.objective_value() - 18.0).abs() < 1e-12);
        assert!((t.rhs(1) - 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_basic_row() {
        let t = tableau(
            vec![
                vec![5.0, 0.0, 0.0, 0.0, 1.0],
                vec![1.0, 1.0, 0.0, 2.0, 1.0],
                vec![0.0, 1.0, 0.0, 0.5, 1.0],
            ],
            2,
        );
        // The objective row entry does not matter
        assert_eq!(t.basic_row(0), Some(1));
        // Two ones
        assert_eq!(t.basic_row(1), None);
        // All zero
        assert_eq!(t.basic_row(2), None);
        // Value other than 0 or 1
        assert_eq!(t.basic_row(3), None);
    }
}
