//! Exhaustive truth tables for binary connectives.
//!
//! Rows are enumerated in the fixed order (T,T), (T,F), (F,T), (F,F).

use std::fmt;

use candle_core::Device;

use crate::error::Result;
use crate::truth::{Truth, TruthVector};

/// One row: both arguments and the connective's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruthRow {
    pub first: Truth,
    pub second: Truth,
    pub result: Truth,
}

/// The four rows of a binary connective's truth table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthTable {
    rows: Vec<TruthRow>,
}

impl TruthTable {
    /// Apply `f` to every pair of basis truth vectors on `device`.
    ///
    /// # Example
    /// ```
    /// use candle_core::Device;
    /// use tensem::{Connectives, TruthTable};
    ///
    /// let device = Device::Cpu;
    /// let c = Connectives::new(&device).unwrap();
    /// let table = TruthTable::evaluate(&device, |x, y| c.and(x, y)).unwrap();
    /// assert!(table.matches([true, false, false, false]));
    /// ```
    pub fn evaluate<F>(device: &Device, f: F) -> Result<Self>
    where
        F: Fn(&TruthVector, &TruthVector) -> Result<TruthVector>,
    {
        let mut rows = Vec::with_capacity(4);
        for first in Truth::ALL {
            for second in Truth::ALL {
                let x = TruthVector::from_truth(first, device)?;
                let y = TruthVector::from_truth(second, device)?;
                let result = f(&x, &y)?.truth();
                rows.push(TruthRow {
                    first,
                    second,
                    result,
                });
            }
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[TruthRow] {
        &self.rows
    }

    /// The output column.
    pub fn results(&self) -> [Truth; 4] {
        let mut out = [Truth::False; 4];
        for (slot, row) in out.iter_mut().zip(&self.rows) {
            *slot = row.result;
        }
        out
    }

    /// Compare the output column with `expected`, given in row order.
    pub fn matches(&self, expected: [bool; 4]) -> bool {
        self.results()
            .iter()
            .zip(expected)
            .all(|(got, want)| got.as_bool() == want)
    }

    /// Same output column as `other`.
    pub fn equivalent(&self, other: &TruthTable) -> bool {
        self.results() == other.results()
    }
}

impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, " x | y | out")?;
        writeln!(f, "---+---+----")?;
        for row in &self.rows {
            writeln!(f, " {} | {} |  {}", row.first, row.second, row.result)?;
        }
        Ok(())
    }
}
