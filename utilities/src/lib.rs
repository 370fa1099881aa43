use interp::{InterpMode, interp};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TableErrors {
    #[error("table has no points")]
    Empty,
    #[error("table breakpoints ({x}) and values ({y}) differ in length")]
    LengthMismatch { x: usize, y: usize },
    #[error("table entry {0} is not finite")]
    NonFinite(usize),
    #[error("table breakpoints must be strictly increasing, violated at index {0}")]
    NotIncreasing(usize),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawTable1d {
    x: Vec<f64>,
    y: Vec<f64>,
}

/// Piecewise linear lookup table.
///
/// Queries outside the breakpoints return the first or last value, so the
/// table is defined for every input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTable1d", into = "RawTable1d")]
pub struct Table1d {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl Table1d {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self, TableErrors> {
        if x.is_empty() {
            return Err(TableErrors::Empty);
        }
        if x.len() != y.len() {
            return Err(TableErrors::LengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }
        for i in 0..x.len() {
            if !x[i].is_finite() || !y[i].is_finite() {
                return Err(TableErrors::NonFinite(i));
            }
            if i > 0 && x[i] <= x[i - 1] {
                return Err(TableErrors::NotIncreasing(i));
            }
        }
        Ok(Self { x, y })
    }

    /// Table with a single breakpoint, evaluating to `value` everywhere.
    pub fn constant(value: f64) -> Result<Self, TableErrors> {
        Self::new(vec![0.0], vec![value])
    }

    pub fn eval(&self, x: f64) -> f64 {
        if self.x.len() == 1 {
            return self.y[0];
        }
        interp(&self.x, &self.y, x, &InterpMode::FirstLast)
    }

    pub fn breakpoints(&self) -> &[f64] {
        &self.x
    }

    pub fn values(&self) -> &[f64] {
        &self.y
    }

    pub fn first_breakpoint(&self) -> f64 {
        self.x[0]
    }

    pub fn last_breakpoint(&self) -> f64 {
        self.x[self.x.len() - 1]
    }

    /// True when `x` lies within the breakpoint range, ends included.
    pub fn contains(&self, x: f64) -> bool {
        x >= self.first_breakpoint() && x <= self.last_breakpoint()
    }
}

impl TryFrom<RawTable1d> for Table1d {
    type Error = TableErrors;
    fn try_from(raw: RawTable1d) -> Result<Self, TableErrors> {
        Table1d::new(raw.x, raw.y)
    }
}

impl From<Table1d> for RawTable1d {
    fn from(table: Table1d) -> Self {
        RawTable1d {
            x: table.x,
            y: table.y,
        }
    }
}
