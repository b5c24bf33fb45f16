//! Truth-value space.
//!
//! Truth values live in a two-dimensional space with exactly two admissible
//! points, the basis vectors `TRUE = (1, 0)` and `FALSE = (0, 1)`. A
//! [`TruthVector`] can only be built from one of them, so every value that
//! flows through connectives and quantifiers is a basis vector.

use std::fmt;

use candle_core::{Device, Tensor};

use crate::error::{Result, TensemError};
use crate::tensor::{read_vec1, to_f32};

/// Coordinates of the TRUE basis vector.
pub const TRUE: [f32; 2] = [1.0, 0.0];

/// Coordinates of the FALSE basis vector.
pub const FALSE: [f32; 2] = [0.0, 1.0];

/// Host-side view of a basis truth vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Truth {
    True,
    False,
}

impl Truth {
    /// Both basis values, TRUE first. This is the enumeration order used by
    /// truth tables.
    pub const ALL: [Truth; 2] = [Truth::True, Truth::False];

    pub fn from_bool(value: bool) -> Self {
        if value {
            Truth::True
        } else {
            Truth::False
        }
    }

    pub fn as_bool(self) -> bool {
        matches!(self, Truth::True)
    }

    /// The basis vector coordinates.
    pub fn coords(self) -> [f32; 2] {
        match self {
            Truth::True => TRUE,
            Truth::False => FALSE,
        }
    }

    /// Recognize a basis vector. Comparison is exact.
    pub fn from_coords(values: &[f32]) -> Option<Self> {
        if values == TRUE {
            Some(Truth::True)
        } else if values == FALSE {
            Some(Truth::False)
        } else {
            None
        }
    }
}

impl From<bool> for Truth {
    fn from(value: bool) -> Self {
        Truth::from_bool(value)
    }
}

impl fmt::Display for Truth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Truth::True => write!(f, "T"),
            Truth::False => write!(f, "F"),
        }
    }
}

/// A validated basis truth vector backed by a `(2,)` tensor.
#[derive(Debug, Clone)]
pub struct TruthVector {
    tensor: Tensor,
    truth: Truth,
}

impl TruthVector {
    /// Wrap a tensor, checking that it is shaped `(2,)` and equals one of the
    /// basis vectors.
    pub fn new(tensor: Tensor) -> Result<Self> {
        let tensor = to_f32(&tensor)?;
        let values = read_vec1(&tensor, 2)?;
        let truth = Truth::from_coords(&values).ok_or(TensemError::InvalidTruthValue(values))?;
        Ok(Self { tensor, truth })
    }

    pub fn from_truth(truth: Truth, device: &Device) -> Result<Self> {
        let tensor = Tensor::new(&truth.coords(), device)?;
        Ok(Self { tensor, truth })
    }

    pub fn from_bool(value: bool, device: &Device) -> Result<Self> {
        Self::from_truth(Truth::from_bool(value), device)
    }

    /// TRUE on `device`.
    pub fn truth_on(device: &Device) -> Result<Self> {
        Self::from_truth(Truth::True, device)
    }

    /// FALSE on `device`.
    pub fn falsity_on(device: &Device) -> Result<Self> {
        Self::from_truth(Truth::False, device)
    }

    pub fn truth(&self) -> Truth {
        self.truth
    }

    pub fn as_bool(&self) -> bool {
        self.truth.as_bool()
    }

    pub fn as_tensor(&self) -> &Tensor {
        &self.tensor
    }

    pub fn into_tensor(self) -> Tensor {
        self.tensor
    }

    pub fn device(&self) -> &Device {
        self.tensor.device()
    }
}

impl PartialEq for TruthVector {
    fn eq(&self, other: &Self) -> bool {
        self.truth == other.truth
    }
}

impl Eq for TruthVector {}

impl PartialEq<Truth> for TruthVector {
    fn eq(&self, other: &Truth) -> bool {
        self.truth == *other
    }
}

impl fmt::Display for TruthVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.truth.fmt(f)
    }
}
