//! Predicate tensors.
//!
//! A predicate can be held in two forms:
//!
//! - **Propositional**: a `(2, N)` matrix `P` whose column `i` is the truth
//!   vector of "P(i)". Applying it to an entity is a matrix-vector product,
//!   `P · e_i`, which selects that column.
//! - **Set-theoretic**: an `(N, N)` diagonal 0/1 filter. Applied to an
//!   extension it keeps the members the predicate holds of; applied to the
//!   universe it yields the predicate's own extension.
//!
//! ```text
//! mathematician = [[1, 1, 0],      brown = diag(0, 1, 1)
//!                  [0, 0, 1]]      dogs  = (1, 1, 0)
//! mathematician · john = TRUE      brown · dogs = (0, 1, 0)
//! ```

use candle_core::{DType, Tensor};
use tracing::trace;

use crate::domain::{EntityVector, ExtensionVector};
use crate::error::{Result, TensemError};
use crate::tensor::{einsum, read_vec2, to_f32};
use crate::truth::{Truth, TruthVector};

/// A `(2, N)` predicate mapping entity vectors to truth vectors.
#[derive(Debug, Clone)]
pub struct PropositionalPredicate {
    tensor: Tensor,
}

impl PropositionalPredicate {
    /// Wrap a caller tensor. Every column must be a basis truth vector.
    pub fn new(tensor: Tensor) -> Result<Self> {
        let tensor = to_f32(&tensor)?;
        let dims = tensor.dims();
        if dims.len() != 2 || dims[0] != 2 || dims[1] == 0 {
            return Err(TensemError::MalformedTensor(format!(
                "propositional predicate must have shape (2, N), got {:?}",
                dims
            )));
        }
        let size = dims[1];
        let rows = read_vec2(&tensor, 2, size)?;

        for column in 0..size {
            let pair = [rows[0][column], rows[1][column]];
            if Truth::from_coords(&pair).is_none() {
                return Err(TensemError::MalformedTensor(format!(
                    "column {} is {:?}, not a basis truth vector",
                    column, pair
                )));
            }
        }

        Ok(Self { tensor })
    }

    /// Build the propositional form of a set: row 0 is the extension, row 1
    /// its complement.
    pub fn from_extension(extension: &ExtensionVector) -> Result<Self> {
        let complement = extension.complement()?;
        let tensor = Tensor::stack(&[extension.as_tensor(), complement.as_tensor()], 0)?;
        Ok(Self { tensor })
    }

    /// Domain size N.
    pub fn size(&self) -> usize {
        self.tensor.dims()[1]
    }

    /// Truth value of the predicate for one individual: `P · e`.
    pub fn apply(&self, entity: &EntityVector) -> Result<TruthVector> {
        let result = einsum("ij,j->i", &[&self.tensor, entity.as_tensor()])?;
        trace!(entity = entity.index(), "applied propositional predicate");
        TruthVector::new(result)
    }

    /// The individuals the predicate holds of (the TRUE row).
    pub fn extension(&self) -> Result<ExtensionVector> {
        ExtensionVector::new(self.tensor.get(0)?)
    }

    pub fn as_tensor(&self) -> &Tensor {
        &self.tensor
    }
}

/// An `(N, N)` diagonal 0/1 filter mapping extensions to extensions.
#[derive(Debug, Clone)]
pub struct SetPredicate {
    tensor: Tensor,
}

impl SetPredicate {
    /// Wrap a caller tensor. It must be square, diagonal and 0/1.
    pub fn new(tensor: Tensor) -> Result<Self> {
        let tensor = to_f32(&tensor)?;
        let dims = tensor.dims();
        if dims.len() != 2 || dims[0] != dims[1] || dims[0] == 0 {
            return Err(TensemError::MalformedTensor(format!(
                "set predicate must have shape (N, N), got {:?}",
                dims
            )));
        }
        let size = dims[0];
        let rows = read_vec2(&tensor, size, size)?;

        for (i, row) in rows.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                let ok = if i == j {
                    value == 0.0 || value == 1.0
                } else {
                    value == 0.0
                };
                if !ok {
                    return Err(TensemError::MalformedTensor(format!(
                        "entry ({}, {}) = {} breaks the diagonal 0/1 filter form",
                        i, j, value
                    )));
                }
            }
        }

        Ok(Self { tensor })
    }

    /// The diagonal filter whose extension is `extension`.
    pub fn from_extension(extension: &ExtensionVector) -> Result<Self> {
        let values = extension.to_vec()?;
        let size = values.len();
        let mut data = vec![0.0f32; size * size];
        for (i, value) in values.into_iter().enumerate() {
            data[i * size + i] = value;
        }
        let tensor = Tensor::from_vec(data, (size, size), extension.device())?;
        Ok(Self { tensor })
    }

    /// Domain size N.
    pub fn size(&self) -> usize {
        self.tensor.dims()[0]
    }

    /// The predicate's extension: `P · universe`.
    pub fn extension(&self) -> Result<ExtensionVector> {
        let universe = Tensor::ones(self.size(), DType::F32, self.tensor.device())?;
        ExtensionVector::new(einsum("ij,j->i", &[&self.tensor, &universe])?)
    }

    /// Keep the members of `extension` the predicate holds of: `P · x`.
    pub fn restrict(&self, extension: &ExtensionVector) -> Result<ExtensionVector> {
        ExtensionVector::new(einsum("ij,j->i", &[&self.tensor, extension.as_tensor()])?)
    }

    /// The filter for "self and other": `P · Q`.
    pub fn compose(&self, other: &SetPredicate) -> Result<SetPredicate> {
        let tensor = einsum("ij,jk->ik", &[&self.tensor, &other.tensor])?;
        Ok(Self { tensor })
    }

    /// The equivalent `(2, N)` propositional predicate.
    pub fn to_propositional(&self) -> Result<PropositionalPredicate> {
        PropositionalPredicate::from_extension(&self.extension()?)
    }

    pub fn as_tensor(&self) -> &Tensor {
        &self.tensor
    }
}

/// Truth value of a propositional predicate for one individual.
pub fn apply_predicate(
    predicate: &PropositionalPredicate,
    entity: &EntityVector,
) -> Result<TruthVector> {
    predicate.apply(entity)
}

/// Full extension of a set-theoretic predicate.
pub fn extension_of(predicate: &SetPredicate) -> Result<ExtensionVector> {
    predicate.extension()
}

/// Restrict an extension by a set-theoretic predicate.
pub fn apply_predicate_to_extension(
    predicate: &SetPredicate,
    extension: &ExtensionVector,
) -> Result<ExtensionVector> {
    predicate.restrict(extension)
}
