//! Connective tensors.
//!
//! Unary connectives are `(2, 2)` matrices and binary connectives are
//! `(2, 2, 2)` tensors over the truth-value space. Index 0 is TRUE and index
//! 1 is FALSE, so the slice `T[:, j, k]` of a binary connective is the output
//! for first argument `j` and second argument `k`.
//!
//! Binary application contracts the second argument first:
//!
//! ```text
//! M[i][j]  = Σ_k T[i][j][k] · y_k      (ijk,k->ij)
//! out[i]   = Σ_j M[i][j] · x_j         (ij,j->i)
//! ```
//!
//! Derived connectives (exclusive-or, the biconditional, ...) are not stored
//! as tensors; they are compositions of the four primitives.

use candle_core::{Device, Tensor};
use tracing::{debug, trace};

use crate::error::{Result, TensemError};
use crate::tensor::{einsum, read_vec2, read_vec3, to_f32};
use crate::truth::{Truth, TruthVector};

/// Negation: swaps the two basis vectors.
pub const NEGATION: [[f32; 2]; 2] = [[0.0, 1.0], [1.0, 0.0]];

/// Disjunction: FALSE only for (F, F).
pub const DISJUNCTION: [[[f32; 2]; 2]; 2] = [
    [[1.0, 1.0], [1.0, 0.0]],
    [[0.0, 0.0], [0.0, 1.0]],
];

/// Conjunction: TRUE only for (T, T).
pub const CONJUNCTION: [[[f32; 2]; 2]; 2] = [
    [[1.0, 0.0], [0.0, 0.0]],
    [[0.0, 1.0], [1.0, 1.0]],
];

/// Material conditional: FALSE only for (T, F).
pub const CONDITIONAL: [[[f32; 2]; 2]; 2] = [
    [[1.0, 0.0], [1.0, 1.0]],
    [[0.0, 1.0], [0.0, 0.0]],
];

/// A validated `(2, 2)` connective.
#[derive(Debug, Clone)]
pub struct UnaryConnective {
    tensor: Tensor,
}

impl UnaryConnective {
    /// Wrap a caller tensor. Each column must be a basis truth vector, so
    /// every basis input yields exactly one basis output.
    pub fn new(tensor: Tensor) -> Result<Self> {
        let tensor = to_f32(&tensor)?;
        let rows = read_vec2(&tensor, 2, 2).map_err(|_| {
            TensemError::MalformedTensor(format!(
                "unary connective must have shape (2, 2), got {:?}",
                tensor.dims()
            ))
        })?;

        for j in 0..2 {
            let column = [rows[0][j], rows[1][j]];
            if Truth::from_coords(&column).is_none() {
                return Err(TensemError::MalformedTensor(format!(
                    "unary connective maps {} to {:?}",
                    Truth::ALL[j],
                    column
                )));
            }
        }

        Ok(Self { tensor })
    }

    /// `T · x`
    pub fn apply(&self, x: &TruthVector) -> Result<TruthVector> {
        TruthVector::new(einsum("ij,j->i", &[&self.tensor, x.as_tensor()])?)
    }

    pub fn as_tensor(&self) -> &Tensor {
        &self.tensor
    }
}

/// A validated `(2, 2, 2)` connective.
#[derive(Debug, Clone)]
pub struct BinaryConnective {
    tensor: Tensor,
}

impl BinaryConnective {
    /// Wrap a caller tensor. Every slice `T[:, j, k]` must be a basis truth
    /// vector: the connective is defined and deterministic on all four basis
    /// pairs.
    pub fn new(tensor: Tensor) -> Result<Self> {
        let tensor = to_f32(&tensor)?;
        let cube = read_vec3(&tensor, 2, 2, 2).map_err(|_| {
            TensemError::MalformedTensor(format!(
                "binary connective must have shape (2, 2, 2), got {:?}",
                tensor.dims()
            ))
        })?;

        for j in 0..2 {
            for k in 0..2 {
                let slice = [cube[0][j][k], cube[1][j][k]];
                if Truth::from_coords(&slice).is_none() {
                    return Err(TensemError::MalformedTensor(format!(
                        "binary connective maps ({}, {}) to {:?}",
                        Truth::ALL[j],
                        Truth::ALL[k],
                        slice
                    )));
                }
            }
        }

        Ok(Self { tensor })
    }

    /// Contract with `y` along the last axis, then with `x`.
    pub fn apply(&self, x: &TruthVector, y: &TruthVector) -> Result<TruthVector> {
        let partial = einsum("ijk,k->ij", &[&self.tensor, y.as_tensor()])?;
        TruthVector::new(einsum("ij,j->i", &[&partial, x.as_tensor()])?)
    }

    pub fn as_tensor(&self) -> &Tensor {
        &self.tensor
    }
}

/// The four primitive connectives, built once per device.
#[derive(Debug, Clone)]
pub struct Connectives {
    pub negation: UnaryConnective,
    pub disjunction: BinaryConnective,
    pub conjunction: BinaryConnective,
    pub conditional: BinaryConnective,
}

impl Connectives {
    pub fn new(device: &Device) -> Result<Self> {
        let table = Self {
            negation: UnaryConnective::new(Tensor::new(&NEGATION, device)?)?,
            disjunction: BinaryConnective::new(Tensor::new(&DISJUNCTION, device)?)?,
            conjunction: BinaryConnective::new(Tensor::new(&CONJUNCTION, device)?)?,
            conditional: BinaryConnective::new(Tensor::new(&CONDITIONAL, device)?)?,
        };
        debug!(?device, "built connective table");
        Ok(table)
    }

    /// ¬x
    pub fn not(&self, x: &TruthVector) -> Result<TruthVector> {
        self.negation.apply(x)
    }

    /// x ∨ y
    pub fn or(&self, x: &TruthVector, y: &TruthVector) -> Result<TruthVector> {
        self.disjunction.apply(x, y)
    }

    /// x ∧ y
    pub fn and(&self, x: &TruthVector, y: &TruthVector) -> Result<TruthVector> {
        self.conjunction.apply(x, y)
    }

    /// x → y
    pub fn implies(&self, x: &TruthVector, y: &TruthVector) -> Result<TruthVector> {
        self.conditional.apply(x, y)
    }

    /// x → y written as ¬x ∨ y.
    pub fn implies_via_or(&self, x: &TruthVector, y: &TruthVector) -> Result<TruthVector> {
        self.or(&self.not(x)?, y)
    }

    /// (x ∨ y) ∧ (¬x ∨ ¬y)
    pub fn xor(&self, x: &TruthVector, y: &TruthVector) -> Result<TruthVector> {
        trace!(%x, %y, "xor");
        let either = self.or(x, y)?;
        let not_both = self.or(&self.not(x)?, &self.not(y)?)?;
        self.and(&either, &not_both)
    }

    /// (x → y) ∧ (y → x)
    pub fn biconditional(&self, x: &TruthVector, y: &TruthVector) -> Result<TruthVector> {
        self.and(&self.implies(x, y)?, &self.implies(y, x)?)
    }

    /// ¬(x ∧ y)
    pub fn nand(&self, x: &TruthVector, y: &TruthVector) -> Result<TruthVector> {
        self.not(&self.and(x, y)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Connectives, TruthVector, TruthVector) {
        let device = Device::Cpu;
        (
            Connectives::new(&device).unwrap(),
            TruthVector::truth_on(&device).unwrap(),
            TruthVector::falsity_on(&device).unwrap(),
        )
    }

    fn column(
        op: impl Fn(&TruthVector, &TruthVector) -> Result<TruthVector>,
        t: &TruthVector,
        f: &TruthVector,
    ) -> [bool; 4] {
        [
            op(t, t).unwrap().as_bool(),
            op(t, f).unwrap().as_bool(),
            op(f, t).unwrap().as_bool(),
            op(f, f).unwrap().as_bool(),
        ]
    }

    #[test]
    fn test_negation() {
        let (c, t, f) = setup();
        assert_eq!(c.not(&t).unwrap(), f);
        assert_eq!(c.not(&f).unwrap(), t);
        assert_eq!(c.not(&c.not(&t).unwrap()).unwrap(), t);
        assert_eq!(c.not(&c.not(&f).unwrap()).unwrap(), f);
    }

    #[test]
    fn test_disjunction_table() {
        let (c, t, f) = setup();
        assert_eq!(column(|x, y| c.or(x, y), &t, &f), [true, true, true, false]);
    }

    #[test]
    fn test_conjunction_table() {
        let (c, t, f) = setup();
        assert_eq!(column(|x, y| c.and(x, y), &t, &f), [true, false, false, false]);
    }

    #[test]
    fn test_conditional_table() {
        let (c, t, f) = setup();
        assert_eq!(column(|x, y| c.implies(x, y), &t, &f), [true, false, true, true]);
    }

    #[test]
    fn test_conditional_via_disjunction() {
        let (c, t, f) = setup();
        assert_eq!(
            column(|x, y| c.implies_via_or(x, y), &t, &f),
            column(|x, y| c.implies(x, y), &t, &f)
        );
    }

    #[test]
    fn test_xor_table() {
        let (c, t, f) = setup();
        assert_eq!(column(|x, y| c.xor(x, y), &t, &f), [false, true, true, false]);
    }

    #[test]
    fn test_biconditional_and_nand() {
        let (c, t, f) = setup();
        assert_eq!(column(|x, y| c.biconditional(x, y), &t, &f), [true, false, false, true]);
        assert_eq!(column(|x, y| c.nand(x, y), &t, &f), [false, true, true, true]);
    }

    #[test]
    fn test_argument_order_matters_for_conditional() {
        let (c, t, f) = setup();
        // T → F is false but F → T is true
        assert_eq!(c.implies(&t, &f).unwrap(), f);
        assert_eq!(c.implies(&f, &t).unwrap(), t);
    }

    #[test]
    fn test_binary_rejects_non_deterministic_slice() {
        let mut data = CONJUNCTION;
        // (T, T) now maps to (1, 1)
        data[1][0][0] = 1.0;
        let t = Tensor::new(&data, &Device::Cpu).unwrap();
        assert!(matches!(
            BinaryConnective::new(t),
            Err(TensemError::MalformedTensor(_))
        ));
    }

    #[test]
    fn test_binary_rejects_wrong_shape() {
        let t = Tensor::new(&NEGATION, &Device::Cpu).unwrap();
        assert!(matches!(
            BinaryConnective::new(t),
            Err(TensemError::MalformedTensor(_))
        ));
    }

    #[test]
    fn test_unary_rejects_non_basis_column() {
        let t = Tensor::new(&[[1.0f32, 1.0], [0.0, 1.0]], &Device::Cpu).unwrap();
        assert!(matches!(
            UnaryConnective::new(t),
            Err(TensemError::MalformedTensor(_))
        ));
    }
}
