//! Quantifiers over extensions.
//!
//! `forall` and `exists` cannot be written as fixed tensors independent of
//! the domain size, so they are plain functions over extension vectors:
//!
//! - `forall(X, Y)` is the subset test `X · Y = X` (all X are Y).
//! - `exists(X)` is TRUE when any coordinate of `X` is nonzero.

use candle_core::Tensor;
use tracing::trace;

use crate::domain::ExtensionVector;
use crate::error::Result;
use crate::tensor::einsum;
use crate::truth::TruthVector;

/// "All X are Y". Not symmetric in its arguments.
pub fn forall(x: &ExtensionVector, y: &ExtensionVector) -> Result<TruthVector> {
    x.check_same_len(y)?;
    let overlap = einsum("i,i->i", &[x.as_tensor(), y.as_tensor()])?;
    let outside: f32 = x.as_tensor().sub(&overlap)?.sum_all()?.to_scalar()?;
    trace!(outside, "forall");
    TruthVector::from_bool(outside == 0.0, x.device())
}

/// "Something is X".
pub fn exists(x: &ExtensionVector) -> Result<TruthVector> {
    let total: f32 = x.as_tensor().sum_all()?.to_scalar()?;
    trace!(total, "exists");
    TruthVector::from_bool(total > 0.0, x.device())
}

/// "Everything is X": `forall(universe, X)`.
pub fn forall_in_domain(x: &ExtensionVector) -> Result<TruthVector> {
    let universe = ExtensionVector::new(Tensor::ones_like(x.as_tensor())?)?;
    forall(&universe, x)
}

/// "Some X are Y": `exists(X ∧ Y)`.
pub fn some(x: &ExtensionVector, y: &ExtensionVector) -> Result<TruthVector> {
    exists(&x.and(y)?)
}

/// "No X are Y": the negation of [`some`].
pub fn no(x: &ExtensionVector, y: &ExtensionVector) -> Result<TruthVector> {
    let witness = some(x, y)?;
    TruthVector::from_bool(!witness.as_bool(), x.device())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TensemError;
    use candle_core::Device;

    fn ext(values: &[f32]) -> ExtensionVector {
        ExtensionVector::new(Tensor::new(values, &Device::Cpu).unwrap()).unwrap()
    }

    #[test]
    fn test_forall_subset() {
        let dogs = ext(&[1.0, 1.0, 0.0]);
        let brown = ext(&[0.0, 1.0, 1.0]);
        let cats = ext(&[0.0, 0.0, 1.0]);

        assert!(!forall(&dogs, &brown).unwrap().as_bool());
        assert!(forall(&cats, &brown).unwrap().as_bool());
        assert!(!forall(&brown, &cats).unwrap().as_bool());
    }

    #[test]
    fn test_forall_edge_cases() {
        let empty = ext(&[0.0, 0.0, 0.0]);
        let all = ext(&[1.0, 1.0, 1.0]);
        let cats = ext(&[0.0, 0.0, 1.0]);

        // Vacuous truth
        assert!(forall(&empty, &cats).unwrap().as_bool());
        assert!(forall(&empty, &empty).unwrap().as_bool());
        assert!(forall(&cats, &all).unwrap().as_bool());
        assert!(!forall(&all, &cats).unwrap().as_bool());
    }

    #[test]
    fn test_exists() {
        assert!(!exists(&ext(&[0.0, 0.0, 0.0])).unwrap().as_bool());
        assert!(exists(&ext(&[0.0, 0.0, 1.0])).unwrap().as_bool());
        assert!(exists(&ext(&[1.0, 1.0, 1.0])).unwrap().as_bool());
    }

    #[test]
    fn test_forall_in_domain() {
        assert!(forall_in_domain(&ext(&[1.0, 1.0])).unwrap().as_bool());
        assert!(!forall_in_domain(&ext(&[1.0, 0.0])).unwrap().as_bool());
    }

    #[test]
    fn test_some_and_no() {
        let dogs = ext(&[1.0, 1.0, 0.0]);
        let brown = ext(&[0.0, 1.0, 1.0]);
        let cats = ext(&[0.0, 0.0, 1.0]);

        assert!(some(&dogs, &brown).unwrap().as_bool());
        assert!(!no(&dogs, &brown).unwrap().as_bool());
        assert!(no(&dogs, &cats).unwrap().as_bool());
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = ext(&[1.0, 0.0, 0.0]);
        let b = ext(&[1.0, 0.0]);
        assert!(matches!(
            forall(&a, &b),
            Err(TensemError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            some(&a, &b),
            Err(TensemError::DimensionMismatch { .. })
        ));
    }
}
