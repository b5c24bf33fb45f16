//! Host-side reads for exact validation of small tensors.

use candle_core::{DType, Tensor};

use crate::error::{dims_mismatch, Result};

/// Convert a caller tensor to `F32`, the dtype every kernel works in.
pub fn to_f32(tensor: &Tensor) -> Result<Tensor> {
    if tensor.dtype() == DType::F32 {
        Ok(tensor.clone())
    } else {
        Ok(tensor.to_dtype(DType::F32)?)
    }
}

/// True when every value is exactly 0 or 1.
pub fn is_binary(values: &[f32]) -> bool {
    values.iter().all(|&v| v == 0.0 || v == 1.0)
}

/// Read a rank-1 tensor of length `len`.
pub fn read_vec1(tensor: &Tensor, len: usize) -> Result<Vec<f32>> {
    if tensor.dims() != [len] {
        return Err(dims_mismatch(&[len], tensor.dims()));
    }
    Ok(tensor.to_vec1::<f32>()?)
}

/// Read a rank-2 tensor of shape `(rows, cols)`.
pub fn read_vec2(tensor: &Tensor, rows: usize, cols: usize) -> Result<Vec<Vec<f32>>> {
    if tensor.dims() != [rows, cols] {
        return Err(dims_mismatch(&[rows, cols], tensor.dims()));
    }
    Ok(tensor.to_vec2::<f32>()?)
}

/// Read a rank-3 tensor of shape `(a, b, c)`.
pub fn read_vec3(tensor: &Tensor, a: usize, b: usize, c: usize) -> Result<Vec<Vec<Vec<f32>>>> {
    if tensor.dims() != [a, b, c] {
        return Err(dims_mismatch(&[a, b, c], tensor.dims()));
    }
    Ok(tensor.to_vec3::<f32>()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TensemError;
    use candle_core::Device;

    #[test]
    fn test_is_binary() {
        assert!(is_binary(&[0.0, 1.0, 1.0]));
        assert!(is_binary(&[]));
        assert!(!is_binary(&[0.0, 0.5]));
        assert!(!is_binary(&[2.0]));
    }

    #[test]
    fn test_to_f32_converts_f64() {
        let t = Tensor::new(&[1.0f64, 0.0], &Device::Cpu).unwrap();
        let t = to_f32(&t).unwrap();
        assert_eq!(t.dtype(), DType::F32);
        assert_eq!(t.to_vec1::<f32>().unwrap(), vec![1.0, 0.0]);
    }

    #[test]
    fn test_read_vec1_wrong_length() {
        let t = Tensor::new(&[1.0f32, 0.0, 0.0], &Device::Cpu).unwrap();
        assert!(matches!(
            read_vec1(&t, 2),
            Err(TensemError::DimensionMismatch { .. })
        ));
    }
}
