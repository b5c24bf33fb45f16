//! Einsum implementation for tensor contractions.
//!
//! Einsum notation: "ijk,k->ij" means contract index k
//! - Left of -> : input tensor indices
//! - Right of -> : output tensor indices
//! - Repeated indices are summed over (contracted)

use std::collections::HashMap;

use candle_core::Tensor;
use tracing::trace;

use crate::error::{Result, TensemError};

/// Parse einsum notation into input specs and output spec.
/// Example: "ij,j->i" -> (["ij", "j"], "i")
fn parse_notation(notation: &str) -> Result<(Vec<Vec<char>>, Vec<char>)> {
    let parts: Vec<&str> = notation.split("->").collect();
    if parts.len() > 2 {
        return Err(TensemError::UnsupportedContraction(format!(
            "'{}' has more than one '->'",
            notation
        )));
    }

    let inputs_str = parts[0];
    let output_str = if parts.len() > 1 { parts[1] } else { "" };

    let input_specs: Vec<Vec<char>> = inputs_str
        .split(',')
        .map(|s| s.trim().chars().collect())
        .collect();

    let output_spec: Vec<char> = output_str.trim().chars().collect();

    Ok((input_specs, output_spec))
}

/// Check ranks against the notation and that every index label has a
/// single size across all operands.
fn check_shapes(input_specs: &[Vec<char>], inputs: &[&Tensor]) -> Result<()> {
    let mut sizes: HashMap<char, usize> = HashMap::new();

    for (spec, tensor) in input_specs.iter().zip(inputs) {
        let dims = tensor.dims();
        if dims.len() != spec.len() {
            return Err(TensemError::DimensionMismatch {
                expected: format!("rank {} for '{}'", spec.len(), spec.iter().collect::<String>()),
                got: format!("shape {:?}", dims),
            });
        }
        for (&label, &size) in spec.iter().zip(dims) {
            match sizes.get(&label) {
                Some(&seen) if seen != size => {
                    return Err(TensemError::DimensionMismatch {
                        expected: format!("{}={}", label, seen),
                        got: format!("{}={}", label, size),
                    });
                }
                Some(_) => {}
                None => {
                    sizes.insert(label, size);
                }
            }
        }
    }

    Ok(())
}

/// Execute einsum operation.
///
/// Only the patterns the logic layer contracts with are supported; any other
/// notation is rejected with [`TensemError::UnsupportedContraction`].
pub fn einsum(notation: &str, inputs: &[&Tensor]) -> Result<Tensor> {
    let (input_specs, output_spec) = parse_notation(notation)?;

    if input_specs.len() != inputs.len() {
        return Err(TensemError::UnsupportedContraction(format!(
            "'{}' names {} operands but {} were given",
            notation,
            input_specs.len(),
            inputs.len()
        )));
    }

    check_shapes(&input_specs, inputs)?;
    trace!(notation, "einsum");

    let result = match (input_specs.as_slice(), inputs) {
        // Matrix-vector multiply: "ij,j->i"
        ([a_spec, b_spec], [a, b])
            if a_spec.len() == 2
                && b_spec.len() == 1
                && a_spec[1] == b_spec[0]
                && output_spec == vec![a_spec[0]] =>
        {
            // b is [j], need [j, 1] for matmul, then squeeze
            let b_col = b.unsqueeze(1)?;
            a.matmul(&b_col)?.squeeze(1)?
        }

        // Matrix multiply: "ij,jk->ik"
        ([a_spec, b_spec], [a, b])
            if a_spec.len() == 2
                && b_spec.len() == 2
                && a_spec[1] == b_spec[0]
                && output_spec == vec![a_spec[0], b_spec[1]] =>
        {
            a.matmul(b)?
        }

        // Rank-3 with a vector along the last axis: "ijk,k->ij"
        ([a_spec, b_spec], [a, b])
            if a_spec.len() == 3
                && b_spec.len() == 1
                && a_spec[2] == b_spec[0]
                && output_spec == vec![a_spec[0], a_spec[1]] =>
        {
            // Flatten [i, j, k] to [i*j, k], contract k, restore [i, j]
            let (i, j, k) = a.dims3()?;
            let a_2d = a.contiguous()?.reshape((i * j, k))?;
            let b_col = b.unsqueeze(1)?;
            a_2d.matmul(&b_col)?.reshape((i, j))?
        }

        // Hadamard product: "i,i->i"
        ([a_spec, b_spec], [a, b])
            if a_spec.len() == 1
                && b_spec.len() == 1
                && a_spec[0] == b_spec[0]
                && output_spec == vec![a_spec[0]] =>
        {
            a.mul(b)?
        }

        // Dot product: "i,i->"
        ([a_spec, b_spec], [a, b])
            if a_spec.len() == 1
                && b_spec.len() == 1
                && a_spec[0] == b_spec[0]
                && output_spec.is_empty() =>
        {
            a.mul(b)?.sum_all()?
        }

        _ => {
            return Err(TensemError::UnsupportedContraction(format!(
                "'{}' (inputs {:?}, output {:?})",
                notation, input_specs, output_spec
            )));
        }
    };

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use candle_core::Device;

    #[test]
    fn test_parse_notation() {
        let (inputs, output) = parse_notation("ijk,k->ij").unwrap();
        assert_eq!(inputs, vec![vec!['i', 'j', 'k'], vec!['k']]);
        assert_eq!(output, vec!['i', 'j']);
    }

    #[test]
    fn test_parse_notation_scalar_output() {
        let (inputs, output) = parse_notation("i,i->").unwrap();
        assert_eq!(inputs, vec![vec!['i'], vec!['i']]);
        assert_eq!(output, Vec::<char>::new());
    }

    #[test]
    fn test_matvec() {
        let device = Device::Cpu;
        let m = Tensor::new(&[[1.0f32, 1.0, 0.0], [0.0, 0.0, 1.0]], &device).unwrap();
        let v = Tensor::new(&[0.0f32, 0.0, 1.0], &device).unwrap();

        let out: Vec<f32> = einsum("ij,j->i", &[&m, &v]).unwrap().to_vec1().unwrap();
        assert_eq!(out, vec![0.0, 1.0]);
    }

    #[test]
    fn test_rank3_last_axis() {
        let device = Device::Cpu;
        // t[i][j][k] = 100i + 10j + k
        let t = Tensor::new(
            &[[[0.0f32, 1.0], [10.0, 11.0]], [[100.0, 101.0], [110.0, 111.0]]],
            &device,
        )
        .unwrap();
        let v = Tensor::new(&[0.0f32, 1.0], &device).unwrap();

        // Selecting k = 1
        let out: Vec<Vec<f32>> = einsum("ijk,k->ij", &[&t, &v]).unwrap().to_vec2().unwrap();
        assert_eq!(out, vec![vec![1.0, 11.0], vec![101.0, 111.0]]);
    }

    #[test]
    fn test_dot() {
        let device = Device::Cpu;
        let a = Tensor::new(&[1.0f32, 1.0, 0.0], &device).unwrap();
        let b = Tensor::new(&[0.0f32, 1.0, 1.0], &device).unwrap();

        let out: f32 = einsum("i,i->", &[&a, &b]).unwrap().to_scalar().unwrap();
        assert_eq!(out, 1.0);
    }

    #[test]
    fn test_label_size_mismatch() {
        let device = Device::Cpu;
        let m = Tensor::zeros((2, 3), candle_core::DType::F32, &device).unwrap();
        let v = Tensor::zeros(4, candle_core::DType::F32, &device).unwrap();

        let err = einsum("ij,j->i", &[&m, &v]).unwrap_err();
        assert!(matches!(err, TensemError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_unsupported_pattern() {
        let device = Device::Cpu;
        let m = Tensor::zeros((2, 2), candle_core::DType::F32, &device).unwrap();

        let err = einsum("ii->", &[&m]).unwrap_err();
        assert!(matches!(err, TensemError::UnsupportedContraction(_)));
    }
}
