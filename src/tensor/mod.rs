//! Tensor operations for tensem.
//!
//! This module provides the contraction kernel (einsum) and the host-side
//! readers used to validate tensors exactly.

mod einsum;
mod host;

pub use einsum::einsum;
pub use host::{is_binary, read_vec1, read_vec2, read_vec3, to_f32};
