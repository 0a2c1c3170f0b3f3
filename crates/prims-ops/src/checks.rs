//! Operand compatibility checks run before an elementwise operator
//! executes.
//!
//! Each check scans a mixed scalar/tensor operand list, adopts the first
//! relevant tensor as the expectation, and fails on the first operand that
//! disagrees. Scalars never participate. Rank-0 CPU tensors can be
//! exempted where an operator accepts "CPU scalar" arguments next to
//! tensors on any device.

use prims_core::{Device, Operand, PrimsError, Result, Shape, TensorLike};

/// `true` for rank-0 tensors on the CPU device.
pub fn is_cpu_scalar_tensor(tensor: &dyn TensorLike) -> bool {
    tensor.ndim() == 0 && tensor.device() == Device::Cpu
}

/// Check that all tensor operands live on one device.
///
/// With `allow_cpu_scalar_tensors`, rank-0 CPU tensors are exempt. Lists
/// with at most one operand pass trivially.
pub fn check_same_device(operands: &[Operand<'_>], allow_cpu_scalar_tensors: bool) -> Result<()> {
    if operands.len() <= 1 {
        return Ok(());
    }
    let mut expected: Option<Device> = None;
    for operand in operands {
        let Some(tensor) = operand.as_tensor() else {
            continue;
        };
        if allow_cpu_scalar_tensors && is_cpu_scalar_tensor(tensor) {
            continue;
        }
        match expected {
            None => expected = Some(tensor.device()),
            Some(device) if device != tensor.device() => {
                return Err(PrimsError::DeviceMismatch {
                    expected: device,
                    got: tensor.device(),
                });
            }
            Some(_) => {}
        }
    }
    Ok(())
}

/// Check that all tensor operands share one shape, rank and dims both.
///
/// With `allow_cpu_scalar_tensors`, rank-0 CPU tensors are exempt.
pub fn check_same_shape(operands: &[Operand<'_>], allow_cpu_scalar_tensors: bool) -> Result<()> {
    let mut expected: Option<&Shape> = None;
    for operand in operands {
        let Some(tensor) = operand.as_tensor() else {
            continue;
        };
        if allow_cpu_scalar_tensors && is_cpu_scalar_tensor(tensor) {
            continue;
        }
        match expected {
            None => expected = Some(tensor.shape()),
            Some(shape) if shape != tensor.shape() => {
                return Err(PrimsError::ShapeMismatch {
                    expected: shape.clone(),
                    got: tensor.shape().clone(),
                });
            }
            Some(_) => {}
        }
    }
    Ok(())
}

/// Check that all tensor operands share one dtype and one scalar kind.
///
/// The kind comparison is a second tripwire: today dtype equality implies
/// kind equality, but the dtype rule may be relaxed per-operator. Scalar
/// operands are exempt for now, so a float scalar next to an integer
/// tensor passes.
pub fn check_same_dtype(operands: &[Operand<'_>]) -> Result<()> {
    let mut expected_dtype = None;
    let mut expected_kind = None;
    for operand in operands {
        let Some(tensor) = operand.as_tensor() else {
            continue;
        };
        let dtype = tensor.dtype();
        let seen_dtype = *expected_dtype.get_or_insert(dtype);
        if seen_dtype != dtype {
            return Err(PrimsError::DtypeMismatch {
                expected: seen_dtype,
                got: dtype,
            });
        }
        let kind = dtype.kind();
        let seen_kind = *expected_kind.get_or_insert(kind);
        if seen_kind != kind {
            return Err(PrimsError::KindMismatch {
                expected: seen_kind,
                got: kind,
            });
        }
    }
    Ok(())
}
