//! Tensor metadata: the `TensorLike` capability trait, the storage-free
//! `TensorMeta` value, scalar operands, and devices.
//!
//! Operator implementations treat storage-backed tensors and metadata-only
//! tensors interchangeably; everything downstream of operand collection
//! depends only on [`TensorLike`].

use std::fmt;
use std::str::FromStr;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::shape::{Shape, make_contiguous_strides_for, validate_shape};
use crate::types::{DType, DtypeDefaults, ScalarKind};
use crate::{PrimsError, Result};

/// Compute device an operand lives on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Device {
    /// Host CPU, the default for bare scalars.
    #[default]
    Cpu,
    /// Accelerator, by index.
    Gpu(u32),
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Cpu => write!(f, "cpu"),
            Device::Gpu(index) => write!(f, "gpu:{index}"),
        }
    }
}

impl FromStr for Device {
    type Err = PrimsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "cpu" => Ok(Device::Cpu),
            "gpu" => Ok(Device::Gpu(0)),
            other => match other.strip_prefix("gpu:") {
                Some(index) => index
                    .parse()
                    .map(Device::Gpu)
                    .map_err(|_| PrimsError::InvalidDevice(s.to_string())),
                None => Err(PrimsError::InvalidDevice(s.to_string())),
            },
        }
    }
}

/// Opaque handle into an external tracing graph.
///
/// Assigned by the tracing collaborator when it records the node a
/// [`TensorMeta`] stands for; this crate only stores it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub u64);

/// A bare scalar operand, not yet bound to any tensor dtype.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Complex(Complex64),
}

impl Scalar {
    /// The scalar kind of the carried value.
    pub fn kind(self) -> ScalarKind {
        match self {
            Scalar::Bool(_) => ScalarKind::Bool,
            Scalar::Int(_) => ScalarKind::Int,
            Scalar::Float(_) => ScalarKind::Float,
            Scalar::Complex(_) => ScalarKind::Complex,
        }
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<Complex64> for Scalar {
    fn from(value: Complex64) -> Self {
        Scalar::Complex(value)
    }
}

/// Capability interface shared by storage-backed tensors and metadata-only
/// tensors.
pub trait TensorLike {
    /// Dimension lengths.
    fn shape(&self) -> &Shape;
    /// Element strides, one per dimension.
    fn strides(&self) -> &[i64];
    /// Element dtype.
    fn dtype(&self) -> DType;
    /// Device the elements live on (or would live on).
    fn device(&self) -> Device;

    /// Number of dimensions (rank).
    fn ndim(&self) -> usize {
        self.shape().ndim()
    }

    /// Total number of elements.
    fn numel(&self) -> i64 {
        self.shape().numel()
    }
}

/// One argument to an elementwise operator: a bare scalar or anything
/// tensor-like.
#[derive(Clone, Copy)]
pub enum Operand<'a> {
    Scalar(Scalar),
    Tensor(&'a dyn TensorLike),
}

impl<'a> Operand<'a> {
    /// The scalar kind this operand contributes to promotion.
    pub fn kind(&self) -> ScalarKind {
        match self {
            Operand::Scalar(scalar) => scalar.kind(),
            Operand::Tensor(tensor) => tensor.dtype().kind(),
        }
    }

    /// The effective dtype of this operand: a tensor's own dtype, or the
    /// default dtype for a scalar's kind.
    pub fn dtype_hint(&self, defaults: &DtypeDefaults) -> DType {
        match self {
            Operand::Scalar(scalar) => defaults.dtype_for(scalar.kind()),
            Operand::Tensor(tensor) => tensor.dtype(),
        }
    }

    /// The tensor behind this operand, if it is one.
    pub fn as_tensor(&self) -> Option<&'a dyn TensorLike> {
        match self {
            Operand::Scalar(_) => None,
            Operand::Tensor(tensor) => Some(*tensor),
        }
    }
}

impl<'a, T: TensorLike> From<&'a T> for Operand<'a> {
    fn from(tensor: &'a T) -> Self {
        Operand::Tensor(tensor)
    }
}

impl From<Scalar> for Operand<'_> {
    fn from(scalar: Scalar) -> Self {
        Operand::Scalar(scalar)
    }
}

impl From<bool> for Operand<'_> {
    fn from(value: bool) -> Self {
        Operand::Scalar(Scalar::Bool(value))
    }
}

impl From<i64> for Operand<'_> {
    fn from(value: i64) -> Self {
        Operand::Scalar(Scalar::Int(value))
    }
}

impl From<f64> for Operand<'_> {
    fn from(value: f64) -> Self {
        Operand::Scalar(Scalar::Float(value))
    }
}

impl From<Complex64> for Operand<'_> {
    fn from(value: Complex64) -> Self {
        Operand::Scalar(Scalar::Complex(value))
    }
}

/// Tensor metadata without backing storage.
///
/// Stands in for a real tensor anywhere only shape, strides, dtype, and
/// device matter: while tracing an operator graph, or when validating
/// operands before any kernel runs.
#[derive(Clone, Debug)]
pub struct TensorMeta {
    shape: Shape,
    strides: Vec<i64>,
    dtype: DType,
    device: Device,
    node: Option<NodeId>,
}

impl TensorMeta {
    // ── Constructors ────────────────────────────────────────────────────

    /// Metadata copied from an example tensor-like.
    pub fn from_tensor(example: &dyn TensorLike) -> Self {
        Self {
            shape: example.shape().clone(),
            strides: example.strides().to_vec(),
            dtype: example.dtype(),
            device: example.device(),
            node: None,
        }
    }

    /// Metadata for a bare scalar: rank 0, empty strides, the default
    /// dtype for the scalar's kind, CPU device.
    pub fn from_scalar(scalar: Scalar, defaults: &DtypeDefaults) -> Self {
        Self {
            shape: Shape::scalar(),
            strides: Vec::new(),
            dtype: defaults.dtype_for(scalar.kind()),
            device: Device::Cpu,
            node: None,
        }
    }

    /// Fully explicit metadata.
    ///
    /// Fails if any dimension is negative or if `strides` does not have
    /// one entry per dimension.
    pub fn new(shape: Shape, strides: Vec<i64>, dtype: DType, device: Device) -> Result<Self> {
        validate_shape(&shape)?;
        if strides.len() != shape.ndim() {
            return Err(PrimsError::StrideRankMismatch {
                shape_rank: shape.ndim(),
                stride_rank: strides.len(),
            });
        }
        Ok(Self {
            shape,
            strides,
            dtype,
            device,
            node: None,
        })
    }

    /// Explicit metadata with row-major contiguous strides.
    pub fn contiguous(shape: Shape, dtype: DType, device: Device) -> Result<Self> {
        let strides = make_contiguous_strides_for(&shape)?;
        Ok(Self {
            shape,
            strides,
            dtype,
            device,
            node: None,
        })
    }

    // ── Trace back-reference ────────────────────────────────────────────

    /// Attach a tracing-graph handle.
    pub fn with_node(mut self, node: NodeId) -> Self {
        self.node = Some(node);
        self
    }

    /// The attached tracing-graph handle, if any.
    pub fn node(&self) -> Option<NodeId> {
        self.node
    }

    /// Replace the tracing-graph handle.
    pub fn set_node(&mut self, node: Option<NodeId>) {
        self.node = node;
    }
}

impl TensorLike for TensorMeta {
    fn shape(&self) -> &Shape {
        &self.shape
    }

    fn strides(&self) -> &[i64] {
        &self.strides
    }

    fn dtype(&self) -> DType {
        self.dtype
    }

    fn device(&self) -> Device {
        self.device
    }
}

/// Check that two tensor-likes agree on metadata.
///
/// Corresponding shape dimensions are compared first, then dtype, then
/// device; the first difference is reported. Strides are not compared yet.
pub fn compare_tensor_meta(a: &dyn TensorLike, b: &dyn TensorLike) -> Result<()> {
    for (&da, &db) in a.shape().0.iter().zip(&b.shape().0) {
        if da != db {
            return Err(PrimsError::ShapeMismatch {
                expected: a.shape().clone(),
                got: b.shape().clone(),
            });
        }
    }
    if a.dtype() != b.dtype() {
        return Err(PrimsError::DtypeMismatch {
            expected: a.dtype(),
            got: b.dtype(),
        });
    }
    if a.device() != b.device() {
        return Err(PrimsError::DeviceMismatch {
            expected: a.device(),
            got: b.device(),
        });
    }
    Ok(())
}
