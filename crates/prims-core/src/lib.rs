//! Metadata-level reasoning types for elementwise tensor operators.
//!
//! `prims-core` provides the foundational value types (`DType`, `Shape`,
//! `TensorMeta`, `Scalar`) consumed by the compatibility checks and the
//! dtype promotion engine in `prims-ops`. Nothing here touches tensor
//! storage: every type models metadata only, so the same logic serves real
//! tensors and traced placeholder tensors alike.
//!
//! # Layout
//!
//! - [`types`]: dtypes, scalar kinds, and the default-dtype configuration
//! - [`shape`]: shapes, dimension bookkeeping, contiguous strides
//! - [`meta`]: the `TensorLike` seam, storage-free `TensorMeta`, operands

pub mod meta;
pub mod shape;
pub mod types;

pub use meta::{Device, NodeId, Operand, Scalar, TensorLike, TensorMeta, compare_tensor_meta};
pub use shape::{DimVec, Shape};
pub use types::{DType, DtypeDefaults, ScalarKind};

pub type Result<T> = std::result::Result<T, PrimsError>;

#[derive(thiserror::Error, Debug)]
pub enum PrimsError {
    // ── Shape and index validation ──────────────────────────────────────
    #[error("invalid dimension length {0}")]
    InvalidDimLength(i64),

    #[error("out of bounds index {idx} for tensor of rank {rank}")]
    IndexOutOfBounds { idx: i64, rank: usize },

    #[error("exclusive index {idx} outside (0, {rank}]")]
    InvalidExclusiveIndex { idx: usize, rank: usize },

    #[error("dimension {idx} out of range for rank {rank}")]
    DimOutOfRange { idx: i64, rank: usize },

    #[error("duplicate dimension {0} in reduction dims")]
    DuplicateReductionDim(usize),

    #[error("strides have rank {stride_rank} but shape has rank {shape_rank}")]
    StrideRankMismatch { shape_rank: usize, stride_rank: usize },

    // ── Operand mismatches ──────────────────────────────────────────────
    #[error("device mismatch: expected {expected}, got {got}")]
    DeviceMismatch { expected: Device, got: Device },

    #[error("shape mismatch: expected {expected}, got {got}")]
    ShapeMismatch { expected: Shape, got: Shape },

    #[error("dtype mismatch: expected {expected}, got {got}")]
    DtypeMismatch { expected: DType, got: DType },

    #[error("scalar kind mismatch: expected {expected}, got {got}")]
    KindMismatch { expected: ScalarKind, got: ScalarKind },

    // ── Dtype domain lookups ────────────────────────────────────────────
    #[error("dtype {0} has no corresponding real dtype")]
    NoRealEquivalent(DType),

    #[error("dtype {0} has no corresponding complex dtype")]
    NoComplexEquivalent(DType),

    #[error("default float dtype must be floating point, got {0}")]
    NonFloatDefault(DType),

    #[error("no backend dtype registered for {0}")]
    UnmappedBackendDtype(DType),

    // ── Argument parsing ────────────────────────────────────────────────
    #[error("invalid device string: {0:?}")]
    InvalidDevice(String),
}
