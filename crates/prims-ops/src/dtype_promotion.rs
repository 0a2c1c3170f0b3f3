//! Elementwise dtype promotion.
//!
//! Two layers: a dtype lattice ([`higher_dtype`]) over a fixed bucket
//! order, and the operator-facing [`elementwise_dtypes`], which folds
//! operand kinds, scans tensor dtypes with rank-aware preference, and
//! applies a per-operator [`PromotionKind`] policy to produce the pair
//! (computation dtype, result dtype).

use prims_core::{DType, DtypeDefaults, Operand, ScalarKind};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Dtype buckets in promotion order; dtypes sharing a bucket tie.
///
/// A tie between the two members of a paired bucket promotes past it, so
/// every paired bucket must be followed by another bucket.
const DTYPE_BUCKETS: &[&[DType]] = &[
    &[DType::Bool],
    &[DType::U8, DType::I8],
    &[DType::I16],
    &[DType::I32],
    &[DType::I64],
    &[DType::F16, DType::BF16],
    &[DType::F32],
    &[DType::F64],
    &[DType::C32],
    &[DType::C64],
    &[DType::C128],
];

fn bucket_of(dtype: DType) -> usize {
    match dtype {
        DType::Bool => 0,
        DType::U8 | DType::I8 => 1,
        DType::I16 => 2,
        DType::I32 => 3,
        DType::I64 => 4,
        DType::F16 | DType::BF16 => 5,
        DType::F32 => 6,
        DType::F64 => 7,
        DType::C32 => 8,
        DType::C64 => 9,
        DType::C128 => 10,
    }
}

/// The higher of two dtypes under the promotion lattice.
///
/// `None` sides pass through: an absent operand never influences the
/// result. Distinct dtypes sharing a bucket promote past it: `U8` with
/// `I8` gives `I16`, `F16` with `BF16` gives `F32`.
pub fn higher_dtype(a: Option<DType>, b: Option<DType>) -> Option<DType> {
    let (a, b) = match (a, b) {
        (Some(a), Some(b)) => (a, b),
        (a, None) => return a,
        (None, b) => return b,
    };
    if a == b {
        return Some(a);
    }
    let (bucket_a, bucket_b) = (bucket_of(a), bucket_of(b));
    if bucket_a == bucket_b {
        // Only the paired buckets can tie with distinct dtypes, and both
        // are followed by a single-dtype bucket.
        return Some(DTYPE_BUCKETS[bucket_a + 1][0]);
    }
    Some(if bucket_a > bucket_b { a } else { b })
}

/// Whether a value of dtype `cast_from` casts to `cast_to` without losing
/// its category.
///
/// Categories are probed widest first; reaching `cast_to`'s category
/// before `cast_from`'s means the cast only moves up (or stays level).
pub fn can_safe_cast_to(cast_to: DType, cast_from: DType) -> bool {
    const CATEGORY_SCAN: [fn(DType) -> bool; 4] = [
        DType::is_complex,
        DType::is_float,
        DType::is_integer,
        DType::is_boolean,
    ];
    for is_category in CATEGORY_SCAN {
        if is_category(cast_to) {
            return true;
        }
        if is_category(cast_from) {
            return false;
        }
    }
    unreachable!("every dtype belongs to one of the four categories")
}

/// Dtype an operator's arithmetic runs in.
///
/// Identity except for the low-precision dtypes, which accumulate one
/// step wider: f16 and bf16 compute in f32, c32 in c64.
pub fn computation_dtype(dtype: DType) -> DType {
    match dtype {
        DType::F16 | DType::BF16 => DType::F32,
        DType::C32 => DType::C64,
        other => other,
    }
}

/// Per-operator policy applied after the base promotion.
///
/// Example operator for each policy: `nextafter` (Default), `add`
/// (OpMath), `sin` (IntToFloat), `abs` (ComplexToFloat), `pow`
/// (BoolToLong), `eq` (AlwaysBool).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PromotionKind {
    /// Compute and return in the promoted dtype as-is.
    Default,
    /// Compute one precision step wider for the low-precision dtypes.
    OpMath,
    /// Integer and boolean results become the default float dtype.
    IntToFloat,
    /// Complex results come back as their real component dtype.
    ComplexToFloat,
    /// Boolean results become 64-bit integers.
    BoolToLong,
    /// The result dtype is always boolean.
    AlwaysBool,
}

/// Computation and result dtypes for an elementwise operator.
///
/// Three steps. The operands' scalar kinds fold into a single highest
/// kind. Tensor dtypes of that kind are then scanned for a concrete
/// result dtype, preferring tensors with at least one dimension over
/// rank-0 tensors; scalars only matter when no tensor of the kind exists,
/// through the `defaults` fallback. Finally `kind` adjusts the pair for
/// the operator.
pub fn elementwise_dtypes(
    operands: &[Operand<'_>],
    kind: PromotionKind,
    defaults: &DtypeDefaults,
) -> (DType, DType) {
    let highest = operands
        .iter()
        .fold(ScalarKind::Bool, |acc, operand| acc.promote(operand.kind()));

    let result_dtype = match highest {
        ScalarKind::Bool => DType::Bool,
        ScalarKind::Int => {
            highest_dtype_filtered(operands, DType::is_integer, false, false).unwrap_or(DType::I64)
        }
        ScalarKind::Float => highest_dtype_filtered(operands, DType::is_float, false, false)
            .unwrap_or(defaults.float()),
        ScalarKind::Complex => {
            let has_one_plus_dim_complex = operands.iter().any(|operand| {
                operand
                    .as_tensor()
                    .is_some_and(|t| t.ndim() > 0 && t.dtype().is_complex())
            });
            let float_or_complex = |d: DType| d.is_float() || d.is_complex();
            // Without a rank>0 complex tensor, rank stops mattering and
            // every matching tensor lands in the same scan bucket. The
            // float branch keeps its rank preference regardless; the
            // asymmetry is deliberate and callers depend on it.
            let scanned = highest_dtype_filtered(
                operands,
                float_or_complex,
                true,
                !has_one_plus_dim_complex,
            );
            scanned.unwrap_or(defaults.complex())
        }
    };

    let (computation, result) = match kind {
        PromotionKind::Default => (result_dtype, result_dtype),
        PromotionKind::OpMath => (computation_dtype(result_dtype), result_dtype),
        PromotionKind::IntToFloat => {
            let result = if result_dtype.is_integer() || result_dtype.is_boolean() {
                defaults.float()
            } else {
                result_dtype
            };
            (computation_dtype(result), result)
        }
        PromotionKind::ComplexToFloat => {
            // Non-complex results pass through unchanged.
            let result = result_dtype.corresponding_real().unwrap_or(result_dtype);
            (computation_dtype(result_dtype), result)
        }
        PromotionKind::BoolToLong => {
            if result_dtype.is_boolean() {
                (DType::I64, DType::I64)
            } else {
                (computation_dtype(result_dtype), result_dtype)
            }
        }
        PromotionKind::AlwaysBool => (result_dtype, DType::Bool),
    };

    trace!(?kind, %computation, %result, "elementwise promotion");
    (computation, result)
}

/// Highest dtype among tensor operands passing `filter`.
///
/// Tensors with at least one dimension outrank rank-0 tensors unless
/// `all_tensors_equal` collapses the two buckets. With `float_as_complex`,
/// float dtypes enter the fold as their complex counterparts.
fn highest_dtype_filtered(
    operands: &[Operand<'_>],
    filter: impl Fn(DType) -> bool,
    float_as_complex: bool,
    all_tensors_equal: bool,
) -> Option<DType> {
    let mut zero_dim = None;
    let mut one_plus_dim = None;
    for operand in operands {
        let Some(tensor) = operand.as_tensor() else {
            continue;
        };
        if !filter(tensor.dtype()) {
            continue;
        }
        let mut dtype = tensor.dtype();
        if float_as_complex && let Ok(complex) = dtype.corresponding_complex() {
            dtype = complex;
        }
        if tensor.ndim() == 0 && !all_tensors_equal {
            zero_dim = higher_dtype(zero_dim, Some(dtype));
        } else {
            one_plus_dim = higher_dtype(one_plus_dim, Some(dtype));
        }
    }
    one_plus_dim.or(zero_dim)
}
