//! Shapes, dimension bookkeeping, and contiguous stride computation.
//!
//! Dimension indices come in two forms: signed (`i64`, possibly negative,
//! as accepted at API boundaries) and canonical (`usize`, already wrapped
//! into range). [`canonicalize_dim`] converts the former to the latter;
//! the validators and reduction helpers operate on canonical indices.

use smallvec::SmallVec;

use crate::{PrimsError, Result};

/// Canonical dimension-index list. Reductions rarely name more than a few
/// dims, so the indices stay inline.
pub type DimVec = SmallVec<[usize; 4]>;

/// Tensor shape (dimension lengths).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Shape(pub Vec<i64>);

impl Shape {
    pub fn new(dims: impl Into<Vec<i64>>) -> Self {
        Self(dims.into())
    }

    /// Scalar (rank-0) shape.
    pub fn scalar() -> Self {
        Self(vec![])
    }

    /// Number of dimensions (rank).
    pub fn ndim(&self) -> usize {
        self.0.len()
    }

    /// Total number of elements; 1 for rank-0 shapes.
    pub fn numel(&self) -> i64 {
        self.0.iter().product()
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, d) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{d}")?;
        }
        write!(f, "]")
    }
}

/// Fails unless `length` is a valid (non-negative) dimension length.
pub fn validate_dim_length(length: i64) -> Result<()> {
    if length < 0 {
        return Err(PrimsError::InvalidDimLength(length));
    }
    Ok(())
}

/// Fails unless every dimension of `shape` is non-negative.
pub fn validate_shape(shape: &Shape) -> Result<()> {
    for &dim in &shape.0 {
        validate_dim_length(dim)?;
    }
    Ok(())
}

/// Fails unless `idx` addresses a dimension of `shape`.
///
/// Rank-0 shapes still accept index 0: a scalar behaves as rank 1 for this
/// check only.
pub fn validate_idx(shape: &Shape, idx: usize) -> Result<()> {
    let rank = shape.ndim();
    if idx >= rank.max(1) {
        return Err(PrimsError::IndexOutOfBounds {
            idx: idx as i64,
            rank,
        });
    }
    Ok(())
}

/// Fails unless `0 < idx <= rank`, the valid range for insert-before and
/// split-point positions.
pub fn validate_exclusive_idx(shape: &Shape, idx: usize) -> Result<()> {
    let rank = shape.ndim();
    if idx == 0 || idx > rank {
        return Err(PrimsError::InvalidExclusiveIndex { idx, rank });
    }
    Ok(())
}

/// Wrap a possibly negative dimension index into `0..max(1, rank)`.
///
/// Rank-0 shapes are treated as rank 1, so both `0` and `-1` canonicalize
/// to `0` for scalars.
pub fn canonicalize_dim(rank: usize, idx: i64) -> Result<usize> {
    let effective_rank = rank.max(1) as i64;
    let wrapped = if idx < 0 { idx + effective_rank } else { idx };
    if wrapped < 0 || wrapped >= effective_rank {
        return Err(PrimsError::DimOutOfRange { idx, rank });
    }
    Ok(wrapped as usize)
}

/// Canonicalize every index in `dims` against `rank`.
pub fn canonicalize_dims(rank: usize, dims: &[i64]) -> Result<DimVec> {
    dims.iter().map(|&idx| canonicalize_dim(rank, idx)).collect()
}

/// `true` iff `perm` rearranges `0..rank` exactly: right length, no
/// duplicates, no gaps.
pub fn is_valid_permutation(rank: usize, perm: &[usize]) -> bool {
    if perm.len() != rank {
        return false;
    }
    let mut sorted: DimVec = perm.iter().copied().collect();
    sorted.sort_unstable();
    sorted.iter().copied().eq(0..rank)
}

/// Row-major strides for `shape`: the last dimension has stride 1, every
/// other dimension the product of the dimensions to its right.
pub fn make_contiguous_strides_for(shape: &Shape) -> Result<Vec<i64>> {
    validate_shape(shape)?;
    let mut strides = vec![1i64; shape.ndim()];
    let mut acc = 1i64;
    for i in (0..shape.ndim()).rev() {
        strides[i] = acc;
        acc *= shape.0[i];
    }
    Ok(strides)
}

/// The shape left after removing the listed dimensions from `shape`.
///
/// Indices must already be canonical; order among the surviving dimensions
/// is preserved.
pub fn compute_reduction_output_shape(shape: &Shape, dims: &[usize]) -> Result<Shape> {
    for &idx in dims {
        validate_idx(shape, idx)?;
    }
    let kept = shape
        .0
        .iter()
        .enumerate()
        .filter(|(i, _)| !dims.contains(i))
        .map(|(_, &d)| d)
        .collect::<Vec<_>>();
    Ok(Shape::new(kept))
}

/// Resolve a reduction's dims argument: absent means every dimension.
///
/// Fails if two entries canonicalize to the same dimension.
pub fn reduction_dims(shape: &Shape, dims: Option<&[i64]>) -> Result<DimVec> {
    match dims {
        None => Ok((0..shape.ndim()).collect()),
        Some(dims) => {
            let canonical = canonicalize_dims(shape.ndim(), dims)?;
            for (i, &dim) in canonical.iter().enumerate() {
                if canonical[..i].contains(&dim) {
                    return Err(PrimsError::DuplicateReductionDim(dim));
                }
            }
            Ok(canonical)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(dims: &[i64]) -> Shape {
        Shape::new(dims.to_vec())
    }

    #[test]
    fn test_shape_numel() {
        assert_eq!(s(&[2, 3, 4]).numel(), 24);
        assert_eq!(Shape::scalar().numel(), 1);
        assert_eq!(s(&[0, 5]).numel(), 0);
    }

    #[test]
    fn test_shape_display() {
        assert_eq!(s(&[2, 3]).to_string(), "[2, 3]");
        assert_eq!(Shape::scalar().to_string(), "[]");
    }

    #[test]
    fn test_validate_dim_length() {
        assert!(validate_dim_length(0).is_ok());
        assert!(validate_dim_length(7).is_ok());
        assert!(validate_dim_length(-1).is_err());
    }

    #[test]
    fn test_validate_shape() {
        assert!(validate_shape(&s(&[2, 0, 4])).is_ok());
        assert!(validate_shape(&Shape::scalar()).is_ok());
        assert!(validate_shape(&s(&[2, -3])).is_err());
    }

    #[test]
    fn test_validate_idx() {
        let shape = s(&[2, 3, 4]);
        assert!(validate_idx(&shape, 0).is_ok());
        assert!(validate_idx(&shape, 2).is_ok());
        assert!(validate_idx(&shape, 3).is_err());

        // A scalar still accepts index 0.
        assert!(validate_idx(&Shape::scalar(), 0).is_ok());
        assert!(validate_idx(&Shape::scalar(), 1).is_err());
    }

    #[test]
    fn test_validate_exclusive_idx() {
        let shape = s(&[2, 3]);
        assert!(validate_exclusive_idx(&shape, 0).is_err());
        assert!(validate_exclusive_idx(&shape, 1).is_ok());
        assert!(validate_exclusive_idx(&shape, 2).is_ok());
        assert!(validate_exclusive_idx(&shape, 3).is_err());
    }

    #[test]
    fn test_canonicalize_dim() {
        assert_eq!(canonicalize_dim(5, -1).unwrap(), 4);
        assert_eq!(canonicalize_dim(5, 3).unwrap(), 3);
        assert_eq!(canonicalize_dim(5, -5).unwrap(), 0);
        assert!(canonicalize_dim(5, 5).is_err());
        assert!(canonicalize_dim(5, -6).is_err());
    }

    #[test]
    fn test_canonicalize_dim_rank_zero() {
        assert_eq!(canonicalize_dim(0, 0).unwrap(), 0);
        assert_eq!(canonicalize_dim(0, -1).unwrap(), 0);
        assert!(canonicalize_dim(0, 1).is_err());
        assert!(canonicalize_dim(0, -2).is_err());
    }

    #[test]
    fn test_canonicalize_dims() {
        let dims = canonicalize_dims(3, &[0, -1, -3]).unwrap();
        assert_eq!(dims.as_slice(), &[0, 2, 0]);
        assert!(canonicalize_dims(3, &[0, 3]).is_err());
    }

    #[test]
    fn test_is_valid_permutation() {
        assert!(is_valid_permutation(3, &[2, 0, 1]));
        assert!(is_valid_permutation(3, &[0, 1, 2]));
        assert!(!is_valid_permutation(3, &[0, 0, 1]));
        assert!(!is_valid_permutation(3, &[0, 1]));
        assert!(!is_valid_permutation(3, &[0, 1, 3]));
        assert!(is_valid_permutation(0, &[]));
    }

    #[test]
    fn test_contiguous_strides() {
        assert_eq!(
            make_contiguous_strides_for(&s(&[2, 3, 4])).unwrap(),
            vec![12, 4, 1]
        );
        assert_eq!(make_contiguous_strides_for(&s(&[5])).unwrap(), vec![1]);
        assert_eq!(
            make_contiguous_strides_for(&Shape::scalar()).unwrap(),
            Vec::<i64>::new()
        );
        // Dimensions left of a zero-length dim get stride 0.
        assert_eq!(
            make_contiguous_strides_for(&s(&[2, 0, 3])).unwrap(),
            vec![0, 3, 1]
        );
        assert!(make_contiguous_strides_for(&s(&[2, -1])).is_err());
    }

    #[test]
    fn test_reduction_output_shape() {
        let shape = s(&[2, 3, 4]);
        assert_eq!(
            compute_reduction_output_shape(&shape, &[0, 2]).unwrap(),
            s(&[3])
        );
        assert_eq!(compute_reduction_output_shape(&shape, &[]).unwrap(), shape);
        assert_eq!(
            compute_reduction_output_shape(&shape, &[0, 1, 2]).unwrap(),
            Shape::scalar()
        );
        assert!(compute_reduction_output_shape(&shape, &[3]).is_err());
    }

    #[test]
    fn test_reduction_dims() {
        let shape = s(&[2, 3, 4]);
        assert_eq!(
            reduction_dims(&shape, None).unwrap().as_slice(),
            &[0, 1, 2]
        );
        assert_eq!(
            reduction_dims(&shape, Some(&[-1, 0])).unwrap().as_slice(),
            &[2, 0]
        );
        // 1 and -2 name the same dimension of a rank-3 shape.
        assert!(matches!(
            reduction_dims(&shape, Some(&[1, -2])),
            Err(PrimsError::DuplicateReductionDim(1))
        ));
    }
}
