//! Dtype lattice types: `DType`, `ScalarKind`, and the default-dtype
//! configuration.

use serde::{Deserialize, Serialize};

use crate::{PrimsError, Result};

/// Supported element data types.
///
/// Every dtype belongs to exactly one scalar kind (boolean, integer, float,
/// complex); see [`DType::kind`]. `BF16` is the brain-float variant: the
/// exponent range of `F32` with a reduced mantissa. The complex dtypes are
/// named by total width, so `C64` pairs two `F32` components.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DType {
    Bool,
    U8,
    I8,
    I16,
    I32,
    I64,
    F16,
    BF16,
    F32,
    F64,
    C32,
    C64,
    C128,
}

impl DType {
    /// All supported dtypes, in promotion order.
    pub const ALL: [DType; 13] = [
        DType::Bool,
        DType::U8,
        DType::I8,
        DType::I16,
        DType::I32,
        DType::I64,
        DType::F16,
        DType::BF16,
        DType::F32,
        DType::F64,
        DType::C32,
        DType::C64,
        DType::C128,
    ];

    /// Size in bytes of a single element.
    pub fn size_bytes(self) -> usize {
        match self {
            DType::Bool | DType::U8 | DType::I8 => 1,
            DType::I16 | DType::F16 | DType::BF16 => 2,
            DType::I32 | DType::F32 | DType::C32 => 4,
            DType::I64 | DType::F64 | DType::C64 => 8,
            DType::C128 => 16,
        }
    }

    /// The scalar kind this dtype belongs to.
    pub fn kind(self) -> ScalarKind {
        match self {
            DType::Bool => ScalarKind::Bool,
            DType::U8 | DType::I8 | DType::I16 | DType::I32 | DType::I64 => ScalarKind::Int,
            DType::F16 | DType::BF16 | DType::F32 | DType::F64 => ScalarKind::Float,
            DType::C32 | DType::C64 | DType::C128 => ScalarKind::Complex,
        }
    }

    /// `true` for the boolean dtype.
    pub fn is_boolean(self) -> bool {
        matches!(self, DType::Bool)
    }

    /// `true` for the integer dtypes, signed or unsigned.
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            DType::U8 | DType::I8 | DType::I16 | DType::I32 | DType::I64
        )
    }

    /// `true` for the real floating-point dtypes.
    pub fn is_float(self) -> bool {
        matches!(self, DType::F16 | DType::BF16 | DType::F32 | DType::F64)
    }

    /// `true` for the complex dtypes.
    pub fn is_complex(self) -> bool {
        matches!(self, DType::C32 | DType::C64 | DType::C128)
    }

    /// The float dtype matching this complex dtype's component width.
    ///
    /// Fails for non-complex dtypes.
    pub fn corresponding_real(self) -> Result<DType> {
        match self {
            DType::C32 => Ok(DType::F16),
            DType::C64 => Ok(DType::F32),
            DType::C128 => Ok(DType::F64),
            other => Err(PrimsError::NoRealEquivalent(other)),
        }
    }

    /// The complex dtype whose components hold this float dtype.
    ///
    /// `BF16` widens to `C64`, so the map is not a bijection: `C64` comes
    /// back as `F32` through [`DType::corresponding_real`]. Fails for
    /// non-float dtypes.
    pub fn corresponding_complex(self) -> Result<DType> {
        match self {
            DType::F16 => Ok(DType::C32),
            DType::BF16 => Ok(DType::C64),
            DType::F32 => Ok(DType::C64),
            DType::F64 => Ok(DType::C128),
            other => Err(PrimsError::NoComplexEquivalent(other)),
        }
    }
}

impl std::fmt::Display for DType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DType::Bool => write!(f, "bool"),
            DType::U8 => write!(f, "u8"),
            DType::I8 => write!(f, "i8"),
            DType::I16 => write!(f, "i16"),
            DType::I32 => write!(f, "i32"),
            DType::I64 => write!(f, "i64"),
            DType::F16 => write!(f, "f16"),
            DType::BF16 => write!(f, "bf16"),
            DType::F32 => write!(f, "f32"),
            DType::F64 => write!(f, "f64"),
            DType::C32 => write!(f, "c32"),
            DType::C64 => write!(f, "c64"),
            DType::C128 => write!(f, "c128"),
        }
    }
}

/// Coarse dtype category.
///
/// The derived order is the promotion order `Bool < Int < Float < Complex`:
/// combining operands never moves the result to a lower kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ScalarKind {
    Bool,
    Int,
    Float,
    Complex,
}

impl ScalarKind {
    /// The higher of two kinds under the promotion order.
    pub fn promote(self, other: ScalarKind) -> ScalarKind {
        self.max(other)
    }
}

impl std::fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScalarKind::Bool => write!(f, "bool"),
            ScalarKind::Int => write!(f, "int"),
            ScalarKind::Float => write!(f, "float"),
            ScalarKind::Complex => write!(f, "complex"),
        }
    }
}

/// Default dtypes assigned to bare scalars.
///
/// An explicit value instead of ambient process state: callers construct
/// one (or take `Default`) and pass it wherever scalars need a concrete
/// dtype. The default complex dtype is always the complex counterpart of
/// the default float dtype, kept coherent at construction.
///
/// Serializes as the default float dtype alone, so a config file carries
/// e.g. `"F64"` and deserialization re-validates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DType", into = "DType")]
pub struct DtypeDefaults {
    float: DType,
    complex: DType,
}

impl DtypeDefaults {
    /// Configuration with `float` as the default float dtype.
    ///
    /// Fails unless `float` is a float dtype.
    pub fn new(float: DType) -> Result<Self> {
        if !float.is_float() {
            return Err(PrimsError::NonFloatDefault(float));
        }
        Ok(Self {
            float,
            complex: float.corresponding_complex()?,
        })
    }

    /// The default float dtype.
    pub fn float(&self) -> DType {
        self.float
    }

    /// The default complex dtype.
    pub fn complex(&self) -> DType {
        self.complex
    }

    /// The canonical dtype for a scalar kind.
    pub fn dtype_for(&self, kind: ScalarKind) -> DType {
        match kind {
            ScalarKind::Bool => DType::Bool,
            ScalarKind::Int => DType::I64,
            ScalarKind::Float => self.float,
            ScalarKind::Complex => self.complex,
        }
    }
}

impl Default for DtypeDefaults {
    fn default() -> Self {
        Self {
            float: DType::F32,
            complex: DType::C64,
        }
    }
}

impl TryFrom<DType> for DtypeDefaults {
    type Error = PrimsError;

    fn try_from(float: DType) -> Result<Self> {
        Self::new(float)
    }
}

impl From<DtypeDefaults> for DType {
    fn from(defaults: DtypeDefaults) -> DType {
        defaults.float
    }
}
