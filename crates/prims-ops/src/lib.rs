//! Operand compatibility checks, elementwise dtype promotion, and backend
//! dtype mapping.

pub mod backend;
pub mod checks;
pub mod dtype_promotion;

pub use backend::BackendDtypeMap;
pub use checks::{check_same_device, check_same_dtype, check_same_shape, is_cpu_scalar_tensor};
pub use dtype_promotion::{
    PromotionKind, can_safe_cast_to, computation_dtype, elementwise_dtypes, higher_dtype,
};
