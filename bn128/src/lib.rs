//! alt_bn128 (BN254) G1 arithmetic for AZTEC note commitments.
//!
//! This crate provides the base and scalar prime fields as distinct types,
//! affine and Jacobian curve points, multi-scalar multiplication, point
//! compression and helpers for random sampling. The second generator `h`
//! is derived from a fixed seed, see `hash_to_curve`.

mod affine;
mod basefield;
mod compression;
mod errors;
mod field;
mod group;
mod hash_to_curve;
mod msm;
mod projective;
mod random;
mod scalarfield;

pub use affine::Affine;
pub use basefield::{BaseField, FqParams};
pub use compression::{compress, compress_pair, decompress, decompress_pair, Y_PARITY_FLAG};
pub use errors::CurveError;
pub use field::{FieldParams, Fp};
pub use group::{Group, ScalarBits};
pub use hash_to_curve::{hash_to_curve, H_SEED};
pub use msm::multi_scalar_mul;
pub use projective::Projective;
pub use random::{random_scalar, RandomField};
pub use scalarfield::{FrParams, ScalarField};
