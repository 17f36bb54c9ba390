//! gc-core: stable foundation for gascycle.
//!
//! Contains:
//! - units (uom SI types + constructors + the molar gas constant)
//! - numeric (Real + tolerances + float helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use units::constants::R_J_PER_MOL_K as R;
