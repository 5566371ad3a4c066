//! Phase arithmetic implementations
//!
//! Two interchangeable strategies behind [`crate::traits::PhaseArithmetic`]:
//! - `FloatPhase`: native f64 arithmetic
//! - `FixedPhase`: Q3.28 integer angles with table-based trigonometry

mod fixed;
mod float;

pub use fixed::FixedPhase;
pub use float::FloatPhase;
