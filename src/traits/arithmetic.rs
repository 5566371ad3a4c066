//! Phase arithmetic trait - numeric representation of angles
//!
//! Defines the arithmetic a modem performs in the phase domain. The modem
//! algorithm (offset, normalize, threshold search, placement) is written
//! once; implementations only choose the representation.

use num_complex::Complex64;

/// Numeric strategy for phase-domain computation
///
/// Implementations pick how an angle is represented (native float, scaled
/// integer) and how trigonometric operations are evaluated. Both strategies
/// must select the same nearest constellation point for the same logical
/// input.
pub trait PhaseArithmetic: Send + Sync {
    /// Angle representation
    type Angle: Copy + PartialOrd + core::fmt::Debug;

    /// The zero angle
    fn zero(&self) -> Self::Angle;

    /// The angle pi
    fn pi(&self) -> Self::Angle;

    /// The angle 2*pi
    fn two_pi(&self) -> Self::Angle;

    /// Convert radians into this representation
    fn from_radians(&self, theta: f64) -> Self::Angle;

    /// Convert an angle back to radians
    fn to_radians(&self, angle: Self::Angle) -> f64;

    /// Sum of two angles
    fn add(&self, a: Self::Angle, b: Self::Angle) -> Self::Angle;

    /// Difference of two angles
    fn sub(&self, a: Self::Angle, b: Self::Angle) -> Self::Angle;

    /// Negated angle
    fn neg(&self, a: Self::Angle) -> Self::Angle;

    /// Integer multiple of an angle
    fn scale(&self, a: Self::Angle, k: u32) -> Self::Angle;

    /// Phase of a complex sample
    ///
    /// Magnitude is ignored; the result lies in (-pi, pi].
    fn arg(&self, x: Complex64) -> Self::Angle;

    /// Unit-magnitude complex sample at the given angle
    fn unit_sample(&self, angle: Self::Angle) -> Complex64;
}
