//! Native floating-point phase arithmetic

use num_complex::Complex64;
use std::f64::consts::PI;

use crate::traits::PhaseArithmetic;

/// Phase arithmetic over native `f64` angles
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatPhase;

impl PhaseArithmetic for FloatPhase {
    type Angle = f64;

    fn zero(&self) -> f64 {
        0.0
    }

    fn pi(&self) -> f64 {
        PI
    }

    fn two_pi(&self) -> f64 {
        2.0 * PI
    }

    fn from_radians(&self, theta: f64) -> f64 {
        theta
    }

    fn to_radians(&self, angle: f64) -> f64 {
        angle
    }

    fn add(&self, a: f64, b: f64) -> f64 {
        a + b
    }

    fn sub(&self, a: f64, b: f64) -> f64 {
        a - b
    }

    fn neg(&self, a: f64) -> f64 {
        -a
    }

    fn scale(&self, a: f64, k: u32) -> f64 {
        a * k as f64
    }

    fn arg(&self, x: Complex64) -> f64 {
        x.arg()
    }

    fn unit_sample(&self, angle: f64) -> Complex64 {
        Complex64::from_polar(1.0, angle)
    }
}
