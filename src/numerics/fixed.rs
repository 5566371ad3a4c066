//! Fixed-point phase arithmetic
//!
//! Angles are Q3.28 signed integers (1.0 rad = 2^28), wide enough for the
//! (-2*pi, 2*pi) range the demodulator moves through. Complex samples are
//! quantized to Q15 before any trigonometric step: `arg` runs an integer
//! CORDIC in vectoring mode against a table of arctangent constants, and
//! `unit_sample` reads a 4096-entry Q15 sine table.

use lazy_static::lazy_static;
use num_complex::Complex64;
use std::f64::consts::PI;

use crate::traits::PhaseArithmetic;

/// Fractional bits of the angle representation
const ANGLE_FRAC_BITS: u32 = 28;
/// One radian in Q3.28
const ANGLE_SCALE: f64 = (1u32 << ANGLE_FRAC_BITS) as f64;

/// pi in Q3.28
const PI_Q: i32 = 843_314_857;
/// pi/2 in Q3.28
const HALF_PI_Q: i32 = 421_657_428;
/// 2*pi in Q3.28
const TWO_PI_Q: i32 = 1_686_629_714;

/// Q15 full scale for sample quantization
const Q15_ONE: i32 = 32_767;

/// CORDIC stages; resolution is limited by Q15 inputs well before this
const CORDIC_STAGES: usize = 20;

/// Sine table length; must be a power of two
const SINE_TABLE_LEN: usize = 4096;

lazy_static! {
    /// atan(2^-i) in Q3.28 for each CORDIC stage
    static ref ATAN_Q: [i32; CORDIC_STAGES] = {
        let mut table = [0i32; CORDIC_STAGES];
        for (i, entry) in table.iter_mut().enumerate() {
            *entry = (2f64.powi(-(i as i32)).atan() * ANGLE_SCALE).round() as i32;
        }
        table
    };

    /// One full turn of sin() in Q15
    static ref SINE_Q: [i16; SINE_TABLE_LEN] = {
        let mut table = [0i16; SINE_TABLE_LEN];
        for (i, entry) in table.iter_mut().enumerate() {
            let angle = 2.0 * PI * i as f64 / SINE_TABLE_LEN as f64;
            *entry = (angle.sin() * Q15_ONE as f64).round() as i16;
        }
        table
    };
}

/// Quantize a normalized component to Q15 with saturation
#[inline]
fn quantize_q15(value: f64) -> i32 {
    let scaled = (value * Q15_ONE as f64).round();
    if scaled >= Q15_ONE as f64 {
        Q15_ONE
    } else if scaled <= -(Q15_ONE as f64) {
        -Q15_ONE
    } else {
        scaled as i32
    }
}

/// Integer atan2 via CORDIC vectoring
///
/// Inputs are Q15 components; the result is a Q3.28 angle in (-pi, pi].
fn cordic_atan2(y: i32, x: i32) -> i32 {
    if x == 0 && y == 0 {
        return 0;
    }

    // Fold the left half-plane into the right so the iteration converges
    let (mut x, mut y, mut z) = if x < 0 {
        if y >= 0 {
            (y, -x, HALF_PI_Q)
        } else {
            (-y, x, -HALF_PI_Q)
        }
    } else {
        (x, y, 0)
    };

    for (i, &step) in ATAN_Q.iter().enumerate() {
        let xs = x >> i;
        let ys = y >> i;
        if y >= 0 {
            x += ys;
            y -= xs;
            z += step;
        } else {
            x -= ys;
            y += xs;
            z -= step;
        }
    }

    z
}

/// Phase arithmetic over Q3.28 integer angles
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPhase;

impl PhaseArithmetic for FixedPhase {
    type Angle = i32;

    fn zero(&self) -> i32 {
        0
    }

    fn pi(&self) -> i32 {
        PI_Q
    }

    fn two_pi(&self) -> i32 {
        TWO_PI_Q
    }

    fn from_radians(&self, theta: f64) -> i32 {
        (theta * ANGLE_SCALE).round() as i32
    }

    fn to_radians(&self, angle: i32) -> f64 {
        angle as f64 / ANGLE_SCALE
    }

    fn add(&self, a: i32, b: i32) -> i32 {
        a + b
    }

    fn sub(&self, a: i32, b: i32) -> i32 {
        a - b
    }

    fn neg(&self, a: i32) -> i32 {
        -a
    }

    fn scale(&self, a: i32, k: u32) -> i32 {
        (a as i64 * k as i64) as i32
    }

    fn arg(&self, x: Complex64) -> i32 {
        // Normalize to full scale before quantizing so that only the phase
        // survives; magnitude carries no information here.
        let peak = x.re.abs().max(x.im.abs());
        if !(peak > 0.0) {
            return 0;
        }
        let re = quantize_q15(x.re / peak);
        let im = quantize_q15(x.im / peak);
        cordic_atan2(im, re)
    }

    fn unit_sample(&self, angle: i32) -> Complex64 {
        let wrapped = if angle < 0 { angle + TWO_PI_Q } else { angle };
        let index = ((wrapped as i64 * SINE_TABLE_LEN as i64 + TWO_PI_Q as i64 / 2)
            / TWO_PI_Q as i64) as usize
            & (SINE_TABLE_LEN - 1);
        let sin = SINE_Q[index];
        let cos = SINE_Q[(index + SINE_TABLE_LEN / 4) & (SINE_TABLE_LEN - 1)];
        Complex64::new(cos as f64 / Q15_ONE as f64, sin as f64 / Q15_ONE as f64)
    }
}
