//! Cross-cutting modem tests
//!
//! Everything here exercises the full modulate/demodulate chain across both
//! numeric strategies; single-component behavior is tested next to each
//! component.

use num_complex::Complex64;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::f64::consts::PI;

use super::{FixedModem, FloatModem};
use crate::gray;

#[test]
fn test_round_trip_all_orders_float() {
    for bits in 1..=8u32 {
        let mut modem = FloatModem::new(bits).unwrap();
        for sym in 0..(1u32 << bits) {
            let sample = modem.modulate(sym as u8);
            let (recovered, phase_error) = modem.demodulate(sample);
            assert_eq!(recovered, sym as u8, "float m={} sym={}", bits, sym);
            assert!(phase_error.abs() < 1e-9);
        }
    }
}

#[test]
fn test_round_trip_all_orders_fixed() {
    for bits in 1..=8u32 {
        let mut modem = FixedModem::new(bits).unwrap();
        for sym in 0..(1u32 << bits) {
            let sample = modem.modulate(sym as u8);
            let (recovered, phase_error) = modem.demodulate(sample);
            assert_eq!(recovered, sym as u8, "fixed m={} sym={}", bits, sym);
            // Quantized placement and CORDIC each cost a little accuracy
            assert!(phase_error.abs() < 2e-3, "fixed m={} sym={}: residual {}", bits, sym, phase_error);
        }
    }
}

#[test]
fn test_decisions_match_nearest_point() {
    // Sweep each sector off-center at several radii; the demodulated symbol
    // must always be the constellation point nearest the sample
    for bits in [1u32, 3, 8] {
        let order = 1u32 << bits;
        let alpha = PI / order as f64;
        let mut float_modem = FloatModem::new(bits).unwrap();
        let mut fixed_modem = FixedModem::new(bits).unwrap();

        for index in 0..order {
            for offset_step in [-0.4, -0.2, 0.0, 0.2, 0.4] {
                for radius in [0.3, 1.0, 3.0] {
                    let angle = 2.0 * index as f64 * alpha + offset_step * alpha;
                    let sample = Complex64::from_polar(radius, angle);
                    let expected = gray::encode(index as u8);

                    let (float_sym, _) = float_modem.demodulate(sample);
                    let (fixed_sym, _) = fixed_modem.demodulate(sample);
                    assert_eq!(float_sym, expected, "float m={} index={} offset={}", bits, index, offset_step);
                    assert_eq!(fixed_sym, expected, "fixed m={} index={} offset={}", bits, index, offset_step);

                    let nearest = float_modem
                        .constellation()
                        .iter()
                        .enumerate()
                        .min_by(|(_, a), (_, b)| {
                            let unit = sample / sample.norm();
                            (unit - **a).norm_sqr().partial_cmp(&(unit - **b).norm_sqr()).unwrap()
                        })
                        .map(|(s, _)| s as u8)
                        .unwrap();
                    assert_eq!(float_sym, nearest, "decision disagrees with nearest point");
                }
            }
        }
    }
}

#[test]
fn test_fixed_float_parity_under_perturbation() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x5150);

    for bits in 1..=8u32 {
        let order = 1u32 << bits;
        let alpha = PI / order as f64;
        let mut float_modem = FloatModem::new(bits).unwrap();
        let mut fixed_modem = FixedModem::new(bits).unwrap();

        for _ in 0..200 {
            let index = rng.gen_range(0..order);
            // Stay clear of the decision boundaries at +/- alpha
            let offset = rng.gen_range(-0.8..0.8) * alpha;
            let radius = rng.gen_range(0.25..4.0);
            let sample = Complex64::from_polar(radius, 2.0 * index as f64 * alpha + offset);
            let expected = gray::encode(index as u8);

            let (float_sym, float_residual) = float_modem.demodulate(sample);
            let (fixed_sym, fixed_residual) = fixed_modem.demodulate(sample);

            assert_eq!(float_sym, expected, "float m={} index={}", bits, index);
            assert_eq!(fixed_sym, float_sym, "mode disagreement at m={} index={}", bits, index);
            assert!((float_residual - offset).abs() < 1e-9);
            assert!((fixed_residual - offset).abs() < 2e-3);
        }
    }
}

#[test]
fn test_cross_mode_round_trip() {
    // A sample placed by one strategy must decode identically under the other
    for bits in 1..=8u32 {
        let mut float_modem = FloatModem::new(bits).unwrap();
        let mut fixed_modem = FixedModem::new(bits).unwrap();

        for sym in 0..(1u32 << bits) {
            let from_fixed = fixed_modem.modulate(sym as u8);
            let (via_float, _) = float_modem.demodulate(from_fixed);
            assert_eq!(via_float, sym as u8, "float demod of fixed sample, m={}", bits);

            let from_float = float_modem.modulate(sym as u8);
            let (via_fixed, _) = fixed_modem.demodulate(from_float);
            assert_eq!(via_fixed, sym as u8, "fixed demod of float sample, m={}", bits);
        }
    }
}

#[test]
fn test_wrap_just_past_minus_pi() {
    // An input angle barely past -pi lands next to the point at pi after
    // the offset subtraction wraps exactly once
    let mut modem = FloatModem::new(2).unwrap();

    let expected = gray::encode(2); // natural index 2 sits at angle pi
    let (at_pi, _) = modem.demodulate(Complex64::new(-1.0, 0.0));
    assert_eq!(at_pi, expected);

    let (just_past, _) = modem.demodulate(Complex64::from_polar(1.0, -PI + 1e-6));
    assert_eq!(just_past, expected);

    let (just_before, _) = modem.demodulate(Complex64::from_polar(1.0, PI - 1e-6));
    assert_eq!(just_before, expected);
}

#[test]
fn test_wrap_just_past_minus_pi_fixed() {
    let mut modem = FixedModem::new(2).unwrap();
    let expected = gray::encode(2);

    let (at_pi, _) = modem.demodulate(Complex64::new(-1.0, 0.0));
    assert_eq!(at_pi, expected);

    let (just_past, _) = modem.demodulate(Complex64::from_polar(1.0, -PI + 1e-4));
    assert_eq!(just_past, expected);
}

#[test]
fn test_soft_decisions_survive_noise() {
    let mut rng = ChaCha8Rng::seed_from_u64(0xD5B);
    let mut modem = FloatModem::new(3).unwrap();

    for _ in 0..100 {
        let sym = rng.gen_range(0..8) as u8;
        let clean = modem.modulate(sym);
        let noise = Complex64::new(rng.gen_range(-0.05..0.05), rng.gen_range(-0.05..0.05));
        let (hard, soft_bits) = modem.demodulate_soft(clean + noise);

        assert_eq!(hard, sym);
        for (bit, &soft) in soft_bits.iter().enumerate() {
            let sent = (sym >> (2 - bit)) & 1;
            if sent == 1 {
                assert!(soft >= 128, "sym={} bit {}: soft {}", sym, bit, soft);
            } else {
                assert!(soft < 128, "sym={} bit {}: soft {}", sym, bit, soft);
            }
        }
    }
}
