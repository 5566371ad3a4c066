//! M-ary PSK modem
//!
//! Symbols are gray-decoded and placed at `M` equally spaced angles on the
//! unit circle. Demodulation subtracts the scheme's phase offset, folds the
//! result into [-pi, pi) with a single correction, and walks the reference
//! table to recover the nearest symbol plus its residual phase error.
//!
//! One instance serves one stream; the two diagnostic caches make it
//! unsuitable for sharing across threads without external locking.

use log::debug;
use num_complex::Complex64;
use std::f64::consts::PI;

use super::search;
use super::soft::SoftTable;
use crate::error::ModemError;
use crate::gray;
use crate::traits::PhaseArithmetic;

/// Smallest supported symbol width (BPSK)
pub const MIN_BITS_PER_SYMBOL: u32 = 1;
/// Largest supported symbol width (256-PSK)
pub const MAX_BITS_PER_SYMBOL: u32 = 8;

/// Orders below this get no neighbor table; soft demodulation scans the
/// whole (tiny) constellation instead
const SOFT_TABLE_MIN_BITS: u32 = 3;

/// Phase-shift keying modulator/demodulator
///
/// # Type Parameters
/// * `N` - Phase arithmetic strategy (float or fixed point)
#[derive(Debug, Clone)]
pub struct PskModem<N: PhaseArithmetic> {
    numeric: N,
    bits_per_symbol: u32,
    order: u32,
    alpha: N::Angle,
    d_phi: N::Angle,
    reference: Vec<N::Angle>,
    symbol_map: Vec<Complex64>,
    soft: Option<SoftTable>,
    soft_gain: f64,
    received: Complex64,
    estimated: Complex64,
}

impl<N: PhaseArithmetic + Default> PskModem<N> {
    /// Create a modem with the strategy's default instance
    ///
    /// # Arguments
    /// * `bits_per_symbol` - Symbol width, 1..=8 (order 2..=256)
    ///
    /// # Errors
    /// `ModemError::UnsupportedOrder` for any width outside 1..=8.
    pub fn new(bits_per_symbol: u32) -> Result<Self, ModemError> {
        Self::with_numeric(N::default(), bits_per_symbol)
    }
}

impl<N: PhaseArithmetic> PskModem<N> {
    /// Create a modem over an explicit phase arithmetic instance
    pub fn with_numeric(numeric: N, bits_per_symbol: u32) -> Result<Self, ModemError> {
        if !(MIN_BITS_PER_SYMBOL..=MAX_BITS_PER_SYMBOL).contains(&bits_per_symbol) {
            return Err(ModemError::UnsupportedOrder(bits_per_symbol));
        }

        let order = 1u32 << bits_per_symbol;
        let alpha_radians = PI / order as f64;
        let alpha = numeric.from_radians(alpha_radians);
        let d_phi = numeric.from_radians(PI * (1.0 - 1.0 / order as f64));

        // Boundary angles of the power-of-two symbol groups, ascending
        let reference: Vec<N::Angle> = (0..bits_per_symbol)
            .map(|k| numeric.from_radians((1u32 << k) as f64 * alpha_radians))
            .collect();

        // Place every symbol once; modulation afterwards is a table lookup
        let mask = (order - 1) as u8;
        let symbol_map: Vec<Complex64> = (0..order)
            .map(|sym| {
                let index = gray::decode(sym as u8 & mask);
                numeric.unit_sample(numeric.scale(alpha, 2 * index as u32))
            })
            .collect();

        let soft = if bits_per_symbol >= SOFT_TABLE_MIN_BITS {
            Some(SoftTable::generate(
                &symbol_map,
                2 * bits_per_symbol as usize,
            ))
        } else {
            None
        };

        // Scale LLRs so a clean decision saturates the soft byte
        let min_distance = 2.0 * alpha_radians.sin();
        let soft_gain = 128.0 / (min_distance * min_distance);

        debug!(
            "PSK{}: {} bits/symbol, alpha {:.6} rad, phase offset {:.6} rad",
            order,
            bits_per_symbol,
            alpha_radians,
            PI * (1.0 - 1.0 / order as f64),
        );

        Ok(Self {
            numeric,
            bits_per_symbol,
            order,
            alpha,
            d_phi,
            reference,
            symbol_map,
            soft,
            soft_gain,
            received: Complex64::new(1.0, 0.0),
            estimated: Complex64::new(1.0, 0.0),
        })
    }

    /// Symbol width in bits
    pub fn bits_per_symbol(&self) -> u32 {
        self.bits_per_symbol
    }

    /// Constellation size `M = 2^bits_per_symbol`
    pub fn order(&self) -> u32 {
        self.order
    }

    /// Constellation points indexed by symbol
    pub fn constellation(&self) -> &[Complex64] {
        &self.symbol_map
    }

    /// Reference boundary angles in radians, ascending
    pub fn reference_phases(&self) -> Vec<f64> {
        self.reference
            .iter()
            .map(|&a| self.numeric.to_radians(a))
            .collect()
    }

    /// Map a symbol to its constellation sample
    ///
    /// Out-of-range symbols are masked modulo the order, matching the
    /// constellation mappers' `sym & mask` convention elsewhere in the
    /// pack; the call is total and pure.
    pub fn modulate(&self, symbol: u8) -> Complex64 {
        self.symbol_map[(symbol & self.symbol_mask()) as usize]
    }

    /// Recover the nearest symbol and its residual phase error
    ///
    /// Magnitude is ignored; any complex input is accepted. The returned
    /// phase error is the signed offset in radians from the nearest ideal
    /// constellation angle, usable by an upstream carrier loop. Each call
    /// refreshes the diagnostic caches read by [`Self::phase_error`] and
    /// [`Self::evm`].
    pub fn demodulate(&mut self, sample: Complex64) -> (u8, f64) {
        let mut theta = self.numeric.sub(self.numeric.arg(sample), self.d_phi);

        // d_phi < pi, so theta undershoots -pi by less than 2*pi; a single
        // correction lands it in [-pi, pi)
        let minus_pi = self.numeric.neg(self.numeric.pi());
        if theta < minus_pi {
            theta = self.numeric.add(theta, self.numeric.two_pi());
        }

        let (index, residual) = search::nearest_reference(&self.numeric, theta, &self.reference);
        let symbol = gray::encode(index);

        self.estimated = self.modulate(symbol);
        self.received = sample;

        (symbol, self.numeric.to_radians(residual))
    }

    /// Hard decision plus one soft bit per transmitted bit
    ///
    /// Soft bits use the 0..=255 convention with the decision boundary
    /// between 127 and 128. Candidates are the hard decision and its
    /// precomputed neighbors; a bit value absent from that set saturates.
    pub fn demodulate_soft(&mut self, sample: Complex64) -> (u8, Vec<u8>) {
        let (hard, _) = self.demodulate(sample);
        let bits = self.bits_per_symbol as usize;

        let mut candidates: Vec<u8> = Vec::with_capacity(
            1 + self
                .soft
                .as_ref()
                .map_or(self.order as usize - 1, SoftTable::neighbors_per_symbol),
        );
        candidates.push(hard);
        match &self.soft {
            Some(table) => candidates.extend_from_slice(table.neighbors(hard)),
            None => candidates.extend((0..self.order).map(|s| s as u8).filter(|&s| s != hard)),
        }

        let mut dmin0 = vec![f64::INFINITY; bits];
        let mut dmin1 = vec![f64::INFINITY; bits];
        for &sym in &candidates {
            let d = (sample - self.symbol_map[sym as usize]).norm_sqr();
            for bit in 0..bits {
                if (sym >> (bits - bit - 1)) & 1 == 1 {
                    if d < dmin1[bit] {
                        dmin1[bit] = d;
                    }
                } else if d < dmin0[bit] {
                    dmin0[bit] = d;
                }
            }
        }

        let soft_bits = (0..bits)
            .map(|bit| {
                if dmin1[bit].is_infinite() {
                    0
                } else if dmin0[bit].is_infinite() {
                    255
                } else {
                    let llr = (dmin0[bit] - dmin1[bit]) * self.soft_gain;
                    (128.0 + llr).clamp(0.0, 255.0) as u8
                }
            })
            .collect();

        (hard, soft_bits)
    }

    /// Angular offset between the last received sample and its estimate
    pub fn phase_error(&self) -> f64 {
        (self.received * self.estimated.conj()).arg()
    }

    /// Error vector magnitude of the last demodulated sample
    pub fn evm(&self) -> f64 {
        (self.estimated - self.received).norm()
    }

    /// Last sample passed to [`Self::demodulate`]
    pub fn last_received(&self) -> Complex64 {
        self.received
    }

    /// Re-modulated estimate of the last demodulated symbol
    pub fn last_estimate(&self) -> Complex64 {
        self.estimated
    }

    /// Clear the diagnostic caches to the reference sample 1+0i
    pub fn reset(&mut self) {
        self.received = Complex64::new(1.0, 0.0);
        self.estimated = Complex64::new(1.0, 0.0);
    }

    #[inline]
    fn symbol_mask(&self) -> u8 {
        (self.order - 1) as u8
    }
}
