//! PSK modem engine
//!
//! The factory, modulator, and demodulator live in `psk`; the
//! successive-approximation boundary search and the soft-decision neighbor
//! table are its collaborators.

mod psk;
mod search;
mod soft;

#[cfg(test)]
mod psk_tests;

pub use psk::{PskModem, MAX_BITS_PER_SYMBOL, MIN_BITS_PER_SYMBOL};
pub use soft::SoftTable;

use crate::numerics::{FixedPhase, FloatPhase};

/// PSK modem computing in native floating point
pub type FloatModem = PskModem<FloatPhase>;

/// PSK modem computing in Q3.28 fixed point
pub type FixedModem = PskModem<FixedPhase>;
