//! PSK Modem - Gray-coded M-ary phase-shift keying
//!
//! This crate converts symbol indices to complex baseband samples and back
//! for PSK constellations of order 2 through 256 (1-8 bits per symbol).
//! Carrier recovery, pulse shaping, and coding live in other pipeline
//! stages; this is pure symbol <-> sample conversion.
//!
//! Phase-domain arithmetic is pluggable: the same modem runs over native
//! `f64` or over Q3.28 fixed point with table-based trigonometry, and both
//! strategies make identical symbol decisions.
//!
//! ## Example
//!
//! ```rust
//! use psk_modem::FloatModem;
//!
//! let mut modem = FloatModem::new(3).unwrap(); // 8-PSK
//! let sample = modem.modulate(5);
//! let (symbol, phase_error) = modem.demodulate(sample);
//! assert_eq!(symbol, 5);
//! assert!(phase_error.abs() < 1e-9);
//! ```

pub mod error;
pub mod gray;
pub mod modem;
pub mod numerics;
pub mod traits;

// Re-export core types for convenience
pub use error::ModemError;
pub use modem::{FixedModem, FloatModem, PskModem, SoftTable};
pub use numerics::{FixedPhase, FloatPhase};
pub use traits::PhaseArithmetic;
