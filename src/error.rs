//! Error types for modem construction

use thiserror::Error;

/// Errors reported when configuring a modem
///
/// Steady-state modulation and demodulation never fail; only construction
/// with an unsupported configuration does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ModemError {
    /// Requested bits-per-symbol outside the supported 1..=8 range
    #[error("unsupported PSK order: {0} bits/symbol (supported range is 1..=8)")]
    UnsupportedOrder(u32),
}
