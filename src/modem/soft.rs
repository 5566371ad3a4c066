//! Soft-decision support
//!
//! For larger constellations an exhaustive per-bit distance scan is wasted
//! work: only the hard decision and its nearest neighbors carry usable
//! likelihood mass. The factory precomputes those neighbors once; soft
//! demodulation then scores a handful of candidates per call.

use num_complex::Complex64;

/// Precomputed nearest-neighbor table
///
/// Row `s` lists the indices of the constellation points closest to symbol
/// `s`, nearest first, excluding `s` itself.
#[derive(Debug, Clone)]
pub struct SoftTable {
    count: usize,
    neighbors: Vec<u8>,
}

impl SoftTable {
    /// Build the neighbor table from a populated symbol map
    ///
    /// `count` is clamped to the number of other points available.
    pub fn generate(symbol_map: &[Complex64], count: usize) -> Self {
        let order = symbol_map.len();
        let count = count.min(order.saturating_sub(1));
        let mut neighbors = Vec::with_capacity(order * count);

        for (sym, &point) in symbol_map.iter().enumerate() {
            let mut by_distance: Vec<(f64, u8)> = symbol_map
                .iter()
                .enumerate()
                .filter(|&(other, _)| other != sym)
                .map(|(other, &p)| ((p - point).norm_sqr(), other as u8))
                .collect();
            by_distance.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
            neighbors.extend(by_distance.iter().take(count).map(|&(_, s)| s));
        }

        Self { count, neighbors }
    }

    /// Neighbors of `symbol`, nearest first
    pub fn neighbors(&self, symbol: u8) -> &[u8] {
        let start = symbol as usize * self.count;
        &self.neighbors[start..start + self.count]
    }

    /// Number of neighbors stored per symbol
    pub fn neighbors_per_symbol(&self) -> usize {
        self.count
    }
}
