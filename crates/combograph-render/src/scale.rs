//! Scales shared by the styled layers.

use combograph_layout::interp;

/// Mark area used when a node has no explicit size.
pub const DEFAULT_NODE_SIZE: f64 = 400.0;

/// Categorical palette for field-driven fills.
pub const CATEGORY_PALETTE: [&str; 10] = [
    "#4c78a8", "#f58518", "#e45756", "#72b7b2", "#54a24b", "#eeca3b", "#b279a2", "#ff9da6",
    "#9d755d", "#bab0ac",
];

/// Fill for nodes whose palette field is missing.
pub const MISSING_CATEGORY_COLOR: &str = "#bbbbbb";

/// Radius of a circle mark with the given area-like size.
pub fn size_to_r(size: f64) -> f64 {
    size.max(0.0).sqrt() / 2.0
}

/// Maps `v` from `domain` into `range`, clamping at the ends.
pub fn linear(v: f64, domain: (f64, f64), range: (f64, f64)) -> f64 {
    interp(v, domain.0, domain.1, range.0, range.1)
}

/// Zero-anchored linear scale over the largest observed value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZeroBased {
    max: f64,
    range: (f64, f64),
}

impl ZeroBased {
    pub fn fit(values: impl IntoIterator<Item = f64>, range: (f64, f64)) -> Self {
        let max = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold(0.0_f64, f64::max);
        Self { max, range }
    }

    /// Values absent from the data map to the low end of the range.
    pub fn apply(&self, v: Option<f64>) -> f64 {
        match v {
            Some(v) if v.is_finite() => linear(v, (0.0, self.max), self.range),
            _ => self.range.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_is_half_the_square_root() {
        assert_eq!(size_to_r(400.0), 10.0);
        assert_eq!(size_to_r(36.0), 3.0);
        assert_eq!(size_to_r(-1.0), 0.0);
    }

    #[test]
    fn linear_clamps() {
        assert_eq!(linear(12.5, (0.0, 25.0), (36.0, 32400.0)), 16218.0);
        assert_eq!(linear(100.0, (0.0, 25.0), (36.0, 32400.0)), 32400.0);
        assert_eq!(linear(-3.0, (0.0, 25.0), (36.0, 32400.0)), 36.0);
    }

    #[test]
    fn zero_based_scale_spans_the_range() {
        let s = ZeroBased::fit([1.0, 4.0, 2.0], (0.3, 1.0));
        assert!((s.apply(Some(4.0)) - 1.0).abs() < 1e-12);
        assert!((s.apply(Some(2.0)) - 0.65).abs() < 1e-12);
        assert_eq!(s.apply(None), 0.3);
    }
}
