//! Grid bands.
//!
//! A lattice canvas is split into row and column bands. Each band holds a
//! fraction of the canvas; the fractions of one axis sum to 1 and band
//! starts are the prefix sums in index order.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Band sums may drift this far from 1.
pub const SIZE_TOLERANCE: f64 = 0.01;

/// Slack for float error when summing sizes that hit the tolerance exactly.
const SUM_EPSILON: f64 = 1e-9;

/// User-supplied size of one band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandSize {
    /// Band index (zero based).
    #[serde(alias = "row", alias = "column")]
    pub index: usize,
    /// Fraction of the canvas, in `[0, 1]`.
    pub size: f64,
}

impl BandSize {
    /// Create a band size.
    #[must_use]
    pub const fn new(index: usize, size: f64) -> Self {
        Self { index, size }
    }
}

/// Resolved band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Band {
    /// Band index.
    pub index: usize,
    /// Fraction of the canvas.
    pub size: f64,
    /// Fractional offset of the band's leading edge.
    pub start: f64,
}

/// Resolve the bands of one axis.
///
/// Without `sizes`, `count` uniform bands are produced. With `sizes`, the
/// band count is the length of the list, every index from 0 must appear
/// exactly once and the sizes must sum to 1 within [`SIZE_TOLERANCE`].
/// `label` names the list in error messages.
///
/// # Errors
///
/// Returns [`Error::IncompleteGridSizes`], [`Error::NegativeGridSize`] or
/// [`Error::GridSizeSum`] for an invalid explicit list.
pub fn resolve_bands(label: &'static str, count: usize, sizes: Option<&[BandSize]>) -> Result<Vec<Band>> {
    let Some(sizes) = sizes else {
        let size = 1.0 / count.max(1) as f64;
        return Ok((0..count).map(|i| Band { index: i, size, start: i as f64 * size }).collect());
    };

    let n = sizes.len();
    let mut seen = vec![false; n];
    for b in sizes {
        match seen.get_mut(b.index) {
            Some(s) if !*s => *s = true,
            _ => return Err(Error::IncompleteGridSizes { bands: label, expected: n.saturating_sub(1) }),
        }
        if b.size < 0.0 || b.size.is_nan() {
            return Err(Error::NegativeGridSize { bands: label, index: b.index });
        }
    }

    let total: f64 = sizes.iter().map(|b| b.size).sum();
    if (total - 1.0).abs() > SIZE_TOLERANCE + SUM_EPSILON {
        return Err(Error::GridSizeSum { bands: label, total: total as f32 });
    }

    let mut ordered = sizes.to_vec();
    ordered.sort_by_key(|b| b.index);
    let mut start = 0.0;
    Ok(ordered
        .into_iter()
        .map(|b| {
            let band = Band { index: b.index, size: b.size, start };
            start += b.size;
            band
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_uniform_bands() {
        let bands = resolve_bands("rowSizes", 4, None).unwrap();
        assert_eq!(bands.len(), 4);
        assert_relative_eq!(bands[2].size, 0.25);
        assert_relative_eq!(bands[3].start, 0.75);
    }

    #[test]
    fn test_explicit_bands_any_order() {
        let sizes = [BandSize::new(2, 0.5), BandSize::new(0, 0.2), BandSize::new(1, 0.3)];
        let bands = resolve_bands("columnSizes", 1, Some(&sizes)).unwrap();
        assert_eq!(bands.iter().map(|b| b.index).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_relative_eq!(bands[1].start, 0.2);
        assert_relative_eq!(bands[2].start, 0.5);
    }

    #[test]
    fn test_sum_within_tolerance() {
        let sizes = [BandSize::new(0, 0.333), BandSize::new(1, 0.333), BandSize::new(2, 0.333)];
        assert!(resolve_bands("rowSizes", 3, Some(&sizes)).is_ok());
    }

    #[test]
    fn test_sum_outside_tolerance() {
        let sizes = [BandSize::new(0, 0.5), BandSize::new(1, 0.4)];
        let err = resolve_bands("rowSizes", 2, Some(&sizes)).unwrap_err();
        assert!(matches!(err, Error::GridSizeSum { bands: "rowSizes", .. }));
        assert!(err.to_string().contains("rowSizes"));
    }

    #[test]
    fn test_sum_tolerance_boundaries() {
        let pair = |size: f64| [BandSize::new(0, size), BandSize::new(1, size)];
        for size in [0.507, 0.493] {
            let err = resolve_bands("rowSizes", 2, Some(&pair(size))).unwrap_err();
            assert!(matches!(err, Error::GridSizeSum { .. }), "sum {} accepted", size * 2.0);
        }
        for size in [0.505, 0.495] {
            assert!(resolve_bands("rowSizes", 2, Some(&pair(size))).is_ok(), "sum {} rejected", size * 2.0);
        }
    }

    #[test]
    fn test_negative_band_size() {
        let sizes = [BandSize::new(0, 1.2), BandSize::new(1, -0.2)];
        assert!(matches!(
            resolve_bands("columnSizes", 2, Some(&sizes)),
            Err(Error::NegativeGridSize { bands: "columnSizes", index: 1 })
        ));
    }

    #[test]
    fn test_missing_or_duplicate_band() {
        let gap = [BandSize::new(0, 0.5), BandSize::new(2, 0.5)];
        assert!(matches!(
            resolve_bands("columnSizes", 2, Some(&gap)),
            Err(Error::IncompleteGridSizes { expected: 1, .. })
        ));
        let dup = [BandSize::new(0, 0.5), BandSize::new(0, 0.5)];
        assert!(resolve_bands("columnSizes", 2, Some(&dup)).is_err());
    }

    #[test]
    fn test_band_size_aliases() {
        let rows: Vec<BandSize> = serde_json::from_str(r#"[{"row": 1, "size": 0.4}, {"row": 0, "size": 0.6}]"#).unwrap();
        assert_eq!(rows[0].index, 1);
        let cols: Vec<BandSize> = serde_json::from_str(r#"[{"column": 0, "size": 1}]"#).unwrap();
        assert_relative_eq!(cols[0].size, 1.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_starts_are_prefix_sums(weights in prop::collection::vec(1u32..100, 1..8)) {
            let total: u32 = weights.iter().sum();
            let sizes: Vec<BandSize> = weights
                .iter()
                .enumerate()
                .rev()
                .map(|(i, w)| BandSize::new(i, f64::from(*w) / f64::from(total)))
                .collect();
            let bands = resolve_bands("rowSizes", 0, Some(&sizes)).unwrap();
            let mut acc = 0.0;
            for b in &bands {
                prop_assert!((b.start - acc).abs() < 1e-9);
                acc += b.size;
            }
            prop_assert!((acc - 1.0).abs() < 1e-9);
        }
    }
}
