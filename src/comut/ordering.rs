//! Shared sample ordering.
//!
//! [`OrderingState`] owns the canonical order of samples that every
//! sample-based plot shares. The order is an `Arc<[Value]>`: plots bound to
//! it hold a clone of the pointer, never a copy of the list, and a resort
//! publishes a fresh `Arc`.

use crate::comut::data::DataDocument;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

/// Sort direction, serialized as 0 (ascending) or 1 (descending).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Direction {
    /// Smallest first.
    Asc,
    /// Largest first.
    #[default]
    Desc,
}

impl Direction {
    /// The other direction.
    #[must_use]
    pub fn flip(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Direction::Asc),
            1 => Ok(Direction::Desc),
            other => Err(format!("sort direction must be 0 or 1, got {other}")),
        }
    }
}

impl From<Direction> for u8 {
    fn from(d: Direction) -> Self {
        match d {
            Direction::Asc => 0,
            Direction::Desc => 1,
        }
    }
}

/// One sort criterion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortKey {
    /// Column search discriminator.
    pub search: String,
    /// Direction.
    pub direction: Direction,
}

impl SortKey {
    /// Create a sort key.
    #[must_use]
    pub fn new(search: impl Into<String>, direction: Direction) -> Self {
        Self { search: search.into(), direction }
    }
}

/// Compare two samples under `keys`, left to right.
///
/// `values_a[i]` / `values_b[i]` are the samples' values for `keys[i]`.
fn compare(keys: &[SortKey], values_a: &[Value], values_b: &[Value]) -> Ordering {
    keys.iter()
        .zip(values_a.iter().zip(values_b))
        .map(|(k, (a, b))| k.direction.apply(a.cmp(b)))
        .find(|o| o.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Sort `samples` by `keys`. Ties keep their input order.
#[must_use]
pub fn sort_samples<'a>(samples: impl IntoIterator<Item = &'a str>, keys: &[SortKey], data: &DataDocument) -> Vec<&'a str> {
    let mut rows: Vec<(&str, Vec<Value>)> = samples
        .into_iter()
        .map(|s| (s, keys.iter().map(|k| data.sort_value(s, &k.search)).collect()))
        .collect();
    rows.sort_by(|a, b| compare(keys, &a.1, &b.1));
    rows.into_iter().map(|(s, _)| s).collect()
}

/// Canonical order, active sort keys and excluded samples.
#[derive(Debug, Clone)]
pub struct OrderingState {
    samples: Vec<String>,
    order: Arc<[Value]>,
    keys: Vec<SortKey>,
    excluded: BTreeSet<String>,
}

impl OrderingState {
    /// State over `samples` in their given order, unsorted.
    #[must_use]
    pub fn new(samples: Vec<String>) -> Self {
        let order = samples.iter().map(Value::from).collect();
        Self { samples, order, keys: Vec::new(), excluded: BTreeSet::new() }
    }

    /// Current canonical order.
    #[must_use]
    pub fn order(&self) -> &Arc<[Value]> {
        &self.order
    }

    /// Active sort keys, highest priority first.
    #[must_use]
    pub fn sort_keys(&self) -> &[SortKey] {
        &self.keys
    }

    /// Excluded samples.
    #[must_use]
    pub fn excluded(&self) -> &BTreeSet<String> {
        &self.excluded
    }

    /// Replace the active sort keys.
    pub fn set_sort_keys(&mut self, keys: Vec<SortKey>) {
        self.keys = keys;
    }

    /// Apply a click on the label of sort criterion `search`.
    ///
    /// A plain click makes `search` the only key; with `modifier` the key is
    /// appended to the active list. New keys start ascending. Either way, a
    /// key already active flips its direction instead of being added again.
    pub fn click(&mut self, search: &str, modifier: bool) {
        let existing = self.keys.iter().position(|k| k.search == search);
        match (existing, modifier) {
            (Some(i), true) => self.keys[i].direction = self.keys[i].direction.flip(),
            (None, true) => self.keys.push(SortKey::new(search, Direction::Asc)),
            (Some(i), false) => {
                let direction = self.keys[i].direction.flip();
                self.keys = vec![SortKey::new(search, direction)];
            }
            (None, false) => self.keys = vec![SortKey::new(search, Direction::Asc)],
        }
    }

    /// Exclude a sample; returns whether it was visible before.
    pub fn exclude(&mut self, sample: &str) -> bool {
        self.samples.iter().any(|s| s == sample) && self.excluded.insert(sample.to_string())
    }

    /// Show an excluded sample again; returns whether it was excluded.
    pub fn include(&mut self, sample: &str) -> bool {
        self.excluded.remove(sample)
    }

    /// Recompute the canonical order from the active keys.
    pub fn recompute(&mut self, data: &DataDocument) {
        let visible = self.samples.iter().map(String::as_str).filter(|s| !self.excluded.contains(*s));
        let sorted = sort_samples(visible, &self.keys, data);
        self.order = sorted.into_iter().map(Value::from).collect();
        debug!(samples = self.order.len(), keys = self.keys.len(), excluded = self.excluded.len(), "order recomputed");
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn doc(values: &[i32]) -> DataDocument {
        let samples: Vec<String> = (0..values.len()).map(|i| format!("S{i}")).collect();
        let data = samples
            .iter()
            .zip(values)
            .map(|(s, v)| (s.clone(), HashMap::from([("k".to_string(), Some(Value::from(*v)))])))
            .collect();
        DataDocument { samples, sets: vec!["k".into()], data }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_sort_is_stable_and_ordered(values in prop::collection::vec(0i32..5, 0..30)) {
            let d = doc(&values);
            let sorted = sort_samples(d.samples(), &[SortKey::new("k", Direction::Asc)], &d);
            prop_assert_eq!(sorted.len(), values.len());
            for w in sorted.windows(2) {
                let a: usize = w[0][1..].parse().unwrap();
                let b: usize = w[1][1..].parse().unwrap();
                prop_assert!(values[a] < values[b] || (values[a] == values[b] && a < b));
            }
        }
    }
}
