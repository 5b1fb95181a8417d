//! Stacking transform for stacked bar and column plots.
//!
//! Points are grouped by the stack key attribute (the categorical one), and
//! for every category each declared series gets a `[start, end)` span. Spans
//! accumulate in series declaration order, not data order, so renderers can
//! place segments without re-summing.

use crate::color::Rgba;
use crate::data::{Attr, Point};
use crate::error::{Error, Result};
use crate::plot::config::SeriesSpec;
use crate::plot::PlotType;
use crate::value::Value;
use serde::Serialize;
use std::collections::BTreeMap;

/// One segment of a stack.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackSegment {
    /// Category the stack belongs to.
    pub category: Value,
    /// Series name.
    pub series: String,
    /// Series color.
    pub color: Rgba,
    /// Running total before this segment.
    pub start: f64,
    /// Running total including this segment.
    pub end: f64,
}

impl StackSegment {
    /// Value contributed by the segment.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.end - self.start
    }
}

/// All segments of one series, one per category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesStack {
    /// Series name.
    pub name: String,
    /// Series color.
    pub color: Rgba,
    /// Segments in category order.
    pub segments: Vec<StackSegment>,
}

/// Stacked data of a plot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataStack {
    /// Attribute the data is grouped on.
    #[serde(skip)]
    pub key: Attr,
    /// Categories in first-appearance order.
    pub categories: Vec<Value>,
    /// One stack per declared series, in declaration order.
    pub series: Vec<SeriesStack>,
}

impl DataStack {
    /// Stack `data` for a stacked plot type.
    ///
    /// A category missing a series contributes a zero-length segment; when a
    /// category lists a series twice the last value wins.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingSeries`] when `series` is empty
    /// - [`Error::UnknownSeries`] listing series found in the data but not declared
    /// - [`Error::PointWithoutSeries`] naming the category of a point with no series
    /// - [`Error::IncompatibleValue`] for non-numeric stacked values
    /// - [`Error::ScaleDomain`] for a plot type that does not stack
    pub fn build(plot_type: PlotType, data: &[Point], series: &[SeriesSpec]) -> Result<Self> {
        let key = plot_type
            .stack_key()
            .ok_or_else(|| Error::ScaleDomain(format!("{plot_type} does not stack its data")))?;
        if series.is_empty() {
            return Err(Error::MissingSeries(plot_type.to_string()));
        }
        let value_attr = key.other();

        let mut categories: Vec<Value> = Vec::new();
        let mut index: BTreeMap<Value, usize> = BTreeMap::new();
        let mut values: Vec<BTreeMap<&str, f64>> = Vec::new();
        let mut unknown: Vec<String> = Vec::new();

        for p in data {
            let category = p.get(key);
            let slot = *index.entry(category.clone()).or_insert_with(|| {
                categories.push(category.clone());
                values.push(BTreeMap::new());
                categories.len() - 1
            });

            let name = p
                .series
                .as_deref()
                .ok_or_else(|| Error::PointWithoutSeries { category: category.to_string() })?;
            if !series.iter().any(|s| s.name == name) && !unknown.iter().any(|u| u == name) {
                unknown.push(name.to_string());
            }

            let v = p.get(value_attr);
            let n = v.as_f64().ok_or_else(|| Error::IncompatibleValue {
                kind: "linear".to_string(),
                attr: value_attr.name(),
                value: v.to_string(),
            })?;
            values[slot].insert(name, n);
        }

        if !unknown.is_empty() {
            return Err(Error::UnknownSeries(unknown));
        }

        let mut running = vec![0.0; categories.len()];
        let stacks = series
            .iter()
            .map(|spec| {
                let segments = categories
                    .iter()
                    .zip(values.iter())
                    .zip(running.iter_mut())
                    .map(|((category, by_series), total)| {
                        let start = *total;
                        *total += by_series.get(spec.name.as_str()).copied().unwrap_or(0.0);
                        StackSegment {
                            category: category.clone(),
                            series: spec.name.clone(),
                            color: spec.color,
                            start,
                            end: *total,
                        }
                    })
                    .collect();
                SeriesStack { name: spec.name.clone(), color: spec.color, segments }
            })
            .collect();

        Ok(Self { key, categories, series: stacks })
    }

    /// Largest stack end over every series and category, 0 when empty.
    #[must_use]
    pub fn max_end(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.segments.iter().map(|seg| seg.end))
            .fold(0.0, f64::max)
    }

    /// `[start, end]` per series (declaration order) for one category.
    #[must_use]
    pub fn spans(&self, category: &Value) -> Option<Vec<(f64, f64)>> {
        let i = self.categories.iter().position(|c| c == category)?;
        Some(self.series.iter().map(|s| (s.segments[i].start, s.segments[i].end)).collect())
    }

    /// Every segment, series-major.
    pub fn segments(&self) -> impl Iterator<Item = &StackSegment> {
        self.series.iter().flat_map(|s| s.segments.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> Vec<SeriesSpec> {
        vec![SeriesSpec::new("s1", Rgba::RED), SeriesSpec::new("s2", Rgba::BLUE)]
    }

    #[test]
    fn test_stacked_column_scenario() {
        let data = vec![Point::new("A", 10).series("s1"), Point::new("A", 5).series("s2")];
        let stack = DataStack::build(PlotType::StackedColumn, &data, &series()).unwrap();
        assert_eq!(stack.key, Attr::X);
        assert_eq!(stack.spans(&Value::from("A")).unwrap(), vec![(0.0, 10.0), (10.0, 15.0)]);
        assert_eq!(stack.max_end(), 15.0);
    }

    #[test]
    fn test_declaration_order_not_data_order() {
        let data = vec![Point::new("A", 5).series("s2"), Point::new("A", 10).series("s1")];
        let stack = DataStack::build(PlotType::StackedColumn, &data, &series()).unwrap();
        assert_eq!(stack.spans(&Value::from("A")).unwrap(), vec![(0.0, 10.0), (10.0, 15.0)]);
    }

    #[test]
    fn test_stacked_bar_groups_on_y() {
        let data = vec![Point::new(3, "row1").series("s1"), Point::new(4, "row2").series("s2")];
        let stack = DataStack::build(PlotType::StackedBar, &data, &series()).unwrap();
        assert_eq!(stack.key, Attr::Y);
        assert_eq!(stack.categories, vec![Value::from("row1"), Value::from("row2")]);
        assert_eq!(stack.spans(&Value::from("row2")).unwrap(), vec![(0.0, 0.0), (0.0, 4.0)]);
        assert_eq!(stack.segments().count(), 4);
    }

    #[test]
    fn test_missing_series_declaration() {
        let data = vec![Point::new("A", 1).series("s1")];
        let err = DataStack::build(PlotType::StackedColumn, &data, &[]).unwrap_err();
        assert!(matches!(err, Error::MissingSeries(_)));
    }

    #[test]
    fn test_unknown_series_listed() {
        let data = vec![
            Point::new("A", 1).series("s1"),
            Point::new("A", 1).series("s3"),
            Point::new("B", 1).series("typo"),
            Point::new("B", 1).series("s3"),
        ];
        let err = DataStack::build(PlotType::StackedColumn, &data, &series()).unwrap_err();
        assert_eq!(err.to_string(), "Unknown series found in data: s3, typo");
    }

    #[test]
    fn test_point_without_series_names_category() {
        let data = vec![Point::new("A", 1).series("s1"), Point::new("B", 2)];
        let err = DataStack::build(PlotType::StackedColumn, &data, &series()).unwrap_err();
        assert!(matches!(&err, Error::PointWithoutSeries { category } if category == "B"));
        assert!(err.to_string().contains("category B"));
    }

    #[test]
    fn test_non_stacked_type_rejected() {
        assert!(DataStack::build(PlotType::Scatter, &[], &series()).is_err());
    }

    #[test]
    fn test_non_numeric_value_rejected() {
        let data = vec![Point::new("A", "ten").series("s1")];
        assert!(matches!(
            DataStack::build(PlotType::StackedColumn, &data, &series()),
            Err(Error::IncompatibleValue { attr: "y", .. })
        ));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_stack_end_monotonic_in_series_order(
            rows in prop::collection::vec((0usize..6, 0usize..4, 0.0f64..1000.0), 0..60)
        ) {
            let declared: Vec<SeriesSpec> =
                (0..4).map(|i| SeriesSpec::new(format!("s{i}"), Rgba::BLACK)).collect();
            let data: Vec<Point> = rows
                .iter()
                .map(|(c, s, v)| Point::new(format!("cat{c}"), *v).series(format!("s{s}")))
                .collect();

            let stack = DataStack::build(PlotType::StackedColumn, &data, &declared).expect("declared series");
            for category in &stack.categories {
                let spans = stack.spans(category).expect("category present");
                for pair in spans.windows(2) {
                    prop_assert!(pair[1].1 >= pair[0].1);
                    prop_assert!((pair[1].0 - pair[0].1).abs() < 1e-9);
                }
            }
        }
    }
}
