//! Point-in-time export model.
//!
//! Gauges do not serialize anything themselves: on every export pass they produce a [`Metric`],
//! which pairs the gauge's [`MetricDescriptor`] with one [`TimeSeries`] per live label tuple.  All
//! of these types are immutable once built and are constructed fresh on every pass.
use std::{sync::Arc, time::SystemTime};

use metrics::SharedString;

use crate::{GaugeError, LabelKey, LabelValues, ValueKind};

/// A typed point-in-time value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointValue {
    /// Integer value.
    Integer(i64),
    /// Floating-point value.
    Float(f64),
}

impl PointValue {
    /// Gets the kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            PointValue::Integer(_) => ValueKind::Integer,
            PointValue::Float(_) => ValueKind::Float,
        }
    }
}

impl From<i64> for PointValue {
    fn from(value: i64) -> Self {
        PointValue::Integer(value)
    }
}

impl From<f64> for PointValue {
    fn from(value: f64) -> Self {
        PointValue::Float(value)
    }
}

pub(crate) mod sealed {
    /// Restricts what a gauge can hold to the point types of this crate.
    pub trait Sealed {
        /// Name of the gauge holding this type of point, for `Debug` output.
        const GAUGE_NAME: &'static str;

        /// Name of the derived gauge wrapping this type of point, for `Debug` output.
        const DERIVED_GAUGE_NAME: &'static str;
    }
}

/// Conversion of a stored measurement into an exportable value.
///
/// Implemented by everything a gauge can hold.  Returning `None` means there is nothing to report
/// for the measurement right now, which is not an error.
///
/// This trait is sealed: every value it produces is of kind [`KIND`](Self::KIND), which is what
/// lets a gauge export its points without checking each one.  It cannot be implemented outside of
/// this crate.
///
/// ```compile_fail
/// use metrics_gauge::{PointValue, ToPointValue, ValueKind};
///
/// struct Mislabeled;
///
/// impl ToPointValue for Mislabeled {
///     const KIND: ValueKind = ValueKind::Integer;
///
///     fn to_point_value(&self) -> Option<PointValue> {
///         Some(PointValue::Float(1.5))
///     }
/// }
/// ```
pub trait ToPointValue: sealed::Sealed {
    /// Kind of the values produced.
    const KIND: ValueKind;

    /// Gets the current value of the measurement.
    fn to_point_value(&self) -> Option<PointValue>;
}

/// A single value observed at a given time.
#[derive(Clone, Debug, PartialEq)]
pub struct Point {
    value: PointValue,
    timestamp: SystemTime,
}

impl Point {
    /// Creates a new `Point`.
    pub fn new(value: PointValue, timestamp: SystemTime) -> Self {
        Self { value, timestamp }
    }

    /// Value of this point.
    pub fn value(&self) -> PointValue {
        self.value
    }

    /// Time at which this point was observed.
    pub fn timestamp(&self) -> SystemTime {
        self.timestamp
    }
}

/// The points of a single label tuple.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeSeries {
    label_values: LabelValues,
    points: Vec<Point>,
    start_timestamp: Option<SystemTime>,
}

impl TimeSeries {
    /// Creates a new `TimeSeries`.
    pub fn new(
        label_values: LabelValues,
        points: Vec<Point>,
        start_timestamp: Option<SystemTime>,
    ) -> Self {
        Self { label_values, points, start_timestamp }
    }

    /// Label values identifying this series.
    pub fn label_values(&self) -> &LabelValues {
        &self.label_values
    }

    /// Points of this series.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Start of the interval covered by this series, if any.
    pub fn start_timestamp(&self) -> Option<SystemTime> {
        self.start_timestamp
    }
}

/// Immutable metadata describing a gauge and every metric it produces.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricDescriptor {
    name: SharedString,
    description: SharedString,
    unit: SharedString,
    kind: ValueKind,
    label_keys: Vec<LabelKey>,
}

impl MetricDescriptor {
    /// Creates a new `MetricDescriptor`.
    pub fn new<N, D, U>(
        name: N,
        description: D,
        unit: U,
        kind: ValueKind,
        label_keys: Vec<LabelKey>,
    ) -> Self
    where
        N: Into<SharedString>,
        D: Into<SharedString>,
        U: Into<SharedString>,
    {
        Self {
            name: name.into(),
            description: description.into(),
            unit: unit.into(),
            kind,
            label_keys,
        }
    }

    /// Name of the metric.
    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    /// Description of the metric.
    pub fn description(&self) -> &str {
        self.description.as_ref()
    }

    /// Unit of the metric.
    pub fn unit(&self) -> &str {
        self.unit.as_ref()
    }

    /// Kind of every value of the metric.
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Label keys of the metric, in order.
    pub fn label_keys(&self) -> &[LabelKey] {
        &self.label_keys
    }
}

/// A descriptor and the time series exported under it.
#[derive(Clone, Debug, PartialEq)]
pub struct Metric {
    descriptor: Arc<MetricDescriptor>,
    time_series: Vec<TimeSeries>,
}

impl Metric {
    /// Creates a new `Metric`.
    ///
    /// # Errors
    ///
    /// If any point has a value whose kind differs from the descriptor's kind, an error is returned.
    pub fn new(
        descriptor: Arc<MetricDescriptor>,
        time_series: Vec<TimeSeries>,
    ) -> Result<Self, GaugeError> {
        let expected = descriptor.kind();
        let mismatch = time_series
            .iter()
            .flat_map(|ts| ts.points())
            .map(|point| point.value().kind())
            .find(|kind| *kind != expected);
        if let Some(actual) = mismatch {
            return Err(GaugeError::InvalidValueKind { expected, actual });
        }

        Ok(Self { descriptor, time_series })
    }

    /// Creates a `Metric` whose points are already known to match the descriptor.
    pub(crate) fn from_parts(
        descriptor: Arc<MetricDescriptor>,
        time_series: Vec<TimeSeries>,
    ) -> Self {
        Self { descriptor, time_series }
    }

    /// Descriptor of this metric.
    pub fn descriptor(&self) -> &MetricDescriptor {
        &self.descriptor
    }

    /// Time series of this metric.
    pub fn time_series(&self) -> &[TimeSeries] {
        &self.time_series
    }
}

/// A source of metrics, polled by an exporter.
///
/// Every gauge implements this trait, so a registry can hold gauges of different kinds and modes
/// side by side as `Arc<dyn MetricProducer>`.
pub trait MetricProducer: Send + Sync {
    /// Gets a metric containing every current time series, or `None` if there is nothing to report.
    fn get_metric(&self, timestamp: SystemTime) -> Option<Metric>;
}

/// Converts label tuples and their measurements into time series.
///
/// Each series holds a single point with the current value of the measurement, stamped with
/// `timestamp`.  Measurements with nothing to report are skipped.  The order of `points` is kept.
pub fn time_series_list<E>(
    points: &[(LabelValues, Arc<E>)],
    timestamp: SystemTime,
) -> Vec<TimeSeries>
where
    E: ToPointValue,
{
    points
        .iter()
        .filter_map(|(label_values, measurement)| {
            let value = measurement.to_point_value()?;
            let point = Point::new(value, timestamp);
            Some(TimeSeries::new(label_values.clone(), vec![point], Some(timestamp)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::{
        sync::Arc,
        time::{Duration, SystemTime, UNIX_EPOCH},
    };

    use super::{
        sealed::Sealed, time_series_list, Metric, MetricDescriptor, Point, PointValue, TimeSeries,
        ToPointValue,
    };
    use crate::{GaugeError, LabelValues, ValueKind};

    struct Fixed(Option<i64>);

    impl Sealed for Fixed {
        const GAUGE_NAME: &'static str = "FixedGauge";
        const DERIVED_GAUGE_NAME: &'static str = "DerivedFixedGauge";
    }

    impl ToPointValue for Fixed {
        const KIND: ValueKind = ValueKind::Integer;

        fn to_point_value(&self) -> Option<PointValue> {
            self.0.map(PointValue::Integer)
        }
    }

    fn ts(secs: u64) -> SystemTime {
        UNIX_EPOCH + Duration::from_secs(secs)
    }

    #[test]
    fn test_time_series_list() {
        let points = vec![
            (LabelValues::from(["a"]), Arc::new(Fixed(Some(1)))),
            (LabelValues::from(["b"]), Arc::new(Fixed(None))),
            (LabelValues::from(["c"]), Arc::new(Fixed(Some(3)))),
        ];

        let series = time_series_list(&points, ts(10));
        assert_eq!(series.len(), 2);

        assert_eq!(series[0].label_values(), &LabelValues::from(["a"]));
        assert_eq!(series[0].points(), &[Point::new(PointValue::Integer(1), ts(10))]);
        assert_eq!(series[0].start_timestamp(), Some(ts(10)));
        assert_eq!(series[1].label_values(), &LabelValues::from(["c"]));
        assert_eq!(series[1].points()[0].value(), PointValue::Integer(3));
    }

    #[test]
    fn test_time_series_list_empty() {
        let points: Vec<(LabelValues, Arc<Fixed>)> = Vec::new();
        assert!(time_series_list(&points, ts(0)).is_empty());
    }

    #[test]
    fn test_metric_kind_check() {
        let descriptor =
            Arc::new(MetricDescriptor::new("queue_depth", "", "1", ValueKind::Integer, vec![]));
        let good = TimeSeries::new(
            LabelValues::default(),
            vec![Point::new(PointValue::Integer(4), ts(1))],
            None,
        );
        let bad = TimeSeries::new(
            LabelValues::default(),
            vec![Point::new(PointValue::Float(4.0), ts(1))],
            None,
        );

        assert!(Metric::new(descriptor.clone(), vec![good.clone()]).is_ok());
        assert_eq!(
            Metric::new(descriptor, vec![good, bad]),
            Err(GaugeError::InvalidValueKind {
                expected: ValueKind::Integer,
                actual: ValueKind::Float,
            })
        );
    }
}
