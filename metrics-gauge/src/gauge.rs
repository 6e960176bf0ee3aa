//! Gauge containers.
//!
//! A gauge maps label tuples to points.  The map is guarded by a single lock which is only ever
//! held for the map operation itself: reading the value of a point, which for derived points means
//! calling an arbitrary function, always happens after the lock has been released.
use std::{fmt, mem, sync::Arc, time::SystemTime};

use indexmap::IndexMap;
use metrics::SharedString;
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::{
    export::{sealed::Sealed, time_series_list},
    DerivedGaugePoint, FloatGaugePoint, GaugeError, GaugePoint, IntegerGaugePoint, LabelKey,
    LabelValues, Metric, MetricDescriptor, MetricProducer, ToPointValue, TrackedFn,
};

/// Gauge for recording integer measurements.
pub type LongGauge = GaugeContainer<IntegerGaugePoint>;

/// Gauge for recording floating-point measurements.
pub type DoubleGauge = GaugeContainer<FloatGaugePoint>;

/// Gauge for integer measurements derived from tracked functions.
pub type DerivedLongGauge = GaugeContainer<DerivedGaugePoint<IntegerGaugePoint>>;

/// Gauge for floating-point measurements derived from tracked functions.
pub type DerivedDoubleGauge = GaugeContainer<DerivedGaugePoint<FloatGaugePoint>>;

/// A set of instantaneous measurements of the same kind, sliced by label values.
///
/// `E` is the type of point held for each label tuple: [`IntegerGaugePoint`] or
/// [`FloatGaugePoint`] for gauges whose values are set directly, or a [`DerivedGaugePoint`] for
/// gauges whose values are computed when exported.  Points are created the first time a label
/// tuple is seen and live until they are removed, or until the gauge is cleared.
///
/// Handles to points remain usable after their point has been removed from the gauge; updates
/// made through such a handle are simply never exported.
pub struct GaugeContainer<E> {
    descriptor: Arc<MetricDescriptor>,
    default_label_values: LabelValues,
    points: Mutex<IndexMap<LabelValues, Arc<E>>>,
}

impl<E> GaugeContainer<E>
where
    E: ToPointValue,
{
    /// Creates a new gauge.
    ///
    /// Every time series of the gauge will be identified by one label value for each of
    /// `label_keys`, in order.
    pub fn new<N, D, U>(name: N, description: D, unit: U, label_keys: Vec<LabelKey>) -> Self
    where
        N: Into<SharedString>,
        D: Into<SharedString>,
        U: Into<SharedString>,
    {
        let default_label_values = LabelValues::absent(label_keys.len());
        let descriptor = MetricDescriptor::new(name, description, unit, E::KIND, label_keys);

        Self {
            descriptor: Arc::new(descriptor),
            default_label_values,
            points: Mutex::new(IndexMap::new()),
        }
    }

    /// Descriptor attached to every metric produced by this gauge.
    pub fn descriptor(&self) -> &MetricDescriptor {
        &self.descriptor
    }

    /// Number of time series currently held.
    pub fn len(&self) -> usize {
        self.points.lock().len()
    }

    /// Whether or not this gauge currently holds no time series.
    pub fn is_empty(&self) -> bool {
        self.points.lock().is_empty()
    }

    fn validated(&self, label_values: impl Into<LabelValues>) -> Result<LabelValues, GaugeError> {
        let label_values = label_values.into();
        label_values.validate(self.descriptor.label_keys().len())?;
        Ok(label_values)
    }

    fn get_or_insert_with<F>(&self, label_values: LabelValues, create: F) -> Arc<E>
    where
        F: FnOnce() -> E,
    {
        let mut points = self.points.lock();
        let point = points.entry(label_values).or_insert_with(|| Arc::new(create()));
        Arc::clone(point)
    }

    fn remove(&self, label_values: &LabelValues) {
        let removed = self.points.lock().shift_remove(label_values);
        if removed.is_some() {
            debug!(name = self.descriptor.name(), ?label_values, "Removed time series.");
        }
    }

    /// Removes the time series for the given label values.
    ///
    /// Does nothing if there is no such time series.
    ///
    /// # Errors
    ///
    /// If the number of label values does not match the number of label keys, or if any label
    /// value is absent, an error is returned and the gauge is left unchanged.
    pub fn remove_time_series(
        &self,
        label_values: impl Into<LabelValues>,
    ) -> Result<(), GaugeError> {
        let label_values = self.validated(label_values)?;
        self.remove(&label_values);
        Ok(())
    }

    /// Removes the default time series.
    pub fn remove_default_time_series(&self) {
        self.remove(&self.default_label_values);
    }

    /// Removes every time series.
    ///
    /// The whole map is swapped out at once, so concurrent readers see either every time series or
    /// none of them.
    pub fn clear(&self) {
        let old = mem::take(&mut *self.points.lock());
        debug!(name = self.descriptor.name(), series = old.len(), "Cleared gauge.");
    }

    /// Gets a metric holding one time series for every current measurement.
    ///
    /// Each time series holds a single point with the current value of the measurement, stamped
    /// with `timestamp`.  Derived measurements are evaluated here, after the map lock has been
    /// released.  Measurements with nothing to report are left out.
    ///
    /// Returns `None` if there is nothing to report at all.
    pub fn get_metric(&self, timestamp: SystemTime) -> Option<Metric> {
        let points = {
            let points = self.points.lock();
            if points.is_empty() {
                return None;
            }
            points.iter().map(|(lv, p)| (lv.clone(), Arc::clone(p))).collect::<Vec<_>>()
        };

        let time_series = time_series_list(&points, timestamp);
        trace!(
            name = self.descriptor.name(),
            series = time_series.len(),
            measurements = points.len(),
            "Collected gauge."
        );
        if time_series.is_empty() {
            return None;
        }

        // Every point type is sealed and produces only values of its declared kind.
        Some(Metric::from_parts(Arc::clone(&self.descriptor), time_series))
    }
}

impl<P> GaugeContainer<P>
where
    P: GaugePoint,
{
    /// Gets the point for the given label values, creating it if it does not yet exist.
    ///
    /// Calls with equal label values always get the same point.
    ///
    /// # Errors
    ///
    /// If the number of label values does not match the number of label keys, or if any label
    /// value is absent, an error is returned and the gauge is left unchanged.
    pub fn get_or_create_time_series(
        &self,
        label_values: impl Into<LabelValues>,
    ) -> Result<Arc<P>, GaugeError> {
        let label_values = self.validated(label_values)?;
        Ok(self.get_or_insert_with(label_values, P::default))
    }

    /// Gets the default point, creating it if it does not yet exist.
    ///
    /// The default point is not associated with any label values: it is exported with every label
    /// value absent.
    pub fn get_or_create_default_time_series(&self) -> Arc<P> {
        self.get_or_insert_with(self.default_label_values.clone(), P::default)
    }
}

impl<P> GaugeContainer<DerivedGaugePoint<P>>
where
    P: GaugePoint,
{
    /// Creates a derived point tracking `func` for the given label values.
    ///
    /// If a point already exists for these label values, it is returned unchanged and `func` is
    /// dropped: the first function registered for a label tuple stays in place until that time
    /// series is removed.
    ///
    /// # Errors
    ///
    /// If the number of label values does not match the number of label keys, or if any label
    /// value is absent, an error is returned and the gauge is left unchanged.
    pub fn create_time_series<F, V>(
        &self,
        label_values: impl Into<LabelValues>,
        func: F,
    ) -> Result<Arc<DerivedGaugePoint<P>>, GaugeError>
    where
        F: TrackedFn<V>,
        V: TryInto<P::Value>,
    {
        let label_values = self.validated(label_values)?;
        Ok(self.get_or_insert_with(label_values, || DerivedGaugePoint::new(func, P::default())))
    }

    /// Creates the default derived point, tracking `func`.
    ///
    /// As with [`create_time_series`](Self::create_time_series), an existing default point is
    /// returned unchanged.
    pub fn create_default_time_series<F, V>(&self, func: F) -> Arc<DerivedGaugePoint<P>>
    where
        F: TrackedFn<V>,
        V: TryInto<P::Value>,
    {
        self.get_or_insert_with(self.default_label_values.clone(), || {
            DerivedGaugePoint::new(func, P::default())
        })
    }
}

impl<E> MetricProducer for GaugeContainer<E>
where
    E: ToPointValue + Send + Sync,
{
    fn get_metric(&self, timestamp: SystemTime) -> Option<Metric> {
        GaugeContainer::get_metric(self, timestamp)
    }
}

impl<E> fmt::Debug for GaugeContainer<E>
where
    E: ToPointValue + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(<E as Sealed>::GAUGE_NAME)
            .field("name", &self.descriptor.name())
            .field("points", &*self.points.lock())
            .finish()
    }
}
