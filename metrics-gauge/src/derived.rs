use std::{
    fmt,
    sync::{Arc, Weak},
};

use tracing::{trace, warn};

use crate::{export::sealed::Sealed, GaugePoint, PointValue, ToPointValue, ValueKind};

/// A function tracked by a derived gauge.
///
/// Returning `None` means the object the function observes no longer exists.  This is implemented
/// for every `Fn() -> Option<V>` closure, and for [`WeakFn`], which observes an object without
/// keeping it alive.
pub trait TrackedFn<V>: Send + Sync + 'static {
    /// Evaluates the function.
    fn call(&self) -> Option<V>;
}

impl<F, V> TrackedFn<V> for F
where
    F: Fn() -> Option<V> + Send + Sync + 'static,
{
    fn call(&self) -> Option<V> {
        self()
    }
}

/// A function of an object, tracked through a weak reference to that object.
///
/// Holding a `WeakFn` never extends the lifetime of the target: once the last strong reference to
/// it is dropped, [`call`](TrackedFn::call) returns `None`.
pub struct WeakFn<T, F> {
    target: Weak<T>,
    f: F,
}

impl<T, F> WeakFn<T, F> {
    /// Creates a new `WeakFn` that calls `f` with `target` for as long as `target` is alive.
    pub fn new(target: &Arc<T>, f: F) -> Self {
        Self { target: Arc::downgrade(target), f }
    }

    /// Whether or not the target is still alive.
    pub fn is_alive(&self) -> bool {
        self.target.strong_count() > 0
    }
}

impl<T, F, V> TrackedFn<V> for WeakFn<T, F>
where
    T: Send + Sync + 'static,
    F: Fn(&T) -> V + Send + Sync + 'static,
{
    fn call(&self) -> Option<V> {
        let target = self.target.upgrade()?;
        Some((self.f)(&target))
    }
}

/// Creates a [`WeakFn`] tracking `f` applied to `target`.
pub fn track<T, F, V>(target: &Arc<T>, f: F) -> WeakFn<T, F>
where
    F: Fn(&T) -> V,
{
    WeakFn::new(target, f)
}

type BoxedFn<V> = Box<dyn Fn() -> Option<V> + Send + Sync>;

/// A read-only gauge point whose value is computed by a tracked function.
///
/// Every read calls the function and stores the result in the wrapped point before returning it,
/// so the wrapped point always holds the last value the function produced.
pub struct DerivedGaugePoint<P: GaugePoint> {
    point: P,
    func: BoxedFn<P::Value>,
}

impl<P: GaugePoint> DerivedGaugePoint<P> {
    /// Creates a new `DerivedGaugePoint` tracking `func`, storing results in `point`.
    ///
    /// Results that do not convert to the point's value type, such as a `usize` beyond the range
    /// of `i64`, are not reported.
    pub fn new<F, V>(func: F, point: P) -> Self
    where
        F: TrackedFn<V>,
        V: TryInto<P::Value>,
    {
        let func = move || -> Option<P::Value> {
            match func.call()?.try_into() {
                Ok(value) => Some(value),
                Err(_) => {
                    let kind = P::KIND;
                    warn!(%kind, "Tracked value out of range for point.");
                    None
                }
            }
        };
        Self { point, func: Box::new(func) }
    }

    /// Gets the current value of the tracked function.
    ///
    /// Returns `None`, without touching the wrapped point, if the function's target no longer
    /// exists or its result is out of range.
    pub fn get_value(&self) -> Option<P::Value> {
        match (self.func)() {
            Some(value) => {
                self.point.store(value);
                Some(self.point.get_value())
            }
            None => {
                let kind = P::KIND;
                trace!(%kind, "No derived value to report.");
                None
            }
        }
    }

    /// Gets the wrapped point, holding the result of the last successful read.
    pub fn point(&self) -> &P {
        &self.point
    }
}

impl<P: GaugePoint> Sealed for DerivedGaugePoint<P> {
    const GAUGE_NAME: &'static str = P::DERIVED_GAUGE_NAME;
    const DERIVED_GAUGE_NAME: &'static str = P::DERIVED_GAUGE_NAME;
}

impl<P: GaugePoint> ToPointValue for DerivedGaugePoint<P> {
    const KIND: ValueKind = P::KIND;

    fn to_point_value(&self) -> Option<PointValue> {
        self.get_value()?;
        self.point.to_point_value()
    }
}

impl<P: GaugePoint> fmt::Debug for DerivedGaugePoint<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedGaugePoint").field("last", &self.point).finish_non_exhaustive()
    }
}
