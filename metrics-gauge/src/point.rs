use std::{
    fmt,
    sync::atomic::{
        AtomicI64, AtomicU64,
        Ordering::{AcqRel, Acquire, Relaxed, Release},
    },
};

use metrics::GaugeFn;

use crate::{export::sealed::Sealed, GaugeError, Number, PointValue, ToPointValue, ValueKind};

/// A single concurrency-safe gauge value.
///
/// Every update and read of a point is atomic with respect to every other update and read of the
/// same point.  Nothing is guaranteed across different points.
///
/// Sealed through [`ToPointValue`]: the only implementations are [`IntegerGaugePoint`] and
/// [`FloatGaugePoint`].
pub trait GaugePoint: ToPointValue + Default + fmt::Debug + Send + Sync + 'static {
    /// The type of value held by this point.
    type Value: Copy + fmt::Debug + Send + 'static;

    /// Gets the current value.
    fn get_value(&self) -> Self::Value;

    /// Replaces the current value.
    fn store(&self, value: Self::Value);
}

/// A gauge point holding a 64-bit signed integer.
///
/// Starts at zero.  Only integral input is accepted; additions wrap around on overflow.
#[derive(Default)]
pub struct IntegerGaugePoint {
    value: AtomicI64,
}

impl IntegerGaugePoint {
    /// Creates a new `IntegerGaugePoint`.
    pub fn new() -> Self {
        Self::default()
    }

    fn integral(value: Number) -> Result<i64, GaugeError> {
        match value {
            Number::Integer(v) => Ok(v),
            Number::Float(_) => Err(GaugeError::InvalidValueKind {
                expected: ValueKind::Integer,
                actual: ValueKind::Float,
            }),
        }
    }

    /// Adds `delta` to the current value.
    ///
    /// # Errors
    ///
    /// If `delta` is a floating-point value, or an integer outside the range of `i64`, an error is
    /// returned and the point is left unchanged.
    pub fn add<N>(&self, delta: N) -> Result<(), GaugeError>
    where
        N: TryInto<Number>,
        GaugeError: From<N::Error>,
    {
        let delta = Self::integral(delta.try_into()?)?;
        self.value.fetch_add(delta, AcqRel);
        Ok(())
    }

    /// Sets the current value.
    ///
    /// # Errors
    ///
    /// If `value` is a floating-point value, or an integer outside the range of `i64`, an error is
    /// returned and the point is left unchanged.
    pub fn set<N>(&self, value: N) -> Result<(), GaugeError>
    where
        N: TryInto<Number>,
        GaugeError: From<N::Error>,
    {
        let value = Self::integral(value.try_into()?)?;
        self.value.store(value, Release);
        Ok(())
    }
}

impl GaugePoint for IntegerGaugePoint {
    type Value = i64;

    fn get_value(&self) -> i64 {
        self.value.load(Acquire)
    }

    fn store(&self, value: i64) {
        self.value.store(value, Release);
    }
}

impl Sealed for IntegerGaugePoint {
    const GAUGE_NAME: &'static str = "LongGauge";
    const DERIVED_GAUGE_NAME: &'static str = "DerivedLongGauge";
}

impl ToPointValue for IntegerGaugePoint {
    const KIND: ValueKind = ValueKind::Integer;

    fn to_point_value(&self) -> Option<PointValue> {
        Some(PointValue::Integer(self.get_value()))
    }
}

impl fmt::Debug for IntegerGaugePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IntegerGaugePoint({})", self.get_value())
    }
}

/// A gauge point holding a 64-bit floating-point value.
///
/// Starts at zero.  Integral input is converted.
pub struct FloatGaugePoint {
    // Bit pattern of the `f64` value.
    value: AtomicU64,
}

impl FloatGaugePoint {
    /// Creates a new `FloatGaugePoint`.
    pub fn new() -> Self {
        Self { value: AtomicU64::new(0.0f64.to_bits()) }
    }

    fn update<F>(&self, f: F)
    where
        F: Fn(f64) -> f64,
    {
        // The closure never returns `None`, so the update cannot fail.
        let _ = self.value.fetch_update(AcqRel, Relaxed, |current| {
            Some(f(f64::from_bits(current)).to_bits())
        });
    }

    /// Adds `delta` to the current value.
    ///
    /// # Errors
    ///
    /// If `delta` is an integer outside the range of `i64`, an error is returned and the point is
    /// left unchanged.
    pub fn add<N>(&self, delta: N) -> Result<(), GaugeError>
    where
        N: TryInto<Number>,
        GaugeError: From<N::Error>,
    {
        let delta: Number = delta.try_into()?;
        self.update(|current| current + delta.as_f64());
        Ok(())
    }

    /// Sets the current value.
    ///
    /// # Errors
    ///
    /// If `value` is an integer outside the range of `i64`, an error is returned and the point is
    /// left unchanged.
    pub fn set<N>(&self, value: N) -> Result<(), GaugeError>
    where
        N: TryInto<Number>,
        GaugeError: From<N::Error>,
    {
        let value: Number = value.try_into()?;
        self.store(value.as_f64());
        Ok(())
    }
}

impl Default for FloatGaugePoint {
    fn default() -> Self {
        Self::new()
    }
}

impl GaugePoint for FloatGaugePoint {
    type Value = f64;

    fn get_value(&self) -> f64 {
        f64::from_bits(self.value.load(Acquire))
    }

    fn store(&self, value: f64) {
        self.value.store(value.to_bits(), Release);
    }
}

impl Sealed for FloatGaugePoint {
    const GAUGE_NAME: &'static str = "DoubleGauge";
    const DERIVED_GAUGE_NAME: &'static str = "DerivedDoubleGauge";
}

impl ToPointValue for FloatGaugePoint {
    const KIND: ValueKind = ValueKind::Float;

    fn to_point_value(&self) -> Option<PointValue> {
        Some(PointValue::Float(self.get_value()))
    }
}

impl fmt::Debug for FloatGaugePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FloatGaugePoint({:?})", self.get_value())
    }
}

impl GaugeFn for FloatGaugePoint {
    fn increment(&self, value: f64) {
        self.update(|current| current + value);
    }

    fn decrement(&self, value: f64) {
        self.update(|current| current - value);
    }

    fn set(&self, value: f64) {
        self.store(value);
    }
}
