use std::{fmt, slice::Iter};

use metrics::SharedString;

use crate::GaugeError;

/// The key, or dimension name, of a label.
///
/// Gauges declare their label keys once, at construction, and every time series of the gauge is
/// then identified by one value per key, in the same order.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct LabelKey {
    key: SharedString,
    description: SharedString,
}

impl LabelKey {
    /// Creates a [`LabelKey`] from a key and description.
    pub fn new<K, D>(key: K, description: D) -> Self
    where
        K: Into<SharedString>,
        D: Into<SharedString>,
    {
        LabelKey { key: key.into(), description: description.into() }
    }

    /// Key of this label.
    pub fn key(&self) -> &str {
        self.key.as_ref()
    }

    /// Description of this label.
    pub fn description(&self) -> &str {
        self.description.as_ref()
    }
}

impl From<&'static str> for LabelKey {
    fn from(key: &'static str) -> Self {
        LabelKey::new(key, "")
    }
}

impl From<String> for LabelKey {
    fn from(key: String) -> Self {
        LabelKey::new(key, "")
    }
}

/// A single label value.
#[derive(Clone, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct LabelValue(SharedString);

impl LabelValue {
    /// Creates a [`LabelValue`].
    pub fn new<V>(value: V) -> Self
    where
        V: Into<SharedString>,
    {
        LabelValue(value.into())
    }

    /// Creates a [`LabelValue`] from a static string.
    pub const fn from_static(value: &'static str) -> Self {
        LabelValue(SharedString::const_str(value))
    }

    /// Value of this label.
    pub fn value(&self) -> &str {
        self.0.as_ref()
    }
}

impl fmt::Display for LabelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl From<&'static str> for LabelValue {
    fn from(value: &'static str) -> Self {
        LabelValue::from_static(value)
    }
}

impl From<String> for LabelValue {
    fn from(value: String) -> Self {
        LabelValue::new(value)
    }
}

impl From<SharedString> for LabelValue {
    fn from(value: SharedString) -> Self {
        LabelValue(value)
    }
}

/// An ordered tuple of label values identifying one time series of a gauge.
///
/// Individual values may be absent.  The all-absent tuple identifies the default time series of a
/// gauge, and can only be addressed through the `*_default_time_series` methods: tuples given to
/// any other method must hold a value for every label key.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct LabelValues(Vec<Option<LabelValue>>);

impl LabelValues {
    /// Creates a [`LabelValues`] from values that may be absent.
    pub fn new(values: Vec<Option<LabelValue>>) -> Self {
        LabelValues(values)
    }

    /// Creates the all-absent tuple of the given length.
    pub fn absent(len: usize) -> Self {
        LabelValues(vec![None; len])
    }

    /// Number of values in this tuple.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether or not this tuple holds no values.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Gets the value at the given position, if it is present.
    pub fn get(&self, index: usize) -> Option<&LabelValue> {
        self.0.get(index).and_then(Option::as_ref)
    }

    /// Iterates over the values of this tuple.
    pub fn iter(&self) -> Iter<'_, Option<LabelValue>> {
        self.0.iter()
    }

    /// Checks that this tuple holds exactly `expected` values and that none of them are absent.
    pub fn validate(&self, expected: usize) -> Result<(), GaugeError> {
        if let Some(index) = self.0.iter().position(Option::is_none) {
            return Err(GaugeError::AbsentLabelValue { index });
        }
        if self.0.len() != expected {
            return Err(GaugeError::LabelArity { expected, actual: self.0.len() });
        }
        Ok(())
    }

    /// Consumes this tuple, returning the underlying values.
    pub fn into_inner(self) -> Vec<Option<LabelValue>> {
        self.0
    }
}

impl<T> From<Vec<T>> for LabelValues
where
    T: Into<LabelValue>,
{
    fn from(values: Vec<T>) -> Self {
        values.into_iter().map(|v| Some(v.into())).collect()
    }
}

impl<T, const N: usize> From<[T; N]> for LabelValues
where
    T: Into<LabelValue>,
{
    fn from(values: [T; N]) -> Self {
        values.into_iter().map(|v| Some(v.into())).collect()
    }
}

impl FromIterator<Option<LabelValue>> for LabelValues {
    fn from_iter<I: IntoIterator<Item = Option<LabelValue>>>(iter: I) -> Self {
        LabelValues(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a LabelValues {
    type Item = &'a Option<LabelValue>;
    type IntoIter = Iter<'a, Option<LabelValue>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{LabelKey, LabelValue, LabelValues};
    use crate::GaugeError;

    #[test]
    fn test_label_key() {
        let key = LabelKey::new("method", "HTTP method");
        assert_eq!(key.key(), "method");
        assert_eq!(key.description(), "HTTP method");
        assert_eq!(LabelKey::from("path").description(), "");
    }

    #[test]
    fn test_conversions() {
        let from_array = LabelValues::from(["GET", "/"]);
        let from_vec = LabelValues::from(vec![String::from("GET"), String::from("/")]);
        assert_eq!(from_array, from_vec);
        assert_eq!(from_array.get(0), Some(&LabelValue::from_static("GET")));
        assert_eq!(from_array.len(), 2);
    }

    #[test]
    fn test_validate() {
        assert_eq!(LabelValues::from(["GET"]).validate(1), Ok(()));
        assert_eq!(
            LabelValues::from(["GET"]).validate(2),
            Err(GaugeError::LabelArity { expected: 2, actual: 1 })
        );

        let partial = LabelValues::new(vec![Some("GET".into()), None]);
        assert_eq!(partial.validate(2), Err(GaugeError::AbsentLabelValue { index: 1 }));

        // The default tuple is never valid input, unless there are no keys at all.
        assert!(LabelValues::absent(1).validate(1).is_err());
        assert_eq!(LabelValues::absent(0).validate(0), Ok(()));
    }
}
