use metrics::SharedString;

use crate::{
    DerivedDoubleGauge, DerivedLongGauge, DoubleGauge, GaugeContainer, LabelKey, LongGauge,
    ToPointValue,
};

/// Builder for creating and configuring a gauge.
///
/// Only the name is required.  By default, gauges have an empty description, a unit of `"1"` (a
/// dimensionless count), and no label keys.
#[derive(Clone, Debug)]
pub struct GaugeBuilder {
    name: SharedString,
    description: SharedString,
    unit: SharedString,
    label_keys: Vec<LabelKey>,
}

impl GaugeBuilder {
    /// Creates a new `GaugeBuilder` for a gauge with the given name.
    pub fn new<N>(name: N) -> Self
    where
        N: Into<SharedString>,
    {
        Self {
            name: name.into(),
            description: SharedString::const_str(""),
            unit: SharedString::const_str("1"),
            label_keys: Vec::new(),
        }
    }

    /// Sets the description of the gauge.
    #[must_use]
    pub fn with_description<D>(mut self, description: D) -> Self
    where
        D: Into<SharedString>,
    {
        self.description = description.into();
        self
    }

    /// Sets the unit of the gauge.
    #[must_use]
    pub fn with_unit<U>(mut self, unit: U) -> Self
    where
        U: Into<SharedString>,
    {
        self.unit = unit.into();
        self
    }

    /// Adds a label key.
    ///
    /// Label keys are kept in the order they are added.
    #[must_use]
    pub fn with_label_key<K>(mut self, key: K) -> Self
    where
        K: Into<LabelKey>,
    {
        self.label_keys.push(key.into());
        self
    }

    /// Adds several label keys.
    #[must_use]
    pub fn with_label_keys<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<LabelKey>,
    {
        self.label_keys.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Builds a gauge holding points of type `E`.
    pub fn build<E>(self) -> GaugeContainer<E>
    where
        E: ToPointValue,
    {
        GaugeContainer::new(self.name, self.description, self.unit, self.label_keys)
    }

    /// Builds a [`LongGauge`].
    pub fn build_long(self) -> LongGauge {
        self.build()
    }

    /// Builds a [`DoubleGauge`].
    pub fn build_double(self) -> DoubleGauge {
        self.build()
    }

    /// Builds a [`DerivedLongGauge`].
    pub fn build_derived_long(self) -> DerivedLongGauge {
        self.build()
    }

    /// Builds a [`DerivedDoubleGauge`].
    pub fn build_derived_double(self) -> DerivedDoubleGauge {
        self.build()
    }
}

#[cfg(test)]
mod tests {
    use super::GaugeBuilder;
    use crate::{LabelKey, ValueKind};

    #[test]
    fn test_defaults() {
        let gauge = GaugeBuilder::new("open_files").build_long();
        let descriptor = gauge.descriptor();
        assert_eq!(descriptor.name(), "open_files");
        assert_eq!(descriptor.description(), "");
        assert_eq!(descriptor.unit(), "1");
        assert!(descriptor.label_keys().is_empty());
        assert_eq!(descriptor.kind(), ValueKind::Integer);
    }

    #[test]
    fn test_configured() {
        let gauge = GaugeBuilder::new("heap_used")
            .with_description("Bytes of heap in use")
            .with_unit("By")
            .with_label_key(LabelKey::new("pool", "Memory pool"))
            .with_label_keys(["region", "zone"])
            .build_derived_double();

        let descriptor = gauge.descriptor();
        assert_eq!(descriptor.description(), "Bytes of heap in use");
        assert_eq!(descriptor.unit(), "By");
        assert_eq!(descriptor.kind(), ValueKind::Float);
        let keys = descriptor.label_keys().iter().map(LabelKey::key).collect::<Vec<_>>();
        assert_eq!(keys, vec!["pool", "region", "zone"]);

        gauge.create_time_series(["young", "eu", "a"], || Some(1.0)).unwrap();
        assert!(gauge.create_time_series(["young"], || Some(1.0)).is_err());
    }
}
