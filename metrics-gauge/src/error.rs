use std::convert::Infallible;

use thiserror::Error;

use crate::ValueKind;

/// Errors that could occur while creating, updating, or removing gauge time series.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GaugeError {
    /// The number of label values did not match the number of label keys.
    #[error("expected {expected} label values, got {actual}")]
    LabelArity {
        /// Number of label keys declared by the gauge.
        expected: usize,
        /// Number of label values given.
        actual: usize,
    },

    /// A label value was absent where a concrete value is required.
    #[error("label value at index {index} is absent")]
    AbsentLabelValue {
        /// Position of the first absent value.
        index: usize,
    },

    /// A value of the wrong kind was given to a point.
    #[error("{expected} point does not accept {actual} values")]
    InvalidValueKind {
        /// Kind held by the point.
        expected: ValueKind,
        /// Kind of the rejected value.
        actual: ValueKind,
    },

    /// An integer value did not fit in the 64-bit range held by points.
    #[error("value {value} is out of range for a 64-bit signed integer")]
    ValueOutOfRange {
        /// The rejected value.
        value: String,
    },
}

impl From<Infallible> for GaugeError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

impl GaugeError {
    /// Whether or not this error was caused by a malformed argument, such as a bad label tuple.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            GaugeError::LabelArity { .. }
                | GaugeError::AbsentLabelValue { .. }
                | GaugeError::ValueOutOfRange { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::GaugeError;
    use crate::ValueKind;

    #[test]
    fn test_error_classes() {
        let arity = GaugeError::LabelArity { expected: 2, actual: 1 };
        assert!(arity.is_invalid_argument());
        assert_eq!(arity.to_string(), "expected 2 label values, got 1");

        let kind =
            GaugeError::InvalidValueKind { expected: ValueKind::Integer, actual: ValueKind::Float };
        assert!(!kind.is_invalid_argument());
        assert_eq!(kind.to_string(), "integer point does not accept floating-point values");

        let range = GaugeError::ValueOutOfRange { value: u64::MAX.to_string() };
        assert!(range.is_invalid_argument());
        assert_eq!(
            range.to_string(),
            "value 18446744073709551615 is out of range for a 64-bit signed integer"
        );
    }
}
