use crate::{GaugeError, ValueKind};

/// A numeric input to a gauge point.
///
/// Points accept any primitive integer or float through `TryInto<Number>`, but keep track of which
/// of the two it was so that integer points can refuse floating-point input instead of truncating
/// it.  Integers wider than 32 bits convert fallibly: values outside the range of `i64` are refused
/// with [`GaugeError::ValueOutOfRange`] rather than wrapped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    /// An integral value.
    Integer(i64),
    /// A floating-point value.
    Float(f64),
}

impl Number {
    /// Gets the kind of this number.
    pub fn kind(&self) -> ValueKind {
        match self {
            Number::Integer(_) => ValueKind::Integer,
            Number::Float(_) => ValueKind::Float,
        }
    }

    /// Converts this number to its `f64` representation.
    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::Integer(v) => v as f64,
            Number::Float(v) => v,
        }
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    Number::Integer(i64::from(value))
                }
            }
        )*
    };
}

macro_rules! impl_try_from_integer {
    ($($ty:ty),*) => {
        $(
            impl TryFrom<$ty> for Number {
                type Error = GaugeError;

                fn try_from(value: $ty) -> Result<Self, Self::Error> {
                    i64::try_from(value)
                        .map(Number::Integer)
                        .map_err(|_| GaugeError::ValueOutOfRange { value: value.to_string() })
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);
impl_try_from_integer!(i128, isize, u64, u128, usize);

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Number::Float(f64::from(value))
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

#[cfg(test)]
mod tests {
    use super::Number;
    use crate::{GaugeError, ValueKind};

    #[test]
    fn test_conversions() {
        assert_eq!(Number::from(7u8), Number::Integer(7));
        assert_eq!(Number::from(-3i32), Number::Integer(-3));
        assert_eq!(Number::from(u32::MAX), Number::Integer(i64::from(u32::MAX)));
        assert_eq!(Number::from(1.5f32), Number::Float(1.5));
        assert_eq!(Number::from(2.0f64).kind(), ValueKind::Float);
        assert_eq!(Number::from(2i64).as_f64(), 2.0);
    }

    #[test]
    fn test_wide_integer_conversions() {
        assert_eq!(Number::try_from(42usize), Ok(Number::Integer(42)));
        assert_eq!(Number::try_from(-42isize), Ok(Number::Integer(-42)));
        assert_eq!(Number::try_from(i64::MAX as u64), Ok(Number::Integer(i64::MAX)));
        assert_eq!(Number::try_from(i128::from(i64::MIN)), Ok(Number::Integer(i64::MIN)));

        assert_eq!(
            Number::try_from(i64::MAX as u64 + 1),
            Err(GaugeError::ValueOutOfRange { value: "9223372036854775808".to_string() })
        );
        assert!(Number::try_from(i128::MIN).is_err());
        assert!(Number::try_from(u128::MAX).is_err());
    }
}
