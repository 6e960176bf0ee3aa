use std::fmt;

/// Value kind.
///
/// Defines the kind of value held by every point of a gauge.  A gauge picks its kind once, at
/// construction, and all of its points, snapshots, and descriptor share it:
/// - integer (64-bit signed)
/// - floating-point (64-bit)
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum ValueKind {
    /// Integer type.
    Integer,
    /// Floating-point type.
    Float,
}

impl ValueKind {
    /// Gets the name of the descriptor type for gauges of this kind.
    pub fn descriptor_type(&self) -> &'static str {
        match self {
            ValueKind::Integer => "GAUGE_INT64",
            ValueKind::Float => "GAUGE_DOUBLE",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Integer => f.write_str("integer"),
            ValueKind::Float => f.write_str("floating-point"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ValueKind;

    #[test]
    fn test_descriptor_type() {
        assert_eq!(ValueKind::Integer.descriptor_type(), "GAUGE_INT64");
        assert_eq!(ValueKind::Float.descriptor_type(), "GAUGE_DOUBLE");
        assert_eq!(ValueKind::Float.to_string(), "floating-point");
    }
}
