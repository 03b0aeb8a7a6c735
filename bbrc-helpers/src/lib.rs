use num_traits::ToPrimitive;

use std::fmt::Display;

// Include submodules
mod common;
mod error;

// Re-export types from submodules
pub use common::Value;
pub use error::{ErrorKind, StatsError};

/// A class label: a string or a recognized number.
///
/// Typed labels (`&str`, `i32`, `f64`, ...) are always valid. `Value` carries
/// untyped data and is only a label when it is not `Value::Missing`.
pub trait Label: PartialEq + Display {
    fn is_label(&self) -> bool {
        true
    }
}

/// An occurrence indicator attached to a sample.
pub trait Occurrence: Display {
    /// The count, or `None` when the element is not a non-negative integer.
    fn count(&self) -> Option<u128>;
}

macro_rules! impl_integer {
    ($($t:ty),*) => {
        $(
            impl Label for $t {}

            impl Occurrence for $t {
                fn count(&self) -> Option<u128> {
                    self.to_u128()
                }
            }
        )*
    };
}

impl_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Label for f32 {}
impl Label for f64 {}
impl Label for str {}
impl Label for String {}

impl Label for Value {
    fn is_label(&self) -> bool {
        !self.is_missing()
    }
}

impl Occurrence for Value {
    fn count(&self) -> Option<u128> {
        match self {
            Value::Integer(i) => i.to_u128(),
            _ => None,
        }
    }
}

impl<T: Label + ?Sized> Label for &T {
    fn is_label(&self) -> bool {
        (**self).is_label()
    }
}

impl<T: Occurrence + ?Sized> Occurrence for &T {
    fn count(&self) -> Option<u128> {
        (**self).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_labels_are_always_valid() {
        assert!("foo".is_label());
        assert!(String::from("bar").is_label());
        assert!(3_i32.is_label());
        assert!(0.5_f64.is_label());
    }

    #[test]
    fn test_value_labels() {
        assert!(Value::from("a").is_label());
        assert!(Value::from(1).is_label());
        assert!(Value::from(2.5).is_label());
        assert!(!Value::Missing.is_label());
    }

    #[test]
    fn test_integer_occurrences() {
        assert_eq!(0_u8.count(), Some(0));
        assert_eq!(7_usize.count(), Some(7));
        assert_eq!(3_i32.count(), Some(3));
        assert_eq!((-1_i32).count(), None);
        assert_eq!((-5_i64).count(), None);
    }

    #[test]
    fn test_wide_counts_are_kept() {
        let above_u64 = u128::from(u64::MAX) + 1;
        assert_eq!(above_u64.count(), Some(above_u64));
        assert_eq!(u128::MAX.count(), Some(u128::MAX));
        assert_eq!(i128::MIN.count(), None);
    }

    #[test]
    fn test_value_occurrences() {
        assert_eq!(Value::from(2).count(), Some(2));
        assert_eq!(Value::from(-2).count(), None);
        // A real is not an integer, even when it is whole.
        assert_eq!(Value::from(1.0).count(), None);
        assert_eq!(Value::from("1").count(), None);
        assert_eq!(Value::Missing.count(), None);
    }
}
